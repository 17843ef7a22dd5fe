use rustc_hash::FxHashMap;

use crate::value::Value;

/// Variable bindings for one program run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProgramState {
    variables: FxHashMap<String, Value>,
}

impl ProgramState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.variables.get(name)
    }

    /// Binds `name`, overwriting any previous value.
    pub fn set(&mut self, name: impl Into<String>, value: Value) {
        self.variables.insert(name.into(), value);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.variables.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    /// Bindings sorted by name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        let mut entries: Vec<_> = self
            .variables
            .iter()
            .map(|(name, value)| (name.as_str(), value))
            .collect();
        entries.sort_by(|left, right| left.0.cmp(right.0));
        entries.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_overwrites_previous_binding() {
        let mut state = ProgramState::new();
        assert!(state.is_empty());
        state.set("x", Value::Integer(1));
        state.set("x", Value::from("one"));
        assert_eq!(state.get("x"), Some(&Value::from("one")));
        assert_eq!(state.len(), 1);
        assert!(!state.contains("y"));
    }

    #[test]
    fn iterates_in_name_order() {
        let mut state = ProgramState::new();
        state.set("b", Value::Integer(2));
        state.set("a", Value::Integer(1));
        let names: Vec<_> = state.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["a", "b"]);
    }
}
