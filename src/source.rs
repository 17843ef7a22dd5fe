use std::collections::VecDeque;

/// A single line of code together with where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLine {
    /// 1-based position in the unfiltered input.
    pub number: usize,
    pub text: String,
    pub depth: usize,
}

impl SourceLine {
    /// Returns `None` for lines without any non-space character, since those
    /// have no indentation depth.
    pub fn new(number: usize, text: impl Into<String>) -> Option<Self> {
        let text = text.into();
        let depth = indentation_depth(&text)?;
        Some(Self {
            number,
            text,
            depth,
        })
    }

    pub fn trimmed(&self) -> &str {
        self.text.trim()
    }
}

/// Index of the first character that is not a literal space.
///
/// Tabs are not indentation: a line starting with a tab has depth 0.
pub fn indentation_depth(line: &str) -> Option<usize> {
    line.char_indices()
        .find(|&(_, c)| c != ' ')
        .map(|(index, _)| index)
}

/// FIFO of code lines consumed by the block parser.
pub type LineQueue = VecDeque<SourceLine>;

/// Drops blank lines and comment lines (first character `#`) and numbers the
/// survivors by their position in `source`.
pub fn code_lines(source: &str) -> LineQueue {
    source
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .filter(|(_, line)| !line.starts_with('#'))
        .filter_map(|(index, line)| SourceLine::new(index + 1, line))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    #[test]
    fn depth_counts_leading_spaces() {
        assert_eq!(indentation_depth("x = 1"), Some(0));
        assert_eq!(indentation_depth("    print(x)"), Some(4));
        assert_eq!(indentation_depth("\tprint(x)"), Some(0));
        assert_eq!(indentation_depth("   "), None);
        assert_eq!(indentation_depth(""), None);
    }

    #[test]
    fn filters_blank_and_comment_lines() {
        let source = indoc! {"
            # leading comment
            x = 1

            if x:
                # indented hash is code
                print(x)
        "};
        let lines = code_lines(source);
        let summary: Vec<_> = lines
            .iter()
            .map(|line| (line.number, line.depth, line.trimmed()))
            .collect();
        assert_eq!(
            summary,
            vec![
                (2, 0, "x = 1"),
                (4, 0, "if x:"),
                (5, 4, "# indented hash is code"),
                (6, 4, "print(x)"),
            ]
        );
    }

    #[test]
    fn blank_lines_have_no_source_line() {
        assert!(SourceLine::new(1, "    ").is_none());
        assert_eq!(SourceLine::new(3, "  y = 2").map(|line| line.depth), Some(2));
    }
}
