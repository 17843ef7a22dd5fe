#![allow(dead_code)]
use std::fs;

use pyline::ast::Program;
use pyline::parser::parse_source;

pub const WORKLOADS: [(&str, &str); 2] = [
    ("nested", "tests/programs/nested_blocks/program.pyl"),
    ("flat", "tests/programs/assign_print/program.pyl"),
];

pub fn workloads() -> Vec<(String, String)> {
    WORKLOADS
        .iter()
        .map(|(label, path)| (label.to_string(), path.to_string()))
        .collect()
}

pub fn load_source(path: &str) -> String {
    fs::read_to_string(path).unwrap_or_else(|err| panic!("read {path}: {err}"))
}

/// Repeats the workload so the measured work dominates setup noise.
pub fn scaled_source(path: &str, copies: usize) -> String {
    load_source(path).repeat(copies)
}

pub fn load_program(path: &str) -> Program {
    let source = scaled_source(path, 50);
    parse_source(&source).unwrap_or_else(|err| panic!("parse {path}: {err}"))
}
