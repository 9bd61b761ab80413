//! Rendering of result trees for the terminal and for tooling.

use anyhow::{Context, Result};
use std::fmt::Write;

use crate::testing::TestResult;

const INDENT: &str = "  ";

/// Renders one line per node followed by a summary line.
///
/// ```text
/// [ERROR] mappings
///   [SUCCESS] customer
///   [ERROR] order: failed to run "order.lua": boom
/// 2 tests: 1 succeeded, 0 failed, 1 errors, 0 ignored
/// ```
pub fn render_text(result: &TestResult) -> String {
    let mut out = String::new();
    render_node(&mut out, result, 0);

    let tally = result.tally();
    let _ = writeln!(
        out,
        "{} tests: {} succeeded, {} failed, {} errors, {} ignored",
        tally.total(),
        tally.success,
        tally.failure,
        tally.error,
        tally.ignored
    );

    out
}

fn render_node(out: &mut String, node: &TestResult, depth: usize) {
    let indent = INDENT.repeat(depth);
    let _ = write!(out, "{}[{}] {}", indent, node.status(), node.name());

    match node.message() {
        Some(message) => {
            let mut lines = message.lines();
            let _ = writeln!(out, ": {}", lines.next().unwrap_or_default());
            for line in lines {
                let _ = writeln!(out, "{}{}{}{}", indent, INDENT, INDENT, line);
            }
        }
        None => out.push('\n'),
    }

    for child in node.children() {
        render_node(out, child, depth + 1);
    }
}

pub fn render_json(result: &TestResult) -> Result<String> {
    serde_json::to_string_pretty(result).context("Failed to serialize test report")
}
