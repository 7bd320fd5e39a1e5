//! Hygiene: enforces coding standards at test time
//!
//! Scans the engine's production sources (`src/`, excluding `*_test.rs`) for
//! patterns that either crash the WASM module or swallow errors. Each
//! pattern has a budget (ideally zero). The budget never grows: fix an
//! existing hit before adding a new one.

use std::fs;
use std::path::Path;

struct Budget {
    pattern: &'static str,
    max: usize,
    why: &'static str,
}

// Panics abort the WASM instance and take the page's canvas with them.
const PANICS: &[Budget] = &[
    Budget { pattern: ".unwrap()", max: 0, why: "propagate or match instead" },
    Budget { pattern: ".expect(", max: 0, why: "propagate or match instead" },
    Budget { pattern: "panic!(", max: 0, why: "return an empty action list" },
    Budget { pattern: "unreachable!(", max: 0, why: "make the state unrepresentable" },
    Budget { pattern: "todo!(", max: 0, why: "unfinished code path" },
    Budget { pattern: "unimplemented!(", max: 0, why: "unfinished code path" },
];

// Silent loss.
const DISCARDS: &[Budget] = &[
    Budget { pattern: "let _ =", max: 0, why: "inspect the result" },
    Budget { pattern: ".ok()", max: 0, why: "inspect the error" },
];

// Style / structure.
const STYLE: &[Budget] = &[
    Budget { pattern: "#[allow(dead_code)]", max: 0, why: "delete it instead" },
    Budget { pattern: "println!(", max: 0, why: "stdout goes nowhere in the browser" },
    Budget { pattern: "dbg!(", max: 0, why: "debug leftovers" },
];

struct SourceFile {
    path: String,
    content: String,
}

fn source_files() -> Vec<SourceFile> {
    let mut files = Vec::new();
    collect_rs_files(Path::new("src"), &mut files);
    files
}

fn collect_rs_files(dir: &Path, out: &mut Vec<SourceFile>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect_rs_files(&path, out);
            continue;
        }
        let path_str = path.to_string_lossy().to_string();
        if !path_str.ends_with(".rs") || path_str.ends_with("_test.rs") {
            continue;
        }
        if let Ok(content) = fs::read_to_string(&path) {
            out.push(SourceFile { path: path_str, content });
        }
    }
}

/// Budgets exceeded, each with the offending files.
fn violations(files: &[SourceFile], budgets: &[Budget]) -> Vec<String> {
    budgets
        .iter()
        .filter_map(|budget| {
            let hits: Vec<(String, usize)> = files
                .iter()
                .map(|f| (f.path.clone(), f.content.lines().filter(|l| l.contains(budget.pattern)).count()))
                .filter(|(_, n)| *n > 0)
                .collect();
            let found: usize = hits.iter().map(|(_, n)| n).sum();
            (found > budget.max).then(|| {
                let listing = hits.iter().map(|(p, n)| format!("    {p}: {n}")).collect::<Vec<_>>().join("\n");
                format!("`{}` found {found}, max {} ({})\n{listing}", budget.pattern, budget.max, budget.why)
            })
        })
        .collect()
}

fn assert_within(budgets: &[Budget]) {
    let files = source_files();
    assert!(!files.is_empty(), "no sources found; run from the crate root");
    let failures = violations(&files, budgets);
    assert!(failures.is_empty(), "budget exceeded:\n{}", failures.join("\n"));
}

#[test]
fn panic_budgets() {
    assert_within(PANICS);
}

#[test]
fn discard_budgets() {
    assert_within(DISCARDS);
}

#[test]
fn style_budgets() {
    assert_within(STYLE);
}
