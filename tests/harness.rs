//! Golden-file test harness for export-equals.
//!
//! Discovers `.input.ts` / `.input.d.ts` files under `tests/fixtures/`, runs
//! the pipeline (parse → transform → codegen, comments included), and compares the output
//! against the matching `.expected.ts` / `.expected.d.ts` file, ignoring
//! whitespace.
//!
//! Per fixture, an optional `NAME.options.json` holds the transform options,
//! and `NAME.expected.err` replaces the expected output with a substring the
//! error message must contain.
//!
//! Set `EE_UPDATE_FIXTURES=1` to overwrite expected files with actual output.

use std::path::{Path, PathBuf};

use anyhow::Result;
use ee_ast::TransformOptions;
use ee_codegen::emit_module;
use ee_parser::parse_file;
use ee_transform::{Compilation, DefaultExportTransform, RootFiles, SyntacticExports};

const INPUT_EXTS: [&str; 2] = [".input.d.ts", ".input.ts"];

fn fixtures_dir() -> PathBuf {
    // CARGO_MANIFEST_DIR is crates/ee_test/, so go up two levels to workspace root.
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .join("tests")
        .join("fixtures")
}

/// Split `dir/name.input.ts` into (`dir/name`, `.ts`).
fn fixture_stem(path: &Path) -> Option<(String, &'static str)> {
    let path = path.to_str()?;
    INPUT_EXTS.iter().copied().find_map(|ext: &'static str| {
        path.strip_suffix(ext)
            .map(|stem| (stem.to_string(), &ext[".input".len()..]))
    })
}

fn collect_input_files(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = walkdir(dir)
        .into_iter()
        .filter(|path| fixture_stem(path).is_some())
        .collect();
    files.sort();
    files
}

fn walkdir(dir: &Path) -> Vec<PathBuf> {
    let mut result = Vec::new();
    if let Ok(entries) = std::fs::read_dir(dir) {
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                result.extend(walkdir(&path));
            } else {
                result.push(path);
            }
        }
    }
    result
}

fn load_options(stem: &str) -> Result<TransformOptions> {
    let path = PathBuf::from(format!("{stem}.options.json"));
    if !path.exists() {
        return Ok(TransformOptions::default());
    }
    Ok(serde_json::from_str(&std::fs::read_to_string(path)?)?)
}

fn run_pipeline(source: &str, filename: &str, options: TransformOptions) -> Result<String> {
    let parsed = parse_file(source, filename)?;
    let compilation = Compilation::new(RootFiles::new([filename]), SyntacticExports);
    let file = DefaultExportTransform::new(&compilation, options).apply(parsed.file)?;

    emit_module(&parsed.source_map, &file.module, Some(&parsed.comments))
}

fn squash(code: &str) -> String {
    code.split_whitespace().collect()
}

#[test]
fn golden_file_tests() {
    let fixtures = fixtures_dir();
    let input_files = collect_input_files(&fixtures);

    assert!(
        !input_files.is_empty(),
        "No test fixtures found in {}",
        fixtures.display()
    );

    let update_mode = std::env::var("EE_UPDATE_FIXTURES").is_ok();
    let mut failures = Vec::new();

    for input_path in &input_files {
        let (stem, ext) = fixture_stem(input_path).unwrap();
        let expected_path = PathBuf::from(format!("{stem}.expected{ext}"));
        let error_path = PathBuf::from(format!("{stem}.expected.err"));

        let test_name = input_path
            .strip_prefix(&fixtures)
            .unwrap()
            .display()
            .to_string();

        let source = match std::fs::read_to_string(input_path) {
            Ok(s) => s,
            Err(e) => {
                failures.push(format!("{test_name}: failed to read input: {e}"));
                continue;
            }
        };

        let options = match load_options(&stem) {
            Ok(o) => o,
            Err(e) => {
                failures.push(format!("{test_name}: bad options file: {e}"));
                continue;
            }
        };

        // Fixtures are transformed under their declared dialect.
        let filename = format!("{stem}{ext}");
        let result = run_pipeline(&source, &filename, options);

        if error_path.exists() {
            let expected_err = std::fs::read_to_string(&error_path).unwrap_or_default();
            match result {
                Ok(actual) => failures.push(format!(
                    "{test_name}: expected an error containing {:?}, got output\n{}",
                    expected_err.trim(),
                    actual.trim()
                )),
                Err(e) if !e.to_string().contains(expected_err.trim()) => failures.push(format!(
                    "{test_name}: error mismatch\n--- expected ---\n{}\n--- actual ---\n{e}",
                    expected_err.trim()
                )),
                Err(_) => {}
            }
            continue;
        }

        let actual = match result {
            Ok(s) => s,
            Err(e) => {
                failures.push(format!("{test_name}: pipeline failed: {e}"));
                continue;
            }
        };

        if update_mode {
            if let Err(e) = std::fs::write(&expected_path, &actual) {
                failures.push(format!("{test_name}: failed to write expected: {e}"));
            }
            continue;
        }

        if !expected_path.exists() {
            failures.push(format!(
                "{test_name}: missing expected file: {}",
                expected_path.display()
            ));
            continue;
        }

        let expected = match std::fs::read_to_string(&expected_path) {
            Ok(s) => s,
            Err(e) => {
                failures.push(format!("{test_name}: failed to read expected: {e}"));
                continue;
            }
        };
        if squash(&actual) != squash(&expected) {
            failures.push(format!(
                "{test_name}: output mismatch\n--- expected ---\n{}\n--- actual ---\n{}",
                expected.trim(),
                actual.trim()
            ));
        }
    }

    if !failures.is_empty() {
        panic!(
            "\n{} golden test(s) failed:\n\n{}",
            failures.len(),
            failures.join("\n\n")
        );
    }
}

#[test]
fn roundtrip_tests() {
    let fixtures = fixtures_dir();
    let input_files = collect_input_files(&fixtures);

    let mut failures = Vec::new();

    for input_path in &input_files {
        let (stem, ext) = fixture_stem(input_path).unwrap();
        if Path::new(&format!("{stem}.expected.err")).exists() {
            continue;
        }

        let test_name = input_path
            .file_name()
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();

        let source = match std::fs::read_to_string(input_path) {
            Ok(s) => s,
            Err(e) => {
                failures.push(format!("{test_name}: failed to read: {e}"));
                continue;
            }
        };

        let filename = format!("{stem}{ext}");
        let options = load_options(&stem).unwrap_or_default();
        let output = match run_pipeline(&source, &filename, options) {
            Ok(s) => s,
            Err(e) => {
                failures.push(format!("{test_name}: pipeline failed: {e}"));
                continue;
            }
        };

        // Output must parse again and be left alone by a second pass.
        let reparsed = format!("{stem}.output{ext}");
        if let Err(e) = parse_file(&output, &reparsed) {
            failures.push(format!(
                "{test_name}: output is not valid TypeScript: {e}\n--- output ---\n{}",
                output.trim()
            ));
            continue;
        }

        if options.keep_original_export {
            continue;
        }
        match run_pipeline(&output, &reparsed, options) {
            Ok(again) if squash(&again) == squash(&output) => {}
            Ok(again) => failures.push(format!(
                "{test_name}: second pass changed the output\n--- first ---\n{}\n--- second ---\n{}",
                output.trim(),
                again.trim()
            )),
            Err(e) => failures.push(format!("{test_name}: second pass failed: {e}")),
        }
    }

    if !failures.is_empty() {
        panic!(
            "\n{} roundtrip test(s) failed:\n\n{}",
            failures.len(),
            failures.join("\n\n")
        );
    }
}
