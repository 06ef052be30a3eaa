//! Re-run safety and the explicit cleanup step.
//!
//! The upstream template's setup script re-appended its rollup.config.js
//! fragments on every run. Here every edit detects its own prior
//! application, so converting twice must produce byte-identical files.

use std::fs;
use std::path::{Path, PathBuf};

use pretty_assertions::assert_eq;
use svelte_ts_setup::{convert_template, ConvertOptions, ConvertPlan, ConvertReport};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

const PACKAGE_JSON: &str = r#"{
  "name": "svelte-app",
  "version": "1.0.0",
  "scripts": { "build": "rollup -c" },
  "devDependencies": { "rollup": "^2.3.4", "svelte": "^3.0.0" }
}"#;

const APP_SVELTE: &str = "<script>\n\texport let name;\n</script>\n\n<main>\n\t<h1>Hello {name}!</h1>\n</main>\n";

const ROLLUP_CONFIG: &str = "import svelte from 'rollup-plugin-svelte';\nimport commonjs from '@rollup/plugin-commonjs';\nimport livereload from 'rollup-plugin-livereload';\n\nconst production = !process.env.ROLLUP_WATCH;\n\nexport default {\n\tinput: 'src/main.js',\n\tplugins: [\n\t\tsvelte({\n\t\t\tcompilerOptions: {\n\t\t\t\tdev: !production\n\t\t\t}\n\t\t}),\n\t\tcommonjs(),\n\t]\n};\n";

fn scaffold_template(dir: &Path) {
    fs::create_dir_all(dir.join("src")).expect("Failed to create src/");
    fs::write(dir.join("package.json"), PACKAGE_JSON).expect("Failed to write package.json");
    fs::write(dir.join("src/main.js"), "import App from './App.svelte';\n")
        .expect("Failed to write main.js");
    fs::write(dir.join("src/App.svelte"), APP_SVELTE).expect("Failed to write App.svelte");
    fs::write(dir.join("rollup.config.js"), ROLLUP_CONFIG)
        .expect("Failed to write rollup.config.js");
}

fn convert_with(dir: &Path, opts: ConvertOptions) -> ConvertReport {
    convert_template(
        ConvertPlan {
            project_dir: dir.to_path_buf(),
        },
        opts,
    )
    .expect("conversion failed")
}

fn snapshot(dir: &Path, files: &[&str]) -> Vec<(PathBuf, String)> {
    files
        .iter()
        .map(|rel| {
            let path = dir.join(rel);
            let content = fs::read_to_string(&path).expect("Failed to read snapshot file");
            (path, content)
        })
        .collect()
}

const CONVERTED_FILES: &[&str] = &[
    "package.json",
    "src/main.ts",
    "src/App.svelte",
    "rollup.config.js",
    "tsconfig.json",
    "svelte.config.js",
    ".vscode/extensions.json",
];

// ===========================================================================
// Converting twice is a no-op
// ===========================================================================

#[test]
fn second_conversion_produces_identical_bytes() {
    let dir = tempfile::tempdir().unwrap();
    scaffold_template(dir.path());

    convert_with(dir.path(), ConvertOptions::default());
    let first = snapshot(dir.path(), CONVERTED_FILES);

    let report = convert_with(dir.path(), ConvertOptions::default());
    let second = snapshot(dir.path(), CONVERTED_FILES);

    assert_eq!(first, second);
    assert!(!report.has_warnings());
}

#[test]
fn second_conversion_does_not_reinsert_rollup_fragments() {
    let dir = tempfile::tempdir().unwrap();
    scaffold_template(dir.path());

    convert_with(dir.path(), ConvertOptions::default());
    convert_with(dir.path(), ConvertOptions::default());

    let config = fs::read_to_string(dir.path().join("rollup.config.js")).unwrap();
    assert_eq!(
        config
            .match_indices("import typescript from '@rollup/plugin-typescript';")
            .count(),
        1
    );
    assert_eq!(config.match_indices("preprocess: sveltePreprocess(").count(), 1);
    assert_eq!(config.match_indices("typescript({").count(), 1);
}

#[test]
fn strict_rerun_still_succeeds() {
    let dir = tempfile::tempdir().unwrap();
    scaffold_template(dir.path());

    convert_with(dir.path(), ConvertOptions::default());

    // Already-applied edits are skips, not missing anchors, so strict mode
    // must not trip on an already-converted project.
    let report = convert_with(
        dir.path(),
        ConvertOptions {
            strict: true,
            cleanup: None,
        },
    );
    assert!(!report.has_warnings());
}

// ===========================================================================
// Cleanup step
// ===========================================================================

#[test]
fn cleanup_never_runs_unless_requested() {
    let dir = tempfile::tempdir().unwrap();
    scaffold_template(dir.path());
    let scripts_dir = dir.path().join("scripts");
    fs::create_dir_all(&scripts_dir).unwrap();
    let script = scripts_dir.join("setupTypeScript.js");
    fs::write(&script, "// setup script\n").unwrap();

    convert_with(dir.path(), ConvertOptions::default());

    assert!(script.exists());
}

#[test]
fn cleanup_removes_script_metadata_file_and_empty_directory() {
    let dir = tempfile::tempdir().unwrap();
    scaffold_template(dir.path());
    let scripts_dir = dir.path().join("scripts");
    fs::create_dir_all(&scripts_dir).unwrap();
    let script = scripts_dir.join("setupTypeScript.js");
    fs::write(&script, "// setup script\n").unwrap();
    fs::write(scripts_dir.join(".DS_Store"), [0u8; 4]).unwrap();

    convert_with(
        dir.path(),
        ConvertOptions {
            strict: false,
            cleanup: Some(script.clone()),
        },
    );

    assert!(!script.exists());
    assert!(!scripts_dir.join(".DS_Store").exists());
    assert!(!scripts_dir.exists());
}

#[test]
fn cleanup_leaves_directory_with_other_files_alone() {
    let dir = tempfile::tempdir().unwrap();
    scaffold_template(dir.path());
    let scripts_dir = dir.path().join("scripts");
    fs::create_dir_all(&scripts_dir).unwrap();
    let script = scripts_dir.join("setupTypeScript.js");
    fs::write(&script, "// setup script\n").unwrap();
    fs::write(scripts_dir.join("deploy.sh"), "#!/bin/sh\n").unwrap();

    convert_with(
        dir.path(),
        ConvertOptions {
            strict: false,
            cleanup: Some(script.clone()),
        },
    );

    assert!(!script.exists());
    assert!(scripts_dir.join("deploy.sh").exists());
    assert!(scripts_dir.exists());
}

#[test]
fn cleanup_of_missing_script_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    scaffold_template(dir.path());

    let result = convert_template(
        ConvertPlan {
            project_dir: dir.path().to_path_buf(),
        },
        ConvertOptions {
            strict: false,
            cleanup: Some(dir.path().join("scripts/setupTypeScript.js")),
        },
    );

    assert!(result.is_err());
}
