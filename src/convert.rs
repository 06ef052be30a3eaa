//! Core conversion logic.
//!
//! This module runs the full conversion pipeline, in strict order:
//! 1. Merge TypeScript devDependencies + `check` script into `package.json`
//! 2. Rename `src/main.js` → `src/main.ts`
//! 3. Apply the `App.svelte` anchor edits
//! 4. Apply the `rollup.config.js` anchor edits
//! 5. Write `tsconfig.json` and `svelte.config.js`
//! 6. Optionally delete the setup script the converter replaced
//! 7. Write `.vscode/extensions.json`
//!
//! Later steps depend on earlier ones having completed; any error aborts the
//! remaining sequence with no rollback.

use std::fs;
use std::path::Path;

use crate::assets;
use crate::edits::{apply_edit, Edit, EditOutcome, APP_SVELTE_EDITS, ROLLUP_CONFIG_EDITS};
use crate::manifest;
use crate::{
    ConvertError, ConvertOptions, ConvertPlan, ConvertReport, Diagnostic, DiagnosticLevel,
};

/// Execute the conversion pipeline.
///
/// **Invariant:** there is no alternative codepath. Fresh template, partially
/// converted project, strict or lenient — every invocation runs this exact
/// sequence, and every edit detects its own prior application.
pub fn execute_convert(
    plan: ConvertPlan,
    opts: ConvertOptions,
) -> Result<ConvertReport, ConvertError> {
    let mut diagnostics: Vec<Diagnostic> = Vec::new();
    let root = &plan.project_dir;

    // Pre-flight: a directory without a manifest is not the template (clean
    // NotFound instead of a bare read error).
    let manifest_path = root.join("package.json");
    if !manifest_path.exists() {
        return Err(ConvertError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("Manifest not found: {}", manifest_path.display()),
        )));
    }

    manifest::merge_manifest(&manifest_path)?;

    rename_entry_point(root, &mut diagnostics)?;

    apply_edits(
        &root.join("src").join("App.svelte"),
        APP_SVELTE_EDITS,
        opts.strict,
        &mut diagnostics,
    )?;

    apply_edits(
        &root.join("rollup.config.js"),
        ROLLUP_CONFIG_EDITS,
        opts.strict,
        &mut diagnostics,
    )?;

    fs::write(root.join("tsconfig.json"), assets::TSCONFIG_JSON)?;
    fs::write(root.join("svelte.config.js"), assets::SVELTE_CONFIG_JS)?;

    if let Some(script) = &opts.cleanup {
        cleanup_setup_script(script, &mut diagnostics)?;
    }

    let vscode_dir = root.join(".vscode");
    fs::create_dir_all(&vscode_dir)?;
    fs::write(
        vscode_dir.join("extensions.json"),
        assets::VSCODE_EXTENSIONS_JSON,
    )?;

    Ok(ConvertReport {
        diagnostics,
        reinstall_required: root.join("node_modules").exists(),
    })
}

// ---------------------------------------------------------------------------
// Entry point rename
// ---------------------------------------------------------------------------

/// Rename `src/main.js` to `src/main.ts`, content untouched.
///
/// A project that only has `main.ts` is already converted and is skipped;
/// a project with both files is ambiguous and refused.
fn rename_entry_point(root: &Path, diagnostics: &mut Vec<Diagnostic>) -> Result<(), ConvertError> {
    let js = root.join("src").join("main.js");
    let ts = root.join("src").join("main.ts");

    match (js.exists(), ts.exists()) {
        (true, true) => Err(ConvertError::EntryPointCollision { js, ts }),
        (false, false) => Err(ConvertError::MissingEntryPoint { js, ts }),
        (false, true) => {
            diagnostics.push(Diagnostic {
                level: DiagnosticLevel::Info,
                message: "Entry point is already src/main.ts, skipped rename".into(),
                context: None,
            });
            Ok(())
        }
        (true, false) => {
            fs::rename(&js, &ts)?;
            Ok(())
        }
    }
}

// ---------------------------------------------------------------------------
// Anchor edit application
// ---------------------------------------------------------------------------

/// Apply an edit table to one file, writing it back only if it changed.
///
/// Missing anchors are warnings in lenient mode and hard errors in strict
/// mode; already-applied edits are informational skips either way.
fn apply_edits(
    path: &Path,
    table: &[Edit],
    strict: bool,
    diagnostics: &mut Vec<Diagnostic>,
) -> Result<(), ConvertError> {
    let file = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    let original = fs::read_to_string(path)?;
    let mut text = original.clone();

    for edit in table {
        match apply_edit(&text, edit) {
            EditOutcome::Applied(next) => text = next,
            EditOutcome::AlreadyApplied => diagnostics.push(Diagnostic {
                level: DiagnosticLevel::Info,
                message: format!("{}: {} already applied, skipped", file, edit.label),
                context: None,
            }),
            EditOutcome::AnchorMissing => {
                if strict {
                    return Err(ConvertError::MissingAnchor {
                        file,
                        anchor: edit.anchor.to_string(),
                    });
                }
                diagnostics.push(Diagnostic {
                    level: DiagnosticLevel::Warning,
                    message: format!("{}: anchor `{}` not found, edit skipped", file, edit.anchor),
                    context: Some(format!(
                        "The {} was not applied; the file may have been modified since cloning",
                        edit.label
                    )),
                });
            }
        }
    }

    if text != original {
        fs::write(path, text)?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Cleanup
// ---------------------------------------------------------------------------

/// Delete the template's setup script, then sweep the directory it lived in:
/// a lone leftover `.DS_Store` is removed, and the directory itself is
/// removed once empty. Deletion failures are fatal.
fn cleanup_setup_script(
    script: &Path,
    diagnostics: &mut Vec<Diagnostic>,
) -> Result<(), ConvertError> {
    fs::remove_file(script)?;
    diagnostics.push(Diagnostic {
        level: DiagnosticLevel::Info,
        message: format!("Removed setup script {}", script.display()),
        context: None,
    });

    let Some(dir) = script.parent() else {
        return Ok(());
    };

    let leftovers: Vec<_> = fs::read_dir(dir)?.collect::<Result<_, _>>()?;
    if leftovers.len() == 1 && leftovers[0].file_name() == ".DS_Store" {
        fs::remove_file(leftovers[0].path())?;
    }

    if fs::read_dir(dir)?.next().is_none() {
        fs::remove_dir(dir)?;
        diagnostics.push(Diagnostic {
            level: DiagnosticLevel::Info,
            message: format!("Removed empty directory {}", dir.display()),
            context: None,
        });
    }
    Ok(())
}
