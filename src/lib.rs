//! # svelte-ts-setup
//!
//! One-time scaffold converter for the Svelte starter template: rewrites a
//! freshly cloned rollup/plain-JS project in place so it uses TypeScript.
//!
//! The converter never invents project structure. It edits the files the
//! template is known to contain — `package.json`, `src/main.js`,
//! `src/App.svelte`, `rollup.config.js` — at fixed literal anchors, and
//! drops in three fixed-content config files. Every edit is applied at most
//! once: re-running against an already-converted project is a no-op.

pub mod assets;
pub mod convert;
pub mod edits;
pub mod manifest;

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Diagnostic
// ---------------------------------------------------------------------------

/// A structured diagnostic emitted during conversion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Diagnostic {
    pub level: DiagnosticLevel,
    pub message: String,
    pub context: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiagnosticLevel {
    Warning,
    Info,
}

// ---------------------------------------------------------------------------
// ConvertPlan
// ---------------------------------------------------------------------------

/// Describes WHAT to convert.
#[derive(Debug, Clone)]
pub struct ConvertPlan {
    /// The template project directory, always explicit. The converter never
    /// infers a target from its own location.
    pub project_dir: PathBuf,
}

// ---------------------------------------------------------------------------
// ConvertOptions
// ---------------------------------------------------------------------------

/// Describes HOW to convert.
#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    /// Strict mode (default: false). A missing edit anchor aborts the
    /// conversion instead of producing a warning diagnostic.
    pub strict: bool,
    /// Cleanup step: path of the template's setup script to delete after a
    /// successful conversion. `None` means no file is ever removed.
    pub cleanup: Option<PathBuf>,
}

// ---------------------------------------------------------------------------
// ConvertReport
// ---------------------------------------------------------------------------

/// The sealed output of a successful conversion.
/// The CLI consumes this as-is — no post-hoc filesystem inspection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConvertReport {
    /// Diagnostics collected during the conversion (skips, missing anchors).
    pub diagnostics: Vec<Diagnostic>,
    /// Whether `node_modules/` exists in the target, in which case the
    /// caller should be told to reinstall dependencies.
    pub reinstall_required: bool,
}

impl ConvertReport {
    /// True if any diagnostic is a warning.
    pub fn has_warnings(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.level == DiagnosticLevel::Warning)
    }
}

// ---------------------------------------------------------------------------
// ConvertError
// ---------------------------------------------------------------------------

/// Errors that abort the conversion. There is no rollback: a mid-sequence
/// failure leaves the project partially converted.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse package.json: {0}")]
    ManifestParse(#[from] serde_json::Error),

    #[error("Anchor `{anchor}` not found in {file}")]
    MissingAnchor { file: String, anchor: String },

    #[error("Entry point not found: neither {} nor {} exists", js.display(), ts.display())]
    MissingEntryPoint { js: PathBuf, ts: PathBuf },

    #[error("Both {} and {} exist; refusing to overwrite the TypeScript entry point", js.display(), ts.display())]
    EntryPointCollision { js: PathBuf, ts: PathBuf },
}

// ---------------------------------------------------------------------------
// Public API — Single Conversion Pipeline
// ---------------------------------------------------------------------------

/// Convert a Svelte starter template to TypeScript, in place.
///
/// **There is only one conversion codepath.** Every invocation — fresh
/// template, partially converted project, strict or lenient — runs through
/// the same fixed step sequence:
///
/// 1. Merge TypeScript devDependencies and the `check` script into
///    `package.json` (unrelated keys preserved)
/// 2. Rename `src/main.js` → `src/main.ts`
/// 3. Apply the `App.svelte` and `rollup.config.js` anchor edits
/// 4. Write `tsconfig.json`, `svelte.config.js`, `.vscode/extensions.json`
/// 5. Optionally delete the setup script the converter replaced
///
/// Returns a sealed [`ConvertReport`]; any filesystem or parse error aborts
/// the remaining steps and propagates unchanged.
pub fn convert_template(
    plan: ConvertPlan,
    opts: ConvertOptions,
) -> Result<ConvertReport, ConvertError> {
    convert::execute_convert(plan, opts)
}
