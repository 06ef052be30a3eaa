//! Anchor-based text edits.
//!
//! Each edit locates a fixed literal anchor in a file and replaces its first
//! occurrence. Before touching the text, the edit checks for its own output
//! fragment — an already-converted file is skipped, never double-edited.

use regex::Regex;

// ---------------------------------------------------------------------------
// Edit descriptor
// ---------------------------------------------------------------------------

/// How to tell that an edit already ran.
#[derive(Debug, Clone, Copy)]
pub enum AppliedMarker {
    /// The output fragment, searched for literally.
    Literal(&'static str),
    /// A regex over the file text (anchored attributes can vary in quoting).
    Pattern(&'static str),
}

/// A single first-occurrence anchor edit.
#[derive(Debug, Clone, Copy)]
pub struct Edit {
    /// Short human-readable name, used in diagnostics.
    pub label: &'static str,
    /// Literal text to locate.
    pub anchor: &'static str,
    /// Text the first occurrence of the anchor becomes. Insertions keep the
    /// anchor inside the replacement.
    pub replacement: &'static str,
    pub applied: AppliedMarker,
}

/// Outcome of [`apply_edit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOutcome {
    /// The anchor was found; the returned string is the edited text.
    Applied(String),
    /// The output fragment is already present; nothing to do.
    AlreadyApplied,
    /// Neither the anchor nor the output fragment exist in the text.
    AnchorMissing,
}

/// Apply one edit to `text`, first-occurrence only.
pub fn apply_edit(text: &str, edit: &Edit) -> EditOutcome {
    if marker_present(text, &edit.applied) {
        return EditOutcome::AlreadyApplied;
    }
    if !text.contains(edit.anchor) {
        return EditOutcome::AnchorMissing;
    }
    EditOutcome::Applied(text.replacen(edit.anchor, edit.replacement, 1))
}

fn marker_present(text: &str, marker: &AppliedMarker) -> bool {
    match marker {
        AppliedMarker::Literal(fragment) => text.contains(fragment),
        // Patterns are compile-time constants; compilation cannot fail.
        AppliedMarker::Pattern(source) => Regex::new(source).unwrap().is_match(text),
    }
}

// ---------------------------------------------------------------------------
// App.svelte edits
// ---------------------------------------------------------------------------

/// Matches a script tag that already declares the TypeScript dialect,
/// whatever the attribute quoting.
const SCRIPT_LANG_TS: &str = r#"<script[^>]*lang=["']ts["']"#;

pub const APP_SVELTE_EDITS: &[Edit] = &[
    Edit {
        label: "script lang=\"ts\" attribute",
        anchor: "<script>",
        replacement: "<script lang=\"ts\">",
        applied: AppliedMarker::Pattern(SCRIPT_LANG_TS),
    },
    Edit {
        label: "name prop type annotation",
        anchor: "export let name;",
        replacement: "export let name: string;",
        applied: AppliedMarker::Literal("export let name: string;"),
    },
];

// ---------------------------------------------------------------------------
// rollup.config.js edits
// ---------------------------------------------------------------------------

pub const ROLLUP_CONFIG_EDITS: &[Edit] = &[
    Edit {
        label: "typescript plugin imports",
        anchor: "'rollup-plugin-livereload';",
        replacement: "'rollup-plugin-livereload';\nimport sveltePreprocess from 'svelte-preprocess';\nimport typescript from '@rollup/plugin-typescript';",
        applied: AppliedMarker::Literal("import typescript from '@rollup/plugin-typescript';"),
    },
    Edit {
        label: "TypeScript entry point",
        anchor: "input: 'src/main.js'",
        replacement: "input: 'src/main.ts'",
        applied: AppliedMarker::Literal("input: 'src/main.ts'"),
    },
    Edit {
        label: "svelte-preprocess wiring",
        anchor: "compilerOptions:",
        replacement: "preprocess: sveltePreprocess({ sourceMap: !production }),\n\t\t\tcompilerOptions:",
        applied: AppliedMarker::Literal("preprocess: sveltePreprocess("),
    },
    Edit {
        label: "typescript plugin invocation",
        anchor: "commonjs(),",
        replacement: "commonjs(),\n\t\ttypescript({\n\t\t\tsourceMap: !production,\n\t\t\tinlineSources: !production\n\t\t}),",
        applied: AppliedMarker::Literal("typescript({"),
    },
];

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
