//! Fixed-content scaffold files and manifest merge tables.
//!
//! Everything in this module is literal output: the converter writes these
//! bytes as-is. Keep them in sync with the upstream Svelte template.

/// TypeScript project config, extending the shared Svelte base config.
pub const TSCONFIG_JSON: &str = r#"{
  "extends": "@tsconfig/svelte/tsconfig.json",

  "include": ["src/**/*"],
  "exclude": ["node_modules/*", "__sapper__/*", "public/*"]
}"#;

/// Preprocessor wiring: svelte-check and editor tooling read this file.
pub const SVELTE_CONFIG_JS: &str = r#"import sveltePreprocess from 'svelte-preprocess';

export default {
  preprocess: sveltePreprocess()
};
"#;

/// VS Code extension recommendation, written under `.vscode/`.
pub const VSCODE_EXTENSIONS_JSON: &str = r#"{
  "recommendations": ["svelte.svelte-vscode"]
}"#;

/// devDependencies merged into `package.json`. Same-named keys are
/// overwritten with these values; every other key is preserved.
pub const DEV_DEPENDENCIES: &[(&str, &str)] = &[
    ("svelte-check", "^2.0.0"),
    ("svelte-preprocess", "^4.0.0"),
    ("@rollup/plugin-typescript", "^8.0.0"),
    ("typescript", "^4.0.0"),
    ("tslib", "^2.0.0"),
    ("@tsconfig/svelte", "^2.0.0"),
];

/// Scripts merged into `package.json`.
pub const SCRIPTS: &[(&str, &str)] = &[("check", "svelte-check")];
