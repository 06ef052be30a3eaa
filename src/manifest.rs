//! `package.json` read-modify-write.

use std::fs;
use std::path::Path;

use serde_json::{Map, Value};

use crate::assets;
use crate::ConvertError;

/// Merge the fixed TypeScript devDependencies and the `check` script into
/// the manifest at `path`, then rewrite it as 2-space-indented JSON.
///
/// Merge semantics are shallow key assignment: the fixed keys overwrite any
/// same-named entry, every other key is preserved. The `devDependencies`
/// and `scripts` sections are created when absent.
pub fn merge_manifest(path: &Path) -> Result<(), ConvertError> {
    let raw = fs::read_to_string(path)?;
    let mut manifest: Map<String, Value> = serde_json::from_str(&raw)?;

    merge_values(&mut manifest);

    fs::write(path, serde_json::to_string_pretty(&Value::Object(manifest))?)?;
    Ok(())
}

/// The pure merge step, separated from the filesystem for testability.
pub(crate) fn merge_values(manifest: &mut Map<String, Value>) {
    assign(manifest, "devDependencies", assets::DEV_DEPENDENCIES);
    assign(manifest, "scripts", assets::SCRIPTS);
}

fn assign(manifest: &mut Map<String, Value>, section: &str, entries: &[(&str, &str)]) {
    let slot = manifest
        .entry(section.to_string())
        .or_insert_with(|| Value::Object(Map::new()));
    if !slot.is_object() {
        *slot = Value::Object(Map::new());
    }
    if let Value::Object(map) = slot {
        for (key, value) in entries {
            map.insert((*key).to_string(), Value::String((*value).to_string()));
        }
    }
}
