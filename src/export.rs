//! Blueprint export for presentation layers.

use std::{
    fs,
    path::{Path, PathBuf},
};

use tracing::debug;

use crate::{BlueprintModel, Result};

/// File name under which blueprints are exported.
pub const BLUEPRINT_FILENAME: &str = "make_blueprint.json";
/// Content type of an exported blueprint.
pub const BLUEPRINT_MIME: &str = "application/json;charset=utf-8";

/// Pretty-printed blueprint.
pub fn to_pretty_json(blueprint: &BlueprintModel) -> Result<String> {
    blueprint.to_json_pretty()
}

/// Writes `content` to `dir/make_blueprint.json`. Empty content is written
/// as an empty JSON object.
pub fn write_json(
    content: &str,
    dir: impl AsRef<Path>,
) -> Result<PathBuf> {
    let path = dir.as_ref().join(BLUEPRINT_FILENAME);
    let content = if content.trim().is_empty() { "{}" } else { content };
    fs::write(&path, content)?;
    debug!(path = %path.display(), bytes = content.len(), "blueprint exported");
    Ok(path)
}

/// Writes the pretty-printed blueprint into `dir`.
pub fn write_blueprint(
    blueprint: &BlueprintModel,
    dir: impl AsRef<Path>,
) -> Result<PathBuf> {
    write_json(&to_pretty_json(blueprint)?, dir)
}
