//! Implementation of `gantry add` and `gantry remove`.
//!
//! Edits the `requirements` array in Gantry.toml in place, preserving
//! the file's formatting and comments.

use std::path::Path;

use anyhow::{bail, Context, Result};
use toml_edit::{Array, DocumentMut, Item, Value};

use crate::core::RequirementSpec;
use crate::util::fs::{read_to_string, write_string};

/// Add a requirement entry (`name/version-req`) to the manifest.
///
/// An existing entry for the same package is replaced rather than
/// duplicated. Returns the parsed spec for status reporting.
pub fn add_requirement(manifest_path: &Path, entry: &str) -> Result<RequirementSpec> {
    // Validate before touching the file
    let spec = RequirementSpec::parse(entry)?;

    let contents = read_to_string(manifest_path)?;
    let mut doc = contents
        .parse::<DocumentMut>()
        .with_context(|| format!("failed to parse manifest: {}", manifest_path.display()))?;

    let item = doc
        .entry("requirements")
        .or_insert(Item::Value(Value::Array(Array::new())));
    let Some(array) = item.as_array_mut() else {
        bail!("`requirements` in {} is not an array", manifest_path.display());
    };

    let existing = array.iter().position(|v| {
        v.as_str()
            .and_then(|s| s.split('/').next())
            .is_some_and(|name| name == spec.name())
    });

    match existing {
        Some(index) => {
            array.replace(index, entry);
        }
        None => {
            array.push(entry);
        }
    }

    write_string(manifest_path, &doc.to_string())?;
    Ok(spec)
}

/// Remove a requirement by package name. Returns whether an entry was
/// actually removed.
pub fn remove_requirement(manifest_path: &Path, name: &str) -> Result<bool> {
    let contents = read_to_string(manifest_path)?;
    let mut doc = contents
        .parse::<DocumentMut>()
        .with_context(|| format!("failed to parse manifest: {}", manifest_path.display()))?;

    let Some(array) = doc.get_mut("requirements").and_then(|i| i.as_array_mut()) else {
        return Ok(false);
    };

    let before = array.len();
    array.retain(|v| {
        v.as_str()
            .and_then(|s| s.split('/').next())
            .is_none_or(|n| n != name)
    });
    let removed = array.len() != before;

    if removed {
        write_string(manifest_path, &doc.to_string())?;
    }

    Ok(removed)
}
