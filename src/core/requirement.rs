//! Declared package requirements.
//!
//! A requirement names an external package and a version requirement,
//! written `name/version-req` in the manifest (e.g. `imgui/1.90.5`).

use std::fmt;

use anyhow::{bail, Context, Result};
use semver::VersionReq;

/// A single declared requirement. Immutable once parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequirementSpec {
    name: String,
    req: VersionReq,
    raw: String,
}

impl RequirementSpec {
    /// Parse a requirement entry of the form `name/version-req`.
    pub fn parse(entry: &str) -> Result<Self> {
        let Some((name, req_str)) = entry.split_once('/') else {
            bail!(
                "invalid requirement `{}`: expected `name/version`, e.g. `imgui/1.90.5`",
                entry
            );
        };

        if name.is_empty() {
            bail!("invalid requirement `{}`: empty package name", entry);
        }
        if req_str.is_empty() {
            bail!("invalid requirement `{}`: empty version requirement", entry);
        }

        let req = VersionReq::parse(req_str)
            .with_context(|| format!("invalid version requirement in `{}`", entry))?;

        Ok(RequirementSpec {
            name: name.to_string(),
            req,
            raw: entry.to_string(),
        })
    }

    /// Construct a spec from parts.
    pub fn new(name: impl Into<String>, req: VersionReq) -> Self {
        let name = name.into();
        let raw = format!("{}/{}", name, req);
        RequirementSpec { name, req, raw }
    }

    /// Package name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Version requirement.
    pub fn req(&self) -> &VersionReq {
        &self.req
    }

    /// The entry as written in the manifest.
    pub fn raw(&self) -> &str {
        &self.raw
    }
}

impl fmt::Display for RequirementSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}
