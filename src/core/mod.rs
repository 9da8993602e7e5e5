//! Core domain types: manifest, requirements, resolved packages.

pub mod manifest;
pub mod registry;
pub mod requirement;
pub mod resolved;

pub use manifest::Manifest;
pub use registry::RequirementRegistry;
pub use requirement::RequirementSpec;
pub use resolved::{ResolvedPackage, ResolvedSet};
