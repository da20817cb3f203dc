//! Node configuration engine for nodeform.
//!
//! This crate owns the in-memory decision logic behind the node
//! configuration panel:
//!
//! `Raw Text (JSON/YAML/link)` -> `Parse (lenient)` -> `Resolve field
//! visibility` -> `Validate` -> `Masked hand-off`
//!
//! # Key Modules
//! - [`model`]: the [`NodeConfig`] record and its enums; unknown enum
//!   values never fail, they fall back to defaults.
//! - [`visibility`]: the field visibility resolver — a pure function
//!   from a partial record to a hidden/optional/required set.
//! - [`validator`]: submission-time checks producing a stable report.
//! - [`session`]: the form lifecycle (open, edit, reset, submit).
//! - [`import`]: tag/link rows and vmess/vless share-link parsing.
//!
//! Rendering, persistence, and transport connectivity live elsewhere;
//! this crate computes, it does not draw or dial.

use anyhow::Result;
use std::fs;
use std::path::Path;

pub mod de;
pub mod defaults;
pub mod import;
pub mod model;
pub mod session;
pub mod validator;
pub mod visibility;

pub use model::{
    FieldId, Flow, Network, NodeConfig, ObfuscationType, Protocol, Security, TlsMode,
};
pub use session::FormSession;
pub use validator::{validate, Report};
pub use visibility::{
    masked_for_submit, path_role, resolve, valid_obfuscations, PathRole, Visibility,
    VisibilitySet,
};

impl NodeConfig {
    /// Load a node record from a JSON or YAML file.
    ///
    /// JSON is tried first (more specific), then YAML. Enum fields stay
    /// lenient either way.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or is neither valid
    /// JSON nor valid YAML.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_text(&text)
    }

    /// Parse a node record from JSON or YAML text.
    pub fn from_text(text: &str) -> Result<Self> {
        let cfg = match serde_json::from_str(text) {
            Ok(v) => v,
            Err(_) => serde_yaml::from_str(text)?,
        };
        Ok(cfg)
    }
}
