//! Capture settings

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Permission bits added to what the capture creates
///
/// `None` leaves the host's default permissions untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PermissionPolicy {
    /// Added to every newly created directory segment
    pub directory_mode: Option<u32>,
    /// Added to each written screenshot
    pub file_mode: Option<u32>,
}

impl PermissionPolicy {
    /// Shared-storage semantics: directories open to all, files readable by all
    pub const LEGACY: Self = Self {
        directory_mode: Some(0o777),
        file_mode: Some(0o444),
    };

    /// Leave permissions as the host creates them
    pub const PRESERVE: Self = Self {
        directory_mode: None,
        file_mode: None,
    };
}

impl Default for PermissionPolicy {
    fn default() -> Self {
        Self::LEGACY
    }
}

/// Screenshot capture configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreengrabConfig {
    /// Directory created under the storage root for screenshots
    pub directory_name: String,
    /// Try shared external storage before the app-private location
    pub prefer_external: bool,
    pub permissions: PermissionPolicy,
}

impl Default for ScreengrabConfig {
    fn default() -> Self {
        Self {
            directory_name: "screengrab".to_string(),
            prefer_external: true,
            permissions: PermissionPolicy::default(),
        }
    }
}

impl ScreengrabConfig {
    /// Read configuration from a JSON file
    pub fn from_json_file(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    /// Load configuration from disk, or return defaults if unavailable
    pub fn load(path: &Path) -> Self {
        match Self::from_json_file(path) {
            Ok(config) => config,
            Err(err) => {
                log::warn!("Error loading config, using defaults: {:?}", err);
                Self::default()
            }
        }
    }
}
