//! Screenshot tags

use std::fmt;

use crate::error::{Result, ScreengrabError};

/// A tag that names a screenshot file, restricted to `[A-Za-z0-9_-]+`
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ScreenshotTag(String);

impl ScreenshotTag {
    /// Validate a caller-supplied tag without touching the filesystem
    pub fn parse(tag: &str) -> Result<Self> {
        if !tag.is_empty() && tag.bytes().all(is_tag_byte) {
            Ok(Self(tag.to_owned()))
        } else {
            Err(ScreengrabError::InvalidTagFormat(tag.to_owned()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn is_tag_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'-'
}

impl fmt::Display for ScreenshotTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<&str> for ScreenshotTag {
    type Error = ScreengrabError;

    fn try_from(tag: &str) -> Result<Self> {
        Self::parse(tag)
    }
}
