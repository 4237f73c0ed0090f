//! Error types for screengrab.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScreengrabError {
    #[error(
        "Tag {0:?} may only contain the letters a-z, A-Z, the numbers 0-9, underscores, and hyphens"
    )]
    InvalidTagFormat(String),

    #[error("Couldn't get the screen from the view context")]
    NoOwningScreen,

    #[error("Root view is not displayed")]
    NotDisplayed,

    #[error("Unable to get a screenshot storage directory")]
    NoStorageDirectoryAvailable,

    #[error("Unable to capture screenshot")]
    CaptureFailed(#[source] anyhow::Error),
}

impl ScreengrabError {
    /// Wrap any lower-level failure from the encode/write path
    pub fn capture(err: impl Into<anyhow::Error>) -> Self {
        ScreengrabError::CaptureFailed(err.into())
    }
}

pub type Result<T> = std::result::Result<T, ScreengrabError>;
