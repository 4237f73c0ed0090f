//! Screens and the context wrapper chain that leads to them

use std::sync::Arc;

use crate::error::{Result, ScreengrabError};

/// A top-level screen that owns a view hierarchy
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Screen {
    /// Identity of the owning application (e.g. `com.example.app`)
    pub app_identity: String,
    /// Human-readable screen name, used only for logging
    pub title: String,
}

impl Screen {
    pub fn new(app_identity: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            app_identity: app_identity.into(),
            title: title.into(),
        }
    }
}

/// The context a view was created with
///
/// Contexts may wrap other contexts to any depth; only some chains end in a screen.
#[derive(Clone, Debug, Default)]
pub enum Context {
    /// The context is the screen itself
    Screen(Arc<Screen>),
    /// A delegating wrapper around a base context
    Wrapper(Arc<Context>),
    /// An application-level context that belongs to no screen
    Application(String),
    /// No context attached
    #[default]
    Detached,
}

impl Context {
    pub fn screen(screen: Screen) -> Self {
        Context::Screen(Arc::new(screen))
    }

    /// Wrap this context in one more delegating layer
    pub fn wrap(self) -> Self {
        Context::Wrapper(Arc::new(self))
    }

    /// Walk the wrapper chain outward until a screen is found
    pub fn owning_screen(&self) -> Result<Arc<Screen>> {
        let mut current = self;
        loop {
            match current {
                Context::Screen(screen) => return Ok(Arc::clone(screen)),
                Context::Wrapper(base) => current = base.as_ref(),
                Context::Application(_) | Context::Detached => {
                    return Err(ScreengrabError::NoOwningScreen);
                }
            }
        }
    }
}
