//! Running capture actions against a displayed screen
//!
//! The host test harness owns the UI action queue. It hands the capture a
//! [`Displayed`] token once the root view is confirmed on screen.

use crate::error::{Result, ScreengrabError};
use crate::view::ViewNode;

/// Proof that a root view is visible with a non-empty area
#[derive(Clone, Copy, Debug)]
pub struct Displayed<'a> {
    root: &'a ViewNode,
}

impl<'a> Displayed<'a> {
    /// Check the displayed constraint; `None` if the root is hidden or empty
    pub fn confirm(root: &'a ViewNode) -> Option<Self> {
        root.is_displayed().then_some(Self { root })
    }

    pub fn root(&self) -> &'a ViewNode {
        self.root
    }
}

/// The host's UI action queue
pub trait UiController {
    /// Run `action` once `root` is in a stable, displayed state
    ///
    /// Errors returned by the action must reach the caller unchanged.
    fn perform(
        &self,
        root: &ViewNode,
        description: &str,
        action: &mut dyn FnMut(Displayed<'_>) -> Result<()>,
    ) -> Result<()>;
}

/// Runs actions straight away on the calling thread
///
/// Suitable when the caller already is the UI thread and the screen is settled.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImmediateController;

impl UiController for ImmediateController {
    fn perform(
        &self,
        root: &ViewNode,
        description: &str,
        action: &mut dyn FnMut(Displayed<'_>) -> Result<()>,
    ) -> Result<()> {
        let displayed = Displayed::confirm(root).ok_or(ScreengrabError::NotDisplayed)?;
        log::debug!("Performing '{}'", description);
        action(displayed)
    }
}
