//! Screenshot capture entry point

use std::path::PathBuf;

use chrono::{DateTime, Utc};

use crate::capture::rasterize;
use crate::config::ScreengrabConfig;
use crate::dispatch::{Displayed, UiController};
use crate::domain::{Locale, ScreenshotTag};
use crate::error::Result;
use crate::output::write_screenshot;
use crate::storage::{StorageEnvironment, resolve_output_dir};
use crate::view::ViewNode;

/// Captures screenshots of the screen under test into locale-specific directories
#[derive(Debug, Clone)]
pub struct Screengrab {
    config: ScreengrabConfig,
    storage: StorageEnvironment,
    locale: Locale,
    clock: fn() -> DateTime<Utc>,
}

impl Screengrab {
    pub fn new(config: ScreengrabConfig, storage: StorageEnvironment, locale: Locale) -> Self {
        Self {
            config,
            storage,
            locale,
            clock: Utc::now,
        }
    }

    /// Replace the clock used to timestamp file names
    pub fn with_clock(mut self, clock: fn() -> DateTime<Utc>) -> Self {
        self.clock = clock;
        self
    }

    pub fn config(&self) -> &ScreengrabConfig {
        &self.config
    }

    pub fn storage(&self) -> &StorageEnvironment {
        &self.storage
    }

    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    /// Take a screenshot named `tag` of the screen that owns `root`
    ///
    /// The capture runs as a single action on `controller`. Returns the written
    /// file, or `None` when storage is not mounted for writing.
    pub fn screenshot<C: UiController + ?Sized>(
        &self,
        controller: &C,
        root: &ViewNode,
        tag: &str,
    ) -> Result<Option<PathBuf>> {
        let tag = ScreenshotTag::parse(tag)?;
        let mut written = None;
        controller.perform(root, "taking screenshot of the screen", &mut |displayed| {
            written = self.capture(displayed, &tag)?;
            Ok(())
        })?;
        Ok(written)
    }

    /// Capture a displayed root view and write it to disk
    pub fn capture(&self, displayed: Displayed<'_>, tag: &ScreenshotTag) -> Result<Option<PathBuf>> {
        let root = displayed.root();
        let screen = root.context.owning_screen()?;

        if !self.storage.is_writable() {
            log::debug!(
                "External storage is not available ({}), skipping screenshot",
                self.storage.mount_state
            );
            return Ok(None);
        }

        let dir = resolve_output_dir(&self.storage, &screen.app_identity, &self.locale, &self.config)?;
        let raster = rasterize(root)?;
        let path = write_screenshot(
            raster,
            &dir,
            tag,
            (self.clock)(),
            self.config.permissions.file_mode,
        )?;
        let name = path.file_name().unwrap_or_default().to_string_lossy();

        log::info!("Captured screenshot \"{}\" of {}", name, screen.title);
        Ok(Some(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::ImmediateController;
    use crate::domain::Rect;
    use crate::error::ScreengrabError;
    use crate::storage::MountState;
    use crate::view::{Context, Screen};
    use chrono::TimeZone;
    use image::Rgba;
    use std::path::Path;

    fn fixed_clock() -> DateTime<Utc> {
        Utc.timestamp_millis_opt(1_700_000_000_000).unwrap()
    }

    fn root(context: Context) -> ViewNode {
        ViewNode::new(Rect::new(0, 0, 4, 4))
            .with_background(Rgba([0, 128, 255, 255]))
            .with_context(context)
    }

    fn grab(tmp: &Path, state: MountState) -> Screengrab {
        let storage = StorageEnvironment::new(state, Some(tmp.join("sdcard")), tmp.join("data"));
        Screengrab::new(ScreengrabConfig::default(), storage, Locale::new("en", "US"))
            .with_clock(fixed_clock)
    }

    fn file_count(dir: &Path) -> usize {
        if !dir.exists() {
            return 0;
        }
        std::fs::read_dir(dir)
            .unwrap()
            .map(|entry| {
                let path = entry.unwrap().path();
                if path.is_dir() { file_count(&path) } else { 1 }
            })
            .sum()
    }

    #[test]
    fn test_screenshot_writes_named_file() {
        let tmp = tempfile::tempdir().unwrap();
        let screen = Context::screen(Screen::new("com.example.app", "Home")).wrap().wrap();

        let path = grab(tmp.path(), MountState::Mounted)
            .screenshot(&ImmediateController, &root(screen), "home_screen")
            .unwrap()
            .unwrap();

        assert_eq!(
            path,
            tmp.path().join(
                "sdcard/com.example.app/screengrab/en-US/images/screenshots/home_screen_1700000000000.png"
            )
        );
        assert!(path.is_file());
    }

    #[test]
    fn test_invalid_tag_touches_nothing() {
        let tmp = tempfile::tempdir().unwrap();
        let screen = Context::screen(Screen::new("app", "Home"));

        let result = grab(tmp.path(), MountState::Mounted).screenshot(
            &ImmediateController,
            &root(screen),
            "bad tag",
        );
        assert!(matches!(result, Err(ScreengrabError::InvalidTagFormat(_))));
        assert_eq!(std::fs::read_dir(tmp.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_no_owning_screen() {
        let tmp = tempfile::tempdir().unwrap();
        let context = Context::Application("app".into()).wrap();

        let result = grab(tmp.path(), MountState::Mounted).screenshot(
            &ImmediateController,
            &root(context),
            "x",
        );
        assert!(matches!(result, Err(ScreengrabError::NoOwningScreen)));
        assert_eq!(file_count(tmp.path()), 0);
    }

    #[test]
    fn test_unmounted_storage_is_silent() {
        let tmp = tempfile::tempdir().unwrap();
        let screen = Context::screen(Screen::new("app", "Home"));

        for state in [MountState::Unmounted, MountState::MountedReadOnly] {
            let written = grab(tmp.path(), state)
                .screenshot(&ImmediateController, &root(screen.clone()), "x")
                .unwrap();
            assert!(written.is_none());
        }
        assert_eq!(file_count(tmp.path()), 0);
    }

    #[test]
    fn test_back_to_back_screenshots_with_wall_clock() {
        let tmp = tempfile::tempdir().unwrap();
        let storage =
            StorageEnvironment::new(MountState::Mounted, Some(tmp.path().join("sdcard")), tmp.path().join("data"));
        let grab = Screengrab::new(ScreengrabConfig::default(), storage, Locale::new("en", "US"));
        let root = root(Context::screen(Screen::new("app", "Home")));

        let mut paths: Vec<PathBuf> = (0..50)
            .map(|_| {
                grab.screenshot(&ImmediateController, &root, "burst")
                    .unwrap()
                    .unwrap()
            })
            .collect();
        paths.sort();
        paths.dedup();
        assert_eq!(paths.len(), 50);
        assert_eq!(file_count(tmp.path()), 50);
    }

    #[test]
    fn test_no_directory_available() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("sdcard"), b"").unwrap();
        std::fs::write(tmp.path().join("data"), b"").unwrap();
        let screen = Context::screen(Screen::new("app", "Home"));

        let result = grab(tmp.path(), MountState::Mounted).screenshot(
            &ImmediateController,
            &root(screen),
            "x",
        );
        assert!(matches!(
            result,
            Err(ScreengrabError::NoStorageDirectoryAvailable)
        ));
    }
}
