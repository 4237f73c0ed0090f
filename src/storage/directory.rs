//! Output directory resolution
//!
//! Screenshots land in `<root>/<app>/<name>/<lang>-<region>/images/screenshots` on
//! shared storage, or `<private root>/<name>/<lang>-<region>/images/screenshots`
//! when shared storage cannot be used.

use std::io;
use std::path::{Path, PathBuf};

use anyhow::Context;
use rustix::fs::Access;

use super::mount::MountState;
use super::permissions;
use crate::config::ScreengrabConfig;
use crate::domain::Locale;
use crate::error::{Result, ScreengrabError};

const IMAGES_SUBPATH: [&str; 2] = ["images", "screenshots"];

/// Storage locations and state of the device under test
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageEnvironment {
    pub mount_state: MountState,
    /// Root of shared external storage, if the device has one
    pub external_root: Option<PathBuf>,
    /// Base under which each app gets a private directory
    pub private_base: PathBuf,
}

impl StorageEnvironment {
    pub fn new(
        mount_state: MountState,
        external_root: Option<PathBuf>,
        private_base: impl Into<PathBuf>,
    ) -> Self {
        Self {
            mount_state,
            external_root,
            private_base: private_base.into(),
        }
    }

    /// Build an environment from the local user's directories
    ///
    /// The pictures directory stands in for shared storage and is probed for its
    /// mount state; the local data directory holds the private fallback.
    pub fn detect() -> anyhow::Result<Self> {
        let external_root =
            dirs::picture_dir().or_else(|| dirs::home_dir().map(|h| h.join("Pictures")));
        let mount_state = external_root
            .as_deref()
            .map(MountState::probe)
            .unwrap_or(MountState::Removed);
        let private_base = dirs::data_local_dir().context("no local data directory")?;
        Ok(Self::new(mount_state, external_root, private_base))
    }

    /// Private root of one app
    pub fn private_root(&self, app_identity: &str) -> PathBuf {
        self.private_base.join(app_identity)
    }

    /// All writes are gated on this
    pub fn is_writable(&self) -> bool {
        self.mount_state.is_writable()
    }
}

/// Shared-storage screenshot directory for an app and locale
pub fn external_dir(root: &Path, app_identity: &str, name: &str, locale: &Locale) -> PathBuf {
    locale_dir(root.join(app_identity).join(name), locale)
}

/// App-private screenshot directory for a locale
pub fn private_dir(private_root: &Path, name: &str, locale: &Locale) -> PathBuf {
    locale_dir(private_root.join(name), locale)
}

fn locale_dir(base: PathBuf, locale: &Locale) -> PathBuf {
    let mut dir = base.join(locale.dir_name());
    dir.extend(IMAGES_SUBPATH);
    dir
}

/// Find or create a writable screenshot directory
///
/// Shared storage is tried first when the config prefers it, then the app-private
/// location. Fails when neither can be created and written to.
pub fn resolve_output_dir(
    env: &StorageEnvironment,
    app_identity: &str,
    locale: &Locale,
    config: &ScreengrabConfig,
) -> Result<PathBuf> {
    let dir_mode = config.permissions.directory_mode;

    if config.prefer_external {
        if let Some(root) = &env.external_root {
            let dir = external_dir(root, app_identity, &config.directory_name, locale);
            if let Some(dir) = initialize_directory(dir, dir_mode) {
                log::debug!("Using screenshot storage directory: {}", dir.display());
                return Ok(dir);
            }
        }
    }

    let dir = private_dir(
        &env.private_root(app_identity),
        &config.directory_name,
        locale,
    );
    if let Some(dir) = initialize_directory(dir, dir_mode) {
        log::debug!("Using screenshot storage directory: {}", dir.display());
        return Ok(dir);
    }

    Err(ScreengrabError::NoStorageDirectoryAvailable)
}

/// Create `dir` if needed and return it when it is a writable directory
fn initialize_directory(dir: PathBuf, mode: Option<u32>) -> Option<PathBuf> {
    if let Err(err) = create_path_to(&dir, mode) {
        log::warn!("Unable to create output dir {}: {}", dir.display(), err);
        return None;
    }
    if dir.is_dir() && rustix::fs::access(&dir, Access::WRITE_OK).is_ok() {
        Some(dir)
    } else {
        log::warn!("Output dir {} is not writable", dir.display());
        None
    }
}

/// Create every missing segment down to `dir`, widening each new one by `mode`
pub fn create_path_to(dir: &Path, mode: Option<u32>) -> io::Result<()> {
    // a relative path's last ancestor is "", which stands for the working directory
    let missing: Vec<&Path> = dir
        .ancestors()
        .take_while(|p| !p.as_os_str().is_empty() && !p.exists())
        .collect();

    for segment in missing.into_iter().rev() {
        match std::fs::create_dir(segment) {
            Ok(()) => {}
            Err(err) if err.kind() == io::ErrorKind::AlreadyExists && segment.is_dir() => {
                continue;
            }
            Err(err) => return Err(err),
        }
        permissions::apply(segment, mode)?;
    }

    if dir.is_dir() {
        Ok(())
    } else {
        Err(io::Error::new(
            io::ErrorKind::NotADirectory,
            format!("{} is not a directory", dir.display()),
        ))
    }
}
