//! Screenshot capture for instrumented UI tests
//!
//! A test names a screenshot; the capture runs as one action on the host's UI
//! queue, rasterizes the screen (including texture surfaces the plain snapshot
//! misses) and writes `<tag>_<millis>.png` into a directory partitioned by app
//! and locale.
//!
//! ```no_run
//! use screengrab::{
//!     Context, ImmediateController, Locale, Rect, Screen, Screengrab, ScreengrabConfig,
//!     StorageEnvironment, ViewNode,
//! };
//!
//! # fn main() -> anyhow::Result<()> {
//! let root = ViewNode::new(Rect::new(0, 0, 1080, 1920))
//!     .with_context(Context::screen(Screen::new("com.example.app", "Home")));
//! let grab = Screengrab::new(
//!     ScreengrabConfig::default(),
//!     StorageEnvironment::detect()?,
//!     Locale::from_env().unwrap_or_else(|| Locale::new("en", "US")),
//! );
//! grab.screenshot(&ImmediateController, &root, "home_screen")?;
//! # Ok(())
//! # }
//! ```

pub mod capture;
pub mod config;
pub mod dispatch;
pub mod domain;
pub mod error;
pub mod output;
pub mod screengrab;
pub mod storage;
pub mod view;

pub use capture::{Raster, rasterize};
pub use config::{PermissionPolicy, ScreengrabConfig};
pub use dispatch::{Displayed, ImmediateController, UiController};
pub use domain::{Locale, Rect, ScreenshotTag};
pub use error::{Result, ScreengrabError};
pub use screengrab::Screengrab;
pub use storage::{MountState, StorageEnvironment};
pub use view::{Context, Screen, StaticTexture, TextureSource, ViewNode};
