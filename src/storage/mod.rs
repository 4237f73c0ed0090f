//! Storage state, output directories and permissions

pub mod directory;
pub mod mount;
pub mod permissions;

pub use directory::{StorageEnvironment, create_path_to, resolve_output_dir};
pub use mount::MountState;
