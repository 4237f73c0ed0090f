//! Plain value types shared by the capture pipeline
//!
//! Nothing here touches the filesystem or the view tree.

pub mod geometry;
pub mod locale;
pub mod tag;

pub use geometry::*;
pub use locale::*;
pub use tag::*;
