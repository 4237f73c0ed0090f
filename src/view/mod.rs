//! View tree model: screens, contexts, nodes and texture surfaces

pub mod context;
pub mod node;
pub mod texture;

pub use context::{Context, Screen};
pub use node::{ViewNode, VisibleNodes};
pub use texture::{StaticTexture, TextureSource};
