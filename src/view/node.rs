//! View tree nodes
//!
//! Bounds are screen-relative. Children are drawn after their parent, in order.

use std::sync::Arc;

use image::{Rgba, RgbaImage};

use super::context::Context;
use super::texture::TextureSource;
use crate::domain::Rect;

/// A single element of a screen's view tree
#[derive(Clone, Debug, Default)]
pub struct ViewNode {
    pub bounds: Rect,
    pub visible: bool,
    /// Solid fill drawn over the whole bounds
    pub background: Option<Rgba<u8>>,
    /// Image drawn at the top-left of the bounds, clipped to them
    pub content: Option<RgbaImage>,
    /// Set when this view's pixels live in a texture outside the normal draw path
    pub texture: Option<Arc<dyn TextureSource>>,
    pub children: Vec<ViewNode>,
    pub context: Context,
}

impl ViewNode {
    /// A visible, empty view covering `bounds`
    pub fn new(bounds: Rect) -> Self {
        Self {
            bounds,
            visible: true,
            ..Default::default()
        }
    }

    pub fn with_background(mut self, color: Rgba<u8>) -> Self {
        self.background = Some(color);
        self
    }

    pub fn with_content(mut self, content: RgbaImage) -> Self {
        self.content = Some(content);
        self
    }

    pub fn with_texture(mut self, source: impl TextureSource + 'static) -> Self {
        self.texture = Some(Arc::new(source));
        self
    }

    pub fn with_child(mut self, child: ViewNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_context(mut self, context: Context) -> Self {
        self.context = context;
        self
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    pub fn is_texture_surface(&self) -> bool {
        self.texture.is_some()
    }

    /// Whether the view is shown with a non-empty area
    pub fn is_displayed(&self) -> bool {
        self.visible && self.bounds.dimensions().is_some()
    }

    /// Visible nodes of this subtree in pre-order (parents before children)
    ///
    /// Hidden nodes and everything below them are skipped.
    pub fn visible_nodes(&self) -> VisibleNodes<'_> {
        VisibleNodes { stack: vec![self] }
    }

    /// Every visible texture surface of this subtree, each exactly once, in draw order
    pub fn texture_surfaces(&self) -> Vec<&ViewNode> {
        self.visible_nodes()
            .filter(|node| node.is_texture_surface())
            .collect()
    }
}

/// Iterative pre-order walk over visible nodes
pub struct VisibleNodes<'a> {
    stack: Vec<&'a ViewNode>,
}

impl<'a> Iterator for VisibleNodes<'a> {
    type Item = &'a ViewNode;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let node = self.stack.pop()?;
            if !node.visible {
                continue;
            }
            self.stack.extend(node.children.iter().rev());
            return Some(node);
        }
    }
}
