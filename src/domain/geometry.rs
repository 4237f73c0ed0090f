//! Screen-relative rectangles for view bounds

use std::num::NonZeroU32;

/// Screen-relative bounds of a view
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Rect {
    pub fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Create a rectangle from its top-left corner and size
    pub fn from_origin_size(left: i32, top: i32, width: u32, height: u32) -> Self {
        Self {
            left,
            top,
            right: left.saturating_add_unsigned(width),
            bottom: top.saturating_add_unsigned(height),
        }
    }

    /// Calculate the intersection of two rectangles
    pub fn intersect(&self, other: Rect) -> Option<Rect> {
        let left = self.left.max(other.left);
        let top = self.top.max(other.top);
        let right = self.right.min(other.right);
        let bottom = self.bottom.min(other.bottom);
        if left < right && top < bottom {
            Some(Rect {
                left,
                top,
                right,
                bottom,
            })
        } else {
            None
        }
    }

    /// Translate the rectangle by the given offset, saturating at the `i32` range
    pub fn translate(&self, x: i32, y: i32) -> Rect {
        Rect {
            left: self.left.saturating_add(x),
            top: self.top.saturating_add(y),
            right: self.right.saturating_add(x),
            bottom: self.bottom.saturating_add(y),
        }
    }

    /// Width, saturating at `i32::MAX`
    pub fn width(&self) -> i32 {
        self.right.saturating_sub(self.left)
    }

    /// Height, saturating at `i32::MAX`
    pub fn height(&self) -> i32 {
        self.bottom.saturating_sub(self.top)
    }

    /// Non-zero pixel dimensions, or `None` for an empty or inverted rectangle
    pub fn dimensions(self) -> Option<RectDimension> {
        let span = |from: i32, to: i32| u32::try_from(i64::from(to) - i64::from(from)).ok();
        let width = NonZeroU32::new(span(self.left, self.right)?)?;
        let height = NonZeroU32::new(span(self.top, self.bottom)?)?;
        Some(RectDimension { width, height })
    }
}

/// Non-zero dimensions of a rectangle
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RectDimension {
    pub width: NonZeroU32,
    pub height: NonZeroU32,
}

impl RectDimension {
    pub fn width(&self) -> u32 {
        self.width.get()
    }

    pub fn height(&self) -> u32 {
        self.height.get()
    }
}
