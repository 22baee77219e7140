//! Viewport geometry for one-shot visibility triggers.

/// Axis-aligned rectangle in page units. `y` grows downwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[must_use]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    #[must_use]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    #[must_use]
    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// Overlapping region, or `None` if the rectangles do not touch.
    #[must_use]
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        let left = self.x.max(other.x);
        let top = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        if right < left || bottom < top {
            return None;
        }
        Some(Rect::new(left, top, right - left, bottom - top))
    }

    /// Grow (positive) or shrink (negative) each edge.
    #[must_use]
    pub fn inset_by(&self, margin: Margin) -> Rect {
        Rect::new(
            self.x - margin.left,
            self.y - margin.top,
            self.width + margin.left + margin.right,
            self.height + margin.top + margin.bottom,
        )
    }
}

/// Root margin applied to the viewport before intersecting.
///
/// Negative values shrink the viewport, like a CSS `rootMargin`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Margin {
    #[must_use]
    pub fn bottom(bottom: f64) -> Self {
        Self {
            bottom,
            ..Self::default()
        }
    }
}

/// Threshold and margin for a visibility trigger.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObserverOptions {
    pub threshold: f64,
    pub root_margin: Margin,
}

impl ObserverOptions {
    /// Bottom inset used by every trigger on the page.
    pub const BOTTOM_INSET: f64 = -50.0;

    /// Half the element visible, 50 units above the bottom edge.
    #[must_use]
    pub fn half_visible() -> Self {
        Self {
            threshold: 0.5,
            root_margin: Margin::bottom(Self::BOTTOM_INSET),
        }
    }

    /// A sliver of the element visible, used for card reveals.
    #[must_use]
    pub fn barely_visible() -> Self {
        Self {
            threshold: 0.1,
            root_margin: Margin::bottom(Self::BOTTOM_INSET),
        }
    }

    /// Visible fraction of `target` inside the margin-adjusted `viewport`.
    #[must_use]
    pub fn visible_ratio(&self, target: &Rect, viewport: &Rect) -> f64 {
        let root = viewport.inset_by(self.root_margin);
        let Some(overlap) = target.intersection(&root) else {
            return 0.0;
        };
        let area = target.area();
        if area <= 0.0 {
            // A degenerate element counts as fully visible while it touches the root.
            return 1.0;
        }
        (overlap.area() / area).clamp(0.0, 1.0)
    }

    #[must_use]
    pub fn crosses(&self, ratio: f64) -> bool {
        ratio > 0.0 && ratio >= self.threshold
    }
}
