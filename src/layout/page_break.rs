//! # Page Break Decisions
//!
//! Page geometry and the vertical cursor threaded through the layout.
//!
//! Breaks are decided at block granularity: before drawing a block the
//! engine asks whether `y + h` still fits above the bottom margin. If not,
//! the block moves to a fresh page whose cursor starts at the top margin.
//! Nothing is ever split mid-block.

use serde::Serialize;

/// Fixed page geometry, in millimetres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PageGeometry {
    pub width: f64,
    pub height: f64,
    /// Same margin on all four sides.
    pub margin: f64,
}

impl PageGeometry {
    /// A4 portrait with 20mm margins.
    pub const A4: PageGeometry = PageGeometry {
        width: 210.0,
        height: 297.0,
        margin: 20.0,
    };

    pub fn content_width(&self) -> f64 {
        self.width - 2.0 * self.margin
    }

    /// Lowest y a block may reach.
    pub fn bottom_limit(&self) -> f64 {
        self.height - self.margin
    }

    /// x of the right content edge.
    pub fn right_edge(&self) -> f64 {
        self.width - self.margin
    }
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self::A4
    }
}

/// What to do with a block of a given height at the current position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreakDecision {
    /// The block fits on the current page.
    Place,
    /// Start a new page first.
    NewPage,
}

/// Where the next block goes: a y offset from the page top plus the page
/// it is on.
///
/// The cursor is a plain value. Every layout step takes one and returns
/// the next, so the whole vertical state of a render is visible in the
/// function signatures.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutCursor {
    pub y: f64,
    pub page: usize,
}

impl LayoutCursor {
    /// Top margin of `page`.
    pub fn start(geometry: &PageGeometry, page: usize) -> Self {
        Self {
            y: geometry.margin,
            page,
        }
    }

    pub fn advance(self, dy: f64) -> Self {
        Self {
            y: self.y + dy,
            ..self
        }
    }

    /// Same page, absolute y.
    pub fn at(self, y: f64) -> Self {
        Self { y, ..self }
    }

    /// Top of the following page.
    pub fn next_page(self, geometry: &PageGeometry) -> Self {
        Self {
            y: geometry.margin,
            page: self.page + 1,
        }
    }

    /// Decide whether a block of height `needed` fits below the cursor.
    pub fn decide(&self, needed: f64, geometry: &PageGeometry) -> BreakDecision {
        if self.y + needed > geometry.bottom_limit() {
            BreakDecision::NewPage
        } else {
            BreakDecision::Place
        }
    }
}
