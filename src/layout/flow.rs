//! # Tag Row Flow
//!
//! Horizontal placement of skill pills. Pills go left to right with a fixed
//! gap; a pill that would cross the right edge starts a new row. Rows are
//! filled greedily, never balanced or justified.

/// Where a pill lands within its row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Slot {
    pub x: f64,
    /// True when this pill opened a new row.
    pub wrapped: bool,
}

/// Greedy row filler between two x bounds.
#[derive(Debug, Clone, Copy)]
pub struct RowFlow {
    left: f64,
    right: f64,
    gap: f64,
    x: f64,
}

impl RowFlow {
    pub fn new(left: f64, right: f64, gap: f64) -> Self {
        Self {
            left,
            right,
            gap,
            x: left,
        }
    }

    /// Widest pill a row can hold.
    pub fn max_width(&self) -> f64 {
        self.right - self.left
    }

    /// Reserve room for a pill of `width` and return its slot.
    ///
    /// A pill that is first on its row is never wrapped, so an empty row
    /// can't be left behind. Callers clamp widths to [`max_width`] so the
    /// right edge holds.
    ///
    /// [`max_width`]: RowFlow::max_width
    pub fn place(&mut self, width: f64) -> Slot {
        let wrapped = self.x > self.left && self.x + width > self.right;
        if wrapped {
            self.x = self.left;
        }
        let slot = Slot { x: self.x, wrapped };
        self.x += width + self.gap;
        slot
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fills_row_then_wraps() {
        let mut flow = RowFlow::new(20.0, 190.0, 4.0);
        let a = flow.place(80.0);
        let b = flow.place(80.0);
        let c = flow.place(10.0);
        assert_eq!(a, Slot { x: 20.0, wrapped: false });
        assert_eq!(b, Slot { x: 104.0, wrapped: false });
        // 188 + 10 > 190
        assert_eq!(c, Slot { x: 20.0, wrapped: true });
    }

    #[test]
    fn exact_fit_stays_on_row() {
        let mut flow = RowFlow::new(0.0, 100.0, 0.0);
        flow.place(60.0);
        let slot = flow.place(40.0);
        assert!(!slot.wrapped);
        assert_eq!(slot.x, 60.0);
    }

    #[test]
    fn oversized_first_pill_does_not_wrap() {
        let mut flow = RowFlow::new(20.0, 190.0, 4.0);
        let slot = flow.place(flow.max_width());
        assert_eq!(slot, Slot { x: 20.0, wrapped: false });
        assert!(flow.place(5.0).wrapped);
    }
}
