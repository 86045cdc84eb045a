pub mod config;
pub mod coords;
pub mod engine;
pub mod ipc;
pub mod monitor;
pub mod section;
pub mod snapper;
pub mod transition;

#[cfg(target_os = "macos")]
pub mod hotkeys;
#[cfg(target_os = "macos")]
pub mod macos;

pub use config::Config;
pub use engine::{SnapEngine, SnapOutcome};
pub use monitor::MonitorBounds;
pub use section::Section;
pub use snapper::Snapper;
pub use transition::SnapCommand;

pub type Result<T> = anyhow::Result<T>;

/// A window or screen rectangle in logical pixels. Pure value, no identity;
/// which coordinate convention the fields follow depends on where the rect
/// came from (see `coords`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn max_x(&self) -> f64 {
        self.x + self.width
    }

    pub fn max_y(&self) -> f64 {
        self.y + self.height
    }

    pub fn contains_point(&self, px: f64, py: f64) -> bool {
        px >= self.x && px <= self.max_x() && py >= self.y && py <= self.max_y()
    }

    /// Overlapping region of two rects. Degenerate overlaps collapse to a
    /// zero-size rect rather than one with negative extent.
    pub fn intersection(&self, other: &Rect) -> Rect {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let width = (self.max_x().min(other.max_x()) - x).max(0.0);
        let height = (self.max_y().min(other.max_y()) - y).max(0.0);
        Rect::new(x, y, width, height)
    }

    /// Area, clamped so empty and inverted rects report 0.
    pub fn area(&self) -> f64 {
        if self.width <= 0.0 || self.height <= 0.0 {
            return 0.0;
        }
        self.width * self.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intersection_overlapping() {
        let a = Rect::new(0.0, 0.0, 100.0, 100.0);
        let b = Rect::new(50.0, 50.0, 100.0, 100.0);
        let i = a.intersection(&b);
        assert_eq!(i, Rect::new(50.0, 50.0, 50.0, 50.0));
        assert_eq!(i.area(), 2500.0);
    }

    #[test]
    fn intersection_disjoint_has_zero_area() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(100.0, 100.0, 10.0, 10.0);
        let i = a.intersection(&b);
        assert_eq!(i.area(), 0.0);
        assert!(i.width >= 0.0 && i.height >= 0.0);
    }

    #[test]
    fn degenerate_rect_area_is_zero() {
        assert_eq!(Rect::new(0.0, 0.0, 0.0, 100.0).area(), 0.0);
        assert_eq!(Rect::new(0.0, 0.0, -5.0, 100.0).area(), 0.0);
    }

    #[test]
    fn contains_point_is_edge_inclusive() {
        let r = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(r.contains_point(0.0, 0.0));
        assert!(r.contains_point(10.0, 10.0));
        assert!(!r.contains_point(10.1, 0.0));
    }
}
