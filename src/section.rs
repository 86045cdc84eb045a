use crate::Rect;

/// Fraction of the relevant screen dimension inside which a coordinate still
/// counts as "on" a section boundary. Fixed for all classification; not a
/// per-call knob.
pub const TOLERANCE: f64 = 0.02;

/// Width/height of the break rect as a fraction of the usable frame.
const BREAK_RATIO: f64 = 0.4;

/// The canonical window placements a window can occupy on a monitor.
///
/// `None` doubles as the "break" state: a window matching no section, and the
/// centered reduced-size rect that breaks out of any snapped layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    None,
    Full,
    LeftHalf,
    RightHalf,
    TopHalf,
    BottomHalf,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

/// All sections with a defined target rect, i.e. everything but `None`.
pub const SECTIONS: [Section; 9] = [
    Section::Full,
    Section::LeftHalf,
    Section::RightHalf,
    Section::TopHalf,
    Section::BottomHalf,
    Section::TopLeft,
    Section::TopRight,
    Section::BottomLeft,
    Section::BottomRight,
];

fn approx(value: f64, target: f64) -> bool {
    (value - target).abs() <= TOLERANCE
}

fn approx_zero(value: f64) -> bool {
    value <= TOLERANCE
}

fn approx_one(value: f64) -> bool {
    (1.0 - value).abs() <= TOLERANCE
}

impl Section {
    /// Classify a window rect against a monitor's usable frame, both in
    /// layout space (bottom-left origin, y up).
    ///
    /// The window's origin and size are normalized against the frame and
    /// compared to 0, 0.5 and 1.0 within [`TOLERANCE`]. Rules are checked in
    /// fixed priority order; at a tolerance boundary several predicates can
    /// hold at once, and the first match wins. Total: anything unmatched
    /// (including zero-area or off-screen rects) is `None`.
    pub fn classify(window: Rect, usable: Rect) -> Section {
        let norm_x = (window.x - usable.x) / usable.width;
        let norm_y = (window.y - usable.y) / usable.height;
        let norm_w = window.width / usable.width;
        let norm_h = window.height / usable.height;

        if approx_zero(norm_x) && approx_zero(norm_y) && approx_one(norm_w) && approx_one(norm_h) {
            return Section::Full;
        }
        if approx_zero(norm_x) && approx_zero(norm_y) && approx(norm_w, 0.5) && approx_one(norm_h) {
            return Section::LeftHalf;
        }
        if approx(norm_x, 0.5) && approx_zero(norm_y) && approx(norm_w, 0.5) && approx_one(norm_h) {
            return Section::RightHalf;
        }
        if approx_zero(norm_x) && approx(norm_y, 0.5) && approx_one(norm_w) && approx(norm_h, 0.5) {
            return Section::TopHalf;
        }
        if approx_zero(norm_x) && approx_zero(norm_y) && approx_one(norm_w) && approx(norm_h, 0.5) {
            return Section::BottomHalf;
        }
        if approx_zero(norm_x) && approx(norm_y, 0.5) && approx(norm_w, 0.5) && approx(norm_h, 0.5) {
            return Section::TopLeft;
        }
        if approx(norm_x, 0.5) && approx(norm_y, 0.5) && approx(norm_w, 0.5) && approx(norm_h, 0.5) {
            return Section::TopRight;
        }
        if approx_zero(norm_x) && approx_zero(norm_y) && approx(norm_w, 0.5) && approx(norm_h, 0.5) {
            return Section::BottomLeft;
        }
        if approx(norm_x, 0.5) && approx_zero(norm_y) && approx(norm_w, 0.5) && approx(norm_h, 0.5) {
            return Section::BottomRight;
        }

        Section::None
    }

    /// Target rect for this section within a usable frame (layout space).
    ///
    /// Halves split at the midpoint, quadrants split both axes; `None`
    /// produces the break rect, centered at 40% of the frame's size. All
    /// arithmetic is plain f64 so classifying a produced rect lands back on
    /// the same section.
    pub fn rect_in(self, usable: Rect) -> Rect {
        let half_w = usable.width / 2.0;
        let half_h = usable.height / 2.0;

        match self {
            Section::Full => usable,
            Section::LeftHalf => Rect::new(usable.x, usable.y, half_w, usable.height),
            Section::RightHalf => Rect::new(usable.x + half_w, usable.y, half_w, usable.height),
            Section::TopHalf => Rect::new(usable.x, usable.y + half_h, usable.width, half_h),
            Section::BottomHalf => Rect::new(usable.x, usable.y, usable.width, half_h),
            Section::TopLeft => Rect::new(usable.x, usable.y + half_h, half_w, half_h),
            Section::TopRight => Rect::new(usable.x + half_w, usable.y + half_h, half_w, half_h),
            Section::BottomLeft => Rect::new(usable.x, usable.y, half_w, half_h),
            Section::BottomRight => Rect::new(usable.x + half_w, usable.y, half_w, half_h),
            Section::None => {
                let width = usable.width * BREAK_RATIO;
                let height = usable.height * BREAK_RATIO;
                Rect::new(
                    usable.x + (usable.width - width) / 2.0,
                    usable.y + (usable.height - height) / 2.0,
                    width,
                    height,
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: Rect = Rect {
        x: 0.0,
        y: 0.0,
        width: 1000.0,
        height: 1000.0,
    };

    // An offset, non-square frame like a secondary monitor's visible area.
    const OFFSET_FRAME: Rect = Rect {
        x: 1512.0,
        y: 228.0,
        width: 1440.0,
        height: 875.0,
    };

    #[test]
    fn classify_inverts_rect_in_for_every_section() {
        for frame in [FRAME, OFFSET_FRAME] {
            for section in SECTIONS {
                let rect = section.rect_in(frame);
                assert_eq!(
                    Section::classify(rect, frame),
                    section,
                    "round-trip failed for {:?} in {:?}",
                    section,
                    frame
                );
            }
        }
    }

    #[test]
    fn break_rect_does_not_classify_as_a_section() {
        let rect = Section::None.rect_in(FRAME);
        assert_eq!(rect, Rect::new(300.0, 300.0, 400.0, 400.0));
        assert_eq!(Section::classify(rect, FRAME), Section::None);
    }

    #[test]
    fn exact_left_half_classifies() {
        let rect = Rect::new(0.0, 0.0, 500.0, 1000.0);
        assert_eq!(Section::classify(rect, FRAME), Section::LeftHalf);
    }

    #[test]
    fn offset_within_tolerance_still_left_half() {
        // 1.5% of the frame width, inside the 2% band.
        let rect = Rect::new(15.0, 0.0, 500.0, 1000.0);
        assert_eq!(Section::classify(rect, FRAME), Section::LeftHalf);
    }

    #[test]
    fn offset_beyond_tolerance_is_none() {
        // 2.5% of the frame width, outside the band.
        let rect = Rect::new(25.0, 0.0, 500.0, 1000.0);
        assert_eq!(Section::classify(rect, FRAME), Section::None);
    }

    #[test]
    fn zero_area_rect_is_none() {
        let rect = Rect::new(0.0, 0.0, 0.0, 0.0);
        assert_eq!(Section::classify(rect, FRAME), Section::None);
    }

    #[test]
    fn off_screen_rect_is_none() {
        let rect = Rect::new(-2000.0, -2000.0, 500.0, 1000.0);
        assert_eq!(Section::classify(rect, FRAME), Section::None);
    }

    #[test]
    fn quadrants_distinguish_top_from_bottom() {
        // Layout space: y grows upward, so the top row sits at y + h/2.
        let top_left = Rect::new(0.0, 500.0, 500.0, 500.0);
        let bottom_left = Rect::new(0.0, 0.0, 500.0, 500.0);
        assert_eq!(Section::classify(top_left, FRAME), Section::TopLeft);
        assert_eq!(Section::classify(bottom_left, FRAME), Section::BottomLeft);
    }

    #[test]
    fn near_half_width_snaps_to_half_inside_tolerance() {
        let narrow = Rect::new(0.0, 0.0, 100.0, 1000.0);
        let rect = Rect::new(0.0, 0.0, 51.0, 1000.0);
        assert_eq!(Section::classify(rect, narrow), Section::LeftHalf);
        assert_eq!(Section::classify(narrow, narrow), Section::Full);
    }
}
