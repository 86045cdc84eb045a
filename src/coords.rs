//! Conversion between the two coordinate conventions in play.
//!
//! Window-introspection APIs report rects with the origin at the top-left of
//! the primary display and y growing downward. Monitor layout (and all
//! section math) uses bottom-left-origin, y-growing-upward coordinates. The
//! flip is around the primary display's full height and leaves x, width and
//! height untouched; there is exactly one conversion point, and the primary
//! height is passed in at call time so a changed monitor arrangement is
//! picked up on the next command instead of going stale.

use crate::Rect;

fn flip_y(rect: Rect, primary_height: f64) -> Rect {
    Rect::new(
        rect.x,
        primary_height - rect.y - rect.height,
        rect.width,
        rect.height,
    )
}

/// Map an introspection-space rect into layout space.
pub fn to_layout_space(rect: Rect, primary_height: f64) -> Rect {
    flip_y(rect, primary_height)
}

/// Map a layout-space rect back into introspection space. The flip is its
/// own inverse, so this is the same formula.
pub fn to_introspection_space(rect: Rect, primary_height: f64) -> Rect {
    flip_y(rect, primary_height)
}
