use crate::Rect;

/// A monitor's extent in layout space.
///
/// `frame` is the full panel; `usable_frame` excludes system-reserved chrome
/// (menu bar, Dock) and is what sections are computed against. The host
/// supplies these fresh on every command so hot-plugged monitors are seen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonitorBounds {
    pub frame: Rect,
    pub usable_frame: Rect,
}

/// Pick the monitor a window is considered to be on.
///
/// A monitor whose frame contains the window's origin wins outright; this
/// stays correct for windows hanging partially off-screen near a boundary.
/// Otherwise the largest intersection area with the window decides, with the
/// first encountered maximum winning so straddling windows resolve
/// deterministically. `None` only when no monitors were supplied.
pub fn resolve(window: Rect, monitors: &[MonitorBounds]) -> Option<&MonitorBounds> {
    if let Some(hit) = monitors
        .iter()
        .find(|m| m.frame.contains_point(window.x, window.y))
    {
        return Some(hit);
    }

    let mut best: Option<(&MonitorBounds, f64)> = None;
    for monitor in monitors {
        let area = monitor.frame.intersection(&window).area();
        match best {
            Some((_, best_area)) if area <= best_area => {}
            _ => best = Some((monitor, area)),
        }
    }
    best.map(|(monitor, _)| monitor)
}

/// The primary monitor: the one whose frame sits at the layout origin.
/// Arrangements without one (nothing at (0,0)) fall back to the first
/// supplied monitor; degraded but deliberate, not an error.
pub fn primary(monitors: &[MonitorBounds]) -> Option<&MonitorBounds> {
    monitors
        .iter()
        .find(|m| m.frame.x == 0.0 && m.frame.y == 0.0)
        .or_else(|| monitors.first())
}
