use crate::monitor::MonitorBounds;
use crate::snapper::MonitorEnumerator;
use crate::{Rect, Result};
use log::debug;
use objc2_app_kit::NSScreen;
use objc2_foundation::MainThreadMarker;

/// Monitor enumeration via NSScreen.
///
/// NSScreen reports global bottom-left-origin coordinates, which is exactly
/// the layout space the engine works in, and `visibleFrame` already excludes
/// the menu bar and Dock. The list is re-read on every call so monitor
/// hot-plug and rearrangement are picked up without restarting.
pub struct ScreenEnumerator {
    mtm: MainThreadMarker,
}

impl ScreenEnumerator {
    pub fn new() -> Result<Self> {
        let mtm = MainThreadMarker::new()
            .ok_or_else(|| anyhow::anyhow!("NSScreen must be used from the main thread"))?;
        Ok(Self { mtm })
    }
}

impl MonitorEnumerator for ScreenEnumerator {
    fn list_monitors(&mut self) -> Result<Vec<MonitorBounds>> {
        let mut monitors = Vec::new();

        for screen in NSScreen::screens(self.mtm).iter() {
            let frame = screen.frame();
            let visible = screen.visibleFrame();
            monitors.push(MonitorBounds {
                frame: Rect::new(
                    frame.origin.x,
                    frame.origin.y,
                    frame.size.width,
                    frame.size.height,
                ),
                usable_frame: Rect::new(
                    visible.origin.x,
                    visible.origin.y,
                    visible.size.width,
                    visible.size.height,
                ),
            });
        }

        debug!("Enumerated {} screens", monitors.len());
        Ok(monitors)
    }
}
