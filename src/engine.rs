use log::debug;
use thiserror::Error;

use crate::coords;
use crate::monitor::{self, MonitorBounds};
use crate::section::Section;
use crate::transition::{self, SnapCommand, SnapTarget};
use crate::Rect;

/// The only way a snap computation can fail; everything past monitor
/// resolution is a total function.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("no monitors available")]
    NoMonitors,
}

/// What the host should do with the focused window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SnapOutcome {
    /// Apply this frame (introspection space, ready to hand to the window
    /// API).
    Move(Rect),
    /// Do not reposition; ask the host to minimize instead.
    Minimize,
}

/// A half of the screen, for the legacy direct snaps that predate the
/// cycling model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Half {
    Left,
    Right,
}

/// Stateless orchestrator for one snap computation.
///
/// Holds nothing between calls: the window rect and the monitor list are
/// passed in fresh every time, because the window may have moved and
/// monitors may have been plugged or unplugged since the last command.
#[derive(Debug, Default)]
pub struct SnapEngine;

impl SnapEngine {
    pub fn new() -> Self {
        Self
    }

    /// Compute where a directional command sends the focused window.
    ///
    /// Pipeline: flip the introspection-space rect into layout space around
    /// the primary monitor's height, pick the monitor the window is on,
    /// classify its current section against that monitor's usable frame, run
    /// the transition table, then render the target section back into an
    /// introspection-space rect (or report a minimize).
    pub fn compute_target(
        &self,
        command: SnapCommand,
        window: Rect,
        monitors: &[MonitorBounds],
    ) -> Result<SnapOutcome, EngineError> {
        let primary = monitor::primary(monitors).ok_or(EngineError::NoMonitors)?;
        let primary_height = primary.frame.height;

        let layout_rect = coords::to_layout_space(window, primary_height);
        let target_monitor =
            monitor::resolve(layout_rect, monitors).ok_or(EngineError::NoMonitors)?;
        let usable = target_monitor.usable_frame;

        let current = Section::classify(layout_rect, usable);
        let next = transition::next_section(command, current);
        debug!(
            "snap {:?}: window {:?} classified {:?} -> {:?}",
            command, window, current, next
        );

        match next {
            SnapTarget::Minimize => Ok(SnapOutcome::Minimize),
            SnapTarget::Section(section) => {
                let target = section.rect_in(usable);
                Ok(SnapOutcome::Move(coords::to_introspection_space(
                    target,
                    primary_height,
                )))
            }
        }
    }

    /// Legacy direct half snap: ignores the window's current section and the
    /// transition table, always producing the half rect on the window's
    /// monitor.
    pub fn half_target(
        &self,
        half: Half,
        window: Rect,
        monitors: &[MonitorBounds],
    ) -> Result<Rect, EngineError> {
        let primary = monitor::primary(monitors).ok_or(EngineError::NoMonitors)?;
        let primary_height = primary.frame.height;

        let layout_rect = coords::to_layout_space(window, primary_height);
        let target_monitor =
            monitor::resolve(layout_rect, monitors).ok_or(EngineError::NoMonitors)?;

        let section = match half {
            Half::Left => Section::LeftHalf,
            Half::Right => Section::RightHalf,
        };
        let target = section.rect_in(target_monitor.usable_frame);
        debug!("direct {:?} half snap -> {:?}", half, target);
        Ok(coords::to_introspection_space(target, primary_height))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn square_monitor() -> MonitorBounds {
        MonitorBounds {
            frame: Rect::new(0.0, 0.0, 1000.0, 1000.0),
            usable_frame: Rect::new(0.0, 0.0, 1000.0, 1000.0),
        }
    }

    #[test]
    fn full_window_snaps_left_to_left_half() {
        let engine = SnapEngine::new();
        let monitors = [square_monitor()];
        let window = Rect::new(0.0, 0.0, 1000.0, 1000.0);

        let outcome = engine
            .compute_target(SnapCommand::Left, window, &monitors)
            .unwrap();
        assert_eq!(outcome, SnapOutcome::Move(Rect::new(0.0, 0.0, 500.0, 1000.0)));
    }

    #[test]
    fn bottom_left_window_snaps_down_to_minimize() {
        let engine = SnapEngine::new();
        let monitors = [square_monitor()];
        // Bottom-left quadrant in layout space is {0,0,500,500}; flipped into
        // introspection space that is y = 500.
        let window = Rect::new(0.0, 500.0, 500.0, 500.0);

        let outcome = engine
            .compute_target(SnapCommand::Down, window, &monitors)
            .unwrap();
        assert_matches!(outcome, SnapOutcome::Minimize);
    }

    #[test]
    fn top_left_window_snaps_up_to_full() {
        let engine = SnapEngine::new();
        let monitors = [square_monitor()];
        // Top-left quadrant: layout {0,500,500,500} <-> introspection y = 0.
        let window = Rect::new(0.0, 0.0, 500.0, 500.0);

        let outcome = engine
            .compute_target(SnapCommand::Up, window, &monitors)
            .unwrap();
        assert_eq!(
            outcome,
            SnapOutcome::Move(Rect::new(0.0, 0.0, 1000.0, 1000.0))
        );
    }

    #[test]
    fn no_monitors_is_the_only_failure() {
        let engine = SnapEngine::new();
        let window = Rect::new(0.0, 0.0, 100.0, 100.0);
        let result = engine.compute_target(SnapCommand::Left, window, &[]);
        assert_matches!(result, Err(EngineError::NoMonitors));
    }

    #[test]
    fn sections_respect_the_usable_frame() {
        let engine = SnapEngine::new();
        // 25px menu bar at the top: usable frame loses its top strip, which
        // in layout space means the usable height stops at 975.
        let monitors = [MonitorBounds {
            frame: Rect::new(0.0, 0.0, 1000.0, 1000.0),
            usable_frame: Rect::new(0.0, 0.0, 1000.0, 975.0),
        }];
        // The window fills the usable frame: introspection y = 25.
        let window = Rect::new(0.0, 25.0, 1000.0, 975.0);

        let outcome = engine
            .compute_target(SnapCommand::Left, window, &monitors)
            .unwrap();
        // Left half of the usable frame, still below the menu bar.
        assert_eq!(
            outcome,
            SnapOutcome::Move(Rect::new(0.0, 25.0, 500.0, 975.0))
        );
    }

    #[test]
    fn window_on_secondary_monitor_snaps_within_it() {
        let engine = SnapEngine::new();
        let primary = square_monitor();
        let secondary = MonitorBounds {
            frame: Rect::new(1000.0, 0.0, 1000.0, 1000.0),
            usable_frame: Rect::new(1000.0, 0.0, 1000.0, 1000.0),
        };
        let monitors = [primary, secondary];
        // Somewhere in the middle of the secondary monitor.
        let window = Rect::new(1200.0, 300.0, 400.0, 300.0);

        let outcome = engine
            .compute_target(SnapCommand::Right, window, &monitors)
            .unwrap();
        assert_eq!(
            outcome,
            SnapOutcome::Move(Rect::new(1500.0, 0.0, 500.0, 1000.0))
        );
    }

    #[test]
    fn unsnapped_window_snapping_up_gets_the_break_rect() {
        let engine = SnapEngine::new();
        let monitors = [square_monitor()];
        let window = Rect::new(123.0, 217.0, 640.0, 480.0);

        let outcome = engine
            .compute_target(SnapCommand::Up, window, &monitors)
            .unwrap();
        assert_eq!(
            outcome,
            SnapOutcome::Move(Rect::new(300.0, 300.0, 400.0, 400.0))
        );
    }

    #[test]
    fn half_target_bypasses_the_transition_table() {
        let engine = SnapEngine::new();
        let monitors = [square_monitor()];
        // Window already occupies the left half. The cycling table would
        // break out on a rightward command; the direct snap must produce the
        // right half regardless.
        let window = Rect::new(0.0, 0.0, 500.0, 1000.0);

        let direct = engine
            .half_target(Half::Right, window, &monitors)
            .unwrap();
        assert_eq!(direct, Rect::new(500.0, 0.0, 500.0, 1000.0));

        let cycled = engine
            .compute_target(SnapCommand::Right, window, &monitors)
            .unwrap();
        assert_eq!(
            cycled,
            SnapOutcome::Move(Rect::new(300.0, 300.0, 400.0, 400.0))
        );
    }
}
