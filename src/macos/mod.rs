//! macOS implementations of the platform boundary: the Accessibility API for
//! the focused window's frame, NSScreen for monitor bounds.

pub mod accessibility;
pub mod screens;

pub use accessibility::AccessibilityManager;
pub use screens::ScreenEnumerator;
