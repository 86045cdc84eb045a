use crate::snapper::WindowControl;
use crate::{Rect, Result};
use anyhow::anyhow;
use core_foundation::base::{CFRelease, CFRetain, CFTypeRef, TCFType};
use core_foundation::boolean::CFBoolean;
use core_foundation::string::{CFString, CFStringRef};
use core_graphics::geometry::{CGPoint, CGSize};
use log::{debug, info, warn};
use std::os::raw::c_void;

#[link(name = "ApplicationServices", kind = "framework")]
extern "C" {
    fn AXUIElementCreateSystemWide() -> AXUIElementRef;
    fn AXUIElementCopyAttributeValue(
        element: AXUIElementRef,
        attribute: CFStringRef,
        value: *mut CFTypeRef,
    ) -> AXError;
    fn AXUIElementSetAttributeValue(
        element: AXUIElementRef,
        attribute: CFStringRef,
        value: CFTypeRef,
    ) -> AXError;
    fn AXIsProcessTrusted() -> bool;

    fn AXValueCreate(value_type: AXValueType, value_ptr: *const c_void) -> CFTypeRef;
    fn AXValueGetValue(
        value: CFTypeRef,
        value_type: AXValueType,
        value_ptr: *mut c_void,
    ) -> bool;

    // Core Foundation array access, for the AXWindows fallback
    fn CFArrayGetCount(array: CFTypeRef) -> isize;
    fn CFArrayGetValueAtIndex(array: CFTypeRef, idx: isize) -> CFTypeRef;
}

type AXUIElementRef = CFTypeRef;
type AXError = i32;
type AXValueType = u32;

const K_AX_ERROR_SUCCESS: AXError = 0;
const K_AX_VALUE_CGPOINT_TYPE: AXValueType = 1;
const K_AX_VALUE_CGSIZE_TYPE: AXValueType = 2;

const K_AX_FOCUSED_APPLICATION_ATTRIBUTE: &str = "AXFocusedApplication";
const K_AX_FOCUSED_WINDOW_ATTRIBUTE: &str = "AXFocusedWindow";
const K_AX_MAIN_WINDOW_ATTRIBUTE: &str = "AXMainWindow";
const K_AX_WINDOWS_ATTRIBUTE: &str = "AXWindows";
const K_AX_POSITION_ATTRIBUTE: &str = "AXPosition";
const K_AX_SIZE_ATTRIBUTE: &str = "AXSize";
const K_AX_MINIMIZED_ATTRIBUTE: &str = "AXMinimized";

/// Focused-window access through the Accessibility API.
///
/// Every operation re-resolves the frontmost window from scratch; nothing is
/// cached, because focus may change between any two commands. Frames are in
/// AX coordinates: top-left origin of the primary display, y down.
pub struct AccessibilityManager {
    system_element: AXUIElementRef,
}

impl AccessibilityManager {
    pub fn new() -> Result<Self> {
        if unsafe { !AXIsProcessTrusted() } {
            warn!("Accessibility permissions not granted!");
            warn!("Grant access in System Settings > Privacy & Security > Accessibility");
        } else {
            info!("Accessibility permissions granted");
        }

        let system_element = unsafe { AXUIElementCreateSystemWide() };
        Ok(Self { system_element })
    }

    unsafe fn copy_attribute(element: AXUIElementRef, attribute: &str) -> Option<CFTypeRef> {
        let attr = CFString::new(attribute);
        let mut value: CFTypeRef = std::ptr::null();
        let result = AXUIElementCopyAttributeValue(element, attr.as_concrete_TypeRef(), &mut value);
        if result != K_AX_ERROR_SUCCESS || value.is_null() {
            return None;
        }
        Some(value)
    }

    /// The frontmost window of the focused application, trying the focused
    /// window first, then the main window, then the first window the app
    /// reports. Caller releases the returned element.
    unsafe fn frontmost_window(&self) -> Option<AXUIElementRef> {
        let app = Self::copy_attribute(self.system_element, K_AX_FOCUSED_APPLICATION_ATTRIBUTE)?;

        for attribute in [K_AX_FOCUSED_WINDOW_ATTRIBUTE, K_AX_MAIN_WINDOW_ATTRIBUTE] {
            if let Some(window) = Self::copy_attribute(app, attribute) {
                CFRelease(app);
                return Some(window);
            }
        }

        if let Some(windows) = Self::copy_attribute(app, K_AX_WINDOWS_ATTRIBUTE) {
            if CFArrayGetCount(windows) > 0 {
                let window = CFArrayGetValueAtIndex(windows, 0);
                // The array owns its elements; take our own reference before
                // the array goes away.
                CFRetain(window);
                CFRelease(windows);
                CFRelease(app);
                return Some(window);
            }
            CFRelease(windows);
        }

        CFRelease(app);
        None
    }

    unsafe fn frame_of(window: AXUIElementRef) -> Option<Rect> {
        let pos_value = Self::copy_attribute(window, K_AX_POSITION_ATTRIBUTE)?;
        let size_value = match Self::copy_attribute(window, K_AX_SIZE_ATTRIBUTE) {
            Some(v) => v,
            None => {
                CFRelease(pos_value);
                return None;
            }
        };

        let mut origin = CGPoint::new(0.0, 0.0);
        let mut size = CGSize::new(0.0, 0.0);
        let got_pos = AXValueGetValue(
            pos_value,
            K_AX_VALUE_CGPOINT_TYPE,
            &mut origin as *mut CGPoint as *mut c_void,
        );
        let got_size = AXValueGetValue(
            size_value,
            K_AX_VALUE_CGSIZE_TYPE,
            &mut size as *mut CGSize as *mut c_void,
        );
        CFRelease(pos_value);
        CFRelease(size_value);

        if !got_pos || !got_size {
            return None;
        }
        Some(Rect::new(origin.x, origin.y, size.width, size.height))
    }

    unsafe fn set_frame_of(window: AXUIElementRef, target: Rect) -> Result<()> {
        let origin = CGPoint::new(target.x, target.y);
        let size = CGSize::new(target.width, target.height);

        let pos_value = AXValueCreate(
            K_AX_VALUE_CGPOINT_TYPE,
            &origin as *const CGPoint as *const c_void,
        );
        let size_value = AXValueCreate(
            K_AX_VALUE_CGSIZE_TYPE,
            &size as *const CGSize as *const c_void,
        );
        if pos_value.is_null() || size_value.is_null() {
            if !pos_value.is_null() {
                CFRelease(pos_value);
            }
            if !size_value.is_null() {
                CFRelease(size_value);
            }
            return Err(anyhow!("AXValueCreate failed"));
        }

        let pos_attr = CFString::new(K_AX_POSITION_ATTRIBUTE);
        let size_attr = CFString::new(K_AX_SIZE_ATTRIBUTE);
        let pos_result =
            AXUIElementSetAttributeValue(window, pos_attr.as_concrete_TypeRef(), pos_value);
        let size_result =
            AXUIElementSetAttributeValue(window, size_attr.as_concrete_TypeRef(), size_value);
        CFRelease(pos_value);
        CFRelease(size_value);

        if pos_result != K_AX_ERROR_SUCCESS || size_result != K_AX_ERROR_SUCCESS {
            return Err(anyhow!(
                "failed to set frame: pos={}, size={}",
                pos_result,
                size_result
            ));
        }
        Ok(())
    }
}

impl WindowControl for AccessibilityManager {
    fn focused_window_rect(&mut self) -> Result<Option<Rect>> {
        unsafe {
            let Some(window) = self.frontmost_window() else {
                debug!("No frontmost window");
                return Ok(None);
            };
            let rect = Self::frame_of(window);
            CFRelease(window);
            Ok(rect)
        }
    }

    fn set_window_rect(&mut self, rect: Rect) -> Result<()> {
        unsafe {
            let window = self
                .frontmost_window()
                .ok_or_else(|| anyhow!("no frontmost window to move"))?;
            let result = Self::set_frame_of(window, rect);
            CFRelease(window);
            result
        }
    }

    fn minimize_window(&mut self) -> Result<()> {
        unsafe {
            let window = self
                .frontmost_window()
                .ok_or_else(|| anyhow!("no frontmost window to minimize"))?;
            let attr = CFString::new(K_AX_MINIMIZED_ATTRIBUTE);
            let result = AXUIElementSetAttributeValue(
                window,
                attr.as_concrete_TypeRef(),
                CFBoolean::true_value().as_CFTypeRef(),
            );
            CFRelease(window);

            if result != K_AX_ERROR_SUCCESS {
                return Err(anyhow!("failed to minimize window: {}", result));
            }
            Ok(())
        }
    }
}
