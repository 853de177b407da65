/*
 * Public entry point for the resdialog crate: native dialogs created from
 * resource templates, with WM_COMMAND notifications routed to per-control
 * handler objects and an application session that posts quit once the last
 * live dialog is destroyed.
 *
 * The dialog lifecycle and message dispatch are written against the
 * `DialogPlatform` trait and compile on every platform, so non-Windows builds
 * can still compile and test them. Only the Win32 binding itself is gated.
 */
pub mod app;
pub mod controls;
pub mod dialog;
pub mod error;
pub mod platform;
pub mod registry;
#[cfg(test)]
pub(crate) mod test_support;
pub mod types;
#[cfg(target_os = "windows")]
pub mod win32;
pub mod window_common;

pub use app::AppSession;
pub use controls::Button;
pub use dialog::{Dialog, ReadyCallback};
pub use error::{PlatformError, Result as PlatformResult};
pub use platform::DialogPlatform;
pub use registry::route_message;
pub use types::{ControlId, DialogConfig, IconHandle, IconSize, NativeHandle, ResourceId};
#[cfg(target_os = "windows")]
pub use win32::Win32DialogPlatform;
pub use window_common::{SharedWidget, Widget, WindowBase};
