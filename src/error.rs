/*
 * Error type shared by the dialog layer. Only two failures are ever surfaced
 * to callers: a dialog template that could not be instantiated, and a declared
 * control id with no live child window. Every other platform interaction is
 * best-effort and only logged.
 */
use crate::types::{ControlId, NativeHandle, ResourceId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlatformError {
    /// The platform returned no window for the requested dialog template.
    CreationFailed { resource_id: ResourceId },
    /// No child window with `control_id` exists inside `dialog`.
    ControlLookupFailed {
        dialog: NativeHandle,
        control_id: ControlId,
    },
    /// The native binding could not be set up (module handle, etc).
    InitializationFailed(String),
}

impl std::fmt::Display for PlatformError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CreationFailed { resource_id } => {
                write!(f, "failed to create dialog from template {}", resource_id.raw())
            }
            Self::ControlLookupFailed { dialog, control_id } => write!(
                f,
                "no control with id {} in dialog {:#x}",
                control_id.raw(),
                dialog.raw()
            ),
            Self::InitializationFailed(msg) => write!(f, "initialization failed: {msg}"),
        }
    }
}

impl std::error::Error for PlatformError {}

// Lets `?` be used on `windows::core::Result<T>` inside the Win32 binding.
#[cfg(target_os = "windows")]
impl From<windows::core::Error> for PlatformError {
    fn from(e: windows::core::Error) -> Self {
        Self::InitializationFailed(format!("{e} ({:#010x})", e.code().0 as u32))
    }
}

pub type Result<T> = std::result::Result<T, PlatformError>;
