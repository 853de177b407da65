/*
 * Common windowing pieces shared by dialogs and the controls they host: the
 * message identifiers this layer reacts to, WPARAM word helpers, the base
 * window state every wrapper carries, and the `Widget` capability a control
 * must implement to receive command notifications from its dialog.
 *
 * The message identifiers are mirrored here as plain integers so non-Windows
 * builds can compile and test the dispatch logic.
 */
use crate::types::{ControlId, NativeHandle};

use std::cell::RefCell;
use std::rc::Rc;

pub const WM_DESTROY: u32 = 0x0002;
pub const WM_CLOSE: u32 = 0x0010;
pub const WM_SETICON: u32 = 0x0080;
pub const WM_INITDIALOG: u32 = 0x0110;
pub const WM_COMMAND: u32 = 0x0111;

// Button notification code carried in the high word of WM_COMMAND's WPARAM.
pub const BN_CLICKED: u32 = 0;

// Dialog procedure return values.
pub(crate) const DLG_DEFAULT_FOCUS: isize = 1;
pub(crate) const DLG_HANDLED: isize = 0;

#[inline]
pub fn loword_from_wparam(wparam: usize) -> u32 {
    (wparam & 0xFFFF) as u32
}

#[inline]
pub fn highord_from_wparam(wparam: usize) -> u32 {
    ((wparam >> 16) & 0xFFFF) as u32
}

/*
 * Native state common to every wrapped window. For a control, `resource_id`
 * is its declared template id; `handle` and `parent` stay null until the
 * owning dialog binds it.
 */
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowBase {
    handle: NativeHandle,
    parent: NativeHandle,
    control_id: ControlId,
}

impl WindowBase {
    pub fn new(control_id: ControlId) -> Self {
        Self {
            handle: NativeHandle::NULL,
            parent: NativeHandle::NULL,
            control_id,
        }
    }

    pub fn handle(&self) -> NativeHandle {
        self.handle
    }

    pub fn parent(&self) -> NativeHandle {
        self.parent
    }

    pub fn control_id(&self) -> ControlId {
        self.control_id
    }

    pub(crate) fn bind(&mut self, handle: NativeHandle, parent: NativeHandle) {
        self.handle = handle;
        self.parent = parent;
    }
}

/// Capability consumed by dialogs: anything that can take a raw window message
/// and expose its base window state.
pub trait Widget {
    fn handle_message(&mut self, msg: u32, wparam: usize, lparam: isize) -> isize;

    fn window_base(&self) -> &WindowBase;

    fn window_base_mut(&mut self) -> &mut WindowBase;

    fn handle(&self) -> NativeHandle {
        self.window_base().handle()
    }
}

/// A registered control. The caller keeps its own clone to read the control's state later.
pub type SharedWidget = Rc<RefCell<dyn Widget>>;
