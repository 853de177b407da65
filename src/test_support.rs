/*
 * Test doubles for the platform boundary. `FakePlatform` records every
 * outbound request and, for modal dialogs, plays the part of the platform's
 * modal loop by delivering messages back through `registry::route_message`.
 */
use crate::platform::DialogPlatform;
use crate::registry::route_message;
use crate::types::{ControlId, IconHandle, IconSize, NativeHandle, ResourceId};
use crate::window_common::{WM_INITDIALOG, WindowBase, Widget};

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;
use std::sync::atomic::{AtomicIsize, Ordering};

// Handles are unique across the whole test binary so registry entries left by
// one test can never alias another test's windows.
static NEXT_HANDLE: AtomicIsize = AtomicIsize::new(0x1000);

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum PlatformCall {
    CreateDialog {
        resource_id: ResourceId,
        parent: NativeHandle,
    },
    RunModalDialog {
        resource_id: ResourceId,
        parent: NativeHandle,
    },
    DestroyWindow(NativeHandle),
    EndModalLoop {
        dialog: NativeHandle,
        result: isize,
    },
    FindDialogItem {
        dialog: NativeHandle,
        control_id: ControlId,
    },
    LoadIcon(ResourceId),
    SetIcon {
        window: NativeHandle,
        size: IconSize,
        icon: IconHandle,
    },
    PostQuit(i32),
}

type ModalScript = Box<dyn FnOnce(NativeHandle, isize) -> isize>;

#[derive(Default)]
pub(crate) struct FakePlatform {
    calls: RefCell<Vec<PlatformCall>>,
    fail_creation: Cell<bool>,
    last_created: Cell<Option<NativeHandle>>,
    last_init_param: Cell<Option<isize>>,
    children: RefCell<HashMap<ControlId, NativeHandle>>,
    icons: RefCell<HashMap<ResourceId, IconHandle>>,
    modal_script: RefCell<Option<ModalScript>>,
}

impl FakePlatform {
    pub(crate) fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub(crate) fn fresh_handle() -> NativeHandle {
        NativeHandle::new(NEXT_HANDLE.fetch_add(0x10, Ordering::Relaxed))
    }

    pub(crate) fn calls(&self) -> Vec<PlatformCall> {
        self.calls.borrow().clone()
    }

    pub(crate) fn last_created_handle(&self) -> Option<NativeHandle> {
        self.last_created.get()
    }

    pub(crate) fn last_init_param(&self) -> Option<isize> {
        self.last_init_param.get()
    }

    pub(crate) fn fail_creation(&self) {
        self.fail_creation.set(true);
    }

    // Declares a child control present in every dialog created by this platform.
    pub(crate) fn add_child(&self, control_id: ControlId) -> NativeHandle {
        let hwnd = Self::fresh_handle();
        self.children.borrow_mut().insert(control_id, hwnd);
        hwnd
    }

    pub(crate) fn add_icon(&self, resource_id: ResourceId) -> IconHandle {
        let icon = IconHandle(Self::fresh_handle().raw());
        self.icons.borrow_mut().insert(resource_id, icon);
        icon
    }

    /*
     * Replaces the default modal loop (deliver WM_INITDIALOG, return 0) for the
     * next modal dialog. The script receives the dialog handle and init param
     * and returns the loop's exit code.
     */
    pub(crate) fn script_modal<F>(&self, script: F)
    where
        F: FnOnce(NativeHandle, isize) -> isize + 'static,
    {
        *self.modal_script.borrow_mut() = Some(Box::new(script));
    }

    fn record(&self, call: PlatformCall) {
        self.calls.borrow_mut().push(call);
    }
}

impl DialogPlatform for FakePlatform {
    fn create_dialog(
        &self,
        resource_id: ResourceId,
        parent: NativeHandle,
        init_param: isize,
    ) -> Option<NativeHandle> {
        self.record(PlatformCall::CreateDialog {
            resource_id,
            parent,
        });
        if self.fail_creation.get() {
            return None;
        }
        let hwnd = Self::fresh_handle();
        self.last_created.set(Some(hwnd));
        self.last_init_param.set(Some(init_param));
        Some(hwnd)
    }

    fn run_modal_dialog(
        &self,
        resource_id: ResourceId,
        parent: NativeHandle,
        init_param: isize,
    ) -> isize {
        self.record(PlatformCall::RunModalDialog {
            resource_id,
            parent,
        });
        let hwnd = Self::fresh_handle();
        self.last_created.set(Some(hwnd));
        self.last_init_param.set(Some(init_param));

        let script = self.modal_script.borrow_mut().take();
        match script {
            Some(script) => script(hwnd, init_param),
            None => {
                route_message(hwnd, WM_INITDIALOG, 0, init_param);
                0
            }
        }
    }

    fn destroy_window(&self, window: NativeHandle) {
        self.record(PlatformCall::DestroyWindow(window));
    }

    fn end_modal_loop(&self, dialog: NativeHandle, result: isize) {
        self.record(PlatformCall::EndModalLoop { dialog, result });
    }

    fn find_dialog_item(
        &self,
        dialog: NativeHandle,
        control_id: ControlId,
    ) -> Option<NativeHandle> {
        self.record(PlatformCall::FindDialogItem { dialog, control_id });
        self.children.borrow().get(&control_id).copied()
    }

    fn load_icon(&self, resource_id: ResourceId) -> Option<IconHandle> {
        self.record(PlatformCall::LoadIcon(resource_id));
        self.icons.borrow().get(&resource_id).copied()
    }

    fn set_icon(&self, window: NativeHandle, size: IconSize, icon: IconHandle) {
        self.record(PlatformCall::SetIcon { window, size, icon });
    }

    fn post_quit(&self, exit_code: i32) {
        self.record(PlatformCall::PostQuit(exit_code));
    }
}

/// Control that records every message it receives and answers with a fixed value.
pub(crate) struct RecordingWidget {
    base: WindowBase,
    reply: isize,
    pub(crate) received: Vec<(u32, usize, isize)>,
}

impl RecordingWidget {
    pub(crate) fn shared(control_id: i32, reply: isize) -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self {
            base: WindowBase::new(ControlId::new(control_id)),
            reply,
            received: Vec::new(),
        }))
    }
}

impl Widget for RecordingWidget {
    fn handle_message(&mut self, msg: u32, wparam: usize, lparam: isize) -> isize {
        self.received.push((msg, wparam, lparam));
        self.reply
    }

    fn window_base(&self) -> &WindowBase {
        &self.base
    }

    fn window_base_mut(&mut self) -> &mut WindowBase {
        &mut self.base
    }
}
