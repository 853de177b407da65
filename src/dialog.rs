/*
 * Dialogs instantiated from resource templates, modeless or modal, together
 * with the message dispatcher the native dialog procedure forwards to.
 *
 * A dialog moves through uninitialized -> ready -> destroyed, driven purely by
 * the message sequence:
 * - WM_INITDIALOG records the native handle, counts the dialog as live in its
 *   session and, for a modal dialog, runs the ready callback.
 * - WM_COMMAND from a child control is forwarded to the registered control.
 * - WM_CLOSE ends the modal loop (modal) or destroys the window (modeless).
 * - WM_DESTROY removes the dialog from the session's live count.
 * Every other message returns 0 and is never handed to default processing.
 */
use crate::app::AppSession;
use crate::error::{PlatformError, Result as PlatformResult};
use crate::registry;
use crate::types::{ControlId, DialogConfig, IconSize, NativeHandle, ResourceId};
use crate::window_common::{
    DLG_DEFAULT_FOCUS, DLG_HANDLED, SharedWidget, WM_CLOSE, WM_COMMAND, WM_DESTROY, WM_INITDIALOG,
};

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

/// Invoked once, while a modal dialog handles WM_INITDIALOG.
pub type ReadyCallback = Box<dyn FnOnce(&Dialog)>;

const MODAL_CLOSE_RESULT: isize = 0;
const MODAL_CREATION_FAILED: isize = -1;

struct DialogInner {
    handle: Cell<NativeHandle>,
    parent: NativeHandle,
    resource_id: ResourceId,
    config: DialogConfig,
    modal: bool,
    on_ready: RefCell<Option<ReadyCallback>>,
    // Keyed by the control's native handle, which is what WM_COMMAND carries.
    controls: RefCell<HashMap<NativeHandle, SharedWidget>>,
    session: Rc<AppSession>,
}

/// Handle to one native dialog window. Clones refer to the same dialog.
#[derive(Clone)]
pub struct Dialog {
    inner: Rc<DialogInner>,
}

impl Dialog {
    pub(crate) fn new(
        session: &Rc<AppSession>,
        resource_id: ResourceId,
        parent: NativeHandle,
        config: Option<DialogConfig>,
        on_ready: Option<ReadyCallback>,
    ) -> Self {
        Self {
            inner: Rc::new(DialogInner {
                handle: Cell::new(NativeHandle::NULL),
                parent,
                resource_id,
                config: config.unwrap_or_default(),
                modal: on_ready.is_some(),
                on_ready: RefCell::new(on_ready),
                controls: RefCell::new(HashMap::new()),
                session: Rc::clone(session),
            }),
        }
    }

    /*
     * Creates a modeless dialog from the template `resource_id`. The dialog is
     * registered for message routing before the platform is asked to create
     * it, so its very first WM_INITDIALOG reaches this instance. It is counted
     * as live once that message arrives.
     */
    pub fn create(
        session: &Rc<AppSession>,
        resource_id: ResourceId,
        parent: NativeHandle,
        config: Option<DialogConfig>,
    ) -> PlatformResult<Dialog> {
        let dialog = Dialog::new(session, resource_id, parent, config, None);
        let token = registry::stage(dialog.clone());
        log::debug!(
            "Dialog: creating modeless dialog from template {} (parent {:#x}).",
            resource_id.raw(),
            parent.raw()
        );

        match session
            .platform()
            .create_dialog(resource_id, parent, token as isize)
        {
            Some(hwnd) => {
                log::debug!(
                    "Dialog: template {} created as {:#x}.",
                    resource_id.raw(),
                    hwnd.raw()
                );
                Ok(dialog)
            }
            None => {
                registry::unstage(token);
                log::error!(
                    "Dialog: platform failed to create dialog from template {}.",
                    resource_id.raw()
                );
                Err(PlatformError::CreationFailed { resource_id })
            }
        }
    }

    /*
     * Runs a modal dialog from the template `resource_id` and blocks until its
     * modal loop ends, returning the platform's exit code. `on_ready` runs
     * once during WM_INITDIALOG and is the only place the live dialog is
     * reachable, e.g. to register controls or set the icon before it shows.
     */
    pub fn create_modal<F>(
        session: &Rc<AppSession>,
        resource_id: ResourceId,
        parent: NativeHandle,
        config: Option<DialogConfig>,
        on_ready: F,
    ) -> isize
    where
        F: FnOnce(&Dialog) + 'static,
    {
        let dialog = Dialog::new(session, resource_id, parent, config, Some(Box::new(on_ready)));
        let token = registry::stage(dialog);
        log::debug!(
            "Dialog: running modal dialog from template {} (parent {:#x}).",
            resource_id.raw(),
            parent.raw()
        );

        let exit_code = session
            .platform()
            .run_modal_dialog(resource_id, parent, token as isize);

        if registry::unstage(token) {
            log::warn!(
                "Dialog: modal loop for template {} ended before the dialog was initialized.",
                resource_id.raw()
            );
        }
        if exit_code == MODAL_CREATION_FAILED {
            log::error!(
                "Dialog: platform failed to run modal dialog from template {}.",
                resource_id.raw()
            );
        }
        exit_code
    }

    pub fn handle(&self) -> NativeHandle {
        self.inner.handle.get()
    }

    pub fn parent(&self) -> NativeHandle {
        self.inner.parent
    }

    pub fn resource_id(&self) -> ResourceId {
        self.inner.resource_id
    }

    pub fn config(&self) -> DialogConfig {
        self.inner.config
    }

    pub fn is_modal(&self) -> bool {
        self.inner.modal
    }

    /// True between the dialog's initialize and destroy messages.
    pub fn is_live(&self) -> bool {
        let handle = self.handle();
        if handle.is_invalid() {
            return false;
        }
        // The handle value may already belong to a newer dialog.
        registry::live_dialog(handle).is_some_and(|live| live.same_dialog(self))
    }

    pub fn same_dialog(&self, other: &Dialog) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    pub fn control_count(&self) -> usize {
        self.inner.controls.borrow().len()
    }

    pub fn has_control(&self, control_hwnd: NativeHandle) -> bool {
        self.inner.controls.borrow().contains_key(&control_hwnd)
    }

    /*
     * Looks up the child window declared with `control_id` in this dialog's
     * template. Fails until the dialog has received its native handle.
     */
    pub fn dialog_item(&self, control_id: ControlId) -> PlatformResult<NativeHandle> {
        let dialog = self.handle();
        let lookup_failed = PlatformError::ControlLookupFailed { dialog, control_id };
        if dialog.is_invalid() {
            log::warn!(
                "Dialog: control {} looked up before template {} was initialized.",
                control_id.raw(),
                self.inner.resource_id.raw()
            );
            return Err(lookup_failed);
        }
        self.inner
            .session
            .platform()
            .find_dialog_item(dialog, control_id)
            .filter(|hwnd| !hwnd.is_invalid())
            .ok_or_else(|| {
                log::warn!(
                    "Dialog: no control {} in dialog {:#x}.",
                    control_id.raw(),
                    dialog.raw()
                );
                lookup_failed
            })
    }

    /*
     * Binds `control` to the child window matching its declared id and routes
     * that child's command notifications to it from now on.
     */
    pub fn add_control(&self, control: SharedWidget) -> PlatformResult<()> {
        let control_id = control.borrow().window_base().control_id();
        let control_hwnd = self.dialog_item(control_id)?;
        control
            .borrow_mut()
            .window_base_mut()
            .bind(control_hwnd, self.handle());
        self.inner
            .controls
            .borrow_mut()
            .insert(control_hwnd, control);
        log::debug!(
            "Dialog: control {} bound to {:#x} in dialog {:#x}.",
            control_id.raw(),
            control_hwnd.raw(),
            self.handle().raw()
        );
        Ok(())
    }

    /*
     * Registers each control in order and stops at the first failure. Controls
     * registered before the failure stay registered.
     */
    pub fn add_controls<I>(&self, controls: I) -> PlatformResult<()>
    where
        I: IntoIterator<Item = SharedWidget>,
    {
        for control in controls {
            self.add_control(control)?;
        }
        Ok(())
    }

    // Best-effort: a missing icon leaves the current icons untouched.
    pub fn set_icon(&self, resource_id: ResourceId) {
        let platform = self.inner.session.platform();
        match platform.load_icon(resource_id) {
            Some(icon) => {
                platform.set_icon(self.handle(), IconSize::Small, icon);
                platform.set_icon(self.handle(), IconSize::Big, icon);
            }
            None => log::warn!("Dialog: icon resource {} not found.", resource_id.raw()),
        }
    }

    pub(crate) fn handle_message(
        &self,
        hwnd: NativeHandle,
        msg: u32,
        wparam: usize,
        lparam: isize,
    ) -> isize {
        match msg {
            WM_INITDIALOG => self.handle_initialize(hwnd),
            WM_COMMAND => self.handle_command(msg, wparam, lparam),
            WM_CLOSE => self.handle_close(hwnd),
            WM_DESTROY => self.handle_destroy(hwnd),
            _ => 0,
        }
    }

    // Must run once per dialog: a second delivery counts the dialog twice.
    fn handle_initialize(&self, hwnd: NativeHandle) -> isize {
        log::debug!(
            "Dialog: WM_INITDIALOG for {:#x} (template {}).",
            hwnd.raw(),
            self.inner.resource_id.raw()
        );
        self.inner.handle.set(hwnd);
        self.inner.session.dialog_ready();

        if !self.inner.modal {
            return DLG_DEFAULT_FOCUS;
        }
        // Taken out first so the callback can freely call back into this dialog.
        let on_ready = self.inner.on_ready.borrow_mut().take();
        if let Some(on_ready) = on_ready {
            on_ready(self);
        }
        DLG_HANDLED
    }

    /*
     * Forwards a control notification to the registered control. The
     * control's return value is not reflected back to the platform.
     */
    fn handle_command(&self, msg: u32, wparam: usize, lparam: isize) -> isize {
        if lparam == 0 {
            return 0;
        }
        let control_hwnd = NativeHandle::new(lparam);
        let control = self.inner.controls.borrow().get(&control_hwnd).cloned();
        match control {
            Some(control) => {
                if let Ok(mut control) = control.try_borrow_mut() {
                    let _ = control.handle_message(msg, wparam, lparam);
                } else {
                    log::warn!(
                        "Dialog: re-entrant WM_COMMAND for control {:#x} dropped.",
                        control_hwnd.raw()
                    );
                }
            }
            None => log::trace!(
                "Dialog: WM_COMMAND from unregistered control {:#x} dropped.",
                control_hwnd.raw()
            ),
        }
        0
    }

    fn handle_close(&self, hwnd: NativeHandle) -> isize {
        log::debug!("Dialog: WM_CLOSE for {:#x}.", hwnd.raw());
        let platform = self.inner.session.platform();
        if self.inner.modal {
            platform.end_modal_loop(hwnd, MODAL_CLOSE_RESULT);
        } else {
            platform.destroy_window(hwnd);
        }
        0
    }

    fn handle_destroy(&self, hwnd: NativeHandle) -> isize {
        log::debug!(
            "Dialog: WM_DESTROY for {:#x}, live dialogs before: {}.",
            hwnd.raw(),
            self.inner.session.live_dialogs()
        );
        self.inner.session.dialog_destroyed();
        // Controls may hold clones of this dialog; dropping them outside the
        // borrow breaks that cycle.
        let controls = std::mem::take(&mut *self.inner.controls.borrow_mut());
        drop(controls);
        0
    }
}

impl std::fmt::Debug for Dialog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dialog")
            .field("handle", &self.handle())
            .field("parent", &self.inner.parent)
            .field("resource_id", &self.inner.resource_id)
            .field("config", &self.inner.config)
            .field("modal", &self.inner.modal)
            .field("controls", &self.control_count())
            .finish()
    }
}
