/*
 * Push buttons declared in a dialog template. A `Button` is bound to its child
 * window by `Dialog::add_control` and turns BN_CLICKED command notifications
 * into a call to its click handler.
 */
use crate::types::ControlId;
use crate::window_common::{BN_CLICKED, WM_COMMAND, WindowBase, Widget, highord_from_wparam};

use std::cell::RefCell;
use std::rc::Rc;

type ClickHandler = Box<dyn FnMut(ControlId)>;

pub struct Button {
    base: WindowBase,
    on_click: Option<ClickHandler>,
}

impl Button {
    pub fn new(control_id: ControlId) -> Self {
        Self {
            base: WindowBase::new(control_id),
            on_click: None,
        }
    }

    pub fn with_on_click<F>(mut self, handler: F) -> Self
    where
        F: FnMut(ControlId) + 'static,
    {
        self.on_click = Some(Box::new(handler));
        self
    }

    /// Wraps the button for registration, keeping a typed reference for the caller.
    pub fn into_shared(self) -> Rc<RefCell<Button>> {
        Rc::new(RefCell::new(self))
    }
}

impl Widget for Button {
    // Returns 1 when a click was handled.
    fn handle_message(&mut self, msg: u32, wparam: usize, _lparam: isize) -> isize {
        if msg != WM_COMMAND || highord_from_wparam(wparam) != BN_CLICKED {
            return 0;
        }
        let control_id = self.base.control_id();
        log::debug!(
            "ButtonHandler: BN_CLICKED for ID {} (HWND {:#x}).",
            control_id.raw(),
            self.base.handle().raw()
        );
        match self.on_click.as_mut() {
            Some(on_click) => {
                on_click(control_id);
                1
            }
            None => 0,
        }
    }

    fn window_base(&self) -> &WindowBase {
        &self.base
    }

    fn window_base_mut(&mut self) -> &mut WindowBase {
        &mut self.base
    }
}

impl std::fmt::Debug for Button {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Button")
            .field("base", &self.base)
            .field("has_on_click", &self.on_click.is_some())
            .finish()
    }
}
