/*
 * Maps native dialog handles to the `Dialog` that owns them, so the single
 * native dialog procedure can find the right instance for every message.
 *
 * A dialog's handle is unknown until the platform delivers its initialize
 * message (which happens inside the creation call), so creation first stages
 * the dialog under a numeric token. The token travels to the platform as the
 * init parameter and comes back as the LPARAM of WM_INITDIALOG, where the
 * staged dialog is bound to its handle. The binding is erased once the
 * destroy message has been dispatched.
 *
 * Messages are only delivered on the UI thread, so the tables are thread-local.
 */
use crate::dialog::Dialog;
use crate::types::NativeHandle;
use crate::window_common::{WM_DESTROY, WM_INITDIALOG};

use std::cell::RefCell;
use std::collections::HashMap;

struct DialogRegistry {
    next_token: usize,
    pending: HashMap<usize, Dialog>,
    live: HashMap<NativeHandle, Dialog>,
}

impl DialogRegistry {
    fn new() -> Self {
        Self {
            // Zero is what an unrelated caller would pass as init param.
            next_token: 1,
            pending: HashMap::new(),
            live: HashMap::new(),
        }
    }
}

thread_local! {
    static DIALOG_REGISTRY: RefCell<DialogRegistry> = RefCell::new(DialogRegistry::new());
}

pub(crate) fn stage(dialog: Dialog) -> usize {
    DIALOG_REGISTRY.with(|registry| {
        let mut registry = registry.borrow_mut();
        let token = registry.next_token;
        registry.next_token = registry.next_token.wrapping_add(1).max(1);
        registry.pending.insert(token, dialog);
        token
    })
}

/*
 * Drops a staged dialog whose creation failed or whose modal loop ended
 * without an initialize message. Returns true if the token was still pending.
 */
pub(crate) fn unstage(token: usize) -> bool {
    DIALOG_REGISTRY.with(|registry| registry.borrow_mut().pending.remove(&token).is_some())
}

fn bind(token: usize, hwnd: NativeHandle) -> Option<Dialog> {
    DIALOG_REGISTRY.with(|registry| {
        let mut registry = registry.borrow_mut();
        match registry.pending.remove(&token) {
            Some(dialog) => {
                registry.live.insert(hwnd, dialog.clone());
                Some(dialog)
            }
            None => registry.live.get(&hwnd).cloned(),
        }
    })
}

fn lookup(hwnd: NativeHandle) -> Option<Dialog> {
    DIALOG_REGISTRY.with(|registry| registry.borrow().live.get(&hwnd).cloned())
}

fn release(hwnd: NativeHandle) {
    DIALOG_REGISTRY.with(|registry| {
        registry.borrow_mut().live.remove(&hwnd);
    });
}

pub(crate) fn live_dialog(hwnd: NativeHandle) -> Option<Dialog> {
    lookup(hwnd)
}

/*
 * Entry point for every native dialog message. Messages for handles with no
 * registered dialog (including those the platform sends before
 * WM_INITDIALOG) are not handled and return 0.
 *
 * No registry borrow is held while the dialog runs, since handlers call back
 * into the platform and the platform may re-enter here synchronously.
 */
pub fn route_message(hwnd: NativeHandle, msg: u32, wparam: usize, lparam: isize) -> isize {
    let dialog = if msg == WM_INITDIALOG {
        bind(lparam as usize, hwnd)
    } else {
        lookup(hwnd)
    };

    let Some(dialog) = dialog else {
        return 0;
    };

    let result = dialog.handle_message(hwnd, msg, wparam, lparam);

    if msg == WM_DESTROY {
        release(hwnd);
    }
    result
}
