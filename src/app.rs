/*
 * The application session: owns the platform binding and the count of live
 * dialogs. Every dialog is handed the session at construction; the dialog
 * reports when it becomes ready and when it is destroyed, and the session
 * posts a quit request once the last live dialog goes away.
 *
 * All dialog traffic is delivered on the UI thread, so the session is shared
 * through `Rc` and the count is a plain `Cell`.
 */
use crate::platform::DialogPlatform;

use std::cell::Cell;
use std::rc::Rc;

const QUIT_EXIT_CODE: i32 = 0;

pub struct AppSession {
    platform: Rc<dyn DialogPlatform>,
    live_dialogs: Cell<usize>,
}

impl AppSession {
    pub fn new(platform: Rc<dyn DialogPlatform>) -> Rc<Self> {
        Rc::new(Self {
            platform,
            live_dialogs: Cell::new(0),
        })
    }

    /*
     * Builds a session over the native Win32 binding, resolving the module
     * instance that holds the dialog templates.
     */
    #[cfg(target_os = "windows")]
    pub fn win32() -> crate::error::Result<Rc<Self>> {
        let platform = crate::win32::Win32DialogPlatform::new()?;
        Ok(Self::new(Rc::new(platform)))
    }

    pub fn live_dialogs(&self) -> usize {
        self.live_dialogs.get()
    }

    pub(crate) fn platform(&self) -> &dyn DialogPlatform {
        self.platform.as_ref()
    }

    pub(crate) fn dialog_ready(&self) {
        let count = self.live_dialogs.get() + 1;
        self.live_dialogs.set(count);
        log::debug!("AppSession: live dialog count incremented to {count}.");
    }

    /*
     * Records a destroyed dialog. Returns true when this was the last live
     * dialog, in which case a quit request has been posted.
     */
    pub(crate) fn dialog_destroyed(&self) -> bool {
        let prev_count = self.live_dialogs.get();
        if prev_count == 0 {
            log::warn!("AppSession: dialog destroyed while no dialog was counted as live.");
            return false;
        }
        self.live_dialogs.set(prev_count - 1);
        log::debug!(
            "AppSession: live dialog count decremented, was {}, now {}.",
            prev_count,
            prev_count - 1
        );
        if prev_count == 1 {
            log::debug!("AppSession: last live dialog destroyed, posting quit.");
            self.platform.post_quit(QUIT_EXIT_CODE);
            return true;
        }
        false
    }
}

impl std::fmt::Debug for AppSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppSession")
            .field("live_dialogs", &self.live_dialogs.get())
            .finish_non_exhaustive()
    }
}
