/*
 * Win32 implementation of `DialogPlatform`. Dialog templates and icons are
 * resolved from the module that hosts the executable. Every dialog created
 * here shares one dialog procedure, which hands each message to
 * `registry::route_message`; the init parameter passed to the creation calls
 * arrives back as the LPARAM of WM_INITDIALOG.
 */
use crate::error::Result as PlatformResult;
use crate::platform::DialogPlatform;
use crate::registry::route_message;
use crate::types::{ControlId, IconHandle, IconSize, NativeHandle, ResourceId};

use std::ffi::c_void;

use windows::{
    Win32::{
        Foundation::{GetLastError, HINSTANCE, HWND, LPARAM, WPARAM},
        System::LibraryLoader::GetModuleHandleW,
        UI::WindowsAndMessaging::{
            CreateDialogParamW, DestroyWindow, DialogBoxParamW, EndDialog, GetDlgItem, HICON,
            LoadIconW, PostQuitMessage, SendMessageW, WM_SETICON,
        },
    },
    core::PCWSTR,
};

pub struct Win32DialogPlatform {
    h_instance: HINSTANCE,
}

impl Win32DialogPlatform {
    pub fn new() -> PlatformResult<Self> {
        let h_instance = unsafe { HINSTANCE(GetModuleHandleW(PCWSTR::null())?.0) };
        Ok(Self { h_instance })
    }
}

// MAKEINTRESOURCEW
fn int_resource(resource_id: ResourceId) -> PCWSTR {
    PCWSTR(resource_id.raw() as usize as *const u16)
}

fn to_hwnd(handle: NativeHandle) -> HWND {
    HWND(handle.raw() as *mut c_void)
}

fn to_optional_hwnd(handle: NativeHandle) -> Option<HWND> {
    (!handle.is_invalid()).then(|| to_hwnd(handle))
}

fn to_native(hwnd: HWND) -> NativeHandle {
    NativeHandle::new(hwnd.0 as isize)
}

unsafe extern "system" fn dialog_proc(
    hdlg: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> isize {
    route_message(to_native(hdlg), msg, wparam.0, lparam.0)
}

impl DialogPlatform for Win32DialogPlatform {
    fn create_dialog(
        &self,
        resource_id: ResourceId,
        parent: NativeHandle,
        init_param: isize,
    ) -> Option<NativeHandle> {
        let result = unsafe {
            CreateDialogParamW(
                Some(self.h_instance),
                int_resource(resource_id),
                to_optional_hwnd(parent),
                Some(dialog_proc),
                LPARAM(init_param),
            )
        };
        match result {
            Ok(hwnd) if !hwnd.is_invalid() => Some(to_native(hwnd)),
            Ok(_) => None,
            Err(e) => {
                log::error!(
                    "Win32: CreateDialogParamW for template {} failed: {e:?}",
                    resource_id.raw()
                );
                None
            }
        }
    }

    fn run_modal_dialog(
        &self,
        resource_id: ResourceId,
        parent: NativeHandle,
        init_param: isize,
    ) -> isize {
        let exit_code = unsafe {
            DialogBoxParamW(
                Some(self.h_instance),
                int_resource(resource_id),
                to_optional_hwnd(parent),
                Some(dialog_proc),
                LPARAM(init_param),
            )
        };
        if exit_code == -1 {
            log::error!(
                "Win32: DialogBoxParamW for template {} failed: {:?}",
                resource_id.raw(),
                unsafe { GetLastError() }
            );
        }
        exit_code
    }

    fn destroy_window(&self, window: NativeHandle) {
        if let Err(e) = unsafe { DestroyWindow(to_hwnd(window)) } {
            log::debug!("Win32: DestroyWindow for {:#x} failed: {e:?}", window.raw());
        }
    }

    fn end_modal_loop(&self, dialog: NativeHandle, result: isize) {
        if let Err(e) = unsafe { EndDialog(to_hwnd(dialog), result) } {
            log::debug!("Win32: EndDialog for {:#x} failed: {e:?}", dialog.raw());
        }
    }

    fn find_dialog_item(
        &self,
        dialog: NativeHandle,
        control_id: ControlId,
    ) -> Option<NativeHandle> {
        unsafe { GetDlgItem(Some(to_hwnd(dialog)), control_id.raw()) }
            .ok()
            .filter(|hwnd| !hwnd.is_invalid())
            .map(to_native)
    }

    fn load_icon(&self, resource_id: ResourceId) -> Option<IconHandle> {
        unsafe { LoadIconW(Some(self.h_instance), int_resource(resource_id)) }
            .ok()
            .filter(|icon| !icon.is_invalid())
            .map(|icon| IconHandle(icon.0 as isize))
    }

    fn set_icon(&self, window: NativeHandle, size: IconSize, icon: IconHandle) {
        let icon = HICON(icon.0 as *mut c_void);
        unsafe {
            SendMessageW(
                to_hwnd(window),
                WM_SETICON,
                Some(WPARAM(size.raw())),
                Some(LPARAM(icon.0 as isize)),
            );
        }
    }

    fn post_quit(&self, exit_code: i32) {
        unsafe { PostQuitMessage(exit_code) };
    }
}
