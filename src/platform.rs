/*
 * The outbound boundary of the dialog layer: every request the layer makes to
 * the native windowing subsystem goes through `DialogPlatform`. The Win32
 * binding lives in `win32`; tests substitute a recording fake.
 *
 * Inbound traffic (platform -> layer) enters through `registry::route_message`.
 */
use crate::types::{ControlId, IconHandle, IconSize, NativeHandle, ResourceId};

pub trait DialogPlatform {
    /*
     * Instantiates a modeless dialog from `resource_id`. The platform must hand
     * `init_param` back as the LPARAM of the dialog's initialize message.
     * Returns `None` when the template could not be instantiated.
     */
    fn create_dialog(
        &self,
        resource_id: ResourceId,
        parent: NativeHandle,
        init_param: isize,
    ) -> Option<NativeHandle>;

    /*
     * Runs a modal dialog from `resource_id`, blocking until its modal loop
     * ends, and returns the loop's exit code. `init_param` is delivered the same
     * way as for `create_dialog`.
     */
    fn run_modal_dialog(
        &self,
        resource_id: ResourceId,
        parent: NativeHandle,
        init_param: isize,
    ) -> isize;

    fn destroy_window(&self, window: NativeHandle);

    fn end_modal_loop(&self, dialog: NativeHandle, result: isize);

    fn find_dialog_item(
        &self,
        dialog: NativeHandle,
        control_id: ControlId,
    ) -> Option<NativeHandle>;

    fn load_icon(&self, resource_id: ResourceId) -> Option<IconHandle>;

    fn set_icon(&self, window: NativeHandle, size: IconSize, icon: IconHandle);

    fn post_quit(&self, exit_code: i32);
}
