/*
 * Platform-agnostic value types used across the dialog layer. Native handles
 * are carried as plain integers here so the dispatch logic can be compiled and
 * tested on every host; the Win32 binding converts them at the boundary.
 */

/// Opaque native window handle. Zero means "no window".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct NativeHandle(pub isize);

impl NativeHandle {
    pub const NULL: NativeHandle = NativeHandle(0);

    pub const fn new(raw: isize) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> isize {
        self.0
    }

    pub const fn is_invalid(self) -> bool {
        self.0 == 0
    }
}

/// Opaque native icon handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IconHandle(pub isize);

/// Numeric identifier of a dialog template or icon in the compiled resources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResourceId(u16);

impl ResourceId {
    pub const fn new(raw: u16) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u16 {
        self.0
    }
}

/// Template id of a child control inside a dialog template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ControlId(i32);

impl ControlId {
    pub const fn new(raw: i32) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> i32 {
        self.0
    }
}

/// Which of the two window icons `WM_SETICON` replaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconSize {
    Small,
    Big,
}

impl IconSize {
    // ICON_SMALL / ICON_BIG
    pub const fn raw(self) -> usize {
        match self {
            IconSize::Small => 0,
            IconSize::Big => 1,
        }
    }
}

/// Construction options for a dialog. `None` at a creation site means the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DialogConfig {
    /// Extra style bits. Stored, not yet applied to the native window.
    pub style: u32,
}

impl DialogConfig {
    pub fn with_style(mut self, style: u32) -> Self {
        self.style = style;
        self
    }
}
