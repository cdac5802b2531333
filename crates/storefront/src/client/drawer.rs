//! Cart drawer visibility.

/// Open/closed state of the cart drawer and its overlay.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Drawer {
    open: bool,
}

impl Drawer {
    /// Whether the drawer is showing.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.open
    }

    /// Show the drawer. Returns `true` if it was closed.
    pub const fn open(&mut self) -> bool {
        let changed = !self.open;
        self.open = true;
        changed
    }

    /// Hide the drawer. Returns `true` if it was open.
    pub const fn close(&mut self) -> bool {
        let changed = self.open;
        self.open = false;
        changed
    }
}
