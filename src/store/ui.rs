use parking_lot::RwLock;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UiSnapshot {
    pub chat_open: bool,
    pub drawer_open: bool,
}

/// Transient shell flags: chat bubble and history drawer.
#[derive(Clone, Default)]
pub struct UiFlags {
    state: Arc<RwLock<UiSnapshot>>,
}

impl UiFlags {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> UiSnapshot {
        *self.state.read()
    }

    pub fn open_chat(&self) {
        self.state.write().chat_open = true;
    }

    pub fn close_chat(&self) {
        self.state.write().chat_open = false;
    }

    /// Hamburger click: flips the drawer and shows the tip bubble with it.
    pub fn toggle_drawer(&self) {
        let mut state = self.state.write();
        let next = !state.drawer_open;
        state.drawer_open = next;
        state.chat_open = next;
    }

    pub fn close_drawer(&self) {
        let mut state = self.state.write();
        state.drawer_open = false;
        state.chat_open = false;
    }
}
