//! Navigation and modal state of the website chrome.

use std::fmt;

/// Vertical scroll offset past which the header switches to its compact style.
pub const SCROLL_THRESHOLD: u32 = 100;

/// The dialog currently covering the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Modal {
    /// Sign-in form.
    Login,
    /// Sign-up form.
    Register,
    /// Support ticket form.
    Support,
}

impl fmt::Display for Modal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Login => write!(f, "login"),
            Self::Register => write!(f, "register"),
            Self::Support => write!(f, "support"),
        }
    }
}

/// Input from the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// A button opened a dialog.
    OpenModal(Modal),
    /// The dialog's close button or backdrop was clicked.
    CloseModal,
    /// The mobile menu button was pressed.
    ToggleNav,
    /// The page scrolled to this vertical offset.
    Scrolled(u32),
    /// A key was pressed.
    Key {
        /// Key name as reported by the browser, e.g. `Escape` or `l`.
        key: String,
        /// Whether Ctrl was held.
        ctrl: bool,
        /// Whether Cmd/Meta was held.
        meta: bool,
    },
}

impl UiEvent {
    /// A key press without modifiers.
    pub fn key(key: impl Into<String>) -> Self {
        Self::Key {
            key: key.into(),
            ctrl: false,
            meta: false,
        }
    }

    /// A key press with Ctrl held.
    pub fn ctrl(key: impl Into<String>) -> Self {
        Self::Key {
            key: key.into(),
            ctrl: true,
            meta: false,
        }
    }
}

/// Header, menu, and dialog state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UiState {
    modal: Option<Modal>,
    nav_open: bool,
    scrolled: bool,
}

impl UiState {
    /// Everything closed, page at the top.
    pub fn new() -> Self {
        Self::default()
    }

    /// The open dialog.
    pub fn modal(&self) -> Option<Modal> {
        self.modal
    }

    /// Whether the mobile menu is expanded.
    pub fn is_nav_open(&self) -> bool {
        self.nav_open
    }

    /// Whether the header is in its scrolled style.
    pub fn is_scrolled(&self) -> bool {
        self.scrolled
    }

    /// Apply one event. Returns whether anything changed.
    pub fn handle(&mut self, event: &UiEvent) -> bool {
        let before = *self;
        match event {
            UiEvent::OpenModal(modal) => self.open(*modal),
            UiEvent::CloseModal => self.modal = None,
            UiEvent::ToggleNav => self.nav_open = !self.nav_open,
            UiEvent::Scrolled(y) => self.scrolled = *y > SCROLL_THRESHOLD,
            UiEvent::Key { key, ctrl, meta } => {
                let shortcut = *ctrl || *meta;
                match key.to_lowercase().as_str() {
                    "escape" => {
                        self.modal = None;
                        self.nav_open = false;
                    }
                    "l" if shortcut => self.open(Modal::Login),
                    "r" if shortcut => self.open(Modal::Register),
                    _ => {}
                }
            }
        }
        *self != before
    }

    /// Opening a dialog collapses the mobile menu.
    fn open(&mut self, modal: Modal) {
        self.modal = Some(modal);
        self.nav_open = false;
    }
}
