use std::fmt;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WindowId(pub u64);

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What the shell needs to know about document windows and the tab groups
/// they live in.
#[cfg_attr(test, mockall::automock)]
pub trait WindowHost {
    /// Visible windows, in no particular order.
    fn windows(&self) -> Vec<WindowId>;

    /// The window receiving keyboard input.
    fn key_window(&self) -> Option<WindowId>;

    /// All members of `window`'s tab group in tab order, including `window`
    /// itself. A window that is not tabbed returns just itself.
    fn tab_peers(&self, window: WindowId) -> Vec<WindowId>;

    fn activate(&mut self, window: WindowId);

    fn title(&self, window: WindowId) -> Option<String>;

    fn set_title(&mut self, window: WindowId, title: String);
}
