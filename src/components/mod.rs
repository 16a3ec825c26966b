pub mod editor_view;
pub mod footer;
pub mod header;
pub mod modals;
