pub mod documents;
pub mod editor;
pub mod handler;
pub mod palette;
pub mod tabs;
