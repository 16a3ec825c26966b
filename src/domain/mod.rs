pub mod document;
pub mod formatting;
pub mod script;
pub mod store;
pub mod sync;
pub mod tabs;
pub mod window;
