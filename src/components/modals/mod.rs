pub mod command_palette;
pub mod error;
pub mod helpers;
pub mod manager;
pub mod prompt;

pub use command_palette::{CommandPaletteModal, PaletteHit};
pub use manager::ModalManager;
