pub mod banner;
pub mod console;

pub use console::{ConsoleUi, InquireConfirm};
