//! Presentation: the form page and the interactive terminal loop

pub mod interactive;
pub mod page;

pub use interactive::InteractiveForm;
pub use page::render;
