pub mod colors;
pub mod settings;
