// Module exports for models

pub mod error;
pub mod interval;
pub mod operating_window;
pub mod resource;
pub mod settings;
pub mod snapshot;
