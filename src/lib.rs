// Table Timeline Library
// Scheduling grid core: time/slot/pixel transforms, row layout,
// virtualization, drag gestures and double-booking detection

pub mod models;
pub mod services;
pub mod timeline;
pub mod utils;
