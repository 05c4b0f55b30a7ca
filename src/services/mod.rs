// Service module exports

pub mod conflict;
pub mod settings;
