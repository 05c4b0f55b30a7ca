// Settings service module
// Loads and stores timeline settings as TOML

mod service;

pub use service::SettingsService;
