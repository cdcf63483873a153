pub mod container;
pub mod database;
pub mod external_services;
pub mod file_system;
pub mod settings;

// Re-export commonly used items
pub use container::AppContainer;
pub use database::{DbPool, create_connection_pool};
pub use file_system::LocalFileStore;
pub use settings::{AppSettings, SettingsError};
