pub mod drive_client;
pub mod service_account;

pub use drive_client::{DEFAULT_DRIVE_API_BASE, GoogleDriveStore, drive_download_url};
pub use service_account::{ServiceAccountCredentials, ServiceAccountTokenProvider, TokenProvider};
