use axum::{
    Router,
    routing::{delete, get},
};
use std::sync::Arc;

use crate::presentation::http::handlers::DriveHandler;

pub fn drive_routes(drive_handler: Arc<DriveHandler>) -> Router {
    Router::new()
        .route("/drive/arquivos", get(DriveHandler::list_files))
        .route("/drive/arquivos/{file_id}", delete(DriveHandler::delete_file))
        .with_state(drive_handler)
}
