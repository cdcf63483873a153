mod application;
mod domain;
mod infrastructure;
mod presentation;
#[cfg(test)]
mod test_support;

use dotenv::dotenv;

use crate::infrastructure::{AppContainer, AppSettings};
use crate::presentation::http::HttpServer;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    env_logger::init();

    let settings = AppSettings::from_env()?;
    let container = AppContainer::new(&settings).await?;

    tracing::info!("Iniciando NatJus Notas Técnicas na porta {}", settings.port);

    let server = HttpServer::new(
        container.nota_handler.clone(),
        container.upload_handler.clone(),
        container.chat_handler.clone(),
        container.configuracao_handler.clone(),
        container.drive_handler.clone(),
        container.arquivo_handler.clone(),
        Some(settings.port),
    );

    server.run().await
}
