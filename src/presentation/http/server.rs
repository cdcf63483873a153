use axum::Router;
use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tower_http::classify::ServerErrorsFailureClass;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

use crate::presentation::http::{
    handlers::{
        ArquivoHandler, ChatHandler, ConfiguracaoHandler, DriveHandler, NotaHandler,
        UploadHandler,
    },
    routes::{
        arquivo_routes, chat_routes, configuracao_routes, drive_routes, health_routes,
        nota_routes, upload_routes,
    },
};

pub struct HttpServer {
    nota_handler: Arc<NotaHandler>,
    upload_handler: Arc<UploadHandler>,
    chat_handler: Arc<ChatHandler>,
    configuracao_handler: Arc<ConfiguracaoHandler>,
    drive_handler: Arc<DriveHandler>,
    arquivo_handler: Arc<ArquivoHandler>,
    port: u16,
}

impl HttpServer {
    pub fn new(
        nota_handler: Arc<NotaHandler>,
        upload_handler: Arc<UploadHandler>,
        chat_handler: Arc<ChatHandler>,
        configuracao_handler: Arc<ConfiguracaoHandler>,
        drive_handler: Arc<DriveHandler>,
        arquivo_handler: Arc<ArquivoHandler>,
        port: Option<u16>,
    ) -> Self {
        Self {
            nota_handler,
            upload_handler,
            chat_handler,
            configuracao_handler,
            drive_handler,
            arquivo_handler,
            port: port.unwrap_or(3000),
        }
    }

    pub fn router(&self) -> Router {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        Router::new()
            .merge(health_routes(self.upload_handler.queue_progress()))
            .merge(upload_routes(self.upload_handler.clone()))
            .merge(nota_routes(self.nota_handler.clone()))
            .merge(chat_routes(self.chat_handler.clone()))
            .merge(configuracao_routes(self.configuracao_handler.clone()))
            .merge(drive_routes(self.drive_handler.clone()))
            .merge(arquivo_routes(self.arquivo_handler.clone()))
            .layer(cors)
            .layer(RequestBodyLimitLayer::new(250 * 1024 * 1024)) // 250MB cap
            .layer(
                TraceLayer::new_for_http()
                    .on_request(
                        |request: &axum::http::Request<axum::body::Body>, _span: &tracing::Span| {
                            tracing::info!(
                                "Received request: {} {}",
                                request.method(),
                                request.uri()
                            );
                        },
                    )
                    .on_response(
                        |response: &axum::http::Response<axum::body::Body>,
                         latency: std::time::Duration,
                         _span: &tracing::Span| {
                            tracing::info!(
                                "Response: {} (took {} ms)",
                                response.status(),
                                latency.as_millis()
                            );
                        },
                    )
                    .on_failure(
                        |error: ServerErrorsFailureClass,
                         latency: std::time::Duration,
                         _span: &tracing::Span| {
                            tracing::error!(
                                "Request failed: {:?} (took {} ms)",
                                error,
                                latency.as_millis()
                            );
                        },
                    ),
            )
    }

    pub async fn run(self) -> Result<(), Box<dyn std::error::Error>> {
        let app = self.router();
        let addr = SocketAddr::from(([0, 0, 0, 0], self.port));

        tracing::info!("NatJus API ouvindo em {}", addr);
        let listener = TcpListener::bind(addr).await?;
        axum::serve(listener, app).await?;

        Ok(())
    }
}
