use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use std::sync::Arc;

use crate::application::use_cases::{
    GetConfiguracaoUseCase, SaveConfiguracaoUseCase, TestConnectionsUseCase,
};
use crate::domain::entities::ConfiguracaoSettings;
use crate::presentation::http::dto::{
    ApiResponse, ConfiguracaoResponseDto, SaveConfiguracaoDto, SavedConfiguracaoDto,
};

pub struct ConfiguracaoHandler {
    get_configuracao_use_case: Arc<GetConfiguracaoUseCase>,
    save_configuracao_use_case: Arc<SaveConfiguracaoUseCase>,
    test_connections_use_case: Arc<TestConnectionsUseCase>,
}

impl ConfiguracaoHandler {
    pub fn new(
        get_configuracao_use_case: Arc<GetConfiguracaoUseCase>,
        save_configuracao_use_case: Arc<SaveConfiguracaoUseCase>,
        test_connections_use_case: Arc<TestConnectionsUseCase>,
    ) -> Self {
        Self {
            get_configuracao_use_case,
            save_configuracao_use_case,
            test_connections_use_case,
        }
    }

    pub async fn get_configuracao(
        State(handler): State<Arc<ConfiguracaoHandler>>,
    ) -> Result<impl IntoResponse, StatusCode> {
        match handler.get_configuracao_use_case.execute().await {
            Ok(view) => Ok((
                StatusCode::OK,
                Json(ApiResponse::success(ConfiguracaoResponseDto::from(view))),
            )),
            Err(e) => Ok((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("CONFIG_LOAD_FAILED", e.to_string(), None)),
            )),
        }
    }

    pub async fn save_configuracao(
        State(handler): State<Arc<ConfiguracaoHandler>>,
        Json(body): Json<SaveConfiguracaoDto>,
    ) -> Result<impl IntoResponse, StatusCode> {
        let settings = ConfiguracaoSettings::from(body);

        match handler.save_configuracao_use_case.execute(settings).await {
            Ok(config) => Ok((
                StatusCode::OK,
                Json(ApiResponse::success(SavedConfiguracaoDto::from(config))),
            )),
            Err(e) => Ok((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("CONFIG_SAVE_FAILED", e.to_string(), None)),
            )),
        }
    }

    pub async fn test_connections(
        State(handler): State<Arc<ConfiguracaoHandler>>,
    ) -> Result<impl IntoResponse, StatusCode> {
        match handler.test_connections_use_case.execute().await {
            Ok(report) => Ok((StatusCode::OK, Json(ApiResponse::success(report)))),
            Err(e) => Ok((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("CONFIG_TEST_FAILED", e.to_string(), None)),
            )),
        }
    }
}
