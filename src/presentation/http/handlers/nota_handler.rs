use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::application::use_cases::{
    DashboardStatsUseCase, GetNotaError, GetNotaUseCase, ListNotasError, ListNotasRequest,
    ListNotasUseCase, SearchNotasRequest, SearchNotasUseCase, UpdateNotaError, UpdateNotaRequest,
    UpdateNotaUseCase,
};
use crate::domain::entities::{NotaSort, NotaUpdate, TipoFilter};
use crate::presentation::http::dto::{
    ApiResponse, DashboardResponseDto, ListNotasQueryDto, NotaListResponseDto, NotaResponseDto,
    SearchNotasQueryDto, SearchNotasResponseDto,
};

pub struct NotaHandler {
    list_notas_use_case: Arc<ListNotasUseCase>,
    search_notas_use_case: Arc<SearchNotasUseCase>,
    get_nota_use_case: Arc<GetNotaUseCase>,
    update_nota_use_case: Arc<UpdateNotaUseCase>,
    dashboard_stats_use_case: Arc<DashboardStatsUseCase>,
}

impl NotaHandler {
    pub fn new(
        list_notas_use_case: Arc<ListNotasUseCase>,
        search_notas_use_case: Arc<SearchNotasUseCase>,
        get_nota_use_case: Arc<GetNotaUseCase>,
        update_nota_use_case: Arc<UpdateNotaUseCase>,
        dashboard_stats_use_case: Arc<DashboardStatsUseCase>,
    ) -> Self {
        Self {
            list_notas_use_case,
            search_notas_use_case,
            get_nota_use_case,
            update_nota_use_case,
            dashboard_stats_use_case,
        }
    }

    pub async fn list_notas(
        State(handler): State<Arc<NotaHandler>>,
        Query(query): Query<ListNotasQueryDto>,
    ) -> Result<impl IntoResponse, StatusCode> {
        let parsed = TipoFilter::from_string(query.tipo.as_deref().unwrap_or_default()).and_then(
            |tipo| NotaSort::from_string(query.sort.as_deref().unwrap_or_default()).map(|s| (tipo, s)),
        );
        let (tipo, sort) = match parsed {
            Ok(parsed) => parsed,
            Err(message) => {
                return Ok((
                    StatusCode::BAD_REQUEST,
                    Json(ApiResponse::<NotaListResponseDto>::error(
                        "INVALID_QUERY",
                        message,
                        None,
                    )),
                ));
            }
        };

        let request = ListNotasRequest {
            term: query.q,
            tipo,
            sort,
            limit: query.limit,
        };

        match handler.list_notas_use_case.execute(request).await {
            Ok(response) => {
                let dto = NotaListResponseDto::new(&response.notas, response.total_count);
                Ok((StatusCode::OK, Json(ApiResponse::success(dto))))
            }
            Err(ListNotasError::ValidationError(message)) => Ok((
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::error("INVALID_QUERY", message, None)),
            )),
            Err(e) => Ok((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("LIST_FAILED", e.to_string(), None)),
            )),
        }
    }

    pub async fn search_notas(
        State(handler): State<Arc<NotaHandler>>,
        Query(query): Query<SearchNotasQueryDto>,
    ) -> Result<impl IntoResponse, StatusCode> {
        let request = SearchNotasRequest {
            tags: query.tag_list(),
            term: query.q,
        };

        match handler.search_notas_use_case.execute(request).await {
            Ok(response) => {
                let dto = SearchNotasResponseDto::new(&response.notas, response.available_tags);
                Ok((StatusCode::OK, Json(ApiResponse::success(dto))))
            }
            Err(e) => Ok((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<SearchNotasResponseDto>::error(
                    "SEARCH_FAILED",
                    e.to_string(),
                    None,
                )),
            )),
        }
    }

    pub async fn get_nota(
        State(handler): State<Arc<NotaHandler>>,
        Path(nota_id): Path<Uuid>,
    ) -> Result<impl IntoResponse, StatusCode> {
        match handler.get_nota_use_case.execute(nota_id).await {
            Ok(nota) => Ok((
                StatusCode::OK,
                Json(ApiResponse::success(NotaResponseDto::from(&nota))),
            )),
            Err(GetNotaError::NotFound(id)) => Ok((
                StatusCode::NOT_FOUND,
                Json(ApiResponse::error(
                    "NOTA_NOT_FOUND",
                    format!("Nota {} não encontrada", id),
                    None,
                )),
            )),
            Err(e) => Ok((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("GET_FAILED", e.to_string(), None)),
            )),
        }
    }

    pub async fn update_nota(
        State(handler): State<Arc<NotaHandler>>,
        Path(nota_id): Path<Uuid>,
        Json(changes): Json<NotaUpdate>,
    ) -> Result<impl IntoResponse, StatusCode> {
        let request = UpdateNotaRequest {
            id: nota_id,
            changes,
        };

        match handler.update_nota_use_case.execute(request).await {
            Ok(nota) => Ok((
                StatusCode::OK,
                Json(ApiResponse::success(NotaResponseDto::from(&nota))),
            )),
            Err(UpdateNotaError::NotFound(id)) => Ok((
                StatusCode::NOT_FOUND,
                Json(ApiResponse::error(
                    "NOTA_NOT_FOUND",
                    format!("Nota {} não encontrada", id),
                    None,
                )),
            )),
            Err(UpdateNotaError::ValidationError(message)) => Ok((
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::error("INVALID_NOTA", message, None)),
            )),
            Err(e) => Ok((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("UPDATE_FAILED", e.to_string(), None)),
            )),
        }
    }

    pub async fn dashboard(
        State(handler): State<Arc<NotaHandler>>,
    ) -> Result<impl IntoResponse, StatusCode> {
        match handler.dashboard_stats_use_case.execute().await {
            Ok(stats) => Ok((
                StatusCode::OK,
                Json(ApiResponse::success(DashboardResponseDto::from(stats))),
            )),
            Err(e) => Ok((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("DASHBOARD_FAILED", e.to_string(), None)),
            )),
        }
    }
}
