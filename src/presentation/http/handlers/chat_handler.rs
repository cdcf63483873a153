use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use std::sync::Arc;

use crate::application::use_cases::{ChatError, ChatRequest, ChatResponse, ChatWithNotasUseCase};
use crate::presentation::http::dto::{ApiResponse, ChatRequestDto, GreetingResponseDto};

pub struct ChatHandler {
    chat_use_case: Arc<ChatWithNotasUseCase>,
}

impl ChatHandler {
    pub fn new(chat_use_case: Arc<ChatWithNotasUseCase>) -> Self {
        Self { chat_use_case }
    }

    pub async fn greeting(
        State(handler): State<Arc<ChatHandler>>,
    ) -> Result<impl IntoResponse, StatusCode> {
        match handler.chat_use_case.greeting().await {
            Ok(greeting) => Ok((
                StatusCode::OK,
                Json(ApiResponse::success(GreetingResponseDto { greeting })),
            )),
            Err(e) => Ok((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("GREETING_FAILED", e.to_string(), None)),
            )),
        }
    }

    pub async fn chat(
        State(handler): State<Arc<ChatHandler>>,
        Json(body): Json<ChatRequestDto>,
    ) -> Result<impl IntoResponse, StatusCode> {
        let request = ChatRequest {
            message: body.message,
        };

        match handler.chat_use_case.execute(request).await {
            Ok(response) => Ok((StatusCode::OK, Json(ApiResponse::success(response)))),
            Err(ChatError::ValidationError(message)) => Ok((
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::<ChatResponse>::error("INVALID_MESSAGE", message, None)),
            )),
            Err(e) => Ok((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("CHAT_FAILED", e.to_string(), None)),
            )),
        }
    }
}
