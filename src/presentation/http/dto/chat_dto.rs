use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct ChatRequestDto {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct GreetingResponseDto {
    pub greeting: String,
}
