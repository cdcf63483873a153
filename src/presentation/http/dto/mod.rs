pub mod chat_dto;
pub mod config_dto;
pub mod drive_dto;
pub mod nota_dto;
pub mod response_dto;

pub use chat_dto::*;
pub use config_dto::*;
pub use drive_dto::*;
pub use nota_dto::*;
pub use response_dto::*;
