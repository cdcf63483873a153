pub mod arquivo_routes;
pub mod chat_routes;
pub mod configuracao_routes;
pub mod drive_routes;
pub mod health_routes;
pub mod nota_routes;
pub mod upload_routes;

pub use arquivo_routes::*;
pub use chat_routes::*;
pub use configuracao_routes::*;
pub use drive_routes::*;
pub use health_routes::*;
pub use nota_routes::*;
pub use upload_routes::*;
