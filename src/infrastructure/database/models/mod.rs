pub mod configuracao_model;
pub mod nota_model;

pub use configuracao_model::*;
pub use nota_model::*;
