pub mod configuracao;
pub mod nota_query;
pub mod nota_tecnica;

pub use configuracao::{Configuracao, ConfiguracaoSettings};
pub use nota_query::{NotaQuery, NotaSort, SearchScope, TipoFilter, distinct_tags};
pub use nota_tecnica::{NotaDraft, NotaTecnica, NotaUpdate, parse_data_emissao};
