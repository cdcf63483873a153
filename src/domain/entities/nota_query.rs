use std::cmp::Ordering;
use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::domain::entities::NotaTecnica;
use crate::domain::value_objects::NotaTipo;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotaSort {
    /// Newest emission date first; undated notes go last.
    #[default]
    DataEmissao,
    Numero,
    Titulo,
}

impl NotaSort {
    pub fn from_string(s: &str) -> Result<Self, String> {
        match s.trim() {
            "" | "data_emissao" | "-data_emissao" => Ok(NotaSort::DataEmissao),
            "numero" => Ok(NotaSort::Numero),
            "titulo" => Ok(NotaSort::Titulo),
            other => Err(format!("Ordenação inválida: {}", other)),
        }
    }

    pub fn compare(&self, a: &NotaTecnica, b: &NotaTecnica) -> Ordering {
        match self {
            NotaSort::DataEmissao => match (a.data_emissao(), b.data_emissao()) {
                (Some(x), Some(y)) => y.cmp(&x),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => b.created_at().cmp(&a.created_at()),
            },
            NotaSort::Numero => a.numero().cmp(b.numero()),
            NotaSort::Titulo => a.titulo().to_lowercase().cmp(&b.titulo().to_lowercase()),
        }
    }

    pub fn sort(&self, notas: &mut [NotaTecnica]) {
        notas.sort_by(|a, b| self.compare(a, b));
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TipoFilter {
    #[default]
    Todos,
    Only(NotaTipo),
}

impl TipoFilter {
    pub fn from_string(s: &str) -> Result<Self, String> {
        match s.trim() {
            "" | "todos" => Ok(TipoFilter::Todos),
            other => NotaTipo::from_string(other).map(TipoFilter::Only),
        }
    }

    fn accepts(&self, tipo: NotaTipo) -> bool {
        match self {
            TipoFilter::Todos => true,
            TipoFilter::Only(wanted) => *wanted == tipo,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchScope {
    /// titulo, numero, procedimento
    #[default]
    Catalog,
    /// Catalog fields plus conteudo_extraido and resumo.
    FullText,
}

/// In-memory filter over notes already loaded from the store.
#[derive(Debug, Clone, Default)]
pub struct NotaQuery {
    pub term: Option<String>,
    pub scope: SearchScope,
    pub tipo: TipoFilter,
    /// A note matches if it carries any of these.
    pub tags: Vec<String>,
}

impl NotaQuery {
    pub fn matches(&self, nota: &NotaTecnica) -> bool {
        let term_match = match self.term.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(term) => match self.scope {
                SearchScope::Catalog => nota.matches_catalog_text(term),
                SearchScope::FullText => nota.matches_full_text(term),
            },
        };

        let tags_match =
            self.tags.is_empty() || self.tags.iter().any(|t| nota.tags().contains(t));

        term_match && tags_match && self.tipo.accepts(nota.tipo())
    }

    pub fn apply(&self, notas: Vec<NotaTecnica>) -> Vec<NotaTecnica> {
        notas.into_iter().filter(|n| self.matches(n)).collect()
    }
}

/// Sorted distinct tags across the given notes.
pub fn distinct_tags(notas: &[NotaTecnica]) -> Vec<String> {
    notas
        .iter()
        .flat_map(|n| n.tags().iter().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
