use std::sync::LazyLock;

use regex::Regex;

use crate::domain::entities::NotaTecnica;

const NOT_AVAILABLE: &str = "N/A";

static FILE_REQUEST: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(pdf|arquivos?|documentos?|links?)\b").expect("valid file request regex")
});

fn or_na(value: Option<&str>) -> &str {
    value.filter(|v| !v.trim().is_empty()).unwrap_or(NOT_AVAILABLE)
}

fn context_block(nota: &NotaTecnica) -> String {
    let data = nota
        .data_emissao()
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string());
    let tags = if nota.tags().is_empty() {
        NOT_AVAILABLE.to_string()
    } else {
        nota.tags().join(", ")
    };

    [
        format!("Nota Número: {}", nota.numero()),
        format!("Título: {}", nota.titulo()),
        format!("Tipo: {}", nota.tipo()),
        format!("Data: {}", data),
        format!("Demanda: {}", or_na(nota.demanda())),
        format!("Procedimento: {}", or_na(nota.procedimento())),
        format!("Representante: {}", or_na(nota.representante_comarca())),
        format!("Resumo: {}", or_na(Some(nota.resumo()))),
        format!("Tags: {}", tags),
        format!("URL_DO_PDF: {}", nota.arquivo_url()),
        format!("Nome_do_Arquivo: {}", nota.nome_arquivo()),
    ]
    .join("\n")
}

/// Renders notes into the grounding context of the chat prompt.
pub fn build_context(notas: &[NotaTecnica]) -> String {
    notas
        .iter()
        .map(context_block)
        .collect::<Vec<_>>()
        .join("\n---\n")
}

pub fn download_line(url: &str) -> String {
    format!("🔗 [Baixar PDF]({})", url)
}

fn is_number_char(c: char) -> bool {
    c.is_ascii_digit() || c == '/' || c == '.'
}

/// True when `numero` appears in `text` as a whole token, so `2/2024` does not
/// match inside `12/2024`. A trailing `.` only breaks the token when a digit
/// follows it.
fn mentions_numero(text: &str, numero: &str) -> bool {
    text.match_indices(numero).any(|(start, _)| {
        let before = text[..start].chars().next_back();
        let mut after = text[start + numero.len()..].chars();
        let next = after.next();

        let clean_before = !before.is_some_and(is_number_char);
        let clean_after = match next {
            Some('.') => !after.next().is_some_and(|c| c.is_ascii_digit()),
            Some(c) => !is_number_char(c),
            None => true,
        };
        clean_before && clean_after
    })
}

/// Appends the download line for the note the reply names, when the user
/// asked for a file and the model left every link out. The longest matching
/// number wins.
pub fn attach_pdf_link(user_message: &str, reply: String, notas: &[NotaTecnica]) -> String {
    if !FILE_REQUEST.is_match(user_message) {
        return reply;
    }

    if notas
        .iter()
        .any(|n| !n.arquivo_url().is_empty() && reply.contains(n.arquivo_url()))
    {
        return reply;
    }

    let Some(nota) = notas
        .iter()
        .filter(|n| !n.numero().is_empty() && mentions_numero(&reply, n.numero()))
        .max_by_key(|n| n.numero().len())
    else {
        return reply;
    };

    format!("{}\n\n{}", reply.trim_end(), download_line(nota.arquivo_url()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::sample_nota;

    #[test]
    fn test_context_block_order_and_placeholders() {
        let nota = sample_nota("1234/2024", vec!["saude".to_string(), "sus".to_string()]);
        let context = build_context(std::slice::from_ref(&nota));

        let labels: Vec<&str> = context
            .lines()
            .map(|l| l.split(':').next().unwrap_or_default())
            .collect();
        assert_eq!(
            labels,
            vec![
                "Nota Número",
                "Título",
                "Tipo",
                "Data",
                "Demanda",
                "Procedimento",
                "Representante",
                "Resumo",
                "Tags",
                "URL_DO_PDF",
                "Nome_do_Arquivo",
            ]
        );
        assert!(context.contains("Tags: saude, sus"));
        assert!(context.contains("Representante: N/A"));
        assert!(context.contains(&format!("URL_DO_PDF: {}", nota.arquivo_url())));
    }

    #[test]
    fn test_blocks_joined_by_separator() {
        let notas = vec![sample_nota("1/2024", vec![]), sample_nota("2/2024", vec![])];
        let context = build_context(&notas);

        assert_eq!(context.matches("\n---\n").count(), 1);
        assert!(context.contains("Tags: N/A"));
    }

    #[test]
    fn test_link_appended_when_missing() {
        let nota = sample_nota("1234/2024", vec![]);
        let reply = attach_pdf_link(
            "Me envie o PDF da nota 1234/2024",
            "A nota 1234/2024 trata de insulina.".to_string(),
            std::slice::from_ref(&nota),
        );

        assert!(reply.ends_with(&download_line(nota.arquivo_url())));
        assert_eq!(reply.matches("Baixar PDF").count(), 1);
    }

    #[test]
    fn test_link_not_duplicated() {
        let nota = sample_nota("1234/2024", vec![]);
        let original = format!(
            "A nota 1234/2024.\n\n{}",
            download_line(nota.arquivo_url())
        );
        let reply = attach_pdf_link("link da nota", original.clone(), std::slice::from_ref(&nota));
        assert_eq!(reply, original);
    }

    #[test]
    fn test_no_link_without_file_request() {
        let nota = sample_nota("1234/2024", vec![]);
        let reply = attach_pdf_link(
            "Qual o resumo da nota 1234/2024?",
            "A nota 1234/2024 trata de insulina.".to_string(),
            std::slice::from_ref(&nota),
        );
        assert!(!reply.contains("Baixar PDF"));
    }

    #[test]
    fn test_link_picks_exact_numero() {
        let curta = sample_nota("2/2024", vec![]);
        let longa = sample_nota("12/2024", vec![]);
        let notas = vec![curta.clone(), longa.clone()];

        let reply = attach_pdf_link(
            "quero o pdf da nota 12/2024",
            "A nota 12/2024 trata de insulina.".to_string(),
            &notas,
        );

        assert!(reply.ends_with(&download_line(longa.arquivo_url())));
        assert!(!reply.contains(curta.arquivo_url()));
        assert_eq!(reply.matches("Baixar PDF").count(), 1);
    }

    #[test]
    fn test_existing_link_of_any_nota_kept() {
        let curta = sample_nota("2/2024", vec![]);
        let longa = sample_nota("12/2024", vec![]);
        let original = format!(
            "A nota 12/2024 está aqui: {}",
            longa.arquivo_url()
        );

        let reply = attach_pdf_link("me manda o pdf", original.clone(), &[curta, longa]);

        assert_eq!(reply, original);
    }

    #[test]
    fn test_numero_token_boundaries() {
        assert!(mentions_numero("A nota 2/2024.", "2/2024"));
        assert!(mentions_numero("(2/2024)", "2/2024"));
        assert!(!mentions_numero("A nota 12/2024", "2/2024"));
        assert!(!mentions_numero("A nota 2/20241", "2/2024"));
        assert!(!mentions_numero("versão 2/2024.5", "2/2024"));
    }
}
