use serde_json::{Value, json};

const ANALYSIS_FIELDS: &str = "Extraia e estruture:
1. Número da nota técnica (formato: XXXX/AAAA)
2. Tipo: \"processual\" ou \"pre-processual\"
3. Título/assunto principal
4. Data de emissão (formato YYYY-MM-DD)
5. Demanda/origem
6. Procedimento tratado
7. Representante/comarca
8. Resumo em 2-3 frases
9. Tags relevantes (máximo 5)";

const CHAT_INSTRUCTIONS: &str = "Você é um assistente especialista em notas técnicas do NatJus. Responda à pergunta do usuário com base no contexto das notas técnicas fornecidas abaixo.

INSTRUÇÕES IMPORTANTES:
1. Seja conciso e direto
2. Se a informação não estiver no contexto, diga que não encontrou a informação nas notas disponíveis
3. Quando o usuário pedir o PDF, arquivo, documento ou link de uma nota específica, SEMPRE forneça a URL_DO_PDF correspondente
4. Quando mencionar uma nota técnica específica, inclua seu número e título
5. Se houver URL_DO_PDF disponível para a nota mencionada, sempre inclua no final da resposta: \"🔗 [Baixar PDF](URL_DO_PDF)\"";

fn analysis_header(extracted: &Value) -> String {
    format!(
        "Analise esta nota técnica do NatJus e extraia as seguintes informações:\n\nTexto do PDF: {}\n\n{}",
        extracted, ANALYSIS_FIELDS
    )
}

/// Prompt for the Gemini structuring call.
pub fn analysis_prompt(extracted: &Value) -> String {
    format!(
        "{}\n\nRetorne APENAS um JSON válido com estas informações.",
        analysis_header(extracted)
    )
}

/// Prompt for the default LLM, used directly or after a Gemini failure.
pub fn fallback_analysis_prompt(extracted: &Value) -> String {
    format!("{}\n\nRetorne um JSON estruturado.", analysis_header(extracted))
}

pub fn chat_prompt(message: &str, context: &str) -> String {
    format!(
        "{}\n\nContexto das Notas Técnicas:\n---\n{}\n---\n\nPergunta do usuário: \"{}\"",
        CHAT_INSTRUCTIONS, context, message
    )
}

/// Prefix the default LLM receives when it stands in for another provider.
pub fn tagged_prompt(model: &str, prompt: &str) -> String {
    format!("[Usando {}] {}", model, prompt)
}

/// Strict schema for the Gemini call.
pub fn analysis_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "numero": { "type": "string", "description": "Número da nota técnica" },
            "tipo": { "type": "string", "enum": ["processual", "pre-processual"] },
            "titulo": { "type": "string", "description": "Título principal da nota" },
            "data_emissao": { "type": "string", "description": "Data no formato YYYY-MM-DD" },
            "demanda": { "type": "string", "description": "Origem da demanda" },
            "procedimento": { "type": "string", "description": "Procedimento tratado" },
            "representante_comarca": { "type": "string", "description": "Representante ou comarca" },
            "resumo": { "type": "string", "description": "Resumo em 2-3 frases" },
            "tags": {
                "type": "array",
                "items": { "type": "string" },
                "maxItems": 5,
                "description": "Tags relevantes"
            }
        },
        "required": ["numero", "tipo", "titulo", "resumo"]
    })
}

/// Looser schema sent with the fallback prompt.
pub fn fallback_analysis_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "numero": { "type": "string" },
            "tipo": { "type": "string" },
            "titulo": { "type": "string" },
            "data_emissao": { "type": "string" },
            "demanda": { "type": "string" },
            "procedimento": { "type": "string" },
            "representante_comarca": { "type": "string" },
            "resumo": { "type": "string" },
            "tags": { "type": "array", "items": { "type": "string" } }
        }
    })
}

/// Schema of a stored note, handed to the extractor.
pub fn nota_record_schema() -> Value {
    json!({
        "name": "NotaTecnica",
        "type": "object",
        "properties": {
            "numero": { "type": "string", "description": "Número da nota técnica" },
            "tipo": { "type": "string", "enum": ["processual", "pre-processual"] },
            "titulo": { "type": "string" },
            "data_emissao": { "type": "string", "format": "date" },
            "demanda": { "type": "string" },
            "procedimento": { "type": "string" },
            "representante_comarca": { "type": "string" },
            "resumo": { "type": "string" },
            "tags": { "type": "array", "items": { "type": "string" } },
            "conteudo_extraido": { "type": "string" },
            "arquivo_url": { "type": "string" },
            "nome_arquivo": { "type": "string" },
            "storage_provider": { "type": "string", "enum": ["base44", "google_drive", "aws_s3"], "default": "base44" },
            "drive_file_id": { "type": "string" }
        },
        "required": ["numero", "tipo", "titulo", "arquivo_url", "nome_arquivo"]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompts_embed_extraction_as_json() {
        let extracted = json!({ "texto": "Nota \"1\"" });

        let strict = analysis_prompt(&extracted);
        assert!(strict.contains(r#"Texto do PDF: {"texto":"Nota \"1\""}"#));
        assert!(strict.ends_with("Retorne APENAS um JSON válido com estas informações."));

        let fallback = fallback_analysis_prompt(&extracted);
        assert!(fallback.contains("9. Tags relevantes (máximo 5)"));
        assert!(fallback.ends_with("Retorne um JSON estruturado."));
    }

    #[test]
    fn test_schemas() {
        let strict = analysis_schema();
        assert_eq!(strict["required"], json!(["numero", "tipo", "titulo", "resumo"]));
        assert_eq!(strict["properties"]["tags"]["maxItems"], 5);

        let loose = fallback_analysis_schema();
        assert!(loose.get("required").is_none());
        assert!(loose["properties"]["tipo"].get("enum").is_none());
    }

    #[test]
    fn test_chat_and_tagged_prompts() {
        let prompt = chat_prompt("Qual a nota?", "Nota Número: 1");
        assert!(prompt.contains("---\nNota Número: 1\n---"));
        assert!(prompt.ends_with("Pergunta do usuário: \"Qual a nota?\""));

        assert_eq!(tagged_prompt("gpt-4", "oi"), "[Usando gpt-4] oi");
    }
}
