use thiserror::Error;

#[derive(Debug, Error)]
pub enum RecommendError {
    #[error("Ollama ist nicht konfiguriert (OLLAMA_HOST/OLLAMA_MODEL)")]
    LlmUnconfigured,
    #[error("Ollama nicht erreichbar: {0}")]
    LlmUnavailable(#[from] reqwest::Error),
    #[error("Antwort des Modells unbrauchbar: {0}")]
    MalformedReply(String),
}

#[derive(Debug, Error)]
pub enum CalendarError {
    #[error("Kalenderdatei konnte nicht gelesen werden: {0}")]
    Parse(#[from] ical::parser::ParserError),
}
