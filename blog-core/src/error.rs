use thiserror::Error;

#[derive(Debug, Error)]
pub enum BlogError {
    // Ответ сервера с неуспешным статусом
    #[error("Network response was not ok: {status} {status_text}")]
    Network { status: u16, status_text: String },

    // Запрос не удалось выполнить или прочитать тело
    #[error("Transport error: {0}")]
    Transport(String),

    // Тело ответа не является массивом постов
    #[error("Failed to parse posts: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Post {id} has an unparseable date: {date:?}")]
    InvalidDate { id: String, date: String },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl BlogError {
    pub fn is_network(&self) -> bool {
        matches!(self, BlogError::Network { .. } | BlogError::Transport(_))
    }

    pub fn is_parse(&self) -> bool {
        matches!(self, BlogError::Parse(_))
    }
}
