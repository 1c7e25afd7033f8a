#[derive(Debug, thiserror::Error)]
pub enum ContentsError {
    #[error("github request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("github responded {status} for {path}: {body}")]
    Status {
        status: reqwest::StatusCode,
        path: String,
        body: String,
    },
}

pub type Result<T> = std::result::Result<T, ContentsError>;
