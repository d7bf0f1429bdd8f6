use thiserror::Error;

pub type Result<T> = core::result::Result<T, SiteError>;

#[derive(Error, Debug)]
pub enum SiteError {
    #[error("no word-display fragment found in {0}")]
    FragmentNotFound(String),
    #[error("invalid fragment pattern")]
    PatternError(#[from] regex::Error),
    #[error("io error")]
    IoError(#[from] std::io::Error),
    #[error("error encoding response body")]
    BodyEncodeError(#[from] serde_json::Error),
}
