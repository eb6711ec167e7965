use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Cell text could not be decoded from (or encoded to) its JSON form.
    #[error("invalid rich text json: {0}")]
    Json(#[from] serde_json::Error),

    /// A run color that is neither RRGGBB nor AARRGGBB hex.
    #[error("invalid run color: {0:?}")]
    InvalidColor(String),
}
