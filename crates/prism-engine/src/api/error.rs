/// Errors surfaced by the site entry points and config loading.
///
/// Guarded navigation is not an error: a rejected transition returns
/// `Ok(false)` / `false` from the entry point.
#[derive(Debug, thiserror::Error)]
pub enum SiteError {
    #[error("unknown case id {0:?} (expected case1..case4)")]
    UnknownCase(String),
    #[error("unknown page id {0:?}")]
    UnknownPage(String),
    #[error("unknown face id {0:?} (expected front, back, left or right)")]
    UnknownFace(String),
    #[error("invalid site config: {0}")]
    Config(#[from] serde_json::Error),
}

pub type SiteResult<T> = Result<T, SiteError>;
