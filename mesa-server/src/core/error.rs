use thiserror::Error;

/// Errors raised while bringing the server up or tearing it down
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("startup failed: {0}")]
    Startup(#[from] crate::utils::AppError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, ServerError>;
