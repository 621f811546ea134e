use thiserror::Error;

#[derive(Debug, Error)]
pub enum LifeError {
    #[error("unknown pattern `{0}`")]
    UnknownPattern(String),

    #[error("invalid seed cell `{0}`, expected `row,col`")]
    InvalidSeedCell(String),

    #[error("row task for row {row} failed")]
    RowTask {
        row: i64,
        #[source]
        source: tokio::task::JoinError,
    },
}
