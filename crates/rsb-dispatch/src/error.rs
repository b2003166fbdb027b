use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DispatchError {
    #[error("unknown dispatch strategy {0:?} (expected one of: nearest, most-passengers, best-ratio, weighted-random)")]
    UnknownStrategy(String),
}

pub type DispatchResult<T> = Result<T, DispatchError>;
