use thiserror::Error;

pub type QcResult<T> = Result<T, QcError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum QcError {
    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },
}
