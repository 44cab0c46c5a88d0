use std::{error::Error, fmt::Display, sync::mpsc};

#[derive(Debug)]
pub enum BoardGuiError {
    IOError(std::io::Error),
    MPSCSendError,
    JoinError,
}

impl Display for BoardGuiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:#?}", self)
    }
}

impl Error for BoardGuiError {}

impl From<std::io::Error> for BoardGuiError {
    fn from(value: std::io::Error) -> Self {
        Self::IOError(value)
    }
}

impl<T> From<mpsc::SendError<T>> for BoardGuiError {
    fn from(_: mpsc::SendError<T>) -> Self {
        Self::MPSCSendError
    }
}
