//! Fatal CLI errors surfaced at the process boundary.

use remindcal_core::PersistError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug)]
pub enum CliError {
    /// Loading or saving the data file failed.
    Persist(PersistError),
    /// Terminal input/output failed.
    Io(std::io::Error),
}

impl Display for CliError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Persist(err) => write!(f, "{err}"),
            Self::Io(err) => write!(f, "terminal i/o failed: {err}"),
        }
    }
}

impl Error for CliError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Persist(err) => Some(err),
            Self::Io(err) => Some(err),
        }
    }
}

impl From<PersistError> for CliError {
    fn from(value: PersistError) -> Self {
        Self::Persist(value)
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}
