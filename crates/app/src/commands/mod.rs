pub mod admin;
pub mod ads;
pub mod comment;
pub mod history;

use thiserror::Error;

use commendai_core::error::CoreError;

use crate::admin::token_file::TokenFileError;
use crate::error::ClientError;

#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Client(#[from] ClientError),
    #[error(transparent)]
    Input(#[from] CoreError),
    #[error("token file: {0}")]
    TokenFile(#[from] TokenFileError),
    #[error("missing argument: {0}")]
    MissingArgument(&'static str),
}
