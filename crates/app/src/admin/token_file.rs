use std::io::ErrorKind;
use std::path::PathBuf;

use thiserror::Error;
use tracing::debug;

use commendai_infra::api::AdminToken;

#[derive(Debug, Error)]
pub enum TokenFileError {
    #[error("token file io error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Clone)]
pub struct TokenFile {
    path: PathBuf,
}

impl TokenFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn load(&self) -> Result<Option<AdminToken>, TokenFileError> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => {
                let trimmed = contents.trim();
                if trimmed.is_empty() {
                    Ok(None)
                } else {
                    Ok(Some(AdminToken::new(trimmed)))
                }
            }
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(self.io_error(err)),
        }
    }

    pub fn store(&self, token: &AdminToken) -> Result<(), TokenFileError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|err| self.io_error(err))?;
        }
        std::fs::write(&self.path, token.as_str()).map_err(|err| self.io_error(err))?;
        debug!(path = %self.path.display(), "admin token stored");
        Ok(())
    }

    pub fn remove(&self) -> Result<(), TokenFileError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {
                debug!(path = %self.path.display(), "admin token removed");
                Ok(())
            }
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(self.io_error(err)),
        }
    }

    pub fn sync(&self, token: Option<&AdminToken>) -> Result<(), TokenFileError> {
        match token {
            Some(token) => self.store(token),
            None => self.remove(),
        }
    }

    fn io_error(&self, source: std::io::Error) -> TokenFileError {
        TokenFileError::Io {
            path: self.path.clone(),
            source,
        }
    }
}
