use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FuncLogError {
    #[error("Ошибка конфигурации: {0}")]
    Config(#[from] anyhow::Error),

    #[error("\"{0}\" is not a valid log level. try one of the following: info, log, debug, error, panic")]
    InvalidSeverity(String),

    #[error("Не удалось записать в журнал {path:?}: {source}")]
    SinkWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl FuncLogError {
    pub fn sink_write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        FuncLogError::SinkWrite {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, FuncLogError>;
