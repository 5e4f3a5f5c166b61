use std::process::ExitStatus;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to launch `{command}`: {source}")]
    Launch {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{command}` exited with {status}: {stderr}")]
    CommandFailed {
        command: String,
        status: ExitStatus,
        stderr: String,
    },

    #[error("Invalid monitor name: {name:?}")]
    InvalidMonitorName { name: String },

    #[error("Monitor not found: {name}")]
    UnknownMonitor { name: String },

    #[error("Split percentage must be between 0 and 100, got {percent}")]
    InvalidRatio { percent: u32 },
}

pub type Result<T> = std::result::Result<T, Error>;
