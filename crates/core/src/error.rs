use thiserror::Error;

/// Top-level error type used across the entire application.
///
/// The telemetry and rotation engines never return it: their abnormal
/// conditions degrade to "no change this tick". Only the ambient plumbing
/// (config, profiler helper, host loop) is fallible.
#[derive(Debug, Error)]
pub enum KioskError {
    #[error("config error: {0}")]
    Config(String),

    #[error("system error: {0}")]
    System(String),

    #[error("profiler error: {0}")]
    Profiler(String),

    #[error("render error: {0}")]
    Render(String),

    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

pub type Result<T, E = KioskError> = std::result::Result<T, E>;
