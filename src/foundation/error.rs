use std::path::PathBuf;

/// Convenience result type used across CrossPlot.
pub type CrossPlotResult<T> = Result<T, CrossPlotError>;

/// Top-level error taxonomy used by the renderer and its sinks.
#[derive(thiserror::Error, Debug)]
pub enum CrossPlotError {
    /// Invalid configuration or dataset shape. Raised before any frame is produced.
    #[error("validation error: {0}")]
    Validation(String),

    /// Failures inside the raster pipeline (buffer sizes, canvas limits).
    #[error("render error: {0}")]
    Render(String),

    /// Filesystem failures while reading inputs or writing frames.
    #[error("io error: {}: {source}", path.display())]
    Io {
        /// Path that was being read or written.
        path: PathBuf,
        /// Underlying OS error.
        #[source]
        source: std::io::Error,
    },

    /// Errors when parsing configuration or dataset files.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CrossPlotError {
    /// Build a [`CrossPlotError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`CrossPlotError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`CrossPlotError::Io`] value.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Build a [`CrossPlotError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
