//! Everything that can stop a render.

use failure::Fail;
use std::io;

/// A render either succeeds completely or fails with one of these.
/// There are no retries; each is fatal to the run that raised it.
#[derive(Debug, Fail)]
pub enum RenderError {
    /// The rectangle is not ordered top-left to bottom-right.
    #[fail(display = "Invalid region: {}", _0)]
    InvalidRegion(String),

    /// A configuration value is out of range.
    #[fail(display = "Invalid configuration: {}", _0)]
    InvalidConfig(String),

    /// A worker thread panicked before handing its raster back.  The
    /// payload names the band, counting from zero at the top.
    #[fail(display = "Render worker panicked: {}", _0)]
    Panicked(String),

    /// The output file could not be created or written.
    #[fail(display = "Could not write {}: {}", path, cause)]
    Io {
        /// The file we were writing.
        path: String,
        /// What the operating system said.
        #[cause]
        cause: io::Error,
    },
}

impl RenderError {
    pub(crate) fn io<P: AsRef<std::path::Path>>(path: P, cause: io::Error) -> Self {
        RenderError::Io {
            path: path.as_ref().display().to_string(),
            cause,
        }
    }
}
