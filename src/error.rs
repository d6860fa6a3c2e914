use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by the library half of the crate. The binary wraps these
/// in `anyhow` at the orchestration layer.
#[derive(Debug, Error)]
pub enum Error {
    /// The frequency mapping was empty, so there is nothing to lay out.
    #[error("no words to display")]
    EmptyFrequencies,

    #[error("unable to load font from {}", path.display())]
    FontLoad {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// `ab_glyph` rejected the font bytes.
    #[error("invalid font file {}", path.display())]
    FontInvalid { path: PathBuf },

    #[error("no usable font found; pass one with --font <path>")]
    FontNotFound,

    #[error("failed to read {}", path.display())]
    ReadFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {}", path.display())]
    WriteFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to save image to {}", path.display())]
    SaveImage {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}
