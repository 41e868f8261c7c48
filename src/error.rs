//! Errors raised while setting up a calibration or reading its inputs.
//!
//! Nothing in the per-hit path returns these: hit-level lookups degrade to
//! neutral defaults instead.

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// Configuration tag matches none of the known detector layouts
    #[error("Unknown detector configuration `{0}`: expected a tag containing \
             version20, version21, version22 or version23, \
             or one of full, hcal-si, hcal-scint, calice")]
    UnknownVariant(String),

    #[error("Couldn't read `{path}`: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration file: {0}")]
    Config(#[from] toml::de::Error),

    /// Malformed line in a plain-text hit file
    #[error("Hit file line {line}: {reason}")]
    HitParse { line: usize, reason: String },
}
