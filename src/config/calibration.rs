//! Configuration file parser for calibration runs
//!
//! ```toml
//! variant   = "version20"            # or full, hcal-si, hcal-scint, calice
//! concept   = true
//! calibrate = false
//! vertex    = ["0 mm", "0 mm", "-985.875 mm"]
//!
//! [reconstruction]
//! threshold = 0.5
//! global    = 1.0
//! linearity = false
//! hcal_only = false
//! ```

use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, de};

use geometry::Point;
use units::Length;

use crate::calibration::CalibrationConfig;
use crate::error::Error;
use crate::events::Reconstruction;
use crate::variant::Variant;

fn deserialize_from_str<'d, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'d>,
    T: FromStr,
    <T as FromStr>::Err: std::fmt::Display,
{
    <&str>::deserialize(deserializer)?
        .parse::<T>()
        .map_err(de::Error::custom)
}

fn deserialize_uom_3d_opt<'d, D, T>(deserializer: D) -> Result<Option<(T, T, T)>, D::Error>
where
    D: Deserializer<'d>,
    T: FromStr,
    <T as FromStr>::Err: std::fmt::Display,
{
    Option::<(&str, &str, &str)>::deserialize(deserializer)?
        .map(|(x,y,z)| tr_tup_res((x.parse(), y.parse(), z.parse())))
        .transpose()
        .map_err(de::Error::custom)
}

/// Transpose 3-tuple of `Result`
///
/// `Ok` if all elements `Ok`; if any element is an `Err` return the first one.
fn tr_tup_res<O, E>((x,y,z): (Result<O, E>, Result<O, E>, Result<O, E>)) -> Result<(O, O, O), E> {
    Ok((x?, y?, z?))
}

#[derive(Deserialize, Debug)]
#[serde(deny_unknown_fields)]
pub struct Config {

    /// Detector layout, as a variant name or a simulation tag
    #[serde(deserialize_with = "deserialize_from_str")]
    pub variant: Variant,

    /// Sampling HCAL design
    #[serde(default = "default_concept")]
    pub concept: bool,

    /// Use the measured MIP -> GeV scale
    #[serde(default)]
    pub calibrate: bool,

    /// Override the variant's default vertex
    #[serde(default)]
    #[serde(deserialize_with = "deserialize_uom_3d_opt")]
    pub vertex: Option<(Length, Length, Length)>,

    #[serde(default)]
    pub reconstruction: Reconstruction,
}

fn default_concept() -> bool { true }

impl Config {
    pub fn calibration(&self) -> CalibrationConfig {
        CalibrationConfig {
            variant  : self.variant,
            concept  : self.concept,
            calibrate: self.calibrate,
            vertex   : self.vertex.map(|(x, y, z)| Point::new(x, y, z)),
        }
    }
}

pub fn parse_config(text: &str) -> crate::Result<Config> {
    Ok(toml::from_str(text)?)
}

pub fn read_config_file(path: &Path) -> crate::Result<Config> {
    let text = fs::read_to_string(path)
        .map_err(|source| Error::Read { path: path.into(), source })?;
    parse_config(&text)
}
