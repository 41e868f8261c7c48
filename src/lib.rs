//! Energy calibration and shower reconstruction for a sampling calorimeter
//! made of an electromagnetic section followed by front and back hadronic
//! sections.

pub mod error;
pub mod variant;
pub mod layout;
pub mod weights;
pub mod cross;
pub mod tof;
pub mod energy;
pub mod accumulator;
pub mod calibration;
pub mod types;
pub mod events;
pub mod config;
pub mod io;
pub mod utils;

pub use error::{Error, Result};
pub use variant::Variant;
pub use layout::{Layer, Section, SectionLayout};
pub use accumulator::SectionSums;
pub use calibration::{Calibration, CalibrationConfig};
pub use events::{EventEnergies, Reconstruction};
pub use types::{CalibratedHit, EventId, Hit};

pub use geometry::Point;
