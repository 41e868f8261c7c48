//! Constants relating the responses of the different sections, and the
//! reference point for timing.

use geometry::Point;
use units::{mm, in_base_unit, Time};
use units::todo::{GeVf64, Lengthf64, Ratiof64};

use crate::variant::Variant;

/// Hadronic deposits arriving this late (after time-of-flight correction) are
/// rejected. The base unit of `Time` is the nanosecond.
pub const HCAL_TIME_THRESHOLD: Time = in_base_unit!(200.0);

// z of the particle gun, upstream of the first layer
const VERTEX_Z_FULL       : Lengthf64 =  -985.875;
const VERTEX_Z_HCAL_SI    : Lengthf64 =  -824.01;
const VERTEX_Z_HCAL_SCINT : Lengthf64 =  -430.65;
const VERTEX_Z_CALICE     : Lengthf64 = -1091.75;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CrossCalibration {
    /// e/pi: scales hadronic response to the EM scale
    pub hcal_to_ecal_factor: Ratiof64,
    pub hcal_to_ecal_offset: GeVf64,
    /// Scales back hadronic response to the front hadronic scale
    pub back_to_front_hcal_factor: Ratiof64,
    pub vertex: Point,
    pub time_threshold: Time,
}

impl CrossCalibration {

    pub fn new(variant: Variant) -> Self {
        let (hcal_to_ecal_factor, hcal_to_ecal_offset, back_to_front_hcal_factor) =
            if variant.is_calice() { (1.0 / 0.914, -1.04, 1.0) }
            else                   { (1.0        ,  0.0 , 1.0) };
        Self {
            hcal_to_ecal_factor,
            hcal_to_ecal_offset,
            back_to_front_hcal_factor,
            vertex: Self::default_vertex(variant),
            time_threshold: HCAL_TIME_THRESHOLD,
        }
    }

    pub fn default_vertex(variant: Variant) -> Point {
        let z = match variant {
            Variant::FullEmHcal           => VERTEX_Z_FULL,
            Variant::HcalOnlySilicon      => VERTEX_Z_HCAL_SI,
            Variant::HcalOnlyScintillator => VERTEX_Z_HCAL_SCINT,
            Variant::CaliceHcal           => VERTEX_Z_CALICE,
        };
        Point::new(mm(0.0), mm(0.0), mm(z))
    }

    pub fn with_vertex(self, vertex: Point) -> Self { Self { vertex, ..self } }
}
