use geometry::Point;
use units::Time;
use units::todo::{MeVf64, Mipf64};

use crate::layout::Layer;

pub type EventId = u32;

/// Simulated hit, as delivered by the upstream event loop
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hit {
    pub event: EventId,
    pub layer: Layer,
    /// Deposited energy in the active medium
    pub energy: MeVf64,
    pub time: Time,
    pub position: Point,
}

/// Hit after conversion to MIPs and time-of-flight correction
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CalibratedHit {
    pub layer: Layer,
    pub mip: Mipf64,
    pub time: Time,
    pub position: Point,
}
