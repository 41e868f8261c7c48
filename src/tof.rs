//! Time-of-flight correction of hit times.

use geometry::Point;
use units::{C, Time};
use units::uom::ConstZero;

/// Subtract the time light takes to travel in a straight line from `vertex`
/// to `position`. Times earlier than the vertex are non-physical and are
/// truncated to zero.
pub fn correct_time(raw: Time, position: &Point, vertex: &Point) -> Time {
    let flight: Time = position.distance(vertex) / C;
    let corrected = raw - flight;
    if corrected < Time::ZERO { Time::ZERO } else { corrected }
}
