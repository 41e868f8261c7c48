use std::ops::Sub;
use units::{Length, mm};
use crate::Vector;

/// Position in the detector frame
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: Length,
    pub y: Length,
    pub z: Length,
}

impl Point {
    pub fn new(x: Length, y: Length, z: Length) -> Self { Self { x, y, z } }

    pub fn origin() -> Self { Self::new(mm(0.0), mm(0.0), mm(0.0)) }

    /// Straight-line distance between two points
    pub fn distance(&self, other: &Self) -> Length { (self - other).magnitude() }
}

impl Sub for Point {
    type Output = Vector;
    fn sub(self, rhs: Self) -> Self::Output {
        Vector {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
            z: self.z - rhs.z,
        }
    }
}

impl Sub for &Point {
    type Output = Vector;
    fn sub(self, rhs: Self) -> Self::Output { *self - *rhs }
}
