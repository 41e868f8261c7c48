use units::Length;

/// Displacement between two `Point`s
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vector {
    pub x: Length,
    pub y: Length,
    pub z: Length,
}

impl Vector {

    pub fn new(x: Length, y: Length, z: Length) -> Self { Self { x, y, z } }

    pub fn magnitude(&self) -> Length {
        let &Self { x, y, z } = self;
        (x*x + y*y + z*z).sqrt()
    }

}

#[cfg(test)]
mod tests {
    use crate::Vector;
    use float_eq::assert_float_eq;
    use units::{mm, mm_};
    use rstest::rstest;

    #[rstest(/**/ x,    y,     z,   magnitude,
             case(0.0,  0.0,   0.0,    0.0),
             case(1.0,  0.0,   0.0,    1.0),
             case(0.0, -1.0,   0.0,    1.0),
             case(3.0,  4.0,   0.0,    5.0),
             case(0.0, -3.0,   4.0,    5.0),
             case(5.0,  0.0,  12.0,   13.0),
             case(3.0,  4.0,   5.0,    7.071_067_811_865_476),
             case(0.0,  0.0, 985.875, 985.875),
    )]
    fn vector_magnitude(x: f64, y: f64, z: f64, magnitude: f64) {
        let v = Vector::new(mm(x), mm(y), mm(z));
        assert_float_eq!(mm_(v.magnitude()), magnitude, rmax <= 1e-12);
    }
}
