//! Quantities in a millimetre / nanosecond system, which is what the
//! calorimeter simulation writes: positions in mm, hit times in ns.

pub mod todo;

pub use uom;
pub use uom::si::Quantity;

#[macro_export]
macro_rules! in_base_unit {
  ($value:expr) => {
    $crate::Quantity {
      dimension: std::marker::PhantomData,
      units: std::marker::PhantomData,
      value: $value,
    }
  };
}

#[macro_export]
macro_rules! assert_uom_eq {
  ($unit:ident, $lhs:expr, $rhs:expr, $algo:ident <= $tol:expr) => {
    float_eq::assert_float_eq!($lhs.get::<$unit>(), $rhs.get::<$unit>(), $algo <= $tol)
  };
}

pub mod mmns {

  pub mod f64 {
    use uom::{ISQ, system};
    ISQ!(uom::si, f64, (millimeter, kilogram, nanosecond, ampere, kelvin, mole, candela));
  }

}

pub use mmns::f64::{Length, Time, Velocity};

/// Speed of light in vacuum, in the base units of this system (mm / ns)
#[allow(clippy::excessive_precision)] // Stick to official definition of c
pub const C: Velocity = in_base_unit!(299.792_458);

mod units {
  pub use uom::si::{length  ::{millimeter, centimeter, meter},
                    time    ::{nanosecond, picosecond},
                    velocity::meter_per_second,
  };
}

// Making values from float literals is very long-winded, so provide some
// pithily-named convenience constructors.

/// Generate a function called NAME which returns QUANTITY by interpreting its
/// argument as UNIT
///
/// wrap!(NAME QUANTITY UNIT);
macro_rules! wrap {
  ($name:ident $quantity:ident $unit:ident ) => {
    pub fn $name(x: f64) -> $quantity { $quantity::new::<units::$unit>(x) }
  };
}

wrap!(cm     Length         centimeter);
wrap!(mm     Length         millimeter);
wrap!(m      Length              meter);
wrap!(ns     Time           nanosecond);
wrap!(ps     Time           picosecond);
wrap!(m_s    Velocity meter_per_second);

// Reverse direction of the above.
pub fn mm_(x: Length) -> f64 { x.get::<units::millimeter>() }
pub fn ns_(x: Time  ) -> f64 { x.get::<units::nanosecond>() }
pub fn ps_(x: Time  ) -> f64 { x.get::<units::picosecond>() }

pub fn m_s_(x: Velocity) -> f64 { x.get::<units::meter_per_second>() }
