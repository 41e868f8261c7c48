/// Units which are simply type aliases for `f64` rather than having an
/// implementation as a `uom` `Quantity`.
///
/// This may be because:
///
/// + They are not physical units at all: a MIP is a detector-response
///   normalization, whose size in MeV depends on the active medium.
///
/// + The conversion chain MeV -> MIP -> GeV goes through per-section
///   calibration constants, so the intermediate quantities have no fixed
///   dimensional relation to each other.
///
/// + They might not be difficult to implement, but the calibration tables are
///   consulted once per hit and we have not measured what `uom` costs there.

pub type Lengthf64 = f64;
pub type MeVf64    = f64; // TODO uom Energy, once deposits are read as Energy
pub type Mipf64    = f64;
pub type GeVf64    = f64;
pub type Ratiof64  = f64;
