//! The detector layouts the calibration knows about.
//!
//! A layout is chosen once, from a configuration tag, before any hit is seen.
//! Tags that match no known layout are rejected here rather than quietly
//! treated as the full EM + HCAL detector.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Variant {
    /// Silicon EM section followed by front (silicon) and back (scintillator)
    /// hadronic sections
    FullEmHcal,
    /// Hadronic sections only, front section read out with silicon
    HcalOnlySilicon,
    /// Back hadronic section only, scintillator read-out
    HcalOnlyScintillator,
    /// CALICE-style analogue scintillator HCAL with a tail catcher
    CaliceHcal,
}

impl Variant {

    pub const ALL: [Variant; 4] = [
        Variant::FullEmHcal,
        Variant::HcalOnlySilicon,
        Variant::HcalOnlyScintillator,
        Variant::CaliceHcal,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Variant::FullEmHcal           => "full",
            Variant::HcalOnlySilicon      => "hcal-si",
            Variant::HcalOnlyScintillator => "hcal-scint",
            Variant::CaliceHcal           => "calice",
        }
    }

    /// Resolve a configuration tag: either one of the names returned by
    /// `name`, or a path / tag containing the simulation version number
    /// (`version20` .. `version23`, `version_23`).
    pub fn from_tag(tag: &str) -> Result<Self, Error> {
        if let Some(&v) = Self::ALL.iter().find(|v| v.name() == tag) {
            return Ok(v)
        }
        // version22 must be checked before version21: both are HCAL-only, but
        // the scintillator one takes precedence
        let contains = |s: &str| tag.contains(s);
        if      contains("version22")                           { Ok(Variant::HcalOnlyScintillator) }
        else if contains("version23") || contains("version_23") { Ok(Variant::CaliceHcal)           }
        else if contains("version21")                           { Ok(Variant::HcalOnlySilicon)      }
        else if contains("version20")                           { Ok(Variant::FullEmHcal)           }
        else { Err(Error::UnknownVariant(tag.into())) }
    }

    pub fn is_calice(self) -> bool { self == Variant::CaliceHcal }

}

impl FromStr for Variant {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> { Self::from_tag(s) }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
