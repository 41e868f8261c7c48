//! Shower energy from calibrated section sums.
//!
//! The linear combination of the sections is kept apart from the optional
//! non-linearity polynomial, so that corrected and uncorrected estimates share
//! the same section arithmetic.

use units::todo::{GeVf64, Mipf64, Ratiof64};

use crate::cross::CrossCalibration;
use crate::weights::{ConversionWeights, Linear};
use crate::layout::N_SECTIONS;

/// Coefficients of the empirical shower-containment correction
/// `a0 + a1*E + a2*E^2`, applied multiplicatively to the hadronic energy
pub const LINEARITY: [f64; 3] = [1.32, 0.002, 0.0];

pub fn linearity_correction(energy: GeVf64) -> Ratiof64 {
    let [a0, a1, a2] = LINEARITY;
    a0 + a1 * energy + a2 * energy * energy
}

/// Everything the energy formulas need from the calibration tables
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnergyScale {
    pub gev: [Linear; N_SECTIONS],
    pub hcal_to_ecal_factor: Ratiof64,
    pub hcal_to_ecal_offset: GeVf64,
    pub back_to_front_hcal_factor: Ratiof64,
}

impl Default for EnergyScale {
    fn default() -> Self {
        Self {
            gev: [Linear::IDENTITY; N_SECTIONS],
            hcal_to_ecal_factor: 1.0,
            hcal_to_ecal_offset: 0.0,
            back_to_front_hcal_factor: 1.0,
        }
    }
}

impl EnergyScale {

    pub fn new(weights: &ConversionWeights, cross: &CrossCalibration) -> Self {
        Self {
            gev: *weights.gev(),
            hcal_to_ecal_factor      : cross.hcal_to_ecal_factor,
            hcal_to_ecal_offset      : cross.hcal_to_ecal_offset,
            back_to_front_hcal_factor: cross.back_to_front_hcal_factor,
        }
    }

    /// Hadronic shower energy from the front (`e1`) and back (`e2`) sums,
    /// with the front section scaled by `global`.
    pub fn hcal_shower_energy(&self, global: Ratiof64, e1: Mipf64, e2: Mipf64, correct_linearity: bool) -> GeVf64 {
        let [_, front, back] = self.gev;
        let e = global * front.apply(e1) + self.back_to_front_hcal_factor * back.apply(e2);
        if correct_linearity { e * linearity_correction(e) }
        else                 { e }
    }

    pub fn shower_energy(&self, global: Ratiof64, e0: Mipf64, e1: Mipf64, e2: Mipf64, correct_linearity: bool) -> GeVf64 {
        self.gev[0].apply(e0) + self.hcal_shower_energy(global, e1, e2, correct_linearity)
    }

    /// Energy with the e/pi factor and offset applied directly to the section
    /// sums, and no non-linearity correction. `hcal_only` ignores both the EM
    /// and the back hadronic sums.
    pub fn reco_energy_uncorrected(&self, e0: Mipf64, e1: Mipf64, e2: Mipf64, hcal_only: bool) -> GeVf64 {
        let [em, front, back] = self.gev;
        let f = self.hcal_to_ecal_factor;
        let offset = self.hcal_to_ecal_offset;
        if hcal_only { return f * (front.apply(e1) - offset) }
        em.apply(e0) + f * (front.apply(e1) + self.back_to_front_hcal_factor * back.apply(e2) - offset)
    }
}
