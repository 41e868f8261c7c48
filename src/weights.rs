//! Conversion of raw deposits to MIPs, and of MIP sums to GeV.
//!
//! The MeV -> MIP weight of a sub-section is the inverse of the MIP deposit in
//! its active medium, scaled by the dE/dx of its absorber relative to the
//! thinnest EM absorber: a layer with twice as much absorber samples half as
//! much of the shower.

use units::todo::{GeVf64, MeVf64, Mipf64, Ratiof64};

use crate::layout::{Layer, SectionLayout, N_SECTIONS, N_SUB_SECTIONS};
use crate::variant::Variant;

/// MIPs per MeV deposited in the active medium
pub type MipPerMeV = Ratiof64;

// Most probable MIP deposit in the active medium (MeV)
const EM_SI_MIP       : MeVf64 = 0.0548;
const HCAL_SI_MIP     : MeVf64 = 0.0849;
const SCINT_MIP       : MeVf64 = 1.49;
const CALICE_SCINT_MIP: MeVf64 = 0.807;

// Absorber dE/dx per layer (MeV)
const ABS_DEDX_EM_0 : f64 =  5.848;
const ABS_DEDX_EM_1 : f64 =  8.001;
const ABS_DEDX_EM_2 : f64 = 10.854;
const ABS_DEDX_FHCAL: f64 = 65.235;
const ABS_DEDX_BHCAL: f64 = 92.196;

// The CALICE tail catcher has absorber plates 104 mm thick, against 21 mm in
// the main stack
const CALICE_TAIL_CATCHER_RATIO: f64 = 104.0 / 21.0;

// Measured CALICE AHCAL response
const CALICE_MIP_PER_GEV: Mipf64 = 41.69;
const CALICE_PEDESTAL   : Mipf64 = -4.3;

/// Linear MIP -> GeV calibration of one section: `E = mip * slope - offset`
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Linear {
    pub slope : f64,
    pub offset: GeVf64,
}

impl Linear {
    pub const IDENTITY: Self = Self { slope: 1.0, offset: 0.0 };

    pub fn apply(&self, mip: Mipf64) -> GeVf64 { mip * self.slope - self.offset }
}

impl Default for Linear {
    fn default() -> Self { Self::IDENTITY }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ConversionWeights {
    mip: [MipPerMeV; N_SUB_SECTIONS],
    gev: [Linear   ; N_SECTIONS],
}

impl ConversionWeights {

    /// `concept` selects the sampling HCAL design, whose front hadronic layers
    /// carry the full absorber thickness (otherwise every layer is read out
    /// and each carries half of it). `calibrate` enables the measured MIP ->
    /// GeV scale, which only exists for the CALICE HCAL.
    pub fn new(variant: Variant, concept: bool, calibrate: bool) -> Self {
        let em = 1.0 / EM_SI_MIP;
        let mut mip = [1.0; N_SUB_SECTIONS];
        mip[0] = em;
        mip[1] = em * ABS_DEDX_EM_1 / ABS_DEDX_EM_0;
        mip[2] = em * ABS_DEDX_EM_2 / ABS_DEDX_EM_0;

        let mut gev = [Linear::IDENTITY; N_SECTIONS];

        if variant.is_calice() {
            let sci = 1.0 / CALICE_SCINT_MIP;
            mip[3] = sci;
            mip[4] = sci;
            mip[5] = sci * CALICE_TAIL_CATCHER_RATIO;
            if calibrate {
                let slope = 1.0 / CALICE_MIP_PER_GEV;
                gev[1] = Linear { slope, offset: CALICE_PEDESTAL / CALICE_MIP_PER_GEV };
                gev[2] = Linear { slope, offset: 0.0 };
            }
        } else {
            let front_absorber = if concept { 1.0 } else { 0.5 };
            mip[3] = 1.0 / HCAL_SI_MIP * front_absorber * ABS_DEDX_FHCAL / ABS_DEDX_EM_0;
            mip[4] = 1.0 / SCINT_MIP   *                  ABS_DEDX_BHCAL / ABS_DEDX_EM_0;
            mip[5] = 1.0;
        }
        Self { mip, gev }
    }

    /// MeV -> MIP weight of a sub-section; 1 outside the table
    pub fn mip_weight(&self, sub_section: usize) -> MipPerMeV {
        self.mip.get(sub_section).copied().unwrap_or(1.0)
    }

    /// MeV -> MIP weight of the sub-section containing `layer`; 1 for layers
    /// which are not part of `layout`
    pub fn mev_to_mip(&self, layout: &SectionLayout, layer: Layer) -> MipPerMeV {
        layout.sub_section(layer).map_or(1.0, |s| self.mip_weight(s))
    }

    /// MIP -> GeV slope of a section; 1 outside the table
    pub fn gev_weight(&self, section: usize) -> f64 {
        self.gev.get(section).map_or(1.0, |g| g.slope)
    }

    /// MIP -> GeV offset of a section; 0 outside the table
    pub fn gev_offset(&self, section: usize) -> GeVf64 {
        self.gev.get(section).map_or(0.0, |g| g.offset)
    }

    pub fn gev(&self) -> &[Linear; N_SECTIONS] { &self.gev }

    pub fn mip_weights(&self) -> &[MipPerMeV; N_SUB_SECTIONS] { &self.mip }
}
