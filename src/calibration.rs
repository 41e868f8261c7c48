//! The calibration engine: one instance per worker, built once from an
//! immutable configuration and then consulted for every hit.

use geometry::Point;
use tracing::info;

use units::{Length, Time};
use units::todo::{GeVf64, Mipf64, Ratiof64};

use crate::accumulator::{Sampling, SectionSums, SpatialAccumulator};
use crate::cross::CrossCalibration;
use crate::energy::EnergyScale;
use crate::layout::{Layer, Section, SectionLayout};
use crate::tof;
use crate::types::{CalibratedHit, Hit};
use crate::variant::Variant;
use crate::weights::{ConversionWeights, MipPerMeV};

/// What the engine needs to know about the detector, resolved before any
/// hit is processed
#[derive(Clone, Debug, PartialEq)]
pub struct CalibrationConfig {
    pub variant: Variant,
    /// Sampling HCAL design: only odd front hadronic layers are read out
    pub concept: bool,
    /// Use the measured MIP -> GeV scale where one exists
    pub calibrate: bool,
    /// Override the variant's default vertex
    pub vertex: Option<Point>,
}

impl CalibrationConfig {
    pub fn new(variant: Variant) -> Self {
        Self { variant, concept: true, calibrate: false, vertex: None }
    }

    pub fn concept  (self, concept  : bool ) -> Self { Self { concept, ..self } }
    pub fn calibrate(self, calibrate: bool ) -> Self { Self { calibrate, ..self } }
    pub fn vertex   (self, vertex   : Point) -> Self { Self { vertex: Some(vertex), ..self } }
}

#[derive(Clone)]
pub struct Calibration {
    config: CalibrationConfig,
    layout: SectionLayout,
    weights: ConversionWeights,
    cross: CrossCalibration,
    scale: EnergyScale,
    accumulator: SpatialAccumulator,
}

impl Calibration {

    pub fn new(config: &CalibrationConfig) -> Self {
        let &CalibrationConfig { variant, concept, calibrate, vertex } = config;
        let layout  = SectionLayout::new(variant);
        let weights = ConversionWeights::new(variant, concept, calibrate);
        let mut cross = CrossCalibration::new(variant);
        if let Some(vertex) = vertex { cross = cross.with_vertex(vertex) }
        let scale = EnergyScale::new(&weights, &cross);
        info!(%variant, concept, calibrate, boundaries = ?layout.boundaries(), "Calibration");
        let accumulator = SpatialAccumulator::new(
            layout.clone(),
            Sampling::new(variant, concept),
            cross.time_threshold,
        );
        Self { config: config.clone(), layout, weights, cross, scale, accumulator }
    }

    pub fn config (&self) -> &CalibrationConfig { &self.config  }
    pub fn variant(&self) -> Variant            { self.config.variant }
    pub fn layout (&self) -> &SectionLayout     { &self.layout  }
    pub fn weights(&self) -> &ConversionWeights { &self.weights }
    pub fn cross  (&self) -> &CrossCalibration  { &self.cross   }
    pub fn scale  (&self) -> &EnergyScale       { &self.scale   }

    // ----- Tables ---------------------------------------------------------------------
    pub fn section(&self, layer: Layer) -> Option<Section> { self.layout.section(layer) }

    pub fn mip_weight(&self, sub_section: usize) -> MipPerMeV { self.weights.mip_weight(sub_section) }

    pub fn mev_to_mip(&self, layer: Layer) -> MipPerMeV { self.weights.mev_to_mip(&self.layout, layer) }

    pub fn gev_weight(&self, section: usize) -> f64    { self.weights.gev_weight(section) }
    pub fn gev_offset(&self, section: usize) -> GeVf64 { self.weights.gev_offset(section) }

    // ----- Per hit --------------------------------------------------------------------
    pub fn correct_time(&self, raw: Time, position: &Point) -> Time {
        tof::correct_time(raw, position, &self.cross.vertex)
    }

    pub fn calibrate_hit(&self, hit: &Hit) -> CalibratedHit {
        CalibratedHit {
            layer: hit.layer,
            mip: hit.energy * self.mev_to_mip(hit.layer),
            time: self.correct_time(hit.time, &hit.position),
            position: hit.position,
        }
    }

    pub fn increment_energy(&mut self, layer: Layer, mip: Mipf64, time: Time, x: Length, y: Length) {
        self.accumulator.increment_energy(layer, mip, time, x, y)
    }

    pub fn increment_block_energy(&self, layer: Layer, mip: Mipf64, sums: &mut SectionSums) {
        self.accumulator.increment_block_energy(layer, mip, sums)
    }

    // ----- Per event ------------------------------------------------------------------
    pub fn reset(&mut self) { self.accumulator.reset() }

    pub fn section_energy(&self, section: Section, mip_threshold: Mipf64) -> Mipf64 {
        self.accumulator.section_energy(section, mip_threshold)
    }

    pub fn section_energies(&self, mip_threshold: Mipf64) -> SectionSums {
        self.accumulator.section_energies(mip_threshold)
    }

    pub fn accumulator(&self) -> &SpatialAccumulator { &self.accumulator }

    /// Deposit all hits of one event in freshly zeroed grids, and return the
    /// section sums of the bins above `mip_threshold`.
    pub fn process_event(&mut self, hits: &[Hit], mip_threshold: Mipf64) -> SectionSums {
        self.reset();
        for hit in hits {
            let CalibratedHit { layer, mip, time, position } = self.calibrate_hit(hit);
            self.increment_energy(layer, mip, time, position.x, position.y);
        }
        self.section_energies(mip_threshold)
    }

    /// Section sums of one event through the block path: no grids, no
    /// timing cut, no threshold.
    pub fn block_sums(&self, hits: &[Hit]) -> SectionSums {
        let mut sums = SectionSums::default();
        for hit in hits {
            let mip = hit.energy * self.mev_to_mip(hit.layer);
            self.increment_block_energy(hit.layer, mip, &mut sums);
        }
        sums
    }

    // ----- Energy ---------------------------------------------------------------------
    pub fn hcal_shower_energy(&self, global: Ratiof64, e1: Mipf64, e2: Mipf64, correct_linearity: bool) -> GeVf64 {
        self.scale.hcal_shower_energy(global, e1, e2, correct_linearity)
    }

    pub fn shower_energy(&self, global: Ratiof64, e0: Mipf64, e1: Mipf64, e2: Mipf64, correct_linearity: bool) -> GeVf64 {
        self.scale.shower_energy(global, e0, e1, e2, correct_linearity)
    }

    pub fn reco_energy_uncorrected(&self, e0: Mipf64, e1: Mipf64, e2: Mipf64, hcal_only: bool) -> GeVf64 {
        self.scale.reco_energy_uncorrected(e0, e1, e2, hcal_only)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use units::{mm, ns, ns_};
    use float_eq::assert_float_eq;
    use pretty_assertions::assert_eq;

    fn hit(layer: Layer, energy: f64, time: f64, (x, y, z): (f64, f64, f64)) -> Hit {
        Hit { event: 0, layer, energy, time: ns(time), position: Point::new(mm(x), mm(y), mm(z)) }
    }

    #[test]
    fn calibrate_hit_weights_and_corrects_time() {
        let calib = Calibration::new(&CalibrationConfig::new(Variant::FullEmHcal));
        let h = hit(5, 2.0, 10.0, (0.0, 0.0, 14.125));
        let c = calib.calibrate_hit(&h);
        assert_float_eq!(c.mip, 2.0 / 0.0548, rmax <= 1e-12);
        // 1000 mm from the default vertex at z = -985.875 mm
        assert_float_eq!(ns_(c.time), 10.0 - 1000.0 / 299.792_458, rmax <= 1e-12);
        assert_eq!(c.layer, 5);
        assert_eq!(c.position, h.position);
    }

    #[test]
    fn vertex_override_changes_time_correction() {
        let config = CalibrationConfig::new(Variant::FullEmHcal).vertex(Point::origin());
        let calib = Calibration::new(&config);
        let t = calib.correct_time(ns(10.0), &Point::new(mm(0.0), mm(0.0), mm(0.0)));
        assert_eq!(t, ns(10.0));
    }

    #[test]
    fn process_event_resets_between_events() {
        let mut calib = Calibration::new(&CalibrationConfig::new(Variant::FullEmHcal));
        let event = [hit(5, 1.0, 0.0, (0.0, 0.0, 0.0))];
        let first  = calib.process_event(&event, 0.0);
        let second = calib.process_event(&event, 0.0);
        assert_eq!(first, second);
        assert_float_eq!(first.em, 1.0 / 0.0548, rmax <= 1e-12);
    }

    #[test]
    fn block_sums_match_grids_for_prompt_contained_hits() {
        let mut calib = Calibration::new(&CalibrationConfig::new(Variant::FullEmHcal).concept(false));
        let event = [
            hit( 0, 1.0, 0.0, (  10.0,  20.0, 0.0)),
            hit(12, 0.5, 0.0, (-200.0, 300.0, 0.0)),
            hit(35, 3.0, 5.0, (   0.0,   0.0, 0.0)),
            hit(40, 2.0, 5.0, ( 400.0,-400.0, 0.0)),
            hit(60, 7.0, 5.0, (  50.0,  50.0, 0.0)),
        ];
        calib.process_event(&event, 0.0);
        let block = calib.block_sums(&event);
        for section in Section::ALL {
            assert_float_eq!(calib.accumulator().section_total(section), block.get(section), rmax <= 1e-12);
        }
    }
}
