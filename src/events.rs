//! Event-level reconstruction, sequential or spread over rayon workers.
//!
//! The grids of an engine are mutated in place, so engines are never shared:
//! every worker builds its own from the configuration and events are
//! independent of each other.

use itertools::Itertools;
use rayon::prelude::*;
use serde::Deserialize;
use tracing::debug;

use units::todo::{GeVf64, Mipf64, Ratiof64};

use crate::accumulator::SectionSums;
use crate::calibration::{Calibration, CalibrationConfig};
use crate::types::{EventId, Hit};

/// How section sums are turned into shower energies
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct Reconstruction {
    /// Bins at or below this many MIPs are ignored
    pub threshold: Mipf64,
    /// Global scale of the front hadronic section
    pub global: Ratiof64,
    /// Apply the shower-containment non-linearity correction
    pub linearity: bool,
    /// Uncorrected estimate from the front hadronic section alone
    pub hcal_only: bool,
}

impl Default for Reconstruction {
    fn default() -> Self {
        Self { threshold: 0.0, global: 1.0, linearity: false, hcal_only: false }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EventEnergies {
    pub event: EventId,
    pub n_hits: usize,
    /// Thresholded grid sums
    pub mip: SectionSums,
    pub shower: GeVf64,
    pub uncorrected: GeVf64,
}

/// Group hits by event id, in ascending event order. Hits keep their
/// relative order within each event.
pub fn group_into_events(hits: Vec<Hit>) -> Vec<Vec<Hit>> {
    hits.into_iter()
        .sorted_by_key(|h| h.event)
        .group_by(|h| h.event)
        .into_iter()
        .map(|(_, hits)| hits.collect())
        .collect()
}

pub fn reconstruct_event(engine: &mut Calibration, hits: &[Hit], reco: &Reconstruction) -> EventEnergies {
    let event = hits.first().map_or(0, |h| h.event);
    let mip = engine.process_event(hits, reco.threshold);
    let SectionSums { em, front_hcal, back_hcal } = mip;
    let shower      = engine.shower_energy(reco.global, em, front_hcal, back_hcal, reco.linearity);
    let uncorrected = engine.reco_energy_uncorrected(em, front_hcal, back_hcal, reco.hcal_only);
    debug!(event, em, front_hcal, back_hcal, shower, "event");
    EventEnergies { event, n_hits: hits.len(), mip, shower, uncorrected }
}

/// Reconstruct every event with a single engine
pub fn process_events_sequential(config: &CalibrationConfig, reco: &Reconstruction, events: &[Vec<Hit>]) -> Vec<EventEnergies> {
    let mut engine = Calibration::new(config);
    events.iter()
        .map(|hits| reconstruct_event(&mut engine, hits, reco))
        .collect()
}

/// Events per rayon job such that `n_workers` jobs cover all `n_events`
pub fn chunk_size(n_events: usize, n_workers: usize) -> usize {
    n_events.div_ceil(n_workers.max(1)).max(1)
}

/// Reconstruct events in parallel. Events are split into one contiguous chunk
/// per rayon worker and each chunk builds its own engine. The output is in the
/// same order as `events`.
pub fn process_events(config: &CalibrationConfig, reco: &Reconstruction, events: &[Vec<Hit>]) -> Vec<EventEnergies> {
    let chunk = chunk_size(events.len(), rayon::current_num_threads());
    events.par_chunks(chunk)
        .flat_map_iter(|chunk| {
            let mut engine = Calibration::new(config);
            chunk.iter()
                .map(|hits| reconstruct_event(&mut engine, hits, reco))
                .collect::<Vec<_>>()
        })
        .collect()
}
