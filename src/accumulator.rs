//! Per-layer transverse maps of calibrated energy.
//!
//! Every layer of every section gets a 2D grid in (x, y). Grids are created
//! the first time the accumulator is reset and then only zeroed, so that
//! processing an event allocates nothing.
//!
//! Which deposits are kept depends on the section:
//!
//! + EM: always, with no timing cut
//!
//! + front hadronic: only layers which are read out (all of them, unless the
//!   sampling design reads out only the odd ones), and only in time
//!
//! + back hadronic: only in time

use ndhistogram::{ndhistogram, axis::{BinInterval, Uniform}, Histogram, HistND};
use tracing::info;

use units::{mm_, Length, Time};
use units::todo::{Lengthf64, Mipf64};

use crate::layout::{Layer, Section, SectionLayout, N_SECTIONS};
use crate::variant::Variant;

type Grid = HistND<(Uniform<Lengthf64>, Uniform<Lengthf64>), Mipf64>;

/// Square binning shared by the x and y axes of a grid
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Binning {
    pub nbins: usize,
    pub min: Lengthf64,
    pub max: Lengthf64,
}

pub const EM_BINNING  : Binning = Binning { nbins: 100, min: -500.0, max: 500.0 };
pub const HCAL_BINNING: Binning = Binning { nbins:  34, min: -510.0, max: 510.0 };

impl Binning {
    pub fn of(section: Section) -> Self {
        match section {
            Section::Em => EM_BINNING,
            _           => HCAL_BINNING,
        }
    }

    fn empty_grid(&self) -> Grid {
        let &Self { nbins, min, max } = self;
        ndhistogram!(Uniform::new(nbins, min, max), Uniform::new(nbins, min, max); Mipf64)
    }
}

/// Which front hadronic layers carry instrumented read-out
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Sampling {
    every_front_layer: bool,
}

impl Sampling {
    pub fn new(variant: Variant, concept: bool) -> Self {
        Self { every_front_layer: variant.is_calice() || !concept }
    }

    pub fn is_read_out(&self, section: Section, layer: Layer) -> bool {
        match section {
            Section::FrontHcal => self.every_front_layer || layer % 2 == 1,
            _                  => true,
        }
    }
}

/// Calibrated energy per section, in MIPs unless stated otherwise
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SectionSums {
    pub em        : Mipf64,
    pub front_hcal: Mipf64,
    pub back_hcal : Mipf64,
}

impl SectionSums {
    pub fn get(&self, section: Section) -> Mipf64 {
        match section {
            Section::Em        => self.em,
            Section::FrontHcal => self.front_hcal,
            Section::BackHcal  => self.back_hcal,
        }
    }

    pub fn add(&mut self, section: Section, energy: Mipf64) {
        match section {
            Section::Em        => self.em         += energy,
            Section::FrontHcal => self.front_hcal += energy,
            Section::BackHcal  => self.back_hcal  += energy,
        }
    }

    pub fn total(&self) -> Mipf64 { self.em + self.front_hcal + self.back_hcal }
}

#[derive(Clone)]
struct SectionGrids {
    section: Section,
    binning: Binning,
    first_layer: Layer,
    n_layers: usize,
    grids: Vec<Grid>,
}

impl SectionGrids {

    fn new(section: Section, layout: &SectionLayout) -> Self {
        let layers = layout.layers(section);
        Self {
            section,
            binning: Binning::of(section),
            first_layer: layers.start,
            n_layers: layers.len(),
            grids: vec![],
        }
    }

    fn reset(&mut self) {
        if !self.grids.is_empty() {
            for grid in &mut self.grids {
                grid.values_mut().for_each(|v| *v = 0.0);
            }
        } else if self.n_layers > 0 {
            let Binning { nbins, min, max } = self.binning;
            info!("Creating {} 2D grids for {} with {} bins between {} and {} mm",
                  self.n_layers, self.section.name(), nbins, min, max);
            self.grids = (0..self.n_layers).map(|_| self.binning.empty_grid()).collect();
        }
    }

    fn fill(&mut self, layer: Layer, energy: Mipf64, x: Lengthf64, y: Lengthf64) {
        let grid = layer.checked_sub(self.first_layer)
            .and_then(|i| self.grids.get_mut(i));
        if let Some(grid) = grid {
            grid.fill_with(&(x, y), energy);
        }
    }

    // Bins outside the grid range never contribute
    fn in_range_bins(&self) -> impl Iterator<Item = Mipf64> + '_ {
        self.grids.iter()
            .flat_map(|grid| grid.iter()
                      .filter(|item| matches!(item.bin, (BinInterval::Bin { .. }, BinInterval::Bin { .. })))
                      .map(|item| *item.value))
    }

    fn sum_above(&self, threshold: Mipf64) -> Mipf64 {
        self.in_range_bins().filter(|&e| e > threshold).sum()
    }

    fn sum(&self) -> Mipf64 { self.in_range_bins().sum() }
}

/// Transverse energy maps of one detector, owned by a single engine
#[derive(Clone)]
pub struct SpatialAccumulator {
    layout: SectionLayout,
    sampling: Sampling,
    time_threshold: Time,
    sections: [SectionGrids; N_SECTIONS],
}

impl SpatialAccumulator {

    pub fn new(layout: SectionLayout, sampling: Sampling, time_threshold: Time) -> Self {
        let sections = Section::ALL.map(|s| SectionGrids::new(s, &layout));
        let mut accumulator = Self { layout, sampling, time_threshold, sections };
        accumulator.reset();
        accumulator
    }

    /// Zero all grids, creating them if they do not exist yet
    pub fn reset(&mut self) {
        self.sections.iter_mut().for_each(SectionGrids::reset);
    }

    /// Section whose selection rules accept a deposit in `layer`, ignoring
    /// timing
    fn accepting_section(&self, layer: Layer) -> Option<Section> {
        self.layout.section(layer)
            .filter(|&section| self.sampling.is_read_out(section, layer))
    }

    /// Deposit `energy` at (`x`, `y`) in the grid of `layer`, if the
    /// selection rules accept it. Hadronic deposits must arrive before the
    /// timing threshold.
    pub fn increment_energy(&mut self, layer: Layer, energy: Mipf64, time: Time, x: Length, y: Length) {
        let Some(section) = self.accepting_section(layer) else { return };
        let in_time = time < self.time_threshold;
        if section.is_hadronic() && !in_time { return }
        self.sections[section.index()].fill(layer, energy, mm_(x), mm_(y));
    }

    /// Add `energy` to the running total of its section, with the same
    /// sampling rule as `increment_energy` but no timing cut and no binning.
    pub fn increment_block_energy(&self, layer: Layer, energy: Mipf64, sums: &mut SectionSums) {
        if let Some(section) = self.accepting_section(layer) {
            sums.add(section, energy);
        }
    }

    /// Sum of all bins of the section whose content exceeds `mip_threshold`.
    /// Bins at or below the threshold are dropped entirely.
    pub fn section_energy(&self, section: Section, mip_threshold: Mipf64) -> Mipf64 {
        self.sections[section.index()].sum_above(mip_threshold)
    }

    /// Sum of all bins of the section, with no threshold
    pub fn section_total(&self, section: Section) -> Mipf64 {
        self.sections[section.index()].sum()
    }

    pub fn section_energies(&self, mip_threshold: Mipf64) -> SectionSums {
        let [em, front_hcal, back_hcal] = Section::ALL.map(|s| self.section_energy(s, mip_threshold));
        SectionSums { em, front_hcal, back_hcal }
    }

    /// Content of the bin containing (`x`, `y`) in the grid of `layer`
    pub fn bin_content(&self, layer: Layer, x: Length, y: Length) -> Option<Mipf64> {
        let section = self.layout.section(layer)?;
        let grids = &self.sections[section.index()];
        let grid = grids.grids.get(layer - grids.first_layer)?;
        grid.value(&(mm_(x), mm_(y))).copied()
    }

    pub fn n_grids(&self, section: Section) -> usize {
        self.sections[section.index()].grids.len()
    }
}
