use std::io::Write;

use float_eq::assert_float_eq;
use pretty_assertions::assert_eq;
use rstest::rstest;

use pfcal::{Calibration, CalibrationConfig, Hit, Point, Reconstruction, Section, Variant};
use pfcal::config::calibration::read_config_file;
use pfcal::cross::HCAL_TIME_THRESHOLD;
use pfcal::events::{group_into_events, process_events, process_events_sequential};
use pfcal::io::{read_hits, write_hits};
use units::{mm, ns};

fn hit(event: u32, layer: usize, energy: f64, time: f64, (x, y, z): (f64, f64, f64)) -> Hit {
    Hit { event, layer, energy, time: ns(time), position: Point::new(mm(x), mm(y), mm(z)) }
}

fn full() -> Calibration { Calibration::new(&CalibrationConfig::new(Variant::FullEmHcal)) }

#[test]
fn single_em_hit_lands_in_em_section() {
    let mut calib = full();
    let sums = calib.process_event(&[hit(0, 5, 1.0, 0.0, (0.0, 0.0, 0.0))], 0.0);
    assert_float_eq!(sums.em, 18.248_175_182_481_752, rmax <= 1e-12);
    assert_eq!(sums.front_hcal, 0.0);
    assert_eq!(sums.back_hcal , 0.0);
    assert_eq!(calib.section_energy(Section::Em, 0.0), sums.em);
}

// Raw time of 250 ns stays well above the cut after time-of-flight correction
#[rstest(/**/ layer, section,
         case(40, Section::FrontHcal),
         case(41, Section::FrontHcal),
         case(60, Section::BackHcal),
)]
fn late_hadronic_hits_are_dropped(layer: usize, section: Section) {
    let mut calib = Calibration::new(&CalibrationConfig::new(Variant::FullEmHcal).concept(false));
    let late   = calib.process_event(&[hit(0, layer, 1.0, 250.0, (0.0, 0.0, 0.0))], 0.0);
    assert_eq!(late.get(section), 0.0);
    let prompt = calib.process_event(&[hit(0, layer, 1.0,  10.0, (0.0, 0.0, 0.0))], 0.0);
    assert!(prompt.get(section) > 0.0);
}

#[test]
fn late_em_hits_are_kept() {
    let mut calib = full();
    let sums = calib.process_event(&[hit(0, 5, 1.0, 1e4, (0.0, 0.0, 0.0))], 0.0);
    assert!(sums.em > 0.0);
}

#[test]
fn timing_cut_is_strict() {
    let mut calib = full();
    calib.increment_energy(60, 3.0, HCAL_TIME_THRESHOLD, mm(0.0), mm(0.0));
    assert_eq!(calib.section_energy(Section::BackHcal, 0.0), 0.0);
    calib.increment_energy(60, 3.0, HCAL_TIME_THRESHOLD - ns(1e-6), mm(0.0), mm(0.0));
    assert_eq!(calib.section_energy(Section::BackHcal, 0.0), 3.0);
}

#[test]
fn bins_at_threshold_are_dropped() {
    let mut calib = full();
    calib.increment_energy(5, 0.5, ns(0.0), mm(  0.0), mm(0.0));
    calib.increment_energy(5, 0.7, ns(0.0), mm(100.0), mm(0.0));
    assert_float_eq!(calib.section_energy(Section::Em, 0.5), 0.7, ulps <= 1);
    assert_float_eq!(calib.section_energy(Section::Em, 0.0), 1.2, ulps <= 1);
}

#[test]
fn deposits_in_one_bin_accumulate_before_the_threshold() {
    let mut calib = full();
    calib.increment_energy(5, 0.3, ns(0.0), mm(1.0), mm(1.0));
    calib.increment_energy(5, 0.3, ns(0.0), mm(2.0), mm(2.0));
    assert_float_eq!(calib.section_energy(Section::Em, 0.5), 0.6, ulps <= 1);
}

#[test]
fn reset_clears_the_grids() {
    let mut calib = full();
    calib.increment_energy(5, 1.0, ns(0.0), mm(0.0), mm(0.0));
    calib.reset();
    assert_eq!(calib.section_energies(0.0).total(), 0.0);
}

#[test]
fn layers_outside_the_detector_are_ignored() {
    let mut calib = Calibration::new(&CalibrationConfig::new(Variant::HcalOnlyScintillator));
    let sums = calib.process_event(&[hit(0, 9, 1.0, 0.0, (0.0, 0.0, 0.0)),
                                     hit(0, 0, 1.0, 0.0, (0.0, 0.0, 0.0))], 0.0);
    assert_eq!(sums.em, 0.0);
    assert_eq!(sums.front_hcal, 0.0);
    assert!(sums.back_hcal > 0.0);
    assert_eq!(calib.mev_to_mip(9), 1.0);
}

#[test]
fn shower_energy_is_linear_without_correction() {
    let calib = full();
    let (e0, e1, e2) = (12.0, 30.0, 7.5);
    let cross = calib.cross();
    let expected = e0 + cross.hcal_to_ecal_factor * (e1 + cross.back_to_front_hcal_factor * e2 - cross.hcal_to_ecal_offset);
    assert_float_eq!(calib.shower_energy(1.0, e0, e1, e2, false), expected, rmax <= 1e-12);
}

// Hits and configuration on disk, through grouping and parallel reconstruction
#[test]
fn run_from_files() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;

    let config_path = dir.path().join("run.toml");
    let mut config_file = std::fs::File::create(&config_path)?;
    writeln!(config_file, r#"
        variant = "/data/PFCal/version20/e-_20GeV.root"
        concept = false

        [reconstruction]
        threshold = 0.5
        linearity = true
    "#)?;

    // Written in descending event order
    let hits = (0..20_u32).rev()
        .flat_map(|e| (0..64).map(move |l| hit(e, l, 0.05 * (e + 1) as f64, (2 * l) as f64,
                                             (20.0 * l as f64 - 600.0, 10.0 * e as f64, 10.0 * l as f64))))
        .collect::<Vec<_>>();
    let hits_path = dir.path().join("hits.txt");
    write_hits(&hits, &hits_path)?;

    let config = read_config_file(&config_path)?;
    assert_eq!(config.variant, Variant::FullEmHcal);
    let calib = config.calibration();
    let reco = config.reconstruction;
    assert_eq!(reco, Reconstruction { threshold: 0.5, linearity: true, ..Reconstruction::default() });

    let read = read_hits(&hits_path)?;
    assert_eq!(read.len(), hits.len());
    let events = group_into_events(read);
    assert_eq!(events.len(), 20);
    assert!(events.iter().all(|e| e.len() == 64));

    let parallel   = process_events           (&calib, &reco, &events);
    let sequential = process_events_sequential(&calib, &reco, &events);
    assert_eq!(parallel, sequential);
    assert_eq!(parallel.iter().map(|e| e.event).collect::<Vec<_>>(), (0..20).collect::<Vec<u32>>());
    assert!(parallel.windows(2).all(|w| w[0].shower < w[1].shower));
    Ok(())
}
