// ----------------------------------- CLI -----------------------------------
use clap::Parser;

use pfcal::utils::parse_point;

#[derive(Parser, Debug, Clone)]
#[command(name = "calibrate", about = "Calorimeter energy calibration and shower reconstruction")]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand, Debug, Clone)]
enum Command {

    /// Print the calibration tables of one detector variant
    Tables {
        /// Variant name (full, hcal-si, hcal-scint, calice) or simulation tag
        variant: Variant,

        /// Read out every front hadronic layer
        #[arg(long)]
        no_concept: bool,

        /// Use the measured MIP -> GeV scale
        #[arg(long)]
        calibrate: bool,
    },

    /// Reconstruct the shower energy of every event in a hit file
    Run {
        /// TOML configuration file
        config: PathBuf,

        /// Plain-text hits: `event layer energy[MeV] time[ns] x[mm] y[mm] z[mm]`
        hits: PathBuf,

        /// Override the vertex of the configuration file, e.g. `0 mm,0 mm,-985.875 mm`
        #[arg(long, value_parser = parse_point)]
        vertex: Option<Point>,

        /// Use a single engine instead of one per rayon worker
        #[arg(long)]
        sequential: bool,

        /// Maximum number of rayon threads
        #[arg(short = 'j', long, default_value = "4")]
        num_threads: usize,

        /// Print the energies of every event
        #[arg(short, long)]
        verbose: bool,
    },
}

// --------------------------------------------------------------------------------

use std::error::Error;
use std::path::PathBuf;

use tracing_subscriber::EnvFilter;

use pfcal::{Calibration, CalibrationConfig, EventEnergies, Point, Section, Variant};
use pfcal::config::calibration::read_config_file;
use pfcal::events::{group_into_events, process_events, process_events_sequential};
use pfcal::io::read_hits;
use pfcal::utils::{group_digits, timing::Progress};
use units::mm_;

fn main() -> Result<(), Box<dyn Error>> {

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Cli::parse();

    match args.command {
        Command::Tables { variant, no_concept, calibrate } => {
            let config = CalibrationConfig::new(variant)
                .concept(!no_concept)
                .calibrate(calibrate);
            print_tables(&Calibration::new(&config));
        }
        Command::Run { config, hits, vertex, sequential, num_threads, verbose } => {
            let mut progress = Progress::new();

            progress.start("   Reading configuration");
            let file_config = read_config_file(&config)?;
            let reco = file_config.reconstruction;
            let mut calib = file_config.calibration();
            if let Some(vertex) = vertex { calib = calib.vertex(vertex) }
            progress.done();

            progress.start("   Reading hits");
            let hits = read_hits(&hits)?;
            let n_hits = hits.len();
            let events = group_into_events(hits);
            progress.done();
            println!("   {} hits in {} events", group_digits(n_hits), group_digits(events.len()));

            progress.start("   Reconstructing");
            let energies = if sequential {
                process_events_sequential(&calib, &reco, &events)
            } else {
                rayon::ThreadPoolBuilder::new().num_threads(num_threads).build_global()?;
                process_events(&calib, &reco, &events)
            };
            progress.done();

            if verbose {
                println!("{:>8} {:>6} {:>12} {:>12} {:>12} {:>10} {:>10}",
                         "event", "hits", "ECAL", "FHCAL", "BHCAL", "E [GeV]", "E_uncorr");
                for e in &energies { print_event(e) }
            }
            print_summary(&energies);
        }
    }
    Ok(())
}

fn print_tables(calib: &Calibration) {
    let config = calib.config();
    let layout = calib.layout();
    println!("variant   : {}", config.variant);
    println!("concept   : {}", config.concept);
    println!("calibrate : {}", config.calibrate);
    println!("boundaries: {:?}", layout.boundaries());
    println!();
    println!("{:>11} {:>9} {:>14}", "sub-section", "layers", "MIP/MeV");
    let b = layout.boundaries();
    for (sub, w) in calib.weights().mip_weights().iter().enumerate() {
        println!("{sub:>11} {:>9} {w:>14.6}", format!("{}..{}", b[sub], b[sub + 1]));
    }
    println!();
    println!("{:>7} {:>7} {:>12} {:>12}", "section", "layers", "GeV/MIP", "offset");
    for section in Section::ALL {
        let s = section.index();
        println!("{:>7} {:>7} {:>12.6} {:>12.6}",
                 section.name(), layout.n_layers(section), calib.gev_weight(s), calib.gev_offset(s));
    }
    println!();
    let cross = calib.cross();
    let v = cross.vertex;
    println!("HCAL -> ECAL       : {:.6} (offset {})", cross.hcal_to_ecal_factor, cross.hcal_to_ecal_offset);
    println!("back -> front HCAL : {}", cross.back_to_front_hcal_factor);
    println!("vertex [mm]        : ({}, {}, {})", mm_(v.x), mm_(v.y), mm_(v.z));
}

fn print_event(e: &EventEnergies) {
    println!("{:>8} {:>6} {:>12.3} {:>12.3} {:>12.3} {:>10.3} {:>10.3}",
             e.event, e.n_hits, e.mip.em, e.mip.front_hcal, e.mip.back_hcal, e.shower, e.uncorrected);
}

fn print_summary(energies: &[EventEnergies]) {
    if energies.is_empty() {
        println!("No events");
        return
    }
    let n = energies.len() as f64;
    let mean = energies.iter().map(|e| e.shower).sum::<f64>() / n;
    let var  = energies.iter().map(|e| (e.shower - mean).powi(2)).sum::<f64>() / n;
    println!("{} events: mean shower energy {mean:.3} GeV, rms {:.3} GeV",
             group_digits(energies.len()), var.sqrt());
}
