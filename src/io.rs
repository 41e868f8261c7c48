//! Plain-text hit files.
//!
//! One hit per line: `event layer energy time x y z`, with energy in MeV, time
//! in ns and positions in mm. Blank lines and lines starting with `#` are
//! skipped.

use std::fs;
use std::io::Write;
use std::path::Path;

use geometry::Point;
use units::{mm, mm_, ns, ns_};

use crate::error::{Error, Result};
use crate::layout::Layer;
use crate::types::{EventId, Hit};

pub fn parse_hit(s: &str) -> std::result::Result<Hit, String> {
    let n = s.split_whitespace().collect::<Vec<_>>();
    if n.len() != 7 {
        return Err(format!("expected 7 fields, found {}", n.len()))
    }
    let float = |i: usize, name: &str| n[i].parse::<f64>()
        .map_err(|e| format!("{name} `{}`: {e}", n[i]));
    let event = n[0].parse::<EventId>().map_err(|e| format!("event `{}`: {e}", n[0]))?;
    let layer = n[1].parse::<Layer>().map_err(|e| format!("layer `{}`: {e}", n[1]))?;
    let energy = float(2, "energy")?;
    let time   = ns(float(3, "time")?);
    let x = mm(float(4, "x")?);
    let y = mm(float(5, "y")?);
    let z = mm(float(6, "z")?);
    Ok(Hit { event, layer, energy, time, position: Point::new(x, y, z) })
}

pub fn parse_hits(text: &str) -> Result<Vec<Hit>> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty() && !line.trim_start().starts_with('#'))
        .map(|(i, line)| parse_hit(line).map_err(|reason| Error::HitParse { line: i + 1, reason }))
        .collect()
}

pub fn read_hits(path: &Path) -> Result<Vec<Hit>> {
    let text = fs::read_to_string(path)
        .map_err(|source| Error::Read { path: path.into(), source })?;
    parse_hits(&text)
}

pub fn write_hits<'h>(hits: impl IntoIterator<Item = &'h Hit>, path: &Path) -> std::io::Result<()> {
    let mut file = std::io::BufWriter::new(fs::File::create(path)?);
    writeln!(file, "# event layer energy[MeV] time[ns] x[mm] y[mm] z[mm]")?;
    for Hit { event, layer, energy, time, position: p } in hits {
        writeln!(file, "{event} {layer} {energy} {} {} {} {}",
                 ns_(*time), mm_(p.x), mm_(p.y), mm_(p.z))?;
    }
    file.flush()
}
