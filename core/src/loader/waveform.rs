//! Parser for the ZHAireS time-domain Fresnel output (`timefresnel-root.dat`).
//!
//! Each data line has 14 whitespace-separated fields:
//! shower, antenna, x, y, z, t, |A|, Ax, Ay, Az, |E|, Ex, Ey, Ez.
//! Lines starting with `#` and blank lines are skipped.

use std::collections::BTreeSet;
use std::path::Path;

use crate::error::{AiresError, Result};

use super::table::Sample;

pub(crate) const FIELD_COUNT: usize = 14;

const SHOWER: usize = 0;
const ANTENNA: usize = 1;
const X: usize = 2;
const Y: usize = 3;
const Z: usize = 4;
const T: usize = 5;
const EX: usize = 11;
const EY: usize = 12;
const EZ: usize = 13;

pub(crate) fn read_waveforms(path: &Path) -> Result<Vec<Sample>> {
    let content = std::fs::read_to_string(path).map_err(|e| AiresError::io(path, e))?;
    parse_waveforms(&content, path)
}

/// Parses the whole file or fails; partial tables are never returned.
pub(crate) fn parse_waveforms(content: &str, path: &Path) -> Result<Vec<Sample>> {
    let mut samples = Vec::new();
    let mut shower: Option<(f64, usize)> = None;
    let mut fields = [0.0f64; FIELD_COUNT];

    for (idx, line) in content.lines().enumerate() {
        let lineno = idx + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let mut count = 0;
        for raw in trimmed.split_whitespace() {
            if count == FIELD_COUNT {
                count += 1;
                break;
            }
            fields[count] = parse_number(raw)
                .ok_or_else(|| AiresError::malformed(path, lineno, format!("not a number: {raw:?}")))?;
            count += 1;
        }
        if count != FIELD_COUNT {
            let found = trimmed.split_whitespace().count();
            return Err(AiresError::malformed(
                path,
                lineno,
                format!("expected {FIELD_COUNT} fields, found {found}"),
            ));
        }

        match shower {
            None => shower = Some((fields[SHOWER], lineno)),
            Some((first, first_line)) if first != fields[SHOWER] => {
                return Err(AiresError::malformed(
                    path,
                    lineno,
                    format!(
                        "multiple showers: {} here, {} on line {first_line}",
                        fields[SHOWER], first
                    ),
                ));
            }
            Some(_) => {}
        }

        let antenna = fields[ANTENNA];
        if antenna < 1.0 || antenna.fract() != 0.0 || antenna > f64::from(u32::MAX) {
            return Err(AiresError::malformed(
                path,
                lineno,
                format!("invalid antenna index {antenna}"),
            ));
        }

        samples.push(Sample {
            antenna: antenna as u32,
            x: fields[X],
            y: fields[Y],
            z: fields[Z],
            t: fields[T],
            ex: fields[EX],
            ey: fields[EY],
            ez: fields[EZ],
        });
    }

    if samples.is_empty() {
        return Err(AiresError::malformed(path, 0, "no waveform samples"));
    }

    let seen: BTreeSet<u32> = samples.iter().map(|s| s.antenna).collect();
    if let Some(missing) = (1..=seen.len() as u32).find(|a| !seen.contains(a)) {
        return Err(AiresError::malformed(
            path,
            0,
            format!("antenna {missing} has no samples"),
        ));
    }

    Ok(samples)
}

/// Fortran writes exponents as `D`; accept both.
fn parse_number(raw: &str) -> Option<f64> {
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() => Some(v),
        Ok(_) => None,
        Err(_) => raw.replace(['D', 'd'], "E").parse::<f64>().ok().filter(|v| v.is_finite()),
    }
}
