//! Scalar shower metadata from the `<task>.sry` summary file.

use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::catalog::to_eev;
use crate::error::{AiresError, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShowerSummary {
    /// Primary energy in EeV.
    pub energy: f64,
    pub zenith: f64,
    pub azimuth: f64,
    pub lat: f64,
    pub lon: f64,
    /// Ground altitude in m; `km` values are converted.
    pub ground: f64,
    /// Geomagnetic field strength in uT.
    pub mag_str: f64,
    pub mag_inc: f64,
    pub mag_dec: f64,
    pub particle: Option<String>,
    pub injection: Option<f64>,
    /// Time bin size in ns.
    pub dt: Option<f64>,
    pub rindex: Option<f64>,
    pub thinning: Option<f64>,
    /// Slant depth of shower maximum in g/cm2.
    pub xmax: Option<f64>,
    pub aires_version: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Energy,
    Particle,
    Zenith,
    Azimuth,
    Site,
    Ground,
    Injection,
    MagStr,
    MagInc,
    MagDec,
    Dt,
    Rindex,
    Thinning,
    Xmax,
    Version,
}

const PATTERNS: &[(Field, &str)] = &[
    (Field::Energy, r"Primary energy:\s*(\d+\.?\d*(?:[eE][-+]?\d+)?)\s*([a-zA-Z]+)"),
    (Field::Particle, r"Primary particle:\s*([a-zA-Z]*)"),
    (Field::Zenith, r"Primary zenith angle:\s*(-?\d+\.?\d*)"),
    (Field::Azimuth, r"Primary azimuth angle:\s*(-?\d+\.?\d*)"),
    (Field::Site, r"\(Lat:\s*(-?\d+\.?\d*)\s*deg\.\s*Long:\s*(-?\d+\.?\d*)"),
    (Field::Ground, r"Ground altitude:\s*(-?\d+\.?\d*)\s*(km|m)?\b"),
    (Field::Injection, r"Injection altitude:\s*(-?\d+\.?\d*)\s*(km|m)?\b"),
    (Field::MagStr, r"Intensity:\s*(-?\d+\.?\d*)\s*uT"),
    (Field::MagInc, r"(?:^|\s)I:\s*(-?\d+\.?\d*)\s*deg"),
    (Field::MagDec, r"(?:^|\s)D:\s*(-?\d+\.?\d*)\s*deg"),
    (Field::Dt, r"Time bin size:\s*(-?\d+\.?\d*)\s*ns"),
    (Field::Rindex, r"Refraction index at sea level:\s*(-?\d+\.?\d*)"),
    (Field::Thinning, r"Thinning energy:\s*(\d+\.?\d*[eE][-+]?\d+)"),
    (Field::Xmax, r"Sl\. depth of max\. \(g/cm2\):\s*(\d+\.?\d*)"),
    (Field::Version, r"AIRES version\s*:?\s*(\d[\w.\-]*)"),
];

static SUMMARY_PATTERNS: OnceLock<Vec<(Field, Regex)>> = OnceLock::new();

fn patterns() -> &'static [(Field, Regex)] {
    SUMMARY_PATTERNS.get_or_init(|| {
        PATTERNS
            .iter()
            .map(|(field, pat)| (*field, Regex::new(pat).expect("summary pattern is valid")))
            .collect()
    })
}

#[derive(Default)]
struct Partial {
    energy: Option<f64>,
    zenith: Option<f64>,
    azimuth: Option<f64>,
    lat: Option<f64>,
    lon: Option<f64>,
    ground: Option<f64>,
    mag_str: Option<f64>,
    mag_inc: Option<f64>,
    mag_dec: Option<f64>,
    particle: Option<String>,
    injection: Option<f64>,
    dt: Option<f64>,
    rindex: Option<f64>,
    thinning: Option<f64>,
    xmax: Option<f64>,
    aires_version: Option<String>,
}

/// Reads and parses a summary file.
pub fn read_summary(path: &Path) -> Result<ShowerSummary> {
    let content = std::fs::read_to_string(path).map_err(|e| AiresError::io(path, e))?;
    parse_summary(&content, path)
}

/// Parses summary text; `path` is only used in error reports.
///
/// A field repeated on later lines overrides earlier values.
pub fn parse_summary(content: &str, path: &Path) -> Result<ShowerSummary> {
    let mut p = Partial::default();

    for (idx, line) in content.lines().enumerate() {
        let lineno = idx + 1;
        for (field, re) in patterns() {
            let Some(caps) = re.captures(line) else {
                continue;
            };
            let num = |i: usize| -> Result<f64> {
                let raw = caps.get(i).map(|m| m.as_str()).unwrap_or_default();
                raw.parse::<f64>()
                    .map_err(|_| AiresError::malformed(path, lineno, format!("not a number: {raw:?}")))
            };
            let altitude = || -> Result<f64> {
                let scale = match caps.get(2).map(|m| m.as_str()) {
                    Some("km") => 1000.0,
                    _ => 1.0,
                };
                Ok(num(1)? * scale)
            };

            match field {
                Field::Energy => {
                    let value = num(1)?;
                    let unit = &caps[2];
                    let eev = to_eev(value, unit).ok_or_else(|| {
                        AiresError::malformed(path, lineno, format!("unknown energy unit `{unit}`"))
                    })?;
                    p.energy = Some(eev);
                }
                Field::Particle => {
                    if !caps[1].is_empty() {
                        p.particle = Some(caps[1].to_lowercase());
                    }
                }
                Field::Site => {
                    p.lat = Some(num(1)?);
                    p.lon = Some(num(2)?);
                }
                Field::Version => p.aires_version = Some(caps[1].to_string()),
                Field::Zenith => p.zenith = Some(num(1)?),
                Field::Azimuth => p.azimuth = Some(num(1)?),
                Field::Ground => p.ground = Some(altitude()?),
                Field::Injection => p.injection = Some(altitude()?),
                Field::MagStr => p.mag_str = Some(num(1)?),
                Field::MagInc => p.mag_inc = Some(num(1)?),
                Field::MagDec => p.mag_dec = Some(num(1)?),
                Field::Dt => p.dt = Some(num(1)?),
                Field::Rindex => p.rindex = Some(num(1)?),
                Field::Thinning => p.thinning = Some(num(1)?),
                Field::Xmax => p.xmax = Some(num(1)?),
            }
        }
    }

    let lines = content.lines().count();
    let required = |value: Option<f64>, name: &str| -> Result<f64> {
        value.ok_or_else(|| AiresError::malformed(path, lines, format!("missing `{name}` in summary")))
    };

    Ok(ShowerSummary {
        energy: required(p.energy, "Primary energy")?,
        zenith: required(p.zenith, "Primary zenith angle")?,
        azimuth: required(p.azimuth, "Primary azimuth angle")?,
        lat: required(p.lat, "Lat")?,
        lon: required(p.lon, "Long")?,
        ground: required(p.ground, "Ground altitude")?,
        mag_str: required(p.mag_str, "Intensity")?,
        mag_inc: required(p.mag_inc, "I")?,
        mag_dec: required(p.mag_dec, "D")?,
        particle: p.particle,
        injection: p.injection,
        dt: p.dt,
        rindex: p.rindex,
        thinning: p.thinning,
        xmax: p.xmax,
        aires_version: p.aires_version,
    })
}
