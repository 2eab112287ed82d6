use std::fmt;

use serde::{Deserialize, Serialize};

use super::particle::PrimaryParticle;
use super::units::Quantity;
use crate::error::{AiresError, Result};

/// One line of AIRES input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Directive(String);

impl Directive {
    /// Wraps free text without any validation.
    pub fn raw(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn keyword(&self) -> &str {
        self.0.split_whitespace().next().unwrap_or("")
    }
}

impl fmt::Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Renders a float the way AIRES reads it: always with a decimal point.
pub fn number(v: f64) -> String {
    if v.fract() == 0.0 && v.abs() < 1e16 {
        format!("{v:.1}")
    } else if v.abs() >= 1e16 || (v != 0.0 && v.abs() < 1e-6) {
        format!("{v:e}")
    } else {
        format!("{v}")
    }
}

fn on_off(enabled: bool) -> &'static str {
    if enabled {
        "On"
    } else {
        "Off"
    }
}

fn finite(name: &'static str, v: f64) -> Result<f64> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(AiresError::invalid(name, v, "must be a finite number"))
    }
}

fn positive(name: &'static str, v: f64) -> Result<f64> {
    if finite(name, v)? > 0.0 {
        Ok(v)
    } else {
        Err(AiresError::invalid(name, v, "must be greater than zero"))
    }
}

fn at_least_one(name: &'static str, n: u32) -> Result<u32> {
    if n >= 1 {
        Ok(n)
    } else {
        Err(AiresError::invalid(name, n, "must be at least 1"))
    }
}

fn point(name: &'static str, p: (f64, f64, f64)) -> Result<String> {
    Ok(format!(
        "{} {} {}",
        number(finite(name, p.0)?),
        number(finite(name, p.1)?),
        number(finite(name, p.2)?)
    ))
}

fn single_token(name: &'static str, s: &str) -> Result<String> {
    let s = s.trim();
    if s.is_empty() || s.contains(char::is_whitespace) {
        return Err(AiresError::invalid(name, s, "must be a single non-empty word"));
    }
    Ok(s.to_string())
}

/// Amount of per-shower data AIRES keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PerShowerData {
    Full,
    Brief,
    None,
}

impl std::str::FromStr for PerShowerData {
    type Err = AiresError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "Full" => Ok(Self::Full),
            "Brief" => Ok(Self::Brief),
            "None" => Ok(Self::None),
            other => Err(AiresError::invalid(
                "per shower data",
                other,
                "expected one of: Full, Brief, None",
            )),
        }
    }
}

impl PerShowerData {
    fn as_str(self) -> &'static str {
        match self {
            Self::Full => "Full",
            Self::Brief => "Brief",
            Self::None => "None",
        }
    }
}

const FILE_SCOPES: &[&str] = &["All", "Global", "Scratch", "Export"];

pub fn task_name(name: &str) -> Result<Directive> {
    let name = single_token("task name", name)?;
    if name.contains(['/', '\\']) {
        return Err(AiresError::invalid("task name", name, "must not contain path separators"));
    }
    if name == "." || name == ".." {
        return Err(AiresError::invalid("task name", name, "must not name a relative directory"));
    }
    Ok(Directive(format!("TaskName {name}")))
}

pub fn total_showers(n: u32) -> Result<Directive> {
    Ok(Directive(format!("TotalShowers {}", at_least_one("total showers", n)?)))
}

pub fn showers_per_run(n: u32) -> Result<Directive> {
    Ok(Directive(format!("ShowersPerRun {}", at_least_one("showers per run", n)?)))
}

pub fn runs_per_process(n: u32) -> Result<Directive> {
    Ok(Directive(format!("RunsPerProcess {}", at_least_one("runs per process", n)?)))
}

pub fn max_cpu_time_per_run(time: f64, unit: &str) -> Result<Directive> {
    let unit = Quantity::CpuTime.validate(unit)?;
    let time = positive("max cpu time per run", time)?;
    Ok(Directive(format!("MaxCpuTimePerRun {} {unit}", number(time))))
}

pub fn primary_particle(particle: &str) -> Result<Directive> {
    let particle: PrimaryParticle = particle.parse()?;
    Ok(Directive(format!("PrimaryParticle {particle}")))
}

pub fn primary_energy(energy: f64, unit: &str) -> Result<Directive> {
    let unit = Quantity::Energy.validate(unit)?;
    let energy = positive("primary energy", energy)?;
    Ok(Directive(format!("PrimaryEnergy {} {unit}", number(energy))))
}

pub fn primary_zenith(zenith: f64) -> Result<Directive> {
    let zenith = finite("primary zenith", zenith)?;
    if !(0.0..=90.0).contains(&zenith) {
        return Err(AiresError::invalid("primary zenith", zenith, "must be within [0, 90] deg"));
    }
    Ok(Directive(format!("PrimaryZenAngle {} deg", number(zenith))))
}

pub fn primary_azimuth(azimuth: f64, geographic: bool) -> Result<Directive> {
    let azimuth = finite("primary azimuth", azimuth)?;
    let suffix = if geographic { " Geographic" } else { "" };
    Ok(Directive(format!("PrimaryAzimAngle {} deg{suffix}", number(azimuth))))
}

pub fn injection_altitude(altitude: f64, unit: &str) -> Result<Directive> {
    let unit = Quantity::Length.validate(unit)?;
    let altitude = finite("injection altitude", altitude)?;
    Ok(Directive(format!("InjectionAltitude {} {unit}", number(altitude))))
}

pub fn ground_altitude(altitude: f64, unit: &str) -> Result<Directive> {
    let unit = Quantity::Length.validate(unit)?;
    let altitude = finite("ground altitude", altitude)?;
    Ok(Directive(format!("GroundAltitude {} {unit}", number(altitude))))
}

pub fn site(name: &str) -> Result<Directive> {
    Ok(Directive(format!("Site {}", single_token("site", name)?)))
}

pub fn add_site(name: &str, lat: f64, lon: f64, alt: f64, unit: &str) -> Result<Directive> {
    let name = single_token("site", name)?;
    let unit = Quantity::Length.validate(unit)?;
    let lat = finite("site latitude", lat)?;
    if !(-90.0..=90.0).contains(&lat) {
        return Err(AiresError::invalid("site latitude", lat, "must be within [-90, 90] deg"));
    }
    let lon = finite("site longitude", lon)?;
    let alt = finite("site altitude", alt)?;
    Ok(Directive(format!(
        "AddSite {name} {} deg {} deg {} {unit}",
        number(lat),
        number(lon),
        number(alt)
    )))
}

pub fn geomagnetic_field(strength_nt: f64, inclination: f64, declination: f64) -> Result<Directive> {
    let strength = finite("geomagnetic field", strength_nt)?;
    let inclination = finite("geomagnetic inclination", inclination)?;
    let declination = finite("geomagnetic declination", declination)?;
    Ok(Directive(format!(
        "GeomagneticField {} nT {} deg {} deg",
        number(strength),
        number(inclination),
        number(declination)
    )))
}

pub fn thinning_energy(energy: f64, unit: &str) -> Result<Directive> {
    let unit = Quantity::Energy.validate(unit)?;
    let energy = positive("thinning energy", energy)?;
    Ok(Directive(format!("ThinningEnergy {} {unit}", number(energy))))
}

/// Thinning energy as a fraction of the primary energy.
pub fn relative_thinning_energy(fraction: f64) -> Result<Directive> {
    let fraction = positive("relative thinning energy", fraction)?;
    if fraction >= 1.0 {
        return Err(AiresError::invalid(
            "relative thinning energy",
            fraction,
            "must be below 1",
        ));
    }
    Ok(Directive(format!("ThinningEnergy {} Relative", number(fraction))))
}

pub fn thinning_w_factor(factor: f64) -> Result<Directive> {
    let factor = positive("thinning weight factor", factor)?;
    Ok(Directive(format!("ThinningWFactor {}", number(factor))))
}

/// Fractional year used by the IGRF field model, e.g. `2016.943`.
pub fn date(year: f64) -> Result<Directive> {
    let year = positive("date", year)?;
    Ok(Directive(format!("Date {}", number(year))))
}

pub fn per_shower_data(level: PerShowerData) -> Directive {
    Directive(format!("PerShowerData {}", level.as_str()))
}

pub fn zhaires(enabled: bool) -> Directive {
    Directive(format!("ZHAireS {}", on_off(enabled)))
}

pub fn fresnel_time(enabled: bool) -> Directive {
    Directive(format!("FresnelTime {}", on_off(enabled)))
}

pub fn fresnel_freq(enabled: bool) -> Directive {
    Directive(format!("FresnelFreq {}", on_off(enabled)))
}

pub fn time_domain_bin(width: f64, unit: &str) -> Result<Directive> {
    let unit = Quantity::Time.validate(unit)?;
    let width = positive("time domain bin", width)?;
    Ok(Directive(format!("TimeDomainBin {} {unit}", number(width))))
}

pub fn include_hadrons(enabled: bool) -> Directive {
    Directive(format!("IncludeHadrons {}", on_off(enabled)))
}

/// Single antenna at (x, y, z) in metres.
pub fn add_antenna(x: f64, y: f64, z: f64) -> Result<Directive> {
    Ok(Directive(format!("AddAntenna {}", point("antenna position", (x, y, z))?)))
}

pub fn add_line_antenna(start: (f64, f64, f64), end: (f64, f64, f64), count: u32) -> Result<Directive> {
    let count = at_least_one("antenna count", count)?;
    Ok(Directive(format!(
        "AddAntenna Line {} {} {count}",
        point("antenna line start", start)?,
        point("antenna line end", end)?
    )))
}

pub fn add_ring_antenna(origin: (f64, f64, f64), radius: f64, phi0: f64, count: u32) -> Result<Directive> {
    let count = at_least_one("antenna count", count)?;
    let radius = positive("antenna ring radius", radius)?;
    let phi0 = finite("antenna ring phi0", phi0)?;
    Ok(Directive(format!(
        "AddAntenna Ring {} {} {} {count}",
        point("antenna ring origin", origin)?,
        number(radius),
        number(phi0)
    )))
}

pub fn delete_antennas() -> Directive {
    Directive("AddAntenna None".to_string())
}

pub fn random_seed(seed: f64) -> Result<Directive> {
    let seed = finite("random seed", seed)?;
    if !(0.0..1.0).contains(&seed) {
        return Err(AiresError::invalid("random seed", seed, "must be within [0, 1)"));
    }
    Ok(Directive(format!("RandomSeed {}", number(seed))))
}

pub fn file_directory(directory: &str, scope: &str) -> Result<Directive> {
    let scope = FILE_SCOPES
        .iter()
        .copied()
        .find(|s| *s == scope.trim())
        .ok_or_else(|| {
            AiresError::invalid(
                "file directory scope",
                scope,
                format!("expected one of: {}", FILE_SCOPES.join(", ")),
            )
        })?;
    let directory = single_token("file directory", directory)?;
    Ok(Directive(format!("FileDirectory {scope} {directory}")))
}

pub fn summary(enabled: bool) -> Directive {
    Directive(format!("Summary {}", on_off(enabled)))
}

pub fn remark(text: &str) -> Result<Directive> {
    if text.contains(['\n', '\r']) {
        return Err(AiresError::invalid("remark", text, "must fit on one line"));
    }
    Ok(Directive(format!("Remark {}", text.trim())))
}
