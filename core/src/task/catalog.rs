//! Named configuration intents on [`Task`]. Each appends exactly one directive
//! on success and leaves the task untouched on error.

use crate::catalog::{self, PerShowerData};
use crate::error::Result;

use super::builder::Task;

type Point = (f64, f64, f64);

impl Task {
    pub fn total_showers(&mut self, n: u32) -> Result<&mut Self> {
        self.push(catalog::total_showers(n)?)
    }

    pub fn showers_per_run(&mut self, n: u32) -> Result<&mut Self> {
        self.push(catalog::showers_per_run(n)?)
    }

    pub fn runs_per_process(&mut self, n: u32) -> Result<&mut Self> {
        self.push(catalog::runs_per_process(n)?)
    }

    /// `unit` is one of `sec`, `min`, `hr`, `day`.
    pub fn max_cpu_time_per_run(&mut self, time: f64, unit: &str) -> Result<&mut Self> {
        self.push(catalog::max_cpu_time_per_run(time, unit)?)
    }

    pub fn primary_particle(&mut self, particle: &str) -> Result<&mut Self> {
        self.push(catalog::primary_particle(particle)?)
    }

    pub fn primary_energy(&mut self, energy: f64, unit: &str) -> Result<&mut Self> {
        self.push(catalog::primary_energy(energy, unit)?)
    }

    pub fn primary_zenith(&mut self, zenith: f64) -> Result<&mut Self> {
        self.push(catalog::primary_zenith(zenith)?)
    }

    /// Magnetic azimuth unless `geographic`.
    pub fn primary_azimuth(&mut self, azimuth: f64, geographic: bool) -> Result<&mut Self> {
        self.push(catalog::primary_azimuth(azimuth, geographic)?)
    }

    pub fn injection_altitude(&mut self, altitude: f64, unit: &str) -> Result<&mut Self> {
        self.push(catalog::injection_altitude(altitude, unit)?)
    }

    pub fn ground_altitude(&mut self, altitude: f64, unit: &str) -> Result<&mut Self> {
        self.push(catalog::ground_altitude(altitude, unit)?)
    }

    pub fn site(&mut self, name: &str) -> Result<&mut Self> {
        self.push(catalog::site(name)?)
    }

    pub fn add_site(&mut self, name: &str, lat: f64, lon: f64, alt: f64, unit: &str) -> Result<&mut Self> {
        self.push(catalog::add_site(name, lat, lon, alt, unit)?)
    }

    /// Field strength in nT, inclination and declination in degrees.
    pub fn geomagnetic_field(&mut self, strength: f64, inclination: f64, declination: f64) -> Result<&mut Self> {
        self.push(catalog::geomagnetic_field(strength, inclination, declination)?)
    }

    pub fn thinning_energy(&mut self, energy: f64, unit: &str) -> Result<&mut Self> {
        self.push(catalog::thinning_energy(energy, unit)?)
    }

    pub fn relative_thinning_energy(&mut self, fraction: f64) -> Result<&mut Self> {
        self.push(catalog::relative_thinning_energy(fraction)?)
    }

    pub fn thinning_w_factor(&mut self, factor: f64) -> Result<&mut Self> {
        self.push(catalog::thinning_w_factor(factor)?)
    }

    pub fn date(&mut self, year: f64) -> Result<&mut Self> {
        self.push(catalog::date(year)?)
    }

    pub fn per_shower_data(&mut self, level: PerShowerData) -> Result<&mut Self> {
        self.push(catalog::per_shower_data(level))
    }

    pub fn zhaires(&mut self, enabled: bool) -> Result<&mut Self> {
        self.push(catalog::zhaires(enabled))
    }

    pub fn fresnel_time(&mut self, enabled: bool) -> Result<&mut Self> {
        self.push(catalog::fresnel_time(enabled))
    }

    pub fn fresnel_freq(&mut self, enabled: bool) -> Result<&mut Self> {
        self.push(catalog::fresnel_freq(enabled))
    }

    pub fn time_domain_bin(&mut self, width: f64, unit: &str) -> Result<&mut Self> {
        self.push(catalog::time_domain_bin(width, unit)?)
    }

    pub fn include_hadrons(&mut self, enabled: bool) -> Result<&mut Self> {
        self.push(catalog::include_hadrons(enabled))
    }

    pub fn add_antenna(&mut self, x: f64, y: f64, z: f64) -> Result<&mut Self> {
        self.push(catalog::add_antenna(x, y, z)?)
    }

    pub fn add_line_antenna(&mut self, start: Point, end: Point, count: u32) -> Result<&mut Self> {
        self.push(catalog::add_line_antenna(start, end, count)?)
    }

    pub fn add_ring_antenna(&mut self, origin: Point, radius: f64, phi0: f64, count: u32) -> Result<&mut Self> {
        self.push(catalog::add_ring_antenna(origin, radius, phi0, count)?)
    }

    pub fn delete_antennas(&mut self) -> Result<&mut Self> {
        self.push(catalog::delete_antennas())
    }

    pub fn random_seed(&mut self, seed: f64) -> Result<&mut Self> {
        self.push(catalog::random_seed(seed)?)
    }

    pub fn file_directory(&mut self, directory: &str, scope: &str) -> Result<&mut Self> {
        self.push(catalog::file_directory(directory, scope)?)
    }

    pub fn summary(&mut self, enabled: bool) -> Result<&mut Self> {
        self.push(catalog::summary(enabled))
    }

    pub fn remark(&mut self, text: &str) -> Result<&mut Self> {
        self.push(catalog::remark(text)?)
    }
}
