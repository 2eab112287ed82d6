use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{AiresError, Result};

use super::summary::ShowerSummary;

/// Named columns of a [`WaveformTable`]. The last nine are broadcast from the
/// shower summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Column {
    Antenna,
    X,
    Y,
    Z,
    T,
    Ex,
    Ey,
    Ez,
    Energy,
    Zenith,
    Azimuth,
    Lat,
    Lon,
    Ground,
    MagStr,
    MagInc,
    MagDec,
}

impl Column {
    pub const ALL: [Column; 17] = [
        Column::Antenna,
        Column::X,
        Column::Y,
        Column::Z,
        Column::T,
        Column::Ex,
        Column::Ey,
        Column::Ez,
        Column::Energy,
        Column::Zenith,
        Column::Azimuth,
        Column::Lat,
        Column::Lon,
        Column::Ground,
        Column::MagStr,
        Column::MagInc,
        Column::MagDec,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Column::Antenna => "antenna",
            Column::X => "x",
            Column::Y => "y",
            Column::Z => "z",
            Column::T => "t",
            Column::Ex => "ex",
            Column::Ey => "ey",
            Column::Ez => "ez",
            Column::Energy => "energy",
            Column::Zenith => "zenith",
            Column::Azimuth => "azimuth",
            Column::Lat => "lat",
            Column::Lon => "lon",
            Column::Ground => "ground",
            Column::MagStr => "mag_str",
            Column::MagInc => "mag_inc",
            Column::MagDec => "mag_dec",
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Column {
    type Err = AiresError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_lowercase();
        Column::ALL
            .into_iter()
            .find(|c| c.name() == wanted)
            .ok_or_else(|| AiresError::invalid("column", s, "unknown column"))
    }
}

/// One parsed line of the waveform file.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Sample {
    pub antenna: u32,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub t: f64,
    pub ex: f64,
    pub ey: f64,
    pub ez: f64,
}

/// A single (antenna, time sample) row with the summary columns attached.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WaveformRow {
    pub antenna: u32,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub t: f64,
    pub ex: f64,
    pub ey: f64,
    pub ez: f64,
    pub energy: f64,
    pub zenith: f64,
    pub azimuth: f64,
    pub lat: f64,
    pub lon: f64,
    pub ground: f64,
    pub mag_str: f64,
    pub mag_inc: f64,
    pub mag_dec: f64,
}

/// Equal-length electric field traces for one antenna.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AntennaTraces {
    pub antenna: u32,
    pub position: (f64, f64, f64),
    pub t: Vec<f64>,
    pub ex: Vec<f64>,
    pub ey: Vec<f64>,
    pub ez: Vec<f64>,
}

/// Columnar waveform data for one simulated shower.
///
/// Rows are grouped by antenna in ascending order and keep file order within
/// an antenna.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaveformTable {
    summary: ShowerSummary,
    antenna: Vec<u32>,
    x: Vec<f64>,
    y: Vec<f64>,
    z: Vec<f64>,
    t: Vec<f64>,
    ex: Vec<f64>,
    ey: Vec<f64>,
    ez: Vec<f64>,
}

impl WaveformTable {
    pub(crate) fn from_samples(summary: ShowerSummary, mut samples: Vec<Sample>) -> Self {
        // stable: file order survives within an antenna
        samples.sort_by_key(|s| s.antenna);

        let n = samples.len();
        let mut table = Self {
            summary,
            antenna: Vec::with_capacity(n),
            x: Vec::with_capacity(n),
            y: Vec::with_capacity(n),
            z: Vec::with_capacity(n),
            t: Vec::with_capacity(n),
            ex: Vec::with_capacity(n),
            ey: Vec::with_capacity(n),
            ez: Vec::with_capacity(n),
        };
        for s in samples {
            table.antenna.push(s.antenna);
            table.x.push(s.x);
            table.y.push(s.y);
            table.z.push(s.z);
            table.t.push(s.t);
            table.ex.push(s.ex);
            table.ey.push(s.ey);
            table.ez.push(s.ez);
        }
        table
    }

    /// True when every per-row column has one value per row.
    pub(crate) fn is_consistent(&self) -> bool {
        let n = self.antenna.len();
        [&self.x, &self.y, &self.z, &self.t, &self.ex, &self.ey, &self.ez]
            .iter()
            .all(|c| c.len() == n)
            && self.antenna.windows(2).all(|w| w[0] <= w[1])
    }

    pub fn summary(&self) -> &ShowerSummary {
        &self.summary
    }

    pub fn len(&self) -> usize {
        self.antenna.len()
    }

    pub fn is_empty(&self) -> bool {
        self.antenna.is_empty()
    }

    /// Distinct antenna indices, ascending.
    pub fn antennas(&self) -> Vec<u32> {
        let mut ids = self.antenna.clone();
        ids.dedup();
        ids
    }

    pub fn n_antennas(&self) -> usize {
        self.antennas().len()
    }

    pub fn antenna_column(&self) -> &[u32] {
        &self.antenna
    }

    /// Values of `column` for every row; summary columns are repeated.
    pub fn column(&self, column: Column) -> Vec<f64> {
        let broadcast = |v: f64| vec![v; self.len()];
        let s = &self.summary;
        match column {
            Column::Antenna => self.antenna.iter().map(|&a| f64::from(a)).collect(),
            Column::X => self.x.clone(),
            Column::Y => self.y.clone(),
            Column::Z => self.z.clone(),
            Column::T => self.t.clone(),
            Column::Ex => self.ex.clone(),
            Column::Ey => self.ey.clone(),
            Column::Ez => self.ez.clone(),
            Column::Energy => broadcast(s.energy),
            Column::Zenith => broadcast(s.zenith),
            Column::Azimuth => broadcast(s.azimuth),
            Column::Lat => broadcast(s.lat),
            Column::Lon => broadcast(s.lon),
            Column::Ground => broadcast(s.ground),
            Column::MagStr => broadcast(s.mag_str),
            Column::MagInc => broadcast(s.mag_inc),
            Column::MagDec => broadcast(s.mag_dec),
        }
    }

    pub fn row(&self, i: usize) -> Option<WaveformRow> {
        if i >= self.len() {
            return None;
        }
        let s = &self.summary;
        Some(WaveformRow {
            antenna: self.antenna[i],
            x: self.x[i],
            y: self.y[i],
            z: self.z[i],
            t: self.t[i],
            ex: self.ex[i],
            ey: self.ey[i],
            ez: self.ez[i],
            energy: s.energy,
            zenith: s.zenith,
            azimuth: s.azimuth,
            lat: s.lat,
            lon: s.lon,
            ground: s.ground,
            mag_str: s.mag_str,
            mag_inc: s.mag_inc,
            mag_dec: s.mag_dec,
        })
    }

    pub fn rows(&self) -> impl Iterator<Item = WaveformRow> + '_ {
        (0..self.len()).filter_map(move |i| self.row(i))
    }

    /// Splits the table into one trace set per antenna.
    ///
    /// Every trace gets `ceil(rows / antennas)` samples: shorter antennas are
    /// zero-padded at the end, longer ones are cut.
    pub fn antenna_traces(&self) -> Vec<AntennaTraces> {
        let n_ant = self.n_antennas();
        if n_ant == 0 {
            return Vec::new();
        }
        let width = self.len().div_ceil(n_ant);

        let mut out: Vec<AntennaTraces> = Vec::with_capacity(n_ant);
        let mut start = 0;
        while start < self.len() {
            let id = self.antenna[start];
            let end = start + self.antenna[start..].iter().take_while(|&&a| a == id).count();

            let fit = |col: &[f64]| {
                let mut v: Vec<f64> = col[start..end].iter().copied().take(width).collect();
                v.resize(width, 0.0);
                v
            };
            out.push(AntennaTraces {
                antenna: id,
                position: (self.x[start], self.y[start], self.z[start]),
                t: fit(&self.t),
                ex: fit(&self.ex),
                ey: fit(&self.ey),
                ez: fit(&self.ez),
            });
            start = end;
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn summary() -> ShowerSummary {
        ShowerSummary {
            energy: 1.0,
            zenith: 53.44,
            azimuth: 0.0,
            lat: -35.2,
            lon: -69.2,
            ground: 1400.0,
            mag_str: 24.6,
            mag_inc: -35.7,
            mag_dec: 2.5,
            particle: Some("proton".into()),
            injection: None,
            dt: Some(0.5),
            rindex: None,
            thinning: None,
            xmax: None,
            aires_version: None,
        }
    }

    fn sample(antenna: u32, t: f64) -> Sample {
        Sample {
            antenna,
            x: f64::from(antenna) * 100.0,
            y: 0.0,
            z: 0.0,
            t,
            ex: t * 2.0,
            ey: 0.0,
            ez: 0.0,
        }
    }

    #[test]
    fn groups_rows_by_antenna_keeping_file_order() {
        let table = WaveformTable::from_samples(
            summary(),
            vec![sample(2, 0.0), sample(1, 0.0), sample(2, 0.5), sample(1, 0.5)],
        );
        assert_eq!(table.antenna_column(), &[1, 1, 2, 2]);
        assert_eq!(table.column(Column::T), vec![0.0, 0.5, 0.0, 0.5]);
        assert_eq!(table.n_antennas(), 2);
    }

    #[test]
    fn summary_columns_are_broadcast() {
        let table = WaveformTable::from_samples(summary(), vec![sample(1, 0.0), sample(1, 0.5)]);
        assert_eq!(table.column(Column::Zenith), vec![53.44, 53.44]);
        let row = table.row(1).unwrap();
        assert_eq!(row.mag_dec, 2.5);
        assert_eq!(row.ex, 1.0);
        assert!(table.row(2).is_none());
    }

    #[test]
    fn rows_follow_sorted_order() {
        let table = WaveformTable::from_samples(summary(), vec![sample(2, 0.0), sample(1, 0.5)]);
        let rows: Vec<(u32, f64, f64)> = table.rows().map(|r| (r.antenna, r.t, r.zenith)).collect();
        assert_eq!(rows, vec![(1, 0.5, 53.44), (2, 0.0, 53.44)]);
    }

    #[test]
    fn traces_are_padded_or_cut_to_common_length() {
        let table = WaveformTable::from_samples(
            summary(),
            vec![
                sample(1, 0.0),
                sample(1, 0.5),
                sample(1, 1.0),
                sample(1, 1.5),
                sample(2, 0.0),
            ],
        );
        let traces = table.antenna_traces();
        assert_eq!(traces.len(), 2);
        // ceil(5 / 2) = 3
        assert_eq!(traces[0].t, vec![0.0, 0.5, 1.0]);
        assert_eq!(traces[1].t, vec![0.0, 0.0, 0.0]);
        assert_eq!(traces[1].position, (200.0, 0.0, 0.0));
    }

    #[test]
    fn column_names_parse() {
        assert_eq!("mag_str".parse::<Column>().unwrap(), Column::MagStr);
        assert_eq!("EX".parse::<Column>().unwrap(), Column::Ex);
        assert!("voltage".parse::<Column>().is_err());
    }
}
