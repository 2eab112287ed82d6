use crate::error::{AiresError, Result};

/// Physical quantities that take a unit suffix in an AIRES directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quantity {
    Energy,
    Length,
    /// ZHAireS time-domain bin width.
    Time,
    /// CPU time limits (`MaxCpuTimePerRun`).
    CpuTime,
}

const ENERGY_UNITS: &[&str] = &["eV", "keV", "MeV", "GeV", "TeV", "PeV", "EeV", "ZeV"];
const LENGTH_UNITS: &[&str] = &["cm", "m", "km"];
const TIME_UNITS: &[&str] = &["fs", "ps", "ns", "us", "ms", "s"];
const CPU_TIME_UNITS: &[&str] = &["sec", "min", "hr", "day"];

impl Quantity {
    pub fn name(self) -> &'static str {
        match self {
            Self::Energy => "energy",
            Self::Length => "length",
            Self::Time => "time",
            Self::CpuTime => "cpu time",
        }
    }

    pub fn units(self) -> &'static [&'static str] {
        match self {
            Self::Energy => ENERGY_UNITS,
            Self::Length => LENGTH_UNITS,
            Self::Time => TIME_UNITS,
            Self::CpuTime => CPU_TIME_UNITS,
        }
    }

    /// Returns the canonical spelling of `unit`, or `InvalidUnit`.
    ///
    /// Matching is case-sensitive: `PeV` and `peV` are different prefixes.
    pub fn validate(self, unit: &str) -> Result<&'static str> {
        let unit = unit.trim();
        self.units()
            .iter()
            .copied()
            .find(|u| *u == unit)
            .ok_or_else(|| AiresError::InvalidUnit {
                quantity: self.name(),
                unit: unit.to_string(),
                allowed: self.units().join(", "),
            })
    }
}

/// Decimal exponent of an energy unit relative to eV.
pub fn energy_exponent(unit: &str) -> Option<i32> {
    match unit {
        "eV" => Some(0),
        "keV" => Some(3),
        "MeV" => Some(6),
        "GeV" => Some(9),
        "TeV" => Some(12),
        "PeV" => Some(15),
        "EeV" => Some(18),
        "ZeV" => Some(21),
        _ => None,
    }
}

/// Converts `value` expressed in `unit` to EeV.
pub fn to_eev(value: f64, unit: &str) -> Option<f64> {
    energy_exponent(unit).map(|exp| value * 10f64.powi(exp - 18))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_returns_canonical_unit() {
        assert_eq!(Quantity::Energy.validate(" EeV ").unwrap(), "EeV");
        assert_eq!(Quantity::Length.validate("km").unwrap(), "km");
        assert_eq!(Quantity::CpuTime.validate("hr").unwrap(), "hr");
    }

    #[test]
    fn validate_rejects_unknown_and_wrong_case() {
        let err = Quantity::Energy.validate("eev").unwrap_err();
        match err {
            AiresError::InvalidUnit {
                quantity, allowed, ..
            } => {
                assert_eq!(quantity, "energy");
                assert!(allowed.contains("EeV"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(Quantity::Time.validate("hr").is_err());
    }

    #[test]
    fn converts_energy_to_eev() {
        assert_eq!(to_eev(1.0, "EeV"), Some(1.0));
        assert!((to_eev(10.0, "PeV").unwrap() - 0.01).abs() < 1e-15);
        assert_eq!(to_eev(3.0, "ZeV"), Some(3000.0));
        assert_eq!(to_eev(1.0, "XeV"), None);
    }
}
