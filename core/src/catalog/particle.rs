use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AiresError;

/// Primary particles AIRES accepts by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PrimaryParticle {
    Gamma,
    Electron,
    Positron,
    MuonMinus,
    MuonPlus,
    PionPlus,
    PionMinus,
    PionZero,
    KaonPlus,
    KaonMinus,
    KaonShort,
    KaonLong,
    Proton,
    Antiproton,
    Neutron,
    Antineutron,
    Helium,
    Nitrogen,
    Oxygen,
    Silicon,
    Iron,
}

// (particle, directive token, accepted aliases)
const PARTICLES: &[(PrimaryParticle, &str, &[&str])] = &[
    (PrimaryParticle::Gamma, "gamma", &["photon"]),
    (PrimaryParticle::Electron, "electron", &["e-"]),
    (PrimaryParticle::Positron, "positron", &["e+"]),
    (PrimaryParticle::MuonMinus, "mu-", &["muon"]),
    (PrimaryParticle::MuonPlus, "mu+", &[]),
    (PrimaryParticle::PionPlus, "pi+", &[]),
    (PrimaryParticle::PionMinus, "pi-", &[]),
    (PrimaryParticle::PionZero, "pi0", &[]),
    (PrimaryParticle::KaonPlus, "K+", &[]),
    (PrimaryParticle::KaonMinus, "K-", &[]),
    (PrimaryParticle::KaonShort, "K0S", &[]),
    (PrimaryParticle::KaonLong, "K0L", &[]),
    (PrimaryParticle::Proton, "proton", &["p"]),
    (PrimaryParticle::Antiproton, "pbar", &["antiproton"]),
    (PrimaryParticle::Neutron, "neutron", &["n"]),
    (PrimaryParticle::Antineutron, "nbar", &["antineutron"]),
    (PrimaryParticle::Helium, "Helium", &["He", "He^4", "alpha"]),
    (PrimaryParticle::Nitrogen, "Nitrogen", &["N^14"]),
    (PrimaryParticle::Oxygen, "Oxygen", &["O", "O^16"]),
    (PrimaryParticle::Silicon, "Silicon", &["Si", "Si^28"]),
    (PrimaryParticle::Iron, "Iron", &["Fe", "Fe^56"]),
];

impl PrimaryParticle {
    /// The token written after `PrimaryParticle`.
    pub fn directive_name(self) -> &'static str {
        PARTICLES
            .iter()
            .find(|(p, _, _)| *p == self)
            .map(|(_, name, _)| *name)
            .unwrap_or("proton")
    }

    pub fn all() -> impl Iterator<Item = PrimaryParticle> {
        PARTICLES.iter().map(|(p, _, _)| *p)
    }
}

impl fmt::Display for PrimaryParticle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.directive_name())
    }
}

impl FromStr for PrimaryParticle {
    type Err = AiresError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        PARTICLES
            .iter()
            .find(|(_, name, aliases)| {
                name.eq_ignore_ascii_case(wanted)
                    || aliases.iter().any(|a| a.eq_ignore_ascii_case(wanted))
            })
            .map(|(p, _, _)| *p)
            .ok_or_else(|| {
                let known: Vec<&str> = PARTICLES.iter().map(|(_, name, _)| *name).collect();
                AiresError::invalid(
                    "primary particle",
                    wanted,
                    format!("expected one of: {}", known.join(", ")),
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_names_and_aliases_case_insensitively() {
        assert_eq!("proton".parse::<PrimaryParticle>().unwrap(), PrimaryParticle::Proton);
        assert_eq!("PROTON".parse::<PrimaryParticle>().unwrap(), PrimaryParticle::Proton);
        assert_eq!("Fe^56".parse::<PrimaryParticle>().unwrap(), PrimaryParticle::Iron);
        assert_eq!("e-".parse::<PrimaryParticle>().unwrap(), PrimaryParticle::Electron);
    }

    #[test]
    fn every_particle_round_trips_through_its_directive_name() {
        for p in PrimaryParticle::all() {
            assert_eq!(p.directive_name().parse::<PrimaryParticle>().unwrap(), p);
        }
    }

    #[test]
    fn rejects_unknown_particles() {
        let err = "graviton".parse::<PrimaryParticle>().unwrap_err();
        assert!(matches!(err, AiresError::InvalidParameter { name: "primary particle", .. }));
    }
}
