//! Command catalog: typed configuration intents mapped to AIRES directive lines.
//!
//! Every constructor validates its arguments before producing a [`Directive`];
//! a failed call never yields a partial line.

mod directive;
mod particle;
mod units;

pub use directive::*;
pub use particle::PrimaryParticle;
pub use units::{energy_exponent, to_eev, Quantity};
