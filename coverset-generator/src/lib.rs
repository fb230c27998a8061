//! Seeded synthetic coverage instances for coverset.
//!
//! [`SyntheticGenerator`] implements
//! [`InstanceGenerator`](coverset_core::InstanceGenerator) over a
//! location × timestep grid. Edges are drawn independently per provider and
//! element; the [`CoverageDistribution`] decides how each provider's edge
//! probability is chosen:
//!
//! - `Bernoulli`: the configured probability for everyone;
//! - `PowerLaw`: scaled by a `Beta(exponent, 1)` draw;
//! - `LogNormal`: scaled by a `LogNormal(0, sigma)` draw;
//! - `Tiered`: a class base coverage plus normal noise, with costs derived
//!   from degree.

#![forbid(unsafe_code)]

mod config;
mod synthetic;

pub use config::{CoverageDistribution, DEFAULT_CLASSES, GeneratorConfig, ProviderClass};
pub use synthetic::SyntheticGenerator;
