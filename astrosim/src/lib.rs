//! N-body gravity with photometric sensors.
//!
//! A [`Universe`] owns matter, stars and photometers. Each call to
//! [`Universe::advance`] integrates mutual gravity over one fixed step and
//! appends one flux sample per photometer, dimmed by any body transiting a
//! star's disk.

pub mod simulation;
pub mod configuration;
pub mod error;

pub use simulation::states::{Body, Matter, Star, Photometer, System, Gravitating, GravIndex, NVec3};
pub use simulation::forces::{Acceleration, NewtonianGravity, PairForce, Softening};
pub use simulation::integrator::{step, semi_implicit_euler, verlet_integrator, leapfrog};
pub use simulation::params::{Parameters, G_SI};
pub use simulation::photometry::{covered_fraction, disk_overlap_area, inverse_square, sample_flux};
pub use simulation::universe::{Phase, Universe};

pub use configuration::config::{IntegratorConfig, SofteningConfig, ParametersConfig, PhotometryConfig, UniverseConfig};

pub use error::{Error, Result};
