//! Configuration types for loading simulation settings from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of the
//! numerical settings a [`Universe`](crate::Universe) runs with:
//!
//! - [`ParametersConfig`]  – step size, physical constants, softening, integrator
//! - [`PhotometryConfig`]  – photometer sample retention
//! - [`UniverseConfig`]    – top-level wrapper loaded from YAML
//!
//! Scene contents (bodies, stars, photometers) are not part of the
//! configuration; they are added through the construction API.
//!
//! # YAML format
//! Every field is optional and falls back to its default:
//!
//! ```yaml
//! parameters:
//!   h0: 1.0                        # fixed step size
//!   G: 6.674e-11                   # gravitational constant
//!   eps2: 1.0e-6                   # softening epsilon^2
//!   softening: "plummer"           # or "body_radius", "none"
//!   integrator: "semi_implicit_euler"  # or "verlet", "leapfrog"
//!
//! photometry:
//!   max_samples: 10000             # keep only the latest samples; omit for unbounded
//! ```

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::Result;
use crate::simulation::params::{Parameters, DEFAULT_EPS2, G_SI};

/// Which integrator the engine advances bodies with
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IntegratorConfig {
    #[default]
    #[serde(rename = "semi_implicit_euler")] // kick then drift, one force evaluation
    SemiImplicitEuler,

    #[serde(rename = "verlet")] // velocity Verlet, two force evaluations
    Verlet,

    #[serde(rename = "leapfrog")] // drift-kick-drift, one force evaluation
    Leapfrog,
}

/// Close-encounter regularisation
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum SofteningConfig {
    #[default]
    Plummer,
    BodyRadius,
    None,
}

/// Global numerical and physical parameters
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct ParametersConfig {
    pub h0: f64, // time step size
    #[serde(rename = "G")]
    pub g: f64, // gravitational constant
    pub eps2: f64, // softening - prevent singular forces at very small separations
    pub softening: SofteningConfig,
    pub integrator: IntegratorConfig,
}

impl Default for ParametersConfig {
    fn default() -> Self {
        Self {
            h0: 1.0,
            g: G_SI,
            eps2: DEFAULT_EPS2,
            softening: SofteningConfig::default(),
            integrator: IntegratorConfig::default(),
        }
    }
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct PhotometryConfig {
    pub max_samples: Option<usize>,
}

/// Top-level configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct UniverseConfig {
    pub parameters: ParametersConfig,
    pub photometry: PhotometryConfig,
}

impl UniverseConfig {
    pub fn from_yaml_str(src: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(src)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_yaml_str(&text)
    }

    /// Map to validated runtime parameters
    pub fn to_parameters(&self) -> Result<Parameters> {
        let p = &self.parameters;
        let parameters = Parameters {
            h0: p.h0,
            g: p.g,
            softening: Parameters::softening_from(p.softening, p.eps2),
            integrator: p.integrator,
            max_samples: self.photometry.max_samples,
        };
        parameters.validate()?;
        Ok(parameters)
    }
}
