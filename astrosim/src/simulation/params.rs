//! Numerical and physical parameters for the simulation
//!
//! `Parameters` holds runtime settings:
//! - integration step size,
//! - gravitational constant and softening (`G`, `eps2`, policy),
//! - integrator selection,
//! - photometer sample window

use crate::configuration::config::{IntegratorConfig, SofteningConfig};
use crate::error::{Error, Result};
use crate::simulation::forces::Softening;

/// Newtonian constant of gravitation (m^3 kg^-1 s^-2)
pub const G_SI: f64 = 6.674e-11;

pub const DEFAULT_EPS2: f64 = 1.0e-6;

#[derive(Debug, Clone)]
pub struct Parameters {
    pub h0: f64, // step size
    pub g: f64, // gravitational constant
    pub softening: Softening,
    pub integrator: IntegratorConfig,
    pub max_samples: Option<usize>, // photometer window, None = unbounded
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            h0: 1.0,
            g: G_SI,
            softening: Softening::Plummer { eps2: DEFAULT_EPS2 },
            integrator: IntegratorConfig::SemiImplicitEuler,
            max_samples: None,
        }
    }
}

impl Parameters {
    /// Build runtime softening from its config representation.
    pub fn softening_from(kind: SofteningConfig, eps2: f64) -> Softening {
        match kind {
            SofteningConfig::Plummer => Softening::Plummer { eps2 },
            SofteningConfig::BodyRadius => Softening::BodyRadius { eps2 },
            SofteningConfig::None => Softening::None,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.h0.is_finite() && self.h0 > 0.0) {
            return Err(Error::invalid(format!("time step h0 must be finite and > 0, got {}", self.h0)));
        }
        if !(self.g.is_finite() && self.g > 0.0) {
            return Err(Error::invalid(format!("G must be finite and > 0, got {}", self.g)));
        }
        match self.softening {
            Softening::Plummer { eps2 } | Softening::BodyRadius { eps2 } => {
                if !(eps2.is_finite() && eps2 >= 0.0) {
                    return Err(Error::invalid(format!("eps2 must be finite and >= 0, got {eps2}")));
                }
            }
            Softening::None => {}
        }
        if self.max_samples == Some(0) {
            return Err(Error::invalid("max_samples must be at least 1 when set"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(Parameters::default().validate().is_ok());
    }

    #[test]
    fn rejects_non_positive_step() {
        let p = Parameters { h0: 0.0, ..Parameters::default() };
        assert!(p.validate().is_err());
        let p = Parameters { h0: f64::NAN, ..Parameters::default() };
        assert!(p.validate().is_err());
    }

    #[test]
    fn rejects_negative_softening_and_empty_window() {
        let p = Parameters { softening: Softening::Plummer { eps2: -1.0 }, ..Parameters::default() };
        assert!(p.validate().is_err());
        let p = Parameters { max_samples: Some(0), ..Parameters::default() };
        assert!(p.validate().is_err());
    }
}
