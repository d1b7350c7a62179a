//! Core state types for the simulation.
//!
//! - `Body` carries the kinematic state shared by every gravitating object
//! - `Matter` / `Star` wrap a `Body`; a star also emits
//! - `Photometer` is a fixed sensor that never gravitates
//! - `System` is the flat snapshot the force and integrator code works on

use std::f64::consts::PI;

use nalgebra::Vector3;

use crate::error::{Error, Result};

pub type NVec3 = Vector3<f64>;

#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub mass: f64,          // > 0
    pub radius: f64,        // >= 0, zero means a point mass with no disk
    pub position: NVec3,
    pub velocity: NVec3,
    pub acceleration: NVec3,
}

impl Body {
    /// Validate and build a body. Nothing is allocated on failure.
    pub fn new(mass: f64, radius: f64, position: NVec3, velocity: NVec3, acceleration: NVec3) -> Result<Self> {
        if !(mass.is_finite() && mass > 0.0) {
            return Err(Error::invalid(format!("mass must be finite and > 0, got {mass}")));
        }
        if !(radius.is_finite() && radius >= 0.0) {
            return Err(Error::invalid(format!("radius must be finite and >= 0, got {radius}")));
        }
        check_finite("position", &position)?;
        check_finite("velocity", &velocity)?;
        check_finite("acceleration", &acceleration)?;

        Ok(Self { mass, radius, position, velocity, acceleration })
    }

    pub fn momentum(&self) -> NVec3 {
        self.velocity * self.mass
    }

    pub(crate) fn is_finite(&self) -> bool {
        self.position.iter().all(|c| c.is_finite())
            && self.velocity.iter().all(|c| c.is_finite())
            && self.acceleration.iter().all(|c| c.is_finite())
    }
}

/// Purely gravitating body.
#[derive(Debug, Clone, PartialEq)]
pub struct Matter {
    pub body: Body,
}

/// Gravitating body that also acts as a flux source.
#[derive(Debug, Clone, PartialEq)]
pub struct Star {
    pub body: Body,
    pub luminosity: f64, // total radiant power, > 0
}

impl Star {
    pub fn new(body: Body, luminosity: f64) -> Result<Self> {
        if !(luminosity.is_finite() && luminosity > 0.0) {
            return Err(Error::invalid(format!("luminosity must be finite and > 0, got {luminosity}")));
        }
        Ok(Self { body, luminosity })
    }
}

/// Borrowed view over either kind of gravitating body.
#[derive(Debug, Clone, Copy)]
pub enum Gravitating<'a> {
    Matter(&'a Matter),
    Star(&'a Star),
}

impl<'a> Gravitating<'a> {
    pub fn body(&self) -> &'a Body {
        match self {
            Gravitating::Matter(m) => &m.body,
            Gravitating::Star(s) => &s.body,
        }
    }

    pub fn luminosity(&self) -> Option<f64> {
        match self {
            Gravitating::Matter(_) => None,
            Gravitating::Star(s) => Some(s.luminosity),
        }
    }
}

/// Index into one of the two gravitating collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GravIndex {
    Matter(usize),
    Star(usize),
}

/// Fixed light sensor. Records one flux density sample per step.
#[derive(Debug, Clone, PartialEq)]
pub struct Photometer {
    aperture_radius: f64,
    position: NVec3,
    recorded: Vec<f64>,
    first_tick: Option<u64>,
}

impl Photometer {
    pub fn new(aperture_radius: f64, position: NVec3) -> Result<Self> {
        if !(aperture_radius.is_finite() && aperture_radius >= 0.0) {
            return Err(Error::invalid(format!(
                "aperture radius must be finite and >= 0, got {aperture_radius}"
            )));
        }
        check_finite("photometer position", &position)?;

        Ok(Self {
            aperture_radius,
            position,
            recorded: Vec::new(),
            first_tick: None,
        })
    }

    pub fn aperture_radius(&self) -> f64 {
        self.aperture_radius
    }

    pub fn position(&self) -> NVec3 {
        self.position
    }

    /// Flux density samples, oldest first.
    pub fn recorded(&self) -> &[f64] {
        &self.recorded
    }

    /// Tick of the oldest sample still held, if any were recorded.
    pub fn first_tick(&self) -> Option<u64> {
        self.first_tick
    }

    /// Light-collecting area of the aperture.
    pub fn aperture_area(&self) -> f64 {
        PI * self.aperture_radius * self.aperture_radius
    }

    /// Recorded samples scaled by the aperture area (power rather than flux density).
    pub fn collected_power(&self) -> impl Iterator<Item = f64> + '_ {
        let area = self.aperture_area();
        self.recorded.iter().map(move |f| f * area)
    }

    /// Append the sample taken at `tick`, dropping the oldest ones beyond `window`.
    pub(crate) fn record(&mut self, tick: u64, sample: f64, window: Option<usize>) {
        if self.first_tick.is_none() {
            self.first_tick = Some(tick);
        }
        self.recorded.push(sample);

        if let Some(max) = window {
            let excess = self.recorded.len().saturating_sub(max);
            if excess > 0 {
                self.recorded.drain(..excess);
                self.first_tick = self.first_tick.map(|t| t + excess as u64);
            }
        }
    }

    pub(crate) fn clear(&mut self) {
        self.recorded.clear();
        self.first_tick = None;
    }
}

/// Flat snapshot of every gravitating body: matter first, then stars.
#[derive(Debug, Clone)]
pub struct System {
    pub bodies: Vec<Body>,
    pub t: f64, // time
}

impl System {
    /// Total linear momentum of the snapshot.
    pub fn momentum(&self) -> NVec3 {
        self.bodies.iter().fold(NVec3::zeros(), |acc, b| acc + b.momentum())
    }
}

fn check_finite(name: &str, v: &NVec3) -> Result<()> {
    if v.iter().all(|c| c.is_finite()) {
        Ok(())
    } else {
        Err(Error::invalid(format!("{name} must be finite, got {v:?}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_rejects_bad_mass_and_radius() {
        let z = NVec3::zeros();
        assert!(Body::new(0.0, 0.0, z, z, z).is_err());
        assert!(Body::new(-1.0, 0.0, z, z, z).is_err());
        assert!(Body::new(1.0, -0.1, z, z, z).is_err());
        assert!(Body::new(f64::NAN, 0.0, z, z, z).is_err());
        assert!(Body::new(1.0, 0.0, NVec3::new(f64::INFINITY, 0.0, 0.0), z, z).is_err());
        assert!(Body::new(1.0, 0.0, z, z, z).is_ok());
    }

    #[test]
    fn window_keeps_latest_samples() {
        let mut p = Photometer::new(1.0, NVec3::zeros()).unwrap();
        for tick in 0..5 {
            p.record(tick, tick as f64, Some(3));
        }
        assert_eq!(p.recorded(), &[2.0, 3.0, 4.0]);
        assert_eq!(p.first_tick(), Some(2));
    }

    #[test]
    fn collected_power_scales_by_area() {
        let mut p = Photometer::new(2.0, NVec3::zeros()).unwrap();
        p.record(0, 1.5, None);
        let power: Vec<f64> = p.collected_power().collect();
        assert!((power[0] - 1.5 * PI * 4.0).abs() < 1e-12);
    }
}
