//! The `Universe`: owner of every body and sensor, and the step driver.
//!
//! Callers build a universe through the `add_*` calls, then call
//! [`Universe::advance`] repeatedly and read positions and recorded flux back
//! through the read-only accessors. Each step integrates a scratch copy of the
//! gravitating state, samples every photometer from the updated copy, and only
//! commits once nothing went non-finite.

use log::{debug, trace, warn};

use crate::configuration::config::UniverseConfig;
use crate::error::{Error, Result};
use crate::simulation::forces::{NewtonianGravity, PairForce};
use crate::simulation::integrator;
use crate::simulation::params::Parameters;
use crate::simulation::photometry::sample_flux;
use crate::simulation::states::{Body, GravIndex, Gravitating, Matter, NVec3, Photometer, Star, System};

/// Lifecycle of a universe. There is no terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Configuring,
    Running,
}

pub struct Universe {
    parameters: Parameters,
    gravity: NewtonianGravity,
    matter: Vec<Matter>,
    stars: Vec<Star>,
    photometers: Vec<Photometer>,
    ticks: u64,
    t: f64,
}

impl Default for Universe {
    fn default() -> Self {
        Self::new()
    }
}

impl Universe {
    /// Empty universe with default parameters (SI gravity, unit step)
    pub fn new() -> Self {
        Self::build(Parameters::default())
    }

    pub fn with_parameters(parameters: Parameters) -> Result<Self> {
        parameters.validate()?;
        Ok(Self::build(parameters))
    }

    pub fn from_config(cfg: &UniverseConfig) -> Result<Self> {
        Ok(Self::build(cfg.to_parameters()?))
    }

    fn build(parameters: Parameters) -> Self {
        let gravity = NewtonianGravity {
            g: parameters.g,
            softening: parameters.softening,
        };

        Self {
            parameters,
            gravity,
            matter: Vec::new(),
            stars: Vec::new(),
            photometers: Vec::new(),
            ticks: 0,
            t: 0.0,
        }
    }

    // construction ==========================================================================

    /// Add a purely gravitating body and return its index in [`Universe::matter`]
    pub fn add_matter(
        &mut self,
        mass: f64,
        position: impl Into<NVec3>,
        velocity: impl Into<NVec3>,
        acceleration: impl Into<NVec3>,
        radius: f64,
    ) -> Result<usize> {
        let body = Body::new(mass, radius, position.into(), velocity.into(), acceleration.into())?;
        self.matter.push(Matter { body });
        let idx = self.matter.len() - 1;
        debug!("added matter {idx}: mass={mass:e} radius={radius:e} tick={}", self.ticks);
        Ok(idx)
    }

    /// [`Universe::add_matter`] with zero radius
    pub fn add_point_matter(
        &mut self,
        mass: f64,
        position: impl Into<NVec3>,
        velocity: impl Into<NVec3>,
        acceleration: impl Into<NVec3>,
    ) -> Result<usize> {
        self.add_matter(mass, position, velocity, acceleration, 0.0)
    }

    /// Add a luminous body and return its index in [`Universe::stars`]
    pub fn add_star(
        &mut self,
        mass: f64,
        position: impl Into<NVec3>,
        velocity: impl Into<NVec3>,
        acceleration: impl Into<NVec3>,
        luminosity: f64,
        radius: f64,
    ) -> Result<usize> {
        let body = Body::new(mass, radius, position.into(), velocity.into(), acceleration.into())?;
        self.stars.push(Star::new(body, luminosity)?);
        let idx = self.stars.len() - 1;
        debug!(
            "added star {idx}: mass={mass:e} radius={radius:e} luminosity={luminosity:e} tick={}",
            self.ticks
        );
        Ok(idx)
    }

    /// [`Universe::add_star`] with zero radius
    pub fn add_point_star(
        &mut self,
        mass: f64,
        position: impl Into<NVec3>,
        velocity: impl Into<NVec3>,
        acceleration: impl Into<NVec3>,
        luminosity: f64,
    ) -> Result<usize> {
        self.add_star(mass, position, velocity, acceleration, luminosity, 0.0)
    }

    /// Add a fixed sensor and return its index in [`Universe::photometers`]
    pub fn add_photometer(&mut self, aperture_radius: f64, position: impl Into<NVec3>) -> Result<usize> {
        self.photometers.push(Photometer::new(aperture_radius, position.into())?);
        let idx = self.photometers.len() - 1;
        debug!("added photometer {idx}: aperture={aperture_radius:e} tick={}", self.ticks);
        Ok(idx)
    }

    // stepping ==============================================================================

    /// Advance the clock by one step.
    ///
    /// Gravity is evaluated on one snapshot, bodies are integrated, and then
    /// every photometer appends one flux sample computed from the new positions.
    /// On error nothing is committed.
    pub fn advance(&mut self) -> Result<()> {
        let mut sys = self.snapshot();

        if let Err(e) = integrator::step(&mut sys, &self.gravity, &self.parameters) {
            warn!("step {} rejected: {e}", self.ticks);
            return Err(e);
        }

        // Photometry only sees positions once every body has moved
        let first_star = self.matter.len();
        let luminosities: Vec<f64> = self.stars.iter().map(|s| s.luminosity).collect();
        let samples = self
            .photometers
            .iter()
            .map(|p| sample_flux(&p.position(), &sys, first_star, &luminosities))
            .collect::<Result<Vec<f64>>>();
        let samples = match samples {
            Ok(s) => s,
            Err(e) => {
                warn!("step {} rejected: {e}", self.ticks);
                return Err(e);
            }
        };

        // commit
        let mut bodies = sys.bodies.into_iter();
        for (m, b) in self.matter.iter_mut().zip(bodies.by_ref()) {
            m.body = b;
        }
        for (s, b) in self.stars.iter_mut().zip(bodies) {
            s.body = b;
        }
        for (p, sample) in self.photometers.iter_mut().zip(samples) {
            p.record(self.ticks, sample, self.parameters.max_samples);
        }

        self.ticks += 1;
        self.t = sys.t;
        trace!(
            "tick {} t={:e}: {} matter, {} stars, {} photometers",
            self.ticks,
            self.t,
            self.matter.len(),
            self.stars.len(),
            self.photometers.len()
        );
        Ok(())
    }

    // inspection ============================================================================

    pub fn matter(&self) -> &[Matter] {
        &self.matter
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    pub fn photometers(&self) -> &[Photometer] {
        &self.photometers
    }

    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    /// Completed steps
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Simulated time elapsed
    pub fn time(&self) -> f64 {
        self.t
    }

    pub fn phase(&self) -> Phase {
        if self.ticks == 0 {
            Phase::Configuring
        } else {
            Phase::Running
        }
    }

    /// Every gravitating body: matter in insertion order, then stars
    pub fn bodies(&self) -> impl Iterator<Item = Gravitating<'_>> {
        self.matter
            .iter()
            .map(Gravitating::Matter)
            .chain(self.stars.iter().map(Gravitating::Star))
    }

    /// Map a position in [`Universe::bodies`] order to its collection index
    pub fn grav_index(&self, i: usize) -> Option<GravIndex> {
        let m = self.matter.len();
        if i < m {
            Some(GravIndex::Matter(i))
        } else if i < m + self.stars.len() {
            Some(GravIndex::Star(i - m))
        } else {
            None
        }
    }

    pub fn body(&self, idx: GravIndex) -> Option<Gravitating<'_>> {
        match idx {
            GravIndex::Matter(i) => self.matter.get(i).map(Gravitating::Matter),
            GravIndex::Star(i) => self.stars.get(i).map(Gravitating::Star),
        }
    }

    /// Pairwise gravitational forces at the current positions, indexed in
    /// [`Universe::bodies`] order. Pair (j on i) is always followed by (i on j).
    pub fn pair_forces(&self) -> Result<Vec<PairForce>> {
        self.gravity.pair_forces(&self.snapshot())
    }

    pub fn total_momentum(&self) -> NVec3 {
        self.bodies().fold(NVec3::zeros(), |acc, b| acc + b.body().momentum())
    }

    /// Drop every sample held by photometer `index`
    pub fn clear_recorded(&mut self, index: usize) -> Result<()> {
        let n = self.photometers.len();
        let p = self
            .photometers
            .get_mut(index)
            .ok_or_else(|| Error::invalid(format!("photometer index {index} out of range (have {n})")))?;
        p.clear();
        Ok(())
    }

    fn snapshot(&self) -> System {
        let bodies = self.bodies().map(|b| b.body().clone()).collect();
        System { bodies, t: self.t }
    }
}
