//! Force / acceleration contributors for the simulation
//!
//! Defines the acceleration trait and direct pairwise Newtonian gravity
//! with a configurable softening policy

use crate::error::{Error, Result};
use crate::simulation::states::{Body, NVec3, System};

/// How close encounters are regularised
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Softening {
    /// eps2 added to the squared separation of every pair
    Plummer { eps2: f64 },
    /// eps2 plus the mean squared radius of the two bodies
    BodyRadius { eps2: f64 },
    /// Bare inverse-square law; a zero separation is an error
    None,
}

impl Softening {
    /// Squared softening length for the pair (bi, bj)
    pub fn soft2(&self, bi: &Body, bj: &Body) -> f64 {
        match *self {
            Softening::Plummer { eps2 } => eps2,
            Softening::BodyRadius { eps2 } => 0.5 * (bi.radius * bi.radius + bj.radius * bj.radius) + eps2,
            Softening::None => 0.0,
        }
    }
}

/// Acceleration source operating on a [`System`] snapshot
/// Implementations add their contribution into `out[i]` for each body
pub trait Acceleration {
    fn acceleration(&self, t: f64, sys: &System, out: &mut [NVec3]) -> Result<()>;

    /// Zero `out`, then fill it with this source's accelerations at time `t`
    fn accumulate(&self, t: f64, sys: &System, out: &mut [NVec3]) -> Result<()> {
        for a in out.iter_mut() {
            *a = NVec3::zeros();
        }
        self.acceleration(t, sys, out)
    }
}

/// Force exerted on `target` by `source`, both indices into `System::bodies`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PairForce {
    pub source: usize,
    pub target: usize,
    pub force: NVec3,
}

/// Newtonian gravity, direct n^2 sum over unordered pairs
#[derive(Debug, Clone)]
pub struct NewtonianGravity {
    pub g: f64, // gravitational constant
    pub softening: Softening,
}

impl NewtonianGravity {
    /// coef = G / |r_soft|^3 for the pair (i, j) separated by r
    fn coefficient(&self, sys: &System, i: usize, j: usize, r: &NVec3) -> Result<f64> {
        let bi = &sys.bodies[i];
        let bj = &sys.bodies[j];

        let d2 = r.dot(r) + self.softening.soft2(bi, bj);
        if d2 == 0.0 {
            return Err(Error::unstable(format!(
                "bodies {i} and {j} coincide with no softening"
            )));
        }

        let inv_r = d2.sqrt().recip();
        let coef = self.g * inv_r * inv_r * inv_r;
        if !coef.is_finite() {
            return Err(Error::unstable(format!(
                "separation between bodies {i} and {j} collapsed (d2 = {d2:e})"
            )));
        }
        Ok(coef)
    }

    /// Pairwise forces for the snapshot
    /// Each unordered pair is evaluated once and emitted as (j on i) followed by
    /// (i on j), the second being the exact negation of the first
    pub fn pair_forces(&self, sys: &System) -> Result<Vec<PairForce>> {
        let n = sys.bodies.len();
        let mut out = Vec::with_capacity(n * n.saturating_sub(1));

        for i in 0..n {
            for j in (i + 1)..n {
                let r = sys.bodies[j].position - sys.bodies[i].position;
                let coef = self.coefficient(sys, i, j, &r)?;
                let f = coef * sys.bodies[i].mass * sys.bodies[j].mass * r;
                if !f.iter().all(|c| c.is_finite()) {
                    return Err(Error::unstable(format!(
                        "force between bodies {i} and {j} overflowed: {f:?}"
                    )));
                }

                out.push(PairForce { source: j, target: i, force: f });
                out.push(PairForce { source: i, target: j, force: -f });
            }
        }
        Ok(out)
    }
}

impl Acceleration for NewtonianGravity {
    fn acceleration(&self, _t: f64, sys: &System, out: &mut [NVec3]) -> Result<()> {
        let n = sys.bodies.len();

        // Loop over each unordered pair (i, j) with i < j
        for i in 0..n {
            let xi = sys.bodies[i].position;
            let mi = sys.bodies[i].mass;

            for j in (i + 1)..n {
                let xj = sys.bodies[j].position;
                let mj = sys.bodies[j].mass;

                // r points from i to j: i is pulled along +r, j along -r
                let r = xj - xi;
                let coef = self.coefficient(sys, i, j, &r)?;

                // a_i +=  G * m_j * r / |r_soft|^3
                // a_j += -G * m_i * r / |r_soft|^3
                out[i] += coef * mj * r;
                out[j] -= coef * mi * r;
            }
        }
        Ok(())
    }
}
