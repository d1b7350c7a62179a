//! Fixed-step time integrators
//!
//! Provides semi-implicit Euler, velocity-Verlet and a single-evaluation
//! drift-kick-drift leapfrog, all driven by an `Acceleration` source and `Parameters`.
//! Every force evaluation sees one consistent snapshot of positions, and each
//! body ends the step holding the last acceleration evaluated for it.

use super::forces::Acceleration;
use super::params::Parameters;
use super::states::{NVec3, System};
use crate::configuration::config::IntegratorConfig;
use crate::error::{Error, Result};

/// Advance `sys` by one step with the integrator selected in `params`,
/// then reject the result if any body went non-finite
pub fn step(sys: &mut System, forces: &dyn Acceleration, params: &Parameters) -> Result<()> {
    match params.integrator {
        IntegratorConfig::SemiImplicitEuler => semi_implicit_euler(sys, forces, params)?,
        IntegratorConfig::Verlet => verlet_integrator(sys, forces, params)?,
        IntegratorConfig::Leapfrog => leapfrog(sys, forces, params)?,
    }

    if let Some(i) = sys.bodies.iter().position(|b| !b.is_finite()) {
        return Err(Error::unstable(format!("body {i} has non-finite state after step")));
    }
    Ok(())
}

/// Symplectic Euler: a_n from x_n, then v_n+1 = v_n + dt a_n, x_n+1 = x_n + dt v_n+1
pub fn semi_implicit_euler(sys: &mut System, forces: &dyn Acceleration, params: &Parameters) -> Result<()> {
    let n = sys.bodies.len();
    let dt = params.h0;

    let mut acc = vec![NVec3::zeros(); n];
    forces.accumulate(sys.t, &*sys, &mut acc)?;

    for (b, a) in sys.bodies.iter_mut().zip(acc.iter()) {
        b.velocity += dt * *a;
        b.position += dt * b.velocity;
        b.acceleration = *a;
    }

    sys.t += dt;
    Ok(())
}

/// Velocity-Verlet, two force evaluations per step
pub fn verlet_integrator(sys: &mut System, forces: &dyn Acceleration, params: &Parameters) -> Result<()> {
    let n = sys.bodies.len();
    let dt = params.h0; // time step dt
    let half_dt = 0.5 * dt;

    // a_n from x_n at time t_n
    let mut a_old = vec![NVec3::zeros(); n];
    forces.accumulate(sys.t, &*sys, &mut a_old)?;

    // Kick: v_n+1/2 = v_n + (dt/2) a_n
    for (b, a) in sys.bodies.iter_mut().zip(a_old.iter()) {
        b.velocity += half_dt * *a;
    }

    // Drift: x_n+1 = x_n + dt v_n+1/2
    for b in sys.bodies.iter_mut() {
        b.position += dt * b.velocity;
    }

    sys.t += dt;

    // a_n+1 from x_n+1
    let mut a_new = vec![NVec3::zeros(); n];
    forces.accumulate(sys.t, &*sys, &mut a_new)?;

    // Second kick: v_n+1 = v_n+1/2 + (dt/2) a_n+1
    for (b, a) in sys.bodies.iter_mut().zip(a_new.iter()) {
        b.velocity += half_dt * *a;
        b.acceleration = *a;
    }
    Ok(())
}

/// Drift-kick-drift leapfrog, one force evaluation per step
pub fn leapfrog(sys: &mut System, forces: &dyn Acceleration, params: &Parameters) -> Result<()> {
    let n = sys.bodies.len();
    let dt = params.h0;
    let half_dt = 0.5 * dt;

    // Drift: x_n+1/2 = x_n + (dt/2) v_n
    for b in sys.bodies.iter_mut() {
        b.position += half_dt * b.velocity;
    }

    let t_mid = sys.t + half_dt;

    // Kick: v_n+1 = v_n + dt a_n+1/2
    let mut a_mid = vec![NVec3::zeros(); n];
    forces.accumulate(t_mid, &*sys, &mut a_mid)?;
    for (b, a) in sys.bodies.iter_mut().zip(a_mid.iter()) {
        b.velocity += dt * *a;
        b.acceleration = *a;
    }

    // Second drift: x_n+1 = x_n+1/2 + (dt/2) v_n+1
    for b in sys.bodies.iter_mut() {
        b.position += half_dt * b.velocity;
    }

    sys.t += dt;
    Ok(())
}
