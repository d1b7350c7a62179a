//! Photometer flux model
//!
//! A star contributes `L / (4 pi d^2)` at the sensor. Every other body sitting
//! in front of it (closer to the sensor, same side) can hide part of its disk.
//! Hidden fraction is the overlap of the two projected disks on the sky, taken
//! from their angular radii and angular separation as seen by the sensor.
//! Each occluder scales the star's contribution by `(1 - fraction)`.

use std::f64::consts::PI;

use crate::error::{Error, Result};
use crate::simulation::states::{Body, NVec3, System};

/// Unobstructed flux density at distance `d` from a source of luminosity `l`
pub fn inverse_square(luminosity: f64, d: f64) -> f64 {
    luminosity / (4.0 * PI * d * d)
}

/// Angular radius of a sphere of radius `radius` seen from distance `d`
pub fn angular_radius(radius: f64, d: f64) -> f64 {
    if radius >= d {
        PI / 2.0
    } else {
        (radius / d).asin()
    }
}

/// Area of the intersection of two disks with radii `a`, `b` whose centres are `sep` apart
pub fn disk_overlap_area(a: f64, b: f64, sep: f64) -> f64 {
    if a <= 0.0 || b <= 0.0 || sep >= a + b {
        return 0.0;
    }
    if sep <= (a - b).abs() {
        let r = a.min(b);
        return PI * r * r;
    }

    let alpha = ((sep * sep + a * a - b * b) / (2.0 * sep * a)).clamp(-1.0, 1.0).acos();
    let beta = ((sep * sep + b * b - a * a) / (2.0 * sep * b)).clamp(-1.0, 1.0).acos();
    let k = (-sep + a + b) * (sep + a - b) * (sep - a + b) * (sep + a + b);

    a * a * alpha + b * b * beta - 0.5 * k.max(0.0).sqrt()
}

/// Fraction of `source`'s disk hidden by `occluder` as seen from `sensor`, in [0, 1]
pub fn covered_fraction(sensor: &NVec3, source: &Body, occluder: &Body) -> f64 {
    if occluder.radius <= 0.0 {
        return 0.0;
    }

    let to_source = source.position - sensor;
    let to_occluder = occluder.position - sensor;
    let d_source = to_source.norm();
    let d_occluder = to_occluder.norm();

    // Sensor buried inside the occluder sees nothing
    if d_occluder <= occluder.radius {
        return 1.0;
    }
    // Occluder must be nearer than the source and on the same side of the sensor.
    // Only centres are compared: a large body centred just behind the source is
    // ignored even when its near limb lies in front of the source's disk.
    if d_occluder >= d_source || to_source.dot(&to_occluder) <= 0.0 {
        return 0.0;
    }

    let sep = to_source.cross(&to_occluder).norm().atan2(to_source.dot(&to_occluder));
    let a_occ = angular_radius(occluder.radius, d_occluder);

    if source.radius <= 0.0 {
        // Point source: all or nothing
        return if sep < a_occ { 1.0 } else { 0.0 };
    }

    let a_src = angular_radius(source.radius, d_source);
    let overlap = disk_overlap_area(a_src, a_occ, sep);
    (overlap / (PI * a_src * a_src)).clamp(0.0, 1.0)
}

/// Flux density at `sensor` summed over every star in `sys`.
///
/// `sys.bodies[first_star..]` are the stars, paired in order with `luminosities`;
/// every body in `sys` except the star itself is a potential occluder.
pub fn sample_flux(sensor: &NVec3, sys: &System, first_star: usize, luminosities: &[f64]) -> Result<f64> {
    let mut total = 0.0;

    for (k, &luminosity) in luminosities.iter().enumerate() {
        let si = first_star + k;
        let star = &sys.bodies[si];
        let d = (star.position - sensor).norm();

        let base = inverse_square(luminosity, d);
        if !base.is_finite() {
            return Err(Error::unstable(format!(
                "photometer at {sensor:?} coincides with star {k}"
            )));
        }

        let mut transmitted = 1.0;
        for (j, occluder) in sys.bodies.iter().enumerate() {
            if j == si {
                continue;
            }
            transmitted *= 1.0 - covered_fraction(sensor, star, occluder);
            if transmitted == 0.0 {
                break;
            }
        }

        total += base * transmitted;
    }

    if !total.is_finite() {
        return Err(Error::unstable(format!("non-finite flux at photometer {sensor:?}")));
    }
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body_at(x: f64, radius: f64) -> Body {
        let z = NVec3::zeros();
        Body::new(1.0, radius, NVec3::new(x, 0.0, 0.0), z, z).unwrap()
    }

    #[test]
    fn overlap_limits() {
        assert_eq!(disk_overlap_area(1.0, 1.0, 2.5), 0.0);
        assert!((disk_overlap_area(1.0, 0.5, 0.2) - PI * 0.25).abs() < 1e-12);
        assert!((disk_overlap_area(1.0, 1.0, 0.0) - PI).abs() < 1e-12);
        // Two unit disks one radius apart: 2pi/3 - sqrt(3)/2
        let expected = 2.0 * PI / 3.0 - 3f64.sqrt() / 2.0;
        assert!((disk_overlap_area(1.0, 1.0, 1.0) - expected).abs() < 1e-12);
    }

    #[test]
    fn occluder_behind_source_hides_nothing() {
        let sensor = NVec3::new(100.0, 0.0, 0.0);
        let star = body_at(0.0, 1.0);
        let behind = body_at(-10.0, 5.0);
        assert_eq!(covered_fraction(&sensor, &star, &behind), 0.0);
    }

    #[test]
    fn occluder_behind_sensor_hides_nothing() {
        let sensor = NVec3::new(100.0, 0.0, 0.0);
        let star = body_at(0.0, 1.0);
        let rear = body_at(150.0, 5.0);
        assert_eq!(covered_fraction(&sensor, &star, &rear), 0.0);
    }

    #[test]
    fn large_occluder_on_axis_hides_everything() {
        let sensor = NVec3::new(100.0, 0.0, 0.0);
        let star = body_at(0.0, 1.0);
        let occ = body_at(50.0, 2.0);
        assert!((covered_fraction(&sensor, &star, &occ) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn small_occluder_near_source_hides_area_ratio() {
        let sensor = NVec3::new(1.0e6, 0.0, 0.0);
        let star = body_at(0.0, 10.0);
        let occ = body_at(20.0, 1.0);
        let f = covered_fraction(&sensor, &star, &occ);
        assert!((f - 0.01).abs() < 1e-4, "fraction {f}");
    }

    #[test]
    fn point_source_is_all_or_nothing() {
        let sensor = NVec3::new(100.0, 0.0, 0.0);
        let star = body_at(0.0, 0.0);
        let occ = body_at(50.0, 1.0);
        assert_eq!(covered_fraction(&sensor, &star, &occ), 1.0);

        let mut off = body_at(50.0, 1.0);
        off.position.y = 5.0;
        assert_eq!(covered_fraction(&sensor, &star, &off), 0.0);
    }

    #[test]
    fn sample_flux_rejects_sensor_inside_star_centre() {
        let sys = System { bodies: vec![body_at(0.0, 1.0)], t: 0.0 };
        let err = sample_flux(&NVec3::zeros(), &sys, 0, &[1.0]).unwrap_err();
        assert!(matches!(err, Error::NumericalInstability(_)));
    }
}
