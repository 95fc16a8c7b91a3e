// Relativistic thermal momentum sampling with a frame boost.
//
// Both samplers draw in the local rest frame, then map to the simulation
// frame in two steps from Zenitani 2015 (Phys. Plasmas 22, 042116): the
// flipping method (eq. 32), which corrects for particle positions being
// generated uniformly in the simulation frame rather than the boosted
// frame, and the Lorentz boost of the axis component (eq. 17). With
// beta = 0 both steps reduce to the identity through the formulas alone.

use nalgebra::Vector3;
use rand::Rng;

use crate::engine::random_normal;
use crate::fields::{TemperatureProfile, VelocityProfile};

/// Flip the axis component with probability -beta*u_axis/gamma, then boost
/// it into the simulation frame. Transverse components are untouched.
#[inline]
pub(crate) fn flip_and_boost<R: Rng + ?Sized>(
    u_axis: f64,
    gamma: f64,
    beta: f64,
    rng: &mut R,
) -> f64 {
    let u = if -beta * u_axis / gamma > rng.gen::<f64>() {
        -u_axis
    } else {
        u_axis
    };
    (u + gamma * beta) / (1.0 - beta * beta).sqrt()
}

/// Bulk drift gamma*beta along the boost axis, zero transverse.
fn drift_momentum(velocity: &VelocityProfile<'_>, x: f64, y: f64, z: f64) -> Vector3<f64> {
    let beta = velocity.beta(x, y, z);
    let gamma = 1.0 / (1.0 - beta * beta).sqrt();
    let mut u = [0.0; 3];
    u[velocity.axis().index()] = gamma * beta;
    Vector3::new(u[0], u[1], u[2])
}

fn check_beta(beta: f64, x: f64, y: f64, z: f64) {
    if beta <= -1.0 || beta >= 1.0 {
        panic!(
            "drift velocity magnitude |beta| >= 1 at ({}, {}, {}): beta = {}",
            x, y, z, beta
        );
    }
}

/// Maxwell-Boltzmann momentum with a relativistic drift.
///
/// Borrows the temperature and velocity profiles; the configuration that
/// owns them must outlive the sampler.
#[derive(Debug, Clone, Copy)]
pub struct BoltzmannMomentum<'a> {
    temperature: &'a TemperatureProfile<'a>,
    velocity: &'a VelocityProfile<'a>,
}

impl<'a> BoltzmannMomentum<'a> {
    pub fn new(temperature: &'a TemperatureProfile<'a>, velocity: &'a VelocityProfile<'a>) -> Self {
        Self {
            temperature,
            velocity,
        }
    }

    /// Draw one momentum. Panics on out-of-domain profile values (negative
    /// theta, |beta| >= 1): those indicate a configuration error upstream,
    /// and no partial momentum may be returned in their place.
    pub fn sample<R: Rng + ?Sized>(&self, x: f64, y: f64, z: f64, rng: &mut R) -> Vector3<f64> {
        let theta = self.temperature.at(x, y, z);
        if theta < 0.0 {
            panic!(
                "negative temperature parameter theta = {} at ({}, {}, {})",
                theta, x, y, z
            );
        }
        let beta = self.velocity.beta(x, y, z);
        check_beta(beta, x, y, z);

        let vave = theta.sqrt();
        let dir = self.velocity.axis().index();

        let mut u = [0.0; 3];
        u[dir] = random_normal(0.0, vave, rng);
        u[(dir + 1) % 3] = random_normal(0.0, vave, rng);
        u[(dir + 2) % 3] = random_normal(0.0, vave, rng);
        let gamma = (1.0 + u[0] * u[0] + u[1] * u[1] + u[2] * u[2]).sqrt();

        u[dir] = flip_and_boost(u[dir], gamma, beta, rng);
        Vector3::new(u[0], u[1], u[2])
    }

    pub fn mean(&self, x: f64, y: f64, z: f64) -> Vector3<f64> {
        drift_momentum(self.velocity, x, y, z)
    }
}

/// Maxwell-Juttner momentum with a relativistic drift.
///
/// Rest-frame speeds come from Sobol's method; the rejection loop becomes
/// inefficient and numerically unstable for theta below 0.1, which is
/// rejected at call time.
#[derive(Debug, Clone, Copy)]
pub struct JuttnerMomentum<'a> {
    temperature: &'a TemperatureProfile<'a>,
    velocity: &'a VelocityProfile<'a>,
}

impl<'a> JuttnerMomentum<'a> {
    pub fn new(temperature: &'a TemperatureProfile<'a>, velocity: &'a VelocityProfile<'a>) -> Self {
        Self {
            temperature,
            velocity,
        }
    }

    /// Draw one momentum. Panics on out-of-domain profile values
    /// (theta < 0.1, |beta| >= 1).
    pub fn sample<R: Rng + ?Sized>(&self, x: f64, y: f64, z: f64, rng: &mut R) -> Vector3<f64> {
        let theta = self.temperature.at(x, y, z);
        if theta < 0.1 {
            panic!(
                "temperature parameter theta = {} at ({}, {}, {}) is below the \
                 minimum 0.1 supported for Maxwell-Juttner sampling",
                theta, x, y, z
            );
        }
        let beta = self.velocity.beta(x, y, z);
        check_beta(beta, x, y, z);
        let dir = self.velocity.axis().index();

        let mut u = [0.0; 3];
        let mut gamma = 0.0;
        let mut x1 = 0.0;
        // Sobol's rejection loop for the rest-frame speed (Zenitani eq. 10).
        // Unbounded, terminates with probability 1; draws are mapped onto
        // (0, 1] so the logarithms stay finite.
        while u[dir] - gamma <= x1 {
            u[dir] = -theta
                * ((1.0 - rng.gen::<f64>())
                    * (1.0 - rng.gen::<f64>())
                    * (1.0 - rng.gen::<f64>()))
                .ln();
            gamma = (1.0 + u[dir] * u[dir]).sqrt();
            x1 = theta * (1.0 - rng.gen::<f64>()).ln();
        }

        // Spread the accepted speed onto a uniformly random direction,
        // then fix the sign of the axis component.
        let x1 = rng.gen::<f64>();
        let x2 = rng.gen::<f64>();
        let polar = 2.0 * u[dir] * (x1 * (1.0 - x1)).sqrt();
        let azimuth = 2.0 * std::f64::consts::PI * x2;
        u[(dir + 1) % 3] = polar * azimuth.sin();
        u[(dir + 2) % 3] = polar * azimuth.cos();
        u[dir] *= 2.0 * x1 - 1.0;

        u[dir] = flip_and_boost(u[dir], gamma, beta, rng);
        Vector3::new(u[0], u[1], u[2])
    }

    pub fn mean(&self, x: f64, y: f64, z: f64) -> Vector3<f64> {
        drift_momentum(self.velocity, x, y, z)
    }
}
