// Python bindings for configuration-driven momentum sampling.
//
// Exposes batch sampling and mean queries so distribution settings can be
// validated from Python before a production run. Thermal profiles are
// limited to constant values here; spatially varying profiles stay on the
// Rust side where the expression handles live.

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::engine::PrnStream;
use crate::fields::{Axis, TemperatureProfile, VelocityProfile};
use crate::settings::MomentumSettings;

fn parse_axis(axis: &str) -> PyResult<Axis> {
    match axis {
        "x" => Ok(Axis::X),
        "y" => Ok(Axis::Y),
        "z" => Ok(Axis::Z),
        other => Err(PyValueError::new_err(format!(
            "axis must be one of 'x', 'y', 'z', got '{}'",
            other
        ))),
    }
}

/// A momentum distribution plus optional constant thermal profiles.
#[pyclass(name = "MomentumSource")]
pub struct PyMomentumSource {
    settings: MomentumSettings,
    theta: Option<f64>,
    beta: Option<f64>,
    axis: Option<Axis>,
}

#[pymethods]
impl PyMomentumSource {
    /// Build from a JSON settings document, e.g.
    /// `{"distribution": "gaussian", "uz_m": 0.1, "uz_th": 0.01}`.
    #[new]
    fn new(settings_json: &str) -> PyResult<Self> {
        let settings: MomentumSettings = serde_json::from_str(settings_json)
            .map_err(|e| PyValueError::new_err(format!("invalid momentum settings: {}", e)))?;
        Ok(Self {
            settings,
            theta: None,
            beta: None,
            axis: None,
        })
    }

    /// Attach constant temperature and drift profiles for the thermal kinds.
    fn set_thermal_profile(&mut self, theta: f64, beta: f64, axis: &str) -> PyResult<()> {
        self.axis = Some(parse_axis(axis)?);
        self.theta = Some(theta);
        self.beta = Some(beta);
        Ok(())
    }

    /// Bulk momentum at a position.
    fn mean(&self, x: f64, y: f64, z: f64) -> PyResult<(f64, f64, f64)> {
        let temperature = self.theta.map(TemperatureProfile::constant);
        let velocity = match (self.beta, self.axis) {
            (Some(beta), Some(axis)) => Some(VelocityProfile::constant(beta, axis)),
            _ => None,
        };
        let sampler = self
            .settings
            .build(temperature.as_ref(), velocity.as_ref())
            .map_err(PyValueError::new_err)?;
        let u = sampler.mean(x, y, z);
        Ok((u.x, u.y, u.z))
    }

    /// Draw `n` momenta at a position, one independent stream per particle.
    fn sample(
        &self,
        n: usize,
        seed: u64,
        x: f64,
        y: f64,
        z: f64,
    ) -> PyResult<Vec<(f64, f64, f64)>> {
        let temperature = self.theta.map(TemperatureProfile::constant);
        let velocity = match (self.beta, self.axis) {
            (Some(beta), Some(axis)) => Some(VelocityProfile::constant(beta, axis)),
            _ => None,
        };
        let sampler = self
            .settings
            .build(temperature.as_ref(), velocity.as_ref())
            .map_err(PyValueError::new_err)?;

        let mut out = Vec::with_capacity(n);
        for particle_id in 0..n as u64 {
            let mut rng = PrnStream::for_particle(seed, particle_id);
            let u = sampler.sample(x, y, z, &mut rng);
            out.push((u.x, u.y, u.z));
        }
        Ok(out)
    }
}
