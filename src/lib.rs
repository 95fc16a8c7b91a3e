// Momentum initialization for particles injected into PIC plasma simulations.
mod engine;
mod fields;
mod flux;
mod momentum;
mod relativistic;
mod settings;

pub use engine::{random_normal, PrnStream};
pub use fields::{Axis, PositionExpr, ScalarField, TemperatureProfile, VelocityProfile};
pub use flux::gaussian_flux_speed;
pub use momentum::{
    ConstantMomentum, GaussianFluxMomentum, GaussianMomentum, MomentumKind, MomentumSampler,
    ParserMomentum, RadialExpansionMomentum, UniformMomentum,
};
pub use relativistic::{BoltzmannMomentum, JuttnerMomentum};
pub use settings::MomentumSettings;

#[cfg(feature = "pyo3")]
use pyo3::prelude::*;

#[cfg(feature = "pyo3")]
mod python {
    pub mod sampler_python;
    pub use sampler_python::*;
}

#[cfg(feature = "pyo3")]
#[pymodule]
fn momentum_for_pic(_py: Python<'_>, m: &PyModule) -> PyResult<()> {
    m.add_class::<python::sampler_python::PyMomentumSource>()?;
    Ok(())
}
