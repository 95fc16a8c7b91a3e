// Momentum samplers for particle injection.
//
// Each injected particle is assigned a normalized momentum u = gamma*beta
// drawn from one of a closed set of distributions. The concrete sampler is
// chosen once at configuration time; after that it is read-only and shared
// by value across every execution context, with one independent `sample`
// call per particle.

use nalgebra::Vector3;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::engine::random_normal;
use crate::fields::{Axis, PositionExpr};
use crate::flux::gaussian_flux_speed;
use crate::relativistic::{BoltzmannMomentum, JuttnerMomentum};

/// The closed set of momentum distribution kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MomentumKind {
    Constant,
    Gaussian,
    GaussianFlux,
    Uniform,
    Boltzmann,
    Juttner,
    RadialExpansion,
    Parser,
}

/// Fixed momentum for every particle.
#[derive(Debug, Clone, Copy)]
pub struct ConstantMomentum {
    ux: f64,
    uy: f64,
    uz: f64,
}

impl ConstantMomentum {
    pub fn new(ux: f64, uy: f64, uz: f64) -> Self {
        Self { ux, uy, uz }
    }

    #[inline]
    pub fn sample<R: Rng + ?Sized>(&self, _rng: &mut R) -> Vector3<f64> {
        Vector3::new(self.ux, self.uy, self.uz)
    }

    #[inline]
    pub fn mean(&self) -> Vector3<f64> {
        Vector3::new(self.ux, self.uy, self.uz)
    }
}

/// Drifting thermal spread: three independent normal components.
#[derive(Debug, Clone, Copy)]
pub struct GaussianMomentum {
    ux_m: f64,
    uy_m: f64,
    uz_m: f64,
    ux_th: f64,
    uy_th: f64,
    uz_th: f64,
}

impl GaussianMomentum {
    pub fn new(ux_m: f64, uy_m: f64, uz_m: f64, ux_th: f64, uy_th: f64, uz_th: f64) -> Self {
        Self {
            ux_m,
            uy_m,
            uz_m,
            ux_th,
            uy_th,
            uz_th,
        }
    }

    #[inline]
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Vector3<f64> {
        Vector3::new(
            random_normal(self.ux_m, self.ux_th, rng),
            random_normal(self.uy_m, self.uy_th, rng),
            random_normal(self.uz_m, self.uz_th, rng),
        )
    }

    #[inline]
    pub fn mean(&self) -> Vector3<f64> {
        Vector3::new(self.ux_m, self.uy_m, self.uz_m)
    }
}

/// Flux-weighted thermal spread for particles crossing an injection surface.
///
/// Along the flux normal the speed density carries an extra factor of u
/// (particles crossing a surface, not occupying a volume); the sign of the
/// on-axis component is set by `flux_direction`. The transverse components
/// are plain normals.
#[derive(Debug, Clone, Copy)]
pub struct GaussianFluxMomentum {
    u_m: [f64; 3],
    u_th: [f64; 3],
    flux_normal_axis: Axis,
    flux_direction: i32,
}

impl GaussianFluxMomentum {
    /// Build the sampler, rejecting a negative central momentum along the
    /// flux axis: the flux kernel only produces positive speeds, so a
    /// negative on-axis drift cannot be represented.
    pub fn new(
        u_m: [f64; 3],
        u_th: [f64; 3],
        flux_normal_axis: Axis,
        flux_direction: i32,
    ) -> Result<Self, String> {
        if u_m[flux_normal_axis.index()] < 0.0 {
            return Err(format!(
                "gaussian flux momentum requires a non-negative central momentum along \
                 the flux axis, got {} on axis {:?}",
                u_m[flux_normal_axis.index()],
                flux_normal_axis
            ));
        }
        Ok(Self {
            u_m,
            u_th,
            flux_normal_axis,
            flux_direction,
        })
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Vector3<f64> {
        let axis = self.flux_normal_axis.index();
        let mut u_flux = gaussian_flux_speed(self.u_m[axis], self.u_th[axis], rng);
        if self.flux_direction < 0 {
            u_flux = -u_flux;
        }

        let mut u = [0.0; 3];
        for i in 0..3 {
            u[i] = if i == axis {
                u_flux
            } else {
                random_normal(self.u_m[i], self.u_th[i], rng)
            };
        }
        Vector3::new(u[0], u[1], u[2])
    }

    /// Nominal bulk drift. This is the configured central momentum, not the
    /// flux-weighted statistical mean of `sample`; diagnostics downstream
    /// rely on the nominal value.
    #[inline]
    pub fn mean(&self) -> Vector3<f64> {
        Vector3::new(self.u_m[0], self.u_m[1], self.u_m[2])
    }
}

/// Uniform momentum in a per-axis [min, max] box.
#[derive(Debug, Clone, Copy)]
pub struct UniformMomentum {
    u_min: [f64; 3],
    u_range: [f64; 3],
    u_mid: [f64; 3],
}

impl UniformMomentum {
    /// Per-axis min <= max is the caller's responsibility.
    pub fn new(u_min: [f64; 3], u_max: [f64; 3]) -> Self {
        let mut u_range = [0.0; 3];
        let mut u_mid = [0.0; 3];
        for i in 0..3 {
            u_range[i] = u_max[i] - u_min[i];
            u_mid[i] = 0.5 * (u_max[i] + u_min[i]);
        }
        Self {
            u_min,
            u_range,
            u_mid,
        }
    }

    #[inline]
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Vector3<f64> {
        Vector3::new(
            self.u_min[0] + rng.gen::<f64>() * self.u_range[0],
            self.u_min[1] + rng.gen::<f64>() * self.u_range[1],
            self.u_min[2] + rng.gen::<f64>() * self.u_range[2],
        )
    }

    #[inline]
    pub fn mean(&self) -> Vector3<f64> {
        Vector3::new(self.u_mid[0], self.u_mid[1], self.u_mid[2])
    }
}

/// Radially expanding momentum, u = u_over_r * position.
///
/// `u_over_r` is the normalized momentum gamma*beta divided by the physical
/// position.
#[derive(Debug, Clone, Copy)]
pub struct RadialExpansionMomentum {
    u_over_r: f64,
}

impl RadialExpansionMomentum {
    pub fn new(u_over_r: f64) -> Self {
        Self { u_over_r }
    }

    #[inline]
    pub fn at(&self, x: f64, y: f64, z: f64) -> Vector3<f64> {
        self.u_over_r * Vector3::new(x, y, z)
    }
}

/// Momentum components evaluated from three user expressions of position.
#[derive(Clone, Copy)]
pub struct ParserMomentum<'a> {
    ux: &'a dyn PositionExpr,
    uy: &'a dyn PositionExpr,
    uz: &'a dyn PositionExpr,
}

impl<'a> ParserMomentum<'a> {
    pub fn new(
        ux: &'a dyn PositionExpr,
        uy: &'a dyn PositionExpr,
        uz: &'a dyn PositionExpr,
    ) -> Self {
        Self { ux, uy, uz }
    }

    #[inline]
    pub fn at(&self, x: f64, y: f64, z: f64) -> Vector3<f64> {
        Vector3::new(
            self.ux.eval(x, y, z),
            self.uy.eval(x, y, z),
            self.uz.eval(x, y, z),
        )
    }
}

impl std::fmt::Debug for ParserMomentum<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ParserMomentum(..)")
    }
}

/// One momentum distribution, chosen at configuration time.
///
/// The enum is the dispatch mechanism: per-particle calls go through a
/// `match`, not an indirect call, and the value is `Copy` so it can be
/// handed to any execution context. Samplers holding profile or expression
/// references borrow them; the owning configuration must outlive the
/// sampler.
#[derive(Debug, Clone, Copy)]
pub enum MomentumSampler<'a> {
    Constant(ConstantMomentum),
    Gaussian(GaussianMomentum),
    GaussianFlux(GaussianFluxMomentum),
    Uniform(UniformMomentum),
    Boltzmann(BoltzmannMomentum<'a>),
    Juttner(JuttnerMomentum<'a>),
    RadialExpansion(RadialExpansionMomentum),
    Parser(ParserMomentum<'a>),
}

impl<'a> MomentumSampler<'a> {
    pub fn kind(&self) -> MomentumKind {
        match self {
            MomentumSampler::Constant(_) => MomentumKind::Constant,
            MomentumSampler::Gaussian(_) => MomentumKind::Gaussian,
            MomentumSampler::GaussianFlux(_) => MomentumKind::GaussianFlux,
            MomentumSampler::Uniform(_) => MomentumKind::Uniform,
            MomentumSampler::Boltzmann(_) => MomentumKind::Boltzmann,
            MomentumSampler::Juttner(_) => MomentumKind::Juttner,
            MomentumSampler::RadialExpansion(_) => MomentumKind::RadialExpansion,
            MomentumSampler::Parser(_) => MomentumKind::Parser,
        }
    }

    /// Draw one momentum for a particle at the given position.
    pub fn sample<R: Rng + ?Sized>(&self, x: f64, y: f64, z: f64, rng: &mut R) -> Vector3<f64> {
        match self {
            MomentumSampler::Constant(s) => s.sample(rng),
            MomentumSampler::Gaussian(s) => s.sample(rng),
            MomentumSampler::GaussianFlux(s) => s.sample(rng),
            MomentumSampler::Uniform(s) => s.sample(rng),
            MomentumSampler::Boltzmann(s) => s.sample(x, y, z, rng),
            MomentumSampler::Juttner(s) => s.sample(x, y, z, rng),
            MomentumSampler::RadialExpansion(s) => s.at(x, y, z),
            MomentumSampler::Parser(s) => s.at(x, y, z),
        }
    }

    /// Bulk (drift) momentum at the given position.
    pub fn mean(&self, x: f64, y: f64, z: f64) -> Vector3<f64> {
        match self {
            MomentumSampler::Constant(s) => s.mean(),
            MomentumSampler::Gaussian(s) => s.mean(),
            MomentumSampler::GaussianFlux(s) => s.mean(),
            MomentumSampler::Uniform(s) => s.mean(),
            MomentumSampler::Boltzmann(s) => s.mean(x, y, z),
            MomentumSampler::Juttner(s) => s.mean(x, y, z),
            MomentumSampler::RadialExpansion(s) => s.at(x, y, z),
            MomentumSampler::Parser(s) => s.at(x, y, z),
        }
    }
}
