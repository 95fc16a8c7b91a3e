// Momentum distribution settings parsed from configuration input.
//
// `MomentumSettings` is the serializable description of one distribution;
// `build` validates it once and produces the sampler used for the rest of
// the run. The parser kind is not represented here: expression handles are
// bound directly through `ParserMomentum::new` by whichever layer owns the
// parsed expressions.

use serde::{Deserialize, Serialize};

use crate::fields::{Axis, TemperatureProfile, VelocityProfile};
use crate::momentum::{
    ConstantMomentum, GaussianFluxMomentum, GaussianMomentum, MomentumKind, MomentumSampler,
    RadialExpansionMomentum, UniformMomentum,
};
use crate::relativistic::{BoltzmannMomentum, JuttnerMomentum};

fn zero() -> f64 {
    0.0
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "distribution", rename_all = "snake_case")]
pub enum MomentumSettings {
    Constant {
        #[serde(default = "zero")]
        ux: f64,
        #[serde(default = "zero")]
        uy: f64,
        #[serde(default = "zero")]
        uz: f64,
    },
    Gaussian {
        #[serde(default = "zero")]
        ux_m: f64,
        #[serde(default = "zero")]
        uy_m: f64,
        #[serde(default = "zero")]
        uz_m: f64,
        #[serde(default = "zero")]
        ux_th: f64,
        #[serde(default = "zero")]
        uy_th: f64,
        #[serde(default = "zero")]
        uz_th: f64,
    },
    GaussianFlux {
        #[serde(default = "zero")]
        ux_m: f64,
        #[serde(default = "zero")]
        uy_m: f64,
        #[serde(default = "zero")]
        uz_m: f64,
        #[serde(default = "zero")]
        ux_th: f64,
        #[serde(default = "zero")]
        uy_th: f64,
        #[serde(default = "zero")]
        uz_th: f64,
        flux_normal_axis: Axis,
        flux_direction: i32,
    },
    Uniform {
        #[serde(default = "zero")]
        ux_min: f64,
        #[serde(default = "zero")]
        uy_min: f64,
        #[serde(default = "zero")]
        uz_min: f64,
        #[serde(default = "zero")]
        ux_max: f64,
        #[serde(default = "zero")]
        uy_max: f64,
        #[serde(default = "zero")]
        uz_max: f64,
    },
    Boltzmann,
    Juttner,
    RadialExpansion {
        u_over_r: f64,
    },
}

impl MomentumSettings {
    pub fn kind(&self) -> MomentumKind {
        match self {
            MomentumSettings::Constant { .. } => MomentumKind::Constant,
            MomentumSettings::Gaussian { .. } => MomentumKind::Gaussian,
            MomentumSettings::GaussianFlux { .. } => MomentumKind::GaussianFlux,
            MomentumSettings::Uniform { .. } => MomentumKind::Uniform,
            MomentumSettings::Boltzmann => MomentumKind::Boltzmann,
            MomentumSettings::Juttner => MomentumKind::Juttner,
            MomentumSettings::RadialExpansion { .. } => MomentumKind::RadialExpansion,
        }
    }

    /// Validate the settings and build the sampler.
    ///
    /// The thermal kinds borrow the given profiles; both must be present
    /// for Boltzmann and Juttner and must outlive the returned sampler.
    pub fn build<'a>(
        &self,
        temperature: Option<&'a TemperatureProfile<'a>>,
        velocity: Option<&'a VelocityProfile<'a>>,
    ) -> Result<MomentumSampler<'a>, String> {
        match *self {
            MomentumSettings::Constant { ux, uy, uz } => Ok(MomentumSampler::Constant(
                ConstantMomentum::new(ux, uy, uz),
            )),
            MomentumSettings::Gaussian {
                ux_m,
                uy_m,
                uz_m,
                ux_th,
                uy_th,
                uz_th,
            } => Ok(MomentumSampler::Gaussian(GaussianMomentum::new(
                ux_m, uy_m, uz_m, ux_th, uy_th, uz_th,
            ))),
            MomentumSettings::GaussianFlux {
                ux_m,
                uy_m,
                uz_m,
                ux_th,
                uy_th,
                uz_th,
                flux_normal_axis,
                flux_direction,
            } => {
                if flux_direction != 1 && flux_direction != -1 {
                    return Err(format!(
                        "flux_direction must be +1 or -1, got {}",
                        flux_direction
                    ));
                }
                let sampler = GaussianFluxMomentum::new(
                    [ux_m, uy_m, uz_m],
                    [ux_th, uy_th, uz_th],
                    flux_normal_axis,
                    flux_direction,
                )?;
                Ok(MomentumSampler::GaussianFlux(sampler))
            }
            MomentumSettings::Uniform {
                ux_min,
                uy_min,
                uz_min,
                ux_max,
                uy_max,
                uz_max,
            } => Ok(MomentumSampler::Uniform(UniformMomentum::new(
                [ux_min, uy_min, uz_min],
                [ux_max, uy_max, uz_max],
            ))),
            MomentumSettings::Boltzmann => {
                let (t, v) = require_profiles("boltzmann", temperature, velocity)?;
                Ok(MomentumSampler::Boltzmann(BoltzmannMomentum::new(t, v)))
            }
            MomentumSettings::Juttner => {
                let (t, v) = require_profiles("juttner", temperature, velocity)?;
                Ok(MomentumSampler::Juttner(JuttnerMomentum::new(t, v)))
            }
            MomentumSettings::RadialExpansion { u_over_r } => Ok(
                MomentumSampler::RadialExpansion(RadialExpansionMomentum::new(u_over_r)),
            ),
        }
    }
}

fn require_profiles<'a>(
    kind: &str,
    temperature: Option<&'a TemperatureProfile<'a>>,
    velocity: Option<&'a VelocityProfile<'a>>,
) -> Result<(&'a TemperatureProfile<'a>, &'a VelocityProfile<'a>), String> {
    match (temperature, velocity) {
        (Some(t), Some(v)) => Ok((t, v)),
        _ => Err(format!(
            "the {} distribution requires both a temperature and a velocity profile",
            kind
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Vector3;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_parse_constant_from_json() {
        let settings: MomentumSettings =
            serde_json::from_str(r#"{"distribution": "constant", "uz": 0.5}"#).unwrap();
        assert_eq!(settings.kind(), MomentumKind::Constant);

        let sampler = settings.build(None, None).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(
            sampler.sample(0.0, 0.0, 0.0, &mut rng),
            Vector3::new(0.0, 0.0, 0.5)
        );
    }

    #[test]
    fn test_parse_gaussian_flux_from_json() {
        let settings: MomentumSettings = serde_json::from_str(
            r#"{
                "distribution": "gaussian_flux",
                "uz_m": 0.1,
                "ux_th": 0.01,
                "uy_th": 0.01,
                "uz_th": 0.05,
                "flux_normal_axis": "z",
                "flux_direction": -1
            }"#,
        )
        .unwrap();
        assert_eq!(settings.kind(), MomentumKind::GaussianFlux);
        let sampler = settings.build(None, None).unwrap();

        let mut rng = StdRng::seed_from_u64(2);
        let u = sampler.sample(0.0, 0.0, 0.0, &mut rng);
        assert!(u.z < 0.0);
    }

    #[test]
    fn test_gaussian_flux_negative_drift_rejected_at_build() {
        let settings: MomentumSettings = serde_json::from_str(
            r#"{
                "distribution": "gaussian_flux",
                "ux_m": -1.0,
                "flux_normal_axis": "x",
                "flux_direction": 1
            }"#,
        )
        .unwrap();
        let err = settings.build(None, None).unwrap_err();
        assert!(err.contains("non-negative central momentum"), "{}", err);
    }

    #[test]
    fn test_invalid_flux_direction_rejected() {
        let settings = MomentumSettings::GaussianFlux {
            ux_m: 0.0,
            uy_m: 0.0,
            uz_m: 0.0,
            ux_th: 0.1,
            uy_th: 0.1,
            uz_th: 0.1,
            flux_normal_axis: Axis::X,
            flux_direction: 0,
        };
        let err = settings.build(None, None).unwrap_err();
        assert!(err.contains("flux_direction"), "{}", err);
    }

    #[test]
    fn test_thermal_kinds_require_profiles() {
        let err = MomentumSettings::Boltzmann.build(None, None).unwrap_err();
        assert!(err.contains("temperature"), "{}", err);

        let temperature = TemperatureProfile::constant(0.5);
        let err = MomentumSettings::Juttner
            .build(Some(&temperature), None)
            .unwrap_err();
        assert!(err.contains("velocity"), "{}", err);
    }

    #[test]
    fn test_build_juttner_with_profiles() {
        let settings: MomentumSettings =
            serde_json::from_str(r#"{"distribution": "juttner"}"#).unwrap();
        let temperature = TemperatureProfile::constant(1.0);
        let velocity = VelocityProfile::constant(0.2, Axis::Z);
        let sampler = settings.build(Some(&temperature), Some(&velocity)).unwrap();
        assert_eq!(sampler.kind(), MomentumKind::Juttner);

        let mut rng = StdRng::seed_from_u64(3);
        let u = sampler.sample(0.0, 0.0, 0.0, &mut rng);
        assert!(u.norm() > 0.0);
    }

    #[test]
    fn test_settings_round_trip() {
        let settings = MomentumSettings::Uniform {
            ux_min: -0.1,
            uy_min: 0.0,
            uz_min: 0.0,
            ux_max: 0.1,
            uy_max: 0.0,
            uz_max: 2.0,
        };
        let json = serde_json::to_string(&settings).unwrap();
        let back: MomentumSettings = serde_json::from_str(&json).unwrap();
        assert_eq!(back.kind(), MomentumKind::Uniform);

        let sampler = back.build(None, None).unwrap();
        assert_eq!(sampler.mean(0.0, 0.0, 0.0), Vector3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn test_radial_expansion_settings() {
        let settings: MomentumSettings =
            serde_json::from_str(r#"{"distribution": "radial_expansion", "u_over_r": 2.0}"#)
                .unwrap();
        let sampler = settings.build(None, None).unwrap();
        assert_eq!(sampler.mean(3.0, 0.0, 4.0), Vector3::new(6.0, 0.0, 8.0));
    }
}
