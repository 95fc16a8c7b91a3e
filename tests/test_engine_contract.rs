// The samplers accept any rand::Rng, so a host code can plug in its own
// engine. Exercise the full distribution set through a third-party PCG
// engine and through the crate's own stream type.

use momentum_for_pic::{
    gaussian_flux_speed, Axis, BoltzmannMomentum, MomentumSampler, MomentumSettings, PrnStream,
    TemperatureProfile, VelocityProfile,
};
use rand::SeedableRng;
use rand_pcg::Pcg64Mcg;

#[test]
fn test_distribution_set_with_pcg_engine() {
    let mut rng = Pcg64Mcg::seed_from_u64(7);

    let docs = [
        r#"{"distribution": "constant", "ux": 0.1}"#,
        r#"{"distribution": "gaussian", "ux_th": 0.1, "uy_th": 0.1, "uz_th": 0.1}"#,
        r#"{"distribution": "uniform", "ux_min": -1.0, "ux_max": 1.0}"#,
        r#"{"distribution": "radial_expansion", "u_over_r": 0.5}"#,
        r#"{
            "distribution": "gaussian_flux",
            "uy_m": 0.3,
            "uy_th": 0.1,
            "flux_normal_axis": "y",
            "flux_direction": 1
        }"#,
    ];
    for doc in docs {
        let settings: MomentumSettings = serde_json::from_str(doc).unwrap();
        let sampler = settings.build(None, None).unwrap();
        for _ in 0..100 {
            let u = sampler.sample(1.0, 2.0, 3.0, &mut rng);
            assert!(u.x.is_finite() && u.y.is_finite() && u.z.is_finite());
        }
    }

    let temperature = TemperatureProfile::constant(0.25);
    let velocity = VelocityProfile::constant(0.5, Axis::Z);
    let sampler = MomentumSampler::Boltzmann(BoltzmannMomentum::new(&temperature, &velocity));
    for _ in 0..100 {
        let u = sampler.sample(1.0, 2.0, 3.0, &mut rng);
        assert!(u.norm().is_finite());
    }
}

#[test]
fn test_flux_kernel_engine_agnostic() {
    // The degenerate branch ignores the engine entirely.
    let mut pcg = Pcg64Mcg::seed_from_u64(1);
    let mut stream = PrnStream::new(2);
    assert_eq!(gaussian_flux_speed(0.7, 0.0, &mut pcg), 0.7);
    assert_eq!(gaussian_flux_speed(0.7, 0.0, &mut stream), 0.7);

    // Both engines sample the same distribution
    let n = 200_000;
    let mut sum_pcg = 0.0;
    let mut sum_stream = 0.0;
    for _ in 0..n {
        sum_pcg += gaussian_flux_speed(2.0, 0.5, &mut pcg);
        sum_stream += gaussian_flux_speed(2.0, 0.5, &mut stream);
    }
    let mean_pcg = sum_pcg / n as f64;
    let mean_stream = sum_stream / n as f64;
    assert!(
        (mean_pcg - mean_stream).abs() < 0.01,
        "pcg mean = {}, stream mean = {}",
        mean_pcg,
        mean_stream
    );
}
