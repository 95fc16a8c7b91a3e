// Flux-weighted speed sampling for surface particle injection.

use rand::Rng;

use crate::engine::random_normal;

/// Sample a speed u from the flux-weighted distribution
/// p(u) ∝ u exp(-(u - u_m)² / 2 u_th²), u > 0.
///
/// `u_m` is the central momentum and `u_th` the spread. Two rejection
/// regimes are used, switching at u_m = 0.6 u_th; the threshold and both
/// proposal families follow Zenitani 2015 (Phys. Plasmas 22, 042116) and
/// are not tunable. Both loops terminate with probability 1 and carry no
/// iteration cap, since a cap would bias the tail of the distribution.
pub fn gaussian_flux_speed<R: Rng + ?Sized>(u_m: f64, u_th: f64, rng: &mut R) -> f64 {
    if u_th == 0.0 {
        // Degenerate spread; avoids division by zero below
        return u_m;
    }

    if u_m < 0.6 * u_th {
        // Drift small relative to the spread. Propose from
        // u exp(-u² / 2 approx_u_th²) via the inverse cumulative function,
        // then reject with probability exp(-prefactor (u - u_th)²).
        // This is the branch taken in the common case u_m = 0.
        let approx_u_th = u_th / (1.0 - u_m / u_th).sqrt();
        let reject_prefactor = (u_m / u_th) / (2.0 * u_th * u_th);
        loop {
            let xrand = 1.0 - rng.gen::<f64>(); // in (0, 1], valid log argument
            let u = approx_u_th * (2.0 * (1.0 / xrand).ln()).sqrt();
            let accept = (-reject_prefactor * (u - u_th) * (u - u_th)).exp();
            if rng.gen::<f64>() < accept {
                return u;
            }
        }
    } else {
        // Drift dominates the spread. Propose from a normal distribution
        // centered at u_m + u_th²/u_m, redrawing while negative, then
        // reject with probability (u/u_m) exp(1 - u/u_m), which is always
        // in [0, 1].
        let approx_u_m = u_m + u_th * u_th / u_m;
        let inv_um = 1.0 / u_m;
        loop {
            let mut u = -1.0;
            while u < 0.0 {
                u = random_normal(approx_u_m, u_th, rng);
            }
            if rng.gen::<f64>() < u * inv_um * (1.0 - u * inv_um).exp() {
                return u;
            }
        }
    }
}
