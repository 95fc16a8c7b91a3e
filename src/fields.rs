// Spatial profile contracts consumed by the momentum samplers.
//
// Temperature and drift velocity may vary with position (constant value or a
// user expression); the samplers only ever see a scalar per call. Profiles
// are borrowed by the samplers, never copied, so the configuration object
// that owns them must outlive every sampler built from them.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Coordinate axis, used for the flux normal and the boost direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// Index into a `[f64; 3]` component array.
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }
}

/// A pure arithmetic expression of position, safe to evaluate concurrently.
///
/// Implemented for any `Fn(f64, f64, f64) -> f64 + Sync`, so a parsed
/// expression tree, a tabulated lookup, or a plain closure all qualify.
pub trait PositionExpr: Sync {
    fn eval(&self, x: f64, y: f64, z: f64) -> f64;
}

impl<F> PositionExpr for F
where
    F: Fn(f64, f64, f64) -> f64 + Sync,
{
    #[inline]
    fn eval(&self, x: f64, y: f64, z: f64) -> f64 {
        self(x, y, z)
    }
}

/// A scalar field over position: either a constant or a borrowed expression.
#[derive(Clone, Copy)]
pub enum ScalarField<'a> {
    Constant(f64),
    Expr(&'a dyn PositionExpr),
}

impl ScalarField<'_> {
    #[inline]
    pub fn at(&self, x: f64, y: f64, z: f64) -> f64 {
        match self {
            ScalarField::Constant(v) => *v,
            ScalarField::Expr(f) => f.eval(x, y, z),
        }
    }
}

impl fmt::Debug for ScalarField<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScalarField::Constant(v) => f.debug_tuple("Constant").field(v).finish(),
            ScalarField::Expr(_) => f.write_str("Expr(..)"),
        }
    }
}

/// Temperature parameter theta as a function of position.
///
/// Theta is the thermal spread in normalized momentum units; validity
/// (theta >= 0, and >= 0.1 for Maxwell-Juttner) is checked by the samplers
/// at call time since the profile may be invalid only somewhere in the
/// domain.
#[derive(Debug, Clone, Copy)]
pub struct TemperatureProfile<'a> {
    field: ScalarField<'a>,
}

impl<'a> TemperatureProfile<'a> {
    pub fn constant(theta: f64) -> Self {
        Self {
            field: ScalarField::Constant(theta),
        }
    }

    pub fn from_expr(expr: &'a dyn PositionExpr) -> Self {
        Self {
            field: ScalarField::Expr(expr),
        }
    }

    #[inline]
    pub fn at(&self, x: f64, y: f64, z: f64) -> f64 {
        self.field.at(x, y, z)
    }
}

/// Drift velocity fraction beta as a function of position, together with the
/// fixed axis the drift (and hence the Lorentz boost) acts along.
#[derive(Debug, Clone, Copy)]
pub struct VelocityProfile<'a> {
    field: ScalarField<'a>,
    axis: Axis,
}

impl<'a> VelocityProfile<'a> {
    pub fn constant(beta: f64, axis: Axis) -> Self {
        Self {
            field: ScalarField::Constant(beta),
            axis,
        }
    }

    pub fn from_expr(expr: &'a dyn PositionExpr, axis: Axis) -> Self {
        Self {
            field: ScalarField::Expr(expr),
            axis,
        }
    }

    #[inline]
    pub fn beta(&self, x: f64, y: f64, z: f64) -> f64 {
        self.field.at(x, y, z)
    }

    #[inline]
    pub fn axis(&self) -> Axis {
        self.axis
    }
}
