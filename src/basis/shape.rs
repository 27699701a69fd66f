//! The six-function local basis of a phase-space cell.
//!
//! With local coordinates ξ = (x - x_i)/Δx and η_d = (v_d - v_{j_d})/Δv, all in
//! [-1/2, 1/2], the basis is
//!
//! φ0 = 1, φ1 = ξ, φ2 = η1, φ3 = η2, φ4 = η3, φ5 = η1² + η2² + η3².
//!
//! φ1..φ4 are orthogonal to everything else; φ0 and φ5 are not, which is why
//! the rate projection mixes those two shapes through the inverse of their
//! 2×2 mass block.

/// Number of basis functions per phase-space cell.
pub const N_SHAPES: usize = 6;

/// Values for all six shapes of one cell.
pub type ShapeVector = [f64; N_SHAPES];

/// ∫ φ1² = ∫ φ2² = ... = 1/12 (normalized cell volume).
pub const LINEAR_NORM: f64 = 1.0 / 12.0;

/// ∫ φ5 over the normalized cell (= ∫ φ0 φ5).
pub const CLOSURE_MEAN: f64 = 1.0 / 4.0;

/// ∫ φ5² over the normalized cell.
pub const CLOSURE_NORM: f64 = 19.0 / 240.0;

/// ∫ η1² φ5 over the normalized cell.
pub const CLOSURE_V1_MOMENT: f64 = 19.0 / 720.0;

/// ∫ φ5 over a face η1 = ±1/2 (integrating η2, η3).
pub const CLOSURE_FACE_MEAN: f64 = 5.0 / 12.0;

/// ∫ φ5² over a face η1 = ±1/2 (integrating η2, η3).
pub const CLOSURE_FACE_NORM: f64 = 133.0 / 720.0;

/// Basis function selector.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Shape {
    /// Cell constant.
    Constant,
    /// Linear in the space coordinate.
    X,
    /// Linear in the first velocity component.
    V1,
    /// Linear in the second velocity component.
    V2,
    /// Linear in the third velocity component.
    V3,
    /// Quadratic |v|² closure shape.
    Closure,
}

impl Shape {
    /// All shapes in storage order.
    pub const ALL: [Shape; N_SHAPES] = [
        Shape::Constant,
        Shape::X,
        Shape::V1,
        Shape::V2,
        Shape::V3,
        Shape::Closure,
    ];

    /// Offset of this shape inside a cell record.
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Shape::Constant => 0,
            Shape::X => 1,
            Shape::V1 => 2,
            Shape::V2 => 3,
            Shape::V3 => 4,
            Shape::Closure => 5,
        }
    }

    /// Evaluate the shape at normalized local coordinates.
    pub fn eval(self, xi: f64, eta: [f64; 3]) -> f64 {
        match self {
            Shape::Constant => 1.0,
            Shape::X => xi,
            Shape::V1 => eta[0],
            Shape::V2 => eta[1],
            Shape::V3 => eta[2],
            Shape::Closure => eta[0] * eta[0] + eta[1] * eta[1] + eta[2] * eta[2],
        }
    }
}

/// Turn weak-form residuals into coefficient rates.
///
/// `tp[l]` is ∫ (transport residual) φ_l over the cell. Dividing by the mass
/// matrix gives dU/dt. The {φ0, φ5} block [[1, 1/4], [1/4, 19/240]] has
/// inverse [[19/4, -15], [-15, 60]]; the other shapes only need 1/(1/12).
///
/// `volume` is the physical cell volume Δx·Δv³.
#[inline]
pub fn project_rates(tp: &ShapeVector, volume: f64) -> ShapeVector {
    [
        (19.0 * tp[0] / 4.0 - 15.0 * tp[5]) / volume,
        12.0 * tp[1] / volume,
        12.0 * tp[2] / volume,
        12.0 * tp[3] / volume,
        12.0 * tp[4] / volume,
        (60.0 * tp[5] - 15.0 * tp[0]) / volume,
    ]
}
