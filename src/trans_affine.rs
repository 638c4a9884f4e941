//! Affine transformation matrix.
//!
//! 2D affine transformations limited to what the canvas needs: translation,
//! rotation (including exact quarter turns), uniform scaling and matrix
//! composition.

/// 2D affine transformation matrix.
///
/// Stores six components: `[sx, shy, shx, sy, tx, ty]` representing the
/// matrix:
///
/// ```text
///   | sx  shx tx |
///   | shy  sy ty |
///   |  0    0  1 |
/// ```
///
/// Transform: `x' = x*sx + y*shx + tx`, `y' = x*shy + y*sy + ty`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransAffine {
    pub sx: f64,
    pub shy: f64,
    pub shx: f64,
    pub sy: f64,
    pub tx: f64,
    pub ty: f64,
}

impl TransAffine {
    // ====================================================================
    // Construction
    // ====================================================================

    /// Identity matrix.
    pub const fn new() -> Self {
        Self::new_custom(1.0, 0.0, 0.0, 1.0, 0.0, 0.0)
    }

    /// Custom matrix from six components.
    pub const fn new_custom(sx: f64, shy: f64, shx: f64, sy: f64, tx: f64, ty: f64) -> Self {
        Self {
            sx,
            shy,
            shx,
            sy,
            tx,
            ty,
        }
    }

    /// Rotation matrix (angle in radians, clockwise on a y-down raster).
    pub fn new_rotation(a: f64) -> Self {
        let (sa, ca) = a.sin_cos();
        Self::new_custom(ca, sa, -sa, ca, 0.0, 0.0)
    }

    /// Rotation by `turns` × 90° with exact integer coefficients.
    ///
    /// `sin_cos` of multiples of π/2 leaves residue around 1e-16, which is
    /// enough to make rotated copies of a shape differ in the last
    /// coverage bit.
    pub const fn new_quarter_turns(turns: u32) -> Self {
        match turns % 4 {
            0 => Self::new(),
            1 => Self::new_custom(0.0, 1.0, -1.0, 0.0, 0.0, 0.0),
            2 => Self::new_custom(-1.0, 0.0, 0.0, -1.0, 0.0, 0.0),
            _ => Self::new_custom(0.0, -1.0, 1.0, 0.0, 0.0, 0.0),
        }
    }

    /// Uniform scaling matrix.
    pub const fn new_scaling_uniform(s: f64) -> Self {
        Self::new_custom(s, 0.0, 0.0, s, 0.0, 0.0)
    }

    /// Translation matrix.
    pub const fn new_translation(x: f64, y: f64) -> Self {
        Self::new_custom(1.0, 0.0, 0.0, 1.0, x, y)
    }

    // ====================================================================
    // Operations (mutate self)
    // ====================================================================

    /// Reset to identity.
    pub fn reset(&mut self) -> &mut Self {
        *self = Self::new();
        self
    }

    /// Post-translate: the translation is applied after the current matrix.
    pub fn translate(&mut self, x: f64, y: f64) -> &mut Self {
        self.tx += x;
        self.ty += y;
        self
    }

    /// Post-multiply: `self = self * m` (apply `self` first, then `m`).
    pub fn multiply(&mut self, m: &TransAffine) -> &mut Self {
        let t0 = self.sx * m.sx + self.shy * m.shx;
        let t2 = self.shx * m.sx + self.sy * m.shx;
        let t4 = self.tx * m.sx + self.ty * m.shx + m.tx;
        self.shy = self.sx * m.shy + self.shy * m.sy;
        self.sy = self.shx * m.shy + self.sy * m.sy;
        self.ty = self.tx * m.shy + self.ty * m.sy + m.ty;
        self.sx = t0;
        self.shx = t2;
        self.tx = t4;
        self
    }

    /// Pre-multiply: `self = m * self` (apply `m` first, then `self`).
    ///
    /// This is how a canvas concatenates a local transform: the new
    /// operation acts in the current local coordinate frame.
    pub fn premultiply(&mut self, m: &TransAffine) -> &mut Self {
        let mut t = *m;
        t.multiply(self);
        *self = t;
        self
    }

    // ====================================================================
    // Transformations
    // ====================================================================

    /// Forward transform: `(x, y) -> (x', y')`.
    #[inline]
    pub fn transform(&self, x: &mut f64, y: &mut f64) {
        let tmp = *x;
        *x = tmp * self.sx + *y * self.shx + self.tx;
        *y = tmp * self.shy + *y * self.sy + self.ty;
    }

    /// Average scale factor; used to convert a device stroke width into the
    /// local frame.
    pub fn scale(&self) -> f64 {
        let s = std::f64::consts::FRAC_1_SQRT_2;
        let x = s * self.sx + s * self.shx;
        let y = s * self.shy + s * self.sy;
        (x * x + y * y).sqrt()
    }

    /// Returns `true` if the matrix is the identity.
    pub fn is_identity(&self) -> bool {
        *self == Self::new()
    }
}

impl Default for TransAffine {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================
