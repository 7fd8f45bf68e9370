//! Interpolation trait and the cubic Hermite dense output shared by all methods

use crate::Float;

/// Trait for interpolating the solution within a step.
pub trait Interpolate {
    /// Interpolate the solution at the given abscissa `xi`.
    fn interpolate(&self, xi: Float, yi: &mut [Float]);
}

/// Cubic Hermite interpolant over a single step `[x0, x0 + h]`, built from the
/// states and derivatives at both ends of the step.
///
/// At `xi == x0` the result is `y0` exactly and at `xi == x0 + h` it is `y1`
/// exactly, so evaluating at recorded samples never perturbs them.
pub struct CubicHermite<'a> {
    x0: Float,
    h: Float,
    y0: &'a [Float],
    y1: &'a [Float],
    dy0: &'a [Float],
    dy1: &'a [Float],
}

impl<'a> CubicHermite<'a> {
    pub fn new(
        x0: Float,
        h: Float,
        y0: &'a [Float],
        y1: &'a [Float],
        dy0: &'a [Float],
        dy1: &'a [Float],
    ) -> Self {
        Self {
            x0,
            h,
            y0,
            y1,
            dy0,
            dy1,
        }
    }

    /// Left end of the step.
    pub fn x0(&self) -> Float {
        self.x0
    }

    /// Right end of the step.
    pub fn x1(&self) -> Float {
        self.x0 + self.h
    }
}

impl Interpolate for CubicHermite<'_> {
    fn interpolate(&self, xi: Float, yi: &mut [Float]) {
        if self.h == 0.0 {
            yi.copy_from_slice(self.y0);
            return;
        }

        let t = (xi - self.x0) / self.h;
        let t2 = t * t;
        let t3 = t2 * t;

        let h00 = 2.0 * t3 - 3.0 * t2 + 1.0;
        let h10 = t3 - 2.0 * t2 + t;
        let h01 = -2.0 * t3 + 3.0 * t2;
        let h11 = t3 - t2;

        for i in 0..self.y0.len() {
            yi[i] = h00 * self.y0[i]
                + h10 * self.h * self.dy0[i]
                + h01 * self.y1[i]
                + h11 * self.h * self.dy1[i];
        }
    }
}
