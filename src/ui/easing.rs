/// A CSS-style cubic bezier timing curve through (0,0) and (1,1).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CubicBezier {
    ax: f64,
    bx: f64,
    cx: f64,
    ay: f64,
    by: f64,
    cy: f64,
}

impl CubicBezier {
    pub const fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        let cx = 3.0 * x1;
        let bx = 3.0 * (x2 - x1) - cx;
        let ax = 1.0 - cx - bx;
        let cy = 3.0 * y1;
        let by = 3.0 * (y2 - y1) - cy;
        let ay = 1.0 - cy - by;
        Self {
            ax,
            bx,
            cx,
            ay,
            by,
            cy,
        }
    }

    fn sample_x(&self, t: f64) -> f64 {
        ((self.ax * t + self.bx) * t + self.cx) * t
    }

    fn sample_y(&self, t: f64) -> f64 {
        ((self.ay * t + self.by) * t + self.cy) * t
    }

    fn sample_dx(&self, t: f64) -> f64 {
        (3.0 * self.ax * t + 2.0 * self.bx) * t + self.cx
    }

    /// Finds the curve parameter whose x equals `x`.
    fn solve_t(&self, x: f64) -> f64 {
        const EPSILON: f64 = 1e-7;

        let mut t = x;
        for _ in 0..8 {
            let err = self.sample_x(t) - x;
            if err.abs() < EPSILON {
                return t;
            }
            let dx = self.sample_dx(t);
            if dx.abs() < 1e-6 {
                break;
            }
            t -= err / dx;
        }

        // Newton stalled; bisect.
        let (mut lo, mut hi) = (0.0, 1.0);
        t = x;
        while lo < hi {
            let sample = self.sample_x(t);
            if (sample - x).abs() < EPSILON {
                break;
            }
            if x > sample {
                lo = t;
            } else {
                hi = t;
            }
            let next = (lo + hi) / 2.0;
            if next == t {
                break;
            }
            t = next;
        }
        t
    }

    pub fn y_at(&self, x: f64) -> f64 {
        self.sample_y(self.solve_t(x.clamp(0.0, 1.0)))
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Easing {
    Linear,
    /// The curve for the first half, mirrored for the second.
    InOut(CubicBezier),
}

impl Easing {
    /// Quadratic-ish ease: bezier (0.42, 0, 1, 1) applied in and out.
    pub const EASE_IN_OUT: Easing = Easing::InOut(CubicBezier::new(0.42, 0.0, 1.0, 1.0));

    /// Maps linear progress in `[0, 1]` to eased progress in `[0, 1]`.
    pub fn apply(&self, progress: f64) -> f64 {
        let t = progress.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::InOut(curve) => {
                if t < 0.5 {
                    curve.y_at(t * 2.0) / 2.0
                } else {
                    1.0 - curve.y_at((1.0 - t) * 2.0) / 2.0
                }
            }
        }
    }
}

impl Default for Easing {
    fn default() -> Self {
        Easing::EASE_IN_OUT
    }
}
