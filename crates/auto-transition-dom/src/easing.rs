//! CSS timing functions.

use crate::error::ParseError;

/// Linearly interpolate between two values
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Where a stepping function jumps
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepPosition {
    Start,
    End,
}

/// A CSS `<easing-function>`: takes progress (0.0 to 1.0) and returns eased progress
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TimingFunction {
    Linear,
    CubicBezier { x1: f64, y1: f64, x2: f64, y2: f64 },
    Steps { count: u32, position: StepPosition },
}

impl TimingFunction {
    pub const EASE: Self = Self::cubic_bezier(0.25, 0.1, 0.25, 1.0);
    pub const EASE_IN: Self = Self::cubic_bezier(0.42, 0.0, 1.0, 1.0);
    pub const EASE_OUT: Self = Self::cubic_bezier(0.0, 0.0, 0.58, 1.0);
    pub const EASE_IN_OUT: Self = Self::cubic_bezier(0.42, 0.0, 0.58, 1.0);

    pub const fn cubic_bezier(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self::CubicBezier { x1, y1, x2, y2 }
    }

    /// Parse a keyword, `cubic-bezier(...)` or `steps(...)`
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        let text = text.trim();
        let unknown = || ParseError::TimingFunction(text.to_string());

        match text {
            "linear" => return Ok(Self::Linear),
            "ease" => return Ok(Self::EASE),
            "ease-in" => return Ok(Self::EASE_IN),
            "ease-out" => return Ok(Self::EASE_OUT),
            "ease-in-out" => return Ok(Self::EASE_IN_OUT),
            "step-start" => {
                return Ok(Self::Steps {
                    count: 1,
                    position: StepPosition::Start,
                })
            }
            "step-end" => {
                return Ok(Self::Steps {
                    count: 1,
                    position: StepPosition::End,
                })
            }
            _ => {}
        }

        let (name, args) = function_args(text).ok_or_else(unknown)?;
        match name {
            "cubic-bezier" => {
                let values = args
                    .iter()
                    .map(|arg| arg.parse::<f64>().ok().filter(|v| v.is_finite()))
                    .collect::<Option<Vec<_>>>()
                    .ok_or_else(unknown)?;
                let &[x1, y1, x2, y2] = values.as_slice() else {
                    return Err(unknown());
                };
                // x control points must stay within the unit interval
                if !(0.0..=1.0).contains(&x1) || !(0.0..=1.0).contains(&x2) {
                    return Err(unknown());
                }
                Ok(Self::cubic_bezier(x1, y1, x2, y2))
            }
            "steps" => {
                let count = args
                    .first()
                    .and_then(|count| count.parse::<u32>().ok())
                    .filter(|count| *count > 0)
                    .ok_or_else(unknown)?;
                let position = match args.get(1).copied() {
                    None | Some("end") | Some("jump-end") => StepPosition::End,
                    Some("start") | Some("jump-start") => StepPosition::Start,
                    Some(_) => return Err(unknown()),
                };
                if args.len() > 2 {
                    return Err(unknown());
                }
                Ok(Self::Steps { count, position })
            }
            _ => Err(unknown()),
        }
    }

    /// Eased progress for linear progress `t`
    pub fn apply(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match *self {
            Self::Linear => t,
            Self::CubicBezier { x1, y1, x2, y2 } => {
                let curve = UnitBezier::new(x1, y1, x2, y2);
                curve.sample_y(curve.solve_x(t))
            }
            Self::Steps { count, position } => {
                let count = count as f64;
                let step = match position {
                    StepPosition::Start => (t * count).floor() + 1.0,
                    StepPosition::End => (t * count).floor(),
                };
                (step / count).clamp(0.0, 1.0)
            }
        }
    }
}

impl Default for TimingFunction {
    fn default() -> Self {
        Self::EASE
    }
}

/// Split `name(a, b, c)` into its name and trimmed arguments
fn function_args(text: &str) -> Option<(&str, Vec<&str>)> {
    let open = text.find('(')?;
    let inner = text[open + 1..].strip_suffix(')')?;
    let name = text[..open].trim();
    let args = inner.split(',').map(str::trim).collect();
    Some((name, args))
}

/// Cubic bezier with endpoints fixed at (0, 0) and (1, 1)
struct UnitBezier {
    ax: f64,
    bx: f64,
    cx: f64,
    ay: f64,
    by: f64,
    cy: f64,
}

impl UnitBezier {
    const EPSILON: f64 = 1e-7;

    fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        let cx = 3.0 * x1;
        let bx = 3.0 * (x2 - x1) - cx;
        let cy = 3.0 * y1;
        let by = 3.0 * (y2 - y1) - cy;
        Self {
            ax: 1.0 - cx - bx,
            bx,
            cx,
            ay: 1.0 - cy - by,
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

    /// Curve parameter whose x equals `x`
    fn solve_x(&self, x: f64) -> f64 {
        // Newton's method first, it converges in a few steps for most curves
        let mut t = x;
        for _ in 0..8 {
            let error = self.sample_x(t) - x;
            if error.abs() < Self::EPSILON {
                return t;
            }
            let dx = self.sample_dx(t);
            if dx.abs() < 1e-6 {
                break;
            }
            t -= error / dx;
        }

        // Fall back to bisection
        let (mut lo, mut hi) = (0.0, 1.0);
        t = x;
        while lo < hi {
            let sample = self.sample_x(t);
            if (sample - x).abs() < Self::EPSILON {
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
}
