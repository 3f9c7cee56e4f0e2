//! Derivative-free univariate minimization
//!
//! Downhill bracket expansion followed by Brent's method (golden-section
//! steps with parabolic interpolation). Non-finite objective values are
//! treated as strictly worse than any finite value, so a region where the
//! objective is undefined is never selected as a minimum.

use crate::error::{Result, SkewError};
use serde::{Deserialize, Serialize};
use tracing::debug;

const GOLDEN: f64 = 1.618034;
const CGOLD: f64 = 0.381_966_0;
const VERY_SMALL: f64 = 1e-21;
const MIN_TOL: f64 = 1.0e-11;

/// Starting points for the line search.
///
/// An `Interval` only seeds the downhill expansion: the minimum found may
/// lie outside it. A `Triple` must already bracket a minimum, i.e.
/// `a < b < c` with `f(b)` below both `f(a)` and `f(c)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Bracket {
    Interval(f64, f64),
    Triple(f64, f64, f64),
}

impl Default for Bracket {
    fn default() -> Self {
        Bracket::Interval(-2.0, 2.0)
    }
}

impl Bracket {
    /// Check that the points are finite and distinct (and ordered for a triple).
    pub fn validate(&self) -> Result<()> {
        let invalid = |reason: &str| SkewError::InvalidParameter {
            name: "bracket".to_string(),
            value: format!("{:?}", self),
            reason: reason.to_string(),
        };

        match *self {
            Bracket::Interval(a, b) => {
                if !a.is_finite() || !b.is_finite() {
                    return Err(invalid("bracket points must be finite"));
                }
                if a == b {
                    return Err(invalid("bracket points must be distinct"));
                }
            }
            Bracket::Triple(a, b, c) => {
                if !a.is_finite() || !b.is_finite() || !c.is_finite() {
                    return Err(invalid("bracket points must be finite"));
                }
                if !(a < b && b < c) {
                    return Err(invalid("triple must satisfy a < b < c"));
                }
            }
        }
        Ok(())
    }
}

/// Configuration for the bracket expansion and Brent iterations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrentConfig {
    /// Relative tolerance on the abscissa
    pub tol: f64,
    /// Maximum Brent iterations
    pub max_iter: usize,
    /// Maximum growth factor of a parabolic step while bracketing
    pub grow_limit: f64,
    /// Maximum bracket expansion iterations
    pub max_bracket_iter: usize,
}

impl Default for BrentConfig {
    fn default() -> Self {
        Self {
            tol: 1.48e-8,
            max_iter: 500,
            grow_limit: 110.0,
            max_bracket_iter: 1000,
        }
    }
}

/// Three points with `fb <= fa` and `fb <= fc`, `xb` between `xa` and `xc`.
#[derive(Debug, Clone, Copy)]
pub struct BracketPoints {
    pub xa: f64,
    pub xb: f64,
    pub xc: f64,
    pub fa: f64,
    pub fb: f64,
    pub fc: f64,
}

/// Result of a line search.
#[derive(Debug, Clone)]
pub struct LineSearchResult {
    /// Abscissa of the minimum
    pub x: f64,
    /// Objective value at `x`
    pub fx: f64,
    /// Brent iterations performed
    pub iterations: usize,
    /// Total objective evaluations, bracketing included
    pub func_calls: usize,
}

/// Map NaN and infinities to `+inf` so they compare as strictly worse.
#[inline]
fn guarded(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        f64::INFINITY
    }
}

/// Expand downhill from `(xa, xb)` until three points bracket a minimum.
pub fn bracket<F>(
    objective: F,
    xa: f64,
    xb: f64,
    config: &BrentConfig,
) -> Result<(BracketPoints, usize)>
where
    F: Fn(f64) -> f64,
{
    let f = |x: f64| guarded(objective(x));

    let (mut xa, mut xb) = (xa, xb);
    let mut fa = f(xa);
    let mut fb = f(xb);
    if fa < fb {
        std::mem::swap(&mut xa, &mut xb);
        std::mem::swap(&mut fa, &mut fb);
    }
    let mut xc = xb + GOLDEN * (xb - xa);
    let mut fc = f(xc);
    let mut func_calls = 3;
    let mut iter = 0;

    while fc < fb {
        let tmp1 = (xb - xa) * (fb - fc);
        let tmp2 = (xb - xc) * (fb - fa);
        let val = tmp2 - tmp1;
        let denom = if val.abs() < VERY_SMALL {
            2.0 * VERY_SMALL
        } else {
            2.0 * val
        };
        let mut w = xb - ((xb - xc) * tmp2 - (xb - xa) * tmp1) / denom;
        let wlim = xb + config.grow_limit * (xc - xb);

        if iter > config.max_bracket_iter {
            return Err(SkewError::ConvergenceError { iterations: iter });
        }
        iter += 1;

        let mut fw;
        if (w - xc) * (xb - w) > 0.0 {
            // parabolic w lies between xb and xc
            fw = f(w);
            func_calls += 1;
            if fw < fc {
                let points = BracketPoints { xa: xb, xb: w, xc, fa: fb, fb: fw, fc };
                return Ok((points, func_calls));
            } else if fw > fb {
                let points = BracketPoints { xa, xb, xc: w, fa, fb, fc: fw };
                return Ok((points, func_calls));
            }
            w = xc + GOLDEN * (xc - xb);
            fw = f(w);
            func_calls += 1;
        } else if (w - wlim) * (wlim - xc) >= 0.0 {
            w = wlim;
            fw = f(w);
            func_calls += 1;
        } else if (w - wlim) * (xc - w) > 0.0 {
            fw = f(w);
            func_calls += 1;
            if fw < fc {
                xb = xc;
                xc = w;
                w = xc + GOLDEN * (xc - xb);
                fb = fc;
                fc = fw;
                fw = f(w);
                func_calls += 1;
            }
        } else {
            w = xc + GOLDEN * (xc - xb);
            fw = f(w);
            func_calls += 1;
        }

        xa = xb;
        xb = xc;
        xc = w;
        fa = fb;
        fb = fc;
        fc = fw;
    }

    Ok((BracketPoints { xa, xb, xc, fa, fb, fc }, func_calls))
}

/// Minimize `objective` with Brent's method, starting from `start`.
///
/// Fails with [`SkewError::EstimationDegeneracy`] when the objective is
/// non-finite over every explored point, and with
/// [`SkewError::ConvergenceError`] when an iteration cap is hit.
pub fn brent_minimize<F>(
    objective: F,
    start: Bracket,
    config: &BrentConfig,
) -> Result<LineSearchResult>
where
    F: Fn(f64) -> f64,
{
    start.validate()?;
    let f = |x: f64| guarded(objective(x));

    let (points, mut func_calls) = match start {
        Bracket::Interval(a, b) => bracket(&f, a, b, config)?,
        Bracket::Triple(a, b, c) => {
            let (fa, fb, fc) = (f(a), f(b), f(c));
            if !(fb < fa && fb < fc) {
                if !fb.is_finite() && !fa.is_finite() && !fc.is_finite() {
                    return Err(SkewError::EstimationDegeneracy(
                        "objective is non-finite at every bracket point".to_string(),
                    ));
                }
                return Err(SkewError::InvalidParameter {
                    name: "bracket".to_string(),
                    value: format!("{:?}", start),
                    reason: "f(b) must be below f(a) and f(c)".to_string(),
                });
            }
            (BracketPoints { xa: a, xb: b, xc: c, fa, fb, fc }, 3)
        }
    };

    let BracketPoints { xa, xb, xc, fa, fb, fc } = points;
    if !xa.is_finite() || !xb.is_finite() || !xc.is_finite() {
        return Err(SkewError::EstimationDegeneracy(
            "bracket expansion diverged without enclosing a minimum".to_string(),
        ));
    }
    if !fa.is_finite() && !fb.is_finite() && !fc.is_finite() {
        return Err(SkewError::EstimationDegeneracy(
            "objective is non-finite at every bracket point".to_string(),
        ));
    }
    debug!(xa, xb, xc, func_calls, "bracket found");

    let (mut a, mut b) = if xa < xc { (xa, xc) } else { (xc, xa) };
    let (mut x, mut w, mut v) = (xb, xb, xb);
    let (mut fx, mut fw, mut fv) = (fb, fb, fb);
    let mut deltax: f64 = 0.0;
    let mut rat: f64 = 0.0;
    let mut iter = 0;

    loop {
        if iter >= config.max_iter {
            return Err(SkewError::ConvergenceError { iterations: iter });
        }

        let tol1 = config.tol * x.abs() + MIN_TOL;
        let tol2 = 2.0 * tol1;
        let xmid = 0.5 * (a + b);
        if (x - xmid).abs() < tol2 - 0.5 * (b - a) {
            break;
        }

        if deltax.abs() <= tol1 {
            deltax = if x >= xmid { a - x } else { b - x };
            rat = CGOLD * deltax;
        } else {
            let tmp1 = (x - w) * (fx - fv);
            let mut tmp2 = (x - v) * (fx - fw);
            let mut p = (x - v) * tmp2 - (x - w) * tmp1;
            tmp2 = 2.0 * (tmp2 - tmp1);
            if tmp2 > 0.0 {
                p = -p;
            }
            tmp2 = tmp2.abs();
            let dx_temp = deltax;
            deltax = rat;

            if p > tmp2 * (a - x) && p < tmp2 * (b - x) && p.abs() < (0.5 * tmp2 * dx_temp).abs() {
                rat = p / tmp2;
                let u = x + rat;
                if (u - a) < tol2 || (b - u) < tol2 {
                    rat = if xmid - x >= 0.0 { tol1 } else { -tol1 };
                }
            } else {
                deltax = if x >= xmid { a - x } else { b - x };
                rat = CGOLD * deltax;
            }
        }

        let u = if rat.abs() < tol1 {
            if rat >= 0.0 {
                x + tol1
            } else {
                x - tol1
            }
        } else {
            x + rat
        };
        let fu = f(u);
        func_calls += 1;

        if fu > fx {
            if u < x {
                a = u;
            } else {
                b = u;
            }
            if fu <= fw || w == x {
                v = w;
                w = u;
                fv = fw;
                fw = fu;
            } else if fu <= fv || v == x || v == w {
                v = u;
                fv = fu;
            }
        } else {
            if u >= x {
                a = x;
            } else {
                b = x;
            }
            v = w;
            w = x;
            x = u;
            fv = fw;
            fw = fx;
            fx = fu;
        }
        iter += 1;
    }

    if !fx.is_finite() {
        return Err(SkewError::EstimationDegeneracy(
            "objective is non-finite across the explored neighborhood".to_string(),
        ));
    }

    debug!(x, fx, iterations = iter, func_calls, "line search converged");
    Ok(LineSearchResult {
        x,
        fx,
        iterations: iter,
        func_calls,
    })
}
