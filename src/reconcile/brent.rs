//! Bracketed scalar root finding: Brent's method and an interval search.

use tracing::debug;

use crate::error::YieldError;

/// A closed search interval `[start, end]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub start: f64,
    pub end: f64,
}

impl Interval {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    pub fn mid(&self) -> f64 {
        (self.start + self.end) / 2.0
    }
}

/// Brent's method with an evaluation cap.
#[derive(Debug, Clone, Copy)]
pub struct BrentSolver {
    pub absolute_accuracy: f64,
    pub relative_accuracy: f64,
    /// A point whose |f| is at most this is accepted outright
    pub function_value_accuracy: f64,
    pub max_evaluations: usize,
}

impl Default for BrentSolver {
    fn default() -> Self {
        Self {
            absolute_accuracy: 1e-6,
            relative_accuracy: 1e-14,
            function_value_accuracy: 1e-15,
            max_evaluations: 100,
        }
    }
}

/// Wraps the objective and counts its evaluations.
struct Counted<F> {
    f: F,
    count: usize,
    max: usize,
}

impl<F: FnMut(f64) -> f64> Counted<F> {
    fn value(&mut self, x: f64) -> Result<f64, YieldError> {
        self.count += 1;
        if self.count > self.max {
            return Err(YieldError::TooManyEvaluations(format!(
                "exceeded {} evaluations near x = {x}",
                self.max
            )));
        }
        Ok((self.f)(x))
    }
}

impl BrentSolver {
    /// Find a root of `f` in `[min, max]`, starting from `start`.
    ///
    /// The start point is tried first, then each end; the first sub-interval
    /// showing a sign change is searched. Every evaluation counts toward
    /// `max_evaluations`.
    pub fn solve<F>(&self, f: F, min: f64, max: f64, start: f64) -> Result<f64, YieldError>
    where
        F: FnMut(f64) -> f64,
    {
        if !(min < start && start < max) {
            return Err(YieldError::Validation(format!(
                "Start {start} must lie strictly inside [{min}, {max}]"
            )));
        }
        let mut f = Counted {
            f,
            count: 0,
            max: self.max_evaluations,
        };
        let fva = self.function_value_accuracy;

        let y_start = f.value(start)?;
        if y_start.abs() <= fva {
            return Ok(start);
        }

        let y_min = f.value(min)?;
        if y_min.abs() <= fva {
            return Ok(min);
        }
        if y_start * y_min < 0.0 {
            return self.brent(&mut f, min, start, y_min, y_start);
        }

        let y_max = f.value(max)?;
        if y_max.abs() <= fva {
            return Ok(max);
        }
        if y_start * y_max < 0.0 {
            return self.brent(&mut f, start, max, y_start, y_max);
        }

        Err(YieldError::NoBracketing(format!(
            "f({min}) = {y_min}, f({start}) = {y_start}, f({max}) = {y_max}"
        )))
    }

    fn brent<F>(
        &self,
        f: &mut Counted<F>,
        lo: f64,
        hi: f64,
        f_lo: f64,
        f_hi: f64,
    ) -> Result<f64, YieldError>
    where
        F: FnMut(f64) -> f64,
    {
        let (mut a, mut fa) = (lo, f_lo);
        let (mut b, mut fb) = (hi, f_hi);
        let (mut c, mut fc) = (a, fa);
        let mut d = b - a;
        let mut e = d;

        loop {
            if fc.abs() < fb.abs() {
                a = b;
                b = c;
                c = a;
                fa = fb;
                fb = fc;
                fc = fa;
            }

            let tol = 2.0 * self.relative_accuracy * b.abs() + self.absolute_accuracy;
            let m = 0.5 * (c - b);

            if m.abs() <= tol || fb == 0.0 {
                return Ok(b);
            }

            if e.abs() < tol || fa.abs() <= fb.abs() {
                // Bisection.
                d = m;
                e = d;
            } else {
                let s = fb / fa;
                let (mut p, mut q);
                if a == c {
                    // Secant.
                    p = 2.0 * m * s;
                    q = 1.0 - s;
                } else {
                    // Inverse quadratic interpolation.
                    q = fa / fc;
                    let r = fb / fc;
                    p = s * (2.0 * m * q * (q - r) - (b - a) * (r - 1.0));
                    q = (q - 1.0) * (r - 1.0) * (s - 1.0);
                }
                if p > 0.0 {
                    q = -q;
                } else {
                    p = -p;
                }
                let prev_e = e;
                e = d;
                if p >= 1.5 * m * q - (tol * q).abs() || p >= (0.5 * prev_e * q).abs() {
                    d = m;
                    e = d;
                } else {
                    d = p / q;
                }
            }

            a = b;
            fa = fb;

            if d.abs() > tol {
                b += d;
            } else if m > 0.0 {
                b += tol;
            } else {
                b -= tol;
            }
            fb = f.value(b)?;

            if (fb > 0.0 && fc > 0.0) || (fb <= 0.0 && fc <= 0.0) {
                c = a;
                fc = fa;
                d = b - a;
                e = d;
            }
        }
    }
}

/// Root of `f` in `[min, max]` by Brent's method with default accuracies.
pub fn brent_root_find<F>(
    f: F,
    min: f64,
    max: f64,
    start: f64,
    max_evaluations: usize,
) -> Result<f64, YieldError>
where
    F: FnMut(f64) -> f64,
{
    let solver = BrentSolver {
        max_evaluations,
        ..BrentSolver::default()
    };
    solver.solve(f, min, max, start)
}

/// Widen `initial` until `f` changes sign across it.
///
/// Starting from the two ends, each step extrapolates away from the point
/// with the larger |f| along the secant, by at most eight times the last
/// step. Gives up after 40 steps.
pub fn find_interval<F>(initial: Interval, mut f: F) -> Result<Interval, YieldError>
where
    F: FnMut(f64) -> f64,
{
    let mut current_x = initial.start;
    let mut last_x = initial.end;
    let mut last_f = f(last_x);
    let mut current_f = f(current_x);

    for i in 0..40 {
        if current_f * last_f <= 0.0 {
            let found = Interval::new(current_x.min(last_x), current_x.max(last_x));
            debug!(start = found.start, end = found.end, steps = i, "bracketing interval found");
            return Ok(found);
        }

        if current_f / last_f >= 1.0 {
            std::mem::swap(&mut current_x, &mut last_x);
            std::mem::swap(&mut current_f, &mut last_f);
        }

        let step = if current_f.abs() >= 8.0 * (last_f - current_f).abs() {
            8.0
        } else {
            (0.25 * i as f64).max(current_f / (last_f - current_f))
        };

        last_f = current_f;
        let mut opposite_x = last_x;
        last_x = current_x;
        if current_x == opposite_x {
            opposite_x = 1.03125 * current_x + 0.001 * current_x.signum();
        }
        current_x += step * (current_x - opposite_x);
        current_f = f(current_x);
    }

    Err(YieldError::NoBracketing(format!(
        "no sign change between x = {current_x} (f = {current_f}) and x = {last_x} (f = {last_f})"
    )))
}

/// The candidate whose |f| is smallest; the first wins ties.
pub fn best_of<F>(mut f: F, candidates: &[f64]) -> Result<f64, YieldError>
where
    F: FnMut(f64) -> f64,
{
    let (&first, rest) = candidates
        .split_first()
        .ok_or_else(|| YieldError::Validation("best_of needs at least one candidate".to_string()))?;
    let mut best_x = first;
    let mut best_y = f(first);
    for &x in rest {
        let y = f(x);
        if y.abs() < best_y.abs() {
            best_x = x;
            best_y = y;
        }
    }
    Ok(best_x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn test_brent_cube_root() {
        let x = brent_root_find(|x| x * x * x - 2.0, 0.0, 2.0, 1.0, 100).unwrap();
        assert_approx_eq!(x, 2.0_f64.cbrt(), 1e-6);
    }

    #[test]
    fn test_brent_root_below_start() {
        let x = brent_root_find(|x| x + 0.3, -0.6, 0.5, -0.05, 100).unwrap();
        assert_approx_eq!(x, -0.3, 1e-6);
    }

    #[test]
    fn test_brent_exact_start() {
        let mut calls = 0;
        let x = brent_root_find(
            |x| {
                calls += 1;
                x - 0.5
            },
            0.0,
            1.0,
            0.5,
            100,
        )
        .unwrap();
        assert_eq!(x, 0.5);
        assert_eq!(calls, 1);
    }

    #[test]
    fn test_brent_no_bracket() {
        let err = brent_root_find(|x| x * x + 1.0, -1.0, 1.0, 0.0, 100).unwrap_err();
        assert!(matches!(err, YieldError::NoBracketing(_)));
    }

    #[test]
    fn test_brent_evaluation_cap() {
        let err = brent_root_find(|x| x * x * x - 2.0, 0.0, 2.0, 1.0, 3).unwrap_err();
        assert!(matches!(err, YieldError::TooManyEvaluations(_)));
    }

    #[test]
    fn test_brent_rejects_start_outside() {
        assert!(brent_root_find(|x| x, 0.0, 1.0, 2.0, 100).is_err());
    }

    #[test]
    fn test_find_interval_already_bracketed() {
        let found = find_interval(Interval::new(-0.6, 0.5), |x| x).unwrap();
        assert_eq!(found, Interval::new(-0.6, 0.5));
    }

    #[test]
    fn test_find_interval_expands() {
        let found = find_interval(Interval::new(-0.6, 0.5), |x| x - 3.0).unwrap();
        assert!(found.start <= 3.0 && found.end >= 3.0, "{found:?}");
    }

    #[test]
    fn test_find_interval_gives_up() {
        let err = find_interval(Interval::new(-0.6, 0.5), |_| 1.0).unwrap_err();
        assert!(matches!(err, YieldError::NoBracketing(_)));
    }

    #[test]
    fn test_best_of() {
        let x = best_of(|x| (x - 0.08).abs(), &[0.0, -0.1, 0.1]).unwrap();
        assert_eq!(x, 0.1);
        assert!(best_of(|x| x, &[]).is_err());
    }

    #[test]
    fn test_best_of_prefers_first_on_tie() {
        let x = best_of(|_| 1.0, &[0.0, -0.1, 0.1]).unwrap();
        assert_eq!(x, 0.0);
    }
}
