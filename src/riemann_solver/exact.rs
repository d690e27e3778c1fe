use crate::{gas_law::GasLaw, physical_quantities::Primitives};

use super::{RiemannStarSolver, RiemannStarValues};

/// Relative tolerance on the star pressure.
const PRESSURE_TOLERANCE: f64 = 1e-10;
const MAX_ITERATIONS: usize = 200;

/// Exact iterative Riemann solver for the ideal gas Euler equations.
///
/// The star pressure is found with Newton-Raphson iterations from a PVRS/TRRS/TSRS
/// initial guess. Whenever the iteration would leave the positive pressure range a
/// bracketing Brent solve is used instead.
#[derive(Debug, Default, Clone, Copy)]
pub struct ExactRiemannSolver;

impl ExactRiemannSolver {
    /// Functions (4.6) and (4.7) in Toro.
    fn fb(p: f64, state: &Primitives, a: f64, gas_law: &GasLaw) -> f64 {
        let gamma = gas_law.gamma();
        if p > state.pressure() {
            let cap_a = gamma.tdgp1() / state.density();
            let cap_b = gamma.gm1dgp1() * state.pressure();
            (p - state.pressure()) * (cap_a / (p + cap_b)).sqrt()
        } else {
            gamma.tdgm1() * a * ((p / state.pressure()).powf(gamma.gm1d2g()) - 1.)
        }
    }

    /// Function (4.5) in Toro
    #[allow(clippy::too_many_arguments)]
    fn f(
        p: f64,
        left: &Primitives,
        right: &Primitives,
        v_l: f64,
        v_r: f64,
        a_l: f64,
        a_r: f64,
        gas_law: &GasLaw,
    ) -> f64 {
        Self::fb(p, left, a_l, gas_law) + Self::fb(p, right, a_r, gas_law) + (v_r - v_l)
    }

    /// Function (4.37) in Toro
    fn fprimeb(p: f64, state: &Primitives, a: f64, gas_law: &GasLaw) -> f64 {
        let gamma = gas_law.gamma();
        if p > state.pressure() {
            let cap_a = gamma.tdgp1() / state.density();
            let cap_b = gamma.gm1dgp1() * state.pressure();
            (1. - 0.5 * (p - state.pressure()) / (cap_b + p)) * (cap_a / (p + cap_b)).sqrt()
        } else {
            1. / (state.density() * a) * (p / state.pressure()).powf(-0.5 * gamma.gp1dg())
        }
    }

    /// The derivative of f w.r.t. p
    fn fprime(
        p: f64,
        left: &Primitives,
        right: &Primitives,
        a_l: f64,
        a_r: f64,
        gas_law: &GasLaw,
    ) -> f64 {
        Self::fprimeb(p, left, a_l, gas_law) + Self::fprimeb(p, right, a_r, gas_law)
    }

    /// Bottom function of (4.48) in Toro
    fn gb(p: f64, state: &Primitives, gas_law: &GasLaw) -> f64 {
        let gamma = gas_law.gamma();
        let cap_a = gamma.tdgp1() / state.density();
        let cap_b = gamma.gm1dgp1() * state.pressure();
        (cap_a / (p + cap_b)).sqrt()
    }

    /// Get a good first guess for the pressure in the iterative scheme
    ///
    /// This function is based on (4.47) and (4.48) in Toro and on the
    /// FORTRAN code provided in Toro p.156-157
    #[allow(clippy::too_many_arguments)]
    fn guess_p(
        left: &Primitives,
        right: &Primitives,
        v_l: f64,
        v_r: f64,
        a_l: f64,
        a_r: f64,
        gas_law: &GasLaw,
    ) -> f64 {
        let gamma = gas_law.gamma();
        let p_min = left.pressure().min(right.pressure());
        let p_max = left.pressure().max(right.pressure());
        let q_max = p_max / p_min;
        let ppv = 0.5 * (left.pressure() + right.pressure())
            - 0.125 * (v_r - v_l) * (left.density() + right.density()) * (a_l + a_r);
        let ppv = ppv.max(1e-8);
        let p_guess = if q_max <= 2. && p_min <= ppv && ppv <= p_max {
            ppv
        } else if ppv < p_min {
            // two rarefactions
            let base = (a_l + a_r - 0.5 * gamma.gm1() * (v_r - v_l))
                / (a_l / left.pressure().powf(gamma.gm1d2g())
                    + a_r / right.pressure().powf(gamma.gm1d2g()));
            base.powf(gamma.gamma() * gamma.tdgm1())
        } else {
            // two shocks
            let g_l = Self::gb(ppv, left, gas_law);
            let g_r = Self::gb(ppv, right, gas_law);
            (g_l * left.pressure() + g_r * right.pressure() - v_r + v_l) / (g_l + g_r)
        };

        p_guess.max(1e-8)
    }

    /// Find the zeropoint of f(p) on [lower_lim, upper_lim] using Brent's method
    #[allow(clippy::too_many_arguments)]
    fn solve_brent(
        lower_lim: f64,
        upper_lim: f64,
        low_f: f64,
        up_f: f64,
        left: &Primitives,
        right: &Primitives,
        v_l: f64,
        v_r: f64,
        a_l: f64,
        a_r: f64,
        gas_law: &GasLaw,
    ) -> f64 {
        let mut a = lower_lim;
        let mut b = upper_lim;
        let mut c;
        let mut d = f64::INFINITY;

        let mut fa = low_f;
        let mut fb = up_f;
        let mut fc;

        let mut s;
        let mut fs;

        debug_assert!(
            fa * fb <= 0.,
            "Brent's method was called with equal sign function values!"
        );

        // if |f(a)| < |f(b)| then swap (a,b)
        if fa.abs() < fb.abs() {
            (a, b) = (b, a);
            (fa, fb) = (fb, fa);
        }

        c = a;
        fc = fa;
        let mut mflag = true;
        let error_tol = PRESSURE_TOLERANCE;

        let mut counter = 0;
        while fb != 0. && (a - b).abs() > error_tol * 0.5 * (a + b) && counter < MAX_ITERATIONS {
            s = if fa != fc && fb != fc {
                // Inverse quadratic interpolation
                a * fb * fc / (fa - fb) / (fa - fc)
                    + b * fa * fc / (fb - fa) / (fb - fc)
                    + c * fa * fb / (fc - fa) / (fc - fb)
            } else {
                // Secant rule
                b - fb * (b - a) / (fb - fa)
            };

            let tmp = 0.25 * (3. * a + b);

            if !((s > tmp && s < b) || (s < tmp && s > b))
                || (mflag && (s - b).abs() >= (0.5 * (b - c).abs()))
                || (!mflag && (s - b).abs() >= (0.5 * (c - d).abs()))
                || (mflag && (b - c).abs() < 0.5 * error_tol * (b + c))
                || (!mflag && (c - d).abs() < 0.5 * error_tol * (c + d))
            {
                s = 0.5 * (a + b);
                mflag = true;
            } else {
                mflag = false;
            }

            fs = Self::f(s, left, right, v_l, v_r, a_l, a_r, gas_law);
            d = c;
            c = b;
            fc = fb;
            if fa * fs < 0. {
                b = s;
                fb = fs;
            } else {
                a = s;
                fa = fs;
            }

            // if |f(a)| < |f(b)| then swap (a,b)
            if fa.abs() < fb.abs() {
                (a, b) = (b, a);
                (fa, fb) = (fb, fa);
            }
            counter += 1;
        }

        b
    }

    fn middle_density(p: f64, state: &Primitives, gas_law: &GasLaw) -> f64 {
        let gamma = gas_law.gamma();
        let pdps = p / state.pressure();
        if pdps > 1. {
            // shock
            state.density() * (pdps + gamma.gm1dgp1()) / (gamma.gm1dgp1() * pdps + 1.)
        } else {
            // rarefaction
            state.density() * pdps.powf(1. / gamma.gamma())
        }
    }

    /// State inside a left rarefaction fan at x/t = 0 as (rho, u, p).
    pub(super) fn left_fan(left: &Primitives, v_l: f64, a_l: f64, gas_law: &GasLaw) -> (f64, f64, f64) {
        let gamma = gas_law.gamma();
        let base = gamma.tdgp1() + gamma.gm1dgp1() * v_l / a_l;
        (
            left.density() * base.powf(gamma.tdgm1()),
            gamma.tdgp1() * (a_l + 0.5 * gamma.gm1() * v_l),
            left.pressure() * base.powf(gamma.gamma() * gamma.tdgm1()),
        )
    }

    /// State inside a right rarefaction fan at x/t = 0 as (rho, u, p).
    pub(super) fn right_fan(right: &Primitives, v_r: f64, a_r: f64, gas_law: &GasLaw) -> (f64, f64, f64) {
        let gamma = gas_law.gamma();
        let base = gamma.tdgp1() - gamma.gm1dgp1() * v_r / a_r;
        (
            right.density() * base.powf(gamma.tdgm1()),
            gamma.tdgp1() * (-a_r + 0.5 * gamma.gm1() * v_r),
            right.pressure() * base.powf(gamma.gamma() * gamma.tdgm1()),
        )
    }
}

impl RiemannStarSolver for ExactRiemannSolver {
    fn solve_for_star_state(
        &self,
        left: &Primitives,
        right: &Primitives,
        v_l: f64,
        v_r: f64,
        a_l: f64,
        a_r: f64,
        gas_law: &GasLaw,
    ) -> RiemannStarValues {
        /* f(p) is monotonically increasing and concave, so Newton-Raphson started
        left of the root converges from the left. If the initial guess lies right
        of the root, we bracket it with [0, p_guess] (f(0) < 0 when no vacuum is
        generated) and use Brent's method instead, which never produces negative
        pressures. */
        let mut p = 0.;
        let mut p_guess = Self::guess_p(left, right, v_l, v_r, a_l, a_r, gas_law);
        let fp = Self::f(p, left, right, v_l, v_r, a_l, a_r, gas_law);
        let mut fp_guess = Self::f(p_guess, left, right, v_l, v_r, a_l, a_r, gas_law);
        if fp * fp_guess >= 0. {
            let mut counter = 0;
            while (p - p_guess).abs() > PRESSURE_TOLERANCE * 0.5 * (p + p_guess) && fp_guess < 0.0 {
                p = p_guess;
                p_guess -= fp_guess / Self::fprime(p_guess, left, right, a_l, a_r, gas_law);
                fp_guess = Self::f(p_guess, left, right, v_l, v_r, a_l, a_r, gas_law);
                counter += 1;
                if counter > MAX_ITERATIONS {
                    log::warn!("Newton-Raphson iteration for the star pressure did not converge, switching to Brent's method");
                    break;
                }
            }
        }

        // As soon as there is a suitable interval: use Brent's method
        if (p - p_guess).abs() > PRESSURE_TOLERANCE * 0.5 * (p + p_guess) && fp_guess > 0. {
            p = Self::solve_brent(
                0., p_guess, fp, fp_guess, left, right, v_l, v_r, a_l, a_r, gas_law,
            );
        } else {
            p = p_guess;
        }

        // calculate the velocity in the intermediate state
        let u = 0.5 * (v_l + v_r)
            + 0.5 * (Self::fb(p, right, a_r, gas_law) - Self::fb(p, left, a_l, gas_law));

        // calculate the left and right intermediate densities
        let rho_l = Self::middle_density(p, left, gas_law);
        let rho_r = Self::middle_density(p, right, gas_law);

        RiemannStarValues { rho_l, rho_r, u, p }
    }
}
