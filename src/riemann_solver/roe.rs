use glam::DVec2;

use crate::{
    gas_law::GasLaw,
    physical_quantities::{Conserved, Primitives, State},
};

use super::{RiemannFluxSolver, RoeAverage, StatePair};

/// Roe's approximate Riemann solver with Harten's entropy fix.
#[derive(Debug, Default, Clone, Copy)]
pub struct RoeFlux;

impl RoeFlux {
    /// Strengths of the four characteristic waves (acoustic, entropy, shear,
    /// acoustic) for the jump between `left` and `right`.
    pub(crate) fn wave_strengths(
        u_l: &State<Conserved>,
        u_r: &State<Conserved>,
        mean: &RoeAverage,
        gas_law: &GasLaw,
    ) -> [f64; 4] {
        let u = mean.velocity.x;
        let v = mean.velocity.y;
        let c = mean.sound_speed;
        let h = mean.enthalpy;

        let jump = *u_r - *u_l;
        let d_rho = jump.mass();
        let d_mx = jump.momentum().x;
        let d_my = jump.momentum().y;
        // energy jump without the shear wave contribution
        let d_e = jump.energy() - (d_my - v * d_rho) * v;

        let c_inv = 1. / c;
        let alpha_2 = gas_law.gamma().gm1() * c_inv * c_inv * (d_rho * (h - u * u) + u * d_mx - d_e);
        let alpha_1 = 0.5 * c_inv * (d_rho * (u + c) - d_mx) - 0.5 * alpha_2;
        let alpha_4 = d_rho - alpha_1 - alpha_2;
        let alpha_3 = d_my - v * d_rho;

        [alpha_1, alpha_2, alpha_3, alpha_4]
    }

    /// Harten's entropy fix: near sonic points the eigenvalue magnitude is
    /// replaced by a parabola so that it never drops below half the local spread.
    pub(crate) fn entropy_fix(lambda: f64, lambda_l: f64, lambda_r: f64) -> f64 {
        let delta = 0f64.max(lambda - lambda_l).max(lambda_r - lambda);
        if lambda.abs() < delta {
            0.5 * (lambda * lambda / delta + delta)
        } else {
            lambda.abs()
        }
    }
}

impl RiemannFluxSolver for RoeFlux {
    fn solve_for_flux(
        &self,
        left: &Primitives,
        right: &Primitives,
        gas_law: &GasLaw,
    ) -> State<Conserved> {
        let pair = StatePair::new(left, right, gas_law);
        let mean = RoeAverage::new(left, right, gas_law);
        let u = mean.velocity.x;
        let v = mean.velocity.y;
        let c = mean.sound_speed;
        let h = mean.enthalpy;

        // mean eigenvalues and eigenvectors
        let lambda = [u - c, u, u, u + c];
        let eigenvectors = [
            State::<Conserved>::new(1., DVec2::new(u - c, v), h - u * c),
            State::<Conserved>::new(1., DVec2::new(u, v), 0.5 * mean.velocity.length_squared()),
            State::<Conserved>::new(0., DVec2::new(0., 1.), v),
            State::<Conserved>::new(1., DVec2::new(u + c, v), h + u * c),
        ];
        let strengths = Self::wave_strengths(&pair.u_l, &pair.u_r, &mean, gas_law);

        // one-sided eigenvalues for the entropy fix
        let a_l = left.sound_speed(gas_law);
        let a_r = right.sound_speed(gas_law);
        let v_l = left.velocity().x;
        let v_r = right.velocity().x;
        let lambda_l = [v_l - a_l, v_l, v_l, v_l + a_l];
        let lambda_r = [v_r - a_r, v_r, v_r, v_r + a_r];

        let mut dissipation = State::<Conserved>::zero();
        for i in 0..4 {
            let abs_lambda = Self::entropy_fix(lambda[i], lambda_l[i], lambda_r[i]);
            dissipation += (strengths[i] * abs_lambda) * eigenvectors[i];
        }

        0.5 * (pair.f_l + pair.f_r - dissipation)
    }
}
