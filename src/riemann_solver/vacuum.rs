use crate::{gas_law::GasLaw, physical_quantities::Primitives};

use super::ExactRiemannSolver;

/// Exact solution of Riemann problems that generate a vacuum between two
/// rarefaction waves (Toro, section 4.6).
pub struct VacuumRiemannSolver;

impl VacuumRiemannSolver {
    /// Pressure positivity condition (4.40) in Toro is violated.
    pub fn is_vacuum(a_l: f64, a_r: f64, v_r_m_v_l: f64, gas_law: &GasLaw) -> bool {
        gas_law.gamma().tdgm1() * (a_l + a_r) <= v_r_m_v_l
    }

    /// Sample the solution at x/t = 0 as (rho, u, p).
    pub fn sample(
        left: &Primitives,
        right: &Primitives,
        v_l: f64,
        v_r: f64,
        a_l: f64,
        a_r: f64,
        gas_law: &GasLaw,
    ) -> (f64, f64, f64) {
        let tdgm1 = gas_law.gamma().tdgm1();
        let s_hl = v_l - a_l;
        let s_star_l = v_l + tdgm1 * a_l;
        let s_star_r = v_r - tdgm1 * a_r;
        let s_hr = v_r + a_r;

        if s_hl >= 0. {
            (left.density(), v_l, left.pressure())
        } else if s_star_l > 0. {
            ExactRiemannSolver::left_fan(left, v_l, a_l, gas_law)
        } else if s_star_r >= 0. {
            (0., 0., 0.)
        } else if s_hr > 0. {
            ExactRiemannSolver::right_fan(right, v_r, a_r, gas_law)
        } else {
            (right.density(), v_r, right.pressure())
        }
    }
}

#[cfg(test)]
mod test {
    use glam::DVec2;

    use super::*;

    #[test]
    fn test_vacuum_detection() {
        let gas_law = GasLaw::new(1.4);
        assert!(!VacuumRiemannSolver::is_vacuum(1., 1., 9.5, &gas_law));
        assert!(VacuumRiemannSolver::is_vacuum(1., 1., 10.5, &gas_law));
    }

    #[test]
    fn test_vacuum_sampling() {
        let gas_law = GasLaw::new(1.4);
        let left = Primitives::new(1., DVec2::new(-10., 0.), 0.4);
        let right = Primitives::new(1., DVec2::new(10., 0.), 0.4);
        let a = left.sound_speed(&gas_law);
        let (rho, u, p) = VacuumRiemannSolver::sample(&left, &right, -10., 10., a, a, &gas_law);
        assert_eq!((rho, u, p), (0., 0., 0.));

        // Both waves move right: the interface lies inside the left fan.
        let left = Primitives::new(1., DVec2::new(0.5, 0.), 0.4);
        let right = Primitives::new(1., DVec2::new(20., 0.), 0.4);
        let (rho, u, p) = VacuumRiemannSolver::sample(&left, &right, 0.5, 20., a, a, &gas_law);
        assert!(rho > 0. && rho < 1.);
        assert!(u > 0.5);
        assert!(p > 0. && p < 0.4);
    }
}
