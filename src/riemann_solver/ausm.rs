//! Advection upstream splitting (AUSM) family of fluxes after Wada and Liou.

use glam::DVec2;

use crate::{
    gas_law::GasLaw,
    physical_quantities::{Conserved, Primitives, State},
};

use super::RiemannFluxSolver;

/// Quantities shared by the AUSM splittings of a pair of face-frame states.
struct AusmPair {
    v_l: f64,
    v_r: f64,
    a_l: f64,
    a_r: f64,
    /// Common reference sound speed
    a_m: f64,
    alpha_l: f64,
    alpha_r: f64,
    h_l: f64,
    h_r: f64,
}

impl AusmPair {
    fn new(left: &Primitives, right: &Primitives, gas_law: &GasLaw) -> Self {
        let a_l = left.sound_speed(gas_law);
        let a_r = right.sound_speed(gas_law);
        let p_rho_l = left.pressure() / left.density();
        let p_rho_r = right.pressure() / right.density();
        Self {
            v_l: left.velocity().x,
            v_r: right.velocity().x,
            a_l,
            a_r,
            a_m: a_l.max(a_r),
            alpha_l: 2. * p_rho_l / (p_rho_l + p_rho_r),
            alpha_r: 2. * p_rho_r / (p_rho_l + p_rho_r),
            h_l: left.enthalpy(gas_law),
            h_r: right.enthalpy(gas_law),
        }
    }

    /// Subsonic pressure splitting of the left state.
    fn pressure_plus(&self, p_l: f64) -> f64 {
        let a_m = self.a_m;
        0.25 * p_l * (self.v_l + a_m).powi(2) / (a_m * a_m) * (2. - self.v_l / a_m)
    }

    /// Subsonic pressure splitting of the right state.
    fn pressure_minus(&self, p_r: f64) -> f64 {
        let a_m = self.a_m;
        0.25 * p_r * (self.v_r - a_m).powi(2) / (a_m * a_m) * (2. + self.v_r / a_m)
    }

    /// Tangential momentum and energy fluxes upwinded by the interface mass flux.
    fn convective_flux(&self, rho_u: f64, left: &Primitives, right: &Primitives) -> (f64, f64) {
        let upwind = |phi_l: f64, phi_r: f64| 0.5 * (rho_u * (phi_r + phi_l) - rho_u.abs() * (phi_r - phi_l));
        (
            upwind(left.velocity().y, right.velocity().y),
            upwind(self.h_l, self.h_r),
        )
    }
}

/// Velocity and pressure splitting for a supersonic state: everything is
/// carried by the state if it moves in the direction `sign`, nothing otherwise.
fn supersonic_split(v: f64, p: f64, sign: f64) -> (f64, f64) {
    if v * sign > 0. {
        (v, p)
    } else {
        (0., 0.)
    }
}

/// AUSM-D flux.
#[derive(Debug, Default, Clone, Copy)]
pub struct AusmdFlux;

impl RiemannFluxSolver for AusmdFlux {
    fn solve_for_flux(
        &self,
        left: &Primitives,
        right: &Primitives,
        gas_law: &GasLaw,
    ) -> State<Conserved> {
        let pair = AusmPair::new(left, right, gas_law);
        let (v_l, v_r, a_m) = (pair.v_l, pair.v_r, pair.a_m);

        let (u_plus, p_plus) = if v_l.abs() < a_m {
            (
                0.25 * pair.alpha_l * (v_l + a_m).powi(2) / a_m
                    + 0.5 * (1. - pair.alpha_l) * (v_l + v_l.abs()),
                pair.pressure_plus(left.pressure()),
            )
        } else {
            supersonic_split(v_l, left.pressure(), 1.)
        };
        let (u_minus, p_minus) = if v_r.abs() < a_m {
            (
                -0.25 * pair.alpha_r * (v_r - a_m).powi(2) / a_m
                    + 0.5 * (1. - pair.alpha_r) * (v_r - v_r.abs()),
                pair.pressure_minus(right.pressure()),
            )
        } else {
            supersonic_split(v_r, right.pressure(), -1.)
        };

        let rho_u = u_plus * left.density() + u_minus * right.density();
        let (tangential, energy) = pair.convective_flux(rho_u, left, right);
        State::<Conserved>::new(
            rho_u,
            DVec2::new(
                0.5 * (rho_u * (v_r + v_l) - rho_u.abs() * (v_r - v_l)) + p_plus + p_minus,
                tangential,
            ),
            energy,
        )
    }
}

/// AUSM-DV flux: blend of AUSM-D and AUSM-V momentum fluxes switched by the
/// pressure jump, with an entropy fix at sonic points.
///
/// This variant is known to produce incorrect results in the subsonic regime
/// and must not be relied on.
#[derive(Debug, Default, Clone, Copy)]
pub struct AusmdvFlux;

impl AusmdvFlux {
    /// Entropy fix for states that straddle exactly one acoustic characteristic.
    fn entropy_fix(
        pair: &AusmPair,
        left: &Primitives,
        right: &Primitives,
    ) -> State<Conserved> {
        let (v_l, v_r, a_l, a_r) = (pair.v_l, pair.v_r, pair.a_l, pair.a_r);
        let straddles_minus = v_l - a_l < 0. && v_r - a_r > 0.;
        let straddles_plus = v_l + a_l < 0. && v_r + a_r > 0.;
        let spread = match (straddles_minus, straddles_plus) {
            (true, false) => (v_r - a_r) - (v_l - a_l),
            (false, true) => (v_r + a_r) - (v_l + a_l),
            _ => return State::<Conserved>::zero(),
        };

        let phi = |state: &Primitives, h: f64| {
            let rho = state.density();
            State::<Conserved>::new(rho, rho * state.velocity(), rho * h)
        };
        (0.125 * spread) * (phi(right, pair.h_r) - phi(left, pair.h_l))
    }
}

impl RiemannFluxSolver for AusmdvFlux {
    fn solve_for_flux(
        &self,
        left: &Primitives,
        right: &Primitives,
        gas_law: &GasLaw,
    ) -> State<Conserved> {
        let pair = AusmPair::new(left, right, gas_law);
        let (v_l, v_r, a_m) = (pair.v_l, pair.v_r, pair.a_m);

        let (u_plus, p_plus) = if v_l.abs() < a_m {
            let u_plus = if v_l > 0. {
                v_l + pair.alpha_l * (v_l - a_m).powi(2)
            } else {
                pair.alpha_l * (v_l + a_m).powi(2)
            };
            (u_plus, pair.pressure_plus(left.pressure()))
        } else {
            supersonic_split(v_l, left.pressure(), 1.)
        };
        let (u_minus, p_minus) = if v_r.abs() < a_m {
            let u_minus = if v_r > 0. {
                // NOTE: evaluated with the left normal velocity
                -pair.alpha_r * (v_l - a_m).powi(2)
            } else {
                v_r - pair.alpha_r * (v_r + a_m).powi(2)
            };
            (u_minus, pair.pressure_minus(right.pressure()))
        } else {
            supersonic_split(v_r, right.pressure(), -1.)
        };

        let rho_l = left.density();
        let rho_r = right.density();
        let rho_u = u_plus * rho_l + u_minus * rho_r;

        let s = (10. * (right.pressure() - left.pressure()).abs()
            / right.pressure().min(left.pressure()))
        .min(1.);
        let rho_u_sq = 0.5 * (1. + s) * (rho_l * v_l * u_plus + rho_r * v_r * u_minus)
            + 0.25 * (1. - s) * (rho_u * (v_r + v_l) - rho_u.abs() * (v_r - v_l));

        let (tangential, energy) = pair.convective_flux(rho_u, left, right);
        let flux = State::<Conserved>::new(
            rho_u,
            DVec2::new(rho_u_sq + p_plus + p_minus, tangential),
            energy,
        );
        flux - Self::entropy_fix(&pair, left, right)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::riemann_solver::test_utils::*;

    #[test]
    fn test_ausmd_consistency() {
        check_consistency(&AusmdFlux, 1e-12);
    }

    #[test]
    fn test_ausmd_symmetry() {
        check_reflection_symmetry(&AusmdFlux, 1e-12);
    }

    #[test]
    fn test_ausmdv_consistency() {
        // Equal states never activate the entropy fix and never expose the
        // mixed-up velocity.
        check_consistency(&AusmdvFlux, 1e-12);
    }

    #[test]
    fn test_supersonic_upwinding() {
        let gas_law = GasLaw::new(GAMMA);
        let left = Primitives::new(1., DVec2::new(3., 0.2), 1.);
        let right = Primitives::new(0.8, DVec2::new(2.8, -0.1), 0.9);
        let expected = left.physical_flux(&gas_law);
        assert_flux_eq(&AusmdFlux.solve_for_flux(&left, &right, &gas_law), &expected, 1e-12);

        let left = Primitives::new(1., DVec2::new(-2.9, 0.2), 1.);
        let right = Primitives::new(0.8, DVec2::new(-3., -0.1), 0.9);
        let expected = right.physical_flux(&gas_law);
        assert_flux_eq(&AusmdFlux.solve_for_flux(&left, &right, &gas_law), &expected, 1e-12);
    }

    #[test]
    fn test_ausmdv_entropy_fix() {
        let gas_law = GasLaw::new(GAMMA);
        let left = Primitives::new(1., DVec2::new(0.5, 0.), 1.);
        let right = Primitives::new(0.5, DVec2::new(2.5, 0.), 0.5);
        let pair = AusmPair::new(&left, &right, &gas_law);
        // v_l - a_l < 0 < v_r - a_r, both v + a positive
        let fix = AusmdvFlux::entropy_fix(&pair, &left, &right);
        assert!(fix.mass() != 0.);
        assert_eq!(fix.momentum().y, 0.);

        let right = Primitives::new(0.5, DVec2::new(0.6, 0.), 0.5);
        let pair = AusmPair::new(&left, &right, &gas_law);
        let fix = AusmdvFlux::entropy_fix(&pair, &left, &right);
        assert_eq!(fix, State::<Conserved>::zero());
    }

    #[test]
    fn test_stationary_pressure_jump() {
        let gas_law = GasLaw::new(GAMMA);
        let left = Primitives::new(1., DVec2::ZERO, 1.);
        let right = Primitives::new(0.125, DVec2::ZERO, 0.1);
        let flux = AusmdFlux.solve_for_flux(&left, &right, &gas_law);
        assert!(flux.mass() > 0.);
        assert!(flux.momentum().x > 0.1 && flux.momentum().x < 1.);
        assert_eq!(flux.momentum().y, 0.);
    }

    /// Evaluate `solver` with the normal velocity of one side set to `v` and
    /// the other side at rest; both sides share the same sound speed.
    fn sonic_flux(solver: &impl RiemannFluxSolver, v: f64, moving_left: bool) -> State<Conserved> {
        let gas_law = GasLaw::new(GAMMA);
        let moving = Primitives::new(1., DVec2::new(v, 0.3), 1.);
        let resting = Primitives::new(1., DVec2::new(0., -0.2), 1.);
        if moving_left {
            solver.solve_for_flux(&moving, &resting, &gas_law)
        } else {
            solver.solve_for_flux(&resting, &moving, &gas_law)
        }
    }

    #[test]
    fn test_continuous_at_sonic_point() {
        let gas_law = GasLaw::new(GAMMA);
        let rest = Primitives::new(1., DVec2::ZERO, 1.);
        let a_m = AusmPair::new(&rest, &rest, &gas_law).a_m;

        // v_l = a_m and v_r = -a_m sit exactly on the branch boundary
        for (v, moving_left) in [(a_m, true), (-a_m, false)] {
            for eps in [0., 1e-9, -1e-9] {
                let v_near = v * (1. + eps);
                let ausmd = sonic_flux(&AusmdFlux, v_near, moving_left);
                let ausmdv = sonic_flux(&AusmdvFlux, v_near, moving_left);
                assert!(ausmd.is_finite() && ausmdv.is_finite());
                assert_flux_eq(&ausmd, &sonic_flux(&AusmdFlux, v, moving_left), 1e-7);
                assert_flux_eq(&ausmdv, &sonic_flux(&AusmdvFlux, v, moving_left), 1e-7);
            }
        }
    }
}
