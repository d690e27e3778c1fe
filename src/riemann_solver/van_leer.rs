use glam::DVec2;

use crate::{
    gas_law::GasLaw,
    physical_quantities::{Conserved, Primitives, State},
};

use super::RiemannFluxSolver;

/// Van Leer flux vector splitting.
#[derive(Debug, Default, Clone, Copy)]
pub struct VanLeerFlux;

impl VanLeerFlux {
    /// Forward (`sign = 1`) or backward (`sign = -1`) part of the physical flux
    /// of `state`.
    fn split_flux(state: &Primitives, gas_law: &GasLaw, sign: f64) -> State<Conserved> {
        let gamma = gas_law.gamma().gamma();
        let v = state.velocity();
        let a = state.sound_speed(gas_law);
        let mach = sign * v.x / a;

        if mach >= 1. {
            return state.physical_flux(gas_law);
        }
        if mach <= -1. {
            return State::<Conserved>::zero();
        }

        let mass = sign * 0.25 * state.density() * a * (mach + 1.).powi(2);
        let c_x = gas_law.gamma().gm1() * v.x + sign * 2. * a;
        let normal = mass * c_x / gamma;
        let tangential = mass * v.y;
        State::<Conserved>::new(
            mass,
            DVec2::new(normal, tangential),
            0.5 * (normal * c_x * gamma / (gamma * gamma - 1.) + tangential * v.y),
        )
    }
}

impl RiemannFluxSolver for VanLeerFlux {
    fn solve_for_flux(
        &self,
        left: &Primitives,
        right: &Primitives,
        gas_law: &GasLaw,
    ) -> State<Conserved> {
        Self::split_flux(left, gas_law, 1.) + Self::split_flux(right, gas_law, -1.)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::riemann_solver::test_utils::*;

    #[test]
    fn test_van_leer_consistency() {
        check_consistency(&VanLeerFlux, 1e-12);
    }

    #[test]
    fn test_van_leer_symmetry() {
        check_reflection_symmetry(&VanLeerFlux, 1e-12);
    }

    #[test]
    fn test_sonic_states_are_fully_upwinded() {
        let gas_law = GasLaw::new(GAMMA);
        let a = GAMMA.sqrt();
        let sonic = Primitives::new(1., DVec2::new(a, 0.3), 1.);
        assert_eq!(
            VanLeerFlux::split_flux(&sonic, &gas_law, 1.),
            sonic.physical_flux(&gas_law)
        );
        assert_eq!(
            VanLeerFlux::split_flux(&sonic, &gas_law, -1.),
            State::<Conserved>::zero()
        );
    }

    #[test]
    fn test_splitting_is_continuous_at_sonic_point() {
        let gas_law = GasLaw::new(GAMMA);
        let a = GAMMA.sqrt();
        let sonic = Primitives::new(1., DVec2::new(a, 0.3), 1.);
        let below = Primitives::new(1., DVec2::new(a * (1. - 1e-9), 0.3), 1.);
        assert_flux_eq(
            &VanLeerFlux::split_flux(&below, &gas_law, 1.),
            &VanLeerFlux::split_flux(&sonic, &gas_law, 1.),
            1e-7,
        );
    }
}
