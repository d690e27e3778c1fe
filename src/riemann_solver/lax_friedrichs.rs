use crate::{
    gas_law::GasLaw,
    physical_quantities::{Conserved, Primitives, State},
};

use super::{RiemannFluxSolver, StatePair};

/// Local Lax-Friedrichs (Rusanov) flux.
#[derive(Debug, Default, Clone, Copy)]
pub struct LaxFriedrichsFlux;

impl RiemannFluxSolver for LaxFriedrichsFlux {
    fn solve_for_flux(
        &self,
        left: &Primitives,
        right: &Primitives,
        gas_law: &GasLaw,
    ) -> State<Conserved> {
        let pair = StatePair::new(left, right, gas_law);
        let max_eigenvalue = (left.velocity().x.abs() + left.sound_speed(gas_law))
            .max(right.velocity().x.abs() + right.sound_speed(gas_law));
        0.5 * (pair.f_l + pair.f_r) - (0.5 * max_eigenvalue) * (pair.u_r - pair.u_l)
    }
}
