use crate::{
    gas_law::GasLaw,
    physical_quantities::{Conserved, Primitives, State},
};

use super::{RiemannFluxSolver, StatePair};

/// Arithmetic mean of the physical fluxes.
///
/// This flux has no numerical dissipation and is unconditionally unstable
/// without added artificial viscosity, which is not provided here.
#[derive(Debug, Default, Clone, Copy)]
pub struct CentralFlux;

impl RiemannFluxSolver for CentralFlux {
    fn solve_for_flux(
        &self,
        left: &Primitives,
        right: &Primitives,
        gas_law: &GasLaw,
    ) -> State<Conserved> {
        let pair = StatePair::new(left, right, gas_law);
        0.5 * (pair.f_l + pair.f_r)
    }
}
