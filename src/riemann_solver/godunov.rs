use glam::DVec2;

use crate::{
    gas_law::GasLaw,
    physical_quantities::{Conserved, Primitives, State},
};

use super::{ExactRiemannSolver, RiemannFluxSolver, RiemannStarSolver};

/// Godunov flux: the physical flux of the exact solution of the Riemann problem
/// evaluated at the interface.
#[derive(Debug, Default, Clone, Copy)]
pub struct GodunovFlux<S: RiemannStarSolver = ExactRiemannSolver> {
    star_solver: S,
}

impl<S: RiemannStarSolver> GodunovFlux<S> {
    pub fn new(star_solver: S) -> Self {
        Self { star_solver }
    }
}

impl GodunovFlux<ExactRiemannSolver> {
    /// Godunov flux based on the exact Riemann solver.
    pub fn exact() -> Self {
        Self::new(ExactRiemannSolver)
    }
}

impl<S: RiemannStarSolver> RiemannFluxSolver for GodunovFlux<S> {
    fn solve_for_flux(
        &self,
        left: &Primitives,
        right: &Primitives,
        gas_law: &GasLaw,
    ) -> State<Conserved> {
        let half = self.star_solver.sample_interface(left, right, gas_law);
        let rho = half.density();
        let v = half.velocity();
        let p = half.pressure();

        let mass_flux = rho * v.x;
        State::<Conserved>::new(
            mass_flux,
            DVec2::new(mass_flux * v.x + p, mass_flux * v.y),
            v.x * (gas_law.gamma().gamma() * gas_law.gamma().odgm1() * p
                + 0.5 * rho * v.length_squared()),
        )
    }
}
