use glam::DVec2;

use crate::{
    gas_law::GasLaw,
    physical_quantities::{Conserved, Primitives, State},
};

use super::RiemannFluxSolver;

/// Steger-Warming flux vector splitting.
#[derive(Debug, Default, Clone, Copy)]
pub struct StegerWarmingFlux;

impl StegerWarmingFlux {
    /// Part of the physical flux of `state` carried by the eigenvalues as
    /// filtered by `clamp`.
    fn split_flux(state: &Primitives, gas_law: &GasLaw, clamp: impl Fn(f64) -> f64) -> State<Conserved> {
        let gamma = gas_law.gamma();
        let rho = state.density();
        let v = state.velocity();
        let a = state.sound_speed(gas_law);
        let half_gamma_inv = 0.5 / gamma.gamma();

        let lambda_1 = clamp(v.x - a);
        let lambda_2 = clamp(v.x);
        let lambda_4 = clamp(v.x + a);

        let mass = rho * half_gamma_inv * (2. * gamma.gm1() * lambda_2 + lambda_1 + lambda_4);
        let acoustic = (lambda_4 - lambda_1) * rho * a * half_gamma_inv;
        State::<Conserved>::new(
            mass,
            DVec2::new(mass * v.x + acoustic, mass * v.y),
            0.5 * mass * v.length_squared()
                + acoustic * v.x
                + (lambda_4 + lambda_1) * rho * a * a * half_gamma_inv * gamma.odgm1(),
        )
    }
}

impl RiemannFluxSolver for StegerWarmingFlux {
    fn solve_for_flux(
        &self,
        left: &Primitives,
        right: &Primitives,
        gas_law: &GasLaw,
    ) -> State<Conserved> {
        Self::split_flux(left, gas_law, |lambda| lambda.max(0.))
            + Self::split_flux(right, gas_law, |lambda| lambda.min(0.))
    }
}
