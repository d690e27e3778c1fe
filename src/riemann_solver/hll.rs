use crate::{
    gas_law::GasLaw,
    physical_quantities::{Conserved, Primitives, State},
};

use super::{RiemannFluxSolver, RoeAverage, StatePair};

/// Leftmost and rightmost signal speed bounds from the one-sided and Roe mean
/// characteristic speeds.
pub(super) fn roe_signal_speeds(left: &Primitives, right: &Primitives, gas_law: &GasLaw) -> (f64, f64) {
    let mean = RoeAverage::new(left, right, gas_law);
    let a_l = left.sound_speed(gas_law);
    let a_r = right.sound_speed(gas_law);
    let s_l = (left.velocity().x - a_l).min(mean.velocity.x - mean.sound_speed);
    let s_r = (right.velocity().x + a_r).max(mean.velocity.x + mean.sound_speed);
    (s_l, s_r)
}

/// Einfeld's signal speed bounds.
fn einfeld_signal_speeds(left: &Primitives, right: &Primitives, gas_law: &GasLaw) -> (f64, f64) {
    let sqrt_rho_l = left.density().sqrt();
    let sqrt_rho_r = right.density().sqrt();
    let norm = 1. / (sqrt_rho_l + sqrt_rho_r);
    let v_l = left.velocity().x;
    let v_r = right.velocity().x;
    let a_l = left.sound_speed(gas_law);
    let a_r = right.sound_speed(gas_law);

    let u_mean = (sqrt_rho_r * v_r + sqrt_rho_l * v_l) * norm;
    let eta_2 = 0.5 * sqrt_rho_r * sqrt_rho_l * norm * norm;
    let d = ((sqrt_rho_r * a_r * a_r + sqrt_rho_l * a_l * a_l) * norm
        + eta_2 * (v_r - v_l) * (v_r - v_l))
        .sqrt();

    ((v_l - a_l).min(u_mean - d), (v_r + a_r).max(u_mean + d))
}

/// Two wave flux for the given signal speed bounds.
fn two_wave_flux(pair: &StatePair, s_l: f64, s_r: f64) -> State<Conserved> {
    if s_l > 0. {
        pair.f_l
    } else if s_r < 0. {
        pair.f_r
    } else {
        let norm = 1. / (s_r - s_l);
        norm * (s_r * pair.f_l - s_l * pair.f_r) + (s_r * s_l * norm) * (pair.u_r - pair.u_l)
    }
}

/// Harten, Lax and van Leer flux with Roe mean signal speeds.
#[derive(Debug, Default, Clone, Copy)]
pub struct HllFlux;

impl RiemannFluxSolver for HllFlux {
    fn solve_for_flux(
        &self,
        left: &Primitives,
        right: &Primitives,
        gas_law: &GasLaw,
    ) -> State<Conserved> {
        let (s_l, s_r) = roe_signal_speeds(left, right, gas_law);
        two_wave_flux(&StatePair::new(left, right, gas_law), s_l, s_r)
    }
}

/// HLL flux with Einfeld's tighter signal speed estimates.
#[derive(Debug, Default, Clone, Copy)]
pub struct HlleFlux;

impl RiemannFluxSolver for HlleFlux {
    fn solve_for_flux(
        &self,
        left: &Primitives,
        right: &Primitives,
        gas_law: &GasLaw,
    ) -> State<Conserved> {
        let (s_l, s_r) = einfeld_signal_speeds(left, right, gas_law);
        two_wave_flux(&StatePair::new(left, right, gas_law), s_l, s_r)
    }
}
