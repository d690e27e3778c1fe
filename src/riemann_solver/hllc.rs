use glam::DVec2;

use crate::{
    gas_law::GasLaw,
    physical_quantities::{Conserved, Primitives, State},
};

use super::{hll::roe_signal_speeds, RiemannFluxSolver, StatePair};

/// HLLC flux (Toro, section 10.4) with Roe mean signal speed bounds.
///
/// The contact speed follows from the Rankine-Hugoniot conditions across the
/// two outer waves. The star state on either side of the contact keeps the
/// tangential velocity of the state on that side.
#[derive(Debug, Default, Clone, Copy)]
pub struct HllcFlux;

impl HllcFlux {
    fn star_state(state: &Primitives, energy: f64, s: f64, s_star: f64) -> State<Conserved> {
        let rho = state.density();
        let v = state.velocity();
        let fac = rho * (s - v.x) / (s - s_star);
        State::<Conserved>::new(
            fac,
            DVec2::new(s_star * fac, v.y * fac),
            fac * (energy / rho + (s_star - v.x) * (s_star + state.pressure() / (rho * (s - v.x)))),
        )
    }
}

impl RiemannFluxSolver for HllcFlux {
    fn solve_for_flux(
        &self,
        left: &Primitives,
        right: &Primitives,
        gas_law: &GasLaw,
    ) -> State<Conserved> {
        let pair = StatePair::new(left, right, gas_law);
        let (s_l, s_r) = roe_signal_speeds(left, right, gas_law);

        if s_l > 0. {
            return pair.f_l;
        }
        if s_r < 0. {
            return pair.f_r;
        }

        let v_l = left.velocity().x;
        let v_r = right.velocity().x;
        let rho_l = left.density();
        let rho_r = right.density();
        let s_star = (right.pressure() - left.pressure() + pair.u_l.momentum().x * (s_l - v_l)
            - pair.u_r.momentum().x * (s_r - v_r))
            / (rho_l * (s_l - v_l) - rho_r * (s_r - v_r));

        if s_star >= 0. {
            let u_star = Self::star_state(left, pair.u_l.energy(), s_l, s_star);
            pair.f_l + s_l * (u_star - pair.u_l)
        } else {
            let u_star = Self::star_state(right, pair.u_r.energy(), s_r, s_star);
            pair.f_r + s_r * (u_star - pair.u_r)
        }
    }
}
