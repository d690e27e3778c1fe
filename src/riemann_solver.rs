//! Riemann solvers for the 2D Euler equations.
//!
//! Every solver works in the frame of a face: the x-component of the velocity of
//! both states is the velocity along the face normal (pointing from the left to
//! the right state) and the y-component is the tangential velocity. The returned
//! flux is ordered `[mass, normal momentum, tangential momentum, energy]`.

use glam::DVec2;

use crate::{
    gas_law::GasLaw,
    physical_quantities::{Conserved, Primitive, Primitives, State},
};

mod ausm;
mod central;
mod exact;
mod godunov;
mod hll;
mod hllc;
mod lax_friedrichs;
mod roe;
mod scheme;
mod steger_warming;
mod vacuum;
mod van_leer;

pub use ausm::{AusmdFlux, AusmdvFlux};
pub use central::CentralFlux;
pub use exact::ExactRiemannSolver;
pub use godunov::GodunovFlux;
pub use hll::{HllFlux, HlleFlux};
pub use hllc::HllcFlux;
pub use lax_friedrichs::LaxFriedrichsFlux;
pub use roe::RoeFlux;
pub use scheme::FluxScheme;
pub use steger_warming::StegerWarmingFlux;
pub use vacuum::VacuumRiemannSolver;
pub use van_leer::VanLeerFlux;

/// Numerical flux function for a pair of states in the face frame.
pub trait RiemannFluxSolver: Sync {
    fn solve_for_flux(
        &self,
        left: &State<Primitive>,
        right: &State<Primitive>,
        gas_law: &GasLaw,
    ) -> State<Conserved>;
}

/// Density left and right of the contact, velocity and pressure of the star region.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct RiemannStarValues {
    pub rho_l: f64,
    pub rho_r: f64,
    pub u: f64,
    pub p: f64,
}

/// Solver for the star region of the one dimensional Riemann problem.
pub trait RiemannStarSolver: Sync {
    #[allow(clippy::too_many_arguments)]
    fn solve_for_star_state(
        &self,
        left: &State<Primitive>,
        right: &State<Primitive>,
        v_l: f64,
        v_r: f64,
        a_l: f64,
        a_r: f64,
        gas_law: &GasLaw,
    ) -> RiemannStarValues;

    /// Sample the self-similar solution at x/t = 0.
    ///
    /// The returned velocity carries the normal velocity at the interface in its
    /// x-component and the upwinded tangential velocity in its y-component
    /// (left value for a non-negative interface velocity, right value otherwise).
    fn sample_interface(
        &self,
        left: &State<Primitive>,
        right: &State<Primitive>,
        gas_law: &GasLaw,
    ) -> Primitives {
        let v_l = left.velocity().x;
        let v_r = right.velocity().x;
        let a_l = left.sound_speed(gas_law);
        let a_r = right.sound_speed(gas_law);

        let (rho, u, p) = if VacuumRiemannSolver::is_vacuum(a_l, a_r, v_r - v_l, gas_law) {
            VacuumRiemannSolver::sample(left, right, v_l, v_r, a_l, a_r, gas_law)
        } else {
            let star = self.solve_for_star_state(left, right, v_l, v_r, a_l, a_r, gas_law);
            sample_star_solution(&star, left, right, v_l, v_r, a_l, a_r, gas_law)
        };

        let v_t = if u >= 0. {
            left.velocity().y
        } else {
            right.velocity().y
        };
        Primitives::new(rho, DVec2::new(u, v_t), p)
    }
}

/// Sampling of the star solution at x/t = 0, see Toro section 4.5.
#[allow(clippy::too_many_arguments)]
fn sample_star_solution(
    star: &RiemannStarValues,
    left: &Primitives,
    right: &Primitives,
    v_l: f64,
    v_r: f64,
    a_l: f64,
    a_r: f64,
    gas_law: &GasLaw,
) -> (f64, f64, f64) {
    let gamma = gas_law.gamma();
    if star.u >= 0. {
        // left of the contact discontinuity
        let left_state = (left.density(), v_l, left.pressure());
        let star_state = (star.rho_l, star.u, star.p);
        let pdpl = star.p / left.pressure();
        if pdpl > 1. {
            // left shock
            let s_l = v_l - a_l * (0.5 * gamma.gp1dg() * pdpl + gamma.gm1d2g()).sqrt();
            if s_l >= 0. {
                left_state
            } else {
                star_state
            }
        } else {
            // left rarefaction
            let s_hl = v_l - a_l;
            if s_hl >= 0. {
                left_state
            } else if star.u - a_l * pdpl.powf(gamma.gm1d2g()) <= 0. {
                star_state
            } else {
                ExactRiemannSolver::left_fan(left, v_l, a_l, gas_law)
            }
        }
    } else {
        // right of the contact discontinuity
        let right_state = (right.density(), v_r, right.pressure());
        let star_state = (star.rho_r, star.u, star.p);
        let pdpr = star.p / right.pressure();
        if pdpr > 1. {
            // right shock
            let s_r = v_r + a_r * (0.5 * gamma.gp1dg() * pdpr + gamma.gm1d2g()).sqrt();
            if s_r <= 0. {
                right_state
            } else {
                star_state
            }
        } else {
            // right rarefaction
            let s_hr = v_r + a_r;
            if s_hr <= 0. {
                right_state
            } else if star.u + a_r * pdpr.powf(gamma.gm1d2g()) >= 0. {
                star_state
            } else {
                ExactRiemannSolver::right_fan(right, v_r, a_r, gas_law)
            }
        }
    }
}

/// Conservative state vectors and physical fluxes of a pair of face-frame states.
pub(crate) struct StatePair {
    pub u_l: State<Conserved>,
    pub u_r: State<Conserved>,
    pub f_l: State<Conserved>,
    pub f_r: State<Conserved>,
}

impl StatePair {
    pub(crate) fn new(left: &Primitives, right: &Primitives, gas_law: &GasLaw) -> Self {
        Self {
            u_l: State::<Conserved>::from_primitives(left, gas_law),
            u_r: State::<Conserved>::from_primitives(right, gas_law),
            f_l: left.physical_flux(gas_law),
            f_r: right.physical_flux(gas_law),
        }
    }
}

/// Density-square-root weighted (Roe) averages of velocity and enthalpy and the
/// corresponding sound speed.
#[derive(Debug, Clone, Copy)]
pub(crate) struct RoeAverage {
    pub velocity: DVec2,
    pub enthalpy: f64,
    pub sound_speed: f64,
}

impl RoeAverage {
    pub(crate) fn new(left: &Primitives, right: &Primitives, gas_law: &GasLaw) -> Self {
        let sqrt_rho_l = left.density().sqrt();
        let sqrt_rho_r = right.density().sqrt();
        let norm = 1. / (sqrt_rho_l + sqrt_rho_r);
        let velocity = (sqrt_rho_r * right.velocity() + sqrt_rho_l * left.velocity()) * norm;
        let enthalpy =
            (sqrt_rho_r * right.enthalpy(gas_law) + sqrt_rho_l * left.enthalpy(gas_law)) * norm;
        let sound_speed =
            (gas_law.gamma().gm1() * (enthalpy - 0.5 * velocity.length_squared())).sqrt();
        Self {
            velocity,
            enthalpy,
            sound_speed,
        }
    }
}
