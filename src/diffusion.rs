//! Viscous fluxes of the compressible Navier-Stokes equations.
//!
//! All quantities are in the global frame. Gradients are gradients of the
//! primitive variables (density, velocity, pressure).

use glam::DVec2;

use crate::{
    gas_law::GasLaw,
    physical_quantities::{Conserved, Gradients, Primitive, Primitives, State},
};

/// Dynamic viscosity and Prandtl number of a Newtonian fluid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viscosity {
    pub mu: f64,
    pub prandtl: f64,
}

impl Viscosity {
    pub fn new(mu: f64, prandtl: f64) -> Self {
        Self { mu, prandtl }
    }

    /// Viscous fluxes along x and y of the mean interface state.
    ///
    /// Newtonian stresses with Stokes' hypothesis and Fourier heat conduction
    /// with the conductivity following from the Prandtl number. The mass
    /// components are zero.
    pub fn diffusion_flux(
        &self,
        state: &Primitives,
        gradients: &Gradients<Primitive>,
        gas_law: &GasLaw,
    ) -> (State<Conserved>, State<Conserved>) {
        let d_dx = gradients.x();
        let d_dy = gradients.y();
        let v = state.velocity();
        let rho = state.density();
        let p = state.pressure();

        let div_v = d_dx.velocity().x + d_dy.velocity().y;
        let tau_xx = 2. * d_dx.velocity().x - 2. / 3. * div_v;
        let tau_yy = 2. * d_dy.velocity().y - 2. / 3. * div_v;
        let tau_xy = d_dy.velocity().x + d_dx.velocity().y;

        // gradient of p / rho, proportional to the temperature gradient
        let heat = gas_law.gamma().gamma() * gas_law.gamma().odgm1() / (self.prandtl * rho * rho);
        let q_x = heat * (rho * d_dx.pressure() - p * d_dx.density());
        let q_y = heat * (rho * d_dy.pressure() - p * d_dy.density());

        let f = self.mu
            * State::<Conserved>::new(
                0.,
                DVec2::new(tau_xx, tau_xy),
                v.x * tau_xx + v.y * tau_xy + q_x,
            );
        let g = self.mu
            * State::<Conserved>::new(
                0.,
                DVec2::new(tau_xy, tau_yy),
                v.x * tau_xy + v.y * tau_yy + q_y,
            );
        (f, g)
    }

    /// Viscous flux through a face with unit normal `normal`.
    pub fn normal_diffusion_flux(
        &self,
        state: &Primitives,
        gradients: &Gradients<Primitive>,
        normal: DVec2,
        gas_law: &GasLaw,
    ) -> State<Conserved> {
        let (f, g) = self.diffusion_flux(state, gradients, gas_law);
        normal.x * f + normal.y * g
    }
}

/// Replace the component of the averaged gradients along the centroid to
/// centroid direction by the finite difference of the cell values.
///
/// `centroid_delta` points from the left to the right cell centroid.
pub fn corrected_gradients(
    mean: &Gradients<Primitive>,
    q_left: &Primitives,
    q_right: &Primitives,
    centroid_delta: DVec2,
) -> Gradients<Primitive> {
    let distance = centroid_delta.length();
    let direction = centroid_delta / distance;
    let correction = mean.dot(direction) - (1. / distance) * (*q_right - *q_left);

    let mut corrected = *mean;
    corrected.add_along(-correction, direction);
    corrected
}
