use crate::{
    config::RunConfig,
    diffusion::{corrected_gradients, Viscosity},
    flux::{convective_flux, FaceStencil},
    gas_law::GasLaw,
    physical_quantities::{Conserved, State},
    riemann_solver::{FluxScheme, RiemannFluxSolver},
};

/// Computes the flux through a single face; the strategy for the physics of a
/// run (inviscid or viscous) is fixed when the solver is constructed.
pub trait FiniteVolumeSolver: Sync {
    /// Flux through the face per unit length in the global frame, positive
    /// from the left to the right cell.
    fn interface_flux(&self, stencil: &FaceStencil) -> State<Conserved>;

    /// Whether the cell gradients are read.
    fn uses_gradients(&self) -> bool {
        false
    }
}

/// Solver for the Euler equations: convective fluxes only.
pub struct EulerFvs<R: RiemannFluxSolver = FluxScheme> {
    riemann_solver: R,
    gas_law: GasLaw,
}

impl<R: RiemannFluxSolver> EulerFvs<R> {
    pub fn new(riemann_solver: R, gas_law: GasLaw) -> Self {
        Self {
            riemann_solver,
            gas_law,
        }
    }
}

impl<R: RiemannFluxSolver> FiniteVolumeSolver for EulerFvs<R> {
    fn interface_flux(&self, stencil: &FaceStencil) -> State<Conserved> {
        convective_flux(stencil, &self.riemann_solver, &self.gas_law)
    }
}

/// Solver for the Navier-Stokes equations: convective minus viscous fluxes.
pub struct NavierStokesFvs<R: RiemannFluxSolver = FluxScheme> {
    riemann_solver: R,
    gas_law: GasLaw,
    viscosity: Viscosity,
}

impl<R: RiemannFluxSolver> NavierStokesFvs<R> {
    pub fn new(riemann_solver: R, gas_law: GasLaw, viscosity: Viscosity) -> Self {
        Self {
            riemann_solver,
            gas_law,
            viscosity,
        }
    }
}

impl<R: RiemannFluxSolver> FiniteVolumeSolver for NavierStokesFvs<R> {
    fn interface_flux(&self, stencil: &FaceStencil) -> State<Conserved> {
        let convective = convective_flux(stencil, &self.riemann_solver, &self.gas_law);

        let mean_state = stencil.primitives_left.mean(stencil.primitives_right);
        let mean_gradients = stencil.left.gradients.mean(&stencil.right.gradients);
        let gradients = corrected_gradients(
            &mean_gradients,
            &stencil.left.primitives,
            &stencil.right.primitives,
            stencil.centroid_delta(),
        );
        let viscous = self.viscosity.normal_diffusion_flux(
            &mean_state,
            &gradients,
            stencil.face.normal(),
            &self.gas_law,
        );

        convective - viscous
    }

    fn uses_gradients(&self) -> bool {
        true
    }
}

/// Build the solver for the physics selected in `config`.
pub fn from_config(config: &RunConfig) -> Box<dyn FiniteVolumeSolver> {
    let scheme = config.flux_scheme;
    match config.viscosity {
        Some(viscosity) => {
            log::info!(
                "Navier-Stokes fluxes with {scheme} convective flux (mu = {}, Pr = {})",
                viscosity.mu,
                viscosity.prandtl
            );
            Box::new(NavierStokesFvs::new(scheme, config.gas_law, viscosity))
        }
        None => {
            log::info!("Euler fluxes with {scheme} convective flux");
            Box::new(EulerFvs::new(scheme, config.gas_law))
        }
    }
}
