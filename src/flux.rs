use glam::DVec2;

use crate::{
    finite_volume_solver::FiniteVolumeSolver,
    gas_law::GasLaw,
    mesh::{Cell, Face},
    physical_quantities::{Conserved, Primitives, State},
    riemann_solver::RiemannFluxSolver,
};

/// Everything needed to compute the flux through one face.
pub struct FaceStencil<'a> {
    pub face: &'a Face,
    pub left: &'a Cell,
    pub right: &'a Cell,
    /// States on the left and right of the face. These are either the cell
    /// states or externally reconstructed face values.
    pub primitives_left: &'a Primitives,
    pub primitives_right: &'a Primitives,
}

impl<'a> FaceStencil<'a> {
    /// Vector from the left to the (periodically shifted) right cell centroid.
    pub fn centroid_delta(&self) -> DVec2 {
        self.right.centroid + self.face.shift() - self.left.centroid
    }
}

/// Convective flux through the face per unit length in the global frame.
pub fn convective_flux<R: RiemannFluxSolver + ?Sized>(
    stencil: &FaceStencil,
    riemann_solver: &R,
    gas_law: &GasLaw,
) -> State<Conserved> {
    let normal = stencil.face.normal();
    let left = stencil.primitives_left.rotate_to_face(normal);
    let right = stencil.primitives_right.rotate_to_face(normal);
    riemann_solver
        .solve_for_flux(&left, &right, gas_law)
        .rotate_from_face(normal)
}

/// Flux through the face integrated over its length, counted positive from the
/// left to the right cell.
pub fn flux_exchange<F: FiniteVolumeSolver + ?Sized>(
    stencil: &FaceStencil,
    solver: &F,
) -> State<Conserved> {
    let fluxes = stencil.face.length() * solver.interface_flux(stencil);

    debug_assert!(fluxes.mass().is_finite());
    debug_assert!(fluxes.momentum().is_finite());
    debug_assert!(fluxes.energy().is_finite());

    fluxes
}
