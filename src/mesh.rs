//! Index based storage of an unstructured 2D mesh and the face fluxes.
//!
//! Every physical face is stored exactly once together with one flux slot. The
//! flux in the slot is counted positive from the face's left cell to its right
//! cell, so the left cell sees the flux as stored and the right cell sees its
//! negation.

use std::collections::HashMap;

use glam::DVec2;
use rayon::prelude::*;

use crate::{
    errors::{FluxError, MeshError, StateLocation},
    finite_volume_solver::FiniteVolumeSolver,
    flux::{flux_exchange, FaceStencil},
    physical_quantities::{Conserved, Gradients, Primitive, Primitives, State},
    source::SourceTerm,
};

const NORMAL_TOLERANCE: f64 = 1e-10;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadraturePoint {
    pub position: DVec2,
    pub weight: f64,
}

#[derive(Debug, Clone)]
pub struct Cell {
    pub centroid: DVec2,
    pub volume: f64,
    pub primitives: Primitives,
    pub gradients: Gradients<Primitive>,
    pub quadrature: Vec<QuadraturePoint>,
    /// Quadrature sum of the source term, see [`Mesh::source_calculation`].
    pub source: State<Conserved>,
}

impl Cell {
    /// A cell with zero gradients and a one point (centroid) quadrature rule.
    pub fn new(centroid: DVec2, volume: f64, primitives: Primitives) -> Self {
        Self {
            centroid,
            volume,
            primitives,
            gradients: Gradients::zeros(),
            quadrature: vec![QuadraturePoint {
                position: centroid,
                weight: volume,
            }],
            source: State::zero(),
        }
    }

    pub fn with_gradients(mut self, gradients: Gradients<Primitive>) -> Self {
        self.gradients = gradients;
        self
    }

    pub fn with_quadrature(mut self, quadrature: Vec<QuadraturePoint>) -> Self {
        self.quadrature = quadrature;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Face {
    left: usize,
    right: usize,
    normal: DVec2,
    length: f64,
    shift: DVec2,
}

impl Face {
    /// A face between the cells `left` and `right` with unit `normal` pointing
    /// from left to right.
    pub fn new(left: usize, right: usize, normal: DVec2, length: f64) -> Self {
        Self {
            left,
            right,
            normal,
            length,
            shift: DVec2::ZERO,
        }
    }

    /// Periodic offset to add to the right cell's centroid.
    pub fn with_shift(mut self, shift: DVec2) -> Self {
        self.shift = shift;
        self
    }

    pub fn left(&self) -> usize {
        self.left
    }

    pub fn right(&self) -> usize {
        self.right
    }

    pub fn normal(&self) -> DVec2 {
        self.normal
    }

    pub fn length(&self) -> f64 {
        self.length
    }

    pub fn shift(&self) -> DVec2 {
        self.shift
    }
}

pub struct Mesh {
    cells: Vec<Cell>,
    faces: Vec<Face>,
    face_states: Option<Vec<(Primitives, Primitives)>>,
    fluxes: Vec<State<Conserved>>,
    cell_face_offsets: Vec<usize>,
    cell_faces: Vec<usize>,
}

impl Mesh {
    pub fn new(cells: Vec<Cell>, faces: Vec<Face>) -> Result<Self, MeshError> {
        let num_cells = cells.len();
        let mut pairs = HashMap::with_capacity(faces.len());
        for (idx, face) in faces.iter().enumerate() {
            for cell in [face.left, face.right] {
                if cell >= num_cells {
                    return Err(MeshError::CellOutOfRange {
                        face: idx,
                        cell,
                        num_cells,
                    });
                }
            }
            if face.left == face.right {
                return Err(MeshError::SelfConnection {
                    face: idx,
                    cell: face.left,
                });
            }
            let normal_length = face.normal.length();
            if !((normal_length - 1.).abs() < NORMAL_TOLERANCE) {
                return Err(MeshError::NonUnitNormal {
                    face: idx,
                    length: normal_length,
                });
            }
            if !(face.length.is_finite() && face.length > 0.) {
                return Err(MeshError::InvalidLength {
                    face: idx,
                    length: face.length,
                });
            }
            let centroid_delta = cells[face.right].centroid + face.shift - cells[face.left].centroid;
            if !(centroid_delta.length() > 0.) {
                return Err(MeshError::CoincidingCentroids {
                    face: idx,
                    left: face.left,
                    right: face.right,
                });
            }
            if !(face.normal.dot(centroid_delta) > 0.) {
                return Err(MeshError::InvertedNormal {
                    face: idx,
                    left: face.left,
                    right: face.right,
                });
            }
            let key = (face.left.min(face.right), face.left.max(face.right));
            if let Some(other) = pairs.insert(key, idx) {
                return Err(MeshError::DuplicateFace {
                    face: idx,
                    other,
                    left: key.0,
                    right: key.1,
                });
            }
        }

        // cell -> face connectivity in compressed row format
        let mut cell_face_offsets = vec![0; num_cells + 1];
        for face in faces.iter() {
            cell_face_offsets[face.left + 1] += 1;
            cell_face_offsets[face.right + 1] += 1;
        }
        for idx in 0..num_cells {
            cell_face_offsets[idx + 1] += cell_face_offsets[idx];
        }
        let mut fill = cell_face_offsets.clone();
        let mut cell_faces = vec![0; 2 * faces.len()];
        for (idx, face) in faces.iter().enumerate() {
            for cell in [face.left, face.right] {
                cell_faces[fill[cell]] = idx;
                fill[cell] += 1;
            }
        }

        log::debug!("Constructed mesh with {} cells and {} faces", num_cells, faces.len());

        Ok(Self {
            fluxes: vec![State::zero(); faces.len()],
            cells,
            faces,
            face_states: None,
            cell_face_offsets,
            cell_faces,
        })
    }

    /// Doubly periodic Cartesian grid of `nx` by `ny` cells covering
    /// `[0, box_size.x] x [0, box_size.y]`, with the state of every cell set to
    /// `f` evaluated at its centroid.
    pub fn uniform_periodic<F>(
        nx: usize,
        ny: usize,
        box_size: DVec2,
        f: F,
    ) -> Result<Self, MeshError>
    where
        F: Fn(DVec2) -> Primitives,
    {
        if nx < 3 || ny < 3 {
            return Err(MeshError::GridTooSmall { nx, ny });
        }
        let dx = box_size.x / nx as f64;
        let dy = box_size.y / ny as f64;

        let mut cells = Vec::with_capacity(nx * ny);
        let mut faces = Vec::with_capacity(2 * nx * ny);
        for j in 0..ny {
            for i in 0..nx {
                let centroid = DVec2::new((i as f64 + 0.5) * dx, (j as f64 + 0.5) * dy);
                cells.push(Cell::new(centroid, dx * dy, f(centroid)));

                let idx = i + nx * j;
                let east = (i + 1) % nx + nx * j;
                let north = i + nx * ((j + 1) % ny);
                let east_shift = if i + 1 == nx { box_size.x } else { 0. };
                let north_shift = if j + 1 == ny { box_size.y } else { 0. };
                faces.push(Face::new(idx, east, DVec2::X, dy).with_shift(east_shift * DVec2::X));
                faces.push(Face::new(idx, north, DVec2::Y, dx).with_shift(north_shift * DVec2::Y));
            }
        }

        Self::new(cells, faces)
    }

    /// Use reconstructed `(left, right)` states for every face instead of the
    /// cell states.
    pub fn set_face_states(&mut self, states: Vec<(Primitives, Primitives)>) -> Result<(), MeshError> {
        if states.len() != self.faces.len() {
            return Err(MeshError::FaceStateCount {
                expected: self.faces.len(),
                found: states.len(),
            });
        }
        self.face_states = Some(states);
        Ok(())
    }

    pub fn clear_face_states(&mut self) {
        self.face_states = None;
    }

    /// Compute the flux through every face.
    ///
    /// All states the solver will read are validated first; on error no flux
    /// slot is modified.
    pub fn flux_calculation<F: FiniteVolumeSolver + ?Sized>(&mut self, solver: &F) -> Result<(), FluxError> {
        self.check_states(solver.uses_gradients())?;

        let cells = &self.cells;
        let face_states = self.face_states.as_deref();
        let fluxes = self
            .faces
            .par_iter()
            .enumerate()
            .map(|(idx, face)| {
                let left = &cells[face.left];
                let right = &cells[face.right];
                let (primitives_left, primitives_right) = match face_states {
                    Some(states) => (&states[idx].0, &states[idx].1),
                    None => (&left.primitives, &right.primitives),
                };
                let stencil = FaceStencil {
                    face,
                    left,
                    right,
                    primitives_left,
                    primitives_right,
                };
                flux_exchange(&stencil, solver)
            })
            .collect::<Vec<_>>();

        if let Some(face) = fluxes.iter().position(|flux| !flux.is_finite()) {
            return Err(FluxError::NonFiniteFlux { face });
        }
        self.fluxes = fluxes;

        log::debug!("Computed fluxes for {} faces", self.faces.len());
        Ok(())
    }

    fn check_states(&self, check_gradients: bool) -> Result<(), FluxError> {
        let non_physical = |location, state: &Primitives| FluxError::NonPhysicalState {
            location,
            density: state.density(),
            pressure: state.pressure(),
        };
        for (idx, cell) in self.cells.iter().enumerate() {
            if !cell.primitives.is_physical() {
                return Err(non_physical(StateLocation::Cell(idx), &cell.primitives));
            }
            if check_gradients && !cell.gradients.is_finite() {
                return Err(FluxError::NonFiniteGradients { cell: idx });
            }
        }
        if let Some(states) = &self.face_states {
            for (idx, (left, right)) in states.iter().enumerate() {
                for state in [left, right] {
                    if !state.is_physical() {
                        return Err(non_physical(StateLocation::Face(idx), state));
                    }
                }
            }
        }
        Ok(())
    }

    /// Evaluate the source term with each cell's quadrature rule at time `t`.
    pub fn source_calculation(&mut self, source: &SourceTerm, t: f64) {
        self.cells.par_iter_mut().for_each(|cell| {
            cell.source = State::zero();
            for point in cell.quadrature.iter() {
                cell.source += point.weight * source.eval(point.position, t);
            }
        });
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Mutable access to the cell states and gradients.
    pub fn cells_mut(&mut self) -> &mut [Cell] {
        &mut self.cells
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    pub fn fluxes(&self) -> &[State<Conserved>] {
        &self.fluxes
    }

    pub fn face_flux(&self, face: usize) -> Option<State<Conserved>> {
        self.fluxes.get(face).copied()
    }

    /// Indices of the faces of `cell`.
    pub fn cell_faces(&self, cell: usize) -> Option<&[usize]> {
        if cell >= self.cells.len() {
            return None;
        }
        Some(&self.cell_faces[self.cell_face_offsets[cell]..self.cell_face_offsets[cell + 1]])
    }

    /// Fluxes out of `cell` through each of its faces.
    pub fn cell_face_fluxes(
        &self,
        cell: usize,
    ) -> Option<impl Iterator<Item = State<Conserved>> + '_> {
        let faces = self.cell_faces(cell)?;
        Some(faces.iter().map(move |&idx| {
            let flux = self.fluxes[idx];
            if self.faces[idx].left == cell {
                flux
            } else {
                -flux
            }
        }))
    }

    /// Net flux out of `cell`.
    pub fn cell_flux_balance(&self, cell: usize) -> Option<State<Conserved>> {
        Some(
            self.cell_face_fluxes(cell)?
                .fold(State::zero(), |total, flux| total + flux),
        )
    }
}

#[cfg(test)]
mod test {
    use float_cmp::assert_approx_eq;

    use super::*;
    use crate::{finite_volume_solver::EulerFvs, gas_law::GasLaw, riemann_solver::FluxScheme};

    fn uniform(_x: DVec2) -> Primitives {
        Primitives::new(1., DVec2::new(0.4, -0.3), 1.)
    }

    fn two_cells() -> Vec<Cell> {
        vec![
            Cell::new(DVec2::ZERO, 1., uniform(DVec2::ZERO)),
            Cell::new(DVec2::X, 1., uniform(DVec2::X)),
        ]
    }

    #[test]
    fn test_validation() {
        let face = Face::new(0, 1, DVec2::X, 1.);
        assert!(Mesh::new(two_cells(), vec![face]).is_ok());

        assert_eq!(
            Mesh::new(two_cells(), vec![Face::new(0, 2, DVec2::X, 1.)]).err(),
            Some(MeshError::CellOutOfRange {
                face: 0,
                cell: 2,
                num_cells: 2
            })
        );
        assert_eq!(
            Mesh::new(two_cells(), vec![Face::new(1, 1, DVec2::X, 1.)]).err(),
            Some(MeshError::SelfConnection { face: 0, cell: 1 })
        );
        assert!(matches!(
            Mesh::new(two_cells(), vec![Face::new(0, 1, DVec2::new(1., 1.), 1.)]),
            Err(MeshError::NonUnitNormal { face: 0, .. })
        ));
        assert!(matches!(
            Mesh::new(two_cells(), vec![Face::new(0, 1, DVec2::X, 0.)]),
            Err(MeshError::InvalidLength { face: 0, .. })
        ));
        assert!(matches!(
            Mesh::new(two_cells(), vec![Face::new(0, 1, DVec2::X, f64::NAN)]),
            Err(MeshError::InvalidLength { face: 0, .. })
        ));
        assert_eq!(
            Mesh::new(
                two_cells(),
                vec![Face::new(0, 1, DVec2::X, 1.).with_shift(-DVec2::X)]
            )
            .err(),
            Some(MeshError::CoincidingCentroids {
                face: 0,
                left: 0,
                right: 1
            })
        );
        assert_eq!(
            Mesh::new(two_cells(), vec![Face::new(0, 1, -DVec2::X, 1.)]).err(),
            Some(MeshError::InvertedNormal {
                face: 0,
                left: 0,
                right: 1
            })
        );
        // tangential to the centroid connection
        assert!(matches!(
            Mesh::new(two_cells(), vec![Face::new(0, 1, DVec2::Y, 1.)]),
            Err(MeshError::InvertedNormal { face: 0, .. })
        ));
        assert_eq!(
            Mesh::new(two_cells(), vec![face, Face::new(1, 0, -DVec2::X, 1.)]).err(),
            Some(MeshError::DuplicateFace {
                face: 1,
                other: 0,
                left: 0,
                right: 1
            })
        );
    }

    #[test]
    fn test_uniform_periodic_connectivity() {
        let mesh = Mesh::uniform_periodic(4, 3, DVec2::new(2., 1.5), uniform).unwrap();
        assert_eq!(mesh.cells().len(), 12);
        assert_eq!(mesh.faces().len(), 24);
        for cell in 0..12 {
            let faces = mesh.cell_faces(cell).unwrap();
            assert_eq!(faces.len(), 4);
            for &face in faces {
                let face = &mesh.faces()[face];
                assert!(face.left() == cell || face.right() == cell);
                assert_approx_eq!(f64, face.length(), 0.5);
            }
        }
        assert!(mesh.cell_faces(12).is_none());

        // periodic neighbours are one cell width apart
        let face = mesh.faces()[2 * 3];
        assert_eq!((face.left(), face.right()), (3, 0));
        let delta = mesh.cells()[0].centroid + face.shift() - mesh.cells()[3].centroid;
        assert_approx_eq!(f64, delta.x, 0.5);
        assert_approx_eq!(f64, delta.y, 0.);

        assert_eq!(
            Mesh::uniform_periodic(2, 5, DVec2::ONE, uniform).err(),
            Some(MeshError::GridTooSmall { nx: 2, ny: 5 })
        );
    }

    #[test]
    fn test_uniform_flow_is_balanced() {
        let gas_law = GasLaw::new(1.4);
        let mut mesh = Mesh::uniform_periodic(5, 4, DVec2::ONE, uniform).unwrap();
        mesh.flux_calculation(&EulerFvs::new(FluxScheme::Roe, gas_law)).unwrap();

        let expected = uniform(DVec2::ZERO).physical_flux(&gas_law);
        let east = mesh.face_flux(0).unwrap();
        assert_approx_eq!(f64, east.mass(), 0.25 * expected.mass(), epsilon = 1e-14);
        for cell in 0..mesh.cells().len() {
            let balance = mesh.cell_flux_balance(cell).unwrap();
            for i in 0..4 {
                assert_approx_eq!(f64, balance[i], 0., epsilon = 1e-14);
            }
        }
    }

    #[test]
    fn test_signed_views() {
        let gas_law = GasLaw::new(1.4);
        let mut cells = two_cells();
        cells[1].primitives = Primitives::new(0.5, DVec2::ZERO, 0.2);
        let mut mesh = Mesh::new(cells, vec![Face::new(0, 1, DVec2::X, 2.)]).unwrap();
        mesh.flux_calculation(&EulerFvs::new(FluxScheme::Hllc, gas_law)).unwrap();

        let flux = mesh.face_flux(0).unwrap();
        let left: Vec<_> = mesh.cell_face_fluxes(0).unwrap().collect();
        let right: Vec<_> = mesh.cell_face_fluxes(1).unwrap().collect();
        assert_eq!(left, vec![flux]);
        assert_eq!(right, vec![-flux]);
        assert!(flux.mass() > 0.);
    }

    #[test]
    fn test_non_physical_states_are_rejected() {
        let gas_law = GasLaw::new(1.4);
        let solver = EulerFvs::new(FluxScheme::Hll, gas_law);
        let mut mesh = Mesh::uniform_periodic(3, 3, DVec2::ONE, uniform).unwrap();
        mesh.flux_calculation(&solver).unwrap();
        let before = mesh.fluxes().to_vec();

        mesh.cells_mut()[4].primitives = Primitives::new(1., DVec2::ZERO, -0.1);
        mesh.cells_mut()[1].primitives = Primitives::new(0.5, DVec2::ZERO, 1.);
        assert_eq!(
            mesh.flux_calculation(&solver),
            Err(FluxError::NonPhysicalState {
                location: StateLocation::Cell(4),
                density: 1.,
                pressure: -0.1
            })
        );
        assert_eq!(mesh.fluxes(), &before[..]);
    }

    #[test]
    fn test_face_states() {
        let gas_law = GasLaw::new(1.4);
        let solver = EulerFvs::new(FluxScheme::Godunov, gas_law);
        let mut mesh = Mesh::new(two_cells(), vec![Face::new(0, 1, DVec2::X, 1.)]).unwrap();
        assert_eq!(
            mesh.set_face_states(vec![]),
            Err(MeshError::FaceStateCount {
                expected: 1,
                found: 0
            })
        );

        let state = Primitives::new(2., DVec2::new(1., 0.), 3.);
        mesh.set_face_states(vec![(state, state)]).unwrap();
        mesh.flux_calculation(&solver).unwrap();
        assert_approx_eq!(f64, mesh.face_flux(0).unwrap().mass(), 2., epsilon = 1e-12);

        mesh.set_face_states(vec![(state, Primitives::new(0., DVec2::ZERO, 1.))])
            .unwrap();
        assert!(matches!(
            mesh.flux_calculation(&solver),
            Err(FluxError::NonPhysicalState {
                location: StateLocation::Face(0),
                ..
            })
        ));

        mesh.clear_face_states();
        mesh.flux_calculation(&solver).unwrap();
        assert_approx_eq!(f64, mesh.face_flux(0).unwrap().mass(), 0.4, epsilon = 1e-12);
    }
}
