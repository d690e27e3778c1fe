#![allow(dead_code)]

use std::f64::consts::PI;

use float_cmp::assert_approx_eq;
use fv2d_flux::{
    physical_quantities::{Conserved, Gradients, Primitive, Primitives, State},
    GasLaw, Mesh, RunConfig, SourceFunction,
};
use glam::DVec2;
use rand::{rngs::StdRng, Rng, SeedableRng};

pub const EULER_CONFIG: &'static str = r##"
equation_of_state:
  gamma: 1.4
hydrodynamics:
  flux_scheme: "central"
source:
  kind: "manufactured_wave"
  frequency: 1.
  amplitude: 0.1
"##;

pub const NAVIER_STOKES_CONFIG: &'static str = r##"
equation_of_state:
  gamma: 1.4
hydrodynamics:
  flux_scheme: 8
  viscous:
    viscosity: 0.01
    prandtl: 0.72
source:
  kind: 1
"##;

/// The manufactured wave is periodic on this box.
pub const BOX_SIZE: DVec2 = DVec2::new(2., 2.);

pub fn get_config(cfg: &str) -> RunConfig {
    RunConfig::from_yaml_str(cfg).expect("Error creating run configuration!")
}

pub fn random_state(rng: &mut impl Rng) -> Primitives {
    Primitives::new(
        rng.gen_range(0.1..10.),
        DVec2::new(rng.gen_range(-2. ..2.), rng.gen_range(-2. ..2.)),
        rng.gen_range(0.1..10.),
    )
}

pub fn random_gradients(rng: &mut impl Rng) -> Gradients<Primitive> {
    let mut gradients = Gradients::zeros();
    for i in 0..4 {
        gradients[i] = DVec2::new(rng.gen_range(-1. ..1.), rng.gen_range(-1. ..1.));
    }
    gradients
}

/// Periodic grid with random states and gradients in every cell.
pub fn random_mesh(nx: usize, ny: usize, seed: u64) -> Mesh {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut mesh = Mesh::uniform_periodic(nx, ny, DVec2::ONE, |_| {
        Primitives::new(1., DVec2::ZERO, 1.)
    })
    .expect("Error creating mesh!");
    for cell in mesh.cells_mut() {
        cell.primitives = random_state(&mut rng);
        cell.gradients = random_gradients(&mut rng);
    }
    mesh
}

fn wave_parameters(source: &SourceFunction) -> (f64, f64) {
    match *source {
        SourceFunction::ManufacturedWave {
            frequency,
            amplitude,
        } => (PI * frequency, amplitude),
        SourceFunction::None => panic!("No exact solution without a source!"),
    }
}

/// Primitive gradients of the manufactured solution.
pub fn exact_gradients(
    source: &SourceFunction,
    x: DVec2,
    t: f64,
    gas_law: &GasLaw,
) -> Gradients<Primitive> {
    let (om, amplitude) = wave_parameters(source);
    let theta = om * (x.x + x.y) - 2. * PI * t;
    let density = 2. + amplitude * theta.sin();
    let d_density = amplitude * om * theta.cos();
    let d_pressure = gas_law.gamma().gm1() * (2. * density - 1.) * d_density;
    let partial = State::<Primitive>::new(d_density, DVec2::ZERO, d_pressure);
    Gradients::from_partials(partial, partial)
}

/// Time derivative of the conserved variables of the manufactured solution.
pub fn exact_time_derivative(source: &SourceFunction, x: DVec2, t: f64) -> State<Conserved> {
    let (om, amplitude) = wave_parameters(source);
    let theta = om * (x.x + x.y) - 2. * PI * t;
    let density = 2. + amplitude * theta.sin();
    let d_density = -2. * PI * amplitude * theta.cos();
    State::<Conserved>::new(d_density, DVec2::splat(d_density), 2. * density * d_density)
}

/// Periodic grid initialised with the manufactured solution of `config` at time `t`.
pub fn manufactured_mesh(n: usize, config: &RunConfig, t: f64) -> Mesh {
    let gas_law = config.gas_law;
    let source = config.source;
    let mut mesh = Mesh::uniform_periodic(n, n, BOX_SIZE, |x| {
        source
            .exact_solution(x, t, &gas_law)
            .expect("No exact solution!")
    })
    .expect("Error creating mesh!");
    for cell in mesh.cells_mut() {
        cell.gradients = exact_gradients(&source, cell.centroid, t, &gas_law);
    }
    mesh
}

pub fn assert_state_approx_eq(a: State<Conserved>, b: State<Conserved>, epsilon: f64) {
    for i in 0..4 {
        assert_approx_eq!(f64, a[i], b[i], epsilon = epsilon);
    }
}
