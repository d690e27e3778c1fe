//! Interface flux engine for two-dimensional unstructured finite volume solvers of the
//! compressible Euler and Navier-Stokes equations.
//!
//! The library also provides access to a variety of Riemann solvers and numerical flux
//! functions for the Euler equations.

pub use config::RunConfig;
pub use errors::{ConfigError, FluxError, MeshError};
pub use gas_law::GasLaw;
pub use mesh::{Cell, Face, Mesh};
pub use riemann_solver::FluxScheme;
pub use source::SourceFunction;

pub mod config;
pub mod diffusion;
pub mod errors;
pub mod finite_volume_solver;
pub mod flux;
pub mod gas_law;
pub mod mesh;
pub mod physical_quantities;
pub mod riemann_solver;
pub mod source;
