//! Volumetric source terms for verification runs.

use std::f64::consts::PI;

use glam::DVec2;

use crate::{
    diffusion::Viscosity,
    gas_law::GasLaw,
    physical_quantities::{Conserved, Primitives, State},
};

/// Angular frequency in time of the manufactured wave.
const WAVE_TIME_FREQUENCY: f64 = 2. * PI;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum SourceFunction {
    #[default]
    None,
    /// Source that turns a density wave travelling diagonally through a
    /// uniform flow into an exact solution of the Euler and Navier-Stokes
    /// equations.
    ManufacturedWave { frequency: f64, amplitude: f64 },
}

impl SourceFunction {
    pub fn manufactured_wave() -> Self {
        SourceFunction::ManufacturedWave {
            frequency: 1.,
            amplitude: 0.1,
        }
    }

    /// Identifier used in legacy configuration files.
    pub fn id(&self) -> u8 {
        match self {
            SourceFunction::None => 0,
            SourceFunction::ManufacturedWave { .. } => 1,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            SourceFunction::None => "none",
            SourceFunction::ManufacturedWave { .. } => "manufactured_wave",
        }
    }

    /// The exact solution this source term produces, if there is one.
    ///
    /// The density is `2 + A sin(theta)`, the velocity is `(1, 1)` and the
    /// pressure is chosen such that the total energy equals `rho^2`.
    pub fn exact_solution(&self, x: DVec2, t: f64, gas_law: &GasLaw) -> Option<Primitives> {
        match *self {
            SourceFunction::None => None,
            SourceFunction::ManufacturedWave {
                frequency,
                amplitude,
            } => {
                let theta = PI * frequency * (x.x + x.y) - WAVE_TIME_FREQUENCY * t;
                let density = 2. + amplitude * theta.sin();
                let pressure = gas_law.gamma().gm1() * (density * density - density);
                Some(Primitives::new(density, DVec2::ONE, pressure))
            }
        }
    }
}

/// A source function bound to the physics of a run.
#[derive(Debug, Clone, Copy)]
pub struct SourceTerm {
    function: SourceFunction,
    gas_law: GasLaw,
    viscosity: Option<Viscosity>,
}

impl SourceTerm {
    pub fn new(function: SourceFunction, gas_law: GasLaw, viscosity: Option<Viscosity>) -> Self {
        Self {
            function,
            gas_law,
            viscosity,
        }
    }

    pub fn function(&self) -> &SourceFunction {
        &self.function
    }

    /// Source density at position `x` and time `t`.
    pub fn eval(&self, x: DVec2, t: f64) -> State<Conserved> {
        match self.function {
            SourceFunction::None => State::zero(),
            SourceFunction::ManufacturedWave {
                frequency,
                amplitude,
            } => {
                let gamma = self.gas_law.gamma().gamma();
                let om = PI * frequency;
                let a = WAVE_TIME_FREQUENCY;
                let theta = om * (x.x + x.y) - a * t;
                let (sin, cos) = theta.sin_cos();
                let sin2 = (2. * theta).sin();

                let mass = (2. * om - a) * cos;
                let momentum = (om * (3. * gamma - 1.) - a) * cos
                    + amplitude * om * self.gas_law.gamma().gm1() * sin2;
                let mut energy = ((2. + 6. * gamma) * om - 4. * a) * cos
                    + amplitude * (2. * om * gamma - a) * sin2;
                if let Some(viscosity) = self.viscosity {
                    // heat conduction along the density gradient
                    energy += 2. * viscosity.mu * gamma * om * om / viscosity.prandtl * sin;
                }

                amplitude * State::<Conserved>::new(mass, DVec2::splat(momentum), energy)
            }
        }
    }
}
