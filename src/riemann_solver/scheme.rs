use std::str::FromStr;

use crate::{
    errors::ConfigError,
    gas_law::GasLaw,
    physical_quantities::{Conserved, Primitives, State},
};

use super::{
    AusmdFlux, AusmdvFlux, CentralFlux, GodunovFlux, HllFlux, HllcFlux, HlleFlux,
    LaxFriedrichsFlux, RiemannFluxSolver, RoeFlux, StegerWarmingFlux, VanLeerFlux,
};

/// The numerical flux families available for a run.
///
/// The integer identifiers match the legacy configuration files.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, num_enum::IntoPrimitive, num_enum::TryFromPrimitive,
)]
#[repr(u8)]
pub enum FluxScheme {
    Godunov = 1,
    Roe = 2,
    Hll = 3,
    Hlle = 4,
    Hllc = 5,
    LaxFriedrichs = 6,
    StegerWarming = 7,
    Central = 8,
    Ausmd = 9,
    Ausmdv = 10,
    VanLeer = 11,
}

impl FluxScheme {
    pub const ALL: [FluxScheme; 11] = [
        FluxScheme::Godunov,
        FluxScheme::Roe,
        FluxScheme::Hll,
        FluxScheme::Hlle,
        FluxScheme::Hllc,
        FluxScheme::LaxFriedrichs,
        FluxScheme::StegerWarming,
        FluxScheme::Central,
        FluxScheme::Ausmd,
        FluxScheme::Ausmdv,
        FluxScheme::VanLeer,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            FluxScheme::Godunov => "godunov",
            FluxScheme::Roe => "roe",
            FluxScheme::Hll => "hll",
            FluxScheme::Hlle => "hlle",
            FluxScheme::Hllc => "hllc",
            FluxScheme::LaxFriedrichs => "lax-friedrichs",
            FluxScheme::StegerWarming => "steger-warming",
            FluxScheme::Central => "central",
            FluxScheme::Ausmd => "ausmd",
            FluxScheme::Ausmdv => "ausmdv",
            FluxScheme::VanLeer => "van-leer",
        }
    }

    /// Whether the scheme is known to produce correct results.
    pub fn is_reliable(&self) -> bool {
        !matches!(self, FluxScheme::Ausmdv)
    }

    /// Whether the scheme is stable without additional artificial dissipation.
    pub fn is_dissipative(&self) -> bool {
        !matches!(self, FluxScheme::Central)
    }
}

impl std::fmt::Display for FluxScheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FluxScheme {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let scheme = match s.trim().to_ascii_lowercase().as_str() {
            "godunov" | "exact" => FluxScheme::Godunov,
            "roe" => FluxScheme::Roe,
            "hll" => FluxScheme::Hll,
            "hlle" => FluxScheme::Hlle,
            "hllc" => FluxScheme::Hllc,
            "lxf" | "lax-friedrichs" => FluxScheme::LaxFriedrichs,
            "stw" | "steger-warming" => FluxScheme::StegerWarming,
            "central" => FluxScheme::Central,
            "ausmd" => FluxScheme::Ausmd,
            "ausmdv" => FluxScheme::Ausmdv,
            "vanleer" | "van-leer" => FluxScheme::VanLeer,
            _ => return Err(ConfigError::UnknownFluxScheme(s.to_string())),
        };
        Ok(scheme)
    }
}

impl RiemannFluxSolver for FluxScheme {
    fn solve_for_flux(
        &self,
        left: &Primitives,
        right: &Primitives,
        gas_law: &GasLaw,
    ) -> State<Conserved> {
        debug_assert!(left.is_physical() && right.is_physical());
        match self {
            FluxScheme::Godunov => GodunovFlux::exact().solve_for_flux(left, right, gas_law),
            FluxScheme::Roe => RoeFlux.solve_for_flux(left, right, gas_law),
            FluxScheme::Hll => HllFlux.solve_for_flux(left, right, gas_law),
            FluxScheme::Hlle => HlleFlux.solve_for_flux(left, right, gas_law),
            FluxScheme::Hllc => HllcFlux.solve_for_flux(left, right, gas_law),
            FluxScheme::LaxFriedrichs => LaxFriedrichsFlux.solve_for_flux(left, right, gas_law),
            FluxScheme::StegerWarming => StegerWarmingFlux.solve_for_flux(left, right, gas_law),
            FluxScheme::Central => CentralFlux.solve_for_flux(left, right, gas_law),
            FluxScheme::Ausmd => AusmdFlux.solve_for_flux(left, right, gas_law),
            FluxScheme::Ausmdv => AusmdvFlux.solve_for_flux(left, right, gas_law),
            FluxScheme::VanLeer => VanLeerFlux.solve_for_flux(left, right, gas_law),
        }
    }
}
