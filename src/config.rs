use yaml_rust::{Yaml, YamlLoader};

use crate::{
    diffusion::Viscosity,
    errors::ConfigError,
    gas_law::GasLaw,
    riemann_solver::FluxScheme,
    source::{SourceFunction, SourceTerm},
};

/// The physics of a run. Fixed once constructed.
#[derive(Debug, Clone, Copy)]
pub struct RunConfig {
    pub gas_law: GasLaw,
    pub flux_scheme: FluxScheme,
    /// Navier-Stokes physics when present, Euler physics otherwise.
    pub viscosity: Option<Viscosity>,
    pub source: SourceFunction,
}

impl RunConfig {
    pub fn new(gamma: f64, flux_scheme: FluxScheme) -> Result<Self, ConfigError> {
        if !(gamma > 1.) {
            return Err(ConfigError::InvalidParameter {
                name: "equation_of_state:gamma".to_string(),
                value: gamma,
            });
        }
        if !flux_scheme.is_reliable() {
            log::warn!("The {flux_scheme} flux scheme is known to give wrong results!");
        }
        if !flux_scheme.is_dissipative() {
            log::warn!("The {flux_scheme} flux scheme has no numerical dissipation and is unstable on its own!");
        }
        Ok(Self {
            gas_law: GasLaw::new(gamma),
            flux_scheme,
            viscosity: None,
            source: SourceFunction::None,
        })
    }

    pub fn with_viscosity(mut self, viscosity: Viscosity) -> Result<Self, ConfigError> {
        if !(viscosity.mu >= 0.) {
            return Err(ConfigError::InvalidParameter {
                name: "hydrodynamics:viscous:viscosity".to_string(),
                value: viscosity.mu,
            });
        }
        if !(viscosity.prandtl > 0.) {
            return Err(ConfigError::InvalidParameter {
                name: "hydrodynamics:viscous:prandtl".to_string(),
                value: viscosity.prandtl,
            });
        }
        self.viscosity = Some(viscosity);
        Ok(self)
    }

    pub fn with_source(mut self, source: SourceFunction) -> Self {
        self.source = source;
        self
    }

    /// The configured source function bound to the physics of this run.
    pub fn source_term(&self) -> SourceTerm {
        SourceTerm::new(self.source, self.gas_law, self.viscosity)
    }

    pub fn from_yaml_str(source: &str) -> Result<Self, ConfigError> {
        let docs = YamlLoader::load_from_str(source)?;
        let config = docs.first().ok_or(ConfigError::EmptyDocument)?;
        Self::from_yaml(config)
    }

    pub fn from_yaml(yaml: &Yaml) -> Result<Self, ConfigError> {
        let gamma = yaml["equation_of_state"]["gamma"]
            .as_f64()
            .ok_or(ConfigError::MissingParameter(
                "equation_of_state:gamma".to_string(),
            ))?;
        let hydro = &yaml["hydrodynamics"];
        let flux_scheme = parse_flux_scheme(&hydro["flux_scheme"])?;

        let mut config = Self::new(gamma, flux_scheme)?;
        let viscous = &hydro["viscous"];
        if !viscous.is_badvalue() {
            let mu = viscous["viscosity"]
                .as_f64()
                .ok_or(ConfigError::MissingParameter(
                    "hydrodynamics:viscous:viscosity".to_string(),
                ))?;
            let prandtl = viscous["prandtl"].as_f64().unwrap_or(0.72);
            config = config.with_viscosity(Viscosity::new(mu, prandtl))?;
        }
        config = config.with_source(parse_source(&yaml["source"])?);

        log::info!(
            "Configured {} physics with the {} flux scheme (gamma = {gamma}), source: {}",
            if config.viscosity.is_some() { "Navier-Stokes" } else { "Euler" },
            config.flux_scheme,
            config.source.name()
        );
        Ok(config)
    }
}

fn parse_flux_scheme(yaml: &Yaml) -> Result<FluxScheme, ConfigError> {
    match yaml {
        Yaml::String(name) => name.parse(),
        Yaml::Integer(id) => u8::try_from(*id)
            .ok()
            .and_then(|id| FluxScheme::try_from(id).ok())
            .ok_or(ConfigError::UnknownFluxScheme(id.to_string())),
        Yaml::BadValue => Err(ConfigError::MissingParameter(
            "hydrodynamics:flux_scheme".to_string(),
        )),
        other => Err(ConfigError::UnknownFluxScheme(format!("{other:?}"))),
    }
}

fn parse_source(yaml: &Yaml) -> Result<SourceFunction, ConfigError> {
    if yaml.is_badvalue() {
        return Ok(SourceFunction::None);
    }
    let kind = match &yaml["kind"] {
        Yaml::String(kind) => kind.to_ascii_lowercase(),
        Yaml::Integer(id) => id.to_string(),
        Yaml::BadValue => {
            return Err(ConfigError::MissingParameter("source:kind".to_string()))
        }
        other => return Err(ConfigError::UnknownSourceFunction(format!("{other:?}"))),
    };
    match kind.as_str() {
        "none" | "0" => Ok(SourceFunction::None),
        "manufactured_wave" | "manufactured" | "1" => {
            let frequency = yaml["frequency"].as_f64().unwrap_or(1.);
            let amplitude = yaml["amplitude"].as_f64().unwrap_or(0.1);
            Ok(SourceFunction::ManufacturedWave {
                frequency,
                amplitude,
            })
        }
        _ => Err(ConfigError::UnknownSourceFunction(kind)),
    }
}
