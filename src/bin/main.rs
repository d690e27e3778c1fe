use std::{error::Error, fs, path::PathBuf};

use clap::Parser;
use fv2d_flux::{
    finite_volume_solver,
    physical_quantities::{Conserved, Primitives, State},
    ConfigError, Mesh, RunConfig, SourceFunction,
};
use glam::DVec2;
use yaml_rust::{Yaml, YamlLoader};

#[derive(Parser)]
struct Cli {
    /// The path to the config file to read
    #[clap(parse(from_os_str))]
    config: PathBuf,
}

fn sod_shock(coordinate: DVec2) -> Primitives {
    let density = if coordinate.x < 0.5 { 1. } else { 0.125 };
    let pressure = if coordinate.x < 0.5 { 1. } else { 0.1 };
    Primitives::new(density, DVec2::ZERO, pressure)
}

fn constant(_coordinate: DVec2) -> Primitives {
    Primitives::new(1., DVec2::ZERO, 1.)
}

fn parse_dvec2(yaml: &Yaml) -> Result<DVec2, ConfigError> {
    let as_f64 = |y: &Yaml| match y {
        Yaml::Real(_) => y.as_f64(),
        Yaml::Integer(i) => Some(*i as f64),
        _ => None,
    };
    match yaml.as_vec().map(|v| &v[..]) {
        Some([x, y]) => match (as_f64(x), as_f64(y)) {
            (Some(x), Some(y)) => Ok(DVec2::new(x, y)),
            _ => Err(ConfigError::IllegalDVec2(format!("{:?}", yaml))),
        },
        _ => Err(ConfigError::IllegalDVec2(format!("{:?}", yaml))),
    }
}

fn parse_count(name: &str, value: i64) -> Result<usize, ConfigError> {
    usize::try_from(value).map_err(|_| ConfigError::InvalidParameter {
        name: name.to_string(),
        value: value as f64,
    })
}

struct GridCfg {
    nx: usize,
    ny: usize,
    box_size: DVec2,
}

impl GridCfg {
    fn parse(yaml: &Yaml) -> Result<Self, ConfigError> {
        let nx = yaml["nx"]
            .as_i64()
            .ok_or(ConfigError::MissingParameter("grid:nx".to_string()))?;
        let ny = yaml["ny"].as_i64().unwrap_or(nx);
        let nx = parse_count("grid:nx", nx)?;
        let ny = parse_count("grid:ny", ny)?;
        let box_size = match &yaml["box_size"] {
            Yaml::BadValue => DVec2::ONE,
            box_size => parse_dvec2(box_size)?,
        };
        Ok(Self { nx, ny, box_size })
    }
}

fn initial_conditions(
    kind: &str,
    config: &RunConfig,
    box_size: DVec2,
    time: f64,
) -> Result<Box<dyn Fn(DVec2) -> Primitives>, ConfigError> {
    let ic: Box<dyn Fn(DVec2) -> Primitives> = match kind {
        "sodshock" => Box::new(move |x: DVec2| sod_shock(x / box_size)),
        "constant" => Box::new(constant),
        "manufactured" => {
            let wave = match config.source {
                SourceFunction::None => SourceFunction::manufactured_wave(),
                source => source,
            };
            let gas_law = config.gas_law;
            Box::new(move |x: DVec2| {
                wave.exact_solution(x, time, &gas_law)
                    .unwrap_or_else(|| constant(x))
            })
        }
        _ => return Err(ConfigError::UnknownInitialConditions(kind.to_string())),
    };
    Ok(ic)
}

fn max_abs(state: &State<Conserved>) -> f64 {
    state.to_array().iter().fold(0., |max, v| v.abs().max(max))
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // parse command line parameters
    let args = Cli::parse();

    // read configuration
    let docs = YamlLoader::load_from_str(&fs::read_to_string(&args.config)?)?;
    let yaml = docs.first().ok_or(ConfigError::EmptyDocument)?;
    let config = RunConfig::from_yaml(yaml)?;
    let grid = GridCfg::parse(&yaml["grid"])?;
    let ic_kind = yaml["initial_conditions"]["kind"]
        .as_str()
        .ok_or(ConfigError::MissingParameter(
            "initial_conditions:kind".to_string(),
        ))?;
    let time = yaml["time"].as_f64().unwrap_or(0.);

    // Setup
    let ic = initial_conditions(ic_kind, &config, grid.box_size, time)?;
    let mut mesh = Mesh::uniform_periodic(grid.nx, grid.ny, grid.box_size, ic)?;
    let solver = finite_volume_solver::from_config(&config);

    // assemble
    mesh.flux_calculation(solver.as_ref())?;
    mesh.source_calculation(&config.source_term(), time);

    let mut residual = State::<Conserved>::zero();
    let mut max_rate = 0f64;
    for (idx, cell) in mesh.cells().iter().enumerate() {
        let balance = mesh.cell_flux_balance(idx).unwrap_or_else(State::zero);
        residual += balance;
        max_rate = max_rate.max(max_abs(&(1. / cell.volume * (cell.source - balance))));
    }
    let max_flux = mesh.fluxes().iter().map(max_abs).fold(0., f64::max);
    let max_source = mesh.cells().iter().map(|cell| max_abs(&cell.source)).fold(0., f64::max);

    log::info!(
        "Assembled {} faces of {} cells",
        mesh.faces().len(),
        mesh.cells().len()
    );
    log::info!("Global conservation residual: {:?}", residual.to_array());
    log::info!("Max |flux|: {max_flux:.6e}, max |source|: {max_source:.6e}, max |dU/dt|: {max_rate:.6e}");

    println!("Done!");
    Ok(())
}
