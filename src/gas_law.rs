#[derive(Debug, Default, Clone, Copy)]
pub struct AdiabaticIndex {
    gamma: f64,
    gamma_inv: f64,
    odgm1: f64,
    odgp1: f64,
}

impl From<f64> for AdiabaticIndex {
    fn from(value: f64) -> Self {
        AdiabaticIndex {
            gamma: value,
            gamma_inv: 1. / value,
            odgm1: 1. / (value - 1.),
            odgp1: 1. / (value + 1.),
        }
    }
}

impl From<AdiabaticIndex> for f64 {
    fn from(value: AdiabaticIndex) -> Self {
        value.gamma
    }
}

impl AdiabaticIndex {
    pub fn gamma(&self) -> f64 {
        self.gamma
    }

    /// gamma - 1
    pub fn gm1(&self) -> f64 {
        self.gamma - 1.
    }

    pub fn gp1dg(&self) -> f64 {
        (self.gamma + 1.) * self.gamma_inv
    }

    pub fn gm1d2g(&self) -> f64 {
        0.5 * (self.gamma - 1.) * self.gamma_inv
    }

    pub fn gm1dgp1(&self) -> f64 {
        (self.gamma - 1.) * self.odgp1
    }

    /// 1 / (gamma - 1)
    pub fn odgm1(&self) -> f64 {
        self.odgm1
    }

    pub fn tdgm1(&self) -> f64 {
        2. * self.odgm1
    }

    pub fn tdgp1(&self) -> f64 {
        2. * self.odgp1
    }
}

/// Ideal gas with a fixed ratio of specific heats.
#[derive(Debug, Clone, Copy)]
pub struct GasLaw {
    gamma: AdiabaticIndex,
}

impl GasLaw {
    pub fn new(gamma: f64) -> Self {
        Self {
            gamma: gamma.into(),
        }
    }

    pub fn gamma(&self) -> &AdiabaticIndex {
        &self.gamma
    }

    pub fn sound_speed(&self, pressure: f64, density_inv: f64) -> f64 {
        (self.gamma.gamma * pressure * density_inv).sqrt()
    }

    /// Total energy per unit volume: p / (gamma - 1) + rho |v|^2 / 2
    pub fn total_energy(&self, density: f64, velocity_sq: f64, pressure: f64) -> f64 {
        self.gamma.odgm1 * pressure + 0.5 * density * velocity_sq
    }

    pub fn pressure_from_total_energy(&self, energy: f64, momentum_sq: f64, density: f64) -> f64 {
        self.gamma.gm1() * (energy - 0.5 * momentum_sq / density)
    }

    /// Specific total enthalpy (E + p) / rho
    pub fn enthalpy(&self, density: f64, velocity_sq: f64, pressure: f64) -> f64 {
        (self.total_energy(density, velocity_sq, pressure) + pressure) / density
    }
}

#[cfg(test)]
mod test {
    use float_cmp::assert_approx_eq;

    use super::*;

    #[test]
    fn test_derived_constants() {
        let gamma = AdiabaticIndex::from(1.4);
        assert_approx_eq!(f64, gamma.gm1(), 0.4, epsilon = 1e-15);
        assert_approx_eq!(f64, gamma.odgm1(), 2.5, epsilon = 1e-12);
        assert_approx_eq!(f64, gamma.tdgp1(), 2. / 2.4);
        assert_approx_eq!(f64, gamma.gm1d2g(), 0.4 / 2.8);
        assert_approx_eq!(f64, f64::from(gamma), 1.4);
    }

    #[test]
    fn test_energy_round_trip() {
        let gas_law = GasLaw::new(1.4);
        let energy = gas_law.total_energy(1., 4., 1.);
        assert_approx_eq!(f64, energy, 4.5, epsilon = 1e-12);
        let pressure = gas_law.pressure_from_total_energy(energy, 4., 1.);
        assert_approx_eq!(f64, pressure, 1., epsilon = 1e-12);
        assert_approx_eq!(f64, gas_law.enthalpy(1., 4., 1.), 5.5, epsilon = 1e-12);
    }
}
