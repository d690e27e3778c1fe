use std::{
    marker::PhantomData,
    ops::{Add, AddAssign, Index, IndexMut, Mul, Neg, Sub, SubAssign},
};

use glam::DVec2;

use crate::gas_law::GasLaw;

#[derive(Default, Debug, Clone, Copy, PartialEq)]
pub struct Primitive;
#[derive(Default, Debug, Clone, Copy, PartialEq)]
pub struct Conserved;

/// A four component state vector: a scalar, a 2D vector and a second scalar.
///
/// For [`Primitive`] states these are density, velocity and pressure, for
/// [`Conserved`] states (and numerical fluxes) mass, momentum and energy.
#[derive(Default, Debug, PartialEq)]
pub struct State<T>(f64, DVec2, f64, PhantomData<T>);

// The marker type only lives in the `PhantomData`, so copying never depends on it.
impl<T> Clone for State<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for State<T> {}

impl<T> Add for State<T> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0, self.1 + rhs.1, self.2 + rhs.2, PhantomData)
    }
}

impl<T> AddAssign for State<T> {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
        self.1 += rhs.1;
        self.2 += rhs.2;
    }
}

impl<T> Sub for State<T> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0, self.1 - rhs.1, self.2 - rhs.2, PhantomData)
    }
}

impl<T> SubAssign for State<T> {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
        self.1 -= rhs.1;
        self.2 -= rhs.2;
    }
}

impl<T> Neg for State<T> {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self(-self.0, -self.1, -self.2, PhantomData)
    }
}

impl<T> Mul<State<T>> for f64 {
    type Output = State<T>;

    fn mul(self, rhs: State<T>) -> Self::Output {
        State::<T>(self * rhs.0, self * rhs.1, self * rhs.2, PhantomData)
    }
}

impl<T> State<T> {
    pub fn zero() -> Self {
        Self(0., DVec2::ZERO, 0., PhantomData)
    }

    pub fn is_finite(&self) -> bool {
        self.0.is_finite() && self.1.is_finite() && self.2.is_finite()
    }

    /// Component-wise mean of two states
    pub fn mean(&self, other: &Self) -> Self {
        0.5 * (*self + *other)
    }

    pub fn to_array(&self) -> [f64; 4] {
        [self.0, self.1.x, self.1.y, self.2]
    }
}

impl<T> Index<usize> for State<T> {
    type Output = f64;

    fn index(&self, index: usize) -> &Self::Output {
        match index {
            0 => &self.0,
            1 => &self.1.x,
            2 => &self.1.y,
            3 => &self.2,
            _ => panic!("Index out of bounds for StateVector!"),
        }
    }
}

impl<T> IndexMut<usize> for State<T> {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        match index {
            0 => &mut self.0,
            1 => &mut self.1.x,
            2 => &mut self.1.y,
            3 => &mut self.2,
            _ => panic!("Index out of bounds for StateVector!"),
        }
    }
}

/// x- and y-gradients of every component of a state.
#[derive(Default, Debug, PartialEq)]
pub struct Gradients<T>(DVec2, [DVec2; 2], DVec2, PhantomData<T>);

impl<T> Clone for Gradients<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Gradients<T> {}

impl<T> Gradients<T> {
    pub fn zeros() -> Self {
        Gradients(DVec2::ZERO, [DVec2::ZERO; 2], DVec2::ZERO, PhantomData)
    }

    /// Builds gradients from the partial derivatives along x and y.
    pub fn from_partials(d_dx: State<T>, d_dy: State<T>) -> Self {
        let mut gradients = Self::zeros();
        for i in 0..4 {
            gradients[i] = DVec2::new(d_dx[i], d_dy[i]);
        }
        gradients
    }

    /// Directional derivative of every component along `dx`.
    pub fn dot(&self, dx: DVec2) -> State<T> {
        State::<T>(
            self.0.dot(dx),
            DVec2 {
                x: self.1[0].dot(dx),
                y: self.1[1].dot(dx),
            },
            self.2.dot(dx),
            PhantomData,
        )
    }

    /// Partial derivatives along x.
    pub fn x(&self) -> State<T> {
        self.dot(DVec2::X)
    }

    /// Partial derivatives along y.
    pub fn y(&self) -> State<T> {
        self.dot(DVec2::Y)
    }

    /// Adds `delta[i] * direction` to the gradient of component `i`.
    pub fn add_along(&mut self, delta: State<T>, direction: DVec2) {
        for i in 0..4 {
            self[i] += delta[i] * direction;
        }
    }

    pub fn mean(&self, other: &Self) -> Self {
        let mut mean = Self::zeros();
        for i in 0..4 {
            mean[i] = 0.5 * (self[i] + other[i]);
        }
        mean
    }

    pub fn is_finite(&self) -> bool {
        self.0.is_finite() && self.1[0].is_finite() && self.1[1].is_finite() && self.2.is_finite()
    }
}

impl<T> Index<usize> for Gradients<T> {
    type Output = DVec2;

    fn index(&self, index: usize) -> &Self::Output {
        match index {
            0 => &self.0,
            1 => &self.1[0],
            2 => &self.1[1],
            3 => &self.2,
            _ => panic!("Index out of bounds for StateVector!"),
        }
    }
}

impl<T> IndexMut<usize> for Gradients<T> {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        match index {
            0 => &mut self.0,
            1 => &mut self.1[0],
            2 => &mut self.1[1],
            3 => &mut self.2,
            _ => panic!("Index out of bounds for StateVector!"),
        }
    }
}

pub type Primitives = State<Primitive>;

impl State<Primitive> {
    pub fn new(density: f64, velocity: DVec2, pressure: f64) -> Self {
        Self(density, velocity, pressure, PhantomData)
    }

    pub fn density(&self) -> f64 {
        self.0
    }

    pub fn velocity(&self) -> DVec2 {
        self.1
    }

    pub fn pressure(&self) -> f64 {
        self.2
    }

    /// Whether the speed of sound of this state is defined.
    pub fn is_physical(&self) -> bool {
        self.is_finite() && self.density() > 0. && self.pressure() > 0.
    }

    pub fn from_conserved(conserved: &State<Conserved>, gas_law: &GasLaw) -> Self {
        let density = conserved.mass();
        let velocity = conserved.momentum() / density;
        let pressure = gas_law.pressure_from_total_energy(
            conserved.energy(),
            conserved.momentum().length_squared(),
            density,
        );
        Self::new(density, velocity, pressure)
    }

    /// Rotate into the frame of a face with unit normal `n`: the normal
    /// velocity becomes the x-component, the tangential one the y-component.
    pub fn rotate_to_face(&self, n: DVec2) -> Self {
        let v = self.velocity();
        Self::new(
            self.density(),
            DVec2::new(v.dot(n), n.perp_dot(v)),
            self.pressure(),
        )
    }

    /// Inverse of [`State::rotate_to_face`].
    pub fn rotate_from_face(&self, n: DVec2) -> Self {
        Self::new(self.density(), n.rotate(self.velocity()), self.pressure())
    }

    pub fn sound_speed(&self, gas_law: &GasLaw) -> f64 {
        gas_law.sound_speed(self.pressure(), 1. / self.density())
    }

    pub fn total_energy(&self, gas_law: &GasLaw) -> f64 {
        gas_law.total_energy(
            self.density(),
            self.velocity().length_squared(),
            self.pressure(),
        )
    }

    pub fn enthalpy(&self, gas_law: &GasLaw) -> f64 {
        gas_law.enthalpy(
            self.density(),
            self.velocity().length_squared(),
            self.pressure(),
        )
    }

    /// Physical Euler flux along the x-axis (the face normal in the face frame).
    pub fn physical_flux(&self, gas_law: &GasLaw) -> State<Conserved> {
        let v = self.velocity();
        let mass_flux = self.density() * v.x;
        State::<Conserved>::new(
            mass_flux,
            mass_flux * v + DVec2::new(self.pressure(), 0.),
            v.x * (self.total_energy(gas_law) + self.pressure()),
        )
    }
}

impl State<Conserved> {
    pub fn new(mass: f64, momentum: DVec2, energy: f64) -> Self {
        Self(mass, momentum, energy, PhantomData)
    }

    pub fn mass(&self) -> f64 {
        self.0
    }

    pub fn momentum(&self) -> DVec2 {
        self.1
    }

    pub fn energy(&self) -> f64 {
        self.2
    }

    pub fn from_primitives(primitives: &State<Primitive>, gas_law: &GasLaw) -> Self {
        let momentum = primitives.density() * primitives.velocity();
        Self::new(
            primitives.density(),
            momentum,
            primitives.total_energy(gas_law),
        )
    }

    /// Rotate a face-frame vector back to the global frame; mass and energy are
    /// frame invariant.
    pub fn rotate_from_face(&self, n: DVec2) -> Self {
        Self::new(self.mass(), n.rotate(self.momentum()), self.energy())
    }

    pub fn rotate_to_face(&self, n: DVec2) -> Self {
        let m = self.momentum();
        Self::new(self.mass(), DVec2::new(m.dot(n), n.perp_dot(m)), self.energy())
    }
}

#[cfg(test)]
mod test {
    use float_cmp::assert_approx_eq;
    use glam::DVec2;
    use rand::{Rng, SeedableRng};

    use super::{Conserved, Gradients, Primitive};
    use crate::{gas_law::GasLaw, physical_quantities::State};

    #[test]
    fn test_conversions() {
        let primitives = State::<Primitive>::new(0.75, DVec2::new(0.4, -0.3), 0.8);
        let eos = GasLaw::new(5. / 3.);
        let conserved = State::<Conserved>::from_primitives(&primitives, &eos);
        let primitives_new = State::<Primitive>::from_conserved(&conserved, &eos);

        assert_approx_eq!(f64, primitives.density(), primitives_new.density());
        assert_approx_eq!(f64, primitives.velocity().x, primitives_new.velocity().x);
        assert_approx_eq!(f64, primitives.velocity().y, primitives_new.velocity().y);
        assert_approx_eq!(f64, primitives.pressure(), primitives_new.pressure(), epsilon = 1e-14);
    }

    #[test]
    fn test_physical_flux() {
        let eos = GasLaw::new(1.4);
        let flux = State::<Primitive>::new(1., DVec2::new(2., 0.), 1.).physical_flux(&eos);
        assert_approx_eq!(f64, flux.mass(), 2.);
        assert_approx_eq!(f64, flux.momentum().x, 5.);
        assert_approx_eq!(f64, flux.momentum().y, 0.);
        assert_approx_eq!(f64, flux.energy(), 11., epsilon = 1e-12);
    }

    #[test]
    fn test_rotation_round_trip() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(7);
        for _ in 0..100 {
            let angle = rng.gen_range(0. ..std::f64::consts::TAU);
            let n = DVec2::from_angle(angle);
            let v = DVec2::new(rng.gen_range(-5. ..5.), rng.gen_range(-5. ..5.));
            let state = State::<Primitive>::new(1.3, v, 0.7);

            let rotated = state.rotate_to_face(n);
            assert_approx_eq!(f64, rotated.velocity().x, v.dot(n), epsilon = 1e-12);
            assert_approx_eq!(f64, rotated.density(), state.density());
            assert_approx_eq!(f64, rotated.pressure(), state.pressure());

            let back = rotated.rotate_from_face(n);
            assert_approx_eq!(f64, back.velocity().x, v.x, epsilon = 1e-12);
            assert_approx_eq!(f64, back.velocity().y, v.y, epsilon = 1e-12);

            let flux = State::<Conserved>::new(0.3, v, -1.2);
            let flux_back = flux.rotate_to_face(n).rotate_from_face(n);
            assert_approx_eq!(f64, flux_back.momentum().x, v.x, epsilon = 1e-12);
            assert_approx_eq!(f64, flux_back.momentum().y, v.y, epsilon = 1e-12);
            assert_eq!(flux_back.mass(), flux.mass());
            assert_eq!(flux_back.energy(), flux.energy());
        }
    }

    /// Generic helpers only rely on `State<T>: Copy`, whatever the marker.
    fn generic_mean<T>(a: &State<T>, b: &State<T>) -> State<T> {
        let copy = *a;
        copy.mean(b)
    }

    struct Unmarked;

    #[test]
    fn test_mean_for_any_marker() {
        let a = State::<Unmarked>(1., DVec2::new(2., -2.), 3., std::marker::PhantomData);
        let b = State::<Unmarked>(3., DVec2::new(0., 2.), 5., std::marker::PhantomData);
        let mean = generic_mean(&a, &b);
        assert_eq!(mean.to_array(), [2., 1., 0., 4.]);

        let gradients = Gradients::<Unmarked>::zeros();
        let copy = gradients;
        assert_eq!(copy.mean(&gradients).x().to_array(), [0.; 4]);
    }

    #[test]
    fn test_gradients() {
        let d_dx = State::<Primitive>::new(1., DVec2::new(2., 3.), 4.);
        let d_dy = State::<Primitive>::new(-1., DVec2::new(0.5, 0.), 2.);
        let mut gradients = Gradients::from_partials(d_dx, d_dy);
        assert_eq!(gradients.x(), d_dx);
        assert_eq!(gradients.y(), d_dy);

        let directional = gradients.dot(DVec2::new(1., 1.));
        assert_approx_eq!(f64, directional.density(), 0.);
        assert_approx_eq!(f64, directional.velocity().x, 2.5);
        assert_approx_eq!(f64, directional.pressure(), 6.);

        gradients.add_along(State::<Primitive>::new(1., DVec2::ZERO, 0.), DVec2::Y);
        assert_approx_eq!(f64, gradients.y().density(), 0.);
        assert_approx_eq!(f64, gradients.x().density(), 1.);
    }
}
