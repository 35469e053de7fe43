//! Sampling points in three dimensional space.
//!
//! Points are stored as cartesian coordinates. Spherical and cylindrical views
//! are computed on demand; all angles are in radians unless a legacy method
//! takes an explicit unit.

use ndarray::{Array1, Array2, Axis};
use std::f64::consts::{FRAC_PI_2, PI, TAU};

use crate::deprecation::{DeprecationGate, registry};
use crate::{AcousticError, AcousticResult};

/// Accepted `domain` values of the legacy constructor.
pub const DOMAINS: &[&str] = &["cart", "sph", "cyl"];
/// Accepted spherical conventions.
pub const SPHERICAL_CONVENTIONS: &[&str] = &["top_colat", "top_elev", "side", "front"];
/// Accepted angle units.
pub const ANGLE_UNITS: &[&str] = &["rad", "deg"];
/// Coordinates `find_slice` can select on.
pub const SLICE_COORDINATES: &[&str] =
    &["x", "y", "z", "azimuth", "elevation", "colatitude", "radius"];

/// Angle convention of spherical coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SphericalConvention {
    /// Azimuth from the x-axis, colatitude from the z-axis.
    TopColatitude,
    /// Azimuth from the x-axis, elevation from the horizontal plane.
    TopElevation,
    /// Lateral angle from the median plane, polar angle around the y-axis.
    Side,
    /// Phi around the x-axis from the y-axis, theta from the x-axis.
    Front,
}

impl SphericalConvention {
    /// Parse a convention name.
    pub fn parse(name: &str) -> AcousticResult<Self> {
        match name {
            "top_colat" => Ok(Self::TopColatitude),
            "top_elev" => Ok(Self::TopElevation),
            "side" => Ok(Self::Side),
            "front" => Ok(Self::Front),
            other => Err(AcousticError::invalid_value(
                "convention",
                other,
                SPHERICAL_CONVENTIONS,
            )),
        }
    }

    fn compose(self, a: f64, b: f64, radius: f64) -> [f64; 3] {
        match self {
            Self::TopColatitude => [
                radius * b.sin() * a.cos(),
                radius * b.sin() * a.sin(),
                radius * b.cos(),
            ],
            Self::TopElevation => Self::TopColatitude.compose(a, FRAC_PI_2 - b, radius),
            Self::Side => [
                radius * a.cos() * b.cos(),
                radius * a.sin(),
                radius * a.cos() * b.sin(),
            ],
            Self::Front => [
                radius * b.cos(),
                radius * b.sin() * a.cos(),
                radius * b.sin() * a.sin(),
            ],
        }
    }

    fn decompose(self, x: f64, y: f64, z: f64) -> [f64; 3] {
        let radius = (x * x + y * y + z * z).sqrt();
        match self {
            Self::TopColatitude => [wrap(y.atan2(x)), polar_angle(z, radius), radius],
            Self::TopElevation => [wrap(y.atan2(x)), FRAC_PI_2 - polar_angle(z, radius), radius],
            Self::Side => {
                let lateral = FRAC_PI_2 - polar_angle(y, radius);
                let mut polar = z.atan2(x);
                if polar < -FRAC_PI_2 {
                    polar += TAU;
                }
                [lateral, polar, radius]
            }
            Self::Front => [wrap(z.atan2(y)), polar_angle(x, radius), radius],
        }
    }
}

/// Unit of angles passed to the legacy methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AngleUnit {
    /// Radians.
    #[default]
    Radians,
    /// Degrees.
    Degrees,
}

impl AngleUnit {
    /// Parse a unit name.
    pub fn parse(name: &str) -> AcousticResult<Self> {
        match name {
            "rad" => Ok(Self::Radians),
            "deg" => Ok(Self::Degrees),
            other => Err(AcousticError::invalid_value("unit", other, ANGLE_UNITS)),
        }
    }

    fn to_radians(self, value: f64) -> f64 {
        match self {
            Self::Radians => value,
            Self::Degrees => value.to_radians(),
        }
    }

    fn radians_to_unit(self, value: f64) -> f64 {
        match self {
            Self::Radians => value,
            Self::Degrees => value.to_degrees(),
        }
    }
}

/// How [`Coordinates::find_within`] measures distance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DistanceMeasure {
    /// Straight line distance in meters.
    #[default]
    Euclidean,
    /// Great circle angle in radians.
    SphericalRadians,
    /// Great circle arc length in meters on the radius of the query point.
    SphericalMeter,
}

/// A supported coordinate system as listed by [`Coordinates::systems`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoordinateSystem {
    /// Domain name.
    pub domain: &'static str,
    /// Convention name within the domain.
    pub convention: &'static str,
    /// Names of the three coordinates.
    pub coordinates: [&'static str; 3],
    /// Accepted units.
    pub units: &'static [&'static str],
}

static COORDINATE_SYSTEMS: &[CoordinateSystem] = &[
    CoordinateSystem {
        domain: "cart",
        convention: "right",
        coordinates: ["x", "y", "z"],
        units: &["met"],
    },
    CoordinateSystem {
        domain: "sph",
        convention: "top_colat",
        coordinates: ["azimuth", "colatitude", "radius"],
        units: &["rad", "deg"],
    },
    CoordinateSystem {
        domain: "sph",
        convention: "top_elev",
        coordinates: ["azimuth", "elevation", "radius"],
        units: &["rad", "deg"],
    },
    CoordinateSystem {
        domain: "sph",
        convention: "side",
        coordinates: ["lateral", "polar", "radius"],
        units: &["rad", "deg"],
    },
    CoordinateSystem {
        domain: "sph",
        convention: "front",
        coordinates: ["phi", "theta", "radius"],
        units: &["rad", "deg"],
    },
    CoordinateSystem {
        domain: "cyl",
        convention: "top",
        coordinates: ["azimuth", "z", "radius_z"],
        units: &["rad", "deg"],
    },
];

/// Arguments of the legacy constructor [`Coordinates::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LegacyOptions<'a> {
    /// `cart`, `sph` or `cyl`.
    pub domain: &'a str,
    /// Convention within the domain; the domain's default when `None`.
    pub convention: Option<&'a str>,
    /// Angle unit; radians when `None`.
    pub unit: Option<&'a str>,
    /// Spherical harmonic order of the sampling.
    pub sh_order: Option<usize>,
}

impl Default for LegacyOptions<'_> {
    fn default() -> Self {
        Self {
            domain: "cart",
            convention: None,
            unit: None,
            sh_order: None,
        }
    }
}

/// Result of a k-nearest-neighbour search, one row per query point.
#[derive(Debug, Clone, PartialEq)]
pub struct Nearest {
    /// Indices of the found points, closest first.
    pub indices: Array2<usize>,
    /// Euclidean distances to the found points.
    pub distances: Array2<f64>,
}

fn wrap(angle: f64) -> f64 {
    angle.rem_euclid(TAU)
}

fn polar_angle(component: f64, radius: f64) -> f64 {
    if radius == 0.0 {
        0.0
    } else {
        (component / radius).clamp(-1.0, 1.0).acos()
    }
}

fn broadcast(values: &[f64], n: usize, name: &str) -> AcousticResult<Array1<f64>> {
    match values.len() {
        1 => Ok(Array1::from_elem(n, values[0])),
        len if len == n => Ok(Array1::from_vec(values.to_vec())),
        len => Err(AcousticError::DimensionMismatch(format!(
            "{name} has {len} values but {n} points are expected"
        ))),
    }
}

type Points = (Array1<f64>, Array1<f64>, Array1<f64>);

fn broadcast3(a: &[f64], b: &[f64], c: &[f64]) -> AcousticResult<Points> {
    let n = a.len().max(b.len()).max(c.len());
    if a.is_empty() || b.is_empty() || c.is_empty() {
        return Err(AcousticError::DimensionMismatch(
            "Coordinates need at least one value per dimension".to_string(),
        ));
    }
    Ok((
        broadcast(a, n, "points_1")?,
        broadcast(b, n, "points_2")?,
        broadcast(c, n, "points_3")?,
    ))
}

fn spherical_points(
    convention: SphericalConvention,
    a: &[f64],
    b: &[f64],
    radius: &[f64],
) -> AcousticResult<Points> {
    let (a, b, radius) = broadcast3(a, b, radius)?;
    let n = a.len();
    let (mut x, mut y, mut z) = (Array1::zeros(n), Array1::zeros(n), Array1::zeros(n));
    for i in 0..n {
        [x[i], y[i], z[i]] = convention.compose(a[i], b[i], radius[i]);
    }
    Ok((x, y, z))
}

fn cylindrical_points(azimuth: &[f64], z: &[f64], radius_z: &[f64]) -> AcousticResult<Points> {
    let (azimuth, z, radius_z) = broadcast3(azimuth, z, radius_z)?;
    let x = &radius_z * &azimuth.mapv(f64::cos);
    let y = &radius_z * &azimuth.mapv(f64::sin);
    Ok((x, y, z))
}

/// A set of points in space.
#[derive(Debug, Clone, PartialEq)]
pub struct Coordinates {
    x: Array1<f64>,
    y: Array1<f64>,
    z: Array1<f64>,
    sh_order: Option<usize>,
}

impl Coordinates {
    fn from_points((x, y, z): Points) -> Self {
        Self {
            x,
            y,
            z,
            sh_order: None,
        }
    }

    /// Points from cartesian coordinates in meters.
    ///
    /// Each argument holds one value per point or a single value that is
    /// repeated for every point.
    pub fn from_cartesian(x: &[f64], y: &[f64], z: &[f64]) -> AcousticResult<Self> {
        broadcast3(x, y, z).map(Self::from_points)
    }

    /// Points from azimuth, colatitude and radius.
    pub fn from_spherical_colatitude(
        azimuth: &[f64],
        colatitude: &[f64],
        radius: &[f64],
    ) -> AcousticResult<Self> {
        spherical_points(SphericalConvention::TopColatitude, azimuth, colatitude, radius)
            .map(Self::from_points)
    }

    /// Points from azimuth, elevation and radius.
    pub fn from_spherical_elevation(
        azimuth: &[f64],
        elevation: &[f64],
        radius: &[f64],
    ) -> AcousticResult<Self> {
        spherical_points(SphericalConvention::TopElevation, azimuth, elevation, radius)
            .map(Self::from_points)
    }

    /// Points from lateral angle, polar angle and radius.
    pub fn from_spherical_side(
        lateral: &[f64],
        polar: &[f64],
        radius: &[f64],
    ) -> AcousticResult<Self> {
        spherical_points(SphericalConvention::Side, lateral, polar, radius).map(Self::from_points)
    }

    /// Points from phi, theta and radius.
    pub fn from_spherical_front(
        phi: &[f64],
        theta: &[f64],
        radius: &[f64],
    ) -> AcousticResult<Self> {
        spherical_points(SphericalConvention::Front, phi, theta, radius).map(Self::from_points)
    }

    /// Points from azimuth, height and radial distance to the z-axis.
    pub fn from_cylindrical(azimuth: &[f64], z: &[f64], radius_z: &[f64]) -> AcousticResult<Self> {
        cylindrical_points(azimuth, z, radius_z).map(Self::from_points)
    }

    /// Legacy constructor taking a domain, convention and unit by name.
    ///
    /// Cartesian input with default arguments is the only form that stays.
    /// Other domains, conventions or units and the `sh_order` argument emit
    /// notices until 0.8.0 and fail from then on.
    pub fn new(
        gate: &DeprecationGate,
        points_1: &[f64],
        points_2: &[f64],
        points_3: &[f64],
        options: LegacyOptions<'_>,
    ) -> AcousticResult<Self> {
        let non_default = options.domain != "cart"
            || options.convention.is_some_and(|c| c != "right")
            || options.unit.is_some_and(|u| u != "met");
        if non_default {
            gate.guard(&registry::NEW_DOMAIN)?;
        }
        if options.sh_order.is_some() {
            gate.guard(&registry::NEW_SH_ORDER)?;
        }

        let points = match options.domain {
            "cart" => {
                if let Some(convention) = options.convention.filter(|&c| c != "right") {
                    return Err(AcousticError::invalid_value("convention", convention, &["right"]));
                }
                if let Some(unit) = options.unit.filter(|&u| u != "met") {
                    return Err(AcousticError::invalid_value("unit", unit, &["met"]));
                }
                broadcast3(points_1, points_2, points_3)?
            }
            "sph" => {
                let convention =
                    SphericalConvention::parse(options.convention.unwrap_or("top_colat"))?;
                let unit = AngleUnit::parse(options.unit.unwrap_or("rad"))?;
                let a: Vec<f64> = points_1.iter().map(|&v| unit.to_radians(v)).collect();
                let b: Vec<f64> = points_2.iter().map(|&v| unit.to_radians(v)).collect();
                spherical_points(convention, &a, &b, points_3)?
            }
            "cyl" => {
                if let Some(convention) = options.convention.filter(|&c| c != "top") {
                    return Err(AcousticError::invalid_value("convention", convention, &["top"]));
                }
                let unit = AngleUnit::parse(options.unit.unwrap_or("rad"))?;
                let azimuth: Vec<f64> = points_1.iter().map(|&v| unit.to_radians(v)).collect();
                cylindrical_points(&azimuth, points_2, points_3)?
            }
            other => return Err(AcousticError::invalid_value("domain", other, DOMAINS)),
        };

        let mut coordinates = Self::from_points(points);
        coordinates.sh_order = options.sh_order;
        Ok(coordinates)
    }

    /// Number of points.
    pub fn n_points(&self) -> usize {
        self.x.len()
    }

    /// x-coordinates in meters.
    pub const fn x(&self) -> &Array1<f64> {
        &self.x
    }

    /// y-coordinates in meters.
    pub const fn y(&self) -> &Array1<f64> {
        &self.y
    }

    /// z-coordinates in meters.
    pub const fn z(&self) -> &Array1<f64> {
        &self.z
    }

    /// Replace the x-coordinates; a single value is applied to every point.
    pub fn set_x(&mut self, values: &[f64]) -> AcousticResult<()> {
        self.x = broadcast(values, self.n_points(), "x")?;
        Ok(())
    }

    /// Replace the y-coordinates; a single value is applied to every point.
    pub fn set_y(&mut self, values: &[f64]) -> AcousticResult<()> {
        self.y = broadcast(values, self.n_points(), "y")?;
        Ok(())
    }

    /// Replace the z-coordinates; a single value is applied to every point.
    pub fn set_z(&mut self, values: &[f64]) -> AcousticResult<()> {
        self.z = broadcast(values, self.n_points(), "z")?;
        Ok(())
    }

    /// Distance to the origin.
    pub fn radius(&self) -> Array1<f64> {
        self.spherical_column(SphericalConvention::TopColatitude, 2)
    }

    /// Counter clockwise angle in the x-y plane from the x-axis, in `[0, 2π)`.
    pub fn azimuth(&self) -> Array1<f64> {
        self.spherical_column(SphericalConvention::TopColatitude, 0)
    }

    /// Angle from the x-y plane, positive towards the z-axis.
    pub fn elevation(&self) -> Array1<f64> {
        self.spherical_column(SphericalConvention::TopElevation, 1)
    }

    /// Angle from the z-axis.
    pub fn colatitude(&self) -> Array1<f64> {
        self.spherical_column(SphericalConvention::TopColatitude, 1)
    }

    fn spherical_column(&self, convention: SphericalConvention, column: usize) -> Array1<f64> {
        self.spherical(convention).column(column).to_owned()
    }

    /// Cartesian coordinates as `[point, (x, y, z)]`.
    pub fn cartesian(&self) -> Array2<f64> {
        ndarray::stack(Axis(1), &[self.x.view(), self.y.view(), self.z.view()])
            .unwrap_or_else(|_| Array2::zeros((0, 3)))
    }

    /// Replace all points by cartesian coordinates.
    pub fn set_cartesian(&mut self, x: &[f64], y: &[f64], z: &[f64]) -> AcousticResult<()> {
        (self.x, self.y, self.z) = broadcast3(x, y, z)?;
        Ok(())
    }

    /// Spherical coordinates as `[point, (angle_1, angle_2, radius)]`.
    pub fn spherical(&self, convention: SphericalConvention) -> Array2<f64> {
        let mut out = Array2::zeros((self.n_points(), 3));
        for (i, mut row) in out.axis_iter_mut(Axis(0)).enumerate() {
            let [a, b, r] = convention.decompose(self.x[i], self.y[i], self.z[i]);
            row[0] = a;
            row[1] = b;
            row[2] = r;
        }
        out
    }

    /// Replace all points by spherical coordinates.
    pub fn set_spherical(
        &mut self,
        convention: SphericalConvention,
        angle_1: &[f64],
        angle_2: &[f64],
        radius: &[f64],
    ) -> AcousticResult<()> {
        (self.x, self.y, self.z) = spherical_points(convention, angle_1, angle_2, radius)?;
        Ok(())
    }

    /// Cylindrical coordinates as `[point, (azimuth, z, radius_z)]`.
    pub fn cylindrical(&self) -> Array2<f64> {
        let mut out = Array2::zeros((self.n_points(), 3));
        for (i, mut row) in out.axis_iter_mut(Axis(0)).enumerate() {
            row[0] = wrap(self.y[i].atan2(self.x[i]));
            row[1] = self.z[i];
            row[2] = self.x[i].hypot(self.y[i]);
        }
        out
    }

    /// Replace all points by cylindrical coordinates.
    pub fn set_cylindrical(
        &mut self,
        azimuth: &[f64],
        z: &[f64],
        radius_z: &[f64],
    ) -> AcousticResult<()> {
        (self.x, self.y, self.z) = cylindrical_points(azimuth, z, radius_z)?;
        Ok(())
    }

    fn point(&self, index: usize) -> [f64; 3] {
        [self.x[index], self.y[index], self.z[index]]
    }

    fn euclidean(&self, index: usize, point: [f64; 3]) -> f64 {
        let [x, y, z] = self.point(index);
        ((x - point[0]).powi(2) + (y - point[1]).powi(2) + (z - point[2]).powi(2)).sqrt()
    }

    /// The `k` points closest to each of `points`.
    pub fn find_nearest(&self, points: &Coordinates, k: usize) -> AcousticResult<Nearest> {
        if k == 0 || k > self.n_points() {
            return Err(AcousticError::InvalidParameter(format!(
                "k must be between 1 and the number of points ({}), got {k}",
                self.n_points()
            )));
        }
        let mut indices = Array2::zeros((points.n_points(), k));
        let mut distances = Array2::zeros((points.n_points(), k));
        for query in 0..points.n_points() {
            let target = points.point(query);
            let mut ranked: Vec<(usize, f64)> = (0..self.n_points())
                .map(|i| (i, self.euclidean(i, target)))
                .collect();
            ranked.sort_by(|a, b| a.1.total_cmp(&b.1).then(a.0.cmp(&b.0)));
            for (j, (index, distance)) in ranked.into_iter().take(k).enumerate() {
                indices[[query, j]] = index;
                distances[[query, j]] = distance;
            }
        }
        Ok(Nearest { indices, distances })
    }

    /// Indices of all points within `distance` of a single query point.
    pub fn find_within(
        &self,
        point: &Coordinates,
        distance: f64,
        measure: DistanceMeasure,
    ) -> AcousticResult<Vec<usize>> {
        if point.n_points() != 1 {
            return Err(AcousticError::DimensionMismatch(format!(
                "find_within takes a single query point, got {}",
                point.n_points()
            )));
        }
        if distance.is_nan() || distance < 0.0 {
            return Err(AcousticError::InvalidParameter(format!(
                "distance must be non-negative, got {distance}"
            )));
        }
        Ok(self.within(point.point(0), distance, measure))
    }

    fn within(&self, target: [f64; 3], distance: f64, measure: DistanceMeasure) -> Vec<usize> {
        let target_radius = (target[0].powi(2) + target[1].powi(2) + target[2].powi(2)).sqrt();
        (0..self.n_points())
            .filter(|&i| {
                let measured = match measure {
                    DistanceMeasure::Euclidean => self.euclidean(i, target),
                    DistanceMeasure::SphericalRadians => self.angle_to(i, target, target_radius),
                    DistanceMeasure::SphericalMeter => {
                        self.angle_to(i, target, target_radius) * target_radius
                    }
                };
                measured <= distance
            })
            .collect()
    }

    fn angle_to(&self, index: usize, target: [f64; 3], target_radius: f64) -> f64 {
        let [x, y, z] = self.point(index);
        let radius = (x * x + y * y + z * z).sqrt();
        if radius == 0.0 || target_radius == 0.0 {
            return 0.0;
        }
        let cosine = (x * target[0] + y * target[1] + z * target[2]) / (radius * target_radius);
        cosine.clamp(-1.0, 1.0).acos()
    }

    fn slice(
        &self,
        coordinate: &str,
        unit: &str,
        value: f64,
        tolerance: f64,
    ) -> AcousticResult<Vec<usize>> {
        let (values, angular) = match coordinate {
            "x" => (self.x.clone(), false),
            "y" => (self.y.clone(), false),
            "z" => (self.z.clone(), false),
            "radius" => (self.radius(), false),
            "azimuth" => (self.azimuth(), true),
            "elevation" => (self.elevation(), true),
            "colatitude" => (self.colatitude(), true),
            other => {
                return Err(AcousticError::invalid_value(
                    "coordinate",
                    other,
                    SLICE_COORDINATES,
                ));
            }
        };
        let (value, tolerance) = if angular {
            let unit = AngleUnit::parse(unit)?;
            (unit.to_radians(value), unit.to_radians(tolerance))
        } else if unit == "met" {
            (value, tolerance)
        } else {
            return Err(AcousticError::invalid_value("unit", unit, &["met"]));
        };

        Ok(values
            .iter()
            .enumerate()
            .filter(|&(_, &v)| {
                let mut difference = (v - value).abs();
                if angular {
                    // angles wrap around the full circle
                    difference = difference.rem_euclid(TAU);
                    difference = difference.min(TAU - difference);
                }
                difference <= tolerance
            })
            .map(|(i, _)| i)
            .collect())
    }

    /// k nearest points to one cartesian query point.
    ///
    /// Deprecated in favor of [`Coordinates::find_nearest`].
    pub fn find_nearest_k(
        &self,
        gate: &DeprecationGate,
        x: f64,
        y: f64,
        z: f64,
        k: usize,
    ) -> AcousticResult<Nearest> {
        gate.guard(&registry::FIND_NEAREST_K)?;
        self.find_nearest(&Self::from_cartesian(&[x], &[y], &[z])?, k)
    }

    /// Points whose `coordinate` lies within `tolerance` of `value`.
    ///
    /// Deprecated in favor of [`Coordinates::find_within`].
    pub fn find_slice(
        &self,
        gate: &DeprecationGate,
        coordinate: &str,
        unit: &str,
        value: f64,
        tolerance: f64,
    ) -> AcousticResult<Vec<usize>> {
        gate.guard(&registry::FIND_SLICE)?;
        self.slice(coordinate, unit, value, tolerance)
    }

    /// Removed in 0.5.0, see [`Coordinates::find_nearest`].
    pub fn get_nearest_k(
        &self,
        gate: &DeprecationGate,
        x: f64,
        y: f64,
        z: f64,
        k: usize,
    ) -> AcousticResult<Nearest> {
        gate.guard(&registry::GET_NEAREST_K)?;
        self.find_nearest(&Self::from_cartesian(&[x], &[y], &[z])?, k)
    }

    /// Removed in 0.5.0, see [`Coordinates::find_within`].
    pub fn get_nearest_cart(
        &self,
        gate: &DeprecationGate,
        x: f64,
        y: f64,
        z: f64,
        distance: f64,
    ) -> AcousticResult<Vec<usize>> {
        gate.guard(&registry::GET_NEAREST_CART)?;
        Ok(self.within([x, y, z], distance, DistanceMeasure::Euclidean))
    }

    /// Removed in 0.5.0, see [`Coordinates::find_within`].
    pub fn get_nearest_sph(
        &self,
        gate: &DeprecationGate,
        azimuth: f64,
        colatitude: f64,
        radius: f64,
        distance: f64,
    ) -> AcousticResult<Vec<usize>> {
        gate.guard(&registry::GET_NEAREST_SPH)?;
        let target = SphericalConvention::TopColatitude.compose(azimuth, colatitude, radius);
        Ok(self.within(target, distance, DistanceMeasure::SphericalRadians))
    }

    /// Removed in 0.5.0, see [`Coordinates::find_slice`].
    pub fn get_slice(
        &self,
        gate: &DeprecationGate,
        coordinate: &str,
        unit: &str,
        value: f64,
        tolerance: f64,
    ) -> AcousticResult<Vec<usize>> {
        gate.guard(&registry::GET_SLICE)?;
        self.slice(coordinate, unit, value, tolerance)
    }

    /// Deprecated in favor of [`Coordinates::cartesian`].
    pub fn get_cart(&self, gate: &DeprecationGate) -> AcousticResult<Array2<f64>> {
        gate.guard(&registry::GET_CART)?;
        Ok(self.cartesian())
    }

    /// Deprecated in favor of [`Coordinates::set_cartesian`].
    pub fn set_cart(
        &mut self,
        gate: &DeprecationGate,
        x: &[f64],
        y: &[f64],
        z: &[f64],
    ) -> AcousticResult<()> {
        gate.guard(&registry::SET_CART)?;
        self.set_cartesian(x, y, z)
    }

    /// Deprecated in favor of [`Coordinates::cylindrical`].
    pub fn get_cyl(&self, gate: &DeprecationGate, unit: AngleUnit) -> AcousticResult<Array2<f64>> {
        gate.guard(&registry::GET_CYL)?;
        let mut cylindrical = self.cylindrical();
        cylindrical
            .column_mut(0)
            .mapv_inplace(|angle| unit.radians_to_unit(angle));
        Ok(cylindrical)
    }

    /// Deprecated in favor of [`Coordinates::set_cylindrical`].
    pub fn set_cyl(
        &mut self,
        gate: &DeprecationGate,
        azimuth: &[f64],
        z: &[f64],
        radius_z: &[f64],
        unit: AngleUnit,
    ) -> AcousticResult<()> {
        gate.guard(&registry::SET_CYL)?;
        let azimuth: Vec<f64> = azimuth.iter().map(|&v| unit.to_radians(v)).collect();
        self.set_cylindrical(&azimuth, z, radius_z)
    }

    /// Deprecated in favor of [`Coordinates::spherical`].
    pub fn get_sph(
        &self,
        gate: &DeprecationGate,
        convention: SphericalConvention,
        unit: AngleUnit,
    ) -> AcousticResult<Array2<f64>> {
        gate.guard(&registry::GET_SPH)?;
        let mut spherical = self.spherical(convention);
        for column in 0..2 {
            spherical
                .column_mut(column)
                .mapv_inplace(|angle| unit.radians_to_unit(angle));
        }
        Ok(spherical)
    }

    /// Deprecated in favor of [`Coordinates::set_spherical`].
    pub fn set_sph(
        &mut self,
        gate: &DeprecationGate,
        angle_1: &[f64],
        angle_2: &[f64],
        radius: &[f64],
        convention: SphericalConvention,
        unit: AngleUnit,
    ) -> AcousticResult<()> {
        gate.guard(&registry::SET_SPH)?;
        let angle_1: Vec<f64> = angle_1.iter().map(|&v| unit.to_radians(v)).collect();
        let angle_2: Vec<f64> = angle_2.iter().map(|&v| unit.to_radians(v)).collect();
        self.set_spherical(convention, &angle_1, &angle_2, radius)
    }

    /// Supported coordinate systems. Deprecated without replacement.
    pub fn systems(&self, gate: &DeprecationGate) -> AcousticResult<&'static [CoordinateSystem]> {
        gate.guard(&registry::SYSTEMS)?;
        Ok(COORDINATE_SYSTEMS)
    }

    /// Spherical harmonic order of the sampling. Deprecated.
    pub fn sh_order(&self, gate: &DeprecationGate) -> AcousticResult<Option<usize>> {
        gate.guard(&registry::SH_ORDER)?;
        Ok(self.sh_order)
    }

    /// Set the spherical harmonic order. Deprecated; from 0.8.0 on the order is
    /// left untouched and the call fails.
    pub fn set_sh_order(
        &mut self,
        gate: &DeprecationGate,
        sh_order: Option<usize>,
    ) -> AcousticResult<()> {
        gate.guard(&registry::SET_SH_ORDER)?;
        self.sh_order = sh_order;
        Ok(())
    }
}
