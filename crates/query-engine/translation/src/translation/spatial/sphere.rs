//! Unit vectors on the celestial sphere and rotations between reference frames.

use query_engine_metadata::metadata::CoordinateSystem;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vector3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vector3 {
    pub const fn new(x: f64, y: f64, z: f64) -> Vector3 {
        Vector3 { x, y, z }
    }

    /// The unit vector pointing at a longitude and latitude given in degrees.
    pub fn from_lon_lat(lon: f64, lat: f64) -> Vector3 {
        let (lon, lat) = (lon.to_radians(), lat.to_radians());
        Vector3::new(lat.cos() * lon.cos(), lat.cos() * lon.sin(), lat.sin())
    }

    /// Longitude in [0, 360) and latitude in [-90, 90], in degrees.
    pub fn to_lon_lat(self) -> (f64, f64) {
        let v = self.normalize();
        let lon = v.y.atan2(v.x).to_degrees().rem_euclid(360.0);
        let lat = v.z.clamp(-1.0, 1.0).asin().to_degrees();
        (lon, lat)
    }

    pub fn dot(self, other: Vector3) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn cross(self, other: Vector3) -> Vector3 {
        Vector3::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    pub fn add(self, other: Vector3) -> Vector3 {
        Vector3::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }

    pub fn norm(self) -> f64 {
        self.dot(self).sqrt()
    }

    pub fn normalize(self) -> Vector3 {
        let norm = self.norm();
        Vector3::new(self.x / norm, self.y / norm, self.z / norm)
    }

    /// The angle between two unit vectors, in radians.
    pub fn angle(self, other: Vector3) -> f64 {
        self.dot(other).clamp(-1.0, 1.0).acos()
    }
}

/// A 3x3 rotation matrix, row major.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix3(pub [[f64; 3]; 3]);

impl Matrix3 {
    pub const IDENTITY: Matrix3 = Matrix3([[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]]);

    pub fn apply(&self, v: Vector3) -> Vector3 {
        let m = &self.0;
        Vector3::new(
            m[0][0] * v.x + m[0][1] * v.y + m[0][2] * v.z,
            m[1][0] * v.x + m[1][1] * v.y + m[1][2] * v.z,
            m[2][0] * v.x + m[2][1] * v.y + m[2][2] * v.z,
        )
    }

    pub fn transpose(&self) -> Matrix3 {
        let m = &self.0;
        Matrix3([
            [m[0][0], m[1][0], m[2][0]],
            [m[0][1], m[1][1], m[2][1]],
            [m[0][2], m[1][2], m[2][2]],
        ])
    }
}

/// ICRS to galactic coordinates (Hipparcos, ESA 1997).
const ICRS_TO_GALACTIC: Matrix3 = Matrix3([
    [-0.054_875_560_416_215_4, -0.873_437_090_234_885, -0.483_835_015_548_713_2],
    [0.494_109_427_875_583_7, -0.444_829_629_960_011_2, 0.746_982_244_497_218_9],
    [-0.867_666_149_019_004_7, -0.198_076_373_431_201_5, 0.455_983_776_175_066_9],
]);

/// Mean obliquity of the ecliptic at J2000, in degrees.
const OBLIQUITY_J2000: f64 = 23.439_291_1;

/// FK4 B1950 to FK5 J2000 for positions without proper motion (Standish 1982).
const FK4_TO_FK5: Matrix3 = Matrix3([
    [0.999_925_678_2, -0.011_182_061_1, -0.004_857_947_7],
    [0.011_182_061_0, 0.999_937_478_4, -0.000_027_176_5],
    [0.004_857_947_9, -0.000_027_147_4, 0.999_988_199_7],
]);

/// The rotation taking vectors in a frame to ICRS. FK5 and ICRS agree to well below the
/// resolution of any index level, so FK5 is treated as ICRS.
pub fn to_icrs(frame: CoordinateSystem) -> Matrix3 {
    match frame {
        CoordinateSystem::Icrs | CoordinateSystem::Fk5 => Matrix3::IDENTITY,
        CoordinateSystem::Fk4 => FK4_TO_FK5,
        CoordinateSystem::Galactic => ICRS_TO_GALACTIC.transpose(),
        CoordinateSystem::Ecliptic => {
            let (sin, cos) = OBLIQUITY_J2000.to_radians().sin_cos();
            Matrix3([[1.0, 0.0, 0.0], [0.0, cos, -sin], [0.0, sin, cos]])
        }
    }
}

/// Whether positions in two frames can be compared without a rotation.
pub fn same_frame(a: CoordinateSystem, b: CoordinateSystem) -> bool {
    to_icrs(a) == to_icrs(b)
}

/// Re-express a vector given in one frame in another.
pub fn convert(v: Vector3, from: CoordinateSystem, to: CoordinateSystem) -> Vector3 {
    if same_frame(from, to) {
        return v;
    }
    to_icrs(to).transpose().apply(to_icrs(from).apply(v))
}
