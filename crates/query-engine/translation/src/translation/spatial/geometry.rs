//! Points and regions checked out of ADQL geometry function calls.

use query_engine_metadata::metadata::CoordinateSystem;
use query_engine_sql::sql::ast::{Expression, Function, GeometryFunction, Value};
use query_engine_sql::sql::helpers::constant_value;

use super::error::{SpatialError, SpatialErrorKind};
use super::htm::{Constraint, ConvexRegion};
use super::sphere::{self, Vector3};

/// Tolerance for degenerate and non-convex polygons.
const EPSILON: f64 = 1e-12;

const SQUARE_DEGREES_PER_STERADIAN: f64 =
    (180.0 / std::f64::consts::PI) * (180.0 / std::f64::consts::PI);

#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    pub frame: CoordinateSystem,
    pub lon: Expression,
    pub lat: Expression,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Region {
    Circle { center: Point, radius: Expression },
    Polygon { vertices: Vec<Point> },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    Point(Point),
    Region(Region),
}

/// Build a geometry from one function call. Scalar operands go through `scalar` first.
pub fn from_call(
    function: GeometryFunction,
    args: Vec<Expression>,
    catalog_frame: CoordinateSystem,
    scalar: &mut impl FnMut(Expression) -> Result<Expression, SpatialError>,
) -> Result<Geometry, SpatialError> {
    match function {
        GeometryFunction::Point => Ok(Geometry::Point(point(args, catalog_frame, scalar)?)),
        GeometryFunction::Circle => {
            let (frame, mut args) = split_frame(args, catalog_frame)?;
            match args.len() {
                3 => {
                    let radius = scalar(args.remove(2))?;
                    let lat = scalar(args.remove(1))?;
                    let lon = scalar(args.remove(0))?;
                    Ok(Geometry::Region(Region::Circle {
                        center: Point { frame, lon, lat },
                        radius,
                    }))
                }
                2 if is_call(&args[0], GeometryFunction::Point) => {
                    let radius = scalar(args.remove(1))?;
                    let center = match operand(args.remove(0), catalog_frame, scalar)? {
                        Geometry::Point(center) => center,
                        Geometry::Region(_) => {
                            return Err(SpatialError::arity("CIRCLE expects a POINT center"))
                        }
                    };
                    Ok(Geometry::Region(Region::Circle { center, radius }))
                }
                count => Err(SpatialError::arity(format!(
                    "CIRCLE expects a center longitude, latitude and radius, or a POINT and a radius, got {count} arguments"
                ))),
            }
        }
        GeometryFunction::Polygon => {
            let (frame, args) = split_frame(args, catalog_frame)?;
            let count = args.len();
            let all_points = args
                .iter()
                .all(|arg| is_call(arg, GeometryFunction::Point));
            let vertices = if all_points && count >= 3 {
                args.into_iter()
                    .map(|arg| match operand(arg, catalog_frame, scalar)? {
                        Geometry::Point(vertex) => Ok(vertex),
                        Geometry::Region(_) => Err(SpatialError::arity("POLYGON expects POINT vertices")),
                    })
                    .collect::<Result<Vec<_>, _>>()?
            } else if !all_points && count >= 6 && count % 2 == 0 {
                let mut vertices = Vec::with_capacity(count / 2);
                let mut args = args.into_iter();
                while let (Some(lon), Some(lat)) = (args.next(), args.next()) {
                    vertices.push(Point {
                        frame,
                        lon: scalar(lon)?,
                        lat: scalar(lat)?,
                    });
                }
                vertices
            } else {
                return Err(SpatialError::arity(format!(
                    "POLYGON expects at least 3 vertices as coordinate pairs or POINTs, got {count} arguments"
                )));
            };
            Ok(Geometry::Region(Region::Polygon { vertices }))
        }
        other => Err(SpatialError::unsupported(format!(
            "{} is not a point or a region",
            other.name()
        ))),
    }
}

/// A geometry operand of another geometry function.
pub fn operand(
    expression: Expression,
    catalog_frame: CoordinateSystem,
    scalar: &mut impl FnMut(Expression) -> Result<Expression, SpatialError>,
) -> Result<Geometry, SpatialError> {
    match expression {
        Expression::FunctionCall {
            function: Function::Geometry(function),
            args,
        } => from_call(function, args, catalog_frame, scalar),
        _ => Err(SpatialError::unsupported(
            "geometry operands must be POINT, CIRCLE or POLYGON calls",
        )),
    }
}

fn point(
    args: Vec<Expression>,
    catalog_frame: CoordinateSystem,
    scalar: &mut impl FnMut(Expression) -> Result<Expression, SpatialError>,
) -> Result<Point, SpatialError> {
    let (frame, args) = split_frame(args, catalog_frame)?;
    match <[Expression; 2]>::try_from(args) {
        Ok([lon, lat]) => Ok(Point {
            frame,
            lon: scalar(lon)?,
            lat: scalar(lat)?,
        }),
        Err(args) => Err(SpatialError::arity(format!(
            "POINT expects 2 coordinates, got {}",
            args.len()
        ))),
    }
}

fn is_call(expression: &Expression, expected: GeometryFunction) -> bool {
    matches!(
        expression,
        Expression::FunctionCall { function: Function::Geometry(function), .. } if *function == expected
    )
}

/// Take the coordinate system tag off the front of the arguments, if there is one. An empty
/// tag means the frame of the catalog.
fn split_frame(
    mut args: Vec<Expression>,
    catalog_frame: CoordinateSystem,
) -> Result<(CoordinateSystem, Vec<Expression>), SpatialError> {
    let Some(Expression::Value(Value::String(tag))) = args.first() else {
        return Ok((catalog_frame, args));
    };
    let frame = coordinate_system(tag, catalog_frame)?;
    args.remove(0);
    Ok((frame, args))
}

pub fn coordinate_system(
    tag: &str,
    catalog_frame: CoordinateSystem,
) -> Result<CoordinateSystem, SpatialError> {
    if tag.trim().is_empty() {
        return Ok(catalog_frame);
    }
    tag.parse().map_err(|_| {
        let known: Vec<&str> = enum_iterator::all::<CoordinateSystem>()
            .map(|frame| frame.tag())
            .collect();
        SpatialError::new(
            SpatialErrorKind::UnknownCoordSystem,
            format!("'{tag}' is not one of {}", known.join(", ")),
        )
    })
}

impl Point {
    /// The unit vector of the point in `frame`, when both coordinates are constants.
    pub fn constant_vector(&self, frame: CoordinateSystem) -> Result<Option<Vector3>, SpatialError> {
        let (Some(lon), Some(lat)) = (constant_value(&self.lon), constant_value(&self.lat)) else {
            return Ok(None);
        };
        if !lon.is_finite() || !(-90.0..=90.0).contains(&lat) {
            return Err(SpatialError::invalid(format!(
                "({lon}, {lat}) is not a position on the sphere"
            )));
        }
        Ok(Some(sphere::convert(
            Vector3::from_lon_lat(lon, lat),
            self.frame,
            frame,
        )))
    }
}

/// The radius of a circle in degrees, when it is a constant.
pub fn constant_radius(radius: &Expression) -> Result<Option<f64>, SpatialError> {
    match constant_value(radius) {
        None => Ok(None),
        Some(radius) if (0.0..180.0).contains(&radius) => Ok(Some(radius)),
        Some(radius) => Err(SpatialError::invalid(format!(
            "a circle radius of {radius} degrees is outside [0, 180)"
        ))),
    }
}

pub fn circle_region(center: Vector3, radius: f64) -> ConvexRegion {
    ConvexRegion {
        constraints: vec![Constraint {
            normal: center,
            offset: radius.to_radians().cos(),
        }],
    }
}

/// The inside of a convex polygon given its vertices in either orientation, as the
/// half-spaces left of each edge.
pub fn polygon_region(vertices: &[Vector3]) -> Result<ConvexRegion, SpatialError> {
    let edges = |vertices: &[Vector3]| -> Result<Vec<Vector3>, SpatialError> {
        (0..vertices.len())
            .map(|i| {
                let normal = vertices[i].cross(vertices[(i + 1) % vertices.len()]);
                if normal.norm() < EPSILON {
                    Err(SpatialError::invalid(
                        "polygon has coincident or antipodal consecutive vertices",
                    ))
                } else {
                    Ok(normal.normalize())
                }
            })
            .collect()
    };
    let holds_every_vertex = |normals: &[Vector3]| {
        normals
            .iter()
            .all(|normal| vertices.iter().all(|vertex| normal.dot(*vertex) >= -EPSILON))
    };

    let mut normals = edges(vertices)?;
    if !holds_every_vertex(&normals) {
        let reversed: Vec<Vector3> = vertices.iter().rev().copied().collect();
        normals = edges(&reversed)?;
        if !holds_every_vertex(&normals) {
            return Err(SpatialError::invalid("polygon is not convex"));
        }
    }
    let flat = normals
        .iter()
        .any(|normal| vertices.iter().all(|vertex| normal.dot(*vertex) <= EPSILON));
    if flat {
        return Err(SpatialError::invalid("polygon vertices lie on one great circle"));
    }

    Ok(ConvexRegion {
        constraints: normals
            .into_iter()
            .map(|normal| Constraint {
                normal,
                offset: 0.0,
            })
            .collect(),
    })
}

/// The area of a circle of constant radius, in square degrees.
pub fn circle_area(radius: f64) -> f64 {
    2.0 * std::f64::consts::PI * (1.0 - radius.to_radians().cos()) * SQUARE_DEGREES_PER_STERADIAN
}

/// The factor taking `1 - cos(radius)` to the area of a circle in square degrees.
pub fn circle_area_factor() -> f64 {
    2.0 * std::f64::consts::PI * SQUARE_DEGREES_PER_STERADIAN
}

/// The area of a convex polygon, in square degrees, from its edge half-spaces in order.
pub fn polygon_area(region: &ConvexRegion) -> f64 {
    let normals: Vec<Vector3> = region
        .constraints
        .iter()
        .map(|constraint| constraint.normal)
        .collect();
    let turning: f64 = (0..normals.len())
        .map(|i| normals[i].angle(normals[(i + 1) % normals.len()]))
        .sum();
    (2.0 * std::f64::consts::PI - turning) * SQUARE_DEGREES_PER_STERADIAN
}
