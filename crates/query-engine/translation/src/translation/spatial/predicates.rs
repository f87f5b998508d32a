//! SQL for geometric tests, distances and index range filters.

use query_engine_metadata::metadata::{Encoding, PositionColumns};
use query_engine_sql::sql::ast::{BinaryOperator, Expression, MathFunction, TableReference};
use query_engine_sql::sql::helpers::{
    binary, conjunction, disjunction, integer, make_configured_column, math, numeric, numeric_text,
};

use super::htm::{self, ConvexRegion, Range};
use super::sphere::Vector3;

/// Where the unit vector of a position comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum UnitVector {
    /// A constant position, already in the catalog frame.
    Constant(Vector3),
    /// The stored position of a catalog row, from its Cartesian columns.
    Catalog(Option<TableReference>),
    /// Any other position, computed from its longitude and latitude.
    Computed { lon: Expression, lat: Expression },
}

impl UnitVector {
    pub fn components(&self, columns: &PositionColumns) -> [Expression; 3] {
        match self {
            UnitVector::Constant(v) => constant(*v),
            UnitVector::Catalog(table) => [
                make_configured_column(table.clone(), &columns.x),
                make_configured_column(table.clone(), &columns.y),
                make_configured_column(table.clone(), &columns.z),
            ],
            UnitVector::Computed { lon, lat } => {
                let cos_lat = || math(MathFunction::Cos, vec![radians(lat.clone())]);
                [
                    binary(
                        cos_lat(),
                        BinaryOperator::Multiply,
                        math(MathFunction::Cos, vec![radians(lon.clone())]),
                    ),
                    binary(
                        cos_lat(),
                        BinaryOperator::Multiply,
                        math(MathFunction::Sin, vec![radians(lon.clone())]),
                    ),
                    math(MathFunction::Sin, vec![radians(lat.clone())]),
                ]
            }
        }
    }
}

fn constant(v: Vector3) -> [Expression; 3] {
    [numeric(v.x), numeric(v.y), numeric(v.z)]
}

pub fn radians(degrees: Expression) -> Expression {
    math(MathFunction::Radians, vec![degrees])
}

pub fn dot(a: [Expression; 3], b: [Expression; 3]) -> Expression {
    let [a0, a1, a2] = a;
    let [b0, b1, b2] = b;
    binary(
        binary(
            binary(a0, BinaryOperator::Multiply, b0),
            BinaryOperator::Plus,
            binary(a1, BinaryOperator::Multiply, b1),
        ),
        BinaryOperator::Plus,
        binary(a2, BinaryOperator::Multiply, b2),
    )
}

/// `p . center >= cos_radius`
pub fn within_cap(point: [Expression; 3], center: [Expression; 3], cos_radius: Expression) -> Expression {
    binary(
        dot(point, center),
        BinaryOperator::GreaterThanOrEqualTo,
        cos_radius,
    )
}

/// A point lies on the inner side of every half-space of a constant region.
pub fn within_region(point: &[Expression; 3], region: &ConvexRegion) -> Expression {
    conjunction(region.constraints.iter().map(|constraint| {
        binary(
            dot(point.clone(), constant(constraint.normal)),
            BinaryOperator::GreaterThanOrEqualTo,
            numeric(constraint.offset),
        )
    }))
}

/// The angular distance in degrees between two positions given in degrees, by the
/// haversine formula.
pub fn haversine(ra1: Expression, dec1: Expression, ra2: Expression, dec2: Expression) -> Expression {
    let half_sine_squared = |delta: Expression| {
        math(
            MathFunction::Power,
            vec![
                math(
                    MathFunction::Sin,
                    vec![binary(radians(delta), BinaryOperator::Divide, integer(2))],
                ),
                integer(2),
            ],
        )
    };
    let cosines = binary(
        math(MathFunction::Cos, vec![radians(dec1.clone())]),
        BinaryOperator::Multiply,
        math(MathFunction::Cos, vec![radians(dec2.clone())]),
    );
    let sum = binary(
        half_sine_squared(binary(dec2, BinaryOperator::Minus, dec1)),
        BinaryOperator::Plus,
        binary(
            cosines,
            BinaryOperator::Multiply,
            half_sine_squared(binary(ra2, BinaryOperator::Minus, ra1)),
        ),
    );
    binary(
        integer(2),
        BinaryOperator::Multiply,
        math(
            MathFunction::Degrees,
            vec![math(
                MathFunction::Asin,
                vec![math(MathFunction::Sqrt, vec![sum])],
            )],
        ),
    )
}

/// The index column lies in one of the ranges. Single id ranges become equalities.
pub fn index_ranges(column: &Expression, ranges: &[Range], encoding: Encoding) -> Expression {
    disjunction(ranges.iter().map(|range| {
        let low = numeric_text(htm::encode(range.low, encoding));
        if range.low == range.high {
            binary(column.clone(), BinaryOperator::Equals, low)
        } else {
            Expression::Between {
                expression: Box::new(column.clone()),
                negated: false,
                low: Box::new(low),
                high: Box::new(numeric_text(htm::encode(range.high, encoding))),
            }
        }
    }))
}
