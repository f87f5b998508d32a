//! Lower ADQL geometry functions to plain SQL over the catalog's position columns.
//!
//! Containment tests against constant regions also get a filter on the spatial index
//! column, ANDed with the exact test, so the database can narrow the scan.

pub mod error;
pub mod geometry;
pub mod htm;
pub mod predicates;
pub mod sphere;

use query_engine_metadata::metadata::IndexConfig;
use query_engine_sql::sql::ast::{
    BinaryOperator, ColumnReference, Expression, From, Function, GeometryFunction, GroupBy,
    Join, JoinConstraint, MathFunction, OrderBy, OrderByElement, Select, SelectItem,
    SelectList, TableReference, Where,
};
use query_engine_sql::sql::helpers::{
    and, binary, constant_value, integer, make_configured_column, math, not, numeric, or,
    predicate_to_integer, string,
};

pub use error::{SpatialError, SpatialErrorKind};
use geometry::{Geometry, Point, Region};
use htm::ConvexRegion;
use predicates::UnitVector;

/// Where an expression sits, which decides how a containment test is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Position {
    /// A condition that must hold for a row to be kept.
    Predicate,
    /// A condition under an odd number of NOTs.
    Negated,
    /// A value, such as a select list item or a function argument.
    Value,
}

impl Position {
    fn condition(self) -> Position {
        match self {
            Position::Value => Position::Predicate,
            position => position,
        }
    }

    fn negate(self) -> Position {
        match self {
            Position::Negated => Position::Predicate,
            Position::Predicate | Position::Value => Position::Negated,
        }
    }
}

/// Rewrite every geometry function of a query into SQL the emitter understands.
pub fn resolve(config: &IndexConfig, select: Select) -> Result<Select, SpatialError> {
    Resolver { config }.select(select)
}

struct Resolver<'a> {
    config: &'a IndexConfig,
}

impl Resolver<'_> {
    fn select(&self, select: Select) -> Result<Select, SpatialError> {
        let Select {
            quantifier,
            select_list,
            from,
            joins,
            where_: Where(where_),
            group_by,
            having,
            order_by,
            limit,
        } = select;

        let select_list = match select_list {
            SelectList::SelectStar => SelectList::SelectStar,
            SelectList::SelectList(items) => SelectList::SelectList(
                items
                    .into_iter()
                    .map(|item| self.select_item(item))
                    .collect::<Result<_, _>>()?,
            ),
        };
        let order_by = OrderBy {
            elements: order_by
                .elements
                .into_iter()
                .map(|element| {
                    Ok(OrderByElement {
                        target: self.expression(element.target, Position::Value)?,
                        direction: element.direction,
                    })
                })
                .collect::<Result<_, SpatialError>>()?,
        };

        Ok(Select {
            quantifier,
            select_list,
            from: from.map(|from| self.from(from)).transpose()?,
            joins: joins
                .into_iter()
                .map(|join| self.join(join))
                .collect::<Result<_, _>>()?,
            where_: Where(self.expression(where_, Position::Predicate)?),
            group_by: GroupBy {
                elements: self.values(group_by.elements)?,
            },
            having: having
                .map(|having| self.expression(having, Position::Predicate))
                .transpose()?,
            order_by,
            limit,
        })
    }

    fn select_item(&self, item: SelectItem) -> Result<SelectItem, SpatialError> {
        match item {
            SelectItem::Expression { expression, alias } => Ok(SelectItem::Expression {
                expression: self.expression(expression, Position::Value)?,
                alias,
            }),
            item @ (SelectItem::Star | SelectItem::StarFrom(_)) => Ok(item),
        }
    }

    fn from(&self, from: From) -> Result<From, SpatialError> {
        match from {
            From::Select { select, alias } => Ok(From::Select {
                select: Box::new(self.select(*select)?),
                alias,
            }),
            table @ From::Table { .. } => Ok(table),
        }
    }

    fn join(&self, join: Join) -> Result<Join, SpatialError> {
        let constraint = match join.constraint {
            Some(JoinConstraint::On(on)) => Some(JoinConstraint::On(
                self.expression(on, Position::Predicate)?,
            )),
            constraint => constraint,
        };
        Ok(Join {
            kind: join.kind,
            natural: join.natural,
            from: self.from(join.from)?,
            constraint,
        })
    }

    fn values(&self, expressions: Vec<Expression>) -> Result<Vec<Expression>, SpatialError> {
        expressions
            .into_iter()
            .map(|expression| self.expression(expression, Position::Value))
            .collect()
    }

    fn value(&self, expression: Expression) -> Result<Expression, SpatialError> {
        self.expression(expression, Position::Value)
    }

    fn boxed_value(&self, expression: Box<Expression>) -> Result<Box<Expression>, SpatialError> {
        Ok(Box::new(self.value(*expression)?))
    }

    fn expression(&self, expression: Expression, position: Position) -> Result<Expression, SpatialError> {
        match expression {
            Expression::And { left, right } => Ok(and(
                self.expression(*left, position.condition())?,
                self.expression(*right, position.condition())?,
            )),
            Expression::Or { left, right } => Ok(or(
                self.expression(*left, position.condition())?,
                self.expression(*right, position.condition())?,
            )),
            Expression::Not(expression) => Ok(not(self.expression(*expression, position.negate())?)),
            Expression::BinaryOperation {
                left,
                operator,
                right,
            } => match compared_containment(*left, operator, *right) {
                Ok((function, args, holds)) => {
                    let condition = self.containment(function, args, position, holds)?;
                    Ok(match position {
                        Position::Value => predicate_to_integer(condition),
                        Position::Predicate | Position::Negated => condition,
                    })
                }
                Err((left, right)) => Ok(binary(self.value(left)?, operator, self.value(right)?)),
            },
            Expression::BinaryArrayOperation {
                left,
                operator,
                right,
            } => Ok(Expression::BinaryArrayOperation {
                left: self.boxed_value(left)?,
                operator,
                right: self.values(right)?,
            }),
            Expression::InSubquery {
                expression,
                negated,
                select,
            } => Ok(Expression::InSubquery {
                expression: self.boxed_value(expression)?,
                negated,
                select: Box::new(self.select(*select)?),
            }),
            Expression::Between {
                expression,
                negated,
                low,
                high,
            } => Ok(Expression::Between {
                expression: self.boxed_value(expression)?,
                negated,
                low: self.boxed_value(low)?,
                high: self.boxed_value(high)?,
            }),
            Expression::UnaryOperation {
                expression,
                operator,
            } => Ok(Expression::UnaryOperation {
                expression: self.boxed_value(expression)?,
                operator,
            }),
            Expression::FunctionCall {
                function: Function::Geometry(function),
                args,
            } => self.geometry_function(function, args, position),
            Expression::FunctionCall { function, args } => Ok(Expression::FunctionCall {
                function,
                args: self.values(args)?,
            }),
            Expression::Aggregate {
                function,
                quantifier,
                argument,
            } => Ok(Expression::Aggregate {
                function,
                quantifier,
                argument: argument
                    .map(|argument| self.boxed_value(argument))
                    .transpose()?,
            }),
            Expression::Case { branches, else_ } => Ok(Expression::Case {
                branches: branches
                    .into_iter()
                    .map(|(condition, result)| {
                        Ok((
                            self.expression(condition, Position::Predicate)?,
                            self.value(result)?,
                        ))
                    })
                    .collect::<Result<_, SpatialError>>()?,
                else_: else_.map(|else_| self.boxed_value(else_)).transpose()?,
            }),
            Expression::Exists { select } => Ok(Expression::Exists {
                select: Box::new(self.select(*select)?),
            }),
            expression @ (Expression::ColumnReference(_) | Expression::Value(_)) => Ok(expression),
        }
    }

    fn geometry_function(
        &self,
        function: GeometryFunction,
        args: Vec<Expression>,
        position: Position,
    ) -> Result<Expression, SpatialError> {
        match function {
            GeometryFunction::Contains | GeometryFunction::Intersects => {
                let condition = self.containment(function, args, position, true)?;
                Ok(match position {
                    Position::Value => predicate_to_integer(condition),
                    Position::Predicate | Position::Negated => condition,
                })
            }
            GeometryFunction::Distance => self.distance(args),
            GeometryFunction::Coord1 => Ok(self.point_argument(function, args)?.lon),
            GeometryFunction::Coord2 => Ok(self.point_argument(function, args)?.lat),
            GeometryFunction::Coordsys => Ok(string(self.point_argument(function, args)?.frame.tag())),
            GeometryFunction::Area => self.area(args),
            GeometryFunction::Point | GeometryFunction::Circle | GeometryFunction::Polygon => {
                Err(SpatialError::unsupported(format!(
                    "{} can only be used as an argument of CONTAINS, INTERSECTS, AREA, COORD1, COORD2 or COORDSYS",
                    function.name()
                )))
            }
            GeometryFunction::Box | GeometryFunction::Region | GeometryFunction::Centroid => Err(
                SpatialError::unsupported(format!("{} is not supported", function.name())),
            ),
        }
    }

    fn operand(&self, expression: Expression) -> Result<Geometry, SpatialError> {
        geometry::operand(expression, self.config.catalog_frame, &mut |scalar| {
            self.value(scalar)
        })
    }

    /// A containment test between a point and a region. `holds` is false when the query asks
    /// for the test to fail.
    fn containment(
        &self,
        function: GeometryFunction,
        args: Vec<Expression>,
        position: Position,
        holds: bool,
    ) -> Result<Expression, SpatialError> {
        let [first, second] = <[Expression; 2]>::try_from(args).map_err(|args| {
            SpatialError::arity(format!(
                "{} expects 2 geometries, got {}",
                function.name(),
                args.len()
            ))
        })?;
        let (point, region) = match (function, self.operand(first)?, self.operand(second)?) {
            (_, Geometry::Point(point), Geometry::Region(region))
            | (GeometryFunction::Intersects, Geometry::Region(region), Geometry::Point(point)) => {
                (point, region)
            }
            (GeometryFunction::Contains, _, _) => {
                return Err(SpatialError::unsupported(
                    "CONTAINS is only supported for a POINT in a CIRCLE or POLYGON",
                ))
            }
            _ => {
                return Err(SpatialError::unsupported(
                    "INTERSECTS is only supported between a POINT and a CIRCLE or POLYGON",
                ))
            }
        };

        let columns = &self.config.columns;
        let point = self.unit_vector(point)?;
        let components = point.components(columns);
        let (geometric, indexable) = match region {
            Region::Circle { center, radius } => {
                let constant_radius = geometry::constant_radius(&radius)?;
                let center = self.unit_vector(center)?;
                let cos_radius = match constant_radius {
                    Some(radius) => numeric(radius.to_radians().cos()),
                    None => math(MathFunction::Cos, vec![predicates::radians(radius)]),
                };
                let indexable = match (&center, constant_radius) {
                    (UnitVector::Constant(center), Some(radius)) => {
                        Some(geometry::circle_region(*center, radius))
                    }
                    _ => None,
                };
                (
                    predicates::within_cap(components, center.components(columns), cos_radius),
                    indexable,
                )
            }
            Region::Polygon { vertices } => {
                let region = self.polygon(vertices)?;
                (predicates::within_region(&components, &region), Some(region))
            }
        };

        if !holds {
            return Ok(not(geometric));
        }
        match (position, point, indexable) {
            (Position::Predicate, UnitVector::Catalog(table), Some(region)) => {
                Ok(match self.index_filter(table, &region) {
                    Some(filter) => and(filter, geometric),
                    None => geometric,
                })
            }
            _ => Ok(geometric),
        }
    }

    fn index_filter(&self, table: Option<TableReference>, region: &ConvexRegion) -> Option<Expression> {
        let index = &self.config.spatial_index;
        let ranges = htm::cover(region, index.level, index.cover);
        tracing::debug!(ranges = ranges.len(), level = index.level, "covered region");
        if ranges.is_empty() {
            return None;
        }
        let column = make_configured_column(table, &index.column);
        Some(predicates::index_ranges(&column, &ranges, index.encoding))
    }

    /// The unit vector of a point, in the catalog frame.
    fn unit_vector(&self, point: Point) -> Result<UnitVector, SpatialError> {
        let catalog_frame = self.config.catalog_frame;
        if let Some(v) = point.constant_vector(catalog_frame)? {
            return Ok(UnitVector::Constant(v));
        }
        if !sphere::same_frame(point.frame, catalog_frame) {
            return Err(SpatialError::unsupported(format!(
                "positions in {} can only be compared with the {catalog_frame} catalog when their coordinates are constants",
                point.frame
            )));
        }
        match self.catalog_table(&point) {
            Some(table) => Ok(UnitVector::Catalog(table)),
            None => Ok(UnitVector::Computed {
                lon: point.lon,
                lat: point.lat,
            }),
        }
    }

    /// The qualifier of the point when it is the stored position of a catalog row.
    fn catalog_table(&self, point: &Point) -> Option<Option<TableReference>> {
        match (&point.lon, &point.lat) {
            (
                Expression::ColumnReference(ColumnReference { table, name: lon }),
                Expression::ColumnReference(ColumnReference {
                    table: lat_table,
                    name: lat,
                }),
            ) if table == lat_table
                && lon.0.matches(&self.config.columns.ra)
                && lat.0.matches(&self.config.columns.dec) =>
            {
                Some(table.clone())
            }
            _ => None,
        }
    }

    fn polygon(&self, vertices: Vec<Point>) -> Result<ConvexRegion, SpatialError> {
        let vectors = vertices
            .iter()
            .map(|vertex| {
                vertex
                    .constant_vector(self.config.catalog_frame)?
                    .ok_or_else(|| SpatialError::invalid("polygon vertices must be constants"))
            })
            .collect::<Result<Vec<_>, _>>()?;
        geometry::polygon_region(&vectors)
    }

    fn distance(&self, args: Vec<Expression>) -> Result<Expression, SpatialError> {
        let [ra1, dec1, ra2, dec2] = <[Expression; 4]>::try_from(args).map_err(|args| {
            SpatialError::arity(format!(
                "DISTANCE expects 4 arguments (ra1, dec1, ra2, dec2), got {}",
                args.len()
            ))
        })?;
        Ok(predicates::haversine(
            self.value(ra1)?,
            self.value(dec1)?,
            self.value(ra2)?,
            self.value(dec2)?,
        ))
    }

    fn point_argument(
        &self,
        function: GeometryFunction,
        args: Vec<Expression>,
    ) -> Result<Point, SpatialError> {
        let [argument] = <[Expression; 1]>::try_from(args).map_err(|args| {
            SpatialError::arity(format!(
                "{} expects 1 POINT, got {} arguments",
                function.name(),
                args.len()
            ))
        })?;
        match self.operand(argument)? {
            Geometry::Point(point) => Ok(point),
            Geometry::Region(_) => Err(SpatialError::unsupported(format!(
                "{} is only supported for a POINT",
                function.name()
            ))),
        }
    }

    /// The area of a geometry in square degrees.
    fn area(&self, args: Vec<Expression>) -> Result<Expression, SpatialError> {
        let [argument] = <[Expression; 1]>::try_from(args).map_err(|args| {
            SpatialError::arity(format!("AREA expects 1 geometry, got {} arguments", args.len()))
        })?;
        match self.operand(argument)? {
            Geometry::Point(_) => Ok(integer(0)),
            Geometry::Region(Region::Circle { center, radius }) => {
                center.constant_vector(self.config.catalog_frame)?;
                match geometry::constant_radius(&radius)? {
                    Some(radius) => Ok(numeric(geometry::circle_area(radius))),
                    None => Ok(binary(
                        numeric(geometry::circle_area_factor()),
                        BinaryOperator::Multiply,
                        binary(
                            integer(1),
                            BinaryOperator::Minus,
                            math(MathFunction::Cos, vec![predicates::radians(radius)]),
                        ),
                    )),
                }
            }
            Geometry::Region(Region::Polygon { vertices }) => {
                Ok(numeric(geometry::polygon_area(&self.polygon(vertices)?)))
            }
        }
    }
}

fn is_containment(expression: &Expression) -> bool {
    matches!(
        expression,
        Expression::FunctionCall {
            function: Function::Geometry(GeometryFunction::Contains | GeometryFunction::Intersects),
            ..
        }
    )
}

/// Split `CONTAINS(..) = 1` and its variants into the containment call and whether the
/// test must hold. Anything else comes back unchanged.
#[allow(clippy::type_complexity)]
fn compared_containment(
    left: Expression,
    operator: BinaryOperator,
    right: Expression,
) -> Result<(GeometryFunction, Vec<Expression>, bool), (Expression, Expression)> {
    let equals = match operator {
        BinaryOperator::Equals => true,
        BinaryOperator::NotEquals => false,
        _ => return Err((left, right)),
    };
    let truth = |expression: &Expression| match constant_value(expression) {
        Some(value) if (value - 1.0).abs() < f64::EPSILON => Some(true),
        Some(value) if value.abs() < f64::EPSILON => Some(false),
        _ => None,
    };
    let (call, expected) = if is_containment(&left) {
        match truth(&right) {
            Some(expected) => (left, expected),
            None => return Err((left, right)),
        }
    } else if is_containment(&right) {
        match truth(&left) {
            Some(expected) => (right, expected),
            None => return Err((left, right)),
        }
    } else {
        return Err((left, right));
    };
    match call {
        Expression::FunctionCall {
            function: Function::Geometry(function),
            args,
        } => Ok((function, args, equals == expected)),
        call => Err((call, numeric(if expected { 1.0 } else { 0.0 }))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use query_engine_metadata::metadata::Dialect;
    use query_engine_sql::sql::convert::select_to_sql;

    fn translate(query: &str) -> Result<String, SpatialError> {
        let config = IndexConfig::default().with_dialect(Dialect::Postgresql);
        let select = query_engine_parser::parse(query).unwrap();
        let resolved = resolve(&config, select)?;
        Ok(select_to_sql(&resolved, config.dialect).unwrap().sql)
    }

    #[test]
    fn non_spatial_queries_are_untouched() {
        let config = IndexConfig::default();
        let select = query_engine_parser::parse("SELECT a, COUNT(*) FROM t WHERE b > 1 GROUP BY a").unwrap();
        assert_eq!(resolve(&config, select.clone()), Ok(select));
    }

    #[test]
    fn contains_on_the_catalog_uses_the_index() {
        let sql = translate(
            "SELECT * FROM t WHERE CONTAINS(POINT('ICRS', ra, dec), CIRCLE('ICRS', 10, 20, 0.5)) = 1",
        )
        .unwrap();
        assert!(sql.contains("HTM20 BETWEEN"), "{sql}");
        assert!(sql.contains("(X * "), "{sql}");
        assert!(sql.contains(">= 0.99996192"), "{sql}");
    }

    #[test]
    fn failing_containment_has_no_index_filter() {
        for query in [
            "SELECT * FROM t WHERE CONTAINS(POINT('ICRS', ra, dec), CIRCLE('ICRS', 10, 20, 0.5)) = 0",
            "SELECT * FROM t WHERE 1 <> CONTAINS(POINT('ICRS', ra, dec), CIRCLE('ICRS', 10, 20, 0.5))",
            "SELECT * FROM t WHERE NOT CONTAINS(POINT('ICRS', ra, dec), CIRCLE('ICRS', 10, 20, 0.5)) = 1",
        ] {
            let sql = translate(query).unwrap();
            assert!(!sql.contains("HTM20"), "{sql}");
            assert!(sql.contains("(NOT "), "{sql}");
        }
    }

    #[test]
    fn containment_as_a_value() {
        let sql = translate(
            "SELECT CONTAINS(POINT('ICRS', ra, dec), CIRCLE('ICRS', 10, 20, 0.5)) AS inside FROM t",
        )
        .unwrap();
        assert!(sql.starts_with("SELECT CASE WHEN "), "{sql}");
        assert!(sql.contains(" THEN 1 ELSE 0 END AS inside"), "{sql}");
        assert!(!sql.contains("HTM20"), "{sql}");
    }

    #[test]
    fn compared_containment_as_a_value() {
        let config = IndexConfig::default();
        let select = query_engine_parser::parse(
            "SELECT CONTAINS(POINT('ICRS', ra, dec), CIRCLE('ICRS', 10, 20, 0.5)) = 1 AS inside FROM t",
        )
        .unwrap();
        let resolved = resolve(&config, select).unwrap();
        let sql = select_to_sql(&resolved, Dialect::Oracle).unwrap().sql;
        assert!(sql.starts_with("SELECT CASE WHEN "), "{sql}");
        assert!(sql.contains(" THEN 1 ELSE 0 END AS inside FROM t"), "{sql}");
        assert!(!sql.contains("HTM20"), "{sql}");
    }

    #[test]
    fn other_points_use_trigonometry() {
        let sql = translate(
            "SELECT * FROM t WHERE CONTAINS(POINT('ICRS', ra + 1, dec), CIRCLE('ICRS', 10, 20, 0.5)) = 1",
        )
        .unwrap();
        assert!(sql.contains("COS(RADIANS((ra + 1)))"), "{sql}");
        assert!(!sql.contains("HTM20"), "{sql}");
    }

    #[test]
    fn qualified_catalog_columns_qualify_the_index_column() {
        let sql = translate(
            "SELECT * FROM t AS s WHERE CONTAINS(POINT('', s.ra, s.dec), CIRCLE('', 10, 20, 0.5)) = 1",
        )
        .unwrap();
        assert!(sql.contains("s.HTM20 BETWEEN"), "{sql}");
        assert!(sql.contains("(s.X * "), "{sql}");
    }

    #[test]
    fn mixed_case_index_columns_are_delimited() {
        let mut config = IndexConfig::default().with_dialect(Dialect::Postgresql);
        config.spatial_index.column = "HtmId".to_string();
        let select = query_engine_parser::parse(
            "SELECT * FROM t AS s WHERE CONTAINS(POINT('ICRS', s.ra, s.dec), CIRCLE('ICRS', 10, 20, 0.5)) = 1",
        )
        .unwrap();
        let resolved = resolve(&config, select).unwrap();
        let sql = select_to_sql(&resolved, config.dialect).unwrap().sql;
        assert!(sql.contains("s.\"HtmId\" BETWEEN"), "{sql}");
    }

    #[test]
    fn intersects_takes_either_order() {
        let sql = translate(
            "SELECT * FROM t WHERE INTERSECTS(CIRCLE('ICRS', 10, 20, 0.5), POINT('ICRS', ra, dec)) = 1",
        )
        .unwrap();
        assert!(sql.contains("HTM20 BETWEEN"), "{sql}");
    }

    #[test]
    fn crossmatch_against_a_column_centre() {
        let sql = translate(
            "SELECT * FROM a, b WHERE CONTAINS(POINT('ICRS', a.ra, a.dec), CIRCLE('ICRS', b.ra, b.dec, 0.01)) = 1",
        )
        .unwrap();
        assert!(sql.contains("(a.X * b.X)"), "{sql}");
        assert!(!sql.contains("HTM20"), "{sql}");
    }

    #[test]
    fn unsupported_geometry() {
        for query in [
            "SELECT * FROM t WHERE CONTAINS(CIRCLE('ICRS', 1, 2, 3), CIRCLE('ICRS', 1, 2, 4)) = 1",
            "SELECT * FROM t WHERE CONTAINS(CIRCLE('ICRS', 1, 2, 3), POINT('ICRS', ra, dec)) = 1",
            "SELECT * FROM t WHERE CONTAINS(POINT('ICRS', ra, dec), BOX('ICRS', 1, 2, 3, 4)) = 1",
            "SELECT CENTROID(CIRCLE('ICRS', 1, 2, 3)) FROM t",
            "SELECT POINT('ICRS', ra, dec) FROM t",
            "SELECT * FROM t WHERE CONTAINS(POINT('GALACTIC', ra, dec), CIRCLE('ICRS', 1, 2, 3)) = 1",
        ] {
            assert_eq!(
                translate(query).unwrap_err().kind,
                SpatialErrorKind::UnsupportedFunction,
                "{query}"
            );
        }
    }

    #[test]
    fn distance_lowers_to_haversine() {
        let sql = translate("SELECT DISTANCE(81.28, -69.78, ra, dec) AS d FROM t").unwrap();
        assert!(sql.starts_with("SELECT (2 * DEGREES(ASIN(SQRT("), "{sql}");
    }

    #[test]
    fn distance_arity() {
        let err = translate(
            "SELECT * FROM t WHERE DISTANCE(POINT('ICRS', ra, dec), POINT('ICRS', 1, 2)) < 1",
        )
        .unwrap_err();
        assert_eq!(err.kind, SpatialErrorKind::ArityMismatch);
        assert_eq!(
            err.to_string(),
            "arity mismatch: DISTANCE expects 4 arguments (ra1, dec1, ra2, dec2), got 2"
        );
    }

    #[test]
    fn point_accessors() {
        let sql = translate(
            "SELECT COORD1(POINT('GALACTIC', l, b)), COORD2(POINT('GALACTIC', l, b)), COORDSYS(POINT('j2000', 1, 2)) FROM t",
        )
        .unwrap();
        assert_eq!(sql, "SELECT l, b, 'FK5' FROM t");
    }

    #[test]
    fn areas_fold_to_literals() {
        let sql = translate("SELECT AREA(CIRCLE('ICRS', 10, 20, 90)) AS a FROM t").unwrap();
        let area: f64 = sql
            .trim_start_matches("SELECT ")
            .trim_end_matches(" AS a FROM t")
            .parse()
            .unwrap();
        assert!((area - 20_626.480_624_709_635).abs() < 1e-6, "{sql}");
    }

    #[test]
    fn polygons_must_be_constant() {
        let err = translate(
            "SELECT * FROM t WHERE CONTAINS(POINT('ICRS', ra, dec), POLYGON('ICRS', ra, 0, 10, 0, 10, 10)) = 1",
        )
        .unwrap_err();
        assert_eq!(err.kind, SpatialErrorKind::InvalidGeometry);
    }

    #[test]
    fn resolves_inside_subqueries() {
        let sql = translate(
            "SELECT * FROM (SELECT * FROM t WHERE CONTAINS(POINT('ICRS', ra, dec), CIRCLE('ICRS', 10, 20, 0.5)) = 1) AS s",
        )
        .unwrap();
        assert!(sql.contains("HTM20 BETWEEN"), "{sql}");
    }
}
