//! Type definitions of a SQL AST representation.
//!
//! The parser produces this tree from ADQL text, the spatial resolver rewrites it, and the
//! emitter turns it back into SQL for a target dialect.

/// A SELECT statement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Select {
    pub quantifier: Option<SetQuantifier>,
    pub select_list: SelectList,
    pub from: Option<From>,
    pub joins: Vec<Join>,
    pub where_: Where,
    pub group_by: GroupBy,
    pub having: Option<Expression>,
    pub order_by: OrderBy,
    pub limit: Limit,
}

/// ALL or DISTINCT
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetQuantifier {
    All,
    Distinct,
}

/// A select list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectList {
    SelectList(Vec<SelectItem>),
    SelectStar,
}

/// A single element of a select list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectItem {
    /// `*` next to other items
    Star,
    /// `t.*`
    StarFrom(TableReference),
    /// An expression, possibly aliased
    Expression {
        expression: Expression,
        alias: Option<ColumnAlias>,
    },
}

/// A FROM clause
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum From {
    /// Select from a table reference
    Table {
        reference: TableReference,
        alias: Option<TableAlias>,
    },
    /// Select from a subquery
    Select {
        select: Box<Select>,
        alias: TableAlias,
    },
}

/// A table joined onto the FROM clause
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Join {
    pub kind: JoinKind,
    pub natural: bool,
    pub from: From,
    pub constraint: Option<JoinConstraint>,
}

/// The flavour of a join
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinKind {
    /// `FROM a, b`
    Comma,
    Cross,
    Inner,
    LeftOuter,
    RightOuter,
    FullOuter,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JoinConstraint {
    On(Expression),
    Using(Vec<ColumnName>),
}

/// A WHERE clause
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Where(pub Expression);

/// A GROUP BY clause
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupBy {
    pub elements: Vec<Expression>,
}

/// An ORDER BY clause
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderBy {
    pub elements: Vec<OrderByElement>,
}

/// A single element in an ORDER BY clause
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderByElement {
    pub target: Expression,
    pub direction: OrderByDirection,
}

/// A direction for a single ORDER BY element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderByDirection {
    Asc,
    Desc,
}

/// Row limit (ADQL `TOP`) and OFFSET
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Limit {
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

/// A scalar expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expression {
    /// AND clause
    And {
        left: Box<Expression>,
        right: Box<Expression>,
    },
    /// OR clause
    Or {
        left: Box<Expression>,
        right: Box<Expression>,
    },
    /// NOT clause
    Not(Box<Expression>),
    /// A binary operation on two scalar expression
    BinaryOperation {
        left: Box<Expression>,
        operator: BinaryOperator,
        right: Box<Expression>,
    },
    /// A binary operation on a scalar expression and a list of scalar expressions
    BinaryArrayOperation {
        left: Box<Expression>,
        operator: BinaryArrayOperator,
        right: Vec<Expression>,
    },
    /// `x [NOT] IN (SELECT ...)`
    InSubquery {
        expression: Box<Expression>,
        negated: bool,
        select: Box<Select>,
    },
    /// `x [NOT] BETWEEN low AND high`
    Between {
        expression: Box<Expression>,
        negated: bool,
        low: Box<Expression>,
        high: Box<Expression>,
    },
    /// An unary operation on a scalar expression
    UnaryOperation {
        expression: Box<Expression>,
        operator: UnaryOperator,
    },
    /// A scalar function call
    FunctionCall {
        function: Function,
        args: Vec<Expression>,
    },
    /// An aggregate function call. A missing argument means `*`.
    Aggregate {
        function: AggregateFunction,
        quantifier: Option<SetQuantifier>,
        argument: Option<Box<Expression>>,
    },
    /// A searched CASE expression
    Case {
        branches: Vec<(Expression, Expression)>,
        else_: Option<Box<Expression>>,
    },
    /// An EXISTS clause
    Exists {
        select: Box<Select>,
    },
    /// A column reference
    ColumnReference(ColumnReference),
    /// An irreducible value
    Value(Value),
}

/// An unary operator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    IsNull,
    IsNotNull,
    Negate,
}

/// A binary operator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    Equals,
    NotEquals,
    LessThan,
    LessThanOrEqualTo,
    GreaterThan,
    GreaterThanOrEqualTo,
    Like,
    NotLike,
    CaseInsensitiveLike,
    NotCaseInsensitiveLike,
    Plus,
    Minus,
    Multiply,
    Divide,
    Modulo,
    Concatenate,
}

/// A binary operator when the rhs is a list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryArrayOperator {
    In,
    NotIn,
}

/// A scalar function
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Function {
    Math(MathFunction),
    Lower,
    Upper,
    Coalesce,
    /// ADQL geometry functions. These never reach the emitter: the spatial resolver
    /// lowers them to plain SQL.
    Geometry(GeometryFunction),
    /// A user defined function, passed through as written.
    Unknown(String),
}

/// The ADQL mathematical and trigonometric functions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MathFunction {
    Abs,
    Ceiling,
    Degrees,
    Exp,
    Floor,
    Log,
    Log10,
    Mod,
    Pi,
    Power,
    Radians,
    Sqrt,
    Rand,
    Round,
    Truncate,
    Sin,
    Cos,
    Tan,
    Cot,
    Asin,
    Acos,
    Atan,
    Atan2,
}

/// The ADQL geometry functions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometryFunction {
    Area,
    Box,
    Centroid,
    Circle,
    Contains,
    Coord1,
    Coord2,
    Coordsys,
    Distance,
    Intersects,
    Point,
    Polygon,
    Region,
}

/// Aggregate functions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregateFunction {
    Count,
    Sum,
    Avg,
    Min,
    Max,
}

/// Value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// A numeric literal, kept as written.
    Numeric(String),
    /// A character string literal, unescaped.
    String(String),
    Bool(bool),
    Null,
}

/// A name as written in the query. Delimited identifiers were written in double quotes
/// and keep their exact spelling.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identifier {
    pub name: String,
    pub delimited: bool,
}

/// A database schema name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SchemaName(pub Identifier);

/// A database table name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TableName(pub Identifier);

/// A reference to a table, possibly schema qualified, or to a table alias.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TableReference {
    pub schema: Option<SchemaName>,
    pub table: TableName,
}

/// A database table's column name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ColumnName(pub Identifier);

/// A reference to a column, possibly qualified by a table reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ColumnReference {
    pub table: Option<TableReference>,
    pub name: ColumnName,
}

/// aliases given to relations
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TableAlias {
    pub name: Identifier,
}

/// aliases given to columns
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ColumnAlias {
    pub name: Identifier,
}

impl Identifier {
    /// Whether this identifier refers to `name`. Regular identifiers compare
    /// case-insensitively, delimited ones exactly.
    pub fn matches(&self, name: &str) -> bool {
        if self.delimited {
            self.name == name
        } else {
            self.name.eq_ignore_ascii_case(name)
        }
    }
}

impl Function {
    /// Resolve a function name as written in a query.
    pub fn from_name(name: &str) -> Function {
        match name.to_ascii_uppercase().as_str() {
            "ABS" => Function::Math(MathFunction::Abs),
            "CEILING" | "CEIL" => Function::Math(MathFunction::Ceiling),
            "DEGREES" => Function::Math(MathFunction::Degrees),
            "EXP" => Function::Math(MathFunction::Exp),
            "FLOOR" => Function::Math(MathFunction::Floor),
            "LOG" | "LN" => Function::Math(MathFunction::Log),
            "LOG10" => Function::Math(MathFunction::Log10),
            "MOD" => Function::Math(MathFunction::Mod),
            "PI" => Function::Math(MathFunction::Pi),
            "POWER" | "POW" => Function::Math(MathFunction::Power),
            "RADIANS" => Function::Math(MathFunction::Radians),
            "SQRT" => Function::Math(MathFunction::Sqrt),
            "RAND" | "RANDOM" => Function::Math(MathFunction::Rand),
            "ROUND" => Function::Math(MathFunction::Round),
            "TRUNCATE" | "TRUNC" => Function::Math(MathFunction::Truncate),
            "SIN" => Function::Math(MathFunction::Sin),
            "COS" => Function::Math(MathFunction::Cos),
            "TAN" => Function::Math(MathFunction::Tan),
            "COT" => Function::Math(MathFunction::Cot),
            "ASIN" => Function::Math(MathFunction::Asin),
            "ACOS" => Function::Math(MathFunction::Acos),
            "ATAN" => Function::Math(MathFunction::Atan),
            "ATAN2" => Function::Math(MathFunction::Atan2),
            "LOWER" => Function::Lower,
            "UPPER" => Function::Upper,
            "COALESCE" => Function::Coalesce,
            "AREA" => Function::Geometry(GeometryFunction::Area),
            "BOX" => Function::Geometry(GeometryFunction::Box),
            "CENTROID" => Function::Geometry(GeometryFunction::Centroid),
            "CIRCLE" => Function::Geometry(GeometryFunction::Circle),
            "CONTAINS" => Function::Geometry(GeometryFunction::Contains),
            "COORD1" => Function::Geometry(GeometryFunction::Coord1),
            "COORD2" => Function::Geometry(GeometryFunction::Coord2),
            "COORDSYS" => Function::Geometry(GeometryFunction::Coordsys),
            "DISTANCE" => Function::Geometry(GeometryFunction::Distance),
            "INTERSECTS" => Function::Geometry(GeometryFunction::Intersects),
            "POINT" => Function::Geometry(GeometryFunction::Point),
            "POLYGON" => Function::Geometry(GeometryFunction::Polygon),
            "REGION" => Function::Geometry(GeometryFunction::Region),
            _ => Function::Unknown(name.to_string()),
        }
    }
}

impl AggregateFunction {
    /// Resolve an aggregate function name as written in a query.
    pub fn from_name(name: &str) -> Option<AggregateFunction> {
        match name.to_ascii_uppercase().as_str() {
            "COUNT" => Some(AggregateFunction::Count),
            "SUM" => Some(AggregateFunction::Sum),
            "AVG" => Some(AggregateFunction::Avg),
            "MIN" => Some(AggregateFunction::Min),
            "MAX" => Some(AggregateFunction::Max),
            _ => None,
        }
    }
}

impl GeometryFunction {
    /// The ADQL name of the function.
    pub fn name(&self) -> &'static str {
        match self {
            GeometryFunction::Area => "AREA",
            GeometryFunction::Box => "BOX",
            GeometryFunction::Centroid => "CENTROID",
            GeometryFunction::Circle => "CIRCLE",
            GeometryFunction::Contains => "CONTAINS",
            GeometryFunction::Coord1 => "COORD1",
            GeometryFunction::Coord2 => "COORD2",
            GeometryFunction::Coordsys => "COORDSYS",
            GeometryFunction::Distance => "DISTANCE",
            GeometryFunction::Intersects => "INTERSECTS",
            GeometryFunction::Point => "POINT",
            GeometryFunction::Polygon => "POLYGON",
            GeometryFunction::Region => "REGION",
        }
    }
}
