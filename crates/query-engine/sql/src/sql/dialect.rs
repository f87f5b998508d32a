//! The differences between the SQL dialects we emit, as a table keyed by dialect.

use query_engine_metadata::metadata::Dialect;

use super::ast::MathFunction;

/// How a dialect writes the constructs that differ between databases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub identifier_quote: char,
    pub concatenation: Concatenation,
    pub modulo: Modulo,
    /// Whether `AS` may precede a table alias.
    pub table_alias_keyword: bool,
    /// Whether booleans are values. Without them a condition in the select list is
    /// written as `CASE WHEN .. THEN 1 ELSE 0 END`.
    pub boolean_literals: bool,
    /// Whether an unqualified `*` may sit next to other select items.
    pub bare_star_with_items: bool,
    pub case_insensitive_like: CaseInsensitiveLike,
    pub row_limit: RowLimit,
}

/// String concatenation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Concatenation {
    /// `a || b`
    Operator,
    /// `CONCAT(a, b)`
    Function,
}

/// The remainder operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modulo {
    /// `a % b`
    Operator,
    /// `MOD(a, b)`
    Function,
}

/// How ADQL's `ILIKE` is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaseInsensitiveLike {
    /// The database has `ILIKE`.
    Native,
    /// `LIKE` already ignores case.
    Like,
    /// `UPPER(a) LIKE UPPER(b)`
    UpperLike,
}

/// How the row limit and offset are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowLimit {
    /// `LIMIT n OFFSET m`. Some databases need a LIMIT whenever there is an OFFSET, in
    /// which case this holds the value meaning "no limit".
    LimitOffset { unbounded: Option<&'static str> },
    /// `OFFSET m ROWS FETCH FIRST n ROWS ONLY`
    FetchFirst,
}

/// How one ADQL math function is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FunctionMapping {
    /// A function call under this name.
    Name(&'static str),
    /// No such function: multiply the single argument by this factor.
    Scale(&'static str),
    /// No such function: write this constant.
    Constant(&'static str),
    /// `LOG(10, x)`
    LogBase10,
    Unsupported,
}

const ORACLE: Profile = Profile {
    identifier_quote: '"',
    concatenation: Concatenation::Operator,
    modulo: Modulo::Function,
    table_alias_keyword: false,
    boolean_literals: false,
    bare_star_with_items: false,
    case_insensitive_like: CaseInsensitiveLike::UpperLike,
    row_limit: RowLimit::FetchFirst,
};

const POSTGRESQL: Profile = Profile {
    identifier_quote: '"',
    concatenation: Concatenation::Operator,
    modulo: Modulo::Operator,
    table_alias_keyword: true,
    boolean_literals: true,
    bare_star_with_items: true,
    case_insensitive_like: CaseInsensitiveLike::Native,
    row_limit: RowLimit::LimitOffset { unbounded: None },
};

const SQLITE: Profile = Profile {
    identifier_quote: '"',
    concatenation: Concatenation::Operator,
    modulo: Modulo::Operator,
    table_alias_keyword: true,
    boolean_literals: true,
    bare_star_with_items: true,
    case_insensitive_like: CaseInsensitiveLike::Like,
    row_limit: RowLimit::LimitOffset {
        unbounded: Some("-1"),
    },
};

const MYSQL: Profile = Profile {
    identifier_quote: '`',
    concatenation: Concatenation::Function,
    modulo: Modulo::Operator,
    table_alias_keyword: true,
    boolean_literals: true,
    bare_star_with_items: true,
    case_insensitive_like: CaseInsensitiveLike::Like,
    row_limit: RowLimit::LimitOffset {
        unbounded: Some("18446744073709551615"),
    },
};

/// The profile of a dialect.
pub fn profile(dialect: Dialect) -> &'static Profile {
    match dialect {
        Dialect::Oracle => &ORACLE,
        Dialect::Postgresql => &POSTGRESQL,
        Dialect::Sqlite => &SQLITE,
        Dialect::Mysql => &MYSQL,
    }
}

const DEGREES_PER_RADIAN: &str = "57.29577951308232";
const RADIANS_PER_DEGREE: &str = "0.017453292519943295";
const PI: &str = "3.141592653589793";

/// How a dialect writes an ADQL math function.
pub fn function_mapping(dialect: Dialect, function: MathFunction) -> FunctionMapping {
    use FunctionMapping::{Constant, LogBase10, Name, Scale, Unsupported};

    match (dialect, function) {
        (_, MathFunction::Abs) => Name("ABS"),
        (Dialect::Oracle, MathFunction::Ceiling) => Name("CEIL"),
        (_, MathFunction::Ceiling) => Name("CEILING"),
        (Dialect::Oracle, MathFunction::Degrees) => Scale(DEGREES_PER_RADIAN),
        (_, MathFunction::Degrees) => Name("DEGREES"),
        (_, MathFunction::Exp) => Name("EXP"),
        (_, MathFunction::Floor) => Name("FLOOR"),
        (_, MathFunction::Log) => Name("LN"),
        (Dialect::Oracle, MathFunction::Log10) => LogBase10,
        (_, MathFunction::Log10) => Name("LOG10"),
        (_, MathFunction::Mod) => Name("MOD"),
        (Dialect::Oracle, MathFunction::Pi) => Constant(PI),
        (_, MathFunction::Pi) => Name("PI"),
        (_, MathFunction::Power) => Name("POWER"),
        (Dialect::Oracle, MathFunction::Radians) => Scale(RADIANS_PER_DEGREE),
        (_, MathFunction::Radians) => Name("RADIANS"),
        (_, MathFunction::Sqrt) => Name("SQRT"),
        (Dialect::Oracle | Dialect::Sqlite, MathFunction::Rand) => Unsupported,
        (Dialect::Postgresql, MathFunction::Rand) => Name("RANDOM"),
        (Dialect::Mysql, MathFunction::Rand) => Name("RAND"),
        (_, MathFunction::Round) => Name("ROUND"),
        (Dialect::Oracle | Dialect::Postgresql, MathFunction::Truncate) => Name("TRUNC"),
        (Dialect::Sqlite, MathFunction::Truncate) => Unsupported,
        (Dialect::Mysql, MathFunction::Truncate) => Name("TRUNCATE"),
        (_, MathFunction::Sin) => Name("SIN"),
        (_, MathFunction::Cos) => Name("COS"),
        (_, MathFunction::Tan) => Name("TAN"),
        (Dialect::Oracle | Dialect::Sqlite, MathFunction::Cot) => Unsupported,
        (_, MathFunction::Cot) => Name("COT"),
        (_, MathFunction::Asin) => Name("ASIN"),
        (_, MathFunction::Acos) => Name("ACOS"),
        (_, MathFunction::Atan) => Name("ATAN"),
        (_, MathFunction::Atan2) => Name("ATAN2"),
    }
}

/// The ADQL name of a math function, for messages.
pub fn adql_name(function: MathFunction) -> &'static str {
    match function {
        MathFunction::Abs => "ABS",
        MathFunction::Ceiling => "CEILING",
        MathFunction::Degrees => "DEGREES",
        MathFunction::Exp => "EXP",
        MathFunction::Floor => "FLOOR",
        MathFunction::Log => "LOG",
        MathFunction::Log10 => "LOG10",
        MathFunction::Mod => "MOD",
        MathFunction::Pi => "PI",
        MathFunction::Power => "POWER",
        MathFunction::Radians => "RADIANS",
        MathFunction::Sqrt => "SQRT",
        MathFunction::Rand => "RAND",
        MathFunction::Round => "ROUND",
        MathFunction::Truncate => "TRUNCATE",
        MathFunction::Sin => "SIN",
        MathFunction::Cos => "COS",
        MathFunction::Tan => "TAN",
        MathFunction::Cot => "COT",
        MathFunction::Asin => "ASIN",
        MathFunction::Acos => "ACOS",
        MathFunction::Atan => "ATAN",
        MathFunction::Atan2 => "ATAN2",
    }
}
