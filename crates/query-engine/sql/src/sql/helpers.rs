//! Helpers for building sql::ast types in certain shapes and patterns.

use super::ast::*;

// Empty clauses //

/// An empty `WHERE` clause.
pub fn empty_where() -> Expression {
    true_expr()
}

/// An empty `GROUP BY` clause.
pub fn empty_group_by() -> GroupBy {
    GroupBy { elements: vec![] }
}

/// An empty `ORDER BY` clause.
pub fn empty_order_by() -> OrderBy {
    OrderBy { elements: vec![] }
}

/// Empty `LIMIT` and `OFFSET` clauses.
pub fn empty_limit() -> Limit {
    Limit {
        limit: None,
        offset: None,
    }
}

/// A `true` expression.
pub fn true_expr() -> Expression {
    Expression::Value(Value::Bool(true))
}

/// A `false` expression.
pub fn false_expr() -> Expression {
    Expression::Value(Value::Bool(false))
}

// Names //

/// A regular (undelimited) identifier.
pub fn make_identifier(name: &str) -> Identifier {
    Identifier {
        name: name.to_string(),
        delimited: false,
    }
}

/// An identifier for a name taken from configuration rather than from a query. A name
/// that is not a regular identifier, or mixes upper and lower case, can only have been
/// created delimited, so it is written that way.
pub fn configured_identifier(name: &str) -> Identifier {
    let mut chars = name.chars();
    let regular = chars
        .next()
        .is_some_and(|first| first.is_ascii_alphabetic() || first == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_');
    let mixed_case = name.chars().any(|c| c.is_ascii_uppercase())
        && name.chars().any(|c| c.is_ascii_lowercase());
    Identifier {
        name: name.to_string(),
        delimited: !regular || mixed_case,
    }
}

/// Create column aliases using this function so we build everything in one place.
pub fn make_column_alias(name: &str) -> ColumnAlias {
    ColumnAlias {
        name: make_identifier(name),
    }
}

/// Create table aliases using this function so we build everything in one place.
pub fn make_table_alias(name: &str) -> TableAlias {
    TableAlias {
        name: make_identifier(name),
    }
}

/// A table reference, optionally schema qualified.
pub fn make_table_reference(schema: Option<&str>, table: &str) -> TableReference {
    TableReference {
        schema: schema.map(|schema| SchemaName(make_identifier(schema))),
        table: TableName(make_identifier(table)),
    }
}

/// Generate a column expression, optionally qualified by a table.
pub fn make_column(table: Option<TableReference>, name: &str) -> Expression {
    Expression::ColumnReference(ColumnReference {
        table,
        name: ColumnName(make_identifier(name)),
    })
}

/// A column named in configuration, optionally qualified by a table.
pub fn make_configured_column(table: Option<TableReference>, name: &str) -> Expression {
    Expression::ColumnReference(ColumnReference {
        table,
        name: ColumnName(configured_identifier(name)),
    })
}

// Values //

/// A numeric literal from a float. Rust prints the shortest representation that reads
/// back to the same value and never uses an exponent, which every dialect accepts.
pub fn numeric(value: f64) -> Expression {
    Expression::Value(Value::Numeric(format!("{value}")))
}

/// A numeric literal from an integer.
pub fn integer(value: i64) -> Expression {
    Expression::Value(Value::Numeric(value.to_string()))
}

/// A numeric literal from text that is already a valid number, such as an encoded index id.
pub fn numeric_text(text: String) -> Expression {
    Expression::Value(Value::Numeric(text))
}

/// A string literal.
pub fn string(value: &str) -> Expression {
    Expression::Value(Value::String(value.to_string()))
}

// Operations //

pub fn binary(left: Expression, operator: BinaryOperator, right: Expression) -> Expression {
    Expression::BinaryOperation {
        left: Box::new(left),
        operator,
        right: Box::new(right),
    }
}

pub fn math(function: MathFunction, args: Vec<Expression>) -> Expression {
    Expression::FunctionCall {
        function: Function::Math(function),
        args,
    }
}

pub fn and(left: Expression, right: Expression) -> Expression {
    Expression::And {
        left: Box::new(left),
        right: Box::new(right),
    }
}

pub fn or(left: Expression, right: Expression) -> Expression {
    Expression::Or {
        left: Box::new(left),
        right: Box::new(right),
    }
}

pub fn not(expression: Expression) -> Expression {
    Expression::Not(Box::new(expression))
}

/// Fold expressions into a left-nested chain of ANDs. An empty input is `true`.
pub fn conjunction(expressions: impl IntoIterator<Item = Expression>) -> Expression {
    expressions
        .into_iter()
        .reduce(and)
        .unwrap_or_else(true_expr)
}

/// Fold expressions into a left-nested chain of ORs. An empty input is `false`.
pub fn disjunction(expressions: impl IntoIterator<Item = Expression>) -> Expression {
    expressions
        .into_iter()
        .reduce(or)
        .unwrap_or_else(false_expr)
}

/// `CASE WHEN condition THEN 1 ELSE 0 END`, for predicates used as values.
pub fn predicate_to_integer(condition: Expression) -> Expression {
    Expression::Case {
        branches: vec![(condition, integer(1))],
        else_: Some(Box::new(integer(0))),
    }
}

/// Whether an expression is a truth value rather than a number, string or null.
pub fn is_condition(expression: &Expression) -> bool {
    match expression {
        Expression::And { .. }
        | Expression::Or { .. }
        | Expression::Not(_)
        | Expression::BinaryArrayOperation { .. }
        | Expression::InSubquery { .. }
        | Expression::Between { .. }
        | Expression::Exists { .. } => true,
        Expression::BinaryOperation { operator, .. } => !matches!(
            operator,
            BinaryOperator::Plus
                | BinaryOperator::Minus
                | BinaryOperator::Multiply
                | BinaryOperator::Divide
                | BinaryOperator::Modulo
                | BinaryOperator::Concatenate
        ),
        Expression::UnaryOperation { operator, .. } => {
            !matches!(operator, UnaryOperator::Negate)
        }
        _ => false,
    }
}

/// The numeric value of an expression built only from numeric literals, arithmetic and
/// `PI()`, if it is one.
pub fn constant_value(expression: &Expression) -> Option<f64> {
    match expression {
        Expression::Value(Value::Numeric(text)) => text.parse().ok(),
        Expression::UnaryOperation {
            expression,
            operator: UnaryOperator::Negate,
        } => constant_value(expression).map(|value| -value),
        Expression::BinaryOperation {
            left,
            operator,
            right,
        } => {
            let (left, right) = (constant_value(left)?, constant_value(right)?);
            match operator {
                BinaryOperator::Plus => Some(left + right),
                BinaryOperator::Minus => Some(left - right),
                BinaryOperator::Multiply => Some(left * right),
                BinaryOperator::Divide if right != 0.0 => Some(left / right),
                _ => None,
            }
        }
        Expression::FunctionCall {
            function: Function::Math(MathFunction::Pi),
            args,
        } if args.is_empty() => Some(std::f64::consts::PI),
        _ => None,
    }
}

// SELECTs //

/// Build a simple select with a select list and the rest are empty.
pub fn simple_select(select_list: Vec<SelectItem>) -> Select {
    Select {
        quantifier: None,
        select_list: SelectList::SelectList(select_list),
        from: None,
        joins: vec![],
        where_: Where(empty_where()),
        group_by: empty_group_by(),
        having: None,
        order_by: empty_order_by(),
        limit: empty_limit(),
    }
}

/// Build a simple select *
pub fn star_select(from: From) -> Select {
    Select {
        quantifier: None,
        select_list: SelectList::SelectStar,
        from: Some(from),
        joins: vec![],
        where_: Where(empty_where()),
        group_by: empty_group_by(),
        having: None,
        order_by: empty_order_by(),
        limit: empty_limit(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configured_names_are_delimited_when_they_must_be() {
        for (name, delimited) in [
            ("HTM20", false),
            ("htm20", false),
            ("x_unit", false),
            ("HtmId", true),
            ("cart x", true),
            ("20htm", true),
            ("", true),
        ] {
            assert_eq!(configured_identifier(name).delimited, delimited, "{name}");
        }
    }

    #[test]
    fn folds_constant_arithmetic() {
        let expression = binary(
            numeric_text("5.".to_string()),
            BinaryOperator::Divide,
            numeric_text("60.".to_string()),
        );
        assert_eq!(constant_value(&expression), Some(5.0 / 60.0));
    }

    #[test]
    fn columns_are_not_constant() {
        let expression = binary(make_column(None, "ra"), BinaryOperator::Plus, integer(1));
        assert_eq!(constant_value(&expression), None);
    }

    #[test]
    fn empty_junctions_are_neutral() {
        assert_eq!(conjunction(vec![]), true_expr());
        assert_eq!(disjunction(vec![]), false_expr());
    }

    #[test]
    fn junctions_nest_to_the_left() {
        let (a, b, c) = (
            make_column(None, "a"),
            make_column(None, "b"),
            make_column(None, "c"),
        );
        assert_eq!(
            conjunction(vec![a.clone(), b.clone(), c.clone()]),
            and(and(a, b), c)
        );
    }
}
