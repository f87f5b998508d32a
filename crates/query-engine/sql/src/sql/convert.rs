//! Convert a SQL AST to a low-level SQL string.

use query_engine_metadata::metadata::Dialect;

use super::ast::*;
use super::dialect::{self, CaseInsensitiveLike, Concatenation, FunctionMapping, Modulo, RowLimit};
use super::error::Error;
use super::helpers;
use super::string::SQL;

/// Convert a SELECT statement into SQL for the given dialect.
pub fn select_to_sql(select: &Select, dialect: Dialect) -> Result<SQL, Error> {
    let mut sql = SQL::new(dialect);
    select.to_sql(&mut sql)?;
    Ok(sql)
}

fn unsupported<T>(sql: &SQL, construct: impl Into<String>) -> Result<T, Error> {
    Err(Error::UnsupportedConstruct {
        construct: construct.into(),
        dialect: sql.dialect,
    })
}

/// Write a comma separated list.
fn comma_separated<T>(
    sql: &mut SQL,
    items: &[T],
    mut write: impl FnMut(&T, &mut SQL) -> Result<(), Error>,
) -> Result<(), Error> {
    for (index, item) in items.iter().enumerate() {
        write(item, sql)?;
        if index < (items.len() - 1) {
            sql.append_syntax(", ");
        }
    }
    Ok(())
}

// Convert to SQL strings

impl Select {
    pub fn to_sql(&self, sql: &mut SQL) -> Result<(), Error> {
        sql.append_syntax("SELECT ");

        match self.quantifier {
            Some(SetQuantifier::All) => sql.append_syntax("ALL "),
            Some(SetQuantifier::Distinct) => sql.append_syntax("DISTINCT "),
            None => (),
        }

        match &self.select_list {
            SelectList::SelectList(items)
                if items.len() > 1
                    && items.iter().any(|item| matches!(item, SelectItem::Star))
                    && !dialect::profile(sql.dialect).bare_star_with_items =>
            {
                let qualifiers = self.star_qualifiers(sql)?;
                let items = items
                    .iter()
                    .flat_map(|item| match item {
                        SelectItem::Star => qualifiers
                            .iter()
                            .map(|table| SelectItem::StarFrom(table.clone()))
                            .collect::<Vec<_>>(),
                        item => vec![item.clone()],
                    })
                    .collect::<Vec<_>>();
                comma_separated(sql, &items, SelectItem::to_sql)?;
            }
            select_list => select_list.to_sql(sql)?,
        }

        if let Some(from) = &self.from {
            sql.append_syntax(" FROM ");
            from.to_sql(sql)?;
        }

        for join in &self.joins {
            join.to_sql(sql)?;
        }

        self.where_.to_sql(sql)?;

        self.group_by.to_sql(sql)?;

        if let Some(having) = &self.having {
            sql.append_syntax(" HAVING ");
            having.to_sql(sql)?;
        }

        self.order_by.to_sql(sql)?;

        self.limit.to_sql(sql);

        Ok(())
    }
}

impl Select {
    /// The tables a `*` covers, in the order their columns appear.
    fn star_qualifiers(&self, sql: &SQL) -> Result<Vec<TableReference>, Error> {
        let Some(from) = &self.from else {
            return unsupported(sql, "`*` next to other select items without a FROM clause");
        };
        if self.joins.iter().any(|join| {
            join.natural || matches!(join.constraint, Some(JoinConstraint::Using(_)))
        }) {
            return unsupported(sql, "`*` next to other select items over a NATURAL or USING join");
        }
        Ok(std::iter::once(from)
            .chain(self.joins.iter().map(|join| &join.from))
            .map(From::qualifier)
            .collect())
    }
}

impl From {
    /// How columns of this table are qualified in the rest of the query.
    fn qualifier(&self) -> TableReference {
        match self {
            From::Table {
                alias: Some(alias), ..
            }
            | From::Select { alias, .. } => TableReference {
                schema: None,
                table: TableName(alias.name.clone()),
            },
            From::Table {
                reference,
                alias: None,
            } => reference.clone(),
        }
    }
}

impl SelectList {
    pub fn to_sql(&self, sql: &mut SQL) -> Result<(), Error> {
        match self {
            SelectList::SelectList(select_list) => {
                comma_separated(sql, select_list, SelectItem::to_sql)
            }
            SelectList::SelectStar => {
                sql.append_syntax("*");
                Ok(())
            }
        }
    }
}

impl SelectItem {
    pub fn to_sql(&self, sql: &mut SQL) -> Result<(), Error> {
        match self {
            SelectItem::Star => sql.append_syntax("*"),
            SelectItem::StarFrom(table) => {
                table.to_sql(sql);
                sql.append_syntax(".*");
            }
            SelectItem::Expression { expression, alias } => {
                if !dialect::profile(sql.dialect).boolean_literals
                    && helpers::is_condition(expression)
                {
                    helpers::predicate_to_integer(expression.clone()).to_sql(sql)?;
                } else {
                    expression.to_sql(sql)?;
                }
                if let Some(alias) = alias {
                    sql.append_syntax(" AS ");
                    alias.to_sql(sql);
                }
            }
        }
        Ok(())
    }
}

impl From {
    pub fn to_sql(&self, sql: &mut SQL) -> Result<(), Error> {
        match &self {
            From::Table { reference, alias } => {
                reference.to_sql(sql);
                if let Some(alias) = alias {
                    alias.to_sql(sql);
                }
            }
            From::Select { select, alias } => {
                sql.append_syntax("(");
                select.to_sql(sql)?;
                sql.append_syntax(")");
                alias.to_sql(sql);
            }
        }
        Ok(())
    }
}

impl Join {
    pub fn to_sql(&self, sql: &mut SQL) -> Result<(), Error> {
        let natural = if self.natural { "NATURAL " } else { "" };
        match self.kind {
            JoinKind::Comma => sql.append_syntax(", "),
            JoinKind::Cross => sql.append_syntax(" CROSS JOIN "),
            JoinKind::Inner => sql.append_syntax(&format!(" {natural}INNER JOIN ")),
            JoinKind::LeftOuter => sql.append_syntax(&format!(" {natural}LEFT OUTER JOIN ")),
            JoinKind::RightOuter => sql.append_syntax(&format!(" {natural}RIGHT OUTER JOIN ")),
            JoinKind::FullOuter => sql.append_syntax(&format!(" {natural}FULL OUTER JOIN ")),
        }
        self.from.to_sql(sql)?;
        match &self.constraint {
            None => (),
            Some(JoinConstraint::On(expression)) => {
                sql.append_syntax(" ON ");
                expression.to_sql(sql)?;
            }
            Some(JoinConstraint::Using(columns)) => {
                sql.append_syntax(" USING (");
                comma_separated(sql, columns, |column, sql| {
                    column.to_sql(sql);
                    Ok(())
                })?;
                sql.append_syntax(")");
            }
        }
        Ok(())
    }
}

impl Where {
    pub fn to_sql(&self, sql: &mut SQL) -> Result<(), Error> {
        let Where(expression) = self;
        if *expression != helpers::true_expr() {
            sql.append_syntax(" WHERE ");
            expression.to_sql(sql)?;
        }
        Ok(())
    }
}

impl GroupBy {
    pub fn to_sql(&self, sql: &mut SQL) -> Result<(), Error> {
        if !self.elements.is_empty() {
            sql.append_syntax(" GROUP BY ");
            comma_separated(sql, &self.elements, Expression::to_sql)?;
        }
        Ok(())
    }
}

impl OrderBy {
    pub fn to_sql(&self, sql: &mut SQL) -> Result<(), Error> {
        if !self.elements.is_empty() {
            sql.append_syntax(" ORDER BY ");
            comma_separated(sql, &self.elements, OrderByElement::to_sql)?;
        }
        Ok(())
    }
}

impl OrderByElement {
    pub fn to_sql(&self, sql: &mut SQL) -> Result<(), Error> {
        self.target.to_sql(sql)?;
        match self.direction {
            OrderByDirection::Asc => sql.append_syntax(" ASC"),
            OrderByDirection::Desc => sql.append_syntax(" DESC"),
        }
        Ok(())
    }
}

impl Limit {
    pub fn to_sql(&self, sql: &mut SQL) {
        match dialect::profile(sql.dialect).row_limit {
            RowLimit::LimitOffset { unbounded } => {
                match (self.limit, self.offset, unbounded) {
                    (Some(limit), _, _) => sql.append_syntax(&format!(" LIMIT {limit}")),
                    (None, Some(_), Some(unbounded)) => {
                        sql.append_syntax(&format!(" LIMIT {unbounded}"));
                    }
                    _ => (),
                }
                if let Some(offset) = self.offset {
                    sql.append_syntax(&format!(" OFFSET {offset}"));
                }
            }
            RowLimit::FetchFirst => {
                if let Some(offset) = self.offset {
                    sql.append_syntax(&format!(" OFFSET {offset} ROWS"));
                }
                if let Some(limit) = self.limit {
                    sql.append_syntax(&format!(" FETCH FIRST {limit} ROWS ONLY"));
                }
            }
        }
    }
}

// scalars
impl Expression {
    pub fn to_sql(&self, sql: &mut SQL) -> Result<(), Error> {
        match &self {
            Expression::ColumnReference(column_reference) => column_reference.to_sql(sql),
            Expression::Value(value) => value.to_sql(sql)?,
            Expression::And { left, right } => {
                sql.append_syntax("(");
                left.to_sql(sql)?;
                sql.append_syntax(" AND ");
                right.to_sql(sql)?;
                sql.append_syntax(")");
            }
            Expression::Or { left, right } => {
                sql.append_syntax("(");
                left.to_sql(sql)?;
                sql.append_syntax(" OR ");
                right.to_sql(sql)?;
                sql.append_syntax(")");
            }
            Expression::Not(expr) => {
                sql.append_syntax("(NOT ");
                expr.to_sql(sql)?;
                sql.append_syntax(")");
            }
            Expression::BinaryOperation {
                left,
                operator,
                right,
            } => binary_operation_to_sql(sql, left, *operator, right)?,
            Expression::BinaryArrayOperation {
                left,
                operator,
                right,
            } => {
                sql.append_syntax("(");
                left.to_sql(sql)?;
                operator.to_sql(sql);
                sql.append_syntax("(");
                comma_separated(sql, right, Expression::to_sql)?;
                sql.append_syntax("))");
            }
            Expression::InSubquery {
                expression,
                negated,
                select,
            } => {
                sql.append_syntax("(");
                expression.to_sql(sql)?;
                sql.append_syntax(if *negated { " NOT IN (" } else { " IN (" });
                select.to_sql(sql)?;
                sql.append_syntax("))");
            }
            Expression::Between {
                expression,
                negated,
                low,
                high,
            } => {
                sql.append_syntax("(");
                expression.to_sql(sql)?;
                sql.append_syntax(if *negated {
                    " NOT BETWEEN "
                } else {
                    " BETWEEN "
                });
                low.to_sql(sql)?;
                sql.append_syntax(" AND ");
                high.to_sql(sql)?;
                sql.append_syntax(")");
            }
            Expression::UnaryOperation {
                expression,
                operator,
            } => match operator {
                UnaryOperator::IsNull => {
                    sql.append_syntax("(");
                    expression.to_sql(sql)?;
                    sql.append_syntax(" IS NULL)");
                }
                UnaryOperator::IsNotNull => {
                    sql.append_syntax("(");
                    expression.to_sql(sql)?;
                    sql.append_syntax(" IS NOT NULL)");
                }
                UnaryOperator::Negate => {
                    sql.append_syntax("-(");
                    expression.to_sql(sql)?;
                    sql.append_syntax(")");
                }
            },
            Expression::FunctionCall { function, args } => function_to_sql(sql, function, args)?,
            Expression::Aggregate {
                function,
                quantifier,
                argument,
            } => {
                function.to_sql(sql);
                sql.append_syntax("(");
                match quantifier {
                    Some(SetQuantifier::All) => sql.append_syntax("ALL "),
                    Some(SetQuantifier::Distinct) => sql.append_syntax("DISTINCT "),
                    None => (),
                }
                match argument {
                    None => sql.append_syntax("*"),
                    Some(argument) => argument.to_sql(sql)?,
                }
                sql.append_syntax(")");
            }
            Expression::Case { branches, else_ } => {
                sql.append_syntax("CASE");
                for (condition, result) in branches {
                    sql.append_syntax(" WHEN ");
                    condition.to_sql(sql)?;
                    sql.append_syntax(" THEN ");
                    result.to_sql(sql)?;
                }
                if let Some(else_) = else_ {
                    sql.append_syntax(" ELSE ");
                    else_.to_sql(sql)?;
                }
                sql.append_syntax(" END");
            }
            Expression::Exists { select } => {
                sql.append_syntax("EXISTS (");
                select.to_sql(sql)?;
                sql.append_syntax(")");
            }
        }
        Ok(())
    }
}

fn binary_operation_to_sql(
    sql: &mut SQL,
    left: &Expression,
    operator: BinaryOperator,
    right: &Expression,
) -> Result<(), Error> {
    let profile = dialect::profile(sql.dialect);
    let function_form = match operator {
        BinaryOperator::Concatenate if profile.concatenation == Concatenation::Function => {
            Some("CONCAT(")
        }
        BinaryOperator::Modulo if profile.modulo == Modulo::Function => Some("MOD("),
        _ => None,
    };
    if let Some(function) = function_form {
        sql.append_syntax(function);
        left.to_sql(sql)?;
        sql.append_syntax(", ");
        right.to_sql(sql)?;
        sql.append_syntax(")");
        return Ok(());
    }

    let case_insensitive = matches!(
        operator,
        BinaryOperator::CaseInsensitiveLike | BinaryOperator::NotCaseInsensitiveLike
    );
    if case_insensitive && profile.case_insensitive_like == CaseInsensitiveLike::UpperLike {
        sql.append_syntax("(UPPER(");
        left.to_sql(sql)?;
        sql.append_syntax(")");
        sql.append_syntax(if operator == BinaryOperator::CaseInsensitiveLike {
            " LIKE "
        } else {
            " NOT LIKE "
        });
        sql.append_syntax("UPPER(");
        right.to_sql(sql)?;
        sql.append_syntax("))");
        return Ok(());
    }

    sql.append_syntax("(");
    left.to_sql(sql)?;
    operator.to_sql(sql);
    right.to_sql(sql)?;
    sql.append_syntax(")");
    Ok(())
}

fn function_to_sql(sql: &mut SQL, function: &Function, args: &[Expression]) -> Result<(), Error> {
    let name = match function {
        Function::Math(math) => match dialect::function_mapping(sql.dialect, *math) {
            FunctionMapping::Name(name) => name,
            FunctionMapping::Scale(factor) => {
                let [argument] = args else {
                    return unsupported(
                        sql,
                        format!("{} with {} arguments", dialect::adql_name(*math), args.len()),
                    );
                };
                sql.append_syntax("(");
                argument.to_sql(sql)?;
                sql.append_syntax(" * ");
                sql.append_syntax(factor);
                sql.append_syntax(")");
                return Ok(());
            }
            FunctionMapping::Constant(constant) => {
                sql.append_syntax(constant);
                return Ok(());
            }
            FunctionMapping::LogBase10 => {
                sql.append_syntax("LOG(10, ");
                comma_separated(sql, args, Expression::to_sql)?;
                sql.append_syntax(")");
                return Ok(());
            }
            FunctionMapping::Unsupported => {
                return unsupported(
                    sql,
                    format!("the {} function", dialect::adql_name(*math)),
                )
            }
        },
        Function::Lower => "LOWER",
        Function::Upper => "UPPER",
        Function::Coalesce => "COALESCE",
        Function::Geometry(geometry) => {
            return unsupported(sql, format!("the geometry function {}", geometry.name()))
        }
        Function::Unknown(name) => name.as_str(),
    };
    sql.append_syntax(name);
    sql.append_syntax("(");
    comma_separated(sql, args, Expression::to_sql)?;
    sql.append_syntax(")");
    Ok(())
}

impl BinaryOperator {
    pub fn to_sql(&self, sql: &mut SQL) {
        match self {
            BinaryOperator::Equals => sql.append_syntax(" = "),
            BinaryOperator::NotEquals => sql.append_syntax(" <> "),
            BinaryOperator::GreaterThan => sql.append_syntax(" > "),
            BinaryOperator::GreaterThanOrEqualTo => sql.append_syntax(" >= "),
            BinaryOperator::LessThan => sql.append_syntax(" < "),
            BinaryOperator::LessThanOrEqualTo => sql.append_syntax(" <= "),
            BinaryOperator::Like => sql.append_syntax(" LIKE "),
            BinaryOperator::NotLike => sql.append_syntax(" NOT LIKE "),
            BinaryOperator::CaseInsensitiveLike => {
                match dialect::profile(sql.dialect).case_insensitive_like {
                    CaseInsensitiveLike::Native => sql.append_syntax(" ILIKE "),
                    _ => sql.append_syntax(" LIKE "),
                }
            }
            BinaryOperator::NotCaseInsensitiveLike => {
                match dialect::profile(sql.dialect).case_insensitive_like {
                    CaseInsensitiveLike::Native => sql.append_syntax(" NOT ILIKE "),
                    _ => sql.append_syntax(" NOT LIKE "),
                }
            }
            BinaryOperator::Plus => sql.append_syntax(" + "),
            BinaryOperator::Minus => sql.append_syntax(" - "),
            BinaryOperator::Multiply => sql.append_syntax(" * "),
            BinaryOperator::Divide => sql.append_syntax(" / "),
            BinaryOperator::Modulo => sql.append_syntax(" % "),
            BinaryOperator::Concatenate => sql.append_syntax(" || "),
        }
    }
}

impl BinaryArrayOperator {
    pub fn to_sql(&self, sql: &mut SQL) {
        match self {
            BinaryArrayOperator::In => sql.append_syntax(" IN "),
            BinaryArrayOperator::NotIn => sql.append_syntax(" NOT IN "),
        }
    }
}

impl AggregateFunction {
    pub fn to_sql(&self, sql: &mut SQL) {
        match self {
            AggregateFunction::Count => sql.append_syntax("COUNT"),
            AggregateFunction::Sum => sql.append_syntax("SUM"),
            AggregateFunction::Avg => sql.append_syntax("AVG"),
            AggregateFunction::Min => sql.append_syntax("MIN"),
            AggregateFunction::Max => sql.append_syntax("MAX"),
        }
    }
}

impl Value {
    pub fn to_sql(&self, sql: &mut SQL) -> Result<(), Error> {
        match &self {
            Value::Numeric(n) => sql.append_syntax(n),
            Value::String(s) => sql.append_string_literal(s),
            Value::Bool(b) => {
                if !dialect::profile(sql.dialect).boolean_literals {
                    return unsupported(sql, "a boolean literal");
                }
                sql.append_syntax(if *b { "TRUE" } else { "FALSE" });
            }
            Value::Null => sql.append_syntax("NULL"),
        }
        Ok(())
    }
}

// names
impl TableReference {
    pub fn to_sql(&self, sql: &mut SQL) {
        if let Some(SchemaName(schema)) = &self.schema {
            sql.append_identifier(schema);
            sql.append_syntax(".");
        }
        let TableName(table) = &self.table;
        sql.append_identifier(table);
    }
}

impl TableAlias {
    pub fn to_sql(&self, sql: &mut SQL) {
        if dialect::profile(sql.dialect).table_alias_keyword {
            sql.append_syntax(" AS ");
        } else {
            sql.append_syntax(" ");
        }
        sql.append_identifier(&self.name);
    }
}

impl ColumnReference {
    pub fn to_sql(&self, sql: &mut SQL) {
        if let Some(table) = &self.table {
            table.to_sql(sql);
            sql.append_syntax(".");
        }
        self.name.to_sql(sql);
    }
}

impl ColumnName {
    pub fn to_sql(&self, sql: &mut SQL) {
        let ColumnName(name) = self;
        sql.append_identifier(name);
    }
}

impl ColumnAlias {
    pub fn to_sql(&self, sql: &mut SQL) {
        sql.append_identifier(&self.name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sql::helpers::*;

    fn bamba_select() -> Select {
        let mut select = simple_select(vec![SelectItem::Expression {
            expression: make_column(Some(make_table_reference(None, "bamba")), "x"),
            alias: Some(make_column_alias("x")),
        }]);
        select.from = Some(From::Table {
            reference: make_table_reference(Some("public"), "bamba"),
            alias: Some(make_table_alias("bamba")),
        });
        select
    }

    #[test]
    fn it_converts_simple_select() {
        let sql = select_to_sql(&bamba_select(), Dialect::Postgresql).unwrap();
        similar_asserts::assert_eq!(
            sql.sql,
            "SELECT bamba.x AS x FROM public.bamba AS bamba".to_string()
        );
    }

    #[test]
    fn oracle_drops_as_before_table_aliases() {
        let sql = select_to_sql(&bamba_select(), Dialect::Oracle).unwrap();
        similar_asserts::assert_eq!(sql.sql, "SELECT bamba.x AS x FROM public.bamba bamba");
    }

    #[test]
    fn quotes_delimited_identifiers_per_dialect() {
        let column = Expression::ColumnReference(ColumnReference {
            table: None,
            name: ColumnName(Identifier {
                name: "Mixed\"Case".to_string(),
                delimited: true,
            }),
        });
        let mut postgres = SQL::new(Dialect::Postgresql);
        column.to_sql(&mut postgres).unwrap();
        assert_eq!(postgres.sql, "\"Mixed\"\"Case\"");

        let mut mysql = SQL::new(Dialect::Mysql);
        column.to_sql(&mut mysql).unwrap();
        assert_eq!(mysql.sql, "`Mixed\"Case`");
    }

    #[test]
    fn limits_per_dialect() {
        let mut select = star_select(From::Table {
            reference: make_table_reference(None, "t"),
            alias: None,
        });
        select.limit = Limit {
            limit: Some(10),
            offset: Some(20),
        };
        let emit = |select: &Select, dialect| select_to_sql(select, dialect).unwrap().sql;
        insta::assert_snapshot!(emit(&select, Dialect::Postgresql), @"SELECT * FROM t LIMIT 10 OFFSET 20");
        insta::assert_snapshot!(emit(&select, Dialect::Oracle), @"SELECT * FROM t OFFSET 20 ROWS FETCH FIRST 10 ROWS ONLY");

        select.limit.limit = None;
        insta::assert_snapshot!(emit(&select, Dialect::Sqlite), @"SELECT * FROM t LIMIT -1 OFFSET 20");
        insta::assert_snapshot!(emit(&select, Dialect::Postgresql), @"SELECT * FROM t OFFSET 20");
    }

    #[test]
    fn rewrites_functions_missing_from_oracle() {
        let expression = math(MathFunction::Radians, vec![make_column(None, "dec")]);
        let mut sql = SQL::new(Dialect::Oracle);
        expression.to_sql(&mut sql).unwrap();
        assert_eq!(sql.sql, "(dec * 0.017453292519943295)");

        let expression = math(MathFunction::Log10, vec![make_column(None, "flux")]);
        let mut sql = SQL::new(Dialect::Oracle);
        expression.to_sql(&mut sql).unwrap();
        assert_eq!(sql.sql, "LOG(10, flux)");
    }

    #[test]
    fn concatenation_and_modulo_per_dialect() {
        let concat = binary(string("a"), BinaryOperator::Concatenate, string("b"));
        let modulo = binary(integer(7), BinaryOperator::Modulo, integer(2));
        let emit = |expression: &Expression, dialect| {
            let mut sql = SQL::new(dialect);
            expression.to_sql(&mut sql).unwrap();
            sql.sql
        };
        assert_eq!(emit(&concat, Dialect::Postgresql), "('a' || 'b')");
        assert_eq!(emit(&concat, Dialect::Mysql), "CONCAT('a', 'b')");
        assert_eq!(emit(&modulo, Dialect::Sqlite), "(7 % 2)");
        assert_eq!(emit(&modulo, Dialect::Oracle), "MOD(7, 2)");
    }

    #[test]
    fn case_insensitive_like_per_dialect() {
        let ilike = binary(
            make_column(None, "name"),
            BinaryOperator::CaseInsensitiveLike,
            string("m3%"),
        );
        let emit = |dialect| {
            let mut sql = SQL::new(dialect);
            ilike.to_sql(&mut sql).unwrap();
            sql.sql
        };
        assert_eq!(emit(Dialect::Postgresql), "(name ILIKE 'm3%')");
        assert_eq!(emit(Dialect::Sqlite), "(name LIKE 'm3%')");
        assert_eq!(emit(Dialect::Oracle), "(UPPER(name) LIKE UPPER('m3%'))");
    }

    #[test]
    fn escapes_string_literals() {
        let mut sql = SQL::new(Dialect::Postgresql);
        string("it's").to_sql(&mut sql).unwrap();
        assert_eq!(sql.sql, "'it''s'");
    }

    #[test]
    fn refuses_constructs_the_dialect_lacks() {
        let mut sql = SQL::new(Dialect::Oracle);
        let err = true_expr().to_sql(&mut sql).unwrap_err();
        assert_eq!(
            err.to_string(),
            "a boolean literal is not supported by the oracle dialect"
        );

        let mut sql = SQL::new(Dialect::Sqlite);
        let err = math(MathFunction::Truncate, vec![numeric(1.5), integer(0)])
            .to_sql(&mut sql)
            .unwrap_err();
        assert_eq!(
            err,
            Error::UnsupportedConstruct {
                construct: "the TRUNCATE function".to_string(),
                dialect: Dialect::Sqlite,
            }
        );
    }

    fn star_and_distance() -> Select {
        let mut select = simple_select(vec![
            SelectItem::Star,
            SelectItem::Expression {
                expression: make_column(None, "ang_sep"),
                alias: None,
            },
        ]);
        select.from = Some(From::Table {
            reference: make_table_reference(Some("gaiadr3"), "gaia_source"),
            alias: None,
        });
        select
    }

    #[test]
    fn qualifies_a_star_next_to_other_items_for_oracle() {
        let emit = |select: &Select, dialect| select_to_sql(select, dialect).unwrap().sql;
        let mut select = star_and_distance();
        insta::assert_snapshot!(emit(&select, Dialect::Postgresql), @"SELECT *, ang_sep FROM gaiadr3.gaia_source");
        insta::assert_snapshot!(emit(&select, Dialect::Oracle), @"SELECT gaiadr3.gaia_source.*, ang_sep FROM gaiadr3.gaia_source");

        select.from = Some(From::Table {
            reference: make_table_reference(Some("gaiadr3"), "gaia_source"),
            alias: Some(make_table_alias("g")),
        });
        select.joins = vec![Join {
            kind: JoinKind::Inner,
            natural: false,
            from: From::Table {
                reference: make_table_reference(None, "tmass"),
                alias: None,
            },
            constraint: Some(JoinConstraint::On(binary(
                make_column(Some(make_table_reference(None, "g")), "id"),
                BinaryOperator::Equals,
                make_column(Some(make_table_reference(None, "tmass")), "id"),
            ))),
        }];
        insta::assert_snapshot!(emit(&select, Dialect::Oracle), @"SELECT g.*, tmass.*, ang_sep FROM gaiadr3.gaia_source g INNER JOIN tmass ON (g.id = tmass.id)");
    }

    #[test]
    fn refuses_a_star_next_to_other_items_it_cannot_qualify() {
        let mut select = star_and_distance();
        select.from = None;
        assert!(matches!(
            select_to_sql(&select, Dialect::Oracle),
            Err(Error::UnsupportedConstruct { .. })
        ));

        let mut select = star_and_distance();
        select.joins = vec![Join {
            kind: JoinKind::Inner,
            natural: true,
            from: From::Table {
                reference: make_table_reference(None, "tmass"),
                alias: None,
            },
            constraint: None,
        }];
        let err = select_to_sql(&select, Dialect::Oracle).unwrap_err();
        assert_eq!(
            err.to_string(),
            "`*` next to other select items over a NATURAL or USING join is not supported by the oracle dialect"
        );
        assert!(select_to_sql(&select, Dialect::Postgresql).is_ok());
    }

    #[test]
    fn conditions_in_the_select_list_become_integers_for_oracle() {
        let select = simple_select(vec![SelectItem::Expression {
            expression: binary(make_column(None, "mag"), BinaryOperator::LessThan, integer(20)),
            alias: Some(make_column_alias("bright")),
        }]);
        let emit = |dialect| select_to_sql(&select, dialect).unwrap().sql;
        insta::assert_snapshot!(emit(Dialect::Oracle), @"SELECT CASE WHEN (mag < 20) THEN 1 ELSE 0 END AS bright");
        insta::assert_snapshot!(emit(Dialect::Postgresql), @"SELECT (mag < 20) AS bright");
    }

    #[test]
    fn refuses_unresolved_geometry() {
        let contains = Expression::FunctionCall {
            function: Function::Geometry(GeometryFunction::Contains),
            args: vec![],
        };
        let mut sql = SQL::new(Dialect::Postgresql);
        assert!(matches!(
            contains.to_sql(&mut sql),
            Err(Error::UnsupportedConstruct { .. })
        ));
    }
}
