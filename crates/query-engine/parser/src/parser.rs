//! A recursive-descent parser for ADQL queries with one token of lookahead.

use query_engine_sql::sql::ast::*;
use query_engine_sql::sql::helpers;

use crate::error::{Error, SyntaxError};
use crate::lexer::Lexer;
use crate::token::{Keyword, Token, TokenKind};

/// Parse a single ADQL `SELECT` statement.
pub fn parse(query: &str) -> Result<Select, Error> {
    let mut parser = Parser::new(query)?;
    let select = parser.parse_select()?;
    parser.consume(TokenKind::Semicolon)?;
    if parser.current.kind != TokenKind::Eof {
        return parser.expected("end of query");
    }
    Ok(select)
}

pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
}

impl<'a> Parser<'a> {
    pub fn new(query: &'a str) -> Result<Self, Error> {
        let mut lexer = Lexer::new(query);
        let current = next_token(&mut lexer)?;
        Ok(Parser { lexer, current })
    }

    /// Move to the next token, returning the one we were looking at.
    fn advance(&mut self) -> Result<Token, Error> {
        let next = next_token(&mut self.lexer)?;
        Ok(std::mem::replace(&mut self.current, next))
    }

    fn expected<T>(&self, expected: &str) -> Result<T, Error> {
        Err(SyntaxError {
            expected: expected.to_string(),
            found: self.current.describe(),
            offset: self.current.offset,
        }
        .into())
    }

    fn at_keyword(&self, keyword: Keyword) -> bool {
        self.current.kind == TokenKind::Keyword(keyword)
    }

    /// Consume the keyword if it is next.
    fn parse_keyword(&mut self, keyword: Keyword) -> Result<bool, Error> {
        if self.at_keyword(keyword) {
            self.advance()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    fn expect_keyword(&mut self, keyword: Keyword) -> Result<(), Error> {
        if self.parse_keyword(keyword)? {
            Ok(())
        } else {
            self.expected(keyword.as_str())
        }
    }

    /// Consume the token if it is of this kind.
    fn consume(&mut self, kind: TokenKind) -> Result<bool, Error> {
        if self.current.kind == kind {
            self.advance()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    fn expect(&mut self, kind: TokenKind, expected: &str) -> Result<(), Error> {
        if self.consume(kind)? {
            Ok(())
        } else {
            self.expected(expected)
        }
    }

    fn parse_comma_separated<T>(
        &mut self,
        mut f: impl FnMut(&mut Self) -> Result<T, Error>,
    ) -> Result<Vec<T>, Error> {
        let mut values = vec![f(self)?];
        while self.consume(TokenKind::Comma)? {
            values.push(f(self)?);
        }
        Ok(values)
    }

    fn parse_unsigned_integer(&mut self) -> Result<u64, Error> {
        if self.current.kind == TokenKind::Number {
            if let Ok(value) = self.current.text.parse::<u64>() {
                self.advance()?;
                return Ok(value);
            }
        }
        self.expected("unsigned integer")
    }

    fn parse_identifier(&mut self, expected: &str) -> Result<Identifier, Error> {
        let delimited = match self.current.kind {
            TokenKind::Identifier => false,
            TokenKind::QuotedIdentifier => true,
            _ => return self.expected(expected),
        };
        let token = self.advance()?;
        Ok(Identifier {
            name: token.text,
            delimited,
        })
    }

    fn at_identifier(&self) -> bool {
        matches!(
            self.current.kind,
            TokenKind::Identifier | TokenKind::QuotedIdentifier
        )
    }

    // statements

    pub fn parse_select(&mut self) -> Result<Select, Error> {
        self.expect_keyword(Keyword::Select)?;

        let quantifier = if self.parse_keyword(Keyword::All)? {
            Some(SetQuantifier::All)
        } else if self.parse_keyword(Keyword::Distinct)? {
            Some(SetQuantifier::Distinct)
        } else {
            None
        };

        let top = if self.parse_keyword(Keyword::Top)? {
            Some(self.parse_unsigned_integer()?)
        } else {
            None
        };

        let select_list = self.parse_select_list()?;

        self.expect_keyword(Keyword::From)?;
        let from = self.parse_table_reference()?;
        let joins = self.parse_joins()?;

        let where_ = if self.parse_keyword(Keyword::Where)? {
            self.parse_expression()?
        } else {
            helpers::empty_where()
        };

        let group_by = if self.parse_keyword(Keyword::Group)? {
            self.expect_keyword(Keyword::By)?;
            GroupBy {
                elements: self.parse_comma_separated(Self::parse_expression)?,
            }
        } else {
            helpers::empty_group_by()
        };

        let having = if self.parse_keyword(Keyword::Having)? {
            Some(self.parse_expression()?)
        } else {
            None
        };

        let order_by = if self.parse_keyword(Keyword::Order)? {
            self.expect_keyword(Keyword::By)?;
            OrderBy {
                elements: self.parse_comma_separated(Self::parse_order_by_element)?,
            }
        } else {
            helpers::empty_order_by()
        };

        let mut limit = Limit { limit: top, offset: None };
        if self.at_keyword(Keyword::Limit) {
            if top.is_some() {
                return self.expected("a single row limit, TOP was already given");
            }
            self.advance()?;
            limit.limit = Some(self.parse_unsigned_integer()?);
        }
        if self.parse_keyword(Keyword::Offset)? {
            limit.offset = Some(self.parse_unsigned_integer()?);
        }

        Ok(Select {
            quantifier,
            select_list,
            from: Some(from),
            joins,
            where_: Where(where_),
            group_by,
            having,
            order_by,
            limit,
        })
    }

    fn parse_select_list(&mut self) -> Result<SelectList, Error> {
        if self.current.kind == TokenKind::Asterisk && !self.star_is_followed_by_comma()? {
            self.advance()?;
            return Ok(SelectList::SelectStar);
        }
        if !self.starts_expression() && self.current.kind != TokenKind::Asterisk {
            return self.expected("select list");
        }
        Ok(SelectList::SelectList(
            self.parse_comma_separated(Self::parse_select_item)?,
        ))
    }

    /// `SELECT *, x` is a list of items rather than a bare star.
    fn star_is_followed_by_comma(&self) -> Result<bool, Error> {
        let mut lookahead = self.lexer.clone();
        Ok(next_token(&mut lookahead)?.kind == TokenKind::Comma)
    }

    /// Whether the tokens ahead spell `name(.name)*.*`.
    fn at_qualified_star(&self) -> Result<bool, Error> {
        if !self.at_identifier() {
            return Ok(false);
        }
        let mut lookahead = self.lexer.clone();
        loop {
            if next_token(&mut lookahead)?.kind != TokenKind::Period {
                return Ok(false);
            }
            match next_token(&mut lookahead)?.kind {
                TokenKind::Asterisk => return Ok(true),
                TokenKind::Identifier | TokenKind::QuotedIdentifier => (),
                _ => return Ok(false),
            }
        }
    }

    fn parse_select_item(&mut self) -> Result<SelectItem, Error> {
        if self.consume(TokenKind::Asterisk)? {
            return Ok(SelectItem::Star);
        }
        if self.at_qualified_star()? {
            let table = self.parse_table_name()?;
            self.expect(TokenKind::Period, "'.'")?;
            self.expect(TokenKind::Asterisk, "'*'")?;
            return Ok(SelectItem::StarFrom(table));
        }
        let expression = self.parse_expression()?;
        let alias = self
            .parse_alias()?
            .map(|name| ColumnAlias { name });
        Ok(SelectItem::Expression { expression, alias })
    }

    /// `[AS] name`
    fn parse_alias(&mut self) -> Result<Option<Identifier>, Error> {
        if self.parse_keyword(Keyword::As)? {
            return Ok(Some(self.parse_identifier("alias")?));
        }
        if self.at_identifier() {
            return Ok(Some(self.parse_identifier("alias")?));
        }
        Ok(None)
    }

    /// `[schema.]table`
    fn parse_table_name(&mut self) -> Result<TableReference, Error> {
        let first = self.parse_identifier("table name")?;
        if self.current.kind == TokenKind::Period && !self.at_period_star()? {
            self.advance()?;
            let table = self.parse_identifier("table name")?;
            return Ok(TableReference {
                schema: Some(SchemaName(first)),
                table: TableName(table),
            });
        }
        Ok(TableReference {
            schema: None,
            table: TableName(first),
        })
    }

    fn at_period_star(&self) -> Result<bool, Error> {
        let mut lookahead = self.lexer.clone();
        Ok(next_token(&mut lookahead)?.kind == TokenKind::Asterisk)
    }

    fn parse_table_reference(&mut self) -> Result<From, Error> {
        if self.consume(TokenKind::LeftParen)? {
            let select = self.parse_select()?;
            self.expect(TokenKind::RightParen, "')'")?;
            self.parse_keyword(Keyword::As)?;
            let name = self.parse_identifier("subquery alias")?;
            return Ok(From::Select {
                select: Box::new(select),
                alias: TableAlias { name },
            });
        }
        let reference = self.parse_table_name()?;
        let alias = self.parse_alias()?.map(|name| TableAlias { name });
        Ok(From::Table { reference, alias })
    }

    fn parse_joins(&mut self) -> Result<Vec<Join>, Error> {
        let mut joins = vec![];
        loop {
            if self.consume(TokenKind::Comma)? {
                joins.push(Join {
                    kind: JoinKind::Comma,
                    natural: false,
                    from: self.parse_table_reference()?,
                    constraint: None,
                });
                continue;
            }
            if self.parse_keyword(Keyword::Cross)? {
                self.expect_keyword(Keyword::Join)?;
                joins.push(Join {
                    kind: JoinKind::Cross,
                    natural: false,
                    from: self.parse_table_reference()?,
                    constraint: None,
                });
                continue;
            }

            let natural = self.parse_keyword(Keyword::Natural)?;
            let kind = if self.parse_keyword(Keyword::Inner)? {
                JoinKind::Inner
            } else if self.parse_keyword(Keyword::Left)? {
                self.parse_keyword(Keyword::Outer)?;
                JoinKind::LeftOuter
            } else if self.parse_keyword(Keyword::Right)? {
                self.parse_keyword(Keyword::Outer)?;
                JoinKind::RightOuter
            } else if self.parse_keyword(Keyword::Full)? {
                self.parse_keyword(Keyword::Outer)?;
                JoinKind::FullOuter
            } else if self.at_keyword(Keyword::Join) {
                JoinKind::Inner
            } else if natural {
                return self.expected("JOIN");
            } else {
                return Ok(joins);
            };
            self.expect_keyword(Keyword::Join)?;
            let from = self.parse_table_reference()?;

            let constraint = if natural {
                None
            } else if self.parse_keyword(Keyword::On)? {
                Some(JoinConstraint::On(self.parse_expression()?))
            } else if self.parse_keyword(Keyword::Using)? {
                self.expect(TokenKind::LeftParen, "'('")?;
                let columns = self.parse_comma_separated(|parser| {
                    Ok(ColumnName(parser.parse_identifier("column name")?))
                })?;
                self.expect(TokenKind::RightParen, "')'")?;
                Some(JoinConstraint::Using(columns))
            } else {
                return self.expected("ON or USING");
            };

            joins.push(Join {
                kind,
                natural,
                from,
                constraint,
            });
        }
    }

    fn parse_order_by_element(&mut self) -> Result<OrderByElement, Error> {
        let target = self.parse_expression()?;
        let direction = if self.parse_keyword(Keyword::Desc)? {
            OrderByDirection::Desc
        } else {
            self.parse_keyword(Keyword::Asc)?;
            OrderByDirection::Asc
        };
        Ok(OrderByElement { target, direction })
    }

    // expressions

    fn starts_expression(&self) -> bool {
        match self.current.kind {
            TokenKind::Identifier
            | TokenKind::QuotedIdentifier
            | TokenKind::Number
            | TokenKind::String
            | TokenKind::LeftParen
            | TokenKind::Plus
            | TokenKind::Minus => true,
            TokenKind::Keyword(keyword) => matches!(
                keyword,
                Keyword::Not
                    | Keyword::Null
                    | Keyword::True
                    | Keyword::False
                    | Keyword::Exists
                    | Keyword::Case
            ),
            _ => false,
        }
    }

    pub fn parse_expression(&mut self) -> Result<Expression, Error> {
        let mut left = self.parse_and()?;
        while self.parse_keyword(Keyword::Or)? {
            let right = self.parse_and()?;
            left = helpers::or(left, right);
        }
        Ok(left)
    }

    fn parse_and(&mut self) -> Result<Expression, Error> {
        let mut left = self.parse_not()?;
        while self.parse_keyword(Keyword::And)? {
            let right = self.parse_not()?;
            left = helpers::and(left, right);
        }
        Ok(left)
    }

    fn parse_not(&mut self) -> Result<Expression, Error> {
        if self.parse_keyword(Keyword::Not)? {
            return Ok(helpers::not(self.parse_not()?));
        }
        self.parse_predicate()
    }

    fn parse_predicate(&mut self) -> Result<Expression, Error> {
        let left = self.parse_additive()?;

        let comparison = match self.current.kind {
            TokenKind::Equals => Some(BinaryOperator::Equals),
            TokenKind::NotEquals => Some(BinaryOperator::NotEquals),
            TokenKind::Less => Some(BinaryOperator::LessThan),
            TokenKind::LessOrEqual => Some(BinaryOperator::LessThanOrEqualTo),
            TokenKind::Greater => Some(BinaryOperator::GreaterThan),
            TokenKind::GreaterOrEqual => Some(BinaryOperator::GreaterThanOrEqualTo),
            _ => None,
        };
        if let Some(operator) = comparison {
            self.advance()?;
            let right = self.parse_additive()?;
            return Ok(helpers::binary(left, operator, right));
        }

        if self.parse_keyword(Keyword::Is)? {
            let operator = if self.parse_keyword(Keyword::Not)? {
                UnaryOperator::IsNotNull
            } else {
                UnaryOperator::IsNull
            };
            self.expect_keyword(Keyword::Null)?;
            return Ok(Expression::UnaryOperation {
                expression: Box::new(left),
                operator,
            });
        }

        let negated = self.parse_keyword(Keyword::Not)?;
        match self.current.kind {
            TokenKind::Keyword(Keyword::Between) => {
                self.advance()?;
                let low = self.parse_additive()?;
                self.expect_keyword(Keyword::And)?;
                let high = self.parse_additive()?;
                Ok(Expression::Between {
                    expression: Box::new(left),
                    negated,
                    low: Box::new(low),
                    high: Box::new(high),
                })
            }
            TokenKind::Keyword(Keyword::Like) => {
                self.advance()?;
                let operator = if negated {
                    BinaryOperator::NotLike
                } else {
                    BinaryOperator::Like
                };
                Ok(helpers::binary(left, operator, self.parse_additive()?))
            }
            TokenKind::Keyword(Keyword::Ilike) => {
                self.advance()?;
                let operator = if negated {
                    BinaryOperator::NotCaseInsensitiveLike
                } else {
                    BinaryOperator::CaseInsensitiveLike
                };
                Ok(helpers::binary(left, operator, self.parse_additive()?))
            }
            TokenKind::Keyword(Keyword::In) => {
                self.advance()?;
                self.expect(TokenKind::LeftParen, "'('")?;
                let expression = if self.at_keyword(Keyword::Select) {
                    Expression::InSubquery {
                        expression: Box::new(left),
                        negated,
                        select: Box::new(self.parse_select()?),
                    }
                } else {
                    Expression::BinaryArrayOperation {
                        left: Box::new(left),
                        operator: if negated {
                            BinaryArrayOperator::NotIn
                        } else {
                            BinaryArrayOperator::In
                        },
                        right: self.parse_comma_separated(Self::parse_expression)?,
                    }
                };
                self.expect(TokenKind::RightParen, "')'")?;
                Ok(expression)
            }
            _ if negated => self.expected("BETWEEN, LIKE, ILIKE or IN"),
            _ => Ok(left),
        }
    }

    fn parse_additive(&mut self) -> Result<Expression, Error> {
        let mut left = self.parse_multiplicative()?;
        loop {
            let operator = match self.current.kind {
                TokenKind::Plus => BinaryOperator::Plus,
                TokenKind::Minus => BinaryOperator::Minus,
                TokenKind::Concat => BinaryOperator::Concatenate,
                _ => return Ok(left),
            };
            self.advance()?;
            let right = self.parse_multiplicative()?;
            left = helpers::binary(left, operator, right);
        }
    }

    fn parse_multiplicative(&mut self) -> Result<Expression, Error> {
        let mut left = self.parse_unary()?;
        loop {
            let operator = match self.current.kind {
                TokenKind::Asterisk => BinaryOperator::Multiply,
                TokenKind::Slash => BinaryOperator::Divide,
                TokenKind::Percent => BinaryOperator::Modulo,
                _ => return Ok(left),
            };
            self.advance()?;
            let right = self.parse_unary()?;
            left = helpers::binary(left, operator, right);
        }
    }

    fn parse_unary(&mut self) -> Result<Expression, Error> {
        match self.current.kind {
            TokenKind::Minus => {
                self.advance()?;
                if self.current.kind == TokenKind::Number {
                    let number = self.advance()?;
                    return Ok(helpers::numeric_text(format!("-{}", number.text)));
                }
                Ok(Expression::UnaryOperation {
                    expression: Box::new(self.parse_unary()?),
                    operator: UnaryOperator::Negate,
                })
            }
            TokenKind::Plus => {
                self.advance()?;
                self.parse_unary()
            }
            _ => self.parse_primary(),
        }
    }

    fn parse_primary(&mut self) -> Result<Expression, Error> {
        match self.current.kind {
            TokenKind::Number => Ok(helpers::numeric_text(self.advance()?.text)),
            TokenKind::String => Ok(Expression::Value(Value::String(self.advance()?.text))),
            TokenKind::Keyword(Keyword::Null) => {
                self.advance()?;
                Ok(Expression::Value(Value::Null))
            }
            TokenKind::Keyword(Keyword::True) => {
                self.advance()?;
                Ok(helpers::true_expr())
            }
            TokenKind::Keyword(Keyword::False) => {
                self.advance()?;
                Ok(helpers::false_expr())
            }
            TokenKind::LeftParen => {
                self.advance()?;
                let expression = self.parse_expression()?;
                self.expect(TokenKind::RightParen, "')'")?;
                Ok(expression)
            }
            TokenKind::Keyword(Keyword::Exists) => {
                self.advance()?;
                self.expect(TokenKind::LeftParen, "'('")?;
                let select = self.parse_select()?;
                self.expect(TokenKind::RightParen, "')'")?;
                Ok(Expression::Exists {
                    select: Box::new(select),
                })
            }
            TokenKind::Keyword(Keyword::Case) => self.parse_case(),
            TokenKind::Identifier | TokenKind::QuotedIdentifier => self.parse_name_expression(),
            _ => self.expected("expression"),
        }
    }

    fn parse_case(&mut self) -> Result<Expression, Error> {
        self.expect_keyword(Keyword::Case)?;
        let mut branches = vec![];
        while self.parse_keyword(Keyword::When)? {
            let condition = self.parse_expression()?;
            self.expect_keyword(Keyword::Then)?;
            let result = self.parse_expression()?;
            branches.push((condition, result));
        }
        if branches.is_empty() {
            return self.expected("WHEN");
        }
        let else_ = if self.parse_keyword(Keyword::Else)? {
            Some(Box::new(self.parse_expression()?))
        } else {
            None
        };
        self.expect_keyword(Keyword::End)?;
        Ok(Expression::Case { branches, else_ })
    }

    /// A function call, an aggregate or a column reference with up to three name parts.
    fn parse_name_expression(&mut self) -> Result<Expression, Error> {
        let is_regular = self.current.kind == TokenKind::Identifier;
        let first = self.parse_identifier("expression")?;

        if is_regular && self.current.kind == TokenKind::LeftParen {
            self.advance()?;
            return match AggregateFunction::from_name(&first.name) {
                Some(function) => self.parse_aggregate(function),
                None => self.parse_function_call(&first.name),
            };
        }

        let mut qualifiers = vec![];
        let mut name = first;
        while qualifiers.len() < 2 && self.consume(TokenKind::Period)? {
            let next = self.parse_identifier("column name")?;
            qualifiers.push(std::mem::replace(&mut name, next));
        }
        let name = ColumnName(name);
        let table = match (qualifiers.pop(), qualifiers.pop()) {
            (None, _) => None,
            (Some(table), schema) => Some(TableReference {
                schema: schema.map(SchemaName),
                table: TableName(table),
            }),
        };
        Ok(Expression::ColumnReference(ColumnReference { table, name }))
    }

    fn parse_aggregate(&mut self, function: AggregateFunction) -> Result<Expression, Error> {
        let (quantifier, argument) = if self.consume(TokenKind::Asterisk)? {
            (None, None)
        } else {
            let quantifier = if self.parse_keyword(Keyword::All)? {
                Some(SetQuantifier::All)
            } else if self.parse_keyword(Keyword::Distinct)? {
                Some(SetQuantifier::Distinct)
            } else {
                None
            };
            (quantifier, Some(Box::new(self.parse_expression()?)))
        };
        self.expect(TokenKind::RightParen, "')'")?;
        Ok(Expression::Aggregate {
            function,
            quantifier,
            argument,
        })
    }

    fn parse_function_call(&mut self, name: &str) -> Result<Expression, Error> {
        let args = if self.current.kind == TokenKind::RightParen {
            vec![]
        } else {
            self.parse_comma_separated(Self::parse_expression)?
        };
        self.expect(TokenKind::RightParen, "')'")?;
        Ok(Expression::FunctionCall {
            function: Function::from_name(name),
            args,
        })
    }
}

fn next_token(lexer: &mut Lexer) -> Result<Token, Error> {
    match lexer.next() {
        Some(token) => Ok(token?),
        // the lexer has already produced its end of query token
        None => Ok(Token {
            kind: TokenKind::Eof,
            text: String::new(),
            offset: lexer.end(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use query_engine_sql::sql::helpers::*;

    fn where_of(query: &str) -> Expression {
        parse(query).unwrap().where_.0
    }

    fn syntax_error(query: &str) -> SyntaxError {
        match parse(query) {
            Err(Error::Syntax(err)) => err,
            other => panic!("expected a syntax error, got {other:?}"),
        }
    }

    #[test]
    fn parses_select_star() {
        let select = parse("SELECT * FROM gaiadr3.gaia_source").unwrap();
        assert_eq!(
            select,
            star_select(From::Table {
                reference: make_table_reference(Some("gaiadr3"), "gaia_source"),
                alias: None,
            })
        );
    }

    #[test]
    fn and_binds_tighter_than_or() {
        assert_eq!(
            where_of("SELECT a FROM t WHERE a = 1 OR b = 2 AND c = 3"),
            or(
                binary(make_column(None, "a"), BinaryOperator::Equals, integer(1)),
                and(
                    binary(make_column(None, "b"), BinaryOperator::Equals, integer(2)),
                    binary(make_column(None, "c"), BinaryOperator::Equals, integer(3)),
                )
            )
        );
    }

    #[test]
    fn not_binds_tighter_than_and() {
        assert_eq!(
            where_of("SELECT a FROM t WHERE NOT a = 1 AND b IS NOT NULL"),
            and(
                not(binary(
                    make_column(None, "a"),
                    BinaryOperator::Equals,
                    integer(1)
                )),
                Expression::UnaryOperation {
                    expression: Box::new(make_column(None, "b")),
                    operator: UnaryOperator::IsNotNull,
                }
            )
        );
    }

    #[test]
    fn keeps_numeric_text_and_folds_negative_literals() {
        assert_eq!(
            where_of("SELECT a FROM t WHERE DISTANCE(81.28, -69.78, ra, dec) < 5./60."),
            binary(
                Expression::FunctionCall {
                    function: Function::Geometry(GeometryFunction::Distance),
                    args: vec![
                        numeric_text("81.28".to_string()),
                        numeric_text("-69.78".to_string()),
                        make_column(None, "ra"),
                        make_column(None, "dec"),
                    ],
                },
                BinaryOperator::LessThan,
                binary(
                    numeric_text("5.".to_string()),
                    BinaryOperator::Divide,
                    numeric_text("60.".to_string()),
                )
            )
        );
    }

    #[test]
    fn multiplication_binds_tighter_than_addition() {
        assert_eq!(
            where_of("SELECT a FROM t WHERE a + b * c > 0"),
            binary(
                binary(
                    make_column(None, "a"),
                    BinaryOperator::Plus,
                    binary(
                        make_column(None, "b"),
                        BinaryOperator::Multiply,
                        make_column(None, "c")
                    )
                ),
                BinaryOperator::GreaterThan,
                integer(0)
            )
        );
    }

    #[test]
    fn parses_aliases_and_qualified_stars() {
        let select =
            parse("SELECT g.*, ra AS r, dec d, COUNT(*) FROM gaia_source AS g").unwrap();
        let SelectList::SelectList(items) = select.select_list else {
            panic!("expected a select list");
        };
        assert_eq!(items[0], SelectItem::StarFrom(make_table_reference(None, "g")));
        assert_eq!(
            items[1],
            SelectItem::Expression {
                expression: make_column(None, "ra"),
                alias: Some(make_column_alias("r")),
            }
        );
        assert_eq!(
            items[2],
            SelectItem::Expression {
                expression: make_column(None, "dec"),
                alias: Some(make_column_alias("d")),
            }
        );
        assert_eq!(
            items[3],
            SelectItem::Expression {
                expression: Expression::Aggregate {
                    function: AggregateFunction::Count,
                    quantifier: None,
                    argument: None,
                },
                alias: None,
            }
        );
        assert_eq!(
            select.from,
            Some(From::Table {
                reference: make_table_reference(None, "gaia_source"),
                alias: Some(make_table_alias("g")),
            })
        );
    }

    #[test]
    fn star_followed_by_more_items() {
        let select = parse("SELECT *, ra FROM t").unwrap();
        assert_eq!(
            select.select_list,
            SelectList::SelectList(vec![
                SelectItem::Star,
                SelectItem::Expression {
                    expression: make_column(None, "ra"),
                    alias: None,
                }
            ])
        );
    }

    #[test]
    fn top_sets_the_row_limit() {
        let select = parse("SELECT TOP 10 ra FROM t ORDER BY ra DESC").unwrap();
        assert_eq!(
            select.limit,
            Limit {
                limit: Some(10),
                offset: None
            }
        );
        assert_eq!(select.order_by.elements[0].direction, OrderByDirection::Desc);
    }

    #[test]
    fn top_and_limit_together_are_rejected() {
        let err = syntax_error("SELECT TOP 10 ra FROM t LIMIT 5");
        assert_eq!(err.offset, 24);
        assert_eq!(err.found, "LIMIT");
    }

    #[test]
    fn parses_joins() {
        let select = parse(
            "SELECT * FROM a JOIN b ON a.id = b.id NATURAL LEFT OUTER JOIN c, d CROSS JOIN e",
        )
        .unwrap();
        let kinds: Vec<(JoinKind, bool)> = select
            .joins
            .iter()
            .map(|join| (join.kind, join.natural))
            .collect();
        assert_eq!(
            kinds,
            vec![
                (JoinKind::Inner, false),
                (JoinKind::LeftOuter, true),
                (JoinKind::Comma, false),
                (JoinKind::Cross, false),
            ]
        );
    }

    #[test]
    fn missing_select_list_points_at_from() {
        let err = syntax_error("SELECT FROM WHERE");
        assert_eq!(
            err,
            SyntaxError {
                expected: "select list".to_string(),
                found: "FROM".to_string(),
                offset: 7,
            }
        );
        assert_eq!(
            err.to_string(),
            "syntax error at offset 7: expected select list, found FROM"
        );
    }

    #[test]
    fn trailing_tokens_are_rejected() {
        let err = syntax_error("SELECT a FROM t WHERE a < b < c");
        assert_eq!(err.expected, "end of query");
        assert_eq!(err.offset, 28);
    }

    #[test]
    fn a_truncated_query_points_at_its_end() {
        let query = "SELECT ra FROM";
        let err = syntax_error(query);
        assert_eq!(err.offset, query.len());
        assert_eq!(err.found, "end of query");

        let mut lexer = Lexer::new(query);
        while next_token(&mut lexer).unwrap().kind != TokenKind::Eof {}
        let past_the_end = next_token(&mut lexer).unwrap();
        assert_eq!(past_the_end.kind, TokenKind::Eof);
        assert_eq!(past_the_end.offset, query.len());
    }

    #[test]
    fn lexical_errors_surface_from_the_parser() {
        assert!(matches!(
            parse("SELECT 'open FROM t"),
            Err(Error::Lex(_))
        ));
    }

    #[test]
    fn in_list_and_subquery() {
        let where_ = where_of(
            "SELECT a FROM t WHERE a NOT IN (1, 2) AND b IN (SELECT b FROM u)",
        );
        let Expression::And { left, right } = where_ else {
            panic!("expected AND");
        };
        assert!(matches!(
            *left,
            Expression::BinaryArrayOperation {
                operator: BinaryArrayOperator::NotIn,
                ..
            }
        ));
        assert!(matches!(
            *right,
            Expression::InSubquery { negated: false, .. }
        ));
    }
}
