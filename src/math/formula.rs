//! Infix formulas to MathML.
//!
//! A small precedence-climbing grammar:
//!
//! ```text
//! or       := and (("||" | "or") and)*
//! and      := relation (("&&" | "and") relation)*
//! relation := sum (("<=" | ">=" | "==" | "!=" | "<" | ">") sum)*
//! sum      := product (("+" | "-") product)*
//! product  := unary (("*" | "/" | "%") unary)*
//! unary    := "-" unary | "+" unary | ("!" | "not") unary | power
//! power    := primary ("^" unary)?
//! primary  := number | name "(" args ")" | name | "(" or ")"
//! ```
//!
//! Chains of `+`, `*`, `&&` and `||` become a single n-ary `<apply>`.

use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::tag,
    character::complete::{alpha1, alphanumeric1, char, multispace0},
    combinator::{map, map_res, recognize, value, verify},
    multi::{many0, separated_list0},
    number::complete::recognize_float,
    sequence::{delimited, pair, preceded},
};
use thiserror::Error;

use crate::math::Math;
use crate::model::attribute::format_double;
use crate::xml::node::XmlElement;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormulaError {
    #[error("empty formula")]
    Empty,

    #[error("syntax error at offset {position}: {message}")]
    Syntax { position: usize, message: String },
}

/// A parsed formula, one step above MathML.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Integer(i64),
    Real(f64),
    Ident(String),
    /// A MathML constant element: `pi`, `exponentiale`, `true`, ...
    Symbol(&'static str),
    /// A MathML operator or builtin function applied to arguments.
    Apply(&'static str, Vec<Expr>),
    /// A call to a user function, written as `<apply><ci>f</ci>...`.
    Call(String, Vec<Expr>),
}

const FLATTENED: &[&str] = &["plus", "times", "and", "or"];

impl Expr {
    pub fn to_mathml(&self) -> XmlElement {
        match self {
            Expr::Integer(i) => XmlElement::new("cn")
                .with_attribute("type", "integer")
                .with_text(i.to_string()),
            Expr::Real(r) => XmlElement::new("cn").with_text(format_double(*r)),
            Expr::Ident(name) => XmlElement::new("ci").with_text(name.clone()),
            Expr::Symbol(symbol) => XmlElement::new(*symbol),
            Expr::Apply(op, args) => args
                .iter()
                .fold(XmlElement::new("apply").with_child(XmlElement::new(*op)), |e, arg| {
                    e.with_child(arg.to_mathml())
                }),
            Expr::Call(name, args) => args.iter().fold(
                XmlElement::new("apply").with_child(XmlElement::new("ci").with_text(name.clone())),
                |e, arg| e.with_child(arg.to_mathml()),
            ),
        }
    }
}

/// Parse `text` and wrap the result in a [`Math`] element.
pub fn parse_formula(text: &str) -> Result<Math, FormulaError> {
    parse_expression(text).map(|expr| Math::new(expr.to_mathml()))
}

pub fn parse_expression(text: &str) -> Result<Expr, FormulaError> {
    if text.trim().is_empty() {
        return Err(FormulaError::Empty);
    }
    match expression(text) {
        Ok(("", expr)) => Ok(expr),
        Ok((rest, _)) => Err(FormulaError::Syntax {
            position: text.len() - rest.len(),
            message: format!("unexpected '{}'", rest),
        }),
        Err(nom::Err::Error(e) | nom::Err::Failure(e)) => Err(FormulaError::Syntax {
            position: text.len() - e.input.len(),
            message: format!("{:?}", e.code),
        }),
        Err(nom::Err::Incomplete(_)) => Err(FormulaError::Syntax {
            position: text.len(),
            message: "incomplete input".to_string(),
        }),
    }
}

/// Parse whitespace (spaces, tabs, newlines)
fn ws<'a, P, O>(inner: P) -> impl Parser<&'a str, Output = O, Error = nom::error::Error<&'a str>>
where
    P: Parser<&'a str, Output = O, Error = nom::error::Error<&'a str>>,
{
    delimited(multispace0, inner, multispace0)
}

fn name(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        alt((alpha1, tag("_"))),
        many0(alt((alphanumeric1, tag("_")))),
    ))
    .parse(input)
}

/// A whole word, so `or` does not match the start of `order`.
fn keyword<'a>(
    word: &'static str,
) -> impl Parser<&'a str, Output = &'a str, Error = nom::error::Error<&'a str>> {
    ws(verify(name, move |s: &str| s == word))
}

fn number_from_lexeme(lexeme: &str) -> Result<Expr, std::num::ParseFloatError> {
    if !lexeme.contains(['.', 'e', 'E']) {
        if let Ok(i) = lexeme.parse::<i64>() {
            return Ok(Expr::Integer(i));
        }
    }
    lexeme.parse::<f64>().map(Expr::Real)
}

fn number(input: &str) -> IResult<&str, Expr> {
    map_res(recognize_float, number_from_lexeme).parse(input)
}

fn named_value(name: &str) -> Expr {
    match name {
        "pi" => Expr::Symbol("pi"),
        "e" | "exponentiale" => Expr::Symbol("exponentiale"),
        "true" => Expr::Symbol("true"),
        "false" => Expr::Symbol("false"),
        "inf" | "infinity" => Expr::Symbol("infinity"),
        "nan" | "notanumber" => Expr::Symbol("notanumber"),
        _ => Expr::Ident(name.to_string()),
    }
}

fn builtin_function(name: &str) -> Option<&'static str> {
    let op = match name {
        "sin" => "sin",
        "cos" => "cos",
        "tan" => "tan",
        "sec" => "sec",
        "csc" => "csc",
        "cot" => "cot",
        "sinh" => "sinh",
        "cosh" => "cosh",
        "tanh" => "tanh",
        "asin" | "arcsin" => "arcsin",
        "acos" | "arccos" => "arccos",
        "atan" | "arctan" => "arctan",
        "asinh" | "arcsinh" => "arcsinh",
        "acosh" | "arccosh" => "arccosh",
        "atanh" | "arctanh" => "arctanh",
        "exp" => "exp",
        "ln" => "ln",
        "log" | "log10" => "log",
        "sqrt" => "root",
        "abs" => "abs",
        "floor" => "floor",
        "ceil" | "ceiling" => "ceiling",
        "factorial" => "factorial",
        "pow" | "power" => "power",
        "min" => "min",
        "max" => "max",
        "sum" => "sum",
        "product" => "product",
        "rem" => "rem",
        "quotient" => "quotient",
        "xor" => "xor",
        _ => return None,
    };
    Some(op)
}

fn call(input: &str) -> IResult<&str, Expr> {
    map(
        pair(
            name,
            delimited(
                ws(char('(')),
                separated_list0(ws(char(',')), expression),
                ws(char(')')),
            ),
        ),
        |(name, args)| match builtin_function(name) {
            Some(op) => Expr::Apply(op, args),
            None => Expr::Call(name.to_string(), args),
        },
    )
    .parse(input)
}

fn primary(input: &str) -> IResult<&str, Expr> {
    ws(alt((
        number,
        call,
        map(name, named_value),
        delimited(char('('), expression, char(')')),
    )))
    .parse(input)
}

fn power(input: &str) -> IResult<&str, Expr> {
    let (input, base) = primary(input)?;

    if let Ok((input, _)) = ws(char('^')).parse(input) {
        let (input, exponent) = unary(input)?;
        Ok((input, Expr::Apply("power", vec![base, exponent])))
    } else {
        Ok((input, base))
    }
}

fn unary(input: &str) -> IResult<&str, Expr> {
    alt((
        map(preceded(ws(char('-')), unary), |e| Expr::Apply("minus", vec![e])),
        preceded(ws(char('+')), unary),
        map(
            preceded(alt((value((), ws(char('!'))), value((), keyword("not")))), unary),
            |e| Expr::Apply("not", vec![e]),
        ),
        power,
    ))
    .parse(input)
}

fn combine(op: &'static str, left: Expr, right: Expr) -> Expr {
    match left {
        Expr::Apply(existing, mut args) if existing == op && FLATTENED.contains(&op) => {
            args.push(right);
            Expr::Apply(existing, args)
        }
        left => Expr::Apply(op, vec![left, right]),
    }
}

type Operand = for<'a> fn(&'a str) -> IResult<&'a str, Expr>;
type Operator = for<'a> fn(&'a str) -> IResult<&'a str, &'static str>;

/// Left-associative chain of `operand (operator operand)*`.
fn binary_chain(input: &str, operand: Operand, operator: Operator) -> IResult<&str, Expr> {
    let (mut input, mut left) = operand(input)?;

    while let Ok((rest, op)) = operator(input) {
        let (rest, right) = operand(rest)?;
        input = rest;
        left = combine(op, left, right);
    }

    Ok((input, left))
}

fn product_op(input: &str) -> IResult<&str, &'static str> {
    alt((
        value("times", ws(char('*'))),
        value("divide", ws(char('/'))),
        value("rem", ws(char('%'))),
    ))
    .parse(input)
}

fn sum_op(input: &str) -> IResult<&str, &'static str> {
    alt((value("plus", ws(char('+'))), value("minus", ws(char('-'))))).parse(input)
}

fn relation_op(input: &str) -> IResult<&str, &'static str> {
    alt((
        value("leq", ws(tag("<="))),
        value("geq", ws(tag(">="))),
        value("eq", ws(tag("=="))),
        value("neq", ws(tag("!="))),
        value("lt", ws(char('<'))),
        value("gt", ws(char('>'))),
    ))
    .parse(input)
}

fn and_op(input: &str) -> IResult<&str, &'static str> {
    alt((value("and", ws(tag("&&"))), value("and", keyword("and")))).parse(input)
}

fn or_op(input: &str) -> IResult<&str, &'static str> {
    alt((value("or", ws(tag("||"))), value("or", keyword("or")))).parse(input)
}

fn product(input: &str) -> IResult<&str, Expr> {
    binary_chain(input, unary, product_op)
}

fn sum(input: &str) -> IResult<&str, Expr> {
    binary_chain(input, product, sum_op)
}

fn relation(input: &str) -> IResult<&str, Expr> {
    binary_chain(input, sum, relation_op)
}

fn conjunction(input: &str) -> IResult<&str, Expr> {
    binary_chain(input, relation, and_op)
}

/// Parse a complete expression
pub fn expression(input: &str) -> IResult<&str, Expr> {
    binary_chain(input, conjunction, or_op)
}
