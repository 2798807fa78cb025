//! Syntax checks for the string-typed attribute families of SED-ML.
//!
//! - `SId` / `SIdRef`: `[a-zA-Z_][a-zA-Z0-9_]*`
//! - `metaid`: an XML `ID` (NCName)
//! - KiSAO identifiers: `KISAO:` followed by seven digits
//! - colours: six or eight hexadecimal digits, optionally prefixed by `#`

use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::{tag, take_while_m_n},
    character::complete::{alpha1, alphanumeric1, char, digit1},
    combinator::{all_consuming, map_res, opt, recognize},
    multi::many0,
    sequence::{pair, preceded},
};
use thiserror::Error;

/// Errors raised when a string fails the syntax of its attribute type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentifierError {
    #[error("empty identifier")]
    Empty,

    #[error("'{0}' does not conform to the SId syntax")]
    InvalidSId(String),

    #[error("'{0}' is not a valid XML ID")]
    InvalidMetaId(String),

    #[error("'{0}' is not a valid KiSAO identifier (expected KISAO:nnnnnnn)")]
    InvalidKisaoId(String),

    #[error("'{0}' is not a valid hexadecimal colour")]
    InvalidColor(String),
}

fn sid(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        alt((alpha1, tag("_"))),
        many0(alt((alphanumeric1, tag("_")))),
    ))
    .parse(input)
}

fn kisao_term(input: &str) -> IResult<&str, u32> {
    preceded(
        tag("KISAO:"),
        map_res(
            take_while_m_n(7, 7, |c: char| c.is_ascii_digit()),
            str::parse::<u32>,
        ),
    )
    .parse(input)
}

fn hex_color(input: &str) -> IResult<&str, &str> {
    preceded(
        opt(char('#')),
        recognize(pair(
            take_while_m_n(6, 6, |c: char| c.is_ascii_hexdigit()),
            opt(take_while_m_n(2, 2, |c: char| c.is_ascii_hexdigit())),
        )),
    )
    .parse(input)
}

/// Check that `value` is a well-formed `SId` (also used for `SIdRef`).
pub fn check_sid(value: &str) -> Result<(), IdentifierError> {
    if value.is_empty() {
        return Err(IdentifierError::Empty);
    }
    all_consuming(sid)
        .parse(value)
        .map(|_| ())
        .map_err(|_| IdentifierError::InvalidSId(value.to_string()))
}

/// Check that `value` is an NCName usable as an XML `ID`.
pub fn check_metaid(value: &str) -> Result<(), IdentifierError> {
    let mut chars = value.chars();
    match chars.next() {
        None => Err(IdentifierError::Empty),
        Some(first) if first.is_alphabetic() || first == '_' => {
            if chars.all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.')) {
                Ok(())
            } else {
                Err(IdentifierError::InvalidMetaId(value.to_string()))
            }
        }
        Some(_) => Err(IdentifierError::InvalidMetaId(value.to_string())),
    }
}

/// Parse `KISAO:0000019` into its numeric term, `19`.
pub fn parse_kisao_id(value: &str) -> Result<u32, IdentifierError> {
    all_consuming(kisao_term)
        .parse(value.trim())
        .map(|(_, term)| term)
        .map_err(|_| IdentifierError::InvalidKisaoId(value.to_string()))
}

/// Format a numeric KiSAO term in its canonical `KISAO:nnnnnnn` form.
pub fn format_kisao_id(term: u32) -> String {
    format!("KISAO:{:07}", term)
}

pub fn check_color(value: &str) -> Result<(), IdentifierError> {
    all_consuming(hex_color)
        .parse(value)
        .map(|_| ())
        .map_err(|_| IdentifierError::InvalidColor(value.to_string()))
}

/// Parse a plain decimal integer such as a `KISAO` suffix without the prefix.
pub(crate) fn parse_digits(value: &str) -> Option<u32> {
    let parsed: IResult<&str, u32> =
        all_consuming(map_res(digit1, str::parse::<u32>)).parse(value);
    parsed.ok().map(|(_, n)| n)
}
