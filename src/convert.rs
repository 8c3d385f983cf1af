//! Conversion of raw input tokens to scalar values
//!
//! Every literal grammar is recognized with `nom` and must span the whole
//! token: `"12"` is an integer, `"12 "` and `"12a"` are not.

use crate::error::ReadError;
use nom::branch::alt;
use nom::bytes::complete::tag_no_case;
use nom::character::complete::{digit1, one_of};
use nom::combinator::{all_consuming, opt, recognize, value};
use nom::number::complete::double;
use nom::sequence::pair;
use nom::IResult;
use std::fmt;

/// The scalar types a token can be converted to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    Integer,
    Float,
    Boolean,
    Char,
    String,
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer => write!(f, "integer"),
            Self::Float => write!(f, "float"),
            Self::Boolean => write!(f, "boolean"),
            Self::Char => write!(f, "char"),
            Self::String => write!(f, "string"),
        }
    }
}

/// A converted scalar value
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Char(char),
    String(String),
}

impl Value {
    /// Get the kind of this value
    pub fn kind(&self) -> ScalarKind {
        match self {
            Value::Integer(_) => ScalarKind::Integer,
            Value::Float(_) => ScalarKind::Float,
            Value::Boolean(_) => ScalarKind::Boolean,
            Value::Char(_) => ScalarKind::Char,
            Value::String(_) => ScalarKind::String,
        }
    }
}

/// Convert a token to a value of the requested kind
pub fn convert(kind: ScalarKind, token: &str) -> Result<Value, ReadError> {
    Ok(match kind {
        ScalarKind::Integer => Value::Integer(i64::convert(token)?),
        ScalarKind::Float => Value::Float(f64::convert(token)?),
        ScalarKind::Boolean => Value::Boolean(bool::convert(token)?),
        ScalarKind::Char => Value::Char(char::convert(token)?),
        ScalarKind::String => Value::String(token.to_string()),
    })
}

/// A type that can be read from a single input token
pub trait Scalar: Sized {
    /// The kind reported in conversion errors
    const KIND: ScalarKind;

    /// Convert the token, failing with [`ReadError::TypeConversion`]
    fn convert(token: &str) -> Result<Self, ReadError>;
}

fn mismatch(token: &str, kind: ScalarKind) -> ReadError {
    ReadError::TypeConversion {
        value: token.to_string(),
        kind,
        field: None,
    }
}

fn integer_literal(input: &str) -> IResult<&str, &str> {
    recognize(pair(opt(one_of("+-")), digit1))(input)
}

fn boolean_literal(input: &str) -> IResult<&str, bool> {
    alt((
        value(true, tag_no_case("true")),
        value(false, tag_no_case("false")),
    ))(input)
}

macro_rules! impl_integer_scalar {
    ($($t:ty),* $(,)?) => {
        $(
            impl Scalar for $t {
                const KIND: ScalarKind = ScalarKind::Integer;

                fn convert(token: &str) -> Result<Self, ReadError> {
                    let (_, literal) = all_consuming(integer_literal)(token)
                        .map_err(|_| mismatch(token, Self::KIND))?;
                    // overflow surfaces here
                    literal.parse::<$t>().map_err(|_| mismatch(token, Self::KIND))
                }
            }
        )*
    };
}

impl_integer_scalar!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

impl Scalar for f64 {
    const KIND: ScalarKind = ScalarKind::Float;

    fn convert(token: &str) -> Result<Self, ReadError> {
        all_consuming(double::<&str, nom::error::Error<&str>>)(token)
            .map(|(_, v)| v)
            .map_err(|_| mismatch(token, Self::KIND))
    }
}

impl Scalar for f32 {
    const KIND: ScalarKind = ScalarKind::Float;

    fn convert(token: &str) -> Result<Self, ReadError> {
        f64::convert(token).map(|v| v as f32)
    }
}

impl Scalar for bool {
    const KIND: ScalarKind = ScalarKind::Boolean;

    fn convert(token: &str) -> Result<Self, ReadError> {
        all_consuming(boolean_literal)(token)
            .map(|(_, v)| v)
            .map_err(|_| mismatch(token, Self::KIND))
    }
}

impl Scalar for char {
    const KIND: ScalarKind = ScalarKind::Char;

    fn convert(token: &str) -> Result<Self, ReadError> {
        let mut chars = token.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(c),
            _ => Err(mismatch(token, Self::KIND)),
        }
    }
}

impl Scalar for String {
    const KIND: ScalarKind = ScalarKind::String;

    fn convert(token: &str) -> Result<Self, ReadError> {
        Ok(token.to_string())
    }
}
