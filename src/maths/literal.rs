use logos::Logos;

use crate::{
    Engine,
    error::ParseError,
    interpreter::{
        lexer::{Token, concept::Concept},
        parser::core::ParseResult,
        value::{complex::ComplexNumber, core::Value},
    },
};

/// Integer literals written in another radix.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
enum RadixLiteral {
    /// `0x1F`
    #[regex(r"0[xX][0-9a-fA-F]+")]
    Hexadecimal,
    /// `0b101`
    #[regex(r"0[bB][01]+")]
    Binary,
    /// `0o17`
    #[regex(r"0[oO][0-7]+")]
    Octal,
}

/// Decimal literals with a `.` decimal point, such as `3.14`, `.5`, `2e-3`
/// or `4i`.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
enum PointDecimal {
    #[regex(r"([0-9]+\.?[0-9]*|\.[0-9]+)([eE][+-]?[0-9]+)?i?")]
    Number,
}

/// Decimal literals with a `,` decimal point, such as `3,14`.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
enum CommaDecimal {
    #[regex(r"([0-9]+,?[0-9]*|,[0-9]+)([eE][+-]?[0-9]+)?i?")]
    Number,
}

/// Returns the first token of `code` and its length, if `code` starts with
/// one.
fn leading<'s, T>(code: &'s str) -> Option<(T, usize)>
    where T: Logos<'s, Source = str>,
          T::Extras: Default
{
    let mut lexer = T::lexer(code);
    match lexer.next() {
        Some(Ok(token)) => Some((token, lexer.span().end)),
        _ => None,
    }
}

/// Recognises numeric literals.
///
/// Hexadecimal (`0x`), binary (`0b`) and octal (`0o`) integers are tried
/// first, then decimals. Decimals may carry an exponent and a trailing `i`
/// making them imaginary. Whether the decimal point is `.` or `,` follows
/// [`EngineConfig::decimal_point_is_comma`](crate::engine::config::EngineConfig).
///
/// # Example
/// ```
/// use formulaic::Engine;
///
/// let mut engine = Engine::with_maths();
/// assert_eq!(engine.evaluate("0x1F + 0b11").unwrap().real, 34.0);
/// assert_eq!(engine.evaluate("2.5e1").unwrap().real, 25.0);
///
/// engine.config.set_decimal_point_is_comma(true);
/// assert_eq!(engine.evaluate("1,5 * 2").unwrap().real, 3.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NumberConcept;

impl Concept for NumberConcept {
    fn match_token(&self, engine: &Engine, code: &str, _tokens: &[Token]) -> Option<Token> {
        if let Some((_, len)) = leading::<RadixLiteral>(code) {
            return Some(Token::literal(&code[..len], parse_radix));
        }

        let len = if engine.config.decimal_point_is_comma {
            leading::<CommaDecimal>(code)?.1
        } else {
            leading::<PointDecimal>(code)?.1
        };

        Some(Token::literal(&code[..len], parse_decimal))
    }
}

/// Converts a decimal literal, honouring the configured decimal point.
///
/// # Errors
/// Returns `ParseError::InvalidLiteral` if the code is not a number.
pub fn parse_decimal(engine: &Engine, code: &str) -> ParseResult<Value> {
    let invalid = || ParseError::InvalidLiteral { code: code.to_string() };

    let (digits, imaginary) = match code.strip_suffix(['i', 'I']) {
        Some(digits) => (digits, true),
        None => (code, false),
    };

    let digits = if engine.config.decimal_point_is_comma {
        digits.replace(',', ".")
    } else {
        digits.to_string()
    };

    let value = digits.parse::<f64>().map_err(|_| invalid())?;

    Ok(Value::Number(if imaginary {
                         ComplexNumber::new(0.0, value)
                     } else {
                         ComplexNumber::real(value)
                     }))
}

/// Converts a `0x`, `0b` or `0o` integer literal.
///
/// The digits are accumulated as `f64`, so very long literals lose precision
/// instead of overflowing.
///
/// # Errors
/// Returns `ParseError::InvalidLiteral` for an unknown prefix or digit.
pub fn parse_radix(_engine: &Engine, code: &str) -> ParseResult<Value> {
    let invalid = || ParseError::InvalidLiteral { code: code.to_string() };

    let mut chars = code.chars();
    let radix = match (chars.next(), chars.next()) {
        (Some('0'), Some('x' | 'X')) => 16,
        (Some('0'), Some('b' | 'B')) => 2,
        (Some('0'), Some('o' | 'O')) => 8,
        _ => return Err(invalid()),
    };

    let value = chars.try_fold(0.0_f64, |value, c| {
                         c.to_digit(radix)
                          .map(|digit| value.mul_add(f64::from(radix), f64::from(digit)))
                     })
                     .ok_or_else(invalid)?;

    Ok(Value::from(value))
}
