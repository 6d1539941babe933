//! Numeric literal decoding.

use crate::ast::NumericValue;
use smol_str::SmolStr;
use std::num::IntErrorKind;

/// A numeric lexeme that does not denote a number.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NumericError {
    #[error("empty numeric literal")]
    Empty,
    #[error("hexadecimal literal `{0}` has no digits")]
    MissingHexDigits(SmolStr),
    #[error("hexadecimal literal `{0}` does not fit in 64 bits")]
    HexOverflow(SmolStr),
    #[error("malformed numeric literal `{0}`")]
    Malformed(SmolStr),
}

/// Decodes a numeric lexeme.
///
/// Hex literals are read as 64-bit patterns, so `0xFFFFFFFFFFFFFFFF` is -1.
/// Decimal integers that overflow `i64` fall back to floats.
pub fn decode_numeric(lexeme: &str) -> Result<NumericValue, NumericError> {
    if lexeme.is_empty() {
        return Err(NumericError::Empty);
    }

    if let Some(digits) = lexeme
        .strip_prefix("0x")
        .or_else(|| lexeme.strip_prefix("0X"))
    {
        return decode_hex(lexeme, digits);
    }

    if lexeme.bytes().all(|b| b.is_ascii_digit()) {
        if let Ok(value) = lexeme.parse::<i64>() {
            return Ok(NumericValue::Integer(value));
        }
    } else if !is_decimal_shape(lexeme) {
        return Err(NumericError::Malformed(SmolStr::new(lexeme)));
    }

    lexeme
        .parse::<f64>()
        .map(NumericValue::Float)
        .map_err(|_| NumericError::Malformed(SmolStr::new(lexeme)))
}

fn decode_hex(lexeme: &str, digits: &str) -> Result<NumericValue, NumericError> {
    if digits.is_empty() {
        return Err(NumericError::MissingHexDigits(SmolStr::new(lexeme)));
    }
    match u64::from_str_radix(digits, 16) {
        Ok(bits) => Ok(NumericValue::Integer(bits as i64)),
        Err(error) if *error.kind() == IntErrorKind::PosOverflow => {
            Err(NumericError::HexOverflow(SmolStr::new(lexeme)))
        }
        Err(_) => Err(NumericError::Malformed(SmolStr::new(lexeme))),
    }
}

/// Matches `digits [. digits] [e [+-] digits]` with at least one mantissa digit.
///
/// `str::parse::<f64>` also accepts `inf`, `nan` and signs, none of which are
/// SQL numeric literals.
fn is_decimal_shape(text: &str) -> bool {
    let (mantissa, exponent) = match text.find(['e', 'E']) {
        Some(index) => (&text[..index], Some(&text[index + 1..])),
        None => (text, None),
    };

    let (integer, fraction) = mantissa.split_once('.').unwrap_or((mantissa, ""));
    let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
    if integer.is_empty() && fraction.is_empty() {
        return false;
    }
    if !all_digits(integer) || !all_digits(fraction) {
        return false;
    }

    match exponent {
        None => true,
        Some(exponent) => {
            let digits = exponent
                .strip_prefix(['+', '-'])
                .unwrap_or(exponent);
            !digits.is_empty() && all_digits(digits)
        }
    }
}
