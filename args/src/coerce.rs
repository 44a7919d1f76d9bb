//! Value coercion from raw token text to typed values.
//!
//! [`ParseValue`] is the seam between the tokenizer's strings and the
//! destination object's typed fields. Implementations exist here for the
//! primitive targets; enumerations implement the trait at their
//! declaration site, usually through [`parse_enum`].
//!
//! Unsigned integer targets accept three notations, tried in priority
//! order:
//!
//! 1. trailing `h`/`H` — hexadecimal (at least two hex digits before the
//!    suffix, so `1h` is not mistaken for hex and fails as malformed),
//! 2. leading `0x`/`0X` — hexadecimal,
//! 3. trailing `b`/`B` — binary, every digit `0`/`1`, bit count bounded
//!    by the target width,
//!
//! falling back to decimal with `_` digit separators. Signed targets
//! accept only decimal with separators.

use std::num::IntErrorKind;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::ConvertError;

/// A type the coercer can produce from one raw value segment.
pub trait ParseValue: Sized {
    /// Display name rendered into help text as `=Name`.
    const VALUE_NAME: &'static str;

    /// Coerces one trimmed value segment.
    fn parse_value(raw: &str) -> Result<Self, ConvertError>;
}

/// Parses an unsigned integer in any of the supported notations, wide;
/// the per-type impls narrow the result.
fn parse_unsigned(raw: &str, target: &'static str, bits: u32) -> Result<u64, ConvertError> {
    let text = raw.trim();
    let malformed = || ConvertError::Malformed {
        text: raw.to_string(),
        target,
    };
    let overflow = || ConvertError::Overflow {
        text: raw.to_string(),
        target,
    };

    if let Some(body) = text.strip_suffix(['h', 'H']) {
        // A single hex digit before the suffix is ambiguous with plain
        // text and falls through to the decimal rule.
        if body.len() >= 2 && body.chars().all(|c| c.is_ascii_hexdigit()) {
            return u64::from_str_radix(body, 16).map_err(|_| overflow());
        }
    }

    if let Some(body) = text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        return match u64::from_str_radix(body, 16) {
            Ok(wide) => Ok(wide),
            Err(err) if *err.kind() == IntErrorKind::PosOverflow => Err(overflow()),
            Err(_) => Err(malformed()),
        };
    }

    if let Some(body) = text.strip_suffix(['b', 'B']) {
        if !body.is_empty() && body.chars().all(|c| c == '0' || c == '1') {
            if body.len() as u32 > bits {
                return Err(overflow());
            }
            return u64::from_str_radix(body, 2).map_err(|_| malformed());
        }
    }

    let digits: String = text.chars().filter(|c| *c != '_').collect();
    match digits.parse::<u64>() {
        Ok(wide) => Ok(wide),
        Err(err) if *err.kind() == IntErrorKind::PosOverflow => Err(overflow()),
        Err(_) => Err(malformed()),
    }
}

/// Parses a signed integer: decimal with `_` separators only.
fn parse_signed(raw: &str, target: &'static str) -> Result<i64, ConvertError> {
    let digits: String = raw.trim().chars().filter(|c| *c != '_').collect();
    match digits.parse::<i64>() {
        Ok(wide) => Ok(wide),
        Err(err)
            if matches!(
                err.kind(),
                IntErrorKind::PosOverflow | IntErrorKind::NegOverflow
            ) =>
        {
            Err(ConvertError::Overflow {
                text: raw.to_string(),
                target,
            })
        }
        Err(_) => Err(ConvertError::Malformed {
            text: raw.to_string(),
            target,
        }),
    }
}

macro_rules! unsigned_value {
    ($($ty:ty),* $(,)?) => {$(
        impl ParseValue for $ty {
            const VALUE_NAME: &'static str = "Number";

            fn parse_value(raw: &str) -> Result<Self, ConvertError> {
                let wide = parse_unsigned(raw, stringify!($ty), <$ty>::BITS)?;
                <$ty>::try_from(wide).map_err(|_| ConvertError::Overflow {
                    text: raw.to_string(),
                    target: stringify!($ty),
                })
            }
        }
    )*};
}

unsigned_value!(u8, u16, u32, u64, usize);

macro_rules! signed_value {
    ($($ty:ty),* $(,)?) => {$(
        impl ParseValue for $ty {
            const VALUE_NAME: &'static str = "Number";

            fn parse_value(raw: &str) -> Result<Self, ConvertError> {
                let wide = parse_signed(raw, stringify!($ty))?;
                <$ty>::try_from(wide).map_err(|_| ConvertError::Overflow {
                    text: raw.to_string(),
                    target: stringify!($ty),
                })
            }
        }
    )*};
}

signed_value!(i8, i16, i32, i64, isize);

impl ParseValue for String {
    const VALUE_NAME: &'static str = "Text";

    fn parse_value(raw: &str) -> Result<Self, ConvertError> {
        Ok(raw.to_string())
    }
}

impl ParseValue for PathBuf {
    const VALUE_NAME: &'static str = "Path";

    fn parse_value(raw: &str) -> Result<Self, ConvertError> {
        Ok(PathBuf::from(raw))
    }
}

impl ParseValue for Duration {
    const VALUE_NAME: &'static str = "Timespan";

    fn parse_value(raw: &str) -> Result<Self, ConvertError> {
        parse_timespan(raw)
    }
}

/// Parses the structured time-span format `[D.]HH:MM[:SS]`.
///
/// Minutes and seconds must stay below 60; negative spans are rejected.
fn parse_timespan(raw: &str) -> Result<Duration, ConvertError> {
    let malformed = || ConvertError::Malformed {
        text: raw.to_string(),
        target: "Timespan",
    };
    let field = |text: &str| -> Result<u64, ConvertError> {
        if text.is_empty() {
            return Err(malformed());
        }
        text.parse::<u64>().map_err(|_| malformed())
    };

    let text = raw.trim();
    let (days, clock) = match text.split_once('.') {
        Some((day_part, rest)) => (field(day_part)?, rest),
        None => (0, text),
    };

    let mut parts = clock.split(':');
    let hours = field(parts.next().unwrap_or_default())?;
    let minutes = field(parts.next().ok_or_else(malformed)?)?;
    let seconds = match parts.next() {
        Some(part) => field(part)?,
        None => 0,
    };
    if parts.next().is_some() || minutes > 59 || seconds > 59 {
        return Err(malformed());
    }

    Ok(Duration::from_secs(
        days * 86_400 + hours * 3_600 + minutes * 60 + seconds,
    ))
}

/// Matches `raw` case-insensitively against `(name, value)` pairs.
///
/// The error lists every accepted name, so declaration sites get uniform
/// messages for free.
///
/// # Examples
///
/// ```
/// use hashwalk_args::parse_enum;
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// enum Color { Red, Blue }
///
/// let pairs = [("red", Color::Red), ("blue", Color::Blue)];
/// assert_eq!(parse_enum("RED", "Color", &pairs).unwrap(), Color::Red);
/// assert!(parse_enum("green", "Color", &pairs).is_err());
/// ```
pub fn parse_enum<T: Copy>(
    raw: &str,
    target: &'static str,
    variants: &[(&'static str, T)],
) -> Result<T, ConvertError> {
    let needle = raw.trim().to_ascii_lowercase();
    for (name, value) in variants {
        if *name == needle {
            return Ok(*value);
        }
    }
    Err(ConvertError::UnknownVariant {
        text: raw.to_string(),
        target,
        expected: variants
            .iter()
            .map(|(name, _)| *name)
            .collect::<Vec<_>>()
            .join(", "),
    })
}
