//! Decoders turning reply parameter strings into values.
//!
//! Each decoder inverts the encoding the framer applies to the matching
//! argument kind. They plug into [`Response::map_payload`](super::Response::map_payload)
//! through [`param`].

use thiserror::Error;

use super::Payload;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("no parameter at position {0}")]
    Missing(usize),
    #[error("{value:?} is not a valid {kind}")]
    Invalid { kind: &'static str, value: String },
}

fn invalid(kind: &'static str, value: &str) -> DecodeError {
    DecodeError::Invalid {
        kind,
        value: value.to_string(),
    }
}

pub fn int(value: &str) -> Result<i64, DecodeError> {
    value.trim().parse().map_err(|_| invalid("integer", value))
}

pub fn unsigned(value: &str) -> Result<u64, DecodeError> {
    value.trim().parse().map_err(|_| invalid("unsigned", value))
}

pub fn float(value: &str) -> Result<f64, DecodeError> {
    match value.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(invalid("float", value)),
    }
}

pub fn boolean(value: &str) -> Result<bool, DecodeError> {
    match value.trim() {
        "1" => Ok(true),
        "0" => Ok(false),
        _ => Err(invalid("bool", value)),
    }
}

/// Double quoted, with `\"` and `\\` escapes.
pub fn string(value: &str) -> Result<String, DecodeError> {
    let inner = value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .ok_or_else(|| invalid("string", value))?;

    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some(escaped) => out.push(escaped),
                None => return Err(invalid("string", value)),
            },
            '"' => return Err(invalid("string", value)),
            c => out.push(c),
        }
    }
    Ok(out)
}

/// `'1F'`, also accepted without quotes.
pub fn byte(value: &str) -> Result<u8, DecodeError> {
    let digits = value
        .strip_prefix('\'')
        .and_then(|v| v.strip_suffix('\''))
        .unwrap_or(value);
    if digits.len() != 2 {
        return Err(invalid("byte", value));
    }
    u8::from_str_radix(digits, 16).map_err(|_| invalid("byte", value))
}

pub fn bytes(value: &str) -> Result<Vec<u8>, DecodeError> {
    let digits = value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value);
    hex::decode(digits).map_err(|_| invalid("byte sequence", value))
}

/// Decodes the parameter at `index` of a payload. A GSI word or setting
/// value is the only parameter of its payload.
pub fn param<T, F>(payload: &Payload, index: usize, decode: F) -> Result<T, DecodeError>
where
    F: FnOnce(&str) -> Result<T, DecodeError>,
{
    let raw = match payload {
        Payload::Params(params) => params.get(index).map(String::as_str),
        Payload::Word(word) if index == 0 => Some(word.value()),
        Payload::Setting { value, .. } if index == 0 => Some(value.as_str()),
        _ => None,
    };
    decode(raw.ok_or(DecodeError::Missing(index))?)
}

/// Signed integer value of a GSI word.
pub fn word_int(payload: &Payload) -> Result<i64, DecodeError> {
    match payload {
        Payload::Word(word) => word
            .to_integer(10)
            .ok_or_else(|| invalid("integer", &word.data)),
        _ => param(payload, 0, int),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::{GsiWord, WordWidth};

    #[test]
    fn scalars() {
        assert_eq!(int("-42"), Ok(-42));
        assert_eq!(unsigned("610"), Ok(610));
        assert!(unsigned("-1").is_err());
        assert_eq!(float("1.5"), Ok(1.5));
        assert!(float("nan").is_err());
        assert_eq!(boolean("1"), Ok(true));
        assert_eq!(boolean("0"), Ok(false));
        assert!(boolean("2").is_err());
    }

    #[test]
    fn strings() {
        assert_eq!(string(r#""TS30""#), Ok("TS30".to_string()));
        assert_eq!(string(r#""a\"b\\c""#), Ok(r#"a"b\c"#.to_string()));
        assert!(string("TS30").is_err());
        assert!(string(r#""a"b""#).is_err());
        assert!(string(r#""a\""#).is_err());
    }

    #[test]
    fn byte_values() {
        assert_eq!(byte("'1F'"), Ok(0x1F));
        assert_eq!(byte("0A"), Ok(0x0A));
        assert!(byte("'1FF'").is_err());
        assert_eq!(bytes("00AB10"), Ok(vec![0x00, 0xAB, 0x10]));
        assert_eq!(bytes("\"0a\""), Ok(vec![0x0A]));
        assert!(bytes("0").is_err());
    }

    #[test]
    fn payload_params() {
        let payload = Payload::Params(vec!["610".into(), "\"TS30\"".into()]);
        assert_eq!(param(&payload, 0, int), Ok(610));
        assert_eq!(param(&payload, 1, string), Ok("TS30".to_string()));
        assert_eq!(param(&payload, 2, int), Err(DecodeError::Missing(2)));
    }

    #[test]
    fn payload_word() {
        let word = GsiWord::parse("32...8-00012345").unwrap();
        assert_eq!(word.width, WordWidth::Gsi8);
        let payload = Payload::Word(word);
        assert_eq!(word_int(&payload), Ok(-12345));
        assert_eq!(param(&payload, 0, int), Ok(12345));
        assert_eq!(param(&payload, 1, int), Err(DecodeError::Missing(1)));

        let setting = Payload::Setting {
            param: 137,
            value: "1".into(),
        };
        assert_eq!(param(&setting, 0, unsigned), Ok(1));
    }
}
