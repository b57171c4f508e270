//! GSI Online data words.
//!
//! A word is an optional `*` (GSI16 only), a six character header holding
//! the word index and an optional information field separated by dots, a
//! sign, and the data block of 8 or 16 characters. Words on the wire carry a
//! trailing space which is optional on input.

use lazy_static::lazy_static;
use num_derive::FromPrimitive;
use num_traits::FromPrimitive;
use regex::Regex;
use std::{fmt::Display, str::FromStr};
use thiserror::Error;

use super::{EncodingError, ParseError};

/// Setting number holding the GSI word width on DNA instruments.
pub const WORD_WIDTH_SETTING: u16 = 137;

const HEADER_LEN: usize = 6;
const MAX_WORD_INDEX: u16 = 9999;

#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive)]
pub enum WordWidth {
    Gsi8 = 0,
    Gsi16 = 1,
}

impl WordWidth {
    pub fn digits(self) -> usize {
        match self {
            WordWidth::Gsi8 => 8,
            WordWidth::Gsi16 => 16,
        }
    }

    /// Maps the value of setting 137 to a width.
    pub fn from_setting(value: u32) -> Option<Self> {
        WordWidth::from_u32(value)
    }
}

impl Default for WordWidth {
    fn default() -> Self {
        WordWidth::Gsi8
    }
}

impl Display for WordWidth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WordWidth::Gsi8 => "GSI8".fmt(f),
            WordWidth::Gsi16 => "GSI16".fmt(f),
        }
    }
}

/// How a `GET` request obtains its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GetMode {
    /// Return the last stored value.
    Instant,
    /// Trigger a measurement first.
    Measure,
    /// Continuous measurement.
    Continuous,
}

impl Display for GetMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GetMode::Instant => "I".fmt(f),
            GetMode::Measure => "M".fmt(f),
            GetMode::Continuous => "C".fmt(f),
        }
    }
}

#[derive(Error, Debug)]
pub enum GetModeError {
    #[error("invalid GET mode '{0}', expected one of M, I, C")]
    BadMode(String),
}

impl FromStr for GetMode {
    type Err = GetModeError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input {
            "I" | "i" => Ok(GetMode::Instant),
            "M" | "m" => Ok(GetMode::Measure),
            "C" | "c" => Ok(GetMode::Continuous),
            _ => Err(GetModeError::BadMode(input.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GsiWord {
    pub index: u16,
    pub info: Option<String>,
    pub negative: bool,
    pub data: String,
    pub width: WordWidth,
}

impl GsiWord {
    /// Builds a word for upload. `data` may carry a leading sign and is
    /// zero padded to the width.
    pub fn new(index: u16, data: &str, width: WordWidth) -> Result<Self, EncodingError> {
        let (negative, digits) = match data.as_bytes().first() {
            Some(b'-') => (true, &data[1..]),
            Some(b'+') => (false, &data[1..]),
            _ => (false, data),
        };

        if digits.is_empty()
            || digits.len() > width.digits()
            || !digits.chars().all(|c| c.is_ascii_alphanumeric())
        {
            return Err(EncodingError::WordOverflow {
                data: data.to_string(),
                width,
            });
        }

        if index > MAX_WORD_INDEX {
            return Err(EncodingError::WordIndex(index));
        }

        Ok(GsiWord {
            index,
            info: None,
            negative,
            data: format!("{:0>1$}", digits, width.digits()),
            width,
        })
    }

    pub fn parse(raw: &str) -> Result<Self, ParseError> {
        lazy_static! {
            static ref RE: Regex =
                Regex::new(r"^(\*)?([0-9.]{6})([+-])([0-9A-Za-z.?]+) ?$").unwrap();
        }

        let bad_word = || ParseError::BadWord(raw.to_string());
        let cap = RE.captures(raw).ok_or_else(bad_word)?;

        let width = if cap.get(1).is_some() {
            WordWidth::Gsi16
        } else {
            WordWidth::Gsi8
        };
        let data = cap.get(4).ok_or_else(bad_word)?.as_str();
        if data.len() != width.digits() {
            return Err(bad_word());
        }

        let header = cap.get(2).ok_or_else(bad_word)?.as_str();
        let (index, info) = split_header(header).ok_or_else(bad_word)?;

        Ok(GsiWord {
            index,
            info,
            negative: cap.get(3).map(|m| m.as_str()) == Some("-"),
            data: data.to_string(),
            width,
        })
    }

    /// Wire form, including the trailing space.
    pub fn format(&self) -> String {
        let index = self.index.to_string();
        let header = match &self.info {
            Some(info) => format!(
                "{}{}{}",
                index,
                ".".repeat(HEADER_LEN.saturating_sub(index.len() + info.len())),
                info
            ),
            None => format!("{:.<1$}", index, HEADER_LEN),
        };
        format!(
            "{}{}{}{} ",
            if self.width == WordWidth::Gsi16 { "*" } else { "" },
            header,
            if self.negative { '-' } else { '+' },
            self.data
        )
    }

    /// Data block without leading zeros.
    pub fn value(&self) -> &str {
        let trimmed = self.data.trim_start_matches('0');
        if trimmed.is_empty() {
            "0"
        } else {
            trimmed
        }
    }

    pub fn to_integer(&self, radix: u32) -> Option<i64> {
        let magnitude = i64::from_str_radix(self.value(), radix).ok()?;
        Some(if self.negative { -magnitude } else { magnitude })
    }
}

impl Display for GsiWord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.format().trim_end().fmt(f)
    }
}

// "11....", "11..46", "560..." or "110046" (no dots: two index digits).
fn split_header(header: &str) -> Option<(u16, Option<String>)> {
    let (index, info) = match (header.find('.'), header.rfind('.')) {
        (Some(first), Some(last)) => (&header[..first], &header[last + 1..]),
        _ => (&header[..2], &header[2..]),
    };
    let index = index.parse().ok()?;
    let info = if info.is_empty() {
        None
    } else {
        Some(info.to_string())
    };
    Some((index, info))
}
