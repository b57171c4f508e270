use lazy_static::lazy_static;
use log::warn;
use regex::Regex;
use std::{fmt::Display, str::FromStr};
use thiserror::Error;

use super::status::{GsiError, StatusCode};
use super::{ArityError, Code, CommandDescriptor, Family, GsiWord, ParseError};

pub const GEOCOM_REPLY: &str = "%R1P,";

/// Layout of the GeoCom reply header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    /// `%R1P,<transport>,<rpc>:<params>`
    Compact,
    /// `%R1P,<transport>,<transaction>:<rpc>,<params>`
    Leica,
}

impl Default for Dialect {
    fn default() -> Self {
        Dialect::Compact
    }
}

impl Display for Dialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Dialect::Compact => "compact".fmt(f),
            Dialect::Leica => "leica".fmt(f),
        }
    }
}

#[derive(Error, Debug)]
pub enum DialectError {
    #[error("invalid reply dialect '{0}'")]
    BadDialect(String),
}

impl FromStr for Dialect {
    type Err = DialectError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input {
            "compact" => Ok(Dialect::Compact),
            "leica" => Ok(Dialect::Leica),
            _ => Err(DialectError::BadDialect(input.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GeoComReply {
    pub transport: StatusCode,
    pub rpc: StatusCode,
    pub transaction: Option<u32>,
    pub params: Vec<String>,
    pub arity: Option<ArityError>,
}

impl GeoComReply {
    pub fn is_ok(&self) -> bool {
        self.transport.is_ok() && self.rpc.is_ok()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum GsiReply {
    /// `?`
    Ack,
    /// `?<n>`
    AckCode(u32),
    /// `@W<n>` or `@E<n>`
    Error(GsiError),
    /// `<param>/<value>` answer to `CONF`.
    Setting { param: u16, value: String },
    Word(GsiWord),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ParsedReply {
    GeoCom(GeoComReply),
    Gsi(GsiReply),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Parser {
    pub dialect: Dialect,
}

impl Parser {
    pub fn new(dialect: Dialect) -> Self {
        Parser { dialect }
    }

    pub fn parse(&self, raw: &[u8], desc: &CommandDescriptor) -> Result<ParsedReply, ParseError> {
        let text = std::str::from_utf8(raw)
            .ok()
            .filter(|text| text.is_ascii())
            .ok_or(ParseError::NotAscii)?;
        let text = text.trim_end_matches(|c: char| c == '\r' || c == '\n');
        if text.is_empty() {
            return Err(ParseError::Empty);
        }

        match desc.family() {
            Family::GeoCom => self.parse_geocom(text, desc).map(ParsedReply::GeoCom),
            Family::GsiSettings | Family::GsiMeasurement => {
                parse_gsi(text, desc).map(ParsedReply::Gsi)
            }
        }
    }

    fn parse_geocom(&self, text: &str, desc: &CommandDescriptor) -> Result<GeoComReply, ParseError> {
        let (header, body) = text
            .split_once(':')
            .ok_or_else(|| ParseError::MissingDelimiter {
                delimiter: ':',
                reply: text.to_string(),
            })?;

        let fields = header
            .strip_prefix(GEOCOM_REPLY)
            .ok_or_else(|| ParseError::BadHeader(text.to_string()))?;
        let (first, second) = fields
            .split_once(',')
            .ok_or_else(|| ParseError::MissingDelimiter {
                delimiter: ',',
                reply: text.to_string(),
            })?;
        let transport = status_field(first)?;

        let mut params = split_params(body)?;
        let (rpc, transaction) = match self.dialect {
            Dialect::Compact => (status_field(second)?, None),
            Dialect::Leica => {
                if params.is_empty() {
                    return Err(ParseError::BadStatus(String::new()));
                }
                let rpc = status_field(&params.remove(0))?;
                (rpc, Some(numeric(second)?))
            }
        };

        for status in [transport, rpc] {
            if !status.is_known() {
                warn!("{}: unknown return code {}", desc.name(), status.code());
            }
        }

        let arity = if transport.is_ok() && rpc.is_ok() && params.len() != desc.returns() {
            let err = ArityError {
                expected: desc.returns(),
                found: params.len(),
            };
            warn!("{}: {}", desc.name(), err);
            Some(err)
        } else {
            None
        };

        Ok(GeoComReply {
            transport,
            rpc,
            transaction,
            params,
            arity,
        })
    }
}

/// Parses with the compact dialect.
pub fn parse(raw: &[u8], desc: &CommandDescriptor) -> Result<ParsedReply, ParseError> {
    Parser::default().parse(raw, desc)
}

/// Cheap shape check used by the transport guard to decide whether a line
/// is worth handing to the parser or should be retried.
pub fn is_plausible(family: Family, raw: &[u8]) -> bool {
    let text = match std::str::from_utf8(raw) {
        Ok(text) if text.is_ascii() => text.trim_end_matches(|c: char| c == '\r' || c == '\n'),
        _ => return false,
    };
    match family {
        Family::GeoCom => text.starts_with(GEOCOM_REPLY),
        Family::GsiSettings | Family::GsiMeasurement => !text.is_empty(),
    }
}

fn numeric(field: &str) -> Result<u32, ParseError> {
    field
        .trim()
        .parse()
        .map_err(|_| ParseError::BadStatus(field.to_string()))
}

fn status_field(field: &str) -> Result<StatusCode, ParseError> {
    numeric(field).map(StatusCode::from_code)
}

// Commas inside double quoted strings do not separate parameters.
pub(crate) fn split_params(body: &str) -> Result<Vec<String>, ParseError> {
    if body.is_empty() {
        return Ok(Vec::new());
    }

    let mut params = Vec::new();
    let mut current = String::new();
    let mut quoted = false;
    let mut escaped = false;

    for c in body.chars() {
        match c {
            _ if escaped => escaped = false,
            '\\' if quoted => escaped = true,
            '"' => quoted = !quoted,
            ',' if !quoted => {
                params.push(std::mem::take(&mut current));
                continue;
            }
            _ => {}
        }
        current.push(c);
    }

    if quoted {
        return Err(ParseError::UnterminatedString(body.to_string()));
    }
    params.push(current);
    Ok(params)
}

fn parse_gsi(text: &str, desc: &CommandDescriptor) -> Result<GsiReply, ParseError> {
    lazy_static! {
        static ref ACK: Regex = Regex::new(r"^\?(\d+)?$").unwrap();
        static ref ERROR: Regex = Regex::new(r"^@([WE])(\d+)$").unwrap();
        static ref SETTING: Regex = Regex::new(r"^(\d{1,4})/(\d+)$").unwrap();
    }

    if let Some(cap) = ACK.captures(text) {
        return Ok(match cap.get(1) {
            Some(code) => GsiReply::AckCode(
                code.as_str()
                    .parse()
                    .map_err(|_| ParseError::BadStatus(text.to_string()))?,
            ),
            None => GsiReply::Ack,
        });
    }

    if let Some(cap) = ERROR.captures(text) {
        return Ok(GsiReply::Error(GsiError {
            warning: &cap[1] == "W",
            code: cap[2]
                .parse()
                .map_err(|_| ParseError::BadStatus(text.to_string()))?,
        }));
    }

    let unexpected = || ParseError::Unexpected {
        command: desc.name().to_string(),
        reply: text.to_string(),
    };

    let conf = matches!(desc.code(), Code::Setting(_)) && desc.args().is_empty();
    let raw = matches!(desc.code(), Code::Raw(_));

    if conf || raw {
        if let Some(cap) = SETTING.captures(text) {
            return Ok(GsiReply::Setting {
                param: cap[1]
                    .parse()
                    .map_err(|_| ParseError::BadStatus(text.to_string()))?,
                value: cap[2].to_string(),
            });
        }
    }

    match desc.code() {
        Code::Get(..) => GsiWord::parse(text).map(GsiReply::Word),
        _ if conf || raw => GsiWord::parse(text)
            .map(GsiReply::Word)
            .map_err(|_| unexpected()),
        _ => Err(unexpected()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::{Arg, GetMode, WordWidth};

    fn instrument_no() -> CommandDescriptor {
        CommandDescriptor::rpc(5003, vec![], 1)
    }

    fn geocom(reply: ParsedReply) -> GeoComReply {
        match reply {
            ParsedReply::GeoCom(reply) => reply,
            other => panic!("not a GeoCom reply: {:?}", other),
        }
    }

    fn gsi(reply: ParsedReply) -> GsiReply {
        match reply {
            ParsedReply::Gsi(reply) => reply,
            other => panic!("not a GSI reply: {:?}", other),
        }
    }

    #[test]
    fn geocom_success() {
        let reply = geocom(parse(b"%R1P,0,0:610\r\n", &instrument_no()).unwrap());
        assert!(reply.is_ok());
        assert_eq!(reply.params, vec!["610"]);
        assert_eq!(reply.transaction, None);
        assert_eq!(reply.arity, None);
    }

    #[test]
    fn geocom_failure_keeps_statuses() {
        let reply = geocom(parse(b"%R1P,0,2:", &instrument_no()).unwrap());
        assert!(!reply.is_ok());
        assert_eq!(reply.rpc.code(), 2);
        assert_eq!(reply.rpc.name(), "IVPARAM");
        assert!(reply.params.is_empty());
        assert_eq!(reply.arity, None);
    }

    #[test]
    fn geocom_arity_is_recorded() {
        let reply = geocom(parse(b"%R1P,0,0:1,2", &instrument_no()).unwrap());
        assert_eq!(
            reply.arity,
            Some(ArityError {
                expected: 1,
                found: 2
            })
        );
        assert_eq!(reply.params.len(), 2);
    }

    #[test]
    fn geocom_unknown_status() {
        let reply = geocom(parse(b"%R1P,0,64999:", &instrument_no()).unwrap());
        assert_eq!(reply.rpc.name(), "UNKNOWN");
        assert_eq!(reply.rpc.code(), 64999);
    }

    #[test]
    fn geocom_quoted_params() {
        let desc = CommandDescriptor::rpc(5004, vec![], 2);
        let reply = geocom(parse(br#"%R1P,0,0:"a,\"b",'1F'"#, &desc).unwrap());
        assert_eq!(reply.params, vec![r#""a,\"b""#, "'1F'"]);
    }

    #[test]
    fn geocom_leica_dialect() {
        let parser = Parser::new(Dialect::Leica);
        let reply = geocom(parser.parse(b"%R1P,0,7:0,610\r\n", &instrument_no()).unwrap());
        assert!(reply.is_ok());
        assert_eq!(reply.transaction, Some(7));
        assert_eq!(reply.params, vec!["610"]);

        let reply = geocom(parser.parse(b"%R1P,0,0:3077", &instrument_no()).unwrap());
        assert_eq!(reply.rpc.name(), "COM_TIMEDOUT");

        assert_eq!(
            parser.parse(b"%R1P,0,0:", &instrument_no()),
            Err(ParseError::BadStatus(String::new()))
        );
    }

    #[test]
    fn geocom_malformed() {
        let desc = instrument_no();
        assert!(matches!(
            parse(b"%R1P,0,0", &desc),
            Err(ParseError::MissingDelimiter { delimiter: ':', .. })
        ));
        assert!(matches!(
            parse(b"%R1P,0,x:1", &desc),
            Err(ParseError::BadStatus(_))
        ));
        assert!(matches!(
            parse(b"%R1P,0:1", &desc),
            Err(ParseError::MissingDelimiter { delimiter: ',', .. })
        ));
        assert!(matches!(parse(b"R1P,0,0:1", &desc), Err(ParseError::BadHeader(_))));
        assert!(matches!(
            parse(b"%R1P,0,0:\"abc", &desc),
            Err(ParseError::UnterminatedString(_))
        ));
        assert_eq!(parse(b"\r\n", &desc), Err(ParseError::Empty));
        assert_eq!(parse(&[0x25, 0xFF], &desc), Err(ParseError::NotAscii));
    }

    #[test]
    fn gsi_acknowledge() {
        let set = CommandDescriptor::set(30, Arg::unsigned(2));
        assert_eq!(gsi(parse(b"?\r\n", &set).unwrap()), GsiReply::Ack);
        assert_eq!(gsi(parse(b"?12", &set).unwrap()), GsiReply::AckCode(12));
        assert_eq!(
            gsi(parse(b"@W427", &set).unwrap()),
            GsiReply::Error(GsiError {
                warning: true,
                code: 427
            })
        );
        assert!(matches!(
            parse(b"11....+000000A1 ", &set),
            Err(ParseError::Unexpected { .. })
        ));
    }

    #[test]
    fn gsi_conf() {
        let conf = CommandDescriptor::conf(137);
        assert_eq!(
            gsi(parse(b"0137/0001\r\n", &conf).unwrap()),
            GsiReply::Setting {
                param: 137,
                value: "0001".into()
            }
        );
        assert!(matches!(
            parse(b"garbage", &conf),
            Err(ParseError::Unexpected { .. })
        ));
    }

    #[test]
    fn gsi_words() {
        let get = CommandDescriptor::get(GetMode::Measure, 11);
        match gsi(parse(b"11....+000000A1 \r\n", &get).unwrap()) {
            GsiReply::Word(word) => {
                assert_eq!(word.index, 11);
                assert_eq!(word.width, WordWidth::Gsi8);
                assert_eq!(word.value(), "A1");
            }
            other => panic!("unexpected {:?}", other),
        }
        assert!(matches!(
            parse(b"11....+0000A1", &get),
            Err(ParseError::BadWord(_))
        ));
        assert!(matches!(
            gsi(parse(b"@E458", &get).unwrap()),
            GsiReply::Error(GsiError {
                warning: false,
                code: 458
            })
        ));
    }

    #[test]
    fn plausibility() {
        assert!(is_plausible(Family::GeoCom, b"%R1P,0,0:\r\n"));
        assert!(!is_plausible(Family::GeoCom, b"?\r\n"));
        assert!(!is_plausible(Family::GeoCom, b"\r\n"));
        assert!(is_plausible(Family::GsiSettings, b"?\r\n"));
        assert!(!is_plausible(Family::GsiMeasurement, b""));
        assert!(!is_plausible(Family::GsiMeasurement, &[0xC3, 0xA9]));
    }
}
