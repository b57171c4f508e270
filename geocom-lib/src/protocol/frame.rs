use std::fmt::Display;

use super::{Arg, ArgKind, Code, CommandDescriptor, EncodingError, GsiWord, Value, WordWidth};

/// Float precision of a freshly started GeoCom session.
pub const DEFAULT_PRECISION: usize = 15;

pub const GEOCOM_REQUEST: &str = "%R1Q,";
pub const LINE_END: &[u8] = b"\r\n";

/// One request line ready for the wire. Built fresh per request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    line: String,
}

impl Frame {
    pub fn line(&self) -> &str {
        &self.line
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.line.len() + LINE_END.len());
        bytes.extend_from_slice(self.line.as_bytes());
        bytes.extend_from_slice(LINE_END);
        bytes
    }
}

impl Display for Frame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.line.fmt(f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Framer {
    pub precision: usize,
    pub width: WordWidth,
}

impl Default for Framer {
    fn default() -> Self {
        Framer {
            precision: DEFAULT_PRECISION,
            width: WordWidth::default(),
        }
    }
}

impl Framer {
    pub fn new(precision: usize, width: WordWidth) -> Self {
        Framer { precision, width }
    }

    pub fn build(&self, desc: &CommandDescriptor) -> Result<Frame, EncodingError> {
        let line = match desc.code() {
            Code::Rpc(rpc) => {
                let args: Vec<String> = desc
                    .args()
                    .iter()
                    .enumerate()
                    .map(|(index, arg)| self.encode(index, arg))
                    .collect::<Result<_, _>>()?;
                format!("{}{}:{}", GEOCOM_REQUEST, rpc, args.join(","))
            }
            Code::Setting(param) => match desc.args() {
                [] => format!("CONF/{}", param),
                [value] => format!("SET/{}/{}", param, setting_value(value)?),
                args => {
                    return Err(EncodingError::ArgumentCount {
                        expected: 1,
                        found: args.len(),
                    })
                }
            },
            Code::Get(mode, index) => {
                expect_count(desc, 0)?;
                format!("GET/{}/WI{}", mode, index)
            }
            Code::Put(index) => {
                expect_count(desc, 1)?;
                let data = match &desc.args()[0].value {
                    Value::Str(data) => data.clone(),
                    Value::Int(data) => data.to_string(),
                    other => {
                        return Err(EncodingError::KindMismatch {
                            index: 0,
                            expected: ArgKind::Str,
                            found: other.type_name(),
                        })
                    }
                };
                format!("PUT/{}", GsiWord::new(*index, &data, self.width)?.format())
            }
            Code::Raw(command) => {
                expect_count(desc, 0)?;
                check_line(0, command)?;
                command.to_string()
            }
        };
        Ok(Frame { line })
    }

    fn encode(&self, index: usize, arg: &Arg) -> Result<String, EncodingError> {
        let mismatch = || EncodingError::KindMismatch {
            index,
            expected: arg.kind,
            found: arg.value.type_name(),
        };
        let out_of_range = || EncodingError::OutOfRange {
            index,
            kind: arg.kind,
            value: arg.value.to_string(),
        };

        match (arg.kind, &arg.value) {
            (ArgKind::Int, Value::Int(v)) => Ok(v.to_string()),
            (ArgKind::Unsigned | ArgKind::Enum, Value::Int(v)) => {
                if *v < 0 {
                    Err(out_of_range())
                } else {
                    Ok(v.to_string())
                }
            }
            (ArgKind::Float, Value::Float(v)) => {
                if v.is_finite() {
                    Ok(format_float(*v, self.precision))
                } else {
                    Err(out_of_range())
                }
            }
            (ArgKind::Bool, Value::Bool(v)) => Ok(if *v { "1" } else { "0" }.to_string()),
            (ArgKind::Str, Value::Str(v)) => {
                check_line(index, v)?;
                Ok(format!("\"{}\"", v.replace('\\', "\\\\").replace('"', "\\\"")))
            }
            (ArgKind::Byte, Value::Int(v)) => match u8::try_from(*v) {
                Ok(byte) => Ok(format!("'{:02X}'", byte)),
                Err(_) => Err(out_of_range()),
            },
            (ArgKind::Bytes, Value::Bytes(v)) => Ok(hex::encode_upper(v)),
            _ => Err(mismatch()),
        }
    }
}

/// Frames `desc` with the session defaults.
pub fn build(desc: &CommandDescriptor) -> Result<Frame, EncodingError> {
    Framer::default().build(desc)
}

/// Fixed point with trailing zeros trimmed, keeping one fractional digit.
pub fn format_float(value: f64, precision: usize) -> String {
    let mut text = format!("{:.*}", precision, value);
    if text.contains('.') {
        let trimmed = text.trim_end_matches('0').len();
        text.truncate(trimmed);
    }
    if text.ends_with('.') {
        text.push('0');
    } else if !text.contains('.') {
        text.push_str(".0");
    }
    if text == "-0.0" {
        text.remove(0);
    }
    text
}

fn setting_value(arg: &Arg) -> Result<String, EncodingError> {
    match &arg.value {
        Value::Int(v) if *v >= 0 || arg.kind == ArgKind::Int => Ok(v.to_string()),
        Value::Bool(v) => Ok(if *v { "1" } else { "0" }.to_string()),
        Value::Str(v) if !v.is_empty() && v.chars().all(|c| c.is_ascii_alphanumeric()) => {
            Ok(v.clone())
        }
        Value::Int(_) | Value::Str(_) => Err(EncodingError::OutOfRange {
            index: 0,
            kind: arg.kind,
            value: arg.value.to_string(),
        }),
        other => Err(EncodingError::KindMismatch {
            index: 0,
            expected: arg.kind,
            found: other.type_name(),
        }),
    }
}

fn expect_count(desc: &CommandDescriptor, expected: usize) -> Result<(), EncodingError> {
    if desc.args().len() == expected {
        Ok(())
    } else {
        Err(EncodingError::ArgumentCount {
            expected,
            found: desc.args().len(),
        })
    }
}

fn check_line(index: usize, text: &str) -> Result<(), EncodingError> {
    match text.chars().find(|&c| c == '\r' || c == '\n' || !c.is_ascii()) {
        Some(ch) => Err(EncodingError::BadCharacter { index, ch }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::reply::split_params;
    use crate::protocol::{decode, GetMode};

    fn line(desc: &CommandDescriptor) -> String {
        build(desc).unwrap().line().to_string()
    }

    #[test]
    fn geocom_no_args() {
        let frame = build(&CommandDescriptor::rpc(5003, vec![], 1)).unwrap();
        assert_eq!(frame.line(), "%R1Q,5003:");
        assert_eq!(frame.to_bytes(), b"%R1Q,5003:\r\n".to_vec());
    }

    #[test]
    fn geocom_args() {
        let desc = CommandDescriptor::rpc(
            9027,
            vec![
                Arg::float(1.5),
                Arg::float(2.0),
                Arg::enumeration(0),
                Arg::enumeration(1),
                Arg::boolean(false),
            ],
            0,
        );
        assert_eq!(line(&desc), "%R1Q,9027:1.5,2.0,0,1,0");
    }

    #[test]
    fn geocom_strings_and_bytes() {
        let desc = CommandDescriptor::rpc(
            1,
            vec![
                Arg::string(r#"a"b\c"#),
                Arg::byte(0x1F),
                Arg::bytes(vec![0x00, 0xAB, 0x10]),
                Arg::int(-7),
            ],
            0,
        );
        assert_eq!(line(&desc), r#"%R1Q,1:"a\"b\\c",'1F',00AB10,-7"#);
    }

    #[test]
    fn arguments_survive_reply_decoding() {
        let text = r#"say "hi", \ bye"#;
        let desc = CommandDescriptor::rpc(
            1,
            vec![
                Arg::int(-42),
                Arg::unsigned(7),
                Arg::enumeration(3),
                Arg::boolean(true),
                Arg::string(text),
                Arg::byte(0xA5),
                Arg::bytes(vec![0x00, 0x7F, 0xFF]),
            ],
            0,
        );
        let frame = build(&desc).unwrap();
        let (_, body) = frame.line().split_once(':').unwrap();
        let params = split_params(body).unwrap();
        assert_eq!(params.len(), 7);

        assert_eq!(decode::int(&params[0]).unwrap(), -42);
        assert_eq!(decode::unsigned(&params[1]).unwrap(), 7);
        assert_eq!(decode::unsigned(&params[2]).unwrap(), 3);
        assert!(decode::boolean(&params[3]).unwrap());
        assert_eq!(decode::string(&params[4]).unwrap(), text);
        assert_eq!(decode::byte(&params[5]).unwrap(), 0xA5);
        assert_eq!(decode::bytes(&params[6]).unwrap(), vec![0x00, 0x7F, 0xFF]);
    }

    #[test]
    fn floats_survive_reply_decoding() {
        for precision in [0, 2, 6, 15] {
            let framer = Framer::new(precision, WordWidth::Gsi8);
            for value in [1.5, -12.345678, 0.1, 1234.000001] {
                let desc = CommandDescriptor::rpc(2012, vec![Arg::float(value)], 0);
                let frame = framer.build(&desc).unwrap();
                let (_, body) = frame.line().split_once(':').unwrap();
                let params = split_params(body).unwrap();

                let expected: f64 = format!("{:.*}", precision, value).parse().unwrap();
                assert_eq!(
                    decode::float(&params[0]).unwrap(),
                    expected,
                    "{} at precision {}",
                    value,
                    precision
                );
            }
        }
    }

    #[test]
    fn framing_is_idempotent() {
        let desc = CommandDescriptor::rpc(2010, vec![Arg::float(0.1); 4], 0);
        assert_eq!(build(&desc).unwrap(), build(&desc).unwrap());
    }

    #[test]
    fn float_precision() {
        assert_eq!(format_float(2.0, 15), "2.0");
        assert_eq!(format_float(0.1, 15), "0.1");
        assert_eq!(format_float(1.23456789, 4), "1.2346");
        assert_eq!(format_float(-0.00001, 3), "0.0");
        assert_eq!(format_float(3.0, 0), "3.0");
        assert_eq!(format_float(-12.5, 2), "-12.5");

        let framer = Framer::new(3, WordWidth::Gsi8);
        let desc = CommandDescriptor::rpc(2012, vec![Arg::float(1.23456)], 0);
        assert_eq!(framer.build(&desc).unwrap().line(), "%R1Q,2012:1.235");
    }

    #[test]
    fn rejects_bad_values() {
        let cases = [
            Arg::unsigned(-1),
            Arg::enumeration(-3),
            Arg::byte(256),
            Arg::float(f64::NAN),
            Arg::float(f64::INFINITY),
        ];
        for arg in cases {
            assert!(matches!(
                build(&CommandDescriptor::rpc(1, vec![arg], 0)),
                Err(EncodingError::OutOfRange { index: 0, .. })
            ));
        }

        for text in ["a\r\nb", "é"] {
            assert!(matches!(
                build(&CommandDescriptor::rpc(1, vec![Arg::string(text)], 0)),
                Err(EncodingError::BadCharacter { index: 0, .. })
            ));
        }

        assert!(matches!(
            build(&CommandDescriptor::rpc(1, vec![Arg::new(ArgKind::Float, 1)], 0)),
            Err(EncodingError::KindMismatch { index: 0, .. })
        ));
    }

    #[test]
    fn gsi_settings() {
        assert_eq!(line(&CommandDescriptor::set(30, Arg::unsigned(2))), "SET/30/2");
        assert_eq!(line(&CommandDescriptor::conf(137)), "CONF/137");
        assert_eq!(line(&CommandDescriptor::raw("BEEP/0")), "BEEP/0");
        assert!(build(&CommandDescriptor::set(30, Arg::unsigned(-2))).is_err());
    }

    #[test]
    fn gsi_measurement() {
        assert_eq!(
            line(&CommandDescriptor::get(GetMode::Measure, 11)),
            "GET/M/WI11"
        );
        assert_eq!(
            line(&CommandDescriptor::put(11, Arg::string("A1"))),
            "PUT/11....+000000A1 "
        );

        let framer = Framer::new(DEFAULT_PRECISION, WordWidth::Gsi16);
        let desc = CommandDescriptor::put(71, Arg::string("NOTE"));
        assert_eq!(
            framer.build(&desc).unwrap().line(),
            "PUT/*71....+000000000000NOTE "
        );
    }

    #[test]
    fn put_overflow() {
        let desc = CommandDescriptor::put(11, Arg::string("123456789"));
        assert!(matches!(
            build(&desc),
            Err(EncodingError::WordOverflow { .. })
        ));
    }
}
