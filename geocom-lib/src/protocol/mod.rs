pub mod decode;
mod engine;
mod frame;
pub mod gsi;
mod reply;
mod response;
pub mod status;

use std::{borrow::Cow, fmt::Display, str::FromStr};
use thiserror::Error;

pub use engine::{Engine, EngineConfig, TxState};
pub use frame::{build, Frame, Framer, DEFAULT_PRECISION};
pub use gsi::{GetMode, GsiWord, WordWidth};
pub use reply::{is_plausible, parse, Dialect, GeoComReply, GsiReply, ParsedReply, Parser};
pub use response::{Failure, FailureClass, Outcome, Payload, Response, Status};
pub use status::StatusCode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Family {
    GeoCom,
    GsiSettings,
    GsiMeasurement,
}

impl Display for Family {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Family::GeoCom => "geocom".fmt(f),
            Family::GsiSettings => "gsi-settings".fmt(f),
            Family::GsiMeasurement => "gsi-measurement".fmt(f),
        }
    }
}

#[derive(Error, Debug)]
pub enum FamilyError {
    #[error("invalid protocol family '{0}'")]
    BadFamily(String),
}

impl FromStr for Family {
    type Err = FamilyError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input {
            "geocom" => Ok(Family::GeoCom),
            "gsi-settings" => Ok(Family::GsiSettings),
            "gsi-measurement" => Ok(Family::GsiMeasurement),
            _ => Err(FamilyError::BadFamily(input.to_string())),
        }
    }
}

/// Declared type of a request argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgKind {
    Int,
    Unsigned,
    Float,
    Enum,
    Bool,
    Str,
    Byte,
    Bytes,
}

impl Display for ArgKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ArgKind::Int => "int",
            ArgKind::Unsigned => "unsigned",
            ArgKind::Float => "float",
            ArgKind::Enum => "enum",
            ArgKind::Bool => "bool",
            ArgKind::Str => "string",
            ArgKind::Byte => "byte",
            ArgKind::Bytes => "bytes",
        }
        .fmt(f)
    }
}

/// Runtime value of a request argument.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i64),
    Float(f64),
    Bool(bool),
    Str(String),
    Bytes(Vec<u8>),
}

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Bool(_) => "bool",
            Value::Str(_) => "string",
            Value::Bytes(_) => "bytes",
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Int(v) => v.fmt(f),
            Value::Float(v) => v.fmt(f),
            Value::Bool(v) => v.fmt(f),
            Value::Str(v) => write!(f, "{:?}", v),
            Value::Bytes(v) => write!(f, "{:02X?}", v),
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v.into())
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Value::Bytes(v)
    }
}

/// A typed request argument. The value is checked against the kind when
/// the request is framed.
#[derive(Debug, Clone, PartialEq)]
pub struct Arg {
    pub kind: ArgKind,
    pub value: Value,
}

impl Arg {
    pub fn new(kind: ArgKind, value: impl Into<Value>) -> Self {
        Arg {
            kind,
            value: value.into(),
        }
    }

    pub fn int(value: i64) -> Self {
        Arg::new(ArgKind::Int, value)
    }

    pub fn unsigned(value: i64) -> Self {
        Arg::new(ArgKind::Unsigned, value)
    }

    pub fn float(value: f64) -> Self {
        Arg::new(ArgKind::Float, value)
    }

    pub fn enumeration(value: i64) -> Self {
        Arg::new(ArgKind::Enum, value)
    }

    pub fn boolean(value: bool) -> Self {
        Arg::new(ArgKind::Bool, value)
    }

    pub fn string(value: impl Into<String>) -> Self {
        Arg::new(ArgKind::Str, value.into())
    }

    pub fn byte(value: i64) -> Self {
        Arg::new(ArgKind::Byte, value)
    }

    pub fn bytes(value: Vec<u8>) -> Self {
        Arg::new(ArgKind::Bytes, value)
    }
}

/// Symbolic code of a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Code {
    /// GeoCom remote procedure number.
    Rpc(u16),
    /// GSI Online parameter: `SET` with a value, `CONF` without.
    Setting(u16),
    /// GSI Online word query.
    Get(GetMode, u16),
    /// GSI Online word upload.
    Put(u16),
    /// Verbatim GSI Online command line, e.g. `BEEP/0`.
    Raw(Cow<'static, str>),
}

impl Code {
    pub fn family(&self) -> Family {
        match self {
            Code::Rpc(_) => Family::GeoCom,
            Code::Setting(_) | Code::Raw(_) => Family::GsiSettings,
            Code::Get(..) | Code::Put(_) => Family::GsiMeasurement,
        }
    }
}

/// Immutable description of one request.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandDescriptor {
    name: Cow<'static, str>,
    code: Code,
    args: Vec<Arg>,
    returns: usize,
}

impl CommandDescriptor {
    pub fn rpc(rpc: u16, args: Vec<Arg>, returns: usize) -> Self {
        CommandDescriptor {
            name: Cow::Owned(format!("RPC {}", rpc)),
            code: Code::Rpc(rpc),
            args,
            returns,
        }
    }

    pub fn set(param: u16, value: Arg) -> Self {
        CommandDescriptor {
            name: Cow::Owned(format!("SET {}", param)),
            code: Code::Setting(param),
            args: vec![value],
            returns: 0,
        }
    }

    pub fn conf(param: u16) -> Self {
        CommandDescriptor {
            name: Cow::Owned(format!("CONF {}", param)),
            code: Code::Setting(param),
            args: Vec::new(),
            returns: 1,
        }
    }

    pub fn get(mode: GetMode, word_index: u16) -> Self {
        CommandDescriptor {
            name: Cow::Owned(format!("GET {} WI{}", mode, word_index)),
            code: Code::Get(mode, word_index),
            args: Vec::new(),
            returns: 1,
        }
    }

    pub fn put(word_index: u16, data: Arg) -> Self {
        CommandDescriptor {
            name: Cow::Owned(format!("PUT WI{}", word_index)),
            code: Code::Put(word_index),
            args: vec![data],
            returns: 0,
        }
    }

    pub fn raw(command: impl Into<Cow<'static, str>>) -> Self {
        let command = command.into();
        CommandDescriptor {
            name: command.clone(),
            code: Code::Raw(command),
            args: Vec::new(),
            returns: 0,
        }
    }

    pub(crate) fn from_parts(
        name: &'static str,
        code: Code,
        args: Vec<Arg>,
        returns: usize,
    ) -> Self {
        CommandDescriptor {
            name: Cow::Borrowed(name),
            code,
            args,
            returns,
        }
    }

    /// Same request under a symbolic name, used in logs and responses.
    pub fn named(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.name = name.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn family(&self) -> Family {
        self.code.family()
    }

    pub fn code(&self) -> &Code {
        &self.code
    }

    pub fn args(&self) -> &[Arg] {
        &self.args
    }

    /// Expected number of GeoCom return parameters.
    pub fn returns(&self) -> usize {
        self.returns
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EncodingError {
    #[error("argument {index}: expected {expected}, got {found}")]
    KindMismatch {
        index: usize,
        expected: ArgKind,
        found: &'static str,
    },
    #[error("argument {index}: {value} is out of range for {kind}")]
    OutOfRange {
        index: usize,
        kind: ArgKind,
        value: String,
    },
    #[error("argument {index}: character {ch:?} cannot be sent")]
    BadCharacter { index: usize, ch: char },
    #[error("expected {expected} argument(s), got {found}")]
    ArgumentCount { expected: usize, found: usize },
    #[error("GSI word index {0} out of range")]
    WordIndex(u16),
    #[error("{data:?} does not fit a {width} word")]
    WordOverflow { data: String, width: WordWidth },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("empty reply")]
    Empty,
    #[error("reply is not ASCII")]
    NotAscii,
    #[error("missing '{delimiter}' in {reply:?}")]
    MissingDelimiter { delimiter: char, reply: String },
    #[error("unexpected reply header in {0:?}")]
    BadHeader(String),
    #[error("non-numeric status field {0:?}")]
    BadStatus(String),
    #[error("unterminated string parameter in {0:?}")]
    UnterminatedString(String),
    #[error("truncated or malformed GSI word {0:?}")]
    BadWord(String),
    #[error("unexpected reply {reply:?} to {command}")]
    Unexpected { command: String, reply: String },
}

/// Return parameter count differs from the command's declared shape.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("expected {expected} return parameter(s), got {found}")]
pub struct ArityError {
    pub expected: usize,
    pub found: usize,
}
