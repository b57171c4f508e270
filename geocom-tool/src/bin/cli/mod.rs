use anyhow::Result;
pub use clap::StructOpt;
use clap::{Parser, Subcommand};
use hex::FromHex;
use lazy_static::lazy_static;
use regex::Regex;
use std::ops::Deref;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

use geocom_lib::commands::Instrument;
use geocom_lib::protocol::{Arg, ArgKind, Dialect, GetMode, Value};

#[derive(Error, Debug)]
pub enum ArgError {
    #[error("invalid argument '{0}'")]
    BadArgument(String),
    #[error("invalid {kind} argument '{value}'")]
    BadValue { kind: ArgKind, value: String },
    #[error("invalid timeout '{0}'")]
    BadTimeout(String),
}

/// Command line argument with an explicit or guessed wire type.
///
/// `i:-5`, `u:0x10`, `f:1.5`, `b:1`, `s:text`, `x:0A1B`, or a bare value
/// whose type is inferred.
#[derive(Debug)]
pub struct TypedArg(Arg);

impl Deref for TypedArg {
    type Target = Arg;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<TypedArg> for Arg {
    fn from(arg: TypedArg) -> Self {
        arg.0
    }
}

impl FromStr for TypedArg {
    type Err = ArgError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        lazy_static! {
            static ref RE: Regex = Regex::new(r"^([iufbsx]):(.*)$").unwrap();
        }

        let arg = match RE.captures(input) {
            Some(c) => {
                let kind = match &c[1] {
                    "i" => ArgKind::Int,
                    "u" => ArgKind::Unsigned,
                    "f" => ArgKind::Float,
                    "b" => ArgKind::Bool,
                    "s" => ArgKind::Str,
                    _ => ArgKind::Bytes,
                };
                Arg::new(kind, parse_value(kind, &c[2])?)
            }
            None => infer(input),
        };
        Ok(TypedArg(arg))
    }
}

fn infer(input: &str) -> Arg {
    if let Ok(value) = parse_with_radix::<i64>(input) {
        Arg::int(value)
    } else if let Ok(value) = input.parse::<f64>() {
        Arg::float(value)
    } else {
        Arg::string(input)
    }
}

/// Converts command line text to a value of the given wire type.
pub fn parse_value(kind: ArgKind, input: &str) -> Result<Value, ArgError> {
    let bad = || ArgError::BadValue {
        kind,
        value: input.to_string(),
    };
    Ok(match kind {
        ArgKind::Int | ArgKind::Unsigned | ArgKind::Enum | ArgKind::Byte => {
            Value::Int(parse_with_radix(input).map_err(|_| bad())?)
        }
        ArgKind::Float => Value::Float(input.parse().map_err(|_| bad())?),
        ArgKind::Bool => match input.to_ascii_lowercase().as_str() {
            "1" | "true" | "on" => Value::Bool(true),
            "0" | "false" | "off" => Value::Bool(false),
            _ => return Err(bad()),
        },
        ArgKind::Str => Value::Str(input.to_string()),
        ArgKind::Bytes => Value::Bytes(Vec::from_hex(input).map_err(|_| bad())?),
    })
}

pub fn parse_with_radix<T>(input: &str) -> Result<T, T::FromStrRadixErr>
where
    T: num::Num,
    <T as num::Num>::FromStrRadixErr: std::error::Error + Send + Sync,
{
    if input.starts_with("0x") {
        T::from_str_radix(input.trim_start_matches("0x"), 16)
    } else if input.starts_with("0b") {
        T::from_str_radix(input.trim_start_matches("0b"), 2)
    } else {
        T::from_str_radix(input, 10)
    }
}

fn parse_timeout(input: &str) -> Result<Duration, ArgError> {
    match input.parse::<f64>() {
        Ok(secs) if secs.is_finite() && secs > 0.0 => Ok(Duration::from_secs_f64(secs)),
        _ => Err(ArgError::BadTimeout(input.to_string())),
    }
}

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
pub struct Cli {
    /// Skip sanity checks
    #[clap(long, short)]
    pub force: bool,

    /// enable debug output
    #[clap(long, short)]
    pub debug: bool,

    /// Serial device or 'auto'
    #[clap(long, short, default_value = "auto")]
    pub port: String,

    /// Serial baud rate
    #[clap(long, short, default_value_t = 9600)]
    pub baudrate: u32,

    /// Reply timeout in seconds
    #[clap(long, short, default_value = "15", parse(try_from_str = parse_timeout))]
    pub timeout: Duration,

    /// Extra attempts after a timeout or garbled reply
    #[clap(long, short, default_value_t = 0)]
    pub retries: usize,

    /// Send the wake-up sequence before the first request
    #[clap(long, short)]
    pub wakeup: bool,

    /// Instrument profile
    #[clap(long, short, default_value = "tps1200p")]
    pub instrument: Instrument,

    /// Reply header layout (compact or leica), overriding the profile
    #[clap(long)]
    pub dialect: Option<Dialect>,

    /// Use json-formatted output
    #[clap(long, short)]
    pub json: bool,

    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List known instrument profiles
    ListInstruments,

    /// List commands for an instrument
    ListCommands { instrument: Instrument },

    /// Send a GeoCom request by RPC number
    Rpc {
        #[clap(parse(try_from_str=parse_with_radix))]
        code: u16,
        /// Arguments, optionally typed as i:, u:, f:, b:, s: or x:
        #[clap(allow_hyphen_values = true)]
        args: Vec<TypedArg>,
        /// Expected return parameter count, when the RPC is not in the table
        #[clap(long)]
        returns: Option<usize>,
    },

    /// Run a command from the instrument's table
    Call {
        name: String,
        #[clap(allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// Change a GSI setting
    Set {
        param: u16,
        #[clap(allow_hyphen_values = true)]
        value: TypedArg,
    },

    /// Read a GSI setting
    Conf { param: u16 },

    /// Read a GSI data word (mode M, I or C)
    Get { mode: GetMode, index: u16 },

    /// Upload a GSI data word
    Put {
        index: u16,
        #[clap(allow_hyphen_values = true)]
        data: String,
    },

    /// Send a raw GSI command line
    Raw { command: String },
}
