mod db;

use itertools::Itertools;
use std::{fmt::Display, str::FromStr, time::Duration};
use thiserror::Error;

use crate::port::{GuardConfig, WakeUp};
use crate::protocol::{
    Arg, ArgKind, Code, CommandDescriptor, Dialect, EncodingError, EngineConfig, GetMode, Value,
};
use db::COMMANDS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Instrument {
    Tps1000,
    Tps1100,
    Tps1200p,
    VivaTps,
    Dna,
}

impl Instrument {
    pub fn is_geocom(self) -> bool {
        !matches!(self, Instrument::Dna)
    }

    pub fn dialect(self) -> Dialect {
        if self.is_geocom() {
            Dialect::Leica
        } else {
            Dialect::Compact
        }
    }

    pub fn wake_up(self) -> WakeUp {
        if self.is_geocom() {
            WakeUp::geocom()
        } else {
            WakeUp::gsi()
        }
    }

    /// Guard settings for this instrument with the given reply timeout and
    /// attempt count.
    pub fn guard_config(self, timeout: Duration, attempts: usize) -> GuardConfig {
        GuardConfig {
            timeout,
            attempts,
            wake_up: Some(self.wake_up()),
            ..GuardConfig::default()
        }
    }

    pub fn engine_config(self) -> EngineConfig {
        EngineConfig {
            dialect: self.dialect(),
            ..EngineConfig::default()
        }
    }
}

impl Display for Instrument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Instrument::Tps1000 => "tps1000".fmt(f),
            Instrument::Tps1100 => "tps1100".fmt(f),
            Instrument::Tps1200p => "tps1200p".fmt(f),
            Instrument::VivaTps => "vivatps".fmt(f),
            Instrument::Dna => "dna".fmt(f),
        }
    }
}

#[derive(Error, Debug)]
pub enum InstrumentError {
    #[error("invalid instrument '{0}'")]
    BadInstrument(String),
}

impl FromStr for Instrument {
    type Err = InstrumentError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input.to_ascii_lowercase().as_str() {
            "tps1000" => Ok(Instrument::Tps1000),
            "tps1100" => Ok(Instrument::Tps1100),
            "tps1200p" | "tps1200+" => Ok(Instrument::Tps1200p),
            "vivatps" => Ok(Instrument::VivaTps),
            "dna" => Ok(Instrument::Dna),
            _ => Err(InstrumentError::BadInstrument(input.to_string())),
        }
    }
}

/// Wire operation of a table entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Rpc(u16),
    /// `CONF` without a value, `SET` with one.
    Setting(u16),
    Get(GetMode, u16),
    Put(u16),
    Raw(&'static str),
}

impl Display for Op {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Op::Rpc(rpc) => write!(f, "RPC {}", rpc),
            Op::Setting(param) => write!(f, "SET/CONF {}", param),
            Op::Get(mode, index) => write!(f, "GET/{}/WI{}", mode, index),
            Op::Put(index) => write!(f, "PUT WI{}", index),
            Op::Raw(command) => command.fmt(f),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CommandSpec {
    pub name: &'static str,
    pub instruments: &'static [Instrument],
    pub op: Op,
    pub args: &'static [ArgKind],
    pub returns: usize,
}

impl CommandSpec {
    pub const fn new(
        name: &'static str,
        instruments: &'static [Instrument],
        op: Op,
        args: &'static [ArgKind],
        returns: usize,
    ) -> Self {
        CommandSpec {
            name,
            instruments,
            op,
            args,
            returns,
        }
    }

    pub fn supports(&self, instrument: Instrument) -> bool {
        self.instruments.contains(&instrument)
    }

    /// Builds a descriptor from runtime values, checked against the table
    /// shape. A setting takes no value to read it or one value to change it.
    pub fn descriptor(&self, values: Vec<Value>) -> Result<CommandDescriptor, EncodingError> {
        let found = values.len();
        let count = |expected: usize| {
            if found == expected {
                Ok(())
            } else {
                Err(EncodingError::ArgumentCount { expected, found })
            }
        };

        let (code, args) = match self.op {
            Op::Rpc(rpc) => {
                count(self.args.len())?;
                (Code::Rpc(rpc), self.typed(values))
            }
            Op::Setting(param) if values.is_empty() => (Code::Setting(param), Vec::new()),
            Op::Setting(param) => {
                count(self.args.len().min(1))?;
                (Code::Setting(param), self.typed(values))
            }
            Op::Get(mode, index) => {
                count(0)?;
                (Code::Get(mode, index), Vec::new())
            }
            Op::Put(index) => {
                count(1)?;
                (Code::Put(index), self.typed(values))
            }
            Op::Raw(command) => {
                count(0)?;
                (Code::Raw(command.into()), Vec::new())
            }
        };

        let returns = match self.op {
            Op::Setting(_) if args.is_empty() => 1,
            _ => self.returns,
        };
        Ok(CommandDescriptor::from_parts(self.name, code, args, returns))
    }

    fn typed(&self, values: Vec<Value>) -> Vec<Arg> {
        self.args
            .iter()
            .zip(values)
            .map(|(kind, value)| Arg::new(*kind, value))
            .collect()
    }
}

impl Display for CommandSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:<16} {:<32} ({})",
            self.op.to_string(),
            self.name,
            self.args.iter().join(", ")
        )
    }
}

pub fn list_instruments() -> Vec<Instrument> {
    COMMANDS
        .iter()
        .flat_map(|cmd| cmd.instruments.iter().copied())
        .unique()
        .sorted()
        .collect()
}

pub fn list_commands(instrument: Instrument) -> Vec<&'static CommandSpec> {
    COMMANDS
        .iter()
        .filter(|cmd| cmd.supports(instrument))
        .sorted_by_key(|cmd| cmd.name)
        .collect()
}

pub fn find_command(instrument: Instrument, name: &str) -> Option<&'static CommandSpec> {
    COMMANDS
        .iter()
        .find(|cmd| cmd.supports(instrument) && cmd.name.eq_ignore_ascii_case(name))
}

pub fn find_rpc(instrument: Instrument, rpc: u16) -> Option<&'static CommandSpec> {
    COMMANDS
        .iter()
        .find(|cmd| cmd.supports(instrument) && cmd.op == Op::Rpc(rpc))
}
