use log::{debug, warn};

use super::decode::{self, DecodeError};
use super::frame::{Framer, DEFAULT_PRECISION};
use super::gsi::{WordWidth, WORD_WIDTH_SETTING};
use super::reply::{is_plausible, Dialect, Parser};
use super::{Code, CommandDescriptor, Payload, Response, Value};
use crate::port::{Guard, Phase, Transport};
use crate::Result;

const RPC_SET_DOUBLE_PRECISION: u16 = 107;
const RPC_GET_DOUBLE_PRECISION: u16 = 108;

/// Progress of the current transaction. A transaction that fails while
/// framing or parsing stays at that stage; `Faulted` means the link failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxState {
    Idle,
    Framing,
    Transmitting,
    AwaitingReply,
    Retrying,
    Parsing,
    Resolved,
    Faulted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    pub dialect: Dialect,
    pub precision: usize,
    pub width: WordWidth,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            dialect: Dialect::default(),
            precision: DEFAULT_PRECISION,
            width: WordWidth::default(),
        }
    }
}

pub struct Engine<T: Transport> {
    guard: Guard<T>,
    framer: Framer,
    parser: Parser,
    state: TxState,
    trace: Vec<TxState>,
}

fn record(trace: &mut Vec<TxState>, state: &mut TxState, next: TxState) {
    if *state != next {
        debug!("tx {:?} -> {:?}", state, next);
        *state = next;
        trace.push(next);
    }
}

impl<T: Transport> Engine<T> {
    pub fn new(guard: Guard<T>, config: EngineConfig) -> Self {
        Engine {
            guard,
            framer: Framer::new(config.precision, config.width),
            parser: Parser::new(config.dialect),
            state: TxState::Idle,
            trace: vec![TxState::Idle],
        }
    }

    pub fn config(&self) -> EngineConfig {
        EngineConfig {
            dialect: self.parser.dialect,
            precision: self.framer.precision,
            width: self.framer.width,
        }
    }

    /// State reached by the last transaction.
    pub fn state(&self) -> TxState {
        self.state
    }

    /// States the last transaction went through, starting with `Idle`.
    pub fn trace(&self) -> &[TxState] {
        &self.trace
    }

    pub fn guard(&self) -> &Guard<T> {
        &self.guard
    }

    pub fn guard_mut(&mut self) -> &mut Guard<T> {
        &mut self.guard
    }

    pub fn into_guard(self) -> Guard<T> {
        self.guard
    }

    fn enter(&mut self, next: TxState) {
        record(&mut self.trace, &mut self.state, next);
    }

    /// Runs one transaction. Link failures and malformed replies are
    /// raised; instrument-side rejections come back as a failed response.
    pub fn execute(&mut self, desc: &CommandDescriptor) -> Result<Response> {
        self.state = TxState::Idle;
        self.trace.clear();
        self.trace.push(TxState::Idle);

        self.enter(TxState::Framing);
        let frame = self.framer.build(desc)?;
        debug!("{}: {}", desc.name(), frame);

        let family = desc.family();
        let timeout = self.guard.config().timeout;
        let trace = &mut self.trace;
        let state = &mut self.state;
        let exchanged = self.guard.exchange_with(
            &frame.to_bytes(),
            timeout,
            |raw| is_plausible(family, raw),
            |phase| match phase {
                Phase::WakeUp { .. } | Phase::Transmit { .. } => {
                    record(trace, state, TxState::Transmitting)
                }
                Phase::Await { .. } => record(trace, state, TxState::AwaitingReply),
                Phase::Retry { .. } => record(trace, state, TxState::Retrying),
                Phase::Idle | Phase::Done | Phase::Fault => {}
            },
        );
        let raw = match exchanged {
            Ok(raw) => raw,
            Err(e) => {
                self.enter(TxState::Faulted);
                return Err(e);
            }
        };

        self.enter(TxState::Parsing);
        let parsed = self.parser.parse(&raw, desc)?;

        let response = Response::from_reply(desc, frame.line(), &raw, parsed);
        self.enter(TxState::Resolved);
        self.follow_session(desc, &response);
        Ok(response)
    }

    /// Like [`execute`](Self::execute), then decodes the payload.
    pub fn execute_with<U, F>(&mut self, desc: &CommandDescriptor, decode: F) -> Result<Response<U>>
    where
        F: FnOnce(&Payload) -> std::result::Result<U, DecodeError>,
    {
        Ok(self.execute(desc)?.map_payload(decode))
    }

    /// Like [`execute`](Self::execute), but a failed exchange becomes a
    /// `Communication` failure response instead of an error.
    pub fn request(&mut self, desc: &CommandDescriptor) -> Result<Response> {
        match self.execute(desc) {
            Err(e) if e.is_transport() => {
                let command = self
                    .framer
                    .build(desc)
                    .map(|frame| frame.line().to_string())
                    .unwrap_or_default();
                Ok(Response::communication(desc, &command, e.to_string()))
            }
            result => result,
        }
    }

    /// Reads the float precision of the instrument and uses it for
    /// subsequent requests.
    pub fn sync_precision(&mut self) -> Result<Response<u64>> {
        let desc = CommandDescriptor::rpc(RPC_GET_DOUBLE_PRECISION, Vec::new(), 1)
            .named("COM_GetDoublePrecision");
        let response = self.execute_with(&desc, |p| decode::param(p, 0, decode::unsigned))?;
        if let Some(precision) = response.payload() {
            self.set_precision(*precision as usize);
        }
        Ok(response)
    }

    /// Reads the GSI word width of the instrument and uses it for
    /// subsequent `PUT` requests.
    pub fn sync_word_width(&mut self) -> Result<Response<WordWidth>> {
        let desc = CommandDescriptor::conf(WORD_WIDTH_SETTING).named("GSI Type");
        let response = self.execute_with(&desc, |p| {
            let value = decode::param(p, 0, decode::unsigned)?;
            u32::try_from(value)
                .ok()
                .and_then(WordWidth::from_setting)
                .ok_or_else(|| DecodeError::Invalid {
                    kind: "word width",
                    value: value.to_string(),
                })
        })?;
        if let Some(width) = response.payload() {
            self.set_width(*width);
        }
        Ok(response)
    }

    fn set_precision(&mut self, precision: usize) {
        if self.framer.precision != precision {
            debug!("float precision {} -> {}", self.framer.precision, precision);
            self.framer.precision = precision;
        }
    }

    fn set_width(&mut self, width: WordWidth) {
        if self.framer.width != width {
            debug!("word width {} -> {}", self.framer.width, width);
            self.framer.width = width;
        }
    }

    // Successful setters change how later requests must be framed.
    fn follow_session(&mut self, desc: &CommandDescriptor, response: &Response) {
        if !response.is_success() {
            return;
        }
        let value = match desc.args().first().map(|arg| &arg.value) {
            Some(Value::Int(value)) => Some(*value),
            Some(Value::Bool(value)) => Some(*value as i64),
            _ => None,
        };
        match (desc.code(), value) {
            (Code::Rpc(RPC_SET_DOUBLE_PRECISION), Some(value)) if value >= 0 => {
                self.set_precision(value as usize)
            }
            (Code::Setting(WORD_WIDTH_SETTING), Some(value)) => {
                if let Some(width) = u32::try_from(value).ok().and_then(WordWidth::from_setting) {
                    self.set_width(width)
                }
            }
            _ => {}
        }

        if let Some(Payload::Word(word)) = response.payload() {
            if word.width != self.framer.width {
                warn!(
                    "{}: {} reply while session uses {}",
                    desc.name(),
                    word.width,
                    self.framer.width
                );
            }
        }
    }
}
