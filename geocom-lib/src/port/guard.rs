//! Connection ownership, timeouts, wake-up and retries.

use log::{debug, error, trace, warn};
use std::{borrow::Cow, io, time::Duration};

use super::{CloseHandle, ReadError, Transport};
use crate::{Error, Result};

/// Reply timeout applied when the caller has no better figure.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Bytes sent to rouse a sleeping instrument, and how long to wait for
/// whatever it answers before the real frame goes out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WakeUp {
    pub sequence: Cow<'static, [u8]>,
    pub window: Duration,
}

impl WakeUp {
    /// Bare line feed, flushing the GeoCom receive buffer.
    pub fn geocom() -> Self {
        WakeUp {
            sequence: Cow::Borrowed(b"\n"),
            window: Duration::from_secs(1),
        }
    }

    pub fn gsi() -> Self {
        WakeUp {
            sequence: Cow::Borrowed(b"a\r\n"),
            window: Duration::from_secs(1),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuardConfig {
    pub timeout: Duration,
    /// Total attempts per exchange, at least one.
    pub attempts: usize,
    pub terminator: Vec<u8>,
    pub wake_up: Option<WakeUp>,
    /// Consecutive exchanges with a timed-out attempt after which the next
    /// exchange starts with the wake-up sequence again.
    pub timeout_streak: usize,
}

impl Default for GuardConfig {
    fn default() -> Self {
        GuardConfig {
            timeout: DEFAULT_TIMEOUT,
            attempts: 1,
            terminator: b"\r\n".to_vec(),
            wake_up: None,
            timeout_streak: 3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Closed,
    Idle,
    AwaitingReply,
    Faulted,
}

/// Step of a single exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    WakeUp { attempt: usize },
    Transmit { attempt: usize },
    Await { attempt: usize },
    Retry { attempt: usize },
    Done,
    Fault,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Start,
    WakeUpDone,
    Sent,
    Reply,
    Malformed,
    Timeout,
    Lost,
    Next,
}

/// Transition table of an exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryMachine {
    pub attempts: usize,
    pub wake_up: bool,
    /// Wake-up pending before the first attempt.
    pub armed: bool,
}

impl RetryMachine {
    pub fn next(&self, phase: Phase, event: Event) -> Phase {
        match (phase, event) {
            (_, Event::Lost) => Phase::Fault,
            (Phase::Idle, Event::Start) if self.wake_up && self.armed => {
                Phase::WakeUp { attempt: 1 }
            }
            (Phase::Idle, Event::Start) => Phase::Transmit { attempt: 1 },
            (Phase::WakeUp { attempt }, Event::WakeUpDone) => Phase::Transmit { attempt },
            (Phase::Transmit { attempt }, Event::Sent) => Phase::Await { attempt },
            (Phase::Await { .. }, Event::Reply) => Phase::Done,
            (Phase::Await { attempt }, Event::Timeout | Event::Malformed) => {
                if attempt < self.attempts.max(1) {
                    Phase::Retry { attempt }
                } else {
                    Phase::Fault
                }
            }
            (Phase::Retry { attempt }, Event::Next) if self.wake_up => Phase::WakeUp {
                attempt: attempt + 1,
            },
            (Phase::Retry { attempt }, Event::Next) => Phase::Transmit {
                attempt: attempt + 1,
            },
            _ => Phase::Fault,
        }
    }
}

/// Sole owner of a transport. Exchanges take `&mut self`, so at most one
/// is in flight.
pub struct Guard<T: Transport> {
    transport: T,
    config: GuardConfig,
    state: ConnectionState,
    wake_armed: bool,
    timeouts: usize,
}

impl<T: Transport> Guard<T> {
    pub fn new(transport: T, config: GuardConfig) -> Self {
        let state = if transport.is_open() {
            ConnectionState::Idle
        } else {
            ConnectionState::Closed
        };
        Guard {
            transport,
            config,
            state,
            wake_armed: true,
            timeouts: 0,
        }
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    pub fn config(&self) -> &GuardConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    pub fn close_handle(&self) -> CloseHandle {
        self.transport.close_handle()
    }

    pub fn close(&mut self) {
        self.transport.close();
        self.state = ConnectionState::Closed;
    }

    /// Reopens the transport and clears a fault. The next exchange starts
    /// with the wake-up sequence.
    pub fn reopen(&mut self) -> Result<()> {
        self.transport.reopen()?;
        self.reset();
        Ok(())
    }

    /// Swaps in a fresh transport, closing the old one.
    pub fn replace(&mut self, transport: T) {
        self.transport.close();
        self.transport = transport;
        self.reset();
    }

    fn reset(&mut self) {
        self.state = if self.transport.is_open() {
            ConnectionState::Idle
        } else {
            ConnectionState::Closed
        };
        self.wake_armed = true;
        self.timeouts = 0;
    }

    pub fn exchange(&mut self, frame: &[u8], timeout: Duration) -> Result<Vec<u8>> {
        self.exchange_with(frame, timeout, |_| true, |_| {})
    }

    /// Runs one exchange. `accept` rejects replies that are not worth
    /// parsing, which then count as a failed attempt; `observe` sees every
    /// phase the exchange passes through.
    pub fn exchange_with<A, O>(
        &mut self,
        frame: &[u8],
        timeout: Duration,
        accept: A,
        mut observe: O,
    ) -> Result<Vec<u8>>
    where
        A: Fn(&[u8]) -> bool,
        O: FnMut(Phase),
    {
        match self.state {
            ConnectionState::Closed | ConnectionState::Faulted => return Err(Error::NotConnected),
            ConnectionState::AwaitingReply => return Err(Error::Busy),
            ConnectionState::Idle => {}
        }
        if !self.transport.is_open() {
            self.state = ConnectionState::Closed;
            return Err(Error::NotConnected);
        }

        let streak = self.config.wake_up.is_some()
            && self.timeouts >= self.config.timeout_streak.max(1);
        if streak {
            debug!("{} exchanges timed out, waking instrument", self.timeouts);
            self.timeouts = 0;
        }
        let machine = RetryMachine {
            attempts: self.config.attempts,
            wake_up: self.config.wake_up.is_some(),
            armed: self.wake_armed || streak,
        };

        let mut phase = machine.next(Phase::Idle, Event::Start);
        let mut reply = Vec::new();
        let mut failure: Option<Error> = None;
        let mut timed_out = false;

        loop {
            trace!("exchange phase {:?}", phase);
            observe(phase);

            phase = match phase {
                Phase::WakeUp { .. } => {
                    match self.wake_up() {
                        Ok(()) => machine.next(phase, Event::WakeUpDone),
                        Err(e) => {
                            failure = Some(e);
                            machine.next(phase, Event::Lost)
                        }
                    }
                }
                Phase::Transmit { .. } => match self.send(frame) {
                    Ok(()) => {
                        self.state = ConnectionState::AwaitingReply;
                        machine.next(phase, Event::Sent)
                    }
                    Err(e) => {
                        failure = Some(e);
                        machine.next(phase, Event::Lost)
                    }
                },
                Phase::Await { attempt } => {
                    match self.transport.read_until(&self.config.terminator, timeout) {
                        Ok(bytes) => {
                            debug!("recv {:?}", String::from_utf8_lossy(&bytes));
                            if accept(&bytes) {
                                reply = bytes;
                                machine.next(phase, Event::Reply)
                            } else {
                                warn!("attempt {}: unusable reply", attempt);
                                failure = Some(Error::Communication(io::Error::new(
                                    io::ErrorKind::InvalidData,
                                    format!("malformed reply {:?}", String::from_utf8_lossy(&bytes)),
                                )));
                                machine.next(phase, Event::Malformed)
                            }
                        }
                        Err(ReadError::Timeout) => {
                            debug!("attempt {}: no reply within {:?}", attempt, timeout);
                            timed_out = true;
                            failure = Some(Error::Timeout { attempts: attempt });
                            machine.next(phase, Event::Timeout)
                        }
                        Err(ReadError::Closed) => {
                            debug!("connection closed while awaiting reply");
                            self.state = ConnectionState::Closed;
                            return Err(Error::Closed);
                        }
                        Err(ReadError::Io(e)) => {
                            failure = Some(Error::Communication(e));
                            machine.next(phase, Event::Lost)
                        }
                    }
                }
                Phase::Retry { attempt } => {
                    debug!("retrying after attempt {}", attempt);
                    machine.next(phase, Event::Next)
                }
                Phase::Done => {
                    self.count_timeouts(timed_out);
                    self.state = ConnectionState::Idle;
                    self.wake_armed = false;
                    return Ok(reply);
                }
                Phase::Fault | Phase::Idle => {
                    self.count_timeouts(timed_out);
                    let err = match failure.take() {
                        Some(Error::Timeout { .. }) | None => Error::Timeout {
                            attempts: self.config.attempts.max(1),
                        },
                        Some(e) => e,
                    };
                    error!("exchange failed: {}", err);
                    self.state = if self.transport.is_open() {
                        ConnectionState::Faulted
                    } else {
                        ConnectionState::Closed
                    };
                    return Err(err);
                }
            };
        }
    }

    fn count_timeouts(&mut self, timed_out: bool) {
        if timed_out {
            self.timeouts += 1;
        } else {
            self.timeouts = 0;
        }
    }

    fn send(&mut self, bytes: &[u8]) -> Result<()> {
        self.transport.clear_input()?;
        debug!("send {:?}", String::from_utf8_lossy(bytes));
        self.transport.write(bytes)?;
        Ok(())
    }

    fn wake_up(&mut self) -> Result<()> {
        let wake_up = match &self.config.wake_up {
            Some(wake_up) => wake_up.clone(),
            None => return Ok(()),
        };

        self.send(&wake_up.sequence)?;
        match self
            .transport
            .read_until(&self.config.terminator, wake_up.window)
        {
            Ok(bytes) => debug!("wake-up answer {:?}", String::from_utf8_lossy(&bytes)),
            Err(ReadError::Timeout) => trace!("no wake-up answer"),
            Err(ReadError::Closed) => return Err(Error::Closed),
            Err(ReadError::Io(e)) => return Err(e.into()),
        }
        self.wake_armed = false;
        Ok(())
    }
}

impl<T: Transport> Drop for Guard<T> {
    fn drop(&mut self) {
        self.transport.close();
    }
}
