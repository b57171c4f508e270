use std::fmt::Display;

use super::decode::DecodeError;
use super::reply::{GeoComReply, GsiReply, ParsedReply};
use super::status::{GsiError, StatusCode};
use super::{ArityError, CommandDescriptor, GsiWord};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    GeoCom {
        transport: StatusCode,
        rpc: StatusCode,
    },
    /// `?` or `?<n>`.
    Gsi { code: Option<u32> },
    GsiError(GsiError),
}

impl Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Status::GeoCom { transport, rpc } => write!(f, "transport {}, rpc {}", transport, rpc),
            Status::Gsi { code: Some(code) } => write!(f, "?{}", code),
            Status::Gsi { code: None } => "?".fmt(f),
            Status::GsiError(err) => err.fmt(f),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// GeoCom return parameters, unparsed.
    Params(Vec<String>),
    Word(GsiWord),
    Setting { param: u16, value: String },
}

impl Payload {
    /// Raw parameter strings as they appeared on the wire.
    pub fn params(&self) -> Vec<String> {
        match self {
            Payload::Params(params) => params.clone(),
            Payload::Word(word) => vec![word.to_string()],
            Payload::Setting { value, .. } => vec![value.clone()],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureClass {
    /// Nothing usable came back from the instrument.
    Communication,
    /// The instrument answered with an error status.
    Protocol,
    /// The reply was fine but the decoder rejected its parameters.
    Decode,
}

impl Display for FailureClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FailureClass::Communication => "communication".fmt(f),
            FailureClass::Protocol => "protocol".fmt(f),
            FailureClass::Decode => "decode".fmt(f),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Failure {
    pub class: FailureClass,
    /// Parameters that came with the failing reply, if any.
    pub params: Vec<String>,
    pub diagnostic: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    Success(Option<T>),
    Failure(Failure),
}

/// Result of one transaction.
#[derive(Debug, Clone, PartialEq)]
pub struct Response<T = Payload> {
    /// Symbolic command name.
    pub name: String,
    /// Request line as sent, without the terminator.
    pub command: String,
    /// Reply line as received, without the terminator.
    pub reply: Option<String>,
    pub status: Option<Status>,
    pub arity: Option<ArityError>,
    pub outcome: Outcome<T>,
}

impl Response<Payload> {
    pub(crate) fn from_reply(
        desc: &CommandDescriptor,
        command: &str,
        raw: &[u8],
        parsed: ParsedReply,
    ) -> Self {
        let (status, arity, outcome) = match parsed {
            ParsedReply::GeoCom(reply) => geocom_outcome(reply),
            ParsedReply::Gsi(reply) => gsi_outcome(reply),
        };
        Response {
            name: desc.name().to_string(),
            command: command.to_string(),
            reply: Some(reply_line(raw)),
            status: Some(status),
            arity,
            outcome,
        }
    }

    pub(crate) fn communication(desc: &CommandDescriptor, command: &str, diagnostic: String) -> Self {
        Response {
            name: desc.name().to_string(),
            command: command.to_string(),
            reply: None,
            status: None,
            arity: None,
            outcome: Outcome::Failure(Failure {
                class: FailureClass::Communication,
                params: Vec::new(),
                diagnostic,
            }),
        }
    }
}

impl<T> Response<T> {
    pub fn is_success(&self) -> bool {
        matches!(self.outcome, Outcome::Success(_))
    }

    pub fn payload(&self) -> Option<&T> {
        match &self.outcome {
            Outcome::Success(payload) => payload.as_ref(),
            Outcome::Failure(_) => None,
        }
    }

    pub fn into_payload(self) -> Option<T> {
        match self.outcome {
            Outcome::Success(payload) => payload,
            Outcome::Failure(_) => None,
        }
    }

    pub fn failure(&self) -> Option<&Failure> {
        match &self.outcome {
            Outcome::Failure(failure) => Some(failure),
            Outcome::Success(_) => None,
        }
    }

    pub fn transport_status(&self) -> Option<StatusCode> {
        match self.status {
            Some(Status::GeoCom { transport, .. }) => Some(transport),
            _ => None,
        }
    }

    pub fn rpc_status(&self) -> Option<StatusCode> {
        match self.status {
            Some(Status::GeoCom { rpc, .. }) => Some(rpc),
            _ => None,
        }
    }

    /// Applies a decoder to the payload of a successful response. A
    /// decoder error turns the response into a `Decode` failure that keeps
    /// the raw parameters.
    pub fn map_payload<U, F>(self, decode: F) -> Response<U>
    where
        T: Into<Payload>,
        F: FnOnce(&Payload) -> Result<U, DecodeError>,
    {
        let outcome = match self.outcome {
            Outcome::Success(Some(payload)) => {
                let payload: Payload = payload.into();
                match decode(&payload) {
                    Ok(value) => Outcome::Success(Some(value)),
                    Err(err) => Outcome::Failure(Failure {
                        class: FailureClass::Decode,
                        params: payload.params(),
                        diagnostic: err.to_string(),
                    }),
                }
            }
            Outcome::Success(None) => Outcome::Success(None),
            Outcome::Failure(failure) => Outcome::Failure(failure),
        };
        Response {
            name: self.name,
            command: self.command,
            reply: self.reply,
            status: self.status,
            arity: self.arity,
            outcome,
        }
    }
}

impl<T: std::fmt::Debug> Display for Response<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: ", self.name)?;
        match &self.outcome {
            Outcome::Success(Some(payload)) => write!(f, "ok {:?}", payload)?,
            Outcome::Success(None) => write!(f, "ok")?,
            Outcome::Failure(failure) => {
                write!(f, "{} failure: {}", failure.class, failure.diagnostic)?
            }
        }
        if let Some(status) = &self.status {
            write!(f, " [{}]", status)?;
        }
        Ok(())
    }
}

fn reply_line(raw: &[u8]) -> String {
    String::from_utf8_lossy(raw)
        .trim_end_matches(|c: char| c == '\r' || c == '\n')
        .to_string()
}

fn geocom_outcome(reply: GeoComReply) -> (Status, Option<ArityError>, Outcome<Payload>) {
    let status = Status::GeoCom {
        transport: reply.transport,
        rpc: reply.rpc,
    };
    let outcome = if !reply.transport.is_ok() {
        Outcome::Failure(Failure {
            class: FailureClass::Protocol,
            params: reply.params,
            diagnostic: format!(
                "transport error {}: {}",
                reply.transport,
                reply.transport.description()
            ),
        })
    } else if !reply.rpc.is_ok() {
        Outcome::Failure(Failure {
            class: FailureClass::Protocol,
            params: reply.params,
            diagnostic: format!("{}: {}", reply.rpc, reply.rpc.description()),
        })
    } else if reply.params.is_empty() {
        Outcome::Success(None)
    } else {
        Outcome::Success(Some(Payload::Params(reply.params)))
    };
    (status, reply.arity, outcome)
}

fn gsi_outcome(reply: GsiReply) -> (Status, Option<ArityError>, Outcome<Payload>) {
    let (status, outcome) = match reply {
        GsiReply::Ack => (Status::Gsi { code: None }, Outcome::Success(None)),
        GsiReply::AckCode(code) => (
            Status::Gsi { code: Some(code) },
            Outcome::Success(Some(Payload::Params(vec![code.to_string()]))),
        ),
        GsiReply::Error(err) => (
            Status::GsiError(err),
            Outcome::Failure(Failure {
                class: FailureClass::Protocol,
                params: Vec::new(),
                diagnostic: err.to_string(),
            }),
        ),
        GsiReply::Setting { param, value } => (
            Status::Gsi { code: None },
            Outcome::Success(Some(Payload::Setting { param, value })),
        ),
        GsiReply::Word(word) => (
            Status::Gsi { code: None },
            Outcome::Success(Some(Payload::Word(word))),
        ),
    };
    (status, None, outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::{decode, parse, Arg, GetMode};

    fn respond(desc: &CommandDescriptor, raw: &[u8]) -> Response {
        let parsed = parse(raw, desc).unwrap();
        Response::from_reply(desc, "cmd", raw, parsed)
    }

    #[test]
    fn geocom_success_with_payload() {
        let desc = CommandDescriptor::rpc(5003, vec![], 1);
        let response = respond(&desc, b"%R1P,0,0:610\r\n");
        assert!(response.is_success());
        assert_eq!(response.reply.as_deref(), Some("%R1P,0,0:610"));
        assert_eq!(response.rpc_status().map(|s| s.code()), Some(0));
        assert_eq!(response.transport_status().map(|s| s.code()), Some(0));
        assert_eq!(
            response.payload(),
            Some(&Payload::Params(vec!["610".to_string()]))
        );

        let decoded = response.map_payload(|p| decode::param(p, 0, decode::int));
        assert_eq!(decoded.into_payload(), Some(610));
    }

    #[test]
    fn geocom_protocol_failure() {
        let desc = CommandDescriptor::rpc(5003, vec![], 1);
        let response = respond(&desc, b"%R1P,0,2:");
        let failure = response.failure().unwrap();
        assert_eq!(failure.class, FailureClass::Protocol);
        assert!(!failure.diagnostic.is_empty());
        assert_eq!(response.rpc_status().map(|s| s.code()), Some(2));
        assert_eq!(response.payload(), None);
    }

    #[test]
    fn decode_failure() {
        let desc = CommandDescriptor::rpc(5004, vec![], 1);
        let response = respond(&desc, b"%R1P,0,0:TS30")
            .map_payload(|p| decode::param(p, 0, decode::string));
        let failure = response.failure().unwrap();
        assert_eq!(failure.class, FailureClass::Decode);
        assert_eq!(failure.params, vec!["TS30".to_string()]);
        assert!(response.rpc_status().unwrap().is_ok());
    }

    #[test]
    fn gsi_outcomes() {
        let set = CommandDescriptor::set(30, Arg::unsigned(2));
        let response = respond(&set, b"?\r\n");
        assert!(response.is_success());
        assert_eq!(response.payload(), None);

        let response = respond(&set, b"@W400");
        assert_eq!(
            response.failure().map(|f| f.class),
            Some(FailureClass::Protocol)
        );
        assert_eq!(
            response.status,
            Some(Status::GsiError(GsiError {
                warning: true,
                code: 400
            }))
        );

        let get = CommandDescriptor::get(GetMode::Instant, 11);
        let response = respond(&get, b"11....+000000A1 ");
        match response.payload() {
            Some(Payload::Word(word)) => assert_eq!(word.value(), "A1"),
            other => panic!("unexpected payload {:?}", other),
        }
    }

    #[test]
    fn communication_failure() {
        let desc = CommandDescriptor::rpc(5003, vec![], 1);
        let response = Response::communication(&desc, "%R1Q,5003:", "no reply".into());
        assert_eq!(
            response.failure().map(|f| f.class),
            Some(FailureClass::Communication)
        );
        assert_eq!(response.status, None);
        assert_eq!(response.reply, None);
    }
}
