use std::{
    collections::VecDeque,
    io,
    panic::{catch_unwind, AssertUnwindSafe},
    sync::{Arc, Mutex},
    time::Duration,
};

use geocom_lib::{
    commands::{find_command, Instrument},
    port::{CloseHandle, ConnectionState, Guard, GuardConfig, ReadError, Transport, WakeUp},
    protocol::{
        decode, Arg, CommandDescriptor, Engine, EngineConfig, FailureClass, GetMode, Payload,
        TxState, Value, WordWidth,
    },
    Error,
};

enum Reply {
    Line(&'static [u8]),
    Silent,
    Close,
    Panic,
}

#[derive(Default)]
struct Script {
    replies: VecDeque<Reply>,
    written: Vec<Vec<u8>>,
    reads: Vec<Duration>,
    open: bool,
}

#[derive(Clone)]
struct Mock {
    script: Arc<Mutex<Script>>,
    handle: CloseHandle,
}

impl Mock {
    fn new(replies: Vec<Reply>) -> Self {
        Mock {
            script: Arc::new(Mutex::new(Script {
                replies: replies.into(),
                open: true,
                ..Script::default()
            })),
            handle: CloseHandle::default(),
        }
    }

    fn written(&self) -> Vec<String> {
        self.script
            .lock()
            .unwrap()
            .written
            .iter()
            .map(|w| String::from_utf8_lossy(w).to_string())
            .collect()
    }

    fn reads(&self) -> Vec<Duration> {
        self.script.lock().unwrap().reads.clone()
    }

    fn push(&self, reply: Reply) {
        self.script.lock().unwrap().replies.push_back(reply);
    }
}

impl Transport for Mock {
    fn write(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.script.lock().unwrap().written.push(bytes.to_vec());
        Ok(())
    }

    fn read_until(&mut self, _terminator: &[u8], timeout: Duration) -> Result<Vec<u8>, ReadError> {
        let reply = {
            let mut script = self.script.lock().unwrap();
            script.reads.push(timeout);
            script.replies.pop_front()
        };
        match reply {
            Some(Reply::Line(line)) => Ok(line.to_vec()),
            Some(Reply::Silent) | None => Err(ReadError::Timeout),
            Some(Reply::Close) => {
                self.handle.close();
                self.script.lock().unwrap().open = false;
                Err(ReadError::Closed)
            }
            Some(Reply::Panic) => panic!("transport blew up"),
        }
    }

    fn is_open(&self) -> bool {
        self.script.lock().unwrap().open && !self.handle.is_closed()
    }

    fn close(&mut self) {
        self.script.lock().unwrap().open = false;
    }

    fn reopen(&mut self) -> io::Result<()> {
        self.script.lock().unwrap().open = true;
        self.handle = CloseHandle::default();
        Ok(())
    }

    fn close_handle(&self) -> CloseHandle {
        self.handle.clone()
    }
}

fn plain(timeout: Duration, attempts: usize) -> GuardConfig {
    GuardConfig {
        timeout,
        attempts,
        ..GuardConfig::default()
    }
}

fn engine(mock: &Mock, guard: GuardConfig, config: EngineConfig) -> Engine<Mock> {
    Engine::new(Guard::new(mock.clone(), guard), config)
}

fn instrument_no() -> CommandDescriptor {
    CommandDescriptor::rpc(5003, vec![], 1).named("CSV_GetInstrumentNo")
}

#[test]
fn instrument_number() {
    let mock = Mock::new(vec![Reply::Line(b"%R1P,0,0:610\r\n")]);
    let mut engine = engine(&mock, plain(Duration::from_secs(1), 1), EngineConfig::default());

    let response = engine
        .execute_with(&instrument_no(), |p| decode::param(p, 0, decode::unsigned))
        .unwrap();

    assert!(response.is_success());
    assert_eq!(response.payload(), Some(&610));
    assert_eq!(response.rpc_status().map(|s| s.code()), Some(0));
    assert_eq!(response.transport_status().map(|s| s.code()), Some(0));
    assert_eq!(mock.written(), vec!["%R1Q,5003:\r\n"]);
    assert_eq!(
        engine.trace(),
        &[
            TxState::Idle,
            TxState::Framing,
            TxState::Transmitting,
            TxState::AwaitingReply,
            TxState::Parsing,
            TxState::Resolved
        ]
    );
    assert_eq!(engine.guard().state(), ConnectionState::Idle);
}

#[test]
fn rpc_error_is_a_failed_response() {
    let mock = Mock::new(vec![Reply::Line(b"%R1P,0,2:\r\n")]);
    let mut engine = engine(&mock, plain(Duration::from_secs(1), 1), EngineConfig::default());

    let response = engine.execute(&instrument_no()).unwrap();
    let failure = response.failure().unwrap();
    assert_eq!(failure.class, FailureClass::Protocol);
    assert!(!failure.diagnostic.is_empty());
    assert_eq!(response.rpc_status().map(|s| s.code()), Some(2));
    assert_eq!(response.payload(), None);
    assert_eq!(engine.state(), TxState::Resolved);
}

#[test]
fn gsi_setting_acknowledged() {
    let mock = Mock::new(vec![Reply::Line(b"?\r\n")]);
    let mut engine = engine(&mock, plain(Duration::from_secs(1), 1), EngineConfig::default());

    let response = engine
        .execute(&CommandDescriptor::set(30, Arg::unsigned(2)))
        .unwrap();
    assert!(response.is_success());
    assert_eq!(response.payload(), None);
    assert_eq!(mock.written(), vec!["SET/30/2\r\n"]);
}

#[test]
fn gsi_measurement_word() {
    let mock = Mock::new(vec![Reply::Line(b"11....+000000A1 \r\n")]);
    let mut engine = engine(&mock, plain(Duration::from_secs(1), 1), EngineConfig::default());

    let response = engine
        .execute(&CommandDescriptor::get(GetMode::Measure, 11))
        .unwrap();
    assert_eq!(mock.written(), vec!["GET/M/WI11\r\n"]);
    match response.payload() {
        Some(Payload::Word(word)) => {
            assert_eq!(word.index, 11);
            assert_eq!(word.width, WordWidth::Gsi8);
            assert_eq!(word.value(), "A1");
        }
        other => panic!("unexpected payload {:?}", other),
    }
}

#[test]
fn silent_instrument_times_out() {
    let mock = Mock::new(vec![]);
    let mut engine = engine(&mock, plain(Duration::from_secs(1), 2), EngineConfig::default());

    let err = engine.execute(&instrument_no()).unwrap_err();
    assert!(matches!(err, Error::Timeout { attempts: 2 }));
    assert_eq!(mock.written().len(), 2);
    assert_eq!(
        mock.reads(),
        vec![Duration::from_secs(1), Duration::from_secs(1)]
    );
    assert_eq!(engine.guard().state(), ConnectionState::Faulted);
    assert_eq!(engine.state(), TxState::Faulted);
    assert!(engine.trace().contains(&TxState::Retrying));

    // A faulted connection refuses until reopened.
    mock.push(Reply::Line(b"%R1P,0,0:610\r\n"));
    assert!(matches!(
        engine.execute(&instrument_no()),
        Err(Error::NotConnected)
    ));
    assert_eq!(mock.written().len(), 2);

    engine.guard_mut().reopen().unwrap();
    assert_eq!(engine.guard().state(), ConnectionState::Idle);
    assert!(engine.execute(&instrument_no()).unwrap().is_success());
}

#[test]
fn retry_bound() {
    for attempts in 1..=4 {
        let mock = Mock::new(vec![]);
        let mut engine = engine(
            &mock,
            plain(Duration::from_millis(50), attempts),
            EngineConfig::default(),
        );
        assert!(matches!(
            engine.execute(&instrument_no()),
            Err(Error::Timeout { .. })
        ));
        assert_eq!(mock.written().len(), attempts);
    }
}

#[test]
fn wake_up_precedes_first_frame() {
    let mock = Mock::new(vec![
        Reply::Line(b"?\r\n"),
        Reply::Line(b"?\r\n"),
        Reply::Line(b"?\r\n"),
    ]);
    let config = GuardConfig {
        wake_up: Some(WakeUp::gsi()),
        ..plain(Duration::from_secs(1), 1)
    };
    let mut engine = engine(&mock, config, EngineConfig::default());

    let set = CommandDescriptor::set(30, Arg::unsigned(2));
    assert!(engine.execute(&set).unwrap().is_success());
    assert!(engine.execute(&set).unwrap().is_success());

    assert_eq!(
        mock.written(),
        vec!["a\r\n", "SET/30/2\r\n", "SET/30/2\r\n"]
    );
    assert_eq!(mock.reads()[0], Duration::from_secs(1));
}

#[test]
fn retry_repeats_wake_up() {
    let mock = Mock::new(vec![
        Reply::Silent,
        Reply::Silent,
        Reply::Silent,
        Reply::Line(b"%R1P,0,0:610\r\n"),
    ]);
    let config = GuardConfig {
        wake_up: Some(WakeUp::geocom()),
        ..plain(Duration::from_secs(2), 2)
    };
    let mut engine = engine(&mock, config, EngineConfig::default());

    assert!(engine.execute(&instrument_no()).unwrap().is_success());
    assert_eq!(
        mock.written(),
        vec!["\n", "%R1Q,5003:\r\n", "\n", "%R1Q,5003:\r\n"]
    );
}

#[test]
fn timeout_streak_rearms_wake_up() {
    let mock = Mock::new(vec![
        Reply::Line(b"?\r\n"),
        Reply::Line(b"?\r\n"),
        Reply::Silent,
        Reply::Line(b"?\r\n"),
        Reply::Line(b"?\r\n"),
        Reply::Line(b"?\r\n"),
        Reply::Line(b"?\r\n"),
        Reply::Line(b"?\r\n"),
    ]);
    let config = GuardConfig {
        wake_up: Some(WakeUp::gsi()),
        timeout_streak: 1,
        ..plain(Duration::from_secs(1), 2)
    };
    let mut engine = engine(&mock, config, EngineConfig::default());

    let set = CommandDescriptor::set(30, Arg::unsigned(2));
    for _ in 0..4 {
        assert!(engine.execute(&set).unwrap().is_success());
    }

    // The second exchange recovers on its retry; the third starts awake.
    assert_eq!(
        mock.written(),
        vec![
            "a\r\n",
            "SET/30/2\r\n",
            "SET/30/2\r\n",
            "a\r\n",
            "SET/30/2\r\n",
            "a\r\n",
            "SET/30/2\r\n",
            "SET/30/2\r\n",
        ]
    );
}

#[test]
fn malformed_reply_is_retried() {
    let mock = Mock::new(vec![
        Reply::Line(b"garbage\r\n"),
        Reply::Line(b"%R1P,0,0:610\r\n"),
    ]);
    let mut engine = engine(&mock, plain(Duration::from_secs(1), 2), EngineConfig::default());

    assert!(engine.execute(&instrument_no()).unwrap().is_success());
    assert_eq!(mock.written().len(), 2);
}

#[test]
fn encoding_error_leaves_connection_alone() {
    let mock = Mock::new(vec![]);
    let mut engine = engine(&mock, plain(Duration::from_secs(1), 1), EngineConfig::default());

    let desc = CommandDescriptor::rpc(2012, vec![Arg::float(f64::NAN)], 0);
    assert!(matches!(engine.execute(&desc), Err(Error::Encoding(_))));
    assert!(mock.written().is_empty());
    assert_eq!(engine.guard().state(), ConnectionState::Idle);
    assert_eq!(engine.state(), TxState::Framing);
}

#[test]
fn parse_error_is_raised() {
    let mock = Mock::new(vec![Reply::Line(b"%R1P,0,x:1\r\n")]);
    let mut engine = engine(&mock, plain(Duration::from_secs(1), 1), EngineConfig::default());

    assert!(matches!(
        engine.execute(&instrument_no()),
        Err(Error::Parse(_))
    ));
    assert_eq!(engine.guard().state(), ConnectionState::Idle);
    assert_eq!(engine.state(), TxState::Parsing);
}

#[test]
fn request_folds_transport_errors() {
    let mock = Mock::new(vec![]);
    let mut engine = engine(&mock, plain(Duration::from_secs(1), 1), EngineConfig::default());

    let response = engine.request(&instrument_no()).unwrap();
    let failure = response.failure().unwrap();
    assert_eq!(failure.class, FailureClass::Communication);
    assert!(failure.diagnostic.contains("no reply"));
    assert_eq!(response.command, "%R1Q,5003:");
    assert_eq!(response.status, None);
}

#[test]
fn close_handle_cancels_exchange() {
    let mock = Mock::new(vec![Reply::Close]);
    let mut engine = engine(&mock, plain(Duration::from_secs(1), 3), EngineConfig::default());

    assert!(matches!(engine.execute(&instrument_no()), Err(Error::Closed)));
    assert_eq!(engine.guard().state(), ConnectionState::Closed);
    assert!(matches!(
        engine.execute(&instrument_no()),
        Err(Error::NotConnected)
    ));
}

#[test]
fn closed_before_exchange() {
    let mock = Mock::new(vec![]);
    let mut engine = engine(&mock, plain(Duration::from_secs(1), 1), EngineConfig::default());

    engine.guard().close_handle().close();
    assert!(matches!(
        engine.execute(&instrument_no()),
        Err(Error::NotConnected)
    ));
    assert!(mock.written().is_empty());
}

#[test]
fn interrupted_exchange_leaves_guard_busy() {
    let mock = Mock::new(vec![Reply::Panic]);
    let mut engine = engine(&mock, plain(Duration::from_secs(1), 1), EngineConfig::default());

    let result = catch_unwind(AssertUnwindSafe(|| engine.execute(&instrument_no())));
    assert!(result.is_err());
    assert_eq!(engine.guard().state(), ConnectionState::AwaitingReply);
    assert!(matches!(engine.execute(&instrument_no()), Err(Error::Busy)));
}

#[test]
fn precision_follows_instrument() {
    let mock = Mock::new(vec![
        Reply::Line(b"%R1P,0,0:7\r\n"),
        Reply::Line(b"%R1P,0,0:\r\n"),
        Reply::Line(b"%R1P,0,0:\r\n"),
        Reply::Line(b"%R1P,0,0:\r\n"),
    ]);
    let mut engine = engine(&mock, plain(Duration::from_secs(1), 1), EngineConfig::default());

    let response = engine.sync_precision().unwrap();
    assert_eq!(response.payload(), Some(&7));
    assert_eq!(engine.config().precision, 7);

    let set_height = CommandDescriptor::rpc(2012, vec![Arg::float(1.23456789)], 0);
    engine.execute(&set_height).unwrap();

    let set_precision = CommandDescriptor::rpc(107, vec![Arg::unsigned(2)], 0);
    engine.execute(&set_precision).unwrap();
    assert_eq!(engine.config().precision, 2);
    engine.execute(&set_height).unwrap();

    assert_eq!(
        mock.written(),
        vec![
            "%R1Q,108:\r\n",
            "%R1Q,2012:1.2345679\r\n",
            "%R1Q,107:2\r\n",
            "%R1Q,2012:1.23\r\n"
        ]
    );
}

#[test]
fn word_width_follows_instrument() {
    let mock = Mock::new(vec![
        Reply::Line(b"0137/0001\r\n"),
        Reply::Line(b"?\r\n"),
        Reply::Line(b"?\r\n"),
        Reply::Line(b"?\r\n"),
    ]);
    let mut engine = engine(&mock, plain(Duration::from_secs(1), 1), EngineConfig::default());

    let response = engine.sync_word_width().unwrap();
    assert_eq!(response.payload(), Some(&WordWidth::Gsi16));

    let put = CommandDescriptor::put(11, Arg::string("P1"));
    engine.execute(&put).unwrap();

    engine
        .execute(&CommandDescriptor::set(137, Arg::unsigned(0)))
        .unwrap();
    assert_eq!(engine.config().width, WordWidth::Gsi8);
    engine.execute(&put).unwrap();

    assert_eq!(
        mock.written(),
        vec![
            "CONF/137\r\n",
            "PUT/*11....+00000000000000P1 \r\n",
            "SET/137/0\r\n",
            "PUT/11....+000000P1 \r\n"
        ]
    );
}

#[test]
fn leica_profile_end_to_end() {
    let mock = Mock::new(vec![Reply::Line(b"%R1P,0,0:0,\"TS30\"\r\n")]);
    let instrument = Instrument::Tps1200p;
    let guard = GuardConfig {
        wake_up: None,
        ..instrument.guard_config(Duration::from_secs(1), 1)
    };
    let mut engine = engine(&mock, guard, instrument.engine_config());

    let desc = find_command(instrument, "CSV_GetInstrumentName")
        .unwrap()
        .descriptor(Vec::<Value>::new())
        .unwrap();
    let response = engine
        .execute_with(&desc, |p| decode::param(p, 0, decode::string))
        .unwrap();
    assert_eq!(response.name, "CSV_GetInstrumentName");
    assert_eq!(response.payload().map(String::as_str), Some("TS30"));
    assert_eq!(response.arity, None);
}

#[test]
fn drop_closes_transport() {
    let mock = Mock::new(vec![]);
    let engine = engine(&mock, plain(Duration::from_secs(1), 1), EngineConfig::default());
    assert!(mock.is_open());
    drop(engine);
    assert!(!mock.is_open());
}
