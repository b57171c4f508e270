mod guard;
#[cfg(target_os = "linux")]
mod linux;

pub use guard::{
    ConnectionState, Event, Guard, GuardConfig, Phase, RetryMachine, WakeUp, DEFAULT_TIMEOUT,
};

#[cfg(target_os = "linux")]
use linux::is_port_open;

pub use serialport::SerialPort;

use anyhow::Result;
use log::debug;
use serialport::{ClearBuffer, SerialPortType};
use std::{
    io::{self, ErrorKind, Read, Write},
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    time::{Duration, Instant},
};
use thiserror::Error;

/// Granularity of blocking reads; a close request is noticed within one slice.
pub const POLL_SLICE: Duration = Duration::from_millis(10);

#[derive(Error, Debug)]
pub enum OpenPortError {
    #[error("no USB serial adapter found")]
    NoCompatiblePort,
    #[error("{port_name:?} busy")]
    PortBusy { port_name: String },
}

#[derive(Error, Debug)]
pub enum ReadError {
    #[error("read timed out")]
    Timeout,
    #[error("connection closed")]
    Closed,
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Closes a connection from another thread. A blocked read notices within
/// one poll slice.
#[derive(Debug, Clone, Default)]
pub struct CloseHandle(Arc<AtomicBool>);

impl CloseHandle {
    pub fn close(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_closed(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    fn reset(&self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Byte level link to an instrument.
pub trait Transport: Send {
    fn write(&mut self, bytes: &[u8]) -> io::Result<()>;
    /// Reads until `terminator` has been received or `timeout` elapses.
    fn read_until(&mut self, terminator: &[u8], timeout: Duration) -> Result<Vec<u8>, ReadError>;
    fn is_open(&self) -> bool;
    fn close(&mut self);
    fn reopen(&mut self) -> io::Result<()>;
    fn close_handle(&self) -> CloseHandle;

    /// Drops whatever the instrument sent since the last read.
    fn clear_input(&mut self) -> io::Result<()> {
        Ok(())
    }
}

pub struct SerialTransport {
    port: Option<Box<dyn SerialPort>>,
    name: String,
    baudrate: u32,
    closed: CloseHandle,
}

impl SerialTransport {
    pub fn new(port: Box<dyn SerialPort>, name: &str, baudrate: u32) -> Self {
        SerialTransport {
            port: Some(port),
            name: name.to_string(),
            baudrate,
            closed: CloseHandle::default(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn port(&mut self) -> io::Result<&mut Box<dyn SerialPort>> {
        if self.closed.is_closed() {
            self.port = None;
        }
        self.port
            .as_mut()
            .ok_or_else(|| io::Error::new(ErrorKind::NotConnected, "port closed"))
    }
}

impl Transport for SerialTransport {
    fn write(&mut self, bytes: &[u8]) -> io::Result<()> {
        let port = self.port()?;
        port.write_all(bytes)?;
        port.flush()
    }

    fn read_until(&mut self, terminator: &[u8], timeout: Duration) -> Result<Vec<u8>, ReadError> {
        if self.closed.is_closed() {
            self.port = None;
            return Err(ReadError::Closed);
        }
        let port = self.port.as_mut().ok_or(ReadError::Closed)?;

        let result = read_line(port.as_mut(), &self.closed, terminator, timeout);
        if let Err(ReadError::Closed) = result {
            self.port = None;
        }
        result
    }

    fn is_open(&self) -> bool {
        self.port.is_some() && !self.closed.is_closed()
    }

    fn close(&mut self) {
        if self.port.take().is_some() {
            debug!("close {}", self.name);
        }
        self.closed.close();
    }

    fn reopen(&mut self) -> io::Result<()> {
        self.port = None;
        let port = serialport::new(&self.name, self.baudrate)
            .timeout(POLL_SLICE)
            .open()?;
        self.port = Some(port);
        self.closed.reset();
        debug!("reopen {} @ {} baud", self.name, self.baudrate);
        Ok(())
    }

    fn close_handle(&self) -> CloseHandle {
        self.closed.clone()
    }

    fn clear_input(&mut self) -> io::Result<()> {
        self.port()?.clear(ClearBuffer::Input).map_err(io::Error::from)
    }
}

fn find_terminator(buffer: &[u8], terminator: &[u8]) -> Option<usize> {
    if terminator.is_empty() {
        return None;
    }
    buffer
        .windows(terminator.len())
        .position(|window| window == terminator)
        .map(|start| start + terminator.len())
}

/// Reads from `port` until the first `terminator` or the deadline. Bytes
/// after the terminator belong to no request and are dropped.
fn read_line<R: Read + ?Sized>(
    port: &mut R,
    closed: &CloseHandle,
    terminator: &[u8],
    timeout: Duration,
) -> Result<Vec<u8>, ReadError> {
    let deadline = Instant::now() + timeout;
    let mut reply = Vec::new();
    let mut buffer = [0u8; 256];

    loop {
        if closed.is_closed() {
            return Err(ReadError::Closed);
        }

        match port.read(&mut buffer) {
            Ok(count) => {
                reply.extend_from_slice(&buffer[..count]);
                if let Some(end) = find_terminator(&reply, terminator) {
                    if end < reply.len() {
                        debug!("dropping trailing {:?}", String::from_utf8_lossy(&reply[end..]));
                        reply.truncate(end);
                    }
                    return Ok(reply);
                }
            }
            Err(e) if e.kind() == ErrorKind::TimedOut => {}
            Err(e) => return Err(e.into()),
        }

        if Instant::now() >= deadline {
            if !reply.is_empty() {
                debug!("discarding partial reply {:?}", String::from_utf8_lossy(&reply));
            }
            return Err(ReadError::Timeout);
        }
    }
}

#[derive(PartialEq)]
struct UsbId(u16, u16);

static COMPATIBLE_IDS: &[UsbId] = &[
    UsbId(0x0403, 0x6001), // FTDI FT232R USB UART
    UsbId(0x067b, 0x2303), // Prolific PL2303 Serial Port
    UsbId(0x1a86, 0x7523), // QinHeng Electronics HL-340 USB-Serial adapter
    UsbId(0x10c4, 0xea60), // Silicon Labs CP210x UART Bridge
];

pub fn open_port(port_name: &str, baudrate: u32, force: bool) -> Result<SerialTransport> {
    let true_name: String = if port_name == "auto" {
        guess_port()?
    } else {
        port_name.to_string()
    };

    if !force && is_port_open(&true_name) {
        return Err(OpenPortError::PortBusy {
            port_name: true_name,
        }
        .into());
    }

    let port = serialport::new(&true_name, baudrate)
        .timeout(POLL_SLICE)
        .open()?;

    debug!("open_port OK: {} @ {} baud", &true_name, baudrate);
    Ok(SerialTransport::new(port, &true_name, baudrate))
}

fn guess_port() -> Result<String> {
    serialport::available_ports()?
        .into_iter()
        .filter(|info| match &info.port_type {
            SerialPortType::UsbPort(usb_info) => {
                COMPATIBLE_IDS.contains(&UsbId(usb_info.vid, usb_info.pid))
                    && !is_port_open(&info.port_name)
            }
            SerialPortType::Unknown | SerialPortType::PciPort | SerialPortType::BluetoothPort => {
                false
            }
        })
        .map(|info| info.port_name)
        .next()
        .ok_or_else(|| OpenPortError::NoCompatiblePort.into())
}

// TODO: check for other holders of the port on macOS and Windows
#[cfg(not(target_os = "linux"))]
fn is_port_open(_port_name: &str) -> bool {
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    #[test]
    fn close_handle_is_shared() {
        let handle = CloseHandle::default();
        let other = handle.clone();
        assert!(!other.is_closed());
        handle.close();
        assert!(other.is_closed());
        other.reset();
        assert!(!handle.is_closed());
    }

    struct Chunks(VecDeque<&'static [u8]>);

    impl Read for Chunks {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            match self.0.pop_front() {
                Some(chunk) => {
                    buf[..chunk.len()].copy_from_slice(chunk);
                    Ok(chunk.len())
                }
                None => Err(io::Error::new(ErrorKind::TimedOut, "no data")),
            }
        }
    }

    fn chunks(data: &[&'static [u8]]) -> Chunks {
        Chunks(data.iter().copied().collect())
    }

    #[test]
    fn stops_at_first_terminator() {
        let mut port = chunks(&[b"11....+00000001 \r\n11....+000", b"00002 "]);
        let line = read_line(
            &mut port,
            &CloseHandle::default(),
            b"\r\n",
            Duration::from_millis(100),
        )
        .unwrap();
        assert_eq!(line, b"11....+00000001 \r\n".to_vec());
    }

    #[test]
    fn joins_split_reply() {
        let mut port = chunks(&[b"%R1P,0,", b"0:610\r", b"\n"]);
        let line = read_line(
            &mut port,
            &CloseHandle::default(),
            b"\r\n",
            Duration::from_millis(100),
        )
        .unwrap();
        assert_eq!(line, b"%R1P,0,0:610\r\n".to_vec());
    }

    #[test]
    fn unterminated_reply_times_out() {
        let mut port = chunks(&[b"%R1P,0,0:6"]);
        assert!(matches!(
            read_line(
                &mut port,
                &CloseHandle::default(),
                b"\r\n",
                Duration::from_millis(20)
            ),
            Err(ReadError::Timeout)
        ));
    }

    #[test]
    fn closed_handle_stops_read() {
        let handle = CloseHandle::default();
        handle.close();
        let mut port = chunks(&[b"?\r\n"]);
        assert!(matches!(
            read_line(&mut port, &handle, b"\r\n", Duration::from_millis(20)),
            Err(ReadError::Closed)
        ));
    }

    #[test]
    fn compatible_ids() {
        assert!(COMPATIBLE_IDS.contains(&UsbId(0x0403, 0x6001)));
        assert!(!COMPATIBLE_IDS.contains(&UsbId(0x0403, 0x6014)));
    }
}
