use std::io::{self, ErrorKind};
use std::thread;
use std::time::{Duration, Instant};

use chrono::NaiveDateTime;
use serialport::SerialPort;

use super::commands::{Acknowledgement, SetupCommand};
use super::port::MountPort;
use crate::config::ComSettings;
use crate::coordinate::GeoCoordinate;
use crate::util::*;

const POLL_INTERVAL: Duration = Duration::from_millis(5);

/// One pass of the mount setup handshake over an exclusively held port.
///
/// The port is released by [`MountSetupSession::close`] or on drop,
/// whichever comes first.
pub struct MountSetupSession<P: MountPort = Box<dyn SerialPort>> {
    port: Option<P>,
    state: SessionState,
    timeout: Duration,
    longitude_convention: LongitudeConvention,
}

impl MountSetupSession<Box<dyn SerialPort>> {
    pub fn open(settings: &ComSettings) -> SetupResult<Self> {
        let timeout = Duration::from_millis(settings.timeout_millis as u64);
        let port = serialport::new(&settings.path, settings.baud_rate)
            .timeout(timeout)
            .open()
            .map_err(|source| SetupError::Connection {
                path: settings.path.clone(),
                source,
            })?;

        tracing::info!(
            "Opened {} at {} baud, timeout {:?}",
            settings.path,
            settings.baud_rate,
            timeout
        );
        Ok(Self::from_port(port, timeout))
    }
}

impl<P: MountPort> MountSetupSession<P> {
    /// Wrap an already open port. `timeout` bounds the wait for each acknowledgement.
    pub fn from_port(port: P, timeout: Duration) -> Self {
        MountSetupSession {
            port: Some(port),
            state: SessionState::Open,
            timeout,
            longitude_convention: LongitudeConvention::default(),
        }
    }

    pub fn with_longitude_convention(mut self, convention: LongitudeConvention) -> Self {
        self.longitude_convention = convention;
        self
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.port.is_some()
    }

    /// Send the setup handshake. Allowed once per session; the first
    /// rejected or missing acknowledgement ends the sequence.
    pub fn configure(
        &mut self,
        latitude: &GeoCoordinate,
        longitude: &GeoCoordinate,
        when: NaiveDateTime,
    ) -> SetupResult<()> {
        if self.state != SessionState::Open {
            return Err(SetupError::State(self.state));
        }
        self.state = SessionState::Configuring;

        let result = SetupCommand::sequence(latitude, longitude, when, self.longitude_convention)
            .and_then(|commands| self.run(&commands));

        self.state = match &result {
            Ok(()) => {
                tracing::info!("Mount configured");
                SessionState::Configured
            }
            Err(e) => {
                tracing::warn!("Mount setup aborted: {}", e);
                SessionState::Failed
            }
        };
        result
    }

    /// Release the port. Does nothing if already closed.
    pub fn close(&mut self) {
        if let Some(mut port) = self.port.take() {
            if let Err(e) = port.flush() {
                tracing::warn!("Error flushing port on close: {}", e);
            }
            tracing::info!("Closed mount connection");
        }
        self.state = SessionState::Closed;
    }

    fn run(&mut self, commands: &[SetupCommand]) -> SetupResult<()> {
        let timeout = self.timeout;
        let port = self
            .port
            .as_mut()
            .ok_or(SetupError::State(SessionState::Closed))?;

        if let Err(e) = port.discard_input() {
            tracing::warn!("Couldn't clear input buffer: {}", e);
        }

        for command in commands {
            send(port, command, timeout).map_err(|reason| SetupError::Protocol {
                step: command.step().index(),
                command: command.payload().to_string(),
                reason,
            })?;
        }
        Ok(())
    }
}

impl<P: MountPort> Drop for MountSetupSession<P> {
    fn drop(&mut self) {
        self.close();
    }
}

/// Write one command and wait for its acknowledgement
fn send<P: MountPort>(
    port: &mut P,
    command: &SetupCommand,
    timeout: Duration,
) -> Result<(), String> {
    tracing::debug!("-> {}", command.payload());
    port.write_all(command.as_bytes())
        .and_then(|_| port.flush())
        .map_err(|e| format!("write failed: {}", e))?;

    let deadline = Instant::now() + timeout;
    let reply = read_byte(port, deadline)
        .map_err(|e| format!("read failed: {}", e))?
        .ok_or_else(|| format!("no acknowledgement within {:?}", timeout))?;
    tracing::debug!("<- {}", reply as char);

    match reply {
        Acknowledgement::ACCEPTED => {}
        Acknowledgement::REJECTED => return Err("mount rejected the command".to_string()),
        other => return Err(format!("unexpected acknowledgement {:?}", other as char)),
    }

    if let Acknowledgement::AcceptedWithMessages(count) = command.ack() {
        for _ in 0..count {
            let message = read_message(port, deadline)
                .map_err(|e| format!("read failed: {}", e))?
                .ok_or_else(|| "acknowledgement cut short".to_string())?;
            tracing::debug!("<- {}", message);
        }
    }

    Ok(())
}

/// Reads up to and including a `#`. `None` if the deadline passes first.
fn read_message<P: MountPort>(port: &mut P, deadline: Instant) -> io::Result<Option<String>> {
    let mut message = Vec::new();
    loop {
        match read_byte(port, deadline)? {
            Some(Acknowledgement::TERMINATOR) => {
                return Ok(Some(String::from_utf8_lossy(&message).into_owned()))
            }
            Some(b) => message.push(b),
            None => return Ok(None),
        }
    }
}

/// `None` on timeout or end of stream
fn read_byte<P: MountPort>(port: &mut P, deadline: Instant) -> io::Result<Option<u8>> {
    let mut buf = [0u8; 1];
    while Instant::now() < deadline {
        match port.read(&mut buf) {
            Ok(0) => return Ok(None),
            Ok(_) => return Ok(Some(buf[0])),
            Err(e) if e.kind() == ErrorKind::TimedOut => return Ok(None),
            Err(e) if e.kind() == ErrorKind::WouldBlock => thread::sleep(POLL_INTERVAL),
            Err(e) if e.kind() == ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }
    Ok(None)
}
