use std::io::{self, Read, Write};

use serialport::{ClearBuffer, SerialPort};

/// Byte transport a setup session talks to the mount over
pub trait MountPort: Read + Write {
    /// Throw away anything already waiting in the input buffer
    fn discard_input(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl MountPort for Box<dyn SerialPort> {
    fn discard_input(&mut self) -> io::Result<()> {
        self.clear(ClearBuffer::Input).map_err(io::Error::from)
    }
}
