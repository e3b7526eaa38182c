use std::cell::RefCell;
use std::collections::VecDeque;
use std::io::{self, ErrorKind, Read, Write};
use std::rc::Rc;

use super::port::MountPort;

#[derive(Default)]
struct Script {
    /// One entry per expected command, `None` stays silent
    acks: VecDeque<Option<Vec<u8>>>,
    readable: VecDeque<u8>,
    written: Vec<u8>,
    input_discarded: bool,
}

/// In-memory mount. Every `#`-terminated command written releases the next
/// scripted acknowledgement; reading with nothing pending times out.
#[derive(Clone)]
pub(in crate::mount_control) struct ScriptedPort {
    script: Rc<RefCell<Script>>,
}

impl ScriptedPort {
    pub fn new(acks: Vec<Option<&str>>) -> Self {
        let script = Script {
            acks: acks
                .into_iter()
                .map(|a| a.map(|s| s.as_bytes().to_vec()))
                .collect(),
            ..Default::default()
        };
        ScriptedPort {
            script: Rc::new(RefCell::new(script)),
        }
    }

    pub fn written(&self) -> String {
        String::from_utf8_lossy(&self.script.borrow().written).into_owned()
    }

    pub fn input_discarded(&self) -> bool {
        self.script.borrow().input_discarded
    }

    /// True once every other handle, i.e. the session's, has been dropped
    pub fn released(&self) -> bool {
        Rc::strong_count(&self.script) == 1
    }
}

impl Read for ScriptedPort {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let mut script = self.script.borrow_mut();
        if script.readable.is_empty() {
            return Err(io::Error::new(ErrorKind::TimedOut, "Operation timed out"));
        }

        let n = buf.len().min(script.readable.len());
        for (slot, byte) in buf.iter_mut().zip(script.readable.drain(..n)) {
            *slot = byte;
        }
        Ok(n)
    }
}

impl Write for ScriptedPort {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut script = self.script.borrow_mut();
        for &b in buf {
            script.written.push(b);
            if b == b'#' {
                let next = script.acks.pop_front();
                if let Some(Some(ack)) = next {
                    script.readable.extend(ack);
                }
            }
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl MountPort for ScriptedPort {
    fn discard_input(&mut self) -> io::Result<()> {
        let mut script = self.script.borrow_mut();
        script.readable.clear();
        script.input_discarded = true;
        Ok(())
    }
}
