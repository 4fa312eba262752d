//! Stdin byte source.
//!
//! Raw mode leaves stdin reads fully blocking, so a small reader thread pumps
//! bytes into a bounded channel and `read_byte` waits on the channel with a
//! timeout. The thread owns no editor state; it only forwards bytes.

use crate::ByteSource;
use crossbeam_channel::{Receiver, RecvTimeoutError, Sender};
use std::io::{self, Read};
use std::time::Duration;
use tracing::{debug, warn};

const STDIN_CHANNEL_CAP: usize = 4_096;
const READ_CHUNK: usize = 64;

pub struct StdinSource {
    rx: Receiver<u8>,
}

impl StdinSource {
    /// Start the reader thread.
    pub fn spawn() -> io::Result<Self> {
        let (tx, rx) = crossbeam_channel::bounded(STDIN_CHANNEL_CAP);
        std::thread::Builder::new()
            .name("stdin-pump".into())
            .spawn(move || pump(io::stdin().lock(), tx))?;
        Ok(Self { rx })
    }
}

fn pump<R: Read>(mut input: R, tx: Sender<u8>) {
    let mut buf = [0u8; READ_CHUNK];
    loop {
        match input.read(&mut buf) {
            Ok(0) => {
                debug!(target: "input.stdin", "eof");
                return;
            }
            Ok(n) => {
                for &b in &buf[..n] {
                    if tx.send(b).is_err() {
                        return;
                    }
                }
            }
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => {
                warn!(target: "input.stdin", error = %e, "read_failed");
                return;
            }
        }
    }
}

impl ByteSource for StdinSource {
    fn read_byte(&mut self, timeout: Duration) -> io::Result<Option<u8>> {
        match self.rx.recv_timeout(timeout) {
            Ok(b) => Ok(Some(b)),
            Err(RecvTimeoutError::Timeout) => Ok(None),
            Err(RecvTimeoutError::Disconnected) => Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "stdin closed",
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pump_forwards_bytes_then_disconnects() {
        let (tx, rx) = crossbeam_channel::bounded(16);
        pump(&b"ab"[..], tx);
        let mut src = StdinSource { rx };
        let t = Duration::from_millis(10);
        assert_eq!(src.read_byte(t).unwrap(), Some(b'a'));
        assert_eq!(src.read_byte(t).unwrap(), Some(b'b'));
        let err = src.read_byte(t).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }

    #[test]
    fn quiet_channel_times_out() {
        let (_tx, rx) = crossbeam_channel::bounded::<u8>(1);
        let mut src = StdinSource { rx };
        assert_eq!(src.read_byte(Duration::from_millis(5)).unwrap(), None);
    }
}
