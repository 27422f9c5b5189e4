//! Destinations for finished log lines.

use std::fmt;
use std::io::{self, Write};
use std::sync::Arc;

use parking_lot::Mutex;

/// Receives complete, newline-terminated log lines.
///
/// Each call carries exactly one line. Implementations must write it in one
/// piece so that lines from concurrent writers never interleave.
pub trait Sink: Send + Sync {
    /// Writes one line.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error if the line could not be written.
    fn write_line(&self, line: &[u8]) -> io::Result<()>;
}

/// Writes lines to standard error. The default destination.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Stderr;

impl Sink for Stderr {
    fn write_line(&self, line: &[u8]) -> io::Result<()> {
        let mut handle = io::stderr().lock();
        handle.write_all(line)?;
        handle.flush()
    }
}

/// Writes lines to standard output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Stdout;

impl Sink for Stdout {
    fn write_line(&self, line: &[u8]) -> io::Result<()> {
        let mut handle = io::stdout().lock();
        handle.write_all(line)?;
        handle.flush()
    }
}

/// Adapts any [`Write`] implementation into a sink by serialising access.
///
/// # Examples
///
/// ```
/// use fieldlog::{LockedWriter, Sink};
///
/// let sink = LockedWriter::new(Vec::new());
/// sink.write_line(b"{ }\n").expect("vectors accept writes");
/// assert_eq!(sink.into_inner(), b"{ }\n");
/// ```
pub struct LockedWriter<W> {
    inner: Mutex<W>,
}

impl<W> LockedWriter<W> {
    /// Wraps `writer`.
    #[must_use]
    pub const fn new(writer: W) -> Self {
        Self {
            inner: Mutex::new(writer),
        }
    }

    /// Runs `f` with exclusive access to the wrapped writer.
    pub fn with_inner<R>(&self, f: impl FnOnce(&mut W) -> R) -> R {
        f(&mut self.inner.lock())
    }

    /// Returns the wrapped writer.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.inner.into_inner()
    }
}

impl<W> fmt::Debug for LockedWriter<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LockedWriter").finish_non_exhaustive()
    }
}

impl<W: Write + Send> Sink for LockedWriter<W> {
    fn write_line(&self, line: &[u8]) -> io::Result<()> {
        let mut writer = self.inner.lock();
        writer.write_all(line)?;
        writer.flush()
    }
}

impl<S: Sink + ?Sized> Sink for Arc<S> {
    fn write_line(&self, line: &[u8]) -> io::Result<()> {
        (**self).write_line(line)
    }
}

impl<S: Sink + ?Sized> Sink for Box<S> {
    fn write_line(&self, line: &[u8]) -> io::Result<()> {
        (**self).write_line(line)
    }
}

impl<S: Sink + ?Sized> Sink for &S {
    fn write_line(&self, line: &[u8]) -> io::Result<()> {
        (**self).write_line(line)
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for the bundled sinks.

    use std::io::{self, Write};
    use std::sync::Arc;

    use super::{LockedWriter, Sink};

    /// Accepts one byte per call so that partial writes are exercised.
    struct Trickle(Vec<u8>);

    impl Write for Trickle {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            match buf.first() {
                Some(&byte) => {
                    self.0.push(byte);
                    Ok(1)
                }
                None => Ok(0),
            }
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn locked_writer_writes_whole_lines() {
        let sink = LockedWriter::new(Trickle(Vec::new()));
        sink.write_line(b"first\n").expect("write succeeds");
        sink.write_line(b"second\n").expect("write succeeds");
        assert_eq!(sink.into_inner().0, b"first\nsecond\n");
    }

    #[test]
    fn concurrent_lines_do_not_interleave() {
        let sink = Arc::new(LockedWriter::new(Trickle(Vec::new())));
        std::thread::scope(|scope| {
            for id in 0..4_u8 {
                let sink = Arc::clone(&sink);
                scope.spawn(move || {
                    let line = [b'a' + id; 64].iter().copied().chain([b'\n']).collect::<Vec<_>>();
                    for _ in 0..25 {
                        sink.write_line(&line).expect("write succeeds");
                    }
                });
            }
        });
        let written = sink.with_inner(|inner| inner.0.clone());
        let lines: Vec<&[u8]> = written.split(|&b| b == b'\n').filter(|l| !l.is_empty()).collect();
        assert_eq!(lines.len(), 100);
        for line in lines {
            assert!(line.iter().all(|&b| Some(&b) == line.first()));
        }
    }

    #[test]
    fn write_errors_propagate() {
        struct Closed;
        impl Write for Closed {
            fn write(&mut self, _: &[u8]) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
            }

            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        let sink: Box<dyn Sink> = Box::new(LockedWriter::new(Closed));
        let error = sink.write_line(b"x\n").expect_err("closed writer fails");
        assert_eq!(error.kind(), io::ErrorKind::BrokenPipe);
    }
}
