//! Socket deadlines.
//!
//! `TimedStream` wraps an accepted socket and fails it with
//! `ErrorKind::TimedOut` when:
//! - a read stays pending for the idle timeout while no request is in flight
//! - a write stays pending for the write timeout
//!
//! Any completed read or write restarts the idle clock.

use std::future::Future;
use std::io;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;

use tokio::io::{AsyncRead, AsyncWrite, ReadBuf};
use tokio::time::Sleep;

use crate::net::connection::InFlight;

/// Time allowed for a client to send a complete request head.
pub const READ_TIMEOUT: Duration = Duration::from_secs(15);

/// Time a single write may stay blocked on a slow reader.
pub const WRITE_TIMEOUT: Duration = Duration::from_secs(15);

/// Time a connection may sit with no request in flight.
pub const IDLE_TIMEOUT: Duration = Duration::from_secs(60);

/// Per-connection timeout settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectionTimeouts {
    pub read: Duration,
    pub write: Duration,
    pub idle: Duration,
}

impl Default for ConnectionTimeouts {
    fn default() -> Self {
        Self {
            read: READ_TIMEOUT,
            write: WRITE_TIMEOUT,
            idle: IDLE_TIMEOUT,
        }
    }
}

/// A socket with idle and write deadlines.
#[derive(Debug)]
pub struct TimedStream<S> {
    inner: S,
    timeouts: ConnectionTimeouts,
    in_flight: InFlight,
    idle_deadline: Option<Pin<Box<Sleep>>>,
    write_deadline: Option<Pin<Box<Sleep>>>,
}

impl<S> TimedStream<S> {
    pub fn new(inner: S, timeouts: ConnectionTimeouts, in_flight: InFlight) -> Self {
        Self {
            inner,
            timeouts,
            in_flight,
            idle_deadline: None,
            write_deadline: None,
        }
    }

    fn finish_write<T>(&mut self, polled: Poll<io::Result<T>>, cx: &mut Context<'_>) -> Poll<io::Result<T>> {
        match polled {
            Poll::Ready(result) => {
                self.write_deadline = None;
                self.idle_deadline = None;
                Poll::Ready(result)
            }
            Poll::Pending => {
                if expired(&mut self.write_deadline, self.timeouts.write, cx) {
                    self.write_deadline = None;
                    return Poll::Ready(Err(timed_out("write timeout")));
                }
                Poll::Pending
            }
        }
    }
}

/// Poll `deadline`, arming it with `after` first if unset.
fn expired(deadline: &mut Option<Pin<Box<Sleep>>>, after: Duration, cx: &mut Context<'_>) -> bool {
    deadline
        .get_or_insert_with(|| Box::pin(tokio::time::sleep(after)))
        .as_mut()
        .poll(cx)
        .is_ready()
}

fn timed_out(what: &'static str) -> io::Error {
    io::Error::new(io::ErrorKind::TimedOut, what)
}

impl<S: AsyncRead + Unpin> AsyncRead for TimedStream<S> {
    fn poll_read(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        let this = self.get_mut();

        match Pin::new(&mut this.inner).poll_read(cx, buf) {
            Poll::Ready(result) => {
                this.idle_deadline = None;
                Poll::Ready(result)
            }
            Poll::Pending => {
                // A handler is running; the request deadline bounds it instead.
                if !this.in_flight.is_idle() {
                    this.idle_deadline = None;
                    return Poll::Pending;
                }
                if expired(&mut this.idle_deadline, this.timeouts.idle, cx) {
                    this.idle_deadline = None;
                    return Poll::Ready(Err(timed_out("idle timeout")));
                }
                Poll::Pending
            }
        }
    }
}

impl<S: AsyncWrite + Unpin> AsyncWrite for TimedStream<S> {
    fn poll_write(self: Pin<&mut Self>, cx: &mut Context<'_>, buf: &[u8]) -> Poll<io::Result<usize>> {
        let this = self.get_mut();
        let polled = Pin::new(&mut this.inner).poll_write(cx, buf);
        this.finish_write(polled, cx)
    }

    fn poll_write_vectored(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        bufs: &[io::IoSlice<'_>],
    ) -> Poll<io::Result<usize>> {
        let this = self.get_mut();
        let polled = Pin::new(&mut this.inner).poll_write_vectored(cx, bufs);
        this.finish_write(polled, cx)
    }

    fn is_write_vectored(&self) -> bool {
        self.inner.is_write_vectored()
    }

    fn poll_flush(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        let this = self.get_mut();
        let polled = Pin::new(&mut this.inner).poll_flush(cx);
        this.finish_write(polled, cx)
    }

    fn poll_shutdown(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Pin::new(&mut self.get_mut().inner).poll_shutdown(cx)
    }
}
