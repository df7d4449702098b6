//! A [`SpiDevice`] adapter that bounds the duration of every SPI transaction.
//!
//! The wrapped device is moved to a worker thread. Each transaction is handed
//! to that thread and awaited for at most the configured [`Duration`].
//! If the deadline passes, then the adapter is poisoned because the stalled
//! worker may still own the bus. Every later transaction fails immediately
//! with [`TimeoutError::Stalled`].
extern crate std;

use core::{
    fmt::{Debug, Display, Formatter},
    time::Duration,
};
use embedded_hal::spi::{Error, ErrorKind, ErrorType, Operation, SpiDevice};
use std::{
    sync::mpsc::{self, Receiver, RecvTimeoutError, Sender},
    thread,
    vec,
    vec::Vec,
};

/// The errors produced by [`TimeoutSpi`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimeoutError<E> {
    /// The wrapped device failed the transaction.
    Spi(E),
    /// The transaction did not complete in time. The adapter is now poisoned.
    TimedOut,
    /// A previous transaction timed out. No transaction was attempted.
    Stalled,
    /// The worker thread is gone (the wrapped device panicked).
    Disconnected,
}

impl<E: Debug> Display for TimeoutError<E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            TimeoutError::Spi(e) => write!(f, "SPI device error: {e:?}"),
            TimeoutError::TimedOut => write!(f, "SPI transaction timed out"),
            TimeoutError::Stalled => write!(f, "SPI bus is stalled by a timed out transaction"),
            TimeoutError::Disconnected => write!(f, "SPI worker thread is gone"),
        }
    }
}

impl<E: Error> Error for TimeoutError<E> {
    fn kind(&self) -> ErrorKind {
        match self {
            TimeoutError::Spi(e) => e.kind(),
            _ => ErrorKind::Other,
        }
    }
}

/// An owned copy of an [`Operation`], so it can be sent to the worker thread.
#[derive(Debug)]
enum OwnedOp {
    Read(Vec<u8>),
    Write(Vec<u8>),
    Transfer(Vec<u8>, Vec<u8>),
    TransferInPlace(Vec<u8>),
    DelayNs(u32),
}

impl OwnedOp {
    fn from_operation(op: &Operation<'_, u8>) -> Self {
        match op {
            Operation::Read(buf) => OwnedOp::Read(vec![0; buf.len()]),
            Operation::Write(buf) => OwnedOp::Write(buf.to_vec()),
            Operation::Transfer(read, write) => {
                OwnedOp::Transfer(vec![0; read.len()], write.to_vec())
            }
            Operation::TransferInPlace(buf) => OwnedOp::TransferInPlace(buf.to_vec()),
            Operation::DelayNs(ns) => OwnedOp::DelayNs(*ns),
        }
    }

    fn as_operation(&mut self) -> Operation<'_, u8> {
        match self {
            OwnedOp::Read(buf) => Operation::Read(buf.as_mut_slice()),
            OwnedOp::Write(buf) => Operation::Write(buf.as_slice()),
            OwnedOp::Transfer(read, write) => {
                Operation::Transfer(read.as_mut_slice(), write.as_slice())
            }
            OwnedOp::TransferInPlace(buf) => Operation::TransferInPlace(buf.as_mut_slice()),
            OwnedOp::DelayNs(ns) => Operation::DelayNs(*ns),
        }
    }

    /// Copy the bytes read by the worker into the caller's `op`.
    fn copy_into(self, op: &mut Operation<'_, u8>) {
        match (self, op) {
            (OwnedOp::Read(buf), Operation::Read(dst))
            | (OwnedOp::TransferInPlace(buf), Operation::TransferInPlace(dst))
            | (OwnedOp::Transfer(buf, _), Operation::Transfer(dst, _)) => {
                dst.copy_from_slice(&buf);
            }
            _ => (),
        }
    }
}

type Reply<E> = (Result<(), E>, Vec<OwnedOp>);

/// A [`SpiDevice`] that fails any transaction taking longer than a given timeout.
pub struct TimeoutSpi<E> {
    requests: Sender<Vec<OwnedOp>>,
    replies: Receiver<Reply<E>>,
    timeout: Duration,
    poisoned: bool,
}

impl<E> TimeoutSpi<E>
where
    E: Error + Send + 'static,
{
    /// Move the given `spi` device to a worker thread.
    ///
    /// Every transaction must complete within `timeout`.
    pub fn new<SPI>(spi: SPI, timeout: Duration) -> Self
    where
        SPI: SpiDevice<Error = E> + Send + 'static,
    {
        let (requests, jobs) = mpsc::channel::<Vec<OwnedOp>>();
        let (results, replies) = mpsc::channel::<Reply<E>>();
        thread::spawn(move || {
            let mut spi = spi;
            while let Ok(mut ops) = jobs.recv() {
                let result = {
                    let mut operations: Vec<Operation<'_, u8>> =
                        ops.iter_mut().map(OwnedOp::as_operation).collect();
                    spi.transaction(&mut operations)
                };
                if results.send((result, ops)).is_err() {
                    break;
                }
            }
        });
        Self {
            requests,
            replies,
            timeout,
            poisoned: false,
        }
    }
}

impl<E> TimeoutSpi<E> {
    /// Has a transaction timed out?
    pub fn is_poisoned(&self) -> bool {
        self.poisoned
    }

    /// The timeout given to [`TimeoutSpi::new()`].
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl<E: Error> ErrorType for TimeoutSpi<E> {
    type Error = TimeoutError<E>;
}

impl<E: Error> SpiDevice for TimeoutSpi<E> {
    fn transaction(&mut self, operations: &mut [Operation<'_, u8>]) -> Result<(), Self::Error> {
        if self.poisoned {
            return Err(TimeoutError::Stalled);
        }
        let ops = operations.iter().map(OwnedOp::from_operation).collect();
        self.requests
            .send(ops)
            .map_err(|_| TimeoutError::Disconnected)?;
        match self.replies.recv_timeout(self.timeout) {
            Ok((result, ops)) => {
                for (done, op) in ops.into_iter().zip(operations.iter_mut()) {
                    done.copy_into(op);
                }
                result.map_err(TimeoutError::Spi)
            }
            Err(RecvTimeoutError::Timeout) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("SPI transaction timed out; the bus is now considered stalled");
                self.poisoned = true;
                Err(TimeoutError::TimedOut)
            }
            Err(RecvTimeoutError::Disconnected) => Err(TimeoutError::Disconnected),
        }
    }
}
