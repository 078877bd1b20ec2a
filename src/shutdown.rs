//! Cooperative shutdown request.
//!
//! A termination-signal handler only sets the flag. The control loop
//! observes it between steps and holds, returns [`Error::Interrupted`], and
//! unwinds through the scoped GPIO session so the chip is closed on the way
//! out.
//!
//! [`Error::Interrupted`]: crate::Error::Interrupted

use core::sync::atomic::{AtomicBool, Ordering};

use crate::error::{Error, Result};

/// Process-wide stop request flag.
#[derive(Debug, Default)]
pub struct ShutdownSignal {
    requested: AtomicBool,
}

impl ShutdownSignal {
    /// Create a signal in the "running" state. Usable in a `static`.
    pub const fn new() -> Self {
        Self {
            requested: AtomicBool::new(false),
        }
    }

    /// Request shutdown. Safe to call from a signal-handler thread.
    pub fn trigger(&self) {
        self.requested.store(true, Ordering::SeqCst);
    }

    /// Check whether shutdown was requested.
    #[inline]
    pub fn is_triggered(&self) -> bool {
        self.requested.load(Ordering::SeqCst)
    }

    /// `Err(Error::Interrupted)` once shutdown was requested.
    #[inline]
    pub fn check(&self) -> Result<()> {
        if self.is_triggered() {
            Err(Error::Interrupted)
        } else {
            Ok(())
        }
    }
}
