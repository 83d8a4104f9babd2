// Copyright 2026 the Hwcomposer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Repaint requests from the device to the compositor thread.
//!
//! Devices may ask for a full repaint from an interrupt or vsync thread. The
//! request is a single atomic flag: [`InvalidateSender::notify`] sets it from
//! any thread, and the compositor's own loop consumes it with
//! [`InvalidateReceiver::take`] before scheduling the repaint. Nothing on the
//! sending side can reach the work list or region storage.

use alloc::sync::Arc;
use core::fmt;
use core::sync::atomic::{AtomicBool, Ordering};

/// Creates a connected sender/receiver pair.
#[must_use]
pub fn invalidate_channel() -> (InvalidateSender, InvalidateReceiver) {
    let pending = Arc::new(AtomicBool::new(false));
    (
        InvalidateSender {
            pending: Arc::clone(&pending),
        },
        InvalidateReceiver { pending },
    )
}

/// A `Send + Sync` handle the device uses to request a repaint.
///
/// Cloning is cheap (Arc bump). Repeated notifications before the receiver
/// consumes them collapse into one.
#[derive(Clone)]
pub struct InvalidateSender {
    pending: Arc<AtomicBool>,
}

impl fmt::Debug for InvalidateSender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InvalidateSender").finish_non_exhaustive()
    }
}

impl InvalidateSender {
    /// Requests a full repaint. Safe to call from any thread.
    pub fn notify(&self) {
        self.pending.store(true, Ordering::Release);
    }
}

/// The compositor-side end of the repaint request channel.
pub struct InvalidateReceiver {
    pending: Arc<AtomicBool>,
}

impl fmt::Debug for InvalidateReceiver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InvalidateReceiver")
            .field("pending", &self.pending.load(Ordering::Relaxed))
            .finish()
    }
}

impl InvalidateReceiver {
    /// Returns `true` if a repaint was requested, without consuming it.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.load(Ordering::Acquire)
    }

    /// Consumes a pending repaint request. Returns `true` at most once per
    /// burst of notifications.
    #[must_use]
    pub fn take(&self) -> bool {
        self.pending.swap(false, Ordering::AcqRel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notifications_collapse() {
        let (tx, rx) = invalidate_channel();
        assert!(!rx.take());
        tx.notify();
        tx.clone().notify();
        assert!(rx.is_pending());
        assert!(rx.take());
        assert!(!rx.take(), "second take sees nothing");
    }
}
