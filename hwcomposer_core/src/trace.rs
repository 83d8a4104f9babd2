// Copyright 2026 the Hwcomposer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Instrumentation for the prepare/commit cycle.
//!
//! This module provides a [`TraceSink`] trait with one method per session
//! operation. All method bodies default to no-ops, so implementing only the
//! events you care about is fine.
//!
//! [`Tracer`] wraps an optional `&mut dyn TraceSink`. When the `trace` feature
//! is **off**, every `Tracer` method compiles to nothing (zero overhead). When
//! **on**, each method performs a single `Option` branch before dispatching.
//!
//! Events carry the raw device status so sinks can record failures without
//! the session having to log them.

use crate::classify::CompositionTally;

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Emitted after the work list is sized for a frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResizeEvent {
    /// Requested layer count.
    pub layers: usize,
    /// Capacity after the resize.
    pub capacity: usize,
    /// Whether backing storage was reallocated.
    pub reallocated: bool,
}

/// Emitted after the device's `prepare` returns.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PrepareEvent {
    /// Layers submitted.
    pub layers: usize,
    /// Raw device status.
    pub status: i32,
    /// Tallies in effect after the call (stale if `status` is non-zero).
    pub tally: CompositionTally,
}

/// Emitted after a commit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CommitEvent {
    /// Layers submitted.
    pub layers: usize,
    /// Whether the geometry-changed flag was set at submission.
    pub geometry_changed: bool,
    /// Raw device status.
    pub status: i32,
}

/// Emitted after `release` or `disable` reaches the device.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ShutdownEvent {
    /// Which operation ran.
    pub kind: ShutdownKind,
    /// Raw device status.
    pub status: i32,
}

/// Which shutdown path produced a [`ShutdownEvent`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ShutdownKind {
    /// The device stopped driving the display.
    Release,
    /// Hardware composition was abandoned and the list freed.
    Disable,
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from a [`DeviceSession`](crate::session::DeviceSession).
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink {
    /// Called after the work list is resized.
    fn on_resize(&mut self, e: &ResizeEvent) {
        _ = e;
    }

    /// Called after `prepare`.
    fn on_prepare(&mut self, e: &PrepareEvent) {
        _ = e;
    }

    /// Called after `commit`.
    fn on_commit(&mut self, e: &CommitEvent) {
        _ = e;
    }

    /// Called after `release` or `disable`.
    fn on_shutdown(&mut self, e: &ShutdownEvent) {
        _ = e;
    }

    /// Called when the compositor consumes a repaint request.
    fn on_invalidate(&mut self) {}
}

// ---------------------------------------------------------------------------
// NoopSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Thin wrapper around an optional [`TraceSink`].
///
/// When the `trace` feature is **off**, every method compiles to nothing. When
/// **on**, each method checks the inner `Option` (one branch) before
/// dispatching to the sink.
pub struct Tracer<'a> {
    #[cfg(feature = "trace")]
    sink: Option<&'a mut dyn TraceSink>,
    #[cfg(not(feature = "trace"))]
    _marker: core::marker::PhantomData<&'a mut dyn TraceSink>,
}

impl core::fmt::Debug for Tracer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

impl<'a> Tracer<'a> {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: &'a mut dyn TraceSink) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: None }
        }
        #[cfg(not(feature = "trace"))]
        {
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Emits a [`ResizeEvent`].
    #[inline]
    pub fn resize(&mut self, e: &ResizeEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_resize(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`PrepareEvent`].
    #[inline]
    pub fn prepare(&mut self, e: &PrepareEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_prepare(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`CommitEvent`].
    #[inline]
    pub fn commit(&mut self, e: &CommitEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_commit(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`ShutdownEvent`].
    #[inline]
    pub fn shutdown(&mut self, e: &ShutdownEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_shutdown(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits an invalidate notification.
    #[inline]
    pub fn invalidate(&mut self) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_invalidate();
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn noop_sink_compiles() {
        let mut sink = NoopSink;
        sink.on_resize(&ResizeEvent {
            layers: 3,
            capacity: 3,
            reallocated: true,
        });
        sink.on_invalidate();
    }

    #[test]
    fn tracer_none_does_nothing() {
        let mut tracer = Tracer::none();
        tracer.commit(&CommitEvent {
            layers: 0,
            geometry_changed: false,
            status: 0,
        });
        tracer.invalidate();
    }

    #[cfg(feature = "trace")]
    #[test]
    fn tracer_dispatches_to_sink() {
        use alloc::vec::Vec;

        struct RecordingSink {
            statuses: Vec<i32>,
        }
        impl TraceSink for RecordingSink {
            fn on_prepare(&mut self, e: &PrepareEvent) {
                self.statuses.push(e.status);
            }
        }

        let mut sink = RecordingSink {
            statuses: Vec::new(),
        };
        let mut tracer = Tracer::new(&mut sink);
        tracer.prepare(&PrepareEvent {
            layers: 2,
            status: -5,
            tally: CompositionTally::default(),
        });
        // Access sink after tracer is dropped.
        drop(tracer);
        assert_eq!(sink.statuses, &[-5]);
    }
}
