// Copyright 2026 the Hwcomposer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per event
//! to a [`Write`](std::io::Write) destination (default: stderr). The writer
//! must be `Send` so the sink can be installed on a
//! [`DeviceSession`](hwcomposer_core::session::DeviceSession).

use std::io::Write;

use hwcomposer_core::trace::{
    CommitEvent, PrepareEvent, ResizeEvent, ShutdownEvent, ShutdownKind, TraceSink,
};

/// Writes human-readable trace lines to a [`Write`](std::io::Write) destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write + Send>> {
    writer: W,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink").finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self {
            writer: Box::new(std::io::stderr()),
        }
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write + Send>) -> Self {
        Self { writer }
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self { writer }
    }

    /// Consumes the sink and returns the writer.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.writer
    }
}

fn status(status: i32) -> String {
    if status == 0 {
        "ok".to_owned()
    } else {
        format!("err({status})")
    }
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_resize(&mut self, e: &ResizeEvent) {
        let realloc = if e.reallocated { " realloc" } else { "" };
        let _ = writeln!(
            self.writer,
            "[resize] layers={} capacity={}{realloc}",
            e.layers, e.capacity,
        );
    }

    fn on_prepare(&mut self, e: &PrepareEvent) {
        let _ = writeln!(
            self.writer,
            "[prepare] layers={} overlay={} fb={} status={}",
            e.layers,
            e.tally.overlay,
            e.tally.framebuffer,
            status(e.status),
        );
    }

    fn on_commit(&mut self, e: &CommitEvent) {
        let geometry = if e.geometry_changed { " geometry" } else { "" };
        let _ = writeln!(
            self.writer,
            "[commit] layers={}{geometry} status={}",
            e.layers,
            status(e.status),
        );
    }

    fn on_shutdown(&mut self, e: &ShutdownEvent) {
        let kind = match e.kind {
            ShutdownKind::Release => "release",
            ShutdownKind::Disable => "disable",
        };
        let _ = writeln!(self.writer, "[{kind}] status={}", status(e.status));
    }

    fn on_invalidate(&mut self) {
        let _ = writeln!(self.writer, "[invalidate]");
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use hwcomposer_core::classify::CompositionTally;
    use hwcomposer_core::device::Device;
    use hwcomposer_core::display::{DisplayHandle, SurfaceHandle};
    use hwcomposer_core::session::DeviceSession;
    use hwcomposer_core::work_list::{PrepareList, WorkList};

    use super::*;

    #[test]
    fn one_line_per_event() {
        let mut sink = PrettyPrintSink::with_writer(Vec::new());
        sink.on_resize(&ResizeEvent {
            layers: 3,
            capacity: 3,
            reallocated: true,
        });
        sink.on_prepare(&PrepareEvent {
            layers: 3,
            status: 0,
            tally: CompositionTally {
                overlay: 2,
                framebuffer: 1,
            },
        });
        sink.on_commit(&CommitEvent {
            layers: 3,
            geometry_changed: true,
            status: -22,
        });
        sink.on_shutdown(&ShutdownEvent {
            kind: ShutdownKind::Disable,
            status: 0,
        });
        sink.on_invalidate();

        let text = String::from_utf8(sink.into_inner()).unwrap();
        assert_eq!(
            text,
            "[resize] layers=3 capacity=3 realloc\n\
             [prepare] layers=3 overlay=2 fb=1 status=ok\n\
             [commit] layers=3 geometry status=err(-22)\n\
             [disable] status=ok\n\
             [invalidate]\n"
        );
    }

    /// Shares a byte buffer between the test and a sink owned by a session.
    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    struct AcceptAll;

    impl Device for AcceptAll {
        fn prepare(&mut self, _: Option<PrepareList<'_>>) -> i32 {
            0
        }

        fn set(
            &mut self,
            _: Option<DisplayHandle>,
            _: Option<SurfaceHandle>,
            _: Option<&WorkList>,
        ) -> i32 {
            0
        }
    }

    #[test]
    fn session_events_reach_sink() {
        let buffer = SharedBuffer::default();
        let mut session = DeviceSession::with_device(AcceptAll);
        session.set_trace_sink(Box::new(PrettyPrintSink::with_writer(buffer.clone())));
        session.create_work_list(2).unwrap();
        session.prepare().unwrap();
        session.commit().unwrap();
        session.release().unwrap();

        let text = String::from_utf8(buffer.0.lock().unwrap().clone()).unwrap();
        let tags: Vec<&str> = text
            .lines()
            .filter_map(|l| l.split(' ').next())
            .collect();
        assert_eq!(tags, ["[resize]", "[prepare]", "[commit]", "[release]"]);
    }
}
