// Copyright 2026 the Hwcomposer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The compositor-facing session around a hardware composer device.
//!
//! [`DeviceSession`] owns the [`WorkList`] and drives the device through one
//! frame at a time:
//!
//! ```text
//!   create_work_list(n)
//!       │
//!       ▼
//!   layers_mut() ──► adjust_geometry() / adjust_overscan()
//!                                │
//!                ┌───────────────┘
//!                ▼
//!   prepare() ──► layer_count(kind) ──► commit()
//! ```
//!
//! A session whose device could not be opened stays uninitialized for its
//! whole life. `create_work_list`, `prepare`, and `commit` then fail with
//! [`HwcError::NotInitialized`]; `release` and `disable` succeed without doing
//! anything. Callers treat that as "composite everything in software".

use alloc::boxed::Box;
use core::fmt;

use tracing::{debug, error, trace, warn};

use crate::classify::{CompositionTally, PreparePhase};
use crate::device::{Device, DeviceLoader, HWC_MODULE_ID, OpenError};
use crate::display::{DisplayHandle, SurfaceHandle};
use crate::error::{HwcError, STATUS_OK, check_status};
use crate::geometry::{GeometryConfig, Overscan, Size};
use crate::invalidate::{InvalidateReceiver, invalidate_channel};
use crate::layer::{CompositionType, Layer};
use crate::trace::{
    CommitEvent, PrepareEvent, ResizeEvent, ShutdownEvent, ShutdownKind, TraceSink, Tracer,
};
use crate::work_list::WorkList;

/// Owns the work list and the device for one display.
pub struct DeviceSession<D> {
    device: Option<D>,
    list: WorkList,
    tally: CompositionTally,
    phase: PreparePhase,
    display: Option<DisplayHandle>,
    surface: Option<SurfaceHandle>,
    invalidate: InvalidateReceiver,
    sink: Option<Box<dyn TraceSink + Send>>,
}

impl<D> fmt::Debug for DeviceSession<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeviceSession")
            .field("initialized", &self.device.is_some())
            .field("list", &self.list)
            .field("tally", &self.tally)
            .field("phase", &self.phase)
            .field("display", &self.display)
            .field("surface", &self.surface)
            .finish_non_exhaustive()
    }
}

impl<D: Device> DeviceSession<D> {
    /// Opens the composer module through `loader`.
    ///
    /// Failures are logged and produce an uninitialized session.
    pub fn open<L>(loader: &L) -> Self
    where
        L: DeviceLoader<Device = D>,
    {
        match loader.open(HWC_MODULE_ID) {
            Ok(device) => Self::with_device(device),
            Err(OpenError::NotFound) => {
                warn!(module = HWC_MODULE_ID, "hardware composer module not found");
                Self::uninitialized()
            }
            Err(err) => {
                error!(module = HWC_MODULE_ID, %err, "hardware composer device failed to initialize");
                Self::uninitialized()
            }
        }
    }

    /// Wraps an already opened device and registers for its repaint requests.
    pub fn with_device(mut device: D) -> Self {
        let (sender, invalidate) = invalidate_channel();
        device.register_invalidate(sender);
        Self {
            device: Some(device),
            ..Self::empty(invalidate)
        }
    }

    /// Creates a session with no device.
    #[must_use]
    pub fn uninitialized() -> Self {
        let (_, invalidate) = invalidate_channel();
        Self::empty(invalidate)
    }

    fn empty(invalidate: InvalidateReceiver) -> Self {
        Self {
            device: None,
            list: WorkList::new(),
            tally: CompositionTally::default(),
            phase: PreparePhase::Unprepared,
            display: None,
            surface: None,
            invalidate,
            sink: None,
        }
    }

    /// Returns an error unless a device is present.
    ///
    /// # Errors
    ///
    /// [`HwcError::NotInitialized`] if the device could not be opened.
    pub fn init_check(&self) -> Result<(), HwcError> {
        if self.device.is_some() {
            Ok(())
        } else {
            Err(HwcError::NotInitialized)
        }
    }

    /// The device, if one was opened.
    #[must_use]
    pub fn device(&self) -> Option<&D> {
        self.device.as_ref()
    }

    /// Installs a sink for session trace events.
    pub fn set_trace_sink(&mut self, sink: Box<dyn TraceSink + Send>) {
        self.sink = Some(sink);
    }

    /// Removes and returns the trace sink.
    pub fn take_trace_sink(&mut self) -> Option<Box<dyn TraceSink + Send>> {
        self.sink.take()
    }

    /// Sets the display and framebuffer surface `commit` targets.
    pub fn set_frame_buffer(&mut self, display: DisplayHandle, surface: SurfaceHandle) {
        self.display = Some(display);
        self.surface = Some(surface);
    }

    /// Sizes the work list for `layers` layers and marks the geometry changed.
    ///
    /// The session returns to [`PreparePhase::Unprepared`] even if the resize
    /// fails.
    ///
    /// # Errors
    ///
    /// [`HwcError::NotInitialized`] without a device, or
    /// [`HwcError::Allocation`] if storage could not be reserved.
    pub fn create_work_list(&mut self, layers: usize) -> Result<(), HwcError> {
        self.init_check()?;
        self.phase = PreparePhase::Unprepared;
        let reallocated = self.list.resize(layers)?;
        if reallocated {
            debug!(layers, "reallocated work list");
        }
        let event = ResizeEvent {
            layers,
            capacity: self.list.capacity(),
            reallocated,
        };
        self.tracer().resize(&event);
        Ok(())
    }

    /// Fits the layer at `index` into the display and applies overscan.
    ///
    /// Does nothing if the work list has no storage.
    ///
    /// # Errors
    ///
    /// [`HwcError::Allocation`] if the visible region could not be copied.
    ///
    /// # Panics
    ///
    /// Panics if the list has storage and `index >= self.num_layers()`.
    pub fn adjust_geometry(
        &mut self,
        index: usize,
        config: &GeometryConfig,
    ) -> Result<(), HwcError> {
        if !self.list.is_allocated() {
            return Ok(());
        }
        self.list.adjust_geometry(index, config)
    }

    /// Insets the layer at `index` by `overscan` within `display`.
    ///
    /// Does nothing if the work list has no storage.
    ///
    /// # Errors
    ///
    /// [`HwcError::Allocation`] if the visible region could not be copied.
    ///
    /// # Panics
    ///
    /// Panics if the list has storage and `index >= self.num_layers()`.
    pub fn adjust_overscan(
        &mut self,
        index: usize,
        display: Size,
        overscan: Overscan,
    ) -> Result<(), HwcError> {
        if !self.list.is_allocated() {
            return Ok(());
        }
        self.list.adjust_overscan(index, display, overscan)
    }

    /// Asks the device to classify the work list, then recomputes the tallies.
    ///
    /// Layers flagged [`SKIP_LAYER`](crate::layer::LayerFlags::SKIP_LAYER)
    /// are forced to framebuffer composition. On failure the tallies of the
    /// previous successful prepare are kept and the session returns to
    /// [`PreparePhase::Unprepared`].
    ///
    /// # Errors
    ///
    /// [`HwcError::NotInitialized`] without a device, or
    /// [`HwcError::Device`] with the device's status.
    pub fn prepare(&mut self) -> Result<(), HwcError> {
        let device = self.device.as_mut().ok_or(HwcError::NotInitialized)?;
        let status = device.prepare(self.list.prepare_list());
        if status == STATUS_OK {
            self.tally = CompositionTally::classify(self.list.layers_mut());
            self.phase = PreparePhase::Prepared;
            debug!(
                overlay = self.tally.overlay,
                framebuffer = self.tally.framebuffer,
                "prepared work list"
            );
        } else {
            self.phase = PreparePhase::Unprepared;
            debug!(status, "device rejected work list");
        }
        let event = PrepareEvent {
            layers: self.list.len(),
            status,
            tally: self.tally,
        };
        self.tracer().prepare(&event);
        check_status(status)
    }

    /// Number of layers the latest successful prepare assigned to `kind`.
    ///
    /// Only [`Overlay`](CompositionType::Overlay) and
    /// [`Framebuffer`](CompositionType::Framebuffer) are tallied; any other
    /// kind reads zero.
    #[must_use]
    pub fn layer_count(&self, kind: CompositionType) -> usize {
        self.tally.count(kind)
    }

    /// Tallies from the latest successful prepare.
    #[must_use]
    pub fn tally(&self) -> CompositionTally {
        self.tally
    }

    /// Where the session is in the prepare/commit cycle.
    #[must_use]
    pub fn phase(&self) -> PreparePhase {
        self.phase
    }

    /// Submits the work list to the display.
    ///
    /// The geometry-changed flag is cleared afterwards whether or not the
    /// device accepted the list.
    ///
    /// # Errors
    ///
    /// [`HwcError::NotInitialized`] without a device, or
    /// [`HwcError::Device`] with the device's status.
    pub fn commit(&mut self) -> Result<(), HwcError> {
        let device = self.device.as_mut().ok_or(HwcError::NotInitialized)?;
        let geometry_changed = self.list.geometry_changed();
        let list = self.list.is_allocated().then_some(&self.list);
        let status = device.set(self.display, self.surface, list);
        self.list.clear_geometry_changed();
        if status == STATUS_OK {
            trace!(geometry_changed, "committed work list");
        } else {
            debug!(status, geometry_changed, "device rejected commit");
        }
        let event = CommitEvent {
            layers: self.list.len(),
            geometry_changed,
            status,
        };
        self.tracer().commit(&event);
        check_status(status)
    }

    /// Tells the device to stop driving the display.
    ///
    /// # Errors
    ///
    /// [`HwcError::Device`] with the device's status.
    pub fn release(&mut self) -> Result<(), HwcError> {
        let Some(device) = self.device.as_mut() else {
            return Ok(());
        };
        let status = device.set(None, None, None);
        if status != STATUS_OK {
            debug!(status, "device failed to release display");
        }
        self.tracer().shutdown(&ShutdownEvent {
            kind: ShutdownKind::Release,
            status,
        });
        check_status(status)
    }

    /// Frees the work list and tells the device hardware composition is off.
    ///
    /// # Errors
    ///
    /// [`HwcError::Device`] with the device's status.
    pub fn disable(&mut self) -> Result<(), HwcError> {
        let Some(device) = self.device.as_mut() else {
            return Ok(());
        };
        self.list.free();
        self.phase = PreparePhase::Unprepared;
        let status = device.prepare(None);
        if status != STATUS_OK {
            debug!(status, "device failed to disable hardware composition");
        }
        self.tracer().shutdown(&ShutdownEvent {
            kind: ShutdownKind::Disable,
            status,
        });
        check_status(status)
    }

    /// Number of layers in the work list; zero without storage.
    #[must_use]
    pub fn num_layers(&self) -> usize {
        self.list.len()
    }

    /// The work list's layers; empty without storage.
    #[must_use]
    pub fn layers(&self) -> &[Layer] {
        self.list.layers()
    }

    /// Mutable access to the work list's layers.
    #[must_use]
    pub fn layers_mut(&mut self) -> &mut [Layer] {
        self.list.layers_mut()
    }

    /// The work list itself.
    #[must_use]
    pub fn work_list(&self) -> &WorkList {
        &self.list
    }

    /// Consumes a pending repaint request from the device.
    ///
    /// The compositor calls this from its own loop and schedules a full
    /// repaint when it returns `true`.
    pub fn take_invalidate(&mut self) -> bool {
        let pending = self.invalidate.take();
        if pending {
            self.tracer().invalidate();
        }
        pending
    }

    /// Writes the device's own diagnostic text, if it provides any.
    ///
    /// # Errors
    ///
    /// Propagates formatter errors from `out`.
    pub fn device_dump(&self, out: &mut dyn fmt::Write) -> fmt::Result {
        match &self.device {
            Some(device) if device.version() >= 1 => device.dump(out),
            _ => Ok(()),
        }
    }

    fn tracer(&mut self) -> Tracer<'_> {
        match self.sink.as_deref_mut() {
            Some(sink) => Tracer::new(sink),
            None => Tracer::none(),
        }
    }
}
