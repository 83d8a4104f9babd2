// Copyright 2026 the Hwcomposer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Opaque display, surface, and buffer handles.
//!
//! Handles are created by the windowing or graphics stack outside this crate.
//! Core code passes them through to the device without interpreting them.

use core::fmt;

/// Identifies the display connection a frame is committed to.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct DisplayHandle(pub u64);

impl fmt::Debug for DisplayHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DisplayHandle({:#x})", self.0)
    }
}

/// Identifies the framebuffer surface the device composites into.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct SurfaceHandle(pub u64);

impl fmt::Debug for SurfaceHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SurfaceHandle({:#x})", self.0)
    }
}

/// An opaque reference to a layer's graphics buffer.
///
/// A layer with `None` has no buffer attached (for example a dim or
/// solid-color layer that must be drawn by the compositor).
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BufferHandle(pub u64);

impl fmt::Debug for BufferHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BufferHandle({:#x})", self.0)
    }
}
