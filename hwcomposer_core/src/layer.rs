// Copyright 2026 the Hwcomposer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layer descriptors submitted to the device.
//!
//! A [`Layer`] describes one visible surface for the current frame. The
//! compositor fills in the buffer, blending, transform, and rectangles; the
//! geometry pass may rewrite the rectangles; the device writes
//! [`composition_type`](Layer::composition_type) and [`hints`](Layer::hints)
//! during `prepare`.

use crate::display::BufferHandle;
use crate::geometry::Rect;
use crate::region::VisibleRegion;

/// How the device decided to composite a layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CompositionType {
    /// The compositor must blend this layer into the framebuffer.
    Framebuffer,
    /// The device composites this layer itself.
    Overlay,
    /// The device fills the background; neither bucket counts it.
    Background,
}

impl CompositionType {
    /// Short label used in diagnostics.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Framebuffer => "FB",
            Self::Overlay => "OVERLAY",
            Self::Background => "BKGND",
        }
    }
}

bitflags::bitflags! {
    /// Per-layer flags set by the compositor.
    ///
    /// Bits other than [`SKIP_LAYER`](Self::SKIP_LAYER) are device-specific
    /// and carried through untouched.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct LayerFlags: u32 {
        /// The layer must be composited in software regardless of what the
        /// device chooses.
        const SKIP_LAYER = 0x0000_0001;

        const _ = !0;
    }
}

bitflags::bitflags! {
    /// Hints the device writes back during `prepare`.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct LayerHints: u32 {
        /// The buffer should be triple buffered.
        const TRIPLE_BUFFER = 0x0000_0001;
        /// The framebuffer area under this layer should be cleared.
        const CLEAR_FB = 0x0000_0002;

        const _ = !0;
    }
}

bitflags::bitflags! {
    /// Orientation applied to a layer's buffer.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct LayerTransform: u32 {
        /// Flip horizontally.
        const FLIP_H = 0x01;
        /// Flip vertically.
        const FLIP_V = 0x02;
        /// Rotate 90 degrees clockwise.
        const ROT_90 = 0x04;
        /// Rotate 180 degrees.
        const ROT_180 = Self::FLIP_H.bits() | Self::FLIP_V.bits();
        /// Rotate 270 degrees clockwise.
        const ROT_270 = Self::ROT_180.bits() | Self::ROT_90.bits();
    }
}

/// Blend mode for a layer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Blending {
    /// Opaque; no blending.
    #[default]
    None,
    /// Source-over with premultiplied alpha.
    Premultiplied,
    /// Source-over with coverage alpha.
    Coverage,
}

impl Blending {
    /// The raw value the device interface uses for this mode.
    #[must_use]
    pub const fn raw(self) -> u32 {
        match self {
            Self::None => 0x0100,
            Self::Premultiplied => 0x0105,
            Self::Coverage => 0x0405,
        }
    }
}

/// One entry in the work list.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Layer {
    /// Written by the device during `prepare`; `None` until then.
    pub composition_type: Option<CompositionType>,
    /// Written by the device during `prepare`.
    pub hints: LayerHints,
    /// Compositor-set flags.
    pub flags: LayerFlags,
    /// The buffer to composite, if any.
    pub handle: Option<BufferHandle>,
    /// Buffer orientation.
    pub transform: LayerTransform,
    /// Blend mode.
    pub blending: Blending,
    /// Area of the buffer to sample, in buffer coordinates.
    pub source_crop: Rect,
    /// Where the layer lands on the display.
    pub display_frame: Rect,
    /// Unobscured on-screen rectangles.
    pub visible_region: VisibleRegion,
}

impl Layer {
    /// Returns `true` if the layer must be composited in software.
    #[inline]
    #[must_use]
    pub fn is_skipped(&self) -> bool {
        self.flags.contains(LayerFlags::SKIP_LAYER)
    }
}
