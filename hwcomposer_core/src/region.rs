// Copyright 2026 the Hwcomposer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Visible-region rectangle storage.
//!
//! Each [`Layer`] owns its visible region as a heap array of [`Rect`]s. A
//! geometry pass never edits that array in place: [`apply_geometry`] builds a
//! complete transformed copy in fresh storage and swaps it in, so the device
//! only ever sees rectangles computed from one set of geometry parameters.
//!
//! The work list tracks region ownership for the whole list at once with a
//! single [`RegionState`]. Before the list is resized every region is
//! released, even if only one layer was adjusted in the previous frame.

use alloc::vec::Vec;

use crate::error::HwcError;
use crate::geometry::Rect;
use crate::layer::Layer;

/// The unobscured, on-screen area of a layer as a list of rectangles.
///
/// An empty region holds no allocation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VisibleRegion {
    rects: Vec<Rect>,
}

impl VisibleRegion {
    /// Creates an empty region.
    #[must_use]
    pub const fn new() -> Self {
        Self { rects: Vec::new() }
    }

    /// Replaces the region with a copy of `rects`.
    ///
    /// # Errors
    ///
    /// Returns [`HwcError::Allocation`] if storage could not be reserved; the
    /// region is left empty in that case.
    pub fn set(&mut self, rects: &[Rect]) -> Result<(), HwcError> {
        self.clear();
        if rects.is_empty() {
            return Ok(());
        }
        let mut fresh = Vec::new();
        fresh
            .try_reserve_exact(rects.len())
            .map_err(|_| HwcError::Allocation)?;
        fresh.extend_from_slice(rects);
        self.rects = fresh;
        Ok(())
    }

    /// Returns the rectangles.
    #[inline]
    #[must_use]
    pub fn rects(&self) -> &[Rect] {
        &self.rects
    }

    /// Number of rectangles.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.rects.len()
    }

    /// Returns `true` if the region has no rectangles.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }

    /// Returns `true` if the region currently owns heap storage.
    #[inline]
    #[must_use]
    pub fn is_allocated(&self) -> bool {
        self.rects.capacity() != 0
    }

    /// Empties the region and frees its storage.
    pub fn clear(&mut self) {
        self.rects = Vec::new();
    }

    /// Swaps in a freshly allocated copy with `transform` applied to every
    /// rectangle. Returns whether storage was allocated.
    fn replace_transformed(
        &mut self,
        transform: &impl Fn(Rect) -> Rect,
    ) -> Result<bool, HwcError> {
        if self.rects.is_empty() {
            return Ok(false);
        }
        let mut fresh = Vec::new();
        fresh
            .try_reserve_exact(self.rects.len())
            .map_err(|_| HwcError::Allocation)?;
        fresh.extend(self.rects.iter().map(|&r| transform(r)));
        self.rects = fresh;
        Ok(true)
    }
}

impl From<Vec<Rect>> for VisibleRegion {
    fn from(rects: Vec<Rect>) -> Self {
        Self { rects }
    }
}

/// Whether any layer in a work list holds a region produced by a geometry
/// pass.
///
/// Tracked once per list rather than per layer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum RegionState {
    /// No geometry-pass regions are outstanding.
    #[default]
    Empty,
    /// At least one layer owns a region from the current geometry pass.
    Allocated,
}

/// Runs `transform` over a layer's display frame and visible region.
///
/// The display frame is rewritten in place. A non-empty visible region is
/// duplicated into fresh storage, transformed, and swapped in; the previous
/// array is freed. Returns whether a region array was allocated.
///
/// # Errors
///
/// Returns [`HwcError::Allocation`] if the duplicate could not be allocated.
/// The display frame has already been transformed at that point and the old
/// region is left in place.
pub fn apply_geometry(
    layer: &mut Layer,
    transform: impl Fn(Rect) -> Rect,
) -> Result<bool, HwcError> {
    layer.display_frame = transform(layer.display_frame);
    layer.visible_region.replace_transformed(&transform)
}
