// Copyright 2026 the Hwcomposer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The per-frame list of layers submitted to the device.
//!
//! A [`WorkList`] owns a fixed-capacity array of [`Layer`] slots. Resizing to
//! a length that still fits reuses the array; growing past the capacity frees
//! it and allocates a new array of exactly the requested length. Reused slots
//! keep whatever the previous frame left in them, so callers must fill every
//! field they care about each frame.
//!
//! # Geometry-changed flag
//!
//! Every [`resize`](WorkList::resize) sets [`ListFlags::GEOMETRY_CHANGED`],
//! telling the device to re-evaluate the whole layout instead of assuming an
//! incremental update. The session clears it right after each commit.

use alloc::boxed::Box;
use alloc::vec::Vec;

use crate::error::HwcError;
use crate::geometry::{GeometryConfig, Overscan, Rect, Size};
use crate::layer::Layer;
use crate::region::{self, RegionState};

bitflags::bitflags! {
    /// Flags carried by the whole work list.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct ListFlags: u32 {
        /// Layout changed since the last commit.
        const GEOMETRY_CHANGED = 0x0000_0001;

        const _ = !0;
    }
}

/// The work list as the device sees it during `prepare`.
///
/// The device reads the flags and writes each layer's composition type and
/// hints.
#[derive(Debug)]
pub struct PrepareList<'a> {
    /// Flags of the list being prepared.
    pub flags: ListFlags,
    /// The layers in submission order.
    pub layers: &'a mut [Layer],
}

/// Layer descriptors for one frame, plus capacity and list flags.
#[derive(Debug, Default)]
pub struct WorkList {
    storage: Option<Box<[Layer]>>,
    len: usize,
    flags: ListFlags,
    regions: RegionState,
}

impl WorkList {
    /// Creates a list with no storage.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            storage: None,
            len: 0,
            flags: ListFlags::empty(),
            regions: RegionState::Empty,
        }
    }

    /// Sizes the list for `len` layers.
    ///
    /// Releases every geometry-pass region first. Storage is reallocated only
    /// when none exists or its capacity is below `len`. The geometry-changed
    /// flag is set unconditionally. Returns whether storage was reallocated.
    ///
    /// # Errors
    ///
    /// Returns [`HwcError::Allocation`] if new storage could not be reserved.
    /// The list is left without storage in that case.
    pub fn resize(&mut self, len: usize) -> Result<bool, HwcError> {
        self.release_regions();
        let fits = self.storage.as_ref().is_some_and(|s| s.len() >= len);
        if !fits {
            self.storage = None;
            self.len = 0;
            self.storage = Some(allocate_layers(len)?);
        }
        self.flags |= ListFlags::GEOMETRY_CHANGED;
        self.len = len;
        Ok(!fits)
    }

    /// Frees the storage. The list reports zero layers until resized again.
    pub fn free(&mut self) {
        self.release_regions();
        self.storage = None;
        self.len = 0;
    }

    /// Returns `true` if the list has backing storage.
    #[inline]
    #[must_use]
    pub fn is_allocated(&self) -> bool {
        self.storage.is_some()
    }

    /// Number of layers in the current frame.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the current frame has no layers.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of layer slots in the backing storage.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.storage.as_ref().map_or(0, |s| s.len())
    }

    /// The layers of the current frame; empty without storage.
    #[must_use]
    pub fn layers(&self) -> &[Layer] {
        match self.storage.as_deref() {
            Some(s) => &s[..self.len],
            None => &[],
        }
    }

    /// Mutable access to the layers of the current frame.
    #[must_use]
    pub fn layers_mut(&mut self) -> &mut [Layer] {
        match self.storage.as_deref_mut() {
            Some(s) => &mut s[..self.len],
            None => &mut [],
        }
    }

    /// List flags.
    #[inline]
    #[must_use]
    pub fn flags(&self) -> ListFlags {
        self.flags
    }

    /// Returns `true` if layout changed since the last commit.
    #[inline]
    #[must_use]
    pub fn geometry_changed(&self) -> bool {
        self.flags.contains(ListFlags::GEOMETRY_CHANGED)
    }

    /// Clears the geometry-changed flag.
    pub fn clear_geometry_changed(&mut self) {
        self.flags.remove(ListFlags::GEOMETRY_CHANGED);
    }

    /// Whole-list region ownership state.
    #[inline]
    #[must_use]
    pub fn region_state(&self) -> RegionState {
        self.regions
    }

    /// Number of layer slots currently owning visible-region storage.
    #[must_use]
    pub fn region_allocations(&self) -> usize {
        self.storage.as_deref().map_or(0, |s| {
            s.iter()
                .filter(|l| l.visible_region.is_allocated())
                .count()
        })
    }

    /// Frees every layer's visible region if any geometry pass allocated
    /// one, and resets the state to [`RegionState::Empty`].
    pub fn release_regions(&mut self) {
        if self.regions == RegionState::Empty {
            return;
        }
        if let Some(storage) = self.storage.as_deref_mut() {
            for layer in storage {
                layer.visible_region.clear();
            }
        }
        self.regions = RegionState::Empty;
    }

    /// Fits the layer at `index` into the display and applies overscan.
    ///
    /// # Errors
    ///
    /// Returns [`HwcError::Allocation`] if the region copy failed.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.len()`.
    pub fn adjust_geometry(
        &mut self,
        index: usize,
        config: &GeometryConfig,
    ) -> Result<(), HwcError> {
        self.transform_layer(index, |r| config.adjust_rect(r))
    }

    /// Insets the layer at `index` by `overscan` within `display`, without
    /// aspect fitting.
    ///
    /// # Errors
    ///
    /// Returns [`HwcError::Allocation`] if the region copy failed.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.len()`.
    pub fn adjust_overscan(
        &mut self,
        index: usize,
        display: Size,
        overscan: Overscan,
    ) -> Result<(), HwcError> {
        self.transform_layer(index, |r| overscan.apply(r, display))
    }

    /// Borrows the list for the device's `prepare` call.
    pub(crate) fn prepare_list(&mut self) -> Option<PrepareList<'_>> {
        let flags = self.flags;
        let len = self.len;
        self.storage.as_deref_mut().map(|s| PrepareList {
            flags,
            layers: &mut s[..len],
        })
    }

    fn transform_layer(
        &mut self,
        index: usize,
        transform: impl Fn(Rect) -> Rect,
    ) -> Result<(), HwcError> {
        let len = self.len;
        assert!(index < len, "layer index {index} out of range (len {len})");
        let layer = &mut self.layers_mut()[index];
        if region::apply_geometry(layer, transform)? {
            self.regions = RegionState::Allocated;
        }
        Ok(())
    }
}

fn allocate_layers(len: usize) -> Result<Box<[Layer]>, HwcError> {
    let mut layers = Vec::new();
    layers
        .try_reserve_exact(len)
        .map_err(|_| HwcError::Allocation)?;
    layers.resize_with(len, Layer::default);
    Ok(layers.into_boxed_slice())
}
