// Copyright 2026 the Hwcomposer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error type shared by the work list and the device session.

/// Raw device status meaning success. Any other value is a device error code.
pub const STATUS_OK: i32 = 0;

/// Errors reported by hardware composition operations.
///
/// None of these are retried internally. After an error the tallies and the
/// work list hold whatever state the failed call left behind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, thiserror::Error)]
pub enum HwcError {
    /// No device is present; the caller should composite everything itself.
    #[error("hardware composer is not initialized")]
    NotInitialized,
    /// The device returned a non-zero status, passed through verbatim.
    #[error("hardware composer device returned status {0}")]
    Device(i32),
    /// Storage for the work list or a visible region could not be reserved.
    #[error("failed to allocate hardware composer storage")]
    Allocation,
}

impl HwcError {
    /// Returns the raw device status if this is a device error.
    #[must_use]
    pub const fn device_status(self) -> Option<i32> {
        match self {
            Self::Device(status) => Some(status),
            _ => None,
        }
    }
}

/// Maps a raw device status onto a result.
pub(crate) fn check_status(status: i32) -> Result<(), HwcError> {
    if status == STATUS_OK {
        Ok(())
    } else {
        Err(HwcError::Device(status))
    }
}
