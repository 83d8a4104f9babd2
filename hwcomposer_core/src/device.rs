// Copyright 2026 the Hwcomposer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Device contract for hardware composer integrations.
//!
//! The hardware itself lives outside this crate. An integration provides two
//! pieces:
//!
//! - **Loader**: Implements [`DeviceLoader`] to find the composer module by
//!   id and open a device on it. A missing module or a failed open leaves the
//!   [`DeviceSession`](crate::session::DeviceSession) permanently
//!   uninitialized.
//!
//! - **Device**: Implements [`Device`]. Calls are blocking and return a raw
//!   status: [`STATUS_OK`](crate::error::STATUS_OK) on success, anything else
//!   is an error code the session hands back to the caller verbatim. Closing
//!   the device is its `Drop`.
//!
//! Both `commit` and `release` go through [`Device::set`]; `release` passes
//! `None` for every argument.

use core::fmt;

use crate::display::{DisplayHandle, SurfaceHandle};
use crate::invalidate::InvalidateSender;
use crate::work_list::{PrepareList, WorkList};

/// Module id the session asks the loader for.
pub const HWC_MODULE_ID: &str = "hwcomposer";

/// A hardware compositing device.
///
/// Test doubles and real HAL bindings both implement this trait, so the
/// session can be driven without hardware.
pub trait Device {
    /// Inspects the list and writes each layer's composition type and hints.
    ///
    /// `None` tells the device that hardware composition is being abandoned.
    fn prepare(&mut self, list: Option<PrepareList<'_>>) -> i32;

    /// Submits the list for display on `display`/`surface`.
    ///
    /// All-`None` arguments tell the device to stop driving the display.
    fn set(
        &mut self,
        display: Option<DisplayHandle>,
        surface: Option<SurfaceHandle>,
        list: Option<&WorkList>,
    ) -> i32;

    /// Hands the device a sender for repaint requests.
    ///
    /// The default drops it; devices without callbacks never request
    /// repaints.
    fn register_invalidate(&mut self, sender: InvalidateSender) {
        _ = sender;
    }

    /// Interface version implemented by the device.
    fn version(&self) -> u32 {
        0
    }

    /// Writes device-specific diagnostic text. Only consulted when
    /// [`version`](Self::version) is at least 1.
    fn dump(&self, out: &mut dyn fmt::Write) -> fmt::Result {
        _ = out;
        Ok(())
    }
}

/// Why a device could not be opened.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, thiserror::Error)]
pub enum OpenError {
    /// No module with the requested id is installed.
    #[error("module not found")]
    NotFound,
    /// The module was found but opening the device failed.
    #[error("device failed to initialize (status {0})")]
    Failed(i32),
}

/// Locates a composer module and opens a device on it.
pub trait DeviceLoader {
    /// The device type produced by this loader.
    type Device: Device;

    /// Opens the device provided by `module_id`.
    ///
    /// # Errors
    ///
    /// [`OpenError::NotFound`] if no such module exists, or
    /// [`OpenError::Failed`] if the device could not be opened.
    fn open(&self, module_id: &str) -> Result<Self::Device, OpenError>;
}
