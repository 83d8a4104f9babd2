// Copyright 2026 the Hwcomposer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! State dumps, JSON snapshots, and pretty-printed trace output for
//! hwcomposer diagnostics.
//!
//! - [`dump::write_state`]: the fixed-width text table a compositor prints
//!   in its service dump, followed by the device's own dump text.
//! - [`json::snapshot`]: the work list as a [`serde_json::Value`] for
//!   tooling.
//! - [`pretty::PrettyPrintSink`]: human-readable one-line-per-event
//!   [`TraceSink`](hwcomposer_core::trace::TraceSink) output.

pub mod dump;
pub mod json;
pub mod pretty;
