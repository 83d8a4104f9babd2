// Copyright 2026 the Hwcomposer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Client-side driver for a hardware compositing device.
//!
//! `hwcomposer_core` lets a compositor hand a list of layers to a display
//! device, find out which of them the device will composite itself, and submit
//! the list once the remaining layers have been blended into the framebuffer.
//! It is `no_std` compatible (with `alloc`) and never touches hardware
//! directly: the device is reached through the [`Device`](device::Device)
//! trait.
//!
//! # Architecture
//!
//! ```text
//!   DeviceLoader::open("hwcomposer")
//!       │
//!       ▼
//!   DeviceSession ──► create_work_list(n) ──► WorkList
//!       │                                        │
//!       │          adjust_geometry() ◄───────────┘
//!       ▼
//!   prepare() ──► Device::prepare() ──► CompositionTally
//!       │
//!       ▼
//!   commit() ──► Device::set()
//!
//!   Device (any thread) ──► InvalidateSender ──► take_invalidate()
//! ```
//!
//! **[`session`]**: [`DeviceSession`](session::DeviceSession), the façade the
//! compositor drives once per frame.
//!
//! **[`work_list`]**: Growable layer storage that keeps its capacity across
//! frames and tracks the geometry-changed flag.
//!
//! **[`layer`]**: The per-layer record and its flag, hint, transform, and
//! blending vocabularies.
//!
//! **[`region`]**: Visible-region buffers and their allocation state.
//!
//! **[`classify`]**: Post-prepare classification, including the forced
//! framebuffer path for skipped layers.
//!
//! **[`geometry`]**: Integer rectangles, aspect fitting, and overscan.
//!
//! **[`device`]**: The [`Device`](device::Device) and
//! [`DeviceLoader`](device::DeviceLoader) traits integrations implement.
//!
//! **[`invalidate`]**: Cross-thread repaint requests.
//!
//! **[`trace`]**: [`TraceSink`](trace::TraceSink) trait and event types for
//! session instrumentation, with zero-overhead [`Tracer`](trace::Tracer)
//! wrapper.
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one branch
//!   per call site).

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod classify;
pub mod device;
pub mod display;
pub mod error;
pub mod geometry;
pub mod invalidate;
pub mod layer;
pub mod region;
pub mod session;
pub mod trace;
pub mod work_list;
