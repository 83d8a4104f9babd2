// Copyright 2026 the Hwcomposer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! JSON snapshots of the work list.

use serde_json::{Value, json};

use hwcomposer_core::classify::PreparePhase;
use hwcomposer_core::device::Device;
use hwcomposer_core::geometry::Rect;
use hwcomposer_core::layer::Layer;
use hwcomposer_core::region::RegionState;
use hwcomposer_core::session::DeviceSession;
use hwcomposer_core::work_list::WorkList;

/// Captures the list's flags, region state, and every layer.
///
/// A list without storage reports `"allocated": false` and no layers.
#[must_use]
pub fn snapshot(list: &WorkList) -> Value {
    let regions = match list.region_state() {
        RegionState::Empty => "empty",
        RegionState::Allocated => "allocated",
    };
    let layers: Vec<Value> = list.layers().iter().map(layer).collect();
    json!({
        "allocated": list.is_allocated(),
        "capacity": list.capacity(),
        "flags": list.flags().bits(),
        "geometry_changed": list.geometry_changed(),
        "regions": regions,
        "layers": layers,
    })
}

/// Captures the session's phase and tallies alongside its work list.
#[must_use]
pub fn session_snapshot<D: Device>(session: &DeviceSession<D>) -> Value {
    let tally = session.tally();
    let phase = match session.phase() {
        PreparePhase::Unprepared => "unprepared",
        PreparePhase::Prepared => "prepared",
    };
    json!({
        "initialized": session.init_check().is_ok(),
        "phase": phase,
        "overlay": tally.overlay,
        "framebuffer": tally.framebuffer,
        "list": snapshot(session.work_list()),
    })
}

fn layer(l: &Layer) -> Value {
    let region: Vec<Value> = l.visible_region.rects().iter().copied().map(rect).collect();
    json!({
        "type": l.composition_type.map(|t| t.label()),
        "handle": l.handle.map(|h| h.0),
        "hints": l.hints.bits(),
        "flags": l.flags.bits(),
        "transform": l.transform.bits(),
        "blending": l.blending.raw(),
        "source_crop": rect(l.source_crop),
        "display_frame": rect(l.display_frame),
        "visible_region": region,
    })
}

fn rect(r: Rect) -> Value {
    json!([r.left, r.top, r.right, r.bottom])
}
