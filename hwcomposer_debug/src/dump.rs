// Copyright 2026 the Hwcomposer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Text dump of the session state.
//!
//! The layer table is only written when the device is open and the work list
//! has storage. The device's own dump text follows whenever the device
//! reports interface version 1 or later.

use std::fmt::{self, Write};

use hwcomposer_core::device::Device;
use hwcomposer_core::geometry::Rect;
use hwcomposer_core::layer::{CompositionType, Layer};
use hwcomposer_core::session::DeviceSession;

/// Compositor-side details for one row of the table.
///
/// Labels are matched to layers by position. Rows without a label print an
/// empty name and a format of `-1`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LayerLabel<'a> {
    /// Name of the compositor layer.
    pub name: &'a str,
    /// Pixel format of the active buffer, if it has one.
    pub format: Option<i32>,
}

const TABLE_HEADER: &str = "   type   |  handle  |   hints  |   flags  | tr | blend |  format  |       source crop         |           frame           name \n\
----------+----------+----------+----------+----+-------+----------+---------------------------+--------------------------------\n";

/// Writes the session's work list as a text table, then the device dump.
///
/// # Errors
///
/// Propagates formatter errors from `out`.
pub fn write_state<D: Device>(
    session: &DeviceSession<D>,
    labels: &[LayerLabel<'_>],
    out: &mut dyn Write,
) -> fmt::Result {
    let list = session.work_list();
    if session.device().is_some() && list.is_allocated() {
        out.write_str("Hardware Composer state:\n")?;
        writeln!(
            out,
            "  numHwLayers={}, flags={:08x}",
            list.len(),
            list.flags().bits()
        )?;
        out.write_str(TABLE_HEADER)?;
        for (i, layer) in list.layers().iter().enumerate() {
            let label = labels.get(i).copied().unwrap_or_default();
            write_row(out, layer, label)?;
        }
    }
    session.device_dump(out)
}

fn write_row(out: &mut dyn Write, layer: &Layer, label: LayerLabel<'_>) -> fmt::Result {
    // Every device-handled type prints as an overlay row.
    let kind = match layer.composition_type {
        None | Some(CompositionType::Framebuffer) => "FB",
        Some(CompositionType::Overlay | CompositionType::Background) => "OVERLAY",
    };
    writeln!(
        out,
        " {:>8} | {:08x} | {:08x} | {:08x} | {:02x} | {:05x} | {:08x} | {} | {} {}",
        kind,
        layer.handle.map_or(0, |h| h.0),
        layer.hints.bits(),
        layer.flags.bits(),
        layer.transform.bits(),
        layer.blending.raw(),
        label.format.unwrap_or(-1),
        Edges(layer.source_crop),
        Edges(layer.display_frame),
        label.name,
    )
}

struct Edges(Rect);

impl fmt::Display for Edges {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r = self.0;
        write!(f, "[{:5},{:5},{:5},{:5}]", r.left, r.top, r.right, r.bottom)
    }
}

#[cfg(test)]
mod tests {
    use hwcomposer_core::display::{BufferHandle, DisplayHandle, SurfaceHandle};
    use hwcomposer_core::layer::{Blending, LayerFlags, LayerTransform};
    use hwcomposer_core::work_list::{PrepareList, WorkList};

    use super::*;

    struct OverlayDevice {
        version: u32,
    }

    impl Device for OverlayDevice {
        fn prepare(&mut self, list: Option<PrepareList<'_>>) -> i32 {
            for layer in list.into_iter().flat_map(|l| l.layers) {
                layer.composition_type = Some(CompositionType::Overlay);
            }
            0
        }

        fn set(
            &mut self,
            _: Option<DisplayHandle>,
            _: Option<SurfaceHandle>,
            _: Option<&WorkList>,
        ) -> i32 {
            0
        }

        fn version(&self) -> u32 {
            self.version
        }

        fn dump(&self, out: &mut dyn Write) -> fmt::Result {
            out.write_str("overlay device v1\n")
        }
    }

    fn prepared_session(version: u32) -> DeviceSession<OverlayDevice> {
        let mut session = DeviceSession::with_device(OverlayDevice { version });
        session.create_work_list(2).unwrap();
        let layer = &mut session.layers_mut()[0];
        layer.handle = Some(BufferHandle(0xbeef));
        layer.transform = LayerTransform::ROT_90;
        layer.blending = Blending::Premultiplied;
        layer.source_crop = Rect::new(0, 0, 64, 32);
        layer.display_frame = Rect::new(10, 20, 74, 52);
        session.layers_mut()[1].flags = LayerFlags::SKIP_LAYER;
        session.prepare().unwrap();
        session
    }

    #[test]
    fn table_rows_follow_layers() {
        let session = prepared_session(1);
        let labels = [LayerLabel {
            name: "StatusBar",
            format: Some(1),
        }];
        let mut out = String::new();
        write_state(&session, &labels, &mut out).unwrap();

        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "Hardware Composer state:");
        assert_eq!(lines[1], "  numHwLayers=2, flags=00000001");
        assert_eq!(
            lines[4],
            "  OVERLAY | 0000beef | 00000000 | 00000000 | 04 | 00105 | 00000001 \
             | [    0,    0,   64,   32] | [   10,   20,   74,   52] StatusBar"
        );
        assert_eq!(
            lines[5],
            "       FB | 00000000 | 00000000 | 00000001 | 00 | 00100 | ffffffff \
             | [    0,    0,    0,    0] | [    0,    0,    0,    0] "
        );
        assert_eq!(lines[6], "overlay device v1");
    }

    #[test]
    fn background_layers_print_as_overlay() {
        let mut session = prepared_session(0);
        session.layers_mut()[0].composition_type = Some(CompositionType::Background);
        let mut out = String::new();
        write_state(&session, &[], &mut out).unwrap();
        let row = out.lines().nth(4).unwrap();
        assert!(row.starts_with("  OVERLAY | 0000beef"), "row was {row:?}");
        assert!(!out.contains("BKGND"));
    }

    #[test]
    fn old_device_has_no_dump_text() {
        let session = prepared_session(0);
        let mut out = String::new();
        write_state(&session, &[], &mut out).unwrap();
        assert_eq!(out.lines().count(), 6);
    }

    #[test]
    fn nothing_without_storage() {
        let session = DeviceSession::with_device(OverlayDevice { version: 0 });
        let mut out = String::new();
        write_state(&session, &[], &mut out).unwrap();
        assert!(out.is_empty());
    }
}
