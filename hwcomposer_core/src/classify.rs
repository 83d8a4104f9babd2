// Copyright 2026 the Hwcomposer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Classification of layers after the device's `prepare` pass.

use crate::layer::{CompositionType, Layer};

/// Where the session is in the prepare/commit cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PreparePhase {
    /// No successful `prepare` since the list was last resized.
    #[default]
    Unprepared,
    /// The device accepted the list and the tallies are current.
    Prepared,
}

/// Layer counts per composition type from the latest successful `prepare`.
///
/// Layers whose type is [`Background`](CompositionType::Background) or still
/// unset are in neither bucket.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct CompositionTally {
    /// Layers the device composites itself.
    pub overlay: usize,
    /// Layers the compositor must blend into the framebuffer.
    pub framebuffer: usize,
}

impl CompositionTally {
    /// Forces skipped layers to [`Framebuffer`](CompositionType::Framebuffer)
    /// and counts every layer by its composition type.
    #[must_use]
    pub fn classify(layers: &mut [Layer]) -> Self {
        let mut tally = Self::default();
        for layer in layers {
            if layer.is_skipped() {
                layer.composition_type = Some(CompositionType::Framebuffer);
            }
            match layer.composition_type {
                Some(CompositionType::Overlay) => tally.overlay += 1,
                Some(CompositionType::Framebuffer) => tally.framebuffer += 1,
                Some(CompositionType::Background) | None => {}
            }
        }
        tally
    }

    /// Returns the tally for `kind`; kinds without a bucket read zero.
    #[must_use]
    pub const fn count(&self, kind: CompositionType) -> usize {
        match kind {
            CompositionType::Overlay => self.overlay,
            CompositionType::Framebuffer => self.framebuffer,
            CompositionType::Background => 0,
        }
    }

    /// Sum of both buckets.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.overlay + self.framebuffer
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::*;
    use crate::layer::LayerFlags;

    fn layer(kind: Option<CompositionType>, flags: LayerFlags) -> Layer {
        Layer {
            composition_type: kind,
            flags,
            ..Layer::default()
        }
    }

    #[test]
    fn skip_flag_overrides_overlay() {
        let mut layers = [layer(Some(CompositionType::Overlay), LayerFlags::SKIP_LAYER)];
        let tally = CompositionTally::classify(&mut layers);
        assert_eq!(layers[0].composition_type, Some(CompositionType::Framebuffer));
        assert_eq!(tally.overlay, 0);
        assert_eq!(tally.framebuffer, 1);
    }

    #[test]
    fn uncounted_types_fall_out_of_the_sum() {
        let mut layers = [
            layer(Some(CompositionType::Overlay), LayerFlags::empty()),
            layer(Some(CompositionType::Overlay), LayerFlags::empty()),
            layer(Some(CompositionType::Framebuffer), LayerFlags::empty()),
            layer(Some(CompositionType::Background), LayerFlags::empty()),
            layer(None, LayerFlags::empty()),
        ];
        let tally = CompositionTally::classify(&mut layers);
        assert_eq!(tally, CompositionTally { overlay: 2, framebuffer: 1 });
        assert_eq!(tally.total(), layers.len() - 2);
    }

    #[test]
    fn skip_flag_classifies_unset_layers() {
        let mut layers = [layer(None, LayerFlags::SKIP_LAYER)];
        let tally = CompositionTally::classify(&mut layers);
        assert_eq!(tally.framebuffer, 1);
    }

    #[test]
    fn tally_matches_per_layer_types() {
        let mut layers: Vec<Layer> = (0..10)
            .map(|i| {
                let kind = if i % 3 == 0 {
                    CompositionType::Framebuffer
                } else {
                    CompositionType::Overlay
                };
                let flags = if i == 4 {
                    LayerFlags::SKIP_LAYER
                } else {
                    LayerFlags::empty()
                };
                layer(Some(kind), flags)
            })
            .collect();
        let tally = CompositionTally::classify(&mut layers);
        let overlays = layers
            .iter()
            .filter(|l| l.composition_type == Some(CompositionType::Overlay))
            .count();
        assert_eq!(tally.overlay, overlays);
        assert_eq!(tally.total(), layers.len());
        assert_eq!(tally.framebuffer, 5);
    }

    #[test]
    fn count_reads_buckets() {
        let tally = CompositionTally {
            overlay: 3,
            framebuffer: 4,
        };
        assert_eq!(tally.count(CompositionType::Overlay), 3);
        assert_eq!(tally.count(CompositionType::Framebuffer), 4);
        assert_eq!(tally.count(CompositionType::Background), 0);
    }
}
