// Copyright 2026 the Hwcomposer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property tests for rectangle scaling and overscan.

use hwcomposer_core::geometry::{GeometryConfig, Overscan, Rect, Size, fit_aspect, scale_rect};
use proptest::prelude::*;

fn size() -> impl Strategy<Value = Size> {
    (1..=4096_i32, 1..=4096_i32).prop_map(|(w, h)| Size::new(w, h))
}

fn rect() -> impl Strategy<Value = Rect> {
    (0..=4096_i32, 0..=4096_i32, 0..=4096_i32, 0..=4096_i32)
        .prop_map(|(l, t, w, h)| Rect::new(l, t, l + w, t + h))
}

proptest! {
    #[test]
    fn equal_sizes_are_identity(r in rect(), s in size()) {
        prop_assert_eq!(scale_rect(r, s, s, s), r);
        prop_assert_eq!(GeometryConfig::identity(s).adjust_rect(r), r);
    }

    #[test]
    fn zero_overscan_is_identity(r in rect(), s in size()) {
        prop_assert_eq!(Overscan::NONE.apply(r, s), r);
    }

    #[test]
    fn fitted_size_stays_inside_display(content in size(), display in size()) {
        let fitted = fit_aspect(content, display);
        prop_assert!(fitted.width <= display.width);
        prop_assert!(fitted.height <= display.height);
        prop_assert!(fitted.width == display.width || fitted.height == display.height);
    }

    #[test]
    fn overscan_keeps_full_frame_inside_display(
        display in size(),
        x in 0..=100_u8,
        y in 0..=100_u8,
    ) {
        let out = Overscan::new(x, y).apply(Rect::from_size(display), display);
        prop_assert!(out.left >= 0 && out.top >= 0);
        prop_assert!(out.right <= display.width && out.bottom <= display.height);
    }
}
