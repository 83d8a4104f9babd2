// Copyright 2026 the Hwcomposer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Integer rectangle geometry for aspect fitting and overscan.
//!
//! Every rescaling in this crate goes through [`scale_rect`]: scale each edge
//! from a *source* size to a *target* size, then center the target inside a
//! *display*. The two higher-level corrections are compositions of it:
//!
//! - **Aspect fit**: [`fit_aspect`] picks the largest box with the content's
//!   aspect ratio that fits the display (letterbox or pillarbox), and the
//!   rectangle is scaled from content space into that box.
//! - **Overscan**: [`Overscan::apply`] shrinks a frame by percentage margins
//!   and scales the rectangle into the shrunken, centered frame.
//!
//! Fit always runs before overscan; overscan insets the already-fitted box.
//!
//! All arithmetic is integer with truncating division, matching what display
//! hardware expects. Extreme scale factors can collapse a rectangle to zero
//! width or height; such rectangles are passed through as-is.

/// An integer rectangle in display pixels.
///
/// `left`/`top` are inclusive and `right`/`bottom` exclusive.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rect {
    /// Left edge.
    pub left: i32,
    /// Top edge.
    pub top: i32,
    /// Right edge.
    pub right: i32,
    /// Bottom edge.
    pub bottom: i32,
}

impl Rect {
    /// The empty rectangle at the origin.
    pub const ZERO: Self = Self::new(0, 0, 0, 0);

    /// Creates a rectangle from its four edges.
    #[inline]
    #[must_use]
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Creates a rectangle at the origin covering `size`.
    #[inline]
    #[must_use]
    pub const fn from_size(size: Size) -> Self {
        Self::new(0, 0, size.width, size.height)
    }

    /// Horizontal extent (`right - left`).
    #[inline]
    #[must_use]
    pub const fn width(self) -> i32 {
        self.right.saturating_sub(self.left)
    }

    /// Vertical extent (`bottom - top`).
    #[inline]
    #[must_use]
    pub const fn height(self) -> i32 {
        self.bottom.saturating_sub(self.top)
    }

    /// Returns `true` if the rectangle covers no pixels.
    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.right <= self.left || self.bottom <= self.top
    }

    /// Converts a floating-point rectangle, rounding outward to whole pixels.
    #[must_use]
    pub fn from_kurbo(rect: kurbo::Rect) -> Self {
        let r = rect.abs().expand();
        Self::new(
            saturate_f64(r.x0),
            saturate_f64(r.y0),
            saturate_f64(r.x1),
            saturate_f64(r.y1),
        )
    }
}

impl From<Rect> for kurbo::Rect {
    fn from(r: Rect) -> Self {
        Self::new(
            f64::from(r.left),
            f64::from(r.top),
            f64::from(r.right),
            f64::from(r.bottom),
        )
    }
}

/// A width and height in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Size {
    /// Width.
    pub width: i32,
    /// Height.
    pub height: i32,
}

impl Size {
    /// Creates a size.
    #[inline]
    #[must_use]
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Returns `true` if either dimension is zero or negative.
    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.width <= 0 || self.height <= 0
    }
}

/// Scales `rect` from `source` space into a `target`-sized box centered in
/// `display`.
///
/// Each edge becomes `edge * target / source` (truncating), then the result is
/// shifted by half the difference between `display` and `target` on each
/// axis. When `source` has a zero dimension the edges on that axis are left
/// unscaled and only the centering shift applies.
#[must_use]
pub fn scale_rect(rect: Rect, display: Size, target: Size, source: Size) -> Rect {
    let dx = center_offset(display.width, target.width);
    let dy = center_offset(display.height, target.height);
    Rect {
        left: scale_edge(rect.left, target.width, source.width).saturating_add(dx),
        top: scale_edge(rect.top, target.height, source.height).saturating_add(dy),
        right: scale_edge(rect.right, target.width, source.width).saturating_add(dx),
        bottom: scale_edge(rect.bottom, target.height, source.height).saturating_add(dy),
    }
}

/// Returns the largest size with `content`'s aspect ratio that fits inside
/// `display`.
///
/// If the display is at least as wide as the content scaled to the display
/// height, the result is height-constrained (pillarbox); otherwise it is
/// width-constrained (letterbox). An empty `content` yields `display`.
#[must_use]
pub fn fit_aspect(content: Size, display: Size) -> Size {
    if content.width == 0 || content.height == 0 {
        return display;
    }
    let fitted_width = mul_div(display.height, content.width, content.height);
    if display.width >= fitted_width {
        Size::new(fitted_width, display.height)
    } else {
        Size::new(display.width, mul_div(display.width, content.height, content.width))
    }
}

/// Percentage margins trimmed from a frame to compensate for displays that
/// crop their edges.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Overscan {
    x: u8,
    y: u8,
}

impl Overscan {
    /// No inset.
    pub const NONE: Self = Self { x: 0, y: 0 };

    /// Creates an overscan inset of `x` percent horizontally and `y` percent
    /// vertically. Values above 100 are clamped to 100.
    #[must_use]
    pub const fn new(x: u8, y: u8) -> Self {
        Self {
            x: if x > 100 { 100 } else { x },
            y: if y > 100 { 100 } else { y },
        }
    }

    /// Horizontal inset in percent.
    #[inline]
    #[must_use]
    pub const fn x(self) -> u8 {
        self.x
    }

    /// Vertical inset in percent.
    #[inline]
    #[must_use]
    pub const fn y(self) -> u8 {
        self.y
    }

    /// Returns `true` if both margins are zero.
    #[inline]
    #[must_use]
    pub const fn is_none(self) -> bool {
        self.x == 0 && self.y == 0
    }

    /// Returns `frame` shrunk by the margins.
    #[must_use]
    pub fn inset(self, frame: Size) -> Size {
        Size::new(
            mul_div(frame.width, 100 - i32::from(self.x), 100),
            mul_div(frame.height, 100 - i32::from(self.y), 100),
        )
    }

    /// Scales `rect` from `frame` into the inset frame, centered in `frame`.
    ///
    /// With zero margins the rectangle is returned untouched.
    #[must_use]
    pub fn apply(self, rect: Rect, frame: Size) -> Rect {
        if self.is_none() {
            return rect;
        }
        scale_rect(rect, frame, self.inset(frame), frame)
    }
}

/// Describes how logical content maps onto a physical display.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GeometryConfig {
    /// Logical size the compositor lays layers out in.
    pub content: Size,
    /// Physical size of the display.
    pub display: Size,
    /// Overscan margins applied after aspect fitting.
    pub overscan: Overscan,
}

impl GeometryConfig {
    /// Maps `content` onto `display` with no overscan.
    #[must_use]
    pub const fn new(content: Size, display: Size) -> Self {
        Self {
            content,
            display,
            overscan: Overscan::NONE,
        }
    }

    /// A configuration that leaves rectangles unchanged.
    #[must_use]
    pub const fn identity(size: Size) -> Self {
        Self::new(size, size)
    }

    /// Returns a copy with the given overscan margins.
    #[must_use]
    pub const fn with_overscan(mut self, overscan: Overscan) -> Self {
        self.overscan = overscan;
        self
    }

    /// The aspect-fitted box the content is scaled into.
    #[must_use]
    pub fn fitted(&self) -> Size {
        fit_aspect(self.content, self.display)
    }

    /// Fits `rect` into the display, then applies overscan to the fitted box.
    #[must_use]
    pub fn adjust_rect(&self, rect: Rect) -> Rect {
        let fitted = self.fitted();
        let rect = scale_rect(rect, self.display, fitted, self.content);
        self.overscan.apply(rect, fitted)
    }
}

fn scale_edge(edge: i32, num: i32, den: i32) -> i32 {
    if den == 0 {
        return edge;
    }
    mul_div(edge, num, den)
}

fn mul_div(v: i32, num: i32, den: i32) -> i32 {
    saturate(i64::from(v) * i64::from(num) / i64::from(den))
}

fn center_offset(outer: i32, inner: i32) -> i32 {
    saturate((i64::from(outer) - i64::from(inner)) / 2)
}

fn saturate(v: i64) -> i32 {
    i32::try_from(v).unwrap_or(if v < 0 { i32::MIN } else { i32::MAX })
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "value is clamped to the i32 range first"
)]
fn saturate_f64(v: f64) -> i32 {
    v.clamp(f64::from(i32::MIN), f64::from(i32::MAX)) as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_sizes_are_identity() {
        let r = Rect::new(13, -7, 401, 299);
        let s = Size::new(640, 480);
        assert_eq!(scale_rect(r, s, s, s), r);
    }

    #[test]
    fn scale_truncates_and_centers() {
        let r = Rect::new(1, 1, 3, 3);
        // 1 * 2 / 3 == 0, 3 * 2 / 3 == 2, then shifted by (10 - 2) / 2.
        let out = scale_rect(r, Size::new(10, 10), Size::new(2, 2), Size::new(3, 3));
        assert_eq!(out, Rect::new(4, 4, 6, 6));
    }

    #[test]
    fn zero_source_skips_scaling() {
        let r = Rect::new(5, 5, 10, 10);
        let out = scale_rect(r, Size::new(20, 20), Size::new(10, 10), Size::new(0, 0));
        assert_eq!(out, Rect::new(10, 10, 15, 15));
    }

    #[test]
    fn fit_height_constrained() {
        // 1200 * 16 / 9 == 2133 > 1920, so width constrains the fit.
        let fit = fit_aspect(Size::new(16, 9), Size::new(1920, 1200));
        assert_eq!(fit, Size::new(1920, 1080));
    }

    #[test]
    fn fit_pillarbox() {
        let fit = fit_aspect(Size::new(800, 600), Size::new(1920, 1080));
        assert_eq!(fit, Size::new(1440, 1080));
    }

    #[test]
    fn fit_equal_aspect_takes_full_display() {
        let fit = fit_aspect(Size::new(1280, 720), Size::new(1920, 1080));
        assert_eq!(fit, Size::new(1920, 1080));
    }

    #[test]
    fn fit_empty_content_is_display() {
        let fit = fit_aspect(Size::new(0, 720), Size::new(1920, 1080));
        assert_eq!(fit, Size::new(1920, 1080));
    }

    #[test]
    fn pillarbox_frame_is_centered() {
        let cfg = GeometryConfig::new(Size::new(800, 600), Size::new(1920, 1080));
        let out = cfg.adjust_rect(Rect::new(0, 0, 800, 600));
        assert_eq!(out, Rect::new(240, 0, 1680, 1080));
    }

    #[test]
    fn overscan_insets_full_frame() {
        let frame = Size::new(1000, 500);
        let out = Overscan::new(10, 10).apply(Rect::from_size(frame), frame);
        assert_eq!(out, Rect::new(50, 25, 950, 475));
    }

    #[test]
    fn zero_overscan_is_untouched() {
        let r = Rect::new(-3, 7, 1023, 999);
        assert_eq!(Overscan::NONE.apply(r, Size::new(7, 3)), r);
    }

    #[test]
    fn overscan_clamps_percent() {
        let o = Overscan::new(250, 40);
        assert_eq!((o.x(), o.y()), (100, 40));
        assert_eq!(o.inset(Size::new(100, 100)), Size::new(0, 60));
    }

    #[test]
    fn fit_then_overscan() {
        let cfg = GeometryConfig::new(Size::new(1280, 720), Size::new(1920, 1200))
            .with_overscan(Overscan::new(5, 5));
        assert_eq!(cfg.fitted(), Size::new(1920, 1080));
        let out = cfg.adjust_rect(Rect::new(0, 0, 1280, 720));
        assert_eq!(out, Rect::new(48, 84, 1872, 1110));
    }

    #[test]
    fn identity_config_is_noop() {
        let cfg = GeometryConfig::identity(Size::new(1024, 768));
        let r = Rect::new(10, 20, 30, 40);
        assert_eq!(cfg.adjust_rect(r), r);
    }

    #[test]
    fn full_overscan_collapses_rect() {
        let frame = Size::new(100, 100);
        let out = Overscan::new(100, 100).apply(Rect::new(10, 10, 90, 90), frame);
        assert!(out.is_empty(), "100% overscan leaves nothing: {out:?}");
    }

    #[test]
    fn kurbo_round_trip_rounds_outward() {
        let r = Rect::from_kurbo(kurbo::Rect::new(0.5, 1.2, 10.1, 20.9));
        assert_eq!(r, Rect::new(0, 1, 11, 21));
        let k: kurbo::Rect = r.into();
        assert_eq!(k, kurbo::Rect::new(0.0, 1.0, 11.0, 21.0));
    }
}
