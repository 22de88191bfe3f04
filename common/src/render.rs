//! Dirty tracking so each frame only redraws what changed.
//!
//! | Element | Redrawn when |
//! |---------|--------------|
//! | Header | FPS text changes, or the screen was wiped |
//! | Chrome (labels, gate panel) | After any wipe |
//! | Gauges | Mapped frame or bubble color changes, or a popup is up |
//! | Popups | Every frame while visible; closing one wipes the screen |
//!
//! A dirty gauge repaints its whole track, since the old bubble has to go.

use embedded_graphics::pixelcolor::Rgb565;

use crate::animations::GAUGE_COUNT;
use crate::tilt::GaugeFrame;

/// What the header currently shows. FPS is `None` while hidden so that
/// changes to a hidden counter never count as a change.
#[derive(Clone, Copy, PartialEq, Eq)]
struct HeaderContent {
    fps: Option<u32>,
}

/// What the gauges were last drawn with.
#[derive(Clone, Copy, PartialEq)]
struct GaugeContent {
    frame: GaugeFrame,
    colors: [Rgb565; GAUGE_COUNT],
}

/// Tracks what is on screen so each frame draws only what changed.
pub struct RenderState {
    chrome_valid: bool,
    header: Option<HeaderContent>,
    gauges: Option<GaugeContent>,
    popup: Option<u8>,

    // Per-frame, reset by `end_frame`
    first_frame: bool,
    popup_just_closed: bool,
    display_cleared: bool,
}

impl RenderState {
    pub const fn new() -> Self {
        Self {
            chrome_valid: false,
            header: None,
            gauges: None,
            popup: None,
            first_frame: true,
            popup_just_closed: false,
            display_cleared: false,
        }
    }

    /// Everything drawn so far is gone this frame.
    #[inline]
    const fn wiped(&self) -> bool { self.first_frame || self.popup_just_closed || self.display_cleared }

    /// Whether the caller has to clear the display before drawing this frame.
    #[inline]
    pub const fn needs_clear(&self) -> bool { self.first_frame || self.popup_just_closed }

    #[inline]
    pub const fn need_chrome(&self) -> bool { !self.chrome_valid || self.wiped() }

    #[inline]
    pub const fn mark_chrome_drawn(&mut self) { self.chrome_valid = true; }

    /// Whether the header has to be redrawn. The FPS counter is compared
    /// rounded, matching its `{:.0}` formatting.
    pub fn check_header_dirty(
        &mut self,
        show_fps: bool,
        fps: f32,
    ) -> bool {
        let content = HeaderContent {
            fps: show_fps.then(|| libm::roundf(fps) as u32),
        };
        let dirty = self.wiped() || self.header != Some(content);
        self.header = Some(content);
        dirty
    }

    /// Whether the gauges have to be redrawn for this frame and these colors.
    ///
    /// A visible popup overlaps the bullseye, so gauges are redrawn under it
    /// every frame.
    pub fn check_gauges_dirty(
        &mut self,
        frame: &GaugeFrame,
        colors: [Rgb565; GAUGE_COUNT],
    ) -> bool {
        let content = GaugeContent { frame: *frame, colors };
        let dirty = self.wiped() || self.popup.is_some() || self.gauges != Some(content);
        self.gauges = Some(content);
        dirty
    }

    /// Track the visible popup kind. Closing or switching popups leaves
    /// remnants, so both count as a close.
    pub fn update_popup(
        &mut self,
        kind: Option<u8>,
    ) {
        if self.popup.is_some() && kind != self.popup {
            self.popup_just_closed = true;
            self.chrome_valid = false;
        }
        self.popup = kind;
    }

    #[inline]
    pub const fn popup_just_closed(&self) -> bool { self.popup_just_closed }

    #[inline]
    pub const fn is_first_frame(&self) -> bool { self.first_frame }

    /// The caller cleared the display (page switch, gate opening or closing).
    pub const fn mark_display_cleared(&mut self) {
        self.display_cleared = true;
        self.chrome_valid = false;
    }

    pub const fn end_frame(&mut self) {
        self.first_frame = false;
        self.popup_just_closed = false;
        self.display_cleared = false;
    }
}

impl Default for RenderState {
    fn default() -> Self { Self::new() }
}

// =============================================================================
// Unit Tests
// =============================================================================
