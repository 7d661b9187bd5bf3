//! Pointer interaction state machine for the video timeline.
//!
//! [`TimelineController`] translates pointer input over a fixed-width
//! scrub region into seek targets, independent of any rendering
//! technology. The embedding player owns the actual media element; it
//! feeds pointer and metadata events in and applies the seek values the
//! controller hands back.
//!
//! Drag tracking observes pointer movement globally (outside the scrub
//! region's bounds), so the controller models pointer capture
//! explicitly: capture is taken on `pointer_down` and released on every
//! exit path: `pointer_up`, focus loss, and teardown.

use crate::timecode::{percent_to_time, time_to_percent};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Lower clamp for comment marker placement, in percent of timeline width.
/// Keeps markers at the extreme edges clickable.
pub const MARKER_MIN_PERCENT: f64 = 5.0;

/// Upper clamp for comment marker placement.
pub const MARKER_MAX_PERCENT: f64 = 95.0;

/// Marker position used while the video duration is still unknown.
pub const MARKER_FALLBACK_PERCENT: f64 = 50.0;

/// Suggested interval for the embedding player's duration probe loop.
///
/// Some media elements report a zero duration until well after the
/// metadata event; callers are expected to re-poll at this cadence and
/// feed [`TimelineController::metadata_loaded`] once a real value shows
/// up.
pub const DURATION_POLL_INTERVAL_MS: u64 = 100;

/// Total budget for the duration probe loop before giving up.
pub const DURATION_POLL_BUDGET_SECS: u64 = 10;

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

/// Pointer interaction states for the scrub region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrubState {
    /// Pointer is outside the scrub region.
    Idle,
    /// Pointer is over the scrub region; moves update the hover preview.
    Hovering,
    /// Pointer is held down; every move re-seeks the player.
    Dragging,
}

/// Interaction controller for the scrub bar and playhead.
///
/// All time values are in seconds. Methods that can seek return the
/// clamped target time as `Some(seconds)`; `None` means the input was a
/// silent no-op (duration or geometry not yet known).
#[derive(Debug, Clone)]
pub struct TimelineController {
    /// Pixel width of the scrub region's bounding box.
    width: f64,
    /// Duration reported by the metadata event, 0 until known.
    known_duration: f64,
    state: ScrubState,
    current_time: f64,
    hover_time: Option<f64>,
    pointer_captured: bool,
}

impl TimelineController {
    pub fn new() -> Self {
        Self {
            width: 0.0,
            known_duration: 0.0,
            state: ScrubState::Idle,
            current_time: 0.0,
            hover_time: None,
            pointer_captured: false,
        }
    }

    // -- Player events -------------------------------------------------------

    /// Record the scrub region's measured pixel width.
    pub fn set_width(&mut self, width: f64) {
        self.width = if width.is_finite() && width > 0.0 {
            width
        } else {
            0.0
        };
    }

    /// Record the duration reported by the player's metadata event.
    ///
    /// Zero or non-finite values are ignored so a late, bogus metadata
    /// event cannot clobber a previously known duration.
    pub fn metadata_loaded(&mut self, duration: f64) {
        if duration.is_finite() && duration > 0.0 {
            self.known_duration = duration;
        }
    }

    /// Track the player's time-update events.
    pub fn time_update(&mut self, seconds: f64) {
        if seconds.is_finite() && seconds >= 0.0 {
            self.current_time = seconds;
        }
    }

    /// Resolve the duration to use for an interaction.
    ///
    /// Fallback chain: last known metadata duration, else the live value
    /// the caller just read off the media element, else 0.
    pub fn effective_duration(&self, live_duration: Option<f64>) -> f64 {
        if self.known_duration > 0.0 {
            return self.known_duration;
        }
        match live_duration {
            Some(d) if d.is_finite() && d > 0.0 => d,
            _ => 0.0,
        }
    }

    // -- Pointer events ------------------------------------------------------

    /// Pointer entered the scrub region.
    pub fn pointer_enter(&mut self) {
        if self.state == ScrubState::Idle {
            self.state = ScrubState::Hovering;
        }
    }

    /// Pointer left the scrub region.
    ///
    /// Ignored while dragging: moves are observed globally until the
    /// pointer is released.
    pub fn pointer_leave(&mut self) {
        if self.state == ScrubState::Hovering {
            self.state = ScrubState::Idle;
            self.hover_time = None;
        }
    }

    /// Pointer pressed inside the scrub region or on the playhead.
    ///
    /// Seeks immediately to the pressed position, enters `Dragging`, and
    /// takes pointer capture. A silent no-op while duration or width is
    /// unknown.
    pub fn pointer_down(&mut self, x: f64, live_duration: Option<f64>) -> Option<f64> {
        let target = self.offset_to_time(x, live_duration)?;
        self.current_time = target;
        self.state = ScrubState::Dragging;
        self.pointer_captured = true;
        self.hover_time = None;
        Some(target)
    }

    /// Pointer moved.
    ///
    /// While dragging, recomputes and returns the seek target from the
    /// same clamped-percentage formula as `pointer_down`. While
    /// hovering, only the non-committing preview time is updated and no
    /// seek is produced.
    pub fn pointer_move(&mut self, x: f64, live_duration: Option<f64>) -> Option<f64> {
        match self.state {
            ScrubState::Dragging => {
                let target = self.offset_to_time(x, live_duration)?;
                self.current_time = target;
                Some(target)
            }
            ScrubState::Hovering => {
                self.hover_time = self.offset_to_time(x, live_duration);
                None
            }
            ScrubState::Idle => None,
        }
    }

    /// Pointer released (observed globally).
    pub fn pointer_up(&mut self) {
        self.release();
    }

    /// The owning view lost focus; treat as the end of any drag.
    pub fn focus_lost(&mut self) {
        self.release();
    }

    /// Release pointer capture and leave `Dragging`.
    ///
    /// Called from every exit path, including component teardown; safe
    /// to call repeatedly.
    pub fn release(&mut self) {
        self.pointer_captured = false;
        if self.state == ScrubState::Dragging {
            self.state = ScrubState::Idle;
        }
    }

    // -- Programmatic seeks --------------------------------------------------

    /// Seek to a comment's timestamp (marker or list click).
    ///
    /// Clamps into `[0, duration]` when the duration is known; with no
    /// duration the value is only floored at zero. Whether playback
    /// resumes is the player's concern: it preserves its prior
    /// play/pause state across the jump.
    pub fn jump_to(&mut self, seconds: f64, live_duration: Option<f64>) -> f64 {
        let duration = self.effective_duration(live_duration);
        let mut target = if seconds.is_finite() { seconds } else { 0.0 };
        target = target.max(0.0);
        if duration > 0.0 {
            target = target.min(duration);
        }
        self.current_time = target;
        target
    }

    // -- Derived geometry ----------------------------------------------------

    /// Playhead position as a percentage of the timeline width.
    pub fn playhead_percent(&self, live_duration: Option<f64>) -> f64 {
        time_to_percent(self.current_time, self.effective_duration(live_duration))
    }

    /// Placement for a comment marker, clamped into
    /// `[MARKER_MIN_PERCENT, MARKER_MAX_PERCENT]`.
    ///
    /// Falls back to the timeline midpoint while the duration is
    /// unknown, so markers render somewhere sensible before metadata
    /// arrives.
    pub fn marker_percent(&self, timestamp: f64, live_duration: Option<f64>) -> f64 {
        let duration = self.effective_duration(live_duration);
        if duration <= 0.0 {
            return MARKER_FALLBACK_PERCENT;
        }
        time_to_percent(timestamp, duration)
            .min(MARKER_MAX_PERCENT)
            .max(MARKER_MIN_PERCENT)
    }

    // -- Accessors -----------------------------------------------------------

    pub fn state(&self) -> ScrubState {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        self.state == ScrubState::Dragging
    }

    /// Whether the controller currently holds pointer capture.
    pub fn pointer_captured(&self) -> bool {
        self.pointer_captured
    }

    /// The authoritative current playback time, in seconds.
    pub fn current_time(&self) -> f64 {
        self.current_time
    }

    /// Tooltip preview time; populated only while hovering (not
    /// dragging) with a known duration.
    pub fn hover_preview(&self) -> Option<f64> {
        match self.state {
            ScrubState::Hovering => self.hover_time,
            _ => None,
        }
    }

    // -- Internals -----------------------------------------------------------

    /// Map a pointer x-offset to a clamped playback time.
    ///
    /// `None` when duration or width is not yet known: pointer input
    /// must not seek before metadata is available.
    fn offset_to_time(&self, x: f64, live_duration: Option<f64>) -> Option<f64> {
        let duration = self.effective_duration(live_duration);
        if duration <= 0.0 || self.width <= 0.0 {
            return None;
        }
        Some(percent_to_time(x / self.width, duration))
    }
}

impl Default for TimelineController {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
