//! One-shot reveal animations for page regions.
//!
//! Each [`RevealController`] watches a single element through the page's
//! [`IntersectionObserver`].  The first time the element is visible enough it
//! flips from [`RevealPhase::Hidden`] to [`RevealPhase::Visible`], stops
//! observing, and never goes back.  The entry delay only shifts when the
//! animation starts drawing; the phase change itself is immediate.

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use thiserror::Error;

use super::geometry::ElementId;
use super::observe::{Disposition, IntersectionObserver, Observation};

/// Default share of a region that must be visible before it reveals.
pub const DEFAULT_THRESHOLD: f64 = 0.2;

/// The reveal viewport ends this far above the real bottom edge.
pub const REVEAL_BOTTOM_INSET_PX: f64 = 100.0;

/// Distance covered by the slide animations.
pub const SLIDE_DISTANCE_PX: f64 = 32.0;

#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum RevealError {
    #[error("visibility threshold {0} is outside 0..=1")]
    InvalidThreshold(f64),
    #[error("entry delay {0}s must be a finite, non-negative number")]
    InvalidDelay(f64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnimationKind {
    #[default]
    FadeIn,
    SlideUp,
    SlideInRight,
}

impl AnimationKind {
    pub fn label(self) -> &'static str {
        match self {
            AnimationKind::FadeIn => "fade-in",
            AnimationKind::SlideUp => "slide-up",
            AnimationKind::SlideInRight => "slide-in-right",
        }
    }
}

/// Per-region configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevealOptions {
    threshold: f64,
    delay: Duration,
    animation: AnimationKind,
}

impl Default for RevealOptions {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            delay: Duration::ZERO,
            animation: AnimationKind::default(),
        }
    }
}

impl RevealOptions {
    pub fn new(animation: AnimationKind) -> Self {
        Self {
            animation,
            ..Self::default()
        }
    }

    pub fn with_threshold(mut self, ratio: f64) -> Result<Self, RevealError> {
        if !(0.0..=1.0).contains(&ratio) {
            return Err(RevealError::InvalidThreshold(ratio));
        }
        self.threshold = ratio;
        Ok(self)
    }

    pub fn with_delay_secs(mut self, seconds: f64) -> Result<Self, RevealError> {
        if !seconds.is_finite() || seconds < 0.0 {
            return Err(RevealError::InvalidDelay(seconds));
        }
        self.delay = Duration::from_secs_f64(seconds);
        Ok(self)
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn animation(&self) -> AnimationKind {
        self.animation
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealPhase {
    Hidden,
    /// Absorbing.  `since` is when the threshold was first met.
    Visible { since: Instant },
}

/// How animations play: standard timing or reduced motion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Motion {
    pub duration: Duration,
    /// Whether per-region entry delays are honoured.
    pub delays: bool,
}

impl Motion {
    pub const STANDARD: Motion = Motion {
        duration: Duration::from_millis(600),
        delays: true,
    };

    /// Regions still reveal through the state machine, but appear at once.
    pub const REDUCED: Motion = Motion {
        duration: Duration::ZERO,
        delays: false,
    };
}

/// Presentation derived from the phase at a point in time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevealVisual {
    /// 0.0 (invisible) ..= 1.0 (opaque).
    pub opacity: f64,
    /// Horizontal offset in pixels (positive = pushed right).
    pub offset_x: f64,
    /// Vertical offset in pixels (positive = pushed down).
    pub offset_y: f64,
}

impl RevealVisual {
    pub const HIDDEN: RevealVisual = RevealVisual {
        opacity: 0.0,
        offset_x: 0.0,
        offset_y: 0.0,
    };

    pub const SETTLED: RevealVisual = RevealVisual {
        opacity: 1.0,
        offset_x: 0.0,
        offset_y: 0.0,
    };

    /// Frame of `animation` at eased progress `t` (0..=1).
    fn frame(animation: AnimationKind, t: f64) -> Self {
        let remaining = SLIDE_DISTANCE_PX * (1.0 - t);
        match animation {
            AnimationKind::FadeIn => Self {
                opacity: t,
                offset_x: 0.0,
                offset_y: 0.0,
            },
            AnimationKind::SlideUp => Self {
                opacity: t,
                offset_x: 0.0,
                offset_y: remaining,
            },
            AnimationKind::SlideInRight => Self {
                opacity: t,
                offset_x: remaining,
                offset_y: 0.0,
            },
        }
    }
}

/// Ease-out cubic: fast start, slow finish.
fn ease_out(t: f64) -> f64 {
    1.0 - (1.0 - t).powi(3)
}

// ───────────────────────────────────────── controller ────────

/// Hidden → Visible state machine for one region.
#[derive(Debug)]
pub struct RevealController {
    options: RevealOptions,
    phase: Rc<Cell<RevealPhase>>,
    /// Present while the region is being observed.
    observation: Option<Observation>,
}

impl RevealController {
    pub fn new(options: RevealOptions) -> Self {
        Self {
            options,
            phase: Rc::new(Cell::new(RevealPhase::Hidden)),
            observation: None,
        }
    }

    /// Start observing `element`.  A region that already revealed, or is
    /// already observing, ignores the call.
    pub fn mount(&mut self, observer: &IntersectionObserver, element: ElementId) {
        if self.has_become_visible() || self.is_observing() {
            return;
        }
        let threshold = self.options.threshold();
        let animation = self.options.animation();
        let phase = Rc::clone(&self.phase);
        self.observation = Some(observer.observe(element, threshold, move |entry| {
            if phase.get() != RevealPhase::Hidden {
                return Disposition::Unobserve;
            }
            if entry.is_intersecting && entry.ratio >= threshold {
                phase.set(RevealPhase::Visible { since: entry.time });
                tracing::debug!(
                    element = entry.element.0,
                    ratio = entry.ratio,
                    animation = animation.label(),
                    "region revealed"
                );
                Disposition::Unobserve
            } else {
                Disposition::Keep
            }
        }));
    }

    /// Stop observing.  A region that never revealed stays hidden.
    pub fn unmount(&mut self) {
        self.observation = None;
    }

    pub fn is_observing(&self) -> bool {
        self.observation.as_ref().is_some_and(Observation::is_active)
    }

    /// Drop the handle once the observer has let go of the target.
    pub fn release_if_done(&mut self) {
        if self.observation.is_some() && !self.is_observing() {
            self.observation = None;
        }
    }

    pub fn has_become_visible(&self) -> bool {
        matches!(self.phase(), RevealPhase::Visible { .. })
    }

    pub fn phase(&self) -> RevealPhase {
        self.phase.get()
    }

    /// Linear progress of the animation at `now` (0 before it starts).
    pub fn progress(&self, now: Instant, motion: Motion) -> f64 {
        let RevealPhase::Visible { since } = self.phase() else {
            return 0.0;
        };
        let delay = if motion.delays {
            self.options.delay()
        } else {
            Duration::ZERO
        };
        let start = since + delay;
        if now < start {
            return 0.0;
        }
        if motion.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.duration_since(start).as_secs_f64();
        (elapsed / motion.duration.as_secs_f64()).min(1.0)
    }

    /// What the region looks like at `now`.  Hidden regions are transparent
    /// and untranslated; revealed regions hold their final frame once the
    /// animation completes.
    pub fn visual(&self, now: Instant, motion: Motion) -> RevealVisual {
        if !self.has_become_visible() {
            return RevealVisual::HIDDEN;
        }
        let progress = self.progress(now, motion);
        if progress >= 1.0 {
            return RevealVisual::SETTLED;
        }
        RevealVisual::frame(self.options.animation(), ease_out(progress))
    }

    /// `true` while the region still needs redraws to finish its animation.
    pub fn is_animating(&self, now: Instant, motion: Motion) -> bool {
        self.has_become_visible() && self.progress(now, motion) < 1.0
    }
}
