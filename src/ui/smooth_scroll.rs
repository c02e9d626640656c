//! Smooth scrolling with exponential ease-out.
//!
//! The page scrolls toward a target row.  Each tick the remaining distance
//! decays by `speed`, so long jumps start fast and decelerate visibly.

/// Row-position smooth scroll animator.
#[derive(Debug, Clone)]
pub struct SmoothScroll {
    /// Current (fractional) top row.
    position: f64,
    target: usize,
    /// Damping: `distance *= (1 - speed)` each tick.
    /// Good range: 0.25–0.45 at 20 fps.
    speed: f64,
}

impl SmoothScroll {
    pub fn new(speed: f64) -> Self {
        Self {
            position: 0.0,
            target: 0,
            speed: speed.clamp(0.05, 0.95),
        }
    }

    /// Start gliding toward `row`.
    pub fn glide_to(&mut self, row: usize) {
        self.target = row;
    }

    /// Move to `row` immediately.
    pub fn jump_to(&mut self, row: usize) {
        self.target = row;
        self.position = row as f64;
    }

    /// Advance one frame.  Returns `true` when the visible row changed.
    pub fn tick(&mut self) -> bool {
        let before = self.row();
        let distance = self.target as f64 - self.position;
        if distance.abs() < 0.4 {
            self.position = self.target as f64;
        } else {
            self.position += distance * self.speed;
        }
        self.row() != before
    }

    /// Row currently at the top of the viewport.
    pub fn row(&self) -> usize {
        self.position.round().max(0.0) as usize
    }

    pub fn target(&self) -> usize {
        self.target
    }

    /// True while the scroll has not settled.
    pub fn is_animating(&self) -> bool {
        self.position != self.target as f64
    }
}
