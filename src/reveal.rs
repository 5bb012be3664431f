//! Scroll-triggered entrance animation for Home screen sections.

use std::time::{Duration, Instant};

/// Fraction of a section that must be on screen before it animates in.
pub const VISIBILITY_THRESHOLD: f32 = 0.2;
pub const ENTRANCE_DURATION: Duration = Duration::from_millis(1200);
/// Horizontal slide distance in columns.
pub const SLIDE_COLUMNS: f32 = 12.0;
pub const START_SCALE: f32 = 0.95;

/// Visual state of a section at one instant.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Entrance {
    pub opacity: f32,
    /// Signed column offset; negative is left of the resting position.
    pub offset_x: i16,
    pub scale: f32,
}

impl Entrance {
    pub const HIDDEN: Entrance = Entrance { opacity: 0.0, offset_x: 0, scale: START_SCALE };
    pub const SETTLED: Entrance = Entrance { opacity: 1.0, offset_x: 0, scale: 1.0 };

    /// Frame of the animation for the section at `index`, `elapsed` after it started.
    pub fn at(index: usize, elapsed: Duration) -> Self {
        if elapsed >= ENTRANCE_DURATION {
            return Self::SETTLED;
        }
        let t = (elapsed.as_secs_f32() / ENTRANCE_DURATION.as_secs_f32()).clamp(0.0, 1.0);
        let p = ease_out_expo(t);
        let from = if index % 2 == 0 { -SLIDE_COLUMNS } else { SLIDE_COLUMNS };
        Self {
            opacity: p,
            offset_x: (from * (1.0 - p)).round() as i16,
            scale: 1.0 - (1.0 - START_SCALE) * (1.0 - p),
        }
    }
}

fn ease_out_expo(t: f32) -> f32 {
    if t >= 1.0 {
        1.0
    } else {
        1.0 - 2f32.powf(-10.0 * t)
    }
}

/// Watches section visibility and starts each entrance exactly once.
#[derive(Clone, Debug, Default)]
pub struct SectionObserver {
    started: Vec<Option<Instant>>,
}

impl SectionObserver {
    pub fn new(sections: usize) -> Self {
        Self { started: vec![None; sections] }
    }

    /// Report how much of section `index` is visible. Returns true when this
    /// observation started its entrance.
    pub fn observe(&mut self, index: usize, visible_fraction: f32, now: Instant) -> bool {
        let Some(slot) = self.started.get_mut(index) else {
            return false;
        };
        if slot.is_some() || visible_fraction < VISIBILITY_THRESHOLD {
            return false;
        }
        *slot = Some(now);
        true
    }

    pub fn is_observing(&self, index: usize) -> bool {
        matches!(self.started.get(index), Some(None))
    }

    pub fn entrance(&self, index: usize, now: Instant) -> Entrance {
        match self.started.get(index).copied().flatten() {
            Some(start) => Entrance::at(index, now.saturating_duration_since(start)),
            None => Entrance::HIDDEN,
        }
    }

    /// True while any started entrance has not finished.
    pub fn animating(&self, now: Instant) -> bool {
        self.started
            .iter()
            .flatten()
            .any(|start| now.saturating_duration_since(*start) < ENTRANCE_DURATION)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_at_threshold_only_once() {
        let now = Instant::now();
        let mut obs = SectionObserver::new(2);
        assert!(!obs.observe(0, 0.1, now));
        assert!(obs.is_observing(0));
        assert!(obs.observe(0, 0.2, now));
        assert!(!obs.is_observing(0));
        assert!(!obs.observe(0, 1.0, now + Duration::from_secs(5)));
        // the original start time is kept
        assert!(obs.animating(now + Duration::from_millis(100)));
        assert!(!obs.animating(now + ENTRANCE_DURATION));
    }

    #[test]
    fn test_unknown_section_is_ignored() {
        let mut obs = SectionObserver::new(1);
        assert!(!obs.observe(3, 1.0, Instant::now()));
        assert!(!obs.is_observing(3));
    }

    #[test]
    fn test_hidden_until_observed() {
        let obs = SectionObserver::new(1);
        assert_eq!(obs.entrance(0, Instant::now()), Entrance::HIDDEN);
    }

    #[test]
    fn test_slide_direction_alternates() {
        let even = Entrance::at(0, Duration::ZERO);
        let odd = Entrance::at(1, Duration::ZERO);
        assert_eq!(even.offset_x, -12);
        assert_eq!(odd.offset_x, 12);
        assert_eq!(even.opacity, 0.0);
        assert!((even.scale - START_SCALE).abs() < f32::EPSILON);
    }

    #[test]
    fn test_settles_after_duration() {
        assert_eq!(Entrance::at(3, ENTRANCE_DURATION), Entrance::SETTLED);
        assert_eq!(Entrance::at(2, Duration::from_secs(10)), Entrance::SETTLED);
        let mid = Entrance::at(0, ENTRANCE_DURATION / 2);
        assert!(mid.opacity > 0.9 && mid.opacity < 1.0);
    }
}
