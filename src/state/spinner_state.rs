//! Loading spinner animation state
//!
//! Three dots that grow and shrink one after the other while a ticket is
//! being submitted.

use std::time::{Duration, Instant};

/// Glyphs from smallest to largest dot
const DOT_GLYPHS: [char; 4] = [' ', '·', '•', '●'];

#[derive(Debug, Clone)]
pub struct SpinnerState {
    pub start_time: Instant,
}

impl SpinnerState {
    /// Length of one grow/shrink cycle
    const CYCLE: Duration = Duration::from_millis(1400);
    /// How far each dot lags behind the previous one
    const DOT_DELAY: Duration = Duration::from_millis(160);

    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
        }
    }

    /// Current dot string, e.g. `"● • ·"`
    pub fn frame(&self) -> String {
        Self::frame_at(self.start_time.elapsed())
    }

    pub fn frame_at(elapsed: Duration) -> String {
        Self::scales_at(elapsed)
            .iter()
            .map(|scale| glyph(*scale).to_string())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Scale of each dot in `0.0..=1.0`
    pub fn scales_at(elapsed: Duration) -> [f32; 3] {
        let cycle = Self::CYCLE.as_secs_f32();
        let delay = Self::DOT_DELAY.as_secs_f32();
        let t = elapsed.as_secs_f32();

        let mut scales = [0.0; 3];
        for (i, scale) in scales.iter_mut().enumerate() {
            let lagged = t + cycle - delay * (2 - i) as f32;
            *scale = bounce((lagged % cycle) / cycle);
        }
        scales
    }
}

impl Default for SpinnerState {
    fn default() -> Self {
        Self::new()
    }
}

/// Grow over the first 40% of the cycle, shrink until 80%, rest until the end
fn bounce(progress: f32) -> f32 {
    if progress < 0.4 {
        simple_easing::cubic_out(progress / 0.4)
    } else if progress < 0.8 {
        1.0 - simple_easing::cubic_in((progress - 0.4) / 0.4)
    } else {
        0.0
    }
}

fn glyph(scale: f32) -> char {
    let last = DOT_GLYPHS.len() - 1;
    let index = (scale.clamp(0.0, 1.0) * last as f32).round() as usize;
    DOT_GLYPHS[index.min(last)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scales_stay_in_range() {
        for ms in (0..3000).step_by(37) {
            for scale in SpinnerState::scales_at(Duration::from_millis(ms)) {
                assert!((0.0..=1.0).contains(&scale), "{scale} at {ms}ms");
            }
        }
    }

    #[test]
    fn test_dots_are_out_of_phase() {
        let scales = SpinnerState::scales_at(Duration::from_millis(100));
        assert_ne!(scales[0], scales[2]);
    }

    #[test]
    fn test_animation_repeats_each_cycle() {
        let a = SpinnerState::scales_at(Duration::from_millis(250));
        let b = SpinnerState::scales_at(Duration::from_millis(250) + SpinnerState::CYCLE);
        for (x, y) in a.iter().zip(b.iter()) {
            assert!((x - y).abs() < 1e-3);
        }
    }

    #[test]
    fn test_frame_has_three_dots() {
        let frame = SpinnerState::frame_at(Duration::from_millis(500));
        assert_eq!(frame.chars().count(), 5);
    }

    #[test]
    fn test_bounce_endpoints() {
        assert_eq!(bounce(0.0), 0.0);
        assert!((bounce(0.4) - 1.0).abs() < 1e-6);
        assert_eq!(bounce(0.9), 0.0);
    }

    #[test]
    fn test_glyph_extremes() {
        assert_eq!(glyph(0.0), ' ');
        assert_eq!(glyph(1.0), '●');
    }
}
