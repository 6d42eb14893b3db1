//! Feedback intensity: a brightness boost that bleeds away each frame.

/// Share of a step below which the boost snaps to zero.
const SNAP_FRACTION: f32 = 1e-3;

/// Transient brightness boost added to the base brightness.
///
/// Nothing currently raises it after startup; it only decays.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeedbackIntensity {
    value: f32,
    step: f32,
    max: f32,
}

impl FeedbackIntensity {
    /// Start at `initial` (clamped to `[0, max]`), losing `step` per frame.
    pub fn new(initial: f32, step: f32, max: f32) -> Self {
        Self {
            value: initial.clamp(0.0, max),
            step,
            max,
        }
    }

    /// Current boost.
    #[inline]
    pub const fn value(&self) -> f32 {
        self.value
    }

    /// Upper bound of the boost.
    #[inline]
    pub const fn max(&self) -> f32 {
        self.max
    }

    /// Lose one step, never going below zero.
    ///
    /// A remainder smaller than a thousandth of a step is rounding error
    /// from repeated `f32` subtraction and becomes exactly zero.
    #[inline]
    pub fn decay(&mut self) {
        let next = self.value - self.step;
        self.value = if next <= self.step * SNAP_FRACTION { 0.0 } else { next };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decays_to_zero_after_ten_frames() {
        let mut feedback = FeedbackIntensity::new(0.05, 0.005, 1.0);
        for _ in 0..9 {
            feedback.decay();
            assert!(feedback.value() > 0.0);
        }
        feedback.decay();
        assert_eq!(feedback.value(), 0.0);
        feedback.decay();
        assert_eq!(feedback.value(), 0.0);
    }

    #[test]
    fn test_never_negative() {
        let mut feedback = FeedbackIntensity::new(0.0, 0.005, 1.0);
        feedback.decay();
        assert_eq!(feedback.value(), 0.0);

        let mut feedback = FeedbackIntensity::new(0.003, 0.005, 1.0);
        feedback.decay();
        assert_eq!(feedback.value(), 0.0);
    }

    #[test]
    fn test_initial_clamped_to_max() {
        let feedback = FeedbackIntensity::new(5.0, 0.005, 1.0);
        assert_eq!(feedback.value(), 1.0);
        assert_eq!(feedback.max(), 1.0);

        let feedback = FeedbackIntensity::new(-1.0, 0.005, 1.0);
        assert_eq!(feedback.value(), 0.0);
    }
}
