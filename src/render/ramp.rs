//! Character ramp: brightness to glyph.

/// An ordered run of characters from visually empty to visually full.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ramp {
    chars: Vec<char>,
}

impl Ramp {
    /// Build a ramp from a string, darkest character first.
    ///
    /// Returns `None` for an empty string.
    pub fn new(chars: &str) -> Option<Self> {
        let chars: Vec<char> = chars.chars().collect();
        if chars.is_empty() {
            None
        } else {
            Some(Self { chars })
        }
    }

    /// Number of characters in the ramp.
    #[inline]
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    /// Always `false`: a ramp has at least one character.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Ramp index for a brightness sample: `floor(sample / 255 * (len - 1))`.
    #[inline]
    pub fn index_of(&self, sample: u8) -> usize {
        usize::from(sample) * (self.chars.len() - 1) / 255
    }

    /// Character for a brightness sample.
    #[inline]
    pub fn glyph(&self, sample: u8) -> char {
        self.chars[self.index_of(sample)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classic() -> Ramp {
        Ramp::new(" .:-=+*#%@").unwrap()
    }

    #[test]
    fn test_empty_ramp_rejected() {
        assert!(Ramp::new("").is_none());
    }

    #[test]
    fn test_endpoints() {
        let ramp = classic();
        assert_eq!(ramp.glyph(0), ' ');
        assert_eq!(ramp.glyph(255), '@');
    }

    #[test]
    fn test_floor_mapping() {
        let ramp = classic();
        // 28 / 255 * 9 = 0.988 -> 0
        assert_eq!(ramp.index_of(28), 0);
        // 29 / 255 * 9 = 1.02 -> 1
        assert_eq!(ramp.index_of(29), 1);
        // 128 / 255 * 9 = 4.5 -> 4
        assert_eq!(ramp.glyph(128), '=');
    }

    #[test]
    fn test_monotone_and_deterministic() {
        let ramp = classic();
        let mut last = 0;
        for sample in 0..=255u8 {
            let index = ramp.index_of(sample);
            assert!(index >= last, "index dropped at {sample}");
            assert_eq!(ramp.glyph(sample), ramp.glyph(sample));
            last = index;
        }
        assert_eq!(last, ramp.len() - 1);
    }

    #[test]
    fn test_single_character_ramp() {
        let ramp = Ramp::new("#").unwrap();
        assert_eq!(ramp.glyph(0), '#');
        assert_eq!(ramp.glyph(255), '#');
    }
}
