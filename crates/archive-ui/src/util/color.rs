//! Deterministic name colors.
//!
//! A name is hashed into a small pseudo-random generator whose draws are reduced
//! into hue, saturation and lightness ranges. No state outside the name is used,
//! so a name renders in the same color on every page of the archive.

use crate::error::EnhanceError;
use serde::Deserialize;

/// A CSS `hsl()` color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
#[display("hsl({hue}, {saturation}%, {lightness}%)")]
pub struct Hsl {
    pub hue: u16,
    pub saturation: u8,
    pub lightness: u8,
}

/// Maps a name to its color.
pub trait ColorScheme {
    fn color(&self, name: &str) -> Hsl;
}

/// The xmur3 string hash, used as a generator of 32-bit draws.
///
/// Length and characters are taken as UTF-16 code units, matching how the
/// browser measures strings.
#[derive(Debug, Clone)]
pub struct Xmur3 {
    state: u32,
}

impl Xmur3 {
    pub fn new(s: &str) -> Self {
        let len = u32::try_from(s.encode_utf16().count()).unwrap_or(u32::MAX);
        let state = s.encode_utf16().fold(1_779_033_703 ^ len, |h, unit| {
            (h ^ u32::from(unit))
                .wrapping_mul(3_432_918_353)
                .rotate_left(13)
        });
        Self { state }
    }
}

impl Iterator for Xmur3 {
    type Item = u32;

    fn next(&mut self) -> Option<u32> {
        let mut h = self.state;
        h = (h ^ (h >> 16)).wrapping_mul(2_246_822_507);
        h = (h ^ (h >> 13)).wrapping_mul(3_266_489_909);
        h ^= h >> 16;
        self.state = h;
        Some(h)
    }
}

/// `draw % modulus + offset`. A zero modulus reduces every draw to the offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Band {
    pub modulus: u32,
    pub offset: u32,
}

impl Band {
    fn reduce(self, draw: u32) -> u32 {
        draw.checked_rem(self.modulus)
            .unwrap_or_default()
            .saturating_add(self.offset)
    }

    fn max(self) -> u32 {
        self.modulus.saturating_sub(1).saturating_add(self.offset)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LightnessBand {
    /// One draw reduced into the band.
    Single(Band),
    /// Several draws reduced by the band's modulus and summed, then offset.
    /// Sums cluster around the middle of the range.
    Smoothed { draws: u8, band: Band },
}

impl LightnessBand {
    fn reduce(self, draws: &mut impl Iterator<Item = u32>) -> u32 {
        match self {
            LightnessBand::Single(band) => band.reduce(draws.next().unwrap_or_default()),
            LightnessBand::Smoothed { draws: count, band } => {
                draws
                    .take(usize::from(count))
                    .fold(band.offset, |sum, draw| {
                        sum.saturating_add(draw.checked_rem(band.modulus).unwrap_or_default())
                    })
            }
        }
    }

    fn max(self) -> u32 {
        match self {
            LightnessBand::Single(band) => band.max(),
            LightnessBand::Smoothed { draws, band } => {
                u32::from(draws)
                    .saturating_mul(band.modulus.saturating_sub(1))
                    .saturating_add(band.offset)
            }
        }
    }

    fn modulus(self) -> u32 {
        match self {
            LightnessBand::Single(band) | LightnessBand::Smoothed { band, .. } => band.modulus,
        }
    }
}

/// Ranges the xmur3 draws are reduced into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ColorRanges {
    pub hue_modulus: u16,
    pub saturation: Band,
    pub lightness: LightnessBand,
}

impl Default for ColorRanges {
    fn default() -> Self {
        Self {
            hue_modulus: Self::MAX_HUE_MODULUS,
            saturation: Band {
                modulus: 80,
                offset: 20,
            },
            lightness: LightnessBand::Single(Band {
                modulus: 45,
                offset: 10,
            }),
        }
    }
}

impl ColorRanges {
    /// Hues stay within 0..=364.
    pub const MAX_HUE_MODULUS: u16 = 365;

    pub fn validate(&self) -> Result<(), EnhanceError> {
        if self.hue_modulus == 0 || self.saturation.modulus == 0 || self.lightness.modulus() == 0 {
            return Err(EnhanceError::InvalidColorRange(
                "modulus must be greater than zero".to_string(),
            ));
        }
        if self.hue_modulus > Self::MAX_HUE_MODULUS {
            return Err(EnhanceError::InvalidColorRange(format!(
                "hue modulus {} exceeds {}",
                self.hue_modulus,
                Self::MAX_HUE_MODULUS
            )));
        }
        if self.saturation.max() > 100 {
            return Err(EnhanceError::InvalidColorRange(format!(
                "saturation can reach {}%",
                self.saturation.max()
            )));
        }
        if self.lightness.max() > 100 {
            return Err(EnhanceError::InvalidColorRange(format!(
                "lightness can reach {}%",
                self.lightness.max()
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Xmur3Scheme {
    pub ranges: ColorRanges,
}

impl ColorScheme for Xmur3Scheme {
    fn color(&self, name: &str) -> Hsl {
        let mut draws = Xmur3::new(name);
        let mut next = || draws.next().unwrap_or_default();
        // Unvalidated ranges never panic: a zero modulus yields 0 and the
        // results are clamped to CSS bounds.
        let hue_modulus = u32::from(self.ranges.hue_modulus.min(ColorRanges::MAX_HUE_MODULUS));
        let hue = next().checked_rem(hue_modulus).unwrap_or_default() as u16;
        let saturation = self.ranges.saturation.reduce(next()).min(100) as u8;
        let lightness = self.ranges.lightness.reduce(&mut draws).min(100) as u8;
        Hsl {
            hue,
            saturation,
            lightness,
        }
    }
}

/// `acc = acc * 31 + unit` over the UTF-16 code units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PolynomialScheme;

impl PolynomialScheme {
    pub const LIGHTNESS: u8 = 35;

    pub fn hash(name: &str) -> u32 {
        name.encode_utf16()
            .fold(0u32, |acc, unit| acc.wrapping_mul(31).wrapping_add(u32::from(unit)))
    }
}

impl ColorScheme for PolynomialScheme {
    fn color(&self, name: &str) -> Hsl {
        let hash = Self::hash(name);
        Hsl {
            hue: (hash % 365) as u16,
            saturation: (hash % 100) as u8,
            lightness: Self::LIGHTNESS,
        }
    }
}

/// Configurable choice of scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ColorStrategy {
    Xmur3 {
        #[serde(default)]
        ranges: ColorRanges,
    },
    Polynomial,
}

impl Default for ColorStrategy {
    fn default() -> Self {
        ColorStrategy::Xmur3 {
            ranges: ColorRanges::default(),
        }
    }
}

impl ColorStrategy {
    pub fn validate(&self) -> Result<(), EnhanceError> {
        match self {
            ColorStrategy::Xmur3 { ranges } => ranges.validate(),
            ColorStrategy::Polynomial => Ok(()),
        }
    }
}

impl ColorScheme for ColorStrategy {
    fn color(&self, name: &str) -> Hsl {
        match self {
            ColorStrategy::Xmur3 { ranges } => Xmur3Scheme { ranges: *ranges }.color(name),
            ColorStrategy::Polynomial => PolynomialScheme.color(name),
        }
    }
}
