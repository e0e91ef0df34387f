use serde::{Deserialize, Serialize};

/// One of the four heritable behaviour traits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trait {
    /// Difference in lighting probability between food and non-food sites.
    Contrast,
    /// Overall probability of showing a light.
    Brightness,
    /// Probability of moving on a given update.
    Motility,
    /// Probability that a move follows the nearest visible light.
    Directedness,
}

impl Trait {
    /// All traits, in the order mutation eligibility is enumerated.
    pub const ALL: [Trait; 4] = [
        Trait::Contrast,
        Trait::Brightness,
        Trait::Motility,
        Trait::Directedness,
    ];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Trait::Contrast => "contrast",
            Trait::Brightness => "brightness",
            Trait::Motility => "motility",
            Trait::Directedness => "directedness",
        }
    }

    /// Closed range of the public value of this trait.
    #[must_use]
    pub fn range(self) -> (f64, f64) {
        match self {
            Trait::Contrast | Trait::Directedness => (-1.0, 1.0),
            Trait::Brightness | Trait::Motility => (0.0, 1.0),
        }
    }
}

/// Heritable signalling and movement strategy of an agent.
///
/// Directedness is stored as a magnitude plus a `reversed` flag; the public
/// value returned by [`Genotype::signed_directedness`] folds the two into
/// `[-1, 1]`, negative meaning "move away from the light".
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Genotype {
    /// Lighting contrast in `[-1, 1]`; positive is honest, negative dishonest.
    pub contrast: f64,
    /// Lighting brightness in `[0, 1]`.
    pub brightness: f64,
    /// Movement rate in `[0, 1]`.
    pub motility: f64,
    /// Magnitude of the light response in `[0, 1]`.
    pub directedness: f64,
    /// Whether the light response points away from the source.
    pub reversed: bool,
}

impl Default for Genotype {
    fn default() -> Self {
        Self {
            contrast: 0.0,
            brightness: 0.5,
            motility: 1.0,
            directedness: 0.0,
            reversed: false,
        }
    }
}

impl Genotype {
    /// Builds a genotype from public trait values; `directedness` is signed.
    #[must_use]
    pub fn new(brightness: f64, contrast: f64, motility: f64, directedness: f64) -> Self {
        Self {
            contrast,
            brightness,
            motility,
            directedness: directedness.abs(),
            reversed: directedness < 0.0,
        }
    }

    #[must_use]
    pub fn signed_directedness(&self) -> f64 {
        if self.reversed {
            -self.directedness
        } else {
            self.directedness
        }
    }

    /// Public value of a trait (directedness is signed).
    #[must_use]
    pub fn value(&self, t: Trait) -> f64 {
        match t {
            Trait::Contrast => self.contrast,
            Trait::Brightness => self.brightness,
            Trait::Motility => self.motility,
            Trait::Directedness => self.signed_directedness(),
        }
    }

    /// First trait whose public value lies outside its documented range.
    #[must_use]
    pub fn out_of_range(&self) -> Option<(Trait, f64)> {
        Trait::ALL.into_iter().find_map(|t| {
            let v = self.value(t);
            let (lo, hi) = t.range();
            if v.is_finite() && (lo..=hi).contains(&v) {
                None
            } else {
                Some((t, v))
            }
        })
    }

    #[must_use]
    pub fn values(&self) -> TraitValues {
        TraitValues {
            contrast: self.contrast,
            brightness: self.brightness,
            motility: self.motility,
            directedness: self.signed_directedness(),
        }
    }
}

/// Public values of all four traits, e.g. a population mean.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TraitValues {
    pub contrast: f64,
    pub brightness: f64,
    pub motility: f64,
    pub directedness: f64,
}

impl TraitValues {
    #[must_use]
    pub fn get(&self, t: Trait) -> f64 {
        match t {
            Trait::Contrast => self.contrast,
            Trait::Brightness => self.brightness,
            Trait::Motility => self.motility,
            Trait::Directedness => self.directedness,
        }
    }
}
