use super::genotype::{Trait, TraitValues};
use serde::{Deserialize, Serialize};

/// Per-trait fitness cost weights; each must be finite and non-negative.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CostWeights {
    pub contrast: f64,
    pub brightness: f64,
    pub motility: f64,
    pub directedness: f64,
}

impl CostWeights {
    /// Same weight for every trait.
    #[must_use]
    pub fn uniform(weight: f64) -> Self {
        Self {
            contrast: weight,
            brightness: weight,
            motility: weight,
            directedness: weight,
        }
    }

    #[must_use]
    pub fn get(&self, t: Trait) -> f64 {
        match t {
            Trait::Contrast => self.contrast,
            Trait::Brightness => self.brightness,
            Trait::Motility => self.motility,
            Trait::Directedness => self.directedness,
        }
    }

    pub fn set(&mut self, t: Trait, weight: f64) {
        match t {
            Trait::Contrast => self.contrast = weight,
            Trait::Brightness => self.brightness = weight,
            Trait::Motility => self.motility = weight,
            Trait::Directedness => self.directedness = weight,
        }
    }
}

/// Which traits may be resampled by a mutation event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Mutability {
    pub contrast: bool,
    pub brightness: bool,
    pub motility: bool,
    pub directedness: bool,
}

impl Mutability {
    #[must_use]
    pub fn all() -> Self {
        Self {
            contrast: true,
            brightness: true,
            motility: true,
            directedness: true,
        }
    }

    #[must_use]
    pub fn only(t: Trait) -> Self {
        let mut m = Self::default();
        m.set(t, true);
        m
    }

    #[must_use]
    pub fn is_mutable(&self, t: Trait) -> bool {
        match t {
            Trait::Contrast => self.contrast,
            Trait::Brightness => self.brightness,
            Trait::Motility => self.motility,
            Trait::Directedness => self.directedness,
        }
    }

    pub fn set(&mut self, t: Trait, mutable: bool) {
        match t {
            Trait::Contrast => self.contrast = mutable,
            Trait::Brightness => self.brightness = mutable,
            Trait::Motility => self.motility = mutable,
            Trait::Directedness => self.directedness = mutable,
        }
    }

    /// Mutable traits in [`Trait::ALL`] order.
    #[must_use]
    pub fn mutable_traits(&self) -> Vec<Trait> {
        Trait::ALL
            .into_iter()
            .filter(|&t| self.is_mutable(t))
            .collect()
    }

    #[must_use]
    pub fn any(&self) -> bool {
        self.contrast || self.brightness || self.motility || self.directedness
    }
}

/// Integer displacement between two grid sites.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Offset {
    pub dx: i32,
    pub dy: i32,
}

impl Offset {
    #[must_use]
    pub const fn new(dx: i32, dy: i32) -> Self {
        Self { dx, dy }
    }

    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.dx == 0 && self.dy == 0
    }

    #[must_use]
    pub fn squared_len(&self) -> i64 {
        i64::from(self.dx) * i64::from(self.dx) + i64::from(self.dy) * i64::from(self.dy)
    }
}

/// Occupancy of a single grid site, as seen by a renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Site {
    pub food: bool,
    /// Number of agents standing on the site.
    pub agents: u32,
    /// How many of those agents are showing a light.
    pub lit: u32,
}

/// Population means of the public trait values, plus the dominator's.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Summary {
    pub mean: TraitValues,
    pub dominator: TraitValues,
}
