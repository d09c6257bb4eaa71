use serde::{Deserialize, Serialize};

/// Heritable traits of an animal. Copied by value at birth; an offspring
/// keeps no link to its parent's genetics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Genetics {
    pub speed: f64,
    pub color: (u8, u8, u8),
    pub vision: f64,
    pub stamina: f64,
    pub intelligence: f64,
}

impl Genetics {
    pub const SPEED_RANGE: (f64, f64) = (0.3, 2.0);
    pub const VISION_RANGE: (f64, f64) = (10.0, 100.0);
    pub const STAMINA_RANGE: (f64, f64) = (0.3, 2.0);
    pub const INTELLIGENCE_RANGE: (f64, f64) = (0.5, 2.0);

    /// Forces every continuous trait into its legal range.
    pub fn clamp(&mut self) {
        self.speed = self.speed.clamp(Self::SPEED_RANGE.0, Self::SPEED_RANGE.1);
        self.vision = self.vision.clamp(Self::VISION_RANGE.0, Self::VISION_RANGE.1);
        self.stamina = self
            .stamina
            .clamp(Self::STAMINA_RANGE.0, Self::STAMINA_RANGE.1);
        self.intelligence = self
            .intelligence
            .clamp(Self::INTELLIGENCE_RANGE.0, Self::INTELLIGENCE_RANGE.1);
    }

    /// Overall fitness, roughly 1.0 for an average founder.
    #[must_use]
    pub fn fitness(&self) -> f64 {
        (self.speed + self.stamina + self.intelligence + self.vision / 30.0) / 4.0
    }
}
