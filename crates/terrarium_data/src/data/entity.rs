use super::genotype::Genetics;
use super::species::Species;
use super::vector::Vec3;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier of an animal. Issued monotonically by the ecosystem and
/// never reused within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AnimalId(pub u64);

impl std::fmt::Display for AnimalId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Disease state carried by an infected animal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Infection {
    pub disease_id: Uuid,
    /// Ticks left until recovery.
    pub timer: i64,
    pub severity: f64,
}

/// A single creature in the ecosystem.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Animal {
    pub id: AnimalId,
    pub species: Species,
    pub position: Vec3,
    pub home: Vec3,
    pub age: u32,
    pub energy: f64,
    pub max_energy: f64,
    /// Derived each tick from energy; 0 = full, 1 = starving.
    pub hunger: f64,
    pub genetics: Genetics,
    pub speed: f64,
    pub vision: f64,
    pub color: (u8, u8, u8),
    pub breeding_cooldown: u32,
    pub is_breeding: bool,
    pub is_herbivore: bool,
    pub is_carnivore: bool,
    pub is_bird: bool,
    /// Cleared for good the first time no water is found below the animal.
    pub is_water: bool,
    pub infection: Option<Infection>,
    pub aggression: f64,
    pub generation: u32,
}

impl Animal {
    /// Copies the genetics-derived fields onto the animal.
    pub fn apply_genetics(&mut self, genetics: Genetics) {
        self.speed = genetics.speed;
        self.vision = genetics.vision;
        self.color = genetics.color;
        self.genetics = genetics;
    }

    #[must_use]
    pub fn energy_fraction(&self) -> f64 {
        (self.energy / self.max_energy.max(1.0)).clamp(0.0, 1.0)
    }

    #[must_use]
    pub fn is_alive(&self, max_age: u32) -> bool {
        self.energy > 0.0 && self.age < max_age
    }

    #[must_use]
    pub fn is_infected(&self) -> bool {
        self.infection.is_some()
    }
}

/// Read-only view of an animal for renderers and HUDs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnimalView {
    pub id: AnimalId,
    pub species: Species,
    pub position: Vec3,
    pub color: (u8, u8, u8),
    pub energy_fraction: f64,
    pub is_breeding: bool,
    pub infected: bool,
}

impl From<&Animal> for AnimalView {
    fn from(animal: &Animal) -> Self {
        Self {
            id: animal.id,
            species: animal.species,
            position: animal.position,
            color: animal.color,
            energy_fraction: animal.energy_fraction(),
            is_breeding: animal.is_breeding,
            infected: animal.is_infected(),
        }
    }
}
