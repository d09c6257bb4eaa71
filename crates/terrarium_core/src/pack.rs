//! Predator packs: membership, formations, coordinated hunt bonus and
//! territorial aggression.

use std::collections::HashMap;
use terrarium_data::{Animal, AnimalId, Vec3};

pub const MAX_PACK_SIZE: usize = 5;
pub const FORMATION_DISTANCE: f64 = 20.0;
pub const HUNT_BONUS: f64 = 1.5;
pub const HUNT_RANGE: f64 = 10.0;
pub const PACK_SEARCH_RADIUS: f64 = 30.0;
pub const TERRITORY_RADIUS: f64 = 30.0;
pub const DEFENSIVE_AGGRESSION: f64 = 0.8;
pub const CALM_AGGRESSION: f64 = 0.2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Formation {
    #[default]
    Line,
    Circle,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Pack {
    pub leader: AnimalId,
    members: Vec<AnimalId>,
    pub formation: Formation,
}

impl Pack {
    #[must_use]
    pub fn new(leader: AnimalId) -> Self {
        Self {
            leader,
            members: vec![leader],
            formation: Formation::Line,
        }
    }

    /// Adds a member unless the pack is full. Returns whether it joined.
    pub fn add_member(&mut self, id: AnimalId) -> bool {
        if self.members.len() >= MAX_PACK_SIZE || self.members.contains(&id) {
            return false;
        }
        self.members.push(id);
        true
    }

    /// Removes a member; the next member in line takes over a lost leader.
    pub fn remove_member(&mut self, id: AnimalId) {
        let Some(index) = self.members.iter().position(|m| *m == id) else {
            return;
        };
        self.members.remove(index);
        if id == self.leader {
            if let Some(next) = self.members.first() {
                self.leader = *next;
            }
        }
    }

    #[must_use]
    pub fn members(&self) -> &[AnimalId] {
        &self.members
    }

    #[must_use]
    pub fn contains(&self, id: AnimalId) -> bool {
        self.members.contains(&id)
    }

    /// A pack of one is no pack.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.members.len() > 1
    }

    /// Target positions for each member relative to the leader. Empty when the
    /// leader is not in `population`.
    #[must_use]
    pub fn formation_positions(&self, population: &[Animal]) -> HashMap<AnimalId, Vec3> {
        let Some(leader) = population.iter().find(|a| a.id == self.leader) else {
            return HashMap::new();
        };
        let count = self.members.len() as f64;
        self.members
            .iter()
            .enumerate()
            .map(|(i, id)| {
                let i = i as f64;
                let offset = match self.formation {
                    Formation::Line => Vec3::new(i * 3.0 - 6.0, 0.0, i * 2.0),
                    Formation::Circle => {
                        let angle = i / count * 2.0 * std::f64::consts::PI;
                        Vec3::new(
                            angle.cos() * FORMATION_DISTANCE,
                            0.0,
                            angle.sin() * FORMATION_DISTANCE,
                        )
                    }
                };
                (*id, leader.position + offset)
            })
            .collect()
    }

    /// Damage multiplier for a coordinated hunt on `target`: grows with the
    /// number of members close to it.
    #[must_use]
    pub fn hunt_bonus(&self, target: Vec3, population: &[Animal]) -> f64 {
        if !self.is_active() {
            return 1.0;
        }
        let in_range = population
            .iter()
            .filter(|a| self.contains(a.id) && a.position.distance_to(target) < HUNT_RANGE)
            .count() as f64;
        1.0 + (in_range - 1.0) * HUNT_BONUS / self.members.len() as f64
    }
}

/// First pack holding a same-species carnivore within `radius` of `animal`.
#[must_use]
pub fn find_pack_nearby<'a>(
    animal: &Animal,
    population: &[Animal],
    packs: &'a [Pack],
    radius: f64,
) -> Option<&'a Pack> {
    population
        .iter()
        .filter(|other| {
            other.species == animal.species
                && other.is_carnivore
                && animal.position.distance_to(other.position) < radius
        })
        .find_map(|other| packs.iter().find(|p| p.contains(other.id)))
}

/// Raises aggression while a rival of the same species is inside the
/// territory. Returns the defended center when triggered.
pub fn defend_territory(animal: &mut Animal, center: Vec3, population: &[Animal]) -> Option<Vec3> {
    let intruder = population.iter().any(|other| {
        other.species == animal.species
            && other.id != animal.id
            && center.distance_to(other.position) < TERRITORY_RADIUS
    });
    if intruder {
        animal.aggression = DEFENSIVE_AGGRESSION;
        Some(center)
    } else {
        animal.aggression = CALM_AGGRESSION;
        None
    }
}
