//! Per-tick animal behavior.
//!
//! An animal reads the terrain and its peers, mutates itself and possibly
//! the terrain, and reports what happened to the population as a [`Step`].
//! Removing eaten prey and materializing offspring is left to the caller,
//! which owns the population list.

use crate::config::{AppConfig, WorldConfig};
use crate::planet::Planet;
use rand::Rng;
use terrarium_data::{Animal, AnimalId, BlockKind, BlockPos, Species, Vec3};

/// Every other live animal, seen from one animal being updated.
#[derive(Debug, Clone, Copy, Default)]
pub struct Neighbors<'a> {
    before: &'a [Animal],
    after: &'a [Animal],
}

impl<'a> Neighbors<'a> {
    /// Splits the population into the animal at `index` and everyone else,
    /// preserving population order for the others.
    pub fn split(
        population: &'a mut [Animal],
        index: usize,
    ) -> Option<(&'a mut Animal, Neighbors<'a>)> {
        if index >= population.len() {
            return None;
        }
        let (before, rest) = population.split_at_mut(index);
        let (animal, after) = rest.split_first_mut()?;
        Some((animal, Neighbors { before, after }))
    }

    #[must_use]
    pub fn from_slice(others: &'a [Animal]) -> Self {
        Self {
            before: others,
            after: &[],
        }
    }

    pub fn iter(self) -> impl Iterator<Item = &'a Animal> {
        self.before.iter().chain(self.after.iter())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.before.len() + self.after.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Something an animal ate this tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Meal {
    Grazed { pos: BlockPos, kind: BlockKind },
    Prey { id: AnimalId, species: Species },
}

/// Outcome of one animal's update.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Step {
    pub meal: Option<Meal>,
    /// The animal paid the breeding cost and one offspring is owed.
    pub bred: bool,
}

impl Step {
    /// Id of an animal eaten during this step, to be removed by the caller.
    #[must_use]
    pub fn eaten(&self) -> Option<AnimalId> {
        match self.meal {
            Some(Meal::Prey { id, .. }) => Some(id),
            _ => None,
        }
    }
}

/// Runs the full per-tick update for one animal.
pub fn update_with_rng<R: Rng>(
    animal: &mut Animal,
    neighbors: Neighbors<'_>,
    planet: &mut Planet,
    config: &AppConfig,
    rng: &mut R,
) -> Step {
    let metabolism = &config.metabolism;
    animal.age += 1;

    animal.hunger = hunger_level(animal);
    if animal.hunger > metabolism.critical_hunger {
        animal.energy -= metabolism.starvation_damage * animal.energy;
    }
    animal.energy -= animal.speed * metabolism.move_cost;
    animal.breeding_cooldown = animal.breeding_cooldown.saturating_sub(1);

    constrain_to_ground(animal, planet);

    let meal = match find_target(animal, neighbors, planet) {
        Some(target) => {
            move_towards(animal, target);
            eat(animal, neighbors, planet, target, config)
        }
        None => {
            random_walk(animal, &config.world, rng);
            None
        }
    };

    let bred = try_breed(animal, config);
    Step { meal, bred }
}

/// 0 when full, 1 when starving.
#[must_use]
pub fn hunger_level(animal: &Animal) -> f64 {
    (1.0 - animal.energy / animal.max_energy).clamp(0.0, 1.0)
}

/// Snaps the animal onto the column beneath it. Water species float above
/// the highest water block; one that finds none loses its aquatic habit for
/// good and falls back to standing on the ground.
pub fn constrain_to_ground(animal: &mut Animal, planet: &mut Planet) {
    let x = animal.position.x as i32;
    let z = animal.position.z as i32;
    let top = planet.world_height() - 1;

    if animal.is_water {
        for y in (0..=top).rev() {
            if planet.block_at(x, y, z) == BlockKind::Water {
                animal.position.y = f64::from(y + 1);
                return;
            }
        }
        animal.is_water = false;
    }

    for y in (0..=top).rev() {
        let block = planet.block_at(x, y, z);
        if block != BlockKind::Air && block != BlockKind::Water {
            animal.position.y = f64::from(y + 1);
            return;
        }
    }
    animal.position.y = 1.0;
}

/// Nearest food within vision: edible blocks for herbivores, prey animals
/// for carnivores and aquatic hunters.
#[must_use]
pub fn find_target(animal: &Animal, neighbors: Neighbors<'_>, planet: &Planet) -> Option<Vec3> {
    let mut best: Option<(f64, Vec3)> = None;
    let mut consider = |candidate: Vec3| {
        let distance = animal.position.distance_to(candidate);
        if best.map_or(true, |(d, _)| distance < d) {
            best = Some((distance, candidate));
        }
    };

    if animal.is_herbivore {
        for (pos, kind) in planet.nearby_blocks(animal.position, animal.vision) {
            if kind.is_edible() {
                consider(pos.to_vec3());
            }
        }
    } else if animal.is_carnivore || animal.is_water {
        let prey = animal.species.prey();
        for other in neighbors.iter() {
            if prey.contains(&other.species)
                && animal.position.distance_to(other.position) < animal.vision
            {
                consider(other.position);
            }
        }
    }
    best.map(|(_, target)| target)
}

pub fn move_towards(animal: &mut Animal, target: Vec3) {
    let direction = (target - animal.position).normalize();
    animal.position += direction * animal.speed;
}

/// A random step with a small vertical wobble, clamped to the world box.
pub fn random_walk<R: Rng>(animal: &mut Animal, world: &WorldConfig, rng: &mut R) {
    let wobble = if animal.is_bird { 0.5 } else { 0.3 };
    let direction = Vec3::new(
        rng.gen_range(-1.0..=1.0),
        rng.gen_range(-wobble..=wobble),
        rng.gen_range(-1.0..=1.0),
    )
    .normalize();
    animal.position += direction * animal.speed;

    let bound = world.roam_bound;
    animal.position.x = animal.position.x.clamp(-bound, bound);
    animal.position.y = animal.position.y.clamp(0.0, world.max_altitude);
    animal.position.z = animal.position.z.clamp(-bound, bound);
}

/// Herbivores graze the target block once within eat range of it; hunters
/// take the first prey in population order within reach (not necessarily
/// the nearest).
pub fn eat(
    animal: &mut Animal,
    neighbors: Neighbors<'_>,
    planet: &mut Planet,
    target: Vec3,
    config: &AppConfig,
) -> Option<Meal> {
    if animal.is_herbivore {
        if animal.position.distance_to(target) >= config.metabolism.eat_range {
            return None;
        }
        let (x, y, z) = (target.x as i32, target.y as i32, target.z as i32);
        let kind = planet.block_at(x, y, z);
        if !kind.is_edible() {
            return None;
        }
        planet.set_block_at(x, y, z, kind.grazed());
        animal.energy += config.metabolism.food_energy;
        return Some(Meal::Grazed {
            pos: BlockPos::new(x, y, z),
            kind,
        });
    }

    let prey = animal.species.prey();
    let victim = neighbors.iter().find(|other| {
        prey.contains(&other.species)
            && animal.position.distance_to(other.position) < config.metabolism.eat_range
    })?;
    animal.energy += victim.max_energy;
    Some(Meal::Prey {
        id: victim.id,
        species: victim.species,
    })
}

#[must_use]
pub fn can_breed(animal: &Animal, config: &AppConfig) -> bool {
    animal.energy > animal.max_energy * config.breeding.energy_threshold
        && animal.age > config.breeding.age_min
        && animal.breeding_cooldown == 0
}

/// Pays the breeding cost when eligible. Returns whether an offspring is owed.
pub fn try_breed(animal: &mut Animal, config: &AppConfig) -> bool {
    if !can_breed(animal, config) {
        animal.is_breeding = false;
        return false;
    }
    animal.energy -= animal.max_energy * config.breeding.energy_cost;
    animal.breeding_cooldown = config.breeding.cooldown;
    animal.is_breeding = true;
    true
}
