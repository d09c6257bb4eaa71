use crate::config::AppConfig;
use crate::genetics::GeneticsLogic;
use rand::Rng;
use terrarium_data::{Animal, AnimalId, Genetics, Species, Vec3};

pub const DEFAULT_AGGRESSION: f64 = 0.2;

fn build(id: AnimalId, species: Species, position: Vec3, genetics: Genetics) -> Animal {
    let profile = species.profile();
    let mut animal = Animal {
        id,
        species,
        position,
        home: position,
        age: 0,
        energy: profile.max_energy,
        max_energy: profile.max_energy,
        hunger: 0.0,
        genetics: genetics.clone(),
        speed: 0.0,
        vision: 0.0,
        color: (0, 0, 0),
        breeding_cooldown: 0,
        is_breeding: false,
        is_herbivore: profile.is_herbivore,
        is_carnivore: profile.is_carnivore,
        is_bird: profile.is_bird,
        is_water: profile.is_water,
        infection: None,
        aggression: DEFAULT_AGGRESSION,
        generation: 0,
    };
    animal.apply_genetics(genetics);
    animal
}

/// A founder at full energy with species-baseline genetics.
pub fn create_animal_with_rng<R: Rng>(
    id: AnimalId,
    species: Species,
    position: Vec3,
    rng: &mut R,
) -> Animal {
    let genetics = Genetics::founder_with_rng(species, rng);
    build(id, species, position, genetics)
}

/// Offspring of `parent`, placed at a random horizontal offset and starting
/// at a fraction of the species' max energy.
///
/// With `genetics.double_mutation` the stored genome is derived from the
/// parent a second time after the phenotype (speed, vision, color) has been
/// fixed by the first derivation. The second genome is what gets passed on.
pub fn create_offspring_with_rng<R: Rng>(
    parent: &Animal,
    id: AnimalId,
    config: &AppConfig,
    rng: &mut R,
) -> Animal {
    let spread = config.breeding.offspring_offset;
    let offset = Vec3::new(rng.gen_range(-spread..=spread), 0.0, rng.gen_range(-spread..=spread));

    let genetics = parent.genetics.inherit_with_rng(&config.genetics, rng);
    let mut child = build(id, parent.species, parent.position + offset, genetics);
    child.energy = child.max_energy * config.metabolism.offspring_energy_fraction;
    child.generation = parent.generation + 1;

    if config.genetics.double_mutation {
        child.genetics = parent.genetics.inherit_with_rng(&config.genetics, rng);
    }
    child
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_founder_flags_and_energy() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let duck = create_animal_with_rng(AnimalId(1), Species::Duck, Vec3::ZERO, &mut rng);
        assert!(duck.is_herbivore && duck.is_bird && duck.is_water);
        assert!(!duck.is_carnivore);
        assert_eq!(duck.energy, 70.0);
        assert_eq!(duck.max_energy, 70.0);
        assert_eq!(duck.aggression, 0.2);
        assert_eq!(duck.speed, duck.genetics.speed);
        assert_eq!(duck.home, Vec3::ZERO);
    }

    #[test]
    fn test_offspring_energy_and_offset() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let config = AppConfig::default();
        let parent = create_animal_with_rng(
            AnimalId(1),
            Species::Deer,
            Vec3::new(10.0, 5.0, -10.0),
            &mut rng,
        );
        let child = create_offspring_with_rng(&parent, AnimalId(2), &config, &mut rng);
        assert_eq!(child.species, Species::Deer);
        assert_eq!(child.energy, 150.0 * 0.7);
        assert_eq!(child.generation, 1);
        assert_eq!(child.position.y, 5.0);
        assert!((child.position.x - 10.0).abs() <= 5.0);
        assert!((child.position.z + 10.0).abs() <= 5.0);
    }

    #[test]
    fn test_single_mutation_keeps_phenotype_in_sync() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let mut config = AppConfig::default();
        config.genetics.double_mutation = false;
        let parent = create_animal_with_rng(AnimalId(1), Species::Fox, Vec3::ZERO, &mut rng);
        let child = create_offspring_with_rng(&parent, AnimalId(2), &config, &mut rng);
        assert_eq!(child.speed, child.genetics.speed);
        assert_eq!(child.vision, child.genetics.vision);
    }
}
