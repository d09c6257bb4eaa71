#[macro_use]
pub mod macros;

use terrarium_lib::model::config::AppConfig;
use terrarium_lib::model::ecosystem::Ecosystem;
use terrarium_lib::model::state::{AnimalId, BlockKind, Species, Vec3};

type TerrainMod = Box<dyn FnOnce(&mut Ecosystem)>;

#[allow(dead_code)]
pub struct EcosystemBuilder {
    config: AppConfig,
    animals: Vec<AnimalBuilder>,
    terrain_mods: Vec<TerrainMod>,
}

#[allow(dead_code)]
impl EcosystemBuilder {
    /// Seeded, treeless and unpopulated.
    pub fn new() -> Self {
        let mut config = AppConfig::default();
        config.world.seed = Some(42);
        config.world.initial_animals.clear();
        config.terrain.tree_chance = 0.0;
        Self {
            config,
            animals: Vec::new(),
            terrain_mods: Vec::new(),
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.world.seed = Some(seed);
        self
    }

    pub fn with_config<F>(mut self, modifier: F) -> Self
    where
        F: FnOnce(&mut AppConfig),
    {
        modifier(&mut self.config);
        self
    }

    /// No disease spread, no mortality.
    pub fn without_disease(mut self) -> Self {
        self.config.disease.infection_chance = 0.0;
        self.config.disease.death_chance = 0.0;
        self
    }

    pub fn with_animal(mut self, animal: AnimalBuilder) -> Self {
        self.animals.push(animal);
        self
    }

    pub fn with_block(mut self, x: i32, y: i32, z: i32, kind: BlockKind) -> Self {
        self.terrain_mods.push(Box::new(move |eco| {
            eco.planet.set_block_at(x, y, z, kind);
        }));
        self
    }

    pub fn build(self) -> Ecosystem {
        let mut eco = Ecosystem::new(self.config).expect("Failed to create ecosystem in test builder");
        for modifier in self.terrain_mods {
            modifier(&mut eco);
        }
        for animal in self.animals {
            animal.spawn(&mut eco);
        }
        eco
    }
}

/// Animal placed on the ground of its column, with optional overrides.
#[allow(dead_code)]
pub struct AnimalBuilder {
    species: Species,
    x: f64,
    z: f64,
    energy: Option<f64>,
    age: u32,
}

#[allow(dead_code)]
impl AnimalBuilder {
    pub fn new(species: Species) -> Self {
        Self {
            species,
            x: 30.5,
            z: 30.5,
            energy: None,
            age: 0,
        }
    }

    pub fn at(mut self, x: f64, z: f64) -> Self {
        self.x = x;
        self.z = z;
        self
    }

    pub fn energy(mut self, amount: f64) -> Self {
        self.energy = Some(amount);
        self
    }

    pub fn age(mut self, age: u32) -> Self {
        self.age = age;
        self
    }

    pub fn spawn(self, eco: &mut Ecosystem) -> AnimalId {
        let ground = eco.planet.height_at(self.x as i32, self.z as i32) as i32;
        let position = Vec3::new(self.x, f64::from(ground + 1), self.z);
        let id = eco
            .spawn(self.species, position)
            .expect("Population cap reached in test builder");
        let animal = eco
            .animals
            .iter_mut()
            .find(|a| a.id == id)
            .expect("Spawned animal missing");
        if let Some(energy) = self.energy {
            animal.energy = energy;
        }
        animal.age = self.age;
        id
    }
}

/// Wolf with plenty of energy, old enough to breed.
#[allow(dead_code)]
pub fn breeding_wolf() -> AnimalBuilder {
    AnimalBuilder::new(Species::Wolf).energy(400.0).age(500)
}
