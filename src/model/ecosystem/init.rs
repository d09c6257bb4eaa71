use crate::model::config::AppConfig;
use crate::model::ecosystem::Ecosystem;
use crate::model::health::HealthSystem;
use crate::model::lifecycle;
use crate::model::planet::Planet;
use crate::model::weather::WeatherSystem;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use terrarium_core::Metrics;
use terrarium_data::{AnimalId, Species, Vec3};

fn seeded_rng(config: &AppConfig) -> ChaCha8Rng {
    match config.world.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    }
}

impl Ecosystem {
    /// Builds the world: terrain around the origin, the central lake and the
    /// founding population.
    pub fn new(config: AppConfig) -> anyhow::Result<Self> {
        config.validate()?;
        let mut ecosystem = Self {
            planet: Planet::from_config(&config),
            animals: Vec::new(),
            frame: 0,
            weather: WeatherSystem::new(config.weather.clone()),
            health: HealthSystem::new(config.disease.clone()),
            packs: Vec::new(),
            rng: seeded_rng(&config),
            metrics: Metrics::new(),
            config,
            next_id: 0,
        };
        ecosystem.spawn_founders();
        tracing::info!(
            population = ecosystem.animals.len(),
            blocks = ecosystem.planet.block_count(),
            chunks = ecosystem.planet.chunk_count(),
            fingerprint = %ecosystem.config.fingerprint(),
            "Ecosystem created"
        );
        Ok(ecosystem)
    }

    /// Rebuilds terrain and population from the current config. Animal ids
    /// keep counting up across resets.
    pub fn reset(&mut self) {
        self.planet = Planet::from_config(&self.config);
        self.animals.clear();
        self.frame = 0;
        self.weather = WeatherSystem::new(self.config.weather.clone());
        self.health = HealthSystem::new(self.config.disease.clone());
        self.packs.clear();
        self.rng = seeded_rng(&self.config);
        self.metrics.reset();
        self.spawn_founders();
        self.metrics.log_event("reset", &format!("population={}", self.animals.len()));
    }

    fn spawn_founders(&mut self) {
        let radius = self.config.world.spawn_radius;
        let height = self.config.world.spawn_height;
        let groups = self.config.world.initial_animals.clone();
        for group in groups {
            for _ in 0..group.count {
                let position = Vec3::new(
                    self.rng.gen_range(-radius..=radius),
                    height,
                    self.rng.gen_range(-radius..=radius),
                );
                self.spawn(group.species, position);
            }
        }
    }

    /// Adds a founder at `position`. Returns `None` once the population cap
    /// is reached.
    pub fn spawn(&mut self, species: Species, position: Vec3) -> Option<AnimalId> {
        if self.animals.len() >= self.config.world.max_population {
            tracing::debug!(%species, "Spawn rejected: population cap reached");
            return None;
        }
        let id = self.allocate_id();
        let animal = lifecycle::create_animal_with_rng(id, species, position, &mut self.rng);
        self.animals.push(animal);
        Some(id)
    }

    /// Infects a random uninfected animal with a fresh disease. Returns
    /// patient zero, or `None` when every live animal is already sick.
    pub fn trigger_outbreak(&mut self) -> Option<AnimalId> {
        let healthy: Vec<usize> = self
            .animals
            .iter()
            .enumerate()
            .filter(|(_, a)| !a.is_infected())
            .map(|(i, _)| i)
            .collect();
        if healthy.is_empty() {
            tracing::debug!("No uninfected animal to start an outbreak");
            return None;
        }
        let index = healthy[self.rng.gen_range(0..healthy.len())];
        let patient_zero = &mut self.animals[index];
        self.health.create_outbreak(patient_zero, &mut self.rng);
        self.metrics
            .increment_counter(terrarium_core::metrics::INFECTIONS);
        Some(patient_zero.id)
    }
}
