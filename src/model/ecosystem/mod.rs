use crate::model::config::AppConfig;
use crate::model::health::HealthSystem;
use crate::model::pack::{self, Pack};
use crate::model::planet::Planet;
use crate::model::weather::WeatherSystem;
use rand_chacha::ChaCha8Rng;
use std::collections::BTreeMap;
use terrarium_core::genetics::GeneticsLogic;
use terrarium_core::Metrics;
use terrarium_data::{
    Animal, AnimalId, AnimalView, PopulationStats, Species, SurfaceBlock, Vec3, WeatherReport,
};

pub mod init;
pub mod update;

/// What happened during one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    pub births: usize,
    pub predations: usize,
    /// Energy exhausted or old age.
    pub natural_deaths: usize,
    pub disease_deaths: usize,
    /// Infections passed on by contact, not counting outbreak seeds.
    pub new_infections: usize,
    pub discarded_offspring: usize,
}

/// Owns the planet and the population and drives the simulation tick.
pub struct Ecosystem {
    pub planet: Planet,
    /// Live animals in update order.
    pub animals: Vec<Animal>,
    pub frame: u64,
    pub weather: WeatherSystem,
    pub health: HealthSystem,
    pub packs: Vec<Pack>,
    pub config: AppConfig,
    pub rng: ChaCha8Rng,
    pub metrics: Metrics,
    next_id: u64,
}

impl Ecosystem {
    #[must_use]
    pub fn total_population(&self) -> usize {
        self.animals.len()
    }

    #[must_use]
    pub fn elapsed_seconds(&self) -> u64 {
        self.frame / self.config.schedule.ticks_per_second
    }

    #[must_use]
    pub fn animal(&self, id: AnimalId) -> Option<&Animal> {
        self.animals.iter().find(|a| a.id == id)
    }

    #[must_use]
    pub fn animal_counts(&self) -> BTreeMap<Species, usize> {
        let mut counts = BTreeMap::new();
        for animal in &self.animals {
            *counts.entry(animal.species).or_insert(0) += 1;
        }
        counts
    }

    #[must_use]
    pub fn breeding_count(&self) -> usize {
        self.animals.iter().filter(|a| a.is_breeding).count()
    }

    #[must_use]
    pub fn infected_count(&self) -> usize {
        self.animals.iter().filter(|a| a.is_infected()).count()
    }

    #[must_use]
    pub fn animal_views(&self) -> Vec<AnimalView> {
        self.animals.iter().map(AnimalView::from).collect()
    }

    /// Surface blocks the renderer should draw from `camera`.
    #[must_use]
    pub fn surface_view(&self, camera: Vec3) -> Vec<SurfaceBlock> {
        self.planet
            .visible_blocks(camera, self.config.terrain.render_distance)
    }

    #[must_use]
    pub fn weather_report(&self) -> WeatherReport {
        self.weather.report()
    }

    #[must_use]
    pub fn stats(&self) -> PopulationStats {
        let population = self.animals.len();
        let (age_sum, fitness_sum) = self.animals.iter().fold((0.0, 0.0), |(age, fit), a| {
            (age + f64::from(a.age), fit + a.genetics.fitness())
        });
        let divisor = population.max(1) as f64;
        PopulationStats {
            tick: self.frame,
            population,
            per_species: self.animal_counts(),
            breeding: self.breeding_count(),
            infected: self.infected_count(),
            herbivores: self.animals.iter().filter(|a| a.is_herbivore).count(),
            carnivores: self.animals.iter().filter(|a| a.is_carnivore).count(),
            avg_age: age_sum / divisor,
            avg_fitness: fitness_sum / divisor,
        }
    }

    /// Mean pairwise genetic distance within one species.
    #[must_use]
    pub fn genetic_diversity(&self, species: Species) -> f64 {
        let members: Vec<_> = self
            .animals
            .iter()
            .filter(|a| a.species == species)
            .collect();
        let mut total = 0.0;
        let mut pairs = 0usize;
        for (i, a) in members.iter().enumerate() {
            for b in &members[i + 1..] {
                total += a.genetics.distance(&b.genetics);
                pairs += 1;
            }
        }
        if pairs == 0 {
            0.0
        } else {
            total / pairs as f64
        }
    }

    /// Starts a pack led by a carnivore not already in one.
    pub fn form_pack(&mut self, leader: AnimalId) -> bool {
        let eligible = self.animal(leader).is_some_and(|a| a.is_carnivore);
        if !eligible || self.packs.iter().any(|p| p.contains(leader)) {
            return false;
        }
        self.packs.push(Pack::new(leader));
        true
    }

    /// Joins the first pack of the animal's species found nearby.
    pub fn join_nearby_pack(&mut self, id: AnimalId) -> bool {
        let Some(animal) = self.animal(id) else {
            return false;
        };
        if self.packs.iter().any(|p| p.contains(id)) {
            return false;
        }
        let leader = pack::find_pack_nearby(
            animal,
            &self.animals,
            &self.packs,
            pack::PACK_SEARCH_RADIUS,
        )
        .map(|p| p.leader);
        match leader.and_then(|l| self.packs.iter_mut().find(|p| p.leader == l)) {
            Some(found) => found.add_member(id),
            None => false,
        }
    }

    /// Hunt multiplier of the pack `member` belongs to, 1.0 without a pack.
    #[must_use]
    pub fn pack_hunt_bonus(&self, member: AnimalId, target: Vec3) -> f64 {
        self.packs
            .iter()
            .find(|p| p.contains(member))
            .map_or(1.0, |p| p.hunt_bonus(target, &self.animals))
    }

    /// Updates an animal's aggression against rivals near its home.
    pub fn defend_territory(&mut self, id: AnimalId) -> Option<Vec3> {
        let index = self.animals.iter().position(|a| a.id == id)?;
        let mut defender = self.animals.remove(index);
        let home = defender.home;
        let result = pack::defend_territory(&mut defender, home, &self.animals);
        self.animals.insert(index, defender);
        result
    }

    fn allocate_id(&mut self) -> AnimalId {
        let id = AnimalId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Drops dead members from packs and disbands empty ones.
    fn prune_packs(&mut self) {
        let animals = &self.animals;
        for pack in &mut self.packs {
            let gone: Vec<_> = pack
                .members()
                .iter()
                .copied()
                .filter(|id| !animals.iter().any(|a| a.id == *id))
                .collect();
            for id in gone {
                pack.remove_member(id);
            }
        }
        self.packs.retain(|p| !p.members().is_empty());
    }
}
