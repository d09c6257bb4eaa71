//! Contagious disease: outbreaks, spread between nearby animals, per-tick
//! energy drain, mortality and recovery.

use crate::config::DiseaseConfig;
use rand::Rng;
use std::collections::HashSet;
use terrarium_data::{Animal, AnimalId, Infection};
use uuid::Uuid;

/// Decides whether an infected animal dies this tick.
pub trait MortalityRoll {
    fn dies<R: Rng>(&mut self, rng: &mut R, probability: f64) -> bool;
}

/// The standard roll: dies with the given probability.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomMortality;

impl MortalityRoll for RandomMortality {
    fn dies<R: Rng>(&mut self, rng: &mut R, probability: f64) -> bool {
        rng.gen::<f64>() < probability
    }
}

#[derive(Debug, Clone)]
pub struct Disease {
    pub id: Uuid,
    pub name: String,
    /// Fixed for the lifetime of the disease.
    pub severity: f64,
    infected: HashSet<AnimalId>,
}

impl Disease {
    pub fn new_with_rng<R: Rng>(name: &str, config: &DiseaseConfig, rng: &mut R) -> Self {
        Self {
            id: Uuid::from_u128(rng.gen()),
            name: name.to_string(),
            severity: rng.gen_range(config.severity_min..=config.severity_max),
            infected: HashSet::new(),
        }
    }

    pub fn infect(&mut self, animal: &mut Animal, config: &DiseaseConfig) {
        animal.infection = Some(Infection {
            disease_id: self.id,
            timer: config.recovery_time,
            severity: self.severity,
        });
        self.infected.insert(animal.id);
    }

    #[must_use]
    pub fn is_infected(&self, id: AnimalId) -> bool {
        self.infected.contains(&id)
    }

    #[must_use]
    pub fn infected_count(&self) -> usize {
        self.infected.len()
    }

    pub fn forget(&mut self, id: AnimalId) {
        self.infected.remove(&id);
    }

    /// Every infected animal rolls once against every uninfected animal in
    /// range. Animals infected earlier in the pass spread in the same pass.
    pub fn spread<R: Rng>(
        &mut self,
        population: &mut [Animal],
        config: &DiseaseConfig,
        rng: &mut R,
    ) -> usize {
        let mut newly_infected = 0;
        for source in 0..population.len() {
            if !self.is_infected(population[source].id) {
                continue;
            }
            let origin = population[source].position;
            for other in population.iter_mut() {
                if other.is_infected() || self.is_infected(other.id) {
                    continue;
                }
                if origin.distance_to(other.position) < config.spread_radius
                    && rng.gen::<f64>() < config.infection_chance
                {
                    self.infect(other, config);
                    newly_infected += 1;
                }
            }
        }
        newly_infected
    }

    /// Advances one infected animal by a tick. Returns true if it died.
    /// Survivors whose countdown has run out recover. An animal whose
    /// infection now belongs to another disease is dropped from this one.
    pub fn update_animal<R: Rng, M: MortalityRoll>(
        &mut self,
        animal: &mut Animal,
        config: &DiseaseConfig,
        rng: &mut R,
        mortality: &mut M,
    ) -> bool {
        if !self.is_infected(animal.id) {
            return false;
        }
        let Some(infection) = animal
            .infection
            .as_mut()
            .filter(|i| i.disease_id == self.id)
        else {
            self.infected.remove(&animal.id);
            return false;
        };

        infection.timer -= 1;
        let severity = infection.severity;
        let timer = infection.timer;
        animal.energy -= animal.energy * severity * config.energy_drain;

        if mortality.dies(rng, config.death_chance * severity) {
            self.infected.remove(&animal.id);
            return true;
        }

        if timer <= 0 {
            animal.infection = None;
            self.infected.remove(&animal.id);
        }
        false
    }
}

/// What the health system did to the population in one tick.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HealthReport {
    /// Animals that died of disease, to be removed by the caller.
    pub deaths: Vec<AnimalId>,
    pub new_infections: usize,
}

#[derive(Debug, Clone, Default)]
pub struct HealthSystem {
    active: Vec<Disease>,
    config: DiseaseConfig,
}

impl HealthSystem {
    #[must_use]
    pub fn new(config: DiseaseConfig) -> Self {
        Self {
            active: Vec::new(),
            config,
        }
    }

    /// Starts a new disease with `patient_zero` as its first case.
    pub fn create_outbreak<R: Rng>(&mut self, patient_zero: &mut Animal, rng: &mut R) -> Uuid {
        let mut disease = Disease::new_with_rng("outbreak", &self.config, rng);
        disease.infect(patient_zero, &self.config);
        let id = disease.id;
        tracing::info!(
            disease = %id,
            patient_zero = %patient_zero.id,
            species = %patient_zero.species,
            severity = disease.severity,
            "Disease outbreak"
        );
        self.active.push(disease);
        id
    }

    /// Spreads and advances every active disease.
    pub fn update<R: Rng>(&mut self, population: &mut [Animal], rng: &mut R) -> HealthReport {
        self.update_with(population, rng, &mut RandomMortality)
    }

    pub fn update_with<R: Rng, M: MortalityRoll>(
        &mut self,
        population: &mut [Animal],
        rng: &mut R,
        mortality: &mut M,
    ) -> HealthReport {
        let mut report = HealthReport::default();
        for disease in &mut self.active {
            report.new_infections += disease.spread(population, &self.config, rng);
            for animal in population.iter_mut() {
                if disease.update_animal(animal, &self.config, rng, mortality) {
                    report.deaths.push(animal.id);
                }
            }
        }

        let before = self.active.len();
        self.active.retain(|d| d.infected_count() > 0);
        if self.active.len() < before {
            tracing::debug!(retired = before - self.active.len(), "Diseases died out");
        }
        report
    }

    #[must_use]
    pub fn active_diseases(&self) -> &[Disease] {
        &self.active
    }

    #[must_use]
    pub fn infected_count(&self) -> usize {
        self.active.iter().map(Disease::infected_count).sum()
    }

    /// Drops an animal that left the population for reasons other than
    /// disease, retiring diseases left without hosts.
    pub fn forget(&mut self, id: AnimalId) {
        for disease in &mut self.active {
            disease.forget(id);
        }
        self.active.retain(|d| d.infected_count() > 0);
    }

    pub fn clear(&mut self) {
        self.active.clear();
    }
}
