use crate::model::animal::{self, Neighbors};
use crate::model::ecosystem::{Ecosystem, TickReport};
use crate::model::lifecycle;
use rand::Rng;
use std::time::Instant;
use terrarium_core::metrics;
use terrarium_data::{Animal, BlockKind, ChunkCoord};

impl Ecosystem {
    /// Advances the simulation by one tick.
    ///
    /// Order within a tick:
    /// - weather and time of day
    /// - terrain maintenance and plant growth on their schedules
    /// - every animal, in population order, with offspring held aside
    /// - offspring join the population (up to the cap)
    /// - disease spread, disease deaths, then culling of the dead
    /// - chunk generation under every survivor on its schedule
    pub fn update(&mut self) -> TickReport {
        let started = Instant::now();
        let mut report = TickReport::default();
        self.frame += 1;
        let schedule = self.config.schedule.clone();

        self.weather.update(&mut self.rng);

        if self.frame % schedule.maintenance_interval == 0 {
            let regrown = self.planet.maintenance(&mut self.rng);
            if regrown > 0 {
                tracing::trace!(regrown, "Terrain maintenance");
            }
        }

        if self.frame % schedule.plant_growth_interval == 0 {
            self.grow_plants();
        }

        let offspring = self.update_animals(&mut report);
        self.admit_offspring(offspring, &mut report);

        let health = self.health.update(&mut self.animals, &mut self.rng);
        report.new_infections = health.new_infections;
        report.disease_deaths = health.deaths.len();
        if !health.deaths.is_empty() {
            self.animals.retain(|a| !health.deaths.contains(&a.id));
        }

        let max_age = self.config.metabolism.max_age;
        let mut culled = Vec::new();
        self.animals.retain(|a| {
            let alive = a.is_alive(max_age);
            if !alive {
                culled.push(a.id);
            }
            alive
        });
        report.natural_deaths = culled.len();
        for id in culled {
            self.health.forget(id);
        }
        if report.disease_deaths + report.natural_deaths + report.predations > 0 {
            self.prune_packs();
        }

        if self.frame % schedule.chunk_expansion_interval == 0 {
            self.expand_terrain();
        }

        self.metrics.add(metrics::BIRTHS, report.births as u64);
        self.metrics.add(metrics::PREDATIONS, report.predations as u64);
        self.metrics.add(metrics::NATURAL_DEATHS, report.natural_deaths as u64);
        self.metrics
            .add(metrics::DISEASE_DEATHS, report.disease_deaths as u64);
        self.metrics
            .add(metrics::INFECTIONS, report.new_infections as u64);
        self.metrics
            .add(metrics::OFFSPRING_DISCARDED, report.discarded_offspring as u64);
        self.metrics.record_tick(
            started.elapsed(),
            self.animals.len(),
            self.planet.block_count(),
        );
        report
    }

    /// Runs every animal once. Prey eaten mid-pass leaves the population
    /// immediately; the cursor is adjusted so nobody is skipped or updated
    /// twice.
    fn update_animals(&mut self, report: &mut TickReport) -> Vec<Animal> {
        let mut offspring = Vec::new();
        let mut index = 0;
        while index < self.animals.len() {
            let Some((animal, neighbors)) = Neighbors::split(&mut self.animals, index) else {
                break;
            };
            let step = animal::update_with_rng(
                animal,
                neighbors,
                &mut self.planet,
                &self.config,
                &mut self.rng,
            );

            if step.bred {
                let id = terrarium_data::AnimalId(self.next_id);
                self.next_id += 1;
                offspring.push(lifecycle::create_offspring_with_rng(
                    animal,
                    id,
                    &self.config,
                    &mut self.rng,
                ));
            }

            let mut next = index + 1;
            if let Some(eaten) = step.eaten() {
                if let Some(position) = self.animals.iter().position(|a| a.id == eaten) {
                    let prey = self.animals.remove(position);
                    self.health.forget(prey.id);
                    report.predations += 1;
                    tracing::debug!(prey = %prey.id, species = %prey.species, "Prey eaten");
                    if position < index {
                        next = index;
                    }
                }
            }
            index = next;
        }
        offspring
    }

    /// Appends newborns, discarding any beyond the population cap.
    fn admit_offspring(&mut self, offspring: Vec<Animal>, report: &mut TickReport) {
        let room = self
            .config
            .world
            .max_population
            .saturating_sub(self.animals.len());
        let total = offspring.len();
        self.animals.extend(offspring.into_iter().take(room));
        report.births = total.min(room);
        report.discarded_offspring = total - report.births;
        if report.discarded_offspring > 0 {
            tracing::debug!(
                discarded = report.discarded_offspring,
                cap = self.config.world.max_population,
                "Offspring discarded at population cap"
            );
        }
    }

    /// Sprouts grass on exposed dirt in a few random columns.
    fn grow_plants(&mut self) {
        let schedule = &self.config.schedule;
        let extent = schedule.plant_growth_extent;
        let ceiling = self.planet.world_height() - 1;
        for _ in 0..schedule.plant_growth_samples {
            let x = self.rng.gen_range(-extent..=extent);
            let z = self.rng.gen_range(-extent..=extent);
            for y in 1..=ceiling {
                if self.planet.block_at(x, y, z) == BlockKind::Dirt
                    && y < ceiling
                    && self.planet.block_at(x, y + 1, z) == BlockKind::Air
                    && self.rng.gen::<f64>() < schedule.plant_growth_chance
                {
                    self.planet.set_block_at(x, y + 1, z, BlockKind::Grass);
                }
            }
        }
    }

    /// Makes sure the chunk under every animal exists.
    fn expand_terrain(&mut self) {
        let before = self.planet.chunk_count();
        for animal in &self.animals {
            let chunk = ChunkCoord::from_block(
                animal.position.x.floor() as i32,
                animal.position.z.floor() as i32,
            );
            self.planet.generate_chunk(chunk);
        }
        let generated = self.planet.chunk_count() - before;
        if generated > 0 {
            tracing::debug!(generated, "Terrain expanded");
        }
    }
}
