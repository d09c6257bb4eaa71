use proptest::prelude::*;
use terrarium_lib::model::config::AppConfig;
use terrarium_lib::model::ecosystem::Ecosystem;
use terrarium_lib::model::state::{Genetics, Species};

prop_compose! {
    fn arb_config()(
        seed in any::<u64>(),
        max_population in 22usize..60,
        infection_chance in 0.0f64..=1.0,
        death_chance in 0.0f64..=0.2,
    ) -> AppConfig {
        let mut config = AppConfig::default();
        config.world.seed = Some(seed);
        config.world.max_population = max_population;
        config.disease.infection_chance = infection_chance;
        config.disease.death_chance = death_chance;
        config.breeding.age_min = 5;
        config.breeding.cooldown = 10;
        config
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn test_population_invariants_hold(config in arb_config(), ticks in 1usize..60) {
        let max_population = config.world.max_population;
        let max_age = config.metabolism.max_age;
        let mut eco = Ecosystem::new(config).unwrap();
        eco.trigger_outbreak();

        for _ in 0..ticks {
            eco.update();
            prop_assert!(eco.total_population() <= max_population);
            for animal in &eco.animals {
                prop_assert!(animal.is_alive(max_age));
                let (lo, hi) = Genetics::SPEED_RANGE;
                prop_assert!(animal.speed >= lo && animal.speed <= hi);
            }
        }

        let mut ids: Vec<_> = eco.animals.iter().map(|a| a.id).collect();
        ids.sort();
        ids.dedup();
        prop_assert_eq!(ids.len(), eco.total_population());
        prop_assert_eq!(eco.stats().population, eco.total_population());
        prop_assert_eq!(eco.health.infected_count(), eco.infected_count());
    }

    #[test]
    fn test_same_seed_same_history(seed in any::<u64>()) {
        let mut config = AppConfig::default();
        config.world.seed = Some(seed);
        let mut a = Ecosystem::new(config.clone()).unwrap();
        let mut b = Ecosystem::new(config).unwrap();
        for _ in 0..40 {
            prop_assert_eq!(a.update(), b.update());
        }
        prop_assert_eq!(a.animal_counts(), b.animal_counts());
        prop_assert_eq!(
            a.genetic_diversity(Species::Rabbit),
            b.genetic_diversity(Species::Rabbit)
        );
    }
}
