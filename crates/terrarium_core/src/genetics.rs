use crate::config::GeneticsConfig;
use rand::Rng;
use terrarium_data::{Genetics, Species};

pub trait GeneticsLogic {
    fn founder_with_rng<R: Rng>(species: Species, rng: &mut R) -> Self;
    fn inherit_with_rng<R: Rng>(&self, config: &GeneticsConfig, rng: &mut R) -> Self;
    fn mutate_color_with_rng<R: Rng>(
        color: (u8, u8, u8),
        config: &GeneticsConfig,
        rng: &mut R,
    ) -> (u8, u8, u8);
    fn distance(&self, other: &Self) -> f64;
}

impl GeneticsLogic for Genetics {
    /// Species baseline with stamina and intelligence drawn around 1.0.
    fn founder_with_rng<R: Rng>(species: Species, rng: &mut R) -> Self {
        let profile = species.profile();
        let mut genetics = Genetics {
            speed: profile.speed,
            color: profile.color,
            vision: profile.vision,
            stamina: rng.gen_range(0.8..=1.2),
            intelligence: rng.gen_range(0.8..=1.2),
        };
        genetics.clamp();
        genetics
    }

    /// Each continuous trait is scaled by `U[1 - v, 1 + v]`; color mutates
    /// occasionally. The result is clamped to the legal ranges.
    fn inherit_with_rng<R: Rng>(&self, config: &GeneticsConfig, rng: &mut R) -> Self {
        let low = 1.0 - config.variation;
        let high = 1.0 + config.variation;
        let speed = self.speed * rng.gen_range(low..=high);
        let color = Self::mutate_color_with_rng(self.color, config, rng);
        let vision = self.vision * rng.gen_range(low..=high);
        let stamina = self.stamina * rng.gen_range(low..=high);
        let intelligence = self.intelligence * rng.gen_range(low..=high);
        let mut child = Genetics {
            speed,
            color,
            vision,
            stamina,
            intelligence,
        };
        child.clamp();
        child
    }

    fn mutate_color_with_rng<R: Rng>(
        color: (u8, u8, u8),
        config: &GeneticsConfig,
        rng: &mut R,
    ) -> (u8, u8, u8) {
        if rng.gen::<f64>() >= config.color_mutation_chance {
            return color;
        }
        let jitter = config.color_jitter;
        let mut channel =
            |c: u8| (i32::from(c) + rng.gen_range(-jitter..=jitter)).clamp(0, 255) as u8;
        let r = channel(color.0);
        let g = channel(color.1);
        let b = channel(color.2);
        (r, g, b)
    }

    /// Normalized trait distance, used by the stats readout.
    fn distance(&self, other: &Self) -> f64 {
        let span = |range: (f64, f64)| range.1 - range.0;
        let d_speed = (self.speed - other.speed).abs() / span(Genetics::SPEED_RANGE);
        let d_vision = (self.vision - other.vision).abs() / span(Genetics::VISION_RANGE);
        let d_stamina = (self.stamina - other.stamina).abs() / span(Genetics::STAMINA_RANGE);
        let d_intel =
            (self.intelligence - other.intelligence).abs() / span(Genetics::INTELLIGENCE_RANGE);
        (d_speed + d_vision + d_stamina + d_intel) / 4.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    prop_compose! {
        fn arb_genetics()(
            speed in 0.3f64..2.0,
            vision in 10.0f64..100.0,
            stamina in 0.3f64..2.0,
            intelligence in 0.5f64..2.0,
            r in any::<u8>(),
            g in any::<u8>(),
            b in any::<u8>(),
        ) -> Genetics {
            Genetics { speed, color: (r, g, b), vision, stamina, intelligence }
        }
    }

    #[test]
    fn test_founder_uses_species_baseline() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let g = Genetics::founder_with_rng(Species::Wolf, &mut rng);
        assert_eq!(g.speed, 1.2);
        assert_eq!(g.vision, 50.0);
        assert_eq!(g.color, (200, 50, 50));
        assert!((0.8..=1.2).contains(&g.stamina));
        assert!((0.8..=1.2).contains(&g.intelligence));
    }

    #[test]
    fn test_color_never_mutates_at_zero_chance() {
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let config = GeneticsConfig {
            color_mutation_chance: 0.0,
            ..Default::default()
        };
        for _ in 0..100 {
            assert_eq!(
                Genetics::mutate_color_with_rng((10, 250, 128), &config, &mut rng),
                (10, 250, 128)
            );
        }
    }

    #[test]
    fn test_distance_to_self_is_zero() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let g = Genetics::founder_with_rng(Species::Deer, &mut rng);
        assert_eq!(g.distance(&g), 0.0);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]
        #[test]
        fn prop_inheritance_stays_in_bounds(parent in arb_genetics(), seed in any::<u64>()) {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let config = GeneticsConfig { color_mutation_chance: 1.0, ..Default::default() };
            let child = parent.inherit_with_rng(&config, &mut rng);
            prop_assert!((0.3..=2.0).contains(&child.speed));
            prop_assert!((10.0..=100.0).contains(&child.vision));
            prop_assert!((0.3..=2.0).contains(&child.stamina));
            prop_assert!((0.5..=2.0).contains(&child.intelligence));
            prop_assert!((i32::from(child.color.0) - i32::from(parent.color.0)).abs() <= 20);
        }

        #[test]
        fn prop_inheritance_variation_is_bounded(parent in arb_genetics(), seed in any::<u64>()) {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let child = parent.inherit_with_rng(&GeneticsConfig::default(), &mut rng);
            let ratio = child.speed / parent.speed;
            let clamped = child.speed == 0.3 || child.speed == 2.0;
            prop_assert!(clamped || (0.8 - 1e-9..=1.2 + 1e-9).contains(&ratio));
        }
    }
}
