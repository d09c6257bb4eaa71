use crate::config::WeatherConfig;
use rand::seq::SliceRandom;
use rand::Rng;
use std::f64::consts::PI;
use terrarium_data::{Season, WeatherKind, WeatherReport};

/// Day-night cycle, seasons and weather. Cosmetic: nothing in the animal
/// update reads it.
#[derive(Debug, Clone)]
pub struct WeatherSystem {
    pub current: WeatherKind,
    pub weather_timer: u64,
    /// Fraction of the current day in `[0, 1)`.
    pub time_of_day: f64,
    pub season_clock: u64,
    pub temperature: f64,
    pub humidity: f64,
    config: WeatherConfig,
}

impl WeatherSystem {
    #[must_use]
    pub fn new(config: WeatherConfig) -> Self {
        Self {
            current: WeatherKind::Clear,
            weather_timer: 0,
            time_of_day: 0.0,
            season_clock: 0,
            temperature: config.base_temperature,
            humidity: 0.5,
            config,
        }
    }

    pub fn update<R: Rng>(&mut self, rng: &mut R) {
        self.time_of_day = (self.time_of_day + 1.0 / self.config.day_length as f64) % 1.0;
        self.season_clock += 1;
        self.weather_timer += 1;

        if self.weather_timer > self.config.weather_duration
            || rng.gen::<f64>() < self.config.change_chance
        {
            let previous = self.current;
            self.current = *WeatherKind::ALL.choose(rng).unwrap_or(&WeatherKind::Clear);
            self.weather_timer = 0;
            self.humidity = if self.current == WeatherKind::Clear {
                rng.gen_range(0.2..=0.6)
            } else {
                rng.gen_range(0.5..=1.0)
            };
            if previous != self.current {
                tracing::debug!(from = ?previous, to = ?self.current, "Weather changed");
            }
        }

        self.temperature = self.season().temperature()
            + self.current.temperature_offset()
            + rng.gen_range(-1.0..=1.0);
    }

    #[must_use]
    pub fn season(&self) -> Season {
        Season::from_index(self.season_clock / self.config.season_length)
    }

    /// Sun curve over the day, dimmed by rain and snow.
    #[must_use]
    pub fn brightness(&self) -> f64 {
        let night = self.config.night_brightness;
        let day = self.config.day_brightness;
        let sun = (self.time_of_day * PI).sin();
        (night + sun * (day - night)) * self.current.brightness_multiplier()
    }

    #[must_use]
    pub fn is_day(&self) -> bool {
        self.time_of_day > 0.25 && self.time_of_day < 0.75
    }

    #[must_use]
    pub fn season_color_multiplier(&self) -> (f64, f64, f64) {
        self.season().color_multiplier()
    }

    #[must_use]
    pub fn visibility(&self) -> f64 {
        self.current.visibility()
    }

    #[must_use]
    pub fn report(&self) -> WeatherReport {
        WeatherReport {
            weather: self.current,
            season: self.season(),
            temperature: self.temperature,
            humidity: self.humidity,
            brightness: self.brightness(),
            visibility: self.visibility(),
            is_day: self.is_day(),
            time_of_day: self.time_of_day,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_time_of_day_wraps() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut weather = WeatherSystem::new(WeatherConfig::default());
        for _ in 0..2500 {
            weather.update(&mut rng);
            assert!((0.0..1.0).contains(&weather.time_of_day));
        }
        assert!((weather.time_of_day - 0.25).abs() < 1e-6);
    }

    #[test]
    fn test_brightness_bounds() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let mut weather = WeatherSystem::new(WeatherConfig::default());
        for _ in 0..5000 {
            weather.update(&mut rng);
            let b = weather.brightness();
            assert!((0.21 - 1e-9..=1.0).contains(&b), "brightness {b}");
        }
    }

    #[test]
    fn test_weather_dims_brightness() {
        let mut weather = WeatherSystem::new(WeatherConfig::default());
        weather.time_of_day = 0.5;
        assert!((weather.brightness() - 1.0).abs() < 1e-12);
        weather.current = WeatherKind::Rain;
        assert!((weather.brightness() - 0.8).abs() < 1e-12);
        weather.current = WeatherKind::Snow;
        assert!((weather.brightness() - 0.7).abs() < 1e-12);
    }

    #[test]
    fn test_seasons_advance() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut weather = WeatherSystem::new(WeatherConfig {
            season_length: 10,
            ..Default::default()
        });
        assert_eq!(weather.season(), Season::Spring);
        for _ in 0..10 {
            weather.update(&mut rng);
        }
        assert_eq!(weather.season(), Season::Summer);
        for _ in 0..30 {
            weather.update(&mut rng);
        }
        assert_eq!(weather.season(), Season::Spring);
    }

    #[test]
    fn test_weather_changes_after_duration() {
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let mut weather = WeatherSystem::new(WeatherConfig {
            change_chance: 0.0,
            weather_duration: 5,
            ..Default::default()
        });
        for _ in 0..5 {
            weather.update(&mut rng);
        }
        assert_eq!(weather.weather_timer, 5);
        weather.update(&mut rng);
        assert_eq!(weather.weather_timer, 0);
    }

    #[test]
    fn test_temperature_tracks_season_and_weather() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut weather = WeatherSystem::new(WeatherConfig {
            change_chance: 0.0,
            ..Default::default()
        });
        weather.update(&mut rng);
        let base = Season::Spring.temperature() + weather.current.temperature_offset();
        assert!((weather.temperature - base).abs() <= 1.0);
    }

    #[test]
    fn test_day_flag() {
        let mut weather = WeatherSystem::new(WeatherConfig::default());
        weather.time_of_day = 0.1;
        assert!(!weather.is_day());
        weather.time_of_day = 0.5;
        assert!(weather.is_day());
        assert!(weather.report().is_day);
    }
}
