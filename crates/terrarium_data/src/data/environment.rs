use super::species::Species;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeatherKind {
    #[default]
    Clear,
    Rain,
    Snow,
}

impl WeatherKind {
    pub const ALL: [WeatherKind; 3] = [WeatherKind::Clear, WeatherKind::Rain, WeatherKind::Snow];

    #[must_use]
    pub fn icon(&self) -> &'static str {
        match self {
            WeatherKind::Clear => "☀️ Clear",
            WeatherKind::Rain => "🌧️ Rain",
            WeatherKind::Snow => "❄️ Snow",
        }
    }

    /// Temperature offset in degrees Celsius.
    #[must_use]
    pub fn temperature_offset(&self) -> f64 {
        match self {
            WeatherKind::Clear => 0.0,
            WeatherKind::Rain => -2.0,
            WeatherKind::Snow => -5.0,
        }
    }

    #[must_use]
    pub fn brightness_multiplier(&self) -> f64 {
        match self {
            WeatherKind::Clear => 1.0,
            WeatherKind::Rain => 0.8,
            WeatherKind::Snow => 0.7,
        }
    }

    #[must_use]
    pub fn visibility(&self) -> f64 {
        match self {
            WeatherKind::Clear => 1.0,
            WeatherKind::Rain => 0.8,
            WeatherKind::Snow => 0.6,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    #[default]
    Spring,
    Summer,
    Autumn,
    Winter,
}

impl Season {
    #[must_use]
    pub fn icon(&self) -> &'static str {
        match self {
            Season::Spring => "🌸 Spring",
            Season::Summer => "☀️ Summer",
            Season::Autumn => "🍂 Autumn",
            Season::Winter => "❄️ Winter",
        }
    }

    #[must_use]
    pub fn from_index(index: u64) -> Season {
        match index % 4 {
            0 => Season::Spring,
            1 => Season::Summer,
            2 => Season::Autumn,
            _ => Season::Winter,
        }
    }

    #[must_use]
    pub fn next(&self) -> Season {
        match self {
            Season::Spring => Season::Summer,
            Season::Summer => Season::Autumn,
            Season::Autumn => Season::Winter,
            Season::Winter => Season::Spring,
        }
    }

    /// Baseline temperature in degrees Celsius.
    #[must_use]
    pub fn temperature(&self) -> f64 {
        match self {
            Season::Spring => 15.0,
            Season::Summer => 25.0,
            Season::Autumn => 15.0,
            Season::Winter => 5.0,
        }
    }

    /// RGB multipliers applied to terrain colors.
    #[must_use]
    pub fn color_multiplier(&self) -> (f64, f64, f64) {
        match self {
            Season::Spring => (0.7, 1.0, 0.7),
            Season::Summer => (1.0, 1.0, 0.6),
            Season::Autumn => (1.0, 0.8, 0.4),
            Season::Winter => (0.8, 0.9, 1.0),
        }
    }
}

/// Snapshot of atmospheric state for renderers and behavior modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub weather: WeatherKind,
    pub season: Season,
    pub temperature: f64,
    pub humidity: f64,
    pub brightness: f64,
    pub visibility: f64,
    pub is_day: bool,
    pub time_of_day: f64,
}

/// Population summary produced once per tick.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PopulationStats {
    pub tick: u64,
    pub population: usize,
    pub per_species: BTreeMap<Species, usize>,
    pub breeding: usize,
    pub infected: usize,
    pub herbivores: usize,
    pub carnivores: usize,
    pub avg_age: f64,
    pub avg_fitness: f64,
}
