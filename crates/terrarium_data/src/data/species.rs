use serde::{Deserialize, Serialize};

/// Every kind of animal that can live on the planet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Species {
    Rabbit,
    Deer,
    Mouse,
    Wolf,
    Fox,
    Bird,
    Eagle,
    Duck,
    Fish,
    Turtle,
}

/// Static per-species constants. Flags are looked up once when an animal is
/// born and copied onto it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeciesProfile {
    pub color: (u8, u8, u8),
    pub speed: f64,
    pub max_energy: f64,
    pub vision: f64,
    pub is_herbivore: bool,
    pub is_carnivore: bool,
    pub is_bird: bool,
    pub is_water: bool,
}

const fn profile(
    color: (u8, u8, u8),
    speed: f64,
    max_energy: f64,
    vision: f64,
    flags: [bool; 4],
) -> SpeciesProfile {
    SpeciesProfile {
        color,
        speed,
        max_energy,
        vision,
        is_herbivore: flags[0],
        is_carnivore: flags[1],
        is_bird: flags[2],
        is_water: flags[3],
    }
}

//                                                              herb   carn   bird   water
const RABBIT: SpeciesProfile = profile((200, 200, 200), 0.8, 100.0, 25.0, [true, false, false, false]);
const DEER: SpeciesProfile = profile((139, 69, 19), 1.0, 150.0, 40.0, [true, false, false, false]);
const MOUSE: SpeciesProfile = profile((100, 100, 100), 0.6, 50.0, 15.0, [true, false, false, false]);
const WOLF: SpeciesProfile = profile((200, 50, 50), 1.2, 200.0, 50.0, [false, true, false, false]);
const FOX: SpeciesProfile = profile((255, 165, 0), 1.1, 180.0, 45.0, [false, true, false, false]);
const BIRD: SpeciesProfile = profile((255, 200, 0), 1.5, 60.0, 60.0, [false, false, true, false]);
const EAGLE: SpeciesProfile = profile((139, 69, 19), 2.0, 120.0, 80.0, [false, true, true, false]);
const DUCK: SpeciesProfile = profile((0, 100, 150), 1.3, 70.0, 35.0, [true, false, true, true]);
const FISH: SpeciesProfile = profile((255, 100, 0), 0.9, 40.0, 20.0, [false, false, false, true]);
const TURTLE: SpeciesProfile = profile((100, 100, 0), 0.4, 80.0, 20.0, [true, false, false, true]);

impl Species {
    pub const ALL: [Species; 10] = [
        Species::Rabbit,
        Species::Deer,
        Species::Mouse,
        Species::Wolf,
        Species::Fox,
        Species::Bird,
        Species::Eagle,
        Species::Duck,
        Species::Fish,
        Species::Turtle,
    ];

    #[must_use]
    pub fn profile(&self) -> &'static SpeciesProfile {
        match self {
            Species::Rabbit => &RABBIT,
            Species::Deer => &DEER,
            Species::Mouse => &MOUSE,
            Species::Wolf => &WOLF,
            Species::Fox => &FOX,
            Species::Bird => &BIRD,
            Species::Eagle => &EAGLE,
            Species::Duck => &DUCK,
            Species::Fish => &FISH,
            Species::Turtle => &TURTLE,
        }
    }

    /// Species this one hunts. Carnivores take small ground animals and ducks
    /// (eagles also take birds); aquatic non-carnivores take fish and ducks.
    #[must_use]
    pub fn prey(&self) -> &'static [Species] {
        let p = self.profile();
        if p.is_carnivore {
            if *self == Species::Eagle {
                &[Species::Rabbit, Species::Mouse, Species::Duck, Species::Bird]
            } else {
                &[Species::Rabbit, Species::Mouse, Species::Duck]
            }
        } else if p.is_water {
            &[Species::Fish, Species::Duck]
        } else {
            &[]
        }
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Species::Rabbit => "rabbit",
            Species::Deer => "deer",
            Species::Mouse => "mouse",
            Species::Wolf => "wolf",
            Species::Fox => "fox",
            Species::Bird => "bird",
            Species::Eagle => "eagle",
            Species::Duck => "duck",
            Species::Fish => "fish",
            Species::Turtle => "turtle",
        }
    }
}

impl std::fmt::Display for Species {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
