/// Asserts that the animal with the given ID has more than the given energy.
#[macro_export]
macro_rules! assert_energy_above {
    ($eco:expr, $id:expr, $min_energy:expr) => {
        let animal = $eco.animal($id).expect("Animal not found in ecosystem");
        assert!(
            animal.energy > $min_energy,
            "Animal {} energy {} is not above {}",
            $id,
            animal.energy,
            $min_energy
        );
    };
}

/// Asserts that the animal with the given ID is no longer in the population.
#[macro_export]
macro_rules! assert_animal_gone {
    ($eco:expr, $id:expr) => {
        assert!(
            $eco.animal($id).is_none(),
            "Animal {} should be gone but was found alive",
            $id
        );
    };
}

/// Asserts that the total population matches the expected value.
#[macro_export]
macro_rules! assert_population {
    ($eco:expr, $count:expr) => {
        assert_eq!($eco.total_population(), $count, "Population count mismatch");
    };
}
