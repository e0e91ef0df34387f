mod common;

use common::WorldBuilder;
use glimmer_data::{Mutability, Trait};
use glimmer_lib::model::EngineError;

#[test]
fn test_only_motility_changes_when_only_motility_mutable() {
    let mut world = WorldBuilder::new()
        .with_seed(31)
        .with_population(40)
        .with_traits(0.7, -0.4, 0.2, -0.6)
        .with_mutability(Mutability::only(Trait::Motility))
        .build();

    for _ in 0..25 {
        world.regenerate_agents(1.0).unwrap();
        assert_trait_uniform!(world, brightness, 0.7);
        assert_trait_uniform!(world, contrast, -0.4);
        assert_trait_uniform!(world, directedness, -0.6);
    }
    assert!(world.agents().iter().any(|a| a.motility() != 0.2));
    assert_eq!(world.max_species_id(), 25 * 40);
}

#[test]
fn test_mutated_traits_stay_in_range() {
    let mut world = WorldBuilder::new()
        .with_seed(32)
        .with_population(50)
        .with_mutability(Mutability::all())
        .with_config(|c| c.costs = glimmer_data::CostWeights::uniform(0.5))
        .build();
    for _ in 0..20 {
        world.regenerate_agents(1.0).unwrap();
        for a in world.agents() {
            assert!((-1.0..=1.0).contains(&a.contrast()));
            assert!((0.0..=1.0).contains(&a.brightness()));
            assert!((0.0..=1.0).contains(&a.motility()));
            assert!((-1.0..=1.0).contains(&a.directedness()));
            assert!(a.efficiency() > 0.0 && a.efficiency() <= 1.0);
        }
    }
}

#[test]
fn test_mutation_with_everything_locked_fails() {
    let mut world = WorldBuilder::new().with_population(10).build();
    let before = world.agents().to_vec();
    assert_eq!(world.regenerate_agents(0.5), Err(EngineError::NoMutableTrait));
    assert_eq!(world.agents(), before.as_slice());
}
