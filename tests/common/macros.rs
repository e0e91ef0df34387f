/// Asserts that every agent in the world reports the same value for a trait getter.
#[macro_export]
macro_rules! assert_trait_uniform {
    ($world:expr, $getter:ident, $expected:expr) => {
        for (i, agent) in $world.agents().iter().enumerate() {
            assert_eq!(
                agent.$getter(),
                $expected,
                "Agent {} has {} = {}, expected {}",
                i,
                stringify!($getter),
                agent.$getter(),
                $expected
            );
        }
    };
}

/// Asserts that two worlds hold identical populations.
#[macro_export]
macro_rules! assert_same_population {
    ($a:expr, $b:expr) => {
        assert_eq!(
            $a.agents().len(),
            $b.agents().len(),
            "Population sizes differ"
        );
        for (i, (x, y)) in $a.agents().iter().zip($b.agents()).enumerate() {
            assert_eq!(x, y, "Agents differ at index {}", i);
        }
    };
}
