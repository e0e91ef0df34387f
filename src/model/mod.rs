pub use glimmer_core::{Agent, EngineError, FoodInitializer, SharedWorld, World};
pub mod agent {
    pub use glimmer_core::agent::*;
}
pub mod config {
    pub use glimmer_core::config::*;
}
pub mod food {
    pub use glimmer_core::food::*;
}
pub mod lineage {
    pub use glimmer_core::lineage::*;
}
pub mod metrics {
    pub use glimmer_core::metrics::*;
}
pub mod shared {
    pub use glimmer_core::shared::*;
}
pub mod world {
    pub use glimmer_core::world::*;
}

pub mod state {
    pub use glimmer_data::*;
}
