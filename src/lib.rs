pub mod batch;
pub mod model;
