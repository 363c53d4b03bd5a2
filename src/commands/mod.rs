pub mod generate_models;
pub mod launch;
