// Perceptron - two-input threshold unit trainer
// Library exports

pub mod cli; // Text inputs and result rendering
pub mod config;
pub mod errors;
pub mod models;
pub mod training;
