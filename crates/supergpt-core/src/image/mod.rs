//! Image-generation abstractions: the provider port, prompt styling, and the
//! deterministic placeholder used when the provider cannot deliver.

pub mod placeholder;
pub mod provider;
pub mod style;
