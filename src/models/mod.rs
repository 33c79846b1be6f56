// Domain entities and request payloads

pub mod exercise;
pub mod workout;
pub mod muscle_group;
pub mod profile;
pub mod validation;

pub use exercise::*;
pub use workout::*;
pub use muscle_group::*;
pub use profile::*;
pub use validation::*;
