pub mod advice;
pub mod farm;
pub mod sensor;
pub mod weather;

pub use advice::*;
pub use farm::*;
pub use sensor::*;
pub use weather::*;
