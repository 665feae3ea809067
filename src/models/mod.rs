// Models module - Asteroid domain values and the static resource catalog

pub mod asteroid;
pub mod resource;

pub use asteroid::*;
pub use resource::*;
