//! Shared foundation of the steptune crates: the scalar type and float
//! guards, the FOPDT plant model, and the common error type.

pub mod error;
pub mod numeric;
pub mod plant;

pub use error::{CoreError, CoreResult};
pub use numeric::*;
pub use plant::PlantParameters;
