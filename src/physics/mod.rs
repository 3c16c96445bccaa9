pub mod aerodynamics;
pub mod atmosphere;

pub use aerodynamics::{
    resolve_wind_forces, AeroCoefficients, AeroDatabase, AeroModel, AeroSample, AeroTable,
    ConstantAero,
};
pub use atmosphere::AirData;
