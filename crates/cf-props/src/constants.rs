//! Physical constants shared by the property functions and the engine.

/// Density of SS304 [kg/m³]
pub const RHO_SS304: f64 = 8000.0;

/// Thermal conductivity of SS304 [W/(m·K)]
pub const K_SS304: f64 = 20.0;

/// Stefan-Boltzmann constant [W/(m²·K⁴)]
pub const SIGMA: f64 = 5.67e-8;

/// Density of N₂ at normal conditions (0 °C, 1 atm) [kg/Nm³]
pub const RHO_N2_NORMAL: f64 = 1.251;

/// Molar mass of N₂ [kg/mol]
pub const MOLAR_MASS_N2: f64 = 0.028014;

/// Universal gas constant [J/(mol·K)]
pub const R_UNIVERSAL: f64 = 8.31446;

/// Standard atmosphere [bar abs]
pub const ATMOSPHERIC_PRESSURE_BAR: f64 = 1.01325;

/// Normal reference temperature [K]
pub const NORMAL_TEMP_K: f64 = 273.15;

pub const PA_PER_BAR: f64 = 100_000.0;
