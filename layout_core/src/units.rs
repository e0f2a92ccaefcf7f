//! # Unit Types
//!
//! Type-safe wrappers for the engineering quantities the rules evaluate.
//! These are plain `f64` newtypes: they serialize as bare numbers and cost
//! nothing at runtime.
//!
//! The engine works in SI units on a local planar frame:
//! - Length: meters (m)
//! - Area: square meters (m²)
//! - Mass: kilograms (kg), distributed as kg/m²
//! - Angle: degrees at the API surface, radians for trigonometry
//! - Power: watts (W), kilowatts (kW)
//!
//! ## Example
//!
//! ```rust
//! use layout_core::units::{Degrees, Kilograms, Radians, SqMeters, Watts, Kilowatts};
//!
//! let tilt: Radians = Degrees(180.0).into();
//! assert!((tilt.0 - std::f64::consts::PI).abs() < 1e-12);
//!
//! let load = Kilograms(880.0) / SqMeters(150.0);
//! assert!((load.0 - 5.8667).abs() < 1e-3);
//!
//! let kw: Kilowatts = Watts(2500.0).into();
//! assert_eq!(kw.0, 2.5);
//! ```

use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

// ============================================================================
// Length & Area
// ============================================================================

/// Length in meters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Meters(pub f64);

/// Area in square meters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SqMeters(pub f64);

impl Mul<Meters> for Meters {
    type Output = SqMeters;
    fn mul(self, rhs: Meters) -> SqMeters {
        SqMeters(self.0 * rhs.0)
    }
}

// ============================================================================
// Mass & Distributed Load
// ============================================================================

/// Mass in kilograms
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Kilograms(pub f64);

/// Distributed dead load in kilograms per square meter
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KgPerSqM(pub f64);

impl Div<SqMeters> for Kilograms {
    type Output = KgPerSqM;
    fn div(self, rhs: SqMeters) -> KgPerSqM {
        KgPerSqM(self.0 / rhs.0)
    }
}

// ============================================================================
// Angles
// ============================================================================

/// Angle in degrees
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Degrees(pub f64);

/// Angle in radians
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Radians(pub f64);

impl From<Degrees> for Radians {
    fn from(deg: Degrees) -> Self {
        Radians(deg.0.to_radians())
    }
}

impl From<Radians> for Degrees {
    fn from(rad: Radians) -> Self {
        Degrees(rad.0.to_degrees())
    }
}

// ============================================================================
// Power & Energy
// ============================================================================

/// Power in watts
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Watts(pub f64);

/// Power in kilowatts (1 kW = 1000 W)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Kilowatts(pub f64);

/// Energy in kilowatt-hours
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KilowattHours(pub f64);

impl From<Watts> for Kilowatts {
    fn from(w: Watts) -> Self {
        Kilowatts(w.0 / 1000.0)
    }
}

impl From<Kilowatts> for Watts {
    fn from(kw: Kilowatts) -> Self {
        Watts(kw.0 * 1000.0)
    }
}

// ============================================================================
// Arithmetic Implementations
// ============================================================================

macro_rules! impl_arithmetic {
    ($type:ty) => {
        impl Add for $type {
            type Output = Self;
            fn add(self, rhs: Self) -> Self::Output {
                Self(self.0 + rhs.0)
            }
        }

        impl Sub for $type {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self::Output {
                Self(self.0 - rhs.0)
            }
        }

        impl Mul<f64> for $type {
            type Output = Self;
            fn mul(self, rhs: f64) -> Self::Output {
                Self(self.0 * rhs)
            }
        }

        impl Div<f64> for $type {
            type Output = Self;
            fn div(self, rhs: f64) -> Self::Output {
                Self(self.0 / rhs)
            }
        }

        impl $type {
            /// Get the raw f64 value
            pub fn value(self) -> f64 {
                self.0
            }
        }
    };
}

impl_arithmetic!(Meters);
impl_arithmetic!(SqMeters);
impl_arithmetic!(Kilograms);
impl_arithmetic!(KgPerSqM);
impl_arithmetic!(Degrees);
impl_arithmetic!(Radians);
impl_arithmetic!(Watts);
impl_arithmetic!(Kilowatts);
impl_arithmetic!(KilowattHours);
