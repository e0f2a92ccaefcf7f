//! # Yield & Financial Estimate
//!
//! A closed-form energy estimate, not a simulation. Daily horizontal
//! insolation falls off linearly with latitude; tilting the array toward the
//! equator scales it by a bounded plane-of-array factor.
//!
//! ```text
//! GHI      = max(2.0, 5.8 - 0.035 * |lat|)            kWh/m²/day
//! POA      = clamp(cos(|lat| - tilt) / cos(|lat|), 0.70, 1.25)
//! E_daily  = area * GHI * POA * eff * derate(cell) * PR
//! E_annual = 365 * E_daily
//! ```
//!
//! ## Example
//!
//! ```rust
//! use layout_core::yield_model::{estimate_yield, YieldInput};
//! use layout_core::panel::CellType;
//!
//! let estimate = estimate_yield(&YieldInput {
//!     panel_area_m2: 17.0,
//!     efficiency_pct: 20.0,
//!     cell_type: CellType::Monocrystalline,
//!     tilt_deg: 0.0,
//!     latitude_deg: 20.0,
//! });
//!
//! assert!((estimate.ghi_kwh_per_m2_day - 5.1).abs() < 1e-9);
//! assert!((estimate.daily_energy_kwh - 13.317).abs() < 1e-3);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{require_non_negative, LayoutError, LayoutResult};
use crate::panel::CellType;
use crate::units::{Degrees, KilowattHours, Kilowatts, Radians, Watts};

/// Wiring, inverter, soiling and mismatch losses
pub const PERFORMANCE_RATIO: f64 = 0.80;

pub const DAYS_PER_YEAR: f64 = 365.0;

/// Insolation floor at high latitudes (kWh/m²/day)
pub const MIN_GHI_KWH_PER_M2_DAY: f64 = 2.0;

/// Equatorial insolation and its fall-off per degree of latitude
const EQUATOR_GHI_KWH_PER_M2_DAY: f64 = 5.8;
const GHI_LOSS_PER_DEGREE: f64 = 0.035;

pub const MIN_POA_FACTOR: f64 = 0.70;
pub const MAX_POA_FACTOR: f64 = 1.25;

/// Site location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Signed latitude; only the magnitude matters (degrees)
    pub latitude_deg: f64,
}

impl Default for SiteConfig {
    fn default() -> Self {
        SiteConfig { latitude_deg: 20.0 }
    }
}

impl SiteConfig {
    pub fn validate(&self) -> LayoutResult<()> {
        if !self.latitude_deg.is_finite() || self.latitude_deg.abs() > 90.0 {
            return Err(LayoutError::invalid_input(
                "site.latitude_deg",
                self.latitude_deg.to_string(),
                "Latitude must be within [-90, 90]",
            ));
        }
        Ok(())
    }
}

/// Commercial assumptions for the payback estimate.
///
/// ## JSON Example
///
/// ```json
/// {
///   "tariff_per_kwh": 8.0,
///   "cost_per_watt": 45.0,
///   "lifetime_years": 25,
///   "annual_degradation": 0.005
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FinancialConfig {
    /// Value of one exported or self-consumed kWh
    pub tariff_per_kwh: f64,

    /// Installed cost per watt peak
    pub cost_per_watt: f64,

    pub lifetime_years: u32,

    /// Fractional output loss per year
    pub annual_degradation: f64,
}

impl Default for FinancialConfig {
    fn default() -> Self {
        FinancialConfig {
            tariff_per_kwh: 8.0,
            cost_per_watt: 45.0,
            lifetime_years: 25,
            annual_degradation: 0.005,
        }
    }
}

impl FinancialConfig {
    pub fn validate(&self) -> LayoutResult<()> {
        require_non_negative("financial.tariff_per_kwh", self.tariff_per_kwh)?;
        require_non_negative("financial.cost_per_watt", self.cost_per_watt)?;
        if !(0.0..1.0).contains(&self.annual_degradation) {
            return Err(LayoutError::invalid_input(
                "financial.annual_degradation",
                self.annual_degradation.to_string(),
                "Degradation must be in [0, 1)",
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YieldInput {
    /// Total module area of the array (m²)
    pub panel_area_m2: f64,
    pub efficiency_pct: f64,
    pub cell_type: CellType,
    pub tilt_deg: f64,
    pub latitude_deg: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct YieldEstimate {
    pub ghi_kwh_per_m2_day: f64,
    pub poa_factor: f64,
    pub daily_energy_kwh: f64,
    pub annual_energy_kwh: f64,
}

/// Daily global horizontal insolation at a latitude (kWh/m²/day).
pub fn daily_ghi(latitude_deg: f64) -> f64 {
    (EQUATOR_GHI_KWH_PER_M2_DAY - GHI_LOSS_PER_DEGREE * latitude_deg.abs()).max(MIN_GHI_KWH_PER_M2_DAY)
}

/// Gain of a fixed tilted plane over the horizontal, bounded.
pub fn poa_factor(latitude_deg: f64, tilt_deg: f64) -> f64 {
    let lat = latitude_deg.abs();
    let lat_rad: Radians = Degrees(lat).into();
    let offset_rad: Radians = Degrees(lat - tilt_deg).into();

    let horizontal = lat_rad.0.cos();
    if horizontal <= 1e-6 {
        return MAX_POA_FACTOR;
    }
    (offset_rad.0.cos() / horizontal).clamp(MIN_POA_FACTOR, MAX_POA_FACTOR)
}

/// Estimate daily and annual DC-to-AC energy for the array.
pub fn estimate_yield(input: &YieldInput) -> YieldEstimate {
    if !(input.panel_area_m2 > 0.0) {
        return YieldEstimate::default();
    }

    let ghi = daily_ghi(input.latitude_deg);
    let poa = poa_factor(input.latitude_deg, input.tilt_deg);
    let daily = KilowattHours(
        input.panel_area_m2
            * ghi
            * poa
            * (input.efficiency_pct / 100.0)
            * input.cell_type.temperature_derate()
            * PERFORMANCE_RATIO,
    );
    let annual = daily * DAYS_PER_YEAR;

    YieldEstimate {
        ghi_kwh_per_m2_day: ghi,
        poa_factor: poa,
        daily_energy_kwh: daily.value(),
        annual_energy_kwh: annual.value(),
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FinancialResult {
    pub annual_revenue: f64,
    pub system_cost: f64,
    /// Revenue over the lifetime with compounding degradation
    pub lifetime_revenue: f64,
    pub lifetime_profit: f64,
    /// `system_cost / annual_revenue`; `None` when the array earns nothing
    pub payback_years: Option<f64>,
}

/// Revenue, cost and payback for an array.
pub fn evaluate_financials(annual_energy_kwh: f64, capacity: Kilowatts, config: &FinancialConfig) -> FinancialResult {
    let annual_revenue = annual_energy_kwh.max(0.0) * config.tariff_per_kwh;
    let system_cost = Watts::from(capacity).value() * config.cost_per_watt;

    let retained = 1.0 - config.annual_degradation;
    let lifetime_revenue: f64 = (0..config.lifetime_years)
        .map(|year| annual_revenue * retained.powi(year as i32))
        .sum();

    let payback_years = if annual_revenue > 0.0 {
        Some(system_cost / annual_revenue)
    } else {
        None
    };

    FinancialResult {
        annual_revenue,
        system_cost,
        lifetime_revenue,
        lifetime_profit: lifetime_revenue - system_cost,
        payback_years,
    }
}
