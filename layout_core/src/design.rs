//! # Design Aggregator
//!
//! One full pass of the engine: safety boundary, tiling, string
//! partitioning, engineering rules and the yield/financial estimate, folded
//! into a single [`Design`] snapshot.
//!
//! Any input change means calling [`compute_design`] again; the previous
//! snapshot is simply discarded. Nothing is patched in place.
//!
//! ## Example
//!
//! ```rust
//! use layout_core::design::{compute_design, DesignInput};
//! use layout_core::geometry::Polygon;
//!
//! let input = DesignInput {
//!     roof: Polygon::rectangle(20.0, 12.0),
//!     ..DesignInput::default()
//! };
//!
//! let design = compute_design(&input).unwrap();
//! assert_eq!(design.stats.panel_count, design.layout.len());
//! assert!(design.structural.is_safe);
//! ```
//!
//! ## JSON Example
//!
//! Every field except `roof` has a default:
//!
//! ```json
//! {
//!   "roof": [{ "x": 0.0, "z": 0.0 }, { "x": 20.0, "z": 0.0 },
//!            { "x": 20.0, "z": 12.0 }, { "x": 0.0, "z": 12.0 }],
//!   "setback_m": 0.6,
//!   "tilt_deg": 15.0,
//!   "target_capacity_kw": 10.0,
//!   "engineering": { "project_category": "commercial" }
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{require_non_negative, LayoutError, LayoutResult};
use crate::geometry::Polygon;
use crate::obstacle::{Obstacle, DEFAULT_CLEARANCE_MARGIN_M};
use crate::panel::{Orientation, PanelSpec};
use crate::rules::{
    compliance, earthing, hardware, structural, ComplianceInput, ComplianceResult, DeadLoadInput, DeadLoadResult,
    EarthingInput, EarthingResult, EngineeringConfig, HardwareInput, HardwareResult,
};
use crate::strings::{partition_into_strings, StringSizing, StringZone};
use crate::tiler::{tile_panels, PanelLayout, TileRequest, DEFAULT_INTER_PANEL_GAP_M};
use crate::yield_model::{
    estimate_yield, evaluate_financials, FinancialConfig, FinancialResult, SiteConfig, YieldEstimate, YieldInput,
};

/// Default module tilt (degrees)
pub const DEFAULT_TILT_DEG: f64 = 10.0;

/// Default roof-edge setback, equal to the minimum perimeter walkway (m)
pub const DEFAULT_SETBACK_M: f64 = compliance::DEFAULT_MIN_PERIMETER_WALKWAY_M;

/// Everything a design pass reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DesignInput {
    /// Roof outline in the local planar frame
    pub roof: Polygon,

    /// Uniform inward setback from the roof edge (m)
    pub setback_m: f64,

    /// Obstacles in creation order
    pub obstacles: Vec<Obstacle>,

    pub panel: PanelSpec,
    pub orientation: Orientation,
    pub tilt_deg: f64,
    pub inter_panel_gap_m: f64,

    /// Clearance kept around every obstacle (m)
    pub clearance_margin_m: f64,

    /// Stop placing panels once this DC capacity is reached (kW)
    pub target_capacity_kw: Option<f64>,

    /// Fixed string length; derived from `string_sizing` when absent
    pub panels_per_string: Option<usize>,

    pub string_sizing: StringSizing,
    pub engineering: EngineeringConfig,
    pub site: SiteConfig,
    pub financial: FinancialConfig,
}

impl Default for DesignInput {
    fn default() -> Self {
        DesignInput {
            roof: Polygon::empty(),
            setback_m: DEFAULT_SETBACK_M,
            obstacles: Vec::new(),
            panel: PanelSpec::default(),
            orientation: Orientation::default(),
            tilt_deg: DEFAULT_TILT_DEG,
            inter_panel_gap_m: DEFAULT_INTER_PANEL_GAP_M,
            clearance_margin_m: DEFAULT_CLEARANCE_MARGIN_M,
            target_capacity_kw: None,
            panels_per_string: None,
            string_sizing: StringSizing::default(),
            engineering: EngineeringConfig::default(),
            site: SiteConfig::default(),
            financial: FinancialConfig::default(),
        }
    }
}

impl DesignInput {
    /// Validate the contract inputs. The roof itself is never rejected:
    /// a degenerate outline just produces an empty design.
    pub fn validate(&self) -> LayoutResult<()> {
        require_non_negative("setback_m", self.setback_m)?;
        if let Some(kw) = self.target_capacity_kw {
            require_non_negative("target_capacity_kw", kw)?;
        }
        if self.panels_per_string == Some(0) {
            return Err(LayoutError::invalid_input(
                "panels_per_string",
                "0",
                "A string needs at least one panel",
            ));
        }
        self.engineering.validate()?;
        self.site.validate()?;
        self.financial.validate()?;
        Ok(())
    }

    /// Panels needed to reach the target capacity, if one is set.
    pub fn target_panel_count(&self) -> Option<usize> {
        self.target_capacity_kw.map(|kw| self.panel.count_for_capacity(kw))
    }

    /// String length: the explicit value, or the recommended length for the
    /// module/inverter pair.
    pub fn resolved_panels_per_string(&self) -> LayoutResult<usize> {
        match self.panels_per_string {
            Some(k) => Ok(k),
            None => Ok(self.string_sizing.window()?.recommended),
        }
    }
}

/// Headline figures for a design. All zero when nothing fits on the roof.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DesignStats {
    pub panel_count: usize,
    pub capacity_kw: f64,
    pub row_count: usize,
    pub panels_per_row: usize,
    /// Center-to-center row pitch (m)
    pub row_spacing_m: f64,
    pub daily_energy_kwh: f64,
    pub annual_energy_kwh: f64,
    pub structural_load_kg_per_m2: f64,
    /// Panel footprint as a share of the roof area (%)
    pub roof_utilization_pct: f64,
    pub annual_revenue: f64,
    pub system_cost: f64,
    pub lifetime_profit: f64,
    pub payback_years: Option<f64>,
    pub string_count: usize,
    /// Panels needed for the target capacity (0 without a target)
    pub target_panel_count: usize,
}

/// Complete output of one design pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Design {
    pub layout: PanelLayout,
    /// Roof after the setback; empty when the setback consumes the roof
    pub usable_polygon: Polygon,
    pub string_zones: Vec<StringZone>,
    pub structural: DeadLoadResult,
    pub hardware: HardwareResult,
    pub earthing: EarthingResult,
    pub compliance: ComplianceResult,
    pub energy: YieldEstimate,
    pub financial: FinancialResult,
    pub stats: DesignStats,
}

/// Run a full design pass.
///
/// Fails only on contract violations; see [`DesignInput::validate`] and
/// [`TileRequest::validate`].
pub fn compute_design(input: &DesignInput) -> LayoutResult<Design> {
    input.validate()?;
    let panels_per_string = input.resolved_panels_per_string()?;

    let usable_polygon = input.roof.safety_boundary(input.setback_m);
    if input.roof.is_usable() && !usable_polygon.is_usable() {
        tracing::warn!(setback_m = input.setback_m, "setback leaves no usable roof area");
    }

    let target_panel_count = input.target_panel_count();
    let request = TileRequest::new(&usable_polygon, &input.panel)
        .with_orientation(input.orientation)
        .with_tilt_deg(input.tilt_deg)
        .with_gap(input.inter_panel_gap_m)
        .with_clearance_margin(input.clearance_margin_m)
        .with_obstacles(&input.obstacles)
        .with_target_count(target_panel_count);
    let layout = tile_panels(&request)?;

    let panel_count = layout.len();
    let string_zones = partition_into_strings(panel_count, panels_per_string)?;

    let roof_area_m2 = input.roof.area_m2();
    let capacity = input.panel.capacity_kw(panel_count);
    let config = &input.engineering;

    let structural = structural::evaluate(&DeadLoadInput {
        roof_type: config.roof_type,
        structure_type: config.structure_type,
        panel_count,
        panel_weight_kg: input.panel.weight_kg,
        roof_area_m2,
        dead_load_limit_kg_per_m2: config.dead_load_limit_kg_per_m2,
    });

    let hardware = hardware::evaluate(&HardwareInput {
        roof_type: config.roof_type,
        panel_count,
        row_count: layout.row_count(),
        total_row_length_m: layout.total_row_length_m(),
        purlin_spacing_m: config.purlin_spacing_m,
        clamp_type: config.clamp_type,
    });

    let earthing = earthing::evaluate(&EarthingInput {
        capacity_kw: capacity.value(),
        building_height_m: config.building_height_m,
        roof_area_m2,
    });

    let compliance = compliance::evaluate(&ComplianceInput {
        project_category: config.project_category,
        force_fire_compliance: config.force_fire_compliance,
        perimeter_walkway_m: input.setback_m,
        central_access_m: config.central_access_width_m,
        min_perimeter_walkway_m: config.min_perimeter_walkway_m,
        min_central_access_m: config.min_central_access_m,
    });

    let energy = estimate_yield(&YieldInput {
        panel_area_m2: (input.panel.area() * panel_count as f64).value(),
        efficiency_pct: input.panel.efficiency_pct,
        cell_type: input.panel.cell_type,
        tilt_deg: input.tilt_deg,
        latitude_deg: input.site.latitude_deg,
    });
    let financial = evaluate_financials(energy.annual_energy_kwh, capacity, &input.financial);

    let stats = if layout.is_empty() {
        DesignStats::default()
    } else {
        let roof_utilization_pct = if roof_area_m2 > 0.0 {
            layout.footprint_area_m2() / roof_area_m2 * 100.0
        } else {
            0.0
        };
        DesignStats {
            panel_count,
            capacity_kw: capacity.value(),
            row_count: layout.row_count(),
            panels_per_row: layout.panels_per_row(),
            row_spacing_m: layout.row_pitch_m,
            daily_energy_kwh: energy.daily_energy_kwh,
            annual_energy_kwh: energy.annual_energy_kwh,
            structural_load_kg_per_m2: structural.load_per_m2,
            roof_utilization_pct,
            annual_revenue: financial.annual_revenue,
            system_cost: financial.system_cost,
            lifetime_profit: financial.lifetime_profit,
            payback_years: financial.payback_years,
            string_count: string_zones.len(),
            target_panel_count: target_panel_count.unwrap_or(0),
        }
    };

    tracing::debug!(
        panels = stats.panel_count,
        strings = stats.string_count,
        capacity_kw = stats.capacity_kw,
        strategy = ?layout.strategy,
        "design computed"
    );

    Ok(Design {
        layout,
        usable_polygon,
        string_zones,
        structural,
        hardware,
        earthing,
        compliance,
        energy,
        financial,
        stats,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point2D;
    use crate::panel::CellType;
    use crate::rules::{ProjectCategory, RoofType};
    use crate::tiler::TilingStrategy;

    fn input() -> DesignInput {
        DesignInput {
            roof: Polygon::rectangle(10.0, 10.0),
            setback_m: 0.0,
            panel: PanelSpec::new(1.0, 1.7, 330.0, 22.0, 20.0, CellType::Monocrystalline),
            tilt_deg: 0.0,
            panels_per_string: Some(12),
            ..DesignInput::default()
        }
    }

    #[test]
    fn test_square_roof_design() {
        let design = compute_design(&input()).unwrap();
        let stats = &design.stats;
        assert_eq!(stats.panel_count, 35);
        assert_eq!(stats.row_count, 7);
        assert_eq!(stats.panels_per_row, 5);
        assert!((stats.row_spacing_m - 1.3).abs() < 1e-12);
        assert!((stats.capacity_kw - 11.55).abs() < 1e-9);
        // 35 panels in strings of 12
        assert_eq!(stats.string_count, 3);
        assert_eq!(design.string_zones[2].len(), 11);
        // 35 * 1.7 m² of 100 m²
        assert!((stats.roof_utilization_pct - 59.5).abs() < 1e-9);
        assert_eq!(design.layout.strategy, TilingStrategy::UniformBlock);
    }

    #[test]
    fn test_rules_receive_layout_figures() {
        let design = compute_design(&input()).unwrap();
        // 35 * 22 kg over 100 m²
        assert!((design.structural.load_per_m2 - 7.7).abs() < 1e-9);
        assert_eq!(design.hardware.clamp_count, 70);
        // 11.55 kW -> ceil(1.155) = 2 array pits, plus building and inverter
        assert_eq!(design.earthing.earth_pit_count, 4);
        assert_eq!(design.earthing.target_resistance_ohm, 2.0);
        // No setback means no walkway, but residential is exempt
        assert!(!design.compliance.perimeter_walkway_ok);
        assert!(design.compliance.fire_safe);
    }

    #[test]
    fn test_target_capacity_truncates() {
        let design = compute_design(&DesignInput {
            target_capacity_kw: Some(3.3),
            ..input()
        })
        .unwrap();
        assert_eq!(design.stats.target_panel_count, 10);
        assert_eq!(design.stats.panel_count, 10);
        assert_eq!(design.stats.string_count, 1);
    }

    #[test]
    fn test_setback_shrinks_layout() {
        let free = compute_design(&input()).unwrap();
        let inset = compute_design(&DesignInput {
            setback_m: 1.0,
            ..input()
        })
        .unwrap();
        assert!(inset.stats.panel_count < free.stats.panel_count);
        assert!((inset.usable_polygon.area_m2() - 64.0).abs() < 1e-9);
        for slot in &inset.layout.slots {
            assert!(inset.usable_polygon.contains(slot.position));
        }
    }

    #[test]
    fn test_collapsed_setback_gives_zero_stats() {
        let design = compute_design(&DesignInput {
            setback_m: 6.0,
            ..input()
        })
        .unwrap();
        assert!(design.usable_polygon.is_empty());
        assert!(design.layout.is_empty());
        assert!(design.string_zones.is_empty());
        assert_eq!(design.stats, DesignStats::default());
    }

    #[test]
    fn test_degenerate_roof_is_not_an_error() {
        let design = compute_design(&DesignInput {
            roof: Polygon::from_pairs(&[(0.0, 0.0), (5.0, 0.0)]),
            ..input()
        })
        .unwrap();
        assert_eq!(design.stats, DesignStats::default());
    }

    #[test]
    fn test_obstacle_reduces_count() {
        let free = compute_design(&input()).unwrap();
        let blocked = compute_design(&DesignInput {
            obstacles: vec![Obstacle::new("Tank", Point2D::new(5.0, 5.0), 2.0, 2.0, 1.5)],
            ..input()
        })
        .unwrap();
        assert!(blocked.stats.panel_count < free.stats.panel_count);
    }

    #[test]
    fn test_string_length_from_sizing() {
        let design = compute_design(&DesignInput {
            panels_per_string: None,
            ..input()
        })
        .unwrap();
        // Default sizing recommends 18 panels per string
        assert_eq!(design.string_zones[0].len(), 18);
        assert_eq!(design.stats.string_count, 2);
    }

    #[test]
    fn test_contract_violations() {
        let zero_string = DesignInput {
            panels_per_string: Some(0),
            ..input()
        };
        assert_eq!(compute_design(&zero_string).unwrap_err().error_code(), "INVALID_INPUT");

        let negative_setback = DesignInput {
            setback_m: -0.5,
            ..input()
        };
        assert!(compute_design(&negative_setback).is_err());

        let mut bad_panel = input();
        bad_panel.panel.watt_peak = 0.0;
        assert!(compute_design(&bad_panel).is_err());

        let steep = DesignInput {
            tilt_deg: 90.0,
            ..input()
        };
        assert!(compute_design(&steep).is_err());
    }

    #[test]
    fn test_commercial_metal_roof() {
        let mut design_input = input();
        design_input.setback_m = 0.6;
        design_input.engineering.roof_type = RoofType::MetalSheet;
        design_input.engineering.project_category = ProjectCategory::Commercial;
        let design = compute_design(&design_input).unwrap();
        assert!(design.hardware.applicable);
        assert!(!design.structural.applicable);
        assert!(design.compliance.checks_mandatory);
        assert!(design.compliance.fire_safe);
    }

    #[test]
    fn test_partial_json_input() {
        let json = r#"{
            "roof": [{"x": 0.0, "z": 0.0}, {"x": 10.0, "z": 0.0}, {"x": 10.0, "z": 10.0}, {"x": 0.0, "z": 10.0}],
            "setback_m": 0.0,
            "tilt_deg": 0.0,
            "panel": {"width_m": 1.0, "length_m": 1.7, "watt_peak": 330.0, "weight_kg": 22.0, "efficiency_pct": 20.0},
            "panels_per_string": 12
        }"#;
        let parsed: DesignInput = serde_json::from_str(json).unwrap();
        assert_eq!(parsed, input());
    }

    #[test]
    fn test_recompute_is_identical() {
        let a = compute_design(&input()).unwrap();
        let b = compute_design(&input()).unwrap();
        assert_eq!(a, b);
    }
}
