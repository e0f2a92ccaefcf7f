//! End-to-end scenarios over the public API.

use layout_core::design::{compute_design, Design, DesignInput};
use layout_core::geometry::{point_in_polygon, Point2D, Polygon};
use layout_core::obstacle::{footprint_overlaps, Obstacle, DEFAULT_CLEARANCE_MARGIN_M};
use layout_core::panel::{CellType, Orientation, PanelSpec};
use layout_core::rules::structural::{self, DeadLoadInput, RoofType, StructureType};
use layout_core::strings::partition_into_strings;
use layout_core::tiler::{tile_panels, PanelLayout, TileRequest};

fn test_panel() -> PanelSpec {
    PanelSpec::new(1.0, 1.7, 330.0, 22.0, 20.0, CellType::Monocrystalline)
}

fn l_shaped_roof() -> Polygon {
    Polygon::from_pairs(&[
        (0.0, 0.0),
        (16.0, 0.0),
        (16.0, 6.0),
        (7.0, 6.0),
        (7.0, 14.0),
        (0.0, 14.0),
    ])
}

fn irregular_roof() -> Polygon {
    Polygon::from_pairs(&[(0.0, 0.0), (14.0, 1.5), (17.0, 9.0), (9.0, 13.0), (1.0, 10.0)])
}

fn obstacles() -> Vec<Obstacle> {
    vec![
        Obstacle::new("Tank", Point2D::new(4.0, 4.0), 2.0, 2.0, 1.5),
        Obstacle::new("Vent", Point2D::new(11.0, 3.0), 0.5, 0.5, 0.8),
        Obstacle::new("Stair head", Point2D::new(3.0, 11.0), 2.5, 2.0, 2.4),
    ]
}

fn tile(
    polygon: &Polygon,
    panel: &PanelSpec,
    orientation: Orientation,
    tilt: f64,
    obstacles: &[Obstacle],
) -> PanelLayout {
    let request = TileRequest::new(polygon, panel)
        .with_orientation(orientation)
        .with_tilt_deg(tilt)
        .with_obstacles(obstacles);
    tile_panels(&request).unwrap()
}

/// Every combination the property tests sweep.
fn sweep<F: FnMut(&Polygon, Orientation, f64, &PanelLayout)>(obstacles: &[Obstacle], mut check: F) {
    let panel = test_panel();
    for roof in [Polygon::rectangle(10.0, 10.0), l_shaped_roof(), irregular_roof()] {
        for orientation in Orientation::ALL {
            for tilt in [0.0, 10.0, 25.0] {
                let layout = tile(&roof, &panel, orientation, tilt, obstacles);
                check(&roof, orientation, tilt, &layout);
            }
        }
    }
}

#[test]
fn every_slot_center_is_inside_the_polygon() {
    sweep(&obstacles(), |roof, _, _, layout| {
        for slot in &layout.slots {
            assert!(point_in_polygon(slot.position, roof.vertices()));
        }
    });
}

#[test]
fn no_slot_overlaps_an_obstacle() {
    let obstacles = obstacles();
    sweep(&obstacles, |_, _, _, layout| {
        for slot in &layout.slots {
            for obstacle in &obstacles {
                assert!(!footprint_overlaps(
                    slot.position,
                    slot.footprint_width_m,
                    slot.footprint_height_m,
                    obstacle,
                    DEFAULT_CLEARANCE_MARGIN_M,
                ));
            }
        }
    });
}

#[test]
fn tiling_is_order_stable() {
    let obstacles = obstacles();
    let panel = test_panel();
    sweep(&obstacles, |roof, orientation, tilt, layout| {
        let again = tile(roof, &panel, orientation, tilt, &obstacles);
        assert_eq!(&again, layout);
    });
}

#[test]
fn slots_are_row_major() {
    sweep(&obstacles(), |_, _, _, layout| {
        for pair in layout.slots.windows(2) {
            let (a, b) = (pair[0].position, pair[1].position);
            assert!(a.z < b.z || (a.z == b.z && a.x < b.x));
        }
    });
}

#[test]
fn truncation_is_a_prefix() {
    let roof = l_shaped_roof();
    let panel = test_panel();
    let obstacles = obstacles();
    let full = tile(&roof, &panel, Orientation::Landscape, 10.0, &obstacles);
    assert!(!full.is_empty());

    for target in 0..full.len() + 5 {
        let request = TileRequest::new(&roof, &panel)
            .with_tilt_deg(10.0)
            .with_obstacles(&obstacles)
            .with_target_count(Some(target));
        let capped = tile_panels(&request).unwrap();
        assert_eq!(capped.len(), target.min(full.len()));
        assert_eq!(capped.slots[..], full.slots[..capped.len()]);
    }
}

#[test]
fn degenerate_polygons_give_empty_layouts() {
    let panel = test_panel();
    for roof in [
        Polygon::empty(),
        Polygon::from_pairs(&[(0.0, 0.0), (10.0, 0.0)]),
        Polygon::from_pairs(&[(0.0, 0.0), (5.0, 5.0), (10.0, 10.0)]),
    ] {
        let layout = tile(&roof, &panel, Orientation::Landscape, 0.0, &[]);
        assert!(layout.is_empty());
    }
}

#[test]
fn square_roof_reference_scenario() {
    let roof = Polygon::rectangle(10.0, 10.0);
    let layout = tile(&roof, &test_panel(), Orientation::Landscape, 0.0, &[]);

    assert!(layout.row_count() >= 5);
    assert!(layout.panels_per_row() >= 5);
    for slot in &layout.slots {
        let p = slot.position;
        assert!(p.x > 0.0 && p.x < 10.0 && p.z > 0.0 && p.z < 10.0);
    }
}

#[test]
fn central_obstacle_reference_scenario() {
    let roof = Polygon::rectangle(10.0, 10.0);
    let panel = test_panel();
    let centroid = roof.centroid().unwrap();
    let tank = vec![Obstacle::new("Tank", centroid, 2.0, 2.0, 1.5)];

    let free = tile(&roof, &panel, Orientation::Landscape, 0.0, &[]);
    let blocked = tile(&roof, &panel, Orientation::Landscape, 0.0, &tank);

    assert!(blocked.len() < free.len());
    for slot in &blocked.slots {
        assert!(!footprint_overlaps(
            slot.position,
            slot.footprint_width_m,
            slot.footprint_height_m,
            &tank[0],
            DEFAULT_CLEARANCE_MARGIN_M,
        ));
    }
}

#[test]
fn partition_reference_scenario() {
    let zones = partition_into_strings(26, 12).unwrap();
    let sizes: Vec<usize> = zones.iter().map(|z| z.len()).collect();
    assert_eq!(sizes, vec![12, 12, 2]);
}

#[test]
fn dead_load_reference_scenario() {
    let result = structural::evaluate(&DeadLoadInput {
        roof_type: RoofType::Rcc,
        structure_type: StructureType::Anchor,
        panel_count: 40,
        panel_weight_kg: 22.0,
        roof_area_m2: 150.0,
        dead_load_limit_kg_per_m2: 50.0,
    });
    assert_eq!(result.total_load_kg, 880.0);
    assert!((result.load_per_m2 - 5.87).abs() < 0.01);
    assert!(result.is_safe);
}

#[test]
fn design_strings_cover_the_layout() {
    let input = DesignInput {
        roof: l_shaped_roof(),
        obstacles: obstacles(),
        panel: test_panel(),
        panels_per_string: Some(7),
        ..DesignInput::default()
    };
    let design = compute_design(&input).unwrap();
    let n = design.layout.len();
    assert!(n > 0);

    let mut next = 0;
    for zone in &design.string_zones {
        assert_eq!(zone.panel_indices.start, next);
        next = zone.panel_indices.end;
    }
    assert_eq!(next, n);
    assert_eq!(design.stats.string_count, n.div_ceil(7));
}

#[test]
fn design_slots_respect_setback() {
    let input = DesignInput {
        roof: irregular_roof(),
        setback_m: 1.0,
        panel: test_panel(),
        ..DesignInput::default()
    };
    let design = compute_design(&input).unwrap();
    assert!(design.usable_polygon.area_m2() < input.roof.area_m2());
    for slot in &design.layout.slots {
        assert!(design.usable_polygon.contains(slot.position));
        assert!(input.roof.contains(slot.position));
    }
}

#[test]
fn design_snapshot_round_trips_through_json() {
    let input = DesignInput {
        roof: Polygon::rectangle(10.0, 10.0),
        obstacles: obstacles(),
        ..DesignInput::default()
    };
    let design = compute_design(&input).unwrap();
    assert!(!design.layout.is_empty());

    let json = serde_json::to_string(&design).unwrap();
    let parsed: Design = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, design);
    assert_eq!(serde_json::to_string(&parsed).unwrap(), json);
}
