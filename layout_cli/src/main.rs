//! # Rooftop Layout CLI
//!
//! Runs one design pass and prints a report followed by the JSON snapshot.
//!
//! ```text
//! layout_cli                     # built-in demo roof
//! layout_cli rooftop.sld         # load a saved session
//! layout_cli --category industrial rooftop.sld
//! layout_cli --write-demo out.sld
//! ```
//!
//! Log verbosity follows `RUST_LOG` (default `layout_core=info`).

use std::path::Path;
use std::process::ExitCode;

use layout_core::design::Design;
use layout_core::file_io::{load_session, save_session};
use layout_core::geometry::{Point2D, Polygon};
use layout_core::rules::{ProjectCategory, StructureType};
use layout_core::session::DesignSession;
use layout_core::LayoutResult;
use tracing_subscriber::EnvFilter;

fn demo_session() -> DesignSession {
    let mut session = DesignSession::new("Demo Designer", "DEMO-001", "Demo Client");
    session.input.roof = Polygon::from_pairs(&[(0.0, 0.0), (18.0, 0.0), (18.0, 12.0), (0.0, 12.0)]);
    session.input.tilt_deg = 12.0;
    session.input.target_capacity_kw = Some(15.0);
    session.input.engineering.structure_type = StructureType::Ballast;
    session.input.engineering.project_category = ProjectCategory::Commercial;
    session.input.engineering.building_height_m = 14.0;
    session.add_obstacle("Water tank", Point2D::new(14.5, 8.5), 2.0, 2.0, 1.8);
    session.add_obstacle("Vent", Point2D::new(4.0, 3.0), 0.4, 0.4, 0.6);
    session
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("layout_core=info")))
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            if let Ok(json) = serde_json::to_string_pretty(&e) {
                eprintln!();
                eprintln!("Error JSON:");
                eprintln!("{}", json);
            }
            ExitCode::FAILURE
        }
    }
}

fn run(args: &[String]) -> LayoutResult<()> {
    let (category, args) = match args {
        [flag, name, rest @ ..] if flag == "--category" => (Some(ProjectCategory::from_str_flexible(name)?), rest),
        _ => (None, args),
    };

    let mut session = match args {
        [flag, path] if flag == "--write-demo" => {
            save_session(&demo_session(), Path::new(path))?;
            println!("Demo session written to {}", path);
            return Ok(());
        }
        [path] => load_session(Path::new(path))?,
        _ => {
            tracing::info!("No session file given, using the demo roof");
            demo_session()
        }
    };
    if let Some(category) = category {
        session.input.engineering.project_category = category;
    }

    let design = session.compute()?;
    print_report(&session, &design);

    println!();
    println!("JSON Output:");
    if let Ok(json) = serde_json::to_string_pretty(&design) {
        println!("{}", json);
    }
    Ok(())
}

fn print_report(session: &DesignSession, design: &Design) {
    let input = &session.input;
    let stats = &design.stats;

    println!("═══════════════════════════════════════");
    println!("  ROOFTOP SOLAR DESIGN");
    println!("═══════════════════════════════════════");
    println!();
    println!("Job:     {} ({})", session.meta.job_id, session.meta.client);
    println!("Roof:    {:.1} m², setback {:.2} m", input.roof.area_m2(), input.setback_m);
    println!(
        "Panel:   {:.0} Wp, {:.3} x {:.3} m, {}",
        input.panel.watt_peak, input.panel.width_m, input.panel.length_m, input.orientation
    );
    println!("Tilt:    {:.1}°, {} obstacle(s)", input.tilt_deg, input.obstacles.len());
    println!();
    println!("Layout:");
    println!("  Panels:       {} ({} rows x {} max)", stats.panel_count, stats.row_count, stats.panels_per_row);
    if stats.target_panel_count > 0 {
        println!("  Target:       {} panels", stats.target_panel_count);
    }
    println!("  Capacity:     {:.2} kW", stats.capacity_kw);
    println!("  Row pitch:    {:.2} m", stats.row_spacing_m);
    println!("  Utilization:  {:.1} %", stats.roof_utilization_pct);
    println!("  Strings:      {}", stats.string_count);
    println!();
    println!("Energy:");
    println!("  Daily:        {:.1} kWh", stats.daily_energy_kwh);
    println!("  Annual:       {:.0} kWh", stats.annual_energy_kwh);
    println!("  Revenue/yr:   {:.0}", stats.annual_revenue);
    println!("  System cost:  {:.0}", stats.system_cost);
    match stats.payback_years {
        Some(years) => println!("  Payback:      {:.1} years", years),
        None => println!("  Payback:      n/a"),
    }
    println!();
    println!("Checks:");
    let structural = &design.structural;
    println!(
        "  Dead load:    {:.1} / {:.1} kg/m² {}{}",
        structural.load_per_m2,
        structural.limit_kg_per_m2,
        status_icon(structural.is_safe),
        if structural.applicable { "" } else { " (n/a)" }
    );
    let earthing = &design.earthing;
    println!(
        "  Earthing:     {} pits, {:.0} Ω, {}",
        earthing.earth_pit_count, earthing.target_resistance_ohm, earthing.earthing_conductor
    );
    if earthing.lightning_arrestor_required {
        println!("  Lightning:    {}, {} down conductors", earthing.arrestor_type, earthing.down_conductor_count);
    }
    if design.hardware.applicable {
        println!(
            "  Hardware:     {} rails, {} clamps, {} fasteners",
            design.hardware.rail_count, design.hardware.clamp_count, design.hardware.fastener_count
        );
    }
    let compliance = &design.compliance;
    println!(
        "  Fire access:  {}{}",
        status_icon(compliance.fire_safe),
        if compliance.checks_mandatory { "" } else { " (advisory)" }
    );
    for issue in &compliance.issues {
        println!("    - {}", issue);
    }
    println!();
    println!("═══════════════════════════════════════");
    println!(
        "  RESULT: {}",
        if structural.is_safe && compliance.fire_safe { "PASS" } else { "REVIEW" }
    );
    println!("═══════════════════════════════════════");
}

fn status_icon(pass: bool) -> &'static str {
    if pass { "[OK]" } else { "[FAIL]" }
}
