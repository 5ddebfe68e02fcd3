use clap::{Parser, Subcommand};
use sp_app::{
    AppError, AppResult, SaveObserver, StudySession, load_factor_service, period_service,
    study_service,
};
use sp_core::{MonthKey, Real};
use sp_loadfactor::CellSource;
use sp_period::{PeriodMode, SwitchParams};
use sp_timeline::DateRange;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sp-cli")]
#[command(about = "SkyPlan CLI - airline network planning studies", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate study file syntax and structure
    Validate {
        /// Path to the study YAML or JSON file
        study_path: PathBuf,
    },
    /// List routes in a study
    Routes {
        /// Path to the study YAML or JSON file
        study_path: PathBuf,
    },
    /// Print the month columns of the study period
    Timeline {
        /// Path to the study YAML or JSON file
        study_path: PathBuf,
        /// Print one line per year instead of per month
        #[arg(long)]
        years: bool,
    },
    /// Switch between calendar dates and simulation years
    SwitchMode {
        /// Path to the study YAML or JSON file
        study_path: PathBuf,
        /// Target mode: "dates" or "duration"
        mode: PeriodMode,
        /// Simulation years (duration mode)
        #[arg(long)]
        years: Option<u32>,
        /// First month of the calendar period (dates mode), e.g. 2026-01
        #[arg(long, requires = "end")]
        start: Option<MonthKey>,
        /// Last month of the calendar period (dates mode), e.g. 2027-12
        #[arg(long, requires = "start")]
        end: Option<MonthKey>,
    },
    /// Change the number of simulation years (duration mode only)
    SetYears {
        /// Path to the study YAML or JSON file
        study_path: PathBuf,
        /// Number of years, at least 1
        years: u32,
    },
    /// Show the load-factor grid for a route
    LoadFactors {
        /// Path to the study YAML or JSON file
        study_path: PathBuf,
        /// Route ID
        route_id: String,
        /// Only show this cabin class
        #[arg(short, long)]
        class: Option<String>,
    },
    /// Override the load factor of one route, class and month
    SetOverride {
        /// Path to the study YAML or JSON file
        study_path: PathBuf,
        /// Route ID
        route_id: String,
        /// Cabin class code (e.g., F, J, W, Y)
        class: String,
        /// Month as YYYY-MM
        month: MonthKey,
        /// Load factor in percent
        value: Real,
    },
    /// Remove an override
    ClearOverride {
        /// Path to the study YAML or JSON file
        study_path: PathBuf,
        /// Route ID
        route_id: String,
        /// Cabin class code
        class: String,
        /// Month as YYYY-MM
        month: MonthKey,
    },
    /// Delete a route and every override that references it
    DeleteRoute {
        /// Path to the study YAML or JSON file
        study_path: PathBuf,
        /// Route ID
        route_id: String,
    },
}

fn main() -> AppResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { study_path } => cmd_validate(&study_path),
        Commands::Routes { study_path } => cmd_routes(&study_path),
        Commands::Timeline { study_path, years } => cmd_timeline(&study_path, years),
        Commands::SwitchMode {
            study_path,
            mode,
            years,
            start,
            end,
        } => cmd_switch_mode(&study_path, mode, years, start.zip(end)),
        Commands::SetYears { study_path, years } => cmd_set_years(&study_path, years),
        Commands::LoadFactors {
            study_path,
            route_id,
            class,
        } => cmd_load_factors(&study_path, &route_id, class.as_deref()),
        Commands::SetOverride {
            study_path,
            route_id,
            class,
            month,
            value,
        } => cmd_set_override(&study_path, &route_id, &class, month, value),
        Commands::ClearOverride {
            study_path,
            route_id,
            class,
            month,
        } => cmd_clear_override(&study_path, &route_id, &class, month),
        Commands::DeleteRoute {
            study_path,
            route_id,
        } => cmd_delete_route(&study_path, &route_id),
    }
}

/// Session over the study at `path` that saves back after every change.
fn open_session(study_path: &Path) -> AppResult<StudySession> {
    let study = study_service::load_study(study_path)?;
    let observer = SaveObserver::primed(study_path, &study)?;
    Ok(StudySession::with_observer(study, observer.into_observer()))
}

fn cmd_validate(study_path: &Path) -> AppResult<()> {
    println!("Validating study: {}", study_path.display());
    let study = study_service::load_study(study_path)?;
    study_service::validate_study(&study)?;
    let summary = study_service::summarize(&study);
    println!("✓ Study is valid");
    println!("  Name: {} (version {})", summary.name, summary.version);
    println!(
        "  Period: {} mode, {} ({} months)",
        summary.mode,
        summary.period.as_deref().unwrap_or("unset"),
        summary.month_count
    );
    if let Some(years) = summary.simulation_years {
        println!("  Simulation years: {}", years);
    }
    println!("  Cabin classes: {}", summary.class_count);
    println!("  Fleet: {} aircraft", summary.fleet_count);
    println!("  Routes: {}", summary.route_count);
    println!("  Override entries: {}", summary.override_count);
    Ok(())
}

fn cmd_routes(study_path: &Path) -> AppResult<()> {
    let study = study_service::load_study(study_path)?;
    let routes = study_service::list_routes(&study);

    if routes.is_empty() {
        println!("No routes found in study");
    } else {
        println!("Routes in study:");
        for route in routes {
            println!(
                "  {} - {} ({}x weekly, {} override entries)",
                route.id, route.label, route.weekly_frequency, route.override_entries
            );
        }
    }
    Ok(())
}

fn cmd_timeline(study_path: &Path, years: bool) -> AppResult<()> {
    let study = study_service::load_study(study_path)?;
    let (months, year_columns) = period_service::timeline_columns(&study)?;

    if years {
        for year in year_columns {
            println!("  {}", year.label);
        }
    } else {
        for column in months {
            println!(
                "  {:>3}  {}  {}",
                column.month_index, column.key, column.label
            );
        }
    }
    Ok(())
}

fn cmd_switch_mode(
    study_path: &Path,
    mode: PeriodMode,
    years: Option<u32>,
    bounds: Option<(MonthKey, MonthKey)>,
) -> AppResult<()> {
    let period = match bounds {
        Some((start, end)) => Some(DateRange::try_new(start, end)?),
        None => None,
    };

    let mut session = open_session(study_path)?;
    session.switch_mode(
        mode,
        SwitchParams {
            simulation_years: years,
            period,
        },
    )?;
    info!(
        path = %study_path.display(),
        %mode,
        revision = session.revision(),
        "mode switch committed"
    );

    let summary = study_service::summarize(session.study());
    println!(
        "✓ Study is in {} mode: {}",
        summary.mode,
        summary.period.as_deref().unwrap_or("period unset")
    );
    Ok(())
}

fn cmd_set_years(study_path: &Path, years: u32) -> AppResult<()> {
    let mut session = open_session(study_path)?;
    session.set_simulation_years(years)?;
    info!(path = %study_path.display(), years, "simulation years committed");
    println!("✓ Simulation length set to {} years", years);
    Ok(())
}

fn cmd_load_factors(study_path: &Path, route_id: &str, class: Option<&str>) -> AppResult<()> {
    let study = study_service::load_study(study_path)?;
    let route = study_service::get_route(&study, route_id)?;
    let timeline = period_service::study_timeline(&study)?;
    let rows = load_factor_service::route_grid(&study, route_id)?;

    if let Some(class) = class
        && !rows.iter().any(|row| row.class.as_str() == class)
    {
        return Err(AppError::ClassNotFound(class.to_string()));
    }

    println!("Load factors for {} ({}):", route.id, route.label());
    for row in rows
        .iter()
        .filter(|row| class.is_none_or(|c| row.class.as_str() == c))
    {
        println!("  Class {}", row.class);
        for cell in &row.cells {
            let label = timeline.label(cell.key).unwrap_or_default();
            let marker = match cell.source {
                CellSource::Override => " *",
                _ => "",
            };
            println!("    {:<10} {:>6.1}{}", label, cell.value, marker);
        }
    }
    Ok(())
}

fn cmd_set_override(
    study_path: &Path,
    route_id: &str,
    class: &str,
    month: MonthKey,
    value: Real,
) -> AppResult<()> {
    let mut session = open_session(study_path)?;
    session.set_override(route_id, class, month, value)?;
    info!(
        path = %study_path.display(),
        route = route_id,
        class,
        %month,
        value,
        "override committed"
    );
    println!(
        "✓ Override set: {} {} {} = {}",
        route_id, class, month, value
    );
    Ok(())
}

fn cmd_clear_override(
    study_path: &Path,
    route_id: &str,
    class: &str,
    month: MonthKey,
) -> AppResult<()> {
    let mut session = open_session(study_path)?;
    session.clear_override(route_id, class, month)?;
    info!(
        path = %study_path.display(),
        route = route_id,
        class,
        %month,
        "override clear committed"
    );
    println!("✓ Override cleared: {} {} {}", route_id, class, month);
    Ok(())
}

fn cmd_delete_route(study_path: &Path, route_id: &str) -> AppResult<()> {
    let mut session = open_session(study_path)?;
    let before = session.study().overrides.len();
    session.delete_route(route_id)?;
    let pruned = before - session.study().overrides.len();
    info!(path = %study_path.display(), route = route_id, pruned, "route deletion committed");
    println!(
        "✓ Route {} deleted ({} override entries removed)",
        route_id, pruned
    );
    Ok(())
}
