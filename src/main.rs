use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use forest_yield_estimator::{
    io,
    models::{ControlMap, Stand},
    site_index::{
        height_to_index_by, index_to_height, index_to_height_smoothed, years_to_breast_height,
        AgeType, SiteEstimation, SiteIndexEquation,
    },
    visualization::{print_equation_table, print_reconciliation_table, print_utilization_report},
    Estimator,
};

#[derive(Parser)]
#[command(
    name = "yield-estimator",
    about = "Forest Yield Estimator - site curves, utilization classes and diameter reconciliation",
    version,
    author
)]
struct Cli {
    /// Log solver and estimator detail
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every site index equation
    Equations,

    /// Height from site index and age
    Height {
        /// Site index equation, e.g. SI_FDC_BRUCE
        #[arg(short, long)]
        equation: SiteIndexEquation,

        /// Age in years
        #[arg(short, long)]
        age: f64,

        /// Age type: total or breast
        #[arg(long, default_value = "total")]
        age_type: AgeType,

        /// Site index (m at breast-height age 50)
        #[arg(short, long)]
        site_index: f64,

        /// Years to breast height; derived from the equation when omitted
        #[arg(long)]
        y2bh: Option<f64>,

        /// Replace the juvenile segment with a power curve through breast height
        #[arg(long)]
        smooth: bool,
    },

    /// Site index from height and age
    SiteIndex {
        /// Site index equation, e.g. SI_FDC_BRUCE
        #[arg(short, long)]
        equation: SiteIndexEquation,

        /// Age in years
        #[arg(short, long)]
        age: f64,

        /// Age type: total or breast
        #[arg(long, default_value = "total")]
        age_type: AgeType,

        /// Height in metres
        #[arg(long)]
        height: f64,

        /// Search along the height curve instead of using the direct inverse
        #[arg(long)]
        iterate: bool,
    },

    /// Estimate utilization components for a stand
    Estimate {
        /// Coefficient tables (TOML)
        #[arg(short, long)]
        control: PathBuf,

        /// Stand description (JSON)
        #[arg(short, long)]
        stand: PathBuf,

        /// Print JSON instead of tables
        #[arg(long)]
        json: bool,

        /// Also write the results to a .csv or .json file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Reconcile species diameters against the stand density
    Reconcile {
        /// Coefficient tables (TOML)
        #[arg(short, long)]
        control: PathBuf,

        /// Stand description (JSON)
        #[arg(short, long)]
        stand: PathBuf,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn breast_height_years(
    equation: SiteIndexEquation,
    site_index: f64,
    given: Option<f64>,
) -> Result<f64> {
    match given {
        Some(y) => Ok(y),
        None if equation.is_growth_intercept() => Ok(0.0),
        None => Ok(years_to_breast_height(equation, site_index)?),
    }
}

fn load(control: &Path, stand: &Path) -> Result<(ControlMap, Stand)> {
    let control = io::read_control(control)?;
    let stand = io::read_stand(stand)?;
    Ok((control, stand))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Equations => {
            print_equation_table(&SiteIndexEquation::ALL);
        }

        Commands::Height {
            equation,
            age,
            age_type,
            site_index,
            y2bh,
            smooth,
        } => {
            let y2bh = breast_height_years(equation, site_index, y2bh)?;
            let height = if smooth {
                index_to_height_smoothed(equation, age, age_type, site_index, y2bh, 0.0, 0.0)?
            } else {
                index_to_height(equation, age, age_type, site_index, y2bh, 0.5)?
            };
            println!(
                "{} {equation} at {age_type} age {age}, site index {site_index}: {}",
                "Height".bold().cyan(),
                format!("{height:.3} m").bold()
            );
        }

        Commands::SiteIndex {
            equation,
            age,
            age_type,
            height,
            iterate,
        } => {
            let estimation = if iterate {
                SiteEstimation::Iterate
            } else {
                SiteEstimation::Direct
            };
            let site_index = height_to_index_by(equation, age, age_type, height, estimation)?;
            println!(
                "{} {equation} at {age_type} age {age}, height {height}: {}",
                "Site index".bold().cyan(),
                format!("{site_index:.3} m").bold()
            );
        }

        Commands::Estimate {
            control,
            stand,
            json,
            output,
        } => {
            let (control, stand) = load(&control, &stand)?;
            let report = Estimator::new(&control, &stand).utilization()?;

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!(
                    "\n{}",
                    format!("Utilization components: stand {}", report.stand_id).bold().cyan()
                );
                print_utilization_report(&report);
            }

            if let Some(path) = output {
                io::writer_for_path(&path)?.write(&report, &path)?;
                eprintln!("{} {}", "Wrote".green(), path.display());
            }
        }

        Commands::Reconcile { control, stand, json } => {
            let (control, stand) = load(&control, &stand)?;
            let result = Estimator::new(&control, &stand).reconcile_diameters()?;

            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                print_reconciliation_table(&result);
            }
        }
    }

    Ok(())
}
