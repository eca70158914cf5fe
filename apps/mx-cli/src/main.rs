mod error;
mod io;

use clap::{Parser, Subcommand};
use error::{CliError, CliResult};
use mx_catalog::{Catalog, CitrusKind};
use mx_core::ml;
use mx_mixture::{Mixture, MixtureProperties, citrus_juice, simple_syrup};
use mx_solver::{Targets, fit_volume, solve_with_config};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "mx-cli")]
#[command(about = "mixlab CLI - beverage mixture properties and composition solving", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List catalog substances, optionally filtered
    Catalog {
        /// Matched against id, name and aliases
        query: Option<String>,
    },
    /// Print the properties of a mixture file
    Inspect {
        /// Path to the mixture JSON file
        mixture_path: PathBuf,
    },
    /// Write a ready-made mixture (lemon, lime, orange, grapefruit, syrup)
    Preset {
        name: String,
        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Rescale a mixture to a volume
    FitVolume {
        /// Path to the mixture JSON file
        mixture_path: PathBuf,
        /// Target volume in millilitres
        #[arg(long)]
        ml: f64,
        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Search ingredient masses for target properties
    Solve {
        /// Path to the mixture JSON file
        mixture_path: PathBuf,
        /// Target volume in millilitres
        #[arg(long)]
        volume: f64,
        /// Target alcohol by volume [%]
        #[arg(long)]
        abv: f64,
        /// Target Brix [%]
        #[arg(long)]
        brix: f64,
        /// Target pH
        #[arg(long, default_value_t = 7.0)]
        ph: f64,
        /// Solver settings (YAML)
        #[arg(long)]
        config: Option<PathBuf>,
        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> CliResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let catalog = Catalog::builtin();

    match cli.command {
        Commands::Catalog { query } => cmd_catalog(&catalog, query.as_deref()),
        Commands::Inspect { mixture_path } => cmd_inspect(&catalog, &mixture_path),
        Commands::Preset { name, output } => cmd_preset(&name, output.as_deref()),
        Commands::FitVolume {
            mixture_path,
            ml,
            output,
        } => cmd_fit_volume(&catalog, &mixture_path, ml, output.as_deref()),
        Commands::Solve {
            mixture_path,
            volume,
            abv,
            brix,
            ph,
            config,
            output,
        } => {
            let targets = Targets::new(ml(volume), abv, brix, ph);
            cmd_solve(
                &catalog,
                &mixture_path,
                &targets,
                config.as_deref(),
                output.as_deref(),
            )
        }
    }
}

fn cmd_catalog(catalog: &Catalog, query: Option<&str>) -> CliResult<()> {
    let substances = catalog.search(query.unwrap_or(""));
    if substances.is_empty() {
        println!("No substances match");
        return Ok(());
    }
    for substance in substances {
        let pka = if substance.pka.is_empty() {
            String::new()
        } else {
            let values: Vec<String> = substance.pka.iter().map(|p| format!("{p:.2}")).collect();
            format!("  pKa {}", values.join("/"))
        };
        println!(
            "  {:<18} {:<20} {:.3} g/mL  {:.3} g/mol{}",
            substance.id.as_str(),
            substance.name,
            substance.pure_density, substance.molecular_mass, pka
        );
    }
    Ok(())
}

fn cmd_inspect(catalog: &Catalog, path: &Path) -> CliResult<()> {
    let mixture = io::load_mixture(path, catalog)?;
    println!("Mixture {}", mixture.id());
    for ingredient in mixture.ingredients() {
        println!("  {:<24} {:>10.3} g", ingredient.name, ingredient.active_mass());
    }
    print_properties(&mixture.properties(catalog)?);
    Ok(())
}

fn cmd_preset(name: &str, output: Option<&Path>) -> CliResult<()> {
    let mixture = match name {
        "syrup" => simple_syrup(1.0, 1.0)?,
        other => {
            let kind: CitrusKind = other
                .parse()
                .map_err(|_| CliError::UnknownPreset(other.to_string()))?;
            citrus_juice(kind)
        }
    };
    io::save_mixture(&mixture, output)
}

fn cmd_fit_volume(
    catalog: &Catalog,
    path: &Path,
    target_ml: f64,
    output: Option<&Path>,
) -> CliResult<()> {
    let mut mixture = io::load_mixture(path, catalog)?;
    fit_volume(
        &mut mixture,
        ml(target_ml),
        catalog,
        &mx_solver::VolumeConfig::default(),
    )?;
    eprintln!("✓ Fitted to {target_ml} mL ({:.3} g)", mixture.mass());
    io::save_mixture(&mixture, output)
}

fn cmd_solve(
    catalog: &Catalog,
    path: &Path,
    targets: &Targets,
    config: Option<&Path>,
    output: Option<&Path>,
) -> CliResult<()> {
    let mixture: Mixture = io::load_mixture(path, catalog)?;
    let config = io::load_config(config)?;
    tracing::debug!(?config, "solver config");
    let solution = solve_with_config(&mixture, targets, catalog, &config)?;

    eprintln!(
        "✓ Solved in {} iterations (error {:.2e})",
        solution.iterations, solution.error
    );
    io::save_mixture(&solution.mixture, output)?;
    if output.is_some() {
        print_properties(&solution.properties);
    }
    Ok(())
}

fn print_properties(props: &MixtureProperties) {
    println!("  Mass:    {:.3} g", props.mass);
    println!("  Volume:  {:.3} mL", props.volume);
    println!("  Density: {:.4} g/mL", props.density);
    println!("  ABV:     {:.2} %", props.abv);
    println!("  Brix:    {:.2} %", props.brix);
    println!("  pH:      {:.2}", props.ph);
    println!("  Energy:  {:.1} kcal", props.kcal);
}
