//! sim-runner: headless runner for the outbreak models.
//!
//! Usage:
//!   sim-runner sir -s 175000 -i 10 -b 0.4 -g 0.04
//!   sim-runner zombie --years 5 --format csv
//!   sim-runner diclonius --threads 1 --initial
//!
//! Reports go to stdout, logs to stderr (`RUST_LOG=debug` for every round).

use anyhow::{Context, Result};
use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use outbreak_core::{
    config::{parse_population, parse_rate, parse_threads, parse_years, SimConfig},
    engine::SimEngine,
    error::ConfigError,
    models::ModelKind,
    report::{ReportFormat, WriterSink},
    types::{Population, Year},
};
use std::io::{self, BufWriter};
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "sim-runner")]
#[command(author, version, about = "Deterministic compartmental outbreak simulator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Susceptible, infected, recovered
    Sir {
        #[command(flatten)]
        model: SirArgs,
        #[command(flatten)]
        run: RunArgs,
    },

    /// SIR with infections proportional to S × I / N
    SirMassAction {
        #[command(flatten)]
        model: SirArgs,
        #[command(flatten)]
        run: RunArgs,
    },

    /// Susceptible, quarantined, exposed, infected, recovered
    Sqeir {
        #[command(flatten)]
        model: SqeirArgs,
        #[command(flatten)]
        run: RunArgs,
    },

    /// Zombie apocalypse
    Zombie {
        #[command(flatten)]
        model: ZombieArgs,
        #[command(flatten)]
        run: RunArgs,
    },

    /// Diclonius population growth
    Diclonius {
        #[command(flatten)]
        model: DicloniusArgs,
        #[command(flatten)]
        run: RunArgs,
    },
}

/// Options shared by every model.
#[derive(Args, Debug)]
struct RunArgs {
    /// Years to simulate [default: the model's own horizon]
    #[arg(short, long, value_parser = parse_years)]
    years: Option<Year>,

    /// 1 runs sequentially; one per compartment plus one runs in lockstep
    #[arg(short, long, value_parser = parse_threads)]
    threads: Option<usize>,

    /// Report format
    #[arg(short, long, value_enum, default_value_t = Format::Human)]
    format: Format,

    /// Report the initial values before the first computed month
    #[arg(long)]
    initial: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Human,
    Csv,
    Json,
}

impl From<Format> for ReportFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Human => ReportFormat::Human,
            Format::Csv   => ReportFormat::Csv,
            Format::Json  => ReportFormat::Json,
        }
    }
}

/// Named overrides a subcommand contributes to the model's defaults.
trait Overrides {
    fn populations(&self) -> Vec<(&'static str, Option<Population>)>;
    fn rates(&self) -> Vec<(&'static str, Option<f64>)>;
}

#[derive(Args, Debug)]
struct SirArgs {
    /// Initial susceptible population
    #[arg(short, long, value_parser = parse_population, allow_negative_numbers = true)]
    susceptible: Option<Population>,

    /// Initial infected population
    #[arg(short, long, value_parser = parse_population, allow_negative_numbers = true)]
    infected: Option<Population>,

    /// Initial recovered population
    #[arg(short, long, value_parser = parse_population, allow_negative_numbers = true)]
    recovered: Option<Population>,

    /// Infection rate (susceptible to infected)
    #[arg(short = 'b', long, value_parser = parse_rate, allow_negative_numbers = true)]
    infection_rate: Option<f64>,

    /// Recovery rate (infected to recovered)
    #[arg(short = 'g', long, value_parser = parse_rate, allow_negative_numbers = true)]
    recovery_rate: Option<f64>,
}

impl Overrides for SirArgs {
    fn populations(&self) -> Vec<(&'static str, Option<Population>)> {
        vec![
            ("susceptible", self.susceptible),
            ("infected", self.infected),
            ("recovered", self.recovered),
        ]
    }

    fn rates(&self) -> Vec<(&'static str, Option<f64>)> {
        vec![("infection_rate", self.infection_rate), ("recovery_rate", self.recovery_rate)]
    }
}

#[derive(Args, Debug)]
struct SqeirArgs {
    /// Initial susceptible population
    #[arg(short, long, value_parser = parse_population, allow_negative_numbers = true)]
    susceptible: Option<Population>,

    /// Initial quarantined population
    #[arg(short, long, value_parser = parse_population, allow_negative_numbers = true)]
    quarantined: Option<Population>,

    /// Initial exposed population
    #[arg(short, long, value_parser = parse_population, allow_negative_numbers = true)]
    exposed: Option<Population>,

    /// Initial infected population
    #[arg(short, long, value_parser = parse_population, allow_negative_numbers = true)]
    infected: Option<Population>,

    /// Initial recovered population
    #[arg(short, long, value_parser = parse_population, allow_negative_numbers = true)]
    recovered: Option<Population>,

    /// Infection rate
    #[arg(short = 'b', long, value_parser = parse_rate, allow_negative_numbers = true)]
    infection_rate: Option<f64>,

    /// Recovery rate
    #[arg(short = 'g', long, value_parser = parse_rate, allow_negative_numbers = true)]
    recovery_rate: Option<f64>,
}

impl Overrides for SqeirArgs {
    fn populations(&self) -> Vec<(&'static str, Option<Population>)> {
        vec![
            ("susceptible", self.susceptible),
            ("quarantined", self.quarantined),
            ("exposed", self.exposed),
            ("infected", self.infected),
            ("recovered", self.recovered),
        ]
    }

    fn rates(&self) -> Vec<(&'static str, Option<f64>)> {
        vec![("infection_rate", self.infection_rate), ("recovery_rate", self.recovery_rate)]
    }
}

#[derive(Args, Debug)]
struct ZombieArgs {
    /// Initial susceptible population
    #[arg(short, long, value_parser = parse_population, allow_negative_numbers = true)]
    susceptible: Option<Population>,

    /// Initial immune population
    #[arg(short = 'm', long, value_parser = parse_population, allow_negative_numbers = true)]
    immune: Option<Population>,

    /// Initial infected population
    #[arg(short, long, value_parser = parse_population, allow_negative_numbers = true)]
    infected: Option<Population>,

    /// Initial zombie population
    #[arg(short, long, value_parser = parse_population, allow_negative_numbers = true)]
    zombies: Option<Population>,

    /// Initial dead population
    #[arg(short, long, value_parser = parse_population, allow_negative_numbers = true)]
    dead: Option<Population>,

    /// Infection rate (susceptible to infected)
    #[arg(short = 'b', long, value_parser = parse_rate, allow_negative_numbers = true)]
    infection_rate: Option<f64>,

    /// Conversion rate (infected to zombie)
    #[arg(short = 'c', long, value_parser = parse_rate, allow_negative_numbers = true)]
    zombie_rate: Option<f64>,

    /// Death rate of the living
    #[arg(short = 'a', long, value_parser = parse_rate, allow_negative_numbers = true)]
    death_rate: Option<f64>,

    /// Death rate of zombies
    #[arg(short = 'k', long, value_parser = parse_rate, allow_negative_numbers = true)]
    zombie_death_rate: Option<f64>,
}

impl Overrides for ZombieArgs {
    fn populations(&self) -> Vec<(&'static str, Option<Population>)> {
        vec![
            ("susceptible", self.susceptible),
            ("immune", self.immune),
            ("infected", self.infected),
            ("zombies", self.zombies),
            ("dead", self.dead),
        ]
    }

    fn rates(&self) -> Vec<(&'static str, Option<f64>)> {
        vec![
            ("infection_rate", self.infection_rate),
            ("zombie_rate", self.zombie_rate),
            ("death_rate", self.death_rate),
            ("zombie_death_rate", self.zombie_death_rate),
        ]
    }
}

#[derive(Args, Debug)]
struct DicloniusArgs {
    /// Initial uninfected human population
    #[arg(short = 'u', long, value_parser = parse_population, allow_negative_numbers = true)]
    humans: Option<Population>,

    /// Initial carrier population
    #[arg(short, long, value_parser = parse_population, allow_negative_numbers = true)]
    carriers: Option<Population>,

    /// Initial queen population
    #[arg(short, long, value_parser = parse_population, allow_negative_numbers = true)]
    queens: Option<Population>,

    /// Initial silphalet population
    #[arg(short = 'p', long, value_parser = parse_population, allow_negative_numbers = true)]
    silphalets: Option<Population>,

    /// Infection rate
    #[arg(short = 'b', long, value_parser = parse_rate, allow_negative_numbers = true)]
    infection_rate: Option<f64>,

    /// Human births per 1000 per year
    #[arg(long, value_parser = parse_rate, allow_negative_numbers = true)]
    human_birth_rate: Option<f64>,

    /// Queen births per 1000 per year
    #[arg(long, value_parser = parse_rate, allow_negative_numbers = true)]
    queen_birth_rate: Option<f64>,

    /// Silphalet births per 1000 per year
    #[arg(long, value_parser = parse_rate, allow_negative_numbers = true)]
    silphalet_birth_rate: Option<f64>,
}

impl Overrides for DicloniusArgs {
    fn populations(&self) -> Vec<(&'static str, Option<Population>)> {
        vec![
            ("humans", self.humans),
            ("carriers", self.carriers),
            ("queens", self.queens),
            ("silphalets", self.silphalets),
        ]
    }

    fn rates(&self) -> Vec<(&'static str, Option<f64>)> {
        vec![
            ("infection_rate", self.infection_rate),
            ("human_birth_rate", self.human_birth_rate),
            ("queen_birth_rate", self.queen_birth_rate),
            ("silphalet_birth_rate", self.silphalet_birth_rate),
        ]
    }
}

impl Commands {
    fn parts(&self) -> (ModelKind, &dyn Overrides, &RunArgs) {
        match self {
            Commands::Sir { model, run }           => (ModelKind::Sir, model, run),
            Commands::SirMassAction { model, run } => (ModelKind::SirMassAction, model, run),
            Commands::Sqeir { model, run }         => (ModelKind::Sqeir, model, run),
            Commands::Zombie { model, run }        => (ModelKind::Zombie, model, run),
            Commands::Diclonius { model, run }     => (ModelKind::Diclonius, model, run),
        }
    }
}

fn configure(kind: ModelKind, overrides: &dyn Overrides, run: &RunArgs) -> Result<SimConfig, ConfigError> {
    let mut builder = SimConfig::builder(kind.spec()?).emit_initial_state(run.initial);
    for (name, value) in overrides.populations() {
        if let Some(value) = value {
            builder = builder.population(name, value);
        }
    }
    for (name, value) in overrides.rates() {
        if let Some(value) = value {
            builder = builder.rate(name, value);
        }
    }
    if let Some(years) = run.years {
        builder = builder.years(years);
    }
    if let Some(threads) = run.threads {
        builder = builder.threads(threads);
    }
    builder.build()
}

fn main() -> ExitCode {
    env_logger::init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            if e.downcast_ref::<ConfigError>().is_some() {
                eprintln!("\n{}", Cli::command().render_usage());
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let (kind, overrides, args) = cli.command.parts();
    let config = configure(kind, overrides, args)
        .with_context(|| format!("cannot configure model '{kind}'"))?;

    let stdout = io::stdout();
    let mut sink = WriterSink::new(BufWriter::new(stdout.lock()), args.format.into());
    let summary = SimEngine::new(config)
        .run(&mut sink)
        .with_context(|| format!("model '{kind}' did not finish cleanly"))?;

    log::info!(
        "{} reports written; final values {:?}",
        summary.rounds,
        summary.final_values.iter().map(|c| (c.name, c.value)).collect::<Vec<_>>()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use outbreak_core::config::Execution;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("sim-runner").chain(args.iter().copied()))
    }

    fn config_for(args: &[&str]) -> Result<SimConfig, ConfigError> {
        let cli = parse(args).unwrap();
        let (kind, overrides, run) = cli.command.parts();
        configure(kind, overrides, run)
    }

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn sir_flags_override_defaults() {
        let config = config_for(&["sir", "-s", "1000", "-i", "5", "-b", "0.2", "-g", "0.1"]).unwrap();
        assert_eq!(config.initial, vec![1_000, 5, 0]);
        assert_eq!(config.rates.by_name("infection_rate"), Some(0.2));
        assert_eq!(config.rates.by_name("recovery_rate"), Some(0.1));
        assert_eq!(config.execution, Execution::Lockstep);
    }

    #[test]
    fn missing_value_names_the_flag() {
        let err = parse(&["sir", "-s"]).unwrap_err();
        assert!(err.to_string().contains("-s"), "{err}");
    }

    #[test]
    fn negative_population_is_rejected_while_parsing() {
        let err = parse(&["sir", "-s", "-5"]).unwrap_err();
        assert!(err.to_string().contains("non-negative"), "{err}");
    }

    #[test]
    fn malformed_rate_is_rejected_while_parsing() {
        let err = parse(&["zombie", "-b", "fast"]).unwrap_err();
        assert!(err.to_string().contains("fast"), "{err}");
    }

    #[test]
    fn unknown_flag_is_rejected() {
        assert!(parse(&["sir", "-z", "3"]).is_err());
    }

    #[test]
    fn wrong_thread_count_fails_configuration() {
        let err = config_for(&["sir", "--threads", "3"]).unwrap_err();
        assert_eq!(err, ConfigError::ThreadCount { model: "sir", expected: 4, actual: 3 });
        assert_eq!(config_for(&["sir", "-t", "1"]).unwrap().execution, Execution::Sequential);
    }

    #[test]
    fn shared_options_apply_to_every_model() {
        let cli = parse(&["diclonius", "-y", "3", "-f", "csv", "--initial", "-u", "10"]).unwrap();
        let (kind, overrides, run) = cli.command.parts();
        assert_eq!(kind, ModelKind::Diclonius);
        assert_eq!(run.format, Format::Csv);
        let config = configure(kind, overrides, run).unwrap();
        assert_eq!(config.years, 3);
        assert!(config.emit_initial_state);
        assert_eq!(config.population("humans"), Some(10));
    }

    #[test]
    fn zombie_and_sqeir_flags_reach_their_compartments() {
        let zombie = config_for(&["zombie", "-m", "7", "-z", "3", "-k", "0.9"]).unwrap();
        assert_eq!(zombie.population("immune"), Some(7));
        assert_eq!(zombie.population("zombies"), Some(3));
        assert_eq!(zombie.rates.by_name("zombie_death_rate"), Some(0.9));

        let sqeir = config_for(&["sqeir", "-q", "4", "-e", "2"]).unwrap();
        assert_eq!(sqeir.initial, vec![175_000, 4, 2, 10, 0]);
    }
}
