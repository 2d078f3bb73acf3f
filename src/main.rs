use std::error::Error;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process;

use clap::{Args, Parser, Subcommand};
use env_logger::{Env, Target};
use log::{info, LevelFilter};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde::Serialize;
use thiserror::Error;

use u_sequencing::generate::random_job_set;
use u_sequencing::io::{read_job_set, read_solution, write_job_set_file, write_solution_file};
use u_sequencing::models::{Job, Solution};
use u_sequencing::scheduler::{try_evaluate, SequenceKpi};
use u_sequencing::solver::{SolveConfig, SolverKind};
use u_sequencing::validation::ValidationError;
use u_sequencing::Cost;

#[derive(Debug, Parser)]
#[command(
    name = "u-sequencing",
    version,
    about = "Single-machine weighted tardiness sequencing",
    arg_required_else_help = true
)]
struct Cli {
    /// Raise the log level (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Job file to solve with the default configuration (same as `solve`)
    #[arg(requires = "output")]
    input: Option<PathBuf>,
    /// Solution file to write
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

impl Cli {
    /// The subcommand to run; two bare paths mean `solve`.
    fn into_command(self) -> Option<Command> {
        match (self.command, self.input, self.output) {
            (Some(command), _, _) => Some(command),
            (None, Some(input), Some(output)) => {
                Some(Command::Solve(SolveArgs::new(input, output)))
            }
            _ => None,
        }
    }
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Sequence a job file and write the solution
    Solve(SolveArgs),
    /// Verify that a solution file matches a job file
    Check(CheckArgs),
    /// Write a random job file
    Generate(GenerateArgs),
}

#[derive(Debug, Args)]
struct SolveArgs {
    /// Job file: count on the first line, then deadline,duration,weight
    input: PathBuf,
    /// Solution file to write
    output: PathBuf,
    /// Algorithm (overrides the config file)
    #[arg(short, long, value_enum)]
    solver: Option<SolverKind>,
    /// Largest instance the exact DP may run on (overrides the config file)
    #[arg(long)]
    max_exact_jobs: Option<usize>,
    /// JSON solve configuration
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Print the solution and its KPIs as JSON on stdout
    #[arg(long)]
    report: bool,
}

impl SolveArgs {
    fn new(input: PathBuf, output: PathBuf) -> Self {
        Self {
            input,
            output,
            solver: None,
            max_exact_jobs: None,
            config: None,
            report: false,
        }
    }
}

#[derive(Debug, Args)]
struct CheckArgs {
    /// Job file
    input: PathBuf,
    /// Solution file to verify
    solution: PathBuf,
}

#[derive(Debug, Args)]
struct GenerateArgs {
    /// Number of jobs
    jobs: usize,
    /// Job file to write
    output: PathBuf,
    /// RNG seed; a random one is drawn and logged when absent
    #[arg(long)]
    seed: Option<u64>,
}

/// Reasons a solution file is rejected by `check`.
#[derive(Debug, Error)]
enum CheckError {
    #[error("invalid sequence: {0}")]
    Sequence(#[from] ValidationError),
    #[error("stated cost {stated} differs from computed cost {actual}")]
    CostMismatch { stated: Cost, actual: Cost },
}

#[derive(Serialize)]
struct Report<'a> {
    solver: SolverKind,
    solution: &'a Solution,
    kpi: SequenceKpi,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let Some(command) = cli.into_command() else {
        eprintln!("error: expected a subcommand or <INPUT> <OUTPUT>");
        process::exit(2);
    };
    if let Err(err) = run(command) {
        eprintln!("error: {err}");
        process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let mut builder = env_logger::Builder::from_env(Env::default().default_filter_or("warn"));
    match verbose {
        0 => {}
        1 => {
            builder.filter_level(LevelFilter::Info);
        }
        2 => {
            builder.filter_level(LevelFilter::Debug);
        }
        _ => {
            builder.filter_level(LevelFilter::Trace);
        }
    }
    builder
        .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
        .target(Target::Stderr)
        .init();
}

fn run(command: Command) -> Result<(), Box<dyn Error>> {
    match command {
        Command::Solve(args) => solve(args),
        Command::Check(args) => check(args),
        Command::Generate(args) => generate(args),
    }
}

fn solve(args: SolveArgs) -> Result<(), Box<dyn Error>> {
    let mut config = match &args.config {
        Some(path) => SolveConfig::from_json(&read_config(path)?)?,
        None => SolveConfig::new(),
    };
    if let Some(solver) = args.solver {
        config = config.with_solver(solver);
    }
    if let Some(max_jobs) = args.max_exact_jobs {
        config = config.with_max_exact_jobs(max_jobs);
    }

    let jobs = read_job_set(&args.input)?;
    let solver = config.resolve(jobs.len())?;
    let solution = config.solve(&jobs)?;

    write_solution_file(&args.output, &solution)?;
    info!("wrote cost {} to {}", solution.cost, args.output.display());

    if args.report {
        let report = Report {
            solver,
            kpi: SequenceKpi::calculate(&jobs, &solution.sequence),
            solution: &solution,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    }
    Ok(())
}

fn check(args: CheckArgs) -> Result<(), Box<dyn Error>> {
    let jobs = read_job_set(&args.input)?;
    let solution = read_solution(&args.solution)?;
    let cost = verify_solution(&jobs, &solution)?;
    println!("ok: {} jobs, cost {cost}", jobs.len());
    Ok(())
}

fn generate(args: GenerateArgs) -> Result<(), Box<dyn Error>> {
    let seed = args.seed.unwrap_or_else(rand::random);
    info!("generating {} jobs with seed {seed}", args.jobs);
    let mut rng = SmallRng::seed_from_u64(seed);
    let jobs = random_job_set(args.jobs, &mut rng);
    write_job_set_file(&args.output, &jobs)?;
    Ok(())
}

/// Recomputes the cost of `solution` and compares it to the stated one.
fn verify_solution(jobs: &[Job], solution: &Solution) -> Result<Cost, CheckError> {
    let actual = try_evaluate(jobs, &solution.sequence)?;
    if actual != solution.cost {
        return Err(CheckError::CostMismatch {
            stated: solution.cost,
            actual,
        });
    }
    Ok(actual)
}

fn read_config(path: &Path) -> Result<String, String> {
    fs::read_to_string(path).map_err(|e| format!("cannot read {}: {e}", path.display()))
}
