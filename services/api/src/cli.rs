use crate::demo::{run_curriculum, run_demo, run_recommend, CurriculumArgs, DemoArgs, RecommendArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use pathfinder::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Pathfinder",
    about = "Recommend a career path and track level progression from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Recommend a career path for a set of profile answers
    Recommend(RecommendArgs),
    /// Print the level-by-level roadmap for a career path
    Curriculum(CurriculumArgs),
    /// Walk a sample learner through enrolment, quizzes, and certificates
    Demo(DemoArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Recommend(args) => run_recommend(args),
        Command::Curriculum(args) => run_curriculum(args),
        Command::Demo(args) => run_demo(args),
    }
}
