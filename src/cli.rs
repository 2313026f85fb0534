use clap::Parser;

#[derive(Parser)]
#[command(name = "kubectl-triage")]
#[command(version)]
#[command(about = "Ask a completion service why pods in the default namespace are not running")]
pub struct Cli {
    /// Enable debug logging (includes the diagnostic sent for each pod)
    #[arg(short, long)]
    pub verbose: bool,
}
