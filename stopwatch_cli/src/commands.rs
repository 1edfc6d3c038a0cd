use clap::Subcommand;

use self::{run::RunArgs, show::ShowArgs};
use crate::Env;

mod run;
mod show;

#[derive(Subcommand)]
pub enum Commands {
    /// Simulate the stopwatch driven by a stimulus script
    Run(RunArgs),
    /// Show how a time value appears on the display
    Show(ShowArgs),
}

pub trait Run {
    fn run(&self, env: &Env) -> anyhow::Result<()>;
}

impl Commands {
    pub fn run(&self, env: &Env) -> anyhow::Result<()> {
        match self {
            Self::Run(args) => args.run(env),
            Self::Show(args) => args.run(env),
        }
    }
}
