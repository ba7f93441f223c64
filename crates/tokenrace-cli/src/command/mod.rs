use clap::{Parser, Subcommand};

use self::{
    calendar::CalendarArg, daily::DailyArg, export::ExportArg, highlights::HighlightsArg,
    leaderboard::LeaderboardArg, switchiest::SwitchiestArg,
};

mod calendar;
mod daily;
mod export;
mod highlights;
mod leaderboard;
mod switchiest;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about = "Token-game benchmark race toolkit", long_about = None)]
pub struct CommandArgs {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Subcommand)]
enum Command {
    /// Export one game's bar-race dataset as JSON or CSV
    Export(#[clap(flatten)] ExportArg),
    /// Print the final ranking of one game
    Leaderboard(#[clap(flatten)] LeaderboardArg),
    /// Detect and select narrative highlights for one game
    Highlights(#[clap(flatten)] HighlightsArg),
    /// Rank games in an export by number of lead changes
    Switchiest(#[clap(flatten)] SwitchiestArg),
    /// Build a daily-archive month manifest from an export
    Daily(#[clap(flatten)] DailyArg),
    /// Render a month manifest as a terminal calendar
    Calendar(#[clap(flatten)] CalendarArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.command {
        Command::Export(arg) => export::run(&arg)?,
        Command::Leaderboard(arg) => leaderboard::run(&arg)?,
        Command::Highlights(arg) => highlights::run(&arg)?,
        Command::Switchiest(arg) => switchiest::run(&arg)?,
        Command::Daily(arg) => daily::run(&arg)?,
        Command::Calendar(arg) => calendar::run(&arg)?,
    }
    Ok(())
}
