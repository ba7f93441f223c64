use std::{io::Write as _, path::PathBuf};

use tokenrace_dataset::variant::GameVariant;
use tokenrace_events::{
    detect::compute_events, format::format_highlight, policy::EventPolicy,
    select::select_highlights,
};

use crate::util::{self, Output};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct HighlightsArg {
    /// Path to a benchmark JSON file (full export or pre-filtered)
    #[arg(long)]
    game_data: PathBuf,
    /// Game name; required when the file contains several games
    #[arg(long)]
    game_name: Option<String>,
    /// Map seed; required when the file contains several games
    #[arg(long)]
    seed: Option<u64>,
    /// Game variant; inferred from the game name when omitted
    #[arg(long)]
    variant: Option<GameVariant>,
    /// Number of highlights to select
    #[arg(long, default_value_t = 3)]
    count: usize,
    /// Emit the selected events as JSON instead of prose
    #[arg(long)]
    json: bool,
    /// Output file path (stdout if omitted)
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &HighlightsArg) -> anyhow::Result<()> {
    let logs = util::load_game_logs(&arg.game_data)?;
    let ((game_name, _), group) = util::select_game(logs, arg.game_name.as_deref(), arg.seed)?;
    let variant = util::resolve_variant(arg.variant, &game_name)?;
    let race = util::build_race(&group, variant)?;

    let events = compute_events(&race);
    let highlights = select_highlights(&events, arg.count, &EventPolicy::default());
    eprintln!(
        "{} events detected, {} selected",
        events.len(),
        highlights.len()
    );

    if arg.json {
        Output::save_json(&highlights, arg.output.clone())?;
    } else {
        let mut output = Output::from_output_path(arg.output.clone())?;
        for highlight in &highlights {
            writeln!(
                output,
                "Round {:>3}: {}",
                highlight.round + 1,
                format_highlight(highlight)
            )?;
        }
    }
    Ok(())
}
