use std::path::PathBuf;

use tokenrace_dataset::variant::GameVariant;
use tokenrace_race::rank::rank_by_best_score;

use crate::util;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct LeaderboardArg {
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
}

pub(crate) fn run(arg: &LeaderboardArg) -> anyhow::Result<()> {
    let logs = util::load_game_logs(&arg.game_data)?;
    let ((game_name, seed), group) =
        util::select_game(logs, arg.game_name.as_deref(), arg.seed)?;
    let variant = util::resolve_variant(arg.variant, &game_name)?;
    let race = util::build_race(&group, variant)?;

    println!(
        "{} (seed {}) — {} models, {} rounds",
        game_name,
        seed,
        race.models().len(),
        race.rounds_len()
    );
    let Some(last) = race.frames().last() else {
        return Ok(());
    };
    for (index, entry) in rank_by_best_score(last).iter().enumerate() {
        let company = entry.company.to_string();
        println!(
            "{:>3}  {:<24} {:<12} {:>10.2}  (round {})",
            index + 1,
            entry.nice_model,
            company,
            entry.best_score,
            entry.best_round_index + 1
        );
    }
    Ok(())
}
