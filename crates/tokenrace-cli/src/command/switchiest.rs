use std::path::PathBuf;

use tokenrace_events::detect::detect_lead_changes;

use crate::util;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct SwitchiestArg {
    /// Path to a full benchmark export
    #[arg(long)]
    game_data: PathBuf,
    /// How many games to list
    #[arg(long, default_value_t = 10)]
    top: usize,
}

/// Rank every (game, seed) group in an export by how often the lead changed
/// hands — a quick way to find the most dramatic game of the day.
pub(crate) fn run(arg: &SwitchiestArg) -> anyhow::Result<()> {
    let logs = util::load_game_logs(&arg.game_data)?;
    let groups = util::group_logs(logs);

    let mut ranking = Vec::new();
    for ((game_name, seed), group) in groups {
        let Ok(variant) = game_name.parse() else {
            eprintln!("skipping {game_name} (seed {seed}): unknown game variant");
            continue;
        };
        let race = match util::build_race(&group, variant) {
            Ok(race) => race,
            Err(err) => {
                eprintln!("skipping {game_name} (seed {seed}): {err}");
                continue;
            }
        };
        let switches = detect_lead_changes(&race).len();
        ranking.push((game_name, seed, switches, race.rounds_len()));
    }

    ranking.sort_by(|a, b| b.2.cmp(&a.2));
    println!("game,seed,lead_changes,rounds");
    for (game_name, seed, switches, rounds) in ranking.iter().take(arg.top) {
        println!("{game_name},{seed},{switches},{rounds}");
    }
    Ok(())
}
