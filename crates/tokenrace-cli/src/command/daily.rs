use std::path::PathBuf;

use crate::{
    daily::{DailyDay, DailyMonth, day_key, days_in_month},
    util::{self, Output},
};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct DailyArg {
    /// Path to a full benchmark export
    #[arg(long)]
    game_data: PathBuf,
    /// Manifest year
    #[arg(long)]
    year: i32,
    /// Manifest month (1-12)
    #[arg(long)]
    month: u32,
    /// Output file path (stdout if omitted)
    #[arg(long)]
    output: Option<PathBuf>,
}

/// Build a month manifest assigning one game per day, in the deterministic
/// first-seen order of the export. Days beyond the available games stay
/// unassigned.
pub(crate) fn run(arg: &DailyArg) -> anyhow::Result<()> {
    let days = days_in_month(arg.year, arg.month)
        .ok_or_else(|| anyhow::anyhow!("invalid month: {}-{}", arg.year, arg.month))?;

    let logs = util::load_game_logs(&arg.game_data)?;
    let groups = util::group_logs(logs);

    let mut games = Vec::new();
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
        let Some(last) = race.frames().last() else {
            continue;
        };
        let Some(winner) = tokenrace_race::rank::rank_by_best_score(last).first().copied() else {
            continue;
        };
        games.push(DailyDay {
            game_id: format!("{}_{}", game_name.to_lowercase(), seed),
            game_url: format!("/games/{game_name}_{seed}.json"),
            game_type: game_name.clone(),
            best_model: winner.model.clone(),
            best_score: winner.best_score,
        });
    }

    if games.len() < days.len() {
        eprintln!(
            "only {} games for {} days; trailing days stay unassigned",
            games.len(),
            days.len()
        );
    }

    let manifest: DailyMonth = days
        .into_iter()
        .zip(games)
        .map(|(day, game)| (day_key(day), game))
        .collect();
    Output::save_json(&manifest, arg.output.clone())?;
    Ok(())
}
