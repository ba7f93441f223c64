use std::{io::Write as _, path::PathBuf};

use tokenrace_dataset::variant::GameVariant;
use tokenrace_race::RaceData;

use crate::util::{self, Output};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct ExportArg {
    /// Path to a benchmark JSON file (full export or pre-filtered)
    #[arg(long)]
    game_data: PathBuf,
    /// Game name to export
    #[arg(long)]
    game_name: String,
    /// Map seed to export
    #[arg(long)]
    seed: u64,
    /// Game variant; inferred from the game name when omitted
    #[arg(long)]
    variant: Option<GameVariant>,
    /// Output file path (stdout if omitted)
    #[arg(long)]
    output: Option<PathBuf>,
    /// Export format
    #[arg(long, default_value = "json")]
    format: ExportFormat,
}

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, derive_more::FromStr)]
pub(crate) enum ExportFormat {
    #[default]
    Json,
    Csv,
}

/// JSON: list of rounds, each round a list of model objects with the fields
/// model, nice_model, company, color, logo, score, move, token_scores.
/// CSV: one row per model with cumulative-best scores, columns model,
/// nice_model, company, logo, Round 1..T.
pub(crate) fn run(arg: &ExportArg) -> anyhow::Result<()> {
    let logs = util::load_game_logs(&arg.game_data)?;
    let ((game_name, seed), group) =
        util::select_game(logs, Some(arg.game_name.as_str()), Some(arg.seed))?;
    let variant = util::resolve_variant(arg.variant, &game_name)?;
    let race = util::build_race(&group, variant)?;

    let mut output = Output::from_output_path(arg.output.clone())?;
    match arg.format {
        ExportFormat::Json => output.write_json(race.build_frames(false))?,
        ExportFormat::Csv => write_csv(&race, &mut output)?,
    }
    eprintln!(
        "Exported {} rounds of {} (seed {}) to {}",
        race.rounds_len(),
        game_name,
        seed,
        output.display_path()
    );
    Ok(())
}

fn write_csv(race: &RaceData, output: &mut Output) -> anyhow::Result<()> {
    let mut header = vec![
        "model".to_owned(),
        "nice_model".to_owned(),
        "company".to_owned(),
        "logo".to_owned(),
    ];
    header.extend((1..=race.rounds_len()).map(|round| format!("Round {round}")));
    writeln!(output, "{}", header.join(","))?;

    for model in race.models() {
        let Some(rounds) = race.rounds_for(model) else {
            continue;
        };
        let Some(first) = rounds.first() else {
            continue;
        };
        let mut fields = vec![
            csv_field(model),
            csv_field(&first.nice_model),
            csv_field(&first.company.to_string()),
            csv_field(first.logo_src.unwrap_or_default()),
        ];
        fields.extend(rounds.iter().map(|entry| entry.best_score.to_string()));
        writeln!(output, "{}", fields.join(","))?;
    }
    Ok(())
}

/// Quote a CSV field only when it needs it.
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_fields_pass_through() {
        assert_eq!(csv_field("gpt-5"), "gpt-5");
    }

    #[test]
    fn fields_with_separators_are_quoted() {
        assert_eq!(csv_field("a,b"), "\"a,b\"");
        assert_eq!(csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn format_parses_case_insensitively() {
        assert_eq!("csv".parse::<ExportFormat>().unwrap(), ExportFormat::Csv);
        assert_eq!("Json".parse::<ExportFormat>().unwrap(), ExportFormat::Json);
    }
}
