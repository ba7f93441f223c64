use std::{
    fs::File,
    io::{self, BufWriter, StdoutLock, Write as _},
    path::{Path, PathBuf},
};

use anyhow::{Context, bail};
use serde::Deserialize;
use tokenrace_dataset::{
    normalize::normalize_benchmark,
    raw::{RawBenchmark, RawGameLog},
    variant::GameVariant,
};
use tokenrace_race::RaceData;

#[derive(Debug)]
pub enum Output {
    Stdout {
        writer: StdoutLock<'static>,
    },
    File {
        writer: BufWriter<File>,
        path: PathBuf,
    },
}

impl Output {
    pub fn save_json<T>(value: &T, output_path: Option<PathBuf>) -> anyhow::Result<()>
    where
        T: serde::Serialize,
    {
        let mut output = Output::from_output_path(output_path)?;
        output.write_json(value)
    }

    pub fn from_output_path(output_path: Option<PathBuf>) -> anyhow::Result<Self> {
        match output_path {
            Some(path) => Output::open(path),
            None => Ok(Output::stdout()),
        }
    }

    pub fn stdout() -> Self {
        Output::Stdout {
            writer: io::stdout().lock(),
        }
    }

    pub fn open(path: PathBuf) -> anyhow::Result<Self> {
        let file = File::create(&path)
            .with_context(|| format!("Failed to create output file: {}", path.display()))?;
        Ok(Output::File {
            writer: BufWriter::new(file),
            path,
        })
    }

    pub fn display_path(&self) -> String {
        match self {
            Output::Stdout { .. } => "stdout".to_string(),
            Output::File { path, .. } => path.display().to_string(),
        }
    }

    pub fn write_json<T>(&mut self, value: T) -> anyhow::Result<()>
    where
        T: serde::Serialize,
    {
        serde_json::to_writer_pretty(&mut *self, &value)
            .with_context(|| format!("Failed to write JSON to {}", self.display_path()))?;
        writeln!(&mut *self).with_context(|| {
            format!(
                "Failed to write newline after JSON to {}",
                self.display_path()
            )
        })?;
        self.flush()
            .with_context(|| format!("Failed to flush output to {}", self.display_path()))?;
        Ok(())
    }
}

impl io::Write for Output {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Output::Stdout { writer } => writer.write(buf),
            Output::File { writer, .. } => writer.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Output::Stdout { writer } => writer.flush(),
            Output::File { writer, .. } => writer.flush(),
        }
    }
}

pub fn read_json_file<T, P>(file_kind: &str, path: P) -> anyhow::Result<T>
where
    T: serde::de::DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("Failed to open {} file: {}", file_kind, path.display()))?;

    let reader = io::BufReader::new(file);
    let value = serde_json::from_reader(reader).with_context(|| {
        format!(
            "Failed to parse {} JSON file: {}",
            file_kind,
            path.display()
        )
    })?;

    Ok(value)
}

/// A benchmark JSON file: either a full export (object with `game_results`)
/// or a pre-filtered per-game log array as served to the dashboard.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum GameLogFile {
    Export(RawBenchmark),
    Logs(Vec<RawGameLog>),
}

/// Read game logs from either benchmark file shape.
pub fn load_game_logs<P>(path: P) -> anyhow::Result<Vec<RawGameLog>>
where
    P: AsRef<Path>,
{
    let file: GameLogFile = read_json_file("benchmark", path)?;
    Ok(match file {
        GameLogFile::Export(export) => export.game_results,
        GameLogFile::Logs(logs) => logs,
    })
}

/// Group logs by (game name, seed), preserving first-seen group order.
pub fn group_logs(logs: Vec<RawGameLog>) -> Vec<((String, u64), Vec<RawGameLog>)> {
    let mut groups: Vec<((String, u64), Vec<RawGameLog>)> = Vec::new();
    for log in logs {
        let (name, seed) = log.identity();
        let key = (name.to_owned(), seed);
        match groups.iter_mut().find(|(k, _)| *k == key) {
            Some((_, group)) => group.push(log),
            None => groups.push((key, vec![log])),
        }
    }
    groups
}

/// Pick one (game, seed) group out of a log file.
///
/// With an explicit name + seed the matching group is returned; without,
/// the file must contain exactly one game.
pub fn select_game(
    logs: Vec<RawGameLog>,
    game_name: Option<&str>,
    seed: Option<u64>,
) -> anyhow::Result<((String, u64), Vec<RawGameLog>)> {
    let mut groups = group_logs(logs);
    match (game_name, seed) {
        (Some(name), Some(seed)) => {
            let position = groups
                .iter()
                .position(|((n, s), _)| n == name && *s == seed);
            match position {
                Some(index) => Ok(groups.swap_remove(index)),
                None => {
                    let available: Vec<String> = groups
                        .iter()
                        .map(|((n, s), _)| format!("{n} (seed {s})"))
                        .collect();
                    bail!(
                        "no logs for game '{}' seed {}; file contains: {}",
                        name,
                        seed,
                        available.join(", ")
                    )
                }
            }
        }
        (None, None) => {
            if groups.len() == 1 {
                Ok(groups.remove(0))
            } else {
                bail!(
                    "file contains {} games; pass --game-name and --seed to pick one",
                    groups.len()
                )
            }
        }
        _ => bail!("pass both --game-name and --seed, or neither"),
    }
}

/// Use the explicit variant when given, otherwise infer it from the game
/// name (variant names double as game names).
pub fn resolve_variant(
    explicit: Option<GameVariant>,
    game_name: &str,
) -> anyhow::Result<GameVariant> {
    if let Some(variant) = explicit {
        return Ok(variant);
    }
    game_name.parse().map_err(|_| {
        anyhow::anyhow!("cannot infer a variant from game name '{game_name}'; pass --variant")
    })
}

/// Normalize one game's logs and build the race history.
pub fn build_race(logs: &[RawGameLog], variant: GameVariant) -> anyhow::Result<RaceData> {
    let dataset = normalize_benchmark(logs, variant)?;
    Ok(RaceData::new(&dataset)?)
}
