//! Duel runner output.

use anyhow::Result;
use std::io::Write;
use tictactoe_engine::{Difficulty, DuelSummary, GameRng, run_series};
use tracing::{info, instrument};

/// Plays a duel series and writes the summary as a table or JSON.
#[instrument(skip(output))]
pub fn run<W: Write>(
    x: Difficulty,
    o: Difficulty,
    games: u32,
    seed: Option<u64>,
    json: bool,
    mut output: W,
) -> Result<DuelSummary> {
    let mut rng = seed.map_or_else(GameRng::from_entropy, GameRng::new);
    info!(seed = rng.seed(), "Starting duel series");
    let summary = run_series(x, o, games, &mut rng)?;

    if json {
        serde_json::to_writer_pretty(&mut output, &summary)?;
        writeln!(output)?;
    } else {
        write_table(&summary, &mut output)?;
    }
    Ok(summary)
}

fn write_table<W: Write>(summary: &DuelSummary, output: &mut W) -> Result<()> {
    let games = summary.games().max(1);
    let pct = |n: u32| f64::from(n) / f64::from(games) * 100.0;
    writeln!(output, "{} (X) vs {} (O), {} games", summary.x(), summary.o(), summary.games())?;
    writeln!(output, "  X wins: {:>5}  ({:5.1}%)", summary.x_wins(), pct(*summary.x_wins()))?;
    writeln!(output, "  O wins: {:>5}  ({:5.1}%)", summary.o_wins(), pct(*summary.o_wins()))?;
    writeln!(output, "  Draws:  {:>5}  ({:5.1}%)", summary.draws(), pct(*summary.draws()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_summary() {
        let mut out = Vec::new();
        let summary = run(Difficulty::Hard, Difficulty::Hard, 3, Some(1), true, &mut out)
            .expect("duel runs");
        assert_eq!(*summary.draws(), 3);

        let value: serde_json::Value = serde_json::from_slice(&out).expect("valid json");
        assert_eq!(value["x"], "hard");
        assert_eq!(value["draws"], 3);
    }

    #[test]
    fn test_table_summary() {
        let mut out = Vec::new();
        run(Difficulty::Easy, Difficulty::Medium, 10, Some(2), false, &mut out).expect("duel runs");
        let text = String::from_utf8(out).expect("utf-8");
        assert!(text.starts_with("easy (X) vs medium (O), 10 games"));
        assert!(text.contains("Draws:"));
    }
}
