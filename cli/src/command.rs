use std::str::FromStr;

use anyhow::{Context, bail};
use hexsweeper_core::{Coord, Coord2, Difficulty};

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Command {
    Reveal(Coord2),
    Flag(Coord2),
    NewGame,
    SetDifficulty(Difficulty),
    Help,
    Quit,
}

pub const HELP: &str = "\
commands:
  r <col> <row>       reveal a cell
  f <col> <row>       flag or unflag a cell
  n                   new game
  d <difficulty>      new game with easy, medium, hard or extreme
  h                   this help
  q                   quit";

fn parse_coords<'a>(mut args: impl Iterator<Item = &'a str>) -> anyhow::Result<Coord2> {
    let (Some(col), Some(row), None) = (args.next(), args.next(), args.next()) else {
        bail!("expected exactly two coordinates: <col> <row>");
    };
    let col: Coord = col.parse().with_context(|| format!("invalid column {col:?}"))?;
    let row: Coord = row.parse().with_context(|| format!("invalid row {row:?}"))?;
    Ok((col, row))
}

impl FromStr for Command {
    type Err = anyhow::Error;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            bail!("empty command, try `h`");
        };

        Ok(match verb.to_ascii_lowercase().as_str() {
            "r" | "reveal" => Command::Reveal(parse_coords(words)?),
            "f" | "flag" => Command::Flag(parse_coords(words)?),
            "n" | "new" => Command::NewGame,
            "d" | "difficulty" => {
                let Some(name) = words.next() else {
                    bail!("missing difficulty name");
                };
                Command::SetDifficulty(Difficulty::from_name(name))
            }
            "h" | "help" | "?" => Command::Help,
            "q" | "quit" | "exit" => Command::Quit,
            other => bail!("unknown command {other:?}, try `h`"),
        })
    }
}
