use std::io::{self, BufRead, Write};

use anyhow::Context;
use clap::Parser;
use clap_verbosity_flag::{Verbosity, WarnLevel};
use hexsweeper_core::{BoardView, Difficulty, GameConfig};

use command::{Command, HELP};
use session::{Flow, Session, Setup};

mod command;
mod logging;
mod render;
mod session;

#[derive(Parser, Debug)]
#[command(version, about = "Minesweeper on a hexagonal board", long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: Verbosity<WarnLevel>,

    /// Board preset
    #[arg(
        short,
        long,
        default_value = "medium",
        value_parser = ["easy", "medium", "hard", "extreme"],
    )]
    difficulty: String,

    /// Force a seed for the first board instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// Custom board size, cells along each edge
    #[arg(long, requires = "mines")]
    size: Option<u8>,

    /// Custom mine count
    #[arg(long, requires = "size")]
    mines: Option<u16>,
}

impl Args {
    fn setup(&self) -> anyhow::Result<Setup> {
        Ok(match (self.size, self.mines) {
            (Some(size), Some(mines)) => Setup::Custom(
                GameConfig::new(size, mines)
                    .with_context(|| format!("invalid custom board: size {size}, {mines} mines"))?,
            ),
            _ => Setup::Preset(Difficulty::from_name(&self.difficulty)),
        })
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logging::init_logging(args.verbose.tracing_level_filter())?;
    log::debug!("{args:?}");

    let mut session = Session::new(args.setup()?, args.seed);
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    writeln!(stdout, "{HELP}")?;
    let mut lines = stdin.lock().lines();
    loop {
        write!(
            stdout,
            "\n{}> ",
            render::render(&BoardView::from_board(session.board()))
        )?;
        stdout.flush().context("flushing stdout")?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line.context("reading command")?;
        if line.trim().is_empty() {
            continue;
        }

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(err) => {
                writeln!(stdout, "{err:#}")?;
                continue;
            }
        };

        let (flow, message) = session.apply(command);
        if let Some(message) = message {
            writeln!(stdout, "{message}")?;
        }
        if flow == Flow::Quit {
            break;
        }
    }

    Ok(())
}
