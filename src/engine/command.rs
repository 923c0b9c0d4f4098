use std::io::{self, BufRead, Write};

use itertools::Itertools;
use log::{info, warn};

use crate::{
    board::{board::Board, fen::build_board},
    error::RequestError,
    eval::Evaluator,
    search::{search, SearchConfig, SearchResult},
    types::pieces::Color,
};

/// Lines that end the loop
pub const SENTINELS: [&str; 2] = ["close program", "quit"];
pub const MAX_DEPTH: i32 = 12;

/// One parsed line of input
#[derive(Debug)]
pub struct Request {
    pub board: Board,
    pub config: SearchConfig,
}

/// Parses `<side>,<depth>,<position>` or `<side>,<position>`. The side field overrides whatever
/// side the position text names; a missing depth falls back to the default search depth.
pub fn parse_request(line: &str) -> Result<Request, RequestError> {
    let fields = line.splitn(3, ',').map(str::trim).collect_vec();
    let (side, depth, position) = match fields.len() {
        3 => (fields[0], Some(fields[1]), fields[2]),
        2 => (fields[0], None, fields[1]),
        n => return Err(RequestError::FieldCount(n)),
    };

    let side = match side {
        "1" | "w" => Color::White,
        "-1" | "b" => Color::Black,
        other => return Err(RequestError::InvalidSide(other.to_string())),
    };

    let config = match depth {
        None => SearchConfig::default(),
        Some(d) => match d.parse::<i32>() {
            Ok(depth) if (1..=MAX_DEPTH).contains(&depth) => SearchConfig::new(depth),
            _ => return Err(RequestError::InvalidDepth { found: d.to_string(), max: MAX_DEPTH }),
        },
    };

    let board = build_board(position)?.with_side_to_move(side);
    Ok(Request { board, config })
}

pub fn format_result(result: &SearchResult) -> String {
    match result.best_move {
        Some(m) => format!("bestmove {} score {}", m.to_lan(), result.score),
        None => format!("bestmove none score {}", result.score),
    }
}

/// Reads requests until a sentinel line or end of input, answering each with one line. A bad
/// request is answered with `error <reason>` and does not stop the loop.
pub fn run<R: BufRead, W: Write, E: Evaluator + ?Sized>(input: R, mut output: W, evaluator: &E) -> io::Result<()> {
    for line in input.lines() {
        let line = line?;
        let line = line.trim();
        if SENTINELS.contains(&line) {
            break;
        }
        if line.is_empty() {
            continue;
        }

        match parse_request(line) {
            Ok(Request { mut board, config }) => {
                info!("searching {} to depth {}", board.to_fen(), config.depth);
                let result = search(&mut board, &config, evaluator);
                writeln!(output, "{}", format_result(&result))?;
            }
            Err(e) => {
                warn!("rejected request '{line}': {e}");
                writeln!(output, "error {e}")?;
            }
        }
        output.flush()?;
    }
    Ok(())
}
