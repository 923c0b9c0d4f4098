use std::io;

use alphabeta_chess::{engine::command, eval::MaterialEvaluator};

fn main() -> io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let stdin = io::stdin();
    let stdout = io::stdout();
    command::run(stdin.lock(), stdout.lock(), &MaterialEvaluator)
}
