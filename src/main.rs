// src/main.rs

use taskguard::{cli, logging, run};

fn main() {
    match run_main() {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("taskguard error: {err:?}");
            std::process::exit(2);
        }
    }
}

fn run_main() -> anyhow::Result<i32> {
    let args = cli::parse();
    logging::init_logging(args.log_level)?;
    run(args)
}
