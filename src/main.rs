// Entrypoint for the country statistics console.
// - Keeps `main` small: read config, open the database, hand everything
//   to the menu loop.
// - Exit status is 0 after "Quit" and 1 when the session ends on a fatal
//   error (startup failure or a broken input stream).

use anyhow::Result;
use publicdata_cli::{config::Config, prompt::Prompter, seed, ui::main_menu};
use std::io::{self, IsTerminal};
use std::process::ExitCode;

fn run() -> Result<()> {
    let config = Config::from_env()?;
    env_logger::Builder::new()
        .filter_level(config.log_level)
        .init();

    let dao = config.open_dao()?;
    let countries = seed::load_seed(config.seed_path.as_deref())?;
    seed::seed_once(&dao, countries)?;

    let stdout = io::stdout();
    let mut prompter = Prompter::new(io::stdin().lock(), stdout.lock()).styled(stdout.is_terminal());
    main_menu(&dao, &mut prompter)?;
    Ok(())
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("\n{e:#}");
            ExitCode::FAILURE
        }
    }
}
