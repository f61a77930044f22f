use clap::Parser;
use colored::Colorize;
use soho_guard::cli::{run_interactive, run_one_shot, Args};
use soho_guard::{open_log_sink, Config, Session};
use std::error::Error;
use std::process::ExitCode;

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let config = Config::from_env();
    let mut sink = open_log_sink(&config)?;
    log::info!("Traffic log: {}", sink.path().display());
    let mut session = Session::new(config.timezone);

    match args.command {
        Some(one_shot) => {
            println!("{}", run_one_shot(&one_shot, &mut session, &mut sink, &config)?);
        }
        None => {
            let stdin = std::io::stdin();
            run_interactive(
                stdin.lock(),
                std::io::stdout(),
                &mut session,
                &mut sink,
                &config,
            )?;
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    // Do as little as possible in main.rs as it can't contain any tests
    let args = Args::parse();
    dotenv::dotenv().ok();
    if let Err(e) = log4rs::init_file("log4rs.yml", Default::default()) {
        eprintln!("log4rs.yml not loaded ({e}), logging disabled");
    }
    log::info!("#Start main()");

    let status = match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::warn!("Exiting with error: {e}");
            eprintln!("{} {e}", "Error:".red());
            ExitCode::FAILURE
        }
    };
    log::info!("#End main()");
    status
}
