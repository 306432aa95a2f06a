use clap::Parser;
use readjour::application::{
    CheckTemplatesService, InitService, JourneyOptions, JourneyService,
};
use readjour::cli::{format_journey_list, format_template_failures, parse_cli_date, Cli, Commands};
use readjour::error::ReadjourError;
use readjour::infrastructure::FileSystemRepository;
use tracing_subscriber::filter::LevelFilter;

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(cli) {
        Ok(_) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {}", e.display_with_suggestions());
            std::process::exit(e.exit_code());
        }
    }
}

fn run(cli: Cli) -> Result<(), ReadjourError> {
    match cli.command {
        Commands::Init { path } => InitService::execute(&path),
        Commands::Journeys { book, from, to } => {
            let options = JourneyOptions {
                from: from.as_deref().map(parse_cli_date).transpose()?,
                to: to.as_deref().map(parse_cli_date).transpose()?,
                book,
            };

            let repo = FileSystemRepository::discover()?;
            let report = JourneyService::new(repo).execute(options)?;

            if !report.template_errors.is_empty() {
                eprintln!(
                    "Warning: {} template(s) failed to compile and were skipped; run 'readjour check'",
                    report.template_errors.len()
                );
            }
            if report.is_empty() {
                return Err(ReadjourError::NoJourneys(
                    "no template matched any line".to_string(),
                ));
            }

            print!("{}", format_journey_list(&report.events));
            Ok(())
        }
        Commands::Check => {
            let repo = FileSystemRepository::discover()?;
            let check = CheckTemplatesService::new(repo).execute()?;

            if check.is_ok() {
                println!("All {} templates compiled", check.compiled);
                Ok(())
            } else {
                print!("{}", format_template_failures(&check.failures));
                Err(ReadjourError::Config(format!(
                    "{} template(s) failed to compile",
                    check.failures.len()
                )))
            }
        }
    }
}
