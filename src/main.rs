use std::io::Write;
use std::time::Instant;
use tracing::info;

use pr_report::github::GhCli;
use pr_report::RunError;

const EXIT_SUCCESS: i32 = 0;
const EXIT_FAILURE: i32 = 1;
const EXIT_CONFIG: i32 = 4;

fn main() {
    let start_time = Instant::now();

    let html = match pr_report::run(std::env::args_os(), |gh: &str| GhCli::new(gh)) {
        Ok(html) => html,
        // Prints usage or --help/--version and exits with clap's code
        Err(RunError::Usage(e)) => e.exit(),
        Err(RunError::Config(e)) => {
            eprintln!("Config error: {:?}", e);
            std::process::exit(EXIT_CONFIG);
        }
        Err(RunError::Report(e)) => {
            eprintln!("Error: {:?}", e);
            std::process::exit(EXIT_FAILURE);
        }
    };

    // A closed pipe (`pr-report ... | head`) is an error, not a panic
    let mut stdout = std::io::stdout().lock();
    if let Err(e) = writeln!(stdout, "{}", html).and_then(|_| stdout.flush()) {
        eprintln!("Failed to write report: {}", e);
        std::process::exit(EXIT_FAILURE);
    }

    info!("Report generated in {:?}", start_time.elapsed());
    std::process::exit(EXIT_SUCCESS);
}
