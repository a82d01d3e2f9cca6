use bubbletea_rs::Program;
use std::io::{self, BufRead, Write};
use std::process::ExitCode;
use tickbar::app::App;
use tickbar::config;

fn main() -> ExitCode {
    let minutes = match prompt_for_minutes() {
        Ok(minutes) => minutes,
        Err(err) => {
            eprintln!("{}", err);
            return ExitCode::FAILURE;
        }
    };

    println!("Timer started for {} minutes", minutes);
    config::set_configured_minutes(minutes);

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            println!("Oh no! {}", err);
            ExitCode::FAILURE
        }
    }
}

/// Asks on stdout how long the timer should run and reads the answer from
/// stdin.
fn prompt_for_minutes() -> Result<u64, Box<dyn std::error::Error>> {
    print!("Enter the number of minutes: ");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;

    Ok(config::parse_minutes(&line)?)
}

#[tokio::main]
async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let program = Program::<App>::builder().signal_handler(true).build()?;
    program.run().await?;
    Ok(())
}
