use std::io::{self, BufRead, Write};

use anyhow::Result;
use clap::Parser;
use employee_app::{Command, Shell, UreqTransport, HELP};
use employee_core::{ClientConfig, EmployeeClient, BASE_URL_ENV};
use tracing_subscriber::EnvFilter;

/// Manage employee records from the terminal.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Backend base URL. Falls back to the local development endpoint.
    #[arg(long, env = BASE_URL_ENV)]
    base_url: Option<String>,

    /// Path to open first.
    #[arg(long, default_value = "/")]
    start: String,
}

/// Used when `RUST_LOG` is unset or invalid.
const DEFAULT_LOG_FILTER: &str = "info";

/// A blank `--base-url` (or blank variable) means the default endpoint.
fn client_config(base_url: Option<String>) -> ClientConfig {
    base_url
        .map(|url| url.trim().to_string())
        .filter(|url| !url.is_empty())
        .map(ClientConfig::new)
        .unwrap_or_default()
}

fn ask(prompt: &str) -> bool {
    print!("{prompt} [y/N] ");
    if io::stdout().flush().is_err() {
        return false;
    }
    let mut answer = String::new();
    match io::stdin().lock().read_line(&mut answer) {
        Ok(_) => matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"),
        Err(_) => false,
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)))
        .init();

    let config = client_config(args.base_url);
    tracing::info!(base_url = %config.base_url, "starting");

    let mut shell = Shell::start(EmployeeClient::from_config(&config), UreqTransport::new(), &args.start);
    println!("{}\n", shell.render());

    let mut line = String::new();
    loop {
        print!("{}> ", shell.route());
        io::stdout().flush()?;
        line.clear();
        if io::stdin().lock().read_line(&mut line)? == 0 {
            break;
        }
        match Command::parse(&line) {
            Ok(None) => continue,
            Ok(Some(Command::Quit)) => break,
            Ok(Some(Command::Help)) => println!("{HELP}\n"),
            Ok(Some(command)) => {
                if let Err(err) = shell.apply(command, &mut ask) {
                    println!("error: {err}");
                }
                println!("{}\n", shell.render());
            }
            Err(err) => println!("error: {err}\n"),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;
    use employee_core::DEFAULT_BASE_URL;

    use super::*;

    #[test]
    fn base_url_flag_reads_environment_variable() {
        let command = Args::command();
        let arg = command
            .get_arguments()
            .find(|a| a.get_id() == "base_url")
            .unwrap();
        assert_eq!(arg.get_env(), Some(std::ffi::OsStr::new(BASE_URL_ENV)));
    }

    #[test]
    fn explicit_flag_is_used() {
        let args = Args::try_parse_from(["employee-app", "--base-url", "http://h:1/api/employees/"]).unwrap();
        assert_eq!(args.start, "/");
        let config = client_config(args.base_url);
        assert_eq!(config.base_url, "http://h:1/api/employees/");
    }

    #[test]
    fn blank_or_missing_url_uses_default() {
        assert_eq!(client_config(None).base_url, DEFAULT_BASE_URL);
        assert_eq!(client_config(Some("  ".to_string())).base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn default_log_filter_parses() {
        assert!(EnvFilter::try_new(DEFAULT_LOG_FILTER).is_ok());
    }
}
