use clap::{Parser, Subcommand};
use colored::*;
use std::process::{Command as ProcessCommand, ExitCode};

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Format, lint and test the whole workspace
    Tidy,
    /// Run the tests that need a real desktop session
    PlatformTest,
}

fn cargo(step: &str, args: &[&str]) -> Result<(), String> {
    println!("{} cargo {}", "▶".cyan().bold(), args.join(" "));

    let status = ProcessCommand::new("cargo")
        .args(args)
        .status()
        .map_err(|e| format!("Failed to run cargo: {e}"))?;

    if status.success() {
        Ok(())
    } else {
        Err(format!("{step} failed"))
    }
}

fn tidy() -> Result<(), String> {
    cargo("Formatting", &["fmt", "--all"])?;
    cargo(
        "Clippy",
        &["clippy", "--workspace", "--all-targets", "--", "-D", "warnings"],
    )?;
    cargo("Tests", &["test", "--workspace"])
}

fn platform_test() -> Result<(), String> {
    cargo(
        "Platform tests",
        &[
            "test",
            "-p",
            "globalcursor-core",
            "--features",
            "platform-tests",
            "--test",
            "platform",
            "--",
            "--test-threads=1",
        ],
    )
}

fn main() -> ExitCode {
    let args = Args::parse();
    let result = match args.command {
        Command::Tidy => tidy(),
        Command::PlatformTest => platform_test(),
    };

    match result {
        Ok(()) => {
            println!("\n{}", "✓ Success!".bold().green());
            ExitCode::SUCCESS
        }
        Err(message) => {
            println!("\n{}", format!("× {message}").bold().red());
            ExitCode::FAILURE
        }
    }
}
