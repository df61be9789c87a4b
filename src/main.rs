use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde::Serialize;

use courseloc::{BlockUsageLocator, Locator as _, LocatorError};

#[derive(Parser)]
#[command(name = "courseloc", about = "Inspect and normalize course content locators")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a locator URL and print its fields
    Inspect {
        /// The locator URL, e.g. `edx://edu.mit.eecs.6002x;published#HW3`
        locator: String,
        /// Emit the fields as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the percent-encoded form of a locator URL
    Quote {
        /// The locator URL
        locator: String,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Inspect { locator, json } => cmd_inspect(&locator, json),
        Commands::Quote { locator } => cmd_quote(&locator),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        },
    }
}

/// Field report for one parsed locator.
#[derive(Serialize)]
struct InspectReport {
    course_id: Option<String>,
    quoted_url: String,
    revision: Option<String>,
    url: String,
    usage_id: Option<String>,
    version_guid: Option<String>,
}

/// Parse a locator URL and print each addressing field.
///
/// Block locators are the most general form: a plain course URL parses
/// with an uninitialized block coordinate.
///
/// # Errors
///
/// Returns parse and reconciliation errors from locator construction.
fn cmd_inspect(locator: &str, json: bool) -> Result<(), LocatorError> {
    let parsed = BlockUsageLocator::from_url(locator)?;
    let report = InspectReport {
        course_id: parsed.course_id().map(str::to_string),
        quoted_url: parsed.quoted_url(),
        revision: parsed.revision().map(str::to_string),
        url: parsed.url(),
        usage_id: parsed.usage_id().map(str::to_string),
        version_guid: parsed.version_guid().map(|v| v.to_string()),
    };

    if json {
        // serde_json::to_string_pretty won't fail on this structure.
        println!("{}", serde_json::to_string_pretty(&report).unwrap_or_default());
    } else {
        print_report(&report);
    }
    Ok(())
}

fn print_report(report: &InspectReport) {
    print_field("course_id", report.course_id.as_deref());
    print_field("revision", report.revision.as_deref());
    print_field("version_guid", report.version_guid.as_deref());
    print_field("usage_id", report.usage_id.as_deref());
    println!("url:          {}", report.url);
    println!("quoted_url:   {}", report.quoted_url);
}

fn print_field(name: &str, value: Option<&str>) {
    println!("{name}:{}{}", " ".repeat(13_usize.saturating_sub(name.len())), value.unwrap_or("(unset)"));
}

/// Parse a locator URL and print its percent-encoded form.
///
/// # Errors
///
/// Returns parse and reconciliation errors from locator construction.
fn cmd_quote(locator: &str) -> Result<(), LocatorError> {
    let parsed = BlockUsageLocator::from_url(locator)?;
    println!("{}", parsed.quoted_url());
    Ok(())
}
