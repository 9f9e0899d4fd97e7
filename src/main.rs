use clap::Parser;
use seeyou_processor::cli::{args::Args, commands};
use std::process;

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    // Create async runtime and run the command with signal handling
    let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("Failed to create async runtime: {}", e);
        process::exit(1);
    });

    let result = runtime.block_on(async {
        tokio::select! {
            result = commands::run(args) => result,
            signal = tokio::signal::ctrl_c() => {
                if let Err(e) = signal {
                    eprintln!("Failed to listen for CTRL+C: {}", e);
                }
                eprintln!("\nReceived CTRL+C, shutting down...");
                Err(seeyou_processor::Error::processing_interrupted(
                    "Processing interrupted by user",
                ))
            }
        }
    });

    match result {
        Ok(_summary) => {
            // Success - the summary has already been reported by the command
            process::exit(0);
        }
        Err(error) => {
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("SeeYou Processor - Gliding Waypoint File Importer");
    println!("=================================================");
    println!();
    println!("Import SeeYou (.cup) waypoint files into structured waypoints and");
    println!("report records that could not be parsed.");
    println!();
    println!("USAGE:");
    println!("    seeyou-processor <COMMAND> [OPTIONS] <PATH>...");
    println!();
    println!("COMMANDS:");
    println!("    import      Import waypoint files and print a summary");
    println!("    validate    Report every rejected record and fail if there are any");
    println!("    help        Show this help message or help for specific commands");
    println!();
    println!("OPTIONS:");
    println!("    -h, --help       Show help information");
    println!("    -V, --version    Show version information");
    println!();
    println!("EXAMPLES:");
    println!("    # Import a file and list its waypoints:");
    println!("    seeyou-processor import waypoints.cup --list");
    println!();
    println!("    # Import every .cup file below a directory as JSON:");
    println!("    seeyou-processor import ~/gliding/waypoints --format json");
    println!();
    println!("    # Validate files with a header-less layout:");
    println!("    seeyou-processor validate 'contest/*.cup' --header none");
    println!();
    println!("For detailed help on any command, use:");
    println!("    seeyou-processor <COMMAND> --help");
}
