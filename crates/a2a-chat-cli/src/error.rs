use colored::Colorize;

pub fn handle_error(err: anyhow::Error) -> ! {
    eprintln!("{} {}", "Error:".red().bold(), err);

    let msg = err.to_string().to_lowercase();

    if msg.contains("not a terminal") || msg.contains("no such device") || msg.contains("tty") {
        eprintln!("\n{}", "Suggestion:".yellow().bold());
        eprintln!("  a2a-chat needs an interactive terminal. Run it directly, not through a pipe.");
    }

    if msg.contains("config") {
        eprintln!("\n{}", "Suggestion:".yellow().bold());
        eprintln!("  Check the configuration file passed with:");
        eprintln!("  {} a2a-chat --config <path>", "$".dimmed());
    }

    std::process::exit(1);
}
