// Hamster Kombat Autonomous Tapper - Main Entry Point
use std::io::{self, Write};
use std::sync::Arc;
use clap::{ArgAction, Parser, Subcommand};
use hamster_cc::{runner, v_error, verbosity, Settings, SessionManager, CONFIG_FILE};

#[derive(Parser)]
#[command(name = "hamster_cc", about = "Autonomous tapper for the Hamster Kombat mini app")]
struct Cli {
    /// Increase output verbosity (-v shows debug output)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Create a new session
    CreateSession { name: Option<String> },
    /// List all sessions
    ListSessions,
    /// Delete a session
    DeleteSession { name: Option<String> },
    /// Run the bot for all sessions
    Run,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let cli = Cli::parse();
    verbosity::set_verbosity_level(1 + cli.verbose);

    let settings = Settings::load_or_create(CONFIG_FILE)?;
    if let Err(e) = settings.validate() {
        return Err(e.into());
    }

    let sessions = SessionManager::new(&settings)?;
    let settings = Arc::new(settings);

    match cli.command {
        Some(Command::CreateSession { name }) => {
            require_telegram(&settings)?;
            let name = resolve_name(name, "Enter the session name: ")?;
            sessions.create_session(&name).await?;
        }
        Some(Command::ListSessions) => {
            list_sessions(&sessions)?;
        }
        Some(Command::DeleteSession { name }) => {
            require_telegram(&settings)?;
            list_sessions(&sessions)?;
            let name = resolve_name(name, "Enter the session name to delete: ")?;
            sessions.delete_session(&name).await?;
        }
        Some(Command::Run) => {
            require_telegram(&settings)?;
            settings.print_summary();
            runner::run_fleet(Arc::clone(&settings), &sessions).await?;
        }
        None => {
            interactive_menu(&settings, &sessions).await?;
        }
    }

    Ok(())
}

fn require_telegram(settings: &Settings) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    if let Err(e) = settings.validate_telegram() {
        return Err(e.into());
    }
    Ok(())
}

fn list_sessions(sessions: &SessionManager) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let names = sessions.session_names()?;
    if names.is_empty() {
        println!("No sessions found.");
    } else {
        println!("Available sessions:");
        for name in names {
            println!(" - {}", name);
        }
    }
    Ok(())
}

fn resolve_name(
    name: Option<String>,
    message: &str,
) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
    match name {
        Some(name) => Ok(name),
        None => Ok(prompt(message)?.trim().to_string()),
    }
}

fn display_menu() {
    println!(
        r"
 _______ _______ _______ _______ _______ _______ ______
|   |   |   _   |   |   |     __|_     _|    ___|   __ \
|       |       |       |__     | |   | |    ___|      <
|___|___|___|___|__|_|__|_______| |___| |_______|___|__|
    "
    );
    println!("Welcome to the Hamster Tapper Manager");
    println!("1) Create a new session");
    println!("2) List all sessions");
    println!("3) Delete a session");
    println!("4) Run the bot for all sessions");
    println!("5) Exit");
}

async fn interactive_menu(
    settings: &Arc<Settings>,
    sessions: &SessionManager,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    loop {
        display_menu();
        let choice = prompt("Enter your choice: ")?;

        match choice.trim() {
            "1" => {
                if let Err(e) = settings.validate_telegram() {
                    v_error!("❌ {}", e);
                    continue;
                }
                let name = prompt("Enter the session name: ")?;
                sessions.create_session(name.trim()).await?;
            }
            "2" => {
                list_sessions(sessions)?;
            }
            "3" => {
                if let Err(e) = settings.validate_telegram() {
                    v_error!("❌ {}", e);
                    continue;
                }
                list_sessions(sessions)?;
                let name = prompt("Enter the session name to delete: ")?;
                sessions.delete_session(name.trim()).await?;
            }
            "4" => {
                if let Err(e) = settings.validate_telegram() {
                    v_error!("❌ {}", e);
                    continue;
                }
                settings.print_summary();
                runner::run_fleet(Arc::clone(settings), sessions).await?;
            }
            "5" => {
                println!("Exiting...");
                break;
            }
            _ => {
                println!("Invalid choice, please try again.");
            }
        }
    }

    Ok(())
}

fn prompt(message: &str) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
    print!("{}", message);
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input)
}
