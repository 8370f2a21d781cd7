mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "bronto-cli")]
#[command(about = "Interact with your BrontoBoard classes, assignments and office hours")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an account and start a session
    Register { username: String, password: String },
    /// Log in to an existing account
    Login { username: String, password: String },
    /// End the session and clear the stored token
    Logout,
    /// Create a board (and a calendar, if the user has none) for a user
    Init { user: String },
    /// List a user's boards
    Boards { user: String },
    /// List the classes on a board
    Classes { board: String },
    /// Create a class on a board
    NewClass {
        /// Board owner's user id
        #[arg(short, long)]
        user: String,
        /// Board id
        #[arg(short, long)]
        board: String,
        name: String,
        overview: String,
    },
    /// List the assignments for a class
    Assignments { class: String },
    /// Add an assignment to a class
    NewWork {
        /// Board owner's user id
        #[arg(short, long)]
        user: String,
        /// Board id
        #[arg(short, long)]
        board: String,
        class: String,
        name: String,
        /// Due date (YYYY-MM-DD or RFC 3339)
        due: String,
    },
    /// Change an assignment's due date
    Due {
        /// Board owner's user id
        #[arg(short, long)]
        user: String,
        /// Board id
        #[arg(short, long)]
        board: String,
        work: String,
        /// New due date (YYYY-MM-DD or RFC 3339)
        due: String,
    },
    /// Delete an assignment
    RemoveWork {
        /// Board owner's user id
        #[arg(short, long)]
        user: String,
        /// Board id
        #[arg(short, long)]
        board: String,
        work: String,
    },
    /// List the office hours for a class
    OfficeHours { class: String },
    /// Add an office-hours slot to a class
    NewOh {
        /// Board owner's user id
        #[arg(short, long)]
        user: String,
        /// Board id
        #[arg(short, long)]
        board: String,
        class: String,
        /// Start time (RFC 3339, e.g. 2025-10-01T15:00:00Z)
        start: String,
        /// Duration in minutes
        duration: i64,
    },
    /// Reschedule an office-hours slot
    ChangeOh {
        /// Board owner's user id
        #[arg(short, long)]
        user: String,
        /// Board id
        #[arg(short, long)]
        board: String,
        oh: String,
        /// New start time (RFC 3339)
        start: String,
        /// New duration in minutes
        duration: i64,
    },
    /// Show what's scheduled on a day
    Day {
        user: String,
        /// Date (YYYY-MM-DD)
        date: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Register { username, password } => {
            commands::auth::register(&username, &password).await
        }
        Commands::Login { username, password } => {
            commands::auth::login(&username, &password).await
        }
        Commands::Logout => commands::auth::logout().await,
        Commands::Init { user } => commands::board::init(&user).await,
        Commands::Boards { user } => commands::board::list(&user).await,
        Commands::Classes { board } => commands::board::classes(&board).await,
        Commands::NewClass {
            user,
            board,
            name,
            overview,
        } => commands::board::new_class(&user, &board, &name, &overview).await,
        Commands::Assignments { class } => commands::work::assignments(&class).await,
        Commands::NewWork {
            user,
            board,
            class,
            name,
            due,
        } => commands::work::new_work(&user, &board, &class, &name, &due).await,
        Commands::Due {
            user,
            board,
            work,
            due,
        } => commands::work::change_due(&user, &board, &work, &due).await,
        Commands::RemoveWork { user, board, work } => {
            commands::work::remove(&user, &board, &work).await
        }
        Commands::OfficeHours { class } => commands::work::office_hours(&class).await,
        Commands::NewOh {
            user,
            board,
            class,
            start,
            duration,
        } => commands::work::new_office_hours(&user, &board, &class, &start, duration).await,
        Commands::ChangeOh {
            user,
            board,
            oh,
            start,
            duration,
        } => commands::work::change_office_hours(&user, &board, &oh, &start, duration).await,
        Commands::Day { user, date } => commands::day::run(&user, &date).await,
    }
}
