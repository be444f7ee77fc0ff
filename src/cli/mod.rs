//! CLI module for podesk
//!
//! Command-line interface definitions and handlers for the purchase-order
//! client.
//!
//! # Commands
//!
//! - `login` / `logout` - Manage the stored session
//! - `orders` - List, show, create, update, delete purchase orders
//! - `company` - Show or update the company profile
//! - `users` - List users (admin)
//! - `health` - Probe the backend and show wakefulness state
//! - `config` - Configuration utilities (init)
//! - `completions` - Generate shell completions
//!
//! # Example
//!
//! ```bash
//! # Log in against the configured backend
//! podesk login clerk
//!
//! # List orders as a table
//! podesk orders list
//!
//! # Generate shell completions
//! podesk completions bash > ~/.bash_completion.d/podesk
//! ```

pub mod company;
pub mod completions;
pub mod config;
pub mod context;
pub mod health;
pub mod login;
pub mod orders;
pub mod output;
pub mod users;

pub use completions::handle_completions;
pub use config::handle_config_init;
pub use context::AppContext;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// podesk - Purchase-order client
#[derive(Parser, Debug)]
#[command(
    name = "podesk",
    version,
    about = "Purchase-order client with cold-start detection for sleepy backends"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Log in and store the session
    Login(LoginArgs),
    /// Drop the stored session
    Logout(LogoutArgs),
    /// Manage purchase orders
    #[command(subcommand)]
    Orders(OrdersCommands),
    /// Show or update the company profile
    #[command(subcommand)]
    Company(CompanyCommands),
    /// Manage users
    #[command(subcommand)]
    Users(UsersCommands),
    /// Probe the backend and show wakefulness state
    Health(HealthArgs),
    /// Configuration utilities
    #[command(subcommand)]
    Config(ConfigCommands),
    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Options shared by every command that talks to the backend.
#[derive(Args, Debug)]
pub struct CommonArgs {
    /// Path to configuration file
    #[arg(short, long, default_value = "podesk.toml")]
    pub config: PathBuf,

    /// Set log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "PODESK_LOG_LEVEL")]
    pub log_level: Option<String>,
}

#[derive(Args, Debug)]
pub struct LoginArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Username to log in as
    pub username: String,

    /// Password; prompted on stdin when omitted
    #[arg(short, long, env = "PODESK_PASSWORD")]
    pub password: Option<String>,
}

#[derive(Args, Debug)]
pub struct LogoutArgs {
    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Subcommand, Debug)]
pub enum OrdersCommands {
    /// List purchase orders
    List(OrdersListArgs),
    /// Show one purchase order
    Show(OrdersShowArgs),
    /// Create a purchase order from a JSON file
    Create(OrdersCreateArgs),
    /// Update a purchase order from a JSON file
    Update(OrdersUpdateArgs),
    /// Delete a purchase order
    Delete(OrdersDeleteArgs),
}

#[derive(Args, Debug)]
pub struct OrdersListArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct OrdersShowArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Order ID
    pub id: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct OrdersCreateArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Path to a JSON file with the order fields
    #[arg(short, long)]
    pub file: PathBuf,
}

#[derive(Args, Debug)]
pub struct OrdersUpdateArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Order ID
    pub id: String,

    /// Path to a JSON file with the order fields
    #[arg(short, long)]
    pub file: PathBuf,
}

#[derive(Args, Debug)]
pub struct OrdersDeleteArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Order ID
    pub id: String,
}

#[derive(Subcommand, Debug)]
pub enum CompanyCommands {
    /// Show the company profile
    Show(CompanyShowArgs),
    /// Update the company profile from a JSON file
    Update(CompanyUpdateArgs),
}

#[derive(Args, Debug)]
pub struct CompanyShowArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct CompanyUpdateArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Path to a JSON file with the profile fields
    #[arg(short, long)]
    pub file: PathBuf,
}

#[derive(Subcommand, Debug)]
pub enum UsersCommands {
    /// List users
    List(UsersListArgs),
}

#[derive(Args, Debug)]
pub struct UsersListArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct HealthArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Initialize a new configuration file
    Init(ConfigInitArgs),
}

#[derive(Args, Debug)]
pub struct ConfigInitArgs {
    /// Output file path
    #[arg(short, long, default_value = "podesk.toml")]
    pub output: PathBuf,

    /// Overwrite existing file
    #[arg(short, long)]
    pub force: bool,
}

#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}
