//! scope: command-line access to session scopes.
//!
//! Thin wrapper over `scope-core` for operators and shell scripts.
//!
//! ## Subcommands
//!
//! - `generate-id`: Print a fresh scope id
//! - `url-path`, `parse-url`, `session-url`: URL form of a scope
//! - `file-name`: File-name form of a scope
//! - `project-id`: Map a project directory to its token
//! - `validate`: Check a scope against projects and active sessions
//! - `session`: Manage the active-session registry

mod codec;
mod env;
mod logging;
mod session;
mod validate;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use env::ScopeEnv;

#[derive(Parser)]
#[command(name = "scope")]
#[command(about = "Session scope routing and storage tool")]
#[command(version)]
struct Cli {
    /// Config file (default: ~/.session-scope/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Storage root, overriding the config file
    #[arg(long, global = true, value_name = "DIR")]
    root: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a fresh scope id
    GenerateId {
        /// Extra ids to avoid, in addition to the built-in sentinels
        #[arg(long = "reserve", value_name = "ID")]
        reserved: Vec<String>,
    },

    /// Print the URL path for a scope
    UrlPath {
        #[arg(value_name = "PROJECT_ID")]
        project: String,
        #[arg(value_name = "SESSION_ID")]
        id: String,
    },

    /// Extract the scope from a URL (prints JSON)
    ParseUrl {
        #[arg(value_name = "URL")]
        url: String,
    },

    /// Rewrite a host page URL to point at a scope
    SessionUrl {
        #[arg(value_name = "HOST_URL")]
        host_url: String,
        #[arg(value_name = "PROJECT_ID")]
        project: String,
        #[arg(value_name = "SESSION_ID")]
        id: String,
    },

    /// Print the state file name for a user's scope
    FileName {
        #[arg(value_name = "USERNAME")]
        username: String,
        #[arg(long, default_value = "")]
        project: String,
        #[arg(long, default_value = "")]
        id: String,
        /// Use the directory-based (multi-session) prefix
        #[arg(long)]
        dirs: bool,
    },

    /// Print (assigning if needed) the project token for a directory
    ProjectId {
        #[arg(value_name = "PATH")]
        path: String,
    },

    /// Validate a scope; prints the project descriptor path on success
    Validate {
        #[arg(value_name = "PROJECT_ID")]
        project: String,
        #[arg(value_name = "SESSION_ID")]
        id: String,
    },

    /// Manage active sessions
    Session {
        #[command(subcommand)]
        action: session::SessionAction,
    },
}

fn main() {
    let cli = Cli::parse();

    let env = ScopeEnv::load(cli.config, cli.root);
    let _logging_guard = logging::init(env.as_ref().ok());

    let env = match env {
        Ok(env) => env,
        Err(e) => {
            tracing::error!(error = %e, "Failed to load configuration");
            std::process::exit(1);
        }
    };

    match run(cli.command, &env) {
        Ok(output) => {
            if !output.is_empty() {
                println!("{}", output);
            }
        }
        Err(e) => {
            tracing::error!(error = %e, "scope command failed");
            std::process::exit(1);
        }
    }
}

fn run(command: Commands, env: &ScopeEnv) -> scope_core::Result<String> {
    match command {
        Commands::GenerateId { reserved } => codec::generate_id(env, &reserved),
        Commands::UrlPath { project, id } => Ok(codec::url_path(&project, &id)),
        Commands::ParseUrl { url } => Ok(codec::parse_url(&url)),
        Commands::SessionUrl {
            host_url,
            project,
            id,
        } => Ok(codec::session_url(&host_url, &project, &id)),
        Commands::FileName {
            username,
            project,
            id,
            dirs,
        } => Ok(codec::file_name(&username, &project, &id, dirs)),
        Commands::ProjectId { path } => validate::project_id(env, &path),
        Commands::Validate { project, id } => validate::run(env, &project, &id),
        Commands::Session { action } => session::run(env, action),
    }
}
