use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::api::Role;

#[derive(Parser, Debug)]
#[command(name = "atrium")]
#[command(version)]
#[command(about = "A management console for a multi-tenant society directory", long_about = None)]
pub struct Cli {
    /// Backend API base URL (overrides configuration)
    #[arg(long, env = "ATRIUM_API_URL")]
    pub api_url: Option<String>,

    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize configuration
    Init,
    /// Sign in with an administrator or society account
    Login {
        /// Account email
        #[arg(long)]
        email: String,
        /// Account password
        #[arg(long)]
        password: String,
        /// Which login surface to authenticate against
        #[arg(long, value_enum, default_value_t = RoleArg::Society)]
        role: RoleArg,
    },
    /// Register a new society account (signs in on success)
    Register {
        /// Society name
        #[arg(long)]
        name: String,
        /// Short description of the society
        #[arg(long)]
        description: String,
        /// Contact email, also the login email
        #[arg(long)]
        email: String,
        /// Account password
        #[arg(long)]
        password: String,
        /// Category, e.g. "Cultural" or "Technical"
        #[arg(long)]
        category: Option<String>,
        /// Year the society was established
        #[arg(long)]
        established_year: Option<u32>,
    },
    /// Show the current session
    Whoami,
    /// Sign out and clear the stored session
    Logout,
    /// List all societies (administrator)
    Societies,
    /// List members of the signed-in society, or of all societies as
    /// administrator
    Members,
    /// List events of the signed-in society, or of all societies as
    /// administrator
    Events,
    /// List announcements visible to the current role
    Announcements,
    /// Show dashboard statistics for the current role
    Stats,
    /// Show the administrator activity log
    Activities {
        /// Only show the most recent N entries
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Download an Excel or PDF report (administrator)
    Report {
        /// Report format
        #[arg(long, value_enum, default_value_t = ReportFormat::Excel)]
        format: ReportFormat,
        /// Limit the report to a single society by id
        #[arg(long)]
        society: Option<String>,
        /// Output file (defaults to a name derived from the current date)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Check backend health
    Health,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum RoleArg {
    /// Administrator account
    Admin,
    /// Society account
    Society,
}

impl From<RoleArg> for Role {
    fn from(role: RoleArg) -> Self {
        match role {
            RoleArg::Admin => Role::Admin,
            RoleArg::Society => Role::Society,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ReportFormat {
    /// Excel workbook (.xlsx)
    Excel,
    /// PDF document
    Pdf,
}
