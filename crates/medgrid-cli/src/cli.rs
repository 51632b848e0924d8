use clap::{Parser, Subcommand, ValueEnum};
use uuid::Uuid;

use medgrid_core::SortOrder;

#[derive(Parser)]
#[command(name = "medgrid")]
#[command(about = "medgrid CLI — browse and edit patient records")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Server base URL (overrides config and MEDGRID_URL env var)
    #[arg(short, long, global = true, env = "MEDGRID_URL")]
    pub server: Option<String>,

    /// Config profile name
    #[arg(short, long, global = true, env = "MEDGRID_PROFILE", default_value = "default")]
    pub profile: String,

    /// Output format
    #[arg(short, long, global = true)]
    pub format: Option<OutputFormat>,
}

#[derive(Clone, Copy, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Yaml,
}

impl OutputFormat {
    /// Parse the `format` config key; config values mirror the flag values.
    pub fn from_config(value: &str) -> Option<Self> {
        match value {
            "table" => Some(Self::Table),
            "json" => Some(Self::Json),
            "yaml" => Some(Self::Yaml),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, ValueEnum, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl From<SortDirection> for SortOrder {
    fn from(direction: SortDirection) -> Self {
        match direction {
            SortDirection::Asc => SortOrder::Asc,
            SortDirection::Desc => SortOrder::Desc,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// List patients as a paginated table
    List(ListArgs),
    /// Show a single patient by ID
    Get(GetArgs),
    /// Create a new patient
    Create(CreateArgs),
    /// Update a patient
    Update(UpdateArgs),
    /// Delete a patient
    Delete(DeleteArgs),
    /// Full-text search across patient records
    Search(SearchArgs),
    /// Check that the server is reachable
    Status,
    /// Show application and server info
    About,
    /// Manage CLI configuration
    Config(ConfigArgs),
}

#[derive(clap::Args)]
pub struct ListArgs {
    /// Page number (0-based)
    #[arg(long, default_value_t = 0)]
    pub page: u64,

    /// Rows per page
    #[arg(long, default_value_t = 20)]
    pub size: u64,

    /// Sort field
    #[arg(long, default_value = "lastName")]
    pub sort: String,

    /// Sort direction
    #[arg(long, value_enum, default_value_t = SortDirection::Asc)]
    pub order: SortDirection,

    /// Field filter as field:matchMode:value (e.g. lastName:startsWith:Sm); repeatable
    #[arg(long = "filter")]
    pub filters: Vec<String>,

    /// Global full-text constraint
    #[arg(long)]
    pub query: Option<String>,
}

#[derive(clap::Args)]
pub struct GetArgs {
    /// Patient ID
    pub id: Uuid,
}

#[derive(clap::Args)]
pub struct CreateArgs {
    /// Path to JSON file (reads from stdin if omitted)
    #[arg(long)]
    pub file: Option<String>,
}

#[derive(clap::Args)]
pub struct UpdateArgs {
    /// Patient ID
    pub id: Uuid,
    /// Path to JSON file (reads from stdin if omitted)
    #[arg(long)]
    pub file: Option<String>,
}

#[derive(clap::Args)]
pub struct DeleteArgs {
    /// Patient ID
    pub id: Uuid,
}

#[derive(clap::Args)]
pub struct SearchArgs {
    /// Search text
    pub query: String,

    /// Page number (0-based)
    #[arg(long, default_value_t = 0)]
    pub page: u64,

    /// Rows per page
    #[arg(long, default_value_t = 20)]
    pub size: u64,
}

#[derive(clap::Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show current config
    Show,
    /// Set config value
    Set(ConfigSetArgs),
}

#[derive(clap::Args)]
pub struct ConfigSetArgs {
    /// Key to set (server, format)
    pub key: String,
    /// Value
    pub value: String,
}
