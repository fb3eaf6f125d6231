use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "projman", about = concat!("projman v", env!("CARGO_PKG_VERSION"), " - projects as plain directories"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Directory holding the projects (default: ~/Projects)
    #[arg(short = 'C', long = "base-dir", env = "PROJMAN_BASE_DIR", global = true)]
    pub base_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a project directory with its scaffold and record
    New(NewArgs),
    /// Change fields of an existing project
    Update(UpdateArgs),
    /// List all projects
    List,
    /// Show one project's record
    Status(IdArg),
    /// Open the project folder in the file browser
    Open(IdArg),
    /// Zip the project and mark it archived
    Archive(IdArg),
    /// Generate tag numbers from a CSV table
    Tags(TagsArgs),
    /// List scaffold presets
    Presets,
}

#[derive(Args)]
pub struct IdArg {
    /// Project ID (case-insensitive)
    pub id: String,
}

#[derive(Args)]
pub struct NewArgs {
    /// Project ID (letters, digits and hyphens)
    pub id: String,
    /// Display name
    pub name: String,
    /// Free-text description
    #[arg(long, default_value = "")]
    pub desc: String,
    /// Initial status (default from config, normally "active")
    #[arg(long, default_value = "")]
    pub status: String,
    /// Comma-separated tags
    #[arg(long, default_value = "")]
    pub tags: String,
    /// Scaffold with a preset's folders instead of the configured list
    #[arg(long)]
    pub preset: Option<String>,
}

#[derive(Args)]
pub struct UpdateArgs {
    /// Project ID
    pub id: String,
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub desc: Option<String>,
    #[arg(long)]
    pub status: Option<String>,
    /// Comma-separated tags; replaces the whole list
    #[arg(long)]
    pub tags: Option<String>,
}

#[derive(Args)]
pub struct TagsArgs {
    /// Input table: header row, then category,subcat,name rows
    pub input: PathBuf,
    /// Output YAML file
    pub output: PathBuf,
    /// YAML file with `format` and `start`
    #[arg(long)]
    pub spec: Option<PathBuf>,
    /// Tag format, e.g. "{category}-{subcat}-{id}"
    #[arg(long)]
    pub format: Option<String>,
    /// First number of every group
    #[arg(long, allow_negative_numbers = true)]
    pub start: Option<i64>,
}
