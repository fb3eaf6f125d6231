use std::path::Path;

use tracing::info;

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::archive;
use crate::io::preset_io;
use crate::io::project_io::ProjectStore;
use crate::model::config::AppConfig;
use crate::model::project::{NewProject, ProjectPatch};
use crate::model::tag::TagSpec;
use crate::ops::{id, tagging};
use crate::tui::external::{FolderOpener, SystemOpener};

type HandlerResult = Result<(), Box<dyn std::error::Error>>;

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(command: Commands, config: &AppConfig, json: bool) -> HandlerResult {
    match command {
        Commands::New(args) => cmd_new(args, config, json),
        Commands::Update(args) => cmd_update(args, config, json),
        Commands::List => cmd_list(config, json),
        Commands::Status(args) => cmd_status(args, config, json),
        Commands::Open(args) => cmd_open(args, config),
        Commands::Archive(args) => cmd_archive(args, config, json),
        Commands::Tags(args) => cmd_tags(args, config, json),
        Commands::Presets => cmd_presets(config, json),
    }
}

/// Normalized ID, or an error naming the raw input
fn require_id(raw: &str) -> Result<String, Box<dyn std::error::Error>> {
    let id = id::normalize(raw);
    if id.is_empty() {
        return Err(format!("invalid project ID '{}': use letters, digits and hyphens", raw).into());
    }
    Ok(id)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

fn cmd_new(args: NewArgs, config: &AppConfig, json: bool) -> HandlerResult {
    let id = require_id(&args.id)?;
    if args.name.trim().is_empty() {
        return Err("project name is required".into());
    }

    let mut store = ProjectStore::from_config(config);
    if let Some(name) = &args.preset {
        let preset = preset_io::load_preset(&config.presets_dir(), name)?;
        info!(preset = %preset.name, "using scaffold preset");
        store = store.with_scaffold(preset.folders);
    }

    let project = store.create(NewProject {
        id,
        name: args.name,
        description: args.desc,
        status: args.status,
        tags: id::clean_tags(&args.tags),
    })?;

    if json {
        println!("{}", serde_json::to_string_pretty(&project)?);
    } else {
        println!("Created {} at {}", project.id, project.path.display());
    }
    Ok(())
}

fn cmd_update(args: UpdateArgs, config: &AppConfig, json: bool) -> HandlerResult {
    let id = require_id(&args.id)?;
    let patch = ProjectPatch {
        name: non_empty(args.name),
        description: non_empty(args.desc),
        status: non_empty(args.status),
        tags: args.tags.as_deref().map(id::clean_tags),
    };

    let store = ProjectStore::from_config(config);
    let project = store.update(&id, patch)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&project)?);
    } else {
        for line in format_project_detail(&project) {
            println!("{}", line);
        }
    }
    Ok(())
}

fn cmd_list(config: &AppConfig, json: bool) -> HandlerResult {
    let projects = ProjectStore::from_config(config).list()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&projects)?);
    } else if projects.is_empty() {
        println!("No valid projects found.");
    } else {
        for line in format_project_table(&projects) {
            println!("{}", line);
        }
    }
    Ok(())
}

fn cmd_status(args: IdArg, config: &AppConfig, json: bool) -> HandlerResult {
    let id = require_id(&args.id)?;
    let project = ProjectStore::from_config(config).read(&id)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&project)?);
    } else {
        for line in format_project_detail(&project) {
            println!("{}", line);
        }
    }
    Ok(())
}

fn cmd_open(args: IdArg, config: &AppConfig) -> HandlerResult {
    let id = require_id(&args.id)?;
    let project = ProjectStore::from_config(config).read(&id)?;
    SystemOpener.open(&project.path);
    println!("Opened {}", project.path.display());
    Ok(())
}

fn cmd_archive(args: IdArg, config: &AppConfig, json: bool) -> HandlerResult {
    let id = require_id(&args.id)?;
    let store = ProjectStore::from_config(config);
    let mut project = store.read(&id)?;
    let outcome = archive::archive(&store, &mut project)?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&archive_to_json(&project.id, &outcome))?
        );
    } else {
        println!("{}", format_archive_line(&outcome));
    }
    Ok(())
}

/// Spec file values win over config, flags win over both.
fn resolve_tag_spec(args: &TagsArgs, config: &AppConfig) -> Result<TagSpec, tagging::TagError> {
    let mut spec = match &args.spec {
        Some(path) => tagging::load_spec(path)?,
        None => config.tagging.clone(),
    };
    if let Some(format) = &args.format {
        spec.format = format.clone();
    }
    if let Some(start) = args.start {
        spec.start = start;
    }
    Ok(spec)
}

fn cmd_tags(args: TagsArgs, config: &AppConfig, json: bool) -> HandlerResult {
    let spec = resolve_tag_spec(&args, config)?;
    let assignments = tagging::generate_file(&args.input, &args.output, &spec)?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&tags_to_json(args.output.clone(), &assignments))?
        );
    } else {
        println!(
            "Generated {} tags to {}",
            assignments.len(),
            display(&args.output)
        );
        for line in format_tag_summary(&assignments) {
            println!("{}", line);
        }
    }
    Ok(())
}

fn cmd_presets(config: &AppConfig, json: bool) -> HandlerResult {
    let names = preset_io::list_presets(&config.presets_dir())?;

    if json {
        println!("{}", serde_json::to_string_pretty(&names)?);
    } else if names.is_empty() {
        println!("No presets in {}", display(&config.presets_dir()));
    } else {
        for name in names {
            println!("{}", name);
        }
    }
    Ok(())
}

fn display(path: &Path) -> String {
    path.display().to_string()
}
