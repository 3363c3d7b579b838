use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;

use autofixer_core::config::projects_dir_from_env_value;
use autofixer_core::{CoreConfig, FileService, MetadataStore, ProjectService};

#[derive(Parser)]
#[command(name = "autofixer")]
#[command(about = "AutoFixer IDE project store CLI")]
struct Cli {
    /// Project root directory (defaults to $PROJECTS_DIR, then `projects`)
    #[arg(long, global = true)]
    projects_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List all projects
    List,
    /// Create a project
    Create {
        /// Project name
        name: String,
        /// Template: empty, basic or maven
        #[arg(long)]
        template: Option<String>,
    },
    /// Show a project's descriptor as JSON
    Show {
        /// Project identifier
        id: String,
    },
    /// Delete a project and everything in it
    Delete {
        /// Project identifier
        id: String,
    },
    /// Print a file from a project
    Cat {
        /// Project identifier
        id: String,
        /// Project-relative file path
        path: String,
    },
    /// Run a project (prints the canned transcript)
    Run {
        /// Project identifier
        id: String,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let projects_dir = cli
        .projects_dir
        .unwrap_or_else(|| projects_dir_from_env_value(std::env::var("PROJECTS_DIR").ok()));
    let cfg = Arc::new(CoreConfig::new(projects_dir)?);
    let store = Arc::new(MetadataStore::new(cfg));
    let projects = ProjectService::new(store.clone());
    let files = FileService::new(store);

    match cli.command {
        Some(Commands::List) => {
            let listing = projects.list_projects()?;
            if listing.projects.is_empty() {
                println!("No projects found.");
            } else {
                for project in &listing.projects {
                    println!(
                        "ID: {}, Name: {}, Template: {}, Created: {}",
                        project.id, project.name, project.template, project.created_at
                    );
                }
            }
            for skipped in &listing.skipped {
                eprintln!("Skipped {}: {}", skipped.id, skipped.reason);
            }
        }
        Some(Commands::Create { name, template }) => {
            match projects.create_project(&name, template.as_deref()) {
                Ok(project) => println!("Created project {} with ID: {}", project.name, project.id),
                Err(e) => eprintln!("Error creating project: {}", e),
            }
        }
        Some(Commands::Show { id }) => match projects.get_project(&id) {
            Ok(project) => println!("{}", serde_json::to_string_pretty(&project)?),
            Err(e) => eprintln!("Error reading project {}: {}", id, e),
        },
        Some(Commands::Delete { id }) => match projects.delete_project(&id) {
            Ok(()) => println!("Deleted project {}", id),
            Err(e) => eprintln!("Error deleting project {}: {}", id, e),
        },
        Some(Commands::Cat { id, path }) => match files.read_file(&id, &path) {
            Ok(content) => print!("{}", content),
            Err(e) => eprintln!("Error reading {} in project {}: {}", path, id, e),
        },
        Some(Commands::Run { id }) => match projects.run_project(&id) {
            Ok(output) => print!("{}", output),
            Err(e) => eprintln!("Error running project {}: {}", id, e),
        },
        None => {
            println!("Use 'autofixer --help' for commands");
        }
    }

    Ok(())
}
