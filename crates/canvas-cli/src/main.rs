//! Canvas compiler CLI.
//!
//! Turns a saved design project into a page, a server module and a schema.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use clap::{Args, Parser, Subcommand};
use notify::RecursiveMode;
use notify_debouncer_mini::{new_debouncer, DebounceEventResult};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use canvas_compiler::codegen::{BackendOptions, SchemaOptions};
use canvas_compiler::model::{
    ComponentKind, DatabaseField, DatabaseTable, FieldType, LogicBlock, PlacedComponent, Position,
};
use canvas_compiler::{
    ArtifactKind, CompileResult, Compiler, CompilerConfig, DesignModel, GenerateOptions, ProjectFile, Warning,
};

mod ui;

#[derive(Parser)]
#[command(name = "canvas")]
#[command(about = "Canvas compiler - generates HTML, Express and SQL from a design project")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a starter project file
    Init {
        /// Project directory (created if doesn't exist)
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Project name
        #[arg(short, long, default_value = "My Canvas App")]
        name: String,
    },

    /// Generate code from a project file
    Generate {
        #[command(flatten)]
        target: TargetArgs,

        /// Generate a single artifact
        #[arg(long)]
        artifact: Option<ArtifactKind>,

        /// Print the artifact instead of writing it
        #[arg(long, requires = "artifact")]
        stdout: bool,

        /// Skip model validation
        #[arg(long)]
        skip_validation: bool,
    },

    /// Validate a project file without generating code
    Check {
        /// Project file
        #[arg(short, long, default_value = "project.json")]
        project: PathBuf,
    },

    /// Watch the project file and regenerate on every change
    Watch {
        #[command(flatten)]
        target: TargetArgs,
    },
}

/// Arguments shared by the commands that write output.
#[derive(Args, Clone)]
struct TargetArgs {
    /// Project file
    #[arg(short, long, default_value = "project.json")]
    project: PathBuf,

    /// Output directory for the generated project
    #[arg(short, long, default_value = "generated")]
    output: PathBuf,

    /// Port for the generated server
    #[arg(long, default_value_t = 3001)]
    port: u16,

    /// Environment variable holding the token secret
    #[arg(long, default_value = "JWT_SECRET")]
    secret_env: String,

    /// Quote identifiers and escape default literals in the schema
    #[arg(long)]
    strict_sql: bool,
}

impl TargetArgs {
    fn config(&self, skip_validation: bool) -> CompilerConfig {
        CompilerConfig {
            project_file: self.project.clone(),
            out_dir: self.output.clone(),
            skip_validation,
            options: GenerateOptions {
                backend: BackendOptions {
                    port: self.port,
                    secret_env: self.secret_env.clone(),
                },
                schema: if self.strict_sql {
                    SchemaOptions::strict()
                } else {
                    SchemaOptions::default()
                },
            },
        }
    }
}

#[tokio::main]
async fn main() -> miette::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "canvas_compiler=info,canvas=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init { path, name } => {
            init_project(&path, &name)?;
        }

        Commands::Generate {
            target,
            artifact,
            stdout,
            skip_validation,
        } => {
            let config = target.config(skip_validation);
            match artifact {
                Some(kind) if stdout => {
                    let code = Compiler::new(config).generate_one(kind)?;
                    print!("{}", code);
                }
                Some(kind) => generate_artifact(config, kind)?,
                None => generate_project(config, target.port)?,
            }
        }

        Commands::Check { project } => {
            let spinner = ui::spinner("Checking project...");

            let config = CompilerConfig {
                project_file: project,
                ..Default::default()
            };
            let compiler = Compiler::new(config);

            match compiler.check() {
                Ok(checked) => {
                    spinner.finish_and_clear();
                    ui::check_passed();
                    println!();
                    ui::summary_line(checked.components, checked.routes, checked.tables);
                    print_warnings(&checked.warnings);
                }
                Err(e) => {
                    spinner.finish_and_clear();
                    ui::check_failed();
                    return Err(e.into());
                }
            }
        }

        Commands::Watch { target } => {
            run_watch_mode(target).await?;
        }
    }

    Ok(())
}

/// Write a starter project with one component, one route and one table.
fn init_project(path: &Path, name: &str) -> miette::Result<()> {
    let project_file = path.join("project.json");
    if project_file.exists() {
        return Err(miette::miette!(
            "{} already exists, refusing to overwrite it",
            project_file.display()
        ));
    }

    let spinner = ui::spinner("Creating project...");
    ProjectFile::new(name, starter_model()).save(&project_file)?;
    spinner.finish_and_clear();

    ui::success(&format!("Wrote {}", project_file.display()));
    ui::next_steps(&[format!("cd {}", path.display()), "canvas generate".to_string()]);

    Ok(())
}

fn starter_model() -> DesignModel {
    let mut heading = PlacedComponent::new("text-1", ComponentKind::Text, Position::new(40.0, 40.0));
    heading.properties.set("text", "Welcome");
    heading.properties.set("fontSize", "2xl");

    let mut input = LogicBlock::route("input-1", "get", "/api/users");
    input.position = Position::new(100.0, 100.0);
    input.connect_to("database-1");
    let mut database = LogicBlock::query("database-1", "SELECT * FROM users");
    database.position = Position::new(350.0, 100.0);

    let users = DatabaseTable::new(
        "table-1",
        "users",
        vec![
            DatabaseField::new("field-1", "email", FieldType::String).required().unique(),
            DatabaseField::new("field-2", "name", FieldType::String),
        ],
    );

    DesignModel {
        components: vec![
            heading,
            PlacedComponent::new("button-1", ComponentKind::Button, Position::new(40.0, 120.0)),
        ],
        logic_blocks: vec![input, database],
        database_tables: vec![users],
    }
}

/// Generate the full project into the output directory.
fn generate_project(config: CompilerConfig, port: u16) -> miette::Result<()> {
    let start = Instant::now();
    let out_dir = config.out_dir.clone();

    let spinner = ui::spinner("Generating code...");
    let result = Compiler::new(config).compile();
    spinner.finish_and_clear();
    let result = result?;

    ui::success("Generated.");
    println!();
    ui::summary_line(result.components, result.routes, result.tables);
    println!();

    for kind in ArtifactKind::ALL {
        let bytes = std::fs::metadata(out_dir.join(kind.file_name()))
            .map(|m| m.len() as usize)
            .unwrap_or(0);
        ui::artifact_line(kind.file_name(), kind.as_str(), bytes);
    }
    println!();

    print_warnings(&result.warnings);

    ui::dim(&format!("Finished in {}ms", start.elapsed().as_millis()));
    ui::next_steps(&[
        format!("cd {} && npm install && npm start", out_dir.display()),
        format!("open {} (API on http://localhost:{})", ArtifactKind::Frontend.file_name(), port),
    ]);

    Ok(())
}

/// Generate one artifact into the output directory.
fn generate_artifact(config: CompilerConfig, kind: ArtifactKind) -> miette::Result<()> {
    let out_dir = config.out_dir.clone();
    let code = Compiler::new(config).generate_one(kind)?;

    std::fs::create_dir_all(&out_dir)
        .map_err(|e| miette::miette!("Failed to create {}: {}", out_dir.display(), e))?;
    let path = out_dir.join(kind.file_name());
    std::fs::write(&path, &code).map_err(|e| miette::miette!("Failed to write {}: {}", path.display(), e))?;

    ui::artifact_line(kind.file_name(), kind.as_str(), code.len());
    Ok(())
}

fn print_warnings(warnings: &[Warning]) {
    if warnings.is_empty() {
        return;
    }
    println!();
    for warning in warnings {
        ui::warning(&warning.to_string());
    }
    println!();
}

fn report_rebuild(result: &CompileResult, duration_ms: u128) {
    ui::success(&format!(
        "Regenerated {}, {}, {} in {}ms",
        ui::plural(result.components, "component"),
        ui::plural(result.routes, "route"),
        ui::plural(result.tables, "table"),
        duration_ms
    ));
    for warning in &result.warnings {
        ui::warning(&warning.to_string());
    }
}

/// Regenerate whenever the project file changes.
async fn run_watch_mode(target: TargetArgs) -> miette::Result<()> {
    let config = target.config(false);
    let project_file = config.project_file.clone();

    // Watch the containing directory: editors often replace the file on save.
    let watch_dir = match project_file.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let file_name = project_file
        .file_name()
        .map(|name| name.to_os_string())
        .ok_or_else(|| miette::miette!("{} is not a file path", project_file.display()))?;

    let (tx, mut rx) = tokio::sync::mpsc::channel::<()>(1);

    let mut debouncer = new_debouncer(Duration::from_millis(300), move |result: DebounceEventResult| {
        if let Ok(events) = result {
            if events.iter().any(|e| e.path.file_name() == Some(file_name.as_os_str())) {
                let _ = tx.try_send(());
            }
        }
    })
    .map_err(|e| miette::miette!("Failed to create file watcher: {}", e))?;

    debouncer
        .watcher()
        .watch(&watch_dir, RecursiveMode::NonRecursive)
        .map_err(|e| miette::miette!("Failed to watch {}: {}", watch_dir.display(), e))?;

    ui::info(&format!("Watching {}", project_file.display()));

    let compiler = Compiler::new(config);
    rebuild(&compiler);

    println!();
    ui::info("Ready! Waiting for changes...");

    loop {
        tokio::select! {
            _ = rx.recv() => {
                tracing::debug!(path = %project_file.display(), "project file changed");
                println!();
                rebuild(&compiler);
                println!();
                ui::info("Ready! Waiting for changes...");
            }
            _ = tokio::signal::ctrl_c() => {
                println!();
                ui::dim("Stopping watch mode.");
                break;
            }
        }
    }

    Ok(())
}

fn rebuild(compiler: &Compiler) {
    let spinner = ui::spinner("Regenerating...");
    let start = Instant::now();

    match compiler.compile() {
        Ok(result) => {
            spinner.finish_and_clear();
            report_rebuild(&result, start.elapsed().as_millis());
        }
        Err(e) => {
            spinner.finish_and_clear();
            ui::error(&e.to_string());
        }
    }
}
