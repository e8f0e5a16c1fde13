//! payload-scaffold entry point.
//! Parses the command line, loads the project spec and hands it to the
//! validator, the file-plan builder or the tool server.

use std::path::PathBuf;

use payload_scaffold::{
    cli::{get_args, Args, Command},
    config::{load_project_spec, load_project_spec_from_stdin},
    error::{default_error_handler, Error, Result},
    fs::LocalFilesystem,
    model::ProjectSpec,
    processor::{ensure_output_dir, next_steps, write_plan, Processor},
    prompt::{DialoguerPrompter, Prompter},
    render::MiniJinjaRenderer,
    rpc::ToolServer,
    validation::{validate_project, ValidationError},
};

/// Main application entry point.
fn main() {
    let args = get_args();

    // Logger configuration
    env_logger::Builder::new()
        .filter_level(if args.verbose {
            log::LevelFilter::Trace
        } else {
            log::LevelFilter::Off
        })
        .init();

    if let Err(err) = run(args) {
        default_error_handler(err);
    }
}

fn load_spec(spec: Option<String>, stdin: bool) -> Result<ProjectSpec> {
    let result = match spec {
        Some(path) if !stdin && path != "-" => load_project_spec(path),
        _ => load_project_spec_from_stdin(),
    };
    if let Err(Error::InvalidValueTypes(errors)) = &result {
        report(errors);
    }
    result
}

fn report(errors: &[ValidationError]) {
    for error in errors {
        eprintln!("{error}");
    }
}

/// Resolves the output directory, asking before writing into an existing one.
fn output_root(prompt: &dyn Prompter, output_dir: PathBuf, force: bool) -> Result<PathBuf> {
    match ensure_output_dir(&output_dir, force) {
        Err(Error::OutputDirectoryExistsError { output_dir: existing }) => {
            let question = format!("Output directory '{existing}' already exists. Write into it?");
            if prompt.confirm(false, question)? {
                Ok(output_dir)
            } else {
                Err(Error::OutputDirectoryExistsError { output_dir: existing })
            }
        }
        result => result,
    }
}

fn run(args: Args) -> Result<()> {
    let engine = MiniJinjaRenderer::new();

    match args.command {
        Command::Validate { spec, stdin } => {
            let errors = validate_project(&load_spec(spec, stdin)?);
            if !errors.is_empty() {
                report(&errors);
                return Err(Error::ValidationFailed(errors.len()));
            }
            println!("Project spec is valid.");
        }
        Command::Scaffold { spec, output_dir, force, stdin, dry_run } => {
            let spec = load_spec(spec, stdin)?;
            let output_dir = output_dir
                .unwrap_or_else(|| PathBuf::from(spec.project_name.as_deref().unwrap_or_default()));

            let outcome = Processor::new(&engine).plan(&spec, &output_dir)?;
            let Some(plan) = outcome.plan else {
                report(&outcome.errors);
                return Err(Error::ValidationFailed(outcome.errors.len()));
            };

            if dry_run {
                for path in plan.paths() {
                    println!("Plan: '{}'", plan.root.join(path).display());
                }
                return Ok(());
            }

            output_root(&DialoguerPrompter::new(), output_dir, force)?;
            let errors = write_plan(&plan, &LocalFilesystem);
            if !errors.is_empty() {
                report(&errors);
                return Err(Error::WriteFailed(errors.len()));
            }
            for path in plan.paths() {
                println!("Created: '{}'", plan.root.join(path).display());
            }

            println!("Project generated successfully in {}.", plan.root.display());
            println!("Next steps:");
            for step in next_steps(&plan.root) {
                println!("  {step}");
            }
        }
        Command::Serve => {
            let server = ToolServer::new(&engine, &LocalFilesystem);
            server.serve(std::io::stdin().lock(), std::io::stdout().lock())?;
        }
    }

    Ok(())
}
