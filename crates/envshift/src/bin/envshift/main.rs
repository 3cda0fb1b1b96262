mod cli;

use anyhow::Context;
use envshift::definition::Definition;
use envshift::document::Document;
use envshift::generator::{EnvironmentPolicy, Generator};

fn main() {
    use clap::Parser;
    let cli = cli::Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_env("ENVSHIFT_LOG"))
        .with_writer(std::io::stderr)
        .init();

    for new_path in cli.directory.iter() {
        match new_path.canonicalize() {
            Err(e) => {
                eprintln!(
                    "Failed to resolve path for -C/--directory {}\n{}",
                    new_path.display(),
                    e
                );
                std::process::exit(1);
            }
            Ok(cwd) => {
                if let Err(err) = std::env::set_current_dir(&cwd) {
                    eprintln!("Failed to set work directory to {}\n{}", cwd.display(), err,);
                    std::process::exit(1);
                }

                tracing::info!(directory=%cwd.display(), "Changed working directory");
            }
        }
    }

    let command_result = match cli.command {
        cli::Command::Generate(generate_cli) => generate(generate_cli),
        cli::Command::Check(check_cli) => check(check_cli),
    };

    if let Err(e) = command_result {
        for error in e.chain() {
            eprintln!("{error}")
        }
        std::process::exit(1);
    }
}

pub fn generate(cli: cli::GenerateCommand) -> anyhow::Result<()> {
    let definition = load_definition(&cli.target)?;

    let policy = if cli.allow_missing_environment {
        EnvironmentPolicy::Lenient
    } else {
        EnvironmentPolicy::Strict
    };
    let generator = Generator::with_policy(&definition, cli.target.environment.as_str(), policy)?;

    let mut document = load(cli.input.as_deref())?;
    generator.generate(&mut document);

    output(&cli.output, &document)?;
    Ok(())
}

pub fn check(cli: cli::CheckCommand) -> anyhow::Result<()> {
    let definition = load_definition(&cli.target)?;
    envshift::generator::check_environment(&definition, &cli.target.environment)?;

    eprintln!(
        "environment `{}` is defined for all {} fields",
        cli.target.environment,
        definition.fields.len()
    );
    Ok(())
}

fn load_definition(target: &cli::TargetArgs) -> anyhow::Result<Definition> {
    Definition::load_file(&target.definition).with_context(|| {
        format!(
            "Failed to load definition {}",
            target.definition.display()
        )
    })
}

fn load(input: Option<&std::path::Path>) -> anyhow::Result<Document> {
    let Some(file_path) = input else {
        let stdin = std::io::read_to_string(std::io::stdin())?;
        return envshift::document::parse(&stdin).context("Failed to load document from stdin");
    };

    envshift::document::load_file(file_path)
        .with_context(|| format!("Failed to load document {}", file_path.display()))
}

fn output(output: &cli::OutputArgs, document: &Document) -> anyhow::Result<()> {
    let writer: Box<dyn std::io::Write> = match &output.file {
        Some(path) => Box::new(
            std::fs::File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?,
        ),
        None => Box::new(std::io::stdout()),
    };

    match output.format {
        cli::OutputFormat::Yaml => serde_yaml::to_writer(writer, document)?,
        cli::OutputFormat::Json => serde_json::to_writer_pretty(writer, document)?,
    };

    Ok(())
}
