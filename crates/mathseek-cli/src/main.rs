use anyhow::{Context, bail};
use clap::{Parser, Subcommand, ValueEnum};
use mathseek_core::provider::ProviderConfig;
use mathseek_core::{PresentationTree, QueryList, SolveEnvelope, StoredRecord, render_outcome};
use mathseek_markup::{sanitize, split};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "mathseek")]
#[command(about = "MathSeek solution tools", long_about = None)]
struct Cli {
    /// Log decoding details (same as RUST_LOG=debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode a solve endpoint reply and render it
    Render {
        /// Path to the envelope JSON
        #[arg(value_name = "FILE")]
        path: PathBuf,
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
    /// Render a single stored query
    Record {
        /// Path to the record JSON
        #[arg(value_name = "FILE")]
        path: PathBuf,
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
    /// List stored queries, or render one of them
    History {
        /// Path to the listing JSON
        #[arg(value_name = "FILE")]
        path: PathBuf,
        /// Id of the query to render
        #[arg(long, value_name = "ID")]
        select: Option<String>,
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
    /// Clean up a stored equation label
    Sanitize { input: String },
    /// Split mixed text into text and math segments
    Split { input: String },
    /// Print the provider endpoint and chat request body for solving an equation
    Prompt {
        equation: String,
        #[arg(long)]
        endpoint: Option<String>,
        #[arg(long)]
        model: Option<String>,
        #[arg(long)]
        temperature: Option<f32>,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match &cli.command {
        Commands::Render { path, format } => {
            let envelope = SolveEnvelope::from_json(&read(path)?)
                .with_context(|| format!("Failed to read envelope {:?}", path))?;
            print_tree(&render_outcome(&envelope.outcome()), *format)?;
        }
        Commands::Record { path, format } => {
            let record = StoredRecord::from_json(&read(path)?)
                .with_context(|| format!("Failed to read record {:?}", path))?;
            print_record(&record, *format)?;
        }
        Commands::History {
            path,
            select,
            format,
        } => {
            let list = QueryList::from_json(&read(path)?)
                .with_context(|| format!("Failed to read query list {:?}", path))?;
            if let Some(message) = list.error_message() {
                bail!("{}", message);
            }
            match select {
                Some(id) => match list.find(id) {
                    Some(record) => print_record(record, *format)?,
                    None => bail!("No stored query with id {}", id),
                },
                None => print_listing(&list, *format)?,
            }
        }
        Commands::Sanitize { input } => {
            println!("{}", sanitize(input));
        }
        Commands::Split { input } => {
            println!("{}", serde_json::to_string_pretty(&split(input))?);
        }
        Commands::Prompt {
            equation,
            endpoint,
            model,
            temperature,
        } => {
            let mut config = ProviderConfig::default();
            if let Some(endpoint) = endpoint {
                config.endpoint = endpoint.clone();
            }
            if let Some(model) = model {
                config.model = model.clone();
            }
            if let Some(temperature) = temperature {
                config.temperature = *temperature;
            }
            let request = config.solve_request(equation)?;
            let value = serde_json::json!({
                "endpoint": config.endpoint,
                "body": request,
            });
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
    }
    Ok(())
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default)).init();
}

fn read(path: &Path) -> anyhow::Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))
}

fn print_tree(tree: &PresentationTree, format: Format) -> anyhow::Result<()> {
    match format {
        Format::Json => println!("{}", serde_json::to_string_pretty(tree)?),
        Format::Text if tree.is_empty() => log::warn!("Nothing to render"),
        Format::Text => print!("{}", tree),
    }
    Ok(())
}

fn print_record(record: &StoredRecord, format: Format) -> anyhow::Result<()> {
    let tree = record.render();
    match format {
        Format::Json => {
            let value = serde_json::json!({
                "id": record.id,
                "label": record.equation_segments(),
                "created_at": record.created_at,
                "tree": tree,
            });
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        Format::Text => {
            println!("Equation: {}", record.label());
            if !tree.is_empty() {
                println!();
                print!("{}", tree);
            }
        }
    }
    Ok(())
}

fn print_listing(list: &QueryList, format: Format) -> anyhow::Result<()> {
    match format {
        Format::Json => {
            let entries: Vec<_> = list
                .queries
                .iter()
                .map(|record| {
                    serde_json::json!({
                        "id": record.id,
                        "label": record.label(),
                        "created_at": record.created_at,
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&entries)?);
        }
        Format::Text => {
            for record in &list.queries {
                println!(
                    "{}\t{}\t{}",
                    record.id,
                    record.created_at.as_deref().unwrap_or("-"),
                    record.label()
                );
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_render_defaults_to_text() {
        let cli = Cli::try_parse_from(["mathseek", "render", "reply.json"]).unwrap();
        assert!(!cli.verbose);
        match cli.command {
            Commands::Render { path, format } => {
                assert_eq!(path, PathBuf::from("reply.json"));
                assert_eq!(format, Format::Text);
            }
            _ => panic!("Expected render"),
        }
    }

    #[test]
    fn test_parse_history_select() {
        let cli = Cli::try_parse_from([
            "mathseek", "history", "list.json", "--select", "42", "--format", "json", "-v",
        ])
        .unwrap();
        assert!(cli.verbose);
        match cli.command {
            Commands::History { select, format, .. } => {
                assert_eq!(select.as_deref(), Some("42"));
                assert_eq!(format, Format::Json);
            }
            _ => panic!("Expected history"),
        }
    }

    #[test]
    fn test_parse_prompt_overrides() {
        let cli = Cli::try_parse_from([
            "mathseek", "prompt", "x^2=4", "--model", "other", "--temperature", "0.5",
        ])
        .unwrap();
        match cli.command {
            Commands::Prompt {
                equation,
                endpoint,
                model,
                temperature,
            } => {
                assert_eq!(equation, "x^2=4");
                assert_eq!(endpoint, None);
                assert_eq!(model.as_deref(), Some("other"));
                assert_eq!(temperature, Some(0.5));
            }
            _ => panic!("Expected prompt"),
        }
    }

    #[test]
    fn test_parse_prompt_endpoint() {
        let cli = Cli::try_parse_from([
            "mathseek", "prompt", "x=1", "--endpoint", "http://localhost:8080/v1/chat/completions",
        ])
        .unwrap();
        match cli.command {
            Commands::Prompt { endpoint, .. } => {
                assert_eq!(
                    endpoint.as_deref(),
                    Some("http://localhost:8080/v1/chat/completions")
                );
            }
            _ => panic!("Expected prompt"),
        }
    }
}
