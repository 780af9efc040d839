use crate::config::constants::DEFAULT_LOG_LEVEL;
use crate::error::{PipelineError, Result};
use crate::pipeline::{FunctionRegistry, PipelineSet};
use clap::{Parser, Subcommand};
use serde_json::{Value, json};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

#[derive(Subcommand)]
#[command(version, about, long_about = None)]
pub enum Commands {
    /// Run the pipelines of a pipeline file
    Run {
        /// Pipeline file (JSON)
        #[arg(required = true)]
        file: PathBuf,
        /// Input data as JSON, given to every pipeline without a parent
        #[clap(short, long)]
        input: Option<String>,
        /// Pipeline whose result is printed (default: the last one)
        #[clap(short, long)]
        pipeline: Option<String>,
        /// Also print the checkpoints of that pipeline
        #[clap(short, long)]
        checkpoints: bool,
    },

    /// Validate a pipeline file without running it
    Check {
        /// Pipeline file (JSON)
        #[arg(required = true)]
        file: PathBuf,
    },

    /// List built-in functions
    Functions,
}

/// leitung Command
#[derive(Parser)]
#[command(version, about = "Run sequential directive pipelines")]
pub struct Cli {
    /// Console log level, overridden by RUST_LOG
    #[clap(short = 'l', long, global = true, default_value = DEFAULT_LOG_LEVEL)]
    pub log_level: String,
    /// Also write debug logs to this file
    #[clap(long, global = true)]
    pub log_file: Option<PathBuf>,
    #[command(subcommand)]
    pub cmd: Commands,
}

fn load_set(file: &Path) -> Result<PipelineSet> {
    let registry = Arc::new(FunctionRegistry::with_builtins());
    PipelineSet::from_file(file, registry)
}

pub fn run_command(
    file: PathBuf,
    input: Option<String>,
    pipeline: Option<String>,
    checkpoints: bool,
) -> Result<()> {
    let mut set = load_set(&file)?;
    let input: Option<Value> = input.as_deref().map(serde_json::from_str::<Value>).transpose()?;
    debug!("Input data: {:?}", input);

    let outcomes = set.run(input)?;
    debug!("Finished {} pipelines", outcomes.len());

    let selected = match &pipeline {
        Some(name) => set.get(name),
        None => set.last(),
    }
    .ok_or_else(|| {
        PipelineError::config(format!(
            "no pipeline named {:?} in {}",
            pipeline.as_deref().unwrap_or_default(),
            file.display()
        ))
    })?;

    let output = if checkpoints {
        json!({
            "result": selected.result(),
            "checkpoints": selected.checkpoints(),
        })
    } else {
        selected.result().unwrap_or(Value::Null)
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

pub fn check_command(file: PathBuf) -> Result<()> {
    let set = load_set(&file)?;
    for pipeline in set.iter() {
        let source = match pipeline.link() {
            Some(link) => match link.checkpoint() {
                Some(checkpoint) => format!(
                    "parent '{}' checkpoint '{}'",
                    link.parent().name(),
                    checkpoint
                ),
                None => format!("parent '{}' result", link.parent().name()),
            },
            None => "input data".to_string(),
        };
        println!(
            "{}: {} directives, seeded from {}",
            pipeline.name(),
            pipeline.directives().len(),
            source
        );
    }
    info!("{} is valid", file.display());
    Ok(())
}

pub fn functions_command() -> Result<()> {
    for name in FunctionRegistry::with_builtins().list_functions() {
        println!("{name}");
    }
    Ok(())
}
