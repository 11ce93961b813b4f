//! a2ui-replay
//!
//! Feeds recorded A2UI message batches through the surface processor and
//! prints the resolved component trees.

use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use anyhow::{bail, Context, Result};
use clap::Parser;

use a2ui_kit::prelude::*;

mod outline;

/// Replay A2UI message batches and print the resulting surfaces
#[derive(Debug, Parser)]
#[command(name = "a2ui-replay", version, about)]
struct Cli {
    /// Batch files: a JSON message or array per file, or one batch per line for `.jsonl`
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Processor configuration (JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Only print this surface
    #[arg(short, long)]
    surface: Option<String>,

    /// Print trees as JSON instead of an outline
    #[arg(long)]
    json: bool,

    /// Dispatch the action of this component on each printed surface
    #[arg(long, value_name = "COMPONENT_ID")]
    click: Option<String>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ProcessorConfig::default(),
    };

    let mut processor = A2uiMessageProcessor::new(config);
    let changed = Rc::new(RefCell::new(Vec::<String>::new()));
    let sink = Rc::clone(&changed);
    processor.subscribe_all(move |surface_id| sink.borrow_mut().push(surface_id.to_string()));

    for path in &cli.files {
        for (n, batch) in read_batches(path)?.into_iter().enumerate() {
            let outcome = processor
                .process_json(&batch)
                .with_context(|| format!("{} batch {}: invalid JSON", path.display(), n + 1))?;
            for rejected in &outcome.rejected {
                eprintln!(
                    "{} batch {} message {}: {}",
                    path.display(),
                    n + 1,
                    rejected.index,
                    rejected.error
                );
            }
            let notified: Vec<String> = changed.borrow_mut().drain(..).collect();
            log::info!("[A2UI] batch {} of {} changed {:?}", n + 1, path.display(), notified);
        }
    }

    let surface_ids = match &cli.surface {
        Some(id) => vec![id.clone()],
        None => processor.list_surface_ids(),
    };
    if surface_ids.is_empty() {
        bail!("no surfaces after replay");
    }

    let registry = outline::outline_registry();
    for surface_id in &surface_ids {
        let tree = processor.get_component_tree(surface_id);
        if cli.json {
            println!("{}", serde_json::to_string_pretty(&tree)?);
        } else {
            print!("{}", outline::render_outline(&tree, &registry));
        }

        if let Some(component_id) = &cli.click {
            click(&processor, &tree, component_id)?;
        }
    }

    Ok(())
}

fn load_config(path: &Path) -> Result<ProcessorConfig> {
    let text = fs::read_to_string(path).with_context(|| format!("reading config {}", path.display()))?;
    ProcessorConfig::from_json(&text).with_context(|| format!("parsing config {}", path.display()))
}

fn read_batches(path: &Path) -> Result<Vec<String>> {
    let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    if path.extension().is_some_and(|ext| ext == "jsonl") {
        Ok(text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect())
    } else {
        Ok(vec![text])
    }
}

fn click(processor: &A2uiMessageProcessor, tree: &ComponentTree, component_id: &str) -> Result<()> {
    let Some(component) = tree.find(component_id) else {
        log::warn!("[A2UI] no component `{}` on surface `{}`", component_id, tree.surface_id);
        return Ok(());
    };
    match processor.dispatch_action(&tree.surface_id, component, &RuntimeContext::new()) {
        Some(action) => println!("{}", serde_json::to_string_pretty(&action.to_message())?),
        None => log::warn!("[A2UI] component `{}` declares no action", component_id),
    }
    Ok(())
}
