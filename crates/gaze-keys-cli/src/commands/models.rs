//! Models command - inspect installed ML models.

use anyhow::Result;
use clap::{Args, Subcommand};
use gaze_keys_adapters::ModelStore;
use gaze_keys_core::inference::inspect_safetensors;

/// Arguments for the models command
#[derive(Args)]
pub struct ModelsArgs {
    #[command(subcommand)]
    pub command: ModelsCommand,
}

/// Models subcommands
#[derive(Subcommand)]
pub enum ModelsCommand {
    /// List known models, their status and digest
    List,
    /// Print model directory path
    Path,
}

/// Run the models command.
pub fn run(args: &ModelsArgs, store: &ModelStore) -> Result<()> {
    match args.command {
        ModelsCommand::List => list_models(store),
        ModelsCommand::Path => print_path(store),
    }
}

#[allow(clippy::unnecessary_wraps)]
fn list_models(store: &ModelStore) -> Result<()> {
    let models = store.list();

    println!("Models directory: {}", store.dir().display());
    println!();

    for status in &models {
        let mark = if status.installed() { "✓" } else { "✗" };
        println!(
            "  {mark} {} ({}) - {}",
            status.info.name, status.info.filename, status.info.description
        );

        if let Some(ref digest) = status.sha256 {
            println!("      sha256: {digest}");
            match inspect_safetensors(&status.path) {
                Ok(tensors) => {
                    let params: usize = tensors.iter().map(|t| t.len()).sum();
                    println!("      tensors: {}, parameters: {params}", tensors.len());
                }
                Err(e) => println!("      unreadable: {e:#}"),
            }
        }
    }

    println!();
    let installed_count = models.iter().filter(|m| m.installed()).count();
    println!("{}/{} models installed", installed_count, models.len());

    Ok(())
}

#[allow(clippy::unnecessary_wraps)]
fn print_path(store: &ModelStore) -> Result<()> {
    println!("{}", store.dir().display());
    Ok(())
}
