//! Recipe Explorer
//!
//! Interactive line-oriented front end over the headless UI crate.

mod commands;
mod config;

use anyhow::Result;
use app_core::RecipeCatalog;
use app_ui::AppShell;
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::task::JoinHandle;
use tracing_subscriber::EnvFilter;

use crate::commands::{Command, HELP};
use crate::config::AppConfig;

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = AppConfig::parse();
    let kv = config.open_store()?;
    tracing::info!(in_memory = config.in_memory, "storage opened");

    let mut app = AppShell::new(kv.clone(), RecipeCatalog::builtin(config.catalog_config()));
    app.navigate(&config.path);
    wait(Some(app.start())).await;

    println!("{}", app.render());
    println!("type `help` for commands");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let command = match Command::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                println!("{}", e);
                continue;
            }
        };

        match command {
            Command::Search(text) => {
                let handle = app.search_for(text);
                if handle.is_none() {
                    println!("(query unchanged)");
                }
                wait(handle).await;
            }
            Command::Open(id) => {
                if !app.open_recipe(&id) {
                    println!("no recipe {} here", id);
                    continue;
                }
            }
            Command::Close => {
                app.close_recipe();
            }
            Command::Fav(id) => {
                let target = id.or_else(|| app.current_modal().map(|m| m.recipe.id));
                match target {
                    Some(id) => {
                        app.toggle_favorite(&id);
                    }
                    None => {
                        println!("usage: fav <id> (or open a recipe first)");
                        continue;
                    }
                }
            }
            Command::Go(path) => {
                app.navigate(&path);
            }
            Command::Back => {
                app.go_back();
            }
            Command::Theme => {
                app.toggle_theme();
            }
            Command::Show => {}
            Command::Help => {
                println!("{}", HELP);
                continue;
            }
            Command::Quit => break,
        }

        println!("{}", app.render());
    }

    if let Err(e) = kv.flush() {
        tracing::warn!("Failed to flush storage: {}", e);
    }
    Ok(())
}

async fn wait(handle: Option<JoinHandle<()>>) {
    if let Some(handle) = handle {
        if let Err(e) = handle.await {
            tracing::warn!("Search task failed: {}", e);
        }
    }
}
