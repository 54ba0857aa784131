use std::{path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use catalog_core::{HttpPageFetcher, PageSelectionController, ResponseOutcome};
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
mod render;

use commands::{parse_command, BrowserCommand, HELP};
use config::{load_settings, Settings, SETTINGS_FILE};
use render::{render_page, render_selection, status_line};

/// Browse the Art Institute of Chicago collection page by page and pick
/// artworks along the way.
#[derive(Parser, Debug)]
struct Args {
    /// Settings file (TOML).
    #[arg(long, default_value = SETTINGS_FILE)]
    config: PathBuf,
    /// API base URL, e.g. https://api.artic.edu/api/v1
    #[arg(long)]
    api_url: Option<String>,
    /// Page to open first.
    #[arg(long)]
    page: Option<u32>,
    /// Per-request timeout in seconds; 0 disables it.
    #[arg(long)]
    timeout_secs: Option<u64>,
    /// Width of each text column.
    #[arg(long)]
    width: Option<usize>,
}

impl Args {
    fn apply(&self, settings: &mut Settings) {
        if let Some(v) = &self.api_url {
            settings.api_base_url = v.clone();
        }
        if let Some(v) = self.page {
            settings.start_page = v;
        }
        if let Some(v) = self.timeout_secs {
            settings.request_timeout_secs = v;
        }
        if let Some(v) = self.width {
            settings.column_width = v;
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let mut settings = load_settings(&args.config);
    args.apply(&mut settings);

    let fetcher = HttpPageFetcher::with_timeout(&settings.api_base_url, settings.request_timeout())
        .context("failed to set up catalog client")?;
    info!(endpoint = %fetcher.endpoint(), "browser: starting");

    let mut controller = PageSelectionController::new(Arc::new(fetcher));
    controller.go_to_page(settings.start_page);
    println!("loading page {}...", controller.view().pending_page.unwrap_or(1));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            Some(outcome) = controller.next_response(), if controller.is_loading() => {
                match outcome {
                    ResponseOutcome::Stale { .. } => {}
                    ResponseOutcome::Reclamped { target, .. } => {
                        println!("catalog shrank; loading last page {target}...");
                    }
                    ResponseOutcome::Loaded { .. } | ResponseOutcome::Failed { .. } => {
                        print_page(&controller, settings.column_width);
                    }
                }
            }
            line = lines.next_line() => {
                let Some(line) = line.context("failed to read stdin")? else {
                    break;
                };
                let command = match parse_command(&line) {
                    Ok(Some(command)) => command,
                    Ok(None) => continue,
                    Err(err) => {
                        println!("{err}");
                        continue;
                    }
                };
                if !run_command(&mut controller, command, settings.column_width)? {
                    break;
                }
                if !controller.is_loading() {
                    // Anything still queued belongs to a superseded request.
                    controller.poll_responses();
                }
            }
        }
    }

    Ok(())
}

/// Returns `false` when the user asked to quit.
fn run_command(
    controller: &mut PageSelectionController,
    command: BrowserCommand,
    width: usize,
) -> Result<bool> {
    match command {
        BrowserCommand::Next => match controller.next_page() {
            Some(page) => println!("loading page {page}..."),
            None => println!("already on the last page"),
        },
        BrowserCommand::Previous => match controller.previous_page() {
            Some(page) => println!("loading page {page}..."),
            None => println!("already on the first page"),
        },
        BrowserCommand::GoTo(page) => {
            let page = controller.go_to_page(page);
            println!("loading page {page}...");
        }
        BrowserCommand::Reload => {
            let page = controller.reload();
            println!("loading page {page}...");
        }
        BrowserCommand::Select(id) | BrowserCommand::Toggle(id) => {
            let Some(record) = controller
                .view()
                .records
                .iter()
                .find(|record| record.id == id)
                .cloned()
            else {
                println!("#{id} is not on the visible page");
                return Ok(true);
            };
            let checked =
                matches!(command, BrowserCommand::Select(_)) || !controller.is_row_selected(&record);
            controller.toggle_row(&record, checked);
            print_page(controller, width);
        }
        BrowserCommand::Unselect(id) => {
            match controller.selection().get(id).cloned() {
                Some(record) => {
                    controller.toggle_row(&record, false);
                    print_page(controller, width);
                }
                None => println!("#{id} is not selected"),
            }
        }
        BrowserCommand::List => println!("{}", render_selection(controller.selection())),
        BrowserCommand::Json => {
            let json = serde_json::to_string_pretty(&controller.selection().all())?;
            println!("{json}");
        }
        BrowserCommand::Help => println!("{HELP}"),
        BrowserCommand::Quit => return Ok(false),
    }
    Ok(true)
}

fn print_page(controller: &PageSelectionController, width: usize) {
    let view = controller.view();
    if view.records.is_empty() && view.total_pages == 0 {
        println!("{}", status_line(&view));
        return;
    }
    println!(
        "{}",
        render_page(&view, |record| controller.is_row_selected(record), width)
    );
}
