use anyhow::{anyhow, Context};
use clap::Parser;
use eframe::egui;
use release_core::{ConfigArgs, PlaceholderBackend, Workflow};
use tracing_subscriber::EnvFilter;

mod controller;
mod ui;

use ui::ReleaseManagerApp;

const APP_TITLE: &str = "Release Package Manager";

#[derive(Parser, Debug)]
#[command(name = "release_gui", about = "Create, sign, stage and publish release packages")]
struct Args {
    #[command(flatten)]
    paths: ConfigArgs,
    /// Log filter, e.g. `debug` or `release_core=trace`; falls back to RUST_LOG
    #[arg(long)]
    log: Option<String>,
}

fn init_tracing(filter: Option<&str>) {
    let filter = match filter {
        Some(directives) => EnvFilter::new(directives),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(args.log.as_deref());

    let config = args.paths.load().context("failed to load configuration")?;
    tracing::info!(?config, "configuration resolved");

    let working_dir =
        std::env::current_dir().context("failed to resolve the current working directory")?;
    let workflow = Workflow::new(Box::new(PlaceholderBackend), config);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(APP_TITLE)
            .with_inner_size([1000.0, 600.0])
            .with_min_inner_size([720.0, 480.0]),
        centered: true,
        ..Default::default()
    };
    eframe::run_native(
        APP_TITLE,
        options,
        Box::new(move |_cc| Ok(Box::new(ReleaseManagerApp::new(workflow, working_dir)))),
    )
    .map_err(|err| anyhow!("failed to run {APP_TITLE}: {err}"))
}
