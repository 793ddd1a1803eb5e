use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use release_core::{
    backend::{run_external_command, success_report},
    ApiTarget, ConfigArgs, ManifestForm, ManifestNameParser, PlaceholderBackend, StepRequest,
    TemplateNameParser, WorkflowStep,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
struct Cli {
    #[command(flatten)]
    paths: ConfigArgs,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the manifest path derived from release metadata.
    ManifestName {
        platform: String,
        application: String,
        version_from: String,
        build_from: String,
        version_to: String,
        build_to: String,
        #[arg(long, default_value = ".")]
        dir: PathBuf,
    },
    /// Read release metadata back out of a manifest file name.
    ParseName { file_name: String },
    /// Run one workflow step against the placeholder backend.
    Run {
        step: String,
        #[arg(long)]
        manifest: PathBuf,
        #[arg(long, default_value = "")]
        artifacts: PathBuf,
        /// API server the step talks to
        #[arg(long = "target")]
        api: Option<ApiTarget>,
        #[arg(long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::ManifestName {
            platform,
            application,
            version_from,
            build_from,
            version_to,
            build_to,
            dir,
        } => {
            let mut form = ManifestForm::new();
            form.platform = platform;
            form.application = application;
            form.version_from = version_from;
            form.build_from = build_from;
            form.version_to = version_to;
            form.build_to = build_to;
            let path = form.create_manifest(&dir)?;
            println!("{}", path.display());
        }
        Command::ParseName { file_name } => {
            let parsed = TemplateNameParser.parse(&file_name)?;
            println!("platform={}", parsed.platform);
            println!("application={}", parsed.application);
            println!("from={} {}", parsed.from.version, parsed.from.build);
            println!("to={} {}", parsed.to.version, parsed.to.build);
        }
        Command::Run {
            step,
            manifest,
            artifacts,
            api,
            force,
        } => {
            let config = cli.paths.load().context("failed to load configuration")?;
            let request = StepRequest {
                manifest_path: manifest,
                artifact_path: artifacts,
                api,
                force,
                config,
            };
            let message = run_external_command(&PlaceholderBackend, &step, &request)?;
            let step = step.parse::<WorkflowStep>()?;
            if let Some(report) = success_report(step, &message) {
                println!("{report}");
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_accepts_the_shared_config_flags() {
        let cli = Cli::try_parse_from([
            "release_tools",
            "--aws-cred",
            "/ci/credentials",
            "--private",
            "/ci/release.pem",
            "run",
            "sign",
            "--manifest",
            "ltp-e3d-3.2-40-to-3.3-41.manifest.json",
            "--target",
            "dev",
        ])
        .expect("parse run");

        let flags = cli.paths.flags();
        assert_eq!(flags.aws_cred, Some(PathBuf::from("/ci/credentials")));
        assert_eq!(flags.private_key, Some(PathBuf::from("/ci/release.pem")));
        assert_eq!(flags.schema_dir, None);
        match cli.command {
            Command::Run { step, api, .. } => {
                assert_eq!(step, "sign");
                assert_eq!(api, Some(ApiTarget::Dev));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
