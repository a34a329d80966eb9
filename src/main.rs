//! Main entry point for vidgrab CLI

use anyhow::Context;
use clap::Parser;
use std::process::ExitCode;
use tracing::{debug, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use vidgrab::cli::args::VerbosityLevel;
use vidgrab::cli::{Args, TerminalClipboard, TerminalView};
use vidgrab::core::ClientController;
use vidgrab::platform::{HttpResolutionService, ResolutionService};
use vidgrab::utils::LinkValidator;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logging
    init_logging(args.verbosity_level())?;

    info!("Starting vidgrab with args: {:?}", args);

    let service = HttpResolutionService::with_config(args.http_config())
        .context("failed to set up the HTTP client")?;
    let view = TerminalView::new(args.verbosity_level(), args.server.clone());

    if args.list_platforms {
        let platforms = service
            .platforms()
            .await
            .context("failed to fetch the platform list")?;
        view.print_platforms(&platforms);
        return Ok(ExitCode::SUCCESS);
    }

    let Some(link) = args.link.clone() else {
        print_usage();
        return Ok(ExitCode::SUCCESS);
    };

    let mut validator = LinkValidator::new();
    for pattern in &args.allow {
        validator = validator
            .allow(pattern)
            .with_context(|| format!("invalid --allow pattern {:?}", pattern))?;
    }

    let controller =
        ClientController::new(service, view, TerminalClipboard::new()).with_validator(validator);

    run(&controller, &link, &args).await
}

/// Drive one link through resolve → cover → copy → download → cleanup
async fn run(
    controller: &ClientController<HttpResolutionService, TerminalView, TerminalClipboard>,
    link: &str,
    args: &Args,
) -> anyhow::Result<ExitCode> {
    // Errors below are already rendered by the view
    let resolution = match controller.submit_link(link).await {
        Ok(outcome) => match outcome.completed() {
            Some(resolution) => resolution,
            None => return Ok(ExitCode::FAILURE),
        },
        Err(e) => {
            debug!("Resolution failed: {}", e);
            return Ok(ExitCode::FAILURE);
        }
    };

    if args.print_url {
        match resolution.video_info.video_url.as_deref() {
            Some(url) if resolution.video_info.availability().is_enabled() => {
                println!("{}", url);
                return Ok(ExitCode::SUCCESS);
            }
            _ => {
                controller.view().error("No media URL was resolved");
                return Ok(ExitCode::FAILURE);
            }
        }
    }

    if args.save_cover.is_some() || args.verbosity_level() != VerbosityLevel::Quiet {
        let cover = controller.load_cover().await?;
        if let Some(path) = &args.save_cover {
            if cover.is_placeholder() {
                warn!("No cover could be loaded, writing placeholder");
            }
            tokio::fs::write(path, &cover.bytes)
                .await
                .with_context(|| format!("failed to write cover to {}", path.display()))?;
            controller
                .view()
                .info(&format!("Cover saved to {}", path.display()));
        }
    }

    if args.copy {
        controller.copy_info().await?;
    }

    if !args.wants_download() {
        return Ok(ExitCode::SUCCESS);
    }

    let ticket = match controller.request_download().await {
        Ok(outcome) => match outcome.completed() {
            Some(ticket) => ticket,
            None => return Ok(ExitCode::FAILURE),
        },
        Err(e) => {
            debug!("Download failed: {}", e);
            return Ok(ExitCode::FAILURE);
        }
    };

    let mut status = ExitCode::SUCCESS;

    if let Some(output) = &args.output {
        let view = controller.view();
        match controller
            .service()
            .save_file(&ticket.download_url, output, |written, total| {
                view.update_transfer(written, total)
            })
            .await
        {
            Ok(_) => {
                view.finish_transfer("saved");
                view.success(&format!("Saved to {}", output.display()));
            }
            Err(e) => {
                view.finish_transfer("failed");
                view.error(&format!("Saving failed: {}", e));
                status = ExitCode::FAILURE;
            }
        }
    }

    if args.cleanup && controller.cleanup().await.is_err() {
        status = ExitCode::FAILURE;
    }

    Ok(status)
}

fn print_usage() {
    println!("vidgrab - resolve and download videos from share links");
    println!();
    println!("Usage: vidgrab [OPTIONS] <LINK>");
    println!();
    println!("Examples:");
    println!("  vidgrab https://vm.tiktok.com/ABC123");
    println!("  vidgrab --download --output video.mp4 --cleanup LINK");
    println!("  vidgrab --server http://backend:4000 --copy LINK");
    println!("  vidgrab --list-platforms");
    println!();
    println!("For more information, run: vidgrab --help");
}

/// Initialize logging system
fn init_logging(verbosity: VerbosityLevel) -> anyhow::Result<()> {
    let default_level = match verbosity {
        VerbosityLevel::Verbose => "debug",
        VerbosityLevel::Normal => "warn",
        VerbosityLevel::Quiet => "error",
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .try_init()
        .context("failed to install the tracing subscriber")?;

    Ok(())
}
