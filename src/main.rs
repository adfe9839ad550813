mod cli;

use vidsplit::{
    config,
    split::{FailurePolicy, SplitEvent, SplitOptions, SplitReport, Splitter},
};
use vidsplit_av::{check_tools, FfmpegBackend, ToolPaths};

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use std::path::Path;
use std::process::ExitCode;

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Initialize logging
    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "vidsplit=debug,vidsplit_av=debug".to_string()
        } else {
            "vidsplit=warn,vidsplit_av=warn".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .with_writer(std::io::stderr)
        .init();

    let config = config::load_config_or_default(cli.config.as_deref())?;

    if cli.check_tools {
        return check_tools_command(&config);
    }

    let Some(input) = cli.input.as_deref() else {
        anyhow::bail!("No input file given");
    };

    let options = SplitOptions {
        segment_count: cli.split_count.unwrap_or(config.split.count),
        on_failure: if cli.fail_fast {
            FailurePolicy::Abort
        } else {
            config.split.on_failure
        },
        naming: config.split.naming.clone(),
        dry_run: cli.dry_run,
    };

    split_file(input, &config, options, cli.json)
}

fn split_file(
    input: &Path,
    config: &config::Config,
    options: SplitOptions,
    json: bool,
) -> Result<ExitCode> {
    // Reject a zero count before touching the filesystem or tools
    vidsplit::split::validate_segment_count(options.segment_count)?;

    if !input.exists() {
        return Err(vidsplit_av::Error::file_not_found(input).into());
    }

    let tools = ToolPaths::resolve(
        config.tools.ffprobe_path.as_deref(),
        config.tools.ffmpeg_path.as_deref(),
    )?;
    tracing::debug!("Using ffprobe {:?}, ffmpeg {:?}", tools.ffprobe, tools.ffmpeg);

    let dry_run = options.dry_run;
    let splitter = Splitter::new(FfmpegBackend::new(tools), options);

    let report = splitter.run(input, |event| {
        if json {
            return;
        }
        match event {
            SplitEvent::Planned { plan, run_id } => {
                if dry_run {
                    println!(
                        "[DRY RUN] Duration {:.3}s, {} segments of {:.3}s, run id {}",
                        plan.duration(),
                        plan.segment_count(),
                        plan.segment_duration(),
                        run_id
                    );
                }
            }
            SplitEvent::SegmentStarted { job, total } => {
                if dry_run {
                    println!(
                        "  {}/{}: start {:.3}s, length {:.3}s -> {}",
                        job.number(),
                        total,
                        job.start_time,
                        job.duration,
                        job.output_path.display()
                    );
                } else {
                    println!(
                        "Creating segment {}/{}: {}",
                        job.number(),
                        total,
                        job.output_path.display()
                    );
                }
            }
            SplitEvent::SegmentFailed { job, error } => {
                eprintln!("Segment {} failed: {}", job.number(), error);
            }
        }
    })?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_summary(&report);
    }

    Ok(if report.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn print_summary(report: &SplitReport) {
    if report.dry_run {
        println!(
            "\n[DRY RUN] Would create {} segments with ID {}",
            report.segment_count, report.run_id
        );
        return;
    }

    if report.is_success() {
        println!(
            "Done. Created {} segments with ID {}.",
            report.segment_count, report.run_id
        );
    } else {
        println!(
            "Finished with errors. Created {} of {} segments with ID {}.",
            report.succeeded().count(),
            report.segment_count,
            report.run_id
        );
        println!("Failed segments:");
        for failure in &report.failures {
            println!(
                "  {}. {}: {}",
                failure.number,
                failure.output_path.display(),
                failure.message
            );
        }
    }
}

fn check_tools_command(config: &config::Config) -> Result<ExitCode> {
    println!("Checking external tools...\n");

    let paths = ToolPaths::unresolved(
        config.tools.ffprobe_path.as_deref(),
        config.tools.ffmpeg_path.as_deref(),
    );
    let tools = check_tools(&paths);
    let mut all_ok = true;

    for tool in &tools {
        let status = if tool.available {
            "✓"
        } else {
            all_ok = false;
            "✗"
        };

        print!("{} {}", status, tool.name);

        if let Some(ref version) = tool.version {
            print!(" ({})", version);
        }

        if let Some(ref path) = tool.path {
            print!(" - {}", path.display());
        }

        println!();
    }

    println!();
    if all_ok {
        println!("All required tools are available!");
        Ok(ExitCode::SUCCESS)
    } else {
        println!("Some tools are missing. Install ffmpeg to split files.");
        Ok(ExitCode::FAILURE)
    }
}
