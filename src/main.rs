use anyhow::{Context, Result};
use bvh_pose_converter::convert::convert_bvh;
use bvh_pose_converter::export::write_json;
use bvh_pose_converter::names::canonical_bone_names;
use bvh_pose_converter::parse::load_bvh_from_file;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "bvh2pose")]
#[command(about = "Convert a .bvh file into normalized per-frame bone poses")]
#[command(version)]
struct Cli {
    /// Input .bvh file
    input: PathBuf,

    /// Write the converted frames as JSON
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .init();

    tracing::info!("Converting {:?}", cli.input);
    let (metadata, data) = load_bvh_from_file(&cli.input)
        .with_context(|| format!("Failed to load BVH: {:?}", cli.input))?;

    tracing::info!(
        "{} bones, {} channels, {} of {} frames decoded, frame time {}s ({} fps)",
        metadata.skeleton.len(),
        metadata.channels.cardinality(),
        data.frames.len(),
        metadata.num_frames,
        metadata.frame_time,
        metadata.fps
    );
    tracing::info!(
        "Mapped bones: {:?}",
        canonical_bone_names(metadata.skeleton.names())
    );

    let conversion = convert_bvh(&metadata, &data);

    if let Some(output) = &cli.output {
        write_json(&conversion, output)
            .with_context(|| format!("Failed to write output: {:?}", output))?;
        tracing::info!("Saved to {:?}", output);
    }

    Ok(())
}
