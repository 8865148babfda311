#![forbid(unsafe_code)]

//! Command-line front end: outline file in, PNG out.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use skema::{CanvasSize, FontContext, Pipeline, PipelineConfig, SchemaStyle};

#[derive(Parser)]
#[command(name = "skema", version, about = "Render an indented outline as a diagram")]
struct Args {
    /// Outline file, one label per line, 2-space indentation per level.
    input: PathBuf,

    /// Output PNG path.
    #[arg(short, long, default_value = "schema.png")]
    output: PathBuf,

    /// Diagram style: hierarchical, organizational, timeline, flowchart,
    /// or mindmap.
    #[arg(short, long, default_value = "hierarchical", value_parser = parse_style)]
    style: SchemaStyle,

    /// Minimum canvas width; the layout grows it when content needs room.
    #[arg(long, default_value_t = 1000.0)]
    width: f32,

    /// Minimum canvas height.
    #[arg(long, default_value_t = 700.0)]
    height: f32,

    /// Font file (TTF/OTF). Falls back to SKEMA_FONT_PATH, then common
    /// system fonts.
    #[arg(long)]
    font: Option<PathBuf>,

    /// Enhancement service endpoint; omitted means no enhancement.
    #[cfg(feature = "http")]
    #[arg(long)]
    enhance_url: Option<String>,
}

fn parse_style(value: &str) -> Result<SchemaStyle, String> {
    SchemaStyle::parse(value).ok_or_else(|| format!("unknown style '{value}'"))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let text = std::fs::read_to_string(&args.input)
        .with_context(|| format!("reading {}", args.input.display()))?;

    let font = FontContext::load(args.font.as_deref()).context("loading font")?;

    let config = PipelineConfig {
        style: args.style,
        viewport: CanvasSize::new(args.width, args.height),
        ..PipelineConfig::default()
    };

    let pipeline = Pipeline::new(config).with_measurer(&font);

    #[cfg(feature = "http")]
    let enhancer = args
        .enhance_url
        .as_ref()
        .map(|url| skema::HttpEnhancer::new(url.clone()))
        .transpose()
        .context("building enhancement client")?;
    #[cfg(feature = "http")]
    let pipeline = match &enhancer {
        Some(e) => pipeline.with_enhancer(e),
        None => pipeline,
    };

    let (schema, png) = pipeline.generate_png(&text, &font);
    let bytes = png.context("rendering diagram")?;
    std::fs::write(&args.output, &bytes)
        .with_context(|| format!("writing {}", args.output.display()))?;

    info!(
        nodes = schema.layout.nodes.len(),
        connectors = schema.layout.connectors.len(),
        "wrote {}",
        args.output.display()
    );
    println!(
        "{}: {} nodes, {} connectors, {:.0}x{:.0}",
        args.output.display(),
        schema.layout.nodes.len(),
        schema.layout.connectors.len(),
        schema.layout.canvas.width,
        schema.layout.canvas.height,
    );
    Ok(())
}
