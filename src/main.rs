// Command-line entry point for scgview.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use scgview::application::{RenderPlan, VisualizeUsecase};
use scgview::domain::degree::DEFAULT_RANK_LIMIT;
use scgview::infrastructure::figure_render::PlottersRenderer;
use scgview::infrastructure::spring_layout::{SpringLayout, SpringLayoutConfig};

/// Render a workspace's semantic code graph and its degree distribution.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Workspace root containing a .semanticgraphs directory
    workspace: PathBuf,

    /// Output path for the graph figure
    #[arg(long, default_value = "scg-graph.png")]
    graph_out: PathBuf,

    /// Output path for the degree distribution figure
    #[arg(long, default_value = "scg-degrees.png")]
    degree_out: PathBuf,

    /// Also write a JSON run summary to this path
    #[arg(long)]
    stats_out: Option<PathBuf>,

    /// Re-apply the visibility filter until no more nodes fall out
    #[arg(long)]
    fixed_point: bool,

    /// Spring layout iterations
    #[arg(long, default_value_t = 50)]
    iterations: usize,

    /// How many top-degree nodes the rank figure keeps
    #[arg(long, default_value_t = DEFAULT_RANK_LIMIT)]
    top: usize,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let layout_engine = SpringLayout::with_config(SpringLayoutConfig {
        iterations: cli.iterations,
        ..SpringLayoutConfig::default()
    });
    let usecase = VisualizeUsecase {
        layout_engine: &layout_engine,
        renderer: &PlottersRenderer,
    };
    let plan = RenderPlan {
        graph_out: cli.graph_out,
        degree_out: cli.degree_out,
        stats_out: cli.stats_out,
        rank_limit: cli.top,
        fixed_point: cli.fixed_point,
    };

    let summary = usecase.run(&cli.workspace, &plan)?;
    info!(
        "rendered {} nodes and {} edges to {} and {}",
        summary.visible_nodes,
        summary.visible_edges,
        plan.graph_out.display(),
        plan.degree_out.display()
    );
    Ok(())
}
