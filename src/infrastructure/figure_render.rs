//! Raster figure output via plotters.
//!
//! Both figures are pure geometry so they render the same on hosts without
//! a font stack.

use std::ops::Range;
use std::path::Path;

use anyhow::{anyhow, Result};
use plotters::coord::Shift;
use plotters::prelude::*;

use crate::domain::degree::DegreeDistribution;
use crate::domain::graph::MergedGraph;
use crate::ports::{GraphRenderer, NodeLayout};

const GRAPH_SIZE: (u32, u32) = (1600, 900);
const DEGREE_SIZE: (u32, u32) = (800, 800);
// Tab-palette blue.
const NODE_COLOR: RGBColor = RGBColor(31, 119, 180);
const NODE_RADIUS: i32 = 2;
const NODE_ALPHA: f64 = 0.5;
const EDGE_ALPHA: f64 = 0.1;
const MARKER_RADIUS: i32 = 3;
const BAR_HALF_WIDTH: f64 = 0.4;

type DrawError = Box<dyn std::error::Error + Send + Sync>;

/// Renderer writing PNG files through the plotters bitmap backend.
pub struct PlottersRenderer;

impl GraphRenderer for PlottersRenderer {
    fn render_graph(&self, graph: &MergedGraph, layout: &NodeLayout, path: &Path) -> Result<()> {
        draw_graph_figure(graph, layout, path)
            .map_err(|err| anyhow!("failed to render graph figure {}: {err}", path.display()))
    }

    fn render_degree_distribution(
        &self,
        distribution: &DegreeDistribution,
        path: &Path,
    ) -> Result<()> {
        draw_degree_figure(distribution, path)
            .map_err(|err| anyhow!("failed to render degree figure {}: {err}", path.display()))
    }
}

fn draw_graph_figure(
    graph: &MergedGraph,
    layout: &NodeLayout,
    path: &Path,
) -> Result<(), DrawError> {
    let root = BitMapBackend::new(path, GRAPH_SIZE).into_drawing_area();
    root.fill(&WHITE)?;
    if layout.is_empty() {
        root.present()?;
        return Ok(());
    }

    let (x_range, y_range) = padded_bounds(layout);
    let chart = ChartBuilder::on(&root).build_cartesian_2d(x_range, y_range)?;
    let plot = chart.plotting_area();

    let edge_style: ShapeStyle = BLACK.mix(EDGE_ALPHA).into();
    for (source, target) in graph.edges() {
        if let (Some(&from), Some(&to)) = (layout.get(&source), layout.get(&target)) {
            plot.draw(&PathElement::new(vec![from, to], edge_style))?;
        }
    }

    let node_style = NODE_COLOR.mix(NODE_ALPHA).filled();
    for &position in layout.values() {
        plot.draw(&Circle::new(position, NODE_RADIUS, node_style))?;
    }

    root.present()?;
    Ok(())
}

fn draw_degree_figure(distribution: &DegreeDistribution, path: &Path) -> Result<(), DrawError> {
    let root = BitMapBackend::new(path, DEGREE_SIZE).into_drawing_area();
    root.fill(&WHITE)?;
    if !distribution.is_empty() {
        let panels = root.split_evenly((1, 2));
        draw_rank_panel(&panels[0], distribution)?;
        draw_histogram_panel(&panels[1], distribution)?;
    }
    root.present()?;
    Ok(())
}

/// Left panel: descending degree per rank, drawn as a marked line.
fn draw_rank_panel(
    area: &DrawingArea<BitMapBackend, Shift>,
    distribution: &DegreeDistribution,
) -> Result<(), DrawError> {
    let points: Vec<(f64, f64)> = distribution
        .sequence
        .iter()
        .enumerate()
        .map(|(rank, &degree)| (rank as f64, degree as f64))
        .collect();
    let top = (distribution.max_degree() as f64).max(1.0) * 1.05;
    let right = (points.len() as f64 - 1.0).max(1.0);

    let mut chart = ChartBuilder::on(area)
        .margin(20)
        .build_cartesian_2d(-0.5..right + 0.5, 0.0..top)?;
    chart.draw_series(LineSeries::new(points.iter().copied(), &BLUE))?;
    chart.draw_series(
        points
            .iter()
            .map(|&point| Circle::new(point, MARKER_RADIUS, BLUE.filled())),
    )?;
    Ok(())
}

/// Right panel: node count per distinct degree value.
fn draw_histogram_panel(
    area: &DrawingArea<BitMapBackend, Shift>,
    distribution: &DegreeDistribution,
) -> Result<(), DrawError> {
    let max_count = distribution
        .histogram
        .iter()
        .map(|&(_, count)| count)
        .max()
        .unwrap_or(0);
    let max_degree = distribution
        .histogram
        .last()
        .map(|&(degree, _)| degree)
        .unwrap_or(0);

    let mut chart = ChartBuilder::on(area).margin(20).build_cartesian_2d(
        -1.0..max_degree as f64 + 1.0,
        0.0..(max_count as f64).max(1.0) * 1.05,
    )?;
    chart.draw_series(distribution.histogram.iter().map(|&(degree, count)| {
        let x = degree as f64;
        Rectangle::new(
            [(x - BAR_HALF_WIDTH, 0.0), (x + BAR_HALF_WIDTH, count as f64)],
            NODE_COLOR.filled(),
        )
    }))?;
    Ok(())
}

/// Data bounds with a 5% margin, widened when degenerate.
fn padded_bounds(layout: &NodeLayout) -> (Range<f64>, Range<f64>) {
    let (mut min_x, mut max_x) = (f64::INFINITY, f64::NEG_INFINITY);
    let (mut min_y, mut max_y) = (f64::INFINITY, f64::NEG_INFINITY);
    for &(x, y) in layout.values() {
        min_x = min_x.min(x);
        max_x = max_x.max(x);
        min_y = min_y.min(y);
        max_y = max_y.max(y);
    }
    let pad_x = ((max_x - min_x) * 0.05).max(0.05);
    let pad_y = ((max_y - min_y) * 0.05).max(0.05);
    (
        min_x - pad_x..max_x + pad_x,
        min_y - pad_y..max_y + pad_y,
    )
}
