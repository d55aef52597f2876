//! Dendrogram layout and rendering.
//!
//! Layout is a pure computation from the merge tree: leaf label slots on
//! the x-axis and one U-shaped link polyline per merge. Rendering is a
//! thin `plotters` pass over that layout, writing a PNG only — there is
//! no interactive display, so headless runs depend on nothing but the
//! file save.

use std::path::Path;

use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use tracing::info;
use triage_core::{Result, TriageError};

use crate::cluster::ClusterTree;

/// Geometry of a dendrogram, in data coordinates.
///
/// Leaves sit at half-integer x positions (slot + 0.5); the y axis is the
/// merge dissimilarity.
#[derive(Debug, Clone)]
pub struct DendrogramLayout {
    /// One polyline per merge: down-across-down through the two child
    /// cluster centers at the merge height.
    pub links: Vec<[(f64, f64); 4]>,
    /// (leaf id, x position) per displayed leaf, in display order.
    pub leaves: Vec<(usize, f64)>,
    /// Largest merge height, for axis scaling.
    pub max_distance: f64,
}

/// Compute the dendrogram geometry for a merge tree.
pub fn layout_dendrogram(tree: &ClusterTree) -> DendrogramLayout {
    let n = tree.observations();
    let order = tree.leaf_order();

    // (x center, height) per cluster id; children of step k always have
    // ids below n + k, so a single forward pass resolves every merge.
    let mut positions: Vec<(f64, f64)> = vec![(0.0, 0.0); n + tree.steps().len()];
    let mut leaves = Vec::with_capacity(n);
    for (slot, &leaf) in order.iter().enumerate() {
        let x = slot as f64 + 0.5;
        positions[leaf] = (x, 0.0);
        leaves.push((leaf, x));
    }

    let mut links = Vec::with_capacity(tree.steps().len());
    for (k, step) in tree.steps().iter().enumerate() {
        let (left_x, left_h) = positions[step.left];
        let (right_x, right_h) = positions[step.right];
        let h = step.distance;
        links.push([(left_x, left_h), (left_x, h), (right_x, h), (right_x, right_h)]);
        positions[n + k] = ((left_x + right_x) / 2.0, h);
    }

    DendrogramLayout {
        links,
        leaves,
        max_distance: tree.max_distance(),
    }
}

/// Render the dendrogram for `tree` to a PNG at `path`.
///
/// `labels` must be the session labels in matrix row order. Any backend
/// failure surfaces as [`TriageError::Render`]; rendering is a terminal
/// step and is not retried.
pub fn render_dendrogram(tree: &ClusterTree, labels: &[String], path: &Path) -> Result<()> {
    let layout = layout_dendrogram(tree);
    let n = tree.observations();

    let y_top = if layout.max_distance > 0.0 {
        layout.max_distance * 1.05
    } else {
        1.0
    };
    // Reserve a band below zero so leaf labels render inside the plot.
    let y_bottom = -0.12 * y_top;

    let root = BitMapBackend::new(path, (1000, 700)).into_drawing_area();
    root.fill(&WHITE).map_err(render_err)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(
            "Clustering of Sessions based on Levenshtein Distance",
            ("sans-serif", 22),
        )
        .margin(12)
        .x_label_area_size(30)
        .y_label_area_size(50)
        .build_cartesian_2d(0f64..n as f64, y_bottom..y_top)
        .map_err(render_err)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(0)
        .x_desc("Session ID")
        .y_desc("Distance")
        .draw()
        .map_err(render_err)?;

    for link in &layout.links {
        chart
            .draw_series(std::iter::once(PathElement::new(link.to_vec(), &BLUE)))
            .map_err(render_err)?;
    }

    let label_style = ("sans-serif", 13)
        .into_font()
        .color(&BLACK)
        .pos(Pos::new(HPos::Center, VPos::Top));
    chart
        .draw_series(layout.leaves.iter().map(|&(leaf, x)| {
            Text::new(labels[leaf].clone(), (x, y_bottom * 0.2), label_style.clone())
        }))
        .map_err(render_err)?;

    root.present().map_err(render_err)?;
    info!("Dendrogram saved to {}", path.display());
    Ok(())
}

fn render_err<E: std::fmt::Display>(err: E) -> TriageError {
    TriageError::Render(err.to_string())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
