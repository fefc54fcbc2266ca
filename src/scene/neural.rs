use std::f32::consts::PI;

use crate::ir::{Cell, VisualMode};

use super::{Circle, Line, Scene, SceneComposer, SceneInput, Text};

/// Number of most recent days turned into neurons.
pub const NEURAL_WINDOW: usize = 80;
/// Forward offsets each neuron may connect to.
pub const NEURAL_EDGE_OFFSETS: [usize; 3] = [1, 3, 7];
pub const NEURAL_EDGE_MAX_DISTANCE: f32 = 140.0;

const DEFAULT_SYNAPSE_COLOR: &str = "#00f7ff";

#[derive(Debug, Clone, PartialEq)]
pub struct NeuralNode {
    pub x: f32,
    pub y: f32,
    pub r: f32,
    pub count: u32,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NeuralEdge {
    pub from: usize,
    pub to: usize,
    pub opacity: f32,
}

/// Places the most recent `window` days on two mirrored arcs around
/// `(cx, cy)`: even indices on the left, odd on the right. Radii cycle with
/// the index and stretch slightly with the day's count.
pub fn neural_nodes(cells: &[Cell], cx: f32, cy: f32, window: usize) -> Vec<NeuralNode> {
    let days: Vec<u32> = cells
        .iter()
        .filter(|cell| !cell.is_future && (cell.date.is_some() || cell.count > 0))
        .map(|cell| cell.count)
        .collect();
    let recent = &days[days.len().saturating_sub(window)..];
    let total = recent.len().max(1) as f32;

    recent
        .iter()
        .enumerate()
        .map(|(idx, &count)| {
            let side = if idx % 2 == 0 { -1.0 } else { 1.0 };
            let angle = idx as f32 / total * PI;
            let radius_x = 90.0 + (idx % 10) as f32 * 6.0;
            let radius_y = 60.0 + (idx % 7) as f32 * 6.0;
            let stretch = 0.9 + (count % 5) as f32 * 0.03;
            let brightness = (80 + count.min(10) * 18).min(255);
            NeuralNode {
                x: cx + side * angle.cos() * radius_x * stretch,
                y: cy + angle.sin() * radius_y * stretch,
                r: 2.0 + count.min(10) as f32,
                count,
                color: format!("rgb(0,{brightness},255)"),
            }
        })
        .collect()
}

/// Connects node `i` to `i + offset` for each offset, when that node exists
/// and lies closer than `max_distance`. Linear in the node count.
pub fn neural_edges(nodes: &[NeuralNode], offsets: &[usize], max_distance: f32) -> Vec<NeuralEdge> {
    let mut edges = Vec::new();
    for (from, a) in nodes.iter().enumerate() {
        for offset in offsets {
            let to = from + offset;
            let Some(b) = nodes.get(to) else {
                continue;
            };
            let distance = (b.x - a.x).hypot(b.y - a.y);
            if distance < max_distance {
                edges.push(NeuralEdge {
                    from,
                    to,
                    opacity: ((a.count as f32 + b.count as f32) / 20.0).min(0.5),
                });
            }
        }
    }
    edges
}

pub struct NeuralComposer;

impl SceneComposer for NeuralComposer {
    fn mode(&self) -> VisualMode {
        VisualMode::Neural
    }

    fn compose(&self, input: &SceneInput, scene: &mut Scene) {
        let cx = input.width() / 2.0;
        let cy = input.height() / 2.0 + 10.0;
        let nodes = neural_nodes(input.cells, cx, cy, NEURAL_WINDOW);
        if nodes.is_empty() {
            return;
        }
        let synapse = input
            .theme
            .extra("synapse_color")
            .unwrap_or(DEFAULT_SYNAPSE_COLOR)
            .to_string();

        scene.push(Circle {
            cx,
            cy,
            r: 45.0,
            fill: synapse.clone(),
            opacity: Some(0.08),
            ..Default::default()
        });
        scene.push(Text {
            x: cx,
            y: cy + 5.0,
            text: "Contributions".to_string(),
            fill: synapse.clone(),
            font_size: 12.0,
            font_family: Some("Courier New".to_string()),
            anchor: Some("middle".to_string()),
            opacity: Some(0.8),
            ..Default::default()
        });

        for node in &nodes {
            scene.push(Circle {
                cx: node.x,
                cy: node.y,
                r: node.r,
                fill: node.color.clone(),
                opacity: Some(0.9),
                ..Default::default()
            });
        }

        for edge in neural_edges(&nodes, &NEURAL_EDGE_OFFSETS, NEURAL_EDGE_MAX_DISTANCE) {
            let (a, b) = (&nodes[edge.from], &nodes[edge.to]);
            scene.push(Line {
                x1: a.x,
                y1: a.y,
                x2: b.x,
                y2: b.y,
                stroke: synapse.clone(),
                stroke_width: 1.0,
                opacity: Some(edge.opacity),
                ..Default::default()
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::compose_scene;
    use crate::scene::testing::{fixture, fixture_from};
    use chrono::NaiveDate;

    fn dated(count: u32) -> Cell {
        Cell {
            date: NaiveDate::from_ymd_opt(2024, 1, 1),
            count,
            is_future: false,
        }
    }

    #[test]
    fn edges_follow_fixed_offsets() {
        let cells: Vec<Cell> = (0..10).map(dated).collect();
        let nodes = neural_nodes(&cells, 250.0, 95.0, NEURAL_WINDOW);
        assert_eq!(nodes.len(), 10);
        let edges = neural_edges(&nodes, &NEURAL_EDGE_OFFSETS, f32::INFINITY);
        // 9 + 7 + 3 candidates for offsets 1, 3 and 7.
        assert_eq!(edges.len(), 19);
        let from = |idx: usize| -> Vec<usize> {
            edges.iter().filter(|e| e.from == idx).map(|e| e.to).collect()
        };
        assert_eq!(from(0), vec![1, 3, 7]);
        assert_eq!(from(8), vec![9]);
        assert!(from(9).is_empty());
    }

    #[test]
    fn distance_threshold_prunes_edges() {
        let cells: Vec<Cell> = (0..10).map(dated).collect();
        let nodes = neural_nodes(&cells, 250.0, 95.0, NEURAL_WINDOW);
        assert!(neural_edges(&nodes, &NEURAL_EDGE_OFFSETS, 0.0).is_empty());
    }

    #[test]
    fn edge_opacity_is_capped() {
        let cells = vec![dated(3), dated(4), dated(9), dated(10)];
        let nodes = neural_nodes(&cells, 0.0, 0.0, NEURAL_WINDOW);
        let edges = neural_edges(&nodes, &[1], f32::INFINITY);
        assert_eq!(edges[0].opacity, 0.35);
        assert_eq!(edges[2].opacity, 0.5);
    }

    #[test]
    fn huge_counts_keep_capped_opacity() {
        let cells = vec![dated(u32::MAX), dated(u32::MAX), dated(u32::MAX)];
        let nodes = neural_nodes(&cells, 0.0, 0.0, NEURAL_WINDOW);
        assert!(nodes.iter().all(|node| node.r == 12.0));
        let edges = neural_edges(&nodes, &[1], f32::INFINITY);
        assert_eq!(edges.len(), 2);
        assert!(edges.iter().all(|edge| edge.opacity == 0.5));
    }

    #[test]
    fn nodes_alternate_sides_and_are_reproducible() {
        let cells: Vec<Cell> = (0..6).map(dated).collect();
        let nodes = neural_nodes(&cells, 100.0, 50.0, NEURAL_WINDOW);
        // First node sits on the left, second mirrors to the right.
        assert!(nodes[0].x < 100.0);
        assert!(nodes[1].x > 100.0);
        assert_eq!(nodes, neural_nodes(&cells, 100.0, 50.0, NEURAL_WINDOW));
    }

    #[test]
    fn window_keeps_most_recent_days() {
        let cells: Vec<Cell> = (0..100).map(dated).collect();
        let nodes = neural_nodes(&cells, 0.0, 0.0, NEURAL_WINDOW);
        assert_eq!(nodes.len(), 80);
        assert_eq!(nodes[0].count, 20);
        assert_eq!(nodes[79].count, 99);
    }

    #[test]
    fn padding_and_future_cells_are_not_neurons() {
        let mut cells = vec![Cell::empty(); 5];
        cells.push(Cell {
            is_future: true,
            ..dated(4)
        });
        assert!(neural_nodes(&cells, 0.0, 0.0, NEURAL_WINDOW).is_empty());
    }

    #[test]
    fn composer_draws_window() {
        let fx = fixture(VisualMode::Neural, 200);
        let scene = compose_scene(&NeuralComposer, &fx.input());
        // Core glow plus one circle per neuron.
        assert_eq!(scene.circles().count(), NEURAL_WINDOW + 1);
        assert!(scene.lines().count() > 0);
    }

    #[test]
    fn empty_calendar_draws_only_frame() {
        let fx = fixture_from(VisualMode::Neural, &[]);
        let scene = compose_scene(&NeuralComposer, &fx.input());
        assert_eq!(scene.circles().count(), 0);
        assert_eq!(scene.commands.len(), 2);
    }
}
