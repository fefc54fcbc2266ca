use crate::ir::VisualMode;

use super::{Rect, Scene, SceneComposer, SceneInput, push_calendar_labels};

pub const GITHUB_PALETTE: [&str; 5] = ["#161b22", "#0e4429", "#006d32", "#26a641", "#39d353"];

/// GitHub-style squares, one per non-future cell.
pub struct DefaultComposer;

impl SceneComposer for DefaultComposer {
    fn mode(&self) -> VisualMode {
        VisualMode::Default
    }

    fn compose(&self, input: &SceneInput, scene: &mut Scene) {
        push_calendar_labels(input, scene);
        let size = input.layout.cell_size;
        for (&(x, y), level) in input.layout.positions.iter().zip(input.levels) {
            let Some(level) = level else {
                continue;
            };
            scene.push(Rect {
                x,
                y,
                width: size,
                height: size,
                rx: 2.0,
                fill: GITHUB_PALETTE[*level as usize].to_string(),
                ..Default::default()
            });
        }
    }
}
