use crate::ir::{Level, MAX_LEVEL, VisualMode};

use super::{Rect, Scene, SceneComposer, SceneInput, Text, push_calendar_labels};

const BODY_COLORS: [&str; 4] = ["#0e4429", "#006d32", "#26a641", "#39d353"];
const FOOD_COLOR: &str = "#FF3333";
const EYE_COLOR: &str = "black";

/// Index of the most recent active cell. Later indices win ties, and future
/// cells (`None`) never qualify.
pub fn snake_head(levels: &[Level]) -> Option<usize> {
    levels
        .iter()
        .rposition(|level| matches!(level, Some(level) if *level > 0))
}

/// The intensity grid as a snake: top-level days are food, the latest active
/// day is the head.
pub struct SnakeComposer;

impl SceneComposer for SnakeComposer {
    fn mode(&self) -> VisualMode {
        VisualMode::Snake
    }

    fn compose(&self, input: &SceneInput, scene: &mut Scene) {
        push_calendar_labels(input, scene);
        scene.push(Text {
            x: input.width() - 120.0,
            y: 30.0,
            text: format!("SCORE: {}", input.stats.total),
            fill: input.theme.text_color.clone(),
            font_size: 16.0,
            font_family: Some("Courier New".to_string()),
            font_weight: Some("bold".to_string()),
            ..Default::default()
        });

        let size = input.layout.cell_size;
        let tile = |x: f32, y: f32, fill: &str| Rect {
            x,
            y,
            width: size,
            height: size,
            rx: 2.0,
            fill: fill.to_string(),
            ..Default::default()
        };

        for (&(x, y), level) in input.layout.positions.iter().zip(input.levels) {
            let Some(level) = *level else {
                continue;
            };
            let fill = match level {
                0 => input.theme.bg_color.as_str(),
                _ => BODY_COLORS[(level - 1) as usize],
            };
            scene.push(tile(x, y, fill));
            if level == MAX_LEVEL {
                scene.push(tile(x, y, FOOD_COLOR));
            }
        }

        let Some(head) = snake_head(input.levels) else {
            return;
        };
        let Some(&(hx, hy)) = input.layout.positions.get(head) else {
            return;
        };
        scene.push(tile(hx, hy, input.theme.title_color.as_str()));
        for eye_x in [hx + 1.0, hx + 4.0] {
            scene.push(Rect {
                x: eye_x,
                y: hy + 2.0,
                width: 2.0,
                height: 2.0,
                fill: EYE_COLOR.to_string(),
                ..Default::default()
            });
        }
    }
}
