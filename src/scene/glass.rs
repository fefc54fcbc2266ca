use crate::ir::VisualMode;

use super::{Circle, Definition, GradientStop, Rect, Scene, SceneComposer, SceneInput, Text};

const PANEL_MARGIN: f32 = 25.0;
const BUBBLE_WEEKS: usize = 26;
const BUBBLE_SPACING: f32 = 9.0;
const BUBBLE_RADIUS: f32 = 3.0;

/// Frosted panel over blurred neon blobs, with a bubble grid of the most
/// recent weeks.
pub struct GlassComposer;

impl GlassComposer {
    fn definitions(input: &SceneInput, scene: &mut Scene) {
        scene.define(Definition::Blur {
            id: "blobBlur".to_string(),
            std_deviation: 40.0,
            spread: true,
        });
        scene.define(Definition::Glow {
            id: "textGlow".to_string(),
            color: input.theme.title_color.clone(),
            std_deviation: 2.0,
        });
        scene.define(Definition::LinearGradient {
            id: "glassGrad".to_string(),
            stops: vec![
                GradientStop {
                    offset: 0.0,
                    color: "white".to_string(),
                    opacity: 0.15,
                },
                GradientStop {
                    offset: 1.0,
                    color: "white".to_string(),
                    opacity: 0.05,
                },
            ],
        });
        scene.define(Definition::LinearGradient {
            id: "borderGrad".to_string(),
            stops: vec![
                GradientStop {
                    offset: 0.0,
                    color: input.theme.border_color.clone(),
                    opacity: 0.4,
                },
                GradientStop {
                    offset: 1.0,
                    color: input.theme.border_color.clone(),
                    opacity: 0.1,
                },
            ],
        });
    }
}

impl SceneComposer for GlassComposer {
    fn mode(&self) -> VisualMode {
        VisualMode::Glass
    }

    fn frame(&self, input: &SceneInput, scene: &mut Scene) {
        let (width, height) = (input.width(), input.height());
        Self::definitions(input, scene);
        scene.push(Rect {
            width,
            height,
            rx: 16.0,
            fill: input.theme.bg_color.clone(),
            ..Default::default()
        });

        let blobs = [
            (0.0, 0.0, 120.0, "#ff00ff", 0.6),
            (width, height, 140.0, "#00ffff", 0.5),
            (width * 0.8, height * 0.3, 80.0, input.theme.title_color.as_str(), 0.6),
            (width * 0.2, height * 1.1, 100.0, input.theme.icon_color.as_str(), 0.6),
        ];
        for (cx, cy, r, fill, opacity) in blobs {
            scene.push(Circle {
                cx,
                cy,
                r,
                fill: fill.to_string(),
                opacity: Some(opacity),
                filter: Some("blobBlur".to_string()),
                ..Default::default()
            });
        }

        let panel = Rect {
            x: PANEL_MARGIN,
            y: PANEL_MARGIN,
            width: width - PANEL_MARGIN * 2.0,
            height: height - PANEL_MARGIN * 2.0,
            rx: 16.0,
            fill: "#000000".to_string(),
            opacity: Some(0.2),
            ..Default::default()
        };
        scene.push(panel.clone());
        scene.push(Rect {
            fill: "url(#glassGrad)".to_string(),
            stroke: Some("url(#borderGrad)".to_string()),
            stroke_width: 1.5,
            opacity: None,
            ..panel
        });

        scene.push(Text {
            x: width / 2.0,
            y: PANEL_MARGIN + 25.0,
            text: input.title.to_uppercase(),
            fill: "white".to_string(),
            font_size: input.theme.title_font_size,
            font_family: Some(input.theme.font_family.clone()),
            font_weight: Some("bold".to_string()),
            anchor: Some("middle".to_string()),
            letter_spacing: Some(4.0),
            filter: Some("textGlow".to_string()),
            ..Default::default()
        });
        scene.push(Text {
            x: width / 2.0,
            y: PANEL_MARGIN + 40.0,
            text: "NEON LIQUID".to_string(),
            fill: input.theme.text_color.clone(),
            font_size: input.theme.text_font_size,
            font_family: Some(input.theme.font_family.clone()),
            anchor: Some("middle".to_string()),
            letter_spacing: Some(2.0),
            opacity: Some(0.8),
            ..Default::default()
        });
    }

    fn compose(&self, input: &SceneInput, scene: &mut Scene) {
        let rows = input.grid.rows;
        let weeks = input.grid.cols.min(BUBBLE_WEEKS);
        let skip = (input.grid.cols - weeks) * rows;
        let start_x = (input.width() - (weeks.saturating_sub(1)) as f32 * BUBBLE_SPACING) / 2.0;
        let start_y = PANEL_MARGIN + 58.0;

        for (idx, level) in input.levels.iter().skip(skip).enumerate() {
            let Some(level) = *level else {
                continue;
            };
            let cx = start_x + (idx / rows) as f32 * BUBBLE_SPACING;
            let cy = start_y + (idx % rows) as f32 * BUBBLE_SPACING;
            if level == 0 {
                scene.push(Circle {
                    cx,
                    cy,
                    r: BUBBLE_RADIUS,
                    fill: "#ffffff".to_string(),
                    opacity: Some(0.1),
                    ..Default::default()
                });
                continue;
            }
            let r = BUBBLE_RADIUS + level as f32 * 0.25;
            scene.push(Circle {
                cx,
                cy,
                r,
                fill: input.theme.title_color.clone(),
                opacity: Some(0.3 + level as f32 / 4.0 * 0.5),
                ..Default::default()
            });
            scene.push(Circle {
                cx: cx - r * 0.3,
                cy: cy - r * 0.4,
                r: r * 0.45,
                fill: "#ffffff".to_string(),
                fill_opacity: Some(0.35),
                ..Default::default()
            });
        }
    }
}
