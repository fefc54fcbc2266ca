use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::ir::VisualMode;

use super::{
    Circle, Definition, Line, Path, Scene, SceneComposer, SceneInput, push_calendar_labels,
};

const TWINKLE_CSS: &str = "@keyframes twinkle { 0% { opacity: 0.3; } 50% { opacity: 1; } 100% { opacity: 0.3; } } .star { animation: twinkle 2s ease-in-out infinite; }";
const BACKDROP_STARS: usize = 40;

/// Active days become twinkling stars; a ship sits at the right edge.
pub struct SpaceComposer;

impl SpaceComposer {
    /// Faint background scatter. Purely decorative, seeded so output stays
    /// reproducible.
    fn backdrop(input: &SceneInput, scene: &mut Scene) {
        let mut rng = StdRng::seed_from_u64(input.star_seed);
        let (width, height) = (input.width().max(1.0), input.height().max(1.0));
        for _ in 0..BACKDROP_STARS {
            scene.push(Circle {
                cx: rng.gen_range(0.0..width).round(),
                cy: rng.gen_range(0.0..height).round(),
                r: rng.gen_range(0.5..1.5),
                fill: "white".to_string(),
                fill_opacity: Some(0.3),
                ..Default::default()
            });
        }
    }

    fn ship(input: &SceneInput, scene: &mut Scene) {
        let x = input.width() - 60.0;
        let y = input.height() / 2.0 + 10.0;
        scene.push(Path {
            d: format!(
                "M {} {} L {} {} L {} {} Z",
                x - 10.0,
                y,
                x - 20.0,
                y - 5.0,
                x - 20.0,
                y + 5.0
            ),
            fill: "orange".to_string(),
            ..Default::default()
        });
        scene.push(Path {
            d: format!(
                "M {} {} L {} {} L {} {} Z",
                x,
                y,
                x - 15.0,
                y - 8.0,
                x - 15.0,
                y + 8.0
            ),
            fill: "#00a8ff".to_string(),
            ..Default::default()
        });
        scene.push(Line {
            x1: x,
            y1: y,
            x2: input.width(),
            y2: y,
            stroke: "#00a8ff".to_string(),
            stroke_width: 2.0,
            dasharray: Some("4,2".to_string()),
            ..Default::default()
        });
    }
}

impl SceneComposer for SpaceComposer {
    fn mode(&self) -> VisualMode {
        VisualMode::Space
    }

    fn compose(&self, input: &SceneInput, scene: &mut Scene) {
        scene.define(Definition::Style(TWINKLE_CSS.to_string()));
        Self::backdrop(input, scene);
        push_calendar_labels(input, scene);

        let half = input.layout.cell_size / 2.0;
        for (idx, (&(x, y), level)) in input.layout.positions.iter().zip(input.levels).enumerate() {
            let level = match level {
                Some(level) if *level > 0 => *level,
                _ => continue,
            };
            scene.push(Circle {
                cx: x + half,
                cy: y + half,
                r: 1.0 + level as f32 * 0.7,
                fill: "white".to_string(),
                class: Some("star".to_string()),
                style: Some(format!("animation-delay: {:.1}s", (idx % 10) as f32 * 0.2)),
                ..Default::default()
            });
        }

        Self::ship(input, scene);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::compose_scene;
    use crate::scene::testing::{fixture, fixture_from};

    fn data_stars(scene: &Scene) -> Vec<&Circle> {
        scene
            .circles()
            .filter(|circle| circle.class.as_deref() == Some("star"))
            .collect()
    }

    #[test]
    fn one_star_per_active_cell() {
        let fx = fixture(VisualMode::Space, 200);
        let scene = compose_scene(&SpaceComposer, &fx.input());
        let active = fx
            .levels
            .iter()
            .filter(|level| matches!(level, Some(l) if *l > 0))
            .count();
        assert_eq!(data_stars(&scene).len(), active);
        assert!(data_stars(&scene).iter().all(|star| star.r > 1.0 && star.r < 3.81));
    }

    #[test]
    fn backdrop_is_seeded() {
        let fx = fixture(VisualMode::Space, 10);
        let first = compose_scene(&SpaceComposer, &fx.input());
        let second = compose_scene(&SpaceComposer, &fx.input());
        assert_eq!(first, second);

        let mut input = fx.input();
        input.star_seed = 99;
        let reseeded = compose_scene(&SpaceComposer, &input);
        assert_ne!(first, reseeded);
        assert_eq!(data_stars(&first), data_stars(&reseeded));
    }

    #[test]
    fn ship_drawn_without_data() {
        let fx = fixture_from(VisualMode::Space, &[]);
        let scene = compose_scene(&SpaceComposer, &fx.input());
        assert!(data_stars(&scene).is_empty());
        assert_eq!(scene.lines().count(), 1);
        assert!(matches!(scene.defs.first(), Some(Definition::Style(_))));
    }
}
