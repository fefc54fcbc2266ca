use crate::ir::VisualMode;

use super::{Circle, Scene, SceneComposer, SceneInput, Text};

/// Mind, Reality, Space, Power, Time, Soul.
pub const STONE_COLORS: [&str; 6] =
    ["#FFD700", "#FF0000", "#0000FF", "#800080", "#008000", "#FFA500"];

const STONE_SPACING: f32 = 60.0;

/// Splits `counts` into `buckets` contiguous runs of `max(1, len / buckets)`
/// values and returns each run's mean. Runs past the end of the data are 0.
pub fn bucket_means(counts: &[u32], buckets: usize) -> Vec<f64> {
    if buckets == 0 {
        return Vec::new();
    }
    let size = (counts.len() / buckets).max(1);
    (0..buckets)
        .map(|idx| {
            let start = (idx * size).min(counts.len());
            let end = (start + size).min(counts.len());
            let run = &counts[start..end];
            if run.is_empty() {
                0.0
            } else {
                run.iter().map(|count| *count as f64).sum::<f64>() / run.len() as f64
            }
        })
        .collect()
}

/// Six stones whose glow tracks activity across successive stretches of the
/// calendar, relative to the busiest stretch.
pub struct MarvelComposer;

impl SceneComposer for MarvelComposer {
    fn mode(&self) -> VisualMode {
        VisualMode::Marvel
    }

    fn compose(&self, input: &SceneInput, scene: &mut Scene) {
        let cy = input.height() / 2.0 + 10.0;
        let counts: Vec<u32> = input
            .cells
            .iter()
            .filter(|cell| !cell.is_future)
            .map(|cell| cell.count)
            .collect();
        let means = bucket_means(&counts, STONE_COLORS.len());
        let max_mean = means.iter().copied().fold(0.0_f64, f64::max);

        for (idx, (color, mean)) in STONE_COLORS.iter().zip(&means).enumerate() {
            let intensity = if max_mean > 0.0 {
                (mean / max_mean) as f32
            } else {
                0.0
            };
            let sx = STONE_SPACING + idx as f32 * STONE_SPACING;
            scene.push(Circle {
                cx: sx,
                cy,
                r: 8.0 + intensity * 14.0,
                fill: color.to_string(),
                opacity: Some(0.25 + intensity * 0.35),
                ..Default::default()
            });
            scene.push(Circle {
                cx: sx,
                cy,
                r: 6.0 + intensity * 6.0,
                fill: color.to_string(),
                stroke: Some("white".to_string()),
                stroke_width: 1.0,
                ..Default::default()
            });
            scene.push(Text {
                x: sx,
                y: cy + 30.0,
                text: format!("Stone {}", idx + 1),
                fill: "white".to_string(),
                font_size: 10.0,
                anchor: Some("middle".to_string()),
                ..Default::default()
            });
        }

        scene.push(Text {
            x: input.width() - 80.0,
            y: cy,
            text: "SNAP!".to_string(),
            fill: input.theme.title_color.clone(),
            font_size: 24.0,
            font_family: Some("Impact".to_string()),
            font_weight: Some("bold".to_string()),
            ..Default::default()
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::compose_scene;
    use crate::ir::ContributionDay;
    use crate::scene::testing::{fixture, fixture_from};
    use chrono::{Days, NaiveDate};

    #[test]
    fn buckets_are_contiguous_means() {
        let counts = [1, 1, 2, 2, 3, 3, 4, 4, 5, 5, 6, 6, 99];
        assert_eq!(bucket_means(&counts, 6), vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    }

    #[test]
    fn short_series_leaves_trailing_buckets_empty() {
        assert_eq!(bucket_means(&[4, 8], 6), vec![4.0, 8.0, 0.0, 0.0, 0.0, 0.0]);
        assert_eq!(bucket_means(&[], 6), vec![0.0; 6]);
        assert!(bucket_means(&[1, 2], 0).is_empty());
    }

    fn stone_radii(scene: &Scene) -> Vec<f32> {
        scene
            .circles()
            .filter(|circle| circle.stroke.is_some())
            .map(|circle| circle.r)
            .collect()
    }

    #[test]
    fn empty_calendar_renders_minimum_stones() {
        let fx = fixture_from(VisualMode::Marvel, &[]);
        let scene = compose_scene(&MarvelComposer, &fx.input());
        assert_eq!(stone_radii(&scene), vec![6.0; 6]);
        assert!(scene.texts().any(|text| text == "SNAP!"));
    }

    #[test]
    fn busiest_stretch_glows_brightest() {
        let fx = fixture(VisualMode::Marvel, 60);
        let scene = compose_scene(&MarvelComposer, &fx.input());
        let radii = stone_radii(&scene);
        assert_eq!(radii.len(), 6);
        // The fixture only covers the last two months, the final stretch.
        assert_eq!(radii[5], 12.0);
        assert!(radii[..5].iter().all(|r| *r < 12.0));
    }

    #[test]
    fn future_days_do_not_feed_stones() {
        // "Today" is Sunday 2024-06-30, so the rest of that week is future.
        let end = NaiveDate::from_ymd_opt(2024, 6, 30).unwrap();
        let past: Vec<ContributionDay> = (0..90u64)
            .map(|offset| {
                let date = end.checked_sub_days(Days::new(offset)).unwrap();
                ContributionDay::new(date, (offset % 5) as u32)
            })
            .collect();
        let mut with_future = past.clone();
        with_future.push(ContributionDay::new(
            NaiveDate::from_ymd_opt(2024, 7, 3).unwrap(),
            500,
        ));

        let baseline = fixture_from(VisualMode::Marvel, &past);
        let ahead = fixture_from(VisualMode::Marvel, &with_future);
        assert!(ahead.cells.iter().any(|cell| cell.is_future && cell.count == 500));

        let expected = stone_radii(&compose_scene(&MarvelComposer, &baseline.input()));
        let actual = stone_radii(&compose_scene(&MarvelComposer, &ahead.input()));
        assert_eq!(actual, expected);
    }
}
