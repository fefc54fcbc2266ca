mod default;
mod glass;
mod marvel;
mod neural;
mod snake;
mod space;
pub(crate) mod types;
pub use types::*;

pub use default::DefaultComposer;
pub use glass::GlassComposer;
pub use marvel::{MarvelComposer, STONE_COLORS, bucket_means};
pub use neural::{
    NEURAL_EDGE_OFFSETS, NEURAL_WINDOW, NeuralComposer, NeuralEdge, NeuralNode, neural_edges,
    neural_nodes,
};
pub use snake::{SnakeComposer, snake_head};
pub use space::SpaceComposer;

use crate::ir::{Cell, Level, VisualMode, WeekGrid};
use crate::layout::CalendarLayout;
use crate::stats::ContributionStats;
use crate::theme::ThemeStyle;

/// Everything a composer may read. Cells, levels and layout positions share
/// column-major indexing.
#[derive(Debug, Clone, Copy)]
pub struct SceneInput<'a> {
    pub grid: &'a WeekGrid,
    pub cells: &'a [Cell],
    pub levels: &'a [Level],
    pub layout: &'a CalendarLayout,
    pub theme: &'a ThemeStyle,
    pub title: &'a str,
    pub stats: &'a ContributionStats,
    pub star_seed: u64,
}

impl SceneInput<'_> {
    pub fn width(&self) -> f32 {
        self.layout.canvas.width
    }

    pub fn height(&self) -> f32 {
        self.layout.canvas.height
    }
}

pub trait SceneComposer {
    fn mode(&self) -> VisualMode;

    /// Background card and title shared by every mode.
    fn frame(&self, input: &SceneInput, scene: &mut Scene) {
        scene.push(Rect {
            x: 0.0,
            y: 0.0,
            width: input.width(),
            height: input.height(),
            rx: 10.0,
            fill: input.theme.bg_color.clone(),
            stroke: Some(input.theme.border_color.clone()),
            stroke_width: 2.0,
            ..Default::default()
        });
        scene.push(Text {
            x: 20.0,
            y: 24.0,
            text: input.title.to_string(),
            fill: input.theme.title_color.clone(),
            font_size: input.theme.title_font_size,
            font_family: Some(input.theme.font_family.clone()),
            font_weight: Some("bold".to_string()),
            ..Default::default()
        });
    }

    fn compose(&self, input: &SceneInput, scene: &mut Scene);
}

pub fn composer_for(mode: VisualMode) -> Box<dyn SceneComposer> {
    match mode {
        VisualMode::Default => Box::new(DefaultComposer),
        VisualMode::Snake => Box::new(SnakeComposer),
        VisualMode::Space => Box::new(SpaceComposer),
        VisualMode::Marvel => Box::new(MarvelComposer),
        VisualMode::Neural => Box::new(NeuralComposer),
        VisualMode::Glass => Box::new(GlassComposer),
    }
}

pub fn compose_scene(composer: &dyn SceneComposer, input: &SceneInput) -> Scene {
    let mut scene = Scene::new(input.width(), input.height());
    composer.frame(input, &mut scene);
    composer.compose(input, &mut scene);
    tracing::trace!(
        mode = composer.mode().as_str(),
        commands = scene.commands.len(),
        defs = scene.defs.len(),
        "composed scene"
    );
    scene
}

/// Month names above the grid and Mon/Wed/Fri to its left.
pub(crate) fn push_calendar_labels(input: &SceneInput, scene: &mut Scene) {
    let font_size = input.layout.label_font_size;
    let opacity = input.layout.label_opacity;
    for label in &input.layout.month_labels {
        scene.push(Text {
            x: label.x,
            y: label.y,
            text: label.text.clone(),
            fill: input.theme.text_color.clone(),
            font_size,
            font_family: Some(input.theme.font_family.clone()),
            opacity: Some(opacity),
            ..Default::default()
        });
    }
    for label in &input.layout.weekday_labels {
        scene.push(Text {
            x: label.x,
            y: label.y,
            text: label.text.to_string(),
            fill: input.theme.text_color.clone(),
            font_size,
            font_family: Some(input.theme.font_family.clone()),
            opacity: Some(opacity),
            ..Default::default()
        });
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use crate::calendar::{FixedClock, normalize_contributions};
    use crate::config::CalendarConfig;
    use crate::intensity::classify_intensity;
    use crate::ir::ContributionDay;
    use crate::layout::compute_layout;
    use crate::stats::contribution_stats;
    use chrono::{Days, NaiveDate};

    pub struct Fixture {
        pub grid: WeekGrid,
        pub cells: Vec<Cell>,
        pub levels: Vec<Level>,
        pub layout: CalendarLayout,
        pub theme: ThemeStyle,
        pub stats: ContributionStats,
    }

    impl Fixture {
        pub fn input(&self) -> SceneInput<'_> {
            SceneInput {
                grid: &self.grid,
                cells: &self.cells,
                levels: &self.levels,
                layout: &self.layout,
                theme: &self.theme,
                title: "octocat's Contributions",
                stats: &self.stats,
                star_seed: 7,
            }
        }
    }

    /// Roughly a year of activity ending on a Wednesday.
    pub fn fixture(mode: VisualMode, days: u64) -> Fixture {
        let end = NaiveDate::from_ymd_opt(2024, 6, 12).unwrap();
        let series: Vec<ContributionDay> = (0..days)
            .map(|offset| {
                let date = end.checked_sub_days(Days::new(days - 1 - offset)).unwrap();
                ContributionDay::new(date, ((offset * 7) % 11) as u32)
            })
            .collect();
        fixture_from(mode, &series)
    }

    pub fn fixture_from(mode: VisualMode, series: &[ContributionDay]) -> Fixture {
        let config = CalendarConfig::default();
        let clock = FixedClock(NaiveDate::from_ymd_opt(2024, 6, 30).unwrap());
        let (grid, reference) = normalize_contributions(series, None, 52, 7, &clock).unwrap();
        let cells = grid.cells();
        let levels = classify_intensity(&cells);
        let layout = compute_layout(&grid, &config, config.canvas_for(mode));
        Fixture {
            grid,
            cells,
            levels,
            layout,
            theme: ThemeStyle::default(),
            stats: contribution_stats(series, reference),
        }
    }
}
