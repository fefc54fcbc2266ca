use crate::calendar::{Clock, FixedClock, SystemClock, auto_cols};
use crate::ir::{VisualMode, parse_date};
use crate::theme::{ColorOverrides, ThemeStyle};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_STAR_SEED: u64 = 0x5EED_C0DE;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Canvas {
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarConfig {
    /// `None` picks 52 or 53 weeks from the series length.
    pub cols: Option<usize>,
    pub rows: usize,
    pub cell_size: f32,
    pub gap: f32,
    pub start_x: f32,
    pub start_y: f32,
    pub canvas: Canvas,
    pub snake_canvas: Canvas,
    pub label_font_size: f32,
    pub label_opacity: f32,
    pub weekday_label_offset: f32,
    pub month_label_offset: f32,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            cols: None,
            rows: 7,
            cell_size: 7.0,
            gap: 2.0,
            start_x: 26.0,
            start_y: 72.0,
            canvas: Canvas {
                width: 500.0,
                height: 170.0,
            },
            snake_canvas: Canvas {
                width: 560.0,
                height: 180.0,
            },
            label_font_size: 9.0,
            label_opacity: 0.8,
            weekday_label_offset: 24.0,
            month_label_offset: 10.0,
        }
    }
}

impl CalendarConfig {
    pub fn cols_for(&self, series_len: usize) -> usize {
        self.cols.unwrap_or_else(|| auto_cols(series_len))
    }

    pub fn canvas_for(&self, mode: VisualMode) -> Canvas {
        match mode {
            VisualMode::Snake => self.snake_canvas,
            _ => self.canvas,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RenderConfig {
    pub theme_name: String,
    /// Explicit mode; when `None` the theme name decides.
    pub visual_mode: Option<VisualMode>,
    pub overrides: ColorOverrides,
    /// Replaces the named theme entirely when set.
    pub custom_theme: Option<ThemeStyle>,
    pub username: Option<String>,
    /// Pins "today" for reference-date clamping.
    pub today: Option<NaiveDate>,
    pub star_seed: u64,
    pub calendar: CalendarConfig,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            theme_name: "Default".to_string(),
            visual_mode: None,
            overrides: ColorOverrides::default(),
            custom_theme: None,
            username: None,
            today: None,
            star_seed: DEFAULT_STAR_SEED,
            calendar: CalendarConfig::default(),
        }
    }
}

impl RenderConfig {
    pub fn for_theme(name: &str) -> Self {
        Self {
            theme_name: name.to_string(),
            ..Default::default()
        }
    }

    pub fn mode(&self) -> VisualMode {
        self.visual_mode
            .unwrap_or_else(|| VisualMode::for_theme(&self.theme_name))
    }

    pub fn theme(&self) -> ThemeStyle {
        let base = match &self.custom_theme {
            Some(theme) => theme.clone(),
            None => ThemeStyle::resolve(&self.theme_name),
        };
        self.overrides.merge(&base)
    }

    pub fn clock(&self) -> Box<dyn Clock> {
        match self.today {
            Some(today) => Box::new(FixedClock(today)),
            None => Box::new(SystemClock),
        }
    }

    pub fn title(&self) -> String {
        match self.username.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => format!("{name}'s Contributions"),
            _ => "Contributions".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct CalendarConfigFile {
    cols: Option<usize>,
    rows: Option<usize>,
    cell_size: Option<f32>,
    gap: Option<f32>,
    start_x: Option<f32>,
    start_y: Option<f32>,
    width: Option<f32>,
    height: Option<f32>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    theme: Option<String>,
    mode: Option<String>,
    username: Option<String>,
    today: Option<String>,
    seed: Option<u64>,
    colors: Option<ColorOverrides>,
    theme_style: Option<serde_json::Value>,
    calendar: Option<CalendarConfigFile>,
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<RenderConfig> {
    let mut config = RenderConfig::default();
    let Some(path) = path else {
        return Ok(config);
    };

    let contents = std::fs::read_to_string(path)?;
    apply_config_str(&mut config, &contents)?;
    Ok(config)
}

pub fn apply_config_str(config: &mut RenderConfig, contents: &str) -> anyhow::Result<()> {
    let parsed: ConfigFile = match serde_json::from_str(contents) {
        Ok(parsed) => parsed,
        Err(_) => json5::from_str(contents)?,
    };

    if let Some(theme) = parsed.theme {
        config.theme_name = theme;
    }
    if let Some(mode) = parsed.mode.as_deref() {
        match VisualMode::from_name(mode) {
            Some(mode) => config.visual_mode = Some(mode),
            None => tracing::warn!(mode, "unknown visual mode in config, ignoring"),
        }
    }
    if let Some(username) = parsed.username {
        config.username = Some(username);
    }
    if let Some(today) = parsed.today.as_deref() {
        config.today = parse_date(today);
    }
    if let Some(seed) = parsed.seed {
        config.star_seed = seed;
    }
    if let Some(colors) = parsed.colors {
        config.overrides = colors;
    }
    if let Some(style) = parsed.theme_style {
        config.custom_theme = Some(ThemeStyle::from_value(&style));
    }
    if let Some(cal) = parsed.calendar {
        let target = &mut config.calendar;
        if cal.cols.is_some() {
            target.cols = cal.cols;
        }
        if let Some(v) = cal.rows {
            target.rows = v;
        }
        if let Some(v) = cal.cell_size {
            target.cell_size = v;
        }
        if let Some(v) = cal.gap {
            target.gap = v;
        }
        if let Some(v) = cal.start_x {
            target.start_x = v;
        }
        if let Some(v) = cal.start_y {
            target.start_y = v;
        }
        if let Some(v) = cal.width {
            target.canvas.width = v;
        }
        if let Some(v) = cal.height {
            target.canvas.height = v;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_follows_theme_unless_pinned() {
        let mut config = RenderConfig::for_theme("Marvel");
        assert_eq!(config.mode(), VisualMode::Marvel);
        config.visual_mode = Some(VisualMode::Neural);
        assert_eq!(config.mode(), VisualMode::Neural);
    }

    #[test]
    fn title_uses_username() {
        let mut config = RenderConfig::default();
        assert_eq!(config.title(), "Contributions");
        config.username = Some("octocat".to_string());
        assert_eq!(config.title(), "octocat's Contributions");
    }

    #[test]
    fn config_str_accepts_json5() {
        let mut config = RenderConfig::default();
        apply_config_str(
            &mut config,
            r#"{
                // trailing commas and comments are fine
                theme: "Space",
                mode: "snake",
                today: "2024-06-30",
                colors: { bgColor: "123456" },
                calendar: { cols: 20, cellSize: 9 },
            }"#,
        )
        .unwrap();
        assert_eq!(config.theme_name, "Space");
        assert_eq!(config.mode(), VisualMode::Snake);
        assert_eq!(config.today, NaiveDate::from_ymd_opt(2024, 6, 30));
        assert_eq!(config.theme().bg_color, "#123456");
        assert_eq!(config.calendar.cols_for(400), 20);
        assert_eq!(config.calendar.cell_size, 9.0);
    }

    #[test]
    fn custom_theme_style_replaces_named_theme() {
        let mut config = RenderConfig::for_theme("Marvel");
        apply_config_str(&mut config, r##"{"themeStyle": {"title_color": "#abcdef"}}"##).unwrap();
        let theme = config.theme();
        assert_eq!(theme.title_color, "#abcdef");
        assert_eq!(theme.bg_color, ThemeStyle::github_dark().bg_color);
    }

    #[test]
    fn snake_uses_wider_canvas() {
        let cal = CalendarConfig::default();
        assert_eq!(cal.canvas_for(VisualMode::Snake).width, 560.0);
        assert_eq!(cal.canvas_for(VisualMode::Glass).width, 500.0);
    }
}
