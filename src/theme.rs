use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

static HEX_COLOR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^#?([0-9a-fA-F]{3}|[0-9a-fA-F]{4}|[0-9a-fA-F]{6}|[0-9a-fA-F]{8})$")
        .expect("hex color pattern")
});

static REGISTRY: Lazy<Vec<(&'static str, ThemeStyle)>> = Lazy::new(|| {
    vec![
        ("Default", ThemeStyle::github_dark()),
        ("Gaming", ThemeStyle::gaming()),
        ("Marvel", ThemeStyle::marvel()),
        ("Space", ThemeStyle::space()),
        ("Dracula", ThemeStyle::dracula()),
        ("Neural", ThemeStyle::neural()),
        ("Glass", ThemeStyle::glass()),
    ]
});

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThemeStyle {
    pub bg_color: String,
    pub border_color: String,
    pub title_color: String,
    pub text_color: String,
    pub icon_color: String,
    pub font_family: String,
    pub title_font_size: f32,
    pub text_font_size: f32,
    /// Per-theme extras such as accent colors. Only string values are kept.
    pub extras: BTreeMap<String, String>,
}

impl Default for ThemeStyle {
    fn default() -> Self {
        Self::github_dark()
    }
}

impl ThemeStyle {
    pub fn github_dark() -> Self {
        Self {
            bg_color: "#0d1117".to_string(),
            border_color: "#30363d".to_string(),
            title_color: "#58a6ff".to_string(),
            text_color: "#c9d1d9".to_string(),
            icon_color: "#8b949e".to_string(),
            font_family: "Segoe UI, Ubuntu, Sans-Serif".to_string(),
            title_font_size: 20.0,
            text_font_size: 14.0,
            extras: BTreeMap::new(),
        }
    }

    pub fn gaming() -> Self {
        Self {
            bg_color: "#0d0d0d".to_string(),
            border_color: "#00ff00".to_string(),
            title_color: "#00ff00".to_string(),
            text_color: "#00ff00".to_string(),
            icon_color: "#00aa00".to_string(),
            font_family: "'Courier New', Courier, monospace".to_string(),
            title_font_size: 18.0,
            text_font_size: 14.0,
            extras: BTreeMap::from([("is_pixel".to_string(), "true".to_string())]),
        }
    }

    pub fn marvel() -> Self {
        Self {
            bg_color: "#1a1a1a".to_string(),
            border_color: "#e23636".to_string(),
            title_color: "#f78f3f".to_string(),
            text_color: "#ffffff".to_string(),
            icon_color: "#e23636".to_string(),
            font_family: "Impact, sans-serif".to_string(),
            title_font_size: 22.0,
            text_font_size: 14.0,
            extras: BTreeMap::new(),
        }
    }

    pub fn space() -> Self {
        Self {
            bg_color: "#0b0c1f".to_string(),
            border_color: "#6e5cdb".to_string(),
            title_color: "#a371f7".to_string(),
            text_color: "#d0dfff".to_string(),
            icon_color: "#39d353".to_string(),
            font_family: "Verdana, Geneva, sans-serif".to_string(),
            title_font_size: 18.0,
            text_font_size: 14.0,
            extras: BTreeMap::new(),
        }
    }

    pub fn dracula() -> Self {
        Self {
            bg_color: "#282a36".to_string(),
            border_color: "#bd93f9".to_string(),
            title_color: "#ff79c6".to_string(),
            text_color: "#f8f8f2".to_string(),
            icon_color: "#50fa7b".to_string(),
            font_family: "Segoe UI, Ubuntu, Sans-Serif".to_string(),
            title_font_size: 20.0,
            text_font_size: 14.0,
            extras: BTreeMap::new(),
        }
    }

    pub fn neural() -> Self {
        Self {
            bg_color: "#0a0f14".to_string(),
            border_color: "#1f6feb".to_string(),
            title_color: "#00e5ff".to_string(),
            text_color: "#9be7ff".to_string(),
            icon_color: "#00bcd4".to_string(),
            font_family: "'Consolas', 'Lucida Console', monospace".to_string(),
            title_font_size: 19.0,
            text_font_size: 14.0,
            extras: BTreeMap::from([("synapse_color".to_string(), "#00f7ff".to_string())]),
        }
    }

    pub fn glass() -> Self {
        Self {
            bg_color: "#050511".to_string(),
            border_color: "white".to_string(),
            title_color: "#00e5ff".to_string(),
            text_color: "#e0e0e0".to_string(),
            icon_color: "#2563eb".to_string(),
            font_family: "Verdana, sans-serif".to_string(),
            title_font_size: 20.0,
            text_font_size: 10.0,
            extras: BTreeMap::new(),
        }
    }

    /// Case-insensitive lookup in the built-in registry.
    pub fn by_name(name: &str) -> Option<Self> {
        let wanted = name.trim();
        REGISTRY
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(wanted))
            .map(|(_, theme)| theme.clone())
    }

    /// Like [`ThemeStyle::by_name`], but unknown names resolve to the default theme.
    pub fn resolve(name: &str) -> Self {
        Self::by_name(name).unwrap_or_else(|| {
            warn!(theme = name, "unknown theme, using Default");
            Self::default()
        })
    }

    /// Builds a style from a loose key/value table. Missing or mistyped keys
    /// keep the default theme's value; unrecognised string keys become extras.
    pub fn from_value(value: &Value) -> Self {
        let mut theme = Self::default();
        let Some(map) = value.as_object() else {
            return theme;
        };
        for (key, val) in map {
            match key.as_str() {
                "title_font_size" | "text_font_size" => {
                    let size = val
                        .as_f64()
                        .or_else(|| val.as_str().and_then(|s| s.trim().parse().ok()));
                    if let Some(size) = size.filter(|size| *size > 0.0) {
                        if key == "title_font_size" {
                            theme.title_font_size = size as f32;
                        } else {
                            theme.text_font_size = size as f32;
                        }
                    }
                }
                _ => {
                    let Some(text) = val.as_str() else {
                        continue;
                    };
                    match key.as_str() {
                        "bg_color" => theme.bg_color = text.to_string(),
                        "border_color" => theme.border_color = text.to_string(),
                        "title_color" => theme.title_color = text.to_string(),
                        "text_color" => theme.text_color = text.to_string(),
                        "icon_color" => theme.icon_color = text.to_string(),
                        "font_family" => theme.font_family = text.to_string(),
                        _ => {
                            theme.extras.insert(key.clone(), text.to_string());
                        }
                    }
                }
            }
        }
        theme
    }

    pub fn extra(&self, key: &str) -> Option<&str> {
        self.extras.get(key).map(String::as_str)
    }
}

pub fn theme_names() -> Vec<&'static str> {
    REGISTRY.iter().map(|(name, _)| *name).collect()
}

/// Caller-supplied color replacements, applied on top of a resolved theme.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorOverrides {
    pub bg_color: Option<String>,
    pub border_color: Option<String>,
    pub title_color: Option<String>,
    pub text_color: Option<String>,
    pub icon_color: Option<String>,
}

impl ColorOverrides {
    pub fn is_empty(&self) -> bool {
        self.bg_color.is_none()
            && self.border_color.is_none()
            && self.title_color.is_none()
            && self.text_color.is_none()
            && self.icon_color.is_none()
    }

    /// Returns a new style; `theme` itself is left untouched.
    pub fn merge(&self, theme: &ThemeStyle) -> ThemeStyle {
        let pick = |over: &Option<String>, base: &String| {
            over.as_deref()
                .and_then(normalize_color)
                .unwrap_or_else(|| base.clone())
        };
        ThemeStyle {
            bg_color: pick(&self.bg_color, &theme.bg_color),
            border_color: pick(&self.border_color, &theme.border_color),
            title_color: pick(&self.title_color, &theme.title_color),
            text_color: pick(&self.text_color, &theme.text_color),
            icon_color: pick(&self.icon_color, &theme.icon_color),
            ..theme.clone()
        }
    }
}

/// Bare hex digits get a leading `#`; other CSS color syntax passes through.
pub fn normalize_color(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if HEX_COLOR_RE.is_match(trimmed) && !trimmed.starts_with('#') {
        return Some(format!("#{trimmed}"));
    }
    Some(trimmed.to_string())
}
