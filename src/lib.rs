pub mod calendar;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod error;
pub mod intensity;
pub mod ir;
pub mod layout;
pub mod layout_dump;
pub mod render;
pub mod scene;
pub mod stats;
pub mod theme;

pub use calendar::{Clock, FixedClock, SystemClock, normalize_contributions};
#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{CalendarConfig, RenderConfig, load_config};
pub use error::{RenderError, RenderResult};
pub use intensity::classify_intensity;
pub use ir::{Cell, ContributionDay, ContributionInput, VisualMode, WeekGrid};
pub use layout::{CalendarLayout, compute_layout, layout_grid};
pub use render::{render_contribution_image, render_svg, render_with_config};
pub use theme::{ColorOverrides, ThemeStyle};
