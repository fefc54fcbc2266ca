use crate::calendar::normalize_contributions;
use crate::config::RenderConfig;
use crate::error::RenderResult;
use crate::intensity::classify_intensity;
use crate::ir::{Cell, ContributionDay, Level, VisualMode, WeekGrid};
use crate::layout::{CalendarLayout, compute_layout};
use crate::scene::{Definition, DrawCommand, Scene, SceneInput, compose_scene, composer_for};
use crate::stats::{ContributionStats, contribution_stats};
use crate::theme::ThemeStyle;
use chrono::NaiveDate;
use std::fmt::Write as _;
use std::path::Path;

/// Every intermediate product of one render, kept for inspection and dumps.
#[derive(Debug, Clone)]
pub struct RenderedCalendar {
    pub mode: VisualMode,
    pub grid: WeekGrid,
    pub reference: Option<NaiveDate>,
    pub cells: Vec<Cell>,
    pub levels: Vec<Level>,
    pub layout: CalendarLayout,
    pub stats: ContributionStats,
    pub scene: Scene,
}

pub fn prepare_calendar(
    series: &[ContributionDay],
    precomputed_weeks: Option<&[Vec<ContributionDay>]>,
    theme: &ThemeStyle,
    mode: VisualMode,
    config: &RenderConfig,
) -> RenderResult<RenderedCalendar> {
    let calendar = &config.calendar;
    let cols = calendar.cols_for(series.len());
    let clock = config.clock();
    let (grid, reference) =
        normalize_contributions(series, precomputed_weeks, cols, calendar.rows, clock.as_ref())?;
    let cells = grid.cells();
    let levels = classify_intensity(&cells);
    let layout = compute_layout(&grid, calendar, calendar.canvas_for(mode));
    let stats = contribution_stats(series, reference);
    let title = config.title();

    let composer = composer_for(mode);
    let scene = compose_scene(
        composer.as_ref(),
        &SceneInput {
            grid: &grid,
            cells: &cells,
            levels: &levels,
            layout: &layout,
            theme,
            title: &title,
            stats: &stats,
            star_seed: config.star_seed,
        },
    );
    tracing::debug!(
        mode = mode.as_str(),
        cells = cells.len(),
        commands = scene.commands.len(),
        "rendered contribution calendar"
    );

    Ok(RenderedCalendar {
        mode,
        grid,
        reference,
        cells,
        levels,
        layout,
        stats,
        scene,
    })
}

/// Renders the calendar with an explicit theme and mode. Identical inputs
/// (including `config.today`) give byte-identical markup.
pub fn render_contribution_image(
    series: &[ContributionDay],
    precomputed_weeks: Option<&[Vec<ContributionDay>]>,
    theme: &ThemeStyle,
    mode: VisualMode,
    config: &RenderConfig,
) -> RenderResult<String> {
    let rendered = prepare_calendar(series, precomputed_weeks, theme, mode, config)?;
    Ok(render_svg(&rendered.scene))
}

/// Resolves theme, overrides and mode from `config`, then renders.
pub fn render_with_config(
    series: &[ContributionDay],
    precomputed_weeks: Option<&[Vec<ContributionDay>]>,
    config: &RenderConfig,
) -> RenderResult<String> {
    render_contribution_image(series, precomputed_weeks, &config.theme(), config.mode(), config)
}

pub fn render_svg(scene: &Scene) -> String {
    let mut svg = String::new();
    let width = num(scene.width);
    let height = num(scene.height);
    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\">",
    ));

    if !scene.defs.is_empty() {
        svg.push_str("<defs>");
        for def in &scene.defs {
            definition_svg(&mut svg, def);
        }
        svg.push_str("</defs>");
    }

    for command in &scene.commands {
        command_svg(&mut svg, command);
    }

    svg.push_str("</svg>");
    svg
}

fn definition_svg(svg: &mut String, def: &Definition) {
    match def {
        Definition::Style(css) => {
            svg.push_str(&format!("<style>{}</style>", escape_xml(css)));
        }
        Definition::Blur {
            id,
            std_deviation,
            spread,
        } => {
            let region = if *spread {
                " x=\"-50%\" y=\"-50%\" width=\"200%\" height=\"200%\""
            } else {
                ""
            };
            svg.push_str(&format!(
                "<filter id=\"{}\"{region}><feGaussianBlur in=\"SourceGraphic\" stdDeviation=\"{}\"/></filter>",
                escape_xml(id),
                num(*std_deviation)
            ));
        }
        Definition::Glow {
            id,
            color,
            std_deviation,
        } => {
            svg.push_str(&format!(
                "<filter id=\"{}\"><feGaussianBlur in=\"SourceAlpha\" stdDeviation=\"{}\" result=\"blur\"/><feOffset in=\"blur\" dx=\"0\" dy=\"0\" result=\"offsetBlur\"/><feFlood flood-color=\"{}\" result=\"glowColor\"/><feComposite in=\"glowColor\" in2=\"offsetBlur\" operator=\"in\" result=\"coloredBlur\"/><feMerge><feMergeNode in=\"coloredBlur\"/><feMergeNode in=\"SourceGraphic\"/></feMerge></filter>",
                escape_xml(id),
                num(*std_deviation),
                escape_xml(color)
            ));
        }
        Definition::LinearGradient { id, stops } => {
            svg.push_str(&format!(
                "<linearGradient id=\"{}\" x1=\"0\" y1=\"0\" x2=\"1\" y2=\"1\">",
                escape_xml(id)
            ));
            for stop in stops {
                svg.push_str(&format!(
                    "<stop offset=\"{}\" stop-color=\"{}\" stop-opacity=\"{}\"/>",
                    num(stop.offset),
                    escape_xml(&stop.color),
                    num(stop.opacity)
                ));
            }
            svg.push_str("</linearGradient>");
        }
    }
}

fn command_svg(svg: &mut String, command: &DrawCommand) {
    match command {
        DrawCommand::Rect(rect) => {
            svg.push_str(&format!(
                "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\"",
                num(rect.x),
                num(rect.y),
                num(rect.width),
                num(rect.height)
            ));
            if rect.rx > 0.0 {
                let rx = num(rect.rx);
                svg.push_str(&format!(" rx=\"{rx}\" ry=\"{rx}\""));
            }
            attr(svg, "fill", Some(&rect.fill));
            if let Some(stroke) = &rect.stroke {
                attr(svg, "stroke", Some(stroke));
                attr(svg, "stroke-width", Some(&num(rect.stroke_width)));
            }
            num_attr(svg, "opacity", rect.opacity);
            svg.push_str("/>");
        }
        DrawCommand::Circle(circle) => {
            svg.push_str(&format!(
                "<circle cx=\"{}\" cy=\"{}\" r=\"{}\"",
                num(circle.cx),
                num(circle.cy),
                num(circle.r)
            ));
            attr(svg, "fill", Some(&circle.fill));
            num_attr(svg, "opacity", circle.opacity);
            num_attr(svg, "fill-opacity", circle.fill_opacity);
            if let Some(stroke) = &circle.stroke {
                attr(svg, "stroke", Some(stroke));
                attr(svg, "stroke-width", Some(&num(circle.stroke_width)));
            }
            filter_attr(svg, circle.filter.as_deref());
            attr(svg, "class", circle.class.as_deref());
            attr(svg, "style", circle.style.as_deref());
            svg.push_str("/>");
        }
        DrawCommand::Path(path) => {
            svg.push_str("<path");
            attr(svg, "d", Some(&path.d));
            attr(svg, "fill", Some(&path.fill));
            num_attr(svg, "opacity", path.opacity);
            svg.push_str("/>");
        }
        DrawCommand::Line(line) => {
            svg.push_str(&format!(
                "<line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\"",
                num(line.x1),
                num(line.y1),
                num(line.x2),
                num(line.y2)
            ));
            attr(svg, "stroke", Some(&line.stroke));
            attr(svg, "stroke-width", Some(&num(line.stroke_width)));
            attr(svg, "stroke-dasharray", line.dasharray.as_deref());
            num_attr(svg, "opacity", line.opacity);
            svg.push_str("/>");
        }
        DrawCommand::Text(text) => {
            svg.push_str(&format!("<text x=\"{}\" y=\"{}\"", num(text.x), num(text.y)));
            attr(svg, "fill", Some(&text.fill));
            attr(svg, "font-size", Some(&num(text.font_size)));
            attr(svg, "font-family", text.font_family.as_deref());
            attr(svg, "font-weight", text.font_weight.as_deref());
            attr(svg, "text-anchor", text.anchor.as_deref());
            num_attr(svg, "letter-spacing", text.letter_spacing);
            num_attr(svg, "opacity", text.opacity);
            filter_attr(svg, text.filter.as_deref());
            svg.push('>');
            svg.push_str(&escape_xml(&text.text));
            svg.push_str("</text>");
        }
    }
}

fn attr(svg: &mut String, name: &str, value: Option<&str>) {
    if let Some(value) = value {
        let _ = write!(svg, " {name}=\"{}\"", escape_xml(value));
    }
}

fn num_attr(svg: &mut String, name: &str, value: Option<f32>) {
    if let Some(value) = value {
        let _ = write!(svg, " {name}=\"{}\"", num(value));
    }
}

fn filter_attr(svg: &mut String, id: Option<&str>) {
    if let Some(id) = id {
        let _ = write!(svg, " filter=\"url(#{})\"", escape_xml(id));
    }
}

/// Two decimals at most, trailing zeros dropped.
fn num(value: f32) -> String {
    let value = if value.is_finite() { value } else { 0.0 };
    let text = format!("{value:.2}");
    let text = text.trim_end_matches('0').trim_end_matches('.');
    if text == "-0" || text.is_empty() {
        "0".to_string()
    } else {
        text.to_string()
    }
}

pub fn write_output_svg(svg: &str, output: Option<&Path>) -> RenderResult<()> {
    match output {
        Some(path) => {
            std::fs::write(path, svg)?;
        }
        None => {
            print!("{}", svg);
        }
    }
    Ok(())
}

#[cfg(feature = "png")]
pub fn write_output_png(
    svg: &str,
    output: &Path,
    canvas: crate::config::Canvas,
) -> RenderResult<()> {
    use crate::error::RenderError;

    let mut opt = usvg::Options::default();
    opt.font_family = "Verdana".to_string();
    opt.fontdb_mut().load_system_fonts();
    if let Some(size) = usvg::Size::from_wh(canvas.width, canvas.height) {
        opt.default_size = size;
    }

    let tree = usvg::Tree::from_str(svg, &opt).map_err(|err| RenderError::image(err.to_string()))?;
    let size = tree.size().to_int_size();
    let mut pixmap = resvg::tiny_skia::Pixmap::new(size.width(), size.height())
        .ok_or_else(|| RenderError::image("failed to allocate pixmap"))?;

    let mut pixmap_mut = pixmap.as_mut();
    resvg::render(&tree, resvg::tiny_skia::Transform::default(), &mut pixmap_mut);
    pixmap
        .save_png(output)
        .map_err(|err| RenderError::image(err.to_string()))?;
    Ok(())
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
