use crate::config::{RenderConfig, load_config};
use crate::ir::{ContributionInput, VisualMode, parse_date};
use crate::layout_dump::write_layout_dump;
use crate::render::{prepare_calendar, render_svg, write_output_svg};
use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "gitcanvas", version, about = "GitHub contribution calendar renderer")]
pub struct Args {
    /// Input contributions JSON file or '-' for stdin
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Output file (svg/png). Defaults to stdout for SVG if omitted.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short = 'e', long = "outputFormat", value_enum, default_value = "svg")]
    pub output_format: OutputFormat,

    /// Config JSON file
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Theme name (Default, Gaming, Marvel, Space, Dracula, Neural, Glass)
    #[arg(short = 't', long = "theme")]
    pub theme: Option<String>,

    /// Visual mode; derived from the theme when omitted
    #[arg(short = 'm', long = "mode", value_enum)]
    pub mode: Option<VisualMode>,

    /// Username shown in the title
    #[arg(short = 'u', long = "username")]
    pub username: Option<String>,

    /// Pin "today" (YYYY-MM-DD) for reproducible output
    #[arg(long = "today", value_parser = parse_today)]
    pub today: Option<chrono::NaiveDate>,

    #[arg(long = "bgColor")]
    pub bg_color: Option<String>,

    #[arg(long = "titleColor")]
    pub title_color: Option<String>,

    #[arg(long = "textColor")]
    pub text_color: Option<String>,

    #[arg(long = "borderColor")]
    pub border_color: Option<String>,

    /// Write the normalized grid, levels and positions as JSON
    #[arg(long = "dumpLayout")]
    pub dump_layout: Option<PathBuf>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Svg,
    Png,
}

pub fn run() -> Result<()> {
    init_logging();
    let args = Args::parse();
    let mut config = load_config(args.config.as_deref())?;

    let input = read_input(args.input.as_deref())?;
    let document = parse_input(&input)?;
    if config.username.is_none() {
        config.username = document.username.clone();
    }
    apply_args(&mut config, &args);

    let series = document.series();
    let weeks = document.weeks();
    let theme = config.theme();
    let mode = config.mode();
    let rendered = prepare_calendar(&series, weeks.as_deref(), &theme, mode, &config)?;
    let svg = render_svg(&rendered.scene);

    if let Some(path) = args.dump_layout.as_deref() {
        write_layout_dump(path, &rendered)?;
    }

    match args.output_format {
        OutputFormat::Svg => {
            write_output_svg(&svg, args.output.as_deref())?;
        }
        OutputFormat::Png => {
            let output = ensure_output(&args.output, "png")?;
            write_png(&svg, &output, &rendered)?;
        }
    }
    Ok(())
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

#[cfg(feature = "png")]
fn write_png(svg: &str, output: &Path, rendered: &crate::render::RenderedCalendar) -> Result<()> {
    crate::render::write_output_png(svg, output, rendered.layout.canvas)?;
    Ok(())
}

#[cfg(not(feature = "png"))]
fn write_png(
    _svg: &str,
    _output: &Path,
    _rendered: &crate::render::RenderedCalendar,
) -> Result<()> {
    Err(anyhow::anyhow!("PNG output requires the `png` feature"))
}

/// Command-line flags win over the config file.
fn apply_args(config: &mut RenderConfig, args: &Args) {
    if let Some(theme) = &args.theme {
        config.theme_name = theme.clone();
        // An explicit theme re-derives the mode unless one was asked for.
        if args.mode.is_none() {
            config.visual_mode = None;
        }
    }
    if let Some(mode) = args.mode {
        config.visual_mode = Some(mode);
    }
    if let Some(username) = &args.username {
        config.username = Some(username.clone());
    }
    if let Some(today) = args.today {
        config.today = Some(today);
    }

    let overrides = &mut config.overrides;
    for (flag, slot) in [
        (&args.bg_color, &mut overrides.bg_color),
        (&args.title_color, &mut overrides.title_color),
        (&args.text_color, &mut overrides.text_color),
        (&args.border_color, &mut overrides.border_color),
    ] {
        if flag.is_some() {
            *slot = flag.clone();
        }
    }
}

fn parse_today(raw: &str) -> std::result::Result<chrono::NaiveDate, String> {
    parse_date(raw).ok_or_else(|| format!("expected YYYY-MM-DD, got {raw:?}"))
}

fn parse_input(input: &str) -> Result<ContributionInput> {
    let trimmed = input.trim_start();
    // A bare array is accepted as the contributions list.
    if trimmed.starts_with('[') {
        let contributions: Vec<serde_json::Value> = serde_json::from_str(trimmed)?;
        return Ok(ContributionInput {
            contributions,
            ..Default::default()
        });
    }
    Ok(serde_json::from_str(trimmed)?)
}

fn read_input(path: Option<&Path>) -> Result<String> {
    if let Some(path) = path {
        if path != Path::new("-") {
            return Ok(std::fs::read_to_string(path)?);
        }
    }

    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}

fn ensure_output(output: &Option<PathBuf>, ext: &str) -> Result<PathBuf> {
    if let Some(path) = output {
        return Ok(path.clone());
    }
    Err(anyhow::anyhow!("Output path required for {} output", ext))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(extra: &[&str]) -> Args {
        let mut argv = vec!["gitcanvas"];
        argv.extend_from_slice(extra);
        Args::parse_from(argv)
    }

    #[test]
    fn parses_flags() {
        let args = args(&[
            "-i",
            "data.json",
            "-e",
            "png",
            "-o",
            "out.png",
            "-t",
            "Space",
            "--today",
            "2024-06-30",
            "--bgColor",
            "101010",
        ]);
        assert_eq!(args.output_format, OutputFormat::Png);
        assert_eq!(args.theme.as_deref(), Some("Space"));
        assert_eq!(args.today, chrono::NaiveDate::from_ymd_opt(2024, 6, 30));
        assert_eq!(args.bg_color.as_deref(), Some("101010"));
    }

    #[test]
    fn rejects_malformed_today() {
        let argv = ["gitcanvas", "--today", "30/06/2024"];
        assert!(Args::try_parse_from(argv).is_err());
    }

    #[test]
    fn flags_override_config() {
        let mut config = RenderConfig::for_theme("Marvel");
        config.visual_mode = Some(VisualMode::Glass);
        config.overrides.title_color = Some("#000000".to_string());
        apply_args(
            &mut config,
            &args(&["-t", "Gaming", "-u", "octocat", "--titleColor", "ff0000"]),
        );
        assert_eq!(config.theme_name, "Gaming");
        assert_eq!(config.mode(), VisualMode::Snake);
        assert_eq!(config.username.as_deref(), Some("octocat"));
        assert_eq!(config.theme().title_color, "#ff0000");
    }

    #[test]
    fn explicit_mode_wins_over_theme() {
        let mut config = RenderConfig::default();
        apply_args(&mut config, &args(&["-t", "Space", "-m", "neural"]));
        assert_eq!(config.mode(), VisualMode::Neural);
    }

    #[test]
    fn parses_document_and_bare_array() {
        let doc = parse_input(
            r#"{"username": "octocat", "contributions": [{"date": "2024-06-01", "count": 2}]}"#,
        )
        .unwrap();
        assert_eq!(doc.username.as_deref(), Some("octocat"));
        assert_eq!(doc.series().len(), 1);

        let bare = parse_input(r#"[{"date": "2024-06-01", "count": 2}, {"count": "x"}]"#).unwrap();
        let series = bare.series();
        assert_eq!(series.len(), 2);
        assert_eq!(series[1].count, 0);
        assert!(bare.weeks().is_none());
    }

    #[test]
    fn png_requires_output_path() {
        assert!(ensure_output(&None, "png").is_err());
        assert_eq!(
            ensure_output(&Some(PathBuf::from("a.png")), "png").unwrap(),
            PathBuf::from("a.png")
        );
    }
}
