use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use tidemark_stream::{RenderOptions, Theme};

#[derive(Parser)]
#[command(
    name = "tidemark",
    version,
    about = "Stream Markdown to ANSI-styled terminal output"
)]
pub struct Cli {
    /// Markdown file to render. Reads stdin when omitted.
    pub file: Option<PathBuf>,

    /// Target wrap width.
    ///
    /// Defaults to the terminal width, or 80 when that cannot be
    /// detected. Values below 1 fall back to 80.
    #[arg(long, short = 'w')]
    pub width: Option<i64>,

    /// When to emit ANSI colors.
    #[arg(long, value_enum, default_value_t = ColorMode::Auto)]
    pub color: ColorMode,

    /// Style palette.
    #[arg(long, value_enum, default_value_t = ThemeChoice::Default)]
    pub theme: ThemeChoice,

    /// Emit OSC-8 terminal hyperlinks instead of `text (url)`.
    #[arg(long, default_value_t = false)]
    pub hyperlinks: bool,

    /// Keep inline HTML instead of stripping it.
    #[arg(long, default_value_t = false)]
    pub keep_html: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    Auto,
    Always,
    Never,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ThemeChoice {
    Default,
    Mono,
}

impl Cli {
    /// Map the flags onto a renderer options record.
    pub fn render_options(&self) -> RenderOptions {
        let colors = match self.color {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => atty::is(atty::Stream::Stdout),
        };
        let theme = match self.theme {
            ThemeChoice::Default => Theme::default(),
            ThemeChoice::Mono => Theme::monochrome(),
        };
        RenderOptions::default()
            .width(self.effective_width())
            .colors(colors)
            .strip_html(!self.keep_html)
            .hyperlinks(self.hyperlinks)
            .theme(theme)
    }

    fn effective_width(&self) -> usize {
        match self.width {
            Some(width) if width > 0 => width as usize,
            Some(_) => 80,
            None => terminal_size::terminal_size()
                .map(|(width, _)| width.0 as usize)
                .unwrap_or(80),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn test_defaults() {
        let cli = parse(&["tidemark"]);
        assert_eq!(cli.color, ColorMode::Auto);
        assert_eq!(cli.theme, ThemeChoice::Default);
        assert!(!cli.hyperlinks);
        assert!(!cli.keep_html);
    }

    #[test]
    fn test_width_clamps_to_default() {
        let cli = parse(&["tidemark", "--width=-3"]);
        assert_eq!(cli.render_options().console_width, 80);
        let cli = parse(&["tidemark", "-w", "120"]);
        assert_eq!(cli.render_options().console_width, 120);
    }

    #[test]
    fn test_never_disables_colors() {
        let cli = parse(&["tidemark", "--color", "never", "--theme", "mono"]);
        let options = cli.render_options();
        assert!(!options.enable_colors);
        assert_eq!(options.theme.bold_on, "");
    }
}
