//! Renderer configuration.

use crate::theme::Theme;

/// Wrap width used when `console_width` is left at zero.
pub const DEFAULT_WIDTH: usize = 80;

/// Configuration for a renderer instance. Held immutably for the
/// renderer's lifetime.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Target wrap width; zero falls back to [`DEFAULT_WIDTH`].
    pub console_width: usize,
    /// When false, no SGR sequence is emitted at all.
    pub enable_colors: bool,
    /// When true, inline `<...>` runs are elided.
    pub strip_html: bool,
    /// When true, links emit OSC-8 hyperlinks instead of `text (url)`.
    pub use_hyperlinks: bool,
    /// Style palette.
    pub theme: Theme,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            console_width: 0,
            enable_colors: true,
            strip_html: true,
            use_hyperlinks: false,
            theme: Theme::default(),
        }
    }
}

impl RenderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn width(mut self, width: usize) -> Self {
        self.console_width = width;
        self
    }

    pub fn colors(mut self, enabled: bool) -> Self {
        self.enable_colors = enabled;
        self
    }

    pub fn strip_html(mut self, strip: bool) -> Self {
        self.strip_html = strip;
        self
    }

    pub fn hyperlinks(mut self, hyperlinks: bool) -> Self {
        self.use_hyperlinks = hyperlinks;
        self
    }

    pub fn theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Effective wrap width.
    pub(crate) fn max_width(&self) -> usize {
        if self.console_width == 0 {
            DEFAULT_WIDTH
        } else {
            self.console_width
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_zero_width_defaults() {
        assert_eq!(RenderOptions::default().max_width(), 80);
        assert_eq!(RenderOptions::default().width(20).max_width(), 20);
    }

    #[test]
    fn test_builder() {
        let options = RenderOptions::new()
            .width(40)
            .colors(false)
            .strip_html(false)
            .hyperlinks(true);
        assert_eq!(options.console_width, 40);
        assert!(!options.enable_colors);
        assert!(!options.strip_html);
        assert!(options.use_hyperlinks);
    }
}
