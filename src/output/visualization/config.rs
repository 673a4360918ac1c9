//! Plot configuration shared across visualization functions

use plotters::prelude::*;

/// Configuration for customizing plots
///
/// # Example
///
/// ```rust,ignore
/// use pns_rs::output::visualization::PlotConfig;
/// use plotters::prelude::*;
///
/// let mut config = PlotConfig::profiles("Station x = 0.5");
/// config.series_colors = Some(vec![RED, BLUE]);
/// config.width = 1920;
/// config.height = 1080;
/// ```
#[derive(Clone)]
pub struct PlotConfig {
    /// Image width in pixels (default: 1024)
    pub width: u32,

    /// Image height in pixels (default: 768)
    pub height: u32,

    /// Plot title (default: "Plot")
    pub title: String,

    /// X-axis label (set by plot type)
    pub xlabel: String,

    /// Y-axis label (set by plot type)
    pub ylabel: String,

    /// Optional colors, one per series
    ///
    /// If None, uses default palette: [RED, BLUE, GREEN, MAGENTA, CYAN, ...]
    pub series_colors: Option<Vec<RGBColor>>,

    /// Background color (default: WHITE)
    pub background: RGBColor,

    /// Line width in pixels (default: 2)
    pub line_width: u32,

    /// Show grid lines (default: true)
    pub show_grid: bool,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 768,
            title: "Plot".to_string(),
            xlabel: String::new(),
            ylabel: String::new(),
            series_colors: None,
            background: WHITE,
            line_width: 2,
            show_grid: true,
        }
    }
}

/// Helper trait to accept both `String` and `None` for optional titles
pub trait IntoOptionalTitle {
    fn into_optional_title(self) -> Option<String>;
}

impl IntoOptionalTitle for &str {
    fn into_optional_title(self) -> Option<String> {
        Some(self.to_string())
    }
}

impl IntoOptionalTitle for String {
    fn into_optional_title(self) -> Option<String> {
        Some(self)
    }
}

impl<T: IntoOptionalTitle> IntoOptionalTitle for Option<T> {
    fn into_optional_title(self) -> Option<String> {
        self.and_then(|t| t.into_optional_title())
    }
}

/// Constant for no title (default title will be used)
pub const NO_TITLE: Option<&str> = None;

impl PlotConfig {
    /// Radial profiles of a snapshot: values across, `η` upwards
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let config = PlotConfig::profiles(format!("x = {:.3}", snapshot.x));
    /// let config = PlotConfig::profiles(NO_TITLE);
    /// ```
    pub fn profiles(title: impl IntoOptionalTitle) -> Self {
        Self {
            xlabel: "Nondimensional value".to_string(),
            ylabel: "η (body = 0, outer boundary = 1)".to_string(),
            title: title
                .into_optional_title()
                .unwrap_or_else(|| "Radial Profiles".to_string()),
            ..Self::default()
        }
    }

    /// Body and outer-boundary contours in the meridian plane
    pub fn contours(title: impl IntoOptionalTitle) -> Self {
        Self {
            xlabel: "x".to_string(),
            ylabel: "r".to_string(),
            title: title.into_optional_title().unwrap_or_else(|| "Geometry".to_string()),
            ..Self::default()
        }
    }

    /// Color for series `i`
    ///
    /// Uses custom colors if provided, otherwise falls back to default palette
    pub(crate) fn series_color(&self, series_index: usize) -> RGBColor {
        if let Some(colors) = &self.series_colors
            && series_index < colors.len()
        {
            return colors[series_index];
        }

        const DEFAULT_COLORS: [RGBColor; 8] = [
            RED,
            BLUE,
            GREEN,
            MAGENTA,
            CYAN,
            BLACK,
            RGBColor(255, 165, 0), // Orange
            RGBColor(128, 0, 128), // Purple
        ];

        DEFAULT_COLORS[series_index % DEFAULT_COLORS.len()]
    }
}

// =================================================================================================
// Tests
// =================================================================================================
