use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub page: PageConfig,
    #[serde(default)]
    pub sliders: SlidersConfig,
    #[serde(default)]
    pub keymap: KeymapConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Data directory path (log files live here)
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: default_log_level(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Tick rate in milliseconds
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,
    /// Pixel width assumed for one terminal column when mapping
    /// the terminal onto viewport breakpoints
    #[serde(default = "default_cell_width")]
    pub cell_width_px: f64,
    /// Show the key hint line in the status bar
    #[serde(default = "default_true")]
    pub show_hints: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate(),
            cell_width_px: default_cell_width(),
            show_hints: default_true(),
        }
    }
}

/// Offsets and thresholds for the page-level helpers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageConfig {
    /// Fixed header height subtracted from anchor scroll targets
    #[serde(default = "default_header_offset")]
    pub header_offset_px: f64,
    /// Lead distance before a section counts as active in the nav
    #[serde(default = "default_nav_offset")]
    pub nav_offset_px: f64,
    /// Visible ratio at which an element is revealed (0.0-1.0)
    #[serde(default = "default_reveal_threshold")]
    pub reveal_threshold: f64,
    /// Bottom margin shrinking the viewport for reveal checks
    #[serde(default = "default_reveal_bottom_margin")]
    pub reveal_bottom_margin_px: f64,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            header_offset_px: default_header_offset(),
            nav_offset_px: default_nav_offset(),
            reveal_threshold: default_reveal_threshold(),
            reveal_bottom_margin_px: default_reveal_bottom_margin(),
        }
    }
}

/// One section per slider widget.
///
/// Each section starts from its widget's preset, so a config file only
/// needs to list the keys it changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlidersConfig {
    #[serde(
        default = "SliderConfig::projects",
        deserialize_with = "deserialize_projects"
    )]
    pub projects: SliderConfig,
    #[serde(
        default = "SliderConfig::testimonials",
        deserialize_with = "deserialize_testimonials"
    )]
    pub testimonials: SliderConfig,
    #[serde(
        default = "SliderConfig::category_projects",
        deserialize_with = "deserialize_categories"
    )]
    pub categories: SliderConfig,
}

impl Default for SlidersConfig {
    fn default() -> Self {
        Self {
            projects: SliderConfig::projects(),
            testimonials: SliderConfig::testimonials(),
            categories: SliderConfig::category_projects(),
        }
    }
}

fn deserialize_projects<'de, D>(deserializer: D) -> Result<SliderConfig, D::Error>
where
    D: Deserializer<'de>,
{
    overlay_preset(deserializer, SliderConfig::projects())
}

fn deserialize_testimonials<'de, D>(deserializer: D) -> Result<SliderConfig, D::Error>
where
    D: Deserializer<'de>,
{
    overlay_preset(deserializer, SliderConfig::testimonials())
}

fn deserialize_categories<'de, D>(deserializer: D) -> Result<SliderConfig, D::Error>
where
    D: Deserializer<'de>,
{
    overlay_preset(deserializer, SliderConfig::category_projects())
}

// Merge the keys present in the file over the serialized preset.
fn overlay_preset<'de, D>(deserializer: D, preset: SliderConfig) -> Result<SliderConfig, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error as _;

    let overrides = toml::Table::deserialize(deserializer)?;
    let mut merged = match toml::Value::try_from(preset).map_err(D::Error::custom)? {
        toml::Value::Table(table) => table,
        _ => return Err(D::Error::custom("slider preset did not serialize to a table")),
    };
    for (key, value) in overrides {
        merged.insert(key, value);
    }
    toml::Value::Table(merged)
        .try_into()
        .map_err(D::Error::custom)
}

/// Behaviour of a single slider widget
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SliderConfig {
    /// Items visible at once: an integer or "responsive"
    pub page_size: PageSize,
    /// Width breakpoints used when `page_size` is responsive
    #[serde(default)]
    pub breakpoints: Breakpoints,
    /// Wrap around at the first/last page
    #[serde(rename = "loop")]
    pub loop_enabled: bool,
    /// Navigation unit: whole pages or single slides
    pub granularity: Granularity,
    /// Displacement a gesture must exceed to commit a navigation
    pub drag_threshold: DragThreshold,
    /// Width drag deltas are measured against
    pub drag_reference: DragReference,
    /// Autoplay period in milliseconds (absent = no autoplay)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub autoplay_delay_ms: Option<u64>,
    /// Group slides by their category tag
    #[serde(default)]
    pub group_by_category: bool,
    /// Category shown first (defaults to the first category found)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_category: Option<String>,
    /// Pointer hover stops autoplay, leaving resumes it
    #[serde(default)]
    pub pause_on_hover: bool,
    /// A gesture suspends autoplay until it ends
    #[serde(default)]
    pub pause_on_drag: bool,
    /// Arrow keys navigate this slider
    #[serde(default)]
    pub keyboard: bool,
    /// Upper bound on rendered pagination dots
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_dots: Option<usize>,
    /// Dot label template, `{n}` is replaced by the 1-based page number
    #[serde(default = "default_dot_label")]
    pub dot_label: String,
}

impl Default for SliderConfig {
    fn default() -> Self {
        Self::projects()
    }
}

impl SliderConfig {
    /// Multi-item projects slider: responsive page size, wraps by page
    pub fn projects() -> Self {
        Self {
            page_size: PageSize::Responsive,
            breakpoints: Breakpoints::default(),
            loop_enabled: true,
            granularity: Granularity::Page,
            drag_threshold: DragThreshold::Ratio(0.1),
            drag_reference: DragReference::Viewport,
            autoplay_delay_ms: None,
            group_by_category: false,
            initial_category: None,
            pause_on_hover: false,
            pause_on_drag: false,
            keyboard: false,
            max_dots: None,
            dot_label: default_dot_label(),
        }
    }

    /// Single-item testimonials carousel
    pub fn testimonials() -> Self {
        Self {
            page_size: PageSize::Fixed(1),
            granularity: Granularity::Slide,
            drag_threshold: DragThreshold::Ratio(0.15),
            drag_reference: DragReference::Track,
            max_dots: Some(3),
            dot_label: "Go to testimonial {n}".to_string(),
            ..Self::projects()
        }
    }

    /// Category-filtered projects slider with autoplay
    pub fn category_projects() -> Self {
        Self {
            page_size: PageSize::Fixed(1),
            granularity: Granularity::Slide,
            drag_threshold: DragThreshold::Pixels(50.0),
            autoplay_delay_ms: Some(5000),
            group_by_category: true,
            initial_category: Some("residential".to_string()),
            pause_on_hover: true,
            pause_on_drag: true,
            keyboard: true,
            ..Self::projects()
        }
    }
}

/// Number of slides shown at once.
///
/// Accepts either an integer or the string `"responsive"` in config files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageSize {
    Fixed(usize),
    Responsive,
}

impl Serialize for PageSize {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            PageSize::Fixed(n) => serializer.serialize_u64(*n as u64),
            PageSize::Responsive => serializer.serialize_str("responsive"),
        }
    }
}

// Custom deserializer to accept either an integer or "responsive"
impl<'de> Deserialize<'de> for PageSize {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{self, Visitor};
        use std::fmt;

        struct PageSizeVisitor;

        impl Visitor<'_> for PageSizeVisitor {
            type Value = PageSize;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a positive integer or \"responsive\"")
            }

            fn visit_u64<E>(self, value: u64) -> Result<PageSize, E>
            where
                E: de::Error,
            {
                if value == 0 {
                    return Err(E::custom("page_size must be at least 1"));
                }
                Ok(PageSize::Fixed(value as usize))
            }

            // TOML integers arrive as i64
            fn visit_i64<E>(self, value: i64) -> Result<PageSize, E>
            where
                E: de::Error,
            {
                if value < 1 {
                    return Err(E::custom("page_size must be at least 1"));
                }
                Ok(PageSize::Fixed(value as usize))
            }

            fn visit_str<E>(self, value: &str) -> Result<PageSize, E>
            where
                E: de::Error,
            {
                if value.eq_ignore_ascii_case("responsive") {
                    return Ok(PageSize::Responsive);
                }
                match value.parse::<u64>() {
                    Ok(n) => self.visit_u64(n),
                    Err(_) => Err(E::invalid_value(de::Unexpected::Str(value), &self)),
                }
            }
        }

        deserializer.deserialize_any(PageSizeVisitor)
    }
}

/// Viewport breakpoints for responsive page sizes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Breakpoints {
    /// Minimum viewport width (px) that counts as wide
    #[serde(default = "default_wide_min_width")]
    pub wide_min_width: f64,
    /// Items per page on wide viewports
    #[serde(default = "default_wide_items")]
    pub wide: usize,
    /// Items per page below the breakpoint
    #[serde(default = "default_narrow_items")]
    pub narrow: usize,
}

impl Default for Breakpoints {
    fn default() -> Self {
        Self {
            wide_min_width: default_wide_min_width(),
            wide: default_wide_items(),
            narrow: default_narrow_items(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    /// Pages hold `page_size` slides; the last page is clamped so it
    /// stays full
    Page,
    /// Every slide is its own page
    Slide,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DragThreshold {
    /// Fraction of the reference width
    Ratio(f64),
    /// Absolute distance in pixels
    Pixels(f64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DragReference {
    Viewport,
    Track,
}

/// Keymap configuration using Vim-style notation
/// Format: "j", "k", "<C-j>" (Ctrl+j), "<S-g>" (Shift+g), "<CR>" (Enter), "<Esc>", "<Tab>", "<Space>"
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeymapConfig {
    /// Quit the application
    #[serde(default = "default_key_quit")]
    pub quit: String,
    /// Next page of the focused slider
    #[serde(default = "default_key_next")]
    pub next: String,
    /// Previous page of the focused slider
    #[serde(default = "default_key_prev")]
    pub prev: String,
    /// Focus the slider below
    #[serde(default = "default_key_focus_next")]
    pub focus_next: String,
    /// Focus the slider above
    #[serde(default = "default_key_focus_prev")]
    pub focus_prev: String,
    /// Jump to the first page
    #[serde(default = "default_key_first_page")]
    pub first_page: String,
    /// Jump to the last page
    #[serde(default = "default_key_last_page")]
    pub last_page: String,
    /// Switch to the next category (category slider)
    #[serde(default = "default_key_cycle_category")]
    pub cycle_category: String,
    /// Start/stop autoplay
    #[serde(default = "default_key_toggle_autoplay")]
    pub toggle_autoplay: String,
    /// Open/close the navigation menu
    #[serde(default = "default_key_toggle_menu")]
    pub toggle_menu: String,
    /// Activate the highlighted menu entry
    #[serde(default = "default_key_select")]
    pub select: String,
}

impl Default for KeymapConfig {
    fn default() -> Self {
        Self {
            quit: default_key_quit(),
            next: default_key_next(),
            prev: default_key_prev(),
            focus_next: default_key_focus_next(),
            focus_prev: default_key_focus_prev(),
            first_page: default_key_first_page(),
            last_page: default_key_last_page(),
            cycle_category: default_key_cycle_category(),
            toggle_autoplay: default_key_toggle_autoplay(),
            toggle_menu: default_key_toggle_menu(),
            select: default_key_select(),
        }
    }
}

// Default keymap values (Vim-style notation)
fn default_key_quit() -> String { "q".to_string() }
fn default_key_next() -> String { "l".to_string() }
fn default_key_prev() -> String { "h".to_string() }
fn default_key_focus_next() -> String { "j".to_string() }
fn default_key_focus_prev() -> String { "k".to_string() }
fn default_key_first_page() -> String { "gg".to_string() }
fn default_key_last_page() -> String { "G".to_string() }
fn default_key_cycle_category() -> String { "c".to_string() }
fn default_key_toggle_autoplay() -> String { "p".to_string() }
fn default_key_toggle_menu() -> String { "m".to_string() }
fn default_key_select() -> String { "<CR>".to_string() }

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("slidekit")
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_tick_rate() -> u64 {
    100
}

fn default_cell_width() -> f64 {
    8.0 // 128 columns ~ 1024px
}

fn default_header_offset() -> f64 {
    80.0
}

fn default_nav_offset() -> f64 {
    100.0
}

fn default_reveal_threshold() -> f64 {
    0.1
}

fn default_reveal_bottom_margin() -> f64 {
    50.0
}

fn default_wide_min_width() -> f64 {
    1024.0
}

fn default_wide_items() -> usize {
    3
}

fn default_narrow_items() -> usize {
    2
}

fn default_dot_label() -> String {
    "Go to slide {n}".to_string()
}

/// Expand tilde (~) in path to user's home directory
fn expand_tilde(path: &Path) -> PathBuf {
    if let Some(path_str) = path.to_str() {
        if let Some(stripped) = path_str.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(stripped);
            }
        } else if path_str == "~" {
            if let Some(home) = dirs::home_dir() {
                return home;
            }
        }
    }
    path.to_path_buf()
}

impl AppConfig {
    /// Load configuration from a specific file, defaults if it does not exist
    pub fn load_from(path: &Path) -> crate::Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Self::from_toml_str(&content)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> crate::Result<Self> {
        toml::from_str(content).map_err(|e| crate::Error::Config(e.to_string()))
    }

    /// Render configuration as pretty TOML
    pub fn to_toml_string(&self) -> crate::Result<String> {
        toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))
    }

    /// Save configuration to a specific file
    pub fn save_to(&self, path: &Path) -> crate::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, self.to_toml_string()?)?;

        Ok(())
    }

    /// Get the configuration file path
    /// Always uses ~/.config/slidekit/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("slidekit")
            .join("config.toml")
    }

    /// Get the data directory (with tilde expansion)
    pub fn data_dir(&self) -> PathBuf {
        expand_tilde(&self.general.data_dir)
    }

    /// Log file used while the terminal UI owns the screen
    pub fn log_path(&self) -> PathBuf {
        self.data_dir().join("slidekit.log")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets() {
        let projects = SliderConfig::projects();
        assert_eq!(projects.page_size, PageSize::Responsive);
        assert_eq!(projects.granularity, Granularity::Page);
        assert_eq!(projects.drag_threshold, DragThreshold::Ratio(0.1));
        assert!(projects.autoplay_delay_ms.is_none());

        let testimonials = SliderConfig::testimonials();
        assert_eq!(testimonials.page_size, PageSize::Fixed(1));
        assert_eq!(testimonials.max_dots, Some(3));
        assert_eq!(testimonials.drag_reference, DragReference::Track);

        let categories = SliderConfig::category_projects();
        assert_eq!(categories.autoplay_delay_ms, Some(5000));
        assert_eq!(categories.drag_threshold, DragThreshold::Pixels(50.0));
        assert_eq!(categories.initial_category.as_deref(), Some("residential"));
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = AppConfig::from_toml_str("").unwrap();
        assert_eq!(config.ui.tick_rate_ms, 100);
        assert_eq!(config.page.header_offset_px, 80.0);
        assert_eq!(config.sliders.testimonials, SliderConfig::testimonials());
        assert_eq!(config.keymap.next, "l");
    }

    #[test]
    fn test_page_size_accepts_number_or_responsive() {
        let config = AppConfig::from_toml_str(
            r#"
            [sliders.projects]
            page_size = 4

            [sliders.testimonials]
            page_size = "responsive"
            "#,
        )
        .unwrap();
        assert_eq!(config.sliders.projects.page_size, PageSize::Fixed(4));
        assert_eq!(config.sliders.testimonials.page_size, PageSize::Responsive);
    }

    #[test]
    fn test_page_size_rejects_zero() {
        let result = AppConfig::from_toml_str("[sliders.projects]\npage_size = 0\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_partial_section_keeps_preset() {
        let config = AppConfig::from_toml_str(
            r#"
            [sliders.categories]
            autoplay_delay_ms = 2500
            drag_threshold = { ratio = 0.2 }
            "#,
        )
        .unwrap();
        let categories = &config.sliders.categories;
        assert_eq!(categories.autoplay_delay_ms, Some(2500));
        assert_eq!(categories.drag_threshold, DragThreshold::Ratio(0.2));
        // Untouched keys come from the category preset, not the projects one
        assert!(categories.group_by_category);
        assert!(categories.pause_on_hover);
        assert_eq!(categories.granularity, Granularity::Slide);
    }

    #[test]
    fn test_round_trip() {
        let config = AppConfig::default();
        let text = config.to_toml_string().unwrap();
        let parsed = AppConfig::from_toml_str(&text).unwrap();
        assert_eq!(parsed.sliders.projects, config.sliders.projects);
        assert_eq!(parsed.sliders.categories, config.sliders.categories);
    }
}
