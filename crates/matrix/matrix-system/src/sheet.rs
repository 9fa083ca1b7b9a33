//! Stylesheets.
//!
//! A [`StyleSheet`] holds everything loaded from `styles.json`: the
//! `defaults` layer, the class rules, the grid templates and the font table.
//! It is built once, never mutated afterwards, and shared by reference
//! between render ticks (it is `Send + Sync`).
//!
//! # Document Format
//!
//! ```json
//! {
//!   "font_sizes": { "small": "5x7.bdf", "medium": "7x13.bdf", "large": "9x18.bdf" },
//!   "defaults":   { "gap": 2 },
//!   "classes": {
//!     ".highlight": { "color": "#00FF00" },
//!     "clock": {
//!       ".time-display": { "font_size": "large", "gravity": "top-center" }
//!     }
//!   },
//!   "grids": { "two-row": { "rows": 2, "cols": 1, "gap": 4 } }
//! }
//! ```
//!
//! Every top-level key is optional. Class keys start with `.`; a key without
//! the dot groups rules by feature and is flattened at load.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::Path;

use matrix_specs::{fonts, FontSpec};
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::{ConfigError, Layer};
use crate::style::{AttrValue, Attribute, FontSize, PartialStyle, RuleSet};

/// Grid template: `rows × cols` cells separated by `gap` pixels.
///
/// Construction validates the dimensions, so a `GridConfig` always has at
/// least one cell.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct GridConfig {
    rows: u32,
    cols: u32,
    gap: u32,
}

impl GridConfig {
    /// Creates a grid template.
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidGrid`] if `rows` or `cols` is zero.
    ///
    /// ```
    /// use matrix_system::sheet::GridConfig;
    ///
    /// let grid = GridConfig::new(2, 1, 4).unwrap();
    /// assert_eq!(grid.cell_count(), 2);
    /// assert!(GridConfig::new(0, 1, 0).is_err());
    /// ```
    pub fn new(rows: u32, cols: u32, gap: u32) -> Result<Self, ConfigError> {
        Self::named("inline", i64::from(rows), i64::from(cols), i64::from(gap))
    }

    fn named(grid: &str, rows: i64, cols: i64, gap: i64) -> Result<Self, ConfigError> {
        let positive = |field: &'static str, value: i64| {
            u32::try_from(value)
                .ok()
                .filter(|v| *v > 0)
                .ok_or_else(|| ConfigError::InvalidGrid {
                    grid: grid.to_owned(),
                    field,
                    expected: "a positive integer",
                    value,
                })
        };

        let rows = positive("rows", rows)?;
        let cols = positive("cols", cols)?;
        let gap = u32::try_from(gap).map_err(|_| ConfigError::InvalidGrid {
            grid: grid.to_owned(),
            field: "gap",
            expected: "a non-negative integer",
            value: gap,
        })?;

        Ok(Self { rows, cols, gap })
    }

    /// Number of rows.
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Number of columns.
    pub const fn cols(&self) -> u32 {
        self.cols
    }

    /// Spacing between cells, both ways.
    pub const fn gap(&self) -> u32 {
        self.gap
    }

    /// Total number of cells.
    pub const fn cell_count(&self) -> u32 {
        self.rows.saturating_mul(self.cols)
    }
}

impl Default for GridConfig {
    /// A single cell with the stylesheet's conventional 2 px gap.
    fn default() -> Self {
        Self {
            rows: 1,
            cols: 1,
            gap: 2,
        }
    }
}

/// Maps each [`FontSize`] preset to a bundled BDF font.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct FontTable {
    small: &'static FontSpec,
    medium: &'static FontSpec,
    large: &'static FontSpec,
}

impl FontTable {
    /// small → `5x7.bdf`, medium → `7x13.bdf`, large → `9x18.bdf`.
    pub const BUILTIN: FontTable = FontTable {
        small: &fonts::FONT_5X7,
        medium: &fonts::FONT_7X13,
        large: &fonts::FONT_9X18,
    };

    /// The font behind `size`.
    pub const fn get(&self, size: FontSize) -> &'static FontSpec {
        match size {
            FontSize::Small => self.small,
            FontSize::Medium => self.medium,
            FontSize::Large => self.large,
        }
    }

    /// Rebinds one preset.
    pub fn set(&mut self, size: FontSize, font: &'static FontSpec) {
        match size {
            FontSize::Small => self.small = font,
            FontSize::Medium => self.medium = font,
            FontSize::Large => self.large = font,
        }
    }
}

impl Default for FontTable {
    fn default() -> Self {
        Self::BUILTIN
    }
}

/// Loaded stylesheet.
///
/// # Example
///
/// ```
/// use matrix_system::sheet::StyleSheet;
/// use matrix_system::style::{Color, Gravity};
///
/// let sheet = StyleSheet::from_json_str(r##"{
///     "classes": { ".highlight": { "color": "#00FF00", "gravity": "top-left" } }
/// }"##).unwrap();
///
/// let rules = sheet.class(".highlight").unwrap();
/// assert_eq!(rules.style().color, Some(Color::new(0, 255, 0)));
/// assert_eq!(sheet.class("highlight"), Some(rules));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleSheet {
    defaults: RuleSet,
    classes: BTreeMap<String, RuleSet>,
    grids: BTreeMap<String, GridConfig>,
    fonts: FontTable,
}

impl StyleSheet {
    /// An empty stylesheet with the built-in font table.
    pub fn new() -> Self {
        Self::default()
    }

    /// The sheet used when `styles.json` is missing or unreadable.
    ///
    /// No classes or grids; the defaults layer spaces stacked elements by 2 px.
    pub fn builtin() -> Self {
        Self::new().with_defaults(PartialStyle::new().gap(2))
    }

    /// Adds (or replaces) a class rule from typed attributes.
    ///
    /// A leading `.` in `name` is ignored.
    pub fn with_class(self, name: &str, style: PartialStyle) -> Self {
        self.with_rules(name, RuleSet::from(style))
    }

    /// Adds (or replaces) a class rule from a parsed declaration block.
    pub fn with_rules(mut self, name: &str, rules: RuleSet) -> Self {
        self.classes.insert(class_key(name).to_owned(), rules);
        self
    }

    /// Replaces the defaults layer.
    pub fn with_defaults(mut self, style: PartialStyle) -> Self {
        self.defaults = RuleSet::from(style);
        self
    }

    /// Adds (or replaces) a named grid template.
    pub fn with_grid(mut self, name: &str, grid: GridConfig) -> Self {
        self.grids.insert(name.to_owned(), grid);
        self
    }

    /// Rebinds one font preset.
    pub fn with_font(mut self, size: FontSize, font: &'static FontSpec) -> Self {
        self.fonts.set(size, font);
        self
    }

    /// Looks up a class rule. `"bold"` and `".bold"` are the same reference.
    pub fn class(&self, reference: &str) -> Option<&RuleSet> {
        self.classes.get(class_key(reference))
    }

    /// Class names (without the leading dot), sorted.
    pub fn class_names(&self) -> impl Iterator<Item = &str> {
        self.classes.keys().map(String::as_str)
    }

    /// The `defaults` layer.
    pub fn defaults(&self) -> &RuleSet {
        &self.defaults
    }

    /// Looks up a grid template.
    pub fn grid(&self, name: &str) -> Option<&GridConfig> {
        self.grids.get(name)
    }

    /// The font table.
    pub fn fonts(&self) -> &FontTable {
        &self.fonts
    }

    /// Parses a stylesheet document.
    ///
    /// Invalid attribute *values* are not errors here; they are reported
    /// when an element resolves through the offending rule.
    ///
    /// # Errors
    ///
    /// Any [`ConfigError`] except `Io` and `UnknownGrid`.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let raw: RawSheet = serde_json::from_str(json)?;
        Self::from_raw(raw)
    }

    /// Reads and parses a stylesheet file.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Io`] if the file cannot be read, otherwise as
    /// [`StyleSheet::from_json_str`].
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let sheet = Self::from_json_str(&json)?;
        tracing::debug!(
            path = %path.display(),
            classes = sheet.classes.len(),
            grids = sheet.grids.len(),
            "stylesheet loaded"
        );
        Ok(sheet)
    }

    /// Loads `path`, falling back to [`StyleSheet::builtin`] on any failure.
    ///
    /// A missing file is expected on first boot and only logged at debug
    /// level; every other failure is logged as a warning.
    pub fn load_or_builtin(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::from_path(path) {
            Ok(sheet) => sheet,
            Err(ConfigError::Io { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no stylesheet, using built-in");
                Self::builtin()
            }
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "stylesheet rejected, using built-in");
                Self::builtin()
            }
        }
    }

    fn from_raw(raw: RawSheet) -> Result<Self, ConfigError> {
        let mut sheet = Self::new();

        for (preset, font) in &raw.font_sizes {
            let Some(size) = FontSize::from_token(preset) else {
                tracing::warn!(preset = %preset, font = %font, "unknown font size preset skipped");
                continue;
            };
            let spec = fonts::by_name(font).ok_or_else(|| ConfigError::UnknownFont {
                preset: preset.clone(),
                font: font.clone(),
            })?;
            sheet.fonts.set(size, spec);
        }

        sheet.defaults = parse_block(Layer::Defaults, &raw.defaults)?;

        for (key, value) in &raw.classes {
            if key.starts_with('.') {
                sheet.insert_class(key, value)?;
                continue;
            }

            let Value::Object(group) = value else {
                return Err(ConfigError::MalformedClass { class: key.clone() });
            };
            for (child, body) in group {
                if child.starts_with('.') {
                    sheet.insert_class(child, body)?;
                } else {
                    tracing::debug!(group = %key, entry = %child, "non-class entry in class group ignored");
                }
            }
        }

        for (name, grid) in &raw.grids {
            let config = GridConfig::named(name, grid.rows, grid.cols, grid.gap)?;
            sheet.grids.insert(name.clone(), config);
        }

        Ok(sheet)
    }

    fn insert_class(&mut self, key: &str, body: &Value) -> Result<(), ConfigError> {
        let Value::Object(block) = body else {
            return Err(ConfigError::MalformedClass {
                class: key.to_owned(),
            });
        };

        let name = class_key(key);
        let rules = parse_block(Layer::Class(name.to_owned()), block)?;
        if self.classes.insert(name.to_owned(), rules).is_some() {
            tracing::debug!(class = %name, "class defined twice, last definition kept");
        }
        Ok(())
    }
}

fn class_key(reference: &str) -> &str {
    reference.strip_prefix('.').unwrap_or(reference)
}

/// Parses one attribute mapping into a [`RuleSet`].
///
/// Structural problems (unknown names, non-scalar values) fail the load;
/// values that merely violate an attribute constraint are kept as faults.
fn parse_block(layer: Layer, block: &Map<String, Value>) -> Result<RuleSet, ConfigError> {
    let mut rules = RuleSet::new();

    for (name, value) in block {
        let Some(attribute) = Attribute::from_name(name) else {
            return Err(ConfigError::UnknownAttribute {
                layer,
                name: name.clone(),
            });
        };

        let value = match value {
            Value::String(text) => AttrValue::Text(text.clone()),
            Value::Number(number) => match number.as_i64() {
                Some(int) => AttrValue::Int(int),
                None => {
                    return Err(ConfigError::MalformedValue {
                        layer,
                        name: name.clone(),
                    })
                }
            },
            _ => {
                return Err(ConfigError::MalformedValue {
                    layer,
                    name: name.clone(),
                })
            }
        };

        rules.declare(attribute, &value);
    }

    Ok(rules)
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawSheet {
    defaults: Map<String, Value>,
    classes: Map<String, Value>,
    grids: BTreeMap<String, RawGrid>,
    font_sizes: BTreeMap<String, String>,
}

#[derive(Debug, Deserialize)]
struct RawGrid {
    rows: i64,
    #[serde(alias = "columns")]
    cols: i64,
    #[serde(default)]
    gap: i64,
}
