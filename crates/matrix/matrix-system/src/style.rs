//! Style records for matrix text elements.
//!
//! This module provides the attribute vocabulary shared by stylesheets,
//! element overrides and the resolver. Every attribute value is a closed,
//! typed value: tokens that do not parse never make it into a
//! [`PartialStyle`].
//!
//! # Core Types
//!
//! - [`FontSize`] - The three font presets
//! - [`Gravity`] - Nine anchor positions on a canvas or grid cell
//! - [`Color`] - `#RRGGBB` color backed by [`Rgb888`]
//! - [`Brightness`] - Percentage scale applied to colors at display time
//! - [`PartialStyle`] - Any subset of attributes (one cascade layer)
//! - [`RuleSet`] - A parsed declaration block, keeping rejected values
//! - [`ResolvedStyle`] - Every attribute populated
//!
//! # Example
//!
//! ```
//! use matrix_system::style::*;
//!
//! let highlight = PartialStyle::new()
//!     .color(Color::new(0x00, 0xFF, 0x00))
//!     .gravity(Gravity::TopCenter)
//!     .margin(2);
//!
//! let mut style = PartialStyle::new().font_size(FontSize::Large);
//! style.overlay(&highlight);
//!
//! let resolved = ResolvedStyle::from_partial(&style);
//! assert_eq!(resolved.font_size, FontSize::Large);
//! assert_eq!(resolved.color.to_string(), "#00FF00");
//! assert_eq!(resolved.gap, 0);
//! ```

use core::fmt;

use embedded_graphics::pixelcolor::{Rgb888, RgbColor};

/// Font size preset.
///
/// The concrete font behind each preset comes from the stylesheet's
/// font table.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FontSize {
    /// Compact text (dates, captions).
    Small,

    /// Body text.
    #[default]
    Medium,

    /// Headline text (the time).
    Large,
}

impl FontSize {
    /// Every preset, smallest first.
    pub const ALL: [FontSize; 3] = [FontSize::Small, FontSize::Medium, FontSize::Large];

    /// Parses a stylesheet token (`"small"`, `"medium"`, `"large"`).
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "small" => Some(FontSize::Small),
            "medium" => Some(FontSize::Medium),
            "large" => Some(FontSize::Large),
            _ => None,
        }
    }

    /// The stylesheet token for this preset.
    pub const fn as_str(self) -> &'static str {
        match self {
            FontSize::Small => "small",
            FontSize::Medium => "medium",
            FontSize::Large => "large",
        }
    }
}

impl fmt::Display for FontSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Placement of an element along one axis of its container.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Anchor {
    /// Left or top edge.
    Start,

    /// Centered.
    Center,

    /// Right or bottom edge.
    End,
}

/// Anchor position of an element within its canvas or grid cell.
///
/// The cross product of {top, center, bottom} × {left, center, right}.
/// The center-center variant is spelled `"center"` in stylesheets;
/// `"center-center"` is accepted as well.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub enum Gravity {
    /// `top-left`
    TopLeft,
    /// `top-center`
    TopCenter,
    /// `top-right`
    TopRight,
    /// `center-left`
    CenterLeft,
    /// `center`
    #[default]
    Center,
    /// `center-right`
    CenterRight,
    /// `bottom-left`
    BottomLeft,
    /// `bottom-center`
    BottomCenter,
    /// `bottom-right`
    BottomRight,
}

impl Gravity {
    /// All nine gravities in row-major order.
    pub const ALL: [Gravity; 9] = [
        Gravity::TopLeft,
        Gravity::TopCenter,
        Gravity::TopRight,
        Gravity::CenterLeft,
        Gravity::Center,
        Gravity::CenterRight,
        Gravity::BottomLeft,
        Gravity::BottomCenter,
        Gravity::BottomRight,
    ];

    /// Parses a stylesheet token such as `"top-left"` or `"center"`.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "center" | "center-center" => Some(Gravity::Center),
            _ => Self::ALL
                .iter()
                .copied()
                .find(|gravity| gravity.as_str() == token),
        }
    }

    /// The stylesheet token for this gravity.
    pub const fn as_str(self) -> &'static str {
        match self {
            Gravity::TopLeft => "top-left",
            Gravity::TopCenter => "top-center",
            Gravity::TopRight => "top-right",
            Gravity::CenterLeft => "center-left",
            Gravity::Center => "center",
            Gravity::CenterRight => "center-right",
            Gravity::BottomLeft => "bottom-left",
            Gravity::BottomCenter => "bottom-center",
            Gravity::BottomRight => "bottom-right",
        }
    }

    /// Horizontal anchor (left, center, right).
    pub const fn horizontal(self) -> Anchor {
        match self {
            Gravity::TopLeft | Gravity::CenterLeft | Gravity::BottomLeft => Anchor::Start,
            Gravity::TopCenter | Gravity::Center | Gravity::BottomCenter => Anchor::Center,
            Gravity::TopRight | Gravity::CenterRight | Gravity::BottomRight => Anchor::End,
        }
    }

    /// Vertical anchor (top, center, bottom).
    ///
    /// Elements sharing a gravity stack along this axis.
    pub const fn vertical(self) -> Anchor {
        match self {
            Gravity::TopLeft | Gravity::TopCenter | Gravity::TopRight => Anchor::Start,
            Gravity::CenterLeft | Gravity::Center | Gravity::CenterRight => Anchor::Center,
            Gravity::BottomLeft | Gravity::BottomCenter | Gravity::BottomRight => Anchor::End,
        }
    }
}

impl fmt::Display for Gravity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 24-bit color written as `#RRGGBB` in stylesheets.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Color(Rgb888);

impl Color {
    /// `#FFFFFF`, the default text color.
    pub const WHITE: Color = Color(Rgb888::WHITE);

    /// `#000000`
    pub const BLACK: Color = Color(Rgb888::BLACK);

    /// Creates a color from its channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self(Rgb888::new(r, g, b))
    }

    /// Parses exactly `#RRGGBB` (hex digits in either case).
    ///
    /// Named colors, short `#RGB` forms and alpha channels are rejected.
    ///
    /// ```
    /// use matrix_system::style::Color;
    ///
    /// assert_eq!(Color::from_hex("#ffff80"), Some(Color::new(0xFF, 0xFF, 0x80)));
    /// assert_eq!(Color::from_hex("red"), None);
    /// assert_eq!(Color::from_hex("#FFF"), None);
    /// ```
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#')?;
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }

        let channel = |range: core::ops::Range<usize>| {
            digits
                .get(range)
                .and_then(|pair| u8::from_str_radix(pair, 16).ok())
        };

        Some(Self::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }

    /// The underlying embedded-graphics color.
    pub const fn rgb(self) -> Rgb888 {
        self.0
    }

    /// This color dimmed to `brightness`.
    pub fn scaled(self, brightness: Brightness) -> Rgb888 {
        Rgb888::new(
            brightness.scale(self.0.r()),
            brightness.scale(self.0.g()),
            brightness.scale(self.0.b()),
        )
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.0.r(), self.0.g(), self.0.b())
    }
}

/// Brightness percentage (0–100).
///
/// Out-of-range inputs are clamped, never rejected.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Brightness(u8);

impl Brightness {
    /// 100 %, colors shown as declared.
    pub const FULL: Brightness = Brightness(100);

    /// Creates a brightness, clamping to 100.
    pub const fn new(percent: u8) -> Self {
        if percent > 100 {
            Self(100)
        } else {
            Self(percent)
        }
    }

    /// Creates a brightness from an arbitrary integer, clamping into 0..=100.
    pub fn from_i64(percent: i64) -> Self {
        // clamp guarantees the value fits in u8
        Self(u8::try_from(percent.clamp(0, 100)).unwrap_or(100))
    }

    /// The percentage.
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Scales one color channel.
    pub fn scale(self, channel: u8) -> u8 {
        let scaled = u16::from(channel)
            .saturating_mul(u16::from(self.0))
            .checked_div(100)
            .unwrap_or(0);
        u8::try_from(scaled).unwrap_or(u8::MAX)
    }
}

impl Default for Brightness {
    fn default() -> Self {
        Self::FULL
    }
}

/// Name of a style attribute as written in stylesheets and overrides.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Attribute {
    /// `font_size`
    FontSize,
    /// `color`
    Color,
    /// `background_color`
    BackgroundColor,
    /// `gravity`
    Gravity,
    /// `gap`
    Gap,
    /// `margin`
    Margin,
    /// `padding`
    Padding,
    /// `brightness`
    Brightness,
    /// `background_brightness`
    BackgroundBrightness,
}

impl Attribute {
    /// Every attribute.
    pub const ALL: [Attribute; 9] = [
        Attribute::FontSize,
        Attribute::Color,
        Attribute::BackgroundColor,
        Attribute::Gravity,
        Attribute::Gap,
        Attribute::Margin,
        Attribute::Padding,
        Attribute::Brightness,
        Attribute::BackgroundBrightness,
    ];

    /// Looks up an attribute by its declaration name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|attr| attr.name() == name)
    }

    /// The declaration name.
    pub const fn name(self) -> &'static str {
        match self {
            Attribute::FontSize => "font_size",
            Attribute::Color => "color",
            Attribute::BackgroundColor => "background_color",
            Attribute::Gravity => "gravity",
            Attribute::Gap => "gap",
            Attribute::Margin => "margin",
            Attribute::Padding => "padding",
            Attribute::Brightness => "brightness",
            Attribute::BackgroundBrightness => "background_brightness",
        }
    }

    /// Human-readable constraint, used in error messages.
    pub const fn expected(self) -> &'static str {
        match self {
            Attribute::FontSize => "one of small, medium, large",
            Attribute::Color | Attribute::BackgroundColor => "a #RRGGBB hex color",
            Attribute::Gravity => "one of {top|center|bottom}-{left|center|right} or center",
            Attribute::Gap | Attribute::Margin | Attribute::Padding => {
                "a non-negative integer number of pixels"
            }
            Attribute::Brightness | Attribute::BackgroundBrightness => {
                "an integer percentage"
            }
        }
    }

    /// Attributes that only matter for gravity placement.
    ///
    /// Elements with explicit coordinates ignore invalid values here.
    pub const fn is_placement_only(self) -> bool {
        matches!(self, Attribute::Gravity | Attribute::Margin)
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Raw attribute value before validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrValue {
    /// A string token (`"top-left"`, `"#FF0000"`, `"large"`).
    Text(String),
    /// An integer (`4`, `-1`).
    Int(i64),
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttrValue::Text(text) => f.write_str(text),
            AttrValue::Int(value) => write!(f, "{value}"),
        }
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        AttrValue::Text(value.to_owned())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        AttrValue::Text(value)
    }
}

impl From<i64> for AttrValue {
    fn from(value: i64) -> Self {
        AttrValue::Int(value)
    }
}

impl From<i32> for AttrValue {
    fn from(value: i32) -> Self {
        AttrValue::Int(i64::from(value))
    }
}

impl From<u32> for AttrValue {
    fn from(value: u32) -> Self {
        AttrValue::Int(i64::from(value))
    }
}

/// A declaration whose value failed its constraint (or whose name is unknown).
///
/// Kept in the [`RuleSet`] it came from and reported when an element
/// actually resolves through that rule set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclarationFault {
    /// Name as written.
    pub name: String,

    /// The attribute, if the name is known.
    pub attribute: Option<Attribute>,

    /// Offending value, as written.
    pub value: String,
}

/// Any subset of style attributes.
///
/// One cascade layer: stylesheet defaults, one class, or an element's
/// overrides. Absent fields leave the accumulator untouched when overlaid.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct PartialStyle {
    /// Font preset.
    pub font_size: Option<FontSize>,

    /// Text color.
    pub color: Option<Color>,

    /// Background fill.
    pub background_color: Option<Color>,

    /// Anchor position.
    pub gravity: Option<Gravity>,

    /// Spacing from the previous element in the same stack.
    pub gap: Option<u32>,

    /// Spacing from the container edge.
    pub margin: Option<u32>,

    /// Inset of the background box.
    pub padding: Option<u32>,

    /// Text brightness.
    pub brightness: Option<Brightness>,

    /// Background brightness.
    pub background_brightness: Option<Brightness>,
}

impl PartialStyle {
    /// An empty layer.
    pub const fn new() -> Self {
        Self {
            font_size: None,
            color: None,
            background_color: None,
            gravity: None,
            gap: None,
            margin: None,
            padding: None,
            brightness: None,
            background_brightness: None,
        }
    }

    /// Builder method to set font size.
    pub const fn font_size(mut self, font_size: FontSize) -> Self {
        self.font_size = Some(font_size);
        self
    }

    /// Builder method to set color.
    pub const fn color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    /// Builder method to set background color.
    pub const fn background_color(mut self, color: Color) -> Self {
        self.background_color = Some(color);
        self
    }

    /// Builder method to set gravity.
    pub const fn gravity(mut self, gravity: Gravity) -> Self {
        self.gravity = Some(gravity);
        self
    }

    /// Builder method to set gap.
    pub const fn gap(mut self, gap: u32) -> Self {
        self.gap = Some(gap);
        self
    }

    /// Builder method to set margin.
    pub const fn margin(mut self, margin: u32) -> Self {
        self.margin = Some(margin);
        self
    }

    /// Builder method to set padding.
    pub const fn padding(mut self, padding: u32) -> Self {
        self.padding = Some(padding);
        self
    }

    /// Builder method to set brightness.
    pub const fn brightness(mut self, brightness: Brightness) -> Self {
        self.brightness = Some(brightness);
        self
    }

    /// Builder method to set background brightness.
    pub const fn background_brightness(mut self, brightness: Brightness) -> Self {
        self.background_brightness = Some(brightness);
        self
    }

    /// Returns `true` if no attribute is set.
    pub fn is_empty(&self) -> bool {
        *self == Self::new()
    }

    /// Writes every attribute present in `layer` over `self`.
    pub fn overlay(&mut self, layer: &PartialStyle) {
        fn take<T: Copy>(slot: &mut Option<T>, value: Option<T>) {
            if value.is_some() {
                *slot = value;
            }
        }

        take(&mut self.font_size, layer.font_size);
        take(&mut self.color, layer.color);
        take(&mut self.background_color, layer.background_color);
        take(&mut self.gravity, layer.gravity);
        take(&mut self.gap, layer.gap);
        take(&mut self.margin, layer.margin);
        take(&mut self.padding, layer.padding);
        take(&mut self.brightness, layer.brightness);
        take(&mut self.background_brightness, layer.background_brightness);
    }

    /// Validates `value` against `attribute`'s constraint and stores it.
    ///
    /// # Errors
    ///
    /// Returns the rejected declaration if the value does not satisfy the
    /// attribute's constraint; `self` is left unchanged.
    pub fn set(&mut self, attribute: Attribute, value: &AttrValue) -> Result<(), DeclarationFault> {
        let fault = || DeclarationFault {
            name: attribute.name().to_owned(),
            attribute: Some(attribute),
            value: value.to_string(),
        };

        match (attribute, value) {
            (Attribute::FontSize, AttrValue::Text(token)) => {
                self.font_size = Some(FontSize::from_token(token).ok_or_else(fault)?);
            }
            (Attribute::Gravity, AttrValue::Text(token)) => {
                self.gravity = Some(Gravity::from_token(token).ok_or_else(fault)?);
            }
            (Attribute::Color, AttrValue::Text(hex)) => {
                self.color = Some(Color::from_hex(hex).ok_or_else(fault)?);
            }
            (Attribute::BackgroundColor, AttrValue::Text(hex)) => {
                self.background_color = Some(Color::from_hex(hex).ok_or_else(fault)?);
            }
            (Attribute::Gap, AttrValue::Int(px)) => {
                self.gap = Some(u32::try_from(*px).map_err(|_| fault())?);
            }
            (Attribute::Margin, AttrValue::Int(px)) => {
                self.margin = Some(u32::try_from(*px).map_err(|_| fault())?);
            }
            (Attribute::Padding, AttrValue::Int(px)) => {
                self.padding = Some(u32::try_from(*px).map_err(|_| fault())?);
            }
            (Attribute::Brightness, AttrValue::Int(percent)) => {
                self.brightness = Some(Brightness::from_i64(*percent));
            }
            (Attribute::BackgroundBrightness, AttrValue::Int(percent)) => {
                self.background_brightness = Some(Brightness::from_i64(*percent));
            }
            _ => return Err(fault()),
        }

        Ok(())
    }
}

/// A parsed declaration block: the valid attributes plus every rejected one.
///
/// Rejections are not errors yet. They surface when an element resolves
/// through this block, so one bad class only fails the elements using it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleSet {
    style: PartialStyle,
    faults: Vec<DeclarationFault>,
}

impl RuleSet {
    /// An empty rule set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a known attribute, recording a fault if the value is invalid.
    pub fn declare(&mut self, attribute: Attribute, value: &AttrValue) {
        if let Err(fault) = self.style.set(attribute, value) {
            self.faults.push(fault);
        }
    }

    /// Declares an attribute by name. Unknown names are recorded as faults.
    pub fn declare_named(&mut self, name: &str, value: &AttrValue) {
        match Attribute::from_name(name) {
            Some(attribute) => self.declare(attribute, value),
            None => self.faults.push(DeclarationFault {
                name: name.to_owned(),
                attribute: None,
                value: value.to_string(),
            }),
        }
    }

    /// Overlays already-typed attributes.
    pub fn extend(&mut self, style: &PartialStyle) {
        self.style.overlay(style);
    }

    /// The valid attributes.
    pub fn style(&self) -> &PartialStyle {
        &self.style
    }

    /// Rejected declarations, in declaration order.
    pub fn faults(&self) -> &[DeclarationFault] {
        &self.faults
    }

    /// Returns `true` if nothing was declared.
    pub fn is_empty(&self) -> bool {
        self.style.is_empty() && self.faults.is_empty()
    }
}

impl From<PartialStyle> for RuleSet {
    fn from(style: PartialStyle) -> Self {
        Self {
            style,
            faults: Vec::new(),
        }
    }
}

/// Fully populated style, ready for layout.
///
/// Only `background_color` may be absent (no fill).
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ResolvedStyle {
    /// Font preset.
    pub font_size: FontSize,

    /// Text color as declared (before brightness).
    pub color: Color,

    /// Background fill, `None` for transparent.
    pub background_color: Option<Color>,

    /// Anchor position.
    pub gravity: Gravity,

    /// Spacing from the previous element in the same stack.
    pub gap: u32,

    /// Spacing from the container edge.
    pub margin: u32,

    /// Inset of the background box.
    pub padding: u32,

    /// Text brightness.
    pub brightness: Brightness,

    /// Background brightness (inherits `brightness` unless declared).
    pub background_brightness: Brightness,
}

impl ResolvedStyle {
    /// Built-in defaults, the bottom of every cascade.
    pub const DEFAULT: ResolvedStyle = ResolvedStyle {
        font_size: FontSize::Medium,
        color: Color::WHITE,
        background_color: None,
        gravity: Gravity::Center,
        gap: 0,
        margin: 0,
        padding: 0,
        brightness: Brightness::FULL,
        background_brightness: Brightness::FULL,
    };

    /// Fills every attribute absent from `cascade` with its built-in default.
    pub fn from_partial(cascade: &PartialStyle) -> Self {
        let brightness = cascade.brightness.unwrap_or(Self::DEFAULT.brightness);

        Self {
            font_size: cascade.font_size.unwrap_or(Self::DEFAULT.font_size),
            color: cascade.color.unwrap_or(Self::DEFAULT.color),
            background_color: cascade.background_color,
            gravity: cascade.gravity.unwrap_or(Self::DEFAULT.gravity),
            gap: cascade.gap.unwrap_or(Self::DEFAULT.gap),
            margin: cascade.margin.unwrap_or(Self::DEFAULT.margin),
            padding: cascade.padding.unwrap_or(Self::DEFAULT.padding),
            brightness,
            background_brightness: cascade.background_brightness.unwrap_or(brightness),
        }
    }

    /// Text color after brightness.
    pub fn display_color(&self) -> Rgb888 {
        self.color.scaled(self.brightness)
    }

    /// Background fill after brightness, if any.
    pub fn display_background(&self) -> Option<Rgb888> {
        self.background_color
            .map(|color| color.scaled(self.background_brightness))
    }
}

impl Default for ResolvedStyle {
    fn default() -> Self {
        Self::DEFAULT
    }
}
