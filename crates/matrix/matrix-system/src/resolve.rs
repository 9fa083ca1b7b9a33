//! Style cascade.
//!
//! Layers are merged in a fixed order, each one overwriting individual
//! attributes of the accumulator:
//!
//! 1. built-in defaults ([`ResolvedStyle::DEFAULT`])
//! 2. the stylesheet's `defaults` layer
//! 3. every class in `element.classes`, in the order listed
//! 4. `element.style_overrides`
//!
//! Precedence depends only on this order, never on class names or on the
//! order rules appear in the stylesheet.

use crate::element::Element;
use crate::error::{Layer, ValidationError};
use crate::sheet::StyleSheet;
use crate::style::{DeclarationFault, PartialStyle, ResolvedStyle, RuleSet};

/// Outcome of a successful resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// The fully populated style.
    pub style: ResolvedStyle,

    /// Class references with no rule in the stylesheet, as written.
    pub unknown_classes: Vec<String>,
}

/// Resolves element styles against one stylesheet.
///
/// # Example
///
/// ```
/// use matrix_system::element::Element;
/// use matrix_system::resolve::StyleResolver;
/// use matrix_system::sheet::StyleSheet;
/// use matrix_system::style::*;
///
/// let sheet = StyleSheet::new()
///     .with_class("highlight", PartialStyle::new().color(Color::new(0, 255, 0)))
///     .with_class("bold", PartialStyle::new().font_size(FontSize::Large));
///
/// let element = Element::new("12:34").classes(["highlight", "bold"]);
/// let style = StyleResolver::new(&sheet).resolve(&element).unwrap();
///
/// assert_eq!(style.color, Color::new(0, 255, 0));
/// assert_eq!(style.font_size, FontSize::Large);
/// ```
#[derive(Debug, Copy, Clone)]
pub struct StyleResolver<'s> {
    sheet: &'s StyleSheet,
}

impl<'s> StyleResolver<'s> {
    /// Creates a resolver over `sheet`.
    pub const fn new(sheet: &'s StyleSheet) -> Self {
        Self { sheet }
    }

    /// Resolves `element`'s style.
    ///
    /// Unknown classes are skipped (and logged); use
    /// [`resolve_detailed`](Self::resolve_detailed) to collect them.
    ///
    /// # Errors
    ///
    /// The first invalid declaration met in cascade order, as a
    /// [`ValidationError`] naming its layer.
    pub fn resolve(&self, element: &Element) -> Result<ResolvedStyle, ValidationError> {
        self.resolve_detailed(element).map(|resolution| resolution.style)
    }

    /// Resolves `element`'s style and reports the class references that
    /// matched no rule.
    ///
    /// # Errors
    ///
    /// As [`resolve`](Self::resolve).
    pub fn resolve_detailed(&self, element: &Element) -> Result<Resolution, ValidationError> {
        let explicit = element.has_explicit_position();
        let mut cascade = PartialStyle::new();
        let mut unknown_classes = Vec::new();

        apply(&mut cascade, Layer::Defaults, self.sheet.defaults(), explicit)?;

        for reference in &element.classes {
            match self.sheet.class(reference) {
                Some(rules) => {
                    let name = reference.strip_prefix('.').unwrap_or(reference);
                    apply(&mut cascade, Layer::Class(name.to_owned()), rules, explicit)?;
                }
                None => {
                    tracing::warn!(class = %reference, text = %element.text, "unknown class skipped");
                    unknown_classes.push(reference.clone());
                }
            }
        }

        apply(&mut cascade, Layer::Override, &element.style_overrides, explicit)?;

        Ok(Resolution {
            style: ResolvedStyle::from_partial(&cascade),
            unknown_classes,
        })
    }
}

/// Overlays one layer, failing on its first fault that matters.
fn apply(
    cascade: &mut PartialStyle,
    layer: Layer,
    rules: &RuleSet,
    explicit: bool,
) -> Result<(), ValidationError> {
    let relevant = rules.faults().iter().find(|fault| {
        !(explicit && fault.attribute.is_some_and(|attribute| attribute.is_placement_only()))
    });
    if let Some(fault) = relevant {
        return Err(to_error(layer, fault));
    }

    cascade.overlay(rules.style());
    Ok(())
}

fn to_error(layer: Layer, fault: &DeclarationFault) -> ValidationError {
    match fault.attribute {
        Some(attribute) => ValidationError::InvalidValue {
            layer,
            attribute,
            value: fault.value.clone(),
        },
        None => ValidationError::UnknownAttribute {
            layer,
            name: fault.name.clone(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::{Attribute, Brightness, Color, FontSize, Gravity};

    fn time_display() -> PartialStyle {
        PartialStyle::new()
            .font_size(FontSize::Large)
            .color(Color::new(0xFF, 0xFF, 0x80))
            .gravity(Gravity::TopCenter)
    }

    fn clock_sheet() -> StyleSheet {
        StyleSheet::new()
            .with_class("time-display", time_display())
            .with_class("highlight", PartialStyle::new().color(Color::new(0x00, 0xFF, 0x00)))
            .with_class("bold", PartialStyle::new().font_size(FontSize::Large))
    }

    #[test]
    fn test_single_class() {
        let sheet = clock_sheet();
        let style = StyleResolver::new(&sheet)
            .resolve(&Element::new("12:34").class("time-display"))
            .unwrap();

        assert_eq!(style.font_size, FontSize::Large);
        assert_eq!(style.color, Color::new(0xFF, 0xFF, 0x80));
        assert_eq!(style.gravity, Gravity::TopCenter);
        assert_eq!(style.background_color, None);
        assert_eq!((style.gap, style.margin, style.padding), (0, 0, 0));
    }

    #[test]
    fn test_overrides_win() {
        let sheet = clock_sheet();
        let element = Element::new("12:34")
            .class("time-display")
            .with_override("color", "#FF0000")
            .with_override("font_size", "small")
            .with_override("gravity", "top-left");
        let style = StyleResolver::new(&sheet).resolve(&element).unwrap();

        assert_eq!(style.color, Color::new(0xFF, 0x00, 0x00));
        assert_eq!(style.font_size, FontSize::Small);
        assert_eq!(style.gravity, Gravity::TopLeft);
        assert_eq!(style.background_color, None);
        assert_eq!((style.gap, style.margin, style.padding), (0, 0, 0));
    }

    #[test]
    fn test_class_order_decides() {
        let sheet = clock_sheet();
        let resolver = StyleResolver::new(&sheet);

        let style = resolver
            .resolve(&Element::new("x").classes(["time-display", "highlight", "bold"]))
            .unwrap();
        assert_eq!(style.color, Color::new(0x00, 0xFF, 0x00));
        assert_eq!(style.font_size, FontSize::Large);
        assert_eq!(style.gravity, Gravity::TopCenter);

        let style = resolver
            .resolve(&Element::new("x").classes(["highlight", "time-display"]))
            .unwrap();
        assert_eq!(style.color, Color::new(0xFF, 0xFF, 0x80));
    }

    #[test]
    fn test_defaults_layer_sits_below_classes() {
        let sheet = clock_sheet().with_defaults(
            PartialStyle::new()
                .gap(2)
                .color(Color::BLACK)
                .brightness(Brightness::new(40)),
        );
        let resolver = StyleResolver::new(&sheet);

        let plain = resolver.resolve(&Element::new("x")).unwrap();
        assert_eq!(plain.gap, 2);
        assert_eq!(plain.color, Color::BLACK);
        assert_eq!(plain.background_brightness, Brightness::new(40));

        let styled = resolver.resolve(&Element::new("x").class("highlight")).unwrap();
        assert_eq!(styled.gap, 2);
        assert_eq!(styled.color, Color::new(0x00, 0xFF, 0x00));
    }

    #[test]
    fn test_unknown_class_is_skipped() {
        let sheet = clock_sheet();
        let resolution = StyleResolver::new(&sheet)
            .resolve_detailed(&Element::new("x").classes(["missing", "highlight", ".nope"]))
            .unwrap();

        assert_eq!(resolution.style.color, Color::new(0x00, 0xFF, 0x00));
        assert_eq!(resolution.unknown_classes, ["missing", ".nope"]);
    }

    #[test]
    fn test_dotted_reference() {
        let sheet = clock_sheet();
        let style = StyleResolver::new(&sheet)
            .resolve(&Element::new("x").class(".bold"))
            .unwrap();
        assert_eq!(style.font_size, FontSize::Large);
    }

    #[test]
    fn test_invalid_override_names_attribute_and_value() {
        let sheet = clock_sheet();
        let err = StyleResolver::new(&sheet)
            .resolve(&Element::new("x").with_override("gravity", "diagonal"))
            .unwrap_err();

        assert_eq!(
            err,
            ValidationError::InvalidValue {
                layer: Layer::Override,
                attribute: Attribute::Gravity,
                value: "diagonal".into(),
            }
        );
    }

    #[test]
    fn test_unknown_override_attribute() {
        let sheet = clock_sheet();
        let err = StyleResolver::new(&sheet)
            .resolve(&Element::new("x").with_override("font", "9x18"))
            .unwrap_err();
        assert_eq!(
            err,
            ValidationError::UnknownAttribute {
                layer: Layer::Override,
                name: "font".into(),
            }
        );
    }

    #[test]
    fn test_invalid_class_value_only_fails_its_users() {
        let sheet = StyleSheet::from_json_str(
            r##"{"classes": {".broken": {"color": "red"}, ".fine": {"color": "#102030"}}}"##,
        )
        .unwrap();
        let resolver = StyleResolver::new(&sheet);

        let err = resolver.resolve(&Element::new("x").class("broken")).unwrap_err();
        assert_eq!(err.layer(), Some(&Layer::Class("broken".into())));
        assert_eq!(err.attribute(), Some(Attribute::Color));
        assert_eq!(err.value(), Some("red"));

        assert!(resolver.resolve(&Element::new("x").class("fine")).is_ok());
    }

    #[test]
    fn test_explicit_elements_ignore_bad_placement_values() {
        let sheet = StyleSheet::new();
        let resolver = StyleResolver::new(&sheet);
        let element = Element::new("x")
            .with_override("gravity", "diagonal")
            .with_override("margin", -3);

        assert!(resolver.resolve(&element).is_err());
        assert!(resolver.resolve(&element.clone().at(10, 15)).is_ok());

        let bad_color = Element::new("x").at(10, 15).with_override("color", "red");
        assert!(resolver.resolve(&bad_color).is_err());
    }

    #[test]
    fn test_resolution_is_deterministic() {
        let sheet = clock_sheet();
        let resolver = StyleResolver::new(&sheet);
        let element = Element::new("x").classes(["bold", "highlight"]).with_override("gap", 5);

        assert_eq!(resolver.resolve(&element), resolver.resolve(&element));
    }
}
