//! Template arguments and their coercion from loosely-typed input.
//!
//! Callers can build [`TemplateOptions`] directly, or hand over a keyword map
//! (from a YAML/JSON file, or any serializable value) and let
//! [`TemplateOptions::from_value`] coerce tuples, booleans and foreign
//! objects into canonical shapes.

use crate::error::{ThemeError, ThemeResult};
use serde::Serialize;
use serde_json::{Map, Value};

/// Matplotlib figure sizes are in inches; charts are sized at 80 px per inch.
pub const FIGSIZE_SCALE: f64 = 80.0;

/// Keys of a 4-element margin tuple.
const MARGIN_KEYS: [&str; 4] = ["l", "r", "b", "t"];

/// Keys accepted by [`TemplateOptions::from_value`].
pub const VALID_TEMPLATE_KWARGS: [&str; 12] = [
    "theme",
    "layout",
    "legend",
    "hovermode",
    "annotations",
    "shapes",
    "title",
    "dimensions",
    "figsize",
    "width",
    "height",
    "margin",
];

/// Theme selection: a built-in name or an inline theme object.
#[derive(Debug, Clone, PartialEq)]
pub enum ThemeSpec {
    Named(String),
    Inline(Value),
}

/// Legend toggle or a full legend object.
#[derive(Debug, Clone, PartialEq)]
pub enum Legend {
    Visible(bool),
    Custom(Map<String, Value>),
}

/// Hover behaviour: a plotting-library mode (`x`, `y`, `closest`) or disabled.
#[derive(Debug, Clone, PartialEq)]
pub enum Hovermode {
    Mode(String),
    Off,
}

impl Hovermode {
    pub fn to_value(&self) -> Value {
        match self {
            Hovermode::Mode(mode) => Value::String(mode.clone()),
            Hovermode::Off => Value::Bool(false),
        }
    }
}

/// Arguments to [`crate::template::get_template`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TemplateOptions {
    pub theme: Option<ThemeSpec>,
    /// Plotting-library layout merged last, overriding everything else.
    pub layout: Option<Map<String, Value>>,
    pub legend: Option<Legend>,
    pub hovermode: Option<Hovermode>,
    pub annotations: Option<Vec<Value>>,
    pub shapes: Option<Vec<Value>>,
    pub title: Option<String>,
    /// `(width, height)` in pixels.
    pub dimensions: Option<(u32, u32)>,
    /// `figsize` already scaled to pixels; wins over `dimensions`.
    pub figsize: Option<(u32, u32)>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub margin: Option<Map<String, Value>>,
}

impl TemplateOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_theme(mut self, name: impl Into<String>) -> Self {
        self.theme = Some(ThemeSpec::Named(name.into()));
        self
    }

    pub fn with_inline_theme(mut self, theme: Value) -> Self {
        self.theme = Some(ThemeSpec::Inline(theme));
        self
    }

    /// Custom layout from any value that serializes to a mapping.
    pub fn with_layout<T: Serialize + ?Sized>(mut self, layout: &T) -> ThemeResult<Self> {
        self.layout = Some(coerce_mapping("layout", layout)?);
        Ok(self)
    }

    pub fn with_legend(mut self, legend: Legend) -> Self {
        self.legend = Some(legend);
        self
    }

    pub fn with_hovermode(mut self, hovermode: Hovermode) -> Self {
        self.hovermode = Some(hovermode);
        self
    }

    pub fn with_annotations<T: Serialize + ?Sized>(mut self, annotations: &T) -> ThemeResult<Self> {
        self.annotations = Some(coerce_sequence("annotations", annotations)?);
        Ok(self)
    }

    pub fn with_shapes<T: Serialize + ?Sized>(mut self, shapes: &T) -> ThemeResult<Self> {
        self.shapes = Some(coerce_sequence("shapes", shapes)?);
        Ok(self)
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_dimensions(mut self, width: u32, height: u32) -> Self {
        self.dimensions = Some((width, height));
        self
    }

    /// Matplotlib-style size in inches.
    pub fn with_figsize(mut self, width: f64, height: f64) -> ThemeResult<Self> {
        self.figsize = Some(figsize_to_dimensions(width, height)?);
        Ok(self)
    }

    pub fn with_width(mut self, width: u32) -> Self {
        self.width = Some(width);
        self
    }

    pub fn with_height(mut self, height: u32) -> Self {
        self.height = Some(height);
        self
    }

    /// Margin from a mapping or a 4/5-element `(l, r, b, t[, pad])` sequence.
    pub fn with_margin<T: Serialize + ?Sized>(mut self, margin: &T) -> ThemeResult<Self> {
        let value = serde_json::to_value(margin)
            .map_err(|_| ThemeError::invalid_argument("margin", "<unserializable>"))?;
        self.margin = Some(coerce_margin(&value)?);
        Ok(self)
    }

    /// Pixel size to apply: `figsize` if given, else `dimensions`.
    pub fn resolved_dimensions(&self) -> Option<(u32, u32)> {
        self.figsize.or(self.dimensions)
    }

    /// Coerce a keyword map into options.
    ///
    /// Null values count as absent.
    pub fn from_value(value: &Value) -> ThemeResult<Self> {
        let kwargs = value
            .as_object()
            .ok_or_else(|| ThemeError::invalid_argument("options", value))?;

        let mut options = Self::default();

        for (key, value) in kwargs {
            if value.is_null() {
                continue;
            }
            match key.as_str() {
                "theme" => options.theme = Some(coerce_theme(value)?),
                "layout" => options.layout = Some(coerce_mapping("layout", value)?),
                "legend" => options.legend = Some(coerce_legend(value)?),
                "hovermode" => options.hovermode = Some(coerce_hovermode(value)?),
                "annotations" => {
                    options.annotations = Some(coerce_sequence("annotations", value)?)
                }
                "shapes" => options.shapes = Some(coerce_sequence("shapes", value)?),
                "title" => {
                    let title = value
                        .as_str()
                        .ok_or_else(|| ThemeError::invalid_argument("title", value))?;
                    options.title = Some(title.to_string());
                }
                "dimensions" => options.dimensions = Some(coerce_dimensions(value)?),
                "figsize" => options.figsize = Some(coerce_figsize(value)?),
                "width" => options.width = Some(coerce_pixels("width", value)?),
                "height" => options.height = Some(coerce_pixels("height", value)?),
                "margin" => options.margin = Some(coerce_margin(value)?),
                other => return Err(ThemeError::invalid_keyword("options", other)),
            }
        }

        Ok(options)
    }
}

/// Coerce any value serializing to an object into a plain mapping.
pub fn coerce_mapping<T: Serialize + ?Sized>(name: &str, value: &T) -> ThemeResult<Map<String, Value>> {
    match serde_json::to_value(value) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(ThemeError::invalid_argument(name, other)),
        Err(_) => Err(ThemeError::invalid_argument(name, "<unserializable>")),
    }
}

/// Coerce any value serializing to an array into a plain list.
pub fn coerce_sequence<T: Serialize + ?Sized>(name: &str, value: &T) -> ThemeResult<Vec<Value>> {
    match serde_json::to_value(value) {
        Ok(Value::Array(items)) => Ok(items),
        Ok(other) => Err(ThemeError::invalid_argument(name, other)),
        Err(_) => Err(ThemeError::invalid_argument(name, "<unserializable>")),
    }
}

/// Convert a matplotlib figure size in inches to pixel dimensions.
pub fn figsize_to_dimensions(width: f64, height: f64) -> ThemeResult<(u32, u32)> {
    let scale = |inches: f64| -> Option<u32> {
        let pixels = (inches * FIGSIZE_SCALE).round();
        (pixels.is_finite() && pixels >= 0.0 && pixels <= u32::MAX as f64).then_some(pixels as u32)
    };
    match (scale(width), scale(height)) {
        (Some(w), Some(h)) => Ok((w, h)),
        _ => Err(ThemeError::invalid_argument(
            "figsize",
            format_args!("({}, {})", width, height),
        )),
    }
}

/// Margin from a mapping, a 4-tuple `(l, r, b, t)` or a 5-tuple `(l, r, b, t, pad)`.
pub fn coerce_margin(value: &Value) -> ThemeResult<Map<String, Value>> {
    match value {
        Value::Object(map) => Ok(map.clone()),
        Value::Array(items) if items.len() == 4 || items.len() == 5 => {
            if !items.iter().all(Value::is_number) {
                return Err(ThemeError::invalid_argument("margin", value));
            }
            Ok(MARGIN_KEYS
                .iter()
                .copied()
                .chain(std::iter::once("pad"))
                .zip(items.iter().cloned())
                .map(|(key, item)| (key.to_string(), item))
                .collect())
        }
        _ => Err(ThemeError::invalid_argument("margin", value)),
    }
}

fn coerce_theme(value: &Value) -> ThemeResult<ThemeSpec> {
    match value {
        Value::String(name) => Ok(ThemeSpec::Named(name.clone())),
        Value::Object(_) => Ok(ThemeSpec::Inline(value.clone())),
        _ => Err(ThemeError::invalid_theme(value)),
    }
}

fn coerce_legend(value: &Value) -> ThemeResult<Legend> {
    match value {
        Value::Bool(visible) => Ok(Legend::Visible(*visible)),
        Value::Object(map) => Ok(Legend::Custom(map.clone())),
        _ => Err(ThemeError::invalid_argument("legend", value)),
    }
}

fn coerce_hovermode(value: &Value) -> ThemeResult<Hovermode> {
    match value {
        Value::String(mode) => Ok(Hovermode::Mode(mode.clone())),
        Value::Bool(false) => Ok(Hovermode::Off),
        _ => Err(ThemeError::invalid_argument("hovermode", value)),
    }
}

fn coerce_pixels(name: &str, value: &Value) -> ThemeResult<u32> {
    value
        .as_u64()
        .and_then(|n| u32::try_from(n).ok())
        .ok_or_else(|| ThemeError::invalid_argument(name, value))
}

fn coerce_dimensions(value: &Value) -> ThemeResult<(u32, u32)> {
    match value.as_array().map(Vec::as_slice) {
        Some([width, height]) => {
            let pixels = |v: &Value| v.as_u64().and_then(|n| u32::try_from(n).ok());
            match (pixels(width), pixels(height)) {
                (Some(w), Some(h)) => Ok((w, h)),
                _ => Err(ThemeError::invalid_argument("dimensions", value)),
            }
        }
        _ => Err(ThemeError::invalid_argument("dimensions", value)),
    }
}

fn coerce_figsize(value: &Value) -> ThemeResult<(u32, u32)> {
    match value.as_array().map(Vec::as_slice) {
        Some([width, height]) => match (width.as_f64(), height.as_f64()) {
            (Some(w), Some(h)) => figsize_to_dimensions(w, h),
            _ => Err(ThemeError::invalid_argument("figsize", value)),
        },
        _ => Err(ThemeError::invalid_argument("figsize", value)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use serde_json::json;
    use std::collections::BTreeMap;

    #[test]
    fn test_from_value_full() {
        let options = TemplateOptions::from_value(&json!({
            "theme": "dark",
            "title": "AAPL",
            "legend": true,
            "hovermode": "closest",
            "width": 900,
            "margin": [10, 20, 30, 40]
        }))
        .unwrap();

        assert_eq!(options.theme, Some(ThemeSpec::Named("dark".into())));
        assert_eq!(options.title.as_deref(), Some("AAPL"));
        assert_eq!(options.legend, Some(Legend::Visible(true)));
        assert_eq!(options.hovermode, Some(Hovermode::Mode("closest".into())));
        assert_eq!(options.width, Some(900));
        assert_eq!(
            Value::Object(options.margin.unwrap()),
            json!({"l": 10, "r": 20, "b": 30, "t": 40})
        );
    }

    #[test]
    fn test_unknown_keyword_rejected() {
        let err = TemplateOptions::from_value(&json!({"colour": "red"})).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidKeyword);
        assert_eq!(err.to_string(), "Invalid keyword 'colour'.");
    }

    #[test]
    fn test_non_object_rejected() {
        assert!(TemplateOptions::from_value(&json!([1, 2])).is_err());
    }

    #[test]
    fn test_null_values_are_absent() {
        let options = TemplateOptions::from_value(&json!({"title": null, "width": null})).unwrap();
        assert_eq!(options, TemplateOptions::default());
    }

    #[test]
    fn test_figsize_scaled_and_wins_over_dimensions() {
        let options = TemplateOptions::from_value(&json!({
            "figsize": [10, 6.5],
            "dimensions": [100, 100]
        }))
        .unwrap();
        assert_eq!(options.figsize, Some((800, 520)));
        assert_eq!(options.dimensions, Some((100, 100)));
        assert_eq!(options.resolved_dimensions(), Some((800, 520)));
    }

    #[test]
    fn test_figsize_wins_regardless_of_builder_order() {
        let figsize_first = TemplateOptions::new()
            .with_figsize(10.0, 6.0)
            .unwrap()
            .with_dimensions(100, 100);
        let dimensions_first = TemplateOptions::new()
            .with_dimensions(100, 100)
            .with_figsize(10.0, 6.0)
            .unwrap();
        assert_eq!(figsize_first.resolved_dimensions(), Some((800, 480)));
        assert_eq!(dimensions_first.resolved_dimensions(), Some((800, 480)));
        assert_eq!(
            TemplateOptions::new().with_dimensions(100, 100).resolved_dimensions(),
            Some((100, 100))
        );
    }

    #[test]
    fn test_dimensions_require_two_elements() {
        assert_eq!(
            TemplateOptions::from_value(&json!({"dimensions": [640, 480]}))
                .unwrap()
                .dimensions,
            Some((640, 480))
        );
        for bad in [json!([640]), json!([640, 480, 1]), json!("640x480"), json!([-1, 2])] {
            let err = TemplateOptions::from_value(&json!({ "dimensions": bad })).unwrap_err();
            assert_eq!(err.field.as_deref(), Some("dimensions"));
        }
    }

    #[test]
    fn test_negative_figsize_rejected() {
        assert!(figsize_to_dimensions(-1.0, 4.0).is_err());
        assert!(figsize_to_dimensions(f64::NAN, 4.0).is_err());
    }

    #[test]
    fn test_margin_five_tuple_adds_pad() {
        let margin = coerce_margin(&json!([1, 2, 3, 4, 5])).unwrap();
        assert_eq!(
            Value::Object(margin),
            json!({"l": 1, "r": 2, "b": 3, "t": 4, "pad": 5})
        );
    }

    #[test]
    fn test_margin_bad_shapes() {
        assert!(coerce_margin(&json!([1, 2, 3])).is_err());
        assert!(coerce_margin(&json!([1, 2, 3, "x"])).is_err());
        let err = coerce_margin(&json!(12)).unwrap_err();
        assert_eq!(err.to_string(), "Invalid margin '12'.");
    }

    #[test]
    fn test_hovermode_false_and_true() {
        let options = TemplateOptions::from_value(&json!({"hovermode": false})).unwrap();
        assert_eq!(options.hovermode, Some(Hovermode::Off));
        assert!(TemplateOptions::from_value(&json!({"hovermode": true})).is_err());
    }

    #[test]
    fn test_legend_object() {
        let options = TemplateOptions::from_value(&json!({"legend": {"x": 0.5}})).unwrap();
        match options.legend {
            Some(Legend::Custom(map)) => assert_eq!(map["x"], 0.5),
            other => panic!("unexpected legend {other:?}"),
        }
        assert!(TemplateOptions::from_value(&json!({"legend": "yes"})).is_err());
    }

    #[test]
    fn test_inline_theme_and_bad_theme() {
        let options = TemplateOptions::from_value(&json!({"theme": {"colors": {}}})).unwrap();
        assert!(matches!(options.theme, Some(ThemeSpec::Inline(_))));
        let err = TemplateOptions::from_value(&json!({"theme": 3})).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidTheme);
    }

    #[test]
    fn test_title_must_be_string() {
        let err = TemplateOptions::from_value(&json!({"title": 42})).unwrap_err();
        assert_eq!(err.to_string(), "Invalid title '42'.");
    }

    #[derive(Serialize)]
    struct Annotation {
        text: &'static str,
        x: u32,
    }

    #[test]
    fn test_foreign_objects_coerced() {
        let mut layout = BTreeMap::new();
        layout.insert("title", "Foreign");
        let options = TemplateOptions::new()
            .with_layout(&layout)
            .unwrap()
            .with_annotations(&[Annotation { text: "peak", x: 3 }])
            .unwrap()
            .with_margin(&(5, 6, 7, 8))
            .unwrap();

        assert_eq!(options.layout.unwrap()["title"], "Foreign");
        assert_eq!(options.annotations.unwrap()[0]["text"], "peak");
        assert_eq!(options.margin.unwrap()["t"], 8);
    }

    #[test]
    fn test_foreign_wrong_shape_rejected() {
        let err = TemplateOptions::new().with_layout(&vec![1, 2]).unwrap_err();
        assert_eq!(err.field.as_deref(), Some("layout"));
        assert!(TemplateOptions::new().with_shapes(&json!({"a": 1})).is_err());
    }
}
