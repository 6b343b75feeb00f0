//! Template generation.
//!
//! A template is built by layering a theme onto the skeleton, one component
//! at a time, then applying the caller's [`TemplateOptions`]. Every component
//! is checked against its allow-list both before and after merging.

use crate::config::update;
use crate::error::{ThemeError, ThemeResult};
use crate::options::{Legend, TemplateOptions, ThemeSpec};
use crate::theming::{get_skeleton, get_theme};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

pub const VALID_BASE_COMPONENTS: [&str; 4] =
    ["base_colors", "base_traces", "base_additions", "base_layout"];

pub const VALID_THEME_COMPONENTS: [&str; 4] = ["colors", "traces", "additions", "layout"];

pub const VALID_COLORS: [&str; 12] = [
    "increasing",
    "decreasing",
    "primary",
    "secondary",
    "tertiary",
    "grey",
    "grey_light",
    "grey_strong",
    "fill",
    "fill_light",
    "fill_strong",
    "fillcolor",
];

pub const VALID_TRACES: [&str; 13] = [
    "candlestick",
    "line",
    "line_thin",
    "line_thick",
    "line_dashed",
    "line_dashed_thin",
    "line_dashed_thick",
    "area",
    "area_dashed",
    "area_threshold",
    "scatter",
    "bar",
    "histogram",
];

pub const VALID_ADDITIONS: [&str; 2] = ["xaxis", "yaxis"];

pub const VALID_LAYOUT: [&str; 13] = [
    "title",
    "width",
    "height",
    "autosize",
    "font",
    "margin",
    "hovermode",
    "plot_bgcolor",
    "paper_bgcolor",
    "showlegend",
    "legend",
    "annotations",
    "shapes",
];

/// Derived line styles, all copied from the elementary `line` trace.
const LINE_VARIANTS: [&str; 5] = [
    "line_thin",
    "line_thick",
    "line_dashed",
    "line_dashed_thin",
    "line_dashed_thick",
];

/// Final merged configuration handed to the plotting library.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    pub colors: Map<String, Value>,
    pub traces: Map<String, Value>,
    pub additions: Map<String, Value>,
    pub layout: Map<String, Value>,
}

fn check_keys(component: &str, map: &Map<String, Value>, valid: &[&str]) -> ThemeResult<()> {
    match map.keys().find(|key| !valid.contains(&key.as_str())) {
        Some(key) => Err(ThemeError::invalid_keyword(component, key)),
        None => Ok(()),
    }
}

/// Merge theme colors onto the skeleton colors.
pub fn make_colors(
    mut base_colors: Map<String, Value>,
    colors: Map<String, Value>,
) -> ThemeResult<Map<String, Value>> {
    check_keys("colors", &colors, &VALID_COLORS)?;
    update(&mut base_colors, colors);
    check_keys("colors", &base_colors, &VALID_COLORS)?;
    Ok(base_colors)
}

/// Create the derived traces from the three elementary ones.
fn expand_traces(base_traces: &mut Map<String, Value>) -> ThemeResult<()> {
    let elementary = |name: &str| {
        base_traces
            .get(name)
            .filter(|trace| trace.is_object())
            .cloned()
            .ok_or_else(|| ThemeError::improper_skeleton(format_args!("missing trace '{}'", name)))
    };
    elementary("candlestick")?;
    let line = elementary("line")?;
    let bar = elementary("bar")?;

    for variant in LINE_VARIANTS {
        base_traces.insert(variant.to_string(), line.clone());
    }

    let mut area = line.clone();
    area["fill"] = Value::from("tonexty");
    base_traces.insert("area_dashed".to_string(), area.clone());
    base_traces.insert("area_threshold".to_string(), area.clone());
    base_traces.insert("area".to_string(), area);

    let mut scatter = line;
    scatter["mode"] = Value::from("markers");
    base_traces.insert("scatter".to_string(), scatter);

    base_traces.insert("histogram".to_string(), bar);
    debug!(traces = base_traces.len(), "Expanded elementary traces");
    Ok(())
}

/// Expand the skeleton traces and apply theme styles.
///
/// Theme trace styles are merged into each trace's `line` object.
pub fn make_traces(
    mut base_traces: Map<String, Value>,
    traces: Map<String, Value>,
) -> ThemeResult<Map<String, Value>> {
    check_keys("traces", &traces, &VALID_TRACES)?;
    expand_traces(&mut base_traces)?;

    for (key, style) in traces {
        let style = match style {
            Value::Object(style) => style,
            other => return Err(ThemeError::invalid_argument("trace style", other).with_field(key)),
        };
        // Every allow-listed trace exists once expanded
        let trace = base_traces
            .get_mut(&key)
            .and_then(Value::as_object_mut)
            .ok_or_else(|| ThemeError::improper_skeleton(format_args!("trace '{}' is not an object", key)))?;
        let line = trace
            .entry("line")
            .or_insert_with(|| Value::Object(Map::new()));
        match line {
            Value::Object(line) => update(line, style),
            other => *other = Value::Object(style),
        }
    }

    check_keys("traces", &base_traces, &VALID_TRACES)?;
    Ok(base_traces)
}

/// Merge theme axis additions onto the skeleton additions.
pub fn make_additions(
    mut base_additions: Map<String, Value>,
    additions: Map<String, Value>,
) -> ThemeResult<Map<String, Value>> {
    check_keys("additions", &additions, &VALID_ADDITIONS)?;
    update(&mut base_additions, additions);
    check_keys("additions", &base_additions, &VALID_ADDITIONS)?;
    Ok(base_additions)
}

/// Merge the theme layout onto the skeleton layout and apply the caller's
/// layout options.
///
/// The custom layout in `options.layout` is merged last and is not checked
/// against the layout allow-list: it is passed through to the plotting
/// library as given.
pub fn make_layout(
    mut base_layout: Map<String, Value>,
    layout: Map<String, Value>,
    options: &TemplateOptions,
) -> ThemeResult<Map<String, Value>> {
    check_keys("layout", &layout, &VALID_LAYOUT)?;
    update(&mut base_layout, layout);

    match &options.legend {
        Some(Legend::Visible(visible)) => {
            base_layout.insert("showlegend".to_string(), Value::Bool(*visible));
        }
        Some(Legend::Custom(legend)) => {
            base_layout.insert("showlegend".to_string(), Value::Bool(true));
            base_layout.insert("legend".to_string(), Value::Object(legend.clone()));
        }
        None => {}
    }

    if let Some(hovermode) = &options.hovermode {
        base_layout.insert("hovermode".to_string(), hovermode.to_value());
    }

    // Empty annotations, shapes or title leave the theme's value alone
    if let Some(annotations) = options.annotations.as_ref().filter(|a| !a.is_empty()) {
        base_layout.insert("annotations".to_string(), Value::Array(annotations.clone()));
    }

    if let Some(shapes) = options.shapes.as_ref().filter(|s| !s.is_empty()) {
        base_layout.insert("shapes".to_string(), Value::Array(shapes.clone()));
    }

    if let Some(title) = options.title.as_deref().filter(|t| !t.is_empty()) {
        base_layout.insert("title".to_string(), Value::from(title));
    }

    let dimensions = options.resolved_dimensions();
    if dimensions.is_some() || options.width.is_some() || options.height.is_some() {
        base_layout.insert("autosize".to_string(), Value::Bool(false));
    }

    if let Some((width, height)) = dimensions {
        base_layout.insert("width".to_string(), Value::from(width));
        base_layout.insert("height".to_string(), Value::from(height));
    }

    if let Some(height) = options.height {
        base_layout.insert("height".to_string(), Value::from(height));
    }

    if let Some(width) = options.width {
        base_layout.insert("width".to_string(), Value::from(width));
    }

    if let Some(margin) = &options.margin {
        base_layout.insert("margin".to_string(), Value::Object(margin.clone()));
    }

    check_keys("layout", &base_layout, &VALID_LAYOUT)?;

    if let Some(custom_layout) = &options.layout {
        update(&mut base_layout, custom_layout.clone());
    }

    Ok(base_layout)
}

/// Take the named components out of `source`, which must be an object
/// holding all of them as objects.
fn split_components<const N: usize>(
    source: Value,
    names: [&str; N],
    err: impl Fn() -> ThemeError,
) -> ThemeResult<[Map<String, Value>; N]> {
    let Value::Object(mut source) = source else {
        return Err(err());
    };
    let mut parts = Vec::with_capacity(N);
    for name in names {
        match source.remove(name) {
            Some(Value::Object(part)) => parts.push(part),
            _ => return Err(err()),
        }
    }
    parts.try_into().map_err(|_| err())
}

/// Generate the colors, traces, additions and layout of a template.
///
/// Without a theme in `options`, `default_theme` (normally the configured
/// theme) is used.
pub fn get_template(options: &TemplateOptions, default_theme: &str) -> ThemeResult<Template> {
    let skeleton = get_skeleton()?;

    let theme = match &options.theme {
        Some(ThemeSpec::Named(name)) => get_theme(name)?,
        Some(ThemeSpec::Inline(theme)) => theme.clone(),
        None => get_theme(default_theme)?,
    };
    let theme_label = match &options.theme {
        Some(ThemeSpec::Named(name)) => name.clone(),
        Some(ThemeSpec::Inline(_)) => "<inline>".to_string(),
        None => default_theme.to_string(),
    };
    debug!(theme = %theme_label, "Building template");

    let [base_colors, base_traces, base_additions, base_layout] =
        split_components(skeleton, VALID_BASE_COMPONENTS, || {
            ThemeError::improper_skeleton("missing base components")
        })?;
    let [colors, traces, additions, layout] =
        split_components(theme, VALID_THEME_COMPONENTS, || {
            ThemeError::improper_theme(&theme_label)
        })?;

    Ok(Template {
        colors: make_colors(base_colors, colors)?,
        traces: make_traces(base_traces, traces)?,
        additions: make_additions(base_additions, additions)?,
        layout: make_layout(base_layout, layout, options)?,
    })
}
