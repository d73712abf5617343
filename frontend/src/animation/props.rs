use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A visual property a tween can drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum VisualProperty {
    Opacity,
    X,
    Y,
    Scale,
    Rotation,
    RotationX,
    RotationY,
}

impl VisualProperty {
    /// Value the property has when no animation touches it.
    pub fn rest_value(self) -> f64 {
        match self {
            VisualProperty::Opacity | VisualProperty::Scale => 1.0,
            _ => 0.0,
        }
    }
}

/// Property name to value mapping, ordered so rendering is stable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VisualState(BTreeMap<VisualProperty, f64>);

impl VisualState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, property: VisualProperty, value: f64) -> Self {
        self.0.insert(property, value);
        self
    }

    pub fn set(&mut self, property: VisualProperty, value: f64) {
        self.0.insert(property, value);
    }

    pub fn get(&self, property: VisualProperty) -> Option<f64> {
        self.0.get(&property).copied()
    }

    /// The rest state for every property this state mentions.
    pub fn rest_of(&self) -> Self {
        Self(self.0.keys().map(|p| (*p, p.rest_value())).collect())
    }

    /// Interpolate towards `to`. Properties only one side knows about are
    /// interpolated against their rest value.
    pub fn lerp(&self, to: &VisualState, t: f64) -> VisualState {
        let mut out = BTreeMap::new();
        for property in self.0.keys().chain(to.0.keys()) {
            if out.contains_key(property) {
                continue;
            }
            let a = self.get(*property).unwrap_or_else(|| property.rest_value());
            let b = to.get(*property).unwrap_or_else(|| property.rest_value());
            out.insert(*property, a + (b - a) * t);
        }
        VisualState(out)
    }

    /// Inline CSS for this state: `opacity` plus a single `transform`.
    pub fn to_css(&self) -> String {
        let mut css = String::new();
        if let Some(opacity) = self.get(VisualProperty::Opacity) {
            css.push_str(&format!("opacity: {};", fmt_num(opacity)));
        }

        let mut transform = Vec::new();
        let x = self.get(VisualProperty::X);
        let y = self.get(VisualProperty::Y);
        if x.is_some() || y.is_some() {
            transform.push(format!(
                "translate({}px, {}px)",
                fmt_num(x.unwrap_or(0.0)),
                fmt_num(y.unwrap_or(0.0))
            ));
        }
        if let Some(deg) = self.get(VisualProperty::Rotation) {
            transform.push(format!("rotate({}deg)", fmt_num(deg)));
        }
        if let Some(deg) = self.get(VisualProperty::RotationX) {
            transform.push(format!("rotateX({}deg)", fmt_num(deg)));
        }
        if let Some(deg) = self.get(VisualProperty::RotationY) {
            transform.push(format!("rotateY({}deg)", fmt_num(deg)));
        }
        if let Some(scale) = self.get(VisualProperty::Scale) {
            transform.push(format!("scale({})", fmt_num(scale)));
        }
        if !transform.is_empty() {
            if !css.is_empty() {
                css.push(' ');
            }
            css.push_str(&format!("transform: {};", transform.join(" ")));
        }
        css
    }
}

impl FromIterator<(VisualProperty, f64)> for VisualState {
    fn from_iter<I: IntoIterator<Item = (VisualProperty, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

// Four decimals is plenty for pixels and degrees and keeps the style
// attribute short.
fn fmt_num(value: f64) -> String {
    let rounded = (value * 10_000.0).round() / 10_000.0;
    if rounded == 0.0 {
        "0".to_string()
    } else {
        rounded.to_string()
    }
}
