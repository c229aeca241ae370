//! Data models for rendered DOM trees.
//!
//! `DomNode` is the nested tree handed over by the extraction step,
//! `FlatNode` is its positionally-addressed preorder projection.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// The fixed set of computed style properties captured per node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StyleProperty {
    BackgroundColor,
    FontSize,
    FontWeight,
    Color,
    Width,
    Height,
}

impl StyleProperty {
    /// All properties in capture order.
    pub const ALL: [StyleProperty; 6] = [
        StyleProperty::BackgroundColor,
        StyleProperty::FontSize,
        StyleProperty::FontWeight,
        StyleProperty::Color,
        StyleProperty::Width,
        StyleProperty::Height,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StyleProperty::BackgroundColor => "backgroundColor",
            StyleProperty::FontSize => "fontSize",
            StyleProperty::FontWeight => "fontWeight",
            StyleProperty::Color => "color",
            StyleProperty::Width => "width",
            StyleProperty::Height => "height",
        }
    }
}

impl fmt::Display for StyleProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StyleProperty {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        StyleProperty::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| format!("Unknown style property: '{}'", s))
    }
}

/// Computed style values for one node. Absent values were not reported
/// by the renderer and never take part in a comparison.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComputedStyles {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<String>,
}

impl ComputedStyles {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the value of a property, if reported.
    pub fn get(&self, property: StyleProperty) -> Option<&str> {
        let slot = match property {
            StyleProperty::BackgroundColor => &self.background_color,
            StyleProperty::FontSize => &self.font_size,
            StyleProperty::FontWeight => &self.font_weight,
            StyleProperty::Color => &self.color,
            StyleProperty::Width => &self.width,
            StyleProperty::Height => &self.height,
        };
        slot.as_deref()
    }

    /// Set the value of a property.
    pub fn set(&mut self, property: StyleProperty, value: impl Into<String>) {
        let slot = match property {
            StyleProperty::BackgroundColor => &mut self.background_color,
            StyleProperty::FontSize => &mut self.font_size,
            StyleProperty::FontWeight => &mut self.font_weight,
            StyleProperty::Color => &mut self.color,
            StyleProperty::Width => &mut self.width,
            StyleProperty::Height => &mut self.height,
        };
        *slot = Some(value.into());
    }

    /// Builder: set a property.
    pub fn with(mut self, property: StyleProperty, value: impl Into<String>) -> Self {
        self.set(property, value);
        self
    }

    /// Iterate over reported properties in capture order.
    pub fn iter(&self) -> impl Iterator<Item = (StyleProperty, &str)> + '_ {
        StyleProperty::ALL
            .into_iter()
            .filter_map(move |p| self.get(p).map(|v| (p, v)))
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }
}

/// A rendered element as produced by the extraction step.
///
/// Only `tag` is required. A snapshot that omits it deserializes to an empty
/// tag, which flattening rejects as a structural fault.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomNode {
    #[serde(default)]
    pub tag: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub attributes: HashMap<String, String>,
    #[serde(default)]
    pub computed_styles: ComputedStyles,
    #[serde(default)]
    pub children: Vec<DomNode>,
}

impl DomNode {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Default::default()
        }
    }

    /// Builder: set text content.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Builder: set an attribute.
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Builder: set a computed style value.
    pub fn with_style(mut self, property: StyleProperty, value: impl Into<String>) -> Self {
        self.computed_styles.set(property, value);
        self
    }

    /// Builder: append a child.
    pub fn with_child(mut self, child: DomNode) -> Self {
        self.children.push(child);
        self
    }

    /// Decode a snapshot from JSON text.
    ///
    /// Nesting depth is unbounded; the stack grows on the heap as needed.
    pub fn from_json(json: &str) -> Result<Self> {
        let mut de = serde_json::Deserializer::from_str(json);
        de.disable_recursion_limit();
        let node = Self::deserialize(serde_stacker::Deserializer::new(&mut de))?;
        de.end()?;
        Ok(node)
    }

    /// Attribute value, or "" when absent.
    pub fn attr(&self, name: &str) -> &str {
        self.attributes.get(name).map(String::as_str).unwrap_or("")
    }

    /// Total number of nodes in this subtree, including `self`.
    pub fn node_count(&self) -> usize {
        let mut count = 0;
        let mut pending = vec![self];
        while let Some(node) = pending.pop() {
            count += 1;
            pending.extend(node.children.iter());
        }
        count
    }
}

/// One node of a flattened tree.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlatNode {
    /// Structural path, unique within one flattening.
    pub path: String,
    /// Human-readable selector, not guaranteed unique.
    pub selector: String,
    /// Trimmed text content.
    pub text: String,
    pub styles: ComputedStyles,
    pub tag: String,
}
