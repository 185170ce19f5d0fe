//! Placed UI components.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{lenient, non_empty, Position};

/// Stock photo used when an image component has no `src`.
pub const DEFAULT_IMAGE_SRC: &str = "https://images.pexels.com/photos/3861969/pexels-photo-3861969.jpeg?auto=compress&cs=tinysrgb&w=300&h=200&fit=crop";

/// Component types.
///
/// The palette offers the named kinds. Any other type string found in a
/// project is kept as `Other` and rendered as a labelled placeholder box.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ComponentKind {
    Text,
    Button,
    Input,
    Card,
    Navbar,
    Form,
    Grid,
    Image,
    Other(String),
}

impl ComponentKind {
    pub const ALL: [ComponentKind; 8] = [
        ComponentKind::Text,
        ComponentKind::Button,
        ComponentKind::Input,
        ComponentKind::Card,
        ComponentKind::Navbar,
        ComponentKind::Form,
        ComponentKind::Grid,
        ComponentKind::Image,
    ];

    /// The raw type string, as stored in project files.
    pub fn as_str(&self) -> &str {
        match self {
            ComponentKind::Text => "text",
            ComponentKind::Button => "button",
            ComponentKind::Input => "input",
            ComponentKind::Card => "card",
            ComponentKind::Navbar => "navbar",
            ComponentKind::Form => "form",
            ComponentKind::Grid => "grid",
            ComponentKind::Image => "image",
            ComponentKind::Other(raw) => raw,
        }
    }

    /// Size a freshly dropped component gets on the canvas.
    pub fn default_size(&self) -> Size {
        match self {
            ComponentKind::Input => Size::new(200.0, 45.0),
            ComponentKind::Card => Size::new(250.0, 150.0),
            ComponentKind::Button => Size::new(120.0, 40.0),
            ComponentKind::Image => Size::new(200.0, 150.0),
            _ => Size::new(120.0, 40.0),
        }
    }

    /// Properties a freshly dropped component gets on the canvas.
    ///
    /// These are canvas defaults, which is why a new text component reads
    /// "Sample Text" while the generator's own fallback for a text component
    /// without properties is "Text".
    pub fn default_properties(&self) -> ComponentProperties {
        let mut props = ComponentProperties::default();
        match self {
            ComponentKind::Text => {
                props.text = Some("Sample Text".to_string());
                props.color = Some("gray-800".to_string());
                props.font_size = Some("base".to_string());
            }
            ComponentKind::Button => {
                props.text = Some("Click Me".to_string());
                props.background_color = Some("blue-500".to_string());
                props.color = Some("white".to_string());
            }
            ComponentKind::Input => {
                props.placeholder = Some("Enter text here".to_string());
                props.color = Some("gray-800".to_string());
            }
            ComponentKind::Card => {
                props.text = Some("Card Content".to_string());
                props.color = Some("gray-800".to_string());
            }
            ComponentKind::Image => {
                props.src = Some(DEFAULT_IMAGE_SRC.to_string());
                props.alt = Some("Image".to_string());
            }
            ComponentKind::Navbar | ComponentKind::Form | ComponentKind::Grid | ComponentKind::Other(_) => {
                props.text = Some("Content".to_string());
                props.color = Some("gray-800".to_string());
            }
        }
        props
    }
}

impl From<String> for ComponentKind {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "text" => ComponentKind::Text,
            "button" => ComponentKind::Button,
            "input" => ComponentKind::Input,
            "card" => ComponentKind::Card,
            "navbar" => ComponentKind::Navbar,
            "form" => ComponentKind::Form,
            "grid" => ComponentKind::Grid,
            "image" => ComponentKind::Image,
            _ => ComponentKind::Other(raw),
        }
    }
}

impl From<ComponentKind> for String {
    fn from(kind: ComponentKind) -> Self {
        match kind {
            ComponentKind::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pixel dimensions of a component.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Open property bag of a component.
///
/// Known keys are typed; everything else lands in `extra` and is carried
/// through serialization untouched. Values of the wrong JSON type are never
/// rejected (see [`lenient::string`]).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentProperties {
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub font_size: Option<String>,
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub padding: Option<String>,
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub margin: Option<String>,
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub border_radius: Option<String>,
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub on_click: Option<String>,

    /// Keys the generators don't know about.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl ComponentProperties {
    pub fn text(&self) -> Option<&str> {
        non_empty(&self.text)
    }

    pub fn color(&self) -> Option<&str> {
        non_empty(&self.color)
    }

    pub fn background_color(&self) -> Option<&str> {
        non_empty(&self.background_color)
    }

    pub fn font_size(&self) -> Option<&str> {
        non_empty(&self.font_size)
    }

    pub fn src(&self) -> Option<&str> {
        non_empty(&self.src)
    }

    pub fn alt(&self) -> Option<&str> {
        non_empty(&self.alt)
    }

    pub fn placeholder(&self) -> Option<&str> {
        non_empty(&self.placeholder)
    }

    /// Sets a property by its JSON key, typed slot first, `extra` otherwise.
    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();
        let slot = match key {
            "text" => &mut self.text,
            "color" => &mut self.color,
            "backgroundColor" => &mut self.background_color,
            "fontSize" => &mut self.font_size,
            "padding" => &mut self.padding,
            "margin" => &mut self.margin,
            "borderRadius" => &mut self.border_radius,
            "src" => &mut self.src,
            "alt" => &mut self.alt,
            "placeholder" => &mut self.placeholder,
            "onClick" => &mut self.on_click,
            _ => {
                self.extra.insert(key.to_string(), Value::String(value));
                return;
            }
        };
        *slot = Some(value);
    }
}

/// One UI element positioned on the design canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedComponent {
    pub id: String,

    #[serde(rename = "type")]
    pub kind: ComponentKind,

    #[serde(default)]
    pub position: Position,

    #[serde(default)]
    pub size: Size,

    #[serde(default)]
    pub properties: ComponentProperties,

    /// Nested components. Accepted in the model, not rendered.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<PlacedComponent>>,
}

impl PlacedComponent {
    /// Creates a component with canvas default size and properties.
    pub fn new(id: impl Into<String>, kind: ComponentKind, position: Position) -> Self {
        let size = kind.default_size();
        let properties = kind.default_properties();
        Self {
            id: id.into(),
            kind,
            position,
            size,
            properties,
            children: None,
        }
    }

    /// Creates a component with an empty property bag.
    pub fn bare(id: impl Into<String>, kind: ComponentKind, position: Position, size: Size) -> Self {
        Self {
            id: id.into(),
            kind,
            position,
            size,
            properties: ComponentProperties::default(),
            children: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_roundtrip_names() {
        for kind in ComponentKind::ALL {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.as_str()));
        }
    }

    #[test]
    fn test_unknown_kind_keeps_raw_type() {
        let component: PlacedComponent = serde_json::from_str(r#"{ "id": "c", "type": "carousel" }"#).unwrap();
        assert_eq!(component.kind, ComponentKind::Other("carousel".to_string()));
        assert_eq!(component.kind.as_str(), "carousel");

        let json = serde_json::to_value(&component).unwrap();
        assert_eq!(json["type"], "carousel");
    }

    #[test]
    fn test_lenient_properties() {
        let json = r#"{
            "text": 42,
            "color": null,
            "fontSize": true,
            "alt": ["not", "a", "string"],
            "tooltip": "kept aside"
        }"#;
        let props: ComponentProperties = serde_json::from_str(json).unwrap();

        assert_eq!(props.text(), Some("42"));
        assert_eq!(props.color(), None);
        assert_eq!(props.font_size(), Some("true"));
        assert_eq!(props.alt(), None);
        assert_eq!(props.extra.get("tooltip"), Some(&Value::String("kept aside".into())));
    }

    #[test]
    fn test_falsy_values_count_as_missing() {
        let json = r#"{ "text": false, "fontSize": 0, "color": 0.0, "placeholder": -1, "alt": 0.5 }"#;
        let props: ComponentProperties = serde_json::from_str(json).unwrap();

        assert_eq!(props.text(), None);
        assert_eq!(props.font_size(), None);
        assert_eq!(props.color(), None);
        assert_eq!(props.placeholder(), Some("-1"));
        assert_eq!(props.alt(), Some("0.5"));
    }

    #[test]
    fn test_empty_string_counts_as_missing() {
        let props: ComponentProperties = serde_json::from_str(r#"{ "text": "" }"#).unwrap();
        assert_eq!(props.text(), None);
    }

    #[test]
    fn test_canvas_defaults() {
        assert_eq!(ComponentKind::Input.default_size(), Size::new(200.0, 45.0));
        assert_eq!(ComponentKind::Grid.default_size(), Size::new(120.0, 40.0));
        assert_eq!(ComponentKind::Text.default_properties().text(), Some("Sample Text"));
        assert_eq!(ComponentKind::Image.default_properties().src(), Some(DEFAULT_IMAGE_SRC));
    }

    #[test]
    fn test_set_property() {
        let mut props = ComponentProperties::default();
        props.set("backgroundColor", "red-500");
        props.set("tooltip", "hi");
        assert_eq!(props.background_color(), Some("red-500"));
        assert_eq!(props.extra.get("tooltip"), Some(&Value::String("hi".into())));
    }
}
