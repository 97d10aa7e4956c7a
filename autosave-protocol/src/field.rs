use serde::{Deserialize, Serialize};
use std::fmt;

/// Name of the form whose text fields are autosaved unless configured otherwise
pub const DEFAULT_FORM_NAME: &str = "option_form";

/// A non-empty field identifier
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FieldName(String);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyFieldName;

impl fmt::Display for EmptyFieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Field name must not be empty")
    }
}

impl std::error::Error for EmptyFieldName {}

impl FieldName {
    pub fn new(name: impl Into<String>) -> Result<Self, EmptyFieldName> {
        let name = name.into();
        if name.is_empty() {
            return Err(EmptyFieldName);
        }
        Ok(FieldName(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for FieldName {
    type Error = EmptyFieldName;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        FieldName::new(value)
    }
}

impl TryFrom<&str> for FieldName {
    type Error = EmptyFieldName;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        FieldName::new(value)
    }
}

impl From<FieldName> for String {
    fn from(name: FieldName) -> Self {
        name.0
    }
}

impl log::kv::ToValue for FieldName {
    fn to_value(&self) -> log::kv::Value<'_> {
        log::kv::Value::from(self.as_str())
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputKind {
    #[default]
    Text,
    Password,
    Hidden,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InputProps {
    pub name: String,
    #[serde(default)]
    pub kind: InputKind,
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub placeholder: Option<String>,
}

impl InputProps {
    pub fn text(name: impl ToString, value: impl ToString) -> Self {
        InputProps {
            name: name.to_string(),
            kind: InputKind::Text,
            value: value.to_string(),
            placeholder: None,
        }
    }

    pub fn hidden(name: impl ToString, value: impl ToString) -> Self {
        InputProps {
            kind: InputKind::Hidden,
            ..InputProps::text(name, value)
        }
    }

    pub fn is_text(&self) -> bool {
        self.kind == InputKind::Text
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Node {
    Group {
        #[serde(default)]
        label: Option<String>,
        children: Vec<Node>,
    },
    Label {
        text: String,
    },
    Input(InputProps),
}

/// How deep under the form text fields are looked for
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectorScope {
    /// Only inputs that are direct children of the form
    Children,
    /// Inputs at any depth below the form
    #[default]
    Descendants,
}

/// A form description as provided by the host
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Form {
    pub name: String,
    pub children: Vec<Node>,
}

impl Form {
    pub fn new(name: impl ToString, children: Vec<Node>) -> Self {
        Form {
            name: name.to_string(),
            children,
        }
    }

    /// Collect the text inputs within `scope`, in document order.
    ///
    /// Password and hidden inputs are never selected.
    pub fn text_fields(&self, scope: SelectorScope) -> Vec<&InputProps> {
        let mut fields = Vec::new();
        collect_text_fields(&self.children, scope, &mut fields);
        fields
    }

    pub fn find_input(&self, name: &str) -> Option<&InputProps> {
        find_input(&self.children, name)
    }
}

fn collect_text_fields<'a>(
    nodes: &'a [Node],
    scope: SelectorScope,
    fields: &mut Vec<&'a InputProps>,
) {
    for node in nodes {
        match node {
            Node::Input(props) if props.is_text() => fields.push(props),
            Node::Group { children, .. } if scope == SelectorScope::Descendants => {
                collect_text_fields(children, scope, fields)
            }
            _ => {}
        }
    }
}

fn find_input<'a>(nodes: &'a [Node], name: &str) -> Option<&'a InputProps> {
    nodes.iter().find_map(|node| match node {
        Node::Input(props) if props.name == name => Some(props),
        Node::Group { children, .. } => find_input(children, name),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn option_form() -> Form {
        Form::new(
            DEFAULT_FORM_NAME,
            vec![
                Node::Input(InputProps::hidden("table_is_options", "options")),
                Node::Input(InputProps::text("station", "jazz")),
                Node::Group {
                    label: Some("Network".to_string()),
                    children: vec![
                        Node::Label {
                            text: "Host".to_string(),
                        },
                        Node::Input(InputProps::text("host", "localhost")),
                        Node::Input(InputProps {
                            kind: InputKind::Password,
                            ..InputProps::text("auth_key", "salt")
                        }),
                    ],
                },
            ],
        )
    }

    #[test]
    fn test_field_name_rejects_empty() {
        assert_eq!(FieldName::new(""), Err(EmptyFieldName));
        assert_eq!(FieldName::new("volume").unwrap().as_str(), "volume");
    }

    #[test]
    fn test_children_scope_skips_nested_inputs() {
        let form = option_form();
        let names: Vec<_> = form
            .text_fields(SelectorScope::Children)
            .iter()
            .map(|f| f.name.as_str())
            .collect();
        assert_eq!(names, vec!["station"]);
    }

    #[test]
    fn test_descendants_scope_finds_nested_text_inputs_only() {
        let form = option_form();
        let names: Vec<_> = form
            .text_fields(SelectorScope::Descendants)
            .iter()
            .map(|f| f.name.as_str())
            .collect();
        assert_eq!(names, vec!["station", "host"]);
    }

    #[test]
    fn test_find_input_searches_groups() {
        let form = option_form();
        assert_eq!(form.find_input("host").unwrap().value, "localhost");
        assert!(form.find_input("missing").is_none());
    }

    #[test]
    fn test_form_json_shape() {
        let json = r#"{
            "name": "option_form",
            "children": [
                { "type": "input", "name": "volume", "value": "11" },
                { "type": "group", "children": [
                    { "type": "input", "name": "secret", "kind": "password" }
                ]}
            ]
        }"#;

        let form: Form = serde_json::from_str(json).unwrap();
        assert_eq!(form.name, "option_form");
        assert_eq!(form.text_fields(SelectorScope::Descendants).len(), 1);
        assert_eq!(form.find_input("secret").unwrap().kind, InputKind::Password);
    }

    #[test]
    fn test_field_name_deserialization_rejects_empty() {
        let result: Result<FieldName, _> = serde_json::from_str(r#""""#);
        assert!(result.is_err());
    }
}
