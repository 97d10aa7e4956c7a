use autosave::{Form, Indicator, InputKind, InputProps, Node};
use autosave_protocol::form_state::FormState;
use iced::{
    widget::{Column, Row, Text, TextInput},
    Alignment, Element, Length,
};
use std::collections::HashMap;

use crate::{stylesheet::Stylesheet, AutosaveMessage};

/// What the view reads from the application state
pub struct FormView<'a> {
    pub state: &'a FormState,
    pub indicators: &'a HashMap<String, Indicator>,
    pub stylesheet: &'a Stylesheet,
}

impl<'a> FormView<'a> {
    pub fn view(&self, form: &'a Form) -> Element<'a, AutosaveMessage> {
        self.view_nodes(&form.children)
    }

    fn view_nodes(&self, nodes: &'a [Node]) -> Element<'a, AutosaveMessage> {
        let elements: Vec<Element<'a, AutosaveMessage>> =
            nodes.iter().filter_map(|node| self.view_node(node)).collect();

        Column::with_children(elements)
            .spacing(8)
            .width(Length::Fill)
            .into()
    }

    fn view_node(&self, node: &'a Node) -> Option<Element<'a, AutosaveMessage>> {
        match node {
            Node::Label { text } => Some(Text::new(text.as_str()).into()),
            Node::Group { label, children } => {
                let mut column = Column::new().spacing(4);
                if let Some(label) = label {
                    column = column.push(Text::new(label.as_str()).size(18));
                }
                Some(column.push(self.view_nodes(children)).into())
            }
            Node::Input(props) => self.view_input(props),
        }
    }

    fn view_input(&self, props: &'a InputProps) -> Option<Element<'a, AutosaveMessage>> {
        if props.kind == InputKind::Hidden {
            return None;
        }

        let value = self
            .state
            .get(&props.name)
            .map(|edit| edit.draft())
            .unwrap_or(props.value.as_str());
        let placeholder = props.placeholder.as_deref().unwrap_or("");
        let indicator = self.indicators.get(&props.name);

        let name = props.name.clone();
        let submitted = props.name.clone();
        let input = TextInput::new(placeholder, value)
            .on_input(move |value| AutosaveMessage::DraftChanged {
                name: name.clone(),
                value,
            })
            .on_submit(AutosaveMessage::Committed(submitted))
            .secure(props.kind == InputKind::Password)
            .padding(5)
            .style(self.stylesheet.text_input_style(indicator));

        Some(
            Row::with_children(vec![
                Text::new(props.name.as_str()).width(Length::Fixed(140.)).into(),
                input.into(),
            ])
            .align_y(Alignment::Center)
            .into(),
        )
    }
}
