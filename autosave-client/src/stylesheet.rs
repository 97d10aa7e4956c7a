use autosave::{Colour, Indicator};
use iced::{
    widget::text_input::{Status, Style},
    Background, Border, Color, Theme,
};
use maplit::hashmap;
use std::collections::HashMap;

/// Maps outcome indicators onto input styling
pub struct Stylesheet {
    classes: HashMap<String, Colour>,
}

impl Default for Stylesheet {
    fn default() -> Self {
        Stylesheet {
            classes: hashmap! {
                "success".to_string() => Colour::GREEN,
                "has-success".to_string() => Colour::GREEN,
                "error".to_string() => Colour::RED,
                "has-error".to_string() => Colour::RED,
            },
        }
    }
}

impl Stylesheet {
    /// Border colour of an input showing `indicator`.
    ///
    /// Unknown classes and the neutral state both get the plain border.
    pub fn border_colour(&self, indicator: Option<&Indicator>) -> Color {
        let colour = match indicator {
            Some(Indicator::Class(class)) => self.classes.get(class).copied(),
            Some(Indicator::Colour(colour)) => Some(*colour),
            None => None,
        };

        colour
            .map(convert_colour)
            .unwrap_or(Color::from_rgba(0., 0., 0., 0.5))
    }

    pub fn text_input_style(
        &self,
        indicator: Option<&Indicator>,
    ) -> impl Fn(&Theme, Status) -> Style + 'static {
        let border_colour = self.border_colour(indicator);
        let border_width = if indicator.is_some() { 2.0 } else { 1.0 };

        move |_theme, status| Style {
            background: Background::Color(Color::WHITE),
            border: Border::default()
                .width(match status {
                    Status::Focused => border_width + 1.0,
                    _ => border_width,
                })
                .color(border_colour),
            icon: Color::TRANSPARENT,
            placeholder: Color::from_rgba(0., 0., 0., 0.5),
            value: Color::BLACK,
            selection: Color::from_rgba(0., 0., 0.3, 0.5),
        }
    }
}

pub fn convert_colour(colour: Colour) -> Color {
    match colour {
        Colour::RGBA(r, g, b, a) => Color::from_rgba(r, g, b, a),
    }
}
