mod error;
mod form_loader;
mod form_view;
mod stylesheet;

use kv_log_macro as log;

use autosave::{Binder, BinderEvent, BoundField, BroadcastFeedback, Form, Indicator, Outcome};
use autosave_protocol::form_state::{FieldEdit, FormState};
use error::ClientError;
use form_loader::FormPaths;
use form_view::FormView;
use iced::{
    widget::{column, text, Container},
    Length, Subscription, Task,
};
use std::{collections::HashMap, sync::Arc};
use stylesheet::Stylesheet;

#[derive(Debug, Clone)]
pub enum AutosaveMessage {
    DraftChanged { name: String, value: String },
    Committed(String),
    SaveStarted(Result<u64, String>),
    Feedback(BinderEvent),
}

struct Autosave {
    form: Option<Form>,
    fields: HashMap<String, BoundField>,
    state: FormState,
    indicators: HashMap<String, Indicator>,
    feedback: BroadcastFeedback,
    stylesheet: Stylesheet,
    error_message: Option<String>,
    /// Field whose failed save raised the current error message
    alerted_field: Option<String>,
}

impl Autosave {
    fn new() -> (Self, Task<AutosaveMessage>) {
        let feedback = BroadcastFeedback::default();

        let app = match Self::load(feedback.clone()) {
            Ok((form, fields)) => Autosave::with_form(form, fields, feedback),
            Err(e) => {
                log::error!("Failed to load form: {}", e);
                Autosave {
                    form: None,
                    fields: HashMap::new(),
                    state: FormState::new(),
                    indicators: HashMap::new(),
                    feedback,
                    stylesheet: Stylesheet::default(),
                    error_message: Some(e.to_string()),
                    alerted_field: None,
                }
            }
        };

        (app, Task::none())
    }

    fn load(feedback: BroadcastFeedback) -> Result<(Form, Vec<BoundField>), ClientError> {
        let paths = FormPaths::locate()?;
        let form = form_loader::load_form(&paths.form)?;
        let config = form_loader::load_config(&paths.config)?;

        let binder = Binder::from_config(config, Arc::new(feedback))?;
        let fields = binder.bind(&form)?;
        Ok((form, fields))
    }

    fn with_form(form: Form, fields: Vec<BoundField>, feedback: BroadcastFeedback) -> Self {
        let mut state = FormState::new();
        collect_inputs(&form.children, &mut state);

        Autosave {
            form: Some(form),
            fields: fields
                .into_iter()
                .map(|field| (field.name().to_string(), field))
                .collect(),
            state,
            indicators: HashMap::new(),
            feedback,
            stylesheet: Stylesheet::default(),
            error_message: None,
            alerted_field: None,
        }
    }

    fn subscription(&self) -> Subscription<AutosaveMessage> {
        Subscription::run_with_id("binder_feedback", self.feedback.subscribe())
            .map(AutosaveMessage::Feedback)
    }

    fn update(&mut self, message: AutosaveMessage) -> Task<AutosaveMessage> {
        let mut command = Task::none();
        match message {
            AutosaveMessage::DraftChanged { name, value } => {
                self.state.entry(name).or_default().set_draft(value);
            }
            AutosaveMessage::Committed(name) => {
                let Some(value) = self.state.get_mut(&name).and_then(FieldEdit::commit) else {
                    return command;
                };
                log::debug!("Field committed", { field: name.as_str() });

                if let Some(field) = self.fields.get(&name).cloned() {
                    command = Task::perform(
                        async move {
                            field
                                .change(value)
                                .map(|ticket| ticket.generation())
                                .map_err(|e| e.to_string())
                        },
                        AutosaveMessage::SaveStarted,
                    );
                }
            }
            AutosaveMessage::SaveStarted(result) => {
                if let Err(e) = result {
                    log::error!("Failed to start save: {}", e);
                    self.error_message = Some(e);
                    self.alerted_field = None;
                }
            }
            AutosaveMessage::Feedback(event) => match event {
                BinderEvent::Indicator {
                    field,
                    outcome,
                    indicator,
                } => {
                    if outcome == Outcome::Success
                        && self.alerted_field.as_deref() == Some(field.as_str())
                    {
                        self.error_message = None;
                        self.alerted_field = None;
                    }

                    match indicator {
                        Some(indicator) => {
                            self.indicators.insert(field.to_string(), indicator);
                        }
                        None => {
                            self.indicators.remove(field.as_str());
                        }
                    }
                }
                BinderEvent::Alert { field, message } => {
                    self.error_message = Some(format!("{}: {}", field, message));
                    self.alerted_field = Some(field.to_string());
                }
            },
        }

        command
    }

    fn view(&self) -> iced::Element<'_, AutosaveMessage> {
        let form = match &self.form {
            Some(form) => FormView {
                state: &self.state,
                indicators: &self.indicators,
                stylesheet: &self.stylesheet,
            }
            .view(form),
            None => text("No form loaded").into(),
        };

        let content = if let Some(error) = &self.error_message {
            column![text(error).size(16).color([1.0, 0.0, 0.0]), form]
                .spacing(10)
                .into()
        } else {
            form
        };

        Container::new(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .padding(20)
            .into()
    }
}

/// Seed the edit state with the initial value of every visible input
fn collect_inputs(nodes: &[autosave::Node], state: &mut FormState) {
    for node in nodes {
        match node {
            autosave::Node::Input(props) => {
                state
                    .entry(props.name.clone())
                    .or_insert_with(|| FieldEdit::new(props.value.as_str()));
            }
            autosave::Node::Group { children, .. } => collect_inputs(children, state),
            autosave::Node::Label { .. } => {}
        }
    }
}

fn main() -> iced::Result {
    env_logger::init();

    iced::application("Autosave", Autosave::update, Autosave::view)
        .subscription(Autosave::subscription)
        .run_with(Autosave::new)
}
