//! Common test utilities shared across integration tests

use async_trait::async_trait;
use autosave::{
    Binder, BinderConfig, FeedbackSink, FieldName, Form, Indicator, InputKind, InputProps, Node,
    Outcome, SaveError, SaveReply, SaveRequest, SaveTransport,
};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::Instant;

/// A scripted server reply: how long it takes and what it answers
#[derive(Clone, Debug)]
pub struct Reply {
    pub delay: Duration,
    pub result: Result<SaveReply, SaveError>,
}

#[allow(dead_code)]
impl Reply {
    pub fn ok() -> Self {
        Reply {
            delay: Duration::ZERO,
            result: Ok(SaveReply::Json(serde_json::json!({ "status": "ok" }))),
        }
    }

    pub fn error(body: &str) -> Self {
        Reply {
            delay: Duration::ZERO,
            result: Err(SaveError::Status {
                code: 500,
                body: body.to_string(),
            }),
        }
    }

    pub fn after(mut self, millis: u64) -> Self {
        self.delay = Duration::from_millis(millis);
        self
    }
}

/// Transport that answers from a per-field script and records every request
#[derive(Default)]
pub struct ScriptedTransport {
    script: Mutex<HashMap<String, VecDeque<Reply>>>,
    requests: Mutex<Vec<SaveRequest>>,
}

#[allow(dead_code)]
impl ScriptedTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Queue the reply for the next save of `field`; unscripted saves succeed at once
    pub fn push(&self, field: &str, reply: Reply) {
        self.script
            .lock()
            .unwrap()
            .entry(field.to_string())
            .or_default()
            .push_back(reply);
    }

    pub fn requests(&self) -> Vec<SaveRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl SaveTransport for ScriptedTransport {
    async fn save(&self, request: &SaveRequest) -> Result<SaveReply, SaveError> {
        self.requests.lock().unwrap().push(request.clone());

        let reply = self
            .script
            .lock()
            .unwrap()
            .get_mut(request.name.as_str())
            .and_then(|queue| queue.pop_front())
            .unwrap_or_else(Reply::ok);

        if !reply.delay.is_zero() {
            tokio::time::sleep(reply.delay).await;
        }

        reply.result
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Recorded {
    pub at: Instant,
    pub field: String,
    pub outcome: Outcome,
    pub indicator: Option<Indicator>,
}

/// Feedback sink that remembers everything it was told
#[derive(Default)]
pub struct RecordingFeedback {
    indications: Mutex<Vec<Recorded>>,
    alerts: Mutex<Vec<(String, String)>>,
}

#[allow(dead_code)]
impl RecordingFeedback {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn indications(&self) -> Vec<Recorded> {
        self.indications.lock().unwrap().clone()
    }

    pub fn outcomes(&self, field: &str) -> Vec<Outcome> {
        self.indications()
            .into_iter()
            .filter(|r| r.field == field)
            .map(|r| r.outcome)
            .collect()
    }

    /// The indicator currently visible on `field`
    pub fn current(&self, field: &str) -> Outcome {
        self.outcomes(field).last().copied().unwrap_or_default()
    }

    pub fn alerts(&self) -> Vec<(String, String)> {
        self.alerts.lock().unwrap().clone()
    }
}

impl FeedbackSink for RecordingFeedback {
    fn indicate(&self, field: &FieldName, outcome: Outcome, indicator: Option<&Indicator>) {
        self.indications.lock().unwrap().push(Recorded {
            at: Instant::now(),
            field: field.to_string(),
            outcome,
            indicator: indicator.cloned(),
        });
    }

    fn alert(&self, field: &FieldName, message: &str) {
        self.alerts
            .lock()
            .unwrap()
            .push((field.to_string(), message.to_string()));
    }
}

/// The option form used throughout the tests
#[allow(dead_code)]
pub fn option_form() -> Form {
    Form::new(
        "option_form",
        vec![
            Node::Input(InputProps::hidden("table_is_options", "options")),
            Node::Input(InputProps::text("username", "a")),
            Node::Group {
                label: Some("Contact".to_string()),
                children: vec![
                    Node::Label {
                        text: "Email".to_string(),
                    },
                    Node::Input(InputProps::text("email", "")),
                    Node::Input(InputProps {
                        kind: InputKind::Password,
                        ..InputProps::text("password", "")
                    }),
                ],
            },
        ],
    )
}

#[allow(dead_code)]
pub fn binder_with(
    config: BinderConfig,
    transport: Arc<ScriptedTransport>,
) -> (Binder, Arc<RecordingFeedback>) {
    let feedback = RecordingFeedback::new();
    let binder = Binder::new(config, transport, feedback.clone());
    binder.bind(&option_form()).unwrap();
    (binder, feedback)
}

/// Let the clock run for `millis`, running every task that becomes ready
#[allow(dead_code)]
pub async fn advance(millis: u64) {
    tokio::time::sleep(Duration::from_millis(millis)).await;
}
