use autosave_protocol::{field::FieldName, outcome::Outcome, stylesheet::Indicator};
use kv_log_macro as log;
use tokio::sync::broadcast;
use tokio_stream::{
    wrappers::{errors::BroadcastStreamRecvError, BroadcastStream},
    Stream, StreamExt,
};

/// Receives the visible effects of saves.
///
/// `indicate` is called with `Outcome::Neutral` and no indicator when a
/// field reverts. A binder makes its `indicate` calls one at a time, so
/// implementations must not call back into that binder.
pub trait FeedbackSink: Send + Sync {
    fn indicate(&self, field: &FieldName, outcome: Outcome, indicator: Option<&Indicator>);

    /// Surface the raw error payload of a failed save to the user
    fn alert(&self, field: &FieldName, message: &str) {
        log::warn!("Save failed", {
            field: field.as_str(),
            message: message
        });
    }
}

/// Sink that only writes the outcomes to the log
#[derive(Debug, Default, Clone, Copy)]
pub struct LogFeedback;

impl FeedbackSink for LogFeedback {
    fn indicate(&self, field: &FieldName, outcome: Outcome, _indicator: Option<&Indicator>) {
        log::info!("Field outcome", {
            field: field.as_str(),
            outcome: outcome
        });
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum BinderEvent {
    Indicator {
        field: FieldName,
        outcome: Outcome,
        indicator: Option<Indicator>,
    },
    Alert {
        field: FieldName,
        message: String,
    },
}

/// Publishes feedback as `BinderEvent`s to any number of subscribers
#[derive(Clone)]
pub struct BroadcastFeedback {
    sender: broadcast::Sender<BinderEvent>,
}

impl BroadcastFeedback {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        BroadcastFeedback { sender }
    }

    pub fn subscribe(&self) -> impl Stream<Item = BinderEvent> + Send + 'static {
        BroadcastStream::new(self.sender.subscribe()).filter_map(|event| match event {
            Ok(event) => Some(event),
            Err(BroadcastStreamRecvError::Lagged(skipped)) => {
                log::warn!("Feedback subscriber lagged", { skipped: skipped });
                None
            }
        })
    }

    fn publish(&self, event: BinderEvent) {
        if self.sender.send(event).is_err() {
            log::trace!("No feedback subscribers");
        }
    }
}

impl Default for BroadcastFeedback {
    fn default() -> Self {
        BroadcastFeedback::new(64)
    }
}

impl FeedbackSink for BroadcastFeedback {
    fn indicate(&self, field: &FieldName, outcome: Outcome, indicator: Option<&Indicator>) {
        self.publish(BinderEvent::Indicator {
            field: field.clone(),
            outcome,
            indicator: indicator.cloned(),
        });
    }

    fn alert(&self, field: &FieldName, message: &str) {
        self.publish(BinderEvent::Alert {
            field: field.clone(),
            message: message.to_string(),
        });
    }
}
