//! Autosave for form fields.
//!
//! A [`Binder`] registers the text fields of a [`Form`]. Every change of a
//! bound field is sent to the save endpoint right away, and the outcome is
//! reported to a [`FeedbackSink`] as a transient indicator that reverts to
//! neutral after a fixed delay.

mod binder;
mod config;
mod error;
mod feedback;
mod tls_config;
mod transport;

pub use autosave_protocol::{
    field::{FieldName, Form, InputKind, InputProps, Node, SelectorScope},
    messages::{ResponseFormat, SaveReply, SaveRequest},
    network::{SaveError, MAX_RESPONSE_SIZE},
    outcome::{FieldPhase, Outcome},
    stylesheet::{Colour, Indicator, IndicatorStyle},
};
pub use binder::{Binder, BoundField, SaveTicket};
pub use config::{BinderConfig, ConcurrencyPolicy, DEFAULT_REVERT_AFTER_MS};
pub use error::{BindError, ConfigError};
pub use feedback::{BinderEvent, BroadcastFeedback, FeedbackSink, LogFeedback};
pub use tls_config::{ClientTlsConfig, TlsConfigError};
pub use transport::{HttpTransport, SaveTransport};
