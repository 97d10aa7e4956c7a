pub mod field;
pub mod form_state;
pub mod messages;
pub mod network;
pub mod outcome;
pub mod stylesheet;

// Re-export commonly used types
pub use field::{FieldName, Form, InputKind, InputProps, Node, SelectorScope};
pub use messages::{SaveReply, SaveRequest};
pub use network::SaveError;
pub use outcome::{FieldPhase, Outcome};
