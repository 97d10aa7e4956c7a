//! Form binding tests: which inputs get bound and what their change
//! handlers send.

#[cfg(test)]
mod common;

use autosave::{
    BindError, Binder, BinderConfig, FieldName, FieldPhase, Form, InputProps, Node, SelectorScope,
};
use common::{advance, option_form, RecordingFeedback, ScriptedTransport};

fn names(fields: &[autosave::BoundField]) -> Vec<&str> {
    fields.iter().map(|f| f.name().as_str()).collect()
}

#[tokio::test]
async fn test_binds_text_inputs_at_any_depth_by_default() {
    let binder = Binder::new(
        BinderConfig::default(),
        ScriptedTransport::new(),
        RecordingFeedback::new(),
    );

    let fields = binder.bind(&option_form()).unwrap();
    assert_eq!(names(&fields), vec!["username", "email"]);
    assert_eq!(
        binder.bound_fields(),
        vec![
            FieldName::new("email").unwrap(),
            FieldName::new("username").unwrap()
        ]
    );
    assert!(fields.iter().all(|f| f.phase() == FieldPhase::Neutral));
}

#[tokio::test]
async fn test_children_scope_binds_direct_children_only() {
    let config = BinderConfig {
        scope: SelectorScope::Children,
        ..BinderConfig::default()
    };
    let binder = Binder::new(config, ScriptedTransport::new(), RecordingFeedback::new());

    let fields = binder.bind(&option_form()).unwrap();
    assert_eq!(names(&fields), vec!["username"]);
    assert_eq!(binder.phase("email"), None);
}

#[tokio::test]
async fn test_other_forms_are_not_bound() {
    let binder = Binder::new(
        BinderConfig::default(),
        ScriptedTransport::new(),
        RecordingFeedback::new(),
    );

    let station_form = Form::new(
        "station_form_1",
        vec![Node::Input(InputProps::text("url", "http://"))],
    );

    let err = binder.bind(&station_form).err().unwrap();
    assert!(matches!(err, BindError::FormNotFound { .. }));
    assert!(binder.bound_fields().is_empty());
}

#[tokio::test]
async fn test_duplicate_and_unnamed_inputs_are_skipped() {
    let binder = Binder::new(
        BinderConfig::default(),
        ScriptedTransport::new(),
        RecordingFeedback::new(),
    );

    let form = Form::new(
        "option_form",
        vec![
            Node::Input(InputProps::text("volume", "5")),
            Node::Input(InputProps::text("", "orphan")),
            Node::Group {
                label: None,
                children: vec![Node::Input(InputProps::text("volume", "7"))],
            },
        ],
    );

    let fields = binder.bind(&form).unwrap();
    assert_eq!(names(&fields), vec!["volume"]);
}

#[tokio::test(start_paused = true)]
async fn test_each_bound_field_saves_its_own_name_and_value() {
    let transport = ScriptedTransport::new();
    let feedback = RecordingFeedback::new();
    let binder = Binder::new(BinderConfig::default(), transport.clone(), feedback.clone());

    let fields = binder.bind(&option_form()).unwrap();
    for field in &fields {
        field.change(format!("new {}", field.name())).unwrap();
    }
    advance(1).await;

    let mut sent: Vec<_> = transport
        .requests()
        .into_iter()
        .map(|r| (r.name.to_string(), r.value))
        .collect();
    sent.sort();
    assert_eq!(
        sent,
        vec![
            ("email".to_string(), "new email".to_string()),
            ("username".to_string(), "new username".to_string()),
        ]
    );
    assert!(fields.iter().all(|f| f.phase() == FieldPhase::Success));
}

#[tokio::test(start_paused = true)]
async fn test_rebinding_keeps_field_state() {
    let transport = ScriptedTransport::new();
    let binder = Binder::new(
        BinderConfig::default(),
        transport.clone(),
        RecordingFeedback::new(),
    );

    let fields = binder.bind(&option_form()).unwrap();
    fields[0].change("bob").unwrap();
    advance(1).await;

    let rebound = binder.bind(&option_form()).unwrap();
    assert_eq!(rebound[0].phase(), FieldPhase::Success);
    assert_eq!(transport.requests().len(), 1);
}
