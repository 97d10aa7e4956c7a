use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use autosave_protocol::{
    field::{FieldName, Form},
    messages::SaveRequest,
    outcome::{FieldPhase, Outcome},
};
use kv_log_macro as log;
use rustc_hash::{FxHashMap, FxHashSet};
use tokio::task::{AbortHandle, JoinHandle};

use crate::{
    config::{BinderConfig, ConcurrencyPolicy},
    error::BindError,
    feedback::FeedbackSink,
    transport::{HttpTransport, SaveTransport},
};

#[derive(Default)]
struct FieldSlot {
    phase: FieldPhase,
    generation: u64,
    /// Outcome last handed to the feedback sink
    shown: Outcome,
    tasks: Vec<AbortHandle>,
}

struct Shared {
    config: BinderConfig,
    transport: Arc<dyn SaveTransport>,
    feedback: Arc<dyn FeedbackSink>,
    fields: Mutex<FxHashMap<FieldName, FieldSlot>>,
    /// Held across every indicator change, outside the registry lock
    indicator_order: Mutex<()>,
}

impl Shared {
    fn fields(&self) -> MutexGuard<'_, FxHashMap<FieldName, FieldSlot>> {
        self.fields.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn indicator_order(&self) -> MutexGuard<'_, ()> {
        self.indicator_order
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Show `outcome` on `field` on behalf of save `generation`.
    ///
    /// Returns false, without touching the field, when a newer edit or a
    /// cancel has superseded that save.
    fn settle(&self, field: &FieldName, generation: u64, outcome: Outcome) -> bool {
        let _order = self.indicator_order();

        {
            let mut fields = self.fields();
            let Some(slot) = fields.get_mut(field) else {
                return false;
            };

            if self.config.policy == ConcurrencyPolicy::Supersede && slot.generation != generation
            {
                return false;
            }

            slot.phase = outcome.into();
            slot.shown = outcome;
        }

        self.indicate(field, outcome);
        true
    }

    fn indicate(&self, field: &FieldName, outcome: Outcome) {
        let indicator = self.config.indicator.indicator_for(outcome);
        self.feedback.indicate(field, outcome, indicator.as_ref());
    }
}

/// Binds the text fields of a form and saves every change to the server.
///
/// Cloning is cheap; clones share the same field registry. Saves are spawned
/// onto the current tokio runtime.
#[derive(Clone)]
pub struct Binder {
    shared: Arc<Shared>,
}

impl Binder {
    pub fn new(
        config: BinderConfig,
        transport: Arc<dyn SaveTransport>,
        feedback: Arc<dyn FeedbackSink>,
    ) -> Self {
        Binder {
            shared: Arc::new(Shared {
                config,
                transport,
                feedback,
                fields: Mutex::new(FxHashMap::default()),
                indicator_order: Mutex::new(()),
            }),
        }
    }

    /// Build a binder that saves over HTTP as described by `config`
    pub fn from_config(
        config: BinderConfig,
        feedback: Arc<dyn FeedbackSink>,
    ) -> Result<Self, BindError> {
        let transport = HttpTransport::new(&config)?;
        log::info!("Saving fields to", { url: transport.url() });
        Ok(Binder::new(config, Arc::new(transport), feedback))
    }

    pub fn config(&self) -> &BinderConfig {
        &self.shared.config
    }

    /// Register every text field of `form` within the configured scope
    pub fn bind(&self, form: &Form) -> Result<Vec<BoundField>, BindError> {
        let config = &self.shared.config;
        if form.name != config.form_name {
            return Err(BindError::FormNotFound {
                expected: config.form_name.clone(),
                found: form.name.clone(),
            });
        }

        let mut seen = FxHashSet::default();
        let mut bound = Vec::new();
        let mut fields = self.shared.fields();

        for input in form.text_fields(config.scope) {
            let Ok(name) = FieldName::new(input.name.as_str()) else {
                log::warn!("Skipping text input without a name");
                continue;
            };

            if !seen.insert(name.clone()) {
                log::warn!("Duplicate field name", { field: name.as_str() });
                continue;
            }

            fields.entry(name.clone()).or_default();
            bound.push(BoundField {
                name,
                binder: self.clone(),
            });
        }

        log::debug!("Bound form", {
            form: form.name.as_str(),
            fields: bound.len() as u64
        });

        Ok(bound)
    }

    pub fn bound_fields(&self) -> Vec<FieldName> {
        let mut names: Vec<_> = self.shared.fields().keys().cloned().collect();
        names.sort();
        names
    }

    pub fn phase(&self, name: &str) -> Option<FieldPhase> {
        let name = FieldName::new(name).ok()?;
        self.shared.fields().get(&name).map(|slot| slot.phase)
    }

    /// Save `value` for the bound field `name`.
    ///
    /// The request is sent immediately; nothing is queued, coalesced or
    /// retried.
    pub fn save_option(
        &self,
        name: &str,
        value: impl Into<String>,
    ) -> Result<SaveTicket, BindError> {
        let name = FieldName::new(name)?;
        self.save_field(name, value.into())
    }

    fn save_field(&self, name: FieldName, value: String) -> Result<SaveTicket, BindError> {
        let shared = &self.shared;
        let request = SaveRequest::new(name.clone(), value).with_table(shared.config.table.clone());

        let mut fields = shared.fields();
        let slot = fields
            .get_mut(&name)
            .ok_or_else(|| BindError::UnknownField(name.to_string()))?;

        slot.generation += 1;
        slot.phase = FieldPhase::Pending;
        slot.tasks.retain(|task| !task.is_finished());

        if shared.config.policy == ConcurrencyPolicy::Supersede {
            for task in slot.tasks.drain(..) {
                log::debug!("Superseding earlier save", { field: name.as_str() });
                task.abort();
            }
        }

        let generation = slot.generation;
        let handle = tokio::spawn(run_save(shared.clone(), request, generation));
        slot.tasks.push(handle.abort_handle());

        Ok(SaveTicket {
            field: name,
            generation,
            handle,
        })
    }

    /// Abort in-flight saves and reversion timers of `name`.
    ///
    /// The field returns to neutral, and an indicator still on screen is
    /// cleared.
    pub fn cancel(&self, name: &str) {
        let Ok(name) = FieldName::new(name) else {
            return;
        };

        let _order = self.shared.indicator_order();
        let cleared = match self.shared.fields().get_mut(&name) {
            Some(slot) => cancel_slot(&name, slot),
            None => false,
        };

        if cleared {
            self.shared.indicate(&name, Outcome::Neutral);
        }
    }

    pub fn cancel_all(&self) {
        let _order = self.shared.indicator_order();
        let cleared: Vec<FieldName> = self
            .shared
            .fields()
            .iter_mut()
            .filter_map(|(name, slot)| cancel_slot(name, slot).then(|| name.clone()))
            .collect();

        for name in &cleared {
            self.shared.indicate(name, Outcome::Neutral);
        }
    }
}

/// Returns whether an indicator was showing and must be cleared
fn cancel_slot(name: &FieldName, slot: &mut FieldSlot) -> bool {
    log::debug!("Cancelling saves", { field: name.as_str() });

    slot.generation += 1;
    for task in slot.tasks.drain(..) {
        task.abort();
    }

    slot.phase = FieldPhase::Neutral;
    std::mem::take(&mut slot.shown) != Outcome::Neutral
}

async fn run_save(shared: Arc<Shared>, request: SaveRequest, generation: u64) -> Option<Outcome> {
    let field = request.name.clone();

    let result = shared.transport.save(&request).await;
    let outcome = match &result {
        Ok(_) => Outcome::Success,
        Err(_) => Outcome::Error,
    };

    if !shared.settle(&field, generation, outcome) {
        log::debug!("Dropping superseded response", {
            field: field.as_str(),
            generation: generation
        });
        return None;
    }

    match result {
        Ok(_) => {
            log::info!("Saved field", { field: field.as_str() });
        }
        Err(err) => {
            log::warn!("Failed to save field: {}", err, { field: field.as_str() });
            if shared.config.alert_on_error {
                shared.feedback.alert(&field, &err.raw_payload());
            }
        }
    }

    if let Some(delay) = shared.config.revert_after() {
        tokio::time::sleep(delay).await;

        if shared.settle(&field, generation, Outcome::Neutral) {
            log::trace!("Reverted indicator", { field: field.as_str() });
        }
    }

    Some(outcome)
}

/// Change handler of one bound field. The field identity is captured here,
/// so a change never has to look the field up by a rebuilt selector.
#[derive(Clone)]
pub struct BoundField {
    name: FieldName,
    binder: Binder,
}

impl BoundField {
    pub fn name(&self) -> &FieldName {
        &self.name
    }

    pub fn change(&self, value: impl Into<String>) -> Result<SaveTicket, BindError> {
        self.binder.save_field(self.name.clone(), value.into())
    }

    pub fn phase(&self) -> FieldPhase {
        self.binder
            .shared
            .fields()
            .get(&self.name)
            .map(|slot| slot.phase)
            .unwrap_or_default()
    }
}

/// Handle on a spawned save
pub struct SaveTicket {
    field: FieldName,
    generation: u64,
    handle: JoinHandle<Option<Outcome>>,
}

impl SaveTicket {
    pub fn field(&self) -> &FieldName {
        &self.field
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Wait until the save is over, reversion included.
    ///
    /// Yields the outcome that was shown, or `None` when the save was
    /// superseded or cancelled.
    pub async fn settled(self) -> Option<Outcome> {
        self.handle.await.ok().flatten()
    }
}
