#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use formstate::{Control, ControlBridge, ControlId, ControlWrite, FormState, Value};

/// In-memory control set that records every write.
#[derive(Default)]
pub struct RecordingBridge {
    controls: Vec<Control>,
    writes: Mutex<Vec<(ControlId, ControlWrite)>>,
}

impl RecordingBridge {
    pub fn new(controls: Vec<Control>) -> Arc<Self> {
        Arc::new(Self {
            controls,
            writes: Mutex::new(Vec::new()),
        })
    }

    pub fn writes(&self) -> Vec<(ControlId, ControlWrite)> {
        self.writes.lock().unwrap().clone()
    }

    pub fn clear(&self) {
        self.writes.lock().unwrap().clear();
    }

    /// Last value written to the control with `id`.
    pub fn last_write(&self, id: usize) -> Option<ControlWrite> {
        self.writes
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|(cid, _)| *cid == ControlId(id))
            .map(|(_, w)| w.clone())
    }
}

impl ControlBridge for RecordingBridge {
    fn controls(&self) -> Vec<Control> {
        self.controls.clone()
    }

    fn write(&self, id: ControlId, write: ControlWrite) {
        self.writes.lock().unwrap().push((id, write));
    }
}

/// Collects every tree a store subscription delivers.
pub type Seen = Arc<Mutex<Vec<Value>>>;

pub fn watch_values(form: &FormState) -> Seen {
    let seen: Seen = Arc::default();
    let sink = Arc::clone(&seen);
    form.subscribe_values(move |v| sink.lock().unwrap().push(v.clone()));
    seen.lock().unwrap().clear();
    seen
}

pub fn watch_touched(form: &FormState) -> Seen {
    let seen: Seen = Arc::default();
    let sink = Arc::clone(&seen);
    form.subscribe_touched(move |v| sink.lock().unwrap().push(v.clone()));
    seen.lock().unwrap().clear();
    seen
}

pub fn watch_errors(form: &FormState) -> Seen {
    let seen: Seen = Arc::default();
    let sink = Arc::clone(&seen);
    form.subscribe_errors(move |v| sink.lock().unwrap().push(v.clone()));
    seen.lock().unwrap().clear();
    seen
}
