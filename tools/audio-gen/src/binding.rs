//! Runtime counterpart of the generated `Initialize`
//!
//! Mirrors the binding protocol of the slot form: every slot starts empty, one
//! call binds all of them in declaration order, and every later call is a
//! no-op. The state lives in the value, not in a process-wide static, so a
//! host can own several independent tables.

use hashbrown::HashMap;

use crate::model::EventTable;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InitState {
    #[default]
    Uninitialized,
    Initialized,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BindError {
    #[error("Initialize expects {expected} references, got {actual}")]
    Arity { expected: usize, actual: usize },
}

/// Event slots bound once from externally resolved references
#[derive(Debug)]
pub struct EventBindings<R> {
    index: HashMap<String, usize>,
    slots: Vec<Option<R>>,
    state: InitState,
}

impl<R> EventBindings<R> {
    /// Empty slots for every record of `table`, in declaration order
    pub fn new(table: &EventTable) -> Self {
        Self::from_labels(table.labels())
    }

    /// Slots for `labels` in order; a repeated label refers to its first slot.
    pub fn from_labels<'a>(labels: impl IntoIterator<Item = &'a str>) -> Self {
        let mut index: HashMap<String, usize> = HashMap::new();
        for label in labels {
            let next = index.len();
            index.entry(label.to_string()).or_insert(next);
        }
        let slots = std::iter::repeat_with(|| None).take(index.len()).collect();
        Self {
            index,
            slots,
            state: InitState::Uninitialized,
        }
    }

    pub fn state(&self) -> InitState {
        self.state
    }

    /// Bind every slot, in declaration order.
    ///
    /// Returns `Ok(false)` without looking at `references` when already
    /// initialized. A wrong number of references leaves the bindings
    /// uninitialized.
    pub fn initialize(&mut self, references: Vec<R>) -> Result<bool, BindError> {
        if self.state == InitState::Initialized {
            return Ok(false);
        }
        if references.len() != self.slots.len() {
            return Err(BindError::Arity {
                expected: self.slots.len(),
                actual: references.len(),
            });
        }

        for (slot, reference) in self.slots.iter_mut().zip(references) {
            *slot = Some(reference);
        }
        self.state = InitState::Initialized;
        Ok(true)
    }

    /// Bound reference for `label`; `None` before initialization or for an
    /// unknown label.
    pub fn get(&self, label: &str) -> Option<&R> {
        self.index.get(label).and_then(|&i| self.slots[i].as_ref())
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}
