//! Create/edit form state on top of a resource hook.
//!
//! A submission is checked locally (required fields, duplicate name among
//! the loaded items) and only then sent. A successful save closes the form;
//! a failed one leaves it open with the caller's values untouched.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use payloads::{Record, requests::Draft};
use serde_json::Value;

use crate::resource::{ResourceError, ResourceHook};
use crate::validation::{self, ValidationError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode<Id> {
    Closed,
    Creating,
    Editing(Id),
}

/// Whether a form refuses a second submission while one is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveGuard {
    Enabled,
    Disabled,
}

#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    #[error("A save is already in progress")]
    Busy,
    #[error("The form is not open")]
    Closed,
    #[error(transparent)]
    Resource(#[from] ResourceError),
}

/// Counts one submission in flight for as long as it lives, including when
/// its future is dropped.
struct InFlight(Rc<Cell<usize>>);

impl InFlight {
    fn start(count: &Rc<Cell<usize>>) -> Self {
        count.set(count.get() + 1);
        Self(count.clone())
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        self.0.set(self.0.get().saturating_sub(1));
    }
}

pub struct FormController<T: Record> {
    hook: ResourceHook<T>,
    mode: Rc<RefCell<FormMode<T::Id>>>,
    in_flight: Rc<Cell<usize>>,
    guard: SaveGuard,
}

impl<T: Record> Clone for FormController<T> {
    fn clone(&self) -> Self {
        Self {
            hook: self.hook.clone(),
            mode: self.mode.clone(),
            in_flight: self.in_flight.clone(),
            guard: self.guard,
        }
    }
}

impl<T: Record> FormController<T> {
    pub fn new(hook: ResourceHook<T>, guard: SaveGuard) -> Self {
        Self {
            hook,
            mode: Rc::new(RefCell::new(FormMode::Closed)),
            in_flight: Rc::default(),
            guard,
        }
    }

    pub fn hook(&self) -> &ResourceHook<T> {
        &self.hook
    }

    pub fn mode(&self) -> FormMode<T::Id> {
        self.mode.borrow().clone()
    }

    pub fn is_open(&self) -> bool {
        !matches!(*self.mode.borrow(), FormMode::Closed)
    }

    /// True while any submission is awaiting the server.
    pub fn is_saving(&self) -> bool {
        self.in_flight.get() > 0
    }

    pub fn open_create(&self) {
        *self.mode.borrow_mut() = FormMode::Creating;
    }

    pub fn open_edit(&self, id: T::Id) {
        *self.mode.borrow_mut() = FormMode::Editing(id);
    }

    pub fn close(&self) {
        *self.mode.borrow_mut() = FormMode::Closed;
    }

    /// Validate `draft` and create or update depending on the mode.
    pub async fn submit<D: Draft>(&self, draft: &D) -> Result<Value, SubmitError> {
        let editing = match self.mode() {
            FormMode::Closed => return Err(SubmitError::Closed),
            FormMode::Creating => None,
            FormMode::Editing(id) => Some(id),
        };

        validation::require_all(&draft.required_fields())?;
        self.hook.check_unique(draft.display_name(), editing.as_ref())?;

        if self.guard == SaveGuard::Enabled && self.is_saving() {
            return Err(SubmitError::Busy);
        }
        let _in_flight = InFlight::start(&self.in_flight);

        let response = match &editing {
            None => self.hook.create(draft).await?,
            Some(id) => self.hook.update(id, draft).await?,
        };
        self.close();
        Ok(response)
    }
}
