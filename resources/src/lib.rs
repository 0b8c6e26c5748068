//! UI-independent state bindings for the back-office console.
//!
//! [`ResourceHook`] binds one backend collection to observable state,
//! [`GeographyCascade`] chains the country, state and district hooks, and
//! [`form::FormController`] runs the local checks a form needs before it
//! submits.

pub mod cascade;
pub mod catalog;
pub mod config;
pub mod form;
pub mod resource;
pub mod validation;

pub use cascade::{AxisState, GeographyCascade, Selection};
pub use config::{ListRoute, ResourceConfig, Routes};
pub use form::{FormController, FormMode, SaveGuard, SubmitError};
pub use resource::{
    ResourceError, ResourceHook, ResourceSnapshot, StalePolicy, Subscription,
};
pub use validation::ValidationError;
