//! Pre-provisioning validation rules.
//!
//! One submodule per cloud platform. Every validator is a pure function from
//! a configuration fragment and a field-path prefix to a
//! [`FieldErrorList`](crate::error::FieldErrorList): evaluation is exhaustive
//! and never short-circuits, so the caller can surface every problem at once.

pub mod azure;
