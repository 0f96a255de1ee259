//! # preflight-config
//!
//! Pre-provisioning validation for cloud cluster install configurations.
//!
//! ## Overview
//!
//! `preflight-config` checks a cloud-platform install configuration before
//! any resource is provisioned: region, cloud environment, outbound routing,
//! bring-your-own-network consistency, and user-supplied resource tags.
//! Validation is pure and exhaustive — every violated rule is collected into
//! an ordered list of structured field errors instead of stopping at the
//! first failure, so the caller can present all problems at once.
//!
//! ## Quick Start
//!
//! ```rust
//! use preflight_config::prelude::*;
//! use preflight_config::platform::azure;
//!
//! let platform = CloudPlatform::Azure(azure::Platform {
//!     region: "eastus".to_string(),
//!     base_domain_resource_group_name: "dns-group".to_string(),
//!     cloud_name: azure::CloudEnvironment::Public,
//!     ..azure::Platform::default()
//! });
//!
//! let errors = platform.validate(
//!     PublishingStrategy::External,
//!     &FieldPath::new("spec").child("platform"),
//! );
//! assert!(errors.is_empty());
//! ```
//!
//! When something is wrong, every error carries a dotted field path, a rule
//! kind, and a detail message, and the list collapses into a single
//! stable-format error for display:
//!
//! ```rust
//! use preflight_config::prelude::*;
//! use preflight_config::platform::azure;
//!
//! let platform = CloudPlatform::Azure(azure::Platform::default());
//! let errors = platform.validate(PublishingStrategy::External, &FieldPath::new("platform"));
//! let aggregate = errors.into_aggregate().unwrap();
//! assert!(aggregate.to_string().contains("platform.azure.region: Required value"));
//! ```
//!
//! ## Design
//!
//! - **Variant-tagged dispatch**: [`platform::CloudPlatform`] routes to the
//!   active platform's validator through a single
//!   `validate(strategy, field_path)` contract.
//! - **Exhaustive collection**: validators return a
//!   [`error::FieldErrorList`]; no rule violation hides another.
//! - **Pure and reentrant**: no I/O, no shared state; safe to call from any
//!   number of threads concurrently.

#![warn(missing_docs, rust_2024_compatibility)]
#![deny(unsafe_code)]

pub mod error;
pub mod field;
pub mod platform;
pub mod validation;

/// Convenient re-exports for common usage patterns.
pub mod prelude {
    pub use crate::error::{
        AggregateError, ConfigError, FieldError, FieldErrorKind, FieldErrorList, Result,
    };
    pub use crate::field::FieldPath;
    pub use crate::platform::{CloudPlatform, PublishingStrategy};
}
