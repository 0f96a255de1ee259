//! Cloud-platform configuration types.

pub mod azure;

use crate::error::FieldErrorList;
use crate::field::FieldPath;
use crate::validation;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How the cluster's endpoints are published.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PublishingStrategy {
    /// Endpoints are reachable from outside the cluster network.
    #[default]
    External,
    /// Endpoints are only reachable from inside the cluster network.
    Internal,
}

impl fmt::Display for PublishingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::External => f.write_str("External"),
            Self::Internal => f.write_str("Internal"),
        }
    }
}

/// The active cloud platform of an install configuration.
///
/// Each variant carries its platform-specific configuration; validation
/// dispatches on the variant tag to the matching platform validator. Today
/// Azure is the only variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CloudPlatform {
    /// Microsoft Azure.
    Azure(azure::Platform),
}

impl CloudPlatform {
    /// Wire name of the active platform, used as the field-path segment for
    /// its errors.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Azure(_) => "azure",
        }
    }

    /// Validate the active platform's configuration, including its user tags.
    ///
    /// Returns every violated rule; an empty list means the configuration is
    /// ready for provisioning.
    pub fn validate(
        &self,
        strategy: PublishingStrategy,
        field_path: &FieldPath,
    ) -> FieldErrorList {
        match self {
            Self::Azure(platform) => {
                let path = field_path.child(self.name());
                let mut errs = validation::azure::validate_platform(platform, strategy, &path);
                errs.extend(validation::azure::validate_user_tags(
                    &platform.user_tags,
                    &path.child("userTags"),
                ));
                errs
            }
        }
    }
}
