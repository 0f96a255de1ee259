//! Azure install-configuration types.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// User-supplied resource tags, applied to every resource the installer
/// creates. Keyed deterministically so validation output is stable per input.
pub type UserTags = BTreeMap<String, String>;

/// Azure cloud environment the cluster is installed into.
///
/// Unrecognized wire values (including the empty string) deserialize into
/// [`CloudEnvironment::Other`] so validation can report them verbatim instead
/// of failing the parse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CloudEnvironment {
    /// The public Azure cloud.
    #[serde(rename = "AzurePublicCloud")]
    Public,
    /// The sovereign US Government cloud.
    #[serde(rename = "AzureUSGovernmentCloud")]
    USGovernment,
    /// The sovereign Chinese cloud.
    #[serde(rename = "AzureChinaCloud")]
    China,
    /// The sovereign German cloud.
    #[serde(rename = "AzureGermanCloud")]
    German,
    /// Any value outside the supported set, kept verbatim for error reporting.
    #[serde(untagged)]
    Other(String),
}

impl CloudEnvironment {
    /// The wire name of this environment.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Public => "AzurePublicCloud",
            Self::USGovernment => "AzureUSGovernmentCloud",
            Self::China => "AzureChinaCloud",
            Self::German => "AzureGermanCloud",
            Self::Other(name) => name,
        }
    }

    /// True when this is one of the supported cloud environments.
    pub fn is_supported(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl Default for CloudEnvironment {
    fn default() -> Self {
        Self::Other(String::new())
    }
}

impl fmt::Display for CloudEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How cluster egress traffic reaches the internet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutboundType {
    /// Egress through an installer-managed load balancer.
    Loadbalancer,
    /// Egress through a user-defined routing table; requires a pre-existing
    /// network supplied by the user.
    UserDefinedRouting,
    /// Any value outside the supported set, kept verbatim for error reporting.
    #[serde(untagged)]
    Other(String),
}

impl OutboundType {
    /// The wire name of this outbound type.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Loadbalancer => "Loadbalancer",
            Self::UserDefinedRouting => "UserDefinedRouting",
            Self::Other(name) => name,
        }
    }
}

impl Default for OutboundType {
    fn default() -> Self {
        Self::Loadbalancer
    }
}

impl fmt::Display for OutboundType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Root OS disk settings for machines in a pool.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OsDisk {
    /// Disk capacity in gigabytes. Zero means the platform default.
    #[serde(rename = "diskSizeGB")]
    pub disk_size_gb: i64,
}

/// Per-pool machine settings, used as the default for all machine pools when
/// set on [`Platform::default_machine_platform`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MachinePool {
    /// Availability zones the machines spread across.
    pub zones: Vec<String>,
    /// Azure instance size, e.g. `Standard_D4s_v3`. Empty means the default.
    pub instance_type: String,
    /// Root OS disk settings.
    pub os_disk: OsDisk,
}

/// Azure platform section of an install configuration.
///
/// Every field is defaultable so partial documents deserialize; validation is
/// responsible for rejecting anything mandatory that was left empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Platform {
    /// Azure region (location) the cluster is created in.
    pub region: String,

    /// Resource group containing the DNS zone for the cluster's base domain.
    pub base_domain_resource_group_name: String,

    /// Which Azure cloud environment to target.
    pub cloud_name: CloudEnvironment,

    /// How egress traffic leaves the cluster.
    pub outbound_type: OutboundType,

    /// Resource group containing the pre-existing network, when one is used.
    pub network_resource_group_name: String,

    /// Name of the pre-existing virtual network, when one is used.
    pub virtual_network: String,

    /// Subnet for compute machines within the pre-existing virtual network.
    pub compute_subnet: String,

    /// Subnet for control-plane machines within the pre-existing virtual
    /// network.
    pub control_plane_subnet: String,

    /// Default machine settings applied to all pools unless overridden.
    pub default_machine_platform: Option<MachinePool>,

    /// Additional tags applied to every created resource.
    pub user_tags: UserTags,

    /// Managed (ARO) variant marker. Networking and DNS are managed
    /// externally, which relaxes the mandatory-field set.
    pub aro: bool,
}

impl Platform {
    /// True for the managed (ARO) variant, where baseDomainResourceGroupName
    /// is optional.
    pub fn is_aro(&self) -> bool {
        self.aro
    }

    /// True when the user supplied a pre-existing virtual network instead of
    /// letting the installer create one.
    pub fn has_pre_existing_network(&self) -> bool {
        !self.virtual_network.is_empty()
    }
}
