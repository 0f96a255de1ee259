//! Validation rules for the Azure platform section.

use crate::error::{FieldError, FieldErrorList};
use crate::field::FieldPath;
use crate::platform::PublishingStrategy;
use crate::platform::azure::{MachinePool, OutboundType, Platform, UserTags};
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::BTreeSet;
use tracing::{debug, trace};

/// Maximum number of user tags Azure allows per resource.
pub const MAX_USER_TAGS: usize = 10;

/// Cloud environments the installer can target.
pub const SUPPORTED_CLOUD_NAMES: [&str; 4] = [
    "AzurePublicCloud",
    "AzureUSGovernmentCloud",
    "AzureChinaCloud",
    "AzureGermanCloud",
];

/// Outbound routing mechanisms the installer can configure.
pub const SUPPORTED_OUTBOUND_TYPES: [&str; 2] = ["Loadbalancer", "UserDefinedRouting"];

lazy_static! {
    /// Tag keys: start with a letter, then letters, digits and `_ . = + - @`,
    /// 128 characters total at most.
    static ref TAG_KEY_REGEX: Regex = Regex::new(r"^[a-zA-Z][a-zA-Z0-9_.=+@-]{0,127}$").unwrap();

    /// Tag values: letters, digits and `_ . = + - @`, 1 to 256 characters.
    static ref TAG_VALUE_REGEX: Regex = Regex::new(r"^[a-zA-Z0-9_.=+@-]{1,256}$").unwrap();
}

/// Validate the Azure platform section of an install configuration.
///
/// Every rule is evaluated independently; the returned list holds one entry
/// per violated rule, in rule order, each addressed relative to `field_path`.
/// An empty list means the section is valid.
pub fn validate_platform(
    platform: &Platform,
    strategy: PublishingStrategy,
    field_path: &FieldPath,
) -> FieldErrorList {
    trace!(region = %platform.region, %strategy, "validating azure platform");
    let mut errs = FieldErrorList::new();

    if platform.region.is_empty() {
        errs.push(FieldError::required(
            field_path.child("region"),
            "region should be set to one of the supported Azure regions",
        ));
    }

    // The managed (ARO) variant hosts DNS externally, so the base-domain
    // resource group is optional there.
    if platform.base_domain_resource_group_name.is_empty() && !platform.is_aro() {
        errs.push(FieldError::required(
            field_path.child("baseDomainResourceGroupName"),
            "baseDomainResourceGroupName is the resource group name where the azure dns zone is deployed",
        ));
    }

    if let Some(pool) = &platform.default_machine_platform {
        errs.extend(validate_machine_pool(
            pool,
            &field_path.child("defaultMachinePlatform"),
        ));
    }

    if !platform.virtual_network.is_empty() {
        if platform.compute_subnet.is_empty() {
            errs.push(FieldError::required(
                field_path.child("computeSubnet"),
                "must provide a compute subnet when a virtual network is specified",
            ));
        }
        if platform.control_plane_subnet.is_empty() {
            errs.push(FieldError::required(
                field_path.child("controlPlaneSubnet"),
                "must provide a control plane subnet when a virtual network is specified",
            ));
        }
        if platform.network_resource_group_name.is_empty() {
            errs.push(FieldError::required(
                field_path.child("networkResourceGroupName"),
                "must provide a network resource group when a virtual network is specified",
            ));
        }
    }

    // Checked against the declared virtual network, independently of the
    // block above; both network-resource-group errors can co-occur.
    if !platform.compute_subnet.is_empty() || !platform.control_plane_subnet.is_empty() {
        if platform.virtual_network.is_empty() {
            errs.push(FieldError::required(
                field_path.child("virtualNetwork"),
                "must provide a virtual network when supplying subnets",
            ));
        }
        if platform.network_resource_group_name.is_empty() {
            errs.push(FieldError::required(
                field_path.child("networkResourceGroupName"),
                "must provide a network resource group when supplying subnets",
            ));
        }
    }

    if !platform.cloud_name.is_supported() {
        errs.push(FieldError::unsupported(
            field_path.child("cloudName"),
            platform.cloud_name.as_str(),
            &SUPPORTED_CLOUD_NAMES,
        ));
    }

    match &platform.outbound_type {
        OutboundType::Loadbalancer => {}
        OutboundType::UserDefinedRouting => {
            if !platform.has_pre_existing_network() {
                errs.push(FieldError::invalid(
                    field_path.child("outboundType"),
                    platform.outbound_type.as_str(),
                    "UserDefinedRouting is only allowed when installing to pre-existing network",
                ));
            }
        }
        OutboundType::Other(name) => {
            errs.push(FieldError::unsupported(
                field_path.child("outboundType"),
                name.as_str(),
                &SUPPORTED_OUTBOUND_TYPES,
            ));
        }
    }

    if !errs.is_empty() {
        debug!(errors = errs.len(), "azure platform failed validation");
    }
    errs
}

/// Validate a machine-pool fragment.
pub fn validate_machine_pool(pool: &MachinePool, field_path: &FieldPath) -> FieldErrorList {
    let mut errs = FieldErrorList::new();

    if pool.os_disk.disk_size_gb < 0 {
        errs.push(FieldError::invalid(
            field_path.child("osDisk").child("diskSizeGB"),
            pool.os_disk.disk_size_gb.to_string(),
            "storage disk size must be positive",
        ));
    }

    let mut seen = BTreeSet::new();
    for zone in &pool.zones {
        if !seen.insert(zone) {
            errs.push(FieldError::duplicate(field_path.child("zones"), zone));
        }
    }

    errs
}

/// Validate user-supplied resource tags.
///
/// Checks the tag count against [`MAX_USER_TAGS`], each key and value against
/// the Azure charset and length rules, and each key against the reserved
/// names. Tags are visited in key order, so output is deterministic per
/// input.
pub fn validate_user_tags(tags: &UserTags, field_path: &FieldPath) -> FieldErrorList {
    trace!(tags = tags.len(), "validating azure user tags");
    let mut errs = FieldErrorList::new();

    if tags.len() > MAX_USER_TAGS {
        errs.push(FieldError::invalid(
            field_path,
            tags.len().to_string(),
            format!("a maximum of {} user tags can be applied", MAX_USER_TAGS),
        ));
    }

    for (key, value) in tags {
        let tag_path = field_path.key(key);
        if !TAG_KEY_REGEX.is_match(key) {
            errs.push(FieldError::invalid(
                &tag_path,
                key,
                "tag key must begin with a letter and contain no more than 128 \
                 letters, digits, or the characters '_', '.', '=', '+', '-', '@'",
            ));
        }
        if is_reserved_tag_key(key) {
            errs.push(FieldError::invalid(
                &tag_path,
                key,
                "tag key is reserved for platform use",
            ));
        }
        if !TAG_VALUE_REGEX.is_match(value) {
            errs.push(FieldError::invalid(
                &tag_path,
                value,
                "tag value must contain no more than 256 letters, digits, or \
                 the characters '_', '.', '=', '+', '-', '@'",
            ));
        }
    }

    errs
}

/// Reserved tag keys: `name` (any case) and `azure` are claimed by the
/// platform, and the `kubernetes.io` prefix belongs to Kubernetes. Prefix
/// matching is exact-prefix, so keys like `for_openshift.io` stay allowed.
fn is_reserved_tag_key(key: &str) -> bool {
    key.eq_ignore_ascii_case("name") || key == "azure" || key.starts_with("kubernetes.io")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::azure::{CloudEnvironment, OsDisk};

    fn valid_platform() -> Platform {
        Platform {
            region: "eastus".to_string(),
            base_domain_resource_group_name: "group".to_string(),
            outbound_type: OutboundType::Loadbalancer,
            cloud_name: CloudEnvironment::Public,
            ..Platform::default()
        }
    }

    fn valid_network_platform() -> Platform {
        Platform {
            network_resource_group_name: "networkresourcegroup".to_string(),
            virtual_network: "virtualnetwork".to_string(),
            compute_subnet: "computesubnet".to_string(),
            control_plane_subnet: "controlplanesubnet".to_string(),
            ..valid_platform()
        }
    }

    fn aggregate(platform: &Platform) -> Option<String> {
        validate_platform(
            platform,
            PublishingStrategy::External,
            &FieldPath::new("test-path"),
        )
        .into_aggregate()
        .map(|agg| agg.to_string())
    }

    #[test]
    fn minimal_platform_is_valid() {
        assert_eq!(aggregate(&valid_platform()), None);
    }

    #[test]
    fn network_platform_is_valid() {
        assert_eq!(aggregate(&valid_network_platform()), None);
    }

    #[test]
    fn empty_machine_pool_is_valid() {
        let mut p = valid_platform();
        p.default_machine_platform = Some(MachinePool::default());
        assert_eq!(aggregate(&p), None);
    }

    #[test]
    fn empty_region_is_required() {
        let mut p = valid_platform();
        p.region = String::new();
        assert_eq!(
            aggregate(&p).unwrap(),
            "test-path.region: Required value: region should be set to one of the supported Azure regions"
        );
    }

    #[test]
    fn empty_base_domain_resource_group_is_required() {
        let mut p = valid_platform();
        p.base_domain_resource_group_name = String::new();
        assert_eq!(
            aggregate(&p).unwrap(),
            "test-path.baseDomainResourceGroupName: Required value: baseDomainResourceGroupName is the resource group name where the azure dns zone is deployed"
        );
    }

    #[test]
    fn aro_variant_does_not_require_base_domain_resource_group() {
        let mut p = valid_platform();
        p.base_domain_resource_group_name = String::new();
        p.aro = true;
        assert_eq!(aggregate(&p), None);
    }

    #[test]
    fn missing_control_plane_subnet_is_required() {
        let mut p = valid_network_platform();
        p.control_plane_subnet = String::new();
        assert_eq!(
            aggregate(&p).unwrap(),
            "test-path.controlPlaneSubnet: Required value: must provide a control plane subnet when a virtual network is specified"
        );
    }

    #[test]
    fn subnets_without_virtual_network_require_it() {
        let mut p = valid_network_platform();
        p.control_plane_subnet = String::new();
        p.virtual_network = String::new();
        assert_eq!(
            aggregate(&p).unwrap(),
            "test-path.virtualNetwork: Required value: must provide a virtual network when supplying subnets"
        );
    }

    #[test]
    fn missing_network_resource_group_reports_both_rules() {
        let mut p = valid_network_platform();
        p.network_resource_group_name = String::new();
        assert_eq!(
            aggregate(&p).unwrap(),
            "[test-path.networkResourceGroupName: Required value: must provide a network resource group when a virtual network is specified, test-path.networkResourceGroupName: Required value: must provide a network resource group when supplying subnets]"
        );
    }

    #[test]
    fn empty_cloud_name_is_unsupported() {
        let mut p = valid_platform();
        p.cloud_name = CloudEnvironment::Other(String::new());
        let msg = aggregate(&p).unwrap();
        assert!(
            msg.starts_with("test-path.cloudName: Unsupported value: \"\": supported values:"),
            "unexpected message: {msg}"
        );
        for name in SUPPORTED_CLOUD_NAMES {
            assert!(msg.contains(&format!("{:?}", name)), "missing {name} in: {msg}");
        }
    }

    #[test]
    fn unrecognized_cloud_name_is_unsupported() {
        let mut p = valid_platform();
        p.cloud_name = CloudEnvironment::Other("AzureOtherCloud".to_string());
        let msg = aggregate(&p).unwrap();
        assert!(
            msg.starts_with(
                "test-path.cloudName: Unsupported value: \"AzureOtherCloud\": supported values:"
            ),
            "unexpected message: {msg}"
        );
    }

    #[test]
    fn unrecognized_outbound_type_is_unsupported() {
        let mut p = valid_network_platform();
        p.outbound_type = OutboundType::Other("random-egress".to_string());
        assert_eq!(
            aggregate(&p).unwrap(),
            "test-path.outboundType: Unsupported value: \"random-egress\": supported values: \"Loadbalancer\", \"UserDefinedRouting\""
        );
    }

    #[test]
    fn user_defined_routing_requires_pre_existing_network() {
        let mut p = valid_platform();
        p.outbound_type = OutboundType::UserDefinedRouting;
        assert_eq!(
            aggregate(&p).unwrap(),
            "test-path.outboundType: Invalid value: \"UserDefinedRouting\": UserDefinedRouting is only allowed when installing to pre-existing network"
        );
    }

    #[test]
    fn user_defined_routing_with_network_is_valid() {
        let mut p = valid_network_platform();
        p.outbound_type = OutboundType::UserDefinedRouting;
        assert_eq!(aggregate(&p), None);
    }

    #[test]
    fn negative_disk_size_is_invalid() {
        let pool = MachinePool {
            os_disk: OsDisk { disk_size_gb: -1 },
            ..MachinePool::default()
        };
        let errs = validate_machine_pool(&pool, &FieldPath::new("pool"));
        assert_eq!(
            errs.into_aggregate().unwrap().to_string(),
            "pool.osDisk.diskSizeGB: Invalid value: \"-1\": storage disk size must be positive"
        );
    }

    #[test]
    fn duplicate_zones_are_reported() {
        let pool = MachinePool {
            zones: vec!["1".to_string(), "2".to_string(), "2".to_string()],
            ..MachinePool::default()
        };
        let errs = validate_machine_pool(&pool, &FieldPath::new("pool"));
        assert_eq!(
            errs.into_aggregate().unwrap().to_string(),
            "pool.zones: Duplicate value: \"2\""
        );
    }

    fn tags(pairs: &[(&str, &str)]) -> UserTags {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn user_tags_rule_table() {
        let cases: Vec<(&str, UserTags, bool)> = vec![
            ("not configured", tags(&[]), false),
            (
                "all allowed characters",
                tags(&[
                    ("key1", "value1"),
                    ("key_2", "value_2"),
                    ("key.3", "value.3"),
                    ("key=4", "value=4"),
                    ("key+5", "value+5"),
                    ("key-6", "value-6"),
                    ("key@7", "value@7"),
                    ("key8_", "value8-"),
                    ("key9=", "value9+"),
                    ("key10-", "value10@"),
                ]),
                false,
            ),
            (
                "more than the maximum",
                tags(&[
                    ("key1", "value1"),
                    ("key2", "value2"),
                    ("key3", "value3"),
                    ("key4", "value4"),
                    ("key5", "value5"),
                    ("key6", "value6"),
                    ("key7", "value7"),
                    ("key8", "value8"),
                    ("key9", "value9"),
                    ("key10", "value10"),
                    ("key11", "value11"),
                ]),
                true,
            ),
            ("key starting with a digit", tags(&[("1key", "1value")]), true),
            ("empty key", tags(&[("", "value")]), true),
            (
                "key longer than 128 characters",
                tags(&[(
                    "thisisaverylongkeywithmorethan128characterswhichisnotallowedforazureresourcetagkeysandthetagkeyvalidationshouldfailwithinvalidfieldvalueerror",
                    "value",
                )]),
                true,
            ),
            ("key with invalid character", tags(&[("key/test", "value")]), true),
            (
                "value longer than 256 characters",
                tags(&[(
                    "key",
                    "thisisaverylongvaluewithmorethan256characterswhichisnotallowedforazureresourcetagvaluesandthetagvaluevalidationshouldfailwithinvalidfieldvalueerrorrepeatthisisaverylongvaluewithmorethan256characterswhichisnotallowedforazureresourcetagvaluesandthetagvaluevalidationshouldfailwithinvalidfieldvalueerror",
                )]),
                true,
            ),
            ("empty value", tags(&[("key", "")]), true),
            ("value with invalid characters", tags(&[("key", "value*^%")]), true),
            ("reserved key name", tags(&[("name", "value")]), true),
            ("allowed key name123", tags(&[("name123", "value")]), false),
            (
                "reserved prefix kubernetes.io",
                tags(&[("kubernetes.io_cluster", "value")]),
                true,
            ),
            (
                "allowed prefix for_openshift.io",
                tags(&[("for_openshift.io", "azure")]),
                false,
            ),
            ("reserved key azure", tags(&[("azure", "microsoft")]), true),
            ("allowed key resourcename", tags(&[("resourcename", "value")]), false),
        ];

        let path = FieldPath::new("spec.platform.azure.userTags");
        for (name, tags, want_err) in cases {
            let errs = validate_user_tags(&tags, &path);
            assert_eq!(
                !errs.is_empty(),
                want_err,
                "case {name:?}: unexpected result: {:?}",
                errs.into_aggregate().map(|a| a.to_string())
            );
        }
    }

    #[test]
    fn each_violating_tag_is_reported() {
        let tags = tags(&[("1bad", "ok"), ("alsobad*", "worse*"), ("fine", "ok")]);
        let errs = validate_user_tags(&tags, &FieldPath::new("userTags"));
        // Key "1bad", key "alsobad*", and value "worse*" each violate a rule.
        assert_eq!(errs.len(), 3);
        let paths: Vec<&str> = errs.iter().map(|e| e.path.as_str()).collect();
        assert_eq!(
            paths,
            vec!["userTags[1bad]", "userTags[alsobad*]", "userTags[alsobad*]"]
        );
    }

    #[test]
    fn tag_limit_reports_single_aggregate_error() {
        let many: UserTags = (0..11)
            .map(|i| (format!("key{i}"), format!("value{i}")))
            .collect();
        let errs = validate_user_tags(&many, &FieldPath::new("userTags"));
        assert_eq!(errs.len(), 1);
        assert_eq!(
            errs.into_aggregate().unwrap().to_string(),
            "userTags: Invalid value: \"11\": a maximum of 10 user tags can be applied"
        );
    }
}
