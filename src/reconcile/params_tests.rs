//! Tests for `ParameterSet`.

use serde_json::{Map, Value, json};

use super::{Field, ParameterSet, Provenance};
use crate::resource::dns::DnsField;

fn object(value: Value) -> Map<String, Value> {
    value.as_object().cloned().unwrap()
}

mod desired {
    use super::*;

    #[test]
    fn reads_apply_codecs() {
        let want = ParameterSet::<DnsField>::desired(&object(json!({
            "cache": "enabled",
            "name_servers": "208.67.222.222",
            "search": ["localdomain", "lab.local"],
            "ip_version": 6,
        })));

        assert_eq!(want.provenance(), Provenance::Desired);
        assert_eq!(want.get(DnsField::Cache), Some(json!("enable")));
        assert_eq!(
            want.get(DnsField::NameServers),
            Some(json!(["208.67.222.222"]))
        );
        assert_eq!(
            want.get(DnsField::Search),
            Some(json!(["localdomain", "lab.local"]))
        );
        assert_eq!(want.get(DnsField::IpVersion), Some(json!("options inet6")));
    }

    #[test]
    fn omitted_and_null_fields_are_undefined() {
        let want = ParameterSet::<DnsField>::desired(&object(json!({ "search": null })));

        assert_eq!(want.get(DnsField::Search), None);
        assert_eq!(want.get(DnsField::NameServers), None);
        assert!(!want.is_set(DnsField::Search));
    }

    #[test]
    fn raw_value_is_kept_unencoded() {
        let want = ParameterSet::<DnsField>::desired(&object(json!({ "ip_version": 4 })));

        assert_eq!(want.raw(DnsField::IpVersion), Some(&json!(4)));
        assert_eq!(want.get(DnsField::IpVersion), Some(json!("")));
    }

    #[test]
    fn wire_names_are_not_accepted_as_input() {
        let want = ParameterSet::<DnsField>::desired(&object(json!({
            "nameServers": ["192.0.2.10"],
        })));

        assert_eq!(want.get(DnsField::NameServers), None);
    }

    #[test]
    fn repeated_reads_agree() {
        let want = ParameterSet::<DnsField>::desired(&object(json!({ "name_servers": "a" })));

        assert_eq!(
            want.get(DnsField::NameServers),
            want.get(DnsField::NameServers)
        );
    }
}

mod observed {
    use super::*;

    #[test]
    fn reads_by_wire_name_without_codec() {
        let have = ParameterSet::<DnsField>::observed(&object(json!({
            "kind": "tm:sys:dns:dnsstate",
            "include": "options inet6",
            "nameServers": ["192.0.2.10", "172.17.12.10"],
            "search": ["localdomain"],
        })));

        assert_eq!(have.provenance(), Provenance::Observed);
        assert_eq!(have.get(DnsField::IpVersion), Some(json!("options inet6")));
        assert_eq!(
            have.get(DnsField::NameServers),
            Some(json!(["192.0.2.10", "172.17.12.10"]))
        );
        assert_eq!(have.get(DnsField::Cache), None);
    }

    #[test]
    fn null_values_are_undefined() {
        let have = ParameterSet::<DnsField>::observed(&object(json!({ "search": null })));

        assert_eq!(have.get(DnsField::Search), None);
    }
}

mod builder {
    use super::*;

    #[test]
    fn with_value_replaces_previous_value() {
        let set = ParameterSet::<DnsField>::new(Provenance::Desired)
            .with_value(DnsField::IpVersion, 4)
            .with_value(DnsField::IpVersion, 6);

        assert_eq!(set.get(DnsField::IpVersion), Some(json!("options inet6")));
    }

    #[test]
    fn present_fields_follow_declared_order() {
        let set = ParameterSet::<DnsField>::new(Provenance::Desired)
            .with_value(DnsField::IpVersion, 4)
            .with_value(DnsField::Cache, "enabled");

        let names: Vec<_> = set.present_fields().map(Field::name).collect();
        assert_eq!(names, ["cache", "ip_version"]);
    }
}

mod lists {
    use super::*;

    #[test]
    fn collection_reads_as_list() {
        let want = ParameterSet::<DnsField>::desired(&object(json!({ "search": "lab.local" })));

        assert_eq!(
            want.get_list(DnsField::Search),
            Some(vec![json!("lab.local")])
        );
        assert_eq!(want.get_list(DnsField::NameServers), None);
    }

    #[test]
    fn scalar_wire_value_is_wrapped() {
        let have = ParameterSet::<DnsField>::observed(&object(json!({ "search": "lab.local" })));

        assert_eq!(
            have.get_list(DnsField::Search),
            Some(vec![json!("lab.local")])
        );
    }
}
