//! Tests for value codecs.

use serde_json::{Value, json};

use super::{Codec, fq_name};

const CACHE: Codec = Codec::EnumNormalize {
    truthy: &["enabled", "enable"],
    on: "enable",
    off: "disable",
};

const IP_VERSION: Codec = Codec::SentinelMap(&[(6, "options inet6"), (4, "")]);

mod identity {
    use super::*;

    #[test]
    fn encode_passes_value_through() {
        assert_eq!(Codec::Identity.encode(&json!(20)), Some(json!(20)));
        assert_eq!(Codec::Identity.encode(&json!("text")), Some(json!("text")));
    }

    #[test]
    fn null_is_undefined_both_ways() {
        assert_eq!(Codec::Identity.encode(&Value::Null), None);
        assert_eq!(Codec::Identity.decode(&Value::Null), None);
    }
}

mod enum_normalize {
    use super::*;

    #[test]
    fn enabled_and_enable_map_to_enable() {
        assert_eq!(CACHE.encode(&json!("enabled")), Some(json!("enable")));
        assert_eq!(CACHE.encode(&json!("enable")), Some(json!("enable")));
    }

    #[test]
    fn any_other_value_maps_to_disable() {
        assert_eq!(CACHE.encode(&json!("disabled")), Some(json!("disable")));
        assert_eq!(CACHE.encode(&json!("disable")), Some(json!("disable")));
        assert_eq!(CACHE.encode(&json!("bogus")), Some(json!("disable")));
        assert_eq!(CACHE.encode(&json!(1)), Some(json!("disable")));
    }

    #[test]
    fn booleans_select_tokens_directly() {
        assert_eq!(CACHE.encode(&json!(true)), Some(json!("enable")));
        assert_eq!(CACHE.encode(&json!(false)), Some(json!("disable")));
    }

    #[test]
    fn null_stays_undefined() {
        assert_eq!(CACHE.encode(&Value::Null), None);
    }

    #[test]
    fn decode_returns_wire_token() {
        assert_eq!(CACHE.decode(&json!("enable")), Some(json!("enable")));
    }
}

mod toggle {
    use super::*;

    const FLAG: Codec = Codec::Toggle {
        truthy: &["enabled", "yes"],
        on: "enabled",
        off: "disabled",
    };

    #[test]
    fn encodes_like_enum_normalize() {
        assert_eq!(FLAG.encode(&json!(true)), Some(json!("enabled")));
        assert_eq!(FLAG.encode(&json!("yes")), Some(json!("enabled")));
        assert_eq!(FLAG.encode(&json!("no")), Some(json!("disabled")));
    }

    #[test]
    fn decodes_tokens_to_booleans() {
        assert_eq!(FLAG.decode(&json!("enabled")), Some(json!(true)));
        assert_eq!(FLAG.decode(&json!("disabled")), Some(json!(false)));
    }

    #[test]
    fn unknown_token_is_undefined() {
        assert_eq!(FLAG.decode(&json!("maybe")), None);
        assert_eq!(FLAG.decode(&Value::Null), None);
    }
}

mod collection_normalize {
    use super::*;

    const LIST: Codec = Codec::CollectionNormalize;

    #[test]
    fn bare_string_becomes_single_element_list() {
        assert_eq!(
            LIST.encode(&json!("208.67.222.222")),
            Some(json!(["208.67.222.222"]))
        );
    }

    #[test]
    fn empty_sentinels_become_empty_list() {
        assert_eq!(LIST.encode(&json!("")), Some(json!([])));
        assert_eq!(LIST.encode(&json!("none")), Some(json!([])));
        assert_eq!(LIST.encode(&json!([""])), Some(json!([])));
        assert_eq!(LIST.encode(&json!(["none"])), Some(json!([])));
    }

    #[test]
    fn sequences_pass_through_unchanged() {
        let value = json!(["b", "a", "c"]);
        assert_eq!(LIST.encode(&value), Some(value));
    }

    #[test]
    fn sentinel_inside_longer_list_is_kept() {
        let value = json!(["none", "a"]);
        assert_eq!(LIST.encode(&value), Some(value));
    }

    #[test]
    fn null_stays_undefined() {
        assert_eq!(LIST.encode(&Value::Null), None);
    }
}

mod sentinel_map {
    use super::*;

    #[test]
    fn ip_version_round_trips() {
        let four = IP_VERSION.encode(&json!(4)).unwrap();
        let six = IP_VERSION.encode(&json!(6)).unwrap();

        assert_eq!(IP_VERSION.decode(&four), Some(json!(4)));
        assert_eq!(IP_VERSION.decode(&six), Some(json!(6)));
    }

    #[test]
    fn encode_produces_configuration_fragment() {
        assert_eq!(IP_VERSION.encode(&json!(6)), Some(json!("options inet6")));
        assert_eq!(IP_VERSION.encode(&json!(4)), Some(json!("")));
    }

    #[test]
    fn encode_accepts_numeric_strings() {
        assert_eq!(IP_VERSION.encode(&json!("6")), Some(json!("options inet6")));
    }

    #[test]
    fn unmapped_values_are_undefined() {
        assert_eq!(IP_VERSION.encode(&Value::Null), None);
        assert_eq!(IP_VERSION.encode(&json!(5)), None);
        assert_eq!(IP_VERSION.decode(&json!("options rotate")), None);
        assert_eq!(IP_VERSION.decode(&json!(6)), None);
    }

    #[test]
    fn decode_maps_wire_strings() {
        assert_eq!(IP_VERSION.decode(&json!("")), Some(json!(4)));
        assert_eq!(IP_VERSION.decode(&json!("options inet6")), Some(json!(6)));
    }
}

mod full_path {
    use super::*;

    const PARENT: Codec = Codec::FullPath {
        partition: "Common",
    };

    #[test]
    fn short_name_is_qualified() {
        assert_eq!(PARENT.encode(&json!("bar")), Some(json!("/Common/bar")));
    }

    #[test]
    fn full_path_passes_through() {
        assert_eq!(
            PARENT.encode(&json!("/Tenant/bar")),
            Some(json!("/Tenant/bar"))
        );
    }

    #[test]
    fn fq_name_uses_given_partition() {
        assert_eq!(fq_name("Tenant", "http2"), "/Tenant/http2");
    }
}
