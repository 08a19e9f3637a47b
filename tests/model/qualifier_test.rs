#[cfg(test)]
mod tests {
    use prism::model::{ConversionError, ObjQualifier};
    use serde_json::json;
    use std::collections::HashMap;

    #[test]
    fn test_wire_format_is_structural() {
        assert_eq!(
            serde_json::to_value(ObjQualifier::identifier("attr.region")).unwrap(),
            json!({"identifier": "attr.region"})
        );
        assert_eq!(
            serde_json::to_value(ObjQualifier::uri("/projects/p1/obj/42")).unwrap(),
            json!({"uri": "/projects/p1/obj/42"})
        );
    }

    #[test]
    fn test_wire_round_trip() {
        for qualifier in [
            ObjQualifier::identifier("attr.region"),
            ObjQualifier::uri("/projects/p1/obj/42"),
        ] {
            let encoded = serde_json::to_string(&qualifier).unwrap();
            let decoded: ObjQualifier = serde_json::from_str(&encoded).unwrap();
            assert_eq!(decoded, qualifier);
        }
    }

    #[test]
    fn test_with_uri_resolves_through_map() {
        let mapping: HashMap<String, String> =
            [("attr.region".to_string(), "/projects/p1/obj/42".to_string())]
                .into_iter()
                .collect();

        let resolved = ObjQualifier::identifier("attr.region")
            .with_uri(&mapping)
            .unwrap();
        assert_eq!(resolved, ObjQualifier::uri("/projects/p1/obj/42"));
    }

    #[test]
    fn test_with_uri_is_identity_on_uri_qualifier() {
        let mapping: HashMap<String, String> = HashMap::new();
        let qualifier = ObjQualifier::uri("/projects/p1/obj/42");
        assert_eq!(qualifier.with_uri(&mapping).unwrap(), qualifier);
    }

    #[test]
    fn test_with_uri_fails_on_missing_mapping() {
        let mapping: HashMap<String, String> = HashMap::new();
        let err = ObjQualifier::identifier("attr.region")
            .with_uri(&mapping)
            .unwrap_err();
        assert_eq!(
            err,
            ConversionError {
                identifier: "attr.region".to_string()
            }
        );
    }

    #[test]
    fn test_variants_never_compare_equal() {
        assert_ne!(ObjQualifier::identifier("x"), ObjQualifier::uri("x"));
    }
}
