#[cfg(test)]
mod tests {
    use prism::model::{
        AbsoluteDateFilter, Aggregation, ArithmeticMeasureDefinition, AttributeFilterElements,
        FilterItem, MeasureDefinition, ObjQualifier, OverPeriodDateAttribute,
        OverPeriodMeasureDefinition, PopMeasureDefinition, PositiveAttributeFilter,
        PreviousPeriodDateDataSet, PreviousPeriodMeasureDefinition, SimpleMeasureDefinition,
        ValidationError,
    };
    use serde_json::json;
    use std::collections::HashMap;

    fn all_measure_kinds() -> Vec<MeasureDefinition> {
        vec![
            MeasureDefinition::Simple(
                SimpleMeasureDefinition::new(ObjQualifier::uri("/projects/p1/obj/9"))
                    .with_aggregation(Aggregation::Sum),
            ),
            MeasureDefinition::Pop(PopMeasureDefinition::new(
                "m1",
                Some(ObjQualifier::identifier("attr.year")),
            )),
            MeasureDefinition::OverPeriod(
                OverPeriodMeasureDefinition::new(
                    "m1",
                    vec![OverPeriodDateAttribute::new(
                        ObjQualifier::identifier("attr.year"),
                        1,
                    )],
                )
                .unwrap(),
            ),
            MeasureDefinition::PreviousPeriod(
                PreviousPeriodMeasureDefinition::new(
                    "m1",
                    vec![PreviousPeriodDateDataSet::new(
                        ObjQualifier::identifier("date.created"),
                        1,
                    )],
                )
                .unwrap(),
            ),
            MeasureDefinition::Arithmetic(ArithmeticMeasureDefinition::new(
                vec!["m1".to_string(), "m2".to_string()],
                "ratio",
            )),
        ]
    }

    #[test]
    fn test_wire_round_trip_every_kind() {
        for definition in all_measure_kinds() {
            let encoded = serde_json::to_string(&definition).unwrap();
            let decoded: MeasureDefinition = serde_json::from_str(&encoded).unwrap();
            assert_eq!(decoded, definition, "round trip failed for {encoded}");
        }
    }

    #[test]
    fn test_wrapper_object_discriminators() {
        let expected_keys = [
            "measure",
            "popMeasure",
            "overPeriodMeasure",
            "previousPeriodMeasure",
            "arithmeticMeasure",
        ];
        for (definition, key) in all_measure_kinds().iter().zip(expected_keys) {
            let value = serde_json::to_value(definition).unwrap();
            let object = value.as_object().unwrap();
            assert_eq!(object.len(), 1);
            assert!(object.contains_key(key), "missing wrapper key {key}");
        }
    }

    #[test]
    fn test_simple_measure_wire_shape() {
        let definition = MeasureDefinition::Simple(
            SimpleMeasureDefinition::new(ObjQualifier::identifier("metric.revenue"))
                .with_aggregation(Aggregation::Runsum)
                .with_compute_ratio(true),
        );
        assert_eq!(
            serde_json::to_value(&definition).unwrap(),
            json!({
                "measure": {
                    "item": {"identifier": "metric.revenue"},
                    "aggregation": "runsum",
                    "computeRatio": true
                }
            })
        );
    }

    #[test]
    fn test_bare_simple_measure_is_not_ad_hoc() {
        let definition = MeasureDefinition::Simple(SimpleMeasureDefinition::new(
            ObjQualifier::uri("/projects/p1/obj/9"),
        ));
        assert!(!definition.is_ad_hoc());
    }

    #[test]
    fn test_simple_measure_ad_hoc_triggers() {
        let base = SimpleMeasureDefinition::new(ObjQualifier::uri("/projects/p1/obj/9"));
        assert!(base.clone().with_aggregation(Aggregation::Avg).is_ad_hoc());
        assert!(base.clone().with_compute_ratio(true).is_ad_hoc());
        assert!(!base.clone().with_compute_ratio(false).is_ad_hoc());
        assert!(base
            .with_filters(vec![FilterItem::PositiveAttribute(
                PositiveAttributeFilter::new(
                    ObjQualifier::identifier("label.region"),
                    AttributeFilterElements::Values(vec!["East".to_string()]),
                )
            )])
            .is_ad_hoc());
    }

    #[test]
    fn test_derived_and_arithmetic_are_always_ad_hoc() {
        for definition in all_measure_kinds().into_iter().skip(1) {
            assert!(definition.is_ad_hoc(), "{definition:?} must be ad hoc");
        }
    }

    #[test]
    fn test_derived_from_exposes_master_identifier() {
        let kinds = all_measure_kinds();
        assert_eq!(kinds[0].derived_from(), None);
        assert_eq!(kinds[1].derived_from(), Some("m1"));
        assert_eq!(kinds[2].derived_from(), Some("m1"));
        assert_eq!(kinds[3].derived_from(), Some("m1"));
        assert_eq!(kinds[4].derived_from(), None);
    }

    #[test]
    fn test_empty_date_attributes_rejected() {
        let err = OverPeriodMeasureDefinition::new("m1", Vec::new()).unwrap_err();
        assert_eq!(
            err,
            ValidationError::EmptyField {
                type_name: "OverPeriodMeasureDefinition",
                field: "dateAttributes",
            }
        );
    }

    #[test]
    fn test_empty_date_data_sets_rejected() {
        let err = PreviousPeriodMeasureDefinition::new("m1", Vec::new()).unwrap_err();
        assert_eq!(
            err,
            ValidationError::EmptyField {
                type_name: "PreviousPeriodMeasureDefinition",
                field: "dateDataSets",
            }
        );
    }

    #[test]
    fn test_simple_measure_rewrite_recurses_into_filters() {
        let mapping: HashMap<String, String> = [
            ("metric.revenue".to_string(), "/projects/p1/obj/9".to_string()),
            ("date.created".to_string(), "/projects/p1/obj/5".to_string()),
        ]
        .into_iter()
        .collect();

        let definition = MeasureDefinition::Simple(
            SimpleMeasureDefinition::new(ObjQualifier::identifier("metric.revenue")).with_filters(
                vec![FilterItem::AbsoluteDate(AbsoluteDateFilter::new(
                    ObjQualifier::identifier("date.created"),
                    None,
                    None,
                ))],
            ),
        );

        let MeasureDefinition::Simple(rewritten) =
            definition.with_uri_qualifiers(&mapping).unwrap()
        else {
            panic!("kind changed during rewrite");
        };
        assert_eq!(rewritten.item, ObjQualifier::uri("/projects/p1/obj/9"));
        let FilterItem::AbsoluteDate(filter) = &rewritten.filters[0] else {
            panic!("filter kind changed during rewrite");
        };
        assert_eq!(filter.data_set, ObjQualifier::uri("/projects/p1/obj/5"));
    }

    #[test]
    fn test_over_period_rewrites_every_entry() {
        let mapping: HashMap<String, String> = [
            ("attr.year".to_string(), "/projects/p1/obj/2".to_string()),
            ("attr.quarter".to_string(), "/projects/p1/obj/3".to_string()),
        ]
        .into_iter()
        .collect();

        let definition = MeasureDefinition::OverPeriod(
            OverPeriodMeasureDefinition::new(
                "m1",
                vec![
                    OverPeriodDateAttribute::new(ObjQualifier::identifier("attr.year"), 1),
                    OverPeriodDateAttribute::new(ObjQualifier::identifier("attr.quarter"), -2),
                ],
            )
            .unwrap(),
        );

        let MeasureDefinition::OverPeriod(rewritten) =
            definition.with_uri_qualifiers(&mapping).unwrap()
        else {
            panic!("kind changed during rewrite");
        };
        assert_eq!(
            rewritten.date_attributes[0].attribute,
            ObjQualifier::uri("/projects/p1/obj/2")
        );
        assert_eq!(rewritten.date_attributes[0].periods_ago, 1);
        assert_eq!(
            rewritten.date_attributes[1].attribute,
            ObjQualifier::uri("/projects/p1/obj/3")
        );
        assert_eq!(rewritten.date_attributes[1].periods_ago, -2);
    }

    #[test]
    fn test_rewrite_fails_on_unresolved_qualifier() {
        let mapping: HashMap<String, String> = HashMap::new();
        let definition = MeasureDefinition::PreviousPeriod(
            PreviousPeriodMeasureDefinition::new(
                "m1",
                vec![PreviousPeriodDateDataSet::new(
                    ObjQualifier::identifier("date.created"),
                    1,
                )],
            )
            .unwrap(),
        );
        let err = definition.with_uri_qualifiers(&mapping).unwrap_err();
        assert_eq!(err.identifier, "date.created");
    }

    #[test]
    fn test_arithmetic_rewrite_is_noop() {
        let mapping: HashMap<String, String> = HashMap::new();
        let definition = MeasureDefinition::Arithmetic(ArithmeticMeasureDefinition::new(
            vec!["m1".to_string(), "m2".to_string()],
            "change",
        ));
        assert_eq!(definition.with_uri_qualifiers(&mapping).unwrap(), definition);
        assert!(definition.obj_qualifiers().is_empty());
    }

    #[test]
    fn test_rewrite_is_idempotent_on_uri_only_tree() {
        let mapping: HashMap<String, String> = HashMap::new();
        let definition = MeasureDefinition::Pop(PopMeasureDefinition::new(
            "m1",
            Some(ObjQualifier::uri("/projects/p1/obj/2")),
        ));
        assert_eq!(definition.with_uri_qualifiers(&mapping).unwrap(), definition);
    }
}
