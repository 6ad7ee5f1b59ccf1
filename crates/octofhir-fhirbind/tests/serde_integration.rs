//! Resources inside ordinary serde data models

mod common;

use common::{condition, patient_with_names};
use octofhir_fhirbind::r4::{Condition, ConditionOnset, Patient};
use octofhir_fhirbind::{CodecError, ContainedResource};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct Envelope {
    source: String,
    patient: Patient,
    conditions: Vec<Condition>,
}

#[test]
fn resources_compose_with_derived_types() {
    let envelope = Envelope {
        source: "ehr".to_string(),
        patient: patient_with_names(),
        conditions: vec![condition(ConditionOnset::String("x".into()))],
    };
    let text = serde_json::to_string(&envelope).unwrap();
    assert!(text.contains(r#""patient":{"resourceType":"Patient""#));

    let back: Envelope = serde_json::from_str(&text).unwrap();
    assert_eq!(back, envelope);
}

#[test]
fn codec_errors_surface_as_serde_errors() {
    let text = r#"{"source":"x","patient":{"resourceType":"Condition"},"conditions":[]}"#;
    let err = serde_json::from_str::<Envelope>(text).unwrap_err();
    assert!(err.to_string().contains("expected resource type 'Patient'"));
}

#[test]
fn contained_resource_serializes_with_discriminator() {
    let items = vec![
        ContainedResource::new(Patient::default()),
        ContainedResource::new(Condition::default()),
    ];
    assert_eq!(
        serde_json::to_string(&items).unwrap(),
        r#"[{"resourceType":"Patient"},{"resourceType":"Condition"}]"#
    );
}

#[test]
fn diagnostics_carry_stable_codes() {
    let err = octofhir_fhirbind::r4::from_json(r#"{"resourceType":"Nope"}"#).unwrap_err();
    let diagnostic = err.to_diagnostic();
    assert_eq!(diagnostic.code.to_string(), "FHB0200");
    assert!(diagnostic.message.contains("Nope"));
    assert!(matches!(err, CodecError::UnrecognizedType(_)));
}

proptest! {
    #[test]
    fn onset_strings_survive_json_and_xml(text in "[a-zA-Z0-9 <>&\"'.,;:!?-]{1,40}") {
        let original = condition(ConditionOnset::String(text.as_str().into()));

        let json = serde_json::to_string(&original).unwrap();
        let from_json: Condition = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(&from_json, &original);

        let xml = octofhir_fhirbind::r4::to_xml(&original).unwrap();
        let from_xml = octofhir_fhirbind::r4::from_xml(&xml).unwrap();
        prop_assert_eq!(from_xml.downcast_ref::<Condition>(), Some(&original));
    }
}
