//! Shared fixtures for the integration tests

#![allow(dead_code)]

use octofhir_fhirbind::r4::{
    Coding, Condition, ConditionOnset, Extension, ExtensionValue, FhirString, HumanName, Patient,
    PatientDeceased, Reference,
};
use serde_json::Value;

pub const FLAG_URL: &str = "http://example.org/fhir/StructureDefinition/flag";

/// Parse a JSON literal used as test input
pub fn json(text: &str) -> Value {
    serde_json::from_str(text).expect("test input must be valid JSON")
}

/// A boolean flag extension
pub fn flag(value: bool) -> Extension {
    Extension::new(FLAG_URL, ExtensionValue::Boolean(value.into()))
}

/// A patient with a name whose middle given name carries an extension
pub fn patient_with_names() -> Patient {
    Patient {
        id: Some("example".into()),
        active: Some(true.into()),
        name: vec![HumanName {
            family: Some("Chalmers".into()),
            given: vec![
                "Peter".into(),
                FhirString::from("James").with_extension(flag(true)),
                "Jim".into(),
            ],
            ..HumanName::default()
        }],
        gender: Some("male".into()),
        birth_date: Some(FhirString::from("1974-12-25").with_extension(flag(false))),
        deceased: Some(PatientDeceased::Boolean(false.into())),
        managing_organization: Some(Reference::to("Organization/1")),
        ..Patient::default()
    }
}

/// A condition with an onset and a coded category
pub fn condition(onset: ConditionOnset) -> Condition {
    Condition {
        id: Some("c1".into()),
        category: vec![octofhir_fhirbind::r4::CodeableConcept {
            coding: vec![Coding::new(
                "http://terminology.hl7.org/CodeSystem/condition-category",
                "problem-list-item",
            )],
            ..Default::default()
        }],
        subject: Some(Reference::to("Patient/example")),
        onset: Some(onset),
        ..Condition::default()
    }
}
