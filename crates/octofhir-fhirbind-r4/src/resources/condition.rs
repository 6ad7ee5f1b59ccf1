//! Condition

use crate::datatypes::{
    Age, Annotation, CodeableConcept, Extension, Identifier, Meta, Narrative, Period, Range,
    Reference,
};
use crate::primitives::{Code, DateTime, FhirString, Id, Uri};
use octofhir_fhirbind_core::{ContainedResource, choice_type, complex_type, resource_type};

choice_type! {
    /// `Condition.onset[x]`
    pub enum ConditionOnset {
        DateTime(DateTime),
        Age(Age),
        Period(Period),
        Range(Range),
        String(FhirString),
    }
}

choice_type! {
    /// `Condition.abatement[x]`
    pub enum ConditionAbatement {
        DateTime(DateTime),
        Age(Age),
        Period(Period),
        Range(Range),
        String(FhirString),
    }
}

complex_type! {
    /// Stage/grade, usually assessed formally
    pub struct ConditionStage {
        @id: "id",
        extension: Vec<Extension> => "extension",
        modifier_extension: Vec<Extension> => "modifierExtension",
        summary: Option<CodeableConcept> => "summary",
        assessment: Vec<Reference> => "assessment",
        type_: Option<CodeableConcept> => "type",
    }
}

complex_type! {
    /// Supporting evidence
    pub struct ConditionEvidence {
        @id: "id",
        extension: Vec<Extension> => "extension",
        modifier_extension: Vec<Extension> => "modifierExtension",
        code: Vec<CodeableConcept> => "code",
        detail: Vec<Reference> => "detail",
    }
}

resource_type! {
    /// Detailed information about conditions, problems or diagnoses
    pub struct Condition {
        id: Option<Id> => "id",
        meta: Option<Meta> => "meta",
        implicit_rules: Option<Uri> => "implicitRules",
        language: Option<Code> => "language",
        text: Option<Narrative> => "text",
        contained: Vec<ContainedResource> => "contained",
        extension: Vec<Extension> => "extension",
        modifier_extension: Vec<Extension> => "modifierExtension",
        identifier: Vec<Identifier> => "identifier",
        clinical_status: Option<CodeableConcept> => "clinicalStatus",
        verification_status: Option<CodeableConcept> => "verificationStatus",
        category: Vec<CodeableConcept> => "category",
        severity: Option<CodeableConcept> => "severity",
        code: Option<CodeableConcept> => "code",
        body_site: Vec<CodeableConcept> => "bodySite",
        subject: Option<Reference> => "subject",
        encounter: Option<Reference> => "encounter",
        onset: Option<ConditionOnset> => "onset",
        abatement: Option<ConditionAbatement> => "abatement",
        recorded_date: Option<DateTime> => "recordedDate",
        recorder: Option<Reference> => "recorder",
        asserter: Option<Reference> => "asserter",
        stage: Vec<ConditionStage> => "stage",
        evidence: Vec<ConditionEvidence> => "evidence",
        note: Vec<Annotation> => "note",
    }
}
