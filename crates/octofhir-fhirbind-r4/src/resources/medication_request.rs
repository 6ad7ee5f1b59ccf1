//! MedicationRequest

use crate::datatypes::{
    Annotation, CodeableConcept, Dosage, Duration, Extension, Identifier, Meta, Narrative, Period,
    Reference, SimpleQuantity,
};
use crate::primitives::{Boolean, Canonical, Code, DateTime, Id, UnsignedInt, Uri};
use octofhir_fhirbind_core::{ContainedResource, choice_type, complex_type, resource_type};

choice_type! {
    /// `MedicationRequest.reported[x]`
    pub enum MedicationRequestReported {
        Boolean(Boolean),
        Reference(Reference),
    }
}

choice_type! {
    /// `MedicationRequest.medication[x]`
    pub enum MedicationRequestMedication {
        CodeableConcept(CodeableConcept),
        Reference(Reference),
    }
}

choice_type! {
    /// `MedicationRequest.substitution.allowed[x]`
    pub enum MedicationRequestSubstitutionAllowed {
        Boolean(Boolean),
        CodeableConcept(CodeableConcept),
    }
}

complex_type! {
    /// First fill details
    pub struct MedicationRequestInitialFill {
        @id: "id",
        extension: Vec<Extension> => "extension",
        modifier_extension: Vec<Extension> => "modifierExtension",
        quantity: Option<SimpleQuantity> => "quantity",
        duration: Option<Duration> => "duration",
    }
}

complex_type! {
    /// Medication supply authorization
    pub struct MedicationRequestDispenseRequest {
        @id: "id",
        extension: Vec<Extension> => "extension",
        modifier_extension: Vec<Extension> => "modifierExtension",
        initial_fill: Option<MedicationRequestInitialFill> => "initialFill",
        dispense_interval: Option<Duration> => "dispenseInterval",
        validity_period: Option<Period> => "validityPeriod",
        number_of_repeats_allowed: Option<UnsignedInt> => "numberOfRepeatsAllowed",
        quantity: Option<SimpleQuantity> => "quantity",
        expected_supply_duration: Option<Duration> => "expectedSupplyDuration",
        performer: Option<Reference> => "performer",
    }
}

complex_type! {
    /// Any restrictions on medication substitution
    pub struct MedicationRequestSubstitution {
        @id: "id",
        extension: Vec<Extension> => "extension",
        modifier_extension: Vec<Extension> => "modifierExtension",
        allowed: Option<MedicationRequestSubstitutionAllowed> => "allowed",
        reason: Option<CodeableConcept> => "reason",
    }
}

resource_type! {
    /// Ordering of medication for patient or group
    pub struct MedicationRequest {
        id: Option<Id> => "id",
        meta: Option<Meta> => "meta",
        implicit_rules: Option<Uri> => "implicitRules",
        language: Option<Code> => "language",
        text: Option<Narrative> => "text",
        contained: Vec<ContainedResource> => "contained",
        extension: Vec<Extension> => "extension",
        modifier_extension: Vec<Extension> => "modifierExtension",
        identifier: Vec<Identifier> => "identifier",
        status: Option<Code> => "status",
        status_reason: Option<CodeableConcept> => "statusReason",
        intent: Option<Code> => "intent",
        category: Vec<CodeableConcept> => "category",
        priority: Option<Code> => "priority",
        do_not_perform: Option<Boolean> => "doNotPerform",
        reported: Option<MedicationRequestReported> => "reported",
        medication: Option<MedicationRequestMedication> => "medication",
        subject: Option<Reference> => "subject",
        encounter: Option<Reference> => "encounter",
        supporting_information: Vec<Reference> => "supportingInformation",
        authored_on: Option<DateTime> => "authoredOn",
        requester: Option<Reference> => "requester",
        performer: Option<Reference> => "performer",
        performer_type: Option<CodeableConcept> => "performerType",
        recorder: Option<Reference> => "recorder",
        reason_code: Vec<CodeableConcept> => "reasonCode",
        reason_reference: Vec<Reference> => "reasonReference",
        instantiates_canonical: Vec<Canonical> => "instantiatesCanonical",
        instantiates_uri: Vec<Uri> => "instantiatesUri",
        based_on: Vec<Reference> => "basedOn",
        group_identifier: Option<Identifier> => "groupIdentifier",
        course_of_therapy_type: Option<CodeableConcept> => "courseOfTherapyType",
        insurance: Vec<Reference> => "insurance",
        note: Vec<Annotation> => "note",
        dosage_instruction: Vec<Dosage> => "dosageInstruction",
        dispense_request: Option<MedicationRequestDispenseRequest> => "dispenseRequest",
        substitution: Option<MedicationRequestSubstitution> => "substitution",
        prior_prescription: Option<Reference> => "priorPrescription",
        detected_issue: Vec<Reference> => "detectedIssue",
        event_history: Vec<Reference> => "eventHistory",
    }
}
