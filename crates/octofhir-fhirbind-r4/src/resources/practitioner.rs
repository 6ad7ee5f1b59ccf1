//! Practitioner

use crate::datatypes::{
    Address, Attachment, CodeableConcept, ContactPoint, Extension, HumanName, Identifier, Meta,
    Narrative, Period, Reference,
};
use crate::primitives::{Boolean, Code, Date, Id, Uri};
use octofhir_fhirbind_core::{ContainedResource, complex_type, resource_type};

complex_type! {
    /// Certification, licenses, or training pertaining to the provision of care
    pub struct PractitionerQualification {
        @id: "id",
        extension: Vec<Extension> => "extension",
        modifier_extension: Vec<Extension> => "modifierExtension",
        identifier: Vec<Identifier> => "identifier",
        code: Option<CodeableConcept> => "code",
        period: Option<Period> => "period",
        issuer: Option<Reference> => "issuer",
    }
}

resource_type! {
    /// A person with a formal responsibility in the provisioning of healthcare
    pub struct Practitioner {
        id: Option<Id> => "id",
        meta: Option<Meta> => "meta",
        implicit_rules: Option<Uri> => "implicitRules",
        language: Option<Code> => "language",
        text: Option<Narrative> => "text",
        contained: Vec<ContainedResource> => "contained",
        extension: Vec<Extension> => "extension",
        modifier_extension: Vec<Extension> => "modifierExtension",
        identifier: Vec<Identifier> => "identifier",
        active: Option<Boolean> => "active",
        name: Vec<HumanName> => "name",
        telecom: Vec<ContactPoint> => "telecom",
        address: Vec<Address> => "address",
        gender: Option<Code> => "gender",
        birth_date: Option<Date> => "birthDate",
        photo: Vec<Attachment> => "photo",
        qualification: Vec<PractitionerQualification> => "qualification",
        communication: Vec<CodeableConcept> => "communication",
    }
}
