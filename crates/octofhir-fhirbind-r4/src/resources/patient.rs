//! Patient

use crate::datatypes::{
    Address, Attachment, CodeableConcept, ContactPoint, Extension, HumanName, Identifier, Meta,
    Narrative, Period, Reference,
};
use crate::primitives::{Boolean, Code, Date, DateTime, Id, Integer, Uri};
use octofhir_fhirbind_core::{ContainedResource, choice_type, complex_type, resource_type};

choice_type! {
    /// `Patient.deceased[x]`
    pub enum PatientDeceased {
        Boolean(Boolean),
        DateTime(DateTime),
    }
}

choice_type! {
    /// `Patient.multipleBirth[x]`
    pub enum PatientMultipleBirth {
        Boolean(Boolean),
        Integer(Integer),
    }
}

complex_type! {
    /// A contact party (e.g. guardian, partner, friend) for the patient
    pub struct PatientContact {
        @id: "id",
        extension: Vec<Extension> => "extension",
        modifier_extension: Vec<Extension> => "modifierExtension",
        relationship: Vec<CodeableConcept> => "relationship",
        name: Option<HumanName> => "name",
        telecom: Vec<ContactPoint> => "telecom",
        address: Option<Address> => "address",
        gender: Option<Code> => "gender",
        organization: Option<Reference> => "organization",
        period: Option<Period> => "period",
    }
}

complex_type! {
    /// A language which may be used to communicate with the patient
    pub struct PatientCommunication {
        @id: "id",
        extension: Vec<Extension> => "extension",
        modifier_extension: Vec<Extension> => "modifierExtension",
        language: Option<CodeableConcept> => "language",
        preferred: Option<Boolean> => "preferred",
    }
}

complex_type! {
    /// Link to another patient resource that concerns the same actual person
    pub struct PatientLink {
        @id: "id",
        extension: Vec<Extension> => "extension",
        modifier_extension: Vec<Extension> => "modifierExtension",
        other: Option<Reference> => "other",
        type_: Option<Code> => "type",
    }
}

resource_type! {
    /// Information about an individual receiving health care services
    pub struct Patient {
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
        gender: Option<Code> => "gender",
        birth_date: Option<Date> => "birthDate",
        deceased: Option<PatientDeceased> => "deceased",
        address: Vec<Address> => "address",
        marital_status: Option<CodeableConcept> => "maritalStatus",
        multiple_birth: Option<PatientMultipleBirth> => "multipleBirth",
        photo: Vec<Attachment> => "photo",
        contact: Vec<PatientContact> => "contact",
        communication: Vec<PatientCommunication> => "communication",
        general_practitioner: Vec<Reference> => "generalPractitioner",
        managing_organization: Option<Reference> => "managingOrganization",
        link: Vec<PatientLink> => "link",
    }
}
