//! Organization

use crate::datatypes::{
    Address, CodeableConcept, ContactPoint, Extension, HumanName, Identifier, Meta, Narrative,
    Reference,
};
use crate::primitives::{Boolean, Code, FhirString, Id, Uri};
use octofhir_fhirbind_core::{ContainedResource, complex_type, resource_type};

complex_type! {
    /// Contact for the organization for a certain purpose
    pub struct OrganizationContact {
        @id: "id",
        extension: Vec<Extension> => "extension",
        modifier_extension: Vec<Extension> => "modifierExtension",
        purpose: Option<CodeableConcept> => "purpose",
        name: Option<HumanName> => "name",
        telecom: Vec<ContactPoint> => "telecom",
        address: Option<Address> => "address",
    }
}

resource_type! {
    /// A grouping of people or organizations with a common purpose
    pub struct Organization {
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
        type_: Vec<CodeableConcept> => "type",
        name: Option<FhirString> => "name",
        alias: Vec<FhirString> => "alias",
        telecom: Vec<ContactPoint> => "telecom",
        address: Vec<Address> => "address",
        part_of: Option<Reference> => "partOf",
        contact: Vec<OrganizationContact> => "contact",
    }
}
