//! Observation

use crate::datatypes::{
    Annotation, CodeableConcept, Extension, Identifier, Meta, Narrative, Period, Quantity, Range,
    Ratio, Reference, SampledData, SimpleQuantity, Timing,
};
use crate::primitives::{
    Boolean, Code, DateTime, FhirString, Id, Instant, Integer, Time, Uri,
};
use octofhir_fhirbind_core::{ContainedResource, choice_type, complex_type, resource_type};

choice_type! {
    /// `Observation.effective[x]`
    pub enum ObservationEffective {
        DateTime(DateTime),
        Period(Period),
        Timing(Timing),
        Instant(Instant),
    }
}

choice_type! {
    /// `Observation.value[x]`
    pub enum ObservationValue {
        Quantity(Quantity),
        CodeableConcept(CodeableConcept),
        String(FhirString),
        Boolean(Boolean),
        Integer(Integer),
        Range(Range),
        Ratio(Ratio),
        SampledData(SampledData),
        Time(Time),
        DateTime(DateTime),
        Period(Period),
    }
}

choice_type! {
    /// `Observation.component.value[x]`
    pub enum ObservationComponentValue {
        Quantity(Quantity),
        CodeableConcept(CodeableConcept),
        String(FhirString),
        Boolean(Boolean),
        Integer(Integer),
        Range(Range),
        Ratio(Ratio),
        SampledData(SampledData),
        Time(Time),
        DateTime(DateTime),
        Period(Period),
    }
}

complex_type! {
    /// Provides guide for interpretation
    pub struct ObservationReferenceRange {
        @id: "id",
        extension: Vec<Extension> => "extension",
        modifier_extension: Vec<Extension> => "modifierExtension",
        low: Option<SimpleQuantity> => "low",
        high: Option<SimpleQuantity> => "high",
        type_: Option<CodeableConcept> => "type",
        applies_to: Vec<CodeableConcept> => "appliesTo",
        age: Option<Range> => "age",
        text: Option<FhirString> => "text",
    }
}

complex_type! {
    /// Component results
    pub struct ObservationComponent {
        @id: "id",
        extension: Vec<Extension> => "extension",
        modifier_extension: Vec<Extension> => "modifierExtension",
        code: Option<CodeableConcept> => "code",
        value: Option<ObservationComponentValue> => "value",
        data_absent_reason: Option<CodeableConcept> => "dataAbsentReason",
        interpretation: Vec<CodeableConcept> => "interpretation",
        reference_range: Vec<ObservationReferenceRange> => "referenceRange",
    }
}

resource_type! {
    /// Measurements and simple assertions
    pub struct Observation {
        id: Option<Id> => "id",
        meta: Option<Meta> => "meta",
        implicit_rules: Option<Uri> => "implicitRules",
        language: Option<Code> => "language",
        text: Option<Narrative> => "text",
        contained: Vec<ContainedResource> => "contained",
        extension: Vec<Extension> => "extension",
        modifier_extension: Vec<Extension> => "modifierExtension",
        identifier: Vec<Identifier> => "identifier",
        based_on: Vec<Reference> => "basedOn",
        part_of: Vec<Reference> => "partOf",
        status: Option<Code> => "status",
        category: Vec<CodeableConcept> => "category",
        code: Option<CodeableConcept> => "code",
        subject: Option<Reference> => "subject",
        focus: Vec<Reference> => "focus",
        encounter: Option<Reference> => "encounter",
        effective: Option<ObservationEffective> => "effective",
        issued: Option<Instant> => "issued",
        performer: Vec<Reference> => "performer",
        value: Option<ObservationValue> => "value",
        data_absent_reason: Option<CodeableConcept> => "dataAbsentReason",
        interpretation: Vec<CodeableConcept> => "interpretation",
        note: Vec<Annotation> => "note",
        body_site: Option<CodeableConcept> => "bodySite",
        method: Option<CodeableConcept> => "method",
        specimen: Option<Reference> => "specimen",
        device: Option<Reference> => "device",
        reference_range: Vec<ObservationReferenceRange> => "referenceRange",
        has_member: Vec<Reference> => "hasMember",
        derived_from: Vec<Reference> => "derivedFrom",
        component: Vec<ObservationComponent> => "component",
    }
}
