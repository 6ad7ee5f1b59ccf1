//! R4 general-purpose and metadata data types

use crate::primitives::{
    Base64Binary, Boolean, Canonical, Code, Date, DateTime, Decimal, FhirString, Id, Instant,
    Integer, Markdown, Oid, PositiveInt, Time, UnsignedInt, Uri, Url, Uuid,
};
use octofhir_fhirbind_core::{Xhtml, choice_type, complex_type};

choice_type! {
    /// `Extension.value[x]`
    pub enum ExtensionValue {
        Base64Binary(Base64Binary),
        Boolean(Boolean),
        Canonical(Canonical),
        Code(Code),
        Date(Date),
        DateTime(DateTime),
        Decimal(Decimal),
        Id(Id),
        Instant(Instant),
        Integer(Integer),
        Markdown(Markdown),
        Oid(Oid),
        PositiveInt(PositiveInt),
        String(FhirString),
        Time(Time),
        UnsignedInt(UnsignedInt),
        Uri(Uri),
        Url(Url),
        Uuid(Uuid),
        Address(Address),
        Age(Age),
        Annotation(Annotation),
        Attachment(Attachment),
        CodeableConcept(CodeableConcept),
        Coding(Coding),
        ContactPoint(ContactPoint),
        Duration(Duration),
        HumanName(HumanName),
        Identifier(Identifier),
        Period(Period),
        Quantity(Quantity),
        Range(Range),
        Ratio(Ratio),
        Reference(Reference),
        SampledData(SampledData),
        Timing(Timing),
        Dosage(Box<Dosage>),
        Meta(Meta),
    }
}

complex_type! {
    /// Additional content defined by implementations
    pub struct Extension {
        @id: "id",
        @url: "url",
        extension: Vec<Extension> => "extension",
        value: Option<ExtensionValue> => "value",
    }
}

impl Extension {
    /// Create an extension with a url and a value
    pub fn new(url: impl Into<String>, value: ExtensionValue) -> Self {
        Self {
            url: Some(url.into()),
            value: Some(value),
            ..Self::default()
        }
    }
}

complex_type! {
    /// A reference to a code defined by a terminology system
    pub struct Coding {
        @id: "id",
        extension: Vec<Extension> => "extension",
        system: Option<Uri> => "system",
        version: Option<FhirString> => "version",
        code: Option<Code> => "code",
        display: Option<FhirString> => "display",
        user_selected: Option<Boolean> => "userSelected",
    }
}

impl Coding {
    /// Create a coding from a system and a code
    pub fn new(system: &str, code: &str) -> Self {
        Self {
            system: Some(system.into()),
            code: Some(code.into()),
            ..Self::default()
        }
    }
}

complex_type! {
    /// Concept - reference to a terminology or just text
    pub struct CodeableConcept {
        @id: "id",
        extension: Vec<Extension> => "extension",
        coding: Vec<Coding> => "coding",
        text: Option<FhirString> => "text",
    }
}

complex_type! {
    /// A measured or measurable amount
    pub struct Quantity {
        @id: "id",
        extension: Vec<Extension> => "extension",
        value: Option<Decimal> => "value",
        comparator: Option<Code> => "comparator",
        unit: Option<FhirString> => "unit",
        system: Option<Uri> => "system",
        code: Option<Code> => "code",
    }
}

complex_type! {
    /// A duration of time during which an organism (or a process) has existed
    pub struct Age {
        @id: "id",
        extension: Vec<Extension> => "extension",
        value: Option<Decimal> => "value",
        comparator: Option<Code> => "comparator",
        unit: Option<FhirString> => "unit",
        system: Option<Uri> => "system",
        code: Option<Code> => "code",
    }
}

complex_type! {
    /// A length of time
    pub struct Duration {
        @id: "id",
        extension: Vec<Extension> => "extension",
        value: Option<Decimal> => "value",
        comparator: Option<Code> => "comparator",
        unit: Option<FhirString> => "unit",
        system: Option<Uri> => "system",
        code: Option<Code> => "code",
    }
}

complex_type! {
    /// A fixed quantity (no comparator)
    pub struct SimpleQuantity {
        @id: "id",
        extension: Vec<Extension> => "extension",
        value: Option<Decimal> => "value",
        unit: Option<FhirString> => "unit",
        system: Option<Uri> => "system",
        code: Option<Code> => "code",
    }
}

complex_type! {
    /// Time range defined by start and end date/time
    pub struct Period {
        @id: "id",
        extension: Vec<Extension> => "extension",
        start: Option<DateTime> => "start",
        end: Option<DateTime> => "end",
    }
}

complex_type! {
    /// Set of values bounded by low and high
    pub struct Range {
        @id: "id",
        extension: Vec<Extension> => "extension",
        low: Option<SimpleQuantity> => "low",
        high: Option<SimpleQuantity> => "high",
    }
}

complex_type! {
    /// A ratio of two Quantity values - a numerator and a denominator
    pub struct Ratio {
        @id: "id",
        extension: Vec<Extension> => "extension",
        numerator: Option<Quantity> => "numerator",
        denominator: Option<Quantity> => "denominator",
    }
}

complex_type! {
    /// A reference from one resource to another
    pub struct Reference {
        @id: "id",
        extension: Vec<Extension> => "extension",
        reference: Option<FhirString> => "reference",
        type_: Option<Uri> => "type",
        identifier: Option<Identifier> => "identifier",
        display: Option<FhirString> => "display",
    }
}

impl Reference {
    /// Create a literal reference such as `Patient/123`
    pub fn to(reference: &str) -> Self {
        Self {
            reference: Some(reference.into()),
            ..Self::default()
        }
    }
}

complex_type! {
    /// An identifier intended for computation
    pub struct Identifier {
        @id: "id",
        extension: Vec<Extension> => "extension",
        use_: Option<Code> => "use",
        type_: Option<CodeableConcept> => "type",
        system: Option<Uri> => "system",
        value: Option<FhirString> => "value",
        period: Option<Period> => "period",
        assigner: Option<Box<Reference>> => "assigner",
    }
}

complex_type! {
    /// Name of a human - parts and usage
    pub struct HumanName {
        @id: "id",
        extension: Vec<Extension> => "extension",
        use_: Option<Code> => "use",
        text: Option<FhirString> => "text",
        family: Option<FhirString> => "family",
        given: Vec<FhirString> => "given",
        prefix: Vec<FhirString> => "prefix",
        suffix: Vec<FhirString> => "suffix",
        period: Option<Period> => "period",
    }
}

complex_type! {
    /// Details of a technology mediated contact point (phone, fax, email, etc.)
    pub struct ContactPoint {
        @id: "id",
        extension: Vec<Extension> => "extension",
        system: Option<Code> => "system",
        value: Option<FhirString> => "value",
        use_: Option<Code> => "use",
        rank: Option<PositiveInt> => "rank",
        period: Option<Period> => "period",
    }
}

complex_type! {
    /// An address expressed using postal conventions
    pub struct Address {
        @id: "id",
        extension: Vec<Extension> => "extension",
        use_: Option<Code> => "use",
        type_: Option<Code> => "type",
        text: Option<FhirString> => "text",
        line: Vec<FhirString> => "line",
        city: Option<FhirString> => "city",
        district: Option<FhirString> => "district",
        state: Option<FhirString> => "state",
        postal_code: Option<FhirString> => "postalCode",
        country: Option<FhirString> => "country",
        period: Option<Period> => "period",
    }
}

choice_type! {
    /// `Annotation.author[x]`
    pub enum AnnotationAuthor {
        Reference(Reference),
        String(FhirString),
    }
}

complex_type! {
    /// Text node with attribution
    pub struct Annotation {
        @id: "id",
        extension: Vec<Extension> => "extension",
        author: Option<AnnotationAuthor> => "author",
        time: Option<DateTime> => "time",
        text: Option<Markdown> => "text",
    }
}

complex_type! {
    /// Content in a format defined elsewhere
    pub struct Attachment {
        @id: "id",
        extension: Vec<Extension> => "extension",
        content_type: Option<Code> => "contentType",
        language: Option<Code> => "language",
        data: Option<Base64Binary> => "data",
        url: Option<Url> => "url",
        size: Option<UnsignedInt> => "size",
        hash: Option<Base64Binary> => "hash",
        title: Option<FhirString> => "title",
        creation: Option<DateTime> => "creation",
    }
}

complex_type! {
    /// Human-readable summary of a resource
    ///
    /// `div` holds the XHTML markup as written; it is not interpreted.
    pub struct Narrative {
        @id: "id",
        extension: Vec<Extension> => "extension",
        status: Option<Code> => "status",
        div: Option<Xhtml> => "div",
    }
}

complex_type! {
    /// Metadata about a resource
    pub struct Meta {
        @id: "id",
        extension: Vec<Extension> => "extension",
        version_id: Option<Id> => "versionId",
        last_updated: Option<Instant> => "lastUpdated",
        source: Option<Uri> => "source",
        profile: Vec<Canonical> => "profile",
        security: Vec<Coding> => "security",
        tag: Vec<Coding> => "tag",
    }
}

complex_type! {
    /// A series of measurements taken by a device
    pub struct SampledData {
        @id: "id",
        extension: Vec<Extension> => "extension",
        origin: Option<SimpleQuantity> => "origin",
        period: Option<Decimal> => "period",
        factor: Option<Decimal> => "factor",
        lower_limit: Option<Decimal> => "lowerLimit",
        upper_limit: Option<Decimal> => "upperLimit",
        dimensions: Option<PositiveInt> => "dimensions",
        data: Option<FhirString> => "data",
    }
}

choice_type! {
    /// `Timing.repeat.bounds[x]`
    pub enum TimingRepeatBounds {
        Duration(Duration),
        Range(Range),
        Period(Period),
    }
}

complex_type! {
    /// When the event is to occur
    pub struct TimingRepeat {
        @id: "id",
        extension: Vec<Extension> => "extension",
        bounds: Option<TimingRepeatBounds> => "bounds",
        count: Option<PositiveInt> => "count",
        count_max: Option<PositiveInt> => "countMax",
        duration: Option<Decimal> => "duration",
        duration_max: Option<Decimal> => "durationMax",
        duration_unit: Option<Code> => "durationUnit",
        frequency: Option<PositiveInt> => "frequency",
        frequency_max: Option<PositiveInt> => "frequencyMax",
        period: Option<Decimal> => "period",
        period_max: Option<Decimal> => "periodMax",
        period_unit: Option<Code> => "periodUnit",
        day_of_week: Vec<Code> => "dayOfWeek",
        time_of_day: Vec<Time> => "timeOfDay",
        when: Vec<Code> => "when",
        offset: Option<UnsignedInt> => "offset",
    }
}

complex_type! {
    /// A timing schedule that specifies an event that may occur multiple times
    pub struct Timing {
        @id: "id",
        extension: Vec<Extension> => "extension",
        modifier_extension: Vec<Extension> => "modifierExtension",
        event: Vec<DateTime> => "event",
        repeat: Option<TimingRepeat> => "repeat",
        code: Option<CodeableConcept> => "code",
    }
}

choice_type! {
    /// `Dosage.asNeeded[x]`
    pub enum DosageAsNeeded {
        Boolean(Boolean),
        CodeableConcept(CodeableConcept),
    }
}

choice_type! {
    /// `Dosage.doseAndRate.dose[x]`
    pub enum DosageDose {
        Range(Range),
        Quantity(SimpleQuantity),
    }
}

choice_type! {
    /// `Dosage.doseAndRate.rate[x]`
    pub enum DosageRate {
        Ratio(Ratio),
        Range(Range),
        Quantity(SimpleQuantity),
    }
}

complex_type! {
    /// Amount of medication administered
    pub struct DosageDoseAndRate {
        @id: "id",
        extension: Vec<Extension> => "extension",
        type_: Option<CodeableConcept> => "type",
        dose: Option<DosageDose> => "dose",
        rate: Option<DosageRate> => "rate",
    }
}

complex_type! {
    /// How the medication is/was taken or should be taken
    pub struct Dosage {
        @id: "id",
        extension: Vec<Extension> => "extension",
        modifier_extension: Vec<Extension> => "modifierExtension",
        sequence: Option<Integer> => "sequence",
        text: Option<FhirString> => "text",
        additional_instruction: Vec<CodeableConcept> => "additionalInstruction",
        patient_instruction: Option<FhirString> => "patientInstruction",
        timing: Option<Timing> => "timing",
        as_needed: Option<DosageAsNeeded> => "asNeeded",
        site: Option<CodeableConcept> => "site",
        route: Option<CodeableConcept> => "route",
        method: Option<CodeableConcept> => "method",
        dose_and_rate: Vec<DosageDoseAndRate> => "doseAndRate",
        max_dose_per_period: Option<Ratio> => "maxDosePerPeriod",
        max_dose_per_administration: Option<SimpleQuantity> => "maxDosePerAdministration",
        max_dose_per_lifetime: Option<SimpleQuantity> => "maxDosePerLifetime",
    }
}
