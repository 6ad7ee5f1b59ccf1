//! Small schema used by the unit tests

use crate::{ContainedResource, Primitive, TypeRegistry};
use rust_decimal::Decimal;

pub type Boolean = Primitive<bool, Extension>;
pub type Integer = Primitive<i32, Extension>;
pub type DecimalValue = Primitive<Decimal, Extension>;
pub type FhirString = Primitive<String, Extension>;
pub type DateTime = Primitive<String, Extension>;
pub type Id = Primitive<String, Extension>;

crate::choice_type! {
    pub enum ExtensionValue {
        Boolean(Boolean),
        Integer(Integer),
        String(FhirString),
    }
}

crate::complex_type! {
    pub struct Extension {
        @id: "id",
        @url: "url",
        extension: Vec<Extension> => "extension",
        value: Option<ExtensionValue> => "value",
    }
}

crate::complex_type! {
    pub struct Age {
        @id: "id",
        extension: Vec<Extension> => "extension",
        value: Option<DecimalValue> => "value",
        unit: Option<FhirString> => "unit",
    }
}

crate::complex_type! {
    pub struct Period {
        @id: "id",
        extension: Vec<Extension> => "extension",
        start: Option<DateTime> => "start",
        end: Option<DateTime> => "end",
    }
}

crate::choice_type! {
    pub enum Onset {
        DateTime(DateTime),
        Age(Age),
        Period(Period),
        String(FhirString),
    }
}

crate::resource_type! {
    pub struct Patient {
        id: Option<Id> => "id",
        contained: Vec<ContainedResource> => "contained",
        extension: Vec<Extension> => "extension",
        active: Option<Boolean> => "active",
        given: Vec<FhirString> => "given",
    }
}

crate::resource_type! {
    pub struct Condition {
        id: Option<Id> => "id",
        onset: Option<Onset> => "onset",
    }
}

pub fn registry() -> TypeRegistry {
    TypeRegistry::builder()
        .register::<Patient>()
        .register::<Condition>()
        .build()
}

pub fn age(years: i64) -> Age {
    Age {
        value: Some(Decimal::from(years).into()),
        ..Age::default()
    }
}

pub fn extension(url: &str, value: ExtensionValue) -> Extension {
    Extension {
        url: Some(url.to_string()),
        value: Some(value),
        ..Extension::default()
    }
}
