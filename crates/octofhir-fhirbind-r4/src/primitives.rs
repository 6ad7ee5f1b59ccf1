//! R4 primitive data types
//!
//! Every primitive is a [`Primitive`] over its scalar representation with the
//! R4 [`Extension`] as metadata. String-based primitives share one scalar and
//! differ only in name.

use crate::datatypes::Extension;
use octofhir_fhirbind_core::Primitive;
use rust_decimal::Decimal as DecimalScalar;

pub type Boolean = Primitive<bool, Extension>;
pub type Integer = Primitive<i32, Extension>;
pub type UnsignedInt = Primitive<u32, Extension>;
pub type PositiveInt = Primitive<u32, Extension>;
pub type Decimal = Primitive<DecimalScalar, Extension>;

pub type FhirString = Primitive<String, Extension>;
pub type Code = Primitive<String, Extension>;
pub type Id = Primitive<String, Extension>;
pub type Uri = Primitive<String, Extension>;
pub type Url = Primitive<String, Extension>;
pub type Canonical = Primitive<String, Extension>;
pub type Markdown = Primitive<String, Extension>;
pub type Oid = Primitive<String, Extension>;
pub type Uuid = Primitive<String, Extension>;
pub type Base64Binary = Primitive<String, Extension>;

/// `YYYY`, `YYYY-MM` or `YYYY-MM-DD`, kept as written
pub type Date = Primitive<String, Extension>;
/// Partial or full date-time with optional offset, kept as written
pub type DateTime = Primitive<String, Extension>;
pub type Instant = Primitive<String, Extension>;
pub type Time = Primitive<String, Extension>;
