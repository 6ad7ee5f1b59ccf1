//! R4 resources
//!
//! Each resource also implements `serde::Serialize` and `serde::Deserialize`
//! by going through its wire record, so it can be embedded in any serde data
//! model. Deserialization dispatches contained resources with [`registry()`].
//!
//! [`registry()`]: crate::registry

mod bundle;
mod condition;
mod medication_request;
mod observation;
mod organization;
mod patient;
mod practitioner;

pub use bundle::*;
pub use condition::*;
pub use medication_request::*;
pub use observation::*;
pub use organization::*;
pub use patient::*;
pub use practitioner::*;

use octofhir_fhirbind_core::{Document, WireRecord};

macro_rules! impl_serde {
    ($($name:ident),* $(,)?) => {
        $(
            impl serde::Serialize for $name {
                fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                    serde::Serialize::serialize(&Document::to_json_record(self), serializer)
                }
            }

            impl<'de> serde::Deserialize<'de> for $name {
                fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                    let record = <WireRecord as serde::Deserialize>::deserialize(deserializer)?;
                    Document::from_json_record(&record, crate::registry())
                        .map_err(serde::de::Error::custom)
                }
            }
        )*
    };
}

impl_serde!(
    Bundle,
    Condition,
    MedicationRequest,
    Observation,
    Organization,
    Patient,
    Practitioner,
);
