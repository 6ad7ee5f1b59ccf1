//! Choice (tagged union) fields
//!
//! A choice field `onset[x]` holds exactly one of a closed set of candidate
//! types. On the wire it is flattened into sibling keys named by appending the
//! candidate's type name to the field name (`onsetDateTime`, `onsetAge`, ...),
//! at most one of which may be populated.

use crate::element::Element;
use crate::registry::TypeRegistry;
use crate::wire::{self, WireRecord};
use crate::xml::XmlElement;
use octofhir_fhirbind_diagnostics::{CodecError, Result};

/// A closed set of candidate types for one choice field
///
/// Implemented by [`choice_type!`](crate::choice_type); the per-variant
/// methods only forward to the candidate's own [`Element`] impl, the scan and
/// conflict detection live in this module.
pub trait Choice: Sized {
    /// Candidate type suffixes in schema order
    const CANDIDATES: &'static [&'static str];

    /// Type suffix of the populated variant
    fn type_suffix(&self) -> &'static str;

    /// True when the candidate named `suffix` is a primitive with a `_key` sibling
    fn is_primitive(suffix: &str) -> bool;

    /// True when the populated variant carries nothing
    fn is_empty(&self) -> bool;

    /// Write the populated variant under its full wire key
    fn write_json_as(&self, key: &str, record: &mut WireRecord);

    /// Read the candidate named `suffix` from its full wire key
    fn read_json_as(
        suffix: &str,
        key: &str,
        record: &WireRecord,
        registry: &TypeRegistry,
    ) -> Result<Option<Self>>;

    /// Write the populated variant as an element named by its full key
    fn write_xml_as(&self, tag: &str, parent: &mut XmlElement);

    /// Read the candidate named `suffix` from its element
    fn read_xml_as(
        suffix: &str,
        tag: &str,
        parent: &XmlElement,
        registry: &TypeRegistry,
    ) -> Result<Option<Self>>;
}

/// Emit the one wire key of the populated candidate
pub fn write_json<C: Choice>(value: &C, field: &str, record: &mut WireRecord) {
    if !value.is_empty() {
        value.write_json_as(&wire::choice_key(field, value.type_suffix()), record);
    }
}

/// Scan every candidate key of `field` and decode the populated one
pub fn read_json<C: Choice>(
    field: &str,
    record: &WireRecord,
    registry: &TypeRegistry,
) -> Result<Option<C>> {
    let populated = |suffix: &str, key: &str| {
        wire::get(record, key).is_some()
            || (C::is_primitive(suffix) && wire::get(record, &wire::metadata_key(key)).is_some())
    };
    match select(field, C::CANDIDATES, populated)? {
        Some((suffix, key)) => C::read_json_as(suffix, &key, record, registry),
        None => Ok(None),
    }
}

/// Append the element of the populated candidate
pub fn write_xml<C: Choice>(value: &C, field: &str, parent: &mut XmlElement) {
    if !value.is_empty() {
        value.write_xml_as(&wire::choice_key(field, value.type_suffix()), parent);
    }
}

/// Scan the children of `parent` for every candidate element of `field`
pub fn read_xml<C: Choice>(
    field: &str,
    parent: &XmlElement,
    registry: &TypeRegistry,
) -> Result<Option<C>> {
    let populated = |_: &str, tag: &str| parent.children_named(tag).next().is_some();
    match select(field, C::CANDIDATES, populated)? {
        Some((suffix, tag)) => C::read_xml_as(suffix, &tag, parent, registry),
        None => Ok(None),
    }
}

/// True when `wire_key` is a candidate key of `field` or the `_` sibling of
/// a primitive candidate
pub fn owns_json_key<C: Choice>(field: &str, wire_key: &str) -> bool {
    let (suffix, metadata) = match wire_key.strip_prefix('_') {
        Some(rest) => (rest.strip_prefix(field), true),
        None => (wire_key.strip_prefix(field), false),
    };
    suffix.is_some_and(|suffix| {
        C::CANDIDATES.contains(&suffix) && (!metadata || C::is_primitive(suffix))
    })
}

/// True when `name` is a candidate element of `field`
pub fn owns_xml_tag<C: Choice>(field: &str, name: &str) -> bool {
    name.strip_prefix(field)
        .is_some_and(|suffix| C::CANDIDATES.contains(&suffix))
}

/// Find the single populated candidate, failing on the second one
fn select(
    field: &str,
    candidates: &[&'static str],
    populated: impl Fn(&str, &str) -> bool,
) -> Result<Option<(&'static str, String)>> {
    let mut found: Option<(&'static str, String)> = None;
    for &suffix in candidates {
        let key = wire::choice_key(field, suffix);
        if !populated(suffix, &key) {
            continue;
        }
        if let Some((_, first)) = found {
            return Err(CodecError::conflict(field, first, key));
        }
        found = Some((suffix, key));
    }
    Ok(found)
}

/// Declare a choice field type
///
/// Each variant name is the wire type suffix; its payload is any
/// [`Element`](crate::Element). The generated enum implements [`Choice`] and
/// `Element`, so it is stored as `Option<Name>` under the logical field name
/// (`onset`, `value`, ...).
///
/// ```ignore
/// choice_type! {
///     pub enum ConditionOnset {
///         DateTime(DateTime),
///         Age(Age),
///         Period(Period),
///         Range(Range),
///         String(FhirString),
///     }
/// }
/// ```
#[macro_export]
macro_rules! choice_type {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $( $(#[$variant_meta:meta])* $variant:ident ( $ty:ty ), )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        pub enum $name {
            $( $(#[$variant_meta])* $variant($ty), )+
        }

        impl $crate::Choice for $name {
            const CANDIDATES: &'static [&'static str] = &[$(stringify!($variant)),+];

            fn type_suffix(&self) -> &'static str {
                match self {
                    $( Self::$variant(_) => stringify!($variant), )+
                }
            }

            fn is_primitive(suffix: &str) -> bool {
                $(
                    if suffix == stringify!($variant) {
                        return <$ty as $crate::Element>::PRIMITIVE;
                    }
                )+
                false
            }

            fn is_empty(&self) -> bool {
                match self {
                    $( Self::$variant(value) => $crate::Element::is_empty(value), )+
                }
            }

            fn write_json_as(&self, key: &str, record: &mut $crate::WireRecord) {
                match self {
                    $( Self::$variant(value) => $crate::Element::write_json(value, key, record), )+
                }
            }

            fn read_json_as(
                suffix: &str,
                key: &str,
                record: &$crate::WireRecord,
                registry: &$crate::TypeRegistry,
            ) -> $crate::Result<Option<Self>> {
                $(
                    if suffix == stringify!($variant) {
                        return Ok(
                            <$ty as $crate::Element>::read_json(key, record, registry)?
                                .map(Self::$variant),
                        );
                    }
                )+
                Ok(None)
            }

            fn write_xml_as(&self, tag: &str, parent: &mut $crate::XmlElement) {
                match self {
                    $( Self::$variant(value) => $crate::Element::write_xml(value, tag, parent), )+
                }
            }

            fn read_xml_as(
                suffix: &str,
                tag: &str,
                parent: &$crate::XmlElement,
                registry: &$crate::TypeRegistry,
            ) -> $crate::Result<Option<Self>> {
                $(
                    if suffix == stringify!($variant) {
                        return Ok(
                            <$ty as $crate::Element>::read_xml(tag, parent, registry)?
                                .map(Self::$variant),
                        );
                    }
                )+
                Ok(None)
            }
        }

        impl $crate::Element for $name {
            fn is_empty(&self) -> bool {
                $crate::Choice::is_empty(self)
            }

            fn owns_json_key(key: &str, wire_key: &str) -> bool {
                $crate::choice::owns_json_key::<Self>(key, wire_key)
            }

            fn owns_xml_tag(tag: &str, name: &str) -> bool {
                $crate::choice::owns_xml_tag::<Self>(tag, name)
            }

            fn write_json(&self, key: &str, record: &mut $crate::WireRecord) {
                $crate::choice::write_json(self, key, record)
            }

            fn read_json(
                key: &str,
                record: &$crate::WireRecord,
                registry: &$crate::TypeRegistry,
            ) -> $crate::Result<Option<Self>> {
                $crate::choice::read_json(key, record, registry)
            }

            fn write_xml(&self, tag: &str, parent: &mut $crate::XmlElement) {
                $crate::choice::write_xml(self, tag, parent)
            }

            fn read_xml(
                tag: &str,
                parent: &$crate::XmlElement,
                registry: &$crate::TypeRegistry,
            ) -> $crate::Result<Option<Self>> {
                $crate::choice::read_xml(tag, parent, registry)
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{self, Onset, Period};
    use crate::Field;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::{Value, json};

    fn record(value: Value) -> WireRecord {
        value.as_object().cloned().unwrap_or_default()
    }

    fn encode(onset: &Option<Onset>) -> Value {
        let mut rec = WireRecord::new();
        Field::write_json(onset, "onset", &mut rec);
        Value::Object(rec)
    }

    #[rstest]
    #[case(Onset::DateTime("2021-03-04".into()), json!({"onsetDateTime": "2021-03-04"}))]
    #[case(Onset::String("childhood".into()), json!({"onsetString": "childhood"}))]
    #[case(Onset::Age(testing::age(3)), json!({"onsetAge": {"value": 3}}))]
    #[case(
        Onset::Period(Period { start: Some("2020".into()), ..Period::default() }),
        json!({"onsetPeriod": {"start": "2020"}})
    )]
    fn test_round_trip_emits_one_key(#[case] onset: Onset, #[case] expected: Value) {
        let registry = testing::registry();
        let encoded = encode(&Some(onset.clone()));
        assert_eq!(encoded, expected);

        let decoded: Option<Onset> = read_json("onset", &record(encoded), &registry).unwrap();
        assert_eq!(decoded, Some(onset));
    }

    #[test]
    fn test_absent_choice() {
        let registry = testing::registry();
        assert_eq!(encode(&None), json!({}));

        let decoded: Option<Onset> = read_json("onset", &record(json!({"id": "c1"})), &registry).unwrap();
        assert_eq!(decoded, None);
    }

    #[test]
    fn test_conflict_names_field_and_keys() {
        let registry = testing::registry();
        let rec = record(json!({"onsetDateTime": "2021", "onsetAge": {"value": 3}}));
        let err = read_json::<Onset>("onset", &rec, &registry).unwrap_err();
        match err {
            CodecError::ConflictingUnionValue { field, first, second } => {
                assert_eq!(field, "onset");
                assert_eq!(first, "onsetDateTime");
                assert_eq!(second, "onsetAge");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_metadata_sibling_counts_as_populated() {
        let registry = testing::registry();

        let rec = record(json!({"_onsetDateTime": {"id": "d1"}}));
        let decoded: Option<Onset> = read_json("onset", &rec, &registry).unwrap();
        assert_eq!(decoded, Some(Onset::DateTime(testing::DateTime::default().with_id("d1"))));

        let rec = record(json!({"_onsetDateTime": {"id": "d1"}, "onsetString": "x"}));
        assert!(matches!(
            read_json::<Onset>("onset", &rec, &registry),
            Err(CodecError::ConflictingUnionValue { .. })
        ));
    }

    #[test]
    fn test_metadata_sibling_only_for_primitive_candidates() {
        let registry = testing::registry();

        let rec = record(json!({"onsetString": "x", "_onsetAge": {}}));
        let decoded: Option<Onset> = read_json("onset", &rec, &registry).unwrap();
        assert_eq!(decoded, Some(Onset::String("x".into())));

        let rec = record(json!({"_onsetAge": {}}));
        let decoded: Option<Onset> = read_json("onset", &rec, &registry).unwrap();
        assert_eq!(decoded, None);

        assert!(Onset::is_primitive("DateTime"));
        assert!(!Onset::is_primitive("Age"));
    }

    #[rstest]
    #[case("onsetDateTime", true)]
    #[case("_onsetDateTime", true)]
    #[case("onsetAge", true)]
    #[case("_onsetAge", false)]
    #[case("onsetDatetime", false)]
    #[case("onset", false)]
    #[case("_onset", false)]
    fn test_owned_keys(#[case] wire_key: &str, #[case] owned: bool) {
        assert_eq!(owns_json_key::<Onset>("onset", wire_key), owned);
    }

    #[test]
    fn test_owned_tags() {
        assert!(owns_xml_tag::<Onset>("onset", "onsetPeriod"));
        assert!(!owns_xml_tag::<Onset>("onset", "_onsetPeriod"));
        assert!(!owns_xml_tag::<Onset>("onset", "onsetRange"));
    }

    #[test]
    fn test_null_candidate_is_absent() {
        let registry = testing::registry();
        let rec = record(json!({"onsetDateTime": null, "onsetString": "late"}));
        let decoded: Option<Onset> = read_json("onset", &rec, &registry).unwrap();
        assert_eq!(decoded, Some(Onset::String("late".into())));
    }

    #[test]
    fn test_xml_conflict_and_repetition() {
        let registry = testing::registry();

        let mut parent = XmlElement::new("Condition");
        Field::write_xml(&Some(Onset::String("x".into())), "onset", &mut parent);
        assert_eq!(parent.children.len(), 1);
        assert_eq!(parent.children[0].name, "onsetString");
        let decoded: Option<Onset> = read_xml("onset", &parent, &registry).unwrap();
        assert_eq!(decoded, Some(Onset::String("x".into())));

        Field::write_xml(&Some(Onset::DateTime("2020".into())), "onset", &mut parent);
        assert!(matches!(
            read_xml::<Onset>("onset", &parent, &registry),
            Err(CodecError::ConflictingUnionValue { ref field, .. }) if field == "onset"
        ));

        let mut repeated = XmlElement::new("Condition");
        Field::write_xml(&Some(Onset::String("a".into())), "onset", &mut repeated);
        Field::write_xml(&Some(Onset::String("b".into())), "onset", &mut repeated);
        assert!(matches!(
            read_xml::<Onset>("onset", &repeated, &registry),
            Err(CodecError::RepeatedElement { .. })
        ));
    }

    #[test]
    fn test_candidates_in_schema_order() {
        assert_eq!(Onset::CANDIDATES, &["DateTime", "Age", "Period", "String"]);
    }
}
