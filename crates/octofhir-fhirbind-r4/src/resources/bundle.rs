//! Bundle

use crate::datatypes::{Extension, Identifier, Meta};
use crate::primitives::{Code, Decimal, FhirString, Id, Instant, UnsignedInt, Uri};
use octofhir_fhirbind_core::{ContainedResource, complex_type, resource_type};

complex_type! {
    /// Links related to this Bundle or entry
    pub struct BundleLink {
        @id: "id",
        extension: Vec<Extension> => "extension",
        modifier_extension: Vec<Extension> => "modifierExtension",
        relation: Option<FhirString> => "relation",
        url: Option<Uri> => "url",
    }
}

complex_type! {
    /// Search related information
    pub struct BundleEntrySearch {
        @id: "id",
        extension: Vec<Extension> => "extension",
        modifier_extension: Vec<Extension> => "modifierExtension",
        mode: Option<Code> => "mode",
        score: Option<Decimal> => "score",
    }
}

complex_type! {
    /// Additional execution information (transaction/batch/history)
    pub struct BundleEntryRequest {
        @id: "id",
        extension: Vec<Extension> => "extension",
        modifier_extension: Vec<Extension> => "modifierExtension",
        method: Option<Code> => "method",
        url: Option<Uri> => "url",
        if_none_match: Option<FhirString> => "ifNoneMatch",
        if_modified_since: Option<Instant> => "ifModifiedSince",
        if_match: Option<FhirString> => "ifMatch",
        if_none_exist: Option<FhirString> => "ifNoneExist",
    }
}

complex_type! {
    /// Results of execution (transaction/batch/history)
    pub struct BundleEntryResponse {
        @id: "id",
        extension: Vec<Extension> => "extension",
        modifier_extension: Vec<Extension> => "modifierExtension",
        status: Option<FhirString> => "status",
        location: Option<Uri> => "location",
        etag: Option<FhirString> => "etag",
        last_modified: Option<Instant> => "lastModified",
        outcome: Option<ContainedResource> => "outcome",
    }
}

complex_type! {
    /// Entry in the bundle - will have a resource or information
    pub struct BundleEntry {
        @id: "id",
        extension: Vec<Extension> => "extension",
        modifier_extension: Vec<Extension> => "modifierExtension",
        link: Vec<BundleLink> => "link",
        full_url: Option<Uri> => "fullUrl",
        resource: Option<ContainedResource> => "resource",
        search: Option<BundleEntrySearch> => "search",
        request: Option<BundleEntryRequest> => "request",
        response: Option<BundleEntryResponse> => "response",
    }
}

resource_type! {
    /// Contains a collection of resources
    pub struct Bundle {
        id: Option<Id> => "id",
        meta: Option<Meta> => "meta",
        implicit_rules: Option<Uri> => "implicitRules",
        language: Option<Code> => "language",
        identifier: Option<Identifier> => "identifier",
        type_: Option<Code> => "type",
        timestamp: Option<Instant> => "timestamp",
        total: Option<UnsignedInt> => "total",
        link: Vec<BundleLink> => "link",
        entry: Vec<BundleEntry> => "entry",
    }
}

impl Bundle {
    /// Iterate over the entry resources of type `R`
    pub fn resources<R: octofhir_fhirbind_core::Resource>(&self) -> impl Iterator<Item = &R> {
        self.entry
            .iter()
            .filter_map(|entry| entry.resource.as_ref())
            .filter_map(ContainedResource::downcast_ref::<R>)
    }
}
