//! The R4 resource registry

use crate::resources::{
    Bundle, Condition, MedicationRequest, Observation, Organization, Patient, Practitioner,
};
use octofhir_fhirbind_core::TypeRegistry;
use once_cell::sync::Lazy;

/// FHIR version implemented by this crate
pub const FHIR_VERSION: &str = "4.0.1";

static REGISTRY: Lazy<TypeRegistry> = Lazy::new(|| {
    log::debug!("initializing FHIR {} type registry", FHIR_VERSION);
    TypeRegistry::builder()
        .register::<Bundle>()
        .register::<Condition>()
        .register::<MedicationRequest>()
        .register::<Observation>()
        .register::<Organization>()
        .register::<Patient>()
        .register::<Practitioner>()
        .build()
});

/// Every R4 resource type known to this crate
pub fn registry() -> &'static TypeRegistry {
    &REGISTRY
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Patient;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("Bundle")]
    #[case("Condition")]
    #[case("MedicationRequest")]
    #[case("Observation")]
    #[case("Organization")]
    #[case("Patient")]
    #[case("Practitioner")]
    fn test_registered(#[case] name: &str) {
        assert!(registry().contains(name));
        assert_eq!(registry().instantiate(name).unwrap().resource_type(), name);
    }

    #[test]
    fn test_zero_value() {
        let zero = registry().instantiate("Patient").unwrap();
        assert_eq!(zero.downcast_ref::<Patient>(), Some(&Patient::default()));
        assert!(!registry().contains("Encounter"));
    }

    #[test]
    fn test_shared_between_threads() {
        let handles: Vec<_> = (0..4)
            .map(|_| std::thread::spawn(|| registry().len()))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), 7);
        }
    }
}
