//! Codec benchmarks using divan
//!
//! Encode and decode throughput for JSON and XML documents.

use octofhir_fhirbind::r4::{self, Bundle, BundleEntry, Condition, ConditionOnset, Patient};
use octofhir_fhirbind::Document;

fn main() {
    divan::main();
}

fn bundle(size: usize) -> Bundle {
    let entry = (0..size)
        .map(|index| BundleEntry {
            resource: Some(if index % 2 == 0 {
                Patient {
                    id: Some(format!("p{index}").into()),
                    active: Some(true.into()),
                    ..Patient::default()
                }
                .into()
            } else {
                Condition {
                    id: Some(format!("c{index}").into()),
                    onset: Some(ConditionOnset::DateTime("2020-01-01".into())),
                    ..Condition::default()
                }
                .into()
            }),
            ..BundleEntry::default()
        })
        .collect();
    Bundle {
        type_: Some("collection".into()),
        entry,
        ..Bundle::default()
    }
}

mod json {
    use super::*;

    #[divan::bench(args = [10, 100, 1000])]
    fn encode(bencher: divan::Bencher, size: usize) {
        let bundle = bundle(size);
        bencher.bench_local(|| divan::black_box(&bundle).to_json_string());
    }

    #[divan::bench(args = [10, 100, 1000])]
    fn decode(bencher: divan::Bencher, size: usize) {
        let text = bundle(size).to_json_string().unwrap_or_default();
        bencher.bench_local(|| r4::from_json(divan::black_box(&text)));
    }
}

mod xml {
    use super::*;

    #[divan::bench(args = [10, 100, 1000])]
    fn encode(bencher: divan::Bencher, size: usize) {
        let bundle = bundle(size);
        bencher.bench_local(|| divan::black_box(&bundle).to_xml_string());
    }

    #[divan::bench(args = [10, 100, 1000])]
    fn decode(bencher: divan::Bencher, size: usize) {
        let text = bundle(size).to_xml_string().unwrap_or_default();
        bencher.bench_local(|| r4::from_xml(divan::black_box(&text)));
    }
}
