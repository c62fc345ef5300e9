//! End-to-end filter pipeline behaviour: strategies, provisioning, reports.

use std::sync::Arc;

use pretty_assertions::assert_eq;
use varrank_common::{
    FilterResult, FilterType, Filterable, FrequencyData, FrequencySource, ModeOfInheritance,
    PathogenicityData, PathogenicityScore, PathogenicitySource, PriorityType, VarrankError,
    VariantRecord,
};
use varrank_config::{FilterSettings, FilterStrategy, PriorityScoreSettings};
use varrank_filter::filters::{
    FailedVariantFilter, FrequencyFilter, InheritanceFilter, IntervalFilter, KnownVariantFilter,
    PathogenicityFilter, QualityFilter,
};
use varrank_filter::{
    AnnotationProvisioner, Filter, FilterChain, FilterRunner, MockAnnotationSource, ReportBuilder,
};
use varrank_test_utils::{gene, init_test_tracing, variant};

fn local_chain() -> Vec<Box<dyn Filter<VariantRecord>>> {
    vec![
        Box::new(FailedVariantFilter),
        Box::new(IntervalFilter::new("1:1-1000".parse().unwrap()).unwrap()),
        Box::new(QualityFilter::new(30.0).unwrap()),
        Box::new(KnownVariantFilter),
    ]
}

fn mixed_variants() -> Vec<VariantRecord> {
    vec![
        variant("1", 10).not_in_databases().build(),
        variant("1", 20).failed_vcf_filters().not_in_databases().build(),
        variant("2", 30).quality(10.0).not_in_databases().build(),
        variant("1", 40).quality(10.0).rs_id("rs5").build(),
        variant("1", 50).rs_id("rs6").build(),
    ]
}

#[test]
fn exhaustive_records_every_filter_for_passing_entities() {
    init_test_tracing();
    let filters = local_chain();
    let mut variants = mixed_variants();
    let already_failed = variant("1", 60)
        .filter_result(FilterResult::fail(FilterType::Pathogenicity))
        .build();
    variants.push(already_failed.clone());

    let out = FilterRunner::exhaustive().run(&filters, variants).unwrap();

    assert_eq!(out.len(), 6);
    for v in &out[..5] {
        assert_eq!(v.filter_results().len(), filters.len(), "{}", v.key());
    }
    assert_eq!(out[5].filter_results(), already_failed.filter_results());
    assert_eq!(out.iter().filter(|v| v.passed_filters()).count(), 1);
}

#[test]
fn fail_fast_results_are_a_prefix_of_the_chain() {
    init_test_tracing();
    let filters = local_chain();
    let chain_types: Vec<FilterType> = filters.iter().map(|f| f.filter_type()).collect();

    let outcome = FilterRunner::fail_fast()
        .run_partitioned(&filters, mixed_variants())
        .unwrap();

    for v in outcome.iter() {
        let stored = v.filter_results().filter_types();
        assert_eq!(stored, chain_types[..stored.len()].to_vec());
        let first_fail = v.filter_results().iter().position(|r| r.failed());
        match first_fail {
            Some(i) => assert_eq!(i, stored.len() - 1, "{} continued after failing", v.key()),
            None => assert_eq!(stored.len(), chain_types.len()),
        }
    }
    assert_eq!(outcome.passed.len(), 1);
    assert_eq!(outcome.failed.len(), 4);
    assert_eq!(
        outcome.failed[2].filter_results().filter_types(),
        vec![FilterType::FailedVariant, FilterType::Interval, FilterType::Quality]
    );
}

#[test]
fn two_frequency_filters_fetch_once() {
    let source = Arc::new(MockAnnotationSource::new());
    let provisioner = AnnotationProvisioner::new(source.clone());
    let filters: Vec<Box<dyn Filter<VariantRecord>>> = vec![
        Box::new(KnownVariantFilter),
        Box::new(FrequencyFilter::new(1.0).unwrap()),
    ];

    let out = FilterRunner::exhaustive()
        .with_provisioner(&provisioner)
        .run(&filters, vec![variant("1", 100).build()])
        .unwrap();

    assert_eq!(source.frequency_calls(), 1);
    assert_eq!(out[0].frequency_data, Some(FrequencyData::empty()));
    assert!(out[0].passed_filters());
}

#[test]
fn fail_fast_skips_fetches_after_failure() {
    let source = Arc::new(MockAnnotationSource::new());
    let provisioner = AnnotationProvisioner::new(source.clone());
    let filters: Vec<Box<dyn Filter<VariantRecord>>> = vec![
        Box::new(QualityFilter::new(30.0).unwrap()),
        Box::new(FrequencyFilter::new(1.0).unwrap()),
    ];

    let out = FilterRunner::fail_fast()
        .with_provisioner(&provisioner)
        .run(&filters, vec![variant("1", 100).quality(5.0).build(), variant("1", 200).build()])
        .unwrap();

    assert_eq!(out.len(), 1);
    assert_eq!(source.frequency_calls(), 1);
}

#[test]
fn not_run_leaves_no_trace() {
    let filters: Vec<Box<dyn Filter<varrank_common::Gene>>> =
        vec![Box::new(InheritanceFilter::new([ModeOfInheritance::Any]))];
    let genes = vec![
        gene("FGFR2", "2263").variant(variant("10", 1).build()).build(),
        gene("CFTR", "1080").build(),
    ];

    let out = FilterRunner::exhaustive().run(&filters, genes).unwrap();

    for g in &out {
        assert!(!g.filter_results().contains(FilterType::Inheritance));
        assert!(g.passed_filters());
        for v in &g.variants {
            assert!(v.filter_results().is_empty());
        }
    }
}

#[test]
fn gene_failures_propagate_to_variants() {
    let settings = FilterSettings {
        strategy: FilterStrategy::Exhaustive,
        priority_score: Some(PriorityScoreSettings {
            priority_type: PriorityType::HiPhive,
            min_score: 0.5,
        }),
        ..FilterSettings::default()
    };
    let chain = FilterChain::from_settings(&settings).unwrap();
    let genes = vec![
        gene("FGFR2", "2263")
            .priority(PriorityType::HiPhive, 0.9)
            .variant(variant("10", 1).build())
            .build(),
        gene("SHH", "6469")
            .priority(PriorityType::HiPhive, 0.1)
            .variant(variant("7", 2).build())
            .build(),
    ];

    let outcome = chain.run_genes(genes).unwrap();

    assert_eq!(outcome.passed.len(), 1);
    assert_eq!(outcome.failed[0].symbol, "SHH");
    assert!(outcome.failed[0].variants[0].failed_filter(FilterType::PriorityScore));
    assert!(outcome.passed[0].variants[0].passed_filter(FilterType::PriorityScore));
}

#[test]
fn frequency_report_counts_pass_and_fail() {
    let settings = FilterSettings {
        strategy: FilterStrategy::Exhaustive,
        max_frequency_percent: Some(1.0),
        ..FilterSettings::default()
    };
    let chain = FilterChain::from_settings(&settings).unwrap();
    let provisioner = FilterChain::provisioner(&settings, Arc::new(MockAnnotationSource::new()));

    let variants: Vec<VariantRecord> = (1..=100)
        .map(|pos| {
            let percent = if pos <= 80 { 0.1 } else { 5.0 };
            variant("1", pos).frequency(FrequencySource::GnomadGenomeAll, percent).build()
        })
        .collect();

    let outcome = chain.run_variants(variants, &provisioner).unwrap();
    let reports = chain.variant_reports(outcome.iter());

    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].filter_type, FilterType::Frequency);
    assert_eq!((reports[0].passed, reports[0].failed), (80, 20));
    assert!(reports[0].messages.iter().any(|m| m.contains("1.00")));
    assert_eq!(
        reports[0].messages[2],
        "Frequency data available for 100 variants (100.0% of total)"
    );
}

#[test]
fn fail_fast_report_excludes_unreached_filters() {
    let filters = local_chain();
    let outcome = FilterRunner::fail_fast()
        .run_partitioned(&filters, mixed_variants())
        .unwrap();
    let reports = ReportBuilder::variant_reports(&filters, outcome.iter());

    let counts: Vec<(FilterType, usize, usize)> = reports
        .iter()
        .map(|r| (r.filter_type, r.passed, r.failed))
        .collect();
    assert_eq!(
        counts,
        vec![
            (FilterType::FailedVariant, 4, 1),
            (FilterType::Interval, 3, 1),
            (FilterType::Quality, 2, 1),
            (FilterType::KnownVariant, 1, 1),
        ]
    );
}

#[test]
fn out_of_range_prediction_aborts_the_run() {
    let bad = variant("1", 100).build();
    let source = Arc::new(MockAnnotationSource::new().with_pathogenicity(
        &bad.key(),
        PathogenicityData::new(
            vec![PathogenicityScore { source: PathogenicitySource::Polyphen, score: 7.0 }],
            None,
        ),
    ));
    let provisioner = AnnotationProvisioner::new(source);
    let filters: Vec<Box<dyn Filter<VariantRecord>>> = vec![Box::new(PathogenicityFilter::new(false))];

    let result = FilterRunner::exhaustive()
        .with_provisioner(&provisioner)
        .run(&filters, vec![bad]);
    assert!(matches!(result, Err(VarrankError::MalformedAnnotation { .. })));
}

#[test]
fn variant_reports_from_gene_held_variants() {
    let filters: Vec<Box<dyn Filter<VariantRecord>>> = vec![Box::new(QualityFilter::new(30.0).unwrap())];
    let variants = FilterRunner::exhaustive()
        .run(
            &filters,
            vec![
                variant("10", 1).build(),
                variant("10", 2).quality(10.0).build(),
                variant("7", 3).build(),
            ],
        )
        .unwrap();
    let mut variants = variants.into_iter();
    let genes = vec![
        gene("FGFR2", "2263")
            .variant(variants.next().unwrap())
            .variant(variants.next().unwrap())
            .build(),
        gene("SHH", "6469").variant(variants.next().unwrap()).build(),
    ];

    let reports = ReportBuilder::gene_variant_reports(&filters, &genes);
    assert_eq!(reports.len(), 1);
    assert_eq!((reports[0].passed, reports[0].failed), (2, 1));
}
