//! Benchmarks for dishcost core operations.
//!
//! Run with: cargo bench
//!
//! Results include 95% confidence intervals via Criterion.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use dishcost::core::aggregator::RecipeCostAggregator;
use dishcost::core::classifier::IngredientClassifier;
use dishcost::core::types::{Observation, PriceIndex, RecipeCostResult, RecipeRef};
use dishcost::core::{parser, price_index, ranker};

const INGREDIENTS: &[&str] = &[
    "500 g de boeuf haché",
    "2 oignons",
    "1 gousse d'ail",
    "800 g de tomates concassées",
    "12 feuilles de lasagne",
    "50 cl de lait",
    "60 g de beurre",
    "50 g de farine",
    "100 g de gruyère râpé",
    "sel",
    "poivre",
    "3 oeufs",
];

fn bench_classify(c: &mut Criterion) {
    let classifier = IngredientClassifier::default();
    c.bench_function("classify_ingredients", |b| {
        b.iter(|| {
            for name in INGREDIENTS {
                black_box(classifier.identify(black_box(name)));
            }
        });
    });
}

fn bench_build_index(c: &mut Criterion) {
    let observations = vec![
        Observation::new("Chicken Fillets (1kg)", "11.20 €"),
        Observation::new("Beef Round (1kg)", "19.50 €"),
        Observation::new("Rice (white), (1kg)", "2.40 €"),
        Observation::new("Local Cheese (1kg)", "17.80 €"),
        Observation::new("Tomato (1kg)", "3.60 €"),
        Observation::new("Potato (1kg)", "1,90 €"),
        Observation::new("Onion (1kg)", "2.30 €"),
        Observation::new("Cappuccino (regular)", "4.10 €"),
    ];
    c.bench_function("build_price_index", |b| {
        b.iter(|| black_box(price_index::build_index(black_box(&observations))));
    });
}

fn bench_aggregate(c: &mut Criterion) {
    let classifier = IngredientClassifier::default();
    let index = PriceIndex::default();
    let aggregator = RecipeCostAggregator::new(&classifier, &index);

    let mut group = c.benchmark_group("aggregate");
    for n in [10, 50, 200] {
        let ingredients: Vec<&str> = INGREDIENTS.iter().copied().cycle().take(n).collect();
        group.bench_with_input(BenchmarkId::from_parameter(n), &ingredients, |b, ingredients| {
            b.iter(|| {
                let recipe = RecipeRef::new("bench", "https://example.org/bench");
                black_box(aggregator.aggregate(recipe, black_box(ingredients)))
            });
        });
    }
    group.finish();
}

fn bench_rank(c: &mut Criterion) {
    let mut group = c.benchmark_group("rank");
    for n in [3, 30, 300] {
        let results: Vec<RecipeCostResult> = (0..n)
            .map(|i| RecipeCostResult {
                recipe: RecipeRef::new(format!("recipe-{i:04}"), ""),
                items: vec![],
                total: ((i * 7919) % 1000) as f64 / 100.0,
            })
            .collect();
        group.bench_with_input(BenchmarkId::from_parameter(n), &results, |b, results| {
            b.iter(|| black_box(ranker::rank(results.clone())));
        });
    }
    group.finish();
}

fn bench_config_parse(c: &mut Criterion) {
    let yaml = r#"
version: "1.0"
city: Lyon
dish: gratin dauphinois
max_candidates: 3
sources:
  kind: fixture
  fixture: data.yaml
report:
  format: html
  output_dir: reports
  breakdown_limit: 6
taxonomy:
  STARCH: [pomme de terre, patate, riz, pâtes]
  DAIRY: [crème, lait, beurre, gruyère]
"#;

    c.bench_function("parse_and_validate_config", |b| {
        b.iter(|| {
            let config = parser::parse_config(black_box(yaml)).unwrap();
            black_box(parser::validate_config(&config));
        });
    });
}

criterion_group!(
    benches,
    bench_classify,
    bench_build_index,
    bench_aggregate,
    bench_rank,
    bench_config_parse
);
criterion_main!(benches);
