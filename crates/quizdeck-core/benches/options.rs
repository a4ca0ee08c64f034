use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;

use quizdeck_core::distractor::{build_options, pick_distractors};
use quizdeck_core::model::{Deck, Term};

fn make_deck(n: usize) -> Deck {
    let categories = ["Psychology", "Sociology", "People"];
    let subcategories = ["Memory", "Cognition", "Groups"];
    let terms = (0..n)
        .map(|i| Term {
            term: format!("term-{i}"),
            definition: format!("definition of term {i}"),
            tag1: categories[i % categories.len()].to_string(),
            tag2: subcategories[i % subcategories.len()].to_string(),
            subsection: String::new(),
        })
        .collect();
    Deck::new(terms).with_flat_categories(["People"])
}

fn bench_pick_distractors(c: &mut Criterion) {
    let mut group = c.benchmark_group("pick_distractors");

    for n in [100usize, 1_000, 10_000] {
        let deck = make_deck(n);
        let pool: Vec<&Term> = deck.terms.iter().collect();
        let target = &deck.terms[0];
        group.bench_function(format!("n={n}"), |b| {
            let mut rng = StdRng::seed_from_u64(42);
            b.iter(|| {
                pick_distractors(
                    black_box(&deck),
                    black_box(&pool),
                    black_box(target),
                    false,
                    &mut rng,
                )
            })
        });
    }

    group.finish();
}

fn bench_build_options(c: &mut Criterion) {
    let deck = make_deck(100);
    let target = &deck.terms[0];
    let distractors = vec![
        "definition of term 3".to_string(),
        "definition of term 6".to_string(),
        "definition of term 9".to_string(),
    ];

    c.bench_function("build_options", |b| {
        let mut rng = StdRng::seed_from_u64(42);
        b.iter(|| {
            build_options(
                black_box(target),
                black_box(distractors.clone()),
                true,
                &mut rng,
            )
        })
    });
}

criterion_group!(benches, bench_pick_distractors, bench_build_options);
criterion_main!(benches);
