use basta_network::analysis::Aggregator;
use basta_network::nexus::{Burnin, read_tree_texts_from_str};
use criterion::{Criterion, criterion_group, criterion_main};
use rand::{Rng, SeedableRng, rngs::StdRng};
use std::hint::black_box;

const SAMPLES: &[(&str, usize, usize, usize)] = &[
    // (name, trees, leaves per tree, hosts)
    ("t200_n50_h10", 200, 50, 10),
    ("t1000_n129_h30", 1000, 129, 30),
];

fn annotated(label: &str, host: &str, events: usize) -> String {
    format!("{label}[&host={host},numTransmissions={events}]:1.0")
}

fn random_host(rng: &mut StdRng, num_hosts: usize) -> String {
    match rng.random_range(0..=num_hosts) {
        0 => "Unsampled".to_string(),
        h => format!("H{h}"),
    }
}

/// Random binary subtree over `num_leaves` leaves below `parent`, with `carry`
/// events pending since `parent` was left.
fn synthetic_subtree(
    rng: &mut StdRng,
    num_leaves: usize,
    num_hosts: usize,
    parent: &str,
    carry: usize,
) -> String {
    let host = random_host(rng, num_hosts);
    let mut events = rng.random_range(0..3);
    // A single event cannot lead back into the same host
    if host == parent && host != "Unsampled" && events + carry == 1 {
        events = 2;
    }

    if num_leaves == 1 {
        let label: u32 = rng.random_range(1..1000);
        return annotated(&label.to_string(), &host, events);
    }

    let (next_parent, next_carry) = match events {
        0 => (parent, carry),
        _ if host == "Unsampled" => (parent, carry + events),
        _ => (host.as_str(), 0),
    };
    let num_first = rng.random_range(1..num_leaves);
    let first = synthetic_subtree(rng, num_first, num_hosts, next_parent, next_carry);
    let second = synthetic_subtree(
        rng,
        num_leaves - num_first,
        num_hosts,
        next_parent,
        next_carry,
    );
    annotated(&format!("({first},{second})"), &host, events)
}

fn synthetic_tree(rng: &mut StdRng, num_leaves: usize, num_hosts: usize) -> String {
    let root = random_host(rng, num_hosts);
    let first = synthetic_subtree(rng, num_leaves / 2, num_hosts, &root, 0);
    let second = synthetic_subtree(rng, num_leaves - num_leaves / 2, num_hosts, &root, 0);
    annotated(&format!("({first},{second})"), &root, 0)
}

/// Trees file content with `num_trees` random annotated trees.
fn synthetic_sample(num_trees: usize, num_leaves: usize, num_hosts: usize) -> String {
    let mut rng = StdRng::seed_from_u64(42);
    let mut content = String::from("#NEXUS\n\nBegin trees;\n");
    for i in 0..num_trees {
        let tree = synthetic_tree(&mut rng, num_leaves, num_hosts);
        content.push_str(&format!("tree STATE_{} = {tree};\n", i * 1000));
    }
    content.push_str("End;\n");
    content
}

fn analyze_sequential(trees: &[String]) {
    let mut aggregator = Aggregator::new();
    aggregator.process_trees(trees).unwrap();
    black_box(aggregator.finish().unwrap());
}

fn analyze_parallel(trees: &[String]) {
    let mut aggregator = Aggregator::new();
    aggregator.process_trees_parallel(trees).unwrap();
    black_box(aggregator.finish().unwrap());
}

fn tree_analysis(c: &mut Criterion) {
    for &(name, num_trees, num_leaves, num_hosts) in SAMPLES {
        let content = synthetic_sample(num_trees, num_leaves, num_hosts);
        let trees = read_tree_texts_from_str(&content, Burnin::Percent(10)).unwrap();

        c.bench_function(&format!("{name}_sequential"), |b| {
            b.iter(|| analyze_sequential(&trees));
        });
        c.bench_function(&format!("{name}_parallel"), |b| {
            b.iter(|| analyze_parallel(&trees));
        });
    }
}

fn sample_reading(c: &mut Criterion) {
    let (name, num_trees, num_leaves, num_hosts) = SAMPLES[1];
    let content = synthetic_sample(num_trees, num_leaves, num_hosts);
    c.bench_function(&format!("{name}_reading"), |b| {
        b.iter(|| read_tree_texts_from_str(&content, Burnin::Percent(10)).unwrap());
    });
}

criterion_group!(analysis, tree_analysis);
criterion_group! {
    name = reading;
    config = Criterion::default().sample_size(10);
    targets = sample_reading
}
criterion_main!(analysis, reading);
