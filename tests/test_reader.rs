use basta_network::AnalysisErrorType;
use basta_network::nexus::{
    Burnin, TreeSampleReaderBuilder, read_tree_texts, read_tree_texts_from_str,
};
use std::io::Write;
use std::path::{Path, PathBuf};

fn fixture(name: &str) -> PathBuf {
    Path::new("tests").join("fixtures").join(name)
}

#[test]
fn test_single_tree() {
    let trees = read_tree_texts(fixture("outbreak_t1_h2.trees"), Burnin::default()).unwrap();

    assert_eq!(trees.len(), 1);
    assert!(trees[0].starts_with("(1[&host=H1,numTransmissions=0]:1.0,"));
    assert!(trees[0].ends_with("[&host=H1,numTransmissions=0]:0.0;"));
}

#[test]
fn test_burnin_percentage() {
    let reader = TreeSampleReaderBuilder::for_file(fixture("outbreak_t10_h4.trees"))
        .with_burnin(Burnin::Percentage(0.2))
        .build()
        .unwrap();

    assert_eq!(reader.num_total_trees(), 10);
    assert_eq!(reader.num_burnin_trees(), 2);
    assert_eq!(reader.num_trees(), 8);

    let trees = reader.into_tree_texts().unwrap();
    assert_eq!(trees.len(), 8);
    // First retained sample is STATE_2000, rooted in an unsampled host
    let first = &trees[0];
    assert!(first.ends_with("[&host=Unsampled,numTransmissions=0]:0.0;"));
}

#[test]
fn test_skip_first_then_burnin() {
    let reader = TreeSampleReaderBuilder::for_file(fixture("outbreak_t10_h4.trees"))
        .with_skip_first()
        .with_burnin(Burnin::Percentage(0.2))
        .build()
        .unwrap();

    // 9 candidates after skipping the first, floor(1.8) = 1 burnin tree
    assert_eq!(reader.num_total_trees(), 10);
    assert_eq!(reader.num_burnin_trees(), 1);
    assert_eq!(reader.num_trees(), 8);
}

#[test]
fn test_lazy_matches_eager() {
    let eager = TreeSampleReaderBuilder::for_file(fixture("outbreak_t10_h4.trees"))
        .with_burnin(Burnin::Count(3))
        .eager()
        .build()
        .unwrap()
        .into_tree_texts()
        .unwrap();

    let mut reader = TreeSampleReaderBuilder::for_file(fixture("outbreak_t10_h4.trees"))
        .with_burnin(Burnin::Count(3))
        .lazy()
        .build()
        .unwrap();
    let mut lazy = Vec::new();
    while let Some(tree) = reader.next_tree().unwrap() {
        lazy.push(tree);
    }

    assert_eq!(eager.len(), 7);
    assert_eq!(eager, lazy);
    assert_eq!(reader.next_tree().unwrap(), None);
}

#[test]
fn test_burnin_of_all_trees() {
    let trees = read_tree_texts(fixture("outbreak_t10_h4.trees"), Burnin::Count(25)).unwrap();
    assert!(trees.is_empty());
}

#[test]
fn test_missing_trees_block() {
    let err = read_tree_texts(fixture("no_trees.trees"), Burnin::default()).unwrap_err();
    assert_eq!(err.kind(), &AnalysisErrorType::MissingTreesBlock);
}

#[test]
fn test_missing_file() {
    let err = read_tree_texts(fixture("does_not_exist.trees"), Burnin::default()).unwrap_err();
    assert!(matches!(err.kind(), AnalysisErrorType::IoError(_)));
}

#[test]
fn test_block_ends_at_different_token_count() {
    let content = "\
#NEXUS
Begin trees;
tree STATE_0 = (A[&host=H1,numTransmissions=0],B[&host=H1,numTransmissions=0])[&host=H1,numTransmissions=0];
tree STATE_1 = (A[&host=H2,numTransmissions=0],B[&host=H2,numTransmissions=0])[&host=H2,numTransmissions=0];
tree STATE_2 = [&R] (A[&host=H3,numTransmissions=0],B[&host=H3,numTransmissions=0])[&host=H3,numTransmissions=0];
tree STATE_3 = (A[&host=H4,numTransmissions=0],B[&host=H4,numTransmissions=0])[&host=H4,numTransmissions=0];
End;
";
    let trees = read_tree_texts_from_str(content, Burnin::default()).unwrap();

    assert_eq!(trees.len(), 2);
    assert!(trees[1].contains("H2"));
}

#[test]
fn test_read_from_temp_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "#NEXUS\n\nBegin trees;").unwrap();
    for i in 0..5 {
        writeln!(
            file,
            "tree STATE_{i} = (A[&host=H1,numTransmissions=0]:1.0,B[&host=H{i},numTransmissions=1]:1.0)[&host=H1,numTransmissions=0]:0.0;"
        )
        .unwrap();
    }
    writeln!(file, "End;").unwrap();

    let trees = read_tree_texts(file.path(), Burnin::Percentage(0.4)).unwrap();
    assert_eq!(trees.len(), 3);
    assert!(trees[0].contains("host=H2"));
}

#[test]
fn test_burnin_count() {
    assert_eq!(Burnin::Count(5).get_count(100), 5);
    assert_eq!(Burnin::Count(500).get_count(100), 100);
    assert_eq!(Burnin::Percentage(0.2).get_count(100), 20);
    assert_eq!(Burnin::Percentage(0.2).get_count(9), 1);
    assert_eq!(Burnin::Percentage(0.5).get_count(7), 3);
    assert_eq!(Burnin::Percentage(0.0).get_count(0), 0);
}

#[test]
fn test_burnin_percent_is_exact() {
    // 0.29 * 100.0 is 28.999999999999996, integer percentages do not round down
    assert_eq!(Burnin::Percent(29).get_count(100), 29);
    assert_eq!(Burnin::Percent(57).get_count(100), 57);
    assert_eq!(Burnin::Percent(20).get_count(9), 1);
    assert_eq!(Burnin::Percent(10).get_count(0), 0);
    assert_eq!(Burnin::Percent(0).get_count(1000), 0);
}

#[test]
fn test_percent_burnin_of_hundred_trees() {
    let mut content = String::from("#NEXUS\nBegin trees;\n");
    for i in 0..100 {
        content.push_str(&format!(
            "tree STATE_{i} = (A[&host=H1,numTransmissions=0],B[&host=H{i},numTransmissions=1])[&host=H1,numTransmissions=0];\n"
        ));
    }
    content.push_str("End;\n");

    let trees = read_tree_texts_from_str(&content, Burnin::Percent(29)).unwrap();

    assert_eq!(trees.len(), 71);
    assert!(trees[0].contains("host=H29,"));
}
