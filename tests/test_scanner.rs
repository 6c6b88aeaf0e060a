use basta_network::AnalysisErrorType;
use basta_network::parser::{extract_annotation, scan_node, separate_metadata, split_children};

#[test]
fn test_split_nested_children() {
    let clause = "((A[&host=H1,numTransmissions=0]:1.0,B[&host=H2,numTransmissions=1]:1.0)[&host=H1,numTransmissions=0]:0.5,C[&host=H3,numTransmissions=2]:1.5)";
    let (first, second) = split_children(clause).unwrap().unwrap();

    assert_eq!(
        first,
        "(A[&host=H1,numTransmissions=0]:1.0,B[&host=H2,numTransmissions=1]:1.0)[&host=H1,numTransmissions=0]:0.5"
    );
    assert_eq!(second, "C[&host=H3,numTransmissions=2]:1.5");
}

#[test]
fn test_split_requires_parentheses() {
    let result = split_children("A[&host=H1,numTransmissions=0],B[&host=H2,numTransmissions=0]");
    let err = result.unwrap_err();
    assert!(matches!(err.kind(), AnalysisErrorType::MalformedTree(_)));

    assert!(split_children("(A,B").is_err());
    assert!(split_children("A,B)").is_err());
}

#[test]
fn test_split_without_comma_has_no_second_child() {
    assert_eq!(split_children("()").unwrap(), None);
    assert_eq!(
        split_children("((A,B)[&host=H1,numTransmissions=0])").unwrap(),
        None
    );
}

#[test]
fn test_separate_internal_node() {
    let node = separate_metadata(
        "(A[&host=H1,numTransmissions=0]:1.0,B[&host=H2,numTransmissions=1]:1.0)[&host=Unsampled,numTransmissions=3]:2.25",
    );

    assert!(!node.is_leaf());
    assert_eq!(
        node.clause,
        Some("(A[&host=H1,numTransmissions=0]:1.0,B[&host=H2,numTransmissions=1]:1.0)")
    );
    assert_eq!(node.metadata, "[&host=Unsampled,numTransmissions=3]:2.25");

    let annotation = node.annotation().unwrap();
    assert_eq!(annotation.host, "Unsampled");
    assert_eq!(annotation.event_count, 3);
    assert!(annotation.is_unsampled());
}

#[test]
fn test_separate_leaf() {
    let node = separate_metadata("17[&host=patient_4,numTransmissions=0]:0.3");
    assert!(node.is_leaf());
    assert_eq!(node.metadata, "17[&host=patient_4,numTransmissions=0]:0.3");
}

#[test]
fn test_scan_whole_tree_with_semicolon() {
    let tree = "(A[&host=H1,numTransmissions=0]:1.0,B[&host=H2,numTransmissions=1]:1.0)[&host=H1,numTransmissions=0]:0.0;";
    let (clause, annotation) = scan_node(tree).unwrap();

    assert!(clause.is_some());
    assert_eq!(annotation.host, "H1");
    assert_eq!(annotation.event_count, 0);
}

#[test]
fn test_annotation_with_additional_traits() {
    let annotation =
        extract_annotation("[&host=H7,host.prob=0.93,numTransmissions=4,rate=1.2E-3]").unwrap();
    assert_eq!(annotation.host, "H7");
    assert_eq!(annotation.event_count, 4);
}

#[test]
fn test_annotation_fragments_without_value_are_ignored() {
    let annotation = extract_annotation("[&R,host=X,&host=H1,numTransmissions=1]").unwrap();
    assert_eq!(annotation.host, "H1");
    assert_eq!(annotation.event_count, 1);
}

#[test]
fn test_annotation_missing_trait() {
    let err = extract_annotation("A[&host=H1]:1.0").unwrap_err();
    assert!(matches!(err.kind(), AnalysisErrorType::MissingTrait(_)));
    assert_eq!(err.context(), "A[&host=H1]:1.0");

    let err = extract_annotation("A[&numTransmissions=2]").unwrap_err();
    assert!(matches!(err.kind(), AnalysisErrorType::MissingTrait(_)));
}

#[test]
fn test_annotation_missing_brackets() {
    let err = extract_annotation("A:1.0").unwrap_err();
    assert!(matches!(err.kind(), AnalysisErrorType::MalformedTree(_)));

    let err = extract_annotation("A[&host=H1,numTransmissions=0").unwrap_err();
    assert!(matches!(err.kind(), AnalysisErrorType::MalformedTree(_)));
}

#[test]
fn test_annotation_invalid_event_count() {
    for text in [
        "[&host=H1,numTransmissions=-1]",
        "[&host=H1,numTransmissions=1.5]",
        "[&host=H1,numTransmissions=]",
    ] {
        let err = extract_annotation(text).unwrap_err();
        assert!(
            matches!(err.kind(), AnalysisErrorType::MalformedTree(_)),
            "unexpected error for {text}: {err}"
        );
    }
}

#[test]
fn test_error_context_is_truncated() {
    let long_label = "x".repeat(200);
    let err = extract_annotation(&long_label).unwrap_err();
    assert_eq!(err.context().chars().count(), 50);
}
