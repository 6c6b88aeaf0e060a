use basta_network::network::{NetworkWriter, write_network_files};
use basta_network::{AnalysisConfig, analyze_file, analyze_tree_strs};
use pretty_assertions::assert_eq;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

fn fixture(name: &str) -> PathBuf {
    Path::new("tests").join("fixtures").join(name)
}

fn fixture_network() -> basta_network::TransmissionNetwork {
    let config = AnalysisConfig {
        burnin_percent: 20,
        ..AnalysisConfig::default()
    };
    analyze_file(fixture("outbreak_t10_h4.trees"), &config).unwrap()
}

#[test]
fn test_text_report_matches_reference() {
    let network = fixture_network();

    let mut writer = NetworkWriter::new(Vec::new());
    writer.write_report(&network).unwrap();
    let report = String::from_utf8(writer.into_inner().unwrap()).unwrap();

    let expected_path = fixture("outbreak_t10_h4_burnin20_network.txt");
    let expected = fs::read_to_string(expected_path).unwrap();
    assert_eq!(report, expected);
}

#[test]
fn test_text_report_host_without_origin() {
    // H2 only appears on a branch without events, so it never gets an origin
    let tree = "(A[&host=H1,numTransmissions=0]:1.0,B[&host=H2,numTransmissions=0]:1.0)[&host=H1,numTransmissions=0]:0.0";
    let network = analyze_tree_strs([tree]).unwrap();

    let mut writer = NetworkWriter::new(Vec::new());
    writer.write_report(&network).unwrap();
    let report = String::from_utf8(writer.into_inner().unwrap()).unwrap();

    let head = "Hosts: H1, H2, \n\n\nProbabilities of being root: H1 1.0, H2 0.0, \n\n\n";
    let tail = "Probabilities of direct transmittor to each sampled host: \n\n\
                To host H1 from : \nUnsampled 1.0, \n\n\
                To host H2 from : \n\n\n";
    assert!(report.starts_with(head));
    assert!(report.ends_with(tail));
}

#[test]
fn test_write_network_files() {
    let network = fixture_network();
    let dir = tempfile::tempdir().unwrap();
    let prefix = dir.path().join("outbreak");

    let written = write_network_files(&prefix, &network, 0.3, true).unwrap();

    let report_path = dir.path().join("outbreak_network.txt");
    let json_path = dir.path().join("outbreak_network.json");
    assert_eq!(written, vec![report_path, json_path]);
    let report = fs::read_to_string(&written[0]).unwrap();
    assert!(report.starts_with("Hosts: H1, H2, H3, H4, "));

    let json: Value = serde_json::from_str(&fs::read_to_string(&written[1]).unwrap()).unwrap();
    assert_eq!(json["min_value"], 0.3);
    assert_eq!(json["network"]["num_trees"], 8);
    assert_eq!(json["network"]["hosts"][3], "H4");
    assert_eq!(json["network"]["origins"][2][3]["origin"], "doubleOrigin");
    assert_eq!(json["network"]["origins"][2][3]["probability"], 0.125);

    let direct_edges = json["direct_edges"].as_array().unwrap();
    assert_eq!(direct_edges.len(), 2);
    assert_eq!(direct_edges[0]["from"], "H1");
    assert_eq!(direct_edges[0]["to"], "H2");
    assert_eq!(direct_edges[0]["probability"], 0.375);

    let transmission_edges = json["transmission_edges"].as_array().unwrap();
    assert_eq!(transmission_edges.len(), 2);
    assert_eq!(transmission_edges[1]["to"], "H3");
    assert_eq!(transmission_edges[1]["probability"], 0.5);
}

#[test]
fn test_write_report_only() {
    let network = fixture_network();
    let dir = tempfile::tempdir().unwrap();

    let written = write_network_files(dir.path().join("run1"), &network, 0.1, false).unwrap();

    assert_eq!(written.len(), 1);
    assert!(!dir.path().join("run1_network.json").exists());
}

#[test]
fn test_edges_are_strictly_above_threshold() {
    let network = fixture_network();

    let edges = network.direct_edges(0.25);
    let pairs: Vec<(&str, &str)> = edges
        .iter()
        .map(|e| (e.from.as_str(), e.to.as_str()))
        .collect();
    assert_eq!(pairs, vec![("H1", "H2"), ("H1", "H3")]);

    // No self pair even though H2 -> H2 was recorded as indirect
    let edges = network.transmission_edges(0.0);
    assert!(edges.iter().all(|e| e.from != e.to));
}
