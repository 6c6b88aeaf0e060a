//! Text report and JSON writer for a [TransmissionNetwork].

use crate::error::AnalysisError;
use crate::network::{TransmissionEdge, TransmissionNetwork};
use serde::Serialize;
use std::fs::File;
use std::io;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;

/// Suffix of the text report file
const REPORT_SUFFIX: &str = "_network.txt";

/// Suffix of the JSON file
const JSON_SUFFIX: &str = "_network.json";

// =#========================================================================#=
// NETWORK WRITER
// =#========================================================================#=
/// Buffered writer for a [TransmissionNetwork].
///
/// # Text report structure
/// - `Hosts:` list
/// - `Probabilities of being root:` per host
/// - `Probabilities direct transmission:` per source host, non-zero only
/// - `Probabilities indirect transmission:` per source host, non-zero only
/// - `Probabilities of direct transmittor to each sampled host:` per
///   destination host, entries only for hosts that had an origin in at least
///   one tree
///
/// # Example
/// ```ignore
/// use basta_network::network::NetworkWriter;
/// use std::fs::File;
///
/// let file = File::create("outbreak_network.txt")?;
/// let mut writer = NetworkWriter::new(file);
/// writer.write_report(&network)?;
/// ```
pub struct NetworkWriter<W: Write> {
    bw: BufWriter<W>,
}

/// JSON document: the full network plus its thresholded edge lists.
#[derive(Serialize)]
struct JsonReport<'a> {
    min_value: f64,
    network: &'a TransmissionNetwork,
    direct_edges: Vec<TransmissionEdge>,
    transmission_edges: Vec<TransmissionEdge>,
}

// ============================================================================
// API (public)
// ============================================================================
impl<W: Write> NetworkWriter<W> {
    /// Creates a new network writer around `inner`.
    pub fn new(inner: W) -> NetworkWriter<W> {
        NetworkWriter {
            bw: BufWriter::new(inner),
        }
    }

    /// Writes the complete text report and flushes.
    ///
    /// # Errors
    /// Returns an I/O error if writing fails
    pub fn write_report(&mut self, network: &TransmissionNetwork) -> io::Result<()> {
        self.hosts_section(network)?
            .roots_section(network)?
            .direct_section(network)?
            .indirect_section(network)?
            .origins_section(network)?;
        self.bw.flush()
    }

    /// Writes the network as a pretty-printed JSON document and flushes.
    ///
    /// # Arguments
    /// * `network` - Network to write
    /// * `min_value` - Threshold for the included edge lists
    pub fn write_json(
        &mut self,
        network: &TransmissionNetwork,
        min_value: f64,
    ) -> Result<(), AnalysisError> {
        let report = JsonReport {
            min_value,
            network,
            direct_edges: network.direct_edges(min_value),
            transmission_edges: network.transmission_edges(min_value),
        };
        serde_json::to_writer_pretty(&mut self.bw, &report)?;
        self.bw.write_all(b"\n")?;
        self.bw.flush()?;
        Ok(())
    }

    /// Unwraps this writer, returning the underlying writer.
    pub fn into_inner(self) -> Result<W, AnalysisError> {
        self.bw
            .into_inner()
            .map_err(|e| AnalysisError::from(e.into_error()))
    }
}

/// Writes `<prefix>_network.txt` and, if requested, `<prefix>_network.json`.
///
/// # Returns
/// Paths of the written files
pub fn write_network_files<P: AsRef<Path>>(
    prefix: P,
    network: &TransmissionNetwork,
    min_value: f64,
    json: bool,
) -> Result<Vec<PathBuf>, AnalysisError> {
    let mut written = Vec::new();

    let report_path = with_suffix(prefix.as_ref(), REPORT_SUFFIX);
    NetworkWriter::new(File::create(&report_path)?).write_report(network)?;
    info!(
        "File {} containing output information successfully created",
        report_path.display()
    );
    written.push(report_path);

    if json {
        let json_path = with_suffix(prefix.as_ref(), JSON_SUFFIX);
        NetworkWriter::new(File::create(&json_path)?).write_json(network, min_value)?;
        info!(
            "File {} containing the network as JSON successfully created",
            json_path.display()
        );
        written.push(json_path);
    }

    Ok(written)
}

// ============================================================================
// Report Sections (private)
// ============================================================================
impl<W: Write> NetworkWriter<W> {
    /// Writes "Hosts: H1, H2, ", returning itself for chaining.
    fn hosts_section(&mut self, network: &TransmissionNetwork) -> io::Result<&mut Self> {
        self.write_str("Hosts: ")?;
        for host in network.hosts() {
            self.write_str(host)?.separator()?;
        }
        self.write_str("\n\n\n")
    }

    /// Writes the root probability of every host, returning itself for chaining.
    fn roots_section(&mut self, network: &TransmissionNetwork) -> io::Result<&mut Self> {
        self.write_str("Probabilities of being root: ")?;
        for (host, &probability) in network.hosts().iter().zip(network.root_probabilities()) {
            self.entry(host, probability)?;
        }
        self.write_str("\n\n\n")
    }

    fn direct_section(&mut self, network: &TransmissionNetwork) -> io::Result<&mut Self> {
        self.write_str("Probabilities direct transmission: \n\n")?
            .matrix_section(network, network.direct_matrix())?
            .write_str("\n\n")
    }

    fn indirect_section(&mut self, network: &TransmissionNetwork) -> io::Result<&mut Self> {
        self.write_str("Probabilities indirect transmission: \n")?
            .matrix_section(network, network.indirect_matrix())?
            .write_str("\n\n")
    }

    /// Writes one "From host" block per host with all non-zero, off-diagonal
    /// entries of its row.
    fn matrix_section(
        &mut self,
        network: &TransmissionNetwork,
        matrix: &[Vec<f64>],
    ) -> io::Result<&mut Self> {
        let hosts = network.hosts();
        for (i, from) in hosts.iter().enumerate() {
            self.write_str("From host ")?
                .write_str(from)?
                .write_str(" to : \n")?;
            for (j, to) in hosts.iter().enumerate() {
                if i != j && matrix[i][j] != 0.0 {
                    self.entry(to, matrix[i][j])?;
                }
            }
            self.write_str("\n\n")?;
        }
        Ok(self)
    }

    /// Writes one "To host" block per host; the entries and the closing blank
    /// line are only written for hosts with at least one observed origin.
    fn origins_section(&mut self, network: &TransmissionNetwork) -> io::Result<&mut Self> {
        self.write_str("Probabilities of direct transmittor to each sampled host: \n\n")?;
        for host in network.hosts() {
            self.write_str("To host ")?
                .write_str(host)?
                .write_str(" from : \n")?;
            let origins = network.origin_probabilities(host).unwrap_or(&[]);
            if origins.is_empty() {
                continue;
            }
            for origin in origins {
                self.entry(origin.origin.as_str(), origin.probability)?;
            }
            self.write_str("\n\n")?;
        }
        self.write_str("\n\n")
    }
}

// ============================================================================
// Low-level Writing Helpers (private)
// ============================================================================
impl<W: Write> NetworkWriter<W> {
    /// Writes a string, returning itself for chaining.
    #[inline]
    fn write_str(&mut self, s: &str) -> io::Result<&mut Self> {
        self.bw.write_all(s.as_bytes())?;
        Ok(self)
    }

    /// Writes "<label> <probability>, ", returning itself for chaining.
    fn entry(&mut self, label: &str, probability: f64) -> io::Result<&mut Self> {
        // Debug formatting keeps a trailing ".0" for whole numbers
        write!(self.bw, "{label} {probability:?}")?;
        self.separator()
    }

    /// Writes ", ", returning itself for chaining.
    #[inline]
    fn separator(&mut self) -> io::Result<&mut Self> {
        self.write_str(", ")
    }
}

fn with_suffix(prefix: &Path, suffix: &str) -> PathBuf {
    let mut path = prefix.as_os_str().to_owned();
    path.push(suffix);
    PathBuf::from(path)
}
