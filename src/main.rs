// Standard Library Imports
use std::{
    fs,
    io::{self, Write},
    path::PathBuf,
};

// External Crate Imports
use clap::Parser;
use dispatcher::{
    DatabaseCatalog, JobStatus, JobStore, JobWorker, MemoryStore, ResultRecord, SearchRequest,
};
use miette::{IntoDiagnostic, Result, WrapErr, bail};
use proteome::IonMode;
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Identifies the organisms behind a mass spectrum, by matching its peaks against the ribosomal proteins in a
/// reference database
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// A KDL catalog of reference databases (defaults to the bundled catalog, relative to this directory)
    #[arg(short, long)]
    catalog: Option<PathBuf>,
    /// The name of the reference database to search
    #[arg(short, long, default_value = "Ribosomal Proteins in Bacteria: Reviewed")]
    database: String,
    /// A file of peak masses, separated by tabs or newlines
    #[arg(short, long)]
    spectrum: PathBuf,
    /// The smallest sequence mass (in Daltons) to consider
    #[arg(long, default_value_t = 3_000.0)]
    min_mass: f64,
    /// The largest sequence mass (in Daltons) to consider
    #[arg(long, default_value_t = 15_000.0)]
    max_mass: f64,
    /// How far (in Daltons) a peak may be from a biomarker and still match it
    #[arg(short, long, default_value_t = 5.0)]
    tolerance: f64,
    /// The ionization mode the spectrum was acquired in
    #[arg(short, long, default_value_t = IonMode::Positive)]
    mode: IonMode,
    #[arg(long, default_value = "anonymous")]
    owner: String,
    #[arg(long, default_value = "Untitled search")]
    title: String,
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let catalog = match &args.catalog {
        Some(path) => DatabaseCatalog::load(path)?,
        None => DatabaseCatalog::bundled("."),
    };

    let peaks = fs::read_to_string(&args.spectrum)
        .into_diagnostic()
        .wrap_err_with(|| format!("failed to read the spectrum at {:?}", args.spectrum))?;
    let request = SearchRequest {
        owner: args.owner,
        title: args.title,
        query: tab_separated(&peaks),
        min_mass: args.min_mass,
        max_mass: args.max_mass,
        mass_tolerance: args.tolerance,
        mode: args.mode,
        database: args.database,
    };

    let results = search(request, &catalog)?;
    write_results(&results, io::stdout().lock())
}

// Private Functions ===================================================================================================

/// Runs a single search to completion in a fresh in-memory store
fn search(request: SearchRequest, catalog: &DatabaseCatalog) -> Result<Vec<ResultRecord>> {
    let store = MemoryStore::new();
    let id = store.submit(request)?;
    JobWorker::new(&store, catalog).run_once()?;

    match store.job(id)?.status() {
        JobStatus::Done => {
            let results = store.results(id)?;
            info!(job = %id, organisms = results.len(), "writing results");
            Ok(results)
        }
        JobStatus::Failed { reason } => bail!("search {id} failed: {reason}"),
        status => bail!("search {id} never finished, and was left {status}"),
    }
}

/// Joins peaks given one-per-line into the tab-separated form searches expect
fn tab_separated(peaks: &str) -> String {
    peaks
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\t")
}

#[derive(Serialize)]
struct ResultRow<'r> {
    #[serde(rename = "Organism")]
    organism: &'r str,
    #[serde(rename = "Matching Hits")]
    matching_hits: usize,
    #[serde(rename = "P-Value")]
    p_value: f64,
    #[serde(rename = "E-Value")]
    e_value: f64,
}

impl<'r> From<&'r ResultRecord> for ResultRow<'r> {
    fn from(record: &'r ResultRecord) -> Self {
        Self {
            organism: record.organism_name(),
            matching_hits: record.matching_hit(),
            p_value: record.p_value(),
            e_value: record.e_value(),
        }
    }
}

fn write_results(results: &[ResultRecord], writer: impl Write) -> Result<()> {
    // NOTE: Headers are written by hand so that a search with no results still gets them
    let mut csv = csv::WriterBuilder::new().has_headers(false).from_writer(writer);
    csv.write_record(["Organism", "Matching Hits", "P-Value", "E-Value"])
        .into_diagnostic()?;
    for record in results {
        csv.serialize(ResultRow::from(record)).into_diagnostic()?;
    }
    csv.flush().into_diagnostic()
}

// Module Tests ========================================================================================================

#[cfg(test)]
mod tests {
    use dispatcher::JobId;
    use indoc::indoc;
    use insta::assert_snapshot;

    use super::*;

    fn render(results: &[ResultRecord]) -> String {
        let mut buffer = Vec::new();
        write_results(results, &mut buffer).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn render_results() {
        let job = JobId::from(1);
        let results = [
            ResultRecord::new(job, "Organism alpha".to_owned(), 1, 0.002_66, 0.005_33),
            ResultRecord::new(job, "Organism beta, strain 2".to_owned(), 1, 0.001_33, 0.002_66),
        ];
        assert_snapshot!(render(&results), @r#"
        Organism,Matching Hits,P-Value,E-Value
        Organism alpha,1,0.00266,0.00533
        "Organism beta, strain 2",1,0.00133,0.00266
        "#);
    }

    #[test]
    fn one_shot_search() {
        let dir = std::env::temp_dir().join(format!("msfinder-cli-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        fs::write(
            dir.join("bacteria.fasta"),
            ">sp|A1|RL1_ALPHA Ribosomal protein OS=Organism alpha OX=1\nKKKKRRR\n",
        )
        .unwrap();
        let kdl = indoc! {r#"
            database "Bacteria" path="bacteria.fasta"
            stale-after 0
        "#};
        let catalog = DatabaseCatalog::from_kdl(&dir, "test", kdl).unwrap();
        let request = |database: &str| SearchRequest {
            owner: "anonymous".to_owned(),
            title: "Untitled search".to_owned(),
            query: "999.7\t1500.0".to_owned(),
            min_mass: 500.0,
            max_mass: 2_000.0,
            mass_tolerance: 0.5,
            mode: IonMode::Positive,
            database: database.to_owned(),
        };

        let results = search(request("Bacteria"), &catalog).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].organism_name(), "Organism alpha");
        assert_eq!(results[0].matching_hit(), 1);

        let error = search(request("Archaea"), &catalog).unwrap_err();
        assert!(error.to_string().contains("failed"));

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn render_no_results() {
        assert_eq!(render(&[]), "Organism,Matching Hits,P-Value,E-Value\n");
    }

    #[test]
    fn peaks_on_separate_lines() {
        let peaks = indoc! {"
            1000.0
              1200.0

            1400.0\t1600.0
        "};
        assert_eq!(tab_separated(peaks), "1000.0\t1200.0\t1400.0\t1600.0");
        assert_eq!(tab_separated("1000.0\t1200.0"), "1000.0\t1200.0");
        assert_eq!(tab_separated(""), "");
    }

    #[test]
    fn parse_arguments() {
        let args = Args::try_parse_from([
            "msfinder",
            "--spectrum",
            "peaks.tsv",
            "--mode",
            "negative",
            "--tolerance",
            "0.5",
        ])
        .unwrap();
        assert_eq!(args.spectrum, PathBuf::from("peaks.tsv"));
        assert_eq!(args.mode, IonMode::Negative);
        assert_eq!(args.tolerance, 0.5);
        assert_eq!(args.database, "Ribosomal Proteins in Bacteria: Reviewed");
        assert!(args.catalog.is_none());

        assert!(Args::try_parse_from(["msfinder", "--spectrum", "p.tsv", "--mode", "sideways"]).is_err());
        assert!(Args::try_parse_from(["msfinder"]).is_err());
    }
}
