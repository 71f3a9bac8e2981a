// Local Crate Imports
use crate::Candidate;

macro_rules! assert_miette_snapshot {
    ($diag:expr, @$snapshot:literal) => {{
        use insta::{assert_snapshot, with_settings};
        use miette::{GraphicalReportHandler, GraphicalTheme, Report};

        let report = Report::from($diag.unwrap_err());
        let mut out = String::new();
        GraphicalReportHandler::new_themed(GraphicalTheme::unicode_nocolor())
            .with_width(80)
            .render_report(&mut out, report.as_ref())
            .unwrap();
        with_settings!({
            description => stringify!($diag)
        }, {
            assert_snapshot!(out, @$snapshot);
        });
    }};
}
pub(crate) use assert_miette_snapshot;

#[derive(Clone, PartialEq, Debug)]
pub struct TestCandidate {
    pub organism: &'static str,
    pub masses: Vec<f64>,
}

impl TestCandidate {
    pub fn new(organism: &'static str, masses: &[f64]) -> Self {
        Self {
            organism,
            masses: masses.to_vec(),
        }
    }
}

impl Candidate for TestCandidate {
    fn organism(&self) -> &str {
        self.organism
    }

    fn ion_masses(&self) -> impl Iterator<Item = f64> + '_ {
        self.masses.iter().copied()
    }
}
