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
