use analytics::{AggregationEngine, SuccessRateReport};
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Table};
use core_types::{LiftColumn, ResultRecord};
use engine::{ViewSnapshot, ViewState};
use indicatif::{ProgressBar, ProgressStyle};
use rust_decimal::Decimal;
use std::time::Duration;

pub const LOADING_MESSAGE: &str = "Loading...";
pub const NO_RESULTS_MESSAGE: &str = "No Lifting Results Found";
const FOOTER_LABEL: &str = "Successful Lift %";

/// Renders the current snapshot the way the results page shows it.
pub fn render(snapshot: &ViewSnapshot) -> String {
    match &snapshot.state {
        ViewState::Loading => LOADING_MESSAGE.to_string(),
        ViewState::Failed { message } => message.clone(),
        ViewState::Loaded { records } => {
            let report = AggregationEngine::new().report(records);
            results_table(records, &report).to_string()
        }
    }
}

/// A one-line description of the search a snapshot belongs to.
pub fn describe(snapshot: &ViewSnapshot) -> String {
    match &snapshot.parameters {
        Some(params) => match params.name() {
            Some(name) => format!("Athlete: {name} | Rows per page: {}", params.page_size()),
            None => format!("All athletes | Rows per page: {}", params.page_size()),
        },
        None => "No search yet".to_string(),
    }
}

/// A spinner shown while a fetch is in flight.
pub fn spinner() -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(LOADING_MESSAGE);
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

fn results_table(records: &[ResultRecord], report: &SuccessRateReport) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);

    let mut header = vec![
        header_cell("Name"),
        header_cell("Date"),
        header_cell("Meet"),
        header_cell("Bodyweight"),
    ];
    header.extend(LiftColumn::ALL.iter().map(|column| header_cell(column.label())));
    header.push(header_cell("Total"));
    table.set_header(header);

    if records.is_empty() {
        table.add_row(vec![Cell::new(NO_RESULTS_MESSAGE)]);
    }

    for record in records {
        let mut row = vec![
            Cell::new(&record.name),
            Cell::new(record.date.map(|d| d.to_string()).unwrap_or_default()),
            Cell::new(&record.meet),
            weight_cell(record.body_weight),
        ];
        row.extend(
            LiftColumn::ALL
                .iter()
                .map(|column| weight_cell(Some(record.attempt(*column)))),
        );
        row.push(weight_cell(record.total));
        table.add_row(row);
    }

    let mut footer = vec![
        Cell::new(""),
        Cell::new(""),
        Cell::new(""),
        Cell::new(FOOTER_LABEL).add_attribute(Attribute::Bold),
    ];
    footer.extend(LiftColumn::ALL.iter().map(|column| {
        Cell::new(format_rate(report.rate(*column)))
            .set_alignment(CellAlignment::Right)
            .add_attribute(Attribute::Bold)
    }));
    footer.push(Cell::new(""));
    table.add_row(footer);

    table
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label).add_attribute(Attribute::Bold)
}

fn weight_cell(weight: Option<Decimal>) -> Cell {
    Cell::new(weight.map(|w| w.normalize().to_string()).unwrap_or_default())
        .set_alignment(CellAlignment::Right)
}

fn format_rate(rate: Decimal) -> String {
    format!("{}%", rate.round_dp(2).normalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::{PageSize, QueryParameters};
    use rust_decimal_macros::dec;

    fn snapshot(state: ViewState) -> ViewSnapshot {
        ViewSnapshot {
            generation: 1,
            parameters: Some(QueryParameters::new("", PageSize::Hundred)),
            state,
        }
    }

    fn record(name: &str, snatch1: Decimal) -> ResultRecord {
        ResultRecord {
            id: 1,
            name: name.to_string(),
            meet: "Spring Open".to_string(),
            date: None,
            body_weight: Some(dec!(88.40)),
            snatch1,
            snatch2: Decimal::ZERO,
            snatch3: Decimal::ZERO,
            clean_jerk1: Decimal::ZERO,
            clean_jerk2: Decimal::ZERO,
            clean_jerk3: Decimal::ZERO,
            total: Some(dec!(250)),
        }
    }

    #[test]
    fn loading_and_failure_render_messages_only() {
        assert_eq!(render(&snapshot(ViewState::Loading)), LOADING_MESSAGE);
        assert_eq!(
            render(&snapshot(ViewState::Failed {
                message: "Error loading data".to_string()
            })),
            "Error loading data"
        );
    }

    #[test]
    fn empty_results_say_so() {
        let text = render(&snapshot(ViewState::Loaded { records: vec![] }));
        assert!(text.contains(NO_RESULTS_MESSAGE));
        assert!(text.contains(FOOTER_LABEL));
        assert!(text.contains("0%"));
    }

    #[test]
    fn loaded_rows_and_rates_are_rendered() {
        let text = render(&snapshot(ViewState::Loaded {
            records: vec![record("Jane Doe", dec!(100)), record("John Roe", dec!(-102))],
        }));
        assert!(text.contains("Jane Doe"));
        assert!(text.contains("-102"));
        assert!(text.contains("88.4"));
        assert!(text.contains("C&J 3"));
        assert!(text.contains("50%"));
        assert!(!text.contains(NO_RESULTS_MESSAGE));
    }

    #[test]
    fn rates_are_rounded_to_two_places() {
        assert_eq!(format_rate(dec!(100) / dec!(3)), "33.33%");
        assert_eq!(format_rate(dec!(100)), "100%");
    }

    #[test]
    fn description_names_the_search() {
        let mut snap = snapshot(ViewState::Loading);
        assert_eq!(describe(&snap), "All athletes | Rows per page: 100");
        snap.parameters = Some(QueryParameters::new("Jane Doe", PageSize::Fifty));
        assert_eq!(describe(&snap), "Athlete: Jane Doe | Rows per page: 50");
    }
}
