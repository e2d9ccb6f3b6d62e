use std::io::Write;

use prettytable::{Cell, Row, Table, format};

use crate::dispatch::{Attempt, Outcome};
use crate::error::AppResult;

use super::Reporter;

/// Renders one row per outcome: URL, status, captured body, error.
///
/// Cells that do not apply are left empty.
#[must_use]
pub fn render_table(outcomes: &[Outcome]) -> Table {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BOX_CHARS);
    table.set_titles(Row::new(vec![
        Cell::new("URL"),
        Cell::new("Status"),
        Cell::new("Body"),
        Cell::new("Error"),
    ]));

    for outcome in outcomes {
        let url = outcome.request.url().to_string();
        let (status, body, error) = match &outcome.attempt {
            Attempt::Response(response) => (
                response.status.to_string(),
                response.body.clone().unwrap_or_default(),
                String::new(),
            ),
            Attempt::Failed(err) => (String::new(), String::new(), err.to_string()),
            Attempt::NotSent => (String::new(), String::new(), String::new()),
        };
        table.add_row(Row::new(vec![
            Cell::new(&url),
            Cell::new(&status).style_spec("r"),
            Cell::new(&body),
            Cell::new(&error),
        ]));
    }
    table
}

/// Writes the whole outcome set as a single table.
#[derive(Debug)]
pub struct TableReporter<W> {
    out: W,
}

impl<W: Write> TableReporter<W> {
    pub const fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Reporter for TableReporter<W> {
    fn report(&mut self, outcomes: &[Outcome]) -> AppResult<()> {
        let table = render_table(outcomes);
        table.print(&mut self.out)?;
        self.out.flush()?;
        Ok(())
    }
}
