//! Round reports and where they go.
//!
//! The reporter task builds one [`RoundReport`] per simulated month from the
//! committed values and hands it to a [`ReportSink`].

use crate::{
    clock::SimClock,
    compartment::{CompartmentSet, PopulationView},
    error::SimResult,
    types::{Month, Population, Round, Year},
};
use serde::{Deserialize, Serialize};
use std::io::Write;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompartmentValue {
    pub name:  &'static str,
    pub value: Population,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoundReport {
    pub round:        Round,
    pub year:         Year,
    /// 1-based, for display.
    pub month:        Month,
    /// Months since the start of the run.
    pub linear_month: u64,
    pub compartments: Vec<CompartmentValue>,
}

impl RoundReport {
    pub fn capture(round: Round, clock: &SimClock, compartments: &CompartmentSet) -> Self {
        let compartments = compartments
            .labels()
            .iter()
            .enumerate()
            .map(|(id, &name)| CompartmentValue { name, value: compartments.population(id) })
            .collect();
        Self {
            round,
            year: clock.current_year,
            month: clock.display_month(),
            linear_month: clock.linear_month(),
            compartments,
        }
    }

    pub fn values(&self) -> Vec<Population> {
        self.compartments.iter().map(|c| c.value).collect()
    }

    pub fn value_of(&self, name: &str) -> Option<Population> {
        self.compartments.iter().find(|c| c.name == name).map(|c| c.value)
    }

    /// `Year <Y>, Month <M> - <Name>: <value>, ...`
    pub fn human_line(&self) -> String {
        let values = self
            .compartments
            .iter()
            .map(|c| format!("{}: {}", c.name, c.value))
            .collect::<Vec<_>>()
            .join(", ");
        format!("Year {}, Month {} - {values}", self.year, self.month)
    }

    /// `<linearMonthIndex>, <value>, <value>, ...`
    pub fn csv_line(&self) -> String {
        let mut line = self.linear_month.to_string();
        for c in &self.compartments {
            line.push_str(", ");
            line.push_str(&c.value.to_string());
        }
        line
    }

    pub fn json_line(&self) -> SimResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn render(&self, format: ReportFormat) -> SimResult<String> {
        match format {
            ReportFormat::Human => Ok(self.human_line()),
            ReportFormat::Csv   => Ok(self.csv_line()),
            ReportFormat::Json  => self.json_line(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportFormat {
    #[default]
    Human,
    Csv,
    Json,
}

/// Receives every report of a run, in round order, on the reporter task.
pub trait ReportSink {
    fn emit(&mut self, report: &RoundReport) -> SimResult<()>;

    /// Called once after the last round.
    fn finish(&mut self) -> SimResult<()> {
        Ok(())
    }
}

/// Collects reports in memory. Used by tests and tooling.
impl ReportSink for Vec<RoundReport> {
    fn emit(&mut self, report: &RoundReport) -> SimResult<()> {
        self.push(report.clone());
        Ok(())
    }
}

/// Writes one line per report.
pub struct WriterSink<W: Write> {
    writer: W,
    format: ReportFormat,
}

impl<W: Write> WriterSink<W> {
    pub fn new(writer: W, format: ReportFormat) -> Self {
        Self { writer, format }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> ReportSink for WriterSink<W> {
    fn emit(&mut self, report: &RoundReport) -> SimResult<()> {
        let line = report.render(self.format)?;
        writeln!(self.writer, "{line}")?;
        Ok(())
    }

    fn finish(&mut self) -> SimResult<()> {
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> RoundReport {
        RoundReport {
            round: 14,
            year: 2024,
            month: 2,
            linear_month: 13,
            compartments: vec![
                CompartmentValue { name: "Susceptible", value: 174_996 },
                CompartmentValue { name: "Infected",    value: 70_010 },
                CompartmentValue { name: "Recovered",   value: 0 },
            ],
        }
    }

    #[test]
    fn human_line_lists_every_compartment_in_order() {
        assert_eq!(
            sample().human_line(),
            "Year 2024, Month 2 - Susceptible: 174996, Infected: 70010, Recovered: 0"
        );
    }

    #[test]
    fn csv_line_starts_with_linear_month() {
        assert_eq!(sample().csv_line(), "13, 174996, 70010, 0");
    }

    #[test]
    fn json_line_carries_names_and_values() {
        let json: serde_json::Value = serde_json::from_str(&sample().json_line().unwrap()).unwrap();
        assert_eq!(json["linear_month"], 13);
        assert_eq!(json["compartments"][1]["name"], "Infected");
        assert_eq!(json["compartments"][1]["value"], 70_010);
    }

    #[test]
    fn writer_sink_emits_one_line_per_report() {
        let mut sink = WriterSink::new(Vec::new(), ReportFormat::Csv);
        sink.emit(&sample()).unwrap();
        sink.emit(&sample()).unwrap();
        sink.finish().unwrap();
        let text = String::from_utf8(sink.into_inner()).unwrap();
        assert_eq!(text, "13, 174996, 70010, 0\n13, 174996, 70010, 0\n");
    }
}
