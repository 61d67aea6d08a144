//! Run-level values stamped on output rows.

use chrono::NaiveDate;

use dedup_model::DedupOptions;

/// Values shared by every output row of one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputContext {
    pub run_date: NaiveDate,
    pub batch_label: String,
    /// Used for `ORIGEN DATO` when a record carries no record type.
    pub record_type: String,
}

impl OutputContext {
    pub fn new(
        run_date: NaiveDate,
        batch_label: impl Into<String>,
        record_type: impl Into<String>,
    ) -> Self {
        Self {
            run_date,
            batch_label: batch_label.into(),
            record_type: record_type.into(),
        }
    }

    pub fn from_options(options: &DedupOptions) -> Self {
        Self::new(
            options.run_date,
            options.batch_label(),
            options.record_type.clone(),
        )
    }

    /// Sequence identifier for the row at 0-based `index`.
    ///
    /// The index is 1-based and zero-padded to four digits; it widens past
    /// 9999 rather than wrapping.
    pub fn sequence_id(&self, index: usize) -> String {
        format!("{}{:04}", self.run_date.format("%d%m%Y"), index + 1)
    }

    /// Run date as `DD/MM/YYYY`.
    pub fn search_date(&self) -> String {
        self.run_date.format("%d/%m/%Y").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context() -> OutputContext {
        OutputContext::new(
            NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            "SALA_2024-05-01",
            "LINKEDIN",
        )
    }

    #[test]
    fn test_sequence_id() {
        let ctx = context();
        assert_eq!(ctx.sequence_id(0), "010520240001");
        assert_eq!(ctx.sequence_id(41), "010520240042");
        assert_eq!(ctx.sequence_id(9999), "0105202410000");
    }

    #[test]
    fn test_search_date() {
        assert_eq!(context().search_date(), "01/05/2024");
    }

    #[test]
    fn test_from_options() {
        let options = DedupOptions::strict(NaiveDate::from_ymd_opt(2023, 12, 24).unwrap());
        let ctx = OutputContext::from_options(&options);
        assert_eq!(ctx.batch_label, "SALA_2023-12-24");
        assert_eq!(ctx.record_type, "LINKEDIN");
    }
}
