//! Source column → BigQuery type conversion interface.

use crate::schema::{SourceColumn, SourceKind};
use crate::types::BigQueryType;

/// Converts source column descriptors to BigQuery types.
///
/// Each source database crate implements [`lookup`](Self::lookup) with its
/// own closed type table. Conversion never fails: [`convert`](Self::convert)
/// falls back to `STRING` for type names missing from the table.
pub trait ColumnConverter {
    /// The source kind this converter handles.
    fn source_kind(&self) -> SourceKind;

    /// Look a column up in the type table. `None` for unmapped types.
    fn lookup(&self, column: &SourceColumn) -> Option<BigQueryType>;

    /// Whether falling back to `STRING` for an unmapped type emits a warning.
    ///
    /// The MySQL converter warns and the Oracle converter stays silent.
    fn warns_on_fallback(&self) -> bool;

    /// Convert one column.
    fn convert(&self, column: &SourceColumn) -> BigQueryType {
        let bigquery_type = self.lookup(column).unwrap_or_else(|| {
            if self.warns_on_fallback() {
                tracing::warn!(
                    "Unmapped {:?} type '{}', falling back to STRING",
                    self.source_kind(),
                    column.data_type
                );
            } else {
                tracing::debug!(
                    "Unmapped {:?} type '{}', using STRING",
                    self.source_kind(),
                    column.data_type
                );
            }
            BigQueryType::String
        });
        tracing::debug!(
            "Converted column to BigQuery type: {:?} ==> {}",
            column,
            bigquery_type
        );
        bigquery_type
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tracing::{Event, Level, Subscriber};
    use tracing_subscriber::layer::{Context, SubscriberExt};
    use tracing_subscriber::Layer;

    struct DateOnly {
        warns: bool,
    }

    impl ColumnConverter for DateOnly {
        fn source_kind(&self) -> SourceKind {
            SourceKind::MySql
        }

        fn lookup(&self, column: &SourceColumn) -> Option<BigQueryType> {
            (column.upper_data_type() == "DATE").then_some(BigQueryType::Date)
        }

        fn warns_on_fallback(&self) -> bool {
            self.warns
        }
    }

    struct WarningCounter(Arc<AtomicUsize>);

    impl<S: Subscriber> Layer<S> for WarningCounter {
        fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
            if *event.metadata().level() == Level::WARN {
                self.0.fetch_add(1, Ordering::SeqCst);
            }
        }
    }

    fn warnings_while_converting(converter: &DateOnly, data_type: &str) -> (BigQueryType, usize) {
        let count = Arc::new(AtomicUsize::new(0));
        let subscriber = tracing_subscriber::registry().with(WarningCounter(count.clone()));
        let converted = tracing::subscriber::with_default(subscriber, || {
            converter.convert(&SourceColumn::new("c", data_type))
        });
        (converted, count.load(Ordering::SeqCst))
    }

    #[test]
    fn test_fallback_warning_follows_flag() {
        let warning = DateOnly { warns: true };
        let silent = DateOnly { warns: false };

        assert_eq!(
            warnings_while_converting(&warning, "GEOMETRY"),
            (BigQueryType::String, 1)
        );
        assert_eq!(
            warnings_while_converting(&silent, "GEOMETRY"),
            (BigQueryType::String, 0)
        );
        assert_eq!(
            warnings_while_converting(&warning, "date"),
            (BigQueryType::Date, 0)
        );
    }
}
