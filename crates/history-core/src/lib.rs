// File: crates/history-core/src/lib.rs
// Summary: Core library entry point; exports the price series model, LTTB downsampling and ingestion.

pub mod config;
pub mod downsample;
pub mod error;
pub mod format;
pub mod ingest;
pub mod pipeline;
pub mod series;
pub mod trend;
pub mod types;
pub mod view;

pub use config::{HistoryOptions, IngestOptions, INVALID_PRICE_SENTINEL};
pub use downsample::{lttb, lttb_indices, lttb_xy, Sample};
pub use error::{HistoryError, Result};
pub use format::{format_compact_inr, format_inr};
pub use ingest::{ingest_records, parse_json, read_csv, IngestReport, RawDate, RawPriceRecord};
pub use pipeline::{prepare_history, prepare_series, PreparedHistory};
pub use series::{Series, TimeCoverage};
pub use trend::{PriceTrend, TrendDirection};
pub use types::PricePoint;
pub use view::ChartViewport;
