/// Data layer: core types, loading, and the view pipeline.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → BenchmarkDataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────────────┐
///   │ BenchmarkDataset  │  Vec<Record>, column index
///   └──────────────────┘
///        │
///        ▼
///   ┌──────────┐      ┌───────────┐
///   │ pipeline  │ ───▶ │  project   │  filter → sort → paginate → chart
///   └──────────┘      └───────────┘
///                          │
///                          ▼
///                     ┌────────────┐
///                     │ regression  │  OLS trend line over the projection
///                     └────────────┘
/// ```

pub mod error;
pub mod export;
pub mod loader;
pub mod model;
pub mod pipeline;
pub mod project;
pub mod regression;
pub mod units;
