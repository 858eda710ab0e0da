/// Data layer: core types, loading, filtering and statistics.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Dataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ session   │  loads once, owns the Dataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  location selection → sample indices
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  stats    │  mean / sample std of pH
///   └──────────┘
/// ```

pub mod filter;
pub mod loader;
pub mod model;
pub mod session;
pub mod stats;
