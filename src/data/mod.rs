/// Data layer: core types, loading, filtering and the derived views.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader  │  parse file → RawTable → Dataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ Dataset  │  Vec<Record>, distinct values, year bounds
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter  │  FilterState predicates → FilteredView
///   └──────────┘
///        │
///        ├──────────────┬──────────────┐
///        ▼              ▼              ▼
///   ┌───────────┐  ┌──────────┐  ┌──────────┐
///   │ aggregate │  │  search  │  │  export  │
///   └───────────┘  └──────────┘  └──────────┘
/// ```

pub mod aggregate;
pub mod export;
pub mod filter;
pub mod loader;
pub mod model;
pub mod search;
