//! Domain modules organized as vertical slices.
//!
//! - `stock` — price points, metadata, wire types, conversions, sub-client
//! - `view` — the user's selection and the dashboard state container
//! - `chart` — pure reshaping of fetched series into chart datasets

pub mod chart;
pub mod stock;
pub mod view;
