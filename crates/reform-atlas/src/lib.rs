//! Core library for the housing reform atlas.
//!
//! The atlas tracks land-use policy reforms adopted by cities, counties, and
//! states, and grades each jurisdiction's record against a fixed reform-type
//! catalog. This crate holds the catalog, the grading engine (limitation
//! penalties, category scores, overall grades, peer percentiles, and
//! missing-reform suggestions), the place/reform domain model with its
//! repository seams, the admin review queue, and the CSV bulk importer. The
//! HTTP service in `services/api` wires these together behind axum routers.

pub mod catalog;
pub mod config;
pub mod error;
pub mod grading;
pub mod ingest;
pub mod places;
pub mod review;
pub mod telemetry;
