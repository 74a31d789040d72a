//! Study-form domain: models, feasibility checks, and the interactive session

pub mod feasibility;
pub mod form;
pub mod models;
