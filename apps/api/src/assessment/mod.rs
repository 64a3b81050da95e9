// Assessment engine
// Implements: note signal extraction, blueprint compilation, question generation,
// response evaluation. Everything below `service` is pure and storage-agnostic.

pub mod blueprint;
pub mod evaluator;
pub mod extractor;
pub mod generator;
pub mod handlers;
pub mod judge;
pub mod service;
pub mod templates;
