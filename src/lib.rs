//! # Precedent-Intel
//!
//! Retrieval-augmented legal case analysis: case records live in a
//! pgvector-backed store, semantically similar precedents are retrieved for
//! a new fact pattern, and substantive reasoning (case analysis, precedent
//! analysis, defense strategy) is delegated to an LLM through structured
//! extraction.
//!
//! The crate is organized the way the data flows:
//! - `model`: domain types, LLM-extractable payloads, and configuration
//! - `db`: the vector store contract, its PostgreSQL implementation, and
//!   the case repository that translates between cases and store records
//! - `service`: embedding, the legal-model contract, text heuristics, risk
//!   and confidence scoring, the analysis facade, defense generation, and
//!   batch processing
//! - `app`: service initialization and dependency wiring

pub mod app;
pub mod db;
pub mod model;
pub mod service;

#[cfg(test)]
pub(crate) mod testing;
