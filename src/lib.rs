//! # Parecer
//!
//! Automated document review: classify, analyze with a hosted model, and
//! archive.
//!
//! Parecer takes a document (thesis chapter, résumé, financial statement,
//! design material, project scope, or anything else), determines its type,
//! fills a type-specific analysis rubric, sends it to a hosted
//! chat-completion model, stores the resulting analysis in a local SQLite
//! archive, and can render each analysis as a PDF report.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────┐   ┌──────────┐   ┌──────────┐   ┌──────────┐
//! │ Extract  │──▶│ Classify │──▶│  Prompt  │──▶│ Upstream │
//! │ docx/pdf │   │ keyword/ │   │ template │   │  model   │
//! │ img/text │   │  model   │   │   fill   │   │  client  │
//! └──────────┘   └──────────┘   └──────────┘   └────┬─────┘
//!                                                   │
//!                                  ┌────────────────┤
//!                                  ▼                ▼
//!                             ┌──────────┐    ┌──────────┐
//!                             │  SQLite  │    │   PDF    │
//!                             │  store   │    │  report  │
//!                             └──────────┘    └──────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! parecer init                                          # create database
//! parecer analyze --file tese.docx --identifier ana@example.com
//! parecer history ana@example.com                       # list past analyses
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`models`] | Core data types |
//! | [`extract`] | DOCX, PDF, image, and plain-text extraction |
//! | [`classify`] | Keyword and model-backed document classification |
//! | [`prompt`] | Per-type analysis prompt templates |
//! | [`upstream`] | Hosted chat-completion client |
//! | [`analyze`] | The end-to-end submission pipeline |
//! | [`history`] | Retrieval of stored analyses |
//! | [`report`] | PDF report rendering |
//! | [`store`] | Append-only analysis persistence |
//! | [`db`] | Database connection |
//! | [`migrate`] | Schema migrations |

pub mod analyze;
pub mod classify;
pub mod config;
pub mod db;
pub mod error;
pub mod extract;
pub mod history;
pub mod migrate;
pub mod models;
pub mod prompt;
pub mod report;
pub mod store;
pub mod upstream;
