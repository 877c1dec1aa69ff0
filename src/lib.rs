//! NeuroForm - AI-assisted survey forms
//!
//! Owners author or generate forms, respondents walk an adaptive flow whose
//! questions appear or hide based on earlier answers, and submitted responses
//! feed AI insights, summaries and a data assistant.
//!
//! The crate follows a ports-and-adapters layout: `domain` holds the pure
//! flow evaluator and aggregates, `ports` the traits, `application` the
//! use-case handlers, and `adapters` the HTTP, PostgreSQL, in-memory and LLM
//! implementations.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
