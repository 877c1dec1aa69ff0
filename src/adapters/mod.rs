//! Adapters - implementations of the ports.
//!
//! - `ai` - OpenAI-compatible chat completion provider and a mock
//! - `llm` - prompt-level generators built on an `AIProvider`
//! - `auth` - HS256 JWT session validation
//! - `postgres` - sqlx repositories
//! - `memory` - in-memory repositories and the flow session store
//! - `http` - axum REST API

pub mod ai;
pub mod auth;
pub mod http;
pub mod llm;
pub mod memory;
pub mod postgres;
