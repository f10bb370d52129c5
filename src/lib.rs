// Library target for integration tests and criterion benchmarks.
// The binary entry point is main.rs; this file re-declares the UI-free part of
// the module tree so harnesses can import it via `karuta::session::*` etc.
// Some helpers are only exercised through the binary, so suppress dead_code warnings.
#![allow(dead_code)]

pub mod corpus;
pub mod engine;
pub mod session;
pub mod store;
