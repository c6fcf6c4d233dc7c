//! Benchmark utilities for Rusty Emitter.
//!
//! This crate provides benchmarking infrastructure for the dispatcher:
//!
//! - **Microbenchmarks**: Individual operations (register, emit, off) in isolation
//! - **Scenario benchmarks**: Realistic workloads (fan-out across channels, handler churn)
//! - **Memory tracking**: Heap allocation profiling via dhat
//!
//! # Running Benchmarks
//!
//! ```bash
//! # Run all benchmarks
//! cargo bench -p rusty_emitter_bench
//!
//! # Run specific benchmark group
//! cargo bench -p rusty_emitter_bench -- emit
//!
//! # Run with memory profiling (slower)
//! cargo bench -p rusty_emitter_bench --features memory_profiling
//! ```
//!
//! # Benchmark Results
//!
//! Results are written to `target/criterion/` with HTML reports for visualization.
//! Memory profiling results are written to `dhat-heap.json` for viewing with
//! DHAT's viewer.

pub mod events;
pub mod memory;
pub mod scenarios;
