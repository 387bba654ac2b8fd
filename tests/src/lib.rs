//! # Doorkeeper Test Suite
//!
//! ## Structure
//!
//! ```text
//! tests/
//! ├── benches/          # Criterion benchmarks (validation fan-out, MAC checks)
//! └── src/integration/  # Keypad → signed request → door flows over loopback
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p dk-tests
//! cargo bench -p dk-tests
//! ```

pub mod integration;
