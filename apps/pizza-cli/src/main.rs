//! # Pizza Compare Entry Point
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        pizza-compare                                    │
//! │                                                                         │
//! │  main.rs ────► hands off to pizza_cli::run()                            │
//! │                                                                         │
//! │  lib.rs ─────► tracing, config, settings store, dispatch                │
//! │                                                                         │
//! │  commands/ ──► compare, settings show, settings set                     │
//! │                                                                         │
//! │  exit codes: 0 ok, 1 internal, 2 invalid input, 3 config, 4 storage     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::process::ExitCode;

fn main() -> ExitCode {
    pizza_cli::run()
}
