//! # medcenter CLI
//!
//! A thin front end over the `medcenter` library. This file only invokes
//! `cli::run()` and handles process termination; everything user facing lives in
//! `src/cli/`:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  CLI Layer (src/cli/)                                    │
//! │  - clap argument parsing (setup.rs)                      │
//! │  - config, logging, store loading, dispatch (mod.rs)     │
//! │  - command handlers and the demo walk-through            │
//! │  - text / JSON rendering (render.rs)                     │
//! └──────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌──────────────────────────────────────────────────────────┐
//! │  medcenter library                                       │
//! │  - AppointmentStore, validation, query pipeline          │
//! │  - no stdout/stderr, no process exits                    │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! The store lives in memory for the length of one invocation. Each run starts
//! from the sample data, or from `--data <FILE>` when given.

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
