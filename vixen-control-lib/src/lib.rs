//! # Vixen Control Library
//!
//! `vixen-control-lib` is a Rust library for controlling a Vixen 3.2+ lighting
//! display through the web server built into Vixen. It can turn individual
//! elements and element groups on and off, start, stop and pause sequences, and
//! read the element list, the sequence list and the playback status.
//!
//! ## Features
//!
//! - One long-lived [`session::Session`] per device, with a bounded deadline on every call
//! - JSON and plain-text responses normalized into a single [`session::Body`] type
//! - A stateful [`control_interface::ControlInterface`] caching the last element list,
//!   search results, sequence list and status
//! - A collapsed API that logs failures, and a `try_` API that returns them
//!
//! ## Example
//!
//! ```no_run
//! use vixen_control_lib::control_interface::ControlInterface;
//! use vixen_control_lib::session::SessionConfig;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut vixen = ControlInterface::new(&SessionConfig::new("192.168.1.20"))?;
//!
//!     vixen.update_lists().await;
//!     if let Some(sequences) = vixen.sequences() {
//!         println!("Sequences: {}", sequences);
//!     }
//!
//!     vixen.play_sequence("Intro", "Intro.tim").await;
//!     vixen.close();
//!     Ok(())
//! }
//! ```
//!
//! ## Disclaimer
//!
//! This project is not affiliated with, authorized by, endorsed by, or in any way officially
//! connected with the Vixen Lights project.
//!
//! ## License
//!
//! This project is dual-licensed under the MIT License and the Apache License, Version 2.0.

// The `control_interface` module is the device facade: one method per web API
// operation, plus the cached results of the discovery and status calls.
pub mod control_interface;

// The `led` module holds the color type sent to the element endpoints.
pub mod led;

// The `session` module performs single HTTP exchanges with the Vixen web server
// and normalizes the response bodies.
pub mod session;

// The `util` module holds the endpoint table, the error type and the
// acknowledgment returned by action endpoints.
pub mod util;

/// Version of this library.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
