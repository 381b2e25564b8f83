//! Naqb: DNS Tunneling Query Encoder
//!
//! Naqb is the encoding core of a DNS tunneling client. It packs an
//! arbitrary byte payload into a sequence of syntactically legal DNS domain
//! names, each name carrying as much payload as the RFC 1035 limits allow
//! (63 bytes per label, 253 bytes per name), so that one query per produced
//! name can smuggle data through the DNS protocol.
//!
//! ## Features
//!
//! - **Length-safe names**: [`Domain`] enforces the label and name limits
//!   under every mutation, so an emitted name is always a legal query name
//! - **Greedy packing**: [`PackagedMessage`] fills each carrier domain to
//!   the brim before moving to the next, maximizing bytes per query
//! - **Lazy, one-shot sequence**: domains are produced one per pull,
//!   driven entirely by the consumer
//! - **Safe alphabet**: payloads are validated against the DNS-safe set
//!   (`A-Z a-z 0-9 + / - =`), with base64 bridging for binary data
//!
//! ## Quick Start
//!
//! ```rust
//! use naqb::{alphabet, Domain, PackagedMessage};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let carrier = Domain::parse("tunnel.example.com")?;
//!     let payload = alphabet::encode_payload(b"some binary message");
//!
//!     let packager = PackagedMessage::new(payload, move |_seq| carrier.clone())?;
//!     for domain in packager {
//!         println!("{domain}");
//!     }
//!     Ok(())
//! }
//! ```
//!
//! Everything else a tunnel needs lives outside this crate: the transport
//! that sends the queries, the server that reassembles the labels, and the
//! session policy choosing carrier domains per sequence number.

pub mod alphabet;
pub mod config;
pub mod domain;
pub mod packager;

// Re-export core types
pub use config::TunnelConfig;
pub use domain::{Domain, DomainError, MAX_LABEL_LEN, MAX_NAME_LEN};
pub use packager::{PackageError, PackagedMessage};
