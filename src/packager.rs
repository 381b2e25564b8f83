//! Greedy packaging of a payload into a sequence of query names.
//!
//! One DNS query smuggles one domain name, so the payload is cut into
//! label-sized chunks and distributed across as few names as the length
//! limits allow. [`PackagedMessage`] is the lazy, one-shot iterator doing
//! that: each pull asks the caller's format function for the carrier domain
//! of the current sequence number, fills it to the brim with payload labels,
//! and yields the completed name.

use log::trace;
use thiserror::Error;

use crate::alphabet;
use crate::domain::Domain;

/// Errors from constructing a [`PackagedMessage`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PackageError {
    #[error("message must have length greater than zero")]
    EmptyPayload,

    #[error("message is not domain safe at byte {position} (0x{byte:02x}): {payload:?}")]
    UnsafeByte {
        position: usize,
        byte: u8,
        payload: String,
    },
}

/// A payload split lazily into maximally-packed query names.
///
/// Construction validates the payload once: it must be non-empty and every
/// byte must lie in the domain-safe alphabet (see [`crate::alphabet`]).
/// Iteration then yields one completed [`Domain`] per outbound query,
/// consuming payload bytes greedily until the cursor reaches the end. The
/// cursor and sequence counter are private to the instance and never reset,
/// so the sequence is one-shot and finite whenever every carrier leaves room
/// for at least one byte. A carrier arriving already full is yielded
/// unchanged, consuming a sequence number but no payload.
///
/// # Example
///
/// ```
/// use naqb::{Domain, PackagedMessage};
///
/// let carrier = Domain::parse("t.example.com").unwrap();
/// let names: Vec<Domain> =
///     PackagedMessage::new("aGVsbG8=", move |_seq| carrier.clone())
///         .unwrap()
///         .collect();
/// assert_eq!(names.len(), 1);
/// assert_eq!(names[0].render(), "aGVsbG8=.t.example.com");
/// ```
pub struct PackagedMessage<F> {
    payload: Vec<u8>,
    cursor: usize,
    sequence_number: u64,
    domain_format: F,
}

impl<F> std::fmt::Debug for PackagedMessage<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PackagedMessage")
            .field("payload", &self.payload)
            .field("cursor", &self.cursor)
            .field("sequence_number", &self.sequence_number)
            .finish_non_exhaustive()
    }
}

impl<F> PackagedMessage<F>
where
    F: Fn(u64) -> Domain,
{
    /// Validate `payload` and wrap it for packaging under the carrier
    /// domains supplied by `domain_format`.
    ///
    /// `domain_format` must be a pure function of the sequence number and
    /// must return domains already within the name length limits.
    pub fn new(payload: impl Into<Vec<u8>>, domain_format: F) -> Result<Self, PackageError> {
        let payload = payload.into();
        if payload.is_empty() {
            return Err(PackageError::EmptyPayload);
        }
        if let Some((position, byte)) = alphabet::find_unsafe_byte(&payload) {
            return Err(PackageError::UnsafeByte {
                position,
                byte,
                payload: String::from_utf8_lossy(&payload).into_owned(),
            });
        }
        Ok(Self {
            payload,
            cursor: 0,
            sequence_number: 0,
            domain_format,
        })
    }

    /// Payload bytes not yet packaged
    pub fn remaining(&self) -> usize {
        self.payload.len() - self.cursor
    }
}

impl<F> Iterator for PackagedMessage<F>
where
    F: Fn(u64) -> Domain,
{
    type Item = Domain;

    fn next(&mut self) -> Option<Domain> {
        if self.cursor == self.payload.len() {
            return None;
        }

        let sequence_number = self.sequence_number;
        self.sequence_number += 1;

        let mut domain = (self.domain_format)(sequence_number);

        // Pin the carrier suffix so every data label lands above it.
        let fixed_level = domain.level();

        loop {
            let room = domain.max_next_label_length().min(self.remaining());
            if room == 0 {
                break;
            }

            let chunk = &self.payload[self.cursor..self.cursor + room];
            // Lossless: construction validated every byte as ASCII-safe.
            let label = String::from_utf8_lossy(chunk).into_owned();

            // `room` never exceeds the domain's own remaining budget and
            // safe bytes cannot contain a separator.
            if domain.prepend_at_level(label, fixed_level).is_err() {
                break;
            }
            self.cursor += room;
        }

        trace!(
            "packaged query {}: {} ({} bytes, {} payload bytes left)",
            sequence_number,
            domain,
            domain.textual_length(),
            self.remaining()
        );

        Some(domain)
    }
}
