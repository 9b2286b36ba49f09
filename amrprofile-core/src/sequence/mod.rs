//! FASTA input handling.
//!
//! Records are parsed with rust-bio's FASTA reader and carried through the
//! pipeline as [`SequenceRecord`](crate::types::SequenceRecord) values.
//!
//! ## Examples
//!
//! ```rust
//! use amrprofile_core::sequence::parse_fasta;
//!
//! let records = parse_fasta(">tetM ribosomal protection\nMKIINIGVLAHVDAGKTTLTESLLYNSGAITELG\n");
//! assert_eq!(records.len(), 1);
//! assert_eq!(records[0].id, "tetM");
//! ```

pub mod io;

pub use io::*;
