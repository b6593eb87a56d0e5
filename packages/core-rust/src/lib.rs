//! Agreement ledger core: the agreement record model and its byte codecs.
//!
//! Everything here is pure and synchronous. Ledger access, indexing, and
//! dispatch live in `agreement-server`.

pub mod codec;
pub mod types;

pub use codec::{decode, decode_index, encode, encode_index, AgreementSet};
pub use types::{Agreement, AgreementField, FIELD_COUNT};
