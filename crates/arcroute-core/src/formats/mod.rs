//! Format identifiers, the signature table and the detector.

pub mod detect;
pub mod id;
pub mod signature;

pub use detect::SNIFF_LEN;
pub use detect::detect;
pub use detect::detect_bytes;
pub use detect::detect_reader;
pub use detect::extension_hint;
pub use id::FormatId;
pub use signature::FormatSignature;
pub use signature::SIGNATURES;
