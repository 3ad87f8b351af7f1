mod address;
mod envelope;

pub use address::{format_address, FormatAddressError, FormattedAddress};
pub use envelope::{EnvelopeError, MessageEnvelope, Recipients};
