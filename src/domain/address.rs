use lettre::address::AddressError;
use lettre::message::Mailbox;
use lettre::Address;
use std::fmt::{self, Write};

#[derive(Debug, thiserror::Error)]
pub enum FormatAddressError {
    #[error(transparent)]
    InvalidAddress(#[from] AddressError),
    #[error("Display name {0:?} cannot be encoded in a mail header")]
    InvalidDisplayName(String),
}

/// Renders a display name and an address as a single mailbox string,
/// e.g. `Canvas <notifications@example.com>` or `"Doe, Jane" <jane@example.com>`.
///
/// Without a display name the address is returned untouched and is not parsed.
/// Whitespace around the name is dropped; a blank name counts as no name.
pub fn format_address(
    display_name: Option<&str>,
    address: &str,
) -> Result<String, FormatAddressError> {
    FormattedAddress::new(display_name, address).render()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedAddress {
    name: Option<String>,
    address: String,
}

impl FormattedAddress {
    pub fn new(display_name: Option<&str>, address: &str) -> Self {
        let name = display_name
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_owned);
        Self {
            name,
            address: address.to_owned(),
        }
    }

    pub fn render(&self) -> Result<String, FormatAddressError> {
        let name = match &self.name {
            None => return Ok(self.address.clone()),
            Some(name) => name,
        };
        // line breaks would let a name inject extra headers
        if name.contains(|c: char| c == '\r' || c == '\n') {
            return Err(FormatAddressError::InvalidDisplayName(name.clone()));
        }
        let address: Address = self.address.parse()?;
        let mut rendered = String::new();
        write!(rendered, "{}", Mailbox::new(Some(name.clone()), address))
            .map_err(|_| FormatAddressError::InvalidDisplayName(name.clone()))?;
        Ok(rendered)
    }
}

impl fmt::Display for FormattedAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.render() {
            Ok(rendered) => f.write_str(&rendered),
            Err(_) => f.write_str(&self.address),
        }
    }
}
