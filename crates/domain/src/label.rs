use crate::DomainError;
use std::fmt;
use std::net::IpAddr;
use std::sync::Arc;

const MAX_NAME_LEN: usize = 254;
const MAX_LABEL_LEN: usize = 63;

/// Fully-qualified domain name, always terminated by the root dot.
///
/// Comparison is byte-for-byte on the normalized form; no case folding
/// is applied, so `Example.com.` and `example.com.` are distinct keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Label(Arc<str>);

impl Label {
    /// Appends the trailing dot if missing. Never fails; an empty name
    /// becomes the root label.
    pub fn fqdn(name: &str) -> Self {
        if name.ends_with('.') {
            Self(Arc::from(name))
        } else {
            Self(Arc::from(format!("{name}.")))
        }
    }

    /// Validates user input and normalizes it to a fully-qualified label.
    pub fn parse(name: &str) -> Result<Self, DomainError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DomainError::InvalidDomainName(
                "name cannot be empty".to_string(),
            ));
        }
        if name == "." {
            return Ok(Self::root());
        }

        let label = Self::fqdn(name);
        if label.0.len() > MAX_NAME_LEN {
            return Err(DomainError::InvalidDomainName(format!(
                "'{name}' exceeds 253 characters"
            )));
        }

        for part in label.without_trailing_dot().split('.') {
            if part.is_empty() {
                return Err(DomainError::InvalidDomainName(format!(
                    "'{name}' contains an empty label"
                )));
            }
            if part.len() > MAX_LABEL_LEN {
                return Err(DomainError::InvalidDomainName(format!(
                    "label '{part}' exceeds 63 characters"
                )));
            }
            if part.chars().any(|c| c.is_whitespace() || c.is_control()) {
                return Err(DomainError::InvalidDomainName(format!(
                    "'{name}' contains whitespace"
                )));
            }
        }

        Ok(label)
    }

    pub fn root() -> Self {
        Self(Arc::from("."))
    }

    /// Reverse-lookup name for an address (`in-addr.arpa.` / `ip6.arpa.`).
    pub fn reverse(addr: IpAddr) -> Self {
        match addr {
            IpAddr::V4(v4) => {
                let o = v4.octets();
                Self(Arc::from(format!(
                    "{}.{}.{}.{}.in-addr.arpa.",
                    o[3], o[2], o[1], o[0]
                )))
            }
            IpAddr::V6(v6) => {
                let mut name = String::with_capacity(73);
                for byte in v6.octets().iter().rev() {
                    name.push_str(&format!("{:x}.{:x}.", byte & 0x0f, byte >> 4));
                }
                name.push_str("ip6.arpa.");
                Self(Arc::from(name))
            }
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        &*self.0 == "."
    }

    pub fn without_trailing_dot(&self) -> &str {
        self.0.strip_suffix('.').unwrap_or(&self.0)
    }

    pub fn without_leading_dot(&self) -> &str {
        self.0.strip_prefix('.').unwrap_or(&self.0)
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Label {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
