use crate::DomainError;
use std::fmt;
use std::str::FromStr;

/// Query class. Only the three classes anybody still answers are offered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum DnsClass {
    #[default]
    IN,
    CH,
    HS,
}

impl DnsClass {
    pub fn to_u16(&self) -> u16 {
        match self {
            DnsClass::IN => 1,
            DnsClass::CH => 3,
            DnsClass::HS => 4,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DnsClass::IN => "IN",
            DnsClass::CH => "CH",
            DnsClass::HS => "HS",
        }
    }
}

impl FromStr for DnsClass {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "IN" => Ok(DnsClass::IN),
            "CH" => Ok(DnsClass::CH),
            "HS" => Ok(DnsClass::HS),
            _ => Err(DomainError::InvalidClass(s.to_string())),
        }
    }
}

impl fmt::Display for DnsClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-query header and EDNS knobs set from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryOptions {
    pub class: DnsClass,
    /// RD bit. Cleared by `+nord`.
    pub recursion_desired: bool,
    /// EDNS DO bit. Set by `+dnssec`.
    pub dnssec_ok: bool,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            class: DnsClass::IN,
            recursion_desired: true,
            dnssec_ok: false,
        }
    }
}

impl QueryOptions {
    /// Options for an AXFR request: class IN, RD clear, no EDNS.
    pub fn zone_transfer() -> Self {
        Self {
            recursion_desired: false,
            ..Self::default()
        }
    }

    /// Applies one dig-style `+flag` argument.
    pub fn apply_plus_flag(&mut self, flag: &str) -> Result<(), DomainError> {
        let name = flag.strip_prefix('+').unwrap_or(flag);
        match name.to_ascii_lowercase().as_str() {
            "dnssec" => self.dnssec_ok = true,
            "nodnssec" => self.dnssec_ok = false,
            "rd" | "recurse" => self.recursion_desired = true,
            "nord" | "norecurse" => self.recursion_desired = false,
            _ => return Err(DomainError::InvalidFlag(format!("+{name}"))),
        }
        Ok(())
    }
}
