use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Invalid domain name: {0}")]
    InvalidDomainName(String),

    #[error("{0} is not a valid RR type")]
    InvalidRecordType(String),

    #[error("{0} is not a supported class")]
    InvalidClass(String),

    #[error("unknown flag: {0}")]
    InvalidFlag(String),

    #[error("unrecognized address: {0}")]
    InvalidAddress(String),

    #[error("Invalid server: {0}")]
    InvalidServer(String),

    #[error("Invalid DNS response: {0}")]
    InvalidDnsResponse(String),

    #[error("I/O error: {0}")]
    IoError(String),

    #[error("Timeout talking to {server}")]
    TransportTimeout { server: String },

    #[error("{server}: connection refused")]
    TransportConnectionRefused { server: String },

    #[error("{server}: connection reset")]
    TransportConnectionReset { server: String },

    #[error("Transport error ({server}): {reason}")]
    TransportFailed { server: String, reason: String },

    #[error("Zone transfer of {zone} from {server} refused: {reason}")]
    ZoneTransferRefused {
        zone: String,
        server: String,
        reason: String,
    },

    #[error("Zone transfers are not supported over {0}")]
    ZoneTransferUnsupported(String),
}

impl DomainError {
    /// Map a socket-level error onto the transport variants.
    pub fn from_io(server: impl Into<String>, err: &std::io::Error) -> Self {
        let server = server.into();
        match err.kind() {
            std::io::ErrorKind::ConnectionRefused => Self::TransportConnectionRefused { server },
            std::io::ErrorKind::ConnectionReset | std::io::ErrorKind::BrokenPipe => {
                Self::TransportConnectionReset { server }
            }
            std::io::ErrorKind::TimedOut => Self::TransportTimeout { server },
            _ => Self::TransportFailed {
                server,
                reason: err.to_string(),
            },
        }
    }

    /// Whether this error means the upstream could not be reached at all.
    pub fn is_transport_error(&self) -> bool {
        matches!(
            self,
            Self::TransportTimeout { .. }
                | Self::TransportConnectionRefused { .. }
                | Self::TransportConnectionReset { .. }
                | Self::TransportFailed { .. }
        )
    }
}
