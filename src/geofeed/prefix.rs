use ipnet::IpNet;
use std::fmt;
use std::net::IpAddr;
use std::str::FromStr;
use thiserror::Error;

/// Supernet used when none is configured.
pub const DEFAULT_SUPERNET: &str = "2a0f:1cc0::/29";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PrefixError {
    #[error("'{input}' does not appear to be an IPv4 or IPv6 network ({source})")]
    Syntax {
        input: String,
        #[source]
        source: ipnet::AddrParseError,
    },

    #[error("{input} has host bits set")]
    HostBitsSet { input: String },
}

/// Parse a geofeed prefix.
///
/// Accepts CIDR notation (`192.0.2.0/24`, `2001:db8::/32`) or a bare address,
/// which becomes a host network (`/32` or `/128`). Networks with bits set
/// below the prefix length are rejected.
pub fn parse_prefix(input: &str) -> Result<IpNet, PrefixError> {
    let net = match input.parse::<IpNet>() {
        Ok(net) => net,
        Err(err) => match input.parse::<IpAddr>() {
            Ok(addr) => IpNet::from(addr),
            Err(_) => {
                return Err(PrefixError::Syntax {
                    input: input.to_string(),
                    source: err,
                });
            }
        },
    };

    if net.trunc() != net {
        return Err(PrefixError::HostBitsSet {
            input: input.to_string(),
        });
    }

    Ok(net)
}

/// The network every geofeed prefix must fall inside.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Supernet(IpNet);

impl Supernet {
    /// True when `net` is equal to or a subnet of this supernet.
    ///
    /// Networks of the other address family are never contained.
    pub fn contains(&self, net: &IpNet) -> bool {
        self.0.contains(net)
    }
}

impl Default for Supernet {
    fn default() -> Self {
        DEFAULT_SUPERNET
            .parse()
            .expect("default supernet is a valid network")
    }
}

impl FromStr for Supernet {
    type Err = PrefixError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_prefix(s.trim()).map(Self)
    }
}

impl fmt::Display for Supernet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_cidr_and_bare_addresses() {
        assert_eq!(
            parse_prefix("2a0f:1cc0::/32").unwrap().to_string(),
            "2a0f:1cc0::/32"
        );
        assert_eq!(parse_prefix("10.0.0.0/24").unwrap().prefix_len(), 24);
        assert_eq!(parse_prefix("2a0f:1cc0::1").unwrap().prefix_len(), 128);
        assert_eq!(parse_prefix("192.0.2.7").unwrap().prefix_len(), 32);
    }

    #[test]
    fn rejects_garbage() {
        for input in ["", "not-an-ip", "10.0.0.0/33", "2a0f::/129", "10.0.0/24"] {
            let err = parse_prefix(input).unwrap_err();
            assert!(matches!(err, PrefixError::Syntax { .. }), "{input}: {err}");
        }
    }

    #[test]
    fn rejects_host_bits() {
        let err = parse_prefix("10.0.0.1/24").unwrap_err();
        assert_eq!(
            err,
            PrefixError::HostBitsSet {
                input: "10.0.0.1/24".to_string()
            }
        );
        assert_eq!(err.to_string(), "10.0.0.1/24 has host bits set");
    }

    #[test]
    fn default_supernet_membership() {
        let supernet = Supernet::default();
        assert_eq!(supernet.to_string(), DEFAULT_SUPERNET);

        let inside = ["2a0f:1cc0::/29", "2a0f:1cc0::/32", "2a0f:1cc7:ffff::/48"];
        for prefix in inside {
            assert!(supernet.contains(&parse_prefix(prefix).unwrap()), "{prefix}");
        }

        let outside = ["2a0f:1cc0::/28", "2a0f:1cc8::/32", "10.0.0.0/24", "::/0"];
        for prefix in outside {
            assert!(!supernet.contains(&parse_prefix(prefix).unwrap()), "{prefix}");
        }
    }

    #[test]
    fn supernet_from_str_rejects_host_bits() {
        assert!("2a0f:1cc0::/29".parse::<Supernet>().is_ok());
        assert!("2a0f:1cc1::/29".parse::<Supernet>().is_err());
        assert!("nope".parse::<Supernet>().is_err());
    }
}
