//! Resource records produced from (and folded back into) domain values.
//!
//! Records also have a loosely-typed tuple form, `[domain, type, data]`,
//! which is what resolvers and wallets exchange:
//!
//! ```text
//! ["example.bit", "address", ["ip4", "1.2.3.4"]]
//! ["example.bit", "ds", [12345, 8, 2, "abcdef"]]
//! ["example.bit", "import", ["d/other", ""]]
//! ```

use std::fmt;
use std::str::FromStr;

use serde_json::{Value, json};

use crate::error::RecordError;

/// Record types (the second element of the tuple form).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordType {
    Address,
    Cname,
    Ns,
    Ds,
    Tls,
    Sshfp,
    Txt,
    Srv,
    Import,
}

impl RecordType {
    pub fn as_str(self) -> &'static str {
        match self {
            RecordType::Address => "address",
            RecordType::Cname => "cname",
            RecordType::Ns => "ns",
            RecordType::Ds => "ds",
            RecordType::Tls => "tls",
            RecordType::Sshfp => "sshfp",
            RecordType::Txt => "txt",
            RecordType::Srv => "srv",
            RecordType::Import => "import",
        }
    }
}

impl FromStr for RecordType {
    type Err = RecordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "address" => Ok(RecordType::Address),
            "cname" => Ok(RecordType::Cname),
            "ns" => Ok(RecordType::Ns),
            "ds" => Ok(RecordType::Ds),
            "tls" => Ok(RecordType::Tls),
            "sshfp" => Ok(RecordType::Sshfp),
            "txt" => Ok(RecordType::Txt),
            "srv" => Ok(RecordType::Srv),
            "import" => Ok(RecordType::Import),
            other => Err(RecordError::UnknownRecordType {
                record_type: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Address sub-types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressKind {
    Ip4,
    Ip6,
    Tor,
    I2p,
    Freenet,
    Zeronet,
}

impl AddressKind {
    pub fn as_str(self) -> &'static str {
        match self {
            AddressKind::Ip4 => "ip4",
            AddressKind::Ip6 => "ip6",
            AddressKind::Tor => "tor",
            AddressKind::I2p => "i2p",
            AddressKind::Freenet => "freenet",
            AddressKind::Zeronet => "zeronet",
        }
    }
}

impl FromStr for AddressKind {
    type Err = RecordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ip4" => Ok(AddressKind::Ip4),
            "ip6" => Ok(AddressKind::Ip6),
            "tor" => Ok(AddressKind::Tor),
            "i2p" => Ok(AddressKind::I2p),
            "freenet" => Ok(AddressKind::Freenet),
            "zeronet" => Ok(AddressKind::Zeronet),
            other => Err(RecordError::UnknownAddressType {
                address_type: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for AddressKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Type-specific record payload.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RecordData {
    Address { kind: AddressKind, address: String },
    Cname(String),
    Ns(String),
    /// DNSSEC delegation signer.
    Ds {
        key_tag: i64,
        algorithm: i64,
        digest_type: i64,
        digest: String,
    },
    /// DANE-TA(2) SPKI(1) Full(0) public key; the fixed parameters are implied.
    Tls { pubkey: String },
    Sshfp {
        algorithm: i64,
        fingerprint_type: i64,
        fingerprint: String,
    },
    Txt(String),
    Srv {
        priority: i64,
        weight: i64,
        port: i64,
        target: String,
    },
    /// Import another name's value; `selector` picks a subdomain of it.
    Import { name: String, selector: String },
}

impl RecordData {
    pub fn record_type(&self) -> RecordType {
        match self {
            RecordData::Address { .. } => RecordType::Address,
            RecordData::Cname(_) => RecordType::Cname,
            RecordData::Ns(_) => RecordType::Ns,
            RecordData::Ds { .. } => RecordType::Ds,
            RecordData::Tls { .. } => RecordType::Tls,
            RecordData::Sshfp { .. } => RecordType::Sshfp,
            RecordData::Txt(_) => RecordType::Txt,
            RecordData::Srv { .. } => RecordType::Srv,
            RecordData::Import { .. } => RecordType::Import,
        }
    }

    /// Returns the payload in tuple form.
    pub fn to_json(&self) -> Value {
        match self {
            RecordData::Address { kind, address } => json!([kind.as_str(), address]),
            RecordData::Cname(s) | RecordData::Ns(s) | RecordData::Txt(s) => json!(s),
            RecordData::Ds {
                key_tag,
                algorithm,
                digest_type,
                digest,
            } => json!([key_tag, algorithm, digest_type, digest]),
            RecordData::Tls { pubkey } => json!(pubkey),
            RecordData::Sshfp {
                algorithm,
                fingerprint_type,
                fingerprint,
            } => json!([algorithm, fingerprint_type, fingerprint]),
            RecordData::Srv {
                priority,
                weight,
                port,
                target,
            } => json!([priority, weight, port, target]),
            RecordData::Import { name, selector } => json!([name, selector]),
        }
    }

    /// Parses a payload in tuple form for the given record type.
    pub fn from_json(record_type: RecordType, data: &Value) -> Result<Self, RecordError> {
        match record_type {
            RecordType::Address => {
                let [kind, address] = fixed_array::<2>(data, "address payload")?;
                let kind = kind
                    .as_str()
                    .ok_or(RecordError::MalformedRecord {
                        context: "address type must be a string",
                    })?
                    .parse()?;
                Ok(RecordData::Address {
                    kind,
                    address: string(address, "address")?,
                })
            }
            RecordType::Cname => Ok(RecordData::Cname(string(data, "cname target")?)),
            RecordType::Ns => Ok(RecordData::Ns(string(data, "ns target")?)),
            RecordType::Txt => Ok(RecordData::Txt(string(data, "txt payload")?)),
            RecordType::Tls => Ok(RecordData::Tls {
                pubkey: string(data, "tls pubkey")?,
            }),
            RecordType::Ds => {
                let [key_tag, algorithm, digest_type, digest] = fixed_array::<4>(data, "ds payload")?;
                Ok(RecordData::Ds {
                    key_tag: integer(key_tag, "ds key tag")?,
                    algorithm: integer(algorithm, "ds algorithm")?,
                    digest_type: integer(digest_type, "ds digest type")?,
                    digest: string(digest, "ds digest")?,
                })
            }
            RecordType::Sshfp => {
                let [algorithm, fingerprint_type, fingerprint] =
                    fixed_array::<3>(data, "sshfp payload")?;
                Ok(RecordData::Sshfp {
                    algorithm: integer(algorithm, "sshfp algorithm")?,
                    fingerprint_type: integer(fingerprint_type, "sshfp fingerprint type")?,
                    fingerprint: string(fingerprint, "sshfp fingerprint")?,
                })
            }
            RecordType::Srv => {
                let [priority, weight, port, target] = fixed_array::<4>(data, "srv payload")?;
                Ok(RecordData::Srv {
                    priority: integer(priority, "srv priority")?,
                    weight: integer(weight, "srv weight")?,
                    port: integer(port, "srv port")?,
                    target: string(target, "srv target")?,
                })
            }
            RecordType::Import => {
                let [name, selector] = fixed_array::<2>(data, "import payload")?;
                Ok(RecordData::Import {
                    name: string(name, "import name")?,
                    selector: string(selector, "import selector")?,
                })
            }
        }
    }
}

/// A single resource record at a fully-qualified domain.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceRecord {
    pub domain: String,
    pub data: RecordData,
}

impl ResourceRecord {
    pub fn new(domain: impl Into<String>, data: RecordData) -> Self {
        Self {
            domain: domain.into(),
            data,
        }
    }

    /// Shorthand for an address record.
    pub fn address(domain: impl Into<String>, kind: AddressKind, address: impl Into<String>) -> Self {
        Self::new(
            domain,
            RecordData::Address {
                kind,
                address: address.into(),
            },
        )
    }

    pub fn record_type(&self) -> RecordType {
        self.data.record_type()
    }

    /// Converts to the `[domain, type, data]` tuple form.
    pub fn to_json(&self) -> Value {
        json!([self.domain, self.record_type().as_str(), self.data.to_json()])
    }

    /// Parses the `[domain, type, data]` tuple form.
    pub fn from_json(value: &Value) -> Result<Self, RecordError> {
        let [domain, record_type, data] = fixed_array::<3>(value, "record tuple")?;
        let domain = string(domain, "record domain")?;
        let record_type: RecordType = record_type
            .as_str()
            .ok_or(RecordError::MalformedRecord {
                context: "record type must be a string",
            })?
            .parse()?;
        let data = RecordData::from_json(record_type, data)?;
        Ok(Self { domain, data })
    }
}

impl fmt::Display for ResourceRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.domain, self.record_type(), self.data.to_json())
    }
}

fn fixed_array<'v, const N: usize>(
    value: &'v Value,
    context: &'static str,
) -> Result<&'v [Value; N], RecordError> {
    value
        .as_array()
        .and_then(|items| <&[Value; N]>::try_from(items.as_slice()).ok())
        .ok_or(RecordError::MalformedRecord { context })
}

fn string(value: &Value, context: &'static str) -> Result<String, RecordError> {
    value
        .as_str()
        .map(str::to_string)
        .ok_or(RecordError::MalformedRecord { context })
}

fn integer(value: &Value, context: &'static str) -> Result<i64, RecordError> {
    value.as_i64().ok_or(RecordError::MalformedRecord { context })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tuple_form_roundtrip() {
        let records = [
            ResourceRecord::address("example", AddressKind::Ip4, "1.2.3.4"),
            ResourceRecord::new("example", RecordData::Cname("other.bit.".into())),
            ResourceRecord::new(
                "example",
                RecordData::Ds {
                    key_tag: 12345,
                    algorithm: 8,
                    digest_type: 2,
                    digest: "abcd".into(),
                },
            ),
            ResourceRecord::new(
                "sub.example",
                RecordData::Import {
                    name: "d/other".into(),
                    selector: "".into(),
                },
            ),
        ];

        for record in records {
            let json = record.to_json();
            assert_eq!(ResourceRecord::from_json(&json).unwrap(), record);
        }
    }

    #[test]
    fn test_tuple_form_shape() {
        let record = ResourceRecord::address("example", AddressKind::Ip4, "1.2.3.4");
        assert_eq!(record.to_json(), json!(["example", "address", ["ip4", "1.2.3.4"]]));
        assert_eq!(record.to_string(), r#"example address ["ip4","1.2.3.4"]"#);
    }

    #[test]
    fn test_unknown_record_type() {
        let result = ResourceRecord::from_json(&json!(["example", "mx", "mail.example"]));
        assert_eq!(
            result,
            Err(RecordError::UnknownRecordType {
                record_type: "mx".to_string()
            })
        );
    }

    #[test]
    fn test_unknown_address_type() {
        let result = ResourceRecord::from_json(&json!(["example", "address", ["ipx", "1.2.3.4"]]));
        assert_eq!(
            result,
            Err(RecordError::UnknownAddressType {
                address_type: "ipx".to_string()
            })
        );
    }

    #[test]
    fn test_malformed_payloads() {
        let cases = [
            json!(["example", "ds", [1, 2, "3", "abcd"]]),
            json!(["example", "srv", [1, 2, 3]]),
            json!(["example", "cname", ["a"]]),
            json!(["example", "address"]),
            json!({"domain": "example"}),
        ];
        for case in cases {
            assert!(
                matches!(ResourceRecord::from_json(&case), Err(RecordError::MalformedRecord { .. })),
                "accepted {}",
                case
            );
        }
    }
}
