//! Domain value encoding/decoding.
//!
//! A `d/` name's value is a JSON object describing its DNS configuration.
//! Decoding flattens it into [`ResourceRecord`]s; encoding folds records
//! back into an object, one record at a time.
//!
//! Decoding is permissive: anything that is not understood stays in the
//! residual value verbatim, and every fully understood key is removed. A
//! value that decodes to an empty residual was understood completely.
//!
//! Decoding walks a fixed table of keys, which sets the order records come
//! out in. Encoding places each record under one of those keys.

use serde_json::{Map, Value, json};

use crate::error::RecordError;
use crate::limits::DEFAULT_MAX_MAP_DEPTH;
use crate::model::{AddressKind, RecordData, ResourceRecord};

/// A JSON object holding (part of) a domain value.
pub type DomainObject = Map<String, Value>;

/// The fixed DANE parameters of a `tls` entry: DANE-TA, SPKI, full match.
const TLS_DANE_PARAMS: [i64; 3] = [2, 1, 0];

/// Domain prefix under which `txt` records carry Tor addresses.
const TOR_TXT_PREFIX: &str = "_tor.";

/// A domain value as it reaches the decoder, and as the residual leaves it.
#[derive(Debug, Clone, PartialEq)]
pub enum DomainValue {
    /// Raw value bytes from a name script.
    Bytes(Vec<u8>),
    /// Value text that still needs to be parsed.
    Text(String),
    /// An already parsed JSON value. A JSON string is parsed as value text.
    Json(Value),
}

impl DomainValue {
    /// Returns true if this is the empty object (nothing left undecoded).
    pub fn is_empty_object(&self) -> bool {
        matches!(self, DomainValue::Json(Value::Object(map)) if map.is_empty())
    }

    /// Returns the JSON value, if this is one.
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            DomainValue::Json(value) => Some(value),
            _ => None,
        }
    }
}

impl From<Vec<u8>> for DomainValue {
    fn from(bytes: Vec<u8>) -> Self {
        DomainValue::Bytes(bytes)
    }
}

impl From<&[u8]> for DomainValue {
    fn from(bytes: &[u8]) -> Self {
        DomainValue::Bytes(bytes.to_vec())
    }
}

impl From<String> for DomainValue {
    fn from(text: String) -> Self {
        DomainValue::Text(text)
    }
}

impl From<&str> for DomainValue {
    fn from(text: &str) -> Self {
        DomainValue::Text(text.to_string())
    }
}

impl From<Value> for DomainValue {
    fn from(value: Value) -> Self {
        DomainValue::Json(value)
    }
}

impl From<DomainObject> for DomainValue {
    fn from(object: DomainObject) -> Self {
        DomainValue::Json(Value::Object(object))
    }
}

/// Result of decoding a domain value.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedDomain {
    /// Records in field order, then depth-first through `map`.
    pub records: Vec<ResourceRecord>,
    /// What was not turned into records.
    pub residual: DomainValue,
}

impl DecodedDomain {
    /// Returns true if every part of the value produced records.
    pub fn is_fully_resolved(&self) -> bool {
        self.residual.is_empty_object()
    }
}

/// Options for decoding domain values.
#[derive(Debug, Clone, Copy)]
pub struct DecodeOptions {
    /// Maximum `map` nesting depth that is recursed into.
    ///
    /// Deeper subdomain nodes are left in the residual untouched.
    pub max_depth: usize,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_MAP_DEPTH,
        }
    }
}

impl DecodeOptions {
    /// Creates default decoding options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum `map` nesting depth.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

// =============================================================================
// FIELD TABLE
// =============================================================================

/// The residual that means a key was fully consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EmptyForm {
    List,
    Object,
    Null,
}

impl EmptyForm {
    fn matches(self, value: &Value) -> bool {
        match (self, value) {
            (EmptyForm::List, Value::Array(items)) => items.is_empty(),
            (EmptyForm::Object, Value::Object(map)) => map.is_empty(),
            (EmptyForm::Null, Value::Null) => true,
            _ => false,
        }
    }
}

/// How an encoded record is merged into an existing key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Merge {
    /// At most one record per domain.
    Single,
    /// A list that collapses to a bare string when it holds one entry.
    MinimizedList,
    /// A list that always stays a list.
    List,
    /// Like `MinimizedList`, but entries are minimized first.
    Import,
}

type DecodeFn = fn(&mut Decoder, &str, Value) -> Value;

struct Field {
    key: &'static str,
    empty: EmptyForm,
    decode: DecodeFn,
}

static IP: Field = Field {
    key: "ip",
    empty: EmptyForm::List,
    decode: Decoder::decode_ip,
};
static IP6: Field = Field {
    key: "ip6",
    empty: EmptyForm::List,
    decode: Decoder::decode_ip6,
};
static TOR: Field = Field {
    key: "tor",
    empty: EmptyForm::List,
    decode: Decoder::decode_tor,
};
static I2P: Field = Field {
    key: "i2p",
    empty: EmptyForm::List,
    decode: Decoder::decode_i2p,
};
static FREENET: Field = Field {
    key: "freenet",
    empty: EmptyForm::Null,
    decode: Decoder::decode_freenet,
};
static ZERONET: Field = Field {
    key: "zeronet",
    empty: EmptyForm::Null,
    decode: Decoder::decode_zeronet,
};
static ALIAS: Field = Field {
    key: "alias",
    empty: EmptyForm::Null,
    decode: Decoder::decode_alias,
};
static NS: Field = Field {
    key: "ns",
    empty: EmptyForm::List,
    decode: Decoder::decode_ns,
};
static DS: Field = Field {
    key: "ds",
    empty: EmptyForm::List,
    decode: Decoder::decode_ds,
};
static TLS: Field = Field {
    key: "tls",
    empty: EmptyForm::List,
    decode: Decoder::decode_tls,
};
static SSHFP: Field = Field {
    key: "sshfp",
    empty: EmptyForm::List,
    decode: Decoder::decode_sshfp,
};
static TXT: Field = Field {
    key: "txt",
    empty: EmptyForm::List,
    decode: Decoder::decode_txt,
};
static SRV: Field = Field {
    key: "srv",
    empty: EmptyForm::List,
    decode: Decoder::decode_srv,
};
static IMPORT: Field = Field {
    key: "import",
    empty: EmptyForm::List,
    decode: Decoder::decode_import,
};
static MAP: Field = Field {
    key: "map",
    empty: EmptyForm::Object,
    decode: Decoder::decode_map,
};

/// Recognized keys in processing order.
static FIELDS: [&Field; 15] = [
    &IP, &IP6, &TOR, &I2P, &FREENET, &ZERONET, &ALIAS, &NS, &DS, &TLS, &SSHFP, &TXT, &SRV,
    &IMPORT, &MAP,
];

/// Returns the list of recognized domain value keys, in processing order.
pub fn recognized_keys() -> impl Iterator<Item = &'static str> {
    FIELDS.into_iter().map(|field| field.key)
}

// =============================================================================
// COERCIONS
// =============================================================================

/// Promotes a bare string to a one-element list; anything else is returned
/// as is.
fn promote_string_to_list(value: Value) -> Value {
    match value {
        Value::String(s) => Value::Array(vec![Value::String(s)]),
        other => other,
    }
}

fn as_integer(value: &Value) -> Option<i64> {
    value.as_i64()
}

// =============================================================================
// DECODING
// =============================================================================

/// Decodes a domain value into resource records with default options.
///
/// `domain` is the fully-qualified domain the value belongs to (e.g.
/// `example.bit` for `d/example`). Never fails; see [`DecodedDomain`].
pub fn decode_domain_records(domain: &str, value: impl Into<DomainValue>) -> DecodedDomain {
    decode_domain_records_with_options(domain, value, &DecodeOptions::default())
}

/// Decodes a domain value into resource records.
pub fn decode_domain_records_with_options(
    domain: &str,
    value: impl Into<DomainValue>,
    options: &DecodeOptions,
) -> DecodedDomain {
    let opaque = |residual: DomainValue| DecodedDomain {
        records: Vec::new(),
        residual,
    };

    let text = match value.into() {
        // A JSON string holds the value text, as in a name_show reply
        DomainValue::Json(Value::String(text)) => text,
        DomainValue::Json(value) => return decode_json(domain, value, options),
        DomainValue::Text(text) => text,
        DomainValue::Bytes(bytes) => {
            if !bytes.is_ascii() {
                tracing::debug!(domain, "domain value is not ASCII");
                return opaque(DomainValue::Bytes(bytes));
            }
            match String::from_utf8(bytes) {
                Ok(text) => text,
                Err(err) => return opaque(DomainValue::Bytes(err.into_bytes())),
            }
        }
    };

    let source = if text.is_empty() { "{}" } else { text.as_str() };
    match serde_json::from_str::<Value>(source) {
        Ok(value) => decode_json(domain, value, options),
        Err(err) => {
            tracing::debug!(domain, error = %err, "domain value is not JSON");
            opaque(DomainValue::Text(text))
        }
    }
}

fn decode_json(domain: &str, value: Value, options: &DecodeOptions) -> DecodedDomain {
    let mut decoder = Decoder {
        max_depth: options.max_depth,
        depth: 0,
        records: Vec::new(),
    };
    let residual = decoder.decode_value(domain, value);
    DecodedDomain {
        records: decoder.records,
        residual: DomainValue::Json(residual),
    }
}

/// Walks one domain value, collecting records.
struct Decoder {
    max_depth: usize,
    depth: usize,
    records: Vec<ResourceRecord>,
}

impl Decoder {
    fn push(&mut self, domain: &str, data: RecordData) {
        self.records.push(ResourceRecord::new(domain, data));
    }

    /// Decodes a value at `domain`, returning its residual. Non-objects are
    /// returned unchanged.
    fn decode_value(&mut self, domain: &str, value: Value) -> Value {
        match value {
            Value::Object(object) => Value::Object(self.decode_object(domain, object)),
            other => {
                tracing::debug!(domain, "domain value is not a JSON object");
                other
            }
        }
    }

    fn decode_object(&mut self, domain: &str, mut object: DomainObject) -> DomainObject {
        for field in FIELDS {
            let Some(value) = object.get_mut(field.key).map(Value::take) else {
                continue;
            };

            let before = self.records.len();
            let residual = (field.decode)(self, domain, value);
            tracing::trace!(
                domain,
                key = field.key,
                records = self.records.len() - before,
                "decoded field"
            );

            if field.empty.matches(&residual) {
                object.shift_remove(field.key);
            } else {
                tracing::debug!(domain, key = field.key, "field left partially undecoded");
                object.insert(field.key.to_string(), residual);
            }
        }
        object
    }

    /// Decodes each entry of a list, keeping rejected entries.
    ///
    /// A value that is not a list is returned unchanged.
    fn decode_entries(
        &mut self,
        domain: &str,
        value: Value,
        entry: impl Fn(&Value) -> Option<RecordData>,
    ) -> Value {
        let Value::Array(items) = value else {
            return value;
        };

        let mut remaining = Vec::new();
        for item in items {
            match entry(&item) {
                Some(data) => self.push(domain, data),
                None => remaining.push(item),
            }
        }
        Value::Array(remaining)
    }

    fn decode_strings(
        &mut self,
        domain: &str,
        value: Value,
        data: impl Fn(String) -> RecordData,
    ) -> Value {
        self.decode_entries(domain, promote_string_to_list(value), |item| {
            item.as_str().map(|s| data(s.to_string()))
        })
    }

    fn decode_addresses(&mut self, domain: &str, value: Value, kind: AddressKind) -> Value {
        self.decode_strings(domain, value, |address| RecordData::Address { kind, address })
    }

    fn decode_ip(&mut self, domain: &str, value: Value) -> Value {
        self.decode_addresses(domain, value, AddressKind::Ip4)
    }

    fn decode_ip6(&mut self, domain: &str, value: Value) -> Value {
        self.decode_addresses(domain, value, AddressKind::Ip6)
    }

    fn decode_tor(&mut self, domain: &str, value: Value) -> Value {
        self.decode_addresses(domain, value, AddressKind::Tor)
    }

    fn decode_i2p(&mut self, domain: &str, value: Value) -> Value {
        self.decode_addresses(domain, value, AddressKind::I2p)
    }

    fn decode_freenet(&mut self, domain: &str, value: Value) -> Value {
        match value {
            Value::String(address) => {
                self.push(
                    domain,
                    RecordData::Address {
                        kind: AddressKind::Freenet,
                        address,
                    },
                );
                Value::Null
            }
            other => other,
        }
    }

    /// `zeronet` is either an address, or an object mapping subdomain labels
    /// to addresses. The empty label is not decoded and stays behind.
    fn decode_zeronet(&mut self, domain: &str, value: Value) -> Value {
        match value {
            Value::String(address) => {
                self.push(
                    domain,
                    RecordData::Address {
                        kind: AddressKind::Zeronet,
                        address,
                    },
                );
                Value::Null
            }
            Value::Object(entries) => {
                if !entries.values().all(Value::is_string) {
                    return Value::Object(entries);
                }

                let mut remaining = Map::new();
                for (label, address) in entries {
                    match (label.is_empty(), address) {
                        (false, Value::String(address)) => self.push(
                            &format!("{label}.{domain}"),
                            RecordData::Address {
                                kind: AddressKind::Zeronet,
                                address,
                            },
                        ),
                        (_, address) => {
                            remaining.insert(label, address);
                        }
                    }
                }

                if remaining.is_empty() {
                    Value::Null
                } else {
                    Value::Object(remaining)
                }
            }
            other => other,
        }
    }

    fn decode_alias(&mut self, domain: &str, value: Value) -> Value {
        match value {
            Value::String(target) => {
                self.push(domain, RecordData::Cname(target));
                Value::Null
            }
            other => other,
        }
    }

    fn decode_ns(&mut self, domain: &str, value: Value) -> Value {
        self.decode_strings(domain, value, RecordData::Ns)
    }

    fn decode_ds(&mut self, domain: &str, value: Value) -> Value {
        self.decode_entries(domain, value, |item| {
            let [key_tag, algorithm, digest_type, digest] = item.as_array()?.as_slice() else {
                return None;
            };
            Some(RecordData::Ds {
                key_tag: as_integer(key_tag)?,
                algorithm: as_integer(algorithm)?,
                digest_type: as_integer(digest_type)?,
                digest: digest.as_str()?.to_string(),
            })
        })
    }

    /// `tls` is only understood at `*.<sld>.<tld>`; the records belong to
    /// `<sld>.<tld>`.
    fn decode_tls(&mut self, domain: &str, value: Value) -> Value {
        let Some(("*", parent)) = domain.split_once('.') else {
            return value;
        };
        if parent.split('.').count() != 2 {
            return value;
        }

        self.decode_entries(parent, value, |item| {
            // A bare array is shorthand for {"dane": [...]}
            let dane = match item {
                Value::Array(_) => item,
                Value::Object(object) if object.len() == 1 => object.get("dane")?,
                _ => return None,
            };
            let [usage, selector, matching, pubkey] = dane.as_array()?.as_slice() else {
                return None;
            };
            let params = [as_integer(usage)?, as_integer(selector)?, as_integer(matching)?];
            if params != TLS_DANE_PARAMS {
                return None;
            }
            Some(RecordData::Tls {
                pubkey: pubkey.as_str()?.to_string(),
            })
        })
    }

    fn decode_sshfp(&mut self, domain: &str, value: Value) -> Value {
        self.decode_entries(domain, value, |item| {
            let [algorithm, fingerprint_type, fingerprint] = item.as_array()?.as_slice() else {
                return None;
            };
            Some(RecordData::Sshfp {
                algorithm: as_integer(algorithm)?,
                fingerprint_type: as_integer(fingerprint_type)?,
                fingerprint: fingerprint.as_str()?.to_string(),
            })
        })
    }

    /// Under `_tor.<domain>`, `txt` holds Tor addresses for `<domain>`.
    fn decode_txt(&mut self, domain: &str, value: Value) -> Value {
        if let Some(parent) = domain.strip_prefix(TOR_TXT_PREFIX) {
            return self.decode_tor(parent, value);
        }
        self.decode_strings(domain, value, RecordData::Txt)
    }

    fn decode_srv(&mut self, domain: &str, value: Value) -> Value {
        self.decode_entries(domain, value, |item| {
            let [priority, weight, port, target] = item.as_array()?.as_slice() else {
                return None;
            };
            Some(RecordData::Srv {
                priority: as_integer(priority)?,
                weight: as_integer(weight)?,
                port: as_integer(port)?,
                target: target.as_str()?.to_string(),
            })
        })
    }

    /// Each import entry is `name`, `[name]` or `[name, selector]`.
    fn decode_import(&mut self, domain: &str, value: Value) -> Value {
        self.decode_entries(domain, promote_string_to_list(value), |item| {
            let (name, selector) = match item {
                Value::String(name) => (name.as_str(), None),
                Value::Array(parts) => match parts.as_slice() {
                    [name] => (name.as_str()?, None),
                    [name, selector] => (name.as_str()?, Some(selector.as_str()?)),
                    _ => return None,
                },
                _ => return None,
            };
            Some(RecordData::Import {
                name: name.to_string(),
                selector: selector.unwrap_or_default().to_string(),
            })
        })
    }

    /// Recurses into subdomains. The empty label would alias the parent
    /// domain and is passed through undecoded.
    fn decode_map(&mut self, domain: &str, value: Value) -> Value {
        let Value::Object(entries) = value else {
            return value;
        };

        let mut remaining = Map::new();
        for (label, child) in entries {
            if label.is_empty() {
                remaining.insert(label, child);
                continue;
            }

            if self.depth >= self.max_depth {
                tracing::warn!(
                    domain,
                    label = %label,
                    max_depth = self.max_depth,
                    "map nesting too deep, not decoding subdomain"
                );
                remaining.insert(label, child);
                continue;
            }

            // A bare string is shorthand for {"ip": ...}
            let child = match child {
                Value::String(address) => json!({ "ip": address }),
                other => other,
            };

            let subdomain = format!("{label}.{domain}");
            self.depth += 1;
            let residual = self.decode_value(&subdomain, child);
            self.depth -= 1;

            if !EmptyForm::Object.matches(&residual) {
                remaining.insert(label, residual);
            }
        }
        Value::Object(remaining)
    }
}

// =============================================================================
// ENCODING
// =============================================================================

/// Adds one record to a domain value.
///
/// `base_domain` is the domain `value` belongs to; the record's domain must
/// be it or one of its subdomains. Subdomains are created under `map` as
/// needed. On error `value` may hold newly created (empty) `map` nodes but
/// no partial record.
pub fn add_domain_record(
    base_domain: &str,
    value: &mut DomainObject,
    record: &ResourceRecord,
) -> Result<(), RecordError> {
    let Placement {
        domain,
        field,
        merge,
        payload,
    } = placement(record);

    let labels = map_labels(&domain, base_domain)?;

    let mut node = value;
    for label in labels {
        let map = node
            .entry(MAP.key)
            .or_insert_with(|| Value::Object(Map::new()))
            .as_object_mut()
            .ok_or_else(|| conflict(MAP.key))?;
        node = map
            .entry(label)
            .or_insert_with(|| Value::Object(Map::new()))
            .as_object_mut()
            .ok_or_else(|| conflict(label))?;
    }

    merge_into(node, field.key, merge, payload)
}

/// Folds records into a new domain value for `base_domain`.
pub fn encode_domain_records<'r>(
    base_domain: &str,
    records: impl IntoIterator<Item = &'r ResourceRecord>,
) -> Result<DomainObject, RecordError> {
    let mut value = DomainObject::new();
    for record in records {
        add_domain_record(base_domain, &mut value, record)?;
    }
    Ok(value)
}

/// Where a record is stored in a domain value.
struct Placement {
    domain: String,
    field: &'static Field,
    merge: Merge,
    payload: Value,
}

impl Placement {
    fn new(domain: impl Into<String>, field: &'static Field, merge: Merge, payload: Value) -> Self {
        Self {
            domain: domain.into(),
            field,
            merge,
            payload,
        }
    }
}

/// Returns the domain, field, merge rule and JSON payload a record is stored
/// under.
fn placement(record: &ResourceRecord) -> Placement {
    let domain = record.domain.as_str();
    match &record.data {
        RecordData::Address { kind, address } => match kind {
            AddressKind::Ip4 => Placement::new(domain, &IP, Merge::MinimizedList, json!(address)),
            AddressKind::Ip6 => Placement::new(domain, &IP6, Merge::MinimizedList, json!(address)),
            AddressKind::I2p => Placement::new(domain, &I2P, Merge::MinimizedList, json!(address)),
            AddressKind::Freenet => Placement::new(domain, &FREENET, Merge::Single, json!(address)),
            AddressKind::Zeronet => Placement::new(domain, &ZERONET, Merge::Single, json!(address)),
            AddressKind::Tor => Placement::new(
                format!("{TOR_TXT_PREFIX}{domain}"),
                &TXT,
                Merge::MinimizedList,
                json!(address),
            ),
        },
        RecordData::Cname(target) => Placement::new(domain, &ALIAS, Merge::Single, json!(target)),
        RecordData::Ns(target) => Placement::new(domain, &NS, Merge::MinimizedList, json!(target)),
        RecordData::Ds {
            key_tag,
            algorithm,
            digest_type,
            digest,
        } => Placement::new(
            domain,
            &DS,
            Merge::List,
            json!([key_tag, algorithm, digest_type, digest]),
        ),
        RecordData::Tls { pubkey } => {
            let [usage, selector, matching] = TLS_DANE_PARAMS;
            Placement::new(
                format!("*.{domain}"),
                &TLS,
                Merge::List,
                json!([usage, selector, matching, pubkey]),
            )
        }
        RecordData::Sshfp {
            algorithm,
            fingerprint_type,
            fingerprint,
        } => Placement::new(
            domain,
            &SSHFP,
            Merge::List,
            json!([algorithm, fingerprint_type, fingerprint]),
        ),
        RecordData::Txt(text) => Placement::new(domain, &TXT, Merge::MinimizedList, json!(text)),
        RecordData::Srv {
            priority,
            weight,
            port,
            target,
        } => Placement::new(
            domain,
            &SRV,
            Merge::List,
            json!([priority, weight, port, target]),
        ),
        RecordData::Import { name, selector } => {
            Placement::new(domain, &IMPORT, Merge::Import, json!([name, selector]))
        }
    }
}

/// Splits `domain` into the `map` labels below `base_domain`, closest to the
/// base domain first.
fn map_labels<'d>(domain: &'d str, base_domain: &str) -> Result<Vec<&'d str>, RecordError> {
    if domain == base_domain {
        return Ok(Vec::new());
    }

    let subdomain = domain
        .strip_suffix(base_domain)
        .and_then(|rest| rest.strip_suffix('.'))
        .ok_or_else(|| RecordError::BaseDomainMismatch {
            domain: domain.to_string(),
            base_domain: base_domain.to_string(),
        })?;

    let labels: Vec<&str> = subdomain.split('.').rev().collect();
    if labels.iter().any(|label| label.is_empty()) {
        return Err(RecordError::MalformedRecord {
            context: "empty label in record domain",
        });
    }
    Ok(labels)
}

fn conflict(field: &str) -> RecordError {
    RecordError::AccumulatorConflict {
        field: field.to_string(),
    }
}

fn merge_into(
    node: &mut DomainObject,
    key: &'static str,
    merge: Merge,
    payload: Value,
) -> Result<(), RecordError> {
    match merge {
        Merge::Single => {
            if node.contains_key(key) {
                return Err(RecordError::DuplicateRecord { field: key });
            }
            node.insert(key.to_string(), payload);
        }
        Merge::MinimizedList => {
            list_slot(node, key, true)?.push(payload);
            collapse_singleton(node, key);
        }
        Merge::List => {
            list_slot(node, key, false)?.push(payload);
        }
        Merge::Import => {
            list_slot(node, key, true)?.push(minimize_import_entry(payload));
            collapse_singleton(node, key);
        }
    }
    Ok(())
}

/// Returns the list stored under `key`, creating it if absent. With
/// `promote`, a bare string is first turned into a one-element list.
fn list_slot<'n>(
    node: &'n mut DomainObject,
    key: &str,
    promote: bool,
) -> Result<&'n mut Vec<Value>, RecordError> {
    let slot = node
        .entry(key)
        .or_insert_with(|| Value::Array(Vec::new()));
    if promote {
        let current = slot.take();
        *slot = promote_string_to_list(current);
    }
    slot.as_array_mut().ok_or_else(|| conflict(key))
}

/// Replaces a one-element list holding a string with that string.
fn collapse_singleton(node: &mut DomainObject, key: &str) {
    let single = match node.get(key) {
        Some(Value::Array(items)) if items.len() == 1 && items[0].is_string() => items[0].clone(),
        _ => return,
    };
    node.insert(key.to_string(), single);
}

/// `[name, ""]` and `[name]` are stored as `name`.
fn minimize_import_entry(entry: Value) -> Value {
    let Value::Array(mut parts) = entry else {
        return entry;
    };
    if parts.len() == 2 && parts[1].as_str() == Some("") {
        parts.pop();
    }
    if parts.len() == 1 {
        return parts.remove(0);
    }
    Value::Array(parts)
}
