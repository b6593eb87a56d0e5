//! Byte codecs for agreement records and the agreement index.
//!
//! Records are JSON objects keyed by wire field name; the index is a JSON
//! array of identifiers. `serde_json` escapes quotes, braces, and control
//! characters inside field values, so a value can never bleed into a sibling
//! field or past the record boundary.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::types::Agreement;

/// Encodes an agreement as a self-describing JSON object.
///
/// # Errors
///
/// Returns the serializer error if encoding fails.
pub fn encode(agreement: &Agreement) -> serde_json::Result<Vec<u8>> {
    serde_json::to_vec(agreement)
}

/// Decodes an agreement previously produced by [`encode`].
///
/// Empty input decodes to the zero record so that an unset ledger value
/// reads as "no agreement" rather than failing.
///
/// # Errors
///
/// Returns the parser error for non-empty input that is not a valid
/// agreement encoding.
pub fn decode(bytes: &[u8]) -> serde_json::Result<Agreement> {
    if bytes.is_empty() {
        return Ok(Agreement::default());
    }
    serde_json::from_slice(bytes)
}

/// Encodes an ordered list of agreement identifiers.
///
/// # Errors
///
/// Returns the serializer error if encoding fails.
pub fn encode_index(ids: &[String]) -> serde_json::Result<Vec<u8>> {
    serde_json::to_vec(ids)
}

/// Decodes an index value.
///
/// Both empty input and the JSON literal `null` decode to an empty index.
///
/// # Errors
///
/// Returns the parser error for input that is neither of those nor a JSON
/// array of strings.
pub fn decode_index(bytes: &[u8]) -> serde_json::Result<Vec<String>> {
    if bytes.is_empty() {
        return Ok(Vec::new());
    }
    let ids: Option<Vec<String>> = serde_json::from_slice(bytes)?;
    Ok(ids.unwrap_or_default())
}

/// An ordered identifier → agreement mapping, serialized as one JSON object.
///
/// Entries are emitted in insertion order, which for query results is index
/// order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AgreementSet {
    entries: Vec<(String, Agreement)>,
}

impl AgreementSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, id: String, agreement: Agreement) {
        self.entries.push((id, agreement));
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Identifiers in emission order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(id, _)| id.as_str())
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Agreement> {
        self.entries
            .iter()
            .find(|(entry_id, _)| entry_id == id)
            .map(|(_, agreement)| agreement)
    }

    /// Encodes the set as a JSON object.
    ///
    /// # Errors
    ///
    /// Returns the serializer error if encoding fails.
    pub fn to_bytes(&self) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec(self)
    }
}

impl Serialize for AgreementSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (id, agreement) in &self.entries {
            map.serialize_entry(id, agreement)?;
        }
        map.end()
    }
}

impl IntoIterator for AgreementSet {
    type Item = (String, Agreement);
    type IntoIter = std::vec::IntoIter<(String, Agreement)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::types::FIELD_COUNT;

    fn sample(id: &str) -> Agreement {
        Agreement {
            agreement_id: id.to_string(),
            borrower_name: "Ada".to_string(),
            lender_name: "First Bank".to_string(),
            agreement_date: "2016-06-01".to_string(),
            loan_amount: "10000".to_string(),
            agreement_status: "open".to_string(),
            interest_rate: "4.5".to_string(),
            loan_duration: "12".to_string(),
            repayment_date: "2017-06-01".to_string(),
            borrower_signed: "true".to_string(),
            lender_signed: "false".to_string(),
            comments: "none".to_string(),
        }
    }

    #[test]
    fn encoding_uses_wire_field_names() {
        let bytes = encode(&sample("A-1")).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        let object = value.as_object().unwrap();

        assert_eq!(object.len(), FIELD_COUNT);
        for field in crate::types::AgreementField::ALL {
            assert!(object.contains_key(field.name()), "missing {field}");
        }
        assert_eq!(object["agreement_id"], "A-1");
        assert_eq!(object["lender_name"], "First Bank");
    }

    #[test]
    fn structural_characters_stay_inside_their_field() {
        let mut agreement = sample("A-2");
        agreement.comments = r#"said "hi"}, {"lender_name": "Mallory"#.to_string();
        agreement.borrower_name = "back\\slash\nnewline".to_string();

        let decoded = decode(&encode(&agreement).unwrap()).unwrap();
        assert_eq!(decoded, agreement);
        assert_eq!(decoded.lender_name, "First Bank");
    }

    #[test]
    fn empty_bytes_decode_to_zero_record() {
        assert_eq!(decode(b"").unwrap(), Agreement::default());
    }

    #[test]
    fn missing_fields_decode_as_empty() {
        let decoded = decode(br#"{"agreement_id":"A-3"}"#).unwrap();
        assert_eq!(decoded.agreement_id, "A-3");
        assert!(decoded.comments.is_empty());
    }

    #[test]
    fn malformed_record_is_an_error() {
        assert!(decode(b"{\"agreement_id\": \"A-4\"").is_err());
        assert!(decode(b"not json").is_err());
        assert!(decode(b"[1,2]").is_err());
    }

    #[test]
    fn index_decodes_empty_and_null_as_empty() {
        assert!(decode_index(b"").unwrap().is_empty());
        assert!(decode_index(b"null").unwrap().is_empty());
        assert!(decode_index(b"[]").unwrap().is_empty());
    }

    #[test]
    fn index_preserves_order() {
        let ids = vec!["b".to_string(), "a".to_string(), "c".to_string()];
        assert_eq!(decode_index(&encode_index(&ids).unwrap()).unwrap(), ids);
    }

    #[test]
    fn malformed_index_is_an_error() {
        assert!(decode_index(b"{\"a\":1}").is_err());
        assert!(decode_index(b"[1, 2]").is_err());
    }

    #[test]
    fn agreement_set_serializes_in_insertion_order() {
        let mut set = AgreementSet::new();
        set.push("z".to_string(), sample("z"));
        set.push("a".to_string(), sample("a"));

        let text = String::from_utf8(set.to_bytes().unwrap()).unwrap();
        let z_at = text.find("\"z\":").unwrap();
        let a_at = text.find("\"a\":").unwrap();
        assert!(z_at < a_at);

        let parsed: serde_json::Map<String, serde_json::Value> =
            serde_json::from_str(&text).unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed["a"]["agreement_id"], "a");
    }

    #[test]
    fn empty_agreement_set_is_empty_object() {
        assert_eq!(AgreementSet::new().to_bytes().unwrap(), b"{}");
    }

    fn any_field() -> impl Strategy<Value = String> {
        prop_oneof![
            "[a-zA-Z0-9 ]{0,16}",
            r#"[\\"{}\[\],: ]{0,8}"#,
            any::<String>(),
        ]
    }

    fn any_agreement() -> impl Strategy<Value = Agreement> {
        proptest::collection::vec(any_field(), FIELD_COUNT)
            .prop_map(|values| Agreement::try_from(values).unwrap())
    }

    proptest! {
        #[test]
        fn decode_inverts_encode(agreement in any_agreement()) {
            let decoded = decode(&encode(&agreement).unwrap()).unwrap();
            prop_assert_eq!(decoded, agreement);
        }
    }
}
