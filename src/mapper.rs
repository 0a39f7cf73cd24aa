//! Maps raw transport payloads into [`LvResult`].
//!
//! Both bindings go through one field table, so the REST/SOAP naming
//! differences (`FirstNameClean` vs `FirstNameLatin`, `Address1` vs
//! `AddressLine1`, `IPAddressCertainty` vs `IPCertainty`) are reconciled in a
//! single place. Missing fields become `None`; inputs are never mutated.

use crate::models::{InformationComponent, LvResult, PhoneContact, ServiceError};
use crate::xml::XmlElement;
use serde_json::{Map, Value};

macro_rules! string_fields {
    ($($field:ident: $rest:literal, $soap:literal;)*) => {
        fn fill_from_json(result: &mut LvResult, data: &Map<String, Value>) {
            $( result.$field = json_text(data, $rest); )*
        }

        fn fill_from_xml(result: &mut LvResult, node: &XmlElement) {
            $( result.$field = node.child_text($soap); )*
        }

        /// `(REST name, SOAP name)` for every flat string field.
        pub const FIELD_NAMES: &[(&str, &str)] = &[$(($rest, $soap)),*];
    };
}

string_fields! {
    overall_certainty: "OverallCertainty", "OverallCertainty";
    overall_quality: "OverallQuality", "OverallQuality";
    lead_type: "LeadType", "LeadType";
    lead_country: "LeadCountry", "LeadCountry";
    note_codes: "NoteCodes", "NoteCodes";
    note_desc: "NoteDesc", "NoteDesc";
    name_certainty: "NameCertainty", "NameCertainty";
    name_quality: "NameQuality", "NameQuality";
    first_name: "FirstName", "FirstName";
    last_name: "LastName", "LastName";
    first_name_clean: "FirstNameClean", "FirstNameLatin";
    last_name_clean: "LastNameClean", "LastNameLatin";
    name_note_codes: "NameNoteCodes", "NameNoteCodes";
    name_note_desc: "NameNoteDesc", "NameNoteDesc";
    address_certainty: "AddressCertainty", "AddressCertainty";
    address_quality: "AddressQuality", "AddressQuality";
    address1: "Address1", "AddressLine1";
    address2: "Address2", "AddressLine2";
    address3: "Address3", "AddressLine3";
    address4: "Address4", "AddressLine4";
    address5: "Address5", "AddressLine5";
    address_locality: "AddressLocality", "AddressLocality";
    address_admin_area: "AddressAdminArea", "AddressAdminArea";
    address_postal_code: "AddressPostalCode", "AddressPostalCode";
    address_country: "AddressCountry", "AddressCountry";
    address_note_codes: "AddressNoteCodes", "AddressNoteCodes";
    address_note_desc: "AddressNoteDesc", "AddressNoteDesc";
    email_certainty: "EmailCertainty", "EmailCertainty";
    email_quality: "EmailQuality", "EmailQuality";
    email_corrected: "EmailCorrected", "EmailCorrected";
    email_note_codes: "EmailNoteCodes", "EmailNoteCodes";
    email_note_desc: "EmailNoteDesc", "EmailNoteDesc";
    ip_address_certainty: "IPAddressCertainty", "IPCertainty";
    ip_address_quality: "IPAddressQuality", "IPQuality";
    ip_country: "IPCountry", "IPCountry";
    ip_locality: "IPLocality", "IPLocality";
    ip_admin_area: "IPAdminArea", "IPAdminArea";
    ip_note_codes: "IPNoteCodes", "IPNoteCodes";
    ip_note_desc: "IPNoteDesc", "IPNoteDesc";
    phone1_certainty: "Phone1Certainty", "Phone1Certainty";
    phone1_quality: "Phone1Quality", "Phone1Quality";
    phone1_locality: "Phone1Locality", "Phone1Locality";
    phone1_admin_area: "Phone1AdminArea", "Phone1AdminArea";
    phone1_country: "Phone1Country", "Phone1Country";
    phone1_note_codes: "Phone1NoteCodes", "Phone1NoteCodes";
    phone1_note_desc: "Phone1NoteDesc", "Phone1NoteDesc";
    phone2_certainty: "Phone2Certainty", "Phone2Certainty";
    phone2_quality: "Phone2Quality", "Phone2Quality";
    phone2_locality: "Phone2Locality", "Phone2Locality";
    phone2_admin_area: "Phone2AdminArea", "Phone2AdminArea";
    phone2_country: "Phone2Country", "Phone2Country";
    phone2_note_codes: "Phone2NoteCodes", "Phone2NoteCodes";
    phone2_note_desc: "Phone2NoteDesc", "Phone2NoteDesc";
}

// ============ REST (JSON) ============

/// Maps a decoded REST body.
///
/// Returns `Ok(None)` for `null` or `{}` (an empty response) and `Err` when
/// the body is not a JSON object at all.
pub fn from_json(payload: &Value) -> Result<Option<LvResult>, String> {
    let data = match payload {
        Value::Null => return Ok(None),
        Value::Object(map) if map.is_empty() => return Ok(None),
        Value::Object(map) => map,
        other => {
            return Err(format!(
                "expected a JSON object, found {}",
                json_kind(other)
            ))
        }
    };

    let mut result = LvResult::default();
    fill_from_json(&mut result, data);

    result.phone_contact = data
        .get("PhoneContact")
        .and_then(Value::as_object)
        .map(|pc| PhoneContact {
            name: json_text(pc, "Name"),
            address: json_text(pc, "Address"),
            city: json_text(pc, "City"),
            state: json_text(pc, "State"),
            zip: json_text(pc, "Zip"),
            contact_type: json_text(pc, "Type"),
        });

    result.information_components = data
        .get("InformationComponents")
        .map(json_components)
        .unwrap_or_default();

    result.error = data
        .get("Error")
        .and_then(Value::as_object)
        .map(|e| ServiceError {
            error_type: json_text(e, "Type"),
            type_code: json_text(e, "TypeCode"),
            desc: json_text(e, "Desc"),
            desc_code: json_text(e, "DescCode"),
        });

    Ok(Some(result))
}

/// Scalar JSON value as text. Numbers and booleans keep their literal form.
fn json_text(data: &Map<String, Value>, key: &str) -> Option<String> {
    match data.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Accepts an array, a single object, or a `{"InformationComponent": ...}` wrapper.
fn json_components(value: &Value) -> Vec<InformationComponent> {
    match value {
        Value::Array(items) => items
            .iter()
            .filter_map(Value::as_object)
            .map(json_component)
            .collect(),
        Value::Object(map) => match map.get("InformationComponent") {
            Some(inner) => json_components(inner),
            None => vec![json_component(map)],
        },
        _ => Vec::new(),
    }
}

fn json_component(map: &Map<String, Value>) -> InformationComponent {
    InformationComponent {
        name: json_text(map, "Name"),
        value: json_text(map, "Value"),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

// ============ SOAP (XML) ============

/// Maps the `ValidateLead_V3Result` element of a SOAP response.
///
/// Returns `None` when the element is nil or has no content.
pub fn from_soap(node: &XmlElement) -> Option<LvResult> {
    if node.is_empty() {
        return None;
    }

    let mut result = LvResult::default();
    fill_from_xml(&mut result, node);

    result.phone_contact = node
        .child("PhoneContact")
        .filter(|pc| !pc.is_empty())
        .map(|pc| PhoneContact {
            name: pc.child_text("Name"),
            address: pc.child_text("Address"),
            city: pc.child_text("City"),
            state: pc.child_text("State"),
            zip: pc.child_text("Zip"),
            contact_type: pc.child_text("Type"),
        });

    result.information_components = node
        .child("InformationComponents")
        .map(|wrapper| {
            wrapper
                .children_named("InformationComponent")
                .map(|c| InformationComponent {
                    name: c.child_text("Name"),
                    value: c.child_text("Value"),
                })
                .collect()
        })
        .unwrap_or_default();

    result.error = node
        .child("Error")
        .filter(|e| !e.is_empty())
        .map(|e| ServiceError {
            error_type: e.child_text("Type"),
            type_code: e.child_text("TypeCode"),
            desc: e.child_text("Desc"),
            desc_code: e.child_text("DescCode"),
        });

    Some(result)
}
