use serde::{Deserialize, Serialize};

// ============ Request Models ============

/// A lead submitted for validation.
///
/// Every field except `test_type` is optional and free-form. Nothing is
/// validated locally; the remote service decides what it accepts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadRequest {
    /// The contact's full name.
    pub full_name: Option<String>,
    /// Salutation of the contact.
    pub salutation: Option<String>,
    /// First name of the contact.
    pub first_name: Option<String>,
    /// Last name of the contact.
    pub last_name: Option<String>,
    /// The contact's company.
    pub business_name: Option<String>,
    /// Website domain associated with the business.
    pub business_domain: Option<String>,
    /// Company tax number for US leads.
    pub business_ein: Option<String>,
    /// Address lines 1 to 5 of the contact or business address.
    pub address1: Option<String>,
    pub address2: Option<String>,
    pub address3: Option<String>,
    pub address4: Option<String>,
    pub address5: Option<String>,
    /// City of the postal address.
    pub locality: Option<String>,
    /// State or province of the postal address.
    pub admin_area: Option<String>,
    /// Zip or postal code.
    pub postal_code: Option<String>,
    /// Country of the postal address.
    pub country: Option<String>,
    /// Primary phone number.
    pub phone1: Option<String>,
    /// Secondary phone number.
    pub phone2: Option<String>,
    /// Email address.
    pub email: Option<String>,
    /// IPv4 address the lead was submitted from.
    pub ip_address: Option<String>,
    /// Gender ("Male", "Female", "Neutral").
    pub gender: Option<String>,
    /// Date of birth.
    pub date_of_birth: Option<String>,
    /// Time the lead was captured.
    pub utc_capture_time: Option<String>,
    /// Language for some output information.
    pub output_language: Option<String>,
    /// The type of validation to perform (e.g. "business-noip"). Required.
    pub test_type: String,
}

macro_rules! with_setters {
    ($($setter:ident => $field:ident),* $(,)?) => {
        $(
            #[must_use]
            pub fn $setter(mut self, value: impl Into<String>) -> Self {
                self.$field = Some(value.into());
                self
            }
        )*
    };
}

impl LeadRequest {
    /// Creates an empty lead for the given test type.
    pub fn new(test_type: impl Into<String>) -> Self {
        Self {
            test_type: test_type.into(),
            ..Self::default()
        }
    }

    with_setters! {
        with_full_name => full_name,
        with_salutation => salutation,
        with_first_name => first_name,
        with_last_name => last_name,
        with_business_name => business_name,
        with_business_domain => business_domain,
        with_business_ein => business_ein,
        with_address1 => address1,
        with_address2 => address2,
        with_address3 => address3,
        with_address4 => address4,
        with_address5 => address5,
        with_locality => locality,
        with_admin_area => admin_area,
        with_postal_code => postal_code,
        with_country => country,
        with_phone1 => phone1,
        with_phone2 => phone2,
        with_email => email,
        with_ip_address => ip_address,
        with_gender => gender,
        with_date_of_birth => date_of_birth,
        with_utc_capture_time => utc_capture_time,
        with_output_language => output_language,
    }

    /// Ordered `(parameter, value)` pairs in the casing the service expects.
    ///
    /// Absent fields are sent as empty strings so both bindings always carry
    /// the full parameter set. The license key is not included.
    pub fn query_pairs(&self) -> Vec<(&'static str, &str)> {
        fn opt(v: &Option<String>) -> &str {
            v.as_deref().unwrap_or("")
        }

        vec![
            ("FullName", opt(&self.full_name)),
            ("Salutation", opt(&self.salutation)),
            ("FirstName", opt(&self.first_name)),
            ("LastName", opt(&self.last_name)),
            ("BusinessName", opt(&self.business_name)),
            ("BusinessDomain", opt(&self.business_domain)),
            ("BusinessEIN", opt(&self.business_ein)),
            ("Address1", opt(&self.address1)),
            ("Address2", opt(&self.address2)),
            ("Address3", opt(&self.address3)),
            ("Address4", opt(&self.address4)),
            ("Address5", opt(&self.address5)),
            ("Locality", opt(&self.locality)),
            ("AdminArea", opt(&self.admin_area)),
            ("PostalCode", opt(&self.postal_code)),
            ("Country", opt(&self.country)),
            ("Phone1", opt(&self.phone1)),
            ("Phone2", opt(&self.phone2)),
            ("Email", opt(&self.email)),
            ("IPAddress", opt(&self.ip_address)),
            ("Gender", opt(&self.gender)),
            ("DateOfBirth", opt(&self.date_of_birth)),
            ("UTCCaptureTime", opt(&self.utc_capture_time)),
            ("OutputLanguage", opt(&self.output_language)),
            ("TestType", self.test_type.as_str()),
        ]
    }
}

// ============ Result Models ============

/// A `{Name, Value}` pair of extra information returned by the service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InformationComponent {
    pub name: Option<String>,
    pub value: Option<String>,
}

/// Contact details the service associates with the lead's phone number.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhoneContact {
    pub name: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
    #[serde(rename = "type")]
    pub contact_type: Option<String>,
}

/// Error block reported by the service inside a response body.
///
/// A present error does not by itself fail the call. Only `type_code == "3"`
/// is fatal; anything else is an advisory carried in the result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceError {
    #[serde(rename = "type")]
    pub error_type: Option<String>,
    pub type_code: Option<String>,
    pub desc: Option<String>,
    pub desc_code: Option<String>,
}

/// `TypeCode` the service uses for "this endpoint cannot serve the request".
pub const FATAL_TYPE_CODE: &str = "3";

impl ServiceError {
    /// Whether this error means the endpoint cannot serve the request at all.
    pub fn is_fatal(&self) -> bool {
        self.type_code.as_deref() == Some(FATAL_TYPE_CODE)
    }
}

impl std::fmt::Display for ServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let show = |v: &Option<String>| v.clone().unwrap_or_default();
        write!(
            f,
            "Type={}, TypeCode={}, Desc={}, DescCode={}",
            show(&self.error_type),
            show(&self.type_code),
            show(&self.desc),
            show(&self.desc_code)
        )
    }
}

/// Validation result for one lead, identical in shape for both bindings.
///
/// Field names follow the REST payload; SOAP renames are reconciled by the
/// mapper.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LvResult {
    // Overall
    pub overall_certainty: Option<String>,
    pub overall_quality: Option<String>,
    pub lead_type: Option<String>,
    pub lead_country: Option<String>,
    pub note_codes: Option<String>,
    pub note_desc: Option<String>,

    // Name
    pub name_certainty: Option<String>,
    pub name_quality: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub first_name_clean: Option<String>,
    pub last_name_clean: Option<String>,
    pub name_note_codes: Option<String>,
    pub name_note_desc: Option<String>,

    // Address
    pub address_certainty: Option<String>,
    pub address_quality: Option<String>,
    pub address1: Option<String>,
    pub address2: Option<String>,
    pub address3: Option<String>,
    pub address4: Option<String>,
    pub address5: Option<String>,
    pub address_locality: Option<String>,
    pub address_admin_area: Option<String>,
    pub address_postal_code: Option<String>,
    pub address_country: Option<String>,
    pub address_note_codes: Option<String>,
    pub address_note_desc: Option<String>,

    // Email
    pub email_certainty: Option<String>,
    pub email_quality: Option<String>,
    pub email_corrected: Option<String>,
    pub email_note_codes: Option<String>,
    pub email_note_desc: Option<String>,

    // IP
    pub ip_address_certainty: Option<String>,
    pub ip_address_quality: Option<String>,
    pub ip_country: Option<String>,
    pub ip_locality: Option<String>,
    pub ip_admin_area: Option<String>,
    pub ip_note_codes: Option<String>,
    pub ip_note_desc: Option<String>,

    // Phone 1
    pub phone1_certainty: Option<String>,
    pub phone1_quality: Option<String>,
    pub phone1_locality: Option<String>,
    pub phone1_admin_area: Option<String>,
    pub phone1_country: Option<String>,
    pub phone1_note_codes: Option<String>,
    pub phone1_note_desc: Option<String>,

    // Phone 2
    pub phone2_certainty: Option<String>,
    pub phone2_quality: Option<String>,
    pub phone2_locality: Option<String>,
    pub phone2_admin_area: Option<String>,
    pub phone2_country: Option<String>,
    pub phone2_note_codes: Option<String>,
    pub phone2_note_desc: Option<String>,

    pub phone_contact: Option<PhoneContact>,
    pub information_components: Vec<InformationComponent>,
    pub error: Option<ServiceError>,
}

impl LvResult {
    /// The fatal service error carried by this result, if any.
    pub fn fatal_error(&self) -> Option<&ServiceError> {
        self.error.as_ref().filter(|e| e.is_fatal())
    }
}
