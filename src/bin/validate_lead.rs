//! Runs a sample lead through both the REST and SOAP bindings and prints the result.
//!
//! Reads `LV_LICENSE_KEY` and `LV_IS_LIVE` from the environment (or `.env`).

use lead_validation::config::Config;
use lead_validation::{LeadRequest, LvResult, RestLeadValidator, SoapLeadValidator};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn sample_lead() -> LeadRequest {
    LeadRequest::new("business-noip")
        .with_full_name("Tim Cook")
        .with_business_name("Apple")
        .with_address1("27 E Cota St")
        .with_address2("Suite 500")
        .with_locality("Cupertino")
        .with_admin_area("CA")
        .with_postal_code("93101")
        .with_country("US")
        .with_phone1("1-408-996-1010")
        .with_email("tim.cook@apple.com")
        .with_ip_address("192.168.1.1")
        .with_output_language("English")
}

fn print_field(label: &str, value: &Option<String>) {
    println!("{:<20}: {}", label, value.as_deref().unwrap_or(""));
}

fn print_result(result: &LvResult) {
    if let Some(error) = &result.error {
        println!("\n* Error *\n");
        print_field("Error Type", &error.error_type);
        print_field("Error TypeCode", &error.type_code);
        print_field("Error Desc", &error.desc);
        print_field("Error DescCode", &error.desc_code);
    }

    println!("\n* Lead Validation Info *\n");
    print_field("OverallCertainty", &result.overall_certainty);
    print_field("OverallQuality", &result.overall_quality);
    print_field("LeadType", &result.lead_type);
    print_field("LeadCountry", &result.lead_country);
    print_field("NoteCodes", &result.note_codes);
    print_field("NoteDesc", &result.note_desc);
    print_field("NameCertainty", &result.name_certainty);
    print_field("FirstNameClean", &result.first_name_clean);
    print_field("LastNameClean", &result.last_name_clean);
    print_field("AddressCertainty", &result.address_certainty);
    print_field("Address1", &result.address1);
    print_field("AddressLocality", &result.address_locality);
    print_field("AddressAdminArea", &result.address_admin_area);
    print_field("AddressPostalCode", &result.address_postal_code);
    print_field("EmailCertainty", &result.email_certainty);
    print_field("EmailCorrected", &result.email_corrected);
    print_field("IPAddressCertainty", &result.ip_address_certainty);
    print_field("IPCountry", &result.ip_country);
    print_field("Phone1Certainty", &result.phone1_certainty);
    print_field("Phone1Locality", &result.phone1_locality);

    println!("\n* Phone Contact *\n");
    match &result.phone_contact {
        Some(contact) => {
            print_field("Name", &contact.name);
            print_field("Address", &contact.address);
            print_field("City", &contact.city);
            print_field("State", &contact.state);
            print_field("Zip", &contact.zip);
            print_field("Type", &contact.contact_type);
        }
        None => println!("No phone contact found."),
    }

    println!("\n* Information Components *\n");
    if result.information_components.is_empty() {
        println!("No information components found.");
    }
    for component in &result.information_components {
        println!(
            "{}: {}",
            component.name.as_deref().unwrap_or(""),
            component.value.as_deref().unwrap_or("")
        );
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lead_validation=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    let lead = sample_lead();

    println!("=== LeadValidation - ValidateLead_V3 - REST ===");
    let rest = RestLeadValidator::with_config(config.client.clone())?;
    match rest
        .validate_lead(&lead, &config.license_key, config.is_live)
        .await
    {
        Ok(result) => print_result(&result),
        Err(e) => println!("\n* Error *\n\nException occurred: {}", e),
    }

    println!("\n=== LeadValidation - ValidateLead_V3 - SOAP ===");
    let soap = SoapLeadValidator::with_config(&config.license_key, config.is_live, config.client)?;
    match soap.validate_lead(&lead).await {
        Ok(result) => print_result(&result),
        Err(e) => println!("\n* Error *\n\nException occurred: {}", e),
    }

    Ok(())
}
