mod common;

use anyhow::Result;
use httpmock::prelude::*;
use payment_examples::app::payment_methods::GetPaymentMethods;
use payment_examples::core::hpp;
use payment_examples::PalError;
use serde_json::json;
use std::collections::BTreeMap;
use tempfile::TempDir;

#[tokio::test]
async fn test_directory_lookup_lists_payment_methods() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let server = MockServer::start();

    let hpp_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/hpp/directory.shtml")
            .body_contains("skinCode=4aD37dJA")
            .body_contains("countryCode=NL")
            .body_contains("paymentAmount=100")
            .body_contains("merchantSig=");
        then.status(200).json_body(json!({
            "paymentMethods": [
                {"brandCode": "ideal", "name": "iDEAL", "issuers": [
                    {"issuerId": "1121", "name": "Test Issuer"}
                ]},
                {"brandCode": "visa", "name": "VISA"}
            ]
        }));
    });

    let runner = common::runner_for(&server, &temp_dir);
    let outcome = runner
        .run(&GetPaymentMethods::new("4aD37dJA", common::HMAC_KEY))
        .await?;

    hpp_mock.assert();
    let rendered = outcome.report().to_string();
    assert!(rendered.starts_with("Payment Methods:"));
    assert!(rendered.contains("brandCode: ideal"));
    assert!(rendered.contains("Test Issuer (1121)"));
    assert!(rendered.contains("name: VISA"));
    Ok(())
}

#[tokio::test]
async fn test_directory_lookup_rejects_bad_hmac_key() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let server = MockServer::start();

    let hpp_mock = server.mock(|when, then| {
        when.method(POST).path("/hpp/directory.shtml");
        then.status(200).json_body(json!({"paymentMethods": []}));
    });

    let runner = common::runner_for(&server, &temp_dir);
    let error = runner
        .run(&GetPaymentMethods::new("4aD37dJA", "not-hex"))
        .await
        .expect_err("signing must fail");

    assert!(matches!(error, PalError::SigningError { .. }));
    hpp_mock.assert_hits(0);
    Ok(())
}

#[test]
fn test_signature_matches_request_fields() {
    let example = GetPaymentMethods::new("4aD37dJA", common::HMAC_KEY);
    let request = example.build_request("YourMerchantAccount");

    let fields: BTreeMap<String, String> = request.fields();
    let first = hpp::sign(&fields, common::HMAC_KEY).unwrap();
    let second = hpp::sign(&fields, common::HMAC_KEY).unwrap();

    assert_eq!(first, second);
    assert_eq!(first.len(), 44);
    assert!(hpp::signing_string(&fields).starts_with("countryCode:currencyCode:merchantAccount"));
}
