mod common;

use anyhow::Result;
use httpmock::prelude::*;
use payment_examples::app::modifications::ModificationExample;
use payment_examples::app::payments::{
    Authorise3dSecurePayment, Create3dSecurePayment, CreatePaymentApi, CreatePaymentCse,
    CreateRecurringPayment,
};
use payment_examples::app::recurring::{DisableRecurringContract, RetrieveRecurringContract};
use payment_examples::core::runner::REDIRECT_PAGE;
use payment_examples::domain::model::{Amount, ContractType};
use payment_examples::{Outcome, PalError};
use serde_json::json;
use tempfile::TempDir;

#[tokio::test]
async fn test_create_payment_end_to_end() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let server = MockServer::start();

    let api_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/pal/servlet/Payment/v10/authorise")
            .header("Authorization", common::AUTHORIZATION)
            .json_body_partial(
                r#"{
                    "merchantAccount": "YourMerchantAccount",
                    "amount": {"currency": "EUR", "value": 199},
                    "card": {"number": "5555444433331111", "holderName": "John Doe"}
                }"#,
            );
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(json!({
                "pspReference": "8814000000000001",
                "resultCode": "Authorised",
                "authCode": "64158"
            }));
    });

    let runner = common::runner_for(&server, &temp_dir);
    let outcome = runner.run(&CreatePaymentApi::default()).await?;

    api_mock.assert();
    let report = outcome.report();
    assert_eq!(report.get("pspReference"), Some("8814000000000001"));
    assert_eq!(report.get("resultCode"), Some("Authorised"));
    assert_eq!(report.get("authCode"), Some("64158"));
    assert_eq!(report.get("refusalReason"), Some(""));
    Ok(())
}

#[tokio::test]
async fn test_create_payment_cse_sends_encrypted_blob() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let server = MockServer::start();

    let api_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/pal/servlet/Payment/v10/authorise")
            .json_body_partial(
                r#"{"additionalData": {"card.encrypted.json": "adyenjs_0_1_4p1$encrypted"}}"#,
            );
        then.status(200).json_body(json!({
            "pspReference": "8814000000000002",
            "resultCode": "Refused",
            "refusalReason": "CVC Declined"
        }));
    });

    let runner = common::runner_for(&server, &temp_dir);
    let outcome = runner
        .run(&CreatePaymentCse::new("adyenjs_0_1_4p1$encrypted"))
        .await?;

    api_mock.assert();
    assert_eq!(outcome.report().get("refusalReason"), Some("CVC Declined"));
    Ok(())
}

#[tokio::test]
async fn test_3d_secure_redirect_writes_issuer_page() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let server = MockServer::start();

    let api_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/pal/servlet/Payment/v10/authorise")
            .json_body_partial(r#"{"browserInfo": {"userAgent": "Mozilla/5.0 (X11; Linux x86_64)"}}"#);
        then.status(200).json_body(json!({
            "pspReference": "8814000000000003",
            "resultCode": "RedirectShopper",
            "issuerUrl": "https://test.adyen.com/hpp/3d/validate.shtml",
            "paRequest": "BQABAgA",
            "md": "djIhcWF"
        }));
    });

    let runner = common::runner_for(&server, &temp_dir);
    let outcome = runner
        .run(&Create3dSecurePayment::new("https://shop.example/3d/return"))
        .await?;

    api_mock.assert();
    match &outcome {
        Outcome::Redirect { redirect, report } => {
            assert_eq!(redirect.md, "djIhcWF");
            assert_eq!(report.get("termUrl"), Some("https://shop.example/3d/return"));
        }
        other => panic!("expected redirect, got {:?}", other),
    }

    let page = std::fs::read_to_string(temp_dir.path().join(REDIRECT_PAGE))?;
    assert!(page.contains("https://test.adyen.com/hpp/3d/validate.shtml"));
    assert!(page.contains("BQABAgA"));
    assert!(page.contains("TermUrl"));
    Ok(())
}

#[tokio::test]
async fn test_3d_secure_without_enrollment_completes() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(POST).path("/pal/servlet/Payment/v10/authorise");
        then.status(200).json_body(json!({
            "pspReference": "8814000000000004",
            "resultCode": "Authorised"
        }));
    });

    let runner = common::runner_for(&server, &temp_dir);
    let outcome = runner
        .run(&Create3dSecurePayment::new("https://shop.example/3d/return"))
        .await?;

    assert!(matches!(outcome, Outcome::Completed(_)));
    assert!(!temp_dir.path().join(REDIRECT_PAGE).exists());
    Ok(())
}

#[tokio::test]
async fn test_authorise_3d_posts_md_and_pa_response() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let server = MockServer::start();

    let api_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/pal/servlet/Payment/v10/authorise3d")
            .json_body_partial(r#"{"md": "djIhcWF", "paResponse": "eNqtmF"}"#);
        then.status(200).json_body(json!({
            "pspReference": "8814000000000003",
            "resultCode": "Authorised",
            "authCode": "12345"
        }));
    });

    let runner = common::runner_for(&server, &temp_dir);
    let outcome = runner
        .run(&Authorise3dSecurePayment::new("djIhcWF", "eNqtmF"))
        .await?;

    api_mock.assert();
    assert_eq!(outcome.report().get("authCode"), Some("12345"));
    Ok(())
}

#[tokio::test]
async fn test_recurring_payment_uses_stored_contract() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let server = MockServer::start();

    let api_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/pal/servlet/Payment/v10/authorise")
            .json_body_partial(
                r#"{
                    "shopperReference": "TheShopperReference",
                    "selectedRecurringDetailReference": "LATEST",
                    "shopperInteraction": "ContAuth",
                    "recurring": {"contract": "RECURRING"}
                }"#,
            );
        then.status(200).json_body(json!({
            "pspReference": "8814000000000005",
            "resultCode": "Authorised"
        }));
    });

    let mut example = CreateRecurringPayment::new("TheShopperReference");
    example.contract = ContractType::Recurring;

    let runner = common::runner_for(&server, &temp_dir);
    runner.run(&example).await?;

    api_mock.assert();
    Ok(())
}

#[tokio::test]
async fn test_refund_and_cancel() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let server = MockServer::start();

    let refund_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/pal/servlet/Payment/v10/refund")
            .header("Authorization", common::AUTHORIZATION)
            .json_body(json!({
                "merchantAccount": "YourMerchantAccount",
                "originalReference": "8814000000000001",
                "reference": "YourReference",
                "modificationAmount": {"currency": "EUR", "value": 500}
            }));
        then.status(200).json_body(json!({
            "pspReference": "8814000000000010",
            "response": "[refund-received]"
        }));
    });

    let cancel_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/pal/servlet/Payment/v10/cancel")
            .json_body(json!({
                "merchantAccount": "YourMerchantAccount",
                "originalReference": "8814000000000001",
                "reference": "YourReference"
            }));
        then.status(200).json_body(json!({
            "pspReference": "8814000000000011",
            "response": "[cancel-received]"
        }));
    });

    let runner = common::runner_for(&server, &temp_dir);

    let refund = runner
        .run(&ModificationExample::refund(
            "8814000000000001",
            Amount::new("EUR", 500),
        ))
        .await?;
    let cancel = runner
        .run(&ModificationExample::cancel("8814000000000001"))
        .await?;

    refund_mock.assert();
    cancel_mock.assert();
    assert_eq!(refund.report().get("response"), Some("[refund-received]"));
    assert_eq!(cancel.report().get("response"), Some("[cancel-received]"));
    Ok(())
}

#[tokio::test]
async fn test_list_and_disable_recurring_contracts() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let server = MockServer::start();

    let list_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/pal/servlet/Recurring/v10/listRecurringDetails")
            .json_body_partial(r#"{"shopperReference": "TheShopperReference"}"#);
        then.status(200).json_body(json!({
            "creationDate": "2015-06-25T10:31:06+02:00",
            "lastKnownShopperEmail": "test@example.com",
            "shopperReference": "TheShopperReference",
            "details": [
                {"RecurringDetail": {
                    "recurringDetailReference": "8314000000000001",
                    "variant": "mc",
                    "card": {"expiryMonth": "3", "expiryYear": "2030", "holderName": "John Doe", "number": "1111"}
                }}
            ]
        }));
    });

    let disable_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/pal/servlet/Recurring/v10/disable")
            .json_body(json!({
                "merchantAccount": "YourMerchantAccount",
                "shopperReference": "TheShopperReference",
                "recurringDetailReference": "8314000000000001"
            }));
        then.status(200)
            .json_body(json!({"response": "[detail-successfully-disabled]"}));
    });

    let runner = common::runner_for(&server, &temp_dir);

    let listed = runner
        .run(&RetrieveRecurringContract::new("TheShopperReference"))
        .await?;
    let disabled = runner
        .run(&DisableRecurringContract::new(
            "TheShopperReference",
            Some("8314000000000001".to_string()),
        ))
        .await?;

    list_mock.assert();
    disable_mock.assert();

    let rendered = listed.report().to_string();
    assert!(rendered.contains("recurringDetailReference: 8314000000000001"));
    assert!(rendered.contains("variant: mc"));
    assert_eq!(
        disabled.report().get("response"),
        Some("[detail-successfully-disabled]")
    );
    Ok(())
}

#[tokio::test]
async fn test_rejected_request_surfaces_remote_fault() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(POST).path("/pal/servlet/Payment/v10/authorise");
        then.status(422).json_body(json!({
            "status": 422,
            "errorCode": "101",
            "message": "Invalid card number",
            "errorType": "validation"
        }));
    });

    let runner = common::runner_for(&server, &temp_dir);
    let error = runner
        .run(&CreatePaymentApi::default())
        .await
        .expect_err("request should be rejected");

    assert!(matches!(error, PalError::ApiError { status: 422, .. }));
    assert_eq!(error.to_string(), "validation 101 Invalid card number");
    Ok(())
}

#[tokio::test]
async fn test_unauthorised_without_error_body() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(POST).path("/pal/servlet/Payment/v10/capture");
        then.status(401).body("Unauthorized");
    });

    let runner = common::runner_for(&server, &temp_dir);
    let error = runner
        .run(&ModificationExample::capture(
            "8814000000000001",
            Amount::new("EUR", 199),
        ))
        .await
        .expect_err("request should be rejected");

    assert!(matches!(error, PalError::UnexpectedStatus { .. }));
    assert_eq!(
        error.to_string(),
        "Unexpected response status: 401 Unauthorized"
    );
    Ok(())
}

#[tokio::test]
async fn test_capture_authorised_payment() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let server = MockServer::start();

    let capture_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/pal/servlet/Payment/v10/capture")
            .header("Authorization", common::AUTHORIZATION)
            .json_body(json!({
                "merchantAccount": "YourMerchantAccount",
                "originalReference": "8814000000000001",
                "reference": "YourReference",
                "modificationAmount": {"currency": "EUR", "value": 199}
            }));
        then.status(200).json_body(json!({
            "pspReference": "8814000000000012",
            "response": "[capture-received]"
        }));
    });

    let runner = common::runner_for(&server, &temp_dir);
    let outcome = runner
        .run(&ModificationExample::capture(
            "8814000000000001",
            Amount::new("EUR", 199),
        ))
        .await?;

    capture_mock.assert();
    assert_eq!(outcome.report().get("pspReference"), Some("8814000000000012"));
    assert_eq!(outcome.report().get("response"), Some("[capture-received]"));
    Ok(())
}

#[tokio::test]
async fn test_cancel_or_refund_without_amount() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let server = MockServer::start();

    let cancel_or_refund_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/pal/servlet/Payment/v10/cancelOrRefund")
            .header("Authorization", common::AUTHORIZATION)
            .json_body(json!({
                "merchantAccount": "YourMerchantAccount",
                "originalReference": "8814000000000001",
                "reference": "MyCancelOrRefund"
            }));
        then.status(200).json_body(json!({
            "pspReference": "8814000000000013",
            "response": "[cancelOrRefund-received]"
        }));
    });

    let runner = common::runner_for(&server, &temp_dir);
    let outcome = runner
        .run(
            &ModificationExample::cancel_or_refund("8814000000000001")
                .with_reference("MyCancelOrRefund"),
        )
        .await?;

    cancel_or_refund_mock.assert();
    assert_eq!(
        outcome.report().get("response"),
        Some("[cancelOrRefund-received]")
    );
    Ok(())
}
