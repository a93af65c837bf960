use crate::domain::model::{PaymentResult, ThreeDSecureRedirect};
use crate::domain::report::Report;
use crate::utils::error::{PalError, Result};
use html_escape::encode_double_quoted_attribute as escape_attr;

impl ThreeDSecureRedirect {
    /// 只有 `RedirectShopper` 才需要導向；其餘結果回傳 `None`
    pub fn from_result(result: &PaymentResult, term_url: &str) -> Result<Option<Self>> {
        if !result.is_redirect() {
            return Ok(None);
        }

        let missing = |field: &str| PalError::MalformedResponse {
            message: format!("RedirectShopper result without {}", field),
        };

        Ok(Some(Self {
            issuer_url: result.issuer_url.clone().ok_or_else(|| missing("issuerUrl"))?,
            pa_request: result.pa_request.clone().ok_or_else(|| missing("paRequest"))?,
            md: result.md.clone().ok_or_else(|| missing("md"))?,
            term_url: term_url.to_string(),
        }))
    }

    pub fn report(&self) -> Report {
        Report::new("3d Payment Request")
            .field("paRequest", Some(self.pa_request.as_str()))
            .field("md", Some(self.md.as_str()))
            .field("issuerUrl", Some(self.issuer_url.as_str()))
            .field("termUrl", Some(self.term_url.as_str()))
            .field("resultCode", Some("RedirectShopper"))
    }

    /// 自動送出的 HTML 表單，把購物者帶到發卡行
    pub fn render_form(&self) -> String {
        format!(
            r#"<!DOCTYPE html>
<html>
<head>
<meta charset="UTF-8">
<title>3-D Secure</title>
</head>
<body onload="document.getElementById('3dform').submit();">
<form method="POST" action="{issuer_url}" id="3dform">
<input type="hidden" name="PaReq" value="{pa_req}" />
<input type="hidden" name="MD" value="{md}" />
<input type="hidden" name="TermUrl" value="{term_url}" />
<noscript>
<p>Your browser does not support JavaScript. Press the button to continue.</p>
<input type="submit" value="Continue" />
</noscript>
</form>
</body>
</html>
"#,
            issuer_url = escape_attr(&self.issuer_url),
            pa_req = escape_attr(&self.pa_request),
            md = escape_attr(&self.md),
            term_url = escape_attr(&self.term_url),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn redirect_result() -> PaymentResult {
        PaymentResult {
            psp_reference: Some("8813760000000002".to_string()),
            result_code: Some("RedirectShopper".to_string()),
            issuer_url: Some("https://test.adyen.com/hpp/3d/validate.shtml".to_string()),
            pa_request: Some("BQABAgA+Tq\"<x>".to_string()),
            md: Some("djIhcWlx==".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_from_result_redirect() {
        let redirect = ThreeDSecureRedirect::from_result(
            &redirect_result(),
            "https://shop.example/authorise-3d",
        )
        .unwrap()
        .unwrap();

        assert_eq!(redirect.md, "djIhcWlx==");
        assert_eq!(redirect.term_url, "https://shop.example/authorise-3d");
        assert_eq!(redirect.report().get("resultCode"), Some("RedirectShopper"));
    }

    #[test]
    fn test_from_result_not_redirect() {
        let result = PaymentResult {
            result_code: Some("Authorised".to_string()),
            ..Default::default()
        };
        assert_eq!(ThreeDSecureRedirect::from_result(&result, "x").unwrap(), None);
    }

    #[test]
    fn test_from_result_missing_fields() {
        let mut result = redirect_result();
        result.md = None;
        assert!(matches!(
            ThreeDSecureRedirect::from_result(&result, "x"),
            Err(PalError::MalformedResponse { .. })
        ));
    }

    #[test]
    fn test_render_form_escapes_values() {
        let redirect = ThreeDSecureRedirect::from_result(&redirect_result(), "https://shop.example/t?a=1&b=2")
            .unwrap()
            .unwrap();
        let html = redirect.render_form();

        assert!(html.contains(r#"action="https://test.adyen.com/hpp/3d/validate.shtml""#));
        assert!(html.contains(r#"name="PaReq" value="BQABAgA+Tq&quot;&lt;x&gt;""#));
        assert!(html.contains(r#"name="TermUrl" value="https://shop.example/t?a=1&amp;b=2""#));
    }
}
