use crate::domain::model::{
    DisableResult, ModificationResult, PaymentMethod, PaymentResult, RecurringDetailsResult,
};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportLine {
    Field { key: String, value: String },
    /// 巢狀清單項目，第一個欄位以 `> *` 標示開頭
    Item { fields: Vec<(String, String)> },
}

/// 每個範例最後印出的結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub title: String,
    pub lines: Vec<ReportLine>,
}

impl Report {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            lines: Vec::new(),
        }
    }

    pub fn field(mut self, key: &str, value: Option<&str>) -> Self {
        self.lines.push(ReportLine::Field {
            key: key.to_string(),
            value: value.unwrap_or_default().to_string(),
        });
        self
    }

    pub fn item(mut self, fields: Vec<(String, String)>) -> Self {
        self.lines.push(ReportLine::Item { fields });
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.lines.iter().find_map(|line| match line {
            ReportLine::Field { key: k, value } if k == key => Some(value.as_str()),
            _ => None,
        })
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}:", self.title)?;
        for line in &self.lines {
            match line {
                ReportLine::Field { key, value } => writeln!(f, "- {}: {}", key, value)?,
                ReportLine::Item { fields } => {
                    for (i, (key, value)) in fields.iter().enumerate() {
                        let marker = if i == 0 { "  > *" } else { "    *" };
                        writeln!(f, "{} {}: {}", marker, key, value)?;
                    }
                }
            }
        }
        Ok(())
    }
}

fn json_text(value: &Option<serde_json::Value>) -> String {
    value.as_ref().map(|v| v.to_string()).unwrap_or_default()
}

impl From<&PaymentResult> for Report {
    fn from(result: &PaymentResult) -> Self {
        Report::new("Payment Result")
            .field("pspReference", result.psp_reference.as_deref())
            .field("resultCode", result.result_code.as_deref())
            .field("authCode", result.auth_code.as_deref())
            .field("refusalReason", result.refusal_reason.as_deref())
    }
}

impl From<&ModificationResult> for Report {
    fn from(result: &ModificationResult) -> Self {
        Report::new("Modification Result")
            .field("pspReference", result.psp_reference.as_deref())
            .field("response", result.response.as_deref())
    }
}

impl From<&DisableResult> for Report {
    fn from(result: &DisableResult) -> Self {
        Report::new("Disable Recurring Result").field("response", result.response.as_deref())
    }
}

impl From<&RecurringDetailsResult> for Report {
    fn from(result: &RecurringDetailsResult) -> Self {
        let mut report = Report::new("Recurring Details Result")
            .field("creationDate", result.creation_date.as_deref())
            .field(
                "lastKnownShopperEmail",
                result.last_known_shopper_email.as_deref(),
            )
            .field("shopperReference", result.shopper_reference.as_deref())
            .field("recurringDetail", None);

        for detail in result.recurring_details() {
            report = report.item(vec![
                (
                    "recurringDetailReference".to_string(),
                    detail.recurring_detail_reference.clone().unwrap_or_default(),
                ),
                (
                    "variant".to_string(),
                    detail.variant.clone().unwrap_or_default(),
                ),
                (
                    "creationDate".to_string(),
                    detail.creation_date.clone().unwrap_or_default(),
                ),
                ("bank".to_string(), json_text(&detail.bank)),
                ("card".to_string(), json_text(&detail.card)),
                ("elv".to_string(), json_text(&detail.elv)),
                ("name".to_string(), detail.name.clone().unwrap_or_default()),
            ]);
        }

        report
    }
}

impl From<&[PaymentMethod]> for Report {
    fn from(methods: &[PaymentMethod]) -> Self {
        let mut report = Report::new("Payment Methods");
        for method in methods {
            let mut fields = vec![
                ("brandCode".to_string(), method.brand_code.clone()),
                ("name".to_string(), method.name.clone()),
            ];
            if !method.issuers.is_empty() {
                let issuers = method
                    .issuers
                    .iter()
                    .map(|issuer| format!("{} ({})", issuer.name, issuer.issuer_id))
                    .collect::<Vec<_>>()
                    .join(", ");
                fields.push(("issuers".to_string(), issuers));
            }
            report = report.item(fields);
        }
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{RecurringDetail, RecurringDetailEntry};

    #[test]
    fn test_payment_result_report_format() {
        let result = PaymentResult {
            psp_reference: Some("8813760000000001".to_string()),
            result_code: Some("Authorised".to_string()),
            auth_code: Some("12345".to_string()),
            ..Default::default()
        };

        let output = Report::from(&result).to_string();
        assert_eq!(
            output,
            "Payment Result:\n\
             - pspReference: 8813760000000001\n\
             - resultCode: Authorised\n\
             - authCode: 12345\n\
             - refusalReason: \n"
        );
    }

    #[test]
    fn test_recurring_details_report_nests_items() {
        let result = RecurringDetailsResult {
            shopper_reference: Some("TheShopperReference".to_string()),
            details: vec![RecurringDetailEntry {
                recurring_detail: RecurringDetail {
                    recurring_detail_reference: Some("8313945117925286".to_string()),
                    variant: Some("visa".to_string()),
                    ..Default::default()
                },
            }],
            ..Default::default()
        };

        let output = Report::from(&result).to_string();
        assert!(output.starts_with("Recurring Details Result:\n"));
        assert!(output.contains("- recurringDetail: \n  > * recurringDetailReference: 8313945117925286\n"));
        assert!(output.contains("    * variant: visa\n"));
    }

    #[test]
    fn test_report_get() {
        let report = Report::new("Modification Result").field("response", Some("[cancel-received]"));
        assert_eq!(report.get("response"), Some("[cancel-received]"));
        assert_eq!(report.get("pspReference"), None);
    }
}
