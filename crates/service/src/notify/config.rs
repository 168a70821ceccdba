use serde::{Deserialize, Serialize};

/// Credentials for the email delivery service, saved by the user.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryConfig {
    pub service_id: String,
    pub template_id: String,
    pub public_key: String,
}

impl DeliveryConfig {
    pub fn new(service_id: impl Into<String>, template_id: impl Into<String>, public_key: impl Into<String>) -> Self {
        Self { service_id: service_id.into(), template_id: template_id.into(), public_key: public_key.into() }
    }

    /// All three fields carry something other than whitespace.
    pub fn is_complete(&self) -> bool {
        [&self.service_id, &self.template_id, &self.public_key]
            .iter()
            .all(|f| !f.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completeness_requires_every_field() {
        assert!(DeliveryConfig::new("s1", "t1", "p1").is_complete());
        assert!(!DeliveryConfig::new("s1", "", "p1").is_complete());
        assert!(!DeliveryConfig::new("s1", "t1", "   ").is_complete());
    }

    #[test]
    fn wire_names_are_camel_case() {
        let v = serde_json::to_value(DeliveryConfig::new("s1", "t1", "p1")).unwrap();
        assert_eq!(v, serde_json::json!({"serviceId": "s1", "templateId": "t1", "publicKey": "p1"}));
    }
}
