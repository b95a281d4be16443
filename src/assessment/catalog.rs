use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioComplexity {
    Medium,
    High,
}

impl ScenarioComplexity {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

/// Predefined incident archetype and the capabilities it depends on.
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioTemplate {
    pub key: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub required_logs: Vec<&'static str>,
    pub required_playbooks: Vec<&'static str>,
    pub complexity: ScenarioComplexity,
}

/// Reference data the scorers check answers against: the standard playbook
/// set, the log sources no investigation can do without, and the scenario
/// archetypes.
#[derive(Debug, Clone)]
pub struct AssessmentCatalog {
    playbooks: Vec<&'static str>,
    critical_log_sources: Vec<&'static str>,
    scenarios: Vec<ScenarioTemplate>,
}

impl AssessmentCatalog {
    pub fn standard() -> Self {
        Self {
            playbooks: vec![
                "Malware Infection Response",
                "Phishing Incident Response",
                "Data Breach Response",
                "Ransomware Response",
                "Insider Threat Response",
                "DDoS Attack Response",
            ],
            critical_log_sources: vec![
                "Windows Event Logs",
                "Authentication Logs",
                "Firewall Logs",
            ],
            scenarios: standard_scenarios(),
        }
    }

    pub fn with_playbook(mut self, name: &'static str) -> Self {
        if !self.is_catalog_playbook(name) {
            self.playbooks.push(name);
        }
        self
    }

    pub fn with_scenario(mut self, scenario: ScenarioTemplate) -> Self {
        self.scenarios.retain(|existing| existing.key != scenario.key);
        self.scenarios.push(scenario);
        self
    }

    pub fn playbooks(&self) -> &[&'static str] {
        &self.playbooks
    }

    pub fn critical_log_sources(&self) -> &[&'static str] {
        &self.critical_log_sources
    }

    pub fn scenarios(&self) -> &[ScenarioTemplate] {
        &self.scenarios
    }

    pub fn scenario(&self, key: &str) -> Option<&ScenarioTemplate> {
        let key = key.trim();
        self.scenarios
            .iter()
            .find(|scenario| scenario.key.eq_ignore_ascii_case(key))
    }

    pub fn is_catalog_playbook(&self, name: &str) -> bool {
        self.playbooks
            .iter()
            .any(|playbook| playbook.eq_ignore_ascii_case(name.trim()))
    }
}

impl Default for AssessmentCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

fn standard_scenarios() -> Vec<ScenarioTemplate> {
    vec![
        ScenarioTemplate {
            key: "ransomware",
            name: "Ransomware Attack",
            description: "Multiple endpoints encrypted, ransom note detected",
            required_logs: vec!["Windows Event Logs", "EDR", "Network Traffic"],
            required_playbooks: vec!["Ransomware Response"],
            complexity: ScenarioComplexity::High,
        },
        ScenarioTemplate {
            key: "credential_compromise",
            name: "Credential Compromise",
            description: "Suspicious login from unusual location detected",
            required_logs: vec!["Authentication Logs", "VPN Logs"],
            required_playbooks: vec!["Insider Threat Response"],
            complexity: ScenarioComplexity::Medium,
        },
        ScenarioTemplate {
            key: "data_exfiltration",
            name: "Data Exfiltration",
            description: "Large outbound data transfer to unknown destination",
            required_logs: vec!["Network Traffic", "Firewall Logs", "DLP"],
            required_playbooks: vec!["Data Breach Response"],
            complexity: ScenarioComplexity::High,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_catalog_shape() {
        let catalog = AssessmentCatalog::standard();
        assert_eq!(catalog.playbooks().len(), 6);
        assert_eq!(catalog.scenarios().len(), 3);
        assert!(catalog
            .critical_log_sources()
            .contains(&"Windows Event Logs"));

        let ransomware = catalog.scenario("RANSOMWARE").expect("lookup ignores case");
        assert_eq!(ransomware.required_playbooks, vec!["Ransomware Response"]);
        for playbook in catalog.scenarios().iter().flat_map(|s| &s.required_playbooks) {
            assert!(catalog.is_catalog_playbook(playbook));
        }
    }

    #[test]
    fn catalog_extends_without_duplicates() {
        let catalog = AssessmentCatalog::standard()
            .with_playbook("Cloud Account Takeover Response")
            .with_playbook("ransomware response");
        assert_eq!(catalog.playbooks().len(), 7);
        assert!(catalog.is_catalog_playbook("Cloud Account Takeover Response"));
    }
}
