//! CLI Doctor Command
//!
//! Reports which endpoints and credentials are configured and what the
//! config validator thinks of the effective config.

use std::path::Path;

use menuscan_config::{validate, MenuScanConfig, ValidationReport};

use crate::terminal_output::{note_error, note_success, note_warn};

#[derive(Debug, PartialEq, Eq)]
pub enum CheckStatus {
    Ok,
    /// Not configured.
    Missing,
}

#[derive(Debug)]
pub struct Check {
    pub label: String,
    pub status: CheckStatus,
    pub hint: &'static str,
}

pub struct Diagnosis {
    pub checks: Vec<Check>,
    pub validation: ValidationReport,
}

impl Diagnosis {
    /// Every credential present and no validation errors.
    pub fn is_healthy(&self) -> bool {
        self.validation.is_valid() && self.checks.iter().all(|c| c.status == CheckStatus::Ok)
    }
}

pub fn diagnose(config: &MenuScanConfig, config_path: &Path) -> Diagnosis {
    let present = |value: &str| {
        if value.trim().is_empty() {
            CheckStatus::Missing
        } else {
            CheckStatus::Ok
        }
    };
    let file_status = if config_path.exists() {
        CheckStatus::Ok
    } else {
        CheckStatus::Missing
    };

    let checks = vec![
        Check {
            label: format!("config file {}", config_path.display()),
            status: file_status,
            hint: "run `menuscan config init` or rely on environment variables",
        },
        Check {
            label: "OCR endpoint".into(),
            status: present(config.ocr_api_url()),
            hint: "set ocr.apiUrl or CLOVA_OCR_API_URL",
        },
        Check {
            label: "OCR secret key".into(),
            status: present(config.ocr_secret_key()),
            hint: "set ocr.secretKey or CLOVA_OCR_SECRET_KEY",
        },
        Check {
            label: "completion API key".into(),
            status: present(config.completion_api_key()),
            hint: "set completion.apiKey or OPENAI_API_KEY (needed by `menuscan menu`)",
        },
    ];

    Diagnosis {
        checks,
        validation: validate(config),
    }
}

/// Print the diagnosis. Returns whether everything is healthy.
pub fn run(config: &MenuScanConfig, config_path: &Path) -> bool {
    let diagnosis = diagnose(config, config_path);

    println!("\nMenuScan doctor\n");
    for check in &diagnosis.checks {
        match check.status {
            CheckStatus::Ok => note_success(&check.label),
            CheckStatus::Missing => note_warn(&format!("{} is missing: {}", check.label, check.hint)),
        }
    }
    for warning in &diagnosis.validation.warnings {
        note_warn(&format!("{}: {}", warning.path, warning.message));
    }
    for error in &diagnosis.validation.errors {
        note_error(&format!("{}: {}", error.path, error.message));
    }

    println!();
    let healthy = diagnosis.is_healthy();
    if healthy {
        note_success("All checks passed.");
    } else if diagnosis.validation.is_valid() {
        note_warn("Some settings are missing; see above.");
    } else {
        note_error("The configuration has errors; see above.");
    }
    healthy
}

#[cfg(test)]
mod tests {
    use super::*;
    use menuscan_config::{CompletionConfig, OcrConfig};

    fn full_config() -> MenuScanConfig {
        MenuScanConfig {
            ocr: Some(OcrConfig {
                api_url: Some("https://ocr.example.com/general".into()),
                secret_key: Some("secret".into()),
            }),
            completion: Some(CompletionConfig {
                api_key: Some("sk-test".into()),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    #[test]
    fn complete_config_is_healthy() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let diagnosis = diagnose(&full_config(), file.path());
        assert!(diagnosis.is_healthy(), "{:?}", diagnosis.checks);
    }

    #[test]
    fn missing_credentials_are_reported() {
        let diagnosis = diagnose(&MenuScanConfig::default(), Path::new("/nonexistent/config.yaml"));
        assert!(!diagnosis.is_healthy());
        let missing: Vec<&str> = diagnosis
            .checks
            .iter()
            .filter(|c| c.status == CheckStatus::Missing)
            .map(|c| c.label.as_str())
            .collect();
        assert!(missing.contains(&"OCR secret key"));
        assert!(missing.contains(&"completion API key"));
        assert_eq!(missing.len(), 4);
    }

    #[test]
    fn invalid_url_fails_validation() {
        let mut config = full_config();
        config.ocr.as_mut().unwrap().api_url = Some("ftp://ocr.example.com".into());
        let file = tempfile::NamedTempFile::new().unwrap();
        let diagnosis = diagnose(&config, file.path());
        assert!(!diagnosis.validation.is_valid());
        assert!(!diagnosis.is_healthy());
    }
}
