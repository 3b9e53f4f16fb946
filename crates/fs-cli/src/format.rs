// SPDX-License-Identifier: MIT OR Apache-2.0
//! Output rendering for the `fs-errors` CLI.

use clap::ValueEnum;
use fs_config::{CommonConfig, ConfigWarning};
use fs_error::{ClassifiedError, ErrorType, ServiceStatusCode};
use serde::Serialize;

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text.
    Text,
    /// Pretty-printed JSON.
    Json,
}

/// A bare `(type, reason)` pair, as printed by `extract` and `codes`.
#[derive(Debug, Serialize)]
struct CodeEntry {
    #[serde(rename = "type")]
    error_type: ErrorType,
    prefix: &'static str,
    code: u32,
    reason: &'static str,
}

impl CodeEntry {
    fn new(error_type: ErrorType, reason: ServiceStatusCode) -> Self {
        Self {
            error_type,
            prefix: error_type.prefix(),
            code: reason.code(),
            reason: reason.text(),
        }
    }
}

/// Render a classified error.
pub fn render_error(err: &ClassifiedError, format: OutputFormat) -> anyhow::Result<String> {
    Ok(match format {
        OutputFormat::Text => err.message().to_string(),
        OutputFormat::Json => serde_json::to_string_pretty(&err.to_response())?,
    })
}

/// Render the pair recovered from a message.
pub fn render_pair(
    error_type: ErrorType,
    reason: ServiceStatusCode,
    format: OutputFormat,
) -> anyhow::Result<String> {
    let entry = CodeEntry::new(error_type, reason);
    Ok(match format {
        OutputFormat::Text => format!("{}{} {}", entry.prefix, entry.code, entry.reason),
        OutputFormat::Json => serde_json::to_string_pretty(&entry)?,
    })
}

/// Render the status-code table, each reason under its home type.
pub fn render_codes(format: OutputFormat) -> anyhow::Result<String> {
    let entries: Vec<CodeEntry> = ServiceStatusCode::ALL
        .iter()
        .map(|r| CodeEntry::new(r.home_type(), *r))
        .collect();
    Ok(match format {
        OutputFormat::Text => entries
            .iter()
            .map(|e| format!("{}{:<6} {}", e.prefix, e.code, e.reason))
            .collect::<Vec<_>>()
            .join("\n"),
        OutputFormat::Json => serde_json::to_string_pretty(&entries)?,
    })
}

/// Render the effective configuration plus any advisory warnings.
pub fn render_config(
    config: &CommonConfig,
    warnings: &[ConfigWarning],
    format: OutputFormat,
) -> anyhow::Result<String> {
    Ok(match format {
        OutputFormat::Text => {
            let mut out = toml::to_string(config)?;
            for w in warnings {
                out.push_str(&format!("# warning: {w}\n"));
            }
            out.trim_end().to_string()
        }
        OutputFormat::Json => {
            let warnings: Vec<String> = warnings.iter().map(ToString::to_string).collect();
            serde_json::to_string_pretty(&serde_json::json!({
                "config": config,
                "warnings": warnings,
            }))?
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_error_is_the_message() {
        let err = ClassifiedError::new("boom");
        assert_eq!(
            render_error(&err, OutputFormat::Text).unwrap(),
            "[FS_SY_1000 System error: boom"
        );
    }

    #[test]
    fn json_error_has_codes() {
        let err = ClassifiedError::with_reason(ErrorType::Sql, ServiceStatusCode::Read, "x");
        let v: serde_json::Value =
            serde_json::from_str(&render_error(&err, OutputFormat::Json).unwrap()).unwrap();
        assert_eq!(v["type"], "SQL");
        assert_eq!(v["code"], 2002);
    }

    #[test]
    fn pair_text() {
        assert_eq!(
            render_pair(ErrorType::System, ServiceStatusCode::NoParam, OutputFormat::Text).unwrap(),
            "FS_SY_1001 Required parameter missing"
        );
    }

    #[test]
    fn codes_table_lists_every_reason() {
        let text = render_codes(OutputFormat::Text).unwrap();
        assert_eq!(text.lines().count(), ServiceStatusCode::ALL.len());
        assert!(text.contains("FS_SQ_2003"));

        let json: Vec<serde_json::Value> =
            serde_json::from_str(&render_codes(OutputFormat::Json).unwrap()).unwrap();
        assert_eq!(json.len(), ServiceStatusCode::ALL.len());
    }

    #[test]
    fn config_text_includes_warnings() {
        let cfg = CommonConfig::default();
        let warnings = vec![ConfigWarning::UnusualOffset { minutes: 7 }];
        let out = render_config(&cfg, &warnings, OutputFormat::Text).unwrap();
        assert!(out.contains("app_namespace = \"com.fs\""));
        assert!(out.contains("# warning: db_utc_offset_minutes 7"));
    }

    #[test]
    fn config_text_puts_each_warning_on_its_own_line() {
        let cfg = CommonConfig::default();
        let warnings = vec![
            ConfigWarning::SuspiciousNamespace {
                namespace: "fs".into(),
            },
            ConfigWarning::UnusualOffset { minutes: 7 },
        ];
        let out = render_config(&cfg, &warnings, OutputFormat::Text).unwrap();
        let warning_lines: Vec<&str> = out.lines().filter(|l| l.starts_with("# warning:")).collect();
        assert_eq!(warning_lines.len(), 2);
        assert!(!out.ends_with('\n'));
    }
}
