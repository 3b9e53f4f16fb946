// SPDX-License-Identifier: MIT OR Apache-2.0
//! The two fixed code tables: [`ErrorType`] and [`ServiceStatusCode`].

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// ErrorType
// ---------------------------------------------------------------------------

/// Broad family a failure originates from.
///
/// The [`prefix`](Self::prefix) is the tag written in front of the reason code
/// in every formatted message, e.g. `FS_SY_` in `[FS_SY_1001 ...`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorType {
    /// Basic, uncategorised error.
    Error,
    /// System / request-handling error.
    System,
    /// Persistence-layer error.
    Sql,
    /// Business-rule error shared across services.
    Common,
    /// Spreadsheet export error.
    Excel,
}

impl ErrorType {
    /// Every type, in id order.
    pub const ALL: [ErrorType; 5] = [
        Self::Error,
        Self::System,
        Self::Sql,
        Self::Common,
        Self::Excel,
    ];

    /// Numeric type id.
    pub fn type_id(&self) -> u8 {
        match self {
            Self::Error => 0,
            Self::System => 1,
            Self::Sql => 2,
            Self::Common => 3,
            Self::Excel => 4,
        }
    }

    /// Message tag written before the reason code.
    pub fn prefix(&self) -> &'static str {
        match self {
            Self::Error => "FS_ER_",
            Self::System => "FS_SY_",
            Self::Sql => "FS_SQ_",
            Self::Common => "FS_CM_",
            Self::Excel => "FS_EX_",
        }
    }

    /// Look a type up by its exact message tag.
    pub fn from_prefix(prefix: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.prefix() == prefix)
    }
}

impl fmt::Display for ErrorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix())
    }
}

// ---------------------------------------------------------------------------
// ServiceStatusCode
// ---------------------------------------------------------------------------

/// Specific, numbered failure reason.
///
/// Each reason conceptually belongs to one [`ErrorType`] (see
/// [`home_type`](Self::home_type)) but is identified globally by its
/// [`code`](Self::code), which is what the message extractor recovers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ServiceStatusCode {
    // -- System --
    /// Unclassified system failure; the default reason.
    SystemException,
    /// A required request parameter was not supplied.
    NoParam,
    /// A request parameter failed conversion or validation.
    ParamValidity,
    /// A required value was null or absent.
    Null,

    // -- Sql --
    /// Generic query failure.
    Query,
    /// `insert` statement failed.
    Insert,
    /// `select` statement failed.
    Read,
    /// `update` statement failed.
    Update,
    /// `delete` statement failed.
    Delete,

    // -- Common --
    /// Generic business-rule failure.
    CommonException,
    /// The requested resource does not exist.
    NotFound,
    /// The resource already exists.
    AlreadyExists,
    /// The caller may not perform the operation.
    PermissionDenied,

    // -- Excel --
    /// Spreadsheet export failed.
    ExcelExport,
    /// Writing a spreadsheet cell or sheet failed.
    ExcelWrite,
}

impl ServiceStatusCode {
    /// Every reason, in code order.
    pub const ALL: [ServiceStatusCode; 15] = [
        Self::SystemException,
        Self::NoParam,
        Self::ParamValidity,
        Self::Null,
        Self::Query,
        Self::Insert,
        Self::Read,
        Self::Update,
        Self::Delete,
        Self::CommonException,
        Self::NotFound,
        Self::AlreadyExists,
        Self::PermissionDenied,
        Self::ExcelExport,
        Self::ExcelWrite,
    ];

    /// Stable numeric code embedded in formatted messages.
    pub fn code(&self) -> u32 {
        match self {
            Self::SystemException => 1000,
            Self::NoParam => 1001,
            Self::ParamValidity => 1002,
            Self::Null => 1003,
            Self::Query => 2000,
            Self::Insert => 2001,
            Self::Read => 2002,
            Self::Update => 2003,
            Self::Delete => 2004,
            Self::CommonException => 3000,
            Self::NotFound => 3001,
            Self::AlreadyExists => 3002,
            Self::PermissionDenied => 3003,
            Self::ExcelExport => 4000,
            Self::ExcelWrite => 4001,
        }
    }

    /// Human-readable reason text embedded after the code.
    pub fn text(&self) -> &'static str {
        match self {
            Self::SystemException => "System error",
            Self::NoParam => "Required parameter missing",
            Self::ParamValidity => "Invalid parameter",
            Self::Null => "Required value missing",
            Self::Query => "Query failed",
            Self::Insert => "Insert failed",
            Self::Read => "Select failed",
            Self::Update => "Update failed",
            Self::Delete => "Delete failed",
            Self::CommonException => "Business error",
            Self::NotFound => "Resource not found",
            Self::AlreadyExists => "Resource already exists",
            Self::PermissionDenied => "Permission denied",
            Self::ExcelExport => "Spreadsheet export failed",
            Self::ExcelWrite => "Spreadsheet write failed",
        }
    }

    /// The [`ErrorType`] this reason is normally reported under.
    pub fn home_type(&self) -> ErrorType {
        match self {
            Self::SystemException | Self::NoParam | Self::ParamValidity | Self::Null => {
                ErrorType::System
            }

            Self::Query | Self::Insert | Self::Read | Self::Update | Self::Delete => ErrorType::Sql,

            Self::CommonException | Self::NotFound | Self::AlreadyExists | Self::PermissionDenied => {
                ErrorType::Common
            }

            Self::ExcelExport | Self::ExcelWrite => ErrorType::Excel,
        }
    }

    /// Look a reason up by its numeric code.
    pub fn from_code(code: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.code() == code)
    }
}

impl fmt::Display for ServiceStatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.code(), self.text())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn type_ids_follow_declaration_order() {
        let ids: Vec<u8> = ErrorType::ALL.iter().map(ErrorType::type_id).collect();
        assert_eq!(ids, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn prefixes_are_unique_and_tag_shaped() {
        let mut seen = HashSet::new();
        for t in ErrorType::ALL {
            let p = t.prefix();
            assert!(seen.insert(p), "duplicate prefix: {p}");
            assert!(p.starts_with("FS_") && p.ends_with('_'), "{p}");
            assert_eq!(p.len(), 6);
        }
    }

    #[test]
    fn from_prefix_inverts_prefix() {
        for t in ErrorType::ALL {
            assert_eq!(ErrorType::from_prefix(t.prefix()), Some(t));
        }
        assert_eq!(ErrorType::from_prefix("FS_XX_"), None);
        assert_eq!(ErrorType::from_prefix("fs_sy_"), None);
    }

    #[test]
    fn codes_are_unique() {
        let mut seen = HashSet::new();
        for r in ServiceStatusCode::ALL {
            assert!(seen.insert(r.code()), "duplicate code {}", r.code());
        }
        assert_eq!(seen.len(), ServiceStatusCode::ALL.len());
    }

    #[test]
    fn from_code_inverts_code() {
        for r in ServiceStatusCode::ALL {
            assert_eq!(ServiceStatusCode::from_code(r.code()), Some(r));
        }
        assert_eq!(ServiceStatusCode::from_code(0), None);
        assert_eq!(ServiceStatusCode::from_code(9999), None);
    }

    #[test]
    fn code_blocks_match_home_type() {
        for r in ServiceStatusCode::ALL {
            let block = r.code() / 1000;
            assert_eq!(u32::from(r.home_type().type_id()), block, "{r:?}");
        }
    }

    #[test]
    fn sql_reasons_live_under_sql() {
        for r in [
            ServiceStatusCode::Query,
            ServiceStatusCode::Insert,
            ServiceStatusCode::Read,
            ServiceStatusCode::Update,
            ServiceStatusCode::Delete,
        ] {
            assert_eq!(r.home_type(), ErrorType::Sql);
        }
    }

    #[test]
    fn display_forms() {
        assert_eq!(ErrorType::Sql.to_string(), "FS_SQ_");
        assert_eq!(
            ServiceStatusCode::NoParam.to_string(),
            "1001 Required parameter missing"
        );
    }

    #[test]
    fn serde_uses_screaming_snake_case() {
        assert_eq!(
            serde_json::to_string(&ErrorType::System).unwrap(),
            r#""SYSTEM""#
        );
        assert_eq!(
            serde_json::to_string(&ServiceStatusCode::ParamValidity).unwrap(),
            r#""PARAM_VALIDITY""#
        );
        let back: ServiceStatusCode = serde_json::from_str(r#""SYSTEM_EXCEPTION""#).unwrap();
        assert_eq!(back, ServiceStatusCode::SystemException);
    }
}
