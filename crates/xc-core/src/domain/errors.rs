use super::Family;
use thiserror::Error;

pub type XcResult<T> = Result<T, XcError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum XcErrorCategory {
    Success,
    InputValidationError,
    IoSystemError,
    ConfigurationError,
    ResourceError,
}

impl XcErrorCategory {
    pub const fn compatibility_placeholder(self) -> CompatibilityExitPlaceholder {
        match self {
            Self::Success => CompatibilityExitPlaceholder {
                exit_code: 0,
                rust_category: "Success",
                legacy_class: "SUCCESS",
            },
            Self::InputValidationError => CompatibilityExitPlaceholder {
                exit_code: 2,
                rust_category: "InputValidationError",
                legacy_class: "INPUT_FATAL",
            },
            Self::IoSystemError => CompatibilityExitPlaceholder {
                exit_code: 3,
                rust_category: "IoSystemError",
                legacy_class: "IO_FATAL",
            },
            Self::ConfigurationError => CompatibilityExitPlaceholder {
                exit_code: 4,
                rust_category: "ConfigurationError",
                legacy_class: "INIT_FATAL",
            },
            Self::ResourceError => CompatibilityExitPlaceholder {
                exit_code: 5,
                rust_category: "ResourceError",
                legacy_class: "ALLOC_FATAL",
            },
        }
    }

    pub const fn exit_code(self) -> i32 {
        self.compatibility_placeholder().exit_code
    }

    pub const fn rust_category(self) -> &'static str {
        self.compatibility_placeholder().rust_category
    }

    pub const fn legacy_class(self) -> &'static str {
        self.compatibility_placeholder().legacy_class
    }

    pub const fn is_fatal(self) -> bool {
        !matches!(self, Self::Success)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompatibilityExitPlaceholder {
    pub exit_code: i32,
    pub rust_category: &'static str,
    pub legacy_class: &'static str,
}

/// Initialisation failures. Evaluation itself never returns an error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum XcError {
    #[error("functional identifier {id} is not registered")]
    UnknownFunctional { id: u32 },
    #[error("functional name '{name}' is not registered")]
    UnknownFunctionalName { name: String },
    #[error("functional {id} ({name}) does not provide derivatives of order {order}")]
    UnsupportedOrder {
        id: u32,
        name: &'static str,
        order: u8,
    },
    #[error("derivative order {order} is outside 0..=2")]
    InvalidOrder { order: u8 },
    #[error(
        "constituent {id} was initialised with {found} spin channel(s) but the composite uses {expected}"
    )]
    SpinMismatch {
        id: u32,
        expected: usize,
        found: usize,
    },
    #[error("constituent {id} is a {found} functional and cannot fill the {expected} part")]
    FamilyMismatch {
        id: u32,
        expected: Family,
        found: Family,
    },
    #[error("evaluation settings rejected: {reason}")]
    InvalidSettings { reason: String },
    #[error("unable to reserve storage for {count} constituent state(s)")]
    ResourceExhausted { count: usize },
}

impl XcError {
    pub const fn category(&self) -> XcErrorCategory {
        match self {
            Self::ResourceExhausted { .. } => XcErrorCategory::ResourceError,
            _ => XcErrorCategory::ConfigurationError,
        }
    }

    pub const fn placeholder(&self) -> &'static str {
        match self {
            Self::UnknownFunctional { .. } | Self::UnknownFunctionalName { .. } => {
                "CONFIG.UNKNOWN_FUNCTIONAL"
            }
            Self::UnsupportedOrder { .. } => "CONFIG.UNSUPPORTED_ORDER",
            Self::InvalidOrder { .. } => "CONFIG.INVALID_ORDER",
            Self::SpinMismatch { .. } => "CONFIG.SPIN_MISMATCH",
            Self::FamilyMismatch { .. } => "CONFIG.FAMILY_MISMATCH",
            Self::InvalidSettings { .. } => "CONFIG.INVALID_SETTINGS",
            Self::ResourceExhausted { .. } => "RESOURCE.ALLOCATION",
        }
    }

    pub const fn exit_code(&self) -> i32 {
        self.category().exit_code()
    }

    pub const fn compatibility_placeholder(&self) -> CompatibilityExitPlaceholder {
        self.category().compatibility_placeholder()
    }

    pub fn diagnostic_line(&self) -> String {
        let severity = if self.category().is_fatal() {
            "ERROR"
        } else {
            "INFO"
        };
        format!("{}: [{}] {}", severity, self.placeholder(), self)
    }

    pub fn fatal_exit_line(&self) -> Option<String> {
        self.category()
            .is_fatal()
            .then(|| format!("FATAL EXIT CODE: {}", self.exit_code()))
    }
}

#[cfg(test)]
mod tests {
    use super::{XcError, XcErrorCategory};
    use crate::domain::Family;

    #[test]
    fn exit_mapping_is_stable() {
        let cases = [
            (XcErrorCategory::Success, 0, "Success", "SUCCESS"),
            (
                XcErrorCategory::InputValidationError,
                2,
                "InputValidationError",
                "INPUT_FATAL",
            ),
            (
                XcErrorCategory::IoSystemError,
                3,
                "IoSystemError",
                "IO_FATAL",
            ),
            (
                XcErrorCategory::ConfigurationError,
                4,
                "ConfigurationError",
                "INIT_FATAL",
            ),
            (
                XcErrorCategory::ResourceError,
                5,
                "ResourceError",
                "ALLOC_FATAL",
            ),
        ];

        for (category, exit_code, rust_category, legacy_class) in cases {
            let placeholder = category.compatibility_placeholder();
            assert_eq!(placeholder.exit_code, exit_code);
            assert_eq!(placeholder.rust_category, rust_category);
            assert_eq!(placeholder.legacy_class, legacy_class);
        }
    }

    #[test]
    fn unknown_functional_renders_diagnostic_lines() {
        let error = XcError::UnknownFunctional { id: 9999 };

        assert_eq!(error.category(), XcErrorCategory::ConfigurationError);
        assert_eq!(error.exit_code(), 4);
        assert_eq!(
            error.diagnostic_line(),
            "ERROR: [CONFIG.UNKNOWN_FUNCTIONAL] functional identifier 9999 is not registered"
        );
        assert_eq!(
            error.fatal_exit_line().as_deref(),
            Some("FATAL EXIT CODE: 4")
        );
    }

    #[test]
    fn resource_and_family_errors_use_their_own_placeholders() {
        let exhausted = XcError::ResourceExhausted { count: 4 };
        assert_eq!(exhausted.category(), XcErrorCategory::ResourceError);
        assert_eq!(exhausted.placeholder(), "RESOURCE.ALLOCATION");

        let family = XcError::FamilyMismatch {
            id: 1,
            expected: Family::Gga,
            found: Family::Lda,
        };
        assert_eq!(family.placeholder(), "CONFIG.FAMILY_MISMATCH");
        assert!(family.to_string().contains("LDA functional"));
        assert!(family.to_string().contains("GGA part"));
    }
}
