use monoguard_core::task::TaskResult;

/// Uniform result shape for structural validators.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult {
    pub success: bool,
    pub errors: Vec<String>,
    pub output: Option<String>,
}

impl ValidationResult {
    pub fn ok(output: impl Into<String>) -> Self {
        Self {
            success: true,
            errors: Vec::new(),
            output: Some(output.into()),
        }
    }

    pub fn fail(errors: Vec<String>) -> Self {
        Self {
            success: false,
            errors,
            output: None,
        }
    }

    /// Success iff no errors were collected.
    pub fn from_errors(errors: Vec<String>, passed_output: impl Into<String>) -> Self {
        if errors.is_empty() {
            Self::ok(passed_output)
        } else {
            Self::fail(errors)
        }
    }
}

impl From<ValidationResult> for TaskResult {
    fn from(result: ValidationResult) -> Self {
        TaskResult {
            success: result.success,
            output: result.output,
            error: (!result.errors.is_empty()).then(|| result.errors.join("\n")),
            duration_ms: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_errors_empty_is_success() {
        let result = ValidationResult::from_errors(Vec::new(), "passed");
        assert!(result.success);
        assert_eq!(result.output.as_deref(), Some("passed"));
    }

    #[test]
    fn test_conversion_joins_errors() {
        let task_result: TaskResult =
            ValidationResult::fail(vec!["first".into(), "second".into()]).into();
        assert!(!task_result.success);
        assert_eq!(task_result.error.as_deref(), Some("first\nsecond"));
    }
}
