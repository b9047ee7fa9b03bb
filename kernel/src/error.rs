use std::fmt::Display;

use error_stack::{Context, Report};

#[derive(Debug)]
pub enum KernelError {
    InvalidArgument,
    NotFound,
    Conflict,
    Validation,
    Internal,
}

impl Display for KernelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KernelError::InvalidArgument => write!(f, "Invalid argument"),
            KernelError::NotFound => write!(f, "Entity not found"),
            KernelError::Conflict => write!(f, "Conflicting state"),
            KernelError::Validation => write!(f, "Validation failed"),
            KernelError::Internal => write!(f, "Internal kernel error"),
        }
    }
}

impl Context for KernelError {}

/// A single failed field constraint, attached to `KernelError::Validation`
/// reports so the boundary can render a per-field detail map.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct FieldViolation {
    field: &'static str,
    message: String,
}

impl FieldViolation {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }

    pub fn field(&self) -> &'static str {
        self.field
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn extract(report: &Report<KernelError>) -> Vec<&FieldViolation> {
        report
            .frames()
            .filter_map(|frame| frame.downcast_ref::<FieldViolation>())
            .collect()
    }
}

pub trait FieldViolationAttachments {
    fn attach_violations(self, violations: Vec<FieldViolation>) -> Self;
}

impl FieldViolationAttachments for Report<KernelError> {
    fn attach_violations(mut self, violations: Vec<FieldViolation>) -> Self {
        for violation in violations {
            self = self.attach(violation);
        }
        self
    }
}
