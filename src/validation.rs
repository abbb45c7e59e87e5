//! Input validation for arriving items.
//!
//! `add_item` accepts anything; hosts that want to reject malformed input
//! before it reaches the buffers can run these checks first. Detects:
//! - Duplicate item IDs
//! - Zero weights
//! - Destinations below the lowest floor

use std::collections::HashSet;

use crate::config::DispatchConfig;
use crate::models::DeliverableItem;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two items share the same ID.
    DuplicateId,
    /// An item weighs nothing.
    ZeroWeight,
    /// An item is addressed below the lowest floor.
    FloorOutOfRange,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a single item against the configuration.
pub fn validate_item(item: &DeliverableItem, config: &DispatchConfig) -> ValidationResult {
    let mut errors = Vec::new();
    check_item(item, config, &mut errors);
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validates a set of items.
///
/// Checks:
/// 1. No duplicate item IDs
/// 2. Every weight is positive
/// 3. Every destination is at or above `config.lowest_floor`
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_items(items: &[DeliverableItem], config: &DispatchConfig) -> ValidationResult {
    let mut errors = Vec::new();
    let mut ids = HashSet::new();

    for item in items {
        if !ids.insert(item.id()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate item ID: {}", item.id()),
            ));
        }
        check_item(item, config, &mut errors);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_item(item: &DeliverableItem, config: &DispatchConfig, errors: &mut Vec<ValidationError>) {
    if item.weight() == 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::ZeroWeight,
            format!("Item '{}' has zero weight", item.id()),
        ));
    }
    if item.destination_floor() < config.lowest_floor {
        errors.push(ValidationError::new(
            ValidationErrorKind::FloorOutOfRange,
            format!(
                "Item '{}' is addressed to floor {} below lowest floor {}",
                item.id(),
                item.destination_floor(),
                config.lowest_floor
            ),
        ));
    }
}
