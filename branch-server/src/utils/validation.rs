//! Input validation helpers
//!
//! Only required-field checks; values are otherwise stored as sent.

use shared::{AppError, AppResult, BranchCreate};

use crate::db::repository::branch::NewBranch;

/// Turn a create payload into [`NewBranch`], rejecting absent or blank required fields
///
/// All missing fields are reported in one message:
/// `Branch validation failed: code is required, city is required`
pub fn validate_branch_create(payload: BranchCreate) -> AppResult<NewBranch> {
    let missing = payload.missing_fields();
    if !missing.is_empty() {
        let detail = missing
            .iter()
            .map(|field| format!("{field} is required"))
            .collect::<Vec<_>>()
            .join(", ");
        return Err(AppError::validation(format!(
            "Branch validation failed: {detail}"
        )));
    }

    Ok(NewBranch {
        name: payload.name.unwrap_or_default(),
        code: payload.code.unwrap_or_default(),
        address: payload.address.unwrap_or_default(),
        city: payload.city.unwrap_or_default(),
        state: payload.state.unwrap_or_default(),
        phone: payload.phone,
        email: payload.email,
        status: payload.status.unwrap_or_default(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{BranchStatus, ErrorCode};

    fn payload() -> BranchCreate {
        BranchCreate {
            name: Some("Main St".into()),
            code: Some("MN01".into()),
            address: Some("1 Main St".into()),
            city: Some("Springfield".into()),
            state: Some("IL".into()),
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_payload_defaults_status() {
        let branch = validate_branch_create(payload()).unwrap();
        assert_eq!(branch.code, "MN01");
        assert_eq!(branch.status, BranchStatus::Active);
        assert_eq!(branch.phone, None);
    }

    #[test]
    fn test_missing_fields_listed() {
        let mut data = payload();
        data.code = None;
        data.city = Some(" ".into());

        let err = validate_branch_create(data).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert_eq!(
            err.message,
            "Branch validation failed: code is required, city is required"
        );
    }
}
