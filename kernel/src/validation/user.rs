use error_stack::Report;
use once_cell::sync::Lazy;
use regex::Regex;
use time::{Date, OffsetDateTime};

use crate::entity::{
    NewUser, UserBirthday, UserDraft, UserEmail, UserId, UserLogin, UserName, UserPatch,
};
use crate::error::{FieldViolation, FieldViolationAttachments};
use crate::KernelError;

pub const LOGIN_MIN_LENGTH: usize = 4;
pub const LOGIN_MAX_LENGTH: usize = 20;

static LOGIN_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_]+$").expect("login pattern is a valid regex"));
static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern is a valid regex"));

/// Create rules: email, login and birthday are required; the display name
/// is free-form and optional. A supplied id is ignored.
pub fn validate_new_user(draft: UserDraft) -> error_stack::Result<NewUser, KernelError> {
    let mut violations = Vec::new();

    let email = match draft.email {
        Some(email) => check_email(&email, &mut violations).then(|| UserEmail::new(email)),
        None => {
            violations.push(FieldViolation::new("email", "email is required"));
            None
        }
    };

    let login = match draft.login {
        Some(login) => check_login(&login, &mut violations).then(|| UserLogin::new(login)),
        None => {
            violations.push(FieldViolation::new("login", "login is required"));
            None
        }
    };

    let name = draft.name.map(UserName::new);

    let birthday = match draft.birthday {
        Some(date) => check_birthday(date, &mut violations).then(|| UserBirthday::new(date)),
        None => {
            violations.push(FieldViolation::new("birthday", "birthday is required"));
            None
        }
    };

    match (email, login, birthday) {
        (Some(email), Some(login), Some(birthday)) if violations.is_empty() => Ok(NewUser {
            email,
            login,
            name,
            birthday,
        }),
        _ => Err(Report::new(KernelError::Validation)
            .attach_printable("user failed create validation")
            .attach_violations(violations)),
    }
}

/// Update rules: the id is mandatory, every other field is checked only
/// when present.
pub fn validate_user_patch(draft: UserDraft) -> error_stack::Result<UserPatch, KernelError> {
    let id = match draft.id {
        Some(id) if id > 0 => UserId::new(id),
        Some(id) => {
            return Err(Report::new(KernelError::InvalidArgument)
                .attach_printable(format!("user id must be positive, got {id}")))
        }
        None => {
            return Err(Report::new(KernelError::InvalidArgument)
                .attach_printable("user id is required for an update"))
        }
    };

    let mut violations = Vec::new();

    let email = draft
        .email
        .and_then(|email| check_email(&email, &mut violations).then(|| UserEmail::new(email)));

    let login = draft
        .login
        .and_then(|login| check_login(&login, &mut violations).then(|| UserLogin::new(login)));

    let name = draft.name.map(UserName::new);

    let birthday = draft
        .birthday
        .and_then(|date| check_birthday(date, &mut violations).then(|| UserBirthday::new(date)));

    if violations.is_empty() {
        Ok(UserPatch {
            id,
            email,
            login,
            name,
            birthday,
        })
    } else {
        Err(Report::new(KernelError::Validation)
            .attach_printable("user failed update validation")
            .attach_violations(violations))
    }
}

fn check_email(email: &str, violations: &mut Vec<FieldViolation>) -> bool {
    if email.trim().is_empty() {
        violations.push(FieldViolation::new("email", "email must not be blank"));
        return false;
    }
    if !EMAIL_PATTERN.is_match(email) {
        violations.push(FieldViolation::new("email", "email must be a valid address"));
        return false;
    }
    true
}

fn check_login(login: &str, violations: &mut Vec<FieldViolation>) -> bool {
    let length = login.chars().count();
    if !(LOGIN_MIN_LENGTH..=LOGIN_MAX_LENGTH).contains(&length) {
        violations.push(FieldViolation::new(
            "login",
            format!("login must be between {LOGIN_MIN_LENGTH} and {LOGIN_MAX_LENGTH} characters"),
        ));
        return false;
    }
    if !LOGIN_PATTERN.is_match(login) {
        violations.push(FieldViolation::new(
            "login",
            "login may only contain latin letters, digits and underscores",
        ));
        return false;
    }
    true
}

fn check_birthday(date: Date, violations: &mut Vec<FieldViolation>) -> bool {
    if date > OffsetDateTime::now_utc().date() {
        violations.push(FieldViolation::new(
            "birthday",
            "birthday must not be in the future",
        ));
        return false;
    }
    true
}

#[cfg(test)]
mod test {
    use crate::entity::UserDraft;
    use crate::error::FieldViolation;
    use crate::validation::{validate_new_user, validate_user_patch};
    use crate::KernelError;
    use time::macros::date;
    use time::{Duration, OffsetDateTime};

    fn draft() -> UserDraft {
        UserDraft {
            id: None,
            email: Some("ada@example.com".to_string()),
            login: Some("ada_1815".to_string()),
            name: Some("Ada".to_string()),
            birthday: Some(date!(1990 - 12 - 10)),
        }
    }

    #[test]
    fn create_accepts_complete_draft() {
        let user = validate_new_user(draft()).expect("draft is valid");
        assert_eq!(user.login.as_ref(), "ada_1815");
    }

    #[test]
    fn create_requires_email_login_and_birthday() {
        let report = validate_new_user(UserDraft {
            id: None,
            email: None,
            login: None,
            name: None,
            birthday: None,
        })
        .expect_err("empty draft cannot pass create validation");
        assert!(matches!(report.current_context(), KernelError::Validation));
        let fields: Vec<_> = FieldViolation::extract(&report)
            .iter()
            .map(|violation| violation.field())
            .collect();
        assert_eq!(fields.len(), 3);
        assert!(fields.contains(&"email"));
        assert!(fields.contains(&"login"));
        assert!(fields.contains(&"birthday"));
    }

    #[test]
    fn create_rejects_malformed_email() {
        for email in ["", "   ", "no-at-sign", "a@b", "two words@mail.com"] {
            let report = validate_new_user(UserDraft {
                email: Some(email.to_string()),
                ..draft()
            })
            .expect_err("email shape is invalid");
            assert_eq!(FieldViolation::extract(&report)[0].field(), "email");
        }
    }

    #[test]
    fn create_rejects_bad_logins() {
        for login in ["abc", "x".repeat(21).as_str(), "with space", "dash-ed", "кир"] {
            let report = validate_new_user(UserDraft {
                login: Some(login.to_string()),
                ..draft()
            })
            .expect_err("login is invalid");
            assert_eq!(FieldViolation::extract(&report)[0].field(), "login");
        }
    }

    #[test]
    fn create_accepts_boundary_logins() {
        for login in ["ab_1", "a234567890123456789_"] {
            validate_new_user(UserDraft {
                login: Some(login.to_string()),
                ..draft()
            })
            .expect("4 and 20 character logins are allowed");
        }
    }

    #[test]
    fn create_accepts_birthday_today() {
        validate_new_user(UserDraft {
            birthday: Some(OffsetDateTime::now_utc().date()),
            ..draft()
        })
        .expect("today is a permitted birthday");
    }

    #[test]
    fn create_rejects_birthday_in_the_future() {
        let report = validate_new_user(UserDraft {
            birthday: Some(OffsetDateTime::now_utc().date() + Duration::days(1)),
            ..draft()
        })
        .expect_err("future birthdays are invalid");
        assert_eq!(FieldViolation::extract(&report)[0].field(), "birthday");
    }

    #[test]
    fn update_requires_id() {
        let report = validate_user_patch(draft()).expect_err("id is required on update");
        assert!(matches!(
            report.current_context(),
            KernelError::InvalidArgument
        ));
    }

    #[test]
    fn update_allows_sparse_patch() {
        let patch = validate_user_patch(UserDraft {
            id: Some(3),
            email: None,
            login: None,
            name: None,
            birthday: None,
        })
        .expect("update only checks present fields");
        assert_eq!(i64::from(patch.id), 3);
        assert!(patch.email.is_none());
    }

    #[test]
    fn update_still_checks_present_fields() {
        let report = validate_user_patch(UserDraft {
            id: Some(3),
            login: Some("no".to_string()),
            ..draft()
        })
        .expect_err("a present login must be well-formed");
        assert_eq!(FieldViolation::extract(&report)[0].field(), "login");
    }
}
