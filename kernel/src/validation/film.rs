use error_stack::Report;
use time::macros::date;
use time::Date;

use crate::entity::{
    FilmDescription, FilmDraft, FilmDuration, FilmId, FilmName, FilmPatch, NewFilm, ReleaseDate,
};
use crate::error::{FieldViolation, FieldViolationAttachments};
use crate::KernelError;

pub const FILM_NAME_MAX_LENGTH: usize = 100;
pub const FILM_DESCRIPTION_MAX_LENGTH: usize = 200;
/// Release of "La Sortie de l'usine Lumière à Lyon"; nothing can predate it.
pub const MIN_RELEASE_DATE: Date = date!(1895 - 12 - 28);

/// Create rules: name, release date and duration are required; a supplied
/// id is ignored because the storage layer mints one.
pub fn validate_new_film(draft: FilmDraft) -> error_stack::Result<NewFilm, KernelError> {
    let mut violations = Vec::new();

    let name = match draft.name {
        Some(name) if !name.trim().is_empty() => {
            check_name_length(&name, &mut violations).then(|| FilmName::new(name))
        }
        _ => {
            violations.push(FieldViolation::new("name", "film name must not be blank"));
            None
        }
    };

    let description = draft.description.and_then(|description| {
        check_description_length(&description, &mut violations)
            .then(|| FilmDescription::new(description))
    });

    let release_date = match draft.release_date {
        Some(date) => check_release_date(date, &mut violations).then(|| ReleaseDate::new(date)),
        None => {
            violations.push(FieldViolation::new("releaseDate", "release date is required"));
            None
        }
    };

    let duration = match draft.duration {
        Some(minutes) => check_duration(minutes, &mut violations).then(|| FilmDuration::new(minutes)),
        None => {
            violations.push(FieldViolation::new("duration", "film duration is required"));
            None
        }
    };

    match (name, release_date, duration) {
        (Some(name), Some(release_date), Some(duration)) if violations.is_empty() => Ok(NewFilm {
            name,
            description,
            release_date,
            duration,
        }),
        _ => Err(Report::new(KernelError::Validation)
            .attach_printable("film failed create validation")
            .attach_violations(violations)),
    }
}

/// Update rules: the id is mandatory, every other field is checked only
/// when present.
pub fn validate_film_patch(draft: FilmDraft) -> error_stack::Result<FilmPatch, KernelError> {
    let id = match draft.id {
        Some(id) if id > 0 => FilmId::new(id),
        Some(id) => {
            return Err(Report::new(KernelError::InvalidArgument)
                .attach_printable(format!("film id must be positive, got {id}")))
        }
        None => {
            return Err(Report::new(KernelError::InvalidArgument)
                .attach_printable("film id is required for an update"))
        }
    };

    let mut violations = Vec::new();

    let name = draft.name.and_then(|name| {
        if name.trim().is_empty() {
            violations.push(FieldViolation::new("name", "film name must not be blank"));
            return None;
        }
        check_name_length(&name, &mut violations).then(|| FilmName::new(name))
    });

    let description = draft.description.and_then(|description| {
        check_description_length(&description, &mut violations)
            .then(|| FilmDescription::new(description))
    });

    let release_date = draft
        .release_date
        .and_then(|date| check_release_date(date, &mut violations).then(|| ReleaseDate::new(date)));

    let duration = draft
        .duration
        .and_then(|minutes| check_duration(minutes, &mut violations).then(|| FilmDuration::new(minutes)));

    if violations.is_empty() {
        Ok(FilmPatch {
            id,
            name,
            description,
            release_date,
            duration,
        })
    } else {
        Err(Report::new(KernelError::Validation)
            .attach_printable("film failed update validation")
            .attach_violations(violations))
    }
}

fn check_name_length(name: &str, violations: &mut Vec<FieldViolation>) -> bool {
    if name.chars().count() > FILM_NAME_MAX_LENGTH {
        violations.push(FieldViolation::new(
            "name",
            format!("film name must be at most {FILM_NAME_MAX_LENGTH} characters"),
        ));
        return false;
    }
    true
}

fn check_description_length(description: &str, violations: &mut Vec<FieldViolation>) -> bool {
    if description.chars().count() > FILM_DESCRIPTION_MAX_LENGTH {
        violations.push(FieldViolation::new(
            "description",
            format!("film description must be at most {FILM_DESCRIPTION_MAX_LENGTH} characters"),
        ));
        return false;
    }
    true
}

fn check_release_date(date: Date, violations: &mut Vec<FieldViolation>) -> bool {
    if date < MIN_RELEASE_DATE {
        violations.push(FieldViolation::new(
            "releaseDate",
            format!("release date must not be before {MIN_RELEASE_DATE}"),
        ));
        return false;
    }
    true
}

fn check_duration(minutes: i32, violations: &mut Vec<FieldViolation>) -> bool {
    if minutes <= 0 {
        violations.push(FieldViolation::new(
            "duration",
            "film duration must be a positive number of minutes",
        ));
        return false;
    }
    true
}

#[cfg(test)]
mod test {
    use crate::entity::FilmDraft;
    use crate::error::FieldViolation;
    use crate::validation::{validate_film_patch, validate_new_film};
    use crate::KernelError;
    use time::macros::date;

    fn draft() -> FilmDraft {
        FilmDraft {
            id: None,
            name: Some("Arrival".to_string()),
            description: Some("Aliens show up, linguists panic.".to_string()),
            release_date: Some(date!(2016 - 11 - 11)),
            duration: Some(116),
        }
    }

    #[test]
    fn create_accepts_complete_draft() {
        let film = validate_new_film(draft()).expect("draft is valid");
        assert_eq!(film.name.as_ref(), "Arrival");
        assert_eq!(i32::from(film.duration), 116);
    }

    #[test]
    fn create_rejects_missing_name() {
        let report = validate_new_film(FilmDraft {
            name: None,
            ..draft()
        })
        .expect_err("name is required on create");
        assert!(matches!(
            report.current_context(),
            KernelError::Validation
        ));
        let violations = FieldViolation::extract(&report);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].field(), "name");
    }

    #[test]
    fn create_rejects_overlong_name_and_description_together() {
        let report = validate_new_film(FilmDraft {
            name: Some("x".repeat(101)),
            description: Some("y".repeat(201)),
            ..draft()
        })
        .expect_err("both fields exceed their limits");
        let fields: Vec<_> = FieldViolation::extract(&report)
            .iter()
            .map(|violation| violation.field())
            .collect();
        assert_eq!(fields.len(), 2);
        assert!(fields.contains(&"name"));
        assert!(fields.contains(&"description"));
    }

    #[test]
    fn create_accepts_boundary_lengths() {
        validate_new_film(FilmDraft {
            name: Some("x".repeat(100)),
            description: Some("y".repeat(200)),
            ..draft()
        })
        .expect("boundary lengths are allowed");
    }

    #[test]
    fn create_accepts_earliest_release_date() {
        validate_new_film(FilmDraft {
            release_date: Some(date!(1895 - 12 - 28)),
            ..draft()
        })
        .expect("the first film screening date is allowed");
    }

    #[test]
    fn create_rejects_release_date_before_first_screening() {
        let report = validate_new_film(FilmDraft {
            release_date: Some(date!(1895 - 12 - 27)),
            ..draft()
        })
        .expect_err("date predates the first film screening");
        assert_eq!(FieldViolation::extract(&report)[0].field(), "releaseDate");
    }

    #[test]
    fn create_rejects_non_positive_duration() {
        for minutes in [0, -30] {
            let report = validate_new_film(FilmDraft {
                duration: Some(minutes),
                ..draft()
            })
            .expect_err("duration must be positive");
            assert_eq!(FieldViolation::extract(&report)[0].field(), "duration");
        }
    }

    #[test]
    fn update_requires_id() {
        let report = validate_film_patch(draft()).expect_err("id is required on update");
        assert!(matches!(
            report.current_context(),
            KernelError::InvalidArgument
        ));
    }

    #[test]
    fn update_rejects_non_positive_id() {
        let report = validate_film_patch(FilmDraft {
            id: Some(0),
            ..draft()
        })
        .expect_err("id must be positive");
        assert!(matches!(
            report.current_context(),
            KernelError::InvalidArgument
        ));
    }

    #[test]
    fn update_allows_missing_name() {
        let patch = validate_film_patch(FilmDraft {
            id: Some(7),
            name: None,
            description: None,
            release_date: None,
            duration: None,
        })
        .expect("update only checks present fields");
        assert_eq!(i32::from(patch.id), 7);
        assert!(patch.name.is_none());
    }

    #[test]
    fn update_still_checks_present_fields() {
        let report = validate_film_patch(FilmDraft {
            id: Some(7),
            duration: Some(-1),
            ..draft()
        })
        .expect_err("a present duration must be well-formed");
        assert!(matches!(report.current_context(), KernelError::Validation));
        assert_eq!(FieldViolation::extract(&report)[0].field(), "duration");
    }
}
