//! Authentication and sign-up primitives.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate string inputs before a handler talks to a store port.
//!
//! Stored credentials are compared verbatim with the submitted password;
//! there is no hashing in the login contract.

use std::fmt;

use zeroize::Zeroizing;

use super::user::{NewUser, Role, User};

/// Domain error returned when login payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginValidationError {
    /// Email was missing or blank once trimmed.
    EmptyEmail,
    /// Password was blank.
    EmptyPassword,
}

impl fmt::Display for LoginValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyEmail => write!(f, "email must not be empty"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for LoginValidationError {}

/// Validated login credentials.
///
/// ## Invariants
/// - `email` is trimmed and must not be empty after trimming.
/// - `password` is required to be non-empty but retains caller-provided
///   whitespace to avoid surprising credential comparisons.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw email/password inputs.
    ///
    /// # Errors
    ///
    /// Returns [`LoginValidationError`] when either part is blank.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, LoginValidationError> {
        let normalized = email.trim();
        if normalized.is_empty() {
            return Err(LoginValidationError::EmptyEmail);
        }

        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }

        Ok(Self {
            email: normalized.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Email string suitable for user lookups.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Whether the submitted password matches the user's stored credential.
    pub fn matches(&self, user: &User) -> bool {
        user.password == *self.password
    }
}

/// Sign-up failure, one distinct user-facing message per rule.
///
/// Rules are checked in declaration order and validation stops at the first
/// failure; the messages are part of the page contract and must not drift.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SignUpError {
    /// Another account already uses the submitted email.
    #[error("Email already exists.")]
    EmailTaken,
    /// Initials were empty.
    #[error("Enter valid initials")]
    InvalidInitials,
    /// Surname was shorter than two characters.
    #[error("Enter valid surname")]
    InvalidSurname,
    /// The two email entries differ.
    #[error("Emails do not match")]
    EmailMismatch,
    /// Email was shorter than four characters.
    #[error("Enter valid email")]
    InvalidEmail,
    /// The two password entries differ.
    #[error("Passwords do not match")]
    PasswordMismatch,
    /// Password was shorter than eight characters.
    #[error("Password characters must be more than 7")]
    PasswordTooShort,
    /// Role was not one of the recognised account roles.
    #[error("Enter valid role")]
    InvalidRole,
}

/// Raw sign-up form fields prior to validation.
#[derive(Debug, Clone, Copy)]
pub struct SignUpSubmission<'a> {
    /// Submitted initials.
    pub initials: &'a str,
    /// Submitted surname.
    pub surname: &'a str,
    /// First email entry.
    pub email_first: &'a str,
    /// Confirmation email entry.
    pub email_confirm: &'a str,
    /// First password entry.
    pub password_first: &'a str,
    /// Confirmation password entry.
    pub password_confirm: &'a str,
    /// Submitted role name.
    pub role: &'a str,
}

/// Validated sign-up field set, ready to insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignUpDetails {
    initials: String,
    surname: String,
    email: String,
    password: String,
    role: Role,
}

impl SignUpDetails {
    /// Run the field checks in their fixed order, stopping at the first
    /// failure.
    ///
    /// The duplicate-email rule ([`SignUpError::EmailTaken`]) needs a store
    /// lookup and is applied by the caller before these checks.
    ///
    /// # Errors
    ///
    /// Returns the first failing rule's [`SignUpError`].
    pub fn validate(submission: &SignUpSubmission<'_>) -> Result<Self, SignUpError> {
        if submission.initials.is_empty() {
            return Err(SignUpError::InvalidInitials);
        }
        if submission.surname.chars().count() < 2 {
            return Err(SignUpError::InvalidSurname);
        }
        if submission.email_first != submission.email_confirm {
            return Err(SignUpError::EmailMismatch);
        }
        if submission.email_first.chars().count() < 4 {
            return Err(SignUpError::InvalidEmail);
        }
        if submission.password_first != submission.password_confirm {
            return Err(SignUpError::PasswordMismatch);
        }
        if submission.password_first.chars().count() < 8 {
            return Err(SignUpError::PasswordTooShort);
        }
        let role: Role = submission
            .role
            .parse()
            .map_err(|_| SignUpError::InvalidRole)?;

        Ok(Self {
            initials: submission.initials.to_owned(),
            surname: submission.surname.to_owned(),
            email: submission.email_first.to_owned(),
            password: submission.password_first.to_owned(),
            role,
        })
    }

    /// Email the account will log in with.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Convert into the store's insert shape.
    pub fn into_new_user(self) -> NewUser {
        NewUser {
            initials: self.initials,
            surname: self.surname,
            email: self.email,
            password: self.password,
            role: self.role,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn valid_submission<'a>() -> SignUpSubmission<'a> {
        SignUpSubmission {
            initials: "AB",
            surname: "Mokoena",
            email_first: "ab@example.com",
            email_confirm: "ab@example.com",
            password_first: "hunter2hunter2",
            password_confirm: "hunter2hunter2",
            role: "student",
        }
    }

    #[rstest]
    #[case("", "pw", LoginValidationError::EmptyEmail)]
    #[case("   ", "pw", LoginValidationError::EmptyEmail)]
    #[case("user@example.com", "", LoginValidationError::EmptyPassword)]
    fn invalid_credentials(
        #[case] email: &str,
        #[case] password: &str,
        #[case] expected: LoginValidationError,
    ) {
        let err = LoginCredentials::try_from_parts(email, password)
            .expect_err("invalid inputs must fail");
        assert_eq!(err, expected);
    }

    #[rstest]
    fn credentials_trim_the_email_but_not_the_password() {
        let creds = LoginCredentials::try_from_parts("  jo@example.com  ", " secret ")
            .expect("valid inputs");
        assert_eq!(creds.email(), "jo@example.com");

        let user = sample_user(" secret ");
        assert!(creds.matches(&user));
    }

    #[rstest]
    fn password_comparison_is_exact() {
        let creds =
            LoginCredentials::try_from_parts("jo@example.com", "secret").expect("valid inputs");
        assert!(!creds.matches(&sample_user("Secret")));
        assert!(creds.matches(&sample_user("secret")));
    }

    fn sample_user(password: &str) -> crate::domain::User {
        crate::domain::User {
            id: crate::domain::UserId::new(1),
            initials: "JO".into(),
            surname: "Dlamini".into(),
            username: None,
            email: "jo@example.com".into(),
            password: password.into(),
            role: Role::Student,
        }
    }

    #[rstest]
    fn a_valid_submission_passes_every_rule() {
        let details = SignUpDetails::validate(&valid_submission()).expect("all rules pass");
        let new_user = details.into_new_user();
        assert_eq!(new_user.email, "ab@example.com");
        assert_eq!(new_user.role, Role::Student);
    }

    #[rstest]
    #[case(SignUpSubmission { initials: "", ..valid_submission() }, SignUpError::InvalidInitials)]
    #[case(SignUpSubmission { surname: "M", ..valid_submission() }, SignUpError::InvalidSurname)]
    #[case(
        SignUpSubmission { email_confirm: "other@example.com", ..valid_submission() },
        SignUpError::EmailMismatch
    )]
    #[case(
        SignUpSubmission { email_first: "a@b", email_confirm: "a@b", ..valid_submission() },
        SignUpError::InvalidEmail
    )]
    #[case(
        SignUpSubmission { password_confirm: "different", ..valid_submission() },
        SignUpError::PasswordMismatch
    )]
    #[case(
        SignUpSubmission { password_first: "short", password_confirm: "short", ..valid_submission() },
        SignUpError::PasswordTooShort
    )]
    #[case(SignUpSubmission { role: "warden", ..valid_submission() }, SignUpError::InvalidRole)]
    #[case(SignUpSubmission { role: "", ..valid_submission() }, SignUpError::InvalidRole)]
    fn each_rule_fails_with_its_own_message(
        #[case] submission: SignUpSubmission<'_>,
        #[case] expected: SignUpError,
    ) {
        let err = SignUpDetails::validate(&submission).expect_err("rule must fail");
        assert_eq!(err, expected);
    }

    #[rstest]
    fn rules_are_checked_in_order() {
        // Both surname and emails are wrong; the surname rule comes first.
        let submission = SignUpSubmission {
            surname: "X",
            email_confirm: "other@example.com",
            ..valid_submission()
        };
        let err = SignUpDetails::validate(&submission).expect_err("must fail");
        assert_eq!(err, SignUpError::InvalidSurname);
    }

    #[rstest]
    fn messages_match_the_page_contract() {
        assert_eq!(SignUpError::EmailTaken.to_string(), "Email already exists.");
        assert_eq!(
            SignUpError::PasswordMismatch.to_string(),
            "Passwords do not match"
        );
        assert_eq!(
            SignUpError::PasswordTooShort.to_string(),
            "Password characters must be more than 7"
        );
    }
}
