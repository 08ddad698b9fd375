//! Credential derivation for crew logins.
//!
//! Credentials are a pure function of the crew member's display name: the
//! username is the lowercased name with all whitespace removed, and the
//! password is the username followed by a fixed brigade suffix. There is no
//! hashing or rotation here; the crew list is the single source of truth.

use common::model::crew::CrewMember;

use crate::error::{Error, Result};
use crate::roster::store::Roster;

/// Fixed suffix appended to the derived username to form the password.
pub const PASSWORD_SUFFIX: &str = "3865";

/// Derive the login username from a display name.
pub fn derive_username(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .filter(|ch| !ch.is_whitespace())
        .collect()
}

/// Derive the login password from a display name.
pub fn derive_password(name: &str) -> String {
    format!("{}{}", derive_username(name), PASSWORD_SUFFIX)
}

/// Look up the crew member for `username` and check `password` against the
/// derived one. The comparison is case-sensitive.
///
/// Unknown user and wrong password both collapse into `Error::AuthFailure`,
/// so the caller cannot distinguish them.
pub fn authenticate<'a>(
    roster: &'a Roster,
    username: &str,
    password: &str,
) -> Result<&'a CrewMember> {
    // The login form is forgiving about how the username is typed.
    let username = derive_username(username);
    let password = password.trim();

    match roster.lookup_crew_by_username(&username) {
        Some(member) if member.password == password => Ok(member),
        _ => Err(Error::AuthFailure),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::store::tests::roster_with_crew;

    #[test]
    fn username_is_lowercased_and_whitespace_free() {
        assert_eq!(derive_username("Jane Doe"), "janedoe");
        assert_eq!(derive_username("  Alex\tScott "), "alexscott");
        assert_eq!(derive_username("Mary-Anne O'Brien"), "mary-anneo'brien");

        for name in ["Jane Doe", "A B C", "Tabs\t\tEverywhere"] {
            let username = derive_username(name);
            assert!(!username.chars().any(char::is_whitespace));
            assert_eq!(username, username.to_lowercase());
        }
    }

    #[test]
    fn password_is_username_plus_suffix() {
        assert_eq!(derive_password("Jane Doe"), "janedoe3865");
        for name in ["Jane Doe", "Alex Scott", ""] {
            assert_eq!(
                derive_password(name),
                format!("{}{}", derive_username(name), PASSWORD_SUFFIX)
            );
        }
    }

    #[test]
    fn authenticate_accepts_derived_credentials() {
        let roster = roster_with_crew(&["Jane Doe"]);
        let member = authenticate(&roster, "janedoe", "janedoe3865").unwrap();
        assert_eq!(member.name, "Jane Doe");
    }

    #[test]
    fn authenticate_normalizes_typed_username() {
        let roster = roster_with_crew(&["Jane Doe"]);
        assert!(authenticate(&roster, " Jane Doe ", "janedoe3865").is_ok());
    }

    #[test]
    fn authenticate_is_case_sensitive_on_password() {
        let roster = roster_with_crew(&["Jane Doe"]);
        assert!(matches!(
            authenticate(&roster, "janedoe", "JANEDOE3865"),
            Err(Error::AuthFailure)
        ));
    }

    #[test]
    fn unknown_user_and_wrong_password_are_indistinguishable() {
        let roster = roster_with_crew(&["Jane Doe"]);
        let unknown = authenticate(&roster, "nobody", "janedoe3865").unwrap_err();
        let wrong = authenticate(&roster, "janedoe", "wrong").unwrap_err();
        assert_eq!(unknown.to_string(), wrong.to_string());
    }
}
