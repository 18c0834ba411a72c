//! Navigation guards.
//!
//! Guards run before every route change and may let it through or send the
//! user elsewhere. [`AdminGuard`] is a UX convenience, NOT a security
//! boundary: anyone can edit the stored user record. Whatever backs the
//! catalog management screens must authorize every request on its own.

use serde::Deserialize;
use sweet_shop_core::UserType;

use super::routes::{HOME, Route};
use crate::storage::{KeyValueStorage, keys};

/// Notice shown when a non-admin is turned away from an admin route.
pub const ACCESS_DENIED_NOTICE: &str = "Access denied. Admin privileges required.";

/// Outcome of a guard check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    /// Continue to the target route.
    Proceed,
    /// Navigate to `to` instead, optionally telling the user why.
    Redirect { to: String, notice: Option<String> },
}

/// A hook consulted before each navigation.
pub trait NavigationGuard {
    /// Decide whether navigation from `from` to `to` may proceed.
    fn before_each(&self, to: &Route, from: Option<&Route>) -> GuardDecision;
}

impl<F> NavigationGuard for F
where
    F: Fn(&Route, Option<&Route>) -> GuardDecision,
{
    fn before_each(&self, to: &Route, from: Option<&Route>) -> GuardDecision {
        self(to, from)
    }
}

/// The one field of the stored user record the guard looks at.
///
/// The login flow owns the rest of the record (ids, names, tokens) and may
/// shape it however it likes.
#[derive(Debug, Deserialize)]
struct StoredUserType {
    #[serde(rename = "userType")]
    user_type: UserType,
}

/// Sends anyone whose stored user record is not an admin back to home.
#[derive(Debug, Clone)]
pub struct AdminGuard<S> {
    storage: S,
}

impl<S: KeyValueStorage> AdminGuard<S> {
    #[must_use]
    pub const fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Read the stored user's type. Every failure reads as "nobody".
    fn current_user_type(&self) -> Option<UserType> {
        let raw = match self.storage.get_item(keys::CURRENT_USER) {
            Ok(raw) => raw?,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read current user");
                return None;
            }
        };

        serde_json::from_str::<StoredUserType>(&raw)
            .map(|stored| stored.user_type)
            .map_err(|e| tracing::debug!(error = %e, "Stored current user is malformed"))
            .ok()
    }
}

impl<S: KeyValueStorage> NavigationGuard for AdminGuard<S> {
    fn before_each(&self, to: &Route, _from: Option<&Route>) -> GuardDecision {
        if !to.meta.requires_admin {
            return GuardDecision::Proceed;
        }

        if self.current_user_type() == Some(UserType::Admin) {
            return GuardDecision::Proceed;
        }

        tracing::warn!(route = to.name, "Admin route denied");
        GuardDecision::Redirect {
            to: HOME.path.to_string(),
            notice: Some(ACCESS_DENIED_NOTICE.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::router::routes::{ADMIN_SWEETS, SWEETS};
    use crate::storage::MemoryStorage;

    fn denied() -> GuardDecision {
        GuardDecision::Redirect {
            to: "/".to_string(),
            notice: Some(ACCESS_DENIED_NOTICE.to_string()),
        }
    }

    fn guard_with_user(raw: Option<&str>) -> AdminGuard<MemoryStorage> {
        let storage = MemoryStorage::new();
        if let Some(raw) = raw {
            storage.set_item(keys::CURRENT_USER, raw).expect("seed user");
        }
        AdminGuard::new(storage)
    }

    #[test]
    fn test_public_route_always_proceeds() {
        let guard = guard_with_user(None);
        assert_eq!(guard.before_each(&SWEETS, None), GuardDecision::Proceed);
    }

    #[test]
    fn test_admin_route_without_user_redirects_home() {
        let guard = guard_with_user(None);
        assert_eq!(guard.before_each(&ADMIN_SWEETS, None), denied());
    }

    #[test]
    fn test_admin_route_with_admin_proceeds() {
        let guard = guard_with_user(Some(r#"{"userType":"admin"}"#));
        assert_eq!(
            guard.before_each(&ADMIN_SWEETS, Some(&SWEETS)),
            GuardDecision::Proceed
        );
    }

    #[test]
    fn test_admin_record_with_foreign_fields_proceeds() {
        for raw in [
            r#"{"id":"65f0c2a1","username":"boss","userType":"admin"}"#,
            r#"{"id":9999999999,"username":42,"email":null,"userType":"admin"}"#,
            r#"{"userType":"admin","token":{"value":"abc","expires":1}}"#,
        ] {
            let guard = guard_with_user(Some(raw));
            assert_eq!(
                guard.before_each(&ADMIN_SWEETS, None),
                GuardDecision::Proceed,
                "{raw}"
            );
        }
    }

    #[test]
    fn test_admin_route_fails_closed() {
        for raw in [
            r#"{"userType":"user"}"#,
            r#"{"userType":"Admin"}"#,
            r#"{"userType":"admin "}"#,
            r#"{"userType":null}"#,
            "{}",
            "not json",
            "",
        ] {
            let guard = guard_with_user(Some(raw));
            assert_eq!(guard.before_each(&ADMIN_SWEETS, None), denied(), "{raw}");
        }
    }

    fn login_bounces_to_sweets(to: &Route, _from: Option<&Route>) -> GuardDecision {
        if to.name == "login" {
            GuardDecision::Redirect {
                to: "/sweets".to_string(),
                notice: None,
            }
        } else {
            GuardDecision::Proceed
        }
    }

    #[test]
    fn test_fn_guard() {
        let guard = login_bounces_to_sweets;
        assert_eq!(guard.before_each(&SWEETS, None), GuardDecision::Proceed);
        assert!(matches!(
            guard.before_each(&crate::router::routes::LOGIN, None),
            GuardDecision::Redirect { notice: None, .. }
        ));
    }
}
