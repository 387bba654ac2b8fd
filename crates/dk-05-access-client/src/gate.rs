//! # Authorization Gate
//!
//! Lets a matched person in only inside their access policy. A policy that
//! fails to parse never lets anyone in.

use crate::domain::account::Enrollment;
use dk_01_time_policy::Clock;
use dk_02_passcode_validator::{AuthorizationCallback, AuthorizationDecision, Key};

pub struct AuthorizationGate<C> {
    clock: C,
}

impl<C: Clock> AuthorizationGate<C> {
    pub fn new(clock: C) -> Self {
        Self { clock }
    }
}

impl<C: Clock> AuthorizationCallback<Enrollment> for AuthorizationGate<C> {
    fn authorize(&self, key: &Key<Enrollment>, _code: &str) -> AuthorizationDecision {
        let name = key.name();
        let policy = match key.attachment().policy.resolve() {
            Ok(policy) => policy,
            Err(e) => {
                return AuthorizationDecision::deny(format!(
                    "Error getting access policy for {}: {}",
                    name, e
                ))
            }
        };

        if policy.contains_time(&self.clock.now()) {
            AuthorizationDecision::allow(format!("{} validated for this time period.", name))
        } else {
            AuthorizationDecision::deny(format!(
                "{} is not permitted to enter at this time.",
                name
            ))
        }
    }
}
