use serde::{Deserialize, Serialize};

/// A `Policy` decides which privileged actions a requester can take on
/// top of operating on their own reservations.
///
/// Identity itself is established by an external collaborator, the
/// policy only captures what the already-authenticated caller is
/// allowed to do here.
#[derive(Debug, Serialize, Deserialize, Default)]
pub struct Policy {
    /// `Permission`s allowed by the `Policy`
    allow: Vec<Permission>,
}

impl Policy {
    pub fn elevated() -> Self {
        Self {
            allow: vec![Permission::All],
        }
    }

    /// Checks if this `Policy` has the right to the list of `Permission`s
    pub fn authorize(&self, permissions: &[Permission]) -> bool {
        if permissions.is_empty() {
            return true;
        }

        if self.allow.contains(&Permission::All) {
            return true;
        }

        permissions.iter().all(|p| self.allow.contains(p))
    }
}

/// `Permission`s are the privileged actions that can be performed.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub enum Permission {
    #[serde(rename = "*")]
    All,
    CancelAnyReservation,
    ReadAnyReservation,
    CreateResource,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn permissions() {
        let policy = Policy::default();
        assert!(policy.authorize(&Vec::new()));
        assert!(!policy.authorize(&[Permission::CancelAnyReservation]));

        let policy = Policy {
            allow: vec![Permission::CancelAnyReservation],
        };
        assert!(policy.authorize(&[Permission::CancelAnyReservation]));
        assert!(!policy.authorize(&[Permission::CreateResource]));
        assert!(!policy.authorize(&[
            Permission::CancelAnyReservation,
            Permission::CreateResource
        ]));

        let policy = Policy::elevated();
        assert!(policy.authorize(&[Permission::CancelAnyReservation]));
        assert!(policy.authorize(&[
            Permission::CancelAnyReservation,
            Permission::CreateResource
        ]));
    }
}
