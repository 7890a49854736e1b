use std::collections::{BTreeSet, HashSet};

use serde::{Deserialize, Serialize};

/// 권한 문자열 묶음에 이름을 붙인 역할
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub name: String,
    #[serde(default)]
    pub permissions: BTreeSet<String>,
}

impl Role {
    pub fn new<I, S>(name: &str, permissions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.to_string(),
            permissions: permissions.into_iter().map(Into::into).collect(),
        }
    }
}

/// 주어진 역할들이 가진 권한의 합집합
pub fn effective_permissions(roles: &[Role]) -> HashSet<&str> {
    roles
        .iter()
        .flat_map(|role| role.permissions.iter().map(String::as_str))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_permissions_is_union() {
        let roles = vec![
            Role::new("A", ["x", "shared"]),
            Role::new("B", ["y", "shared"]),
        ];
        let permissions = effective_permissions(&roles);

        assert_eq!(permissions.len(), 3);
        assert!(permissions.contains("x"));
        assert!(permissions.contains("y"));
        assert!(!permissions.contains("z"));
    }

    #[test]
    fn test_no_roles_means_no_permissions() {
        assert!(effective_permissions(&[]).is_empty());
    }
}
