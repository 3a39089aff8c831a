//! Group CRUD and membership operations.

use crate::{
    errors::{ManagerError, Result},
    types::{current_timestamp, Group, User},
};
use palisade_storage::{get_key, KEY_DELIMITER, TYPE_GROUP, TYPE_USER};
use tracing::info;

use super::Manager;

impl Manager {
    /// Create a group keyed by its name.
    ///
    /// Same validation and duplicate rules as `add_user`.
    pub async fn add_group(&self, context: &User, name: &str, description: &str) -> Result<Group> {
        if name.is_empty() {
            return Err(ManagerError::Validation(
                "group name must not be empty".to_string(),
            ));
        }

        let key = get_key(TYPE_GROUP, &[name]);

        if self.system.exists(&key).await? {
            return Err(ManagerError::Duplicate {
                entity: "group",
                name: name.to_string(),
            });
        }

        let now = current_timestamp();
        let group = Group {
            name: name.to_string(),
            description: description.to_string(),
            users: Vec::new(),
            created: now,
            updated: now,
            created_by: context.name.clone(),
            updated_by: context.name.clone(),
        };

        self.system.put(&key, &group).await?;

        info!("Group added: {}", group.name);
        Ok(group)
    }

    /// Get a group by name
    pub async fn get_group(&self, _context: &User, name: &str) -> Result<Group> {
        self.system
            .get(&get_key(TYPE_GROUP, &[name]))
            .await?
            .ok_or_else(|| ManagerError::NotFound {
                entity: "group",
                name: name.to_string(),
            })
    }

    /// List all groups
    pub async fn get_all_groups(&self, _context: &User) -> Result<Vec<Group>> {
        let mut prefix = get_key(TYPE_GROUP, &[]);
        prefix.extend_from_slice(KEY_DELIMITER.as_bytes());

        let records: Vec<(Vec<u8>, Group)> = self.system.get_by_prefix(&prefix).await?;

        Ok(records.into_iter().map(|(_, group)| group).collect())
    }

    /// Add the named users to a group's membership set.
    ///
    /// The group and every named user are loaded before anything is
    /// written, so a missing entity fails the whole call with no partial
    /// membership grants. The group record and each user's group list are
    /// then updated in one atomic batch. Adding a user that is already a
    /// member leaves the set unchanged.
    pub async fn add_users_to_group(
        &self,
        context: &User,
        group_name: &str,
        user_names: &[&str],
    ) -> Result<Group> {
        let mut group = self.get_group(context, group_name).await?;

        let mut members = Vec::with_capacity(user_names.len());
        for name in user_names {
            members.push(self.get_user(context, name).await?);
        }

        let now = current_timestamp();
        let mut batch = self.system.batch()?;

        for mut member in members {
            if !member.groups.iter().any(|g| g == group_name) {
                member.groups.push(group_name.to_string());
                member.groups.sort();
            }
            member.updated = now;
            member.updated_by = context.name.clone();

            batch.put(&get_key(TYPE_USER, &[&member.name]), &member)?;
        }

        for name in user_names {
            if !group.users.iter().any(|u| u == name) {
                group.users.push(name.to_string());
            }
        }
        group.users.sort();
        group.users.dedup();
        group.updated = now;
        group.updated_by = context.name.clone();

        batch.put(&get_key(TYPE_GROUP, &[group_name]), &group)?;
        batch.commit().await?;

        info!(
            "Added {} user(s) to group: {}",
            user_names.len(),
            group_name
        );
        Ok(group)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_add_and_get_group() {
        let manager = Manager::open_test().await.unwrap();
        let context = User::system();

        let added = manager
            .add_group(&context, "Editors", "Users who can edit")
            .await
            .unwrap();
        assert_eq!(added.name, "Editors");
        assert!(added.users.is_empty());

        let fetched = manager.get_group(&context, "Editors").await.unwrap();
        assert_eq!(fetched, added);
    }

    #[tokio::test]
    async fn test_add_group_duplicate() {
        let manager = Manager::open_test().await.unwrap();
        let context = User::system();

        manager.add_group(&context, "Editors", "").await.unwrap();

        let err = manager.add_group(&context, "Editors", "").await.unwrap_err();
        assert!(err.is_duplicate());
    }

    #[tokio::test]
    async fn test_add_users_to_group() {
        let manager = Manager::open_test().await.unwrap();
        let context = User::system();

        manager
            .add_user(&context, User::with_name("alice", ""), "pw")
            .await
            .unwrap();
        manager
            .add_user(&context, User::with_name("bob", ""), "pw")
            .await
            .unwrap();
        manager.add_group(&context, "Editors", "").await.unwrap();

        let group = manager
            .add_users_to_group(&context, "Editors", &["alice", "bob"])
            .await
            .unwrap();
        assert_eq!(group.users, vec!["alice", "bob"]);

        // Membership is reflected on the user records too.
        let alice = manager.get_user(&context, "alice").await.unwrap();
        assert_eq!(alice.groups, vec!["Editors"]);
    }

    #[tokio::test]
    async fn test_add_users_to_group_missing_group() {
        let manager = Manager::open_test().await.unwrap();
        let context = User::system();

        manager
            .add_user(&context, User::with_name("alice", ""), "pw")
            .await
            .unwrap();

        let err = manager
            .add_users_to_group(&context, "Ghosts", &["alice"])
            .await
            .unwrap_err();
        assert!(err.is_not_found());

        // The group must not be created as a side effect.
        let err = manager.get_group(&context, "Ghosts").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_add_users_to_group_is_all_or_nothing() {
        let manager = Manager::open_test().await.unwrap();
        let context = User::system();

        manager
            .add_user(&context, User::with_name("alice", ""), "pw")
            .await
            .unwrap();
        manager.add_group(&context, "Editors", "").await.unwrap();

        let err = manager
            .add_users_to_group(&context, "Editors", &["alice", "nobody"])
            .await
            .unwrap_err();
        assert!(err.is_not_found());

        // Nothing was granted: neither side of the relation changed.
        let group = manager.get_group(&context, "Editors").await.unwrap();
        assert!(group.users.is_empty());
        let alice = manager.get_user(&context, "alice").await.unwrap();
        assert!(alice.groups.is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_membership_is_a_no_op() {
        let manager = Manager::open_test().await.unwrap();
        let context = User::system();

        manager
            .add_user(&context, User::with_name("alice", ""), "pw")
            .await
            .unwrap();
        manager.add_group(&context, "Editors", "").await.unwrap();

        manager
            .add_users_to_group(&context, "Editors", &["alice"])
            .await
            .unwrap();
        let group = manager
            .add_users_to_group(&context, "Editors", &["alice"])
            .await
            .unwrap();

        assert_eq!(group.users, vec!["alice"]);
        let alice = manager.get_user(&context, "alice").await.unwrap();
        assert_eq!(alice.groups, vec!["Editors"]);
    }
}
