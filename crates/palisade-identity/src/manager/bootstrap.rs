//! One-shot system bootstrap: provisions the initial administrator.

use crate::{
    credentials,
    errors::ManagerError,
    types::User,
};
use thiserror::Error;
use tracing::{debug, info};

use super::Manager;

/// Name of the administrator account created by bootstrap
pub const ADMIN_USER_NAME: &str = "admin";

/// Name of the administrators group created by bootstrap
pub const ADMIN_GROUP_NAME: &str = "Administrators";

/// Successful bootstrap result: the fully-populated admin user and the
/// generated plaintext password, which exists nowhere else.
#[derive(Debug, Clone)]
pub struct BootstrapOutcome {
    pub admin: User,
    pub password: String,
}

/// A bootstrap step failed.
///
/// Carries whatever was obtained before the failing step: the best-effort
/// admin user (the zero value if user creation itself failed) and the
/// generated password. Bootstrap performs no cleanup, so the caller must
/// treat the system as partially initialized and remediate out of band.
#[derive(Debug, Error)]
#[error("{step}: {source}")]
pub struct BootstrapError {
    pub step: &'static str,
    pub admin: User,
    pub password: String,
    #[source]
    pub source: ManagerError,
}

impl BootstrapError {
    /// True if the failing step hit a duplicate entity, the signature of a
    /// bootstrap re-run against an already-populated store.
    pub fn is_duplicate(&self) -> bool {
        self.source.is_duplicate()
    }
}

impl Manager {
    /// Run the one-shot system bootstrap against an empty system store.
    ///
    /// Strictly ordered: generate the admin password, create the admin
    /// user, create the Administrators group, attach the admin to it, then
    /// re-fetch the authoritative admin record. The first failing step
    /// aborts the sequence with no rollback of earlier steps; re-running
    /// against a populated store fails with a duplicate-entity error.
    pub async fn system_bootstrap(&self) -> Result<BootstrapOutcome, BootstrapError> {
        let context = User::system();
        let password = credentials::generate_secret();

        info!("Starting system bootstrap");

        let admin = self
            .add_user(
                &context,
                User::with_name(ADMIN_USER_NAME, "System administrator"),
                &password,
            )
            .await
            .map_err(|e| BootstrapError {
                step: "Problem adding admin user",
                admin: User::default(),
                password: password.clone(),
                source: e,
            })?;

        let group = self
            .add_group(
                &context,
                ADMIN_GROUP_NAME,
                "Users who can fully administer the system",
            )
            .await
            .map_err(|e| BootstrapError {
                step: "Problem creating the Administrators group",
                admin: admin.clone(),
                password: password.clone(),
                source: e,
            })?;

        self.add_users_to_group(&context, &group.name, &[&admin.name])
            .await
            .map_err(|e| BootstrapError {
                step: "Problem adding the admin user to the Administrators group",
                admin: admin.clone(),
                password: password.clone(),
                source: e,
            })?;

        let admin = self
            .get_user(&context, ADMIN_USER_NAME)
            .await
            .map_err(|e| BootstrapError {
                step: "Problem getting the updated admin user",
                admin,
                password: password.clone(),
                source: e,
            })?;

        // Not yet implemented: the remaining provisioning stages create the
        // system resource, the initial policies, the administrative role
        // binding those policies, and attach that role to the
        // Administrators group. Future stages slot in here, following the
        // same abort-on-first-error discipline.
        debug!("Skipping unimplemented bootstrap stages: resource, policies, roles");

        info!("System bootstrap complete");
        Ok(BootstrapOutcome { admin, password })
    }
}
