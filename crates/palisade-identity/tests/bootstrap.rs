//! End-to-end bootstrap tests against real store directories.

use palisade_identity::{Manager, User, ADMIN_GROUP_NAME, ADMIN_USER_NAME};

#[tokio::test]
async fn bootstrap_provisions_admin_and_group() {
    let system_dir = tempfile::TempDir::new().unwrap();
    let token_dir = tempfile::TempDir::new().unwrap();

    let manager = Manager::new(system_dir.path(), token_dir.path())
        .await
        .unwrap();
    let context = User::system();

    let outcome = manager.system_bootstrap().await.unwrap();

    assert_eq!(outcome.admin.name, ADMIN_USER_NAME);
    assert_eq!(outcome.admin.description, "System administrator");
    assert!(!outcome.password.is_empty());

    let group = manager.get_group(&context, ADMIN_GROUP_NAME).await.unwrap();
    assert!(group.users.iter().any(|u| u == ADMIN_USER_NAME));

    // The generated password is the only credential for the admin account.
    manager
        .verify_user_secret(&context, ADMIN_USER_NAME, &outcome.password)
        .await
        .unwrap();

    manager.close().await.unwrap();
}

#[tokio::test]
async fn bootstrap_state_survives_reopen() {
    let system_dir = tempfile::TempDir::new().unwrap();
    let token_dir = tempfile::TempDir::new().unwrap();

    let manager = Manager::new(system_dir.path(), token_dir.path())
        .await
        .unwrap();
    manager.system_bootstrap().await.unwrap();
    manager.close().await.unwrap();

    let manager = Manager::new(system_dir.path(), token_dir.path())
        .await
        .unwrap();
    let context = User::system();

    let admin = manager.get_user(&context, ADMIN_USER_NAME).await.unwrap();
    assert_eq!(admin.groups, vec![ADMIN_GROUP_NAME]);

    // Re-running bootstrap against the reopened, populated store must fail.
    let err = manager.system_bootstrap().await.unwrap_err();
    assert!(err.is_duplicate());

    manager.close().await.unwrap();
}

#[tokio::test]
async fn bootstrap_admin_can_hold_a_session_token() {
    let system_dir = tempfile::TempDir::new().unwrap();
    let token_dir = tempfile::TempDir::new().unwrap();

    let manager = Manager::new(system_dir.path(), token_dir.path())
        .await
        .unwrap();
    let context = User::system();

    manager.system_bootstrap().await.unwrap();

    let token = manager
        .issue_token(&context, ADMIN_USER_NAME, 3600)
        .await
        .unwrap();
    let user = manager
        .get_user_for_token(&context, &token.id)
        .await
        .unwrap();
    assert_eq!(user.name, ADMIN_USER_NAME);

    manager.close().await.unwrap();
}
