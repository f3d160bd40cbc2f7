//! Users, groups and roles through the access-control pages.

use crate::common::builders::UserBuilder;
use crate::common::fixtures::seeded_console;
use console_acceptance::access_control::{
    AccessControl, CHOOSE_GROUP, CHOOSE_ROLE, Group, Role, User, VmRestriction,
};
use console_acceptance::naming::random_alphanumeric;

#[tokio::test]
async fn test_user_crud() {
    let console = seeded_console().await;
    let user = UserBuilder::new().build();
    console.create(&user).await.unwrap();

    let mut edited = user.clone();
    edited.username = format!("{}edited", user.username);
    console.update(&user.userid, &edited).await.unwrap();

    let stored: User = console.get(&user.userid).await.unwrap().unwrap();
    assert_eq!(stored.username, edited.username);

    console.delete::<User>(&user.userid).await.unwrap();
    assert!(!console.exists::<User>(&user.userid).await.unwrap());
}

#[tokio::test]
async fn test_user_copy() {
    let console = seeded_console().await;
    let user = UserBuilder::new().tags("001", "Cost Center 001").build();
    console.create(&user).await.unwrap();

    let copy = console.copy_user(&user.userid).await.unwrap();
    assert_eq!(copy.username, format!("Copy of {}", user.username));
    assert_eq!(copy.userid, format!("{}_copy", user.userid));
    assert_eq!(copy.group, user.group);
    assert_eq!(copy.cost_center.as_deref(), Some("001"));

    let stored: User = console.get(&copy.userid).await.unwrap().unwrap();
    assert_eq!(stored, copy);
}

#[tokio::test]
async fn test_userid_required() {
    let console = seeded_console().await;
    let user = UserBuilder::new().userid("").build();
    crate::assert_flash!(console.create(&user).await, "Userid can't be blank");
}

#[tokio::test]
async fn test_user_name_required() {
    let console = seeded_console().await;
    let user = UserBuilder::new().username("").build();
    crate::assert_flash!(console.create(&user).await, "Name can't be blank");
}

#[tokio::test]
async fn test_user_password_required() {
    let console = seeded_console().await;
    let user = UserBuilder::new().passwords("", "").build();
    crate::assert_flash!(console.create(&user).await, "Password_digest can't be blank");
}

#[tokio::test]
async fn test_user_password_mismatch() {
    let console = seeded_console().await;
    let user = UserBuilder::new().passwords("redhat", "redhat1").build();
    crate::assert_flash!(
        console.create(&user).await,
        "Password and Verify Password fields do not match"
    );
}

#[tokio::test]
async fn test_user_group_required() {
    let console = seeded_console().await;
    let user = UserBuilder::new().group(Some(CHOOSE_GROUP)).build();
    crate::assert_flash!(
        console.create(&user).await,
        "A User must be assigned to a Group"
    );
    let user = UserBuilder::new().group(None).build();
    crate::assert_flash!(
        console.create(&user).await,
        "A User must be assigned to a Group"
    );
}

#[tokio::test]
async fn test_user_email_error() {
    let console = seeded_console().await;
    let user = UserBuilder::new().email(Some("xyzdhat.com")).build();
    crate::assert_flash!(
        console.create(&user).await,
        "Email must be a valid email address"
    );

    // Email is optional
    let user = UserBuilder::new().email(None).build();
    console.create(&user).await.unwrap();
}

#[tokio::test]
async fn test_duplicate_userid() {
    let console = seeded_console().await;
    let user = UserBuilder::new().build();
    console.create(&user).await.unwrap();
    crate::assert_flash!(console.create(&user).await, "Userid has already been taken");
}

#[tokio::test]
async fn test_group_crud() {
    let console = seeded_console().await;
    let description = format!("grp{}", random_alphanumeric(4));
    let group = Group::new(&description, "EvmRole-approver");
    console.create(&group).await.unwrap();

    let edited = Group::new(format!("{}edited", description), "EvmRole-approver");
    console.update(&description, &edited).await.unwrap();
    assert!(!console.exists::<Group>(&description).await.unwrap());

    console.delete::<Group>(&edited.description).await.unwrap();
    assert!(!console.exists::<Group>(&edited.description).await.unwrap());
}

#[tokio::test]
async fn test_group_validation() {
    let console = seeded_console().await;
    crate::assert_flash!(
        console.create(&Group::new("", "EvmRole-approver")).await,
        "Description can't be blank"
    );
    crate::assert_flash!(
        console.create(&Group::new("grp1", CHOOSE_ROLE)).await,
        "A Group must have a Role assigned"
    );
    crate::assert_flash!(
        console.create(&Group::new("EvmGroup-user", "EvmRole-user")).await,
        "Description has already been taken"
    );
}

#[tokio::test]
async fn test_group_with_members_cannot_be_deleted() {
    let console = seeded_console().await;
    console
        .create(&Group::new("grp1", "EvmRole-user"))
        .await
        .unwrap();
    let member = UserBuilder::new().group(Some("grp1")).build();
    console.create(&member).await.unwrap();

    crate::assert_error_message_contains!(
        console.delete::<Group>("grp1").await,
        "is still in use by User"
    );

    // Renaming the group carries its members along
    console
        .update("grp1", &Group::new("grp2", "EvmRole-user"))
        .await
        .unwrap();
    let stored: User = console.get(&member.userid).await.unwrap().unwrap();
    assert_eq!(stored.group.as_deref(), Some("grp2"));
}

#[tokio::test]
async fn test_role_crud() {
    let console = seeded_console().await;
    let role = Role::new("rol1", VmRestriction::OnlyUserOwned);
    console.create(&role).await.unwrap();

    let edited = Role::new("rol1edited", VmRestriction::OnlyUserOrGroupOwned);
    console.update("rol1", &edited).await.unwrap();
    let stored: Role = console.get("rol1edited").await.unwrap().unwrap();
    assert_eq!(stored.vm_restriction, VmRestriction::OnlyUserOrGroupOwned);

    console.delete::<Role>("rol1edited").await.unwrap();
}

#[tokio::test]
async fn test_role_validation() {
    let console = seeded_console().await;
    crate::assert_flash!(
        console.create(&Role::new("", VmRestriction::None)).await,
        "Name can't be blank"
    );
    crate::assert_flash!(
        console.create(&Role::new("EvmRole-user", VmRestriction::None)).await,
        "Name has already been taken"
    );
}

#[tokio::test]
async fn test_assign_user_to_new_role() {
    let console = seeded_console().await;
    console
        .create(&Role::new("rol1", VmRestriction::None))
        .await
        .unwrap();
    console.create(&Group::new("grp1", "rol1")).await.unwrap();
    let user = UserBuilder::new().group(Some("grp1")).build();
    console.create(&user).await.unwrap();

    crate::assert_error_message_contains!(
        console.delete::<Role>("rol1").await,
        "Role 'rol1' is still in use by Group 'grp1'"
    );
}
