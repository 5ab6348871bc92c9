// ABOUTME: Demo account provisioning for local try-outs
// ABOUTME: Creates the well-known demo user unless it already exists

use realworlded_core::constants::{
    DEMO_USER_EMAIL, DEMO_USER_FULL_NAME, DEMO_USER_PASSWORD, DEMO_USER_USERNAME,
};
use realworlded_security::hash_password;
use realworlded_storage::{DbState, NewUser, PublicUser};
use tracing::info;

#[derive(Debug)]
pub enum DemoUser {
    Created(PublicUser),
    AlreadyExists,
}

pub async fn create_demo_user(db: &DbState) -> anyhow::Result<DemoUser> {
    if db.user_storage.email_exists(DEMO_USER_EMAIL).await? {
        return Ok(DemoUser::AlreadyExists);
    }

    let hashed_password = hash_password(DEMO_USER_PASSWORD)?;
    let user = db
        .user_storage
        .create_user(NewUser {
            email: DEMO_USER_EMAIL.to_string(),
            username: DEMO_USER_USERNAME.to_string(),
            hashed_password,
            full_name: Some(DEMO_USER_FULL_NAME.to_string()),
        })
        .await?;

    info!("Created demo user {}", user.id);
    Ok(DemoUser::Created(user.into()))
}
