//! Account registration.
//!
//! The run starts with an admin account (foundation type) whose token doubles
//! as the fallback credential, then donor accounts through `POST /users` and
//! foundation accounts through `POST /register`. Every account logs in right
//! after registering so later phases find its token cached.

use crate::{
    api::{ApiClient, Auth},
    core::{
        context::{SeedContext, store_record},
        pools,
    },
    errors::Result,
    models::{EntityId, UserRecord, UserType},
};
use serde_json::{Value, json};
use tracing::info;

/// Phase titles, as announced in the run output.
pub const REGULAR_PHASE: &str = "Creating regular users";
pub const FOUNDATION_PHASE: &str = "Creating foundation users";

/// Endpoint an account registers through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationRoute {
    /// `POST /users` - the generic user resource
    Users,
    /// `POST /register` - public sign-up
    Register,
}

impl RegistrationRoute {
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Users => "/users",
            Self::Register => "/register",
        }
    }
}

/// Registration payload for one account.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
    pub user_type: UserType,
}

impl NewUser {
    #[must_use]
    pub fn payload(&self) -> Value {
        json!({
            "name": self.name,
            "email": self.email,
            "password": self.password,
            "user_type": self.user_type,
        })
    }

    fn into_record(self, id: EntityId) -> UserRecord {
        UserRecord {
            id,
            name: self.name,
            email: self.email,
            password: self.password,
            user_type: self.user_type,
        }
    }
}

/// Submits a registration and returns the record for the new account.
///
/// # Errors
/// Transport failure, a non-2xx status, or a response without `id`.
pub async fn register(
    client: &ApiClient,
    route: RegistrationRoute,
    new_user: NewUser,
) -> Result<UserRecord> {
    let id = client
        .create(route.path(), &Auth::Anonymous, &new_user.payload())
        .await?;
    Ok(new_user.into_record(id))
}

/// Registers an account, stores it, and logs in as it.
///
/// Returns the stored record, or `None` when registration failed. A failed
/// login keeps the account; later phases retry lazily.
pub async fn register_and_login(
    ctx: &mut SeedContext,
    route: RegistrationRoute,
    new_user: NewUser,
) -> Option<UserRecord> {
    let kind = match new_user.user_type {
        UserType::User => "User",
        UserType::Foundation => "Foundation user",
    };

    let user = match register(&ctx.client, route, new_user).await {
        Ok(user) => user,
        Err(e) => {
            ctx.report
                .record_error(&format!("Error creating {}", kind.to_lowercase()), &e);
            return None;
        }
    };

    let message = format!("{kind} created: {}", user.name);
    if !store_record(&mut ctx.users, &mut ctx.report, user.clone(), message) {
        return None;
    }

    if let Some(token) = ctx.login(&user.email, &user.password).await {
        ctx.session.store(user.id.clone(), token);
    }
    Some(user)
}

/// Registers the admin account and caches its token as the fallback.
///
/// When the account already exists from an earlier run the registration is
/// reported as such, and the token is still fetched so the fallback works.
pub async fn seed_admin(ctx: &mut SeedContext) -> Option<UserRecord> {
    let account = ctx.plan.admin.clone();
    let new_user = NewUser {
        name: account.name,
        email: account.email,
        password: ctx.password.clone(),
        user_type: UserType::Foundation,
    };

    match register(&ctx.client, RegistrationRoute::Users, new_user.clone()).await {
        Ok(admin) => {
            let message = format!("Admin user created: {}", admin.email);
            if !store_record(&mut ctx.users, &mut ctx.report, admin.clone(), message) {
                return None;
            }
            if let Some(token) = ctx.login(&admin.email, &admin.password).await {
                ctx.session.store(admin.id.clone(), token.clone());
                ctx.session.set_admin_token(token);
            }
            Some(admin)
        }
        Err(e) => {
            ctx.report.record_error("Error creating admin user", &e);
            if e.is_conflict()
                && let Some(token) = ctx.login(&new_user.email, &new_user.password).await
            {
                info!(email = %new_user.email, "Using existing admin account as fallback");
                ctx.session.set_admin_token(token);
            }
            None
        }
    }
}

/// Admin, then donor accounts, then foundation accounts.
pub async fn seed_users(ctx: &mut SeedContext) {
    ctx.report.begin_phase(REGULAR_PHASE);
    seed_admin(ctx).await;

    for _ in 0..ctx.plan.volumes.regular_users {
        let person = pools::person();
        let new_user = NewUser {
            name: person.full_name(),
            email: person.email,
            password: ctx.password.clone(),
            user_type: UserType::User,
        };
        register_and_login(ctx, RegistrationRoute::Users, new_user).await;
    }

    ctx.report.begin_phase(FOUNDATION_PHASE);
    for _ in 0..ctx.plan.volumes.foundation_users {
        let new_user = NewUser {
            name: pools::foundation_name(&mut ctx.rng),
            email: pools::company_email(),
            password: ctx.password.clone(),
            user_type: UserType::Foundation,
        };
        register_and_login(ctx, RegistrationRoute::Register, new_user).await;
    }
}
