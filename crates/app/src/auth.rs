//! Authentication service
//!
//! The user directory operations: demo accounts are checked first, then the
//! registered collection. Registered credentials are stored as argon2 PHC
//! strings and verified on login; nothing plaintext is ever persisted.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use tracing::{info, instrument};
use uuid::{uuid, Uuid};

use floodsafe_core::{Error, NewUser, ProfilePatch, Result, Role, SessionUser, UserRecord};

use crate::state::AppState;
use crate::validation;

/// A fixed demo credential set, living outside the registered collection
///
/// Checked before the store at login and never consulted for registration
/// conflicts, so a registered account may reuse a demo username or email;
/// the demo account still wins at login because it is checked first.
struct DemoAccount {
    id: Uuid,
    username: &'static str,
    email: &'static str,
    password: &'static str,
    role: Role,
}

const DEMO_ACCOUNTS: &[DemoAccount] = &[
    DemoAccount {
        id: uuid!("00000000-0000-0000-0000-000000000001"),
        username: "citizen1",
        email: "citizen@floodsafe.com",
        password: "password123",
        role: Role::Citizen,
    },
    DemoAccount {
        id: uuid!("00000000-0000-0000-0000-000000000002"),
        username: "ngo1",
        email: "ngo@floodsafe.com",
        password: "password123",
        role: Role::Ngo,
    },
];

impl DemoAccount {
    fn session_user(&self) -> SessionUser {
        SessionUser {
            user_id: self.id,
            username: self.username.to_string(),
            email: self.email.to_string(),
            role: self.role,
            full_name: None,
            phone: None,
        }
    }
}

/// Sign in with username (or email, for registered accounts), password, and
/// the role picked on the role-selection screen
///
/// `Ok(None)` means no account matched; the UI maps that to its own
/// "invalid credentials" message. On success the session projection is
/// persisted and mirrored into the context.
#[instrument(skip(state, identifier, password))]
pub fn login(
    state: &AppState,
    identifier: &str,
    password: &str,
    role: Role,
) -> Result<Option<SessionUser>> {
    // Demo accounts match on exact username only
    if let Some(account) = DEMO_ACCOUNTS
        .iter()
        .find(|a| a.username == identifier && a.password == password && a.role == role)
    {
        let session = account.session_user();
        state.db.lock().unwrap().session().save(&session)?;
        state.set_user(session.clone());
        info!(username = %session.username, "Demo account signed in");
        return Ok(Some(session));
    }

    let db = state.db.lock().unwrap();
    let Some(user) = db.users().find_by_identifier(identifier, role)? else {
        return Ok(None);
    };

    if !verify_password(password, &user.password_hash) {
        return Ok(None);
    }

    let session = user.session_user();
    db.session().save(&session)?;
    drop(db);

    state.set_user(session.clone());
    info!(username = %session.username, role = %session.role, "Signed in");
    Ok(Some(session))
}

/// Register a new account and sign it in
#[instrument(skip(state, profile), fields(username = %profile.username, role = %profile.role))]
pub fn register(state: &AppState, profile: NewUser) -> Result<SessionUser> {
    validation::validate_registration(&profile)?;

    let db = state.db.lock().unwrap();

    // Conflicts are checked against registered accounts only; demo
    // credentials live outside the store
    if db.users().identifier_taken(&profile.username, &profile.email)? {
        return Err(Error::Conflict("User already exists".to_string()));
    }

    let password_hash = hash_password(&profile.password)?;
    let record = UserRecord::from_registration(profile, password_hash);
    db.users().create(&record)?;

    let session = record.session_user();
    db.session().save(&session)?;
    drop(db);

    state.set_user(session.clone());
    info!(username = %session.username, role = %session.role, "Account registered");
    Ok(session)
}

/// The persisted session projection, if anyone is signed in
pub fn current_session(state: &AppState) -> Result<Option<SessionUser>> {
    state.db.lock().unwrap().session().load()
}

/// Sign out; safe to call when nobody is signed in
#[instrument(skip(state))]
pub fn logout(state: &AppState) -> Result<()> {
    state.db.lock().unwrap().session().clear()?;
    state.clear();
    Ok(())
}

/// Merge profile changes into the signed-in account
///
/// Patches the registered record and the persisted projection. Demo accounts
/// have no registered record; their patch reaches only the projection.
#[instrument(skip(state, patch))]
pub fn update_profile(state: &AppState, patch: ProfilePatch) -> Result<SessionUser> {
    let db = state.db.lock().unwrap();

    let Some(mut session) = db.session().load()? else {
        return Err(Error::NoActiveSession);
    };

    db.users().apply_patch(session.user_id, &patch)?;

    session.apply(&patch);
    db.session().save(&session)?;
    drop(db);

    state.set_user(session.clone());
    Ok(session)
}

fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| Error::PasswordHash(e.to_string()))
}

fn verify_password(password: &str, stored_hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(stored_hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}
