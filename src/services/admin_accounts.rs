use mongodb::bson::{self, doc, oid::ObjectId, Document};
use thiserror::Error;

use crate::db::{DocumentStore, StoreError};
use crate::models::admin::Admin;
use crate::models::schema::{Schema, ValidationError};
use crate::services::resources::by_id;

#[derive(Debug, Error)]
pub enum AdminAccountError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("failed to hash password: {0}")]
    Hash(#[from] bcrypt::BcryptError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Debug, PartialEq, Eq)]
pub enum CreateOutcome {
    Created(ObjectId),
    AlreadyExists,
}

pub async fn find_by_email(
    store: &dyn DocumentStore,
    email: &str,
) -> Result<Option<Admin>, StoreError> {
    find(store, doc! { "email": email }).await
}

pub async fn find_by_id(store: &dyn DocumentStore, id: ObjectId) -> Result<Option<Admin>, StoreError> {
    find(store, by_id(id)).await
}

async fn find(store: &dyn DocumentStore, filter: Document) -> Result<Option<Admin>, StoreError> {
    match store.find_one(Admin::COLLECTION, filter).await? {
        Some(doc) => Ok(Some(bson::from_document(doc)?)),
        None => Ok(None),
    }
}

/// Checks login passwords against stored hashes.
///
/// An unknown admin is still run through bcrypt against a dummy hash made at
/// the same cost as real accounts, so both failure paths cost the same.
pub struct PasswordVerifier {
    dummy_hash: Option<String>,
}

impl PasswordVerifier {
    pub fn new(cost: u32) -> Self {
        let dummy_hash = bcrypt::hash("not-a-real-password", cost)
            .map_err(|err| log::error!("Failed to prepare dummy password hash: {}", err))
            .ok();
        PasswordVerifier { dummy_hash }
    }

    pub fn verify(&self, admin: Option<&Admin>, password: &str) -> bool {
        match admin {
            Some(admin) => bcrypt::verify(password, &admin.mot_de_passe).unwrap_or(false),
            None => {
                if let Some(hash) = &self.dummy_hash {
                    let _ = bcrypt::verify(password, hash);
                }
                false
            }
        }
    }
}

/// Validates, hashes and stores a new admin unless the email is taken.
pub async fn create_admin(
    store: &dyn DocumentStore,
    email: &str,
    password: &str,
    cost: u32,
) -> Result<CreateOutcome, AdminAccountError> {
    let mut admin = Admin::load(doc! { "email": email, "mot_de_passe": password })?;

    if find_by_email(store, &admin.email).await?.is_some() {
        return Ok(CreateOutcome::AlreadyExists);
    }

    admin.mot_de_passe = bcrypt::hash(&admin.mot_de_passe, cost)?;
    let doc = bson::to_document(&admin).map_err(StoreError::from)?;
    let id = store.insert_one(Admin::COLLECTION, doc).await?;
    log::info!("Created admin {}", admin.email);
    Ok(CreateOutcome::Created(id))
}

/// Returns whether an admin was removed.
pub async fn delete_admin(store: &dyn DocumentStore, email: &str) -> Result<bool, StoreError> {
    let deleted = store
        .delete_one(Admin::COLLECTION, doc! { "email": email })
        .await?;
    Ok(deleted > 0)
}
