use mongodb::bson::{doc, oid::ObjectId};

use crate::database::MongoDB;
use crate::models::UserInfo;
use crate::utils::error::ApiError;

/// An id that does not parse as an ObjectId cannot name a stored user, so it
/// gets the same answer as a missing one.
fn parse_user_id(id: &str) -> Result<ObjectId, ApiError> {
    ObjectId::parse_str(id).map_err(|_| ApiError::NotFound("user not found".to_string()))
}

/// Profile lookup by id. The password hash is projected out by mapping the
/// document to `UserInfo`.
pub async fn get_user(db: &MongoDB, id: &str) -> Result<UserInfo, ApiError> {
    let object_id = parse_user_id(id)?;

    let user = db
        .users()
        .find_one(doc! { "_id": object_id })
        .await
        .map_err(|e| {
            log::error!("❌ Database error looking up user {}: {}", id, e);
            ApiError::Server(format!("database error: {}", e))
        })?
        .ok_or_else(|| ApiError::NotFound("user not found".to_string()))?;

    Ok(UserInfo::from(user))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_id_maps_to_not_found() {
        assert!(matches!(
            parse_user_id("not-an-object-id"),
            Err(ApiError::NotFound(_))
        ));
    }

    #[test]
    fn test_valid_hex_id_parses() {
        let oid = ObjectId::new();
        assert_eq!(parse_user_id(&oid.to_hex()).unwrap(), oid);
    }
}
