use mongodb::bson::{doc, DateTime as BsonDateTime};
use serde::{Deserialize, Serialize};

use crate::database::MongoDB;
use crate::models::User;
use crate::services::token_service::TokenService;
use crate::utils::crypto;
use crate::utils::error::ApiError;

// Request/Response structures
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct RegisterRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    #[serde(rename = "confirmpassword")]
    pub confirm_password: Option<String>,
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct MessageResponse {
    pub msg: String,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct LoginResponse {
    pub msg: String,
    pub token: String,
}

fn require<'a>(field: &'a Option<String>, msg: &str) -> Result<&'a str, ApiError> {
    field
        .as_deref()
        .filter(|value| !value.is_empty())
        .ok_or_else(|| ApiError::Validation(msg.to_string()))
}

/// Validation order is fixed; the first failure wins.
fn validate_registration(request: &RegisterRequest) -> Result<(&str, &str, &str), ApiError> {
    let name = require(&request.name, "name is required")?;
    let email = require(&request.email, "email is required")?;
    let password = require(&request.password, "password is required")?;

    if request.confirm_password.as_deref() != Some(password) {
        return Err(ApiError::Validation("passwords do not match".to_string()));
    }

    Ok((name, email, password))
}

// User registration
pub async fn register(db: &MongoDB, request: &RegisterRequest) -> Result<MessageResponse, ApiError> {
    let (name, email, password) = validate_registration(request)?;

    // Check if user already exists
    let existing = db
        .users()
        .find_one(doc! { "email": email })
        .await
        .map_err(|e| {
            log::error!("❌ Database error checking email {}: {}", email, e);
            ApiError::Server(format!("database error: {}", e))
        })?;

    if existing.is_some() {
        return Err(ApiError::Validation(
            "please use a different email".to_string(),
        ));
    }

    let password_hash = crypto::hash_password(password).map_err(|e| {
        log::error!("❌ Failed to hash password: {}", e);
        ApiError::Server(format!("failed to hash password: {}", e))
    })?;

    let new_user = User {
        id: None,
        name: name.to_string(),
        email: email.to_string(),
        password: password_hash,
        created_at: Some(BsonDateTime::now()),
    };

    db.users().insert_one(&new_user).await.map_err(|e| {
        // Two registrations racing on the same email both pass the pre-check;
        // the unique index stops the second insert here.
        if is_duplicate_key(&e) {
            ApiError::Validation("please use a different email".to_string())
        } else {
            log::error!("❌ Failed to create user {}: {}", email, e);
            ApiError::Server(format!("failed to create user: {}", e))
        }
    })?;

    log::info!("✅ User registered successfully: {}", email);

    Ok(MessageResponse {
        msg: "user created successfully".to_string(),
    })
}

fn is_duplicate_key(error: &mongodb::error::Error) -> bool {
    use mongodb::error::{ErrorKind, WriteFailure};

    matches!(
        *error.kind,
        ErrorKind::Write(WriteFailure::WriteError(ref write)) if write.code == 11000
    )
}

// User login
pub async fn login(
    db: &MongoDB,
    tokens: &TokenService,
    request: &LoginRequest,
) -> Result<LoginResponse, ApiError> {
    let email = require(&request.email, "email is required")?;
    let password = require(&request.password, "password is required")?;

    let user = db
        .users()
        .find_one(doc! { "email": email })
        .await
        .map_err(|e| {
            log::error!("❌ Database error looking up {}: {}", email, e);
            ApiError::Server(format!("database error: {}", e))
        })?
        .ok_or_else(|| ApiError::NotFound("user not found".to_string()))?;

    let valid = crypto::verify_password(password, &user.password).map_err(|e| {
        log::error!("❌ Password verification error for {}: {}", email, e);
        ApiError::Server(format!("password verification error: {}", e))
    })?;

    if !valid {
        return Err(ApiError::Validation("invalid password".to_string()));
    }

    let user_id = user
        .id
        .ok_or_else(|| ApiError::Server("stored user has no id".to_string()))?
        .to_hex();
    let token = tokens.issue(&user_id)?;

    Ok(LoginResponse {
        msg: "authentication successful".to_string(),
        token,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(
        name: Option<&str>,
        email: Option<&str>,
        password: Option<&str>,
        confirm: Option<&str>,
    ) -> RegisterRequest {
        RegisterRequest {
            name: name.map(String::from),
            email: email.map(String::from),
            password: password.map(String::from),
            confirm_password: confirm.map(String::from),
        }
    }

    fn validation_message(error: ApiError) -> String {
        match error {
            ApiError::Validation(msg) => msg,
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_registration_validation_order() {
        let error = validate_registration(&request(None, None, None, None)).unwrap_err();
        assert_eq!(validation_message(error), "name is required");

        let error = validate_registration(&request(Some("Ana"), None, None, None)).unwrap_err();
        assert_eq!(validation_message(error), "email is required");

        let error =
            validate_registration(&request(Some("Ana"), Some("ana@x.com"), None, None)).unwrap_err();
        assert_eq!(validation_message(error), "password is required");

        let error = validate_registration(&request(
            Some("Ana"),
            Some("ana@x.com"),
            Some("secret123"),
            Some("secret124"),
        ))
        .unwrap_err();
        assert_eq!(validation_message(error), "passwords do not match");
    }

    #[test]
    fn test_empty_string_counts_as_missing() {
        let error =
            validate_registration(&request(Some(""), Some("ana@x.com"), Some("x"), Some("x")))
                .unwrap_err();
        assert_eq!(validation_message(error), "name is required");
    }

    #[test]
    fn test_missing_confirmation_is_a_mismatch() {
        let error = validate_registration(&request(
            Some("Ana"),
            Some("ana@x.com"),
            Some("secret123"),
            None,
        ))
        .unwrap_err();
        assert_eq!(validation_message(error), "passwords do not match");
    }

    #[test]
    fn test_valid_registration_passes() {
        let valid_request = request(
            Some("Ana"),
            Some("ana@x.com"),
            Some("secret123"),
            Some("secret123"),
        );
        let (name, email, password) = validate_registration(&valid_request).unwrap();
        assert_eq!((name, email, password), ("Ana", "ana@x.com", "secret123"));
    }

    #[test]
    fn test_login_requires_email_then_password() {
        let error = require(&None, "email is required").unwrap_err();
        assert_eq!(validation_message(error), "email is required");

        let error = require(&Some(String::new()), "password is required").unwrap_err();
        assert_eq!(validation_message(error), "password is required");
    }

    #[tokio::test]
    #[ignore] // Requires MongoDB to be running
    async fn test_register_login_profile_roundtrip() {
        dotenv::dotenv().ok();

        let config = crate::config::Config::from_env().expect("environment not configured");
        let db = MongoDB::new(&config).await.expect("MongoDB connection failed");
        let tokens = TokenService::new(&config.jwt_secret);

        let email = format!("ana+{}@x.com", BsonDateTime::now().timestamp_millis());
        let registration = request(Some("Ana"), Some(&email), Some("secret123"), Some("secret123"));
        register(&db, &registration).await.unwrap();

        // Second registration with the same email must be rejected
        let duplicate = register(&db, &registration).await.unwrap_err();
        assert_eq!(validation_message(duplicate), "please use a different email");

        let response = login(
            &db,
            &tokens,
            &LoginRequest {
                email: Some(email.clone()),
                password: Some("secret123".to_string()),
            },
        )
        .await
        .unwrap();

        let claims = tokens.verify(&response.token).unwrap();
        let user = crate::services::user_service::get_user(&db, &claims.sub)
            .await
            .unwrap();
        assert_eq!(user.name, "Ana");
        assert_eq!(user.email, email);

        // Wrong password issues no token
        let error = login(
            &db,
            &tokens,
            &LoginRequest {
                email: Some(email),
                password: Some("wrong".to_string()),
            },
        )
        .await
        .unwrap_err();
        assert_eq!(validation_message(error), "invalid password");
    }
}
