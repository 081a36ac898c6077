/// Integration-level tests for the `shared` crate.
///
/// Each section tests one module; unit tests that are tightly coupled to
/// private helpers live inside the modules themselves (see the
/// `#[cfg(test)]` block in `config/config.rs`).
// ---------------------------------------------------------------------------
// Token claims + auth errors
// ---------------------------------------------------------------------------
#[cfg(test)]
mod jwt_tests {
    use http::StatusCode;
    use shared::types::*;

    fn sample_claims() -> TokenClaims {
        TokenClaims {
            sub: "testuser".to_string(),
            jti: "550e8400-e29b-41d4-a716-446655440000".to_string(),
            exp: 9_999_999_999,
            iat: 1_700_000_000,
        }
    }

    #[test]
    fn claims_serialize_and_deserialize_roundtrip() {
        let c = sample_claims();
        let json = serde_json::to_string(&c).unwrap();
        let back: TokenClaims = serde_json::from_str(&json).unwrap();
        assert_eq!(back.sub, c.sub);
        assert_eq!(back.jti, c.jti);
        assert_eq!(back.exp, c.exp);
        assert_eq!(back.iat, c.iat);
    }

    #[test]
    fn claims_json_contains_expected_keys() {
        let json = serde_json::to_value(sample_claims()).unwrap();
        for key in &["sub", "jti", "exp", "iat"] {
            assert!(json.get(key).is_some(), "missing key: {}", key);
        }
    }

    #[test]
    fn clone_produces_independent_copy() {
        let c1 = sample_claims();
        let mut c2 = c1.clone();
        c2.sub = "other".to_string();
        assert_eq!(c1.sub, "testuser");
        assert_eq!(c2.sub, "other");
    }

    #[test]
    fn jti_is_a_string_field() {
        // Ensure the token id round-trips as a string (not a number).
        let json = serde_json::to_value(sample_claims()).unwrap();
        assert!(json["jti"].is_string());
    }

    // ── AuthError status mapping ──────────────────────────────────────────────
    //
    // Missing or expired credentials → 401; a token that is present but
    // unusable → 422.  This mapping is contractual — the items and user
    // routes rely on the router applying it uniformly.

    #[test]
    fn missing_token_maps_to_401() {
        assert_eq!(AuthError::MissingToken.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn expired_token_maps_to_401() {
        assert_eq!(AuthError::Expired.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn malformed_token_maps_to_422() {
        assert_eq!(
            AuthError::MalformedToken.status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }

    #[test]
    fn bad_signature_maps_to_422() {
        assert_eq!(
            AuthError::InvalidSignature.status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }

    #[test]
    fn all_auth_errors_have_distinct_messages() {
        let variants = [
            AuthError::MissingToken,
            AuthError::MalformedToken,
            AuthError::InvalidSignature,
            AuthError::Expired,
        ];
        let messages: std::collections::HashSet<&str> =
            variants.iter().map(|v| v.to_message()).collect();
        assert_eq!(messages.len(), variants.len());
        for v in &variants {
            assert!(!v.to_message().is_empty());
        }
    }
}

// ---------------------------------------------------------------------------
// Login types
// ---------------------------------------------------------------------------

#[cfg(test)]
mod login_tests {
    use http::StatusCode;
    use shared::types::*;

    // ── LoginData deserialization ─────────────────────────────────────────────

    #[test]
    fn login_data_deserializes_both_fields() {
        let json = r#"{"username":"testuser","password":"password123"}"#;
        let d: LoginData = serde_json::from_str(json).unwrap();
        assert_eq!(d.username, "testuser");
        assert_eq!(d.password, "password123");
    }

    #[test]
    fn missing_fields_default_to_empty_strings() {
        let d: LoginData = serde_json::from_str("{}").unwrap();
        assert!(d.username.is_empty());
        assert!(d.password.is_empty());
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let json = r#"{"username":"x","password":"y","remember_me":true}"#;
        let d: LoginData = serde_json::from_str(json).unwrap();
        assert_eq!(d.username, "x");
    }

    // ── TokenResponse ─────────────────────────────────────────────────────────

    #[test]
    fn token_response_uses_access_token_key() {
        let r = TokenResponse {
            access_token: "a.b.c".to_string(),
        };
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json["access_token"], "a.b.c");
        assert_eq!(json.as_object().unwrap().len(), 1);
    }

    // ── LoginError ────────────────────────────────────────────────────────────

    #[test]
    fn invalid_credentials_maps_to_401() {
        let e = LoginError::InvalidCredentials;
        assert_eq!(e.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(e.to_message(), "Invalid username or password");
    }

    #[test]
    fn invalid_body_maps_to_400() {
        let e = LoginError::InvalidBody;
        assert_eq!(e.status(), StatusCode::BAD_REQUEST);
        assert!(!e.to_message().is_empty());
    }
}

// ---------------------------------------------------------------------------
// Item types
// ---------------------------------------------------------------------------

#[cfg(test)]
mod item_tests {
    use http::StatusCode;
    use shared::types::*;

    fn sample_item() -> Item {
        Item {
            id: 1,
            name: Some("Item1".to_string()),
            description: Some("Description of Item1".to_string()),
        }
    }

    #[test]
    fn item_roundtrips_through_json() {
        let item = sample_item();
        let json = serde_json::to_string(&item).unwrap();
        let back: Item = serde_json::from_str(&json).unwrap();
        assert_eq!(back, item);
    }

    #[test]
    fn absent_fields_serialize_as_null() {
        let item = Item {
            id: 3,
            name: None,
            description: None,
        };
        let json = serde_json::to_value(&item).unwrap();
        assert!(json["name"].is_null());
        assert!(json["description"].is_null());
    }

    #[test]
    fn create_data_accepts_empty_object() {
        let d: CreateItemData = serde_json::from_str("{}").unwrap();
        assert!(d.name.is_none());
        assert!(d.description.is_none());
    }

    #[test]
    fn create_data_accepts_partial_body() {
        let d: CreateItemData = serde_json::from_str(r#"{"name":"Lamp"}"#).unwrap();
        assert_eq!(d.name.as_deref(), Some("Lamp"));
        assert!(d.description.is_none());
    }

    #[test]
    fn update_data_keeps_absent_fields_as_none() {
        let d: UpdateItemData = serde_json::from_str(r#"{"description":"new"}"#).unwrap();
        assert!(d.name.is_none());
        assert_eq!(d.description, Some(Some("new".to_string())));
    }

    #[test]
    fn update_data_distinguishes_null_from_absent() {
        let d: UpdateItemData = serde_json::from_str(r#"{"name": null}"#).unwrap();
        assert_eq!(d.name, Some(None));
        assert!(d.description.is_none());
    }

    #[test]
    fn items_response_wraps_list_under_items_key() {
        let r = ItemsResponse {
            items: vec![sample_item()],
        };
        let json = serde_json::to_value(&r).unwrap();
        assert!(json["items"].is_array());
        assert_eq!(json["items"][0]["id"], 1);
    }

    #[test]
    fn item_response_wraps_record_under_item_key() {
        let r = ItemResponse {
            item: sample_item(),
        };
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json["item"]["name"], "Item1");
    }

    #[test]
    fn change_response_carries_msg_and_item() {
        let r = ItemChangeResponse {
            msg: "Item created".to_string(),
            item: sample_item(),
        };
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json["msg"], "Item created");
        assert_eq!(json["item"]["id"], 1);
    }

    // ── ItemError ─────────────────────────────────────────────────────────────

    #[test]
    fn not_found_maps_to_404() {
        let e = ItemError::NotFound;
        assert_eq!(e.status(), StatusCode::NOT_FOUND);
        assert_eq!(e.to_message(), "Item not found");
    }

    #[test]
    fn invalid_id_and_body_map_to_400() {
        assert_eq!(ItemError::InvalidId.status(), StatusCode::BAD_REQUEST);
        assert_eq!(ItemError::InvalidBody.status(), StatusCode::BAD_REQUEST);
    }
}

// ---------------------------------------------------------------------------
// User types
// ---------------------------------------------------------------------------

#[cfg(test)]
mod user_tests {
    use shared::types::*;

    fn sample_record() -> UserRecord {
        UserRecord {
            username: "testuser".to_string(),
            password_hash: "$argon2id$not-a-real-hash".to_string(),
            email: "testuser@example.com".to_string(),
        }
    }

    #[test]
    fn public_view_carries_username_and_email() {
        let p = sample_record().public();
        assert_eq!(p.username, "testuser");
        assert_eq!(p.email, "testuser@example.com");
    }

    #[test]
    fn public_view_has_no_credential_material() {
        let json = serde_json::to_value(sample_record().public()).unwrap();
        let obj = json.as_object().unwrap();
        assert_eq!(obj.len(), 2);
        assert!(obj.get("password_hash").is_none());
        assert!(obj.get("password").is_none());
    }

    #[test]
    fn public_view_roundtrips() {
        let p = sample_record().public();
        let json = serde_json::to_string(&p).unwrap();
        let back: PublicUser = serde_json::from_str(&json).unwrap();
        assert_eq!(back, p);
    }
}

// ---------------------------------------------------------------------------
// Msg envelope
// ---------------------------------------------------------------------------

#[cfg(test)]
mod msg_tests {
    use shared::types::*;

    #[test]
    fn msg_response_serializes_single_key() {
        let m = MsgResponse::new("Item deleted");
        let json = serde_json::to_value(&m).unwrap();
        assert_eq!(json["msg"], "Item deleted");
        assert_eq!(json.as_object().unwrap().len(), 1);
    }

    #[test]
    fn msg_response_deserializes_error_bodies() {
        let m: MsgResponse = serde_json::from_str(r#"{"msg":"Item not found"}"#).unwrap();
        assert_eq!(m.msg, "Item not found");
    }
}

// ---------------------------------------------------------------------------
// Server config
// ---------------------------------------------------------------------------

#[cfg(test)]
mod config_tests {
    use shared::types::server_config::*;

    #[test]
    fn empty_toml_yields_full_defaults() {
        let cfg: AppConfig = toml::from_str("").unwrap();
        assert_eq!(cfg.server.bind, "127.0.0.1");
        assert_eq!(cfg.server.port, 5000);
        assert_eq!(cfg.server.request_timeout_secs, 30);
        assert_eq!(cfg.auth.token_expiry_minutes, 60);
        assert!(cfg.auth.jwt_secret.is_none());
    }

    #[test]
    fn addr_joins_bind_and_port() {
        let cfg = ServerConfig {
            bind: "0.0.0.0".to_string(),
            port: 5000,
            request_timeout_secs: 30,
        };
        assert_eq!(cfg.addr(), "0.0.0.0:5000");
    }

    #[test]
    fn token_expiry_secs_converts_minutes() {
        let auth = AuthConfig {
            token_expiry_minutes: 60,
            jwt_secret: None,
        };
        assert_eq!(auth.token_expiry_secs(), 3600);
    }

    #[test]
    fn config_field_resolves_when_env_is_unset() {
        let auth = AuthConfig {
            token_expiry_minutes: 60,
            jwt_secret: Some("config-file-secret-0123456789-0123456789".to_string()),
        };
        assert_eq!(
            auth.resolved_jwt_secret().as_deref(),
            Some("config-file-secret-0123456789-0123456789")
        );
    }

    #[test]
    fn empty_config_secret_resolves_to_none() {
        let auth = AuthConfig {
            token_expiry_minutes: 60,
            jwt_secret: Some(String::new()),
        };
        assert!(auth.resolved_jwt_secret().is_none());
    }

    #[test]
    fn sections_override_defaults() {
        let cfg: AppConfig = toml::from_str(
            r#"
[server]
port = 8080

[auth]
token_expiry_minutes = 5
"#,
        )
        .unwrap();
        assert_eq!(cfg.server.port, 8080);
        // Unset fields inside a present section still default.
        assert_eq!(cfg.server.bind, "127.0.0.1");
        assert_eq!(cfg.auth.token_expiry_minutes, 5);
    }
}
