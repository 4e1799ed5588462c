use actix_web::cookie::{Cookie, SameSite};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::config::AppConfig;

// JWT Claims 结构体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,        // Subject (user ID)
    pub role: String,       // 用户角色
    pub token_type: String, // token类型: "access" 或 "refresh"
    pub exp: usize,         // Expiration time (时间戳)
    pub iat: usize,         // Issued at (签发时间)
}

// Token 响应结构体
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// JWT 工具，持有从配置注入的密钥与过期时间
///
/// 启动时由 main 构造并通过 `web::Data` 注入，避免任何全局可变状态。
#[derive(Clone)]
pub struct JwtUtils {
    secret: String,
    access_token_expiry: i64,  // 分钟
    refresh_token_expiry: i64, // 天
    secure_cookies: bool,
}

impl JwtUtils {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            secret: config.jwt.secret.clone(),
            access_token_expiry: config.jwt.access_token_expiry,
            refresh_token_expiry: config.jwt.refresh_token_expiry,
            secure_cookies: config.is_production(),
        }
    }

    pub fn access_token_expiry_seconds(&self) -> i64 {
        self.access_token_expiry * 60
    }

    // 生成 Access Token
    pub fn generate_access_token(
        &self,
        user_id: i64,
        role: &str,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        self.generate_token_with_expiry(
            user_id,
            role,
            "access",
            chrono::Duration::minutes(self.access_token_expiry),
        )
    }

    // 生成 Refresh Token
    pub fn generate_refresh_token(
        &self,
        user_id: i64,
        role: &str,
        token_expiry: Option<chrono::Duration>,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        match token_expiry {
            Some(expiry) => self.generate_token_with_expiry(user_id, role, "refresh", expiry),
            None => self.generate_token_with_expiry(
                user_id,
                role,
                "refresh",
                chrono::Duration::days(self.refresh_token_expiry),
            ),
        }
    }

    // 生成带自定义过期时间的 Token
    pub fn generate_token_with_expiry(
        &self,
        user_id: i64,
        role: &str,
        token_type: &str,
        expiry_duration: chrono::Duration,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let now = chrono::Utc::now();
        let expiration = now + expiry_duration;

        let claims = Claims {
            sub: user_id.to_string(),
            role: role.to_string(),
            token_type: token_type.to_string(),
            exp: expiration.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        let encoding_key = EncodingKey::from_secret(self.secret.as_ref());

        encode(&Header::default(), &claims, &encoding_key)
    }

    // 生成完整的 Token 响应（包含 access 和 refresh token）
    pub fn generate_token_pair(
        &self,
        user_id: i64,
        role: &str,
        refresh_token_expiry: Option<chrono::Duration>,
    ) -> Result<TokenPair, jsonwebtoken::errors::Error> {
        let access_token = self.generate_access_token(user_id, role)?;
        let refresh_token = self.generate_refresh_token(user_id, role, refresh_token_expiry)?;

        Ok(TokenPair {
            access_token,
            refresh_token,
        })
    }

    // 验证 JWT token
    pub fn verify_token(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        let decoding_key = DecodingKey::from_secret(self.secret.as_ref());
        let validation = Validation::default();

        decode::<Claims>(token, &decoding_key, &validation).map(|token_data| token_data.claims)
    }

    // 验证 token 是否为指定类型
    pub fn verify_token_type(
        &self,
        token: &str,
        expected_type: &str,
    ) -> Result<Claims, jsonwebtoken::errors::Error> {
        let claims = self.verify_token(token)?;
        if claims.token_type != expected_type {
            return Err(jsonwebtoken::errors::Error::from(
                jsonwebtoken::errors::ErrorKind::InvalidToken,
            ));
        }
        Ok(claims)
    }

    // 验证 Access Token
    pub fn verify_access_token(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        self.verify_token_type(token, "access")
    }

    // 验证 Refresh Token
    pub fn verify_refresh_token(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        self.verify_token_type(token, "refresh")
    }

    // 使用 Refresh Token 生成新的 Access Token
    pub fn refresh_access_token(
        &self,
        refresh_token: &str,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let claims = self.verify_refresh_token(refresh_token)?;
        let user_id = claims
            .sub
            .parse::<i64>()
            .map_err(|_| jsonwebtoken::errors::ErrorKind::InvalidToken)?;
        self.generate_access_token(user_id, &claims.role)
    }

    /// 创建 Refresh Token Cookie
    pub fn create_refresh_token_cookie(&self, refresh_token: &str) -> Cookie<'static> {
        Cookie::build("refresh_token", refresh_token.to_string())
            .path("/")
            .max_age(actix_web::cookie::time::Duration::days(
                self.refresh_token_expiry,
            ))
            .same_site(SameSite::Strict)
            .http_only(true)
            .secure(self.secure_cookies) // 生产环境下使用 HTTPS
            .finish()
    }

    /// 创建空的 Refresh Token Cookie（用于注销）
    pub fn create_empty_refresh_token_cookie(&self) -> Cookie<'static> {
        Cookie::build("refresh_token", "")
            .path("/")
            .max_age(actix_web::cookie::time::Duration::seconds(0))
            .same_site(SameSite::Strict)
            .http_only(true)
            .secure(self.secure_cookies)
            .finish()
    }

    /// 从请求中提取 Refresh Token
    pub fn extract_refresh_token_from_cookie(req: &actix_web::HttpRequest) -> Option<String> {
        req.cookie("refresh_token")
            .map(|cookie| cookie.value().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_utils() -> JwtUtils {
        JwtUtils {
            secret: "test-secret-not-for-production".to_string(),
            access_token_expiry: 15,
            refresh_token_expiry: 7,
            secure_cookies: false,
        }
    }

    #[test]
    fn test_generate_and_verify_access_token() {
        let jwt = test_utils();
        let token = jwt.generate_access_token(42, "learner").unwrap();
        let claims = jwt.verify_access_token(&token).unwrap();
        assert_eq!(claims.sub, "42");
        assert_eq!(claims.role, "learner");
        assert_eq!(claims.token_type, "access");
    }

    #[test]
    fn test_refresh_token_rejected_as_access() {
        let jwt = test_utils();
        let token = jwt.generate_refresh_token(42, "learner", None).unwrap();
        assert!(jwt.verify_access_token(&token).is_err());
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let jwt = test_utils();
        let token = jwt.generate_access_token(42, "learner").unwrap();
        let other = JwtUtils {
            secret: "another-secret".to_string(),
            ..test_utils()
        };
        assert!(other.verify_access_token(&token).is_err());
    }

    #[test]
    fn test_refresh_access_token() {
        let jwt = test_utils();
        let pair = jwt.generate_token_pair(7, "instructor", None).unwrap();
        let new_access = jwt.refresh_access_token(&pair.refresh_token).unwrap();
        let claims = jwt.verify_access_token(&new_access).unwrap();
        assert_eq!(claims.sub, "7");
        assert_eq!(claims.role, "instructor");
    }
}
