use serde::{Deserialize, Serialize};

/// # Summary
/// Cookie 的 `SameSite` 属性。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SameSite {
    Strict,
    Lax,
    None,
}

impl std::fmt::Display for SameSite {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SameSite::Strict => write!(f, "Strict"),
            SameSite::Lax => write!(f, "Lax"),
            SameSite::None => write!(f, "None"),
        }
    }
}

/// # Summary
/// 鉴权框架签发的 Cookie 默认属性。
///
/// # Invariants
/// - 跨站部署要求 `SameSite=None` 必须同时带 `Secure`。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CookieAttributes {
    pub same_site: SameSite,
    pub secure: bool,
    pub http_only: bool,
}

impl Default for CookieAttributes {
    fn default() -> Self {
        Self {
            same_site: SameSite::None,
            secure: true,
            http_only: true,
        }
    }
}

impl CookieAttributes {
    /// # Summary
    /// 生成 `Set-Cookie` 头的值。
    ///
    /// # Arguments
    /// * `name` - Cookie 名。
    /// * `value` - Cookie 值 (调用方负责编码)。
    ///
    /// # Returns
    /// * 形如 `name=value; Path=/; SameSite=None; Secure; HttpOnly` 的字符串。
    pub fn render(&self, name: &str, value: &str) -> String {
        let mut out = format!("{}={}; Path=/; SameSite={}", name, value, self.same_site);
        if self.secure {
            out.push_str("; Secure");
        }
        if self.http_only {
            out.push_str("; HttpOnly");
        }
        out
    }
}

/// # Summary
/// 鉴权框架使用的表名映射。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSchema {
    pub user: String,
    pub session: String,
    pub account: String,
    pub verification: String,
}

impl Default for AuthSchema {
    fn default() -> Self {
        Self {
            user: "user".to_string(),
            session: "session".to_string(),
            account: "account".to_string(),
            verification: "verification".to_string(),
        }
    }
}

impl AuthSchema {
    /// 全部表名，按建表依赖顺序排列 (user 在前)
    pub fn tables(&self) -> [&str; 4] {
        [&self.user, &self.session, &self.account, &self.verification]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_cookie_policy() {
        let cookie = CookieAttributes::default();
        assert_eq!(
            cookie.render("autonome.session_token", "abc"),
            "autonome.session_token=abc; Path=/; SameSite=None; Secure; HttpOnly"
        );
    }

    #[test]
    fn test_lax_cookie_without_flags() {
        let cookie = CookieAttributes {
            same_site: SameSite::Lax,
            secure: false,
            http_only: false,
        };
        assert_eq!(cookie.render("a", "b"), "a=b; Path=/; SameSite=Lax");
    }
}
