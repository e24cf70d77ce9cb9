use tower_cookies::{Cookie, Cookies, Key};

/// The name of the one-shot flash cookie.
const FLASH_COOKIE: &str = "flash";

/// A one-shot notification rendered on the next page the client sees.
///
/// Carried in a signed cookie so a client cannot forge server feedback;
/// taken (and cleared) the next time a page is rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flash {
    /// Display level: `success`, `info`, `warning`, or `danger`.
    pub level: &'static str,
    /// The message shown to the user.
    pub message: String,
}

impl Flash {
    pub fn success(message: impl Into<String>) -> Self {
        Self { level: "success", message: message.into() }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self { level: "info", message: message.into() }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self { level: "warning", message: message.into() }
    }

    pub fn danger(message: impl Into<String>) -> Self {
        Self { level: "danger", message: message.into() }
    }
}

/// Queues a flash message for the next rendered page.
pub fn set(cookies: &Cookies, key: &Key, flash: Flash) {
    let mut cookie = Cookie::new(
        FLASH_COOKIE,
        format!("{}|{}", flash.level, flash.message),
    );
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookies.signed(key).add(cookie);
}

/// Takes the pending flash message, if any, clearing it in the process.
///
/// A cookie that fails signature verification is treated as absent.
pub fn take(cookies: &Cookies, key: &Key) -> Option<Flash> {
    let cookie = cookies.signed(key).get(FLASH_COOKIE)?;
    let value = cookie.value().to_string();

    let mut removal = Cookie::new(FLASH_COOKIE, "");
    removal.set_path("/");
    cookies.remove(removal);

    let (level, message) = value.split_once('|')?;
    let level = match level {
        "success" => "success",
        "info" => "info",
        "warning" => "warning",
        "danger" => "danger",
        _ => return None,
    };

    Some(Flash { level, message: message.to_string() })
}
