use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

pub const LOGIN_PATH: &str = "/login";

const QUERY_VALUE: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'&')
    .add(b'+')
    .add(b'<')
    .add(b'=')
    .add(b'>')
    .add(b'?');

/// Login entry point, carrying the originally requested location when known.
pub fn login_url(return_to: Option<&str>) -> String {
    match return_to.filter(|path| !path.is_empty() && *path != LOGIN_PATH) {
        Some(path) => format!(
            "{}?redirect={}",
            LOGIN_PATH,
            utf8_percent_encode(path, QUERY_VALUE)
        ),
        None => LOGIN_PATH.to_string(),
    }
}

#[cfg(target_arch = "wasm32")]
pub fn current_path() -> Option<String> {
    let location = web_sys::window()?.location();
    let mut path = location.pathname().ok()?;
    if let Ok(search) = location.search() {
        path.push_str(&search);
    }
    Some(path)
}

#[cfg(not(target_arch = "wasm32"))]
pub fn current_path() -> Option<String> {
    None
}

#[cfg(target_arch = "wasm32")]
pub fn redirect_to(target: &str) {
    if let Some(window) = web_sys::window() {
        let location = window.location();
        if location.pathname().ok().as_deref() == Some(target) {
            return;
        }
        let _ = location.set_href(target);
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn redirect_to(target: &str) {
    log::debug!("redirect to {} ignored outside the browser", target);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_url_encodes_return_location() {
        assert_eq!(login_url(None), "/login");
        assert_eq!(login_url(Some("")), "/login");
        assert_eq!(login_url(Some("/login")), "/login");
        assert_eq!(
            login_url(Some("/dashboard/leader")),
            "/login?redirect=/dashboard/leader"
        );
        assert_eq!(
            login_url(Some("/dashboard/student?tab=a b&x=1")),
            "/login?redirect=/dashboard/student%3Ftab%3Da%20b%26x%3D1"
        );
    }
}
