use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
/// Launch settings for the Chrome session behind chromedriver.
pub struct BrowserOptions {
    pub headless: bool,
    /// Window size in CSS pixels; also the layout width the report prints from.
    pub window_size: (u32, u32),
}

impl Default for BrowserOptions {
    fn default() -> Self {
        Self {
            headless: true,
            window_size: (1440, 900),
        }
    }
}

/// Construct Chrome command-line arguments for the given options.
pub fn build_chrome_arguments(options: &BrowserOptions) -> Vec<String> {
    let mut args = vec![
        "--disable-dev-shm-usage".to_string(),
        "--no-sandbox".to_string(),
        "--disable-extensions".to_string(),
        format!("--window-size={},{}", options.window_size.0, options.window_size.1),
    ];
    if options.headless {
        args.push("--headless=new".to_string());
        args.push("--disable-gpu".to_string());
    }
    args
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headless_adds_headless_flags() {
        let args = build_chrome_arguments(&BrowserOptions::default());
        assert!(args.iter().any(|a| a == "--headless=new"));
        assert!(args.iter().any(|a| a == "--window-size=1440,900"));
        assert!(!args.iter().any(|a| a.starts_with("--user-agent")));
    }

    #[test]
    fn headed_session_omits_headless_flags() {
        let options = BrowserOptions {
            headless: false,
            ..BrowserOptions::default()
        };
        let args = build_chrome_arguments(&options);
        assert!(!args.iter().any(|a| a.starts_with("--headless")));
        assert!(!args.iter().any(|a| a == "--disable-gpu"));
    }
}
