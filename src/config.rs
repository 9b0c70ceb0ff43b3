//
// Copyright (c) 2024 Nathan Fiedler
//
use crate::data::sources::DataSourceType;
use crate::Error;
use log::info;
use std::env;

/// Destination of the contact form when none is configured.
pub const DEFAULT_RELAY_URL: &str = "https://formsubmit.co/ionlyreadspam@gmail.com";

///
/// Scheme on which the server listens.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Protocol {
    Http,
    Https,
}

///
/// Settings gathered from the environment at startup.
///
#[derive(Clone, Debug)]
pub struct Settings {
    /// Where like records are kept.
    pub data_source: DataSourceType,
    /// Public site key of the bot-verification widget, if any.
    pub site_key: Option<String>,
    /// Form relay endpoint receiving contact form submissions.
    pub relay_url: String,
    /// Whether the destructive administrative routes are served.
    pub admin_routes: bool,
    pub host: String,
    pub port: String,
    pub protocol: Protocol,
    pub cert_file: String,
    pub key_file: String,
}

impl Settings {
    ///
    /// Read the settings from the process environment.
    ///
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    ///
    /// Read the settings using the given function to look up variables.
    /// Empty values are treated the same as missing ones.
    ///
    pub fn from_lookup<F>(lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let data_source = if let Some(path) = var("DATABASE_PATH") {
            if path == ":memory:" {
                DataSourceType::SqliteMemory
            } else {
                DataSourceType::SqliteFile(path)
            }
        } else {
            match (var("SUPABASE_URL"), var("SUPABASE_ANON_KEY")) {
                (Some(url), Some(api_key)) => DataSourceType::Postgrest { url, api_key },
                _ => {
                    return Err(Error::Configuration(
                        "set SUPABASE_URL and SUPABASE_ANON_KEY, or DATABASE_PATH".into(),
                    ))
                }
            }
        };
        info!("like records kept in {}", data_source);
        let protocol = match var("PROTOCOL").as_deref() {
            None | Some("http") => Protocol::Http,
            Some("https") => Protocol::Https,
            Some(other) => {
                return Err(Error::Configuration(format!(
                    "unsupported PROTOCOL {}",
                    other
                )))
            }
        };
        Ok(Self {
            data_source,
            site_key: var("RECAPTCHA_SITE_KEY"),
            relay_url: var("FORM_RELAY_URL").unwrap_or_else(|| DEFAULT_RELAY_URL.to_owned()),
            admin_routes: var("ENABLE_ADMIN_ROUTES")
                .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
                .unwrap_or(false),
            host: var("HOST").unwrap_or_else(|| "127.0.0.1".to_owned()),
            port: var("PORT").unwrap_or_else(|| "3000".to_owned()),
            protocol,
            cert_file: var("CERT_FILE").unwrap_or_else(|| "certs/cert.pem".to_owned()),
            key_file: var("KEY_FILE").unwrap_or_else(|| "certs/key.pem".to_owned()),
        })
    }

    /// Address on which to bind the server, as `host:port`.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_in(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_settings_supabase() -> Result<(), Error> {
        let settings = Settings::from_lookup(lookup_in(&[
            ("SUPABASE_URL", "https://abc.supabase.co"),
            ("SUPABASE_ANON_KEY", "anon"),
        ]))?;
        assert_eq!(
            settings.data_source,
            DataSourceType::Postgrest {
                url: "https://abc.supabase.co".into(),
                api_key: "anon".into()
            }
        );
        assert_eq!(settings.site_key, None);
        assert_eq!(settings.relay_url, DEFAULT_RELAY_URL);
        assert!(!settings.admin_routes);
        assert_eq!(settings.protocol, Protocol::Http);
        assert_eq!(settings.bind_address(), "127.0.0.1:3000");
        Ok(())
    }

    #[test]
    fn test_settings_missing_backend() {
        let result = Settings::from_lookup(lookup_in(&[("SUPABASE_URL", "https://abc.supabase.co")]));
        assert!(matches!(result, Err(Error::Configuration(_))));
        let result = Settings::from_lookup(lookup_in(&[
            ("SUPABASE_URL", "https://abc.supabase.co"),
            ("SUPABASE_ANON_KEY", ""),
        ]));
        assert!(result.is_err());
    }

    #[test]
    fn test_settings_sqlite_and_overrides() -> Result<(), Error> {
        let settings = Settings::from_lookup(lookup_in(&[
            ("DATABASE_PATH", ":memory:"),
            ("RECAPTCHA_SITE_KEY", "6Lc-site-key"),
            ("ENABLE_ADMIN_ROUTES", "TRUE"),
            ("PROTOCOL", "https"),
            ("PORT", "8080"),
        ]))?;
        assert_eq!(settings.data_source, DataSourceType::SqliteMemory);
        assert_eq!(settings.site_key.as_deref(), Some("6Lc-site-key"));
        assert!(settings.admin_routes);
        assert_eq!(settings.protocol, Protocol::Https);
        assert_eq!(settings.bind_address(), "127.0.0.1:8080");

        let settings = Settings::from_lookup(lookup_in(&[
            ("DATABASE_PATH", "likes.db3"),
            ("RECAPTCHA_SITE_KEY", "  "),
        ]))?;
        assert_eq!(
            settings.data_source,
            DataSourceType::SqliteFile("likes.db3".into())
        );
        assert_eq!(settings.site_key, None);
        Ok(())
    }

    #[test]
    fn test_settings_bad_protocol() {
        let result = Settings::from_lookup(lookup_in(&[
            ("DATABASE_PATH", ":memory:"),
            ("PROTOCOL", "gopher"),
        ]));
        assert!(result.is_err());
    }
}
