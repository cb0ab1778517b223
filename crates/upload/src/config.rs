//! Upload runtime configuration.
//!
//! Configuration is resolved once at process startup and passed into
//! [`Uploader::from_config`](crate::Uploader::from_config). The library never reads
//! environment variables itself; binaries read them and hand the raw values to
//! [`UploaderConfig::from_env_values`].

use crate::constants::DEFAULT_FIELD_NAME;

/// Upload configuration resolved at startup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UploaderConfig {
    upload_dir: Option<String>,
    allowed_extensions: Vec<String>,
    field_name: String,
    replace_if_exist: bool,
}

impl Default for UploaderConfig {
    fn default() -> Self {
        Self {
            upload_dir: None,
            allowed_extensions: Vec::new(),
            field_name: DEFAULT_FIELD_NAME.to_owned(),
            replace_if_exist: false,
        }
    }
}

impl UploaderConfig {
    /// Create a new `UploaderConfig`.
    ///
    /// A blank directory counts as unset and a blank field name falls back to `files`.
    pub fn new(
        upload_dir: Option<String>,
        allowed_extensions: Vec<String>,
        field_name: Option<String>,
        replace_if_exist: bool,
    ) -> Self {
        let mut config = Self {
            allowed_extensions,
            replace_if_exist,
            ..Self::default()
        };
        config.set_upload_dir(upload_dir);
        config.set_field_name(field_name);
        config
    }

    /// Build a config from raw environment-style values.
    ///
    /// # Arguments
    ///
    /// * `upload_dir` - Upload directory; blank means unset.
    /// * `allowed_extensions` - Comma-separated extension list, such as `txt,.pdf, png`.
    /// * `field_name` - Form field that carries the files.
    /// * `replace_if_exist` - `1`, `true`, `yes` or `on` (any case) enables replacing.
    pub fn from_env_values(
        upload_dir: Option<String>,
        allowed_extensions: Option<String>,
        field_name: Option<String>,
        replace_if_exist: Option<String>,
    ) -> Self {
        let allowed_extensions = allowed_extensions
            .map(|list| {
                list.split(',')
                    .map(str::trim)
                    .filter(|ext| !ext.is_empty())
                    .map(str::to_owned)
                    .collect()
            })
            .unwrap_or_default();

        Self::new(
            upload_dir,
            allowed_extensions,
            field_name,
            flag_from_env_value(replace_if_exist),
        )
    }

    pub fn upload_dir(&self) -> Option<&str> {
        self.upload_dir.as_deref()
    }

    pub fn set_upload_dir(&mut self, upload_dir: Option<String>) {
        self.upload_dir = upload_dir
            .map(|dir| dir.trim().to_owned())
            .filter(|dir| !dir.is_empty());
    }

    pub fn allowed_extensions(&self) -> &[String] {
        &self.allowed_extensions
    }

    pub fn set_allowed_extensions(&mut self, allowed_extensions: Vec<String>) {
        self.allowed_extensions = allowed_extensions;
    }

    pub fn field_name(&self) -> &str {
        &self.field_name
    }

    pub fn set_field_name(&mut self, field_name: Option<String>) {
        self.field_name = field_name
            .map(|name| name.trim().to_owned())
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| DEFAULT_FIELD_NAME.to_owned());
    }

    pub fn replace_if_exist(&self) -> bool {
        self.replace_if_exist
    }

    pub fn set_replace_if_exist(&mut self, replace_if_exist: bool) {
        self.replace_if_exist = replace_if_exist;
    }
}

/// Parse a boolean flag from an optional string value. Absent or unrecognised means false.
pub fn flag_from_env_value(value: Option<String>) -> bool {
    value
        .map(|v| v.trim().to_ascii_lowercase())
        .is_some_and(|v| matches!(v.as_str(), "1" | "true" | "yes" | "on"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = UploaderConfig::default();
        assert_eq!(config.upload_dir(), None);
        assert!(config.allowed_extensions().is_empty());
        assert_eq!(config.field_name(), "files");
        assert!(!config.replace_if_exist());
    }

    #[test]
    fn test_from_env_values() {
        let config = UploaderConfig::from_env_values(
            Some(" /srv/uploads ".into()),
            Some("txt, .pdf,,PNG ".into()),
            Some("attachments".into()),
            Some("Yes".into()),
        );
        assert_eq!(config.upload_dir(), Some("/srv/uploads"));
        assert_eq!(config.allowed_extensions(), ["txt", ".pdf", "PNG"]);
        assert_eq!(config.field_name(), "attachments");
        assert!(config.replace_if_exist());
    }

    #[test]
    fn test_blank_values_fall_back() {
        let config = UploaderConfig::from_env_values(
            Some("   ".into()),
            Some("".into()),
            Some(" \n".into()),
            Some("maybe".into()),
        );
        assert_eq!(config, UploaderConfig::default());
    }

    #[test]
    fn test_flag_values() {
        for yes in ["1", "true", "TRUE", " on ", "yes"] {
            assert!(flag_from_env_value(Some(yes.into())), "{yes}");
        }
        for no in ["0", "false", "off", "", "2"] {
            assert!(!flag_from_env_value(Some(no.into())), "{no}");
        }
        assert!(!flag_from_env_value(None));
    }
}
