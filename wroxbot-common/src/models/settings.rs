use std::fmt;

/// The singleton settings row (id = 1).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    pub banner_url: Option<String>,
    pub icon_url: Option<String>,
}

impl Settings {
    pub const ROW_ID: i64 = 1;

    pub fn get(&self, field: SettingField) -> Option<&str> {
        match field {
            SettingField::Banner => self.banner_url.as_deref(),
            SettingField::Icon => self.icon_url.as_deref(),
        }
    }

    pub fn set(&mut self, field: SettingField, value: String) {
        match field {
            SettingField::Banner => self.banner_url = Some(value),
            SettingField::Icon => self.icon_url = Some(value),
        }
    }
}

/// One writable column of the settings row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingField {
    Banner,
    Icon,
}

impl SettingField {
    pub fn column(&self) -> &'static str {
        match self {
            SettingField::Banner => "banner_url",
            SettingField::Icon => "icon_url",
        }
    }
}

impl fmt::Display for SettingField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingField::Banner => write!(f, "banner"),
            SettingField::Icon => write!(f, "icon"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_one_field_keeps_the_other() {
        let mut settings = Settings::default();
        settings.set(SettingField::Banner, "http://x".into());
        settings.set(SettingField::Icon, "http://y".into());
        assert_eq!(settings.get(SettingField::Banner), Some("http://x"));
        assert_eq!(settings.get(SettingField::Icon), Some("http://y"));
    }
}
