//! Output file names.

use crate::error::{Error, Result};
use crate::model::System;

const RULES_SEPARATOR: &str = ": ";

/// Lowercase with spaces turned into underscores.
pub fn slugify(s: &str) -> String {
    s.to_lowercase().replace(' ', "_")
}

/// Second segment of the rules split on `": "`.
pub fn rules_token(system: &System) -> Result<&str> {
    system
        .rules
        .as_deref()
        .and_then(|rules| rules.split(RULES_SEPARATOR).nth(1))
        .ok_or_else(|| Error::MissingRulesToken {
            name: system.name.clone(),
        })
}

pub fn system_file_name(system: &System) -> String {
    format!("{}.jpg", slugify(&system.name))
}

pub fn core_file_name(core: &System) -> Result<String> {
    let circles = core.circles.ok_or_else(|| Error::MissingCircles {
        name: core.name.clone(),
    })?;
    let token = rules_token(core)?;
    Ok(format!("{}.jpg", slugify(&format!("core_{circles}_{token}"))))
}

pub fn mess_file_name(mess: &System) -> Result<String> {
    let token = rules_token(mess)?;
    Ok(format!("{}.jpg", slugify(&format!("mess_{token}"))))
}

pub fn sheet_file_name(title: &str) -> String {
    format!("{}_sheet.jpg", slugify(title))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn system(json: &str) -> System {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn core_name_uses_circles_and_token() {
        let core = system(r#"{"name": "Reactor", "rules": "Something: Alpha", "circles": 2}"#);
        assert_eq!(core_file_name(&core).unwrap(), "core_2_alpha.jpg");
    }

    #[test]
    fn mess_name_uses_token() {
        let mess = system(r#"{"name": "Mess", "rules": "Galley: Big Kitchen"}"#);
        assert_eq!(mess_file_name(&mess).unwrap(), "mess_big_kitchen.jpg");
    }

    #[test]
    fn system_and_sheet_names_are_slugged() {
        let s = system(r#"{"name": "Laser Battery"}"#);
        assert_eq!(system_file_name(&s), "laser_battery.jpg");
        assert_eq!(sheet_file_name("The Dauntless"), "the_dauntless_sheet.jpg");
    }

    #[test]
    fn missing_separator_or_circles_is_an_error() {
        let core = system(r#"{"name": "Reactor", "rules": "No token", "circles": 2}"#);
        assert!(matches!(
            core_file_name(&core),
            Err(Error::MissingRulesToken { .. })
        ));
        let core = system(r#"{"name": "Reactor", "rules": "A: B"}"#);
        assert!(matches!(
            core_file_name(&core),
            Err(Error::MissingCircles { .. })
        ));
        let mess = system(r#"{"name": "Mess"}"#);
        assert!(mess_file_name(&mess).is_err());
    }
}
