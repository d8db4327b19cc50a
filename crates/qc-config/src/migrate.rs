//! Config version migration.

use crate::ConfigError;
use crate::schema::ReportConfig;

pub const LATEST_VERSION: u32 = 1;

pub fn migrate_to_latest(mut config: ReportConfig) -> Result<ReportConfig, ConfigError> {
    while config.version < LATEST_VERSION {
        config = migrate_one_version(config)?;
    }
    Ok(config)
}

fn migrate_one_version(config: ReportConfig) -> Result<ReportConfig, ConfigError> {
    match config.version {
        0 => migrate_v0_to_v1(config),
        v => Err(ConfigError::Migration {
            what: format!("No migration path from version {}", v),
        }),
    }
}

// Unversioned files predate the version field; the layout is unchanged.
fn migrate_v0_to_v1(mut config: ReportConfig) -> Result<ReportConfig, ConfigError> {
    config.version = 1;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unversioned_config_is_stamped() {
        let config = ReportConfig {
            version: 0,
            ..ReportConfig::default()
        };
        let migrated = migrate_to_latest(config).unwrap();
        assert_eq!(migrated.version, LATEST_VERSION);
    }

    #[test]
    fn latest_is_left_alone() {
        let config = ReportConfig::legacy();
        assert_eq!(migrate_to_latest(config.clone()).unwrap(), config);
    }
}
