//! Game catalog configuration.
//!
//! The catalog is loaded once at startup from a JSON file (or the compiled-in
//! default) and validated before the first interview is created: every pool
//! must hold at least as many items as one interview draws from it, otherwise
//! the rejection sampler could never terminate.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::models::Packet;

/// Roles drawn per interview; `roles[0]` becomes the hidden role.
pub const ROLES_PER_INTERVIEW: usize = 3;
/// Primary questions drawn per interview.
pub const PRIMARY_QUESTIONS_PER_INTERVIEW: usize = 2;
/// Secondary questions drawn per interview.
pub const SECONDARY_QUESTIONS_PER_INTERVIEW: usize = 2;
/// Penalties drawn per interview.
pub const PENALTIES_PER_INTERVIEW: usize = 3;
/// Suspect notes drawn per interview.
pub const SUSPECT_NOTES_PER_INTERVIEW: usize = 2;

/// The static content catalog: packets plus the global pools.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// Ordered list of selectable packets.
    pub packets: Vec<Packet>,
    /// Global penalty pool.
    pub penalties: Vec<String>,
    /// Global suspect-note pool.
    pub suspect_notes: Vec<String>,
}

impl GameConfig {
    /// Load and validate a catalog from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// The compiled-in default catalog.
    pub fn builtin() -> Result<Self> {
        let config: Self = serde_json::from_str(include_str!("default_game.json"))?;
        config.validate()?;
        Ok(config)
    }

    /// Check every pool against its per-interview draw count.
    pub fn validate(&self) -> Result<()> {
        if self.packets.is_empty() {
            return Err(Error::Config("catalog has no packets".into()));
        }

        for packet in &self.packets {
            check_pool(&packet.name, "role", packet.roles.len(), ROLES_PER_INTERVIEW)?;
            check_pool(
                &packet.name,
                "primary question",
                packet.primary_questions.len(),
                PRIMARY_QUESTIONS_PER_INTERVIEW,
            )?;
            check_pool(
                &packet.name,
                "secondary question",
                packet.secondary_questions.len(),
                SECONDARY_QUESTIONS_PER_INTERVIEW,
            )?;
        }

        if self.penalties.len() < PENALTIES_PER_INTERVIEW {
            return Err(Error::Config(format!(
                "penalty pool has {} entries, need at least {PENALTIES_PER_INTERVIEW}",
                self.penalties.len()
            )));
        }

        if self.suspect_notes.len() < SUSPECT_NOTES_PER_INTERVIEW {
            return Err(Error::Config(format!(
                "suspect-note pool has {} entries, need at least {SUSPECT_NOTES_PER_INTERVIEW}",
                self.suspect_notes.len()
            )));
        }

        Ok(())
    }

    /// Names of all packets, in catalog order.
    pub fn packet_names(&self) -> Vec<String> {
        self.packets.iter().map(|p| p.name.clone()).collect()
    }

    /// Packet at the given catalog index.
    pub fn packet(&self, index: usize) -> Option<&Packet> {
        self.packets.get(index)
    }
}

fn check_pool(packet: &str, pool: &str, len: usize, needed: usize) -> Result<()> {
    if len < needed {
        return Err(Error::Config(format!(
            "packet '{packet}': {pool} pool has {len} entries, need at least {needed}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::models::SuspectRole;

    fn minimal_config() -> GameConfig {
        GameConfig {
            packets: vec![Packet {
                name: "Test Packet".to_string(),
                roles: vec![
                    SuspectRole::human(),
                    SuspectRole::robot("hums while thinking"),
                    SuspectRole::violent_robot("snaps at the third lie"),
                ],
                primary_questions: vec!["one?".to_string(), "two?".to_string()],
                secondary_questions: vec!["three?".to_string(), "four?".to_string()],
            }],
            penalties: vec!["a".to_string(), "b".to_string(), "c".to_string()],
            suspect_notes: vec!["x".to_string(), "y".to_string()],
        }
    }

    #[test]
    fn test_builtin_catalog_is_valid() {
        let config = GameConfig::builtin().unwrap();
        assert!(!config.packet_names().is_empty());
    }

    #[test]
    fn test_validate_accepts_minimal_pools() {
        assert!(minimal_config().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_short_role_pool() {
        let mut config = minimal_config();
        config.packets[0].roles.pop();

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("role pool"));
        assert!(err.to_string().contains("Test Packet"));
    }

    #[test]
    fn test_validate_rejects_short_penalty_pool() {
        let mut config = minimal_config();
        config.penalties.truncate(2);

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("penalty pool"));
    }

    #[test]
    fn test_validate_rejects_empty_catalog() {
        let mut config = minimal_config();
        config.packets.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let json = serde_json::to_string(&minimal_config()).unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let config = GameConfig::load(file.path()).unwrap();
        assert_eq!(config.packet_names(), vec!["Test Packet"]);
        assert!(config.packet(0).is_some());
        assert!(config.packet(1).is_none());
    }

    #[test]
    fn test_load_rejects_invalid_catalog() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let mut config = minimal_config();
        config.suspect_notes.truncate(1);
        let json = serde_json::to_string(&config).unwrap();
        file.write_all(json.as_bytes()).unwrap();

        assert!(GameConfig::load(file.path()).is_err());
    }
}
