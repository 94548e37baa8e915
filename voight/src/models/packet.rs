//! Content catalog models: packets and suspect roles.

use serde::{Deserialize, Serialize};

/// Kind of a suspect role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RoleKind {
    /// The suspect is an ordinary human.
    Human,
    /// The suspect is a robot with a behavioral fault.
    Robot,
    /// The suspect is a robot that may attack the interviewer.
    ViolentRobot,
}

impl RoleKind {
    /// Convert kind to its wire string.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Human => "human",
            Self::Robot => "robot",
            Self::ViolentRobot => "violent-robot",
        }
    }

    /// Parse kind from a wire string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "human" => Some(Self::Human),
            "robot" => Some(Self::Robot),
            "violent-robot" => Some(Self::ViolentRobot),
            _ => None,
        }
    }
}

impl std::fmt::Display for RoleKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A hidden role the suspect may be dealt.
///
/// `roles[0]` of an interview is the role the suspect actually plays; the
/// remaining drawn roles are decoys shown alongside it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuspectRole {
    /// What the suspect really is.
    pub kind: RoleKind,
    /// Behavioral fault the suspect must act out (robots only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fault: Option<String>,
}

impl SuspectRole {
    /// A plain human role.
    pub const fn human() -> Self {
        Self {
            kind: RoleKind::Human,
            fault: None,
        }
    }

    /// A robot role with the given fault.
    pub fn robot(fault: impl Into<String>) -> Self {
        Self {
            kind: RoleKind::Robot,
            fault: Some(fault.into()),
        }
    }

    /// A violent robot role with the given fault.
    pub fn violent_robot(fault: impl Into<String>) -> Self {
        Self {
            kind: RoleKind::ViolentRobot,
            fault: Some(fault.into()),
        }
    }
}

/// A named bundle of role and question pools, selected once per interview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Packet {
    /// Display name of the packet.
    pub name: String,
    /// Pool of roles the suspect's hand is drawn from.
    pub roles: Vec<SuspectRole>,
    /// Pool of primary questions.
    pub primary_questions: Vec<String>,
    /// Pool of secondary questions.
    pub secondary_questions: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_kind_round_trip() {
        for kind in [RoleKind::Human, RoleKind::Robot, RoleKind::ViolentRobot] {
            assert_eq!(RoleKind::from_str(kind.as_str()), Some(kind));
        }
        assert_eq!(RoleKind::from_str("android"), None);
    }

    #[test]
    fn test_role_kind_serde_matches_as_str() {
        let json = serde_json::to_string(&RoleKind::ViolentRobot).unwrap();
        assert_eq!(json, "\"violent-robot\"");
    }
}
