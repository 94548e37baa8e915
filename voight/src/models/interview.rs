//! Interview model: the one paired two-party game instance.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::packet::{Packet, SuspectRole};

/// Phase of an interview.
///
/// Moves strictly forward; a reset replaces the whole interview with a fresh
/// one at `SelectingPositions` rather than rewinding this value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InterviewStatus {
    /// Waiting for the two participants to connect.
    WaitingForConnections,
    /// Both connected; packet and content are being chosen.
    SelectingPositions,
    /// The interview is being played.
    InProgress,
    /// Finalized with an outcome. Terminal.
    Finished,
}

impl InterviewStatus {
    /// Convert status to its wire string.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::WaitingForConnections => "waiting-for-connections",
            Self::SelectingPositions => "selecting-positions",
            Self::InProgress => "in-progress",
            Self::Finished => "finished",
        }
    }

    /// Parse status from a wire string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "waiting-for-connections" => Some(Self::WaitingForConnections),
            "selecting-positions" => Some(Self::SelectingPositions),
            "in-progress" => Some(Self::InProgress),
            "finished" => Some(Self::Finished),
            _ => None,
        }
    }
}

impl std::fmt::Display for InterviewStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Final classification of a finished interview.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InterviewOutcome {
    /// Guessed human, suspect was human.
    CorrectlyGuessedHuman,
    /// Guessed human, suspect was a robot.
    WronglyGuessedHuman,
    /// Guessed robot, suspect was a robot.
    CorrectlyGuessedRobot,
    /// Guessed robot, suspect was human.
    WronglyGuessedRobot,
    /// The violent robot attacked the interviewer.
    KilledInterviewer,
}

impl InterviewOutcome {
    /// Convert outcome to its wire string.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CorrectlyGuessedHuman => "correctly-guessed-human",
            Self::WronglyGuessedHuman => "wrongly-guessed-human",
            Self::CorrectlyGuessedRobot => "correctly-guessed-robot",
            Self::WronglyGuessedRobot => "wrongly-guessed-robot",
            Self::KilledInterviewer => "killed-interviewer",
        }
    }
}

impl std::fmt::Display for InterviewOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One paired interview session.
///
/// Holds the two opaque connection handles; those never leave the process,
/// so the struct is deliberately not serializable. Anything crossing the
/// process boundary goes through [`Interview::snapshot`].
#[derive(Debug)]
pub struct Interview {
    /// Unique identifier, immutable after creation.
    pub id: u64,
    /// Current phase.
    pub status: InterviewStatus,
    /// Connection handle of the interviewer seat.
    pub interviewer_connection: Option<String>,
    /// Connection handle of the suspect seat.
    pub suspect_connection: Option<String>,
    /// Selected content packet, set once before roles are drawn.
    pub packet: Option<Packet>,
    /// Drawn roles; `roles[0]` is the suspect's hidden role.
    pub roles: Vec<SuspectRole>,
    /// Drawn primary questions.
    pub primary_questions: Vec<String>,
    /// Drawn secondary questions.
    pub secondary_questions: Vec<String>,
    /// Drawn penalties.
    pub penalties: Vec<String>,
    /// Drawn suspect notes.
    pub suspect_notes: Vec<String>,
    /// Final outcome, unset until `Finished`.
    pub outcome: Option<InterviewOutcome>,
    /// When the interview was created.
    pub created_at: DateTime<Utc>,
}

impl Interview {
    /// Create a fresh interview waiting for its participants.
    pub fn new(id: u64) -> Self {
        Self {
            id,
            status: InterviewStatus::WaitingForConnections,
            interviewer_connection: None,
            suspect_connection: None,
            packet: None,
            roles: Vec::new(),
            primary_questions: Vec::new(),
            secondary_questions: Vec::new(),
            penalties: Vec::new(),
            suspect_notes: Vec::new(),
            outcome: None,
            created_at: Utc::now(),
        }
    }

    /// Seat a connection, first come first served.
    ///
    /// The first successful caller becomes the interviewer, the second the
    /// suspect. Returns false without mutating anything when the interview
    /// is past `WaitingForConnections` or both seats are taken.
    pub fn try_bind(&mut self, connection: &str) -> bool {
        if self.status != InterviewStatus::WaitingForConnections {
            return false;
        }

        if self.interviewer_connection.is_none() {
            self.interviewer_connection = Some(connection.to_owned());
            return true;
        }

        if self.suspect_connection.is_none() {
            self.suspect_connection = Some(connection.to_owned());
            return true;
        }

        false
    }

    /// Serializable projection without the connection handles.
    pub fn snapshot(&self) -> InterviewSnapshot {
        InterviewSnapshot {
            id: self.id,
            status: self.status,
            interviewer_present: self.interviewer_connection.is_some(),
            suspect_present: self.suspect_connection.is_some(),
            packet: self.packet.as_ref().map(|p| p.name.clone()),
            roles: self.roles.clone(),
            primary_questions: self.primary_questions.clone(),
            secondary_questions: self.secondary_questions.clone(),
            penalties: self.penalties.clone(),
            suspect_notes: self.suspect_notes.clone(),
            outcome: self.outcome,
            created_at: self.created_at,
        }
    }
}

/// Wire-safe view of an interview.
///
/// Carries presence flags instead of the handles themselves, so sinks and
/// API clients can never observe transport identities.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterviewSnapshot {
    /// Interview identifier.
    pub id: u64,
    /// Current phase.
    pub status: InterviewStatus,
    /// Whether the interviewer seat is taken.
    pub interviewer_present: bool,
    /// Whether the suspect seat is taken.
    pub suspect_present: bool,
    /// Name of the selected packet, if any.
    pub packet: Option<String>,
    /// Drawn roles.
    pub roles: Vec<SuspectRole>,
    /// Drawn primary questions.
    pub primary_questions: Vec<String>,
    /// Drawn secondary questions.
    pub secondary_questions: Vec<String>,
    /// Drawn penalties.
    pub penalties: Vec<String>,
    /// Drawn suspect notes.
    pub suspect_notes: Vec<String>,
    /// Final outcome, if finished.
    pub outcome: Option<InterviewOutcome>,
    /// When the interview was created.
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trip() {
        for status in [
            InterviewStatus::WaitingForConnections,
            InterviewStatus::SelectingPositions,
            InterviewStatus::InProgress,
            InterviewStatus::Finished,
        ] {
            assert_eq!(InterviewStatus::from_str(status.as_str()), Some(status));
        }
        assert_eq!(InterviewStatus::from_str("paused"), None);
    }

    #[test]
    fn test_status_ordering_follows_phases() {
        assert!(InterviewStatus::WaitingForConnections < InterviewStatus::SelectingPositions);
        assert!(InterviewStatus::SelectingPositions < InterviewStatus::InProgress);
        assert!(InterviewStatus::InProgress < InterviewStatus::Finished);
    }

    #[test]
    fn test_bind_seats_in_arrival_order() {
        let mut interview = Interview::new(1);

        assert!(interview.try_bind("alpha"));
        assert_eq!(interview.interviewer_connection.as_deref(), Some("alpha"));
        assert_eq!(interview.suspect_connection, None);

        assert!(interview.try_bind("beta"));
        assert_eq!(interview.suspect_connection.as_deref(), Some("beta"));

        assert!(!interview.try_bind("gamma"));
        assert_eq!(interview.interviewer_connection.as_deref(), Some("alpha"));
        assert_eq!(interview.suspect_connection.as_deref(), Some("beta"));
    }

    #[test]
    fn test_bind_rejected_outside_waiting_phase() {
        let mut interview = Interview::new(2);
        interview.status = InterviewStatus::SelectingPositions;

        assert!(!interview.try_bind("alpha"));
        assert_eq!(interview.interviewer_connection, None);
        assert_eq!(interview.suspect_connection, None);
    }

    #[test]
    fn test_snapshot_has_no_handles() {
        let mut interview = Interview::new(3);
        interview.try_bind("alpha");

        let snapshot = interview.snapshot();
        assert!(snapshot.interviewer_present);
        assert!(!snapshot.suspect_present);

        let json = serde_json::to_string(&snapshot).unwrap();
        assert!(!json.contains("alpha"));
    }
}
