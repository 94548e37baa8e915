//! Interview lifecycle operations.
//!
//! One service instance owns the catalog, the registry, and the outcome
//! sink. Every operation is scoped to a single interview id and runs under
//! that interview's lock, so concurrent calls against the same id serialize.

use std::sync::Arc;

use crate::config::{
    GameConfig, PENALTIES_PER_INTERVIEW, PRIMARY_QUESTIONS_PER_INTERVIEW, ROLES_PER_INTERVIEW,
    SECONDARY_QUESTIONS_PER_INTERVIEW, SUSPECT_NOTES_PER_INTERVIEW,
};
use crate::engine::draw::draw_unique;
use crate::engine::registry::InterviewRegistry;
use crate::error::{Error, Result};
use crate::models::{
    Interview, InterviewOutcome, InterviewSnapshot, InterviewStatus, Packet, RoleKind, SuspectRole,
};
use crate::sink::{OutcomeSink, TracingSink};

/// The session engine behind the HTTP controller.
pub struct InterviewService {
    config: Arc<GameConfig>,
    registry: InterviewRegistry,
    sink: Arc<dyn OutcomeSink>,
}

impl InterviewService {
    /// Create a service recording outcomes through the tracing sink.
    pub fn new(config: GameConfig) -> Self {
        Self::with_sink(config, Arc::new(TracingSink))
    }

    /// Create a service with a custom outcome sink.
    pub fn with_sink(config: GameConfig, sink: Arc<dyn OutcomeSink>) -> Self {
        Self {
            config: Arc::new(config),
            registry: InterviewRegistry::new(),
            sink,
        }
    }

    /// Create a fresh interview waiting for its two participants.
    pub fn create_interview(&self) -> InterviewSnapshot {
        let (id, interview) = self.registry.create();
        let snapshot = interview.lock().snapshot();

        tracing::info!(id, "interview created");
        snapshot
    }

    /// Seat a connection at the interview, first come first served.
    ///
    /// Returns false (without mutation) when the interview is past
    /// `WaitingForConnections` or both seats are already taken.
    pub fn bind_connection(&self, id: u64, connection: &str) -> Result<bool> {
        self.with_interview(id, |interview| Ok(interview.try_bind(connection)))
    }

    /// Move a fully-seated interview into `SelectingPositions`.
    pub fn start_position_selection(&self, id: u64) -> Result<InterviewSnapshot> {
        self.with_interview(id, |interview| {
            expect_status(interview, InterviewStatus::WaitingForConnections)?;

            if interview.interviewer_connection.is_none() || interview.suspect_connection.is_none()
            {
                return Err(Error::InvalidOperation(format!(
                    "interview {id} needs both participants before positions are selected"
                )));
            }

            interview.status = InterviewStatus::SelectingPositions;
            Ok(interview.snapshot())
        })
    }

    /// Names of all packets, in catalog order.
    pub fn packet_names(&self) -> Vec<String> {
        self.config.packet_names()
    }

    /// Packet at the given catalog index.
    pub fn packet(&self, index: usize) -> Result<Packet> {
        self.config
            .packet(index)
            .cloned()
            .ok_or_else(|| Error::InvalidOperation(format!("no packet at index {index}")))
    }

    /// Select the packet the interview draws its content from. Set once.
    pub fn choose_packet(&self, id: u64, index: usize) -> Result<InterviewSnapshot> {
        let packet = self.packet(index)?;

        self.with_interview(id, |interview| {
            expect_status(interview, InterviewStatus::SelectingPositions)?;

            interview.packet = Some(packet);
            Ok(interview.snapshot())
        })
    }

    /// Draw the interview's penalties from the global pool.
    ///
    /// Overwrites any previous draw.
    pub fn allocate_penalties(&self, id: u64) -> Result<Vec<String>> {
        self.with_interview(id, |interview| {
            expect_status(interview, InterviewStatus::SelectingPositions)?;

            interview.penalties = draw_unique(&self.config.penalties, PENALTIES_PER_INTERVIEW);
            Ok(interview.penalties.clone())
        })
    }

    /// Draw the suspect's roles from the selected packet.
    ///
    /// `roles[0]` of the result is the hidden role for this run. Overwrites
    /// any previous draw.
    pub fn allocate_roles(&self, id: u64) -> Result<Vec<SuspectRole>> {
        self.with_interview(id, |interview| {
            expect_status(interview, InterviewStatus::SelectingPositions)?;

            let packet = interview.packet.as_ref().ok_or_else(|| {
                Error::InvalidOperation(format!("interview {id} has no packet selected"))
            })?;

            interview.roles = draw_unique(&packet.roles, ROLES_PER_INTERVIEW);
            Ok(interview.roles.clone())
        })
    }

    /// Draw both question sets from the selected packet.
    ///
    /// Returns `(primary, secondary)`. Overwrites any previous draw.
    pub fn allocate_questions(&self, id: u64) -> Result<(Vec<String>, Vec<String>)> {
        self.with_interview(id, |interview| {
            expect_status(interview, InterviewStatus::SelectingPositions)?;

            let packet = interview.packet.as_ref().ok_or_else(|| {
                Error::InvalidOperation(format!("interview {id} has no packet selected"))
            })?;

            interview.primary_questions =
                draw_unique(&packet.primary_questions, PRIMARY_QUESTIONS_PER_INTERVIEW);
            interview.secondary_questions =
                draw_unique(&packet.secondary_questions, SECONDARY_QUESTIONS_PER_INTERVIEW);

            Ok((
                interview.primary_questions.clone(),
                interview.secondary_questions.clone(),
            ))
        })
    }

    /// Draw the suspect's notes from the global pool.
    ///
    /// Overwrites any previous draw.
    pub fn allocate_suspect_notes(&self, id: u64) -> Result<Vec<String>> {
        self.with_interview(id, |interview| {
            expect_status(interview, InterviewStatus::SelectingPositions)?;

            interview.suspect_notes =
                draw_unique(&self.config.suspect_notes, SUSPECT_NOTES_PER_INTERVIEW);
            Ok(interview.suspect_notes.clone())
        })
    }

    /// Move a set-up interview into `InProgress`.
    pub fn start_interview(&self, id: u64) -> Result<InterviewSnapshot> {
        self.with_interview(id, |interview| {
            expect_status(interview, InterviewStatus::SelectingPositions)?;

            if interview.packet.is_none() || interview.roles.is_empty() {
                return Err(Error::InvalidOperation(format!(
                    "interview {id} needs a packet and drawn roles before it starts"
                )));
            }

            interview.status = InterviewStatus::InProgress;
            Ok(interview.snapshot())
        })
    }

    /// Finalize with the interviewer's guess about the suspect.
    ///
    /// Compares the guess against whether the hidden role is human, sets the
    /// outcome, marks the interview finished, and records it to the sink.
    pub fn guess_role(&self, id: u64, guessed_robot: bool) -> Result<InterviewOutcome> {
        self.with_interview(id, |interview| {
            expect_status(interview, InterviewStatus::InProgress)?;

            let actual = hidden_role_kind(interview)?;
            let outcome = match (guessed_robot, actual == RoleKind::Human) {
                (true, true) => InterviewOutcome::WronglyGuessedRobot,
                (true, false) => InterviewOutcome::CorrectlyGuessedRobot,
                (false, true) => InterviewOutcome::CorrectlyGuessedHuman,
                (false, false) => InterviewOutcome::WronglyGuessedHuman,
            };

            self.finalize(interview, outcome);
            Ok(outcome)
        })
    }

    /// Finalize with the violent robot attacking the interviewer.
    ///
    /// Only a `ViolentRobot` hidden role may do this; a plain robot or a
    /// human suspect fails with `InvalidOperation` and the interview keeps
    /// running.
    pub fn kill_interviewer(&self, id: u64) -> Result<InterviewOutcome> {
        self.with_interview(id, |interview| {
            expect_status(interview, InterviewStatus::InProgress)?;

            if hidden_role_kind(interview)? != RoleKind::ViolentRobot {
                return Err(Error::InvalidOperation(format!(
                    "suspect in interview {id} is not a violent robot, so cannot kill the interviewer"
                )));
            }

            self.finalize(interview, InterviewOutcome::KilledInterviewer);
            Ok(InterviewOutcome::KilledInterviewer)
        })
    }

    /// Recycle a finished interview into a fresh one at the same id.
    ///
    /// The replacement starts at `SelectingPositions` with empty content and
    /// keeps both connection handles; the old interview is discarded without
    /// a sink record (finalize already recorded the completed game).
    pub fn reset_interview(&self, id: u64) -> Result<InterviewSnapshot> {
        let replacement = self.registry.replace_with(id, |old| {
            if old.status != InterviewStatus::Finished {
                return Err(Error::InvalidState {
                    id,
                    expected: InterviewStatus::Finished,
                    actual: old.status,
                });
            }

            let mut fresh = Interview::new(id);
            fresh.status = InterviewStatus::SelectingPositions;
            fresh.interviewer_connection = old.interviewer_connection.clone();
            fresh.suspect_connection = old.suspect_connection.clone();
            Ok(fresh)
        })?;

        let snapshot = replacement.lock().snapshot();
        tracing::info!(id, "interview reset");
        Ok(snapshot)
    }

    /// Tear an interview down.
    ///
    /// An interview that had reached `InProgress` or beyond is recorded to
    /// the sink before it is discarded.
    pub fn remove_interview(&self, id: u64) -> Result<()> {
        let removed = self.registry.remove(id).ok_or(Error::NotFound(id))?;
        let interview = removed.lock();

        if interview.status >= InterviewStatus::InProgress {
            self.sink.record(&interview.snapshot());
        }

        tracing::info!(id, status = %interview.status, "interview removed");
        Ok(())
    }

    /// Snapshot of an interview.
    pub fn get_snapshot(&self, id: u64) -> Result<InterviewSnapshot> {
        self.with_interview(id, |interview| Ok(interview.snapshot()))
    }

    /// Snapshot of an interview, requiring a specific status.
    pub fn get_snapshot_expecting(
        &self,
        id: u64,
        expected: InterviewStatus,
    ) -> Result<InterviewSnapshot> {
        self.with_interview(id, |interview| {
            expect_status(interview, expected)?;
            Ok(interview.snapshot())
        })
    }

    /// Snapshots of all registered interviews, ordered by id.
    pub fn list_interviews(&self) -> Vec<InterviewSnapshot> {
        self.registry
            .entries()
            .iter()
            .map(|entry| entry.lock().snapshot())
            .collect()
    }

    /// Run `f` under the interview's lock.
    fn with_interview<T>(
        &self,
        id: u64,
        f: impl FnOnce(&mut Interview) -> Result<T>,
    ) -> Result<T> {
        let shared = self.registry.get(id)?;
        let mut interview = shared.lock();
        f(&mut interview)
    }

    fn finalize(&self, interview: &mut Interview, outcome: InterviewOutcome) {
        interview.status = InterviewStatus::Finished;
        interview.outcome = Some(outcome);

        self.sink.record(&interview.snapshot());
        tracing::info!(id = interview.id, outcome = %outcome, "interview finished");
    }
}

fn expect_status(interview: &Interview, expected: InterviewStatus) -> Result<()> {
    if interview.status != expected {
        return Err(Error::InvalidState {
            id: interview.id,
            expected,
            actual: interview.status,
        });
    }
    Ok(())
}

/// Kind of `roles[0]`, the suspect's hidden role.
fn hidden_role_kind(interview: &Interview) -> Result<RoleKind> {
    interview.roles.first().map(|role| role.kind).ok_or_else(|| {
        Error::InvalidOperation(format!("interview {} has no roles drawn", interview.id))
    })
}
