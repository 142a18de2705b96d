use crate::api::{Program, ProgramDraft};

/// Where the shell currently is. Mirrors the backend's resource paths:
/// the list at `/programs`, one program at `/programs/:id`, creation at
/// `/programs/new`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    ProgramList,
    ProgramDetail { id: String },
    ProgramCreate,
}

/// Requests from the UI thread to the runtime worker. Every data command
/// carries the activation's request id so the matching event can be
/// recognized (or discarded) later.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StudioCommand {
    LoadPrograms {
        request_id: u64,
    },
    LoadProgram {
        request_id: u64,
        id: String,
    },
    CreateProgram {
        request_id: u64,
        draft: ProgramDraft,
    },
    Shutdown,
}

/// Outcomes flowing back from the runtime worker. Failure events carry
/// the user-facing message only; the cause is logged by the worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StudioEvent {
    ProgramsLoaded {
        request_id: u64,
        programs: Vec<Program>,
    },
    ProgramsFailed {
        request_id: u64,
        message: String,
    },
    ProgramLoaded {
        request_id: u64,
        program: Program,
    },
    ProgramFailed {
        request_id: u64,
        message: String,
    },
    ProgramCreated {
        request_id: u64,
        program: Program,
    },
    ProgramCreateFailed {
        request_id: u64,
        message: String,
    },
}

impl StudioEvent {
    pub fn request_id(&self) -> u64 {
        match self {
            Self::ProgramsLoaded { request_id, .. }
            | Self::ProgramsFailed { request_id, .. }
            | Self::ProgramLoaded { request_id, .. }
            | Self::ProgramFailed { request_id, .. }
            | Self::ProgramCreated { request_id, .. }
            | Self::ProgramCreateFailed { request_id, .. } => *request_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::api::Program;

    use super::StudioEvent;

    #[test]
    fn request_id_is_exposed_for_every_event_variant() {
        let program = Program {
            id: "p-1".to_owned(),
            name: "Cardio".to_owned(),
            ..Program::default()
        };

        let events = vec![
            StudioEvent::ProgramsLoaded {
                request_id: 1,
                programs: vec![program.clone()],
            },
            StudioEvent::ProgramsFailed {
                request_id: 2,
                message: "failed".to_owned(),
            },
            StudioEvent::ProgramLoaded {
                request_id: 3,
                program: program.clone(),
            },
            StudioEvent::ProgramFailed {
                request_id: 4,
                message: "failed".to_owned(),
            },
            StudioEvent::ProgramCreated {
                request_id: 5,
                program,
            },
            StudioEvent::ProgramCreateFailed {
                request_id: 6,
                message: "failed".to_owned(),
            },
        ];

        let ids: Vec<_> = events.iter().map(StudioEvent::request_id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6]);
    }
}
