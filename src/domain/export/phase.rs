//! Phases of one export run.

use crate::domain::foundation::StateMachine;

/// Where an export run currently is.
///
/// ```text
/// Init → LoadCache → Fetch → DepartmentFilter → DiffAgainstCache
///      → (NothingNew | BatchProcess) → WriteOutputs → Done
/// ```
///
/// Every non-terminal phase may also move to `Failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportPhase {
    Init,
    LoadCache,
    Fetch,
    DepartmentFilter,
    DiffAgainstCache,
    NothingNew,
    BatchProcess,
    WriteOutputs,
    Done,
    Failed,
}

impl StateMachine for ExportPhase {
    fn valid_transitions(&self) -> Vec<Self> {
        use ExportPhase::*;
        match self {
            Init => vec![LoadCache, Failed],
            LoadCache => vec![Fetch, Failed],
            Fetch => vec![DepartmentFilter, Failed],
            DepartmentFilter => vec![DiffAgainstCache, Failed],
            DiffAgainstCache => vec![NothingNew, BatchProcess, Failed],
            NothingNew => vec![WriteOutputs, Failed],
            BatchProcess => vec![WriteOutputs, Failed],
            WriteOutputs => vec![Done, Failed],
            Done | Failed => vec![],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn happy_path_is_valid() {
        let path = [
            ExportPhase::LoadCache,
            ExportPhase::Fetch,
            ExportPhase::DepartmentFilter,
            ExportPhase::DiffAgainstCache,
            ExportPhase::BatchProcess,
            ExportPhase::WriteOutputs,
            ExportPhase::Done,
        ];
        let mut phase = ExportPhase::Init;
        for next in path {
            phase = phase.transition_to(next).unwrap();
        }
        assert!(phase.is_terminal());
    }

    #[test]
    fn cannot_skip_the_cache_diff() {
        assert!(ExportPhase::Fetch.transition_to(ExportPhase::BatchProcess).is_err());
        assert!(ExportPhase::DepartmentFilter.transition_to(ExportPhase::NothingNew).is_err());
    }

    #[test]
    fn any_running_phase_can_fail() {
        for phase in [ExportPhase::Init, ExportPhase::Fetch, ExportPhase::WriteOutputs] {
            assert!(phase.can_transition_to(&ExportPhase::Failed));
        }
        assert!(!ExportPhase::Done.can_transition_to(&ExportPhase::Failed));
    }
}
