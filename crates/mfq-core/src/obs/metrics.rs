use serde::{Deserialize, Serialize};
use std::{cell::RefCell, collections::BTreeMap};

///
/// CompileState
/// Ephemeral, in-memory counters for specification compilation.
///

#[derive(Clone, Debug, Default)]
pub(crate) struct CompileState {
    pub(crate) specs_parsed: u64,
    pub(crate) rejected: u64,
    pub(crate) aggregates_parsed: u64,
    pub(crate) predicates_parsed: u64,
    pub(crate) rules_generated: u64,
    pub(crate) rules_overridden: u64,
    pub(crate) rejections: BTreeMap<String, u64>,
}

///
/// CompileReport
/// Point-in-time snapshot of compile counters.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct CompileReport {
    pub specs_parsed: u64,
    pub rejected: u64,
    pub aggregates_parsed: u64,
    pub predicates_parsed: u64,
    pub rules_generated: u64,
    pub rules_overridden: u64,

    /// Rejections keyed by error origin label, sorted.
    pub rejections: Vec<(String, u64)>,
}

thread_local! {
    static COMPILE_STATE: RefCell<CompileState> = RefCell::new(CompileState::default());
}

/// Borrow metrics immutably.
pub(crate) fn with_state<R>(f: impl FnOnce(&CompileState) -> R) -> R {
    COMPILE_STATE.with(|m| f(&m.borrow()))
}

/// Borrow metrics mutably.
pub(crate) fn with_state_mut<R>(f: impl FnOnce(&mut CompileState) -> R) -> R {
    COMPILE_STATE.with(|m| f(&mut m.borrow_mut()))
}

/// Reset all counters.
pub(crate) fn reset_all() {
    with_state_mut(|m| *m = CompileState::default());
}

pub(crate) fn report() -> CompileReport {
    let snap = with_state(Clone::clone);

    CompileReport {
        specs_parsed: snap.specs_parsed,
        rejected: snap.rejected,
        aggregates_parsed: snap.aggregates_parsed,
        predicates_parsed: snap.predicates_parsed,
        rules_generated: snap.rules_generated,
        rules_overridden: snap.rules_overridden,
        rejections: snap.rejections.into_iter().collect(),
    }
}

///
/// TESTS
///
