//! Metrics sink boundary.
//!
//! Compile logic MUST NOT depend on obs::metrics directly.
//! All instrumentation flows through CompileEvent and CompileSink.
use crate::{aggregate::AggregateFunction, error::ErrorOrigin, obs::metrics};
use std::cell::RefCell;

thread_local! {
    static SINK_OVERRIDE: RefCell<Option<*const dyn CompileSink>> = const { RefCell::new(None) };
}

///
/// CompileEvent
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CompileEvent {
    SpecParsed {
        aggregates: usize,
        predicates: usize,
    },
    Rejected {
        origin: ErrorOrigin,
    },
    RuleGenerated {
        function: AggregateFunction,
        overridden: bool,
    },
}

///
/// CompileSink
///

pub trait CompileSink {
    fn record(&self, event: CompileEvent);
}

/// GlobalCompileSink
/// Default thread-local sink that writes into compile counters.
/// Acts as the concrete sink when no scoped override is installed.

pub(crate) struct GlobalCompileSink;

impl CompileSink for GlobalCompileSink {
    fn record(&self, event: CompileEvent) {
        match event {
            CompileEvent::SpecParsed {
                aggregates,
                predicates,
            } => metrics::with_state_mut(|m| {
                m.specs_parsed = m.specs_parsed.saturating_add(1);
                m.aggregates_parsed = m.aggregates_parsed.saturating_add(aggregates as u64);
                m.predicates_parsed = m.predicates_parsed.saturating_add(predicates as u64);
            }),

            CompileEvent::Rejected { origin } => metrics::with_state_mut(|m| {
                m.rejected = m.rejected.saturating_add(1);
                let entry = m.rejections.entry(origin.to_string()).or_default();
                *entry = entry.saturating_add(1);
            }),

            CompileEvent::RuleGenerated { overridden, .. } => metrics::with_state_mut(|m| {
                m.rules_generated = m.rules_generated.saturating_add(1);
                if overridden {
                    m.rules_overridden = m.rules_overridden.saturating_add(1);
                }
            }),
        }
    }
}

pub(crate) const GLOBAL_COMPILE_SINK: GlobalCompileSink = GlobalCompileSink;

pub(crate) fn record(event: CompileEvent) {
    let override_ptr = SINK_OVERRIDE.with(|cell| *cell.borrow());
    if let Some(ptr) = override_ptr {
        // SAFETY:
        // - `ptr` was produced from a valid `&dyn CompileSink` in `with_compile_sink`.
        // - `with_compile_sink` restores the previous pointer before returning,
        //   including unwind paths via `Guard::drop`.
        // - `record` is synchronous and never stores `ptr` beyond this call.
        // - Only a shared reference is materialized, matching the original borrow.
        unsafe { (&*ptr).record(event) };
    } else {
        GLOBAL_COMPILE_SINK.record(event);
    }
}

/// Snapshot the current thread's compile counters.
#[must_use]
pub fn metrics_report() -> metrics::CompileReport {
    metrics::report()
}

/// Reset all compile counters.
pub fn metrics_reset_all() {
    metrics::reset_all();
}

/// Run a closure with a temporary sink override.
#[cfg(test)]
pub(crate) fn with_compile_sink<T>(sink: &dyn CompileSink, f: impl FnOnce() -> T) -> T {
    struct Guard(Option<*const dyn CompileSink>);

    impl Drop for Guard {
        fn drop(&mut self) {
            SINK_OVERRIDE.with(|cell| {
                *cell.borrow_mut() = self.0;
            });
        }
    }

    // SAFETY:
    // - `sink_ptr` is installed only for this dynamic scope.
    // - `Guard` restores the previous slot on all exits, including panic.
    // - `record` only dereferences synchronously and never persists `sink_ptr`.
    let sink_ptr =
        unsafe { std::mem::transmute::<&dyn CompileSink, *const dyn CompileSink>(sink) };
    let prev = SINK_OVERRIDE.with(|cell| cell.borrow_mut().replace(sink_ptr));
    let _guard = Guard(prev);

    f()
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use std::{
        panic::{AssertUnwindSafe, catch_unwind},
        sync::atomic::{AtomicUsize, Ordering},
    };

    struct CountingSink<'a> {
        calls: &'a AtomicUsize,
    }

    impl CompileSink for CountingSink<'_> {
        fn record(&self, _: CompileEvent) {
            self.calls.fetch_add(1, Ordering::SeqCst);
        }
    }

    const EVENT: CompileEvent = CompileEvent::RuleGenerated {
        function: AggregateFunction::Sum,
        overridden: false,
    };

    #[test]
    fn with_compile_sink_routes_and_restores_nested_overrides() {
        SINK_OVERRIDE.with(|cell| {
            *cell.borrow_mut() = None;
        });

        let outer_calls = AtomicUsize::new(0);
        let inner_calls = AtomicUsize::new(0);
        let outer = CountingSink {
            calls: &outer_calls,
        };
        let inner = CountingSink {
            calls: &inner_calls,
        };

        // No override installed yet.
        record(EVENT);
        assert_eq!(outer_calls.load(Ordering::SeqCst), 0);

        with_compile_sink(&outer, || {
            record(EVENT);
            with_compile_sink(&inner, || record(EVENT));

            // Inner override was restored to outer override.
            record(EVENT);
        });

        assert_eq!(outer_calls.load(Ordering::SeqCst), 2);
        assert_eq!(inner_calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn with_compile_sink_restores_override_on_panic() {
        SINK_OVERRIDE.with(|cell| {
            *cell.borrow_mut() = None;
        });

        let calls = AtomicUsize::new(0);
        let sink = CountingSink { calls: &calls };

        let panicked = catch_unwind(AssertUnwindSafe(|| {
            with_compile_sink(&sink, || {
                record(EVENT);
                panic!("intentional panic for guard test");
            });
        }))
        .is_err();
        assert!(panicked);
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        // Guard restored TLS slot after unwind.
        SINK_OVERRIDE.with(|cell| {
            assert!(cell.borrow().is_none());
        });
    }

    #[test]
    fn global_sink_counts_rejections_by_origin() {
        metrics_reset_all();

        record(CompileEvent::Rejected {
            origin: ErrorOrigin::Predicate,
        });
        record(CompileEvent::Rejected {
            origin: ErrorOrigin::Predicate,
        });
        record(CompileEvent::RuleGenerated {
            function: AggregateFunction::Avg,
            overridden: true,
        });

        let report = metrics_report();
        assert_eq!(report.rejected, 2);
        assert_eq!(report.rejections, vec![("predicate".to_string(), 2)]);
        assert_eq!(report.rules_generated, 1);
        assert_eq!(report.rules_overridden, 1);
    }
}
