use crate::review::{Decision, DecisionSource};
use crate::service::{GenerationResult, Generator, ServiceError};
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::sync::{LazyLock, Mutex, MutexGuard};

static CWD_LOCK: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));

pub(crate) struct DirGuard {
    original: PathBuf,
    _lock: MutexGuard<'static, ()>,
}

impl DirGuard {
    pub(crate) fn new(new_dir: &Path) -> Self {
        // Changing the process current working directory is global and not thread-safe.
        // Lock it so tests don't race even if a #[serial] annotation is missed.
        let lock = CWD_LOCK.lock().unwrap_or_else(|poison| poison.into_inner());
        let original = std::env::current_dir().unwrap();
        std::env::set_current_dir(new_dir).unwrap();
        Self {
            original,
            _lock: lock,
        }
    }
}

impl Drop for DirGuard {
    fn drop(&mut self) {
        let _ = std::env::set_current_dir(&self.original);
    }
}

/// A scripted [`Generator`] that replays canned replies in order.
///
/// Panics if the session asks for more replies than were scripted,
/// which turns an unexpected extra fetch into a test failure.
pub(crate) struct MockGenerator {
    script: RefCell<VecDeque<Result<GenerationResult, ServiceError>>>,
    calls: Rc<Cell<usize>>,
}

impl MockGenerator {
    pub(crate) fn new(script: Vec<Result<GenerationResult, ServiceError>>) -> Self {
        Self {
            script: RefCell::new(script.into()),
            calls: Rc::new(Cell::new(0)),
        }
    }

    /// A successful scripted reply with the given translation text.
    pub(crate) fn ok(text: &str) -> Result<GenerationResult, ServiceError> {
        Ok(GenerationResult {
            response: text.to_string(),
        })
    }

    /// A scripted transport failure.
    pub(crate) fn err() -> Result<GenerationResult, ServiceError> {
        Err(ServiceError::Transport("connection refused".to_string()))
    }

    /// Counter shared with the caller; incremented once per generate call.
    pub(crate) fn call_counter(&self) -> Rc<Cell<usize>> {
        Rc::clone(&self.calls)
    }
}

impl Generator for MockGenerator {
    fn generate(&self, _prompt: &str) -> Result<GenerationResult, ServiceError> {
        self.calls.set(self.calls.get() + 1);
        self.script
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| panic!("mock generator script exhausted"))
    }
}

/// A scripted [`DecisionSource`] that replays decisions in order and then
/// fails like a closed stdin.
pub(crate) struct ScriptedDecisions {
    queue: VecDeque<Decision>,
}

impl ScriptedDecisions {
    pub(crate) fn new(decisions: &[Decision]) -> Self {
        Self {
            queue: decisions.iter().copied().collect(),
        }
    }
}

impl DecisionSource for ScriptedDecisions {
    fn next_decision(&mut self) -> crate::error::Result<Decision> {
        self.queue.pop_front().ok_or_else(|| {
            crate::error::DeslangError::UserError(
                "stdin closed while waiting for a decision".to_string(),
            )
        })
    }
}
