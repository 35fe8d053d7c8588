//=========================================================================
// State Machine
//=========================================================================
//
// Registers game states by id and runs exactly one of them at a time.
//
// States are stored in a HashMap and keep their own data between
// activations. Entering a state runs its preload, hands the declared
// assets to the loader, and only calls create once every entry has
// finished. Optional fonts go out in a separate background batch that
// survives transitions and never holds up create. Commands queued by
// states are applied at the tick boundary.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;

use log::{debug, error, info, trace, warn};

//=== Internal Dependencies ===============================================

use super::{GameState, StateCommand, StateId};
use crate::core::assets::{AssetEntry, AssetLoader, BatchId, LoadEvent, LoadTracker};
use crate::core::error::{RuntimeError, UnknownStateError};
use crate::core::globals::GlobalContext;

//=== Phase ===============================================================

/// Where the active state is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No state has been entered yet, or loading failed.
    Idle,

    /// Waiting for the active state's assets.
    Loading,

    /// `create` has run; `update` is called every tick.
    Running,
}

/// Batch currently being loaded for the active state.
struct InFlight {
    batch: BatchId,
    tracker: LoadTracker,
}

//=== StateMachine ========================================================

pub struct StateMachine {
    states: HashMap<StateId, Box<dyn GameState>>,
    initial: Option<StateId>,
    active: Option<StateId>,
    phase: Phase,
    in_flight: Option<InFlight>,
    /// Background batches and how many of their entries are outstanding.
    background: HashMap<BatchId, usize>,
    loader: Box<dyn AssetLoader>,
    next_batch: BatchId,
}

impl StateMachine {
    //--- Construction -----------------------------------------------------

    pub fn new(loader: Box<dyn AssetLoader>) -> Self {
        Self {
            states: HashMap::new(),
            initial: None,
            active: None,
            phase: Phase::Idle,
            in_flight: None,
            background: HashMap::new(),
            loader,
            next_batch: 0,
        }
    }

    //--- Registration -----------------------------------------------------

    /// Registers a state under `id`, replacing any previous registration.
    pub fn register<T>(&mut self, id: StateId, state: T)
    where
        T: GameState + 'static,
    {
        self.insert(id, Box::new(state));
    }

    /// Registers a state and marks it as the one entered on start.
    pub fn register_initial<T>(&mut self, id: StateId, state: T)
    where
        T: GameState + 'static,
    {
        self.register(id, state);
        self.set_initial(id);
    }

    /// Marks an already registered (or soon to be registered) state as the
    /// one entered on start.
    pub fn set_initial(&mut self, id: StateId) {
        if let Some(previous) = self.initial.replace(id) {
            warn!(target: "state", "Initial state changed from {} to {}", previous, id);
        }
    }

    fn insert(&mut self, id: StateId, state: Box<dyn GameState>) {
        if self.states.insert(id, state).is_some() {
            warn!(target: "state", "State {} was already registered and has been replaced", id);
        } else {
            debug!(target: "state", "Registered state {}", id);
        }
    }

    //--- Queries ----------------------------------------------------------

    pub fn active(&self) -> Option<StateId> {
        self.active
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_registered(&self, id: StateId) -> bool {
        self.states.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    //--- Transitions ------------------------------------------------------

    /// Enters the initial state.
    pub fn start(&mut self, ctx: &mut GlobalContext) -> Result<(), UnknownStateError> {
        match self.initial {
            Some(initial) => {
                debug!(target: "state", "Starting state machine with initial state {}", initial);
                self.transition(initial, ctx)
            }
            None => {
                warn!(target: "state", "No initial state set, nothing to start");
                Ok(())
            }
        }
    }

    /// Leaves the active state and enters `id`.
    ///
    /// An unregistered `id` leaves the active state untouched.
    pub fn transition(&mut self, id: StateId, ctx: &mut GlobalContext) -> Result<(), UnknownStateError> {
        if !self.states.contains_key(&id) {
            warn!(target: "state", "Attempted to start unregistered state {}", id);
            return Err(UnknownStateError::new(id.name()));
        }

        if let Some(previous) = self.active.take() {
            debug!(target: "state", "Leaving state {}", previous);
            if let Some(state) = self.states.get_mut(&previous) {
                state.shutdown(ctx);
            }
        }

        if let Some(flight) = self.in_flight.take() {
            debug!(target: "assets", "Cancelling batch {} of the previous state", flight.batch);
            self.loader.cancel(flight.batch);
        }
        ctx.teardown_state();

        info!(target: "state", "Entering state {}", id);
        self.active = Some(id);
        self.phase = Phase::Loading;

        let Some(state) = self.states.get_mut(&id) else {
            return Err(UnknownStateError::new(id.name()));
        };
        state.preload(ctx);

        let (background, pending): (Vec<AssetEntry>, Vec<AssetEntry>) = ctx
            .load
            .take()
            .into_iter()
            .filter(|entry| !ctx.assets.contains(entry.kind, &entry.key))
            .partition(AssetEntry::is_background);

        if !background.is_empty() {
            self.next_batch += 1;
            let batch = self.next_batch;
            debug!(target: "assets", "State {} loads {} entries in the background (batch {})", id, background.len(), batch);
            self.background.insert(batch, background.len());
            self.loader.start(batch, background);
        }

        if pending.is_empty() {
            self.phase = Phase::Running;
            state.create(ctx);
            return Ok(());
        }

        self.next_batch += 1;
        let batch = self.next_batch;
        debug!(target: "assets", "State {} requested {} assets (batch {})", id, pending.len(), batch);

        let tracker = LoadTracker::new(&pending);
        self.loader.start(batch, pending);
        self.in_flight = Some(InFlight { batch, tracker });
        Ok(())
    }

    /// Like [`transition`](Self::transition), addressed by registration name.
    pub fn transition_named(&mut self, name: &str, ctx: &mut GlobalContext) -> Result<(), UnknownStateError> {
        let id = name.parse::<StateId>()?;
        self.transition(id, ctx)
    }

    //--- Update Loop ------------------------------------------------------

    /// Applies finished loads for the active state.
    ///
    /// Calls `load_progress` after every entry and `create` after the last
    /// one. A failing required entry is fatal. Background entries are
    /// stored whenever they arrive, whichever state is active.
    pub fn poll_loading(&mut self, ctx: &mut GlobalContext) -> Result<(), RuntimeError> {
        for event in self.loader.poll() {
            if self.background.contains_key(&event.batch) {
                self.finish_background(event, ctx);
                continue;
            }

            let Some(flight) = self.in_flight.as_mut() else {
                trace!(target: "assets", "Dropping event for stale batch {}", event.batch);
                continue;
            };
            if event.batch != flight.batch {
                trace!(target: "assets", "Dropping event for stale batch {}", event.batch);
                continue;
            }

            let failed = match event.outcome {
                Ok(bytes) => {
                    ctx.store_asset(&event.entry, bytes);
                    false
                }
                Err(err) if event.entry.optional => {
                    warn!(target: "assets", "Optional {} unavailable, continuing: {}", event.entry.kind, err);
                    true
                }
                Err(err) => {
                    error!(target: "assets", "Required {} failed to load: {}", event.entry.kind, err);
                    let batch = flight.batch;
                    self.loader.cancel(batch);
                    self.in_flight = None;
                    self.phase = Phase::Idle;
                    ctx.show_fatal(&err.to_string());
                    return Err(err.into());
                }
            };

            if !flight.tracker.finish(&event.entry, failed) {
                continue;
            }
            let progress = flight.tracker.progress();
            let done = flight.tracker.is_done();

            let Some(state) = self.active.and_then(|id| self.states.get_mut(&id)) else {
                continue;
            };
            state.load_progress(ctx, progress);

            if done {
                self.in_flight = None;
                self.phase = Phase::Running;
                debug!(target: "assets", "All {} assets loaded", progress.total);
                state.create(ctx);
            }
        }
        Ok(())
    }

    fn finish_background(&mut self, event: LoadEvent, ctx: &mut GlobalContext) {
        match event.outcome {
            Ok(bytes) => {
                debug!(target: "assets", "Background {} '{}' arrived", event.entry.kind, event.entry.key);
                ctx.store_asset(&event.entry, bytes);
            }
            Err(err) => {
                warn!(target: "assets", "Background {} unavailable, keeping fallback: {}", event.entry.kind, err);
            }
        }

        if let Some(remaining) = self.background.get_mut(&event.batch) {
            *remaining = remaining.saturating_sub(1);
            if *remaining == 0 {
                self.background.remove(&event.batch);
            }
        }
    }

    /// Runs `update` on the active state once it has been created.
    pub fn update_active(&mut self, ctx: &mut GlobalContext) {
        if self.phase != Phase::Running {
            return;
        }
        if let Some(state) = self.active.and_then(|id| self.states.get_mut(&id)) {
            state.update(ctx);
        }
    }

    /// Applies commands queued in `ctx.transitions` in FIFO order,
    /// including any queued while applying them.
    pub fn process_commands(&mut self, ctx: &mut GlobalContext) -> Result<(), RuntimeError> {
        loop {
            let commands = ctx.transitions.take();
            if commands.is_empty() {
                return Ok(());
            }

            for command in commands {
                match command {
                    StateCommand::Register(id, state) => self.insert(id, state),
                    StateCommand::Start(id) => self.transition(id, ctx)?,
                }
            }
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::core::assets::{AssetKind, LoadProgress};
    use crate::core::error::AssetLoadError;
    use crate::testing::{context, ManualLoader};

    //--- Recorder State ------------------------------------------------------

    type Log = Arc<Mutex<Vec<String>>>;

    /// Records every lifecycle call and declares the given assets.
    struct Recorder {
        name: &'static str,
        log: Log,
        assets: Vec<(AssetKind, &'static str)>,
    }

    impl Recorder {
        fn new(name: &'static str, log: &Log) -> Self {
            Self {
                name,
                log: Arc::clone(log),
                assets: Vec::new(),
            }
        }

        fn with(mut self, kind: AssetKind, key: &'static str) -> Self {
            self.assets.push((kind, key));
            self
        }

        fn record(&self, event: &str) {
            self.log.lock().unwrap().push(format!("{}.{}", self.name, event));
        }
    }

    impl GameState for Recorder {
        fn preload(&mut self, ctx: &mut GlobalContext) {
            self.record("preload");
            for (kind, key) in &self.assets {
                ctx.load.declare(AssetEntry::new(*kind, *key, format!("{}.bin", key)));
            }
        }

        fn create(&mut self, _ctx: &mut GlobalContext) {
            self.record("create");
        }

        fn update(&mut self, _ctx: &mut GlobalContext) {
            self.record("update");
        }

        fn shutdown(&mut self, _ctx: &mut GlobalContext) {
            self.record("shutdown");
        }

        fn load_progress(&mut self, _ctx: &mut GlobalContext, progress: LoadProgress) {
            self.record(&format!("progress({}/{})", progress.completed, progress.total));
        }
    }

    fn drain(log: &Log) -> Vec<String> {
        std::mem::take(&mut *log.lock().unwrap())
    }

    //--- Transition Tests -------------------------------------------------

    #[test]
    fn unknown_target_leaves_active_state_untouched() {
        let log = Log::default();
        let loader = ManualLoader::new();
        let (mut ctx, _audio) = context();
        let mut machine = StateMachine::new(Box::new(loader));
        machine.register(StateId::GameMenu, Recorder::new("menu", &log));
        machine.transition(StateId::GameMenu, &mut ctx).unwrap();
        drain(&log);

        let err = machine.transition(StateId::Credits, &mut ctx).unwrap_err();

        assert_eq!(err.name, "Credits");
        assert_eq!(machine.active(), Some(StateId::GameMenu));
        assert_eq!(machine.phase(), Phase::Running);
        assert!(drain(&log).is_empty());
    }

    #[test]
    fn unknown_name_is_reported() {
        let (mut ctx, _audio) = context();
        let mut machine = StateMachine::new(Box::new(ManualLoader::new()));

        let err = machine.transition_named("Highscores", &mut ctx).unwrap_err();
        assert_eq!(err, UnknownStateError::new("Highscores"));
        assert_eq!(machine.active(), None);
    }

    #[test]
    fn create_waits_for_assets() {
        let log = Log::default();
        let loader = ManualLoader::new();
        let (mut ctx, _audio) = context();
        let mut machine = StateMachine::new(Box::new(loader.clone()));
        machine.register(
            StateId::Preload,
            Recorder::new("preload", &log)
                .with(AssetKind::Image, "menu-bg")
                .with(AssetKind::Audio, "dangerous"),
        );

        machine.transition(StateId::Preload, &mut ctx).unwrap();
        assert_eq!(drain(&log), ["preload.preload"]);
        assert_eq!(machine.phase(), Phase::Loading);

        machine.update_active(&mut ctx);
        assert!(drain(&log).is_empty());

        loader.complete("menu-bg");
        machine.poll_loading(&mut ctx).unwrap();
        assert_eq!(drain(&log), ["preload.progress(1/2)"]);

        loader.complete("dangerous");
        machine.poll_loading(&mut ctx).unwrap();
        assert_eq!(drain(&log), ["preload.progress(2/2)", "preload.create"]);
        assert_eq!(machine.phase(), Phase::Running);
        assert!(ctx.assets.contains(AssetKind::Image, "menu-bg"));
    }

    #[test]
    fn no_assets_creates_immediately() {
        let log = Log::default();
        let (mut ctx, _audio) = context();
        let mut machine = StateMachine::new(Box::new(ManualLoader::new()));
        machine.register(StateId::Options, Recorder::new("options", &log));

        machine.transition(StateId::Options, &mut ctx).unwrap();
        assert_eq!(drain(&log), ["options.preload", "options.create"]);
    }

    #[test]
    fn previous_state_shuts_down_before_next_preloads() {
        let log = Log::default();
        let (mut ctx, _audio) = context();
        let mut machine = StateMachine::new(Box::new(ManualLoader::new()));
        machine.register(StateId::GameMenu, Recorder::new("menu", &log));
        machine.register(StateId::Credits, Recorder::new("credits", &log));

        machine.transition(StateId::GameMenu, &mut ctx).unwrap();
        ctx.stage.add_text(0.0, 0.0, "Start", crate::core::stage::TextStyle::new("x", 10.0));
        drain(&log);

        machine.transition(StateId::Credits, &mut ctx).unwrap();
        assert_eq!(
            drain(&log),
            ["menu.shutdown", "credits.preload", "credits.create"]
        );
        assert!(ctx.stage.is_empty());
    }

    #[test]
    fn cached_assets_are_not_requested_again() {
        let log = Log::default();
        let loader = ManualLoader::new();
        let (mut ctx, _audio) = context();
        let mut machine = StateMachine::new(Box::new(loader.clone()));
        machine.register(StateId::GameMenu, Recorder::new("menu", &log).with(AssetKind::Image, "menu-bg"));
        machine.register(StateId::Options, Recorder::new("options", &log));

        machine.transition(StateId::GameMenu, &mut ctx).unwrap();
        loader.complete_all();
        machine.poll_loading(&mut ctx).unwrap();

        machine.transition(StateId::Options, &mut ctx).unwrap();
        machine.transition(StateId::GameMenu, &mut ctx).unwrap();

        assert_eq!(loader.requested_keys(), ["menu-bg"]);
        assert_eq!(machine.phase(), Phase::Running);
    }

    #[test]
    fn stale_batch_events_are_ignored() {
        let log = Log::default();
        let loader = ManualLoader::new();
        let (mut ctx, _audio) = context();
        let mut machine = StateMachine::new(Box::new(loader.clone()));
        machine.register(StateId::Boot, Recorder::new("boot", &log).with(AssetKind::Image, "stars"));
        machine.register(StateId::Preload, Recorder::new("preload", &log).with(AssetKind::Image, "menu-bg"));

        machine.transition(StateId::Boot, &mut ctx).unwrap();
        machine.transition(StateId::Preload, &mut ctx).unwrap();
        drain(&log);

        // The cancelled boot batch still reports.
        loader.complete_cancelled("stars");
        machine.poll_loading(&mut ctx).unwrap();

        assert!(drain(&log).is_empty());
        assert!(!ctx.assets.contains(AssetKind::Image, "stars"));
        assert_eq!(machine.phase(), Phase::Loading);
    }

    #[test]
    fn optional_failure_does_not_block_create() {
        let log = Log::default();
        let loader = ManualLoader::new();
        let (mut ctx, _audio) = context();
        let mut machine = StateMachine::new(Box::new(loader.clone()));
        machine.register(
            StateId::Preload,
            Recorder::new("preload", &log)
                .with(AssetKind::Font, "TheMinion")
                .with(AssetKind::Image, "menu-bg"),
        );

        machine.transition(StateId::Preload, &mut ctx).unwrap();
        loader.fail("TheMinion");
        loader.complete("menu-bg");
        machine.poll_loading(&mut ctx).unwrap();

        assert!(drain(&log).contains(&"preload.create".to_owned()));
        assert!(!ctx.stage.has_font("TheMinion"));
    }

    #[test]
    fn loaded_font_becomes_available_on_stage() {
        let log = Log::default();
        let loader = ManualLoader::new();
        let (mut ctx, _audio) = context();
        let mut machine = StateMachine::new(Box::new(loader.clone()));
        machine.register(StateId::Preload, Recorder::new("preload", &log).with(AssetKind::Font, "TheMinion"));

        machine.transition(StateId::Preload, &mut ctx).unwrap();
        loader.complete_all();
        machine.poll_loading(&mut ctx).unwrap();

        assert!(ctx.stage.has_font("TheMinion"));
    }

    #[test]
    fn pending_font_does_not_hold_up_create() {
        let log = Log::default();
        let loader = ManualLoader::new();
        let (mut ctx, _audio) = context();
        let mut machine = StateMachine::new(Box::new(loader.clone()));
        machine.register(
            StateId::Preload,
            Recorder::new("preload", &log)
                .with(AssetKind::Font, "TheMinion")
                .with(AssetKind::Image, "menu-bg"),
        );

        machine.transition(StateId::Preload, &mut ctx).unwrap();
        loader.complete("menu-bg");
        machine.poll_loading(&mut ctx).unwrap();

        assert_eq!(
            drain(&log),
            ["preload.preload", "preload.progress(1/1)", "preload.create"]
        );
        assert_eq!(machine.phase(), Phase::Running);
        assert_eq!(loader.pending_keys(), ["TheMinion"]);
    }

    #[test]
    fn late_font_is_stored_after_state_change() {
        let log = Log::default();
        let loader = ManualLoader::new();
        let (mut ctx, _audio) = context();
        let mut machine = StateMachine::new(Box::new(loader.clone()));
        machine.register(StateId::Preload, Recorder::new("preload", &log).with(AssetKind::Font, "TheMinion"));
        machine.register(StateId::GameMenu, Recorder::new("menu", &log));

        machine.transition(StateId::Preload, &mut ctx).unwrap();
        machine.transition(StateId::GameMenu, &mut ctx).unwrap();
        assert_eq!(loader.pending_keys(), ["TheMinion"]);
        drain(&log);

        loader.complete("TheMinion");
        machine.poll_loading(&mut ctx).unwrap();

        assert!(ctx.stage.has_font("TheMinion"));
        assert!(drain(&log).is_empty());
        assert_eq!(machine.active(), Some(StateId::GameMenu));
    }

    #[test]
    fn required_failure_is_fatal_and_shown() {
        let log = Log::default();
        let loader = ManualLoader::new();
        let (mut ctx, _audio) = context();
        let mut machine = StateMachine::new(Box::new(loader.clone()));
        machine.register(StateId::Boot, Recorder::new("boot", &log).with(AssetKind::Image, "stars"));

        machine.transition(StateId::Boot, &mut ctx).unwrap();
        loader.fail("stars");
        let err = machine.poll_loading(&mut ctx).unwrap_err();

        assert!(matches!(err, RuntimeError::AssetLoad(AssetLoadError::NotFound { .. })));
        assert!(!drain(&log).contains(&"boot.create".to_owned()));
        assert_eq!(machine.phase(), Phase::Idle);
        assert_eq!(ctx.stage.len(), 1);
    }

    //--- Command Tests ----------------------------------------------------

    #[test]
    fn commands_apply_in_order() {
        let log = Log::default();
        let (mut ctx, _audio) = context();
        let mut machine = StateMachine::new(Box::new(ManualLoader::new()));

        ctx.transitions.register(StateId::GameOver, Box::new(Recorder::new("over", &log)));
        ctx.transitions.start(StateId::GameOver);
        machine.process_commands(&mut ctx).unwrap();

        assert_eq!(machine.active(), Some(StateId::GameOver));
        assert!(ctx.transitions.is_empty());
    }

    #[test]
    fn unknown_start_in_queue_is_fatal() {
        let (mut ctx, _audio) = context();
        let mut machine = StateMachine::new(Box::new(ManualLoader::new()));

        ctx.transitions.start(StateId::TheGame);
        let err = machine.process_commands(&mut ctx).unwrap_err();

        assert_eq!(err, RuntimeError::UnknownState(UnknownStateError::new("TheGame")));
    }

    #[test]
    fn update_runs_only_while_running() {
        let log = Log::default();
        let loader = ManualLoader::new();
        let (mut ctx, _audio) = context();
        let mut machine = StateMachine::new(Box::new(loader.clone()));
        machine.register_initial(StateId::Boot, Recorder::new("boot", &log).with(AssetKind::Script, "splash"));

        machine.start(&mut ctx).unwrap();
        machine.update_active(&mut ctx);
        loader.complete_all();
        machine.poll_loading(&mut ctx).unwrap();
        machine.update_active(&mut ctx);

        assert_eq!(
            drain(&log),
            ["boot.preload", "boot.progress(1/1)", "boot.create", "boot.update"]
        );
    }
}
