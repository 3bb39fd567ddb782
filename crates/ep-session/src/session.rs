//! Listening-test session state machine
//!
//! One `Session` owns one test run: Setup → Running → Results, with a
//! per-trial sub-cycle of free switching followed by exactly one recorded
//! answer. All hidden-mapping translation happens here; the listener-facing
//! surface only ever sees option labels.

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use parking_lot::{Mutex, MutexGuard};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use ep_core::{EpError, EpResult, EqConfig};
use ep_dsp::auto_trim;

use crate::audio::AudioSink;
use crate::randomizer::{TrialPlan, generate_plan, mapping_balance};
use crate::stats::{SessionStatistics, summarize};

/// Test protocol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestMode {
    /// Sighted A/B switching
    Ab,
    /// Blind test with anonymous slots 1/2
    BlindAb,
    /// Blind test with a hidden reference X
    Abx,
}

/// Session life-cycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionState {
    Setup,
    Running,
    Results,
}

/// Where the live trim value came from.
///
/// A manual value sticks: nothing recomputes it behind the user's back,
/// only an explicit reset returns to the calculated trim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrimSource {
    Auto,
    Manual,
}

/// Listener-facing option label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OptionLabel {
    #[serde(rename = "a")]
    A,
    #[serde(rename = "b")]
    B,
    #[serde(rename = "x")]
    X,
    #[serde(rename = "1")]
    Slot1,
    #[serde(rename = "2")]
    Slot2,
}

impl OptionLabel {
    pub fn as_str(self) -> &'static str {
        match self {
            OptionLabel::A => "A",
            OptionLabel::B => "B",
            OptionLabel::X => "X",
            OptionLabel::Slot1 => "1",
            OptionLabel::Slot2 => "2",
        }
    }

    /// Labels the listener may switch between in a given mode
    fn playable_in(self, mode: TestMode) -> bool {
        match mode {
            TestMode::Ab => matches!(self, OptionLabel::A | OptionLabel::B),
            TestMode::BlindAb => matches!(self, OptionLabel::Slot1 | OptionLabel::Slot2),
            TestMode::Abx => matches!(self, OptionLabel::A | OptionLabel::B | OptionLabel::X),
        }
    }

    /// Labels that are valid answers in a given mode (X identifies nothing)
    fn answerable_in(self, mode: TestMode) -> bool {
        match mode {
            TestMode::Ab | TestMode::Abx => matches!(self, OptionLabel::A | OptionLabel::B),
            TestMode::BlindAb => matches!(self, OptionLabel::Slot1 | OptionLabel::Slot2),
        }
    }
}

impl std::str::FromStr for OptionLabel {
    type Err = EpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "A" | "a" => Ok(OptionLabel::A),
            "B" | "b" => Ok(OptionLabel::B),
            "X" | "x" => Ok(OptionLabel::X),
            "1" => Ok(OptionLabel::Slot1),
            "2" => Ok(OptionLabel::Slot2),
            other => Err(EpError::InvalidParam(format!(
                "unknown option label: {other}"
            ))),
        }
    }
}

impl std::fmt::Display for OptionLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A recorded trial outcome. Written exactly once per trial.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Answer {
    pub trial_index: usize,
    pub slot_one_is_a: bool,
    pub x_is_a: Option<bool>,
    pub choice: OptionLabel,
    /// ABX only: whether the choice matched the hidden reference
    pub correct: Option<bool>,
    pub response_time_ms: u64,
    /// Live trim at the moment of answering
    pub trim_db: f64,
}

/// One trial: its hidden assignment plus, eventually, its answer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trial {
    pub slot_one_is_a: bool,
    pub x_is_a: Option<bool>,
    pub answer: Option<Answer>,
}

impl Trial {
    fn from_plan(plan: TrialPlan) -> Self {
        Self {
            slot_one_is_a: plan.slot_one_is_a,
            x_is_a: plan.x_is_a,
            answer: None,
        }
    }
}

/// Parameters for a new session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionParams {
    pub mode: TestMode,
    pub config_a: EqConfig,
    pub config_b: EqConfig,
    pub total_trials: usize,
    /// Start with this trim instead of the calculated one
    pub trim_override_db: Option<f64>,
}

/// Blind-safe projection of a session for display.
///
/// Configuration names stay hidden while a blind session is running.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionView {
    pub mode: TestMode,
    pub state: SessionState,
    pub current_trial: usize,
    pub total_trials: usize,
    pub trim_db: f64,
    pub auto_trim_db: f64,
    pub trim_source: TrimSource,
    pub active_option: Option<OptionLabel>,
    pub config_a_name: Option<String>,
    pub config_b_name: Option<String>,
}

/// Finished session handed outward for persistence/display
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionReport {
    pub mode: TestMode,
    pub config_a: EqConfig,
    pub config_b: EqConfig,
    pub trim_db: f64,
    pub total_trials: usize,
    pub seed: u64,
    pub answers: Vec<Answer>,
    pub statistics: SessionStatistics,
}

/// A complete listening-test session.
///
/// Mutated only through its methods; once in `Results` every mutator
/// fails. A new run means a new `Session` value, never an in-place reset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    mode: TestMode,
    config_a: EqConfig,
    config_b: EqConfig,
    total_trials: usize,
    trim_override_db: Option<f64>,
    trim_db: f64,
    auto_trim_db: f64,
    trim_source: TrimSource,
    current_trial: usize,
    trials: Vec<Trial>,
    state: SessionState,
    active_option: Option<OptionLabel>,
    seed: u64,
    trial_started_ms: u64,
}

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

impl Session {
    /// Create a session in `Setup`.
    ///
    /// Validates both configurations, rejects identical curves (nothing to
    /// compare) and empty runs.
    pub fn new(params: SessionParams) -> EpResult<Self> {
        if params.total_trials < 1 {
            return Err(EpError::InvalidSession(
                "total trials must be at least 1".into(),
            ));
        }
        params.config_a.validate()?;
        params.config_b.validate()?;
        if params.config_a.same_curve(&params.config_b) {
            return Err(EpError::InvalidSession(
                "configurations A and B describe the same curve".into(),
            ));
        }
        if let Some(trim) = params.trim_override_db {
            if !trim.is_finite() {
                return Err(EpError::InvalidParam(format!(
                    "trim override must be finite, got {trim}"
                )));
            }
        }

        Ok(Self {
            mode: params.mode,
            config_a: params.config_a,
            config_b: params.config_b,
            total_trials: params.total_trials,
            trim_override_db: params.trim_override_db,
            trim_db: 0.0,
            auto_trim_db: 0.0,
            trim_source: TrimSource::Auto,
            current_trial: 0,
            trials: Vec::new(),
            state: SessionState::Setup,
            active_option: None,
            seed: 0,
            trial_started_ms: 0,
        })
    }

    /// Start the session with an entropy seed.
    pub fn start(&mut self) -> EpResult<()> {
        self.start_seeded(rand::random())
    }

    /// Start the session: compute the trim, pre-generate every trial's
    /// hidden mapping, transition to `Running`.
    ///
    /// The full trial list exists before trial one so the mapping balance
    /// is settled up front. The seed is kept for reproducibility.
    pub fn start_seeded(&mut self, seed: u64) -> EpResult<()> {
        match self.state {
            SessionState::Setup => {}
            SessionState::Running | SessionState::Results => {
                return Err(EpError::InvalidSession("session already started".into()));
            }
        }

        self.auto_trim_db = auto_trim(&self.config_a, &self.config_b)?;
        (self.trim_db, self.trim_source) = match self.trim_override_db {
            Some(trim) => (trim, TrimSource::Manual),
            None => (self.auto_trim_db, TrimSource::Auto),
        };

        let mut rng = StdRng::seed_from_u64(seed);
        let plan = generate_plan(self.mode, self.total_trials, &mut rng);
        log::debug!(
            "trial plan generated: {} trials, slot balance {:.2}",
            plan.len(),
            mapping_balance(&plan)
        );

        self.trials = plan.into_iter().map(Trial::from_plan).collect();
        self.seed = seed;
        self.current_trial = 0;
        self.active_option = None;
        self.trial_started_ms = now_ms();
        self.state = SessionState::Running;

        log::info!(
            "session started: {:?}, {} trials, trim {:.2} dB ({:?})",
            self.mode,
            self.total_trials,
            self.trim_db,
            self.trim_source
        );
        Ok(())
    }

    /// Resolve a label to the underlying configuration and the trim to
    /// bake into it. Side A always plays untrimmed; the trim rides on B.
    fn resolve(&self, label: OptionLabel) -> (&EqConfig, f64) {
        let trial = &self.trials[self.current_trial];
        let is_a = match label {
            OptionLabel::A => true,
            OptionLabel::B => false,
            OptionLabel::X => trial.x_is_a.unwrap_or(false),
            OptionLabel::Slot1 => trial.slot_one_is_a,
            OptionLabel::Slot2 => !trial.slot_one_is_a,
        };
        if is_a {
            (&self.config_a, 0.0)
        } else {
            (&self.config_b, self.trim_db)
        }
    }

    /// Switch playback to an option.
    ///
    /// Pure playback side effect: freely repeatable, never advances the
    /// trial. A sink failure surfaces and leaves the session untouched, so
    /// the listener can simply retry.
    pub fn apply_option(&mut self, label: OptionLabel, sink: &dyn AudioSink) -> EpResult<()> {
        if self.state != SessionState::Running {
            return Err(EpError::InvalidSession(
                "no running session to switch".into(),
            ));
        }
        if !label.playable_in(self.mode) {
            return Err(EpError::InvalidSession(format!(
                "option {} is not available in {:?} mode",
                label, self.mode
            )));
        }

        let (config, trim) = self.resolve(label);
        sink.apply(config, trim)?;
        self.active_option = Some(label);
        Ok(())
    }

    /// Record the answer for the current trial and advance.
    ///
    /// Each trial takes exactly one answer; a second call for the same
    /// trial is an error, never an overwrite. The last answer freezes the
    /// session in `Results`.
    pub fn record_answer(&mut self, choice: OptionLabel) -> EpResult<()> {
        if self.state != SessionState::Running {
            return Err(EpError::InvalidSession("no active trial to answer".into()));
        }
        if !choice.answerable_in(self.mode) {
            return Err(EpError::InvalidSession(format!(
                "{} is not a valid answer in {:?} mode",
                choice, self.mode
            )));
        }

        let now = now_ms();
        let trial_index = self.current_trial;
        let trial = &mut self.trials[trial_index];
        if trial.answer.is_some() {
            return Err(EpError::InvalidSession(format!(
                "trial {trial_index} already has an answer"
            )));
        }

        let correct = match self.mode {
            TestMode::Abx => {
                let guessed_a = choice == OptionLabel::A;
                Some(guessed_a == trial.x_is_a.unwrap_or(false))
            }
            TestMode::Ab | TestMode::BlindAb => None,
        };

        trial.answer = Some(Answer {
            trial_index,
            slot_one_is_a: trial.slot_one_is_a,
            x_is_a: trial.x_is_a,
            choice,
            correct,
            response_time_ms: now.saturating_sub(self.trial_started_ms),
            trim_db: self.trim_db,
        });

        self.current_trial += 1;
        self.trial_started_ms = now;
        self.active_option = None;
        log::debug!(
            "trial {} answered: {} ({}/{})",
            trial_index,
            choice,
            self.current_trial,
            self.total_trials
        );

        if self.current_trial >= self.total_trials {
            self.state = SessionState::Results;
            log::info!("session finished after {} trials", self.total_trials);
        }
        Ok(())
    }

    /// Change the live trim and replay the active option so the listener
    /// hears the new level immediately. Marks the trim as manual.
    pub fn update_trim(&mut self, new_trim_db: f64, sink: &dyn AudioSink) -> EpResult<()> {
        if self.state != SessionState::Running {
            return Err(EpError::InvalidSession(
                "trim can only change while running".into(),
            ));
        }
        if !new_trim_db.is_finite() {
            return Err(EpError::InvalidParam(format!(
                "trim must be finite, got {new_trim_db}"
            )));
        }

        self.trim_db = new_trim_db;
        self.trim_source = TrimSource::Manual;
        log::debug!("trim set to {:.2} dB (manual)", new_trim_db);
        self.replay_active(sink)
    }

    /// Explicitly return to the calculated trim.
    pub fn reset_trim_to_auto(&mut self, sink: &dyn AudioSink) -> EpResult<()> {
        if self.state != SessionState::Running {
            return Err(EpError::InvalidSession(
                "trim can only change while running".into(),
            ));
        }
        self.trim_db = self.auto_trim_db;
        self.trim_source = TrimSource::Auto;
        log::debug!("trim reset to auto ({:.2} dB)", self.trim_db);
        self.replay_active(sink)
    }

    fn replay_active(&mut self, sink: &dyn AudioSink) -> EpResult<()> {
        if let Some(label) = self.active_option {
            let (config, trim) = self.resolve(label);
            sink.apply(config, trim)?;
        }
        Ok(())
    }

    /// Blind-safe projection for display. Configuration names are revealed
    /// only once the session is over, or in sighted AB mode.
    pub fn view(&self) -> SessionView {
        let reveal = self.state == SessionState::Results || self.mode == TestMode::Ab;
        SessionView {
            mode: self.mode,
            state: self.state,
            current_trial: self.current_trial,
            total_trials: self.total_trials,
            trim_db: self.trim_db,
            auto_trim_db: self.auto_trim_db,
            trim_source: self.trim_source,
            active_option: self.active_option,
            config_a_name: reveal.then(|| self.config_a.name.clone()),
            config_b_name: reveal.then(|| self.config_b.name.clone()),
        }
    }

    /// Full un-blinded report with freshly computed statistics.
    /// Only available once the session reached `Results`.
    pub fn report(&self) -> EpResult<SessionReport> {
        if self.state != SessionState::Results {
            return Err(EpError::InvalidSession(
                "results are only available after the last trial".into(),
            ));
        }
        Ok(SessionReport {
            mode: self.mode,
            config_a: self.config_a.clone(),
            config_b: self.config_b.clone(),
            trim_db: self.trim_db,
            total_trials: self.total_trials,
            seed: self.seed,
            answers: self.answers().cloned().collect(),
            statistics: summarize(self)?,
        })
    }

    pub fn mode(&self) -> TestMode {
        self.mode
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn current_trial(&self) -> usize {
        self.current_trial
    }

    pub fn total_trials(&self) -> usize {
        self.total_trials
    }

    pub fn trim_db(&self) -> f64 {
        self.trim_db
    }

    pub fn auto_trim_db(&self) -> f64 {
        self.auto_trim_db
    }

    pub fn trim_source(&self) -> TrimSource {
        self.trim_source
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn active_option(&self) -> Option<OptionLabel> {
        self.active_option
    }

    /// Recorded answers in trial order
    pub fn answers(&self) -> impl Iterator<Item = &Answer> {
        self.trials.iter().filter_map(|t| t.answer.as_ref())
    }
}

/// Thread-safe session handle.
///
/// All transitions serialize behind one mutex; clones share the same
/// session (the single-logical-owner model, shared across UI tasks).
#[derive(Clone)]
pub struct SharedSession {
    inner: Arc<Mutex<Session>>,
}

impl SharedSession {
    pub fn new(session: Session) -> Self {
        Self {
            inner: Arc::new(Mutex::new(session)),
        }
    }

    pub fn lock(&self) -> MutexGuard<'_, Session> {
        self.inner.lock()
    }

    pub fn view(&self) -> SessionView {
        self.inner.lock().view()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::NullSink;
    use ep_core::{EqBand, FilterShape};

    fn config(name: &str, gain_db: f64) -> EqConfig {
        EqConfig::new(
            name,
            0.0,
            vec![EqBand::new(FilterShape::Peaking, 1000.0, gain_db, 1.0)],
        )
    }

    fn params(mode: TestMode, total_trials: usize) -> SessionParams {
        SessionParams {
            mode,
            config_a: config("warm", 3.0),
            config_b: config("bright", -3.0),
            total_trials,
            trim_override_db: None,
        }
    }

    #[test]
    fn test_new_rejects_zero_trials() {
        let result = Session::new(params(TestMode::Abx, 0));
        assert!(matches!(result, Err(EpError::InvalidSession(_))));
    }

    #[test]
    fn test_new_rejects_identical_curves() {
        let mut p = params(TestMode::BlindAb, 10);
        p.config_b = config("copy of warm", 3.0);
        assert!(matches!(
            Session::new(p),
            Err(EpError::InvalidSession(_))
        ));
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let mut p = params(TestMode::BlindAb, 10);
        p.config_a.bands[0].q = -2.0;
        assert!(matches!(Session::new(p), Err(EpError::InvalidParam(_))));
    }

    #[test]
    fn test_start_computes_auto_trim() {
        let mut session = Session::new(params(TestMode::BlindAb, 5)).unwrap();
        session.start_seeded(9).unwrap();
        // A peaks ~+3 dB, B peaks ~0 dB (cut only), so B gets ~+3 dB trim.
        assert!((session.trim_db() - 3.0).abs() < 0.2);
        assert_eq!(session.trim_source(), TrimSource::Auto);
        assert_eq!(session.state(), SessionState::Running);
    }

    #[test]
    fn test_trim_override_is_manual_from_the_start() {
        let mut p = params(TestMode::BlindAb, 5);
        p.trim_override_db = Some(-1.5);
        let mut session = Session::new(p).unwrap();
        session.start_seeded(9).unwrap();
        assert_eq!(session.trim_db(), -1.5);
        assert_eq!(session.trim_source(), TrimSource::Manual);
        // The calculated value is still reported alongside.
        assert!((session.auto_trim_db() - 3.0).abs() < 0.2);
    }

    #[test]
    fn test_double_start_fails() {
        let mut session = Session::new(params(TestMode::Abx, 3)).unwrap();
        session.start_seeded(1).unwrap();
        assert!(session.start_seeded(2).is_err());
    }

    #[test]
    fn test_operations_require_running_state() {
        let mut session = Session::new(params(TestMode::BlindAb, 3)).unwrap();
        let sink = NullSink;
        assert!(session.apply_option(OptionLabel::Slot1, &sink).is_err());
        assert!(session.record_answer(OptionLabel::Slot1).is_err());
        assert!(session.update_trim(1.0, &sink).is_err());
        assert!(session.report().is_err());
    }

    #[test]
    fn test_labels_are_checked_against_mode() {
        let mut session = Session::new(params(TestMode::BlindAb, 3)).unwrap();
        session.start_seeded(4).unwrap();
        let sink = NullSink;
        // Blind mode plays slots, not named sides.
        assert!(session.apply_option(OptionLabel::A, &sink).is_err());
        assert!(session.apply_option(OptionLabel::X, &sink).is_err());
        assert!(session.apply_option(OptionLabel::Slot1, &sink).is_ok());

        let mut abx = Session::new(params(TestMode::Abx, 3)).unwrap();
        abx.start_seeded(4).unwrap();
        assert!(abx.apply_option(OptionLabel::X, &sink).is_ok());
        // X is playable but identifies nothing.
        assert!(abx.record_answer(OptionLabel::X).is_err());
    }

    #[test]
    fn test_switching_never_advances_the_trial() {
        let mut session = Session::new(params(TestMode::BlindAb, 10)).unwrap();
        session.start_seeded(4).unwrap();
        let sink = NullSink;
        for _ in 0..50 {
            session.apply_option(OptionLabel::Slot1, &sink).unwrap();
            session.apply_option(OptionLabel::Slot2, &sink).unwrap();
        }
        assert_eq!(session.current_trial(), 0);
        assert_eq!(session.active_option(), Some(OptionLabel::Slot2));
    }

    #[test]
    fn test_full_run_reaches_results() {
        let mut session = Session::new(params(TestMode::BlindAb, 10)).unwrap();
        session.start_seeded(4).unwrap();
        for i in 0..10 {
            assert_eq!(session.current_trial(), i);
            session.record_answer(OptionLabel::Slot1).unwrap();
        }
        assert_eq!(session.state(), SessionState::Results);

        let report = session.report().unwrap();
        assert_eq!(report.answers.len(), 10);
        assert_eq!(
            report.statistics.preference_a + report.statistics.preference_b,
            10
        );
    }

    #[test]
    fn test_results_state_is_frozen() {
        let mut session = Session::new(params(TestMode::BlindAb, 1)).unwrap();
        session.start_seeded(4).unwrap();
        session.record_answer(OptionLabel::Slot1).unwrap();
        assert_eq!(session.state(), SessionState::Results);

        let sink = NullSink;
        assert!(session.record_answer(OptionLabel::Slot1).is_err());
        assert!(session.apply_option(OptionLabel::Slot1, &sink).is_err());
        assert!(session.update_trim(0.0, &sink).is_err());
        assert!(session.start_seeded(5).is_err());
    }

    #[test]
    fn test_abx_correctness_against_hidden_reference() {
        let mut session = Session::new(params(TestMode::Abx, 20)).unwrap();
        session.start_seeded(77).unwrap();
        for _ in 0..20 {
            session.record_answer(OptionLabel::A).unwrap();
        }
        let report = session.report().unwrap();
        for answer in &report.answers {
            // Guessing A is correct exactly when X was A that trial.
            assert_eq!(answer.correct, answer.x_is_a);
        }
    }

    #[test]
    fn test_same_seed_reproduces_hidden_mappings() {
        let run = |seed| {
            let mut s = Session::new(params(TestMode::Abx, 12)).unwrap();
            s.start_seeded(seed).unwrap();
            for _ in 0..12 {
                s.record_answer(OptionLabel::A).unwrap();
            }
            s.report()
                .unwrap()
                .answers
                .iter()
                .map(|a| (a.slot_one_is_a, a.x_is_a))
                .collect::<Vec<_>>()
        };
        assert_eq!(run(123), run(123));
    }

    #[test]
    fn test_manual_trim_survives_and_resets_explicitly() {
        let mut session = Session::new(params(TestMode::BlindAb, 5)).unwrap();
        session.start_seeded(4).unwrap();
        let auto = session.trim_db();
        let sink = NullSink;

        session.update_trim(-7.5, &sink).unwrap();
        assert_eq!(session.trim_db(), -7.5);
        assert_eq!(session.trim_source(), TrimSource::Manual);

        session.reset_trim_to_auto(&sink).unwrap();
        assert_eq!(session.trim_db(), auto);
        assert_eq!(session.trim_source(), TrimSource::Auto);
    }

    #[test]
    fn test_answer_records_trim_at_answer_time() {
        let mut session = Session::new(params(TestMode::BlindAb, 2)).unwrap();
        session.start_seeded(4).unwrap();
        let sink = NullSink;

        session.record_answer(OptionLabel::Slot1).unwrap();
        session.update_trim(-2.0, &sink).unwrap();
        session.record_answer(OptionLabel::Slot2).unwrap();

        let report = session.report().unwrap();
        assert_ne!(report.answers[0].trim_db, report.answers[1].trim_db);
        assert_eq!(report.answers[1].trim_db, -2.0);
    }

    #[test]
    fn test_blind_view_hides_names_until_results() {
        let mut session = Session::new(params(TestMode::BlindAb, 1)).unwrap();
        session.start_seeded(4).unwrap();
        let view = session.view();
        assert!(view.config_a_name.is_none());
        assert!(view.config_b_name.is_none());

        session.record_answer(OptionLabel::Slot1).unwrap();
        let view = session.view();
        assert_eq!(view.config_a_name.as_deref(), Some("warm"));
        assert_eq!(view.config_b_name.as_deref(), Some("bright"));
    }

    #[test]
    fn test_sighted_view_shows_names_while_running() {
        let mut session = Session::new(params(TestMode::Ab, 1)).unwrap();
        session.start_seeded(4).unwrap();
        let view = session.view();
        assert_eq!(view.config_a_name.as_deref(), Some("warm"));
    }

    #[test]
    fn test_shared_session_serializes_access() {
        let mut session = Session::new(params(TestMode::BlindAb, 2)).unwrap();
        session.start_seeded(4).unwrap();
        let shared = SharedSession::new(session);

        let clone = shared.clone();
        clone.lock().record_answer(OptionLabel::Slot1).unwrap();
        assert_eq!(shared.view().current_trial, 1);
    }

    #[test]
    fn test_option_label_round_trips_strings() {
        for label in [
            OptionLabel::A,
            OptionLabel::B,
            OptionLabel::X,
            OptionLabel::Slot1,
            OptionLabel::Slot2,
        ] {
            let parsed: OptionLabel = label.as_str().parse().unwrap();
            assert_eq!(parsed, label);
        }
        assert!("Q".parse::<OptionLabel>().is_err());
    }
}
