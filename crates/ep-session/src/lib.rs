//! ep-session: Blind listening-test engine for EarProof
//!
//! Drives randomized A/B, blind A/B, and ABX trial sessions between two EQ
//! configurations, with loudness-matching trim and defensible statistics.
//!
//! ## Architecture
//!
//! ```text
//! Session (Setup → Running → Results)
//!     │
//!     ├── TrialPlan (pre-generated balanced hidden mappings)
//!     ├── AudioSink (external audio-apply collaborator)
//!     ├── LoudnessModel (trim between the two configurations)
//!     └── SessionReport + SessionStatistics (at Results)
//! ```
//!
//! ## Modules
//! - `audio` - Audio-apply collaborator boundary
//! - `randomizer` - Balanced per-trial hidden-mapping generation
//! - `session` - Session state machine and views
//! - `stats` - Hypothesis tests, confidence interval, verdict
//! - `export` - JSON/CSV results export

pub mod audio;
pub mod export;
pub mod randomizer;
pub mod session;
pub mod stats;

pub use audio::{AudioSink, NullSink};
pub use export::{report_to_csv, report_to_json};
pub use randomizer::{TrialPlan, generate_plan, mapping_balance};
pub use session::{
    Answer, OptionLabel, Session, SessionParams, SessionReport, SessionState, SessionView,
    SharedSession, TestMode, Trial, TrimSource,
};
pub use stats::{SessionStatistics, summarize, summarize_answers};
