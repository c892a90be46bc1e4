//! Quiz session engine
//!
//! All game rules live here. No rendering, storage or wall-clock access:
//! - Time only moves through `QuizSession::tick`
//! - Seeded RNG only
//! - The UI reads snapshots and never mutates state directly

pub mod answer;
pub mod clock;
pub mod difficulty;
pub mod session;
pub mod state;

pub use answer::{generate_answer, generate_choices};
pub use clock::SessionClock;
pub use difficulty::DifficultyTracker;
pub use session::{EngineContext, QuizSession, SubscriptionId};
pub use state::{AnswerFeedback, AnswerOutcome, Phase, SessionSnapshot};
