mod feedback_sink;
mod scorer;

pub use feedback_sink::IFeedbackSink;
pub use scorer::IScorer;
