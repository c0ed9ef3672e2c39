use enquiry::{ScriptedBackend, Session, SessionOptions};
use enquiry::{Answers, QuestionSpec, Result};

/// Initializes test logging once per binary; repeated calls are no-ops.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Runs the questions against a scripted backend with default options.
pub fn run_scripted(
    questions: Vec<QuestionSpec>,
    backend: ScriptedBackend,
) -> Result<Answers> {
    init_logging();
    Session::with_backend(questions, SessionOptions::default(), backend)?.run()
}
