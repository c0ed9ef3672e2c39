//! Session orchestration over an ordered question sequence.
//!
//! Questions run strictly in declaration order against a shared answer map.
//! Before each question the visibility gate is evaluated over the answers
//! committed so far; a skipped question contributes nothing, not even a null
//! entry. Dynamic fields resolve against the same immutable snapshot, so a
//! question can only ever observe answers from strictly earlier questions.

use crate::answers::Answers;
use crate::backend::{DialoguerBackend, PromptBackend};
use crate::error::{Error, Result};
use crate::prompt::Prompt;
use crate::question::QuestionSpec;
use crate::render::MiniJinjaRenderer;
use crate::style::{PromptConfig, SessionOptions};
use std::collections::HashSet;

/// An ordered prompt sequence bound to one backend.
pub struct Session<B: PromptBackend> {
    questions: Vec<QuestionSpec>,
    options: SessionOptions,
    backend: B,
    engine: MiniJinjaRenderer,
}

impl Session<DialoguerBackend> {
    /// A session against the interactive terminal backend.
    pub fn new(questions: Vec<QuestionSpec>) -> Result<Self> {
        Self::with_backend(questions, SessionOptions::default(), DialoguerBackend::new())
    }
}

impl<B: PromptBackend> Session<B> {
    /// Duplicate explicit names are rejected here, before any prompt runs.
    pub fn with_backend(
        questions: Vec<QuestionSpec>,
        options: SessionOptions,
        backend: B,
    ) -> Result<Self> {
        let mut seen = HashSet::new();
        for question in &questions {
            if let Some(name) = &question.name {
                if !seen.insert(name.clone()) {
                    return Err(Error::DuplicateName { name: name.clone() });
                }
            }
        }
        Ok(Self { questions, options, backend, engine: MiniJinjaRenderer::new() })
    }

    /// Runs every visible question in order and returns the answers keyed by
    /// name (positional index for unnamed questions). Any error discards the
    /// answers collected so far.
    pub fn run(self) -> Result<Answers> {
        let mut answers = Answers::new();
        for (index, question) in self.questions.iter().enumerate() {
            let key = question
                .name
                .clone()
                .unwrap_or_else(|| index.to_string());
            if !question.evaluate_when(&answers, &self.engine)? {
                log::debug!("skipping '{key}': gate evaluated to false");
                continue;
            }
            let message = question.resolve_message(&answers, &self.engine)?;
            let default = question.resolve_default(&answers, &self.engine)?;
            let choices = question.resolve_choices(&answers);
            let config = PromptConfig::resolve(&self.options, question);
            let status = Prompt::new(
                question,
                key.as_str(),
                message,
                default,
                &choices,
                config,
                &self.backend,
            )?
            .run()?;
            if let Some(result) = status.result {
                answers.insert(key, result);
            }
        }
        Ok(answers)
    }
}

/// Asks the questions on the interactive terminal with default options.
pub fn prompt(questions: Vec<QuestionSpec>) -> Result<Answers> {
    Session::new(questions)?.run()
}

/// Same as [`prompt`] with explicit session options.
pub fn prompt_with_options(
    questions: Vec<QuestionSpec>,
    options: SessionOptions,
) -> Result<Answers> {
    Session::with_backend(questions, options, DialoguerBackend::new())?.run()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::ScriptedBackend;

    #[test]
    fn duplicate_names_are_rejected_before_any_prompt() {
        let questions = vec![
            QuestionSpec::input("First").named("age"),
            QuestionSpec::input("Second").named("age"),
        ];
        let err = Session::with_backend(
            questions,
            SessionOptions::default(),
            ScriptedBackend::new(),
        )
        .err();
        assert!(matches!(err, Some(Error::DuplicateName { name }) if name == "age"));
    }

    #[test]
    fn unnamed_questions_key_by_position() {
        let questions = vec![
            QuestionSpec::input("First"),
            QuestionSpec::input("Second").named("second"),
            QuestionSpec::input("Third"),
        ];
        let backend = ScriptedBackend::new()
            .with_text("First", "a")
            .with_text("Second", "b")
            .with_text("Third", "c");
        let answers = Session::with_backend(questions, SessionOptions::default(), backend)
            .unwrap()
            .run()
            .unwrap();
        let keys: Vec<&str> = answers.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["0", "second", "2"]);
    }
}
