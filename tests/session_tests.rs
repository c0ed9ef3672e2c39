//! End-to-end session behavior over the scripted backend.

mod utils;

use enquiry::{ChoiceSpec, Error, QuestionSpec, ScriptedBackend};
use serde_json::json;
use utils::run_scripted;

fn age_question() -> QuestionSpec {
    QuestionSpec::input("Enter your age:")
        .named("age")
        .with_default("18")
        .validate(|v| Ok(v.as_str().is_some_and(|s| s.parse::<i64>().is_ok())))
        .with_invalid_message("Input should be number.")
        .filter(|raw| {
            let n: i64 = raw
                .as_str()
                .and_then(|s| s.parse().ok())
                .ok_or_else(|| Error::ConfigError("not a number".into()))?;
            Ok(json!(n))
        })
}

#[test]
fn answers_carry_one_entry_per_asked_question() {
    let questions = vec![
        age_question(),
        QuestionSpec::confirm("Of legal age?")
            .named("adult")
            .ask_if("age >= 18")
            .with_default(true),
        QuestionSpec::input("Guardian name:").named("guardian").ask_if("age < 18"),
    ];
    let backend = ScriptedBackend::new()
        .with_text("Enter your age:", "25")
        .with_confirm("Of legal age?", true);
    let answers = run_scripted(questions, backend).unwrap();

    assert_eq!(answers.len(), 2);
    assert_eq!(answers.get("age"), Some(&json!(25)));
    assert_eq!(answers.get_bool("adult"), Some(true));
    // The skipped question contributes nothing, not even a null.
    assert!(!answers.contains("guardian"));
}

#[test]
fn filter_shapes_the_stored_value() {
    let backend = ScriptedBackend::new().with_text("Enter your age:", "25");
    let answers = run_scripted(vec![age_question()], backend).unwrap();
    assert_eq!(answers.get("age"), Some(&json!(25)));
}

#[test]
fn validation_failures_reprompt_without_failing_the_session() {
    let backend = ScriptedBackend::new()
        .with_text("Enter your age:", "not a number")
        .with_text("Enter your age:", "25");
    let answers = run_scripted(vec![age_question()], backend).unwrap();
    assert_eq!(answers.get("age"), Some(&json!(25)));
}

#[test]
fn computed_choices_observe_earlier_answers() {
    let questions = vec![
        age_question(),
        QuestionSpec::list("What drinks would you like to buy:")
            .named("drink")
            .with_computed_choices(|answers| {
                if answers.get_i64("age").unwrap_or(0) < 18 {
                    vec!["Soda".into(), "Milk".into()]
                } else {
                    vec!["Wine".into(), "Beer".into()]
                }
            }),
    ];
    let backend = ScriptedBackend::new()
        .with_text("Enter your age:", "15")
        .with_selection("What drinks would you like to buy:", "Milk");
    let answers = run_scripted(questions, backend).unwrap();
    assert_eq!(answers.get_str("drink"), Some("Milk"));
}

#[test]
fn adult_only_choices_are_never_offered_to_minors() {
    let questions = vec![
        age_question(),
        QuestionSpec::list("What drinks would you like to buy:")
            .named("drink")
            .with_computed_choices(|answers| {
                if answers.get_i64("age").unwrap_or(0) < 18 {
                    vec!["Soda".into(), "Milk".into()]
                } else {
                    vec!["Wine".into(), "Beer".into()]
                }
            }),
    ];
    let backend = ScriptedBackend::new()
        .with_text("Enter your age:", "15")
        .with_selection("What drinks would you like to buy:", "Wine");
    // "Wine" is not among the resolved choices; the scripted selection
    // cannot land anywhere.
    assert!(run_scripted(questions, backend).is_err());
}

#[test]
fn templated_message_interpolates_prior_answers() {
    let questions = vec![
        QuestionSpec::list("Pick a drink:")
            .named("drink")
            .with_choices(["Wine", "Beer"]),
        QuestionSpec::confirm("Buy a bottle of {{ drink }}?")
            .named("buy")
            .with_default(true),
    ];
    let backend = ScriptedBackend::new()
        .with_selection("Pick a drink:", "Wine")
        .with_confirm("Buy a bottle of Wine?", true);
    let answers = run_scripted(questions, backend).unwrap();
    assert_eq!(answers.get_bool("buy"), Some(true));
}

#[test]
fn when_reading_a_skipped_key_is_a_miss_not_an_error() {
    let questions = vec![
        QuestionSpec::confirm("First?").named("first").ask_if("false"),
        // "first" was never answered; the gate reads a miss and skips.
        QuestionSpec::confirm("Second?").named("second").ask_if("first == true"),
        QuestionSpec::confirm("Third?").named("third").with_default(true),
    ];
    let answers = run_scripted(questions, ScriptedBackend::new()).unwrap();
    assert_eq!(answers.len(), 1);
    assert_eq!(answers.get_bool("third"), Some(true));
}

#[test]
fn abort_mid_session_discards_every_answer() {
    let questions = vec![
        QuestionSpec::input("q1").named("a"),
        QuestionSpec::input("q2").named("b"),
        QuestionSpec::input("q3").named("c"),
        QuestionSpec::input("q4").named("d"),
        QuestionSpec::input("q5").named("e"),
    ];
    let backend = ScriptedBackend::new()
        .with_text("q1", "one")
        .with_text("q2", "two")
        .with_abort("q3");
    let err = run_scripted(questions, backend).unwrap_err();
    assert!(matches!(err, Error::Aborted));
}

#[test]
fn list_commits_values_never_separators() {
    let questions = vec![QuestionSpec::list("Pick:").named("pick").with_choices([
        ChoiceSpec::separator_with("-- fruits --"),
        ChoiceSpec::new("apple", "apple"),
        ChoiceSpec::disabled("banana", "banana", "out of stock"),
    ])];
    // Nothing scripted: the backend falls back to the first selectable
    // entry, which is neither the separator nor the disabled choice.
    let answers = run_scripted(questions, ScriptedBackend::new()).unwrap();
    assert_eq!(answers.get_str("pick"), Some("apple"));
}

#[test]
fn checkbox_commits_toggles_in_list_order() {
    let questions = vec![QuestionSpec::checkbox("Toppings:").named("toppings")
        .with_choices(["cheese", "ham", "olives"])];
    let backend =
        ScriptedBackend::new().with_toggled("Toppings:", ["olives", "cheese"]);
    let answers = run_scripted(questions, backend).unwrap();
    assert_eq!(answers.get("toppings"), Some(&json!(["cheese", "olives"])));
}

#[test]
fn checkbox_with_zero_toggles_stores_an_empty_array() {
    let questions = vec![QuestionSpec::checkbox("Toppings:")
        .named("toppings")
        .with_choices(["cheese", "ham"])];
    let backend = ScriptedBackend::new().with_toggled("Toppings:", []);
    let answers = run_scripted(questions, backend).unwrap();
    assert_eq!(answers.get("toppings"), Some(&json!([])));
}

#[test]
fn transformer_display_reaches_the_backend() {
    let questions = vec![QuestionSpec::input("Enter your age:")
        .named("age")
        .transform(|v| {
            Ok(if v.as_str().and_then(|s| s.parse::<i64>().ok()).unwrap_or(0) >= 18 {
                "Adult".to_string()
            } else {
                "Youth".to_string()
            })
        })];
    let backend = ScriptedBackend::new().with_text("Enter your age:", "25");
    let answers = run_scripted(questions, backend).unwrap();
    // The transformer changed only the echoed display; the stored answer is
    // the raw committed value.
    assert_eq!(answers.get_str("age"), Some("25"));
}

#[test]
fn secret_confirmation_retries_after_a_mismatch() {
    let questions = vec![QuestionSpec::secret("Set a passphrase:")
        .named("pass")
        .confirm_secret(Some("Entries must match.".to_string()))];
    let backend = ScriptedBackend::new()
        .with_secret_attempt("Set a passphrase:", "hunter2", "hunter3")
        .with_secret_attempt("Set a passphrase:", "hunter2", "hunter2");
    let answers = run_scripted(questions, backend).unwrap();
    assert_eq!(answers.get_str("pass"), Some("hunter2"));
}

#[test]
fn secret_mismatch_surfaces_the_configured_message() {
    let questions = vec![QuestionSpec::secret("Set a passphrase:")
        .named("pass")
        .confirm_secret(Some("Entries must match.".to_string()))];
    let backend =
        ScriptedBackend::new().with_secret_attempt("Set a passphrase:", "hunter2", "oops");
    let err = run_scripted(questions, backend).unwrap_err();
    assert!(err.to_string().contains("Entries must match."));
}

#[test]
fn secret_mismatch_falls_back_to_the_default_message() {
    let questions =
        vec![QuestionSpec::secret("Set a passphrase:").named("pass").confirm_secret(None)];
    let backend =
        ScriptedBackend::new().with_secret_attempt("Set a passphrase:", "hunter2", "oops");
    let err = run_scripted(questions, backend).unwrap_err();
    assert!(err.to_string().contains("Passwords do not match"));
}

#[test]
fn secret_without_confirmation_ignores_the_re_entry() {
    let questions = vec![QuestionSpec::secret("Token:").named("token")];
    let backend = ScriptedBackend::new().with_secret("Token:", "s3cret");
    let answers = run_scripted(questions, backend).unwrap();
    assert_eq!(answers.get_str("token"), Some("s3cret"));
}

#[test]
fn expand_walks_keys_to_values() {
    let questions = vec![QuestionSpec::expand("File exists:").named("action").with_choices([
        ChoiceSpec::new("Overwrite", "overwrite").keyed('o'),
        ChoiceSpec::new("Diff", "diff").keyed('d'),
        ChoiceSpec::new("Abort", "abort").keyed('x'),
    ])];
    let backend = ScriptedBackend::new().with_keypress("File exists:", 'd');
    let answers = run_scripted(questions, backend).unwrap();
    assert_eq!(answers.get_str("action"), Some("diff"));
}

#[test]
fn question_documents_run_end_to_end() {
    let questions: Vec<QuestionSpec> = serde_yaml::from_str(
        r#"
- type: input
  name: age
  message: "Enter your age:"
  default: "18"
- type: list
  name: drink
  message: "Would you like a drink:"
  choices: [Wine, Beer, Soda]
- type: confirm
  name: bag
  message: "Need a bag for the {{ drink }}?"
  default: true
  when: "drink == 'Wine'"
"#,
    )
    .unwrap();
    let backend = ScriptedBackend::new()
        .with_text("Enter your age:", "30")
        .with_selection("Would you like a drink:", "Wine")
        .with_confirm("Need a bag for the Wine?", false);
    let answers = run_scripted(questions, backend).unwrap();
    assert_eq!(answers.get_str("age"), Some("30"));
    assert_eq!(answers.get_str("drink"), Some("Wine"));
    assert_eq!(answers.get_bool("bag"), Some(false));
}
