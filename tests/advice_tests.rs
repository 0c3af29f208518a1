use chrono::NaiveDate;
use rupeewise::advice::{
    build_prompt, AdviceOutcome, AdviceProvider, AdviceRequester, GeminiProvider,
    EMPTY_REPLY_MESSAGE, FAILURE_MESSAGE, MISSING_KEY_MESSAGE, SAMPLE_LIMIT,
};
use rupeewise::config::AdviceSettings;
use rupeewise::ledger::{Context, NewTransaction, Transaction};
use uuid::Uuid;

struct Canned(AdviceOutcome);

impl AdviceProvider for Canned {
    fn generate(&self, _prompt: &str) -> AdviceOutcome {
        self.0.clone()
    }
}

fn groceries(count: usize) -> Vec<Transaction> {
    let day = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
    (0..count)
        .map(|idx| {
            NewTransaction::expense(Context::Home, day, 100.0 + idx as f64, "Groceries")
                .into_transaction(Uuid::new_v4())
        })
        .collect()
}

#[test]
fn missing_credential_short_circuits() {
    let provider = GeminiProvider::new(None, &AdviceSettings::default());
    assert!(!provider.has_credential());

    let ledger = groceries(3);
    let listing: Vec<&Transaction> = ledger.iter().collect();
    let reply = AdviceRequester::new(provider).request(&listing, Context::Home);
    assert_eq!(reply, MISSING_KEY_MESSAGE);
}

#[test]
fn outcomes_map_to_display_text() {
    let ledger = groceries(2);
    let listing: Vec<&Transaction> = ledger.iter().collect();
    let ask = |outcome| AdviceRequester::new(Canned(outcome)).request(&listing, Context::Home);

    assert_eq!(ask(AdviceOutcome::Success("Cook at home.".into())), "Cook at home.");
    assert_eq!(ask(AdviceOutcome::Success("  ".into())), EMPTY_REPLY_MESSAGE);
    assert_eq!(ask(AdviceOutcome::Failure("503".into())), FAILURE_MESSAGE);
}

#[test]
fn prompt_samples_at_most_fifty_records() {
    let ledger = groceries(SAMPLE_LIMIT + 10);
    let listing: Vec<&Transaction> = ledger.iter().collect();
    let prompt = build_prompt(&listing, Context::Home).unwrap();

    assert!(prompt.contains("'Home' context"));
    assert_eq!(prompt.matches("\"category\":\"Groceries\"").count(), SAMPLE_LIMIT);
    assert!(prompt.contains("\"amount\":149.0"));
    assert!(!prompt.contains("\"amount\":150.0"));
}
