//! Budget analyses from a text-generation backend
//!
//! Prompts are built from the user's current figures; the backend's reply is
//! free text from which the first balanced JSON object is extracted and
//! parsed. Each request carries a generation number, and a reply that
//! arrives after a newer request was issued is dropped.

pub mod gemini;
pub mod prompt;
pub mod reply;

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

pub use gemini::GeminiBackend;
pub use reply::{CutPlanSet, ExpenseReview, NegotiationScript, WasteReport};

use crate::error::{PocketError, PocketResult};
use crate::models::analysis::AnalysisReply;
use crate::models::{Expense, Money, PlanRequest, PurchaseGoalAnalysis, SavingsPlan};

/// Anything that turns a prompt into free text
pub trait AnalysisBackend: Send + Sync {
    fn generate(&self, prompt: &str) -> PocketResult<String>;
}

/// The first balanced `{...}` block in `text`, if any
///
/// Braces inside JSON string literals are ignored.
pub fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in text[start..].char_indices() {
        if in_string {
            match ch {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..=start + offset]);
                }
            }
            _ => {}
        }
    }
    None
}

/// Extract and deserialize the JSON object embedded in a reply
pub fn parse_reply<T: DeserializeOwned>(text: &str) -> PocketResult<T> {
    let json = extract_json_object(text)
        .ok_or_else(|| PocketError::Analysis("Reply did not contain a JSON object".into()))?;
    serde_json::from_str(json)
        .map_err(|e| PocketError::Analysis(format!("Failed to parse analysis reply: {}", e)))
}

/// Parse a savings-plan analysis, filling defaults for missing fields
pub fn parse_goal_analysis(text: &str, generated_at: DateTime<Utc>) -> PocketResult<PurchaseGoalAnalysis> {
    let reply: AnalysisReply = parse_reply(text)?;
    Ok(PurchaseGoalAnalysis::from_reply(reply, generated_at))
}

/// Tag attached to one analysis request
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Generation(u64);

/// Issues generation tags and tells whether a tag is still the newest
#[derive(Debug, Default)]
pub struct RequestGenerations {
    latest: AtomicU64,
}

impl RequestGenerations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tag a new request; every earlier tag becomes stale
    pub fn issue(&self) -> Generation {
        Generation(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_current(&self, generation: Generation) -> bool {
        self.latest.load(Ordering::SeqCst) == generation.0
    }
}

/// Runs analyses against a backend
pub struct Analyst {
    backend: Box<dyn AnalysisBackend>,
    generations: Arc<RequestGenerations>,
    currency_symbol: String,
}

impl Analyst {
    pub fn new(backend: Box<dyn AnalysisBackend>, currency_symbol: impl Into<String>) -> Self {
        Self::with_generations(backend, currency_symbol, Arc::new(RequestGenerations::new()))
    }

    /// Share a generation counter with other analysts
    pub fn with_generations(
        backend: Box<dyn AnalysisBackend>,
        currency_symbol: impl Into<String>,
        generations: Arc<RequestGenerations>,
    ) -> Self {
        Self {
            backend,
            generations,
            currency_symbol: currency_symbol.into(),
        }
    }

    /// Send a prompt and return the raw reply, or `None` if it went stale
    fn request(&self, prompt: &str) -> PocketResult<Option<String>> {
        let generation = self.generations.issue();
        let text = self.backend.generate(prompt).map_err(|e| {
            warn!(error = %e, "analysis request failed");
            e
        })?;

        if !self.generations.is_current(generation) {
            debug!(?generation, "discarding stale analysis reply");
            return Ok(None);
        }
        Ok(Some(text))
    }

    fn request_parsed<T: DeserializeOwned>(&self, prompt: &str) -> PocketResult<Option<T>> {
        match self.request(prompt)? {
            Some(text) => parse_reply(&text).map(Some),
            None => Ok(None),
        }
    }

    /// Viability and acceleration options for a plan
    pub fn analyze_plan(
        &self,
        plan: &SavingsPlan,
        request: &PlanRequest,
        expenses: &[Expense],
        now: DateTime<Utc>,
    ) -> PocketResult<Option<PurchaseGoalAnalysis>> {
        let prompt = prompt::savings_plan(plan, request, expenses, &self.currency_symbol);
        match self.request(&prompt)? {
            Some(text) => parse_goal_analysis(&text, now).map(Some),
            None => Ok(None),
        }
    }

    pub fn review_expenses(
        &self,
        expenses: &[Expense],
        monthly_income: Option<Money>,
    ) -> PocketResult<Option<ExpenseReview>> {
        self.request_parsed(&prompt::expense_review(
            expenses,
            monthly_income,
            &self.currency_symbol,
        ))
    }

    pub fn detect_waste(&self, expenses: &[Expense]) -> PocketResult<Option<WasteReport>> {
        self.request_parsed(&prompt::waste(expenses, &self.currency_symbol))
    }

    pub fn cut_plans(
        &self,
        expenses: &[Expense],
        target_savings: Money,
    ) -> PocketResult<Option<CutPlanSet>> {
        if !target_savings.is_positive() {
            return Err(PocketError::Validation(
                "Savings target must be greater than zero".into(),
            ));
        }
        self.request_parsed(&prompt::cut_plans(
            expenses,
            target_savings,
            &self.currency_symbol,
        ))
    }

    pub fn negotiation_script(&self, expense: &Expense) -> PocketResult<Option<NegotiationScript>> {
        self.request_parsed(&prompt::negotiation(expense, &self.currency_symbol))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExpenseCategory, Scenario};
    use std::sync::Mutex;

    /// Replies with canned text and records the prompts it saw
    struct CannedBackend {
        reply: String,
        prompts: Mutex<Vec<String>>,
    }

    impl CannedBackend {
        fn new(reply: &str) -> Self {
            Self {
                reply: reply.to_string(),
                prompts: Mutex::new(Vec::new()),
            }
        }
    }

    impl AnalysisBackend for CannedBackend {
        fn generate(&self, prompt: &str) -> PocketResult<String> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            Ok(self.reply.clone())
        }
    }

    /// Issues a newer request while "waiting" for its own reply
    struct OvertakenBackend {
        generations: Arc<RequestGenerations>,
    }

    impl AnalysisBackend for OvertakenBackend {
        fn generate(&self, _prompt: &str) -> PocketResult<String> {
            self.generations.issue();
            Ok(r#"{"tips": ["late"]}"#.into())
        }
    }

    #[test]
    fn test_extract_json_from_prose() {
        let text = "Sure! Here it is:\n```json\n{\"a\": {\"b\": 1}}\n```\nAnything else? {\"c\": 2}";
        assert_eq!(extract_json_object(text), Some("{\"a\": {\"b\": 1}}"));
    }

    #[test]
    fn test_extract_ignores_braces_in_strings() {
        let text = r#"{"reasoning": "use {curly} and \"quotes\" }", "tips": []} trailing"#;
        assert_eq!(
            extract_json_object(text),
            Some(r#"{"reasoning": "use {curly} and \"quotes\" }", "tips": []}"#)
        );
    }

    #[test]
    fn test_extract_none_when_unbalanced_or_missing() {
        assert!(extract_json_object("no json here").is_none());
        assert!(extract_json_object("{\"open\": true").is_none());
    }

    #[test]
    fn test_unparsable_reply_is_analysis_error() {
        let err = parse_reply::<WasteReport>("I cannot help with that").unwrap_err();
        assert!(matches!(err, PocketError::Analysis(_)));
    }

    #[test]
    fn test_goal_analysis_defaults() {
        let analysis = parse_goal_analysis("```{\"tips\": [\"cook\"]}```", Utc::now()).unwrap();
        assert!(analysis.viability.is_realistic);
        assert_eq!(analysis.viability.success_probability, 70.0);
        assert_eq!(analysis.viability.reasoning, "Analysis not available");
        assert_eq!(analysis.tips, vec!["cook".to_string()]);
    }

    #[test]
    fn test_generations() {
        let generations = RequestGenerations::new();
        let first = generations.issue();
        assert!(generations.is_current(first));
        let second = generations.issue();
        assert!(!generations.is_current(first));
        assert!(generations.is_current(second));
        assert!(second > first);
    }

    #[test]
    fn test_stale_reply_is_discarded() {
        let generations = Arc::new(RequestGenerations::new());
        let analyst = Analyst::with_generations(
            Box::new(OvertakenBackend {
                generations: generations.clone(),
            }),
            "$",
            generations,
        );
        assert!(analyst.detect_waste(&[]).unwrap().is_none());
    }

    #[test]
    fn test_waste_report() {
        let analyst = Analyst::new(
            Box::new(CannedBackend::new(
                r#"{"findings": [{"expenseName": "Streaming", "problem": "two services", "potentialSaving": 45.9, "recommendedAction": "cancel one"}]}"#,
            )),
            "$",
        );
        let expenses = vec![Expense::new(
            "Streaming",
            Money::from_units(90),
            ExpenseCategory::Subscriptions,
        )];

        let report = analyst.detect_waste(&expenses).unwrap().unwrap();
        assert_eq!(report.findings.len(), 1);
        assert_eq!(report.findings[0].expense_name, "Streaming");
    }

    #[test]
    fn test_analyze_plan_parses_scenarios() {
        let backend = CannedBackend::new(
            r#"Analysis: {"viability": {"isRealistic": true, "successProbability": 82, "reasoning": "comfortable"},
                "accelerationOptions": [{"scenario": "moderate", "monthsReduced": 1, "additionalMonthlySaving": 120}],
                "tips": []}"#,
        );
        let analyst = Analyst::new(Box::new(backend), "$");
        let request = PlanRequest {
            item: "Laptop".into(),
            target_amount: Money::from_units(3000),
            monthly_income: Money::from_units(5000),
            fixed_expenses: Money::from_units(2000),
            estimated_variable_expenses: Money::from_units(1500),
            custom_monthly_saving: None,
        };
        let today = chrono::NaiveDate::from_ymd_opt(2025, 1, 10).unwrap();
        let plan = crate::services::planner::project(&request, today).unwrap();

        let analysis = analyst
            .analyze_plan(&plan, &request, &[], Utc::now())
            .unwrap()
            .unwrap();
        assert_eq!(analysis.viability.success_probability, 82.0);
        assert_eq!(analysis.acceleration_options[0].scenario, Scenario::Moderate);
    }

    #[test]
    fn test_cut_plans_rejects_zero_target() {
        let analyst = Analyst::new(Box::new(CannedBackend::new("{}")), "$");
        let err = analyst.cut_plans(&[], Money::zero()).unwrap_err();
        assert!(err.is_validation());
    }
}
