//! Question dispatch: classifier → tool → query → formatted answer.

use std::sync::Arc;

use chrono::{Local, NaiveDate};
use tracing::{debug, info};

use crate::error::DispatchError;
use crate::llm::{Intent, IntentClassifier};
use crate::store::InvoiceStore;
use crate::tools::{Tool, ToolCall};

/// Answers questions about a fixed invoice store.
///
/// Each [`resolve`](Dispatcher::resolve) call is independent: the only
/// shared state is the read-only store.
pub struct Dispatcher<C: IntentClassifier> {
    classifier: C,
    store: Arc<InvoiceStore>,
    today: Option<NaiveDate>,
}

impl<C: IntentClassifier> Dispatcher<C> {
    pub fn new(classifier: C, store: Arc<InvoiceStore>) -> Self {
        Self {
            classifier,
            store,
            today: None,
        }
    }

    /// Pin "today" instead of reading the local clock.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    pub fn store(&self) -> &InvoiceStore {
        &self.store
    }

    fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Local::now().date_naive())
    }

    /// Answer one question.
    ///
    /// At most one tool runs. A free-text reply from the classifier is
    /// returned verbatim.
    pub async fn resolve(&self, question: &str) -> Result<String, DispatchError> {
        info!(question_len = question.len(), "resolving question");

        let intent = self.classifier.classify(question, &Tool::ALL).await?;

        match intent {
            Intent::ToolCall { name, arguments } => {
                let call = parse_tool_call(&name, &arguments)?;
                info!(tool = %call.tool(), ?call, "classifier selected tool");

                let answer = call.execute(&self.store, self.today()).render();
                debug!(answer = %answer, "tool answer");
                Ok(answer)
            }
            Intent::Reply(text) => {
                debug!("classifier answered directly");
                Ok(text)
            }
        }
    }
}

/// Validate a tool selection from the classifier.
pub fn parse_tool_call(name: &str, arguments: &str) -> Result<ToolCall, DispatchError> {
    let tool: Tool = name.parse()?;
    tool.parse_call(arguments)
}
