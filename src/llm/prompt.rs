//! Prompt construction for LLM requests.
//!
//! The prompt is a fixed instruction block describing the `Students` table,
//! followed by the user's question.

/// A worked question/SQL pair shown to the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptExample {
    pub question: String,
    pub sql: String,
}

impl PromptExample {
    pub fn new(question: impl Into<String>, sql: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            sql: sql.into(),
        }
    }
}

/// Instruction block prepended to every question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    /// Name of the single table the model may query.
    pub table: String,
    /// Column names of that table, in declaration order.
    pub columns: Vec<String>,
    /// Output rules, one per line.
    pub rules: Vec<String>,
    /// Few-shot examples.
    pub examples: Vec<PromptExample>,
}

impl Default for PromptTemplate {
    fn default() -> Self {
        Self {
            table: "Students".to_string(),
            columns: ["name", "class", "marks", "company"]
                .into_iter()
                .map(String::from)
                .collect(),
            rules: [
                "Only generate valid SQLite SQL",
                "Do NOT explain anything",
                "Do NOT add markdown",
                "Return ONLY the SQL query",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            examples: vec![
                PromptExample::new(
                    "How many entries are present?",
                    "SELECT COUNT(*) FROM Students;",
                ),
                PromptExample::new(
                    "Tell me all the students studying in MCom class?",
                    "SELECT * FROM Students WHERE class='MCom';",
                ),
            ],
        }
    }
}

impl PromptTemplate {
    /// Returns the static instruction block.
    pub fn instructions(&self) -> String {
        let mut text = String::from("\nYou are an expert in converting English questions to SQL queries.\n\n");

        text.push_str(&format!(
            "The SQLite database has ONE table named {} with the following columns:\n{}\n\n",
            self.table,
            self.columns.join(", ")
        ));

        text.push_str("Rules:\n");
        for rule in &self.rules {
            text.push_str(&format!("- {}\n", rule));
        }

        if !self.examples.is_empty() {
            text.push_str("\nExamples:\n");
            for example in &self.examples {
                text.push_str(&format!(
                    "\nQuestion: {}\nSQL: {}\n",
                    example.question, example.sql
                ));
            }
        }

        text
    }

    /// Renders the full prompt for a question.
    pub fn render(&self, question: &str) -> String {
        format!("{}\nQuestion: {}", self.instructions(), question)
    }
}
